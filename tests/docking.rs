//! Tests for dragging controls to new places in the layout

mod common;

use common::{drag, grip, id, notebook_and_bar, order, Probe};
use docksizer::dock::{DockControl, DockKind, DockTree, DragSize, LayoutSpec, NodeId};
use docksizer::input::Modifiers;
use docksizer::panel::ControlFactory;

/// Just inside the right edge of `control`'s panel, halfway down
fn right_edge_of(sizer: &docksizer::DockSizer, control: NodeId) -> (i32, i32) {
    let body = sizer.tree().bounds(control);
    (body.right() - 3, body.y + body.height / 2)
}

#[test]
fn test_drop_target_at_region_edge() {
    let sizer = notebook_and_bar();
    let c = id(&sizer, "c");
    let (x, y) = right_edge_of(&sizer, c);
    let info = sizer.dock_info_at(x, y, DragSize::new(100, 50, 22), false);
    assert_eq!(info.kind, DockKind::Right);
    assert_eq!(info.region, sizer.tree().parent(c));
}

#[test]
fn test_drop_far_outside_exports() {
    let sizer = notebook_and_bar();
    let info = sizer.dock_info_at(700, 150, DragSize::new(100, 50, 22), false);
    assert_eq!(info.kind, DockKind::Export);
    let info = sizer.dock_info_at(605, 150, DragSize::new(100, 50, 22), false);
    assert_eq!(info.kind, DockKind::Right);
    assert_eq!(info.region, None);
}

#[test]
fn test_tab_dragged_to_edge_gets_own_column() {
    let mut sizer = notebook_and_bar();
    let b = id(&sizer, "b");
    let c = id(&sizer, "c");
    let from = grip(&sizer, b);
    let to = right_edge_of(&sizer, c);
    drag(&mut sizer, from, to, Modifiers::NONE);

    assert_eq!(order(&sizer), vec!["a", "c", "b"]);
    let tree = sizer.tree();
    assert_eq!(tree.contents(tree.root()).len(), 3);
    // The notebook is down to one control and shows a drag bar again
    let a = id(&sizer, "a");
    assert!(!tree.is_notebook(tree.parent(a).unwrap_or(a)));
}

#[test]
fn test_drag_onto_bar_adds_tab() {
    let mut sizer = notebook_and_bar();
    let b = id(&sizer, "b");
    let c = id(&sizer, "c");
    let bar = sizer.tree().drag_bounds(c);
    let from = grip(&sizer, b);
    drag(&mut sizer, from, (bar.x + 100, bar.y + 7), Modifiers::NONE);

    let tree = sizer.tree();
    let region = tree.parent(c).expect("c has a region");
    assert!(tree.is_notebook(region));
    assert_eq!(tree.contents(region), vec![c, b]);
}

#[test]
fn test_shift_drag_onto_bar_nests_controls() {
    let mut sizer = notebook_and_bar();
    let b = id(&sizer, "b");
    let c = id(&sizer, "c");
    let bar = sizer.tree().drag_bounds(c);
    let from = grip(&sizer, b);
    drag(&mut sizer, from, (bar.x + 100, bar.y + 7), Modifiers::shift());

    let tree = sizer.tree();
    let grandparent = |id: NodeId| tree.parent(id).and_then(|p| tree.parent(p));
    let nested = grandparent(c).expect("c is nested");
    assert!(tree.section(nested).is_some_and(|s| s.is_row()));
    assert_eq!(grandparent(b), Some(nested));
    assert_eq!(order(&sizer), vec!["a", "c", "b"]);

    // The new section is the active entry of c's old region
    let host = tree.parent(nested).expect("nested section has a region");
    let index = tree.contents(host).iter().position(|n| *n == nested);
    assert_eq!(tree.region(host).and_then(|r| r.active()), index);
    // a keeps the notebook it shared with b
    let a = id(&sizer, "a");
    assert_eq!(tree.contents(tree.parent(a).expect("a has a region")), vec![a]);
}

#[test]
fn test_shift_drag_removes_emptied_region() {
    let mut sizer = common::laid_out(
        LayoutSpec::Section(vec![
            common::spec(common::control("a")),
            common::spec(common::control("b")),
            common::spec(common::control("c")),
        ]),
        600,
        300,
    );
    let b = id(&sizer, "b");
    let c = id(&sizer, "c");
    let old_parent = sizer.tree().parent(b).expect("b has a region");
    let bar = sizer.tree().drag_bounds(c);
    let from = grip(&sizer, b);
    drag(&mut sizer, from, (bar.x + 100, bar.y + 7), Modifiers::shift());

    let tree = sizer.tree();
    assert!(!tree.contains(old_parent));
    assert_eq!(tree.contents(tree.root()).len(), 2);
    assert_eq!(order(&sizer), vec!["a", "c", "b"]);

    let host = tree.parent(c).and_then(|r| tree.parent(r)).and_then(|s| tree.parent(s));
    let host = host.expect("c is nested under its old region");
    assert_eq!(tree.region(host).and_then(|r| r.active()), Some(0));
}

#[test]
fn test_lone_control_dropped_on_itself_stays() {
    let mut sizer = notebook_and_bar();
    let c = id(&sizer, "c");
    let region = sizer.tree().parent(c);
    let before = sizer.get_structure();
    let from = grip(&sizer, c);
    let to = common::center(sizer.tree().bounds(c));
    drag(&mut sizer, from, to, Modifiers::NONE);

    assert_eq!(sizer.tree().parent(c), region);
    assert_eq!(sizer.get_structure(), before);
}

#[test]
fn test_alt_drag_moves_notebook() {
    let mut sizer = notebook_and_bar();
    let a = id(&sizer, "a");
    let c = id(&sizer, "c");
    let notebook = sizer.tree().parent(a).expect("a is in a notebook");
    let from = grip(&sizer, a);
    let to = right_edge_of(&sizer, c);
    drag(&mut sizer, from, to, Modifiers::alt());

    assert_eq!(order(&sizer), vec!["c", "a", "b"]);
    let tree = sizer.tree();
    assert_eq!(tree.contents(tree.root()), vec![tree.parent(c).unwrap_or(c), notebook]);
    assert!(tree.is_notebook(notebook));
}

struct Copier;

impl ControlFactory for Copier {
    fn dock_control_for(&mut self, tree: &DockTree, original: NodeId) -> Option<DockControl> {
        let control = tree.control(original)?;
        let (probe, _) = Probe::new(100, 50);
        Some(DockControl::new(format!("{}-copy", control.id), control.name.clone()).with_panel(probe))
    }
}

#[test]
fn test_ctrl_drag_docks_a_copy() {
    let mut sizer = notebook_and_bar();
    sizer.hooks_mut().factory = Some(Box::new(Copier));
    let b = id(&sizer, "b");
    let c = id(&sizer, "c");
    let from = grip(&sizer, b);
    let to = right_edge_of(&sizer, c);
    drag(&mut sizer, from, to, Modifiers::ctrl());

    assert_eq!(order(&sizer), vec!["a", "b", "c", "b-copy"]);
    assert!(sizer.tree().is_notebook(sizer.tree().parent(b).unwrap_or(b)));
}

#[test]
fn test_ctrl_drag_without_factory_changes_nothing() {
    let mut sizer = notebook_and_bar();
    let b = id(&sizer, "b");
    let c = id(&sizer, "c");
    let before = sizer.get_structure();
    let from = grip(&sizer, b);
    let to = right_edge_of(&sizer, c);
    drag(&mut sizer, from, to, Modifiers::ctrl());
    assert_eq!(sizer.get_structure(), before);
}

#[test]
fn test_locked_control_does_not_drag() {
    let mut sizer = notebook_and_bar();
    sizer.toggle_lock();
    sizer.flush_pending_layout();
    let c = id(&sizer, "c");
    let a = id(&sizer, "a");
    let before = order(&sizer);
    let from = grip(&sizer, a);
    let to = right_edge_of(&sizer, c);
    drag(&mut sizer, from, to, Modifiers::NONE);
    assert_eq!(order(&sizer), before);
}
