//! Tests for feature icons, external drops and exporting controls

mod common;

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use common::{control, drag, grip, id, sizer, spec, RecordingSurface};
use docksizer::commands::Cmd;
use docksizer::dock::{
    DockControl, DockSizer, Feature, FeatureFactory, FeatureMode, LayoutSpec, NodeId,
};
use docksizer::geometry::Rect;
use docksizer::input::{Modifiers, PointerEvent};
use docksizer::panel::{Dockable, DragOutcome, DragSource, Icon};
use docksizer::theme::DockPalette;

/// Accepts dropped `String`s and counts them
struct Bookmark {
    icon: Icon,
    dropped: Rc<Cell<usize>>,
}

impl Feature for Bookmark {
    fn bitmap(&self) -> Option<&Icon> {
        Some(&self.icon)
    }

    fn can_drop(&self, object: &dyn Any) -> bool {
        object.is::<String>()
    }

    fn on_drop(&mut self, object: &dyn Any) -> bool {
        if object.is::<String>() {
            self.dropped.set(self.dropped.get() + 1);
            true
        } else {
            false
        }
    }
}

struct Bookmarks {
    dropped: Rc<Cell<usize>>,
}

impl FeatureFactory for Bookmarks {
    fn name(&self) -> &str {
        "bookmarks"
    }

    fn new_features_for(&self, control: &DockControl) -> Vec<Box<dyn Feature>> {
        if control.id != "c" {
            return Vec::new();
        }
        vec![Box::new(Bookmark {
            icon: Icon::solid(7, 0xFF3366CC),
            dropped: Rc::clone(&self.dropped),
        })]
    }
}

/// `a | c` where `c` carries a bookmark feature, laid out and drawn once
fn with_bookmarks() -> (DockSizer, Rc<Cell<usize>>) {
    let dropped = Rc::new(Cell::new(0));
    let mut sizer = sizer();
    sizer.tree_mut().registry_mut().add(Box::new(Bookmarks {
        dropped: Rc::clone(&dropped),
    }));
    sizer
        .set_contents(LayoutSpec::Section(vec![spec(control("a")), spec(control("c"))]))
        .unwrap();
    sizer.calc_min();
    sizer.recalc_sizes(Rect::new(0, 0, 409, 200));
    sizer.draw(&mut RecordingSurface::default(), &DockPalette::classic());
    (sizer, dropped)
}

#[test]
fn test_factory_applies_to_matching_controls() {
    let (sizer, _) = with_bookmarks();
    let tree = sizer.tree();
    assert_eq!(tree.feature_mode(id(&sizer, "c")), FeatureMode::Normal);
    assert_eq!(tree.feature_mode(id(&sizer, "a")), FeatureMode::None);
    assert_eq!(tree.registry().names(), vec!["bookmarks"]);
}

#[test]
fn test_feature_moves_close_button_along() {
    let dropped = Rc::new(Cell::new(0));
    let mut sizer = sizer();
    sizer
        .tree_mut()
        .registry_mut()
        .add(Box::new(Bookmarks { dropped }));
    sizer
        .set_contents(spec(control("c").with_closeable(true)))
        .unwrap();
    sizer.calc_min();
    sizer.recalc_sizes(Rect::new(0, 0, 200, 100));

    let c = id(&sizer, "c");
    let tree = sizer.tree();
    let trigger = tree.feature_trigger_bounds(c);
    let close = tree.close_bounds(c);
    assert_eq!(trigger, Rect::new(10, 4, 7, 7));
    assert!(close.x >= trigger.right());
}

#[test]
fn test_hovering_trigger_pops_up_feature_bar() {
    let (mut sizer, _) = with_bookmarks();
    let c = id(&sizer, "c");
    let trigger = sizer.tree().feature_trigger_bounds(c);
    let start = Instant::now();

    let hover = PointerEvent::new(trigger.x + 2, trigger.y + 2).at(start);
    sizer.pointer_motion(&hover);
    assert!(sizer.tree().control(c).is_some_and(|c| c.features().popup_pending()));

    let early = sizer.poll_timers(start + Duration::from_millis(50));
    assert!(!early.flatten().contains(&Cmd::FeatureBarPopup(c)));

    let due = sizer.poll_timers(start + Duration::from_millis(150));
    assert!(due.flatten().contains(&Cmd::FeatureBarPopup(c)));
    assert_eq!(sizer.tree().feature_mode(c), FeatureMode::Visible);

    sizer.tree_mut().feature_bar_closed(c);
    assert_eq!(sizer.tree().feature_mode(c), FeatureMode::Normal);
}

#[test]
fn test_moving_off_trigger_cancels_popup() {
    let (mut sizer, _) = with_bookmarks();
    let c = id(&sizer, "c");
    let trigger = sizer.tree().feature_trigger_bounds(c);
    let start = Instant::now();

    sizer.pointer_motion(&PointerEvent::new(trigger.x + 2, trigger.y + 2).at(start));
    sizer.pointer_motion(&PointerEvent::new(5, 100).at(start));
    let cmd = sizer.poll_timers(start + Duration::from_millis(150));
    assert!(!cmd.flatten().contains(&Cmd::FeatureBarPopup(c)));
    assert_eq!(sizer.tree().feature_mode(c), FeatureMode::Normal);
}

#[test]
fn test_leaving_trigger_along_same_bar_cancels_popup() {
    let (mut sizer, _) = with_bookmarks();
    let c = id(&sizer, "c");
    let trigger = sizer.tree().feature_trigger_bounds(c);
    let bar = sizer.tree().drag_bounds(c);
    let start = Instant::now();

    sizer.pointer_motion(&PointerEvent::new(trigger.x + 2, trigger.y + 2).at(start));
    let along = (bar.right() - 20, bar.y + 3);
    assert!(!trigger.contains(along.0, along.1));
    assert!(bar.contains(along.0, along.1));
    let later = start + Duration::from_millis(20);
    sizer.pointer_motion(&PointerEvent::new(along.0, along.1).at(later));

    let cmd = sizer.poll_timers(start + Duration::from_millis(150));
    assert!(!cmd.flatten().contains(&Cmd::FeatureBarPopup(c)));
    assert_eq!(sizer.tree().feature_mode(c), FeatureMode::Normal);
    assert!(!sizer.tree().control(c).is_some_and(|c| c.features().popup_pending()));
}

#[test]
fn test_external_drop_reaches_accepting_feature() {
    let (mut sizer, dropped) = with_bookmarks();
    let c = id(&sizer, "c");
    let payload = String::from("notes.txt");
    let bar = sizer.tree().drag_bounds(c);

    sizer.tree_mut().external_drag_enter(&payload);
    assert_eq!(sizer.tree().feature_mode(c), FeatureMode::Drop);

    let over = PointerEvent::new(bar.x + 100, bar.y + 5);
    assert!(sizer.tree_mut().external_drop(&over, &payload));
    assert_eq!(dropped.get(), 1);
    assert_eq!(sizer.tree().feature_mode(c), FeatureMode::Normal);
}

#[test]
fn test_external_drag_of_unknown_payload_disables_icons() {
    let (mut sizer, dropped) = with_bookmarks();
    let c = id(&sizer, "c");
    let bar = sizer.tree().drag_bounds(c);

    sizer.tree_mut().external_drag_enter(&42_u32);
    assert_eq!(sizer.tree().feature_mode(c), FeatureMode::Disabled);
    let over = PointerEvent::new(bar.x + 100, bar.y + 5);
    assert!(!sizer.tree_mut().external_drop(&over, &42_u32));
    assert_eq!(dropped.get(), 0);
    assert_eq!(sizer.tree().feature_mode(c), FeatureMode::Normal);
}

// ============================================================================
// Export
// ============================================================================

struct KeepOpen;

impl Dockable for KeepOpen {
    fn close(&mut self, _control: NodeId, _force: bool) -> bool {
        false
    }
}

#[derive(Default)]
struct Recorder {
    started: Rc<RefCell<Vec<(NodeId, String)>>>,
    outcome: Option<DragOutcome>,
}

impl DragSource for Recorder {
    fn start_drag(
        &mut self,
        control: NodeId,
        export: &str,
        _payload: Option<&dyn Any>,
    ) -> DragOutcome {
        self.started.borrow_mut().push((control, export.to_string()));
        self.outcome.unwrap_or(DragOutcome::None)
    }
}

fn exportable() -> DockSizer {
    common::laid_out(
        LayoutSpec::Section(vec![
            spec(control("a")),
            spec(
                control("c")
                    .with_export("text/x-notes")
                    .with_dockable(KeepOpen),
            ),
        ]),
        409,
        200,
    )
}

#[test]
fn test_dragging_out_of_window_exports_control() {
    let mut sizer = exportable();
    let started = Rc::new(RefCell::new(Vec::new()));
    sizer.hooks_mut().drag_source = Some(Box::new(Recorder {
        started: Rc::clone(&started),
        outcome: None,
    }));
    let c = id(&sizer, "c");
    let from = grip(&sizer, c);
    let cmds = drag(&mut sizer, from, (700, 100), Modifiers::NONE).flatten();

    assert_eq!(*started.borrow(), vec![(c, "text/x-notes".to_string())]);
    // Nobody took it, so the host is asked to open it elsewhere
    assert!(cmds.contains(&Cmd::OpenViewFor(c)));
    assert!(!sizer.is_capturing());
    assert_eq!(sizer.tree().find_control("c"), Some(c));
}

#[test]
fn test_accepted_export_needs_no_fallback() {
    let mut sizer = exportable();
    sizer.hooks_mut().drag_source = Some(Box::new(Recorder {
        outcome: Some(DragOutcome::Moved),
        ..Recorder::default()
    }));
    let c = id(&sizer, "c");
    let from = grip(&sizer, c);
    let cmds = drag(&mut sizer, from, (700, 100), Modifiers::NONE).flatten();
    assert!(!cmds.contains(&Cmd::OpenViewFor(c)));
}

#[test]
fn test_export_without_drag_source_keeps_layout() {
    let mut sizer = exportable();
    let before = sizer.get_structure();
    let c = id(&sizer, "c");
    let from = grip(&sizer, c);
    drag(&mut sizer, from, (700, 100), Modifiers::NONE);
    assert_eq!(sizer.get_structure(), before);
}
