//! Pointer handling: hover, press/drag/release and external drags
//!
//! The host forwards primary-button pointer events to `DockSizer`, which
//! routes them here. A press captures the object under the pointer (a
//! control's tab or drag bar, a splitter, or a tab scroller) and every
//! following move and the release go to that capture until it ends.

use std::any::Any;

use crate::commands::Cmd;
use crate::geometry::Rect;
use crate::input::{CursorKind, PointerEvent};
use crate::panel::{ControlFactory, DragSource};

use super::constants::DRAG_THRESHOLD;
use super::control::DockStyle;
use super::dock_info::{DockInfo, DockKind, DragSize};
use super::region::{ScrollRequest, TabState};
use super::splitter::{DockSplitter, SplitterStyle};
use super::tree::{DockTree, NodeId, NodeKind};

/// Something under the pointer that reacts to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// A control or group (via its tab or drag bar), or a region's scroller
    Node(NodeId),
    /// The `index`th splitter of a section
    Splitter { section: NodeId, index: usize },
}

impl DockTree {
    /// Innermost interactive object at the point. With `force` a section
    /// containing the point answers for itself.
    pub fn object_at(&self, id: NodeId, x: i32, y: i32, force: bool) -> Option<HitTarget> {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Region(_)) => self.object_at_region(id, x, y),
            Some(NodeKind::Section(_)) => self.object_at_section(id, x, y, force),
            _ => None,
        }
    }

    /// Cursor to show over `target` at the point
    pub fn cursor_for(&self, target: Option<HitTarget>, x: i32, y: i32) -> CursorKind {
        match target {
            Some(HitTarget::Splitter { section, index }) => self
                .section(section)
                .and_then(|s| s.splitters().get(index))
                .map_or(CursorKind::Arrow, |sp| sp.cursor_at(x, y)),
            Some(HitTarget::Node(id)) => {
                if self.control(id).is_none()
                    || self.is_tab(id)
                    || self.close_bounds(id).contains(x, y)
                {
                    CursorKind::Arrow
                } else {
                    CursorKind::Hand
                }
            }
            None => CursorKind::Arrow,
        }
    }

    // ------------------------------------------------------------------------
    // External drag and drop over the dock area
    // ------------------------------------------------------------------------

    /// An external drag carrying `object` entered the dock area
    pub fn external_drag_enter(&mut self, object: &dyn Any) {
        self.pre_drag_all(object);
    }

    /// The external drag moved; returns whether it is over a feature trigger
    pub fn external_drag_over(&mut self, event: &PointerEvent, object: &dyn Any) -> bool {
        match self.control_under(event) {
            Some(id) => self.feature_activate(id, event, Some(object)),
            None => false,
        }
    }

    pub fn external_drag_leave(&mut self) {
        self.post_drag_all();
    }

    /// The external drag was dropped; returns whether a feature took it
    pub fn external_drop(&mut self, event: &PointerEvent, object: &dyn Any) -> bool {
        let accepted = self
            .control_under(event)
            .is_some_and(|id| self.drop_on_features(id, object));
        self.post_drag_all();
        accepted
    }

    fn control_under(&self, event: &PointerEvent) -> Option<NodeId> {
        match self.object_at(self.root(), event.x, event.y, false)? {
            HitTarget::Node(id) if self.control(id).is_some() => Some(id),
            _ => None,
        }
    }
}

// ============================================================================
// Pointer capture
// ============================================================================

/// Optional collaborators used by drag gestures
#[derive(Default)]
pub struct DragHooks {
    /// Creates the copy for a Ctrl-drag
    pub factory: Option<Box<dyn ControlFactory>>,
    /// Runs the platform drag when a control is dragged out of the dock area
    pub drag_source: Option<Box<dyn DragSource>>,
}

/// What the host draws inverted on top of the layout during a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOverlay {
    /// A control is being dragged; the dock area is marked and the current
    /// drop target previewed
    Dock(DockInfo),
    /// A splitter is being dragged to this tracking rectangle
    Splitter(Rect),
}

#[derive(Debug, Clone, Copy)]
struct ItemDrag {
    item: NodeId,
    origin: (i32, i32),
    closing: bool,
    dragging: bool,
    size: DragSize,
    info: DockInfo,
}

#[derive(Debug, Clone, Copy)]
struct SplitterDrag {
    section: NodeId,
    index: usize,
    origin: (i32, i32),
    /// Press landed on the handle: toggle on release instead of dragging
    click: bool,
    limits: Rect,
    style: SplitterStyle,
    tracked: Rect,
}

#[derive(Debug, Clone, Copy)]
enum Capture {
    Item(ItemDrag),
    Splitter(SplitterDrag),
    Scroller {
        region: NodeId,
        button: ScrollRequest,
    },
}

/// Pointer state between events
#[derive(Debug, Default)]
pub struct PointerTracker {
    capture: Option<Capture>,
    hover: Option<HitTarget>,
}

impl PointerTracker {
    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Object currently under the (unpressed) pointer
    pub fn hover(&self) -> Option<HitTarget> {
        self.hover
    }

    pub fn overlay(&self) -> Option<DragOverlay> {
        match self.capture? {
            Capture::Item(d) if d.dragging => Some(DragOverlay::Dock(d.info)),
            Capture::Splitter(s) if !s.click => Some(DragOverlay::Splitter(
                DockSplitter::tracking_rect(s.style, s.tracked),
            )),
            _ => None,
        }
    }

    /// Drop any capture without committing it
    pub fn cancel(&mut self, tree: &mut DockTree) {
        if self.overlay().is_some() {
            tree.push_cmd(Cmd::Redraw);
        }
        self.capture = None;
    }

    // ------------------------------------------------------------------------
    // Press
    // ------------------------------------------------------------------------

    pub fn press(&mut self, tree: &mut DockTree, event: &PointerEvent) {
        let (x, y) = event.position();
        self.capture = None;
        let Some(hit) = tree.object_at(tree.root(), x, y, false) else {
            return;
        };
        tracing::trace!("Press at ({}, {}) on {:?}", x, y, hit);

        self.capture = match hit {
            HitTarget::Splitter { section, index } => {
                let Some(sp) = tree.section(section).and_then(|s| s.splitters().get(index))
                else {
                    return;
                };
                let click = sp.hot_spot().contains(x, y);
                let (style, tracked) = (sp.style(), sp.bounds());
                let limits = if click {
                    Rect::ZERO
                } else {
                    tree.splitter_bounds(section, index).unwrap_or(tracked)
                };
                if !click {
                    tree.push_cmd(Cmd::Redraw);
                }
                Some(Capture::Splitter(SplitterDrag {
                    section,
                    index,
                    origin: (x, y),
                    click,
                    limits,
                    style,
                    tracked,
                }))
            }
            HitTarget::Node(id) if tree.region(id).is_some() => tree
                .scroll_button_at(id, x, y)
                .map(|button| Capture::Scroller { region: id, button }),
            HitTarget::Node(item) => Some(Capture::Item(ItemDrag {
                item,
                origin: (x, y),
                closing: tree.close_bounds(item).contains(x, y),
                dragging: false,
                size: DragSize::default(),
                info: DockInfo::NONE,
            })),
        };
    }

    // ------------------------------------------------------------------------
    // Motion
    // ------------------------------------------------------------------------

    /// Pointer moved; drives the capture if there is one, else hover
    pub fn motion(&mut self, tree: &mut DockTree, hooks: &mut DragHooks, event: &PointerEvent) {
        match self.capture {
            Some(Capture::Item(mut d)) => {
                if Self::drag_item(tree, hooks, &mut d, event) {
                    self.capture = Some(Capture::Item(d));
                } else {
                    self.capture = None;
                }
            }
            Some(Capture::Splitter(mut s)) => {
                if s.click {
                    return;
                }
                let Some(sp) = tree
                    .section(s.section)
                    .and_then(|sec| sec.splitters().get(s.index))
                else {
                    return;
                };
                let bounds = sp.dragged(event.x - s.origin.0, event.y - s.origin.1, s.limits);
                if bounds != s.tracked {
                    s.tracked = bounds;
                    self.capture = Some(Capture::Splitter(s));
                    tree.push_cmd(Cmd::Redraw);
                }
            }
            Some(Capture::Scroller { .. }) => {}
            None => self.hover_at(tree, event),
        }
    }

    /// Returns false once the capture has ended (after an export drag)
    fn drag_item(
        tree: &mut DockTree,
        hooks: &mut DragHooks,
        d: &mut ItemDrag,
        event: &PointerEvent,
    ) -> bool {
        let item = d.item;
        if d.closing || tree.is_locked(item) || tree.style(item) == DockStyle::Fixed {
            return true;
        }
        let (x, y) = event.position();

        if !d.dragging {
            if (d.origin.0 - x).abs() + (d.origin.1 - y).abs() < DRAG_THRESHOLD {
                return true;
            }
            let min = tree.calc_min(item, false);
            d.dragging = true;
            d.info = DockInfo::NONE;
            d.size = DragSize::new(min.width, min.height, tree.tab_width(item));
            tracing::debug!("Started dragging {}", item);
            tree.push_cmd(Cmd::Redraw);
        }

        let root = tree.root();
        let info = tree
            .dock_info_at_section(root, x, y, d.size, event.modifiers.shift, true)
            .unwrap_or(DockInfo::NONE);
        if info.same_target(&d.info) {
            return true;
        }
        tracing::trace!("Drag target of {} is now {:?}", item, info.kind);
        tree.push_cmd(Cmd::Redraw);

        let region = tree.parent(item);
        let onto_itself = info.region.is_some()
            && info.region == region
            && (tree.contents(info.region.unwrap_or(item)).len() <= 1
                || (info.kind.is_tab_like() && info.control == Some(item)));
        if !event.modifiers.ctrl && onto_itself {
            d.info = DockInfo::NONE;
            tree.push_cmd(Cmd::SetCursor(CursorKind::Sizing));
            return true;
        }
        d.info = info;

        let exportable = !tree.export(item).is_empty()
            && tree.control(item).is_some_and(|c| c.has_dockable());
        if info.kind == DockKind::Export && exportable {
            if let Some(source) = hooks.drag_source.as_deref_mut() {
                export_drag(tree, source, item);
                return false;
            }
        }

        let cursor = if info.kind == DockKind::Bar {
            CursorKind::Hand
        } else {
            CursorKind::Sizing
        };
        tree.push_cmd(Cmd::SetCursor(cursor));
        true
    }

    fn hover_at(&mut self, tree: &mut DockTree, event: &PointerEvent) {
        let (x, y) = event.position();
        let hit = tree.object_at(tree.root(), x, y, false);
        if hit != self.hover {
            if let Some(HitTarget::Node(old)) = self.hover {
                hover_exit(tree, old);
            }
            if let Some(HitTarget::Node(new)) = hit {
                hover_enter(tree, new);
            }
            self.hover = hit;
        }
        if let Some(HitTarget::Node(id)) = hit {
            tree.feature_activate(id, event, None);
        }
        let cursor = tree.cursor_for(hit, x, y);
        tree.push_cmd(Cmd::SetCursor(cursor));
    }

    /// The pointer left the dock area
    pub fn leave(&mut self, tree: &mut DockTree) {
        if let Some(HitTarget::Node(old)) = self.hover.take() {
            hover_exit(tree, old);
        }
    }

    // ------------------------------------------------------------------------
    // Release
    // ------------------------------------------------------------------------

    pub fn release(&mut self, tree: &mut DockTree, hooks: &mut DragHooks, event: &PointerEvent) {
        let Some(capture) = self.capture.take() else {
            return;
        };
        let (x, y) = event.position();
        match capture {
            Capture::Item(d) => Self::release_item(tree, hooks, d, event),
            Capture::Splitter(s) => {
                release_splitter(tree, s, x, y);
            }
            Capture::Scroller { region, button } => {
                if tree.scroll_button_at(region, x, y) == Some(button) {
                    tree.scroll_region(region, button);
                }
            }
        }
    }

    fn release_item(tree: &mut DockTree, hooks: &mut DragHooks, d: ItemDrag, event: &PointerEvent) {
        let (x, y) = event.position();
        let item = d.item;

        if d.closing {
            if tree.close_bounds(item).contains(x, y) {
                tree.close(item, true, false);
            }
            return;
        }

        if !d.dragging {
            if tree.is_tab(item) && tree.drag_bounds(item).contains(x, y) {
                if let Some(region) = tree.parent(item) {
                    tree.tab_clicked(region, item);
                }
            }
            return;
        }

        tree.push_cmd(Cmd::Redraw);
        let info = d.info;
        let mut control = item;
        if event.modifiers.alt {
            // Move the whole notebook (or the group holding the bar)
            let Some(mut group) = tree.parent(item) else {
                return;
            };
            if tree.region(group).is_some() && !tree.is_notebook(group) {
                match tree.parent(group) {
                    Some(p) => group = p,
                    None => return,
                }
            }
            if group == tree.root() || info.region.is_some_and(|r| tree.is_ancestor(group, r)) {
                tracing::debug!("Refusing to dock {} inside itself", group);
                return;
            }
            control = group;
        } else if event.modifiers.ctrl {
            if !info.kind.is_dockable() {
                return;
            }
            let Some(factory) = hooks.factory.as_deref_mut() else {
                return;
            };
            let Some(copy) = factory.dock_control_for(tree, item) else {
                return;
            };
            control = tree.insert_control(copy);
            tracing::debug!("Created copy {} of {}", control, item);
        }
        tree.dock(&info, control);
    }
}

/// Clears the external-drag state of every control when dropped, so an
/// unwinding drag source cannot leave tags set
struct ExportGuard<'a> {
    tree: &'a mut DockTree,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.tree.post_drag_all();
        self.tree.push_cmd(Cmd::SetCursor(CursorKind::Arrow));
        self.tree.push_cmd(Cmd::Redraw);
    }
}

fn export_drag(tree: &mut DockTree, source: &mut dyn DragSource, item: NodeId) {
    let guard = ExportGuard { tree };
    let outcome = {
        let tree: &DockTree = &*guard.tree;
        let export = tree.export(item);
        let payload = tree
            .control(item)
            .and_then(|c| c.panel())
            .and_then(|p| p.payload());
        tracing::debug!("Exporting {} as {:?}", item, export);
        source.start_drag(item, export, payload)
    };
    if !outcome.accepted() {
        guard.tree.push_cmd(Cmd::OpenViewFor(item));
    }
}

fn release_splitter(tree: &mut DockTree, s: SplitterDrag, x: i32, y: i32) -> Option<()> {
    let neighbors = tree.splitter_neighbor_bounds(s.section, s.index)?;
    let sp = tree.section_mut(s.section)?.splitters.get_mut(s.index)?;
    if s.click {
        if !sp.hot_spot().contains(x, y) {
            return None;
        }
        let bounds = sp.toggled(neighbors.0, neighbors.1, (x, y));
        sp.set_bounds(bounds);
    } else {
        let old = sp.bounds();
        sp.set_bounds(s.tracked);
        sp.last_bounds = Some(old);
        tree.push_cmd(Cmd::Redraw);
    }
    tree.update_splitter(s.section, s.index);
    Some(())
}

fn hover_enter(tree: &mut DockTree, id: NodeId) {
    if tree.is_tab(id) && tree.tab_state(id) != TabState::Active {
        tree.hover = Some(id);
        tree.redraw_control(id);
    }
}

fn hover_exit(tree: &mut DockTree, id: NodeId) {
    if tree.hover == Some(id) {
        tree.hover = None;
        tree.redraw_control(id);
    }
    tree.reset_feature_popup(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::control::DockControl;
    use crate::dock::region::Placement;
    use crate::geometry::Size;
    use crate::input::Modifiers;
    use crate::panel::{FixedAdvance, Panel};
    use std::rc::Rc;

    struct Fixed(i32, i32);

    impl Panel for Fixed {
        fn min_size(&self) -> Size {
            Size::new(self.0, self.1)
        }
        fn set_bounds(&mut self, _bounds: Rect) {}
        fn set_visible(&mut self, _visible: bool) {}
    }

    /// Two single-control regions side by side, laid out in 300x200
    fn two_regions() -> (DockTree, Vec<NodeId>, Vec<NodeId>) {
        let mut tree = DockTree::with_text_measure(Rc::new(FixedAdvance(6)));
        let controls: Vec<NodeId> = ["A", "B"]
            .iter()
            .map(|n| tree.insert_control(DockControl::new(*n, *n).with_panel(Fixed(100, 100))))
            .collect();
        let regions: Vec<NodeId> = controls.iter().map(|c| tree.new_region(vec![*c])).collect();
        for r in &regions {
            tree.set_active(*r, Some(0));
        }
        let root = tree.root();
        tree.set_group_contents(root, regions.clone());
        tree.recalc_sizes(root, Rect::new(0, 0, 300, 200));
        (tree, regions, controls)
    }

    #[test]
    fn test_small_moves_do_not_start_a_drag() {
        let (mut tree, _, controls) = two_regions();
        let bar = tree.drag_bounds(controls[0]);
        let mut tracker = PointerTracker::default();
        let mut hooks = DragHooks::default();
        tracker.press(&mut tree, &PointerEvent::new(bar.x + 40, bar.y + 5));
        tracker.motion(&mut tree, &mut hooks, &PointerEvent::new(bar.x + 41, bar.y + 6));
        assert!(tracker.overlay().is_none());
        tracker.motion(&mut tree, &mut hooks, &PointerEvent::new(bar.x + 45, bar.y + 5));
        assert!(matches!(tracker.overlay(), Some(DragOverlay::Dock(_))));
    }

    #[test]
    fn test_drag_bar_onto_other_region_docks_there() {
        let (mut tree, regions, controls) = two_regions();
        let bar = tree.drag_bounds(controls[0]);
        let target = tree.drag_bounds(controls[1]);
        let mut tracker = PointerTracker::default();
        let mut hooks = DragHooks::default();

        tracker.press(&mut tree, &PointerEvent::new(bar.x + 40, bar.y + 5));
        let over = PointerEvent::new(target.x + 40, target.y + 5);
        tracker.motion(&mut tree, &mut hooks, &over);
        assert!(
            matches!(tracker.overlay(), Some(DragOverlay::Dock(info)) if info.kind == DockKind::Tab)
        );
        tracker.release(&mut tree, &mut hooks, &over);

        assert!(!tree.contains(regions[0]));
        assert_eq!(tree.parent(controls[0]), Some(regions[1]));
        assert!(tree.is_notebook(regions[1]));
    }

    #[test]
    fn test_dropping_a_lone_control_on_itself_is_refused() {
        let (mut tree, regions, controls) = two_regions();
        let bar = tree.drag_bounds(controls[0]);
        let body = tree.bounds(controls[0]);
        let mut tracker = PointerTracker::default();
        let mut hooks = DragHooks::default();

        tracker.press(&mut tree, &PointerEvent::new(bar.x + 40, bar.y + 5));
        let over = PointerEvent::new(body.x + 50, body.y + 50);
        tracker.motion(&mut tree, &mut hooks, &over);
        assert_eq!(tracker.overlay(), Some(DragOverlay::Dock(DockInfo::NONE)));
        assert_eq!(tree.take_commands().cursor(), Some(CursorKind::Sizing));
        tracker.release(&mut tree, &mut hooks, &over);
        assert_eq!(tree.parent(controls[0]), Some(regions[0]));
    }

    #[test]
    fn test_alt_drag_moves_whole_notebook() {
        let (mut tree, regions, controls) = two_regions();
        let extra = tree.insert_control(DockControl::new("C", "C").with_panel(Fixed(100, 100)));
        tree.add_to_region(regions[0], extra, Placement::Append, false);
        let root = tree.root();
        tree.recalc_sizes(root, Rect::new(0, 0, 300, 200));
        assert!(tree.is_notebook(regions[0]));

        let tab = tree.drag_bounds(controls[0]);
        let body = tree.bounds(controls[1]);
        let mut tracker = PointerTracker::default();
        let mut hooks = DragHooks::default();
        tracker.press(&mut tree, &PointerEvent::new(tab.x + 5, tab.y + 10));
        let over = PointerEvent::new(body.x + 50, body.bottom() - 2)
            .with_modifiers(Modifiers::alt());
        tracker.motion(&mut tree, &mut hooks, &over);
        tracker.release(&mut tree, &mut hooks, &over);

        // The notebook holding A and C now sits below B
        let contents = tree.contents(root);
        assert_eq!(contents.len(), 1);
        let column = contents[0];
        assert!(tree.section(column).is_some_and(|s| !s.is_row()));
        assert_eq!(tree.contents(column), vec![regions[1], regions[0]]);
        assert_eq!(tree.contents(regions[0]), vec![controls[0], extra]);
    }

    #[test]
    fn test_alt_drag_of_lone_bar_at_root_is_refused() {
        let (mut tree, regions, controls) = two_regions();
        let bar = tree.drag_bounds(controls[0]);
        let body = tree.bounds(controls[1]);
        let mut tracker = PointerTracker::default();
        let mut hooks = DragHooks::default();

        tracker.press(&mut tree, &PointerEvent::new(bar.x + 40, bar.y + 5));
        let over = PointerEvent::new(body.x + 50, body.bottom() - 2)
            .with_modifiers(Modifiers::alt());
        tracker.motion(&mut tree, &mut hooks, &over);
        tracker.release(&mut tree, &mut hooks, &over);
        assert_eq!(tree.contents(tree.root()), regions);
    }

    #[test]
    fn test_splitter_drag_resizes_neighbors() {
        let (mut tree, regions, _) = two_regions();
        let root = tree.root();
        let bar = tree
            .section(root)
            .map(|s| s.splitters()[0].bounds())
            .unwrap_or_default();
        let mut tracker = PointerTracker::default();
        let mut hooks = DragHooks::default();

        let start = PointerEvent::new(bar.x + 4, bar.y + 100);
        tracker.press(&mut tree, &start);
        assert!(matches!(tracker.overlay(), Some(DragOverlay::Splitter(_))));
        let end = PointerEvent::new(bar.x + 34, bar.y + 100);
        tracker.motion(&mut tree, &mut hooks, &end);
        tracker.release(&mut tree, &mut hooks, &end);

        assert_eq!(tree.bounds(regions[0]).width, bar.x + 30);
        assert_eq!(tree.bounds(regions[1]).x, bar.right() + 30);
        let last = tree.section(root).and_then(|s| s.splitters()[0].last_bounds());
        assert_eq!(last, Some(bar));
    }

    #[test]
    fn test_hover_over_bar_shows_hand() {
        let (mut tree, _, controls) = two_regions();
        let bar = tree.drag_bounds(controls[1]);
        let mut tracker = PointerTracker::default();
        let mut hooks = DragHooks::default();
        tree.take_commands();
        tracker.motion(&mut tree, &mut hooks, &PointerEvent::new(bar.x + 50, bar.y + 3));
        assert_eq!(tracker.hover(), Some(HitTarget::Node(controls[1])));
        assert_eq!(tree.take_commands().cursor(), Some(CursorKind::Hand));
    }
}
