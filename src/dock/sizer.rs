//! The dock sizer
//!
//! `DockSizer` owns a `DockTree` and is what a host window talks to: it
//! builds the initial layout, runs deferred layout passes, forwards pointer
//! events to the pointer tracker, paints, and saves/restores/maximizes the
//! structure.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::commands::Cmd;
use crate::geometry::{Rect, Size};
use crate::input::PointerEvent;
use crate::panel::TextMeasure;
use crate::theme::DockPalette;

use super::constants::EMPTY_MIN;
use super::control::DockControl;
use super::dock_info::{DockInfo, DragSize};
use super::interaction::{DragHooks, HitTarget, PointerTracker};
use super::paint::{draw_overlay, Surface};
use super::structure::{ExtrasPolicy, Structure, StructureResolver};
use super::tree::{DockTree, NodeId};

/// Shape of an initial layout
pub enum LayoutSpec {
    Control(DockControl),
    /// A notebook or drag bar region
    Region(Vec<LayoutSpec>),
    /// A row at the top level; nested sections alternate orientation
    Section(Vec<LayoutSpec>),
}

impl fmt::Debug for LayoutSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutSpec::Control(c) => write!(f, "Control({})", c.id),
            LayoutSpec::Region(items) => f.debug_tuple("Region").field(items).finish(),
            LayoutSpec::Section(items) => f.debug_tuple("Section").field(items).finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Content of a shape the layout cannot hold
    TypeMismatch(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::TypeMismatch(what) => write!(f, "unsupported layout content: {}", what),
        }
    }
}

impl std::error::Error for LayoutError {}

pub struct DockSizer {
    tree: DockTree,
    tracker: PointerTracker,
    hooks: DragHooks,
    bounds: Rect,
    has_contents: bool,
    /// Replayed by `reset_structure`
    saved_structure: Option<Structure>,
    /// Layout to restore when un-maximizing
    max_structure: Option<Structure>,
    extras_policy: ExtrasPolicy,
}

impl Default for DockSizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DockSizer {
    pub fn new() -> Self {
        Self::with_tree(DockTree::new())
    }

    pub fn with_text_measure(text: Rc<dyn TextMeasure>) -> Self {
        Self::with_tree(DockTree::with_text_measure(text))
    }

    fn with_tree(tree: DockTree) -> Self {
        Self {
            tree,
            tracker: PointerTracker::default(),
            hooks: DragHooks::default(),
            bounds: Rect::ZERO,
            has_contents: false,
            saved_structure: None,
            max_structure: None,
            extras_policy: ExtrasPolicy::default(),
        }
    }

    pub fn tree(&self) -> &DockTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DockTree {
        &mut self.tree
    }

    pub fn hooks_mut(&mut self) -> &mut DragHooks {
        &mut self.hooks
    }

    pub fn set_extras_policy(&mut self, policy: ExtrasPolicy) {
        self.extras_policy = policy;
    }

    /// Area the layout fills, as of the last layout pass
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Top-level section, once contents were set
    pub fn contents(&self) -> Option<NodeId> {
        self.has_contents.then(|| self.tree.root())
    }

    // ------------------------------------------------------------------------
    // Contents
    // ------------------------------------------------------------------------

    /// Replace the whole layout.
    ///
    /// A top-level `Control` or `Region` is wrapped in a row section. Inside
    /// a section a bare control is wrapped in its own region. An empty
    /// top-level region is rejected.
    pub fn set_contents(&mut self, spec: LayoutSpec) -> Result<(), LayoutError> {
        let top = match spec {
            LayoutSpec::Section(items) => self.build_section(items, true)?,
            LayoutSpec::Region(items) if items.is_empty() => {
                return Err(LayoutError::TypeMismatch("empty top-level region".to_string()));
            }
            LayoutSpec::Region(items) => {
                let region = self.build_region(items)?;
                self.tree.new_section(true, vec![region])
            }
            LayoutSpec::Control(control) => {
                let control = self.tree.insert_control(control);
                let region = self.tree.new_region(vec![control]);
                self.tree.update_active(region, None);
                self.tree.new_section(true, vec![region])
            }
        };

        self.tracker.cancel(&mut self.tree);
        self.tree.set_root(top);
        self.tree.collect_garbage();
        self.tree.request_layout();
        self.has_contents = true;
        tracing::debug!("Contents set:\n{}", self.tree.dump());

        if self.saved_structure.is_none() {
            self.saved_structure = Some(self.get_structure());
        }
        Ok(())
    }

    fn build_region(&mut self, items: Vec<LayoutSpec>) -> Result<NodeId, LayoutError> {
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            children.push(match item {
                LayoutSpec::Control(control) => self.tree.insert_control(control),
                LayoutSpec::Region(nested) => self.build_region(nested)?,
                LayoutSpec::Section(nested) => self.build_section(nested, true)?,
            });
        }
        let region = self.tree.new_region(children);
        self.tree.update_active(region, None);
        Ok(region)
    }

    fn build_section(&mut self, items: Vec<LayoutSpec>, is_row: bool) -> Result<NodeId, LayoutError> {
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            children.push(match item {
                LayoutSpec::Control(control) => {
                    let control = self.tree.insert_control(control);
                    let region = self.tree.new_region(vec![control]);
                    self.tree.update_active(region, None);
                    region
                }
                LayoutSpec::Region(nested) => self.build_region(nested)?,
                LayoutSpec::Section(nested) => self.build_section(nested, !is_row)?,
            });
        }
        Ok(self.tree.new_section(is_row, children))
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    pub fn calc_min(&mut self) -> Size {
        if !self.has_contents {
            return Size::new(EMPTY_MIN, EMPTY_MIN);
        }
        let root = self.tree.root();
        self.tree.calc_min(root, false)
    }

    /// Lay the contents out inside `rect`
    pub fn recalc_sizes(&mut self, rect: Rect) {
        self.bounds = rect;
        let root = self.tree.root();
        self.tree.recalc_sizes(root, rect);
        self.tree.clear_layout_pending();
        tracing::trace!("Layout pass in {:?}", rect);
    }

    /// Run a deferred layout pass if one was requested. Returns whether the
    /// layout ran.
    pub fn flush_pending_layout(&mut self) -> bool {
        if !self.tree.layout_pending() {
            return false;
        }
        self.recalc_sizes(self.bounds);
        self.tree.push_cmd(Cmd::Redraw);
        true
    }

    /// Fire due feature popup timers
    pub fn poll_timers(&mut self, now: Instant) -> Cmd {
        self.tree.poll_feature_timers(now);
        self.tree.take_commands()
    }

    pub fn toggle_lock(&mut self) {
        if self.has_contents {
            let root = self.tree.root();
            self.tree.toggle_lock(root);
            self.tree.request_layout();
        }
    }

    // ------------------------------------------------------------------------
    // Hit-testing
    // ------------------------------------------------------------------------

    pub fn object_at(&self, x: i32, y: i32, force: bool) -> Option<HitTarget> {
        if !self.has_contents {
            return None;
        }
        self.tree.object_at(self.tree.root(), x, y, force)
    }

    /// Drop target for a control of `size` dragged to the point; never
    /// "nothing here" inside the dock area
    pub fn dock_info_at(&self, x: i32, y: i32, size: DragSize, is_control: bool) -> DockInfo {
        if !self.has_contents {
            return DockInfo::NONE;
        }
        self.tree
            .dock_info_at_section(self.tree.root(), x, y, size, is_control, true)
            .unwrap_or(DockInfo::NONE)
    }

    // ------------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------------

    pub fn pointer_down(&mut self, event: &PointerEvent) -> Cmd {
        self.tracker.press(&mut self.tree, event);
        self.tree.take_commands()
    }

    pub fn pointer_motion(&mut self, event: &PointerEvent) -> Cmd {
        self.tracker.motion(&mut self.tree, &mut self.hooks, event);
        self.tree.take_commands()
    }

    pub fn pointer_up(&mut self, event: &PointerEvent) -> Cmd {
        self.tracker.release(&mut self.tree, &mut self.hooks, event);
        self.tree.take_commands()
    }

    pub fn pointer_leave(&mut self) -> Cmd {
        self.tracker.leave(&mut self.tree);
        self.tree.take_commands()
    }

    pub fn is_capturing(&self) -> bool {
        self.tracker.is_capturing()
    }

    // ------------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------------

    /// Paint the layout and, during a drag, the inverted previews on top
    pub fn draw(&mut self, surface: &mut dyn Surface, palette: &DockPalette) {
        if !self.has_contents {
            surface.fill_rect(self.bounds, palette.background);
            return;
        }
        self.tree.draw(surface, palette);
        if let Some(overlay) = self.tracker.overlay() {
            draw_overlay(surface, &overlay, self.bounds, palette);
        }
    }

    // ------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------

    pub fn get_structure(&self) -> Structure {
        self.tree.get_structure()
    }

    /// Restore a saved layout onto the current controls; see
    /// `DockTree::apply_structure`. The layout being replaced is kept for
    /// `reset_structure`.
    pub fn set_structure(
        &mut self,
        structure: &Structure,
        resolver: Option<&mut dyn StructureResolver>,
    ) {
        if !self.has_contents {
            return;
        }
        self.saved_structure = Some(self.get_structure());
        self.tracker.cancel(&mut self.tree);
        self.tree.apply_structure(structure, resolver, self.extras_policy);
    }

    /// Go back to the layout saved by the first `set_contents` or the last
    /// `set_structure`
    pub fn reset_structure(&mut self) {
        if let Some(saved) = self.saved_structure.clone() {
            self.set_structure(&saved, None);
        }
    }

    /// Show only `control`, or restore the layout from before maximizing
    pub fn min_max(&mut self, control: NodeId) {
        match self.max_structure.take() {
            None => {
                self.max_structure = Some(self.get_structure());
                let root = self.tree.root();
                for c in self.tree.get_controls(root, false) {
                    self.tree.show(c, c == control, false);
                }
                self.tree.request_layout();
                tracing::debug!("Maximized {}", control);
            }
            Some(structure) => {
                self.set_structure(&structure, None);
                tracing::debug!("Restored layout from maximized {}", control);
            }
        }
    }

    pub fn is_maximizable(&self) -> bool {
        self.max_structure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::paint::tests::Recorder;
    use crate::dock::structure::ControlStructure;
    use crate::panel::{FixedAdvance, Panel};

    struct Fixed(i32, i32);

    impl Panel for Fixed {
        fn min_size(&self) -> Size {
            Size::new(self.0, self.1)
        }
        fn set_bounds(&mut self, _bounds: Rect) {}
        fn set_visible(&mut self, _visible: bool) {}
    }

    fn control(id: &str) -> LayoutSpec {
        LayoutSpec::Control(DockControl::new(id, id.to_uppercase()).with_panel(Fixed(60, 40)))
    }

    fn sizer() -> DockSizer {
        DockSizer::with_text_measure(Rc::new(FixedAdvance(6)))
    }

    #[test]
    fn test_empty_sizer_reports_minimum() {
        let mut sizer = sizer();
        assert_eq!(sizer.calc_min(), Size::new(20, 20));
        assert!(sizer.contents().is_none());
        assert_eq!(sizer.dock_info_at(5, 5, DragSize::new(10, 10, 10), false), DockInfo::NONE);
    }

    #[test]
    fn test_nested_sections_alternate() {
        let mut sizer = sizer();
        let spec = LayoutSpec::Section(vec![
            control("a"),
            LayoutSpec::Section(vec![control("b"), LayoutSpec::Section(vec![control("c")])]),
        ]);
        sizer.set_contents(spec).expect("valid layout");
        let tree = sizer.tree();
        let root = tree.root();
        assert!(tree.section(root).is_some_and(|s| s.is_row()));
        let column = tree.contents(root)[1];
        assert!(tree.section(column).is_some_and(|s| !s.is_row()));
        let row = tree.contents(column)[1];
        assert!(tree.section(row).is_some_and(|s| s.is_row()));
        // Bare controls in a section get their own region
        let first = tree.contents(root)[0];
        assert!(tree.region(first).is_some());
    }

    #[test]
    fn test_top_level_control_and_region_are_wrapped() {
        let mut sizer = sizer();
        sizer.set_contents(control("a")).expect("valid layout");
        let root = sizer.tree().root();
        assert!(sizer.tree().section(root).is_some());
        assert_eq!(sizer.tree().get_controls(root, false).len(), 1);

        sizer
            .set_contents(LayoutSpec::Region(vec![control("b"), control("c")]))
            .expect("valid layout");
        let root = sizer.tree().root();
        let region = sizer.tree().contents(root)[0];
        assert!(sizer.tree().is_notebook(region));
        // The previous contents are gone
        assert!(sizer.tree().find_control("a").is_none());
    }

    #[test]
    fn test_empty_top_level_region_is_rejected() {
        let mut sizer = sizer();
        let err = sizer.set_contents(LayoutSpec::Region(Vec::new()));
        assert!(matches!(err, Err(LayoutError::TypeMismatch(_))));
        assert!(sizer.contents().is_none());
    }

    #[test]
    fn test_layout_is_deferred_until_flushed() {
        let mut sizer = sizer();
        sizer.set_contents(LayoutSpec::Section(vec![control("a"), control("b")])).expect("valid layout");
        sizer.recalc_sizes(Rect::new(0, 0, 300, 200));
        assert!(!sizer.flush_pending_layout());

        let a = sizer.tree().find_control("a").expect("a");
        sizer.tree_mut().set_name(a, "Renamed", true);
        assert!(sizer.flush_pending_layout());
        assert!(sizer.tree_mut().take_commands().needs_redraw());
    }

    #[test]
    fn test_min_max_round_trip() {
        let mut sizer = sizer();
        sizer
            .set_contents(LayoutSpec::Section(vec![control("a"), control("b"), control("c")]))
            .expect("valid layout");
        sizer.recalc_sizes(Rect::new(0, 0, 300, 200));
        let b = sizer.tree().find_control("b").expect("b");

        sizer.min_max(b);
        assert!(!sizer.is_maximizable());
        let root = sizer.tree().root();
        assert_eq!(sizer.tree().get_controls(root, true), vec![b]);

        sizer.min_max(b);
        assert!(sizer.is_maximizable());
        let root = sizer.tree().root();
        assert_eq!(sizer.tree().get_controls(root, true).len(), 3);
        assert_eq!(sizer.tree().find_control("b"), Some(b));
    }

    #[test]
    fn test_reset_structure_replays_initial_layout() {
        let mut sizer = sizer();
        sizer
            .set_contents(LayoutSpec::Section(vec![control("a"), control("b")]))
            .expect("valid layout");
        let initial = sizer.get_structure();

        let Structure::Section(mut changed) = initial.clone() else {
            panic!("top level is a section");
        };
        changed.contents.reverse();
        sizer.set_structure(&Structure::Section(changed), None);
        assert_ne!(sizer.get_structure().control_ids(), initial.control_ids());

        sizer.reset_structure();
        assert_eq!(sizer.get_structure().control_ids(), initial.control_ids());
    }

    #[test]
    fn test_structure_hides_saved_invisible_controls() {
        let mut sizer = sizer();
        sizer
            .set_contents(LayoutSpec::Section(vec![control("a"), control("b")]))
            .expect("valid layout");
        let hidden = ControlStructure {
            id: "b".to_string(),
            name: "B".to_string(),
            user_name: false,
            style: Default::default(),
            user_style: false,
            visible: false,
            locked: true,
            closeable: false,
            resizable: true,
            width: -1,
            height: -1,
        };
        let structure = Structure::Section(crate::dock::structure::SectionStructure {
            is_row: true,
            width: -1,
            height: -1,
            splitters: Vec::new(),
            contents: vec![Structure::Control(hidden)],
        });
        sizer.set_structure(&structure, None);
        let b = sizer.tree().find_control("b").expect("b");
        assert!(!sizer.tree().is_visible(b));
        assert!(sizer.tree().is_locked(b));
    }

    #[test]
    fn test_draw_without_contents_clears() {
        let mut sizer = sizer();
        sizer.recalc_sizes(Rect::new(0, 0, 50, 40));
        let mut surface = Recorder::default();
        let palette = DockPalette::classic();
        sizer.draw(&mut surface, &palette);
        assert_eq!(
            surface.ops,
            vec![crate::dock::paint::tests::Op::Fill(Rect::new(0, 0, 50, 40), palette.background)]
        );
    }
}
