//! Arena of dock nodes
//!
//! Every control, region and section lives in one `DockTree`, addressed by a
//! stable `NodeId`. Parents are stored as ids, so "ask my parent to collapse
//! me" cascades are plain calls on the tree rather than upcalls through
//! back-references.
//!
//! Group properties (name, visibility, style, ...) are derived from the
//! children on demand instead of being cached and invalidated.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write as _};
use std::rc::Rc;

use crate::commands::Cmd;
use crate::geometry::{Rect, Size};
use crate::panel::{FixedAdvance, Icon, TextMeasure};

use super::constants::{
    BAR_FEATURE_HEIGHT, BAR_FEATURE_WIDTH, CLOSE_DRAG_SIZE, CLOSE_TAB_SIZE, MAX_TAB_LENGTH,
    TAB_FEATURE_WIDTH, TAB_MARGIN, TAB_NAME_HEAD, TAB_NAME_TAIL,
};
use super::control::{DockControl, DockStyle};
use super::feature::{FeatureMode, FeatureRegistry};
use super::region::{DockRegion, TabState};
use super::section::DockSection;

// ============================================================================
// Identifiers and nodes
// ============================================================================

/// Stable handle of a node inside a `DockTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three node variants of the dock hierarchy
pub enum NodeKind {
    Control(DockControl),
    Region(DockRegion),
    Section(DockSection),
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Control(_) => "control",
            NodeKind::Region(_) => "region",
            NodeKind::Section(_) => "section",
        }
    }
}

/// Geometry shared by every node plus its variant payload
pub struct DockNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    /// Last rectangle assigned by a layout pass
    pub bounds: Rect,
    /// Tab or drag bar rectangle, never extending past `bounds`
    pub drag_bounds: Rect,
    /// Last explicit width, -1 while unset
    pub width: i32,
    /// Last explicit height, -1 while unset
    pub height: i32,
    /// Visibility last pushed down by the parent (false inside a hidden tab)
    pub shown: bool,
    pub kind: NodeKind,
}

impl DockNode {
    fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            parent: None,
            bounds: Rect::ZERO,
            drag_bounds: Rect::ZERO,
            width: -1,
            height: -1,
            shown: true,
            kind,
        }
    }

    #[inline]
    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Set the drag bounds, trimmed so they end inside `bounds`
    pub fn set_drag_bounds(&mut self, rect: Rect) {
        self.drag_bounds = rect.clip_extent_to(&self.bounds);
    }

    pub fn is_group(&self) -> bool {
        !matches!(self.kind, NodeKind::Control(_))
    }

    pub fn contents(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Control(_) => &[],
            NodeKind::Region(r) => &r.contents,
            NodeKind::Section(s) => &s.contents,
        }
    }

    fn contents_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Control(_) => None,
            NodeKind::Region(r) => Some(&mut r.contents),
            NodeKind::Section(s) => Some(&mut s.contents),
        }
    }
}

// ============================================================================
// The tree
// ============================================================================

pub struct DockTree {
    nodes: HashMap<NodeId, DockNode>,
    next_id: u64,
    root: NodeId,
    text: Rc<dyn TextMeasure>,
    registry: FeatureRegistry,
    pending: Vec<Cmd>,
    layout_dirty: bool,
    modified: bool,
    pub(crate) hover: Option<NodeId>,
}

impl Default for DockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DockTree {
    /// Empty tree (a root row section with no children) measuring text with
    /// a fixed advance
    pub fn new() -> Self {
        Self::with_text_measure(Rc::new(FixedAdvance::default()))
    }

    pub fn with_text_measure(text: Rc<dyn TextMeasure>) -> Self {
        let mut tree = Self {
            nodes: HashMap::new(),
            next_id: 1,
            root: NodeId(0),
            text,
            registry: FeatureRegistry::default(),
            pending: Vec::new(),
            layout_dirty: true,
            modified: false,
            hover: None,
        };
        tree.root = tree.alloc(NodeKind::Section(DockSection::new(true)));
        tree
    }

    // ------------------------------------------------------------------------
    // Node access
    // ------------------------------------------------------------------------

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn set_root(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
        self.root = id;
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&DockNode> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DockNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn control(&self, id: NodeId) -> Option<&DockControl> {
        match &self.get(id)?.kind {
            NodeKind::Control(c) => Some(c),
            _ => None,
        }
    }

    pub fn control_mut(&mut self, id: NodeId) -> Option<&mut DockControl> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Control(c) => Some(c),
            _ => None,
        }
    }

    pub fn region(&self, id: NodeId) -> Option<&DockRegion> {
        match &self.get(id)?.kind {
            NodeKind::Region(r) => Some(r),
            _ => None,
        }
    }

    pub fn region_mut(&mut self, id: NodeId) -> Option<&mut DockRegion> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Region(r) => Some(r),
            _ => None,
        }
    }

    pub fn section(&self, id: NodeId) -> Option<&DockSection> {
        match &self.get(id)?.kind {
            NodeKind::Section(s) => Some(s),
            _ => None,
        }
    }

    pub fn section_mut(&mut self, id: NodeId) -> Option<&mut DockSection> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Section(s) => Some(s),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of a group (empty for controls and stale ids)
    pub fn contents(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(|n| n.contents().to_vec()).unwrap_or_default()
    }

    pub(crate) fn contents_mut(&mut self, id: NodeId) -> Option<&mut Vec<NodeId>> {
        self.get_mut(id)?.contents_mut()
    }

    pub fn bounds(&self, id: NodeId) -> Rect {
        self.get(id).map(|n| n.bounds).unwrap_or_default()
    }

    pub fn drag_bounds(&self, id: NodeId) -> Rect {
        self.get(id).map(|n| n.drag_bounds).unwrap_or_default()
    }

    pub(crate) fn set_drag_bounds(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.get_mut(id) {
            node.set_drag_bounds(rect);
        }
    }

    /// Position of `id` inside its parent's contents
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.get(parent)?.contents().iter().position(|c| *c == id)
    }

    /// Whether `ancestor` is `id` or one of its ancestors
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    pub fn text(&self) -> &dyn TextMeasure {
        self.text.as_ref()
    }

    pub fn set_text_measure(&mut self, text: Rc<dyn TextMeasure>) {
        self.text = text;
        self.request_layout();
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FeatureRegistry {
        &mut self.registry
    }

    // ------------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------------

    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, DockNode::new(id, kind));
        id
    }

    /// Add a detached control to the arena; it joins the layout once docked
    /// or referenced from `set_contents`
    pub fn insert_control(&mut self, control: DockControl) -> NodeId {
        let id = self.alloc(NodeKind::Control(control));
        if let Some(control) = self.control_mut(id) {
            if let Some(dockable) = control.dockable.as_mut() {
                dockable.bind(id);
            }
        }
        id
    }

    pub(crate) fn new_region(&mut self, contents: Vec<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::Region(DockRegion::default()));
        self.set_group_contents(id, contents);
        id
    }

    pub(crate) fn new_section(&mut self, is_row: bool, contents: Vec<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::Section(DockSection::new(is_row)));
        self.set_group_contents(id, contents);
        id
    }

    /// Replace a group's children, re-parenting all of them
    pub(crate) fn set_group_contents(&mut self, group: NodeId, contents: Vec<NodeId>) {
        for child in &contents {
            if let Some(node) = self.get_mut(*child) {
                node.parent = Some(group);
            }
        }
        if let Some(slot) = self.contents_mut(group) {
            *slot = contents;
        }
        self.contents_changed(group);
    }

    /// Insert `child` into `group` at `index` (clamped), re-parenting it
    pub(crate) fn insert_child(&mut self, group: NodeId, index: usize, child: NodeId) {
        let Some(contents) = self.contents_mut(group) else {
            return;
        };
        let index = index.min(contents.len());
        contents.insert(index, child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(group);
        }
    }

    /// Swap `old` for `new` in `group`'s contents
    pub(crate) fn replace_child(&mut self, group: NodeId, old: NodeId, new: NodeId) -> bool {
        let Some(contents) = self.contents_mut(group) else {
            return false;
        };
        let Some(i) = contents.iter().position(|c| *c == old) else {
            return false;
        };
        contents[i] = new;
        if let Some(node) = self.get_mut(new) {
            node.parent = Some(group);
        }
        true
    }

    /// Remove a single node from the arena (children are left alone)
    pub(crate) fn free(&mut self, id: NodeId) -> Option<DockNode> {
        if self.hover == Some(id) {
            self.hover = None;
        }
        self.nodes.remove(&id)
    }

    /// Drop every node that is no longer reachable from the root
    pub(crate) fn collect_garbage(&mut self) {
        let mut reachable = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if reachable.insert(id) {
                stack.extend(self.contents(id));
            }
        }
        let dead: Vec<NodeId> = self
            .nodes
            .keys()
            .filter(|id| !reachable.contains(id))
            .copied()
            .collect();
        if !dead.is_empty() {
            tracing::debug!("Dropping {} unreachable dock nodes", dead.len());
        }
        for id in dead {
            self.free(id);
        }
    }

    // ------------------------------------------------------------------------
    // Pending work
    // ------------------------------------------------------------------------

    /// Mark the whole tree for a deferred layout pass
    pub fn request_layout(&mut self) {
        self.layout_dirty = true;
    }

    pub fn layout_pending(&self) -> bool {
        self.layout_dirty
    }

    pub(crate) fn clear_layout_pending(&mut self) {
        self.layout_dirty = false;
    }

    pub(crate) fn push_cmd(&mut self, cmd: Cmd) {
        if cmd != Cmd::None {
            self.pending.push(cmd);
        }
    }

    /// Drain the side effects produced since the last call
    pub fn take_commands(&mut self) -> Cmd {
        Cmd::batch(std::mem::take(&mut self.pending))
    }

    /// Whether the structure changed since the flag was last cleared
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    /// Children of `group` were added, removed or reordered
    pub(crate) fn contents_changed(&mut self, group: NodeId) {
        self.calc_min(group, true);
        self.modified = true;
    }

    // ------------------------------------------------------------------------
    // Derived properties
    // ------------------------------------------------------------------------

    /// A control's own flag; a group is visible if any child is
    pub fn is_visible(&self, id: NodeId) -> bool {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(c)) => c.visible,
            Some(_) => self.contents(id).into_iter().any(|c| self.is_visible(c)),
            None => false,
        }
    }

    pub fn visible_contents(&self, id: NodeId) -> Vec<NodeId> {
        self.contents(id)
            .into_iter()
            .filter(|c| self.is_visible(*c))
            .collect()
    }

    /// Display name: a control's name, `""` for an empty group, the single
    /// control's name, or `"<first> [n]"`
    pub fn name(&self, id: NodeId) -> String {
        if let Some(control) = self.control(id) {
            return control.name.clone();
        }
        let controls = self.get_controls(id, true);
        match controls.as_slice() {
            [] => String::new(),
            [only] => self.name(*only),
            [first, ..] => format!("{} [{}]", self.name(*first), controls.len()),
        }
    }

    pub fn is_closeable(&self, id: NodeId) -> bool {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(c)) => c.closeable,
            Some(_) => self.contents(id).into_iter().all(|c| self.is_closeable(c)),
            None => false,
        }
    }

    /// A group takes its first child's style
    pub fn style(&self, id: NodeId) -> DockStyle {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(c)) => c.style,
            Some(_) => self
                .contents(id)
                .first()
                .map(|c| self.style(*c))
                .unwrap_or_default(),
            None => DockStyle::default(),
        }
    }

    /// A group is resizable if any of its visible controls is
    pub fn is_resizable(&self, id: NodeId) -> bool {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(c)) => c.resizable,
            Some(_) => self
                .get_controls(id, true)
                .into_iter()
                .any(|c| self.is_resizable(c)),
            None => false,
        }
    }

    /// A group takes its first child's lock state
    pub fn is_locked(&self, id: NodeId) -> bool {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(c)) => c.locked,
            Some(_) => self
                .contents(id)
                .first()
                .is_some_and(|c| self.is_locked(*c)),
            None => false,
        }
    }

    /// Whether the node (or a group's first control) still owns a panel
    pub fn has_panel(&self, id: NodeId) -> bool {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(c)) => c.panel.is_some(),
            Some(_) => self.contents(id).first().is_some_and(|c| self.has_panel(*c)),
            None => false,
        }
    }

    pub fn image(&self, id: NodeId) -> Option<&Icon> {
        match &self.get(id)?.kind {
            NodeKind::Control(c) => c.image.as_ref(),
            _ => self.image(*self.get(id)?.contents().first()?),
        }
    }

    /// Drag-out category; groups are never exported
    pub fn export(&self, id: NodeId) -> &str {
        self.control(id).map(|c| c.export.as_str()).unwrap_or("")
    }

    pub fn feature_mode(&self, id: NodeId) -> FeatureMode {
        self.control(id)
            .map(|c| c.features.mode)
            .unwrap_or(FeatureMode::None)
    }

    /// All controls under `id`, depth first
    pub fn get_controls(&self, id: NodeId, visible_only: bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_controls(id, visible_only, &mut out);
        out
    }

    fn collect_controls(&self, id: NodeId, visible_only: bool, out: &mut Vec<NodeId>) {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(c)) => {
                if !visible_only || c.visible {
                    out.push(id);
                }
            }
            Some(_) => {
                let children = if visible_only {
                    self.visible_contents(id)
                } else {
                    self.contents(id)
                };
                for child in children {
                    self.collect_controls(child, visible_only, out);
                }
            }
            None => {}
        }
    }

    /// Every other control in the tree
    pub fn dock_controls(&self, id: NodeId) -> Vec<NodeId> {
        self.get_controls(self.root, false)
            .into_iter()
            .filter(|c| *c != id)
            .collect()
    }

    /// Find a live control by its persistence id
    pub fn find_control(&self, control_id: &str) -> Option<NodeId> {
        self.get_controls(self.root, false)
            .into_iter()
            .find(|c| self.control(*c).is_some_and(|c| c.id == control_id))
    }

    /// A region draws as a notebook when it has more than one visible child,
    /// or a single visible child with the tab style
    pub fn is_notebook(&self, region: NodeId) -> bool {
        if self.region(region).is_none() {
            return false;
        }
        match self.visible_contents(region).as_slice() {
            [] => false,
            [only] => self.style(*only) == DockStyle::Tab,
            _ => true,
        }
    }

    /// Whether the node is currently presented as a notebook tab
    pub fn is_tab(&self, id: NodeId) -> bool {
        self.parent(id).is_some_and(|p| self.is_notebook(p))
    }

    pub fn tab_state(&self, id: NodeId) -> TabState {
        let active = self
            .parent(id)
            .and_then(|p| self.region(p))
            .and_then(|r| r.active);
        if active.is_some() && active == self.index_in_parent(id) {
            TabState::Active
        } else if self.hover == Some(id) {
            TabState::Hover
        } else {
            TabState::Inactive
        }
    }

    /// Label shown on a tab, shortened to `head...tail` when too long
    pub fn tab_name(&self, id: NodeId) -> String {
        shorten_tab_name(&self.name(id))
    }

    /// Width of the node's notebook tab: feature icon, label, margins,
    /// custom image and close button
    pub fn tab_width(&self, id: NodeId) -> i32 {
        if !self.has_panel(id) {
            return 0;
        }
        let mut tw = 0;
        if self.feature_mode(id) != FeatureMode::None {
            tw = TAB_FEATURE_WIDTH + 3;
        }
        tw += self.text.text_width(&self.tab_name(id)) + 2 * TAB_MARGIN;
        if let Some(image) = self.image(id) {
            tw += image.width as i32 + 3;
        }
        if self.is_closeable(id) {
            tw += CLOSE_TAB_SIZE + 6;
        }
        tw
    }

    /// Close button rectangle on the node's tab or drag bar
    pub fn close_bounds(&self, id: NodeId) -> Rect {
        if !self.is_closeable(id) {
            return Rect::ZERO;
        }
        let db = self.drag_bounds(id);
        let has_feature = self.feature_mode(id) != FeatureMode::None;
        if self.is_tab(id) {
            return Rect::new(
                db.right() - 7 - CLOSE_TAB_SIZE,
                db.y + 6,
                CLOSE_TAB_SIZE,
                CLOSE_TAB_SIZE,
            );
        }
        let skip = if has_feature { 6 } else { 0 };
        if self.style(id) == DockStyle::Horizontal {
            let x = db.x + 10 + if has_feature { BAR_FEATURE_WIDTH + skip } else { 0 };
            Rect::new(x, db.y + 4, CLOSE_DRAG_SIZE, CLOSE_DRAG_SIZE)
        } else {
            let y = db.y + 10 + if has_feature { BAR_FEATURE_HEIGHT + skip } else { 0 };
            Rect::new(db.x + 4, y, CLOSE_DRAG_SIZE, CLOSE_DRAG_SIZE)
        }
    }

    // ------------------------------------------------------------------------
    // Whole-subtree operations
    // ------------------------------------------------------------------------

    /// Flip the lock state of every control under `id`
    pub fn toggle_lock(&mut self, id: NodeId) {
        if let Some(control) = self.control_mut(id) {
            control.locked = !control.locked;
            return;
        }
        for child in self.contents(id) {
            self.toggle_lock(child);
        }
        self.request_layout();
    }

    /// Push the parent's visibility decision down to panels
    pub(crate) fn set_visibility(&mut self, id: NodeId, visible: bool) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        node.shown = visible;
        match &mut node.kind {
            NodeKind::Control(c) => {
                if let Some(panel) = c.panel.as_mut() {
                    panel.set_visible(visible);
                }
            }
            NodeKind::Region(r) => {
                let active = r.active;
                let contents = r.contents.clone();
                for (i, child) in contents.into_iter().enumerate() {
                    self.set_visibility(child, visible && Some(i) == active);
                }
            }
            NodeKind::Section(s) => {
                for child in s.contents.clone() {
                    self.set_visibility(child, visible);
                }
            }
        }
    }

    /// Minimum size of any node, bottom-up
    pub fn calc_min(&mut self, id: NodeId, use_size: bool) -> Size {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(_)) => self.calc_min_control(id, use_size),
            Some(NodeKind::Region(_)) => self.calc_min_region(id, use_size),
            Some(NodeKind::Section(_)) => self.calc_min_section(id, use_size),
            None => Size::default(),
        }
    }

    /// Lay out any node (and its subtree) inside `rect`, top-down
    pub fn recalc_sizes(&mut self, id: NodeId, rect: Rect) {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(_)) => self.recalc_control(id, rect),
            Some(NodeKind::Region(_)) => self.recalc_region(id, rect),
            Some(NodeKind::Section(_)) => self.recalc_section(id, rect),
            None => {}
        }
    }

    /// Detach `item` from `group`, collapsing groups left redundant
    pub fn remove(&mut self, group: NodeId, item: NodeId) {
        match self.get(group).map(|n| &n.kind) {
            Some(NodeKind::Region(_)) => self.remove_from_region(group, item),
            Some(NodeKind::Section(_)) => self.remove_from_section(group, item),
            _ => tracing::warn!("remove: {} is not a group", group),
        }
    }

    // ------------------------------------------------------------------------
    // Debugging
    // ------------------------------------------------------------------------

    /// Indented description of the whole tree
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, indent: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        let pad = " ".repeat(indent);
        let _ = match &node.kind {
            NodeKind::Section(s) => writeln!(
                out,
                "{pad}Section( {id}, is_row = {}, width = {}, height = {} )",
                s.is_row, node.width, node.height
            ),
            NodeKind::Region(r) => writeln!(
                out,
                "{pad}Region( {id}, active = {}, width = {}, height = {} )",
                r.active.map_or(-1, |a| a as i64),
                node.width,
                node.height
            ),
            NodeKind::Control(c) => {
                let cont = " ".repeat(indent + 9);
                writeln!(
                    out,
                    "{pad}Control( {id}, name = {}, id = {},\n{cont}style = {}, locked = {},\n\
                     {cont}closeable = {}, resizable = {}, visible = {}\n\
                     {cont}width = {}, height = {} )",
                    c.name,
                    c.id,
                    c.style,
                    c.locked,
                    c.closeable,
                    c.resizable,
                    c.visible,
                    node.width,
                    node.height
                )
            }
        };
        for child in node.contents() {
            self.dump_node(*child, indent + 3, out);
        }
    }
}

/// `name[..7] + "..." + name[-20..]` for labels over the tab length limit
pub fn shorten_tab_name(name: &str) -> String {
    let count = name.chars().count();
    if count <= MAX_TAB_LENGTH {
        return name.to_string();
    }
    let head: String = name.chars().take(TAB_NAME_HEAD).collect();
    let tail: String = name.chars().skip(count - TAB_NAME_TAIL).collect();
    format!("{head}...{tail}")
}
