//! Drop-target resolution and commit
//!
//! While a control is dragged, `DockSizer::dock_info_at` walks the tree and
//! describes where a drop would land as a `DockInfo`. Releasing the pointer
//! hands that description to `DockTree::dock`, which performs the structural
//! change.

use crate::commands::Cmd;
use crate::geometry::Rect;

use super::constants::{DRAG_BAR_SIZE, NB_PADDING, TAB_HEIGHT};
use super::region::Placement;
use super::tree::{DockTree, NodeId, NodeKind};

/// What a drop at the queried position would do
///
/// The order matters: everything before `None` is a dockable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DockKind {
    Top,
    Bottom,
    Left,
    Right,
    /// Insert as a tab of the target region
    Tab,
    /// Merge into the target item of the region
    TabAdd,
    /// Insert into the region under its drag bar
    Bar,
    None,
    /// Over a splitter; not a drop target
    Splitter,
    /// Far outside the dock area: drag the control out
    Export,
}

impl DockKind {
    /// Whether a drop with this kind changes the tree
    pub fn is_dockable(self) -> bool {
        self < DockKind::None
    }

    /// `Tab`, `TabAdd` or `Bar`
    pub fn is_tab_like(self) -> bool {
        (DockKind::Tab..=DockKind::Bar).contains(&self)
    }

    /// One of the four edge kinds
    pub fn is_edge(self) -> bool {
        self < DockKind::Tab
    }

    fn splits_rows(self) -> bool {
        matches!(self, DockKind::Top | DockKind::Bottom)
    }

    fn splits_columns(self) -> bool {
        matches!(self, DockKind::Left | DockKind::Right)
    }

    /// Docks after the target (right or below) rather than before it
    pub(crate) fn is_trailing(self) -> bool {
        matches!(self, DockKind::Right | DockKind::Bottom)
    }

    /// Whether the kind splits across a section laid out as `is_row`
    pub(crate) fn is_perpendicular_to(self, is_row: bool) -> bool {
        if is_row {
            self.splits_rows()
        } else {
            self.splits_columns()
        }
    }
}

/// Size of the thing being dragged, used to size previews
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSize {
    pub width: i32,
    pub height: i32,
    pub tab_width: i32,
}

impl DragSize {
    pub const fn new(width: i32, height: i32, tab_width: i32) -> Self {
        Self {
            width,
            height,
            tab_width,
        }
    }
}

/// One candidate drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockInfo {
    pub kind: DockKind,
    /// Preview rectangle
    pub bounds: Rect,
    /// Tab outline for tab-like previews
    pub tab_bounds: Rect,
    /// Target region, `None` for the dock area itself
    pub region: Option<NodeId>,
    /// Target item within the region
    pub control: Option<NodeId>,
}

impl DockInfo {
    /// "No target here"
    pub const NONE: DockInfo = DockInfo::of_kind(DockKind::None);

    pub const fn of_kind(kind: DockKind) -> Self {
        Self {
            kind,
            bounds: Rect::ZERO,
            tab_bounds: Rect::ZERO,
            region: None,
            control: None,
        }
    }

    /// Whether two answers would draw the same preview at the same target
    pub fn same_target(&self, other: &DockInfo) -> bool {
        self.kind == other.kind
            && self.region == other.region
            && self.bounds == other.bounds
            && self.tab_bounds == other.tab_bounds
    }

    /// Whether a preview outline is drawn for this answer
    pub fn has_preview(&self) -> bool {
        self.kind <= DockKind::TabAdd
    }
}

impl Default for DockInfo {
    fn default() -> Self {
        DockInfo::NONE
    }
}

/// Edge answer for a container: the smallest of the four distances
/// (left, right, top, bottom) picks the side, and the preview depth is
/// capped at two thirds of the container
pub(crate) fn edge_dock_info(
    bounds: Rect,
    distances: [i32; 4],
    size: DragSize,
    region: Option<NodeId>,
) -> DockInfo {
    let [left, right, top, bottom] = distances;
    let choice = left.min(right).min(top).min(bottom);
    let mdx = size.width.min((2 * bounds.width) / 3);
    let mdy = size.height.min((2 * bounds.height) / 3);
    let Rect {
        x: lx,
        y: ty,
        width: dx,
        height: dy,
    } = bounds;

    let (kind, rect) = if choice == left {
        (DockKind::Left, Rect::new(lx, ty, mdx, dy))
    } else if choice == right {
        (DockKind::Right, Rect::new(lx + dx - mdx, ty, mdx, dy))
    } else if choice == top {
        (DockKind::Top, Rect::new(lx, ty, dx, mdy))
    } else {
        (DockKind::Bottom, Rect::new(lx, ty + dy - mdy, dx, mdy))
    };
    DockInfo {
        kind,
        bounds: rect,
        tab_bounds: Rect::ZERO,
        region,
        control: None,
    }
}

impl DockTree {
    /// Most specific drop target at the point inside the node's subtree
    pub fn dock_info_at(
        &self,
        id: NodeId,
        x: i32,
        y: i32,
        size: DragSize,
        is_control: bool,
    ) -> Option<DockInfo> {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Control(_)) => self.item_dock_info_at(id, x, y, size, is_control),
            Some(NodeKind::Region(_)) => self.dock_info_at_region(id, x, y, size, is_control),
            Some(NodeKind::Section(_)) => {
                self.dock_info_at_section(id, x, y, size, is_control, false)
            }
            None => None,
        }
    }

    /// Drop target on the node's own tab or drag bar
    pub(crate) fn item_dock_info_at(
        &self,
        id: NodeId,
        x: i32,
        y: i32,
        size: DragSize,
        is_control: bool,
    ) -> Option<DockInfo> {
        let node = self.get(id)?;
        if !node.drag_bounds.contains(x, y) {
            return None;
        }
        let Rect {
            x,
            y,
            width: dx,
            height: dy,
        } = node.drag_bounds;
        let Rect {
            x: cx,
            y: cy,
            width: cdx,
            height: cdy,
        } = node.bounds;
        let mut control = Some(id);

        let (kind, bounds, tab_bounds) = if self.is_tab(id) {
            if is_control {
                (
                    DockKind::TabAdd,
                    Rect::new(
                        cx - NB_PADDING,
                        cy - NB_PADDING,
                        cdx + 2 * NB_PADDING,
                        size.height.min(cdy + 2 * NB_PADDING),
                    ),
                    Rect::new(x, y + 5, dx, dy - 5),
                )
            } else {
                (
                    DockKind::Tab,
                    Rect::new(
                        cx - NB_PADDING,
                        cy - NB_PADDING,
                        cdx + 2 * NB_PADDING,
                        cdy + 2 * NB_PADDING,
                    ),
                    Rect::new(x - size.tab_width / 2, y + 5, size.tab_width, TAB_HEIGHT - 5),
                )
            }
        } else {
            let tab_width = self.tab_width(id);
            if is_control {
                (
                    DockKind::TabAdd,
                    Rect::new(
                        cx,
                        y + TAB_HEIGHT,
                        cdx,
                        size.height.min(cdy + DRAG_BAR_SIZE - TAB_HEIGHT + 5),
                    ),
                    Rect::new(x, y, tab_width, TAB_HEIGHT - 5),
                )
            } else {
                control = None;
                (
                    DockKind::Tab,
                    Rect::new(cx, y + TAB_HEIGHT, cdx, cdy + DRAG_BAR_SIZE - TAB_HEIGHT + 5),
                    Rect::new(x + tab_width, y, size.tab_width, TAB_HEIGHT - 5),
                )
            }
        };

        Some(DockInfo {
            kind,
            bounds,
            tab_bounds,
            region: node.parent,
            control,
        })
    }

    // ------------------------------------------------------------------------
    // Commit
    // ------------------------------------------------------------------------

    /// Move `control` (a control or a whole group) to the target described
    /// by `info`. Non-dockable kinds do nothing.
    pub fn dock(&mut self, info: &DockInfo, control: NodeId) {
        let kind = info.kind;
        if !kind.is_dockable() || !self.contains(control) {
            return;
        }
        if info.region.is_some_and(|r| !self.contains(r)) {
            tracing::warn!("dock: target region {:?} no longer exists", info.region);
            return;
        }
        let old_parent = self.parent(control);

        match kind {
            DockKind::Tab | DockKind::Bar => {
                let Some(region) = info.region.filter(|r| self.region(*r).is_some()) else {
                    tracing::warn!("dock: {:?} without a target region", kind);
                    return;
                };
                let placement = info.control.map_or(Placement::Append, Placement::Before);
                self.add_to_region(region, control, placement, true);
            }
            DockKind::TabAdd => {
                if !self.dock_tab_add(info, control) {
                    return;
                }
            }
            _ => match info.region {
                Some(region) => {
                    let Some(parent) = self.parent(region) else {
                        tracing::warn!("dock: region {} has no parent", region);
                        return;
                    };
                    if self.section(parent).is_some() {
                        self.add_to_section(parent, control, region, kind);
                    } else {
                        self.add_to_region(parent, control, Placement::Before(region), true);
                    }
                }
                None => self.dock_at_root(control, kind),
            },
        }

        if let Some(old) = old_parent {
            if self.contains(control) && self.contains(old) && self.parent(control) != Some(old) {
                self.remove(old, control);
            }
        }
        tracing::debug!("Docked {} ({:?})", control, kind);
        self.request_layout();
        self.push_cmd(Cmd::Redraw);
    }

    fn dock_tab_add(&mut self, info: &DockInfo, control: NodeId) -> bool {
        let (Some(region), Some(item)) = (info.region, info.control) else {
            tracing::warn!("dock: tab-add without a target item");
            return false;
        };
        if self.index_in_parent(item).is_none() || self.parent(item) != Some(region) {
            tracing::warn!("dock: tab-add target {} is not in region {}", item, region);
            return false;
        }

        let target = match self.get(item).map(|n| &n.kind) {
            Some(NodeKind::Control(_)) => {
                let added = self.wrap_control(control);
                let item_region = self.new_region(vec![item]);
                let section = self.new_section(true, vec![item_region, added]);
                self.replace_child(region, item, section);
                self.contents_changed(region);
                section
            }
            Some(NodeKind::Section(s)) => {
                let item_is_row = s.is_row;
                let same_orientation = self.section(control).is_some_and(|c| c.is_row == item_is_row);
                if same_orientation {
                    let moved = self.contents(control);
                    for child in moved {
                        let len = self.contents(item).len();
                        self.insert_child(item, len, child);
                    }
                    if let Some(contents) = self.contents_mut(control) {
                        contents.clear();
                    }
                    if let Some(parent) = self.parent(control) {
                        self.remove(parent, control);
                    }
                    self.free(control);
                } else {
                    let added = self.wrap_control(control);
                    let len = self.contents(item).len();
                    self.insert_child(item, len, added);
                }
                self.contents_changed(item);
                item
            }
            Some(NodeKind::Region(_)) => {
                let len = self.contents(item).len();
                self.insert_child(item, len, control);
                self.contents_changed(item);
                item
            }
            None => return false,
        };

        let index = self.contents(region).iter().position(|c| *c == target);
        self.set_active(region, index);
        true
    }

    /// Controls are placed into sections inside a fresh region
    fn wrap_control(&mut self, control: NodeId) -> NodeId {
        if self.control(control).is_some() {
            self.new_region(vec![control])
        } else {
            control
        }
    }

    /// Dock at an edge of the whole dock area
    fn dock_at_root(&mut self, control: NodeId, kind: DockKind) {
        let mut root = self.root();
        let Some(is_row) = self.section(root).map(|s| s.is_row) else {
            return;
        };
        if kind.is_perpendicular_to(is_row) && !self.contents(root).is_empty() {
            let new_root = self.new_section(!is_row, vec![root]);
            self.set_root(new_root);
            root = new_root;
            tracing::debug!("New root section {} wraps the old root", root);
        }

        let contents = self.contents(root);
        let target = if kind.is_trailing() {
            contents.last()
        } else {
            contents.first()
        };
        match target.copied() {
            Some(target) => self.add_to_section(root, control, target, kind),
            None => {
                if let Some(section) = self.section_mut(root) {
                    section.is_row = !section.is_row;
                }
                let region = self.new_region(vec![control]);
                self.set_group_contents(root, vec![region]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ordering() {
        assert!(DockKind::Tab.is_dockable());
        assert!(DockKind::Bar.is_dockable());
        assert!(!DockKind::None.is_dockable());
        assert!(!DockKind::Export.is_dockable());
        assert!(DockKind::TabAdd.is_tab_like());
        assert!(!DockKind::Left.is_tab_like());
        assert!(DockKind::Top.is_perpendicular_to(true));
        assert!(!DockKind::Top.is_perpendicular_to(false));
        assert!(DockKind::Right.is_perpendicular_to(false));
    }

    #[test]
    fn test_edge_picks_nearest_side_and_caps_depth() {
        let bounds = Rect::new(0, 0, 300, 90);
        let size = DragSize::new(500, 500, 40);
        let info = edge_dock_info(bounds, [2, 297, 40, 49], size, None);
        assert_eq!(info.kind, DockKind::Left);
        assert_eq!(info.bounds, Rect::new(0, 0, 200, 90));

        let info = edge_dock_info(bounds, [100, 197, 44, 5], DragSize::new(50, 30, 40), None);
        assert_eq!(info.kind, DockKind::Bottom);
        assert_eq!(info.bounds, Rect::new(0, 60, 300, 30));
    }

    #[test]
    fn test_ties_prefer_left_then_right_then_top() {
        let bounds = Rect::new(0, 0, 100, 100);
        let size = DragSize::new(10, 10, 10);
        assert_eq!(
            edge_dock_info(bounds, [5, 5, 5, 5], size, None).kind,
            DockKind::Left
        );
        assert_eq!(
            edge_dock_info(bounds, [6, 5, 5, 5], size, None).kind,
            DockKind::Right
        );
        assert_eq!(
            edge_dock_info(bounds, [6, 6, 5, 5], size, None).kind,
            DockKind::Top
        );
    }
}
