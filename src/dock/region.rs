//! Tab groups
//!
//! A region shows its single visible child under a drag bar, or all of its
//! visible children as a notebook with one tab each. Tabs overlap by one
//! pixel; when they do not fit, a two-button scroller appears at the right of
//! the tab strip and `left_tab` selects the first visible tab.

use crate::commands::Cmd;
use crate::geometry::{Rect, Size};

use super::constants::{
    DRAG_BAR_SIZE, NB_MARGIN_BOTTOM, NB_MARGIN_LEFT, NB_MARGIN_RIGHT, NB_MARGIN_TOP,
    NB_PADDING, TAB_HEIGHT, TAB_SCROLLER_HEIGHT, TAB_SCROLLER_WIDTH,
};
use super::control::DockStyle;
use super::dock_info::{edge_dock_info, DockInfo, DockKind, DragSize};
use super::interaction::HitTarget;
use super::tree::{DockTree, NodeId};

/// Drawing state of a notebook tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Inactive,
    Active,
    /// Pointer is over an inactive tab
    Hover,
}

/// Which tab scroll buttons are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabScroll {
    /// Only "scroll left" (reveal later tabs)
    Left,
    /// Only "scroll right" (reveal earlier tabs)
    Right,
    Both,
}

impl TabScroll {
    fn for_window(left_tab: usize, max_tab: usize) -> Option<TabScroll> {
        match (left_tab < max_tab, left_tab > 0) {
            (true, false) => Some(TabScroll::Left),
            (false, true) => Some(TabScroll::Right),
            (true, true) => Some(TabScroll::Both),
            (false, false) => None,
        }
    }
}

/// Tab scroll request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Shift the strip left by one tab
    Left,
    /// Shift the strip right by one tab
    Right,
    /// Make the given visible tab the leftmost one
    To(usize),
}

/// Where `add_to_region` inserts a child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    Before(NodeId),
    After(NodeId),
}

/// Group payload of a region node
#[derive(Debug, Clone, Default)]
pub struct DockRegion {
    pub(crate) contents: Vec<NodeId>,
    /// Index into `contents` of the selected tab
    pub(crate) active: Option<usize>,
    /// Index into the visible children of the leftmost shown tab
    pub(crate) left_tab: usize,
    pub(crate) max_tab: usize,
    pub(crate) scroll: Option<TabScroll>,
    /// Tab strip clip rectangle, known once laid out as a notebook
    pub(crate) tab_clip: Option<Rect>,
}

impl DockRegion {
    pub fn contents(&self) -> &[NodeId] {
        &self.contents
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn left_tab(&self) -> usize {
        self.left_tab
    }

    pub fn max_tab(&self) -> usize {
        self.max_tab
    }

    pub fn scroll(&self) -> Option<TabScroll> {
        self.scroll
    }

    pub fn tab_clip(&self) -> Option<Rect> {
        self.tab_clip
    }
}

impl DockTree {
    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    pub(crate) fn calc_min_region(&mut self, id: NodeId, use_size: bool) -> Size {
        let contents = self.visible_contents(id);
        let (mut tdx, mut tdy) = (0, 0);
        if self.is_notebook(id) {
            let mut tab_dx = 0;
            for item in &contents {
                let size = self.calc_min(*item, use_size);
                tdx = tdx.max(size.width);
                tdy = tdy.max(size.height);
                tab_dx += self.tab_width(*item) - 1;
            }
            tdx = NB_MARGIN_LEFT + NB_MARGIN_RIGHT + tdx.max(tab_dx + 1 - 2 * NB_PADDING);
            tdy += TAB_HEIGHT + NB_MARGIN_TOP + NB_MARGIN_BOTTOM;
        } else if let Some(item) = contents.first().copied() {
            let size = self.calc_min(item, use_size);
            tdx = size.width;
            tdy = size.height;
            if !self.is_locked(item) {
                match self.style(item) {
                    DockStyle::Horizontal => tdy += DRAG_BAR_SIZE,
                    DockStyle::Vertical => tdx += DRAG_BAR_SIZE,
                    _ => {}
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            if node.width < 0 {
                node.width = tdx;
                node.height = tdy;
            }
        }
        Size::new(tdx, tdy)
    }

    pub(crate) fn recalc_region(&mut self, id: NodeId, rect: Rect) {
        let rect = Rect::new(rect.x, rect.y, rect.width.max(0), rect.height.max(0));
        let Some(node) = self.get_mut(id) else {
            return;
        };
        node.width = rect.width;
        node.height = rect.height;
        node.bounds = rect;

        let contents = self.visible_contents(id);
        if contents.is_empty() {
            if let Some(region) = self.region_mut(id) {
                region.tab_clip = None;
                region.scroll = None;
            }
        } else if self.is_notebook(id) {
            self.layout_notebook(id, rect, &contents);
        } else {
            self.layout_drag_bar(id, rect, contents[0]);
        }

        let (active, children) = match self.region(id) {
            Some(r) => (r.active, r.contents.clone()),
            None => return,
        };
        for (i, child) in children.into_iter().enumerate() {
            self.set_visibility(child, Some(i) == active);
        }
    }

    fn layout_notebook(&mut self, id: NodeId, rect: Rect, contents: &[NodeId]) {
        let x = rect.x + NB_MARGIN_LEFT;
        let tx0 = x - NB_PADDING;
        let dx = rect.width - (NB_MARGIN_LEFT + NB_MARGIN_RIGHT);
        let iy = rect.y + TAB_HEIGHT + NB_MARGIN_TOP;
        let dy = rect.height - (TAB_HEIGHT + NB_MARGIN_TOP + NB_MARGIN_BOTTOM);

        let mut tx = tx0;
        for item in contents {
            self.recalc_sizes(*item, Rect::new(x, iy, dx, dy));
            let tdx = self.tab_width(*item);
            self.set_drag_bounds(*item, Rect::new(tx, rect.y, tdx, TAB_HEIGHT));
            tx += tdx - 1;
        }

        let cdx = dx + 2 * NB_PADDING + 1;
        let mut clip = Rect::new(tx0, rect.y, cdx, TAB_HEIGHT);
        let mut left_tab = self.region(id).map_or(0, |r| r.left_tab);
        let mut max_tab = 0;
        let mut scroll = None;

        let xr = tx0 + cdx;
        if tx + 2 >= xr {
            max_tab = 1;
            let n = contents.len() - 1;
            let mut xr = xr - TAB_SCROLLER_WIDTH;
            for i in (0..=n).rev() {
                xr -= self.tab_width(contents[i]) - 1;
                if xr < tx0 {
                    max_tab = (i + 1).min(n);
                    break;
                }
            }
            left_tab = left_tab.min(max_tab);
            scroll = TabScroll::for_window(left_tab, max_tab);

            if left_tab > 0 {
                let adx = self.drag_bounds(contents[left_tab]).x - tx0;
                self.shift_tabs(contents, adx);
            }
            clip.width -= TAB_SCROLLER_WIDTH;
        } else {
            left_tab = 0;
        }

        tracing::trace!(
            "Notebook {} laid out: {} tabs, left_tab {}, max_tab {}",
            id,
            contents.len(),
            left_tab,
            max_tab
        );
        if let Some(region) = self.region_mut(id) {
            region.left_tab = left_tab;
            region.max_tab = max_tab;
            region.scroll = scroll;
            region.tab_clip = Some(clip);
        }
    }

    fn layout_drag_bar(&mut self, id: NodeId, rect: Rect, item: NodeId) {
        let mut inner = rect;
        let mut drag = Rect::ZERO;
        if !self.is_locked(item) {
            match self.style(item) {
                DockStyle::Horizontal => {
                    drag = Rect::new(rect.x, rect.y, rect.width, DRAG_BAR_SIZE);
                    inner.y += DRAG_BAR_SIZE;
                    inner.height -= DRAG_BAR_SIZE;
                }
                DockStyle::Vertical => {
                    drag = Rect::new(rect.x, rect.y, DRAG_BAR_SIZE, rect.height);
                    inner.x += DRAG_BAR_SIZE;
                    inner.width -= DRAG_BAR_SIZE;
                }
                _ => {}
            }
        }
        self.recalc_sizes(item, inner);
        self.set_drag_bounds(item, drag);
        if let Some(region) = self.region_mut(id) {
            region.tab_clip = None;
            region.scroll = None;
        }
    }

    /// Move every tab left by `adx` pixels
    fn shift_tabs(&mut self, tabs: &[NodeId], adx: i32) {
        for item in tabs {
            let db = self.drag_bounds(*item);
            let width = self.tab_width(*item);
            self.set_drag_bounds(*item, Rect::new(db.x - adx, db.y, width, db.height));
        }
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Insert `control` into the region, moving it if it is already a child
    pub fn add_to_region(
        &mut self,
        region: NodeId,
        control: NodeId,
        placement: Placement,
        activate: bool,
    ) {
        let Some(contents) = self.contents_mut(region) else {
            tracing::warn!("add_to_region: {} is not a region", region);
            return;
        };
        let old = contents.iter().position(|c| *c == control);
        if let Some(old) = old {
            contents.remove(old);
        }
        let index = match placement {
            Placement::Append => None,
            Placement::Before(b) => contents.iter().position(|c| *c == b).or(old),
            Placement::After(a) => contents.iter().position(|c| *c == a).map(|i| i + 1).or(old),
        }
        .unwrap_or(contents.len());

        self.insert_child(region, index, control);
        self.contents_changed(region);
        tracing::debug!("Added {} to region {} at {}", control, region, index);
        if activate {
            self.set_active(region, Some(index));
        }
    }

    pub(crate) fn remove_from_region(&mut self, region: NodeId, item: NodeId) {
        let Some(i) = self.contents(region).iter().position(|c| *c == item) else {
            tracing::warn!("remove: {} is not in region {}", item, region);
            return;
        };

        let collapse = self.get(item).is_some_and(|n| {
            n.is_group() && n.contents().len() == 1 && n.parent == Some(region)
        });
        if collapse {
            let inner = self.contents(item)[0];
            let replacement = if self.region(inner).is_some() {
                let spliced = self.contents(inner);
                self.free(inner);
                spliced
            } else {
                vec![inner]
            };
            if let Some(contents) = self.contents_mut(region) {
                let tail = contents.split_off(i + 1);
                contents.truncate(i);
                contents.extend(replacement.iter().copied());
                contents.extend(tail);
            }
            for child in &replacement {
                if let Some(node) = self.get_mut(*child) {
                    node.parent = Some(region);
                }
            }
            self.free(item);
            tracing::debug!("Collapsed {} into region {}", item, region);
        } else {
            let previous = self.active_control(region);
            let Some(r) = self.region_mut(region) else {
                return;
            };
            r.contents.remove(i);
            let len = r.contents.len();
            let active = match r.active {
                Some(a) if a > i || a >= len => a.checked_sub(1),
                other => other,
            };
            self.change_active(region, previous, active);
            if active.is_some_and(|a| {
                self.contents(region)
                    .get(a)
                    .is_some_and(|c| !self.is_visible(*c))
            }) {
                self.update_active(region, active);
            }
            tracing::debug!("Removed {} from region {}", item, region);
        }
        self.contents_changed(region);

        let Some(parent) = self.parent(region) else {
            return;
        };
        match self.contents(region).len() {
            0 => {
                self.remove(parent, region);
                self.free(region);
            }
            1 if self.region(parent).is_some() => self.remove(parent, region),
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Active tab
    // ------------------------------------------------------------------------

    fn active_control(&self, region: NodeId) -> Option<NodeId> {
        let r = self.region(region)?;
        r.contents.get(r.active?).copied()
    }

    /// Select tab `active`, updating panel visibility and notifying the
    /// dockable delegates of the previous and new active controls
    pub fn set_active(&mut self, region: NodeId, active: Option<usize>) {
        let previous = self.active_control(region);
        let unchanged = self.region(region).map_or(true, |r| r.active == active);
        if unchanged {
            return;
        }
        self.change_active(region, previous, active);
    }

    fn change_active(&mut self, region: NodeId, previous: Option<NodeId>, active: Option<usize>) {
        let Some(r) = self.region_mut(region) else {
            return;
        };
        r.active = active;
        let children = r.contents.clone();
        for (i, child) in children.iter().enumerate() {
            self.set_visibility(*child, Some(i) == active);
        }

        let current = active.and_then(|a| children.get(a).copied());
        if previous == current {
            return;
        }
        for (control, activated) in [(previous, false), (current, true)] {
            let Some(control) = control else {
                continue;
            };
            if let Some(c) = self.control_mut(control) {
                if let Some(dockable) = c.dockable.as_mut() {
                    dockable.tab_activated(control, activated);
                }
            }
        }
    }

    /// Pick the first visible child at or after `from`, else the nearest one
    /// before it
    pub(crate) fn update_active(&mut self, region: NodeId, from: Option<usize>) {
        let contents = self.contents(region);
        let start = from.unwrap_or(0).min(contents.len());
        let found = (start..contents.len())
            .chain((0..start).rev())
            .find(|i| self.is_visible(contents[*i]));
        self.set_active(region, found);
    }

    /// A child of the region was hidden or shown
    pub(crate) fn show_hide(&mut self, region: NodeId, control: NodeId) {
        let Some(i) = self.contents(region).iter().position(|c| *c == control) else {
            return;
        };
        let active = self.region(region).and_then(|r| r.active);
        if active == Some(i) {
            self.update_active(region, active);
        } else if active.is_none() && self.is_visible(control) {
            self.set_active(region, Some(i));
        }
    }

    pub(crate) fn activate_in_region(&mut self, region: NodeId, control: NodeId, layout: bool) {
        if !self.is_visible(control) || !self.is_notebook(region) {
            return;
        }
        let Some(i) = self.contents(region).iter().position(|c| *c == control) else {
            return;
        };
        if self.region(region).and_then(|r| r.active) == Some(i) {
            return;
        }
        self.set_active(region, Some(i));
        self.make_active_tab_visible(region);
        if layout {
            self.request_layout();
        } else {
            let bounds = self.bounds(region);
            self.push_cmd(Cmd::RedrawRect(bounds));
        }
    }

    /// Scroll the tab strip so the active tab is fully shown, if possible
    pub fn make_active_tab_visible(&mut self, region: NodeId) {
        let Some(r) = self.region(region) else {
            return;
        };
        let Some(active) = r.active else {
            return;
        };
        if active < r.left_tab {
            self.scroll_region(region, ScrollRequest::To(active));
            return;
        }
        let (max_tab, clip) = (r.max_tab, r.tab_clip);
        let Some(tab) = r.contents.get(active).copied() else {
            return;
        };
        let db = self.drag_bounds(tab);
        let shown = clip.is_some_and(|c| c.contains(db.right() - 1, db.bottom() - 1));
        if !shown {
            self.scroll_region(region, ScrollRequest::To(active.min(max_tab)));
        }
    }

    /// Shift the tab strip; tabs move without a layout pass
    pub fn scroll_region(&mut self, region: NodeId, request: ScrollRequest) {
        let Some(r) = self.region(region) else {
            return;
        };
        let current = r.left_tab;
        let left_tab = match request {
            ScrollRequest::Left => (current + 1).min(r.max_tab),
            ScrollRequest::Right => current.saturating_sub(1),
            ScrollRequest::To(i) => i,
        };
        if left_tab == current {
            return;
        }

        let contents = self.visible_contents(region);
        let (Some(to), Some(from)) = (contents.get(left_tab), contents.get(current)) else {
            return;
        };
        let adx = self.drag_bounds(*to).x - self.drag_bounds(*from).x;

        let Some(r) = self.region_mut(region) else {
            return;
        };
        r.left_tab = left_tab;
        r.scroll = TabScroll::for_window(left_tab, r.max_tab);
        let clip = r.tab_clip;
        self.shift_tabs(&contents, adx);
        tracing::trace!("Scrolled region {} to tab {}", region, left_tab);

        if let Some(clip) = clip {
            self.push_cmd(Cmd::RedrawRect(Rect::new(
                clip.x,
                clip.y,
                clip.width + TAB_SCROLLER_WIDTH,
                clip.height,
            )));
        }
    }

    /// A tab of the region was clicked
    pub fn tab_clicked(&mut self, region: NodeId, control: NodeId) {
        let Some(i) = self.contents(region).iter().position(|c| *c == control) else {
            return;
        };
        if self.region(region).and_then(|r| r.active) != Some(i) {
            self.set_active(region, Some(i));
            let bounds = self.bounds(region);
            self.push_cmd(Cmd::RedrawRect(bounds));
        }
        if self.control(control).is_some() {
            self.push_cmd(Cmd::ControlActivated(control));
        }
    }

    // ------------------------------------------------------------------------
    // Hit-testing
    // ------------------------------------------------------------------------

    /// Rectangle of the tab scroller, when scrolling is active
    pub fn scroller_bounds(&self, region: NodeId) -> Option<Rect> {
        let r = self.region(region)?;
        r.scroll?;
        let clip = r.tab_clip?;
        Some(Rect::new(
            clip.right(),
            clip.y + 2,
            TAB_SCROLLER_WIDTH,
            TAB_SCROLLER_HEIGHT,
        ))
    }

    /// Which scroll button, if any, is at the point
    pub fn scroll_button_at(&self, region: NodeId, x: i32, y: i32) -> Option<ScrollRequest> {
        let scroller = self.scroller_bounds(region)?;
        if !scroller.contains(x, y) {
            return None;
        }
        if x - scroller.x < TAB_SCROLLER_WIDTH / 2 {
            Some(ScrollRequest::Left)
        } else {
            Some(ScrollRequest::Right)
        }
    }

    pub(crate) fn object_at_region(&self, id: NodeId, x: i32, y: i32) -> Option<HitTarget> {
        let node = self.get(id)?;
        if !node.shown || !node.is_at(x, y) {
            return None;
        }
        if self.is_notebook(id)
            && self
                .scroller_bounds(id)
                .is_some_and(|s| s.contains(x, y))
        {
            return Some(HitTarget::Node(id));
        }
        for item in self.visible_contents(id) {
            if self.drag_bounds(item).contains(x, y) {
                return Some(HitTarget::Node(item));
            }
            if let Some(hit) = self.object_at(item, x, y, false) {
                return Some(hit);
            }
        }
        None
    }

    pub(crate) fn dock_info_at_region(
        &self,
        id: NodeId,
        x: i32,
        y: i32,
        size: DragSize,
        is_control: bool,
    ) -> Option<DockInfo> {
        if let Some(info) = self.item_dock_info_at(id, x, y, size, is_control) {
            return Some(info);
        }
        let node = self.get(id)?;
        if !node.shown || !node.is_at(x, y) {
            return None;
        }

        let contents = self.visible_contents(id);
        for item in &contents {
            if let Some(info) = self.dock_info_at(*item, x, y, size, is_control) {
                return Some(info);
            }
        }

        let b = node.bounds;
        if self.is_notebook(id) {
            if let Some(last) = contents.last().copied() {
                let db = self.drag_bounds(last);
                if x >= db.right() && y >= b.y && y < b.y + TAB_HEIGHT {
                    let ix = if self.tab_state(last) == TabState::Active {
                        db.x + 2
                    } else {
                        db.x
                    };
                    return Some(DockInfo {
                        kind: DockKind::Tab,
                        bounds: Rect::new(
                            b.x + 3,
                            db.bottom() - 1,
                            b.width - 8,
                            b.bottom() - db.bottom() - 4,
                        ),
                        tab_bounds: Rect::new(
                            ix + db.width,
                            db.y + 5,
                            size.tab_width,
                            db.height - 5,
                        ),
                        region: Some(id),
                        control: None,
                    });
                }
            }
        }

        let left = x - b.x;
        let right = b.right() - 1 - x;
        let top = y - b.y;
        let bottom = b.bottom() - 1 - y;
        Some(edge_dock_info(b, [left, right, top, bottom], size, Some(id)))
    }
}
