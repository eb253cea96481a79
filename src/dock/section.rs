//! Sections: rows or columns of regions and nested sections
//!
//! A resizable section shares its extent among its visible children in
//! proportion to their last explicit sizes, with a splitter between each
//! pair. A section without any resizable control packs its children at
//! their minimum sizes with a fixed gap and no splitters.

use crate::commands::Cmd;
use crate::geometry::{div_round_half_even, Rect, Size};

use super::constants::{EXPORT_MARGIN, FIXED_GAP, SPLITTER_SIZE_H, SPLITTER_SIZE_V};
use super::dock_info::{edge_dock_info, DockInfo, DockKind, DragSize};
use super::interaction::HitTarget;
use super::splitter::{DockSplitter, SplitterStyle};
use super::tree::{DockTree, NodeId};

#[derive(Debug, Clone)]
pub struct DockSection {
    /// Children side by side (true) or stacked (false)
    pub(crate) is_row: bool,
    pub(crate) contents: Vec<NodeId>,
    pub(crate) splitters: Vec<DockSplitter>,
}

impl DockSection {
    pub fn new(is_row: bool) -> Self {
        Self {
            is_row,
            contents: Vec::new(),
            splitters: Vec::new(),
        }
    }

    pub fn is_row(&self) -> bool {
        self.is_row
    }

    pub fn contents(&self) -> &[NodeId] {
        &self.contents
    }

    pub fn splitters(&self) -> &[DockSplitter] {
        &self.splitters
    }
}

impl DockTree {
    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    pub(crate) fn calc_min_section(&mut self, id: NodeId, use_size: bool) -> Size {
        let Some(is_row) = self.section(id).map(|s| s.is_row) else {
            return Size::default();
        };
        let contents = self.visible_contents(id);
        let n = contents.len() as i32;
        let (mut tdx, mut tdy) = (0, 0);
        for item in &contents {
            let size = self.calc_min(*item, use_size);
            if is_row {
                tdx += size.width;
                tdy = tdy.max(size.height);
            } else {
                tdx = tdx.max(size.width);
                tdy += size.height;
            }
        }

        if self.is_resizable(id) {
            if is_row {
                tdx += (n - 1) * SPLITTER_SIZE_V;
            } else {
                tdy += (n - 1) * SPLITTER_SIZE_H;
            }
        } else if is_row {
            tdx += (n + 1) * FIXED_GAP;
            tdy += 2 * FIXED_GAP;
        } else {
            tdx += 2 * FIXED_GAP;
            tdy += (n + 1) * FIXED_GAP;
        }

        if let Some(node) = self.get_mut(id) {
            if node.width < 0 {
                node.width = tdx;
                node.height = tdy;
            }
        }
        Size::new(tdx, tdy)
    }

    pub(crate) fn recalc_section(&mut self, id: NodeId, rect: Rect) {
        let rect = Rect::new(rect.x, rect.y, rect.width.max(0), rect.height.max(0));
        let Some(node) = self.get_mut(id) else {
            return;
        };
        node.width = rect.width;
        node.height = rect.height;
        node.bounds = rect;

        if self.is_resizable(id) {
            self.layout_proportional(id, rect);
        } else {
            self.layout_fixed(id, rect);
        }

        for child in self.contents(id) {
            let visible = self.is_visible(child);
            self.set_visibility(child, visible);
        }
    }

    /// Share the extent in proportion to the children's last sizes; the
    /// last visible child absorbs the rounding remainder
    fn layout_proportional(&mut self, id: NodeId, rect: Rect) {
        let Some(section) = self.section(id) else {
            return;
        };
        let is_row = section.is_row;
        let previous: Vec<Option<Rect>> =
            section.splitters.iter().map(|s| s.last_bounds).collect();
        let contents = self.visible_contents(id);
        let n = contents.len().saturating_sub(1);
        let gutter = if is_row { SPLITTER_SIZE_V } else { SPLITTER_SIZE_H };

        let extents: Vec<i32> = contents
            .iter()
            .map(|c| {
                let node = self.get(*c);
                let e = if is_row {
                    node.map_or(0, |n| n.width)
                } else {
                    node.map_or(0, |n| n.height)
                };
                e.max(0)
            })
            .collect();
        let total: i32 = extents.iter().sum();
        let avail = if is_row { rect.width } else { rect.height } - n as i32 * gutter;
        let cdx = i64::from(total.max(1));
        let delta = avail - total;
        let mut remaining = delta;

        let mut splitters = Vec::with_capacity(n);
        let mut pos = if is_row { rect.x } else { rect.y };
        for (i, (item, extent)) in contents.iter().zip(&extents).enumerate() {
            let share = if i < n {
                div_round_half_even(i64::from(*extent) * i64::from(delta), cdx) as i32
            } else {
                remaining
            };
            remaining -= share;
            let size = extent + share;

            let (child, bar, style) = if is_row {
                (
                    Rect::new(pos, rect.y, size, rect.height),
                    Rect::new(pos + size, rect.y, gutter, rect.height),
                    SplitterStyle::Vertical,
                )
            } else {
                (
                    Rect::new(rect.x, pos, rect.width, size),
                    Rect::new(rect.x, pos + size, rect.width, gutter),
                    SplitterStyle::Horizontal,
                )
            };
            self.recalc_sizes(*item, child);
            pos += size;

            if i < n {
                let mut splitter = DockSplitter::new(i, style, bar);
                splitter.last_bounds = previous.get(i).copied().flatten();
                splitters.push(splitter);
                pos += gutter;
            }
        }

        if let Some(section) = self.section_mut(id) {
            section.splitters = splitters;
        }
    }

    /// Pack children at their minimum sizes, `FIXED_GAP` apart
    fn layout_fixed(&mut self, id: NodeId, rect: Rect) {
        let Some(section) = self.section_mut(id) else {
            return;
        };
        section.splitters.clear();
        let is_row = section.is_row;

        let (mut x, mut y) = (rect.x + FIXED_GAP, rect.y + FIXED_GAP);
        let mut dx = (rect.width - FIXED_GAP).max(0);
        let mut dy = (rect.height - FIXED_GAP).max(0);
        for item in self.visible_contents(id) {
            let min = self.calc_min(item, false);
            let idx = min.width.min(dx);
            let idy = min.height.min(dy);
            self.recalc_sizes(item, Rect::new(x, y, idx, idy));
            if is_row {
                dx = (dx - idx - FIXED_GAP).max(0);
                x += idx + FIXED_GAP;
            } else {
                dy = (dy - idy - FIXED_GAP).max(0);
                y += idy + FIXED_GAP;
            }
        }
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Dock `control` next to `target`, a child of `section`.
    ///
    /// Edges parallel to the section insert beside the target; the other
    /// two edges replace the target with a perpendicular section holding
    /// both.
    pub fn add_to_section(
        &mut self,
        section: NodeId,
        control: NodeId,
        target: NodeId,
        kind: DockKind,
    ) {
        let Some(is_row) = self.section(section).map(|s| s.is_row) else {
            tracing::warn!("add_to_section: {} is not a section", section);
            return;
        };
        if !self.contents(section).contains(&target) {
            tracing::warn!("add_to_section: {} is not in section {}", target, section);
            return;
        }
        let added = if self.region(control).is_some() {
            control
        } else {
            self.new_region(vec![control])
        };

        if kind.is_perpendicular_to(is_row) {
            let pair = if kind.is_trailing() {
                vec![target, added]
            } else {
                vec![added, target]
            };
            let nested = self.new_section(!is_row, pair);
            // new_section re-parented the target; put the new section in its slot
            if let Some(contents) = self.contents_mut(section) {
                if let Some(i) = contents.iter().position(|c| *c == target) {
                    contents[i] = nested;
                }
            }
            if let Some(node) = self.get_mut(nested) {
                node.parent = Some(section);
            }
            tracing::debug!("Split {} into new section {} ({:?})", target, nested, kind);
        } else {
            if let Some(contents) = self.contents_mut(section) {
                contents.retain(|c| *c != added);
            }
            let Some(mut i) = self.contents(section).iter().position(|c| *c == target) else {
                return;
            };
            if kind.is_trailing() {
                i += 1;
            }
            self.insert_child(section, i, added);
            tracing::debug!("Inserted {} into section {} at {}", added, section, i);
        }
        self.contents_changed(section);
    }

    pub(crate) fn remove_from_section(&mut self, section: NodeId, item: NodeId) {
        let Some(i) = self.contents(section).iter().position(|c| *c == item) else {
            tracing::warn!("remove: {} is not in section {}", item, section);
            return;
        };

        let collapse = self.get(item).is_some_and(|n| {
            n.is_group() && n.contents().len() == 1 && n.parent == Some(section)
        });
        if collapse {
            let inner = self.contents(item)[0];
            if let Some(contents) = self.contents_mut(section) {
                contents[i] = inner;
            }
            if let Some(node) = self.get_mut(inner) {
                node.parent = Some(section);
            }
            self.free(item);
            tracing::debug!("Collapsed {} into section {}", item, section);
        } else if let Some(contents) = self.contents_mut(section) {
            contents.remove(i);
            tracing::debug!("Removed {} from section {}", item, section);
        }
        self.contents_changed(section);

        let len = self.contents(section).len();
        match self.parent(section) {
            Some(parent) if len <= 1 => {
                self.remove(parent, section);
                if len == 0 {
                    self.free(section);
                }
            }
            None if len == 0 && section == self.root() => {
                tracing::info!("Dock area is now empty");
                self.push_cmd(Cmd::DockAreaEmpty);
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Splitters
    // ------------------------------------------------------------------------

    fn splitter_neighbors(&self, section: NodeId, index: usize) -> Option<(NodeId, NodeId)> {
        let contents = self.visible_contents(section);
        Some((*contents.get(index)?, *contents.get(index + 1)?))
    }

    /// The two items a splitter separates, as rectangles
    pub fn splitter_neighbor_bounds(&self, section: NodeId, index: usize) -> Option<(Rect, Rect)> {
        let (first, second) = self.splitter_neighbors(section, index)?;
        Some((self.bounds(first), self.bounds(second)))
    }

    /// The range a splitter may be dragged over: from the start of the item
    /// before it to the end of the item after it
    pub fn splitter_bounds(&self, section: NodeId, index: usize) -> Option<Rect> {
        let s = self.section(section)?;
        let mut r = s.splitters.get(index)?.bounds;
        let (first, second) = self.splitter_neighbor_bounds(section, index)?;
        if s.is_row {
            r.x = first.x;
            r.width = second.right() - r.x;
        } else {
            r.y = first.y;
            r.height = second.bottom() - r.y;
        }
        Some(r)
    }

    /// Re-lay out the two neighbors of a splitter after it moved
    pub(crate) fn update_splitter(&mut self, section: NodeId, index: usize) {
        let Some(s) = self.section(section) else {
            return;
        };
        let Some(splitter) = s.splitters.get(index) else {
            return;
        };
        let (is_row, style, b) = (s.is_row, splitter.style, splitter.bounds);
        let Some((item1, item2)) = self.splitter_neighbors(section, index) else {
            return;
        };
        let (r1, r2) = (self.bounds(item1), self.bounds(item2));

        if is_row {
            self.recalc_sizes(item1, Rect::new(r1.x, r1.y, b.x - r1.x, r1.height));
            self.recalc_sizes(
                item2,
                Rect::new(b.right(), r2.y, r2.right() - b.right(), r2.height),
            );
        } else {
            self.recalc_sizes(item1, Rect::new(r1.x, r1.y, r1.width, b.y - r1.y));
            self.recalc_sizes(
                item2,
                Rect::new(r2.x, b.bottom(), r2.width, r2.bottom() - b.bottom()),
            );
        }

        let (ex, ey) = match style {
            SplitterStyle::Horizontal => (0, b.height),
            SplitterStyle::Vertical => (b.width, 0),
        };
        self.push_cmd(Cmd::RedrawRect(Rect::new(
            r1.x - ex,
            r1.y - ey,
            r2.right() - r1.x + 2 * ex,
            r2.bottom() - r1.y + 2 * ey,
        )));
        tracing::trace!("Splitter {} of {} moved to {:?}", index, section, b);
    }

    // ------------------------------------------------------------------------
    // Hit-testing
    // ------------------------------------------------------------------------

    pub(crate) fn object_at_section(
        &self,
        id: NodeId,
        x: i32,
        y: i32,
        force: bool,
    ) -> Option<HitTarget> {
        let node = self.get(id)?;
        if node.shown {
            if let Some(s) = self.section(id) {
                if let Some(index) = s.splitters.iter().position(|sp| sp.bounds.contains(x, y)) {
                    return Some(HitTarget::Splitter { section: id, index });
                }
            }
            for item in self.visible_contents(id) {
                if let Some(hit) = self.object_at(item, x, y, false) {
                    return Some(hit);
                }
            }
        }
        (force && node.is_at(x, y)).then_some(HitTarget::Node(id))
    }

    /// With `force`, a point outside every child still gets an edge answer
    /// for the section itself, or `Export` when well outside it
    pub(crate) fn dock_info_at_section(
        &self,
        id: NodeId,
        x: i32,
        y: i32,
        size: DragSize,
        is_control: bool,
        force: bool,
    ) -> Option<DockInfo> {
        if let Some(info) = self.item_dock_info_at(id, x, y, size, is_control) {
            return Some(info);
        }
        let node = self.get(id)?;
        if !node.shown {
            return None;
        }
        if let Some(s) = self.section(id) {
            if s.splitters.iter().any(|sp| sp.bounds.contains(x, y)) {
                return Some(DockInfo::of_kind(DockKind::Splitter));
            }
        }
        for item in self.visible_contents(id) {
            if let Some(info) = self.dock_info_at(item, x, y, size, is_control) {
                return Some(info);
            }
        }
        if !force {
            return None;
        }

        let b = node.bounds;
        let left = b.x - x;
        let right = x - b.right() + 1;
        let top = b.y - y;
        let bottom = y - b.bottom() + 1;
        if left.max(right).max(top).max(bottom) > EXPORT_MARGIN {
            return Some(DockInfo::of_kind(DockKind::Export));
        }
        Some(edge_dock_info(
            b,
            [left.abs(), right.abs(), top.abs(), bottom.abs()],
            size,
            None,
        ))
    }
}
