//! Painting the dock layout
//!
//! Everything is drawn through the `Surface` trait so the layout stays
//! independent of the pixel backend. Panels paint their own content through
//! `Panel::paint`; this module draws the chrome around them: drag bars,
//! notebook bodies and tabs, tab scrollers, splitters, and the inverted
//! drag previews.

use crate::geometry::Rect;
use crate::panel::Icon;
use crate::theme::{Color, DockPalette};

use super::constants::{TAB_FEATURE_WIDTH, TAB_HEIGHT};
use super::control::DockStyle;
use super::dock_info::DockInfo;
use super::feature::FeatureMode;
use super::interaction::DragOverlay;
use super::region::{TabScroll, TabState};
use super::splitter::{DockSplitter, SplitterState, SplitterStyle};
use super::tree::{DockTree, NodeId, NodeKind};

/// A 2D drawing target
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// One pixel wide line, both endpoints included
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color);

    /// Text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color);

    fn draw_icon(&mut self, x: i32, y: i32, icon: &Icon);

    /// Invert the union of `rects` with `color`; each pixel is inverted once
    /// even where rectangles overlap
    fn xor_rects(&mut self, rects: &[Rect], color: Color);

    /// Current clip rectangle, `None` when unclipped
    fn clip(&self) -> Option<Rect>;

    fn set_clip(&mut self, clip: Option<Rect>);
}

/// Narrow the clip to `rect` and return the previous clip
fn push_clip(surface: &mut dyn Surface, rect: Rect) -> Option<Rect> {
    let saved = surface.clip();
    let clip = match saved {
        Some(outer) => outer
            .intersection(&rect)
            .unwrap_or(Rect::new(rect.x, rect.y, 0, 0)),
        None => rect,
    };
    surface.set_clip(Some(clip));
    saved
}

#[derive(Debug, Clone, Copy)]
enum Arrow {
    Left,
    Right,
    Up,
    Down,
}

/// Solid triangle centered in `area`, pointing `arrow`
fn draw_arrow(surface: &mut dyn Surface, area: Rect, arrow: Arrow, color: Color) {
    let n = (area.width.min(area.height) / 2).max(1);
    let (cx, cy) = (area.x + area.width / 2, area.y + area.height / 2);
    for i in 0..n {
        let half = n - 1 - i;
        let row = match arrow {
            Arrow::Right => Rect::new(cx - n / 2 + i, cy - half, 1, 2 * half + 1),
            Arrow::Left => Rect::new(cx + n / 2 - i, cy - half, 1, 2 * half + 1),
            Arrow::Down => Rect::new(cx - half, cy - n / 2 + i, 2 * half + 1, 1),
            Arrow::Up => Rect::new(cx - half, cy + n / 2 - i, 2 * half + 1, 1),
        };
        surface.fill_rect(row, color);
    }
}

fn draw_cross(surface: &mut dyn Surface, r: Rect, color: Color) {
    let n = r.width.min(r.height);
    if n <= 0 {
        return;
    }
    surface.draw_line(r.x, r.y, r.x + n - 1, r.y + n - 1, color);
    surface.draw_line(r.x + n - 1, r.y, r.x, r.y + n - 1, color);
}

/// Segments of a 3px pen following `points`, as rectangles
fn pen_path(points: &[(i32, i32)]) -> Vec<Rect> {
    points
        .windows(2)
        .map(|w| {
            let ((x0, y0), (x1, y1)) = (w[0], w[1]);
            let (left, top) = (x0.min(x1), y0.min(y1));
            Rect::new(left - 1, top - 1, (x1 - x0).abs() + 3, (y1 - y0).abs() + 3)
        })
        .collect()
}

/// Inverted preview of a drop target
pub fn draw_dock_info(surface: &mut dyn Surface, info: &DockInfo, palette: &DockPalette) {
    if !info.has_preview() {
        return;
    }
    let b = info.bounds;
    let (x, y, xr, yb) = (b.x, b.y, b.right() - 1, b.bottom() - 1);
    let points = if info.kind.is_tab_like() {
        let t = info.tab_bounds;
        let txr = t.right() - 1;
        vec![
            (x, y),
            (t.x, y),
            (t.x, t.y),
            (txr, t.y),
            (txr, y),
            (xr, y),
            (xr, yb),
            (x, yb),
            (x, y),
        ]
    } else {
        vec![(x, y), (xr, y), (xr, yb), (x, yb), (x, y)]
    };
    surface.xor_rects(&pen_path(&points), palette.dock_preview);
}

/// Inverted frame marking the dock area while a control is dragged
pub fn draw_mark(surface: &mut dyn Surface, area: Rect, palette: &DockPalette) {
    let (x, y, w, h) = (area.x, area.y, area.width, area.height);
    let rects = [
        Rect::new(x, y, w, 3),
        Rect::new(x, y + h - 3, w, 3),
        Rect::new(x, y, 3, h),
        Rect::new(x + w - 3, y, 3, h),
    ];
    surface.xor_rects(&rects, palette.mark);
}

/// Everything drawn on top of the layout during a drag
pub fn draw_overlay(
    surface: &mut dyn Surface,
    overlay: &DragOverlay,
    area: Rect,
    palette: &DockPalette,
) {
    match overlay {
        DragOverlay::Dock(info) => {
            draw_mark(surface, area, palette);
            draw_dock_info(surface, info, palette);
        }
        DragOverlay::Splitter(tracked) => {
            surface.xor_rects(&[*tracked], palette.splitter_drag);
        }
    }
}

impl DockTree {
    /// Paint the whole layout
    pub fn draw(&mut self, surface: &mut dyn Surface, palette: &DockPalette) {
        let root = self.root();
        self.draw_node(root, surface, palette);
    }

    /// Paint one node and its children, clipped to its bounds
    pub fn draw_node(&mut self, id: NodeId, surface: &mut dyn Surface, palette: &DockPalette) {
        let Some(node) = self.get(id) else {
            return;
        };
        match node.kind {
            NodeKind::Section(_) => self.draw_section(id, surface, palette),
            NodeKind::Region(_) => self.draw_region(id, surface, palette),
            NodeKind::Control(_) => {
                if self.is_visible(id) {
                    self.draw_bar(id, surface, palette);
                    self.paint_panel(id, surface);
                }
            }
        }
    }

    fn draw_section(&mut self, id: NodeId, surface: &mut dyn Surface, palette: &DockPalette) {
        if !self.is_visible(id) && id != self.root() {
            return;
        }
        let bounds = self.bounds(id);
        let contents = self.visible_contents(id);
        if contents.is_empty() || !self.is_resizable(id) {
            surface.fill_rect(bounds, palette.background);
        }
        for child in contents {
            self.draw_node(child, surface, palette);
        }

        let saved = push_clip(surface, bounds);
        let splitters = self
            .section(id)
            .map(|s| s.splitters.clone())
            .unwrap_or_default();
        for splitter in &splitters {
            let state = self
                .splitter_neighbor_bounds(id, splitter.index)
                .map(|(first, second)| splitter.state(first, second));
            draw_splitter(surface, splitter, state, palette);
        }
        surface.set_clip(saved);
    }

    fn draw_region(&mut self, id: NodeId, surface: &mut dyn Surface, palette: &DockPalette) {
        if !self.is_visible(id) {
            return;
        }
        let bounds = self.bounds(id);
        let saved = push_clip(surface, bounds);

        if self.is_notebook(id) {
            let Some((clip, active, scroll)) = self
                .region(id)
                .and_then(|r| Some((r.tab_clip?, r.active, r.scroll)))
            else {
                // Not laid out yet
                surface.set_clip(saved);
                return;
            };
            self.draw_notebook(id, surface, palette);
            if let (Some(scroll), Some(scroller)) = (scroll, self.scroller_bounds(id)) {
                draw_tab_scroller(surface, scroller, scroll, palette);
            }

            let contents = self.contents(id);
            let tab_saved = push_clip(surface, clip);
            for (i, child) in contents.iter().enumerate() {
                if Some(i) != active && self.is_visible(*child) {
                    let state = if self.tab_state(*child) == TabState::Hover {
                        TabState::Hover
                    } else {
                        TabState::Inactive
                    };
                    self.draw_tab(*child, state, surface, palette);
                }
            }
            if let Some(current) = active.and_then(|a| contents.get(a).copied()) {
                self.draw_tab(current, TabState::Active, surface, palette);
            }
            surface.set_clip(tab_saved);

            if let Some(current) = active.and_then(|a| contents.get(a).copied()) {
                self.paint_child(current, surface, palette);
            }
        } else {
            for child in self.visible_contents(id) {
                if self.control(child).is_some() {
                    self.draw_bar(child, surface, palette);
                }
                self.paint_child(child, surface, palette);
            }
        }
        surface.set_clip(saved);
    }

    /// Content below a region's bar or tab: a panel, or a nested section
    fn paint_child(&mut self, id: NodeId, surface: &mut dyn Surface, palette: &DockPalette) {
        if self.control(id).is_some() {
            self.paint_panel(id, surface);
        } else {
            self.draw_node(id, surface, palette);
        }
    }

    fn paint_panel(&self, id: NodeId, surface: &mut dyn Surface) {
        let bounds = self.bounds(id);
        if bounds.is_empty() {
            return;
        }
        if let Some(panel) = self.control(id).and_then(|c| c.panel()) {
            let saved = push_clip(surface, bounds);
            panel.paint(surface, bounds);
            surface.set_clip(saved);
        }
    }

    /// Feature mode to draw with, resolving a deferred first-draw state
    fn draw_feature_mode(&mut self, id: NodeId) -> FeatureMode {
        self.control_mut(id)
            .map(|c| c.features.draw_mode())
            .unwrap_or_default()
    }

    fn draw_feature_icon(
        &self,
        id: NodeId,
        mode: FeatureMode,
        surface: &mut dyn Surface,
        palette: &DockPalette,
    ) {
        if mode.hides_icon() {
            return;
        }
        let r = self.feature_trigger_bounds(id);
        surface.fill_rect(r, palette.feature_brush);
        let inner = match mode {
            FeatureMode::Changed => palette.tab_highlight,
            FeatureMode::Drop => palette.dock_preview,
            _ => palette.feature_pen,
        };
        surface.fill_rect(r.inflate(-2, -2), inner);
        let (xr, yb) = (r.right() - 1, r.bottom() - 1);
        surface.draw_line(r.x, r.y, xr, r.y, palette.feature_pen);
        surface.draw_line(r.x, yb, xr, yb, palette.feature_pen);
        surface.draw_line(r.x, r.y, r.x, yb, palette.feature_pen);
        surface.draw_line(xr, r.y, xr, yb, palette.feature_pen);
    }

    /// Paint a control's notebook tab
    pub fn draw_tab(
        &mut self,
        id: NodeId,
        state: TabState,
        surface: &mut dyn Surface,
        palette: &DockPalette,
    ) {
        let mode = self.draw_feature_mode(id);
        let db = self.drag_bounds(id);
        let (mut x, mut y) = (db.x, db.y);
        let yb = y + TAB_HEIGHT;
        let mut yb1 = yb;
        y += 3;
        let mut tx = 8;
        let mut tw = self.tab_width(id);
        let mut fill = palette.tab_active;
        let mut edge = palette.tab_active_edge;
        let mut top_fill = palette.tab_highlight;
        let mut top_edge = palette.tab_highlight_edge;

        if state != TabState::Active {
            tx = 6;
            x += 2;
            y += 2;
            yb1 -= 1;
            tw -= 4;
            fill = palette.tab_inactive;
            edge = palette.tab_inactive_edge;
            if state == TabState::Inactive {
                top_fill = fill;
                top_edge = edge;
            }
        }
        let xr = x + tw + 1;

        surface.fill_rect(Rect::new(x + 1, y + 3, xr - x - 1, yb1 - y - 3), fill);
        surface.fill_rect(Rect::new(x + 1, y + 1, xr - x - 1, 2), top_fill);
        surface.draw_line(x, y + 3, x, yb, edge);
        surface.draw_line(xr, y + 3, xr, yb, edge);
        surface.draw_line(x, y + 2, x + 2, y, top_edge);
        surface.draw_line(xr, y + 2, xr - 2, y, top_edge);
        surface.draw_line(x + 2, y, xr - 1, y, top_edge);

        let mut ix = x + tx + 1;
        if mode != FeatureMode::None {
            self.draw_feature_icon(id, mode, surface, palette);
            ix += TAB_FEATURE_WIDTH + 3;
        }
        if let Some(image) = self.image(id) {
            surface.draw_icon(ix, y + 3, image);
            ix += image.width as i32 + 3;
        }
        surface.draw_text(ix, y + 4, &self.tab_name(id), palette.text);

        if self.is_closeable(id) {
            draw_cross(surface, self.close_bounds(id), edge);
        }
    }

    /// Paint a control's drag bar according to its style
    pub fn draw_bar(&mut self, id: NodeId, surface: &mut dyn Surface, palette: &DockPalette) {
        let db = self.drag_bounds(id);
        if db.is_empty() {
            return;
        }
        match self.style(id) {
            DockStyle::Fixed | DockStyle::Tab => return,
            DockStyle::Horizontal => {
                draw_grip(surface, db, db.x + 4, db.y + 4, db.width - 8, 3, 0, 4, palette)
            }
            DockStyle::Vertical => {
                draw_grip(surface, db, db.x + 4, db.y + 4, 3, db.height - 8, 4, 0, palette)
            }
        }
        let mode = self.draw_feature_mode(id);
        self.draw_feature_icon(id, mode, surface, palette);
        if self.is_closeable(id) {
            let close = self.close_bounds(id);
            surface.fill_rect(close, palette.background);
            draw_cross(surface, close, palette.drag_dark);
        }
    }

    /// Paint a notebook's frame below the tab strip
    fn draw_notebook(&self, id: NodeId, surface: &mut dyn Surface, palette: &DockPalette) {
        let Rect {
            x,
            y,
            width: dx,
            height: dy,
        } = self.bounds(id);
        let yth = y + TAB_HEIGHT;
        let xdx = (x + 16).max(x + dx);
        let ydy = (yth + 12).max(y + dy);
        let dx8 = (dx - 8).max(0);
        let dyth4 = (ydy - yth - 4).max(0);
        let dyth12 = (ydy - yth - 12).max(0);

        surface.fill_rect(Rect::new(x, y, dx, TAB_HEIGHT - 1), palette.background);
        surface.fill_rect(Rect::new(x, ydy - 5, dx, 5), palette.background);
        surface.fill_rect(Rect::new(x, yth - 1, 3, dyth4), palette.background);
        surface.fill_rect(Rect::new(xdx - 5, yth - 1, 5, dyth4), palette.background);

        surface.fill_rect(Rect::new(x + 4, yth + 3, 3, dyth12), palette.notebook);
        surface.fill_rect(Rect::new(xdx - 9, yth + 3, 3, dyth12), palette.notebook);
        surface.fill_rect(Rect::new(x + 4, yth, dx8, 3), palette.notebook);
        surface.fill_rect(Rect::new(x + 4, ydy - 9, dx8, 3), palette.notebook);

        surface.draw_line(x + 4, ydy - 5, xdx - 4, ydy - 5, palette.notebook_shadow1);
        surface.draw_line(xdx - 5, yth, xdx - 5, ydy - 5, palette.notebook_shadow1);
        surface.draw_line(x + 5, ydy - 4, xdx - 3, ydy - 4, palette.notebook_shadow2);
        surface.draw_line(xdx - 4, yth + 1, xdx - 4, ydy - 4, palette.notebook_shadow2);

        surface.draw_line(x + 3, yth - 1, xdx - 5, yth - 1, palette.notebook_edge);
        surface.draw_line(x + 3, ydy - 6, xdx - 5, ydy - 6, palette.notebook_edge);
        surface.draw_line(x + 3, yth, x + 3, ydy - 6, palette.notebook_edge);
        surface.draw_line(xdx - 6, yth, xdx - 6, ydy - 6, palette.notebook_edge);
    }
}

/// Two beveled grip lines offset by `(ndx, ndy)` on a cleared bar
#[allow(clippy::too_many_arguments)]
fn draw_grip(
    surface: &mut dyn Surface,
    bar: Rect,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    ndx: i32,
    ndy: i32,
    palette: &DockPalette,
) {
    surface.fill_rect(bar, palette.background);
    for (gx, gy) in [(x, y), (x + ndx, y + ndy)] {
        surface.draw_line(gx, gy, gx + dx - 1, gy, palette.drag_light);
        surface.draw_line(gx, gy + 1, gx, gy + dy - 1, palette.drag_light);
        surface.draw_line(gx, gy + dy - 1, gx + dx, gy + dy - 1, palette.drag_dark);
        surface.draw_line(gx + dx - 1, gy, gx + dx - 1, gy + dy - 1, palette.drag_dark);
    }
}

/// Scroll arrows to the right of a tab strip; disabled arrows are dimmed
fn draw_tab_scroller(surface: &mut dyn Surface, area: Rect, scroll: TabScroll, palette: &DockPalette) {
    let half = area.width / 2;
    let height = area.height;
    surface.fill_rect(area, palette.background);
    let left_on = matches!(scroll, TabScroll::Left | TabScroll::Both);
    let right_on = matches!(scroll, TabScroll::Right | TabScroll::Both);
    for (offset, arrow, on) in [(0, Arrow::Left, left_on), (half, Arrow::Right, right_on)] {
        let color = if on {
            palette.text
        } else {
            palette.drag_dark
        };
        let button = Rect::new(area.x + offset, area.y, half, height).inflate(-4, -4);
        draw_arrow(surface, button, arrow, color);
    }
}

/// Beveled splitter bar with a handle showing where a click will move it
fn draw_splitter(
    surface: &mut dyn Surface,
    splitter: &DockSplitter,
    state: Option<SplitterState>,
    palette: &DockPalette,
) {
    let b = splitter.bounds();
    if b.is_empty() {
        return;
    }
    let (x, y, dx, dy) = (b.x, b.y, b.width, b.height);
    let hot = splitter.hot_spot();
    surface.fill_rect(b, palette.background);
    match splitter.style() {
        SplitterStyle::Horizontal => {
            let idx = hot.width;
            surface.fill_rect(Rect::new(x + idx, y + 3, dx - idx - 1, 1), palette.drag_light);
            surface.fill_rect(Rect::new(x + idx, y + 4, 1, 4), palette.drag_light);
            surface.fill_rect(Rect::new(x + idx, y + 8, dx - idx, 1), palette.drag_dark);
            surface.fill_rect(Rect::new(x + dx - 1, y + 3, 1, 5), palette.drag_dark);
        }
        SplitterStyle::Vertical => {
            let idy = hot.height;
            surface.fill_rect(Rect::new(x + 3, y + idy, 1, dy - idy - 1), palette.drag_light);
            surface.fill_rect(Rect::new(x + 4, y + idy, dx - 8, 1), palette.drag_light);
            surface.fill_rect(Rect::new(x + dx - 4, y + idy, 1, dy - idy), palette.drag_dark);
            surface.fill_rect(Rect::new(x + 3, y + dy - 1, dx - 7, 1), palette.drag_dark);
        }
    }

    let Some(state) = state else {
        return;
    };
    let color = palette.drag_dark;
    let (first_half, second_half) = match splitter.style() {
        SplitterStyle::Horizontal => (
            Rect::new(hot.x, hot.y, hot.width / 2, hot.height),
            Rect::new(hot.x + hot.width / 2, hot.y, hot.width - hot.width / 2, hot.height),
        ),
        SplitterStyle::Vertical => (
            Rect::new(hot.x, hot.y, hot.width, hot.height / 2),
            Rect::new(hot.x, hot.y + hot.height / 2, hot.width, hot.height - hot.height / 2),
        ),
    };
    match state {
        SplitterState::HTop => draw_arrow(surface, hot, Arrow::Down, color),
        SplitterState::HBottom => draw_arrow(surface, hot, Arrow::Up, color),
        SplitterState::VLeft => draw_arrow(surface, hot, Arrow::Right, color),
        SplitterState::VRight => draw_arrow(surface, hot, Arrow::Left, color),
        SplitterState::HMiddle => {
            draw_arrow(surface, first_half, Arrow::Up, color);
            draw_arrow(surface, second_half, Arrow::Down, color);
        }
        SplitterState::VMiddle => {
            draw_arrow(surface, first_half, Arrow::Right, color);
            draw_arrow(surface, second_half, Arrow::Left, color);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dock::control::DockControl;
    use crate::dock::dock_info::DockKind;
    use crate::dock::region::Placement;
    use crate::geometry::Size;
    use crate::panel::{FixedAdvance, Panel};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        Fill(Rect, Color),
        Line(i32, i32, i32, i32, Color),
        Text(i32, i32, String),
        Icon(i32, i32),
        Xor(Vec<Rect>, Color),
    }

    /// Records drawing calls instead of rasterizing them
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub ops: Vec<Op>,
        clip: Option<Rect>,
    }

    impl Recorder {
        pub fn texts(&self) -> Vec<String> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(_, _, t) => Some(t.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(Op::Fill(rect, color));
        }
        fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
            self.ops.push(Op::Line(x0, y0, x1, y1, color));
        }
        fn draw_text(&mut self, x: i32, y: i32, text: &str, _color: Color) {
            self.ops.push(Op::Text(x, y, text.to_string()));
        }
        fn draw_icon(&mut self, x: i32, y: i32, _icon: &Icon) {
            self.ops.push(Op::Icon(x, y));
        }
        fn xor_rects(&mut self, rects: &[Rect], color: Color) {
            self.ops.push(Op::Xor(rects.to_vec(), color));
        }
        fn clip(&self) -> Option<Rect> {
            self.clip
        }
        fn set_clip(&mut self, clip: Option<Rect>) {
            self.clip = clip;
        }
    }

    struct Painted(Rc<Cell<usize>>);

    impl Panel for Painted {
        fn min_size(&self) -> Size {
            Size::new(80, 60)
        }
        fn set_bounds(&mut self, _bounds: Rect) {}
        fn set_visible(&mut self, _visible: bool) {}
        fn paint(&self, _surface: &mut dyn Surface, _bounds: Rect) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn notebook(names: &[&str], painted: &Rc<Cell<usize>>) -> (DockTree, NodeId, Vec<NodeId>) {
        let mut tree = DockTree::with_text_measure(Rc::new(FixedAdvance(6)));
        let controls: Vec<NodeId> = names
            .iter()
            .map(|n| {
                tree.insert_control(
                    DockControl::new(*n, *n).with_panel(Painted(Rc::clone(painted))),
                )
            })
            .collect();
        let region = tree.new_region(vec![controls[0]]);
        for c in &controls[1..] {
            tree.add_to_region(region, *c, Placement::Append, false);
        }
        tree.set_active(region, Some(0));
        let root = tree.root();
        tree.set_group_contents(root, vec![region]);
        tree.recalc_sizes(root, Rect::new(0, 0, 400, 300));
        (tree, region, controls)
    }

    #[test]
    fn test_active_tab_is_drawn_last() {
        let painted = Rc::new(Cell::new(0));
        let (mut tree, _, _) = notebook(&["One", "Two", "Three"], &painted);
        let mut surface = Recorder::default();
        tree.draw(&mut surface, &DockPalette::classic());
        assert_eq!(surface.texts(), vec!["Two", "Three", "One"]);
        // Only the active page paints its panel
        assert_eq!(painted.get(), 1);
        assert_eq!(surface.clip(), None);
    }

    #[test]
    fn test_hidden_control_is_not_painted() {
        let painted = Rc::new(Cell::new(0));
        let (mut tree, _, controls) = notebook(&["One", "Two"], &painted);
        tree.show(controls[1], false, false);
        let root = tree.root();
        tree.recalc_sizes(root, Rect::new(0, 0, 400, 300));
        let mut surface = Recorder::default();
        tree.draw(&mut surface, &DockPalette::classic());
        assert!(surface.texts().is_empty());
        assert_eq!(painted.get(), 1);
    }

    #[test]
    fn test_draw_before_layout_is_harmless() {
        let painted = Rc::new(Cell::new(0));
        let mut tree = DockTree::with_text_measure(Rc::new(FixedAdvance(6)));
        let a = tree.insert_control(DockControl::new("a", "A").with_panel(Painted(Rc::clone(&painted))));
        let b = tree.insert_control(DockControl::new("b", "B").with_panel(Painted(Rc::clone(&painted))));
        let region = tree.new_region(vec![a, b]);
        let root = tree.root();
        tree.set_group_contents(root, vec![region]);
        let mut surface = Recorder::default();
        tree.draw(&mut surface, &DockPalette::classic());
        assert!(surface.texts().is_empty());
    }

    #[test]
    fn test_tab_preview_follows_tab_outline() {
        let palette = DockPalette::classic();
        let info = DockInfo {
            kind: DockKind::Tab,
            bounds: Rect::new(10, 40, 100, 60),
            tab_bounds: Rect::new(20, 20, 30, 20),
            region: None,
            control: None,
        };
        let mut surface = Recorder::default();
        draw_dock_info(&mut surface, &info, &palette);
        let [Op::Xor(rects, color)] = surface.ops.as_slice() else {
            panic!("expected one xor call, got {:?}", surface.ops);
        };
        assert_eq!(*color, palette.dock_preview);
        assert_eq!(rects.len(), 8);
        // The tab's left edge rises from the body to the tab top
        assert_eq!(rects[1], Rect::new(19, 19, 3, 23));
    }

    #[test]
    fn test_no_preview_for_splitter_answers() {
        let mut surface = Recorder::default();
        draw_dock_info(&mut surface, &DockInfo::of_kind(DockKind::Splitter), &DockPalette::classic());
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_splitter_overlay_is_inverted() {
        let palette = DockPalette::classic();
        let mut surface = Recorder::default();
        let tracked = Rect::new(103, 0, 3, 50);
        draw_overlay(&mut surface, &DragOverlay::Splitter(tracked), Rect::new(0, 0, 200, 50), &palette);
        assert_eq!(surface.ops, vec![Op::Xor(vec![tracked], palette.splitter_drag)]);
    }
}
