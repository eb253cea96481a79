//! Splitter bars between the children of a section
//!
//! Splitters are rebuilt on every layout pass; only `last_bounds` survives,
//! carried over by index. Clicking the handle at the start of a bar snaps it
//! flush against a neighbor or back to a remembered/centered position.
//! Dragging the bar body moves it freely within its two neighbors.

use crate::geometry::Rect;
use crate::input::CursorKind;

use super::constants::SPLITTER_HANDLE_LENGTH;

/// Orientation of the bar itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterStyle {
    /// A horizontal bar between two rows; moves up and down
    Horizontal,
    /// A vertical bar between two columns; moves left and right
    Vertical,
}

/// Position of a splitter relative to the two items it separates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterState {
    VLeft,
    VMiddle,
    VRight,
    HTop,
    HMiddle,
    HBottom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockSplitter {
    pub(crate) bounds: Rect,
    /// Separates visible children `index` and `index + 1`
    pub(crate) index: usize,
    pub(crate) style: SplitterStyle,
    /// Position before the last snap or drag
    pub(crate) last_bounds: Option<Rect>,
    /// Handle area; clicks here toggle instead of dragging
    pub(crate) hot_spot: Rect,
}

impl DockSplitter {
    pub fn new(index: usize, style: SplitterStyle, bounds: Rect) -> Self {
        Self {
            bounds,
            index,
            style,
            last_bounds: None,
            hot_spot: Self::hot_spot_for(style, bounds),
        }
    }

    fn hot_spot_for(style: SplitterStyle, b: Rect) -> Rect {
        match style {
            SplitterStyle::Horizontal => {
                Rect::new(b.x, b.y, SPLITTER_HANDLE_LENGTH.min(b.width), b.height)
            }
            SplitterStyle::Vertical => {
                Rect::new(b.x, b.y, b.width, SPLITTER_HANDLE_LENGTH.min(b.height))
            }
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn style(&self) -> SplitterStyle {
        self.style
    }

    pub fn last_bounds(&self) -> Option<Rect> {
        self.last_bounds
    }

    pub fn hot_spot(&self) -> Rect {
        self.hot_spot
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.hot_spot = Self::hot_spot_for(self.style, bounds);
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.style == SplitterStyle::Horizontal
    }

    /// Where the bar sits between `first` and `second`
    pub fn state(&self, first: Rect, second: Rect) -> SplitterState {
        let b = self.bounds;
        if self.is_horizontal() {
            if b.y == first.y {
                SplitterState::HTop
            } else if b.bottom() == second.bottom() {
                SplitterState::HBottom
            } else {
                SplitterState::HMiddle
            }
        } else if b.x == first.x {
            SplitterState::VLeft
        } else if b.right() == second.right() {
            SplitterState::VRight
        } else {
            SplitterState::VMiddle
        }
    }

    pub fn cursor_at(&self, x: i32, y: i32) -> CursorKind {
        if self.hot_spot.contains(x, y) {
            CursorKind::Arrow
        } else if self.is_horizontal() {
            CursorKind::ResizeNS
        } else {
            CursorKind::ResizeWE
        }
    }

    /// New bounds after a click at `click` on the handle.
    ///
    /// From the middle the bar snaps flush against the neighbor on the
    /// clicked half of the handle, remembering where it was. Otherwise it
    /// returns to the remembered position, or to the center when that is
    /// unusable.
    pub(crate) fn toggled(&mut self, first: Rect, second: Rect, click: (i32, i32)) -> Rect {
        let b = self.bounds;
        let hot = self.hot_spot;
        let (mut x, mut y) = (b.x, b.y);
        if let Some(last) = self.last_bounds {
            if self.is_horizontal() {
                y = last.y;
            } else {
                x = last.x;
            }
        }

        match self.state(first, second) {
            SplitterState::HMiddle => {
                self.last_bounds = Some(b);
                y = if click.0 < hot.x + hot.width / 2 {
                    first.y
                } else {
                    second.bottom() - b.height
                };
            }
            SplitterState::VMiddle => {
                self.last_bounds = Some(b);
                x = if click.1 < hot.y + hot.height / 2 {
                    second.right() - b.width
                } else {
                    first.x
                };
            }
            _ if self.is_horizontal() => {
                if y == b.y || y < first.y || y + b.height > second.bottom() {
                    y = (first.y + second.bottom() - b.height).div_euclid(2);
                }
            }
            _ => {
                if x == b.x || x < first.x || x + b.width > second.right() {
                    x = (first.x + second.right() - b.width).div_euclid(2);
                }
            }
        }
        Rect::new(x, y, b.width, b.height)
    }

    /// Bounds for a free drag moved by `(dx, dy)` since the press, kept
    /// inside `limits`
    pub(crate) fn dragged(&self, dx: i32, dy: i32, limits: Rect) -> Rect {
        let b = self.bounds;
        if self.is_horizontal() {
            let y = (b.y + dy).max(limits.y).min(limits.bottom() - b.height);
            Rect::new(b.x, y, b.width, b.height)
        } else {
            let x = (b.x + dx).max(limits.x).min(limits.right() - b.width);
            Rect::new(x, b.y, b.width, b.height)
        }
    }

    /// Rectangle drawn inverted while the bar is dragged
    pub fn tracking_rect(style: SplitterStyle, bounds: Rect) -> Rect {
        match style {
            SplitterStyle::Horizontal => {
                Rect::new(bounds.x, bounds.y + 3, bounds.width, bounds.height - 3)
            }
            SplitterStyle::Vertical => {
                Rect::new(bounds.x + 3, bounds.y, bounds.width - 6, bounds.height)
            }
        }
    }
}
