//! Placeholder panel for prototyping
//!
//! A flat colored panel that paints its title and current size. The demo
//! window fills its layout with these.

use crate::dock::Surface;
use crate::geometry::{Rect, Size};
use crate::panel::Panel;
use crate::theme::Color;

/// Placeholder panel state
#[derive(Debug, Clone)]
pub struct PlaceholderPanel {
    pub title: String,
    pub color: Color,
    min: Size,
    bounds: Rect,
    visible: bool,
}

impl PlaceholderPanel {
    pub fn new(title: impl Into<String>, color: Color) -> Self {
        Self {
            title: title.into(),
            color,
            min: Size::new(80, 60),
            bounds: Rect::ZERO,
            visible: true,
        }
    }

    pub fn with_min_size(mut self, min: Size) -> Self {
        self.min = min;
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Black or white, whichever reads better on the panel color
    fn text_color(&self) -> Color {
        let c = self.color;
        let luma = 299 * c.r as u32 + 587 * c.g as u32 + 114 * c.b as u32;
        if luma > 128_000 {
            Color::rgb(0, 0, 0)
        } else {
            Color::rgb(0xFF, 0xFF, 0xFF)
        }
    }
}

impl Panel for PlaceholderPanel {
    fn min_size(&self) -> Size {
        self.min
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn paint(&self, surface: &mut dyn Surface, bounds: Rect) {
        surface.fill_rect(bounds, self.color);
        let ink = self.text_color();
        surface.draw_text(bounds.x + 8, bounds.y + 8, &self.title, ink);
        let size = format!("{} x {}", bounds.width, bounds.height);
        surface.draw_text(bounds.x + 8, bounds.y + 26, &size, ink);
    }
}
