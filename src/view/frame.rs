//! Frame abstraction for drawing primitives
//!
//! Wraps the softbuffer pixel slice and implements the dock `Surface` on top
//! of it. All coordinates are window pixels; out-of-bounds drawing is clipped.

use crate::dock::Surface;
use crate::geometry::Rect;
use crate::panel::Icon;
use crate::theme::Color;

use super::text::GlyphText;

/// Mix `fg` over `bg` by `alpha` (0.0 to 1.0). Colors are `0xAARRGGBB`;
/// the result is opaque.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let mix = |shift: u32| {
        let b = ((bg >> shift) & 0xFF) as f32;
        let f = ((fg >> shift) & 0xFF) as f32;
        ((b + (f - b) * alpha) as u32 & 0xFF) << shift
    };
    0xFF00_0000 | mix(16) | mix(8) | mix(0)
}

/// Borrowed softbuffer pixels plus the clip and font used while painting
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<Rect>,
    text: Option<&'a GlyphText>,
}

impl<'a> Frame<'a> {
    /// A buffer shorter than `width * height` (mid-resize) shrinks the height
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = match buffer.len().checked_div(width) {
            Some(rows) => rows.min(height),
            None => height,
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
            text: None,
        }
    }

    /// Attach a font; without one `draw_text` draws nothing
    pub fn with_text(mut self, text: &'a GlyphText) -> Self {
        self.text = Some(text);
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn clear(&mut self, color: Color) {
        self.buffer.fill(color.to_argb_u32() | 0xFF000000);
    }

    /// Pixel at `(x, y)`, or 0 outside the frame
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.buffer[y * self.width + x]
    }

    /// Visible part of `rect` as `(x0, y0, x1, y1)`, exclusive end
    fn visible(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        let mut bounds = Rect::new(0, 0, self.width as i32, self.height as i32);
        if let Some(clip) = self.clip {
            bounds = bounds.intersection(&clip)?;
        }
        let r = bounds.intersection(&rect)?;
        Some((
            r.x as usize,
            r.y as usize,
            r.right() as usize,
            r.bottom() as usize,
        ))
    }

    /// Paint one pixel, honoring the clip and the color's alpha byte
    #[inline]
    fn blend_pixel(&mut self, x: i32, y: i32, color: u32) {
        if self.visible(Rect::new(x, y, 1, 1)).is_none() {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            self.buffer[idx] = color | 0xFF000000;
            return;
        }
        self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
    }

    /// Horizontal spans covered by `rects` on row `y`, merged and sorted
    fn row_spans(rects: &[Rect], y: i32) -> Vec<(i32, i32)> {
        let mut spans: Vec<(i32, i32)> = rects
            .iter()
            .filter(|r| !r.is_empty() && y >= r.y && y < r.bottom())
            .map(|r| (r.x, r.right()))
            .collect();
        spans.sort_unstable();

        let mut merged: Vec<(i32, i32)> = Vec::with_capacity(spans.len());
        for (x0, x1) in spans {
            match merged.last_mut() {
                Some(last) if x0 <= last.1 => last.1 = last.1.max(x1),
                _ => merged.push((x0, x1)),
            }
        }
        merged
    }
}

impl Surface for Frame<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.visible(rect) else {
            return;
        };
        let argb = color.to_argb_u32();
        if argb >> 24 == 0xFF {
            for y in y0..y1 {
                let row = y * self.width;
                self.buffer[row + x0..row + x1].fill(argb);
            }
        } else {
            let alpha = (argb >> 24) as f32 / 255.0;
            for y in y0..y1 {
                let row = y * self.width;
                for px in &mut self.buffer[row + x0..row + x1] {
                    *px = blend_colors(*px, argb, alpha);
                }
            }
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let argb = color.to_argb_u32();
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x, y, argb);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        let Some(glyphs) = self.text else {
            return;
        };
        let argb = color.to_argb_u32() | 0xFF000000;
        let mut pen = x as f32;
        let baseline = y as f32 + glyphs.ascent();

        for ch in text.chars() {
            let (metrics, coverage) = glyphs.rasterize(ch);
            let top = (baseline - (metrics.height as i32 + metrics.ymin) as f32) as i32;
            let left = pen as i32 + metrics.xmin;
            if metrics.width > 0 {
                for (i, alpha) in coverage.iter().enumerate() {
                    if *alpha == 0 {
                        continue;
                    }
                    let (gx, gy) = (i % metrics.width, i / metrics.width);
                    let src = (argb & 0x00FF_FFFF) | ((*alpha as u32) << 24);
                    self.blend_pixel(left + gx as i32, top + gy as i32, src);
                }
            }
            pen += metrics.advance_width;
        }
    }

    fn draw_icon(&mut self, x: i32, y: i32, icon: &Icon) {
        let width = icon.width as i32;
        for (i, argb) in icon.pixels.iter().enumerate() {
            let i = i as i32;
            self.blend_pixel(x + i % width, y + i / width, *argb);
        }
    }

    fn xor_rects(&mut self, rects: &[Rect], color: Color) {
        let Some(extent) = rects.iter().copied().reduce(|a, b| a.union(&b)) else {
            return;
        };
        let Some((_, y0, _, y1)) = self.visible(extent) else {
            return;
        };
        let mask = color.to_argb_u32() & 0x00FF_FFFF;

        for y in y0..y1 {
            for (sx0, sx1) in Self::row_spans(rects, y as i32) {
                let Some((x0, _, x1, _)) = self.visible(Rect::new(sx0, y as i32, sx1 - sx0, 1))
                else {
                    continue;
                };
                let row = y * self.width;
                for px in &mut self.buffer[row + x0..row + x1] {
                    *px ^= mask;
                }
            }
        }
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }
}
