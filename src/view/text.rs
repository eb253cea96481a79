//! Tab label text rendered with fontdue
//!
//! `GlyphText` is shared (behind an `Rc`) between the layout, which only
//! measures label widths, and the frame, which rasterizes glyphs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fontdue::{Font, FontSettings, Metrics};

use crate::panel::TextMeasure;

// Glyph cache key: (character, font_size as bits)
type GlyphCacheKey = (char, u32);
pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Rc<[u8]>)>;

/// Fonts tried in order when the config names none
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub struct GlyphText {
    font: Font,
    font_size: f32,
    ascent: f32,
    cache: RefCell<GlyphCache>,
}

impl GlyphText {
    pub fn from_bytes(bytes: &[u8], font_size: f32) -> Result<Self, String> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| format!("Failed to parse font: {}", e))?;
        let ascent = font
            .horizontal_line_metrics(font_size)
            .map_or(font_size * 0.8, |m| m.ascent);
        Ok(Self {
            font,
            font_size,
            ascent,
            cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn from_file(path: &Path, font_size: f32) -> Result<Self, String> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("Failed to read font {}: {}", path.display(), e))?;
        Self::from_bytes(&bytes, font_size)
    }

    /// Load `preferred` if given, otherwise the first system font found
    pub fn discover(preferred: Option<&Path>, font_size: f32) -> Option<Self> {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path, font_size) {
                Ok(text) => {
                    tracing::info!("Using font {}", path.display());
                    return Some(text);
                }
                Err(e) => tracing::warn!("{}", e),
            }
        }
        tracing::warn!("No usable font found, tab labels will not be drawn");
        None
    }

    #[inline]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Distance from the top of a line to its baseline
    #[inline]
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Glyph metrics and coverage bitmap, cached per character and size
    pub fn rasterize(&self, ch: char) -> (Metrics, Rc<[u8]>) {
        let key = (ch, self.font_size.to_bits());
        let mut cache = self.cache.borrow_mut();
        let (metrics, bitmap) = cache.entry(key).or_insert_with(|| {
            let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
            (metrics, Rc::from(bitmap))
        });
        (*metrics, Rc::clone(bitmap))
    }

    pub fn glyph_cache_size(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl TextMeasure for GlyphText {
    fn text_width(&self, text: &str) -> i32 {
        let width: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, self.font_size).advance_width)
            .sum();
        width.ceil() as i32
    }
}
