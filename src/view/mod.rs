//! Software rendering backend
//!
//! `Frame` adapts the softbuffer pixel slice to the dock `Surface`;
//! `GlyphText` measures and rasterizes tab labels.

pub mod frame;
pub mod text;

pub use frame::{blend_colors, Frame};
pub use text::{GlyphCache, GlyphText};
