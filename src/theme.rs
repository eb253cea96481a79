//! Dock palette
//!
//! Colors used to paint drag bars, notebooks, splitters and drag previews.
//! Palettes are YAML documents; two are embedded in the binary and users may
//! add their own under the config directory.
//!
//! Palette loading priority:
//! 1. User config: `~/.config/docksizer/palettes/{id}.yaml`
//! 2. Embedded: built-in palettes compiled into the binary

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config_paths::DockPaths;

pub const CLASSIC_YAML: &str = include_str!("../themes/classic.yaml");
pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");

/// A built-in palette entry
pub struct BuiltinPalette {
    /// Stable identifier for config (e.g. "classic")
    pub id: &'static str,
    pub yaml: &'static str,
}

pub const BUILTIN_PALETTES: &[BuiltinPalette] = &[
    BuiltinPalette {
        id: "classic",
        yaml: CLASSIC_YAML,
    },
    BuiltinPalette {
        id: "dark",
        yaml: DARK_YAML,
    },
];

/// Get the user's palette directory
pub fn get_user_palettes_dir() -> Option<PathBuf> {
    DockPaths::user().map(|p| p.palettes_dir())
}

/// Load a palette from a YAML file
pub fn from_file(path: &Path) -> Result<DockPalette, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read palette file {}: {}", path.display(), e))?;
    DockPalette::from_yaml(&content)
}

/// Load palette by id with priority: user → builtin
pub fn load_palette(id: &str) -> Result<DockPalette, String> {
    if let Some(user_dir) = get_user_palettes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user palette from {}", user_path.display());
            return from_file(&user_path);
        }
    }
    DockPalette::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |i: usize| {
            s.get(i..i + 2)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|c| u8::from_str_radix(c, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Raw palette document as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteData {
    pub version: u32,
    pub name: String,
    pub colors: DockPalette,
}

/// Every color the dock painter uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockPalette {
    /// Dock area background behind bars, gutters and notebook frames
    pub background: Color,
    /// Label text on tabs
    pub text: Color,
    pub drag_light: Color,
    pub drag_dark: Color,
    /// Notebook body
    pub notebook: Color,
    pub notebook_edge: Color,
    pub notebook_shadow1: Color,
    pub notebook_shadow2: Color,
    pub tab_active: Color,
    pub tab_active_edge: Color,
    pub tab_inactive: Color,
    pub tab_inactive_edge: Color,
    /// Top stripe of the active or hovered tab
    pub tab_highlight: Color,
    pub tab_highlight_edge: Color,
    pub feature_brush: Color,
    pub feature_pen: Color,
    /// Inverted fill while a splitter is dragged
    pub splitter_drag: Color,
    /// Inverted outline of the drop target preview
    pub dock_preview: Color,
    /// Inverted frame around the dock area during a drag
    pub mark: Color,
}

impl Default for DockPalette {
    fn default() -> Self {
        Self::classic()
    }
}

impl DockPalette {
    /// Light palette approximating classic system colors
    pub fn classic() -> Self {
        Self {
            background: Color::rgb(236, 233, 216),
            text: Color::rgb(0, 0, 0),
            drag_light: Color::rgb(255, 255, 255),
            drag_dark: Color::rgb(172, 168, 153),
            notebook: Color::rgb(252, 252, 254),
            notebook_edge: Color::rgb(145, 155, 156),
            notebook_shadow1: Color::rgb(208, 206, 191),
            notebook_shadow2: Color::rgb(227, 224, 208),
            tab_active: Color::rgb(252, 252, 254),
            tab_active_edge: Color::rgb(145, 155, 156),
            tab_inactive: Color::rgb(246, 246, 243),
            tab_inactive_edge: Color::rgb(145, 155, 156),
            tab_highlight: Color::rgb(255, 199, 60),
            tab_highlight_edge: Color::rgb(230, 139, 44),
            feature_brush: Color::rgb(255, 255, 255),
            feature_pen: Color::rgb(92, 92, 92),
            splitter_drag: Color::rgb(96, 96, 96),
            dock_preview: Color::rgb(32, 255, 255),
            mark: Color::rgb(255, 255, 0),
        }
    }

    /// Load palette from a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: PaletteData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        tracing::debug!("Parsed palette '{}' (v{})", data.name, data.version);
        Ok(data.colors)
    }

    /// Load a built-in palette by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_PALETTES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown palette id: {}", id))?;
        DockPalette::from_yaml(entry.yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#ECE9D8"), Ok(Color::rgb(236, 233, 216)));
        assert_eq!(Color::from_hex("20FFFF80"), Ok(Color::rgba(32, 255, 255, 128)));
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_builtin_classic_matches_defaults() {
        assert_eq!(DockPalette::from_builtin("classic"), Ok(DockPalette::classic()));
    }

    #[test]
    fn test_all_builtins_parse() {
        for entry in BUILTIN_PALETTES {
            assert!(DockPalette::from_yaml(entry.yaml).is_ok(), "{}", entry.id);
        }
    }

    #[test]
    fn test_missing_colors_fall_back() {
        let palette = DockPalette::from_yaml(
            "version: 1\nname: Partial\ncolors:\n  background: \"#000000\"\n",
        )
        .expect("palette");
        assert_eq!(palette.background, Color::rgb(0, 0, 0));
        assert_eq!(palette.mark, DockPalette::classic().mark);
    }
}
