//! Dock configuration persistence
//!
//! Stores user preferences in `~/.config/docksizer/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config_paths::DockPaths;
use crate::dock::ExtrasPolicy;
use crate::theme::DockPalette;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    /// Selected palette id (e.g., "classic", "dark")
    #[serde(default = "default_palette")]
    pub palette: String,
    /// What to do with live controls a restored layout does not mention
    #[serde(default)]
    pub extras_policy: ExtrasPolicy,
    /// Persisted layout; `~/.config/docksizer/layout.yaml` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_file: Option<PathBuf>,
    /// TTF/OTF font for tab labels; a system font is searched when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_palette() -> String {
    "classic".to_string()
}

fn default_font_size() -> f32 {
    13.0
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            extras_policy: ExtrasPolicy::default(),
            layout_file: None,
            font_path: None,
            font_size: default_font_size(),
        }
    }
}

impl DockConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = DockPaths::user().map(|p| p.config_file()) else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = DockPaths::user()
            .map(|p| p.config_file())
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Where the layout is persisted
    pub fn layout_path(&self) -> Option<PathBuf> {
        self.layout_file
            .clone()
            .or_else(|| DockPaths::user().map(|p| p.layout_file()))
    }

    /// Resolve the configured palette, falling back to the classic one
    pub fn resolve_palette(&self) -> DockPalette {
        match crate::theme::load_palette(&self.palette) {
            Ok(palette) => palette,
            Err(e) => {
                tracing::warn!("Failed to load palette '{}': {}", self.palette, e);
                DockPalette::classic()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DockConfig::load_from(&dir.path().join("config.yaml"));
        assert_eq!(config, DockConfig::default());
    }

    #[test]
    fn test_invalid_yaml_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "palette: [unterminated").expect("write");
        assert_eq!(DockConfig::load_from(&path), DockConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.yaml");
        let config = DockConfig {
            palette: "dark".to_string(),
            extras_policy: ExtrasPolicy::Hide,
            layout_file: Some(PathBuf::from("/tmp/layout.yaml")),
            font_path: None,
            font_size: 15.0,
        };
        config.save_to(&path).expect("save");
        assert_eq!(DockConfig::load_from(&path), config);

        let text = std::fs::read_to_string(&path).expect("read");
        assert!(text.contains("extras_policy: hide"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "palette: dark\n").expect("write");
        let config = DockConfig::load_from(&path);
        assert_eq!(config.palette, "dark");
        assert_eq!(config.extras_policy, ExtrasPolicy::AppendRegion);
        assert_eq!(config.font_size, 13.0);
    }

    #[test]
    fn test_unknown_palette_falls_back() {
        let config = DockConfig {
            palette: "no-such-palette".to_string(),
            ..DockConfig::default()
        };
        assert_eq!(config.resolve_palette(), DockPalette::classic());
    }
}
