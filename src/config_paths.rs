//! Where docksizer keeps its files
//!
//! ```text
//! <base>/config.yaml    window and palette settings
//! <base>/layout.yaml    layout saved on exit
//! <base>/palettes/      user palette files
//! <base>/logs/          daily log files
//! ```
//!
//! `<base>` is `$XDG_CONFIG_HOME/docksizer` or `~/.config/docksizer` on
//! Unix and macOS, `%APPDATA%\docksizer` on Windows.

use std::path::{Path, PathBuf};

/// The docksizer directory and the files inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockPaths {
    base: PathBuf,
}

impl DockPaths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The per-user directory, if the platform has one
    pub fn user() -> Option<Self> {
        #[cfg(target_os = "windows")]
        let root = std::env::var_os("APPDATA").map(PathBuf::from);

        #[cfg(not(target_os = "windows"))]
        let root = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        root.map(|root| Self::new(root.join("docksizer")))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join("config.yaml")
    }

    /// Default layout file when the config names none
    pub fn layout_file(&self) -> PathBuf {
        self.base.join("layout.yaml")
    }

    pub fn palettes_dir(&self) -> PathBuf {
        self.base.join("palettes")
    }

    /// Create the log directory if needed and return it
    pub fn ensure_logs_dir(&self) -> Result<PathBuf, String> {
        let logs = self.base.join("logs");
        std::fs::create_dir_all(&logs)
            .map_err(|e| format!("Failed to create log directory {}: {}", logs.display(), e))?;
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_base() {
        let paths = DockPaths::new("/tmp/dock");
        assert_eq!(paths.config_file(), Path::new("/tmp/dock/config.yaml"));
        assert_eq!(paths.layout_file(), Path::new("/tmp/dock/layout.yaml"));
        assert_eq!(paths.palettes_dir(), Path::new("/tmp/dock/palettes"));
    }

    #[test]
    fn test_ensure_logs_dir_creates_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = DockPaths::new(dir.path().join("nested"));
        let logs = paths.ensure_logs_dir().expect("logs dir");
        assert!(logs.is_dir());
        assert!(logs.ends_with("logs"));
        // Idempotent
        assert_eq!(paths.ensure_logs_dir(), Ok(logs));
    }
}
