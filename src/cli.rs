//! Command-line argument parsing for the demo window
//!
//! Supports:
//! - Choosing where the layout is loaded from and saved to
//! - Starting from the built-in layout, ignoring the saved one
//! - Overriding the configured palette

use clap::Parser;
use std::path::PathBuf;

use crate::config::DockConfig;

/// Dock layout demo
#[derive(Parser, Debug, Default)]
#[command(name = "docksizer", version, about = "Dock layout demo")]
pub struct CliArgs {
    /// Layout file to restore at startup and save on exit
    #[arg(short = 'l', long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Start with the built-in layout (the saved one is still overwritten on exit)
    #[arg(short = 'r', long)]
    pub reset: bool,

    /// Palette id, e.g. "classic" or "dark"
    #[arg(short = 'p', long, value_name = "ID")]
    pub palette: Option<String>,
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub config: DockConfig,
    /// Skip restoring the saved layout
    pub reset: bool,
}

impl CliArgs {
    /// Apply the arguments on top of the persisted config
    pub fn into_config(self, mut config: DockConfig) -> StartupConfig {
        if let Some(layout) = self.layout {
            config.layout_file = Some(layout);
        }
        if let Some(palette) = self.palette {
            config.palette = palette;
        }
        StartupConfig {
            config,
            reset: self.reset,
        }
    }
}
