//! docksizer - a recursive dock layout manager
//!
//! Panels are arranged in nested rows and columns separated by draggable
//! splitters. Each slot is either a drag bar with one panel or a notebook of
//! tabs, and panels can be dragged between slots to re-dock them. The
//! layout can be saved, restored and maximized around one panel.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dock;
pub mod geometry;
pub mod input;
pub mod panel;
pub mod panels;
pub mod theme;
pub mod tracing;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::DockConfig;
pub use dock::{DockControl, DockSizer, DockTree, LayoutSpec, NodeId, Structure};
pub use geometry::{Rect, Size};
pub use theme::DockPalette;
