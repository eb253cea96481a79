//! Dock layout
//!
//! A tree of sections (rows or columns separated by splitters), regions
//! (a drag bar or a notebook of tabs) and controls (user panels), kept in an
//! arena owned by `DockTree` and driven through `DockSizer`.

pub mod constants;
pub mod control;
pub mod dock_info;
pub mod feature;
pub mod interaction;
pub mod paint;
pub mod region;
pub mod section;
pub mod sizer;
pub mod splitter;
pub mod structure;
pub mod tree;

pub use control::{DockControl, DockStyle};
pub use dock_info::{DockInfo, DockKind, DragSize};
pub use feature::{Feature, FeatureFactory, FeatureMode, FeatureRegistry};
pub use interaction::{DragHooks, DragOverlay, HitTarget, PointerTracker};
pub use paint::Surface;
pub use region::{Placement, ScrollRequest, TabScroll, TabState};
pub use section::DockSection;
pub use sizer::{DockSizer, LayoutError, LayoutSpec};
pub use splitter::{DockSplitter, SplitterState, SplitterStyle};
pub use structure::{
    ControlStructure, ExtrasPolicy, RegionStructure, SectionStructure, Structure,
    StructureResolver,
};
pub use tree::{DockNode, DockTree, NodeId, NodeKind};
