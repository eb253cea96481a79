//! Collaborator interfaces consumed by the dock layout
//!
//! The layout never looks inside the panels it arranges. Hosts plug in:
//!
//! - `Panel`: the wrapped widget (minimum size, bounds, show/hide, destroy)
//! - `Dockable`: an optional per-control delegate (close veto, tab activation)
//! - `TextMeasure`: tab label measurement
//! - `ControlFactory`: duplicates a control for Ctrl-drags
//! - `DragSource`: starts a platform drag when a control is dragged out

use std::any::Any;

use crate::dock::{DockControl, DockTree, NodeId};
use crate::geometry::{Rect, Size};
use crate::dock::paint::Surface;

/// A user panel owned by a `DockControl`
pub trait Panel {
    /// Natural/minimum size the panel wants
    fn min_size(&self) -> Size;

    /// Move and resize the panel
    fn set_bounds(&mut self, bounds: Rect);

    /// Show or hide the panel (only the active tab of a notebook is shown)
    fn set_visible(&mut self, visible: bool);

    /// Release platform resources; called when a control closes without a
    /// close callback or dockable delegate
    fn destroy(&mut self) {}

    /// Paint the panel content. Hosts that render panels natively leave
    /// this empty.
    fn paint(&self, _surface: &mut dyn Surface, _bounds: Rect) {}

    /// Opaque object a drag carries when the control is exported
    fn payload(&self) -> Option<&dyn Any> {
        None
    }
}

/// Optional per-control delegate that may veto closing and observes tab
/// activation
pub trait Dockable {
    /// Called once when the delegate is attached to a control
    fn bind(&mut self, _control: NodeId) {}

    /// Return `false` to refuse closing the control
    fn close(&mut self, control: NodeId, force: bool) -> bool;

    /// The control's notebook tab became (or stopped being) the active one
    fn tab_activated(&mut self, _control: NodeId, _activated: bool) {}
}

/// Close callback attached directly to a control; return `false` to veto
pub type CloseCallback = Box<dyn FnMut(NodeId, bool) -> bool>;

/// Measures tab label text in pixels
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> i32;
}

/// Monospace measurement: every character advances by the same amount.
/// Used when no font is loaded and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAdvance(pub i32);

impl Default for FixedAdvance {
    fn default() -> Self {
        FixedAdvance(7)
    }
}

impl TextMeasure for FixedAdvance {
    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.0
    }
}

/// Creates a copy of a control when the user Ctrl-drags it
pub trait ControlFactory {
    fn dock_control_for(&mut self, tree: &DockTree, original: NodeId) -> Option<DockControl>;
}

/// Result of a platform drag-and-drop operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Copied,
    Moved,
    Linked,
    /// Dropped nowhere
    None,
    Cancelled,
}

impl DragOutcome {
    /// Whether some drop target accepted the payload
    pub fn accepted(&self) -> bool {
        matches!(
            self,
            DragOutcome::Copied | DragOutcome::Moved | DragOutcome::Linked
        )
    }
}

/// Starts a (blocking) platform drag of an exported control
pub trait DragSource {
    fn start_drag(&mut self, control: NodeId, export: &str, payload: Option<&dyn Any>)
        -> DragOutcome;
}

/// A small ARGB bitmap (`0xAARRGGBB`, row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Icon {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Single-color square, handy for tests and placeholder features
    pub fn solid(size: u32, argb: u32) -> Self {
        Self::new(size, size, vec![argb; (size * size) as usize])
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }
}
