//! Abstract pointer input consumed by the dock layout
//!
//! The host translates its toolkit events (winit in the bundled demo) into
//! `PointerEvent`s. Only the primary button drives docking gestures, so
//! press/move/release arrive through separate entry points on `DockSizer`
//! and the event itself carries position, modifiers and a timestamp.

use std::time::Instant;

/// Keyboard modifiers that change the meaning of a drag
///
/// - `shift`: dock the dragged control *into* the target (tab-add)
/// - `ctrl`: duplicate the control instead of moving it, and allow
///   re-docking a region onto itself
/// - `alt`: move the whole containing tab group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const fn shift() -> Self {
        Self {
            shift: true,
            ctrl: false,
            alt: false,
        }
    }

    pub const fn ctrl() -> Self {
        Self {
            shift: false,
            ctrl: true,
            alt: false,
        }
    }

    pub const fn alt() -> Self {
        Self {
            shift: false,
            ctrl: false,
            alt: true,
        }
    }
}

/// A pointer event in window coordinates
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
    /// When the event happened; drives the hover popup delay
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            modifiers: Modifiers::NONE,
            time: Instant::now(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn at(mut self, time: Instant) -> Self {
        self.time = time;
        self
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Mouse cursor shapes the layout asks the host to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorKind {
    #[default]
    Arrow,
    Hand,
    /// Dragging a control with no valid drop target
    Sizing,
    /// Resizing rows (horizontal splitter bar)
    ResizeNS,
    /// Resizing columns (vertical splitter bar)
    ResizeWE,
}
