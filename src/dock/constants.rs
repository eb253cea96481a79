//! Layout metrics shared by layout, hit-testing and painting
//!
//! Changing any of these changes the geometry every test asserts against.

use std::time::Duration;

// ============================================================================
// Tabs and drag bars
// ============================================================================

/// Labels longer than this many characters are shortened with "..."
pub const MAX_TAB_LENGTH: usize = 30;

/// Characters kept from the start of a shortened label
pub const TAB_NAME_HEAD: usize = MAX_TAB_LENGTH - 23;

/// Characters kept from the end of a shortened label
pub const TAB_NAME_TAIL: usize = 20;

/// Thickness of a control's drag bar
pub const DRAG_BAR_SIZE: i32 = 14;

/// Close button size on notebook tabs
pub const CLOSE_TAB_SIZE: i32 = 10;

/// Close button size on drag bars
pub const CLOSE_DRAG_SIZE: i32 = 7;

/// Height of the notebook tab strip
pub const TAB_HEIGHT: i32 = 26;

/// Horizontal text margin inside a tab
pub const TAB_MARGIN: i32 = 8;

// ============================================================================
// Notebook body
// ============================================================================

pub const NB_MARGIN_LEFT: i32 = 7;
pub const NB_MARGIN_RIGHT: i32 = 9;
pub const NB_MARGIN_TOP: i32 = 3;
pub const NB_MARGIN_BOTTOM: i32 = 9;

/// Tabs start this far left of the notebook client area
pub const NB_PADDING: i32 = 4;

// ============================================================================
// Sections and splitters
// ============================================================================

/// Thickness of the splitter between two rows of a column section
pub const SPLITTER_SIZE_H: i32 = 9;

/// Thickness of the splitter between two columns of a row section
pub const SPLITTER_SIZE_V: i32 = 9;

/// Length of the handle drawn at the start of a splitter
pub const SPLITTER_HANDLE_LENGTH: i32 = 24;

/// Thickness of the splitter handle (centered in the gutter)
pub const SPLITTER_HANDLE_THICKNESS: i32 = 6;

/// Gutter between items of a section whose contents cannot be resized
pub const FIXED_GAP: i32 = 3;

/// Minimum size reported by an empty dock area
pub const EMPTY_MIN: i32 = 20;

// ============================================================================
// Icons
// ============================================================================

pub const TAB_FEATURE_WIDTH: i32 = 10;
pub const TAB_FEATURE_HEIGHT: i32 = 10;
pub const BAR_FEATURE_WIDTH: i32 = 7;
pub const BAR_FEATURE_HEIGHT: i32 = 7;

/// Size of the two-button tab scroller shown at the right of a tab strip
pub const TAB_SCROLLER_WIDTH: i32 = 34;
pub const TAB_SCROLLER_HEIGHT: i32 = 20;

// ============================================================================
// Interaction
// ============================================================================

/// Manhattan distance the pointer must travel before a press becomes a drag
pub const DRAG_THRESHOLD: i32 = 3;

/// Distance outside the dock area past which a drag becomes an export
pub const EXPORT_MARGIN: i32 = 20;

/// Hover time on a feature icon before its feature bar pops up
pub const FEATURE_POPUP_DELAY: Duration = Duration::from_millis(100);

/// Width of the outline drawn around the dock area while dragging
pub const MARK_WIDTH: i32 = 3;

/// Width of the outline drawn for a docking preview
pub const PREVIEW_WIDTH: i32 = 3;
