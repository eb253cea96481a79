//! Command types returned by the dock layout
//!
//! Commands represent side effects that the host window should perform after
//! a pointer event or an API call: repainting, changing the cursor, or
//! reacting to notifications such as a tab being activated.

use crate::dock::NodeId;
use crate::geometry::Rect;
use crate::input::CursorKind;

/// Commands that can be returned from dock layout operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a full redraw of the dock area
    Redraw,
    /// Request a partial redraw of one rectangle
    RedrawRect(Rect),
    /// Change the mouse cursor
    SetCursor(CursorKind),
    /// A control's notebook tab was clicked by the user
    ControlActivated(NodeId),
    /// The root section lost its last child
    DockAreaEmpty,
    /// The hover delay on a control's feature icon elapsed; show its feature bar
    FeatureBarPopup(NodeId),
    /// An export drag ended without a drop target; open the control elsewhere
    OpenViewFor(NodeId),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, collapsing trivial cases
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Combine two commands into one
    pub fn and(self, other: Cmd) -> Cmd {
        match (self, other) {
            (Cmd::None, other) => other,
            (this, Cmd::None) => this,
            (Cmd::Batch(mut cmds), other) => {
                cmds.push(other);
                Cmd::Batch(cmds)
            }
            (this, other) => Cmd::Batch(vec![this, other]),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::RedrawRect(rect) => !rect.is_empty(),
            Cmd::SetCursor(_) => false,
            Cmd::ControlActivated(_) => false,
            Cmd::DockAreaEmpty => true,
            Cmd::FeatureBarPopup(_) => true,
            Cmd::OpenViewFor(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Iterate over all leaf commands, flattening batches
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }

    /// Last cursor change requested by this command, if any
    pub fn cursor(&self) -> Option<CursorKind> {
        match self {
            Cmd::SetCursor(kind) => Some(*kind),
            Cmd::Batch(cmds) => cmds.iter().rev().find_map(|c| c.cursor()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_collapses() {
        assert_eq!(Cmd::batch(vec![]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::Redraw]), Cmd::Redraw);
        assert!(matches!(
            Cmd::batch(vec![Cmd::Redraw, Cmd::DockAreaEmpty]),
            Cmd::Batch(_)
        ));
    }

    #[test]
    fn test_needs_redraw() {
        assert!(!Cmd::None.needs_redraw());
        assert!(!Cmd::SetCursor(CursorKind::Hand).needs_redraw());
        assert!(Cmd::RedrawRect(Rect::new(0, 0, 5, 5)).needs_redraw());
        assert!(!Cmd::RedrawRect(Rect::ZERO).needs_redraw());
        let batch = Cmd::SetCursor(CursorKind::Arrow).and(Cmd::Redraw);
        assert!(batch.needs_redraw());
    }

    #[test]
    fn test_cursor_picks_last() {
        let cmd = Cmd::batch(vec![
            Cmd::SetCursor(CursorKind::Hand),
            Cmd::Redraw,
            Cmd::SetCursor(CursorKind::Sizing),
        ]);
        assert_eq!(cmd.cursor(), Some(CursorKind::Sizing));
        assert_eq!(cmd.flatten().len(), 3);
    }
}
