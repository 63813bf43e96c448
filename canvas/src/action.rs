//! Values emitted when a gesture ends, for the host to commit to the note store.

use crate::camera::{Point, Size};
use crate::doc::{NoteId, NoteUpdate};

/// A finished gesture's result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Commit {
    /// A drag ended at `position` (canvas space).
    Position { id: NoteId, position: Point },
    /// A resize ended at `size` (canvas units, already clamped).
    Size { id: NoteId, size: Size },
}

impl Commit {
    #[must_use]
    pub fn note_id(&self) -> NoteId {
        match self {
            Self::Position { id, .. } | Self::Size { id, .. } => *id,
        }
    }

    /// The sparse update this commit applies.
    #[must_use]
    pub fn to_update(&self) -> NoteUpdate {
        match self {
            Self::Position { position, .. } => NoteUpdate::position(position.x, position.y),
            Self::Size { size, .. } => NoteUpdate::size(size.width, size.height),
        }
    }
}
