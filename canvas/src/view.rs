//! Per-note transient view state.
//!
//! While a drag or resize is in progress the controller writes the live
//! geometry here; the renderer draws a note from its `NoteView` when set and
//! from the committed [`Note`] otherwise. Nothing here is persisted.

use crate::camera::{Point, Size};
use crate::doc::Note;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoteView {
    /// Canvas position shown while a drag is in progress.
    pub live_position: Option<Point>,
    /// Size shown while a resize is in progress.
    pub live_size: Option<Size>,
}

impl NoteView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Position to draw: the live drag position, else the committed one.
    #[must_use]
    pub fn position(&self, note: &Note) -> Point {
        self.live_position.unwrap_or_else(|| note.position())
    }

    /// Size to draw: the live resize size, else the committed one.
    #[must_use]
    pub fn size(&self, note: &Note) -> Size {
        self.live_size.unwrap_or_else(|| note.size())
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.live_position.is_some()
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.live_size.is_some()
    }
}
