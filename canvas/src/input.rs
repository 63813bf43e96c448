//! Input model: what a pointer landed on, wheel deltas, and the pan state machine.
//!
//! The host hit-tests its own rendering tree and reports the result as a
//! [`PointerTarget`]. Controllers decide from that whether a gesture starts:
//! the background pans, a note body drags, a resize handle resizes, and an
//! editable text field is left alone so the text can be selected.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::NoteId;
use crate::resize::ResizeDirection;

/// The element under the pointer at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas, not covered by any note.
    Background,
    /// The draggable body or header of a note.
    Note(NoteId),
    /// The editable title or body field of a note.
    NoteText(NoteId),
    /// One of a note's resize handles.
    ResizeHandle(NoteId, ResizeDirection),
}

impl PointerTarget {
    /// The note this target belongs to, if any.
    #[must_use]
    pub fn note_id(self) -> Option<NoteId> {
        match self {
            Self::Background => None,
            Self::Note(id) | Self::NoteText(id) | Self::ResizeHandle(id, _) => Some(id),
        }
    }

    /// Whether a pointer-down here may start a note drag.
    #[must_use]
    pub fn is_draggable(self) -> bool {
        matches!(self, Self::Note(_))
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down = zoom out).
    pub dy: f64,
}

/// State of the canvas pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    /// No pan in progress.
    #[default]
    Idle,
    /// The background is being dragged.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
}

impl PanState {
    #[must_use]
    pub fn is_panning(self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
