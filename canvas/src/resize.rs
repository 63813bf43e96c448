//! Resize controller for a single note.
//!
//! The controller records the pointer position and note size at pointer-down.
//! For each active axis the screen-space pointer delta is added to ("right",
//! "bottom") or subtracted from ("left", "top") the starting dimension and the
//! result clamped to [`MIN_NOTE_SIZE`, `MAX_NOTE_SIZE`]. Moves only touch the
//! note's [`NoteView`]; the end returns a [`Commit`] unless the size is
//! unchanged from what is already stored.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::Commit;
use crate::camera::{Point, Size};
use crate::consts::{MAX_NOTE_SIZE, MIN_NOTE_SIZE};
use crate::doc::NoteId;
use crate::view::NoteView;

/// Which edge or corner handle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeDirection {
    Right,
    Left,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeDirection {
    /// +1 if dragging right grows the width, -1 if it shrinks it, `None` if
    /// the width is not affected.
    #[must_use]
    pub fn horizontal_sign(self) -> Option<f64> {
        match self {
            Self::Right | Self::TopRight | Self::BottomRight => Some(1.0),
            Self::Left | Self::TopLeft | Self::BottomLeft => Some(-1.0),
            Self::Top | Self::Bottom => None,
        }
    }

    /// +1 if dragging down grows the height, -1 if it shrinks it, `None` if
    /// the height is not affected.
    #[must_use]
    pub fn vertical_sign(self) -> Option<f64> {
        match self {
            Self::Bottom | Self::BottomLeft | Self::BottomRight => Some(1.0),
            Self::Top | Self::TopLeft | Self::TopRight => Some(-1.0),
            Self::Left | Self::Right => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a handle name is not a known direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resize direction: {0}")]
pub struct UnknownDirection(pub String);

impl FromStr for ResizeDirection {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            other => Err(UnknownDirection(other.to_owned())),
        }
    }
}

/// Clamp a note dimension to the allowed range.
#[must_use]
pub fn clamp_note_dimension(value: f64) -> f64 {
    value.clamp(MIN_NOTE_SIZE, MAX_NOTE_SIZE)
}

/// Size after dragging `direction`'s handle by the screen-space `delta` from `start`.
///
/// Axes the direction does not touch keep their starting value unclamped.
#[must_use]
pub fn resized(start: Size, direction: ResizeDirection, delta: Point) -> Size {
    let width = match direction.horizontal_sign() {
        Some(sign) => clamp_note_dimension(start.width + sign * delta.x),
        None => start.width,
    };
    let height = match direction.vertical_sign() {
        Some(sign) => clamp_note_dimension(start.height + sign * delta.y),
        None => start.height,
    };
    Size::new(width, height)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ResizeGesture {
    direction: ResizeDirection,
    start_pointer: Point,
    start_size: Size,
}

#[derive(Debug, Clone)]
pub struct ResizeController {
    note_id: NoteId,
    gesture: Option<ResizeGesture>,
}

impl ResizeController {
    #[must_use]
    pub fn new(note_id: NoteId) -> Self {
        Self { note_id, gesture: None }
    }

    #[must_use]
    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Direction of the resize in progress.
    #[must_use]
    pub fn direction(&self) -> Option<ResizeDirection> {
        self.gesture.map(|g| g.direction)
    }

    /// Start a resize from a handle. Returns false if one is already in progress.
    pub fn begin(&mut self, pointer: Point, direction: ResizeDirection, current_size: Size) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        self.gesture = Some(ResizeGesture { direction, start_pointer: pointer, start_size: current_size });
        true
    }

    /// Show the live size for the current pointer. Only the view is touched.
    pub fn move_to(&mut self, pointer: Point, view: &mut NoteView) -> Option<Size> {
        let gesture = self.gesture?;
        let size = Self::size_for(gesture, pointer);
        view.live_size = Some(size);
        Some(size)
    }

    /// Finish the resize. Returns a commit only if the final size differs
    /// from `committed`, the size currently stored for the note.
    pub fn end(&mut self, pointer: Point, committed: Size, view: &mut NoteView) -> Option<Commit> {
        let gesture = self.gesture.take()?;
        view.live_size = None;
        let size = Self::size_for(gesture, pointer);
        if size == committed {
            return None;
        }
        Some(Commit::Size { id: self.note_id, size })
    }

    /// Abandon the resize without committing.
    pub fn cancel(&mut self, view: &mut NoteView) {
        self.gesture = None;
        view.live_size = None;
    }

    fn size_for(gesture: ResizeGesture, pointer: Point) -> Size {
        resized(gesture.start_size, gesture.direction, pointer.sub(gesture.start_pointer))
    }
}
