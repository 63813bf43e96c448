//! Drag controller for a single note.
//!
//! All pointer positions are screen-space and relative to the canvas
//! container, the same space the camera maps from. On pointer-down the
//! controller records the grab offset (pointer minus the note's on-screen
//! origin, divided by zoom) so the note does not jump under the pointer.
//! Each move places the note at `screen_to_canvas(pointer) - grab_offset` in
//! the note's [`NoteView`]; the end computes the same position and returns it
//! as a [`Commit`] for the store.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::action::Commit;
use crate::camera::{Camera, Point};
use crate::doc::NoteId;
use crate::input::PointerTarget;
use crate::view::NoteView;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragGesture {
    /// Canvas-space vector from the note origin to the grab point.
    grab_offset: Point,
}

#[derive(Debug, Clone)]
pub struct DragController {
    note_id: NoteId,
    gesture: Option<DragGesture>,
}

impl DragController {
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

    /// Grab offset of the drag in progress.
    #[must_use]
    pub fn grab_offset(&self) -> Option<Point> {
        self.gesture.map(|g| g.grab_offset)
    }

    /// Start a drag if the pointer went down on this note's body.
    ///
    /// Returns false (and does nothing) when the target is another note, a
    /// text field, a resize handle, or when a drag is already in progress.
    pub fn begin(&mut self, pointer: Point, target: PointerTarget, note_screen_origin: Point, camera: &Camera) -> bool {
        if self.gesture.is_some() || !target.is_draggable() || target.note_id() != Some(self.note_id) {
            return false;
        }
        let grab_offset = pointer.sub(note_screen_origin).div(camera.zoom);
        self.gesture = Some(DragGesture { grab_offset });
        true
    }

    /// Move the note under the pointer. Only the view is touched.
    pub fn move_to(&mut self, pointer: Point, camera: &Camera, view: &mut NoteView) -> Option<Point> {
        let gesture = self.gesture?;
        let position = Self::place(pointer, camera, gesture);
        view.live_position = Some(position);
        Some(position)
    }

    /// Finish the drag and return the final position to commit.
    pub fn end(&mut self, pointer: Point, camera: &Camera, view: &mut NoteView) -> Option<Commit> {
        let gesture = self.gesture.take()?;
        view.live_position = None;
        Some(Commit::Position { id: self.note_id, position: Self::place(pointer, camera, gesture) })
    }

    /// Abandon the drag without committing, e.g. when the note unmounts.
    pub fn cancel(&mut self, view: &mut NoteView) {
        self.gesture = None;
        view.live_position = None;
    }

    fn place(pointer: Point, camera: &Camera, gesture: DragGesture) -> Point {
        camera.screen_to_canvas(pointer).sub(gesture.grab_offset)
    }
}
