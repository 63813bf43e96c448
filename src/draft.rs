//! Debounced text editing for one note.
//!
//! Keystrokes update a local title/body buffer right away; the board only
//! sees the text once typing pauses for the configured delay, and only if it
//! differs from what the note currently holds. Dropping the draft or calling
//! [`NoteDraft::cancel`] discards an edit that has not been committed yet.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use canvas::doc::{Note, NoteId};

use crate::board::NoteBoard;
use crate::timer::Debounce;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Buffer {
    title: String,
    content: String,
}

pub struct NoteDraft {
    board: NoteBoard,
    note_id: NoteId,
    buffer: Arc<Mutex<Buffer>>,
    debounce: Debounce,
}

impl NoteDraft {
    #[must_use]
    pub fn new(board: NoteBoard, note: &Note, delay: Duration) -> Self {
        Self {
            board,
            note_id: note.id,
            buffer: Arc::new(Mutex::new(Buffer { title: note.title.clone(), content: note.content.clone() })),
            debounce: Debounce::new(delay),
        }
    }

    #[must_use]
    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    /// Title as currently typed.
    #[must_use]
    pub fn title(&self) -> String {
        self.buffer().title.clone()
    }

    /// Body as currently typed.
    #[must_use]
    pub fn content(&self) -> String {
        self.buffer().content.clone()
    }

    /// True while an edit is waiting for the typing pause.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debounce.is_scheduled()
    }

    pub fn edit_title(&self, title: impl Into<String>) {
        self.buffer().title = title.into();
        self.schedule_commit();
    }

    pub fn edit_content(&self, content: impl Into<String>) {
        self.buffer().content = content.into();
        self.schedule_commit();
    }

    /// Take the note's text after a change made elsewhere.
    pub fn sync_from_note(&self, note: &Note) {
        let mut buffer = self.buffer();
        buffer.title.clone_from(&note.title);
        buffer.content.clone_from(&note.content);
    }

    /// Drop an uncommitted edit. The local buffer keeps the typed text.
    pub fn cancel(&self) {
        if self.debounce.cancel() {
            debug!(id = %self.note_id, "draft edit discarded");
        }
    }

    fn schedule_commit(&self) {
        let board = self.board.clone();
        let buffer = Arc::clone(&self.buffer);
        let id = self.note_id;
        self.debounce.schedule(async move {
            let typed = buffer.lock().unwrap_or_else(PoisonError::into_inner).clone();
            commit(&board, id, typed).await;
        });
    }

    fn buffer(&self) -> MutexGuard<'_, Buffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn commit(board: &NoteBoard, id: NoteId, typed: Buffer) {
    let Some(note) = board.note(id).await else {
        debug!(%id, "draft target gone; edit dropped");
        return;
    };
    if note.title == typed.title && note.content == typed.content {
        return;
    }
    board.update_content(id, Some(typed.title), Some(typed.content)).await;
}
