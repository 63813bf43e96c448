//! Persistence collaborator — the backend contract the board writes through.
//!
//! DESIGN
//! ======
//! Notes are stored one row per note, scoped by owner. Positions and sizes are
//! floats on the canvas but integers in storage, so the row mappers round.
//! Every call is owner-scoped; a backend must never touch another owner's
//! rows.
//!
//! When no backend is configured the board runs against [`LocalOnly`], which
//! accepts every write and lists nothing. That is a normal mode, not an error.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use canvas::doc::{Note, NoteId, NoteSettings};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The database rejected or failed the query.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backend refused the call or could not be reached.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be mapped back to a note.
    #[error("row decode failed: {0}")]
    Decode(String),
}

// =============================================================================
// ROWS
// =============================================================================

/// A note as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRow {
    pub id: NoteId,
    pub user_id: String,
    pub title: String,
    pub content: String,
    /// `{"backgroundColor": "..."}`.
    pub settings: serde_json::Value,
    pub position_x: i32,
    pub position_y: i32,
    pub width: i32,
    pub height: i32,
    pub z_index: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl NoteRow {
    /// Map a note to its stored form, rounding geometry to whole units.
    #[must_use]
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id,
            user_id: note.owner_id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            settings: settings_json(note.settings),
            position_x: round_unit(note.x),
            position_y: round_unit(note.y),
            width: round_unit(note.width),
            height: round_unit(note.height),
            z_index: note.z_index,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }

    /// Map a stored row back to a note.
    ///
    /// Missing settings keys fall back to defaults; an unknown color is a
    /// decode error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Decode`] if `settings` is not a settings object.
    pub fn into_note(self) -> Result<Note, PersistenceError> {
        let settings = match self.settings {
            serde_json::Value::Null => NoteSettings::default(),
            value => serde_json::from_value::<NoteSettings>(value)
                .map_err(|e| PersistenceError::Decode(format!("note {}: settings: {e}", self.id)))?,
        };
        Ok(Note {
            id: self.id,
            owner_id: self.user_id,
            title: self.title,
            content: self.content,
            settings,
            x: f64::from(self.position_x),
            y: f64::from(self.position_y),
            width: f64::from(self.width),
            height: f64::from(self.height),
            z_index: self.z_index,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Column changes for an update. `None` columns are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteRowUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub settings: Option<serde_json::Value>,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub z_index: Option<i32>,
    pub updated_at: Option<OffsetDateTime>,
}

impl NoteRowUpdate {
    /// Every mutable column, taken from the note's current state. Used by the
    /// batched flush, which writes whole notes.
    #[must_use]
    pub fn from_note(note: &Note) -> Self {
        let row = NoteRow::from_note(note);
        Self {
            title: Some(row.title),
            content: Some(row.content),
            settings: Some(row.settings),
            position_x: Some(row.position_x),
            position_y: Some(row.position_y),
            width: Some(row.width),
            height: Some(row.height),
            z_index: Some(row.z_index),
            updated_at: Some(row.updated_at),
        }
    }
}

fn settings_json(settings: NoteSettings) -> serde_json::Value {
    serde_json::json!({ "backgroundColor": settings.background_color.as_str() })
}

#[allow(clippy::cast_possible_truncation)]
fn round_unit(value: f64) -> i32 {
    value.round() as i32
}

// =============================================================================
// BACKEND
// =============================================================================

/// Storage backend for notes. All calls are scoped by owner.
#[async_trait]
pub trait NotePersistence: Send + Sync {
    /// Store a newly created note.
    async fn insert(&self, row: &NoteRow) -> Result<(), PersistenceError>;

    /// Apply column changes to the owner's note with `id`.
    async fn update(&self, id: NoteId, changes: &NoteRowUpdate, owner_id: &str) -> Result<(), PersistenceError>;

    /// Delete the owner's note with `id`.
    async fn delete(&self, id: NoteId, owner_id: &str) -> Result<(), PersistenceError>;

    /// Every note of `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<NoteRow>, PersistenceError>;
}

/// Backend used when nothing is configured: writes succeed, lists are empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOnly;

#[async_trait]
impl NotePersistence for LocalOnly {
    async fn insert(&self, _row: &NoteRow) -> Result<(), PersistenceError> {
        Ok(())
    }

    async fn update(&self, _id: NoteId, _changes: &NoteRowUpdate, _owner_id: &str) -> Result<(), PersistenceError> {
        Ok(())
    }

    async fn delete(&self, _id: NoteId, _owner_id: &str) -> Result<(), PersistenceError> {
        Ok(())
    }

    async fn list_by_owner(&self, _owner_id: &str) -> Result<Vec<NoteRow>, PersistenceError> {
        Ok(Vec::new())
    }
}
