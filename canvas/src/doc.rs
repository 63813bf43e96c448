//! Document model: notes, their properties, and the in-memory store.
//!
//! This module defines what sits on the canvas (`Note`), the input for
//! creating one (`NewNote`), a sparse-update type for incremental edits
//! (`NoteUpdate`), and the store that owns every live note together with the
//! set of ids whose changes have not been persisted yet (`NoteStore`).
//!
//! Mutations here are purely local and synchronous. Deciding when and how the
//! pending set reaches a backend is the service layer's job.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::camera::{Point, Size};
use crate::consts::{
    DEFAULT_NOTE_HEIGHT, DEFAULT_NOTE_WIDTH, DEFAULT_Z_INDEX, TOOLBAR_NOTE_HEIGHT, TOOLBAR_NOTE_WIDTH,
};

/// Unique identifier for a note. Generated client-side at creation.
pub type NoteId = Uuid;

/// Background color palette for notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Yellow,
    Orange,
    Blue,
    Green,
    Pink,
    Purple,
}

impl NoteColor {
    /// Every palette entry, in picker order.
    pub const ALL: [NoteColor; 6] = [
        NoteColor::Yellow,
        NoteColor::Orange,
        NoteColor::Blue,
        NoteColor::Green,
        NoteColor::Pink,
        NoteColor::Purple,
    ];

    /// Lowercase name as stored and sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Pink => "pink",
            Self::Purple => "purple",
        }
    }
}

/// Per-note presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteSettings {
    pub background_color: NoteColor,
}

impl NoteSettings {
    #[must_use]
    pub fn with_color(background_color: NoteColor) -> Self {
        Self { background_color }
    }
}

/// A note placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for this note.
    pub id: NoteId,
    /// Identity of the user who owns the note.
    pub owner_id: String,
    pub title: String,
    /// Body text.
    pub content: String,
    pub settings: NoteSettings,
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Stacking order hint; lower values are drawn beneath higher values. Not unique.
    pub z_index: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Note {
    /// Build a note from create input, stamping both timestamps with `now`.
    #[must_use]
    pub fn from_new(id: NoteId, owner_id: impl Into<String>, input: NewNote, now: OffsetDateTime) -> Self {
        Self {
            id,
            owner_id: owner_id.into(),
            title: input.title,
            content: input.content,
            settings: input.settings,
            x: input.x,
            y: input.y,
            width: input.width,
            height: input.height,
            z_index: input.z_index,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn color(&self) -> NoteColor {
        self.settings.background_color
    }

    /// Shallow-merge present fields of `update` into this note. Does not
    /// touch `updated_at`.
    pub fn merge(&mut self, update: &NoteUpdate) {
        if let Some(ref title) = update.title {
            self.title.clone_from(title);
        }
        if let Some(ref content) = update.content {
            self.content.clone_from(content);
        }
        if let Some(settings) = update.settings {
            self.settings = settings;
        }
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(w) = update.width {
            self.width = w;
        }
        if let Some(h) = update.height {
            self.height = h;
        }
        if let Some(z) = update.z_index {
            self.z_index = z;
        }
    }
}

/// Input for creating a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub settings: NoteSettings,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i32,
}

impl Default for NewNote {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            settings: NoteSettings::default(),
            x: 0.0,
            y: 0.0,
            width: DEFAULT_NOTE_WIDTH,
            height: DEFAULT_NOTE_HEIGHT,
            z_index: DEFAULT_Z_INDEX,
        }
    }
}

impl NewNote {
    /// The note the toolbar's "add" button places at `position`.
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self {
            title: "New Note".to_owned(),
            content: "Click here to edit...".to_owned(),
            x: position.x,
            y: position.y,
            width: TOOLBAR_NOTE_WIDTH,
            height: TOOLBAR_NOTE_HEIGHT,
            ..Self::default()
        }
    }
}

/// Sparse update for a note. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<NoteSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl NoteUpdate {
    #[must_use]
    pub fn color(color: NoteColor) -> Self {
        Self { settings: Some(NoteSettings::with_color(color)), ..Self::default() }
    }

    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }

    /// Text change; `None` leaves that field untouched.
    #[must_use]
    pub fn text(title: Option<String>, content: Option<String>) -> Self {
        Self { title, content, ..Self::default() }
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// In-memory store of notes plus the set of ids with unpersisted changes.
///
/// Notes keep insertion order: creates append, a fresh load is ordered by
/// creation time, newest first.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    pending: HashSet<NoteId>,
}

impl NoteStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a note and mark it pending. A note with the same id is replaced in place.
    pub fn insert(&mut self, note: Note) {
        let id = note.id;
        match self.index_of(&id) {
            Some(index) => self.notes[index] = note,
            None => self.notes.push(note),
        }
        self.pending.insert(id);
    }

    /// Merge `update` into an existing note, bump its `updated_at` to `now`,
    /// and mark it pending. Returns false if the note doesn't exist.
    pub fn apply(&mut self, id: &NoteId, update: &NoteUpdate, now: OffsetDateTime) -> bool {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == *id) else {
            return false;
        };
        note.merge(update);
        note.updated_at = now;
        self.pending.insert(*id);
        true
    }

    /// Remove a note and forget any pending change for it.
    pub fn remove(&mut self, id: &NoteId) -> Option<Note> {
        self.pending.remove(id);
        let index = self.index_of(id)?;
        Some(self.notes.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &NoteId) -> bool {
        self.index_of(id).is_some()
    }

    /// All notes in collection order.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// All notes sorted by `(z_index, created_at)` for draw order.
    #[must_use]
    pub fn sorted_by_z(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.iter().collect();
        notes.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.created_at.cmp(&b.created_at)));
        notes
    }

    /// Replace every note with a freshly loaded set, newest first. Clears the
    /// pending set: a fresh load wins over stale local dirty marks.
    pub fn replace_all(&mut self, mut notes: Vec<Note>) {
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.notes = notes;
        self.pending.clear();
    }

    /// Drop every note and pending mark.
    pub fn clear(&mut self) {
        self.notes.clear();
        self.pending.clear();
    }

    /// Snapshot the notes behind every pending id and clear the pending set.
    pub fn take_pending(&mut self) -> Vec<Note> {
        let pending = std::mem::take(&mut self.pending);
        self.notes
            .iter()
            .filter(|n| pending.contains(&n.id))
            .cloned()
            .collect()
    }

    /// Mark an existing note pending again. Returns false if it no longer exists.
    pub fn mark_pending(&mut self, id: &NoteId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.pending.insert(*id);
        true
    }

    #[must_use]
    pub fn is_pending(&self, id: &NoteId) -> bool {
        self.pending.contains(id)
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of notes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns `true` if the store contains no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn index_of(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|n| n.id == *id)
    }
}
