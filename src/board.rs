//! Board service — the optimistic note store.
//!
//! DESIGN
//! ======
//! Every operation mutates the in-memory [`NoteStore`] first and returns
//! without waiting on the backend. Creates and deletes reach persistence on a
//! spawned task; updates only mark the note pending and (when signed in)
//! schedule the auto-save, which later writes every pending note in one
//! batch. Anonymous boards are purely local: nothing is written or loaded.
//!
//! ERROR HANDLING
//! ==============
//! Persistence failures end here. Insert/delete/load failures are logged and
//! swallowed; a failed load leaves an empty board rather than an error.
//! During a batch flush, notes whose write failed are marked pending again
//! (unless deleted meanwhile) so the next save retries them. Only
//! `force_save` hands the flush result back to the caller.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use time::OffsetDateTime;
use tokio::sync::{RwLock, watch};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use canvas::action::Commit;
use canvas::camera::Camera;
use canvas::doc::{NewNote, Note, NoteColor, NoteId, NoteStore, NoteUpdate};
use canvas::viewport::Viewport;

use crate::auth::AuthState;
use crate::autosave::{AutoSave, SaveError, SaveIndicator, SaveStatus, SaveTarget};
use crate::config::BoardConfig;
use crate::draft::NoteDraft;
use crate::persistence::{NotePersistence, NoteRow, NoteRowUpdate};

/// Handle to one user's board. Clones share the same state.
#[derive(Clone)]
pub struct NoteBoard {
    inner: Arc<BoardInner>,
}

struct BoardInner {
    store: RwLock<NoteStore>,
    auth: RwLock<AuthState>,
    persistence: Arc<dyn NotePersistence>,
    autosave: AutoSave,
    loading: AtomicBool,
    last_error: Mutex<Option<String>>,
    content_debounce: Duration,
}

impl NoteBoard {
    /// An empty, anonymous board writing through `persistence`.
    #[must_use]
    pub fn new(persistence: Arc<dyn NotePersistence>, config: &BoardConfig) -> Self {
        Self {
            inner: Arc::new(BoardInner {
                store: RwLock::new(NoteStore::new()),
                auth: RwLock::new(AuthState::anonymous()),
                persistence,
                autosave: AutoSave::new(config.auto_save_delay),
                loading: AtomicBool::new(false),
                last_error: Mutex::new(None),
                content_debounce: config.content_debounce,
            }),
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Snapshot of every note, in collection order.
    pub async fn notes(&self) -> Vec<Note> {
        self.inner.store.read().await.notes().to_vec()
    }

    /// Snapshot of every note in draw order.
    pub async fn notes_by_z(&self) -> Vec<Note> {
        self.inner.store.read().await.sorted_by_z().into_iter().cloned().collect()
    }

    pub async fn note(&self, id: NoteId) -> Option<Note> {
        self.inner.store.read().await.get(&id).cloned()
    }

    pub async fn is_pending(&self, id: NoteId) -> bool {
        self.inner.store.read().await.is_pending(&id)
    }

    pub async fn pending_len(&self) -> usize {
        self.inner.store.read().await.pending_len()
    }

    pub async fn auth(&self) -> AuthState {
        self.inner.auth.read().await.clone()
    }

    pub async fn save_indicator(&self) -> SaveIndicator {
        SaveIndicator::for_status(&*self.inner.auth.read().await, self.save_status())
    }

    #[must_use]
    pub fn save_status(&self) -> SaveStatus {
        self.inner.autosave.status()
    }

    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.inner.autosave.has_pending_changes()
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.inner.autosave.is_saving()
    }

    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.inner.autosave.subscribe_status()
    }

    /// True while a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// User-facing error, if any. Persistence failures never set it.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.error_slot().clone()
    }

    pub fn clear_error(&self) {
        *self.error_slot() = None;
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Add a note with a fresh id and return it. The backend insert runs in
    /// the background when signed in.
    pub async fn create(&self, input: NewNote) -> Note {
        let now = OffsetDateTime::now_utc();
        let auth = self.auth().await;
        let note = Note::from_new(Uuid::new_v4(), auth.owner_id(), input, now);

        self.inner.store.write().await.insert(note.clone());
        self.clear_error();
        debug!(id = %note.id, owner_id = %note.owner_id, "note created");

        if auth.is_authenticated() {
            let persistence = Arc::clone(&self.inner.persistence);
            let row = NoteRow::from_note(&note);
            tokio::spawn(async move {
                if let Err(e) = persistence.insert(&row).await {
                    warn!(id = %row.id, error = %e, "note insert failed; kept locally");
                }
            });
        }
        note
    }

    /// Create the toolbar's default note at the canvas point in the middle
    /// of the visible viewport.
    pub async fn create_at_center(&self, viewport: &Viewport, camera: &Camera) -> Note {
        self.create(NewNote::at(viewport.center_canvas(camera))).await
    }

    /// Merge `update` into note `id`. Unknown ids are logged and ignored.
    pub async fn update(&self, id: NoteId, update: NoteUpdate) {
        let applied = self.inner.store.write().await.apply(&id, &update, OffsetDateTime::now_utc());
        if !applied {
            error!(%id, "update for unknown note ignored");
            return;
        }
        self.clear_error();

        if self.inner.auth.read().await.is_authenticated() {
            self.inner.autosave.schedule(self.save_target());
        }
    }

    pub async fn update_color(&self, id: NoteId, color: NoteColor) {
        self.update(id, NoteUpdate::color(color)).await;
    }

    pub async fn update_position(&self, id: NoteId, x: f64, y: f64) {
        self.update(id, NoteUpdate::position(x, y)).await;
    }

    pub async fn update_size(&self, id: NoteId, width: f64, height: f64) {
        self.update(id, NoteUpdate::size(width, height)).await;
    }

    /// Change title and/or body; `None` leaves that field alone.
    pub async fn update_content(&self, id: NoteId, title: Option<String>, content: Option<String>) {
        self.update(id, NoteUpdate::text(title, content)).await;
    }

    /// Route a finished drag or resize to the matching update.
    pub async fn apply_commit(&self, commit: Commit) {
        self.update(commit.note_id(), commit.to_update()).await;
    }

    /// Remove note `id` locally and, when signed in, from the backend in the
    /// background. A backend failure does not bring the note back.
    pub async fn delete(&self, id: NoteId) {
        if self.inner.store.write().await.remove(&id).is_none() {
            debug!(%id, "delete for note not in store");
        }
        self.clear_error();

        let Some(owner_id) = self.user_id().await else {
            return;
        };
        let persistence = Arc::clone(&self.inner.persistence);
        tokio::spawn(async move {
            if let Err(e) = persistence.delete(id, &owner_id).await {
                warn!(%id, error = %e, "note delete failed; removed locally only");
            }
        });
    }

    /// Debounced text editor for `note`, using the configured content delay.
    #[must_use]
    pub fn draft(&self, note: &Note) -> NoteDraft {
        NoteDraft::new(self.clone(), note, self.inner.content_debounce)
    }

    /// Replace every note with the signed-in user's stored notes, newest
    /// first. Anonymous boards and failed loads end up empty.
    pub async fn load(&self) {
        let Some(owner_id) = self.user_id().await else {
            self.inner.store.write().await.clear();
            self.inner.loading.store(false, Ordering::SeqCst);
            return;
        };

        self.inner.loading.store(true, Ordering::SeqCst);
        let notes = match self.inner.persistence.list_by_owner(&owner_id).await {
            Ok(rows) => decode_rows(rows),
            Err(e) => {
                warn!(%owner_id, error = %e, "note load failed; starting empty");
                Vec::new()
            }
        };
        info!(%owner_id, count = notes.len(), "notes loaded");
        self.inner.store.write().await.replace_all(notes);
        self.inner.loading.store(false, Ordering::SeqCst);
    }

    /// Cancel the auto-save timer and flush every pending note now.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Failed`] with the ids whose write failed; those
    /// notes stay pending.
    pub async fn force_save(&self) -> Result<(), SaveError> {
        self.inner.autosave.force_save(self.inner.as_ref()).await
    }

    /// Switch to a new identity. Pending changes of the previous user are
    /// saved under that user first; then the new user's notes are loaded.
    pub async fn set_auth(&self, next: AuthState) {
        let previous = self.auth().await;
        if previous.user_id() == next.user_id() {
            *self.inner.auth.write().await = next;
            return;
        }

        if previous.is_authenticated() && self.has_pending_changes() {
            if let Err(e) = self.force_save().await {
                warn!(error = %e, "saving previous user's changes failed");
            }
        }
        *self.inner.auth.write().await = next;
        self.load().await;
        self.inner.autosave.reset();
    }

    /// Tear down: save what is pending (when signed in) and stop the timer.
    pub async fn unmount(&self) {
        let authenticated = self.inner.auth.read().await.is_authenticated();
        if authenticated && self.has_pending_changes() {
            if let Err(e) = self.force_save().await {
                warn!(error = %e, "final save on unmount failed");
            }
        }
        self.inner.autosave.cancel();
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    async fn user_id(&self) -> Option<String> {
        self.inner.auth.read().await.user_id().map(str::to_owned)
    }

    fn save_target(&self) -> Weak<dyn SaveTarget> {
        let target: Weak<BoardInner> = Arc::downgrade(&self.inner);
        target
    }

    fn error_slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.inner.last_error.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Map stored rows to notes, skipping (and logging) rows that do not decode.
fn decode_rows(rows: Vec<NoteRow>) -> Vec<Note> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match row.into_note() {
                Ok(note) => Some(note),
                Err(e) => {
                    warn!(%id, error = %e, "skipping undecodable note row");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl SaveTarget for BoardInner {
    /// Write every pending note with one update each, all issued together.
    async fn flush(&self) -> Result<(), SaveError> {
        let Some(owner_id) = self.auth.read().await.user_id().map(str::to_owned) else {
            debug!("flush skipped for anonymous board");
            return Ok(());
        };

        let notes = self.store.write().await.take_pending();
        if notes.is_empty() {
            return Ok(());
        }

        let owner = owner_id.as_str();
        let results = join_all(notes.iter().map(|note| async move {
            let changes = NoteRowUpdate::from_note(note);
            (note.id, self.persistence.update(note.id, &changes, owner).await)
        }))
        .await;

        let failed: Vec<NoteId> = results
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(()) => None,
                Err(e) => {
                    error!(%id, error = %e, "note save failed");
                    Some(id)
                }
            })
            .collect();

        if failed.is_empty() {
            info!(%owner_id, count = notes.len(), "pending notes saved");
            return Ok(());
        }

        let mut store = self.store.write().await;
        for id in &failed {
            store.mark_pending(id);
        }
        warn!(%owner_id, failed = failed.len(), saved = notes.len() - failed.len(), "flush incomplete");
        Err(SaveError::Failed { failed })
    }
}
