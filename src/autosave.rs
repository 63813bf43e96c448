//! Auto-save coordinator — debounced, batched flushes of pending notes.
//!
//! DESIGN
//! ======
//! Every note mutation calls [`AutoSave::schedule`], which raises the
//! pending flag and restarts a single debounce timer. When the timer fires
//! the coordinator asks its [`SaveTarget`] to flush everything pending in one
//! batch. A burst of edits therefore costs one write per touched note, not
//! one per edit.
//!
//! The pending flag drops when a flush starts and comes back if the flush
//! fails or another mutation is scheduled while it is running, so both flags
//! can be true at once. Flushes are serialised: a forced or timed save that
//! arrives mid-flush waits for it, then flushes whatever is still pending.
//!
//! ERROR HANDLING
//! ==============
//! A failed flush leaves the pending flag set and is not retried on its own;
//! the next scheduled or forced save picks the changes up again.

#[cfg(test)]
#[path = "autosave_test.rs"]
mod autosave_test;

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use canvas::doc::NoteId;

use crate::auth::AuthState;
use crate::timer::Debounce;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    /// Some per-note writes failed; those notes stay pending.
    #[error("{} note(s) failed to save", failed.len())]
    Failed { failed: Vec<NoteId> },
}

/// What the UI shows about saving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SaveStatus {
    pub has_pending_changes: bool,
    pub is_saving: bool,
}

/// The save indicator derived from auth and [`SaveStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveIndicator {
    /// Anonymous: nothing is saved, so nothing is shown.
    Hidden,
    Saving,
    Pending,
    Saved,
}

impl SaveIndicator {
    #[must_use]
    pub fn for_status(auth: &AuthState, status: SaveStatus) -> Self {
        if !auth.is_authenticated() {
            Self::Hidden
        } else if status.is_saving {
            Self::Saving
        } else if status.has_pending_changes {
            Self::Pending
        } else {
            Self::Saved
        }
    }

    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Saving => Some("Saving..."),
            Self::Pending => Some("Changes pending"),
            Self::Saved => Some("All changes saved"),
        }
    }
}

/// Whatever owns the pending notes and knows how to write them out.
#[async_trait]
pub trait SaveTarget: Send + Sync {
    async fn flush(&self) -> Result<(), SaveError>;
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// Debounced save coordinator. Clones share the same timer and status.
#[derive(Debug, Clone)]
pub struct AutoSave {
    inner: Arc<AutoSaveInner>,
}

#[derive(Debug)]
struct AutoSaveInner {
    status: watch::Sender<SaveStatus>,
    debounce: Debounce,
    /// Held for the whole of a flush.
    flush_lock: Mutex<()>,
}

impl AutoSave {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (status, _) = watch::channel(SaveStatus::default());
        Self { inner: Arc::new(AutoSaveInner {
            status,
            debounce: Debounce::new(delay),
            flush_lock: Mutex::new(()),
        }) }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.inner.debounce.delay()
    }

    #[must_use]
    pub fn status(&self) -> SaveStatus {
        *self.inner.status.borrow()
    }

    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.status().has_pending_changes
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.status().is_saving
    }

    /// Receiver that observes every status change.
    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.inner.status.subscribe()
    }

    /// Mark changes pending and (re)start the debounce timer.
    ///
    /// Only weak references are held while waiting: dropping the coordinator
    /// or the target cancels the save.
    pub fn schedule(&self, target: Weak<dyn SaveTarget>) {
        self.inner.status.send_modify(|s| s.has_pending_changes = true);

        let inner = Arc::downgrade(&self.inner);
        self.inner.debounce.schedule(async move {
            let (Some(inner), Some(target)) = (inner.upgrade(), target.upgrade()) else {
                debug!("auto-save target gone; skipping");
                return;
            };
            let autosave = AutoSave { inner };
            if let Err(e) = autosave.perform_save(target.as_ref()).await {
                warn!(error = %e, "auto-save failed; changes stay pending");
            }
        });
    }

    /// Cancel the timer and flush now. If a flush is already in flight this
    /// waits for it and then flushes what it did not cover.
    ///
    /// # Errors
    ///
    /// Returns the flush's [`SaveError`] if any note failed to save.
    pub async fn force_save(&self, target: &dyn SaveTarget) -> Result<(), SaveError> {
        self.cancel();
        self.perform_save(target).await
    }

    /// Cancel the timer without saving.
    pub fn cancel(&self) {
        if self.inner.debounce.cancel() {
            debug!("pending auto-save cancelled");
        }
    }

    /// Cancel the timer and drop the pending flag, e.g. after the board was
    /// reloaded for another user. A flush in flight keeps its flags.
    pub fn reset(&self) {
        self.cancel();
        let cleared = self.inner.status.send_if_modified(|s| {
            if s.is_saving || !s.has_pending_changes {
                return false;
            }
            s.has_pending_changes = false;
            true
        });
        if cleared {
            debug!("pending flag cleared");
        }
    }

    /// Wait for any flush in flight, then flush if changes are pending.
    async fn perform_save(&self, target: &dyn SaveTarget) -> Result<(), SaveError> {
        let _flushing = self.inner.flush_lock.lock().await;
        let started = self.inner.status.send_if_modified(|s| {
            if !s.has_pending_changes {
                return false;
            }
            s.has_pending_changes = false;
            s.is_saving = true;
            true
        });
        if !started {
            debug!("nothing to save");
            return Ok(());
        }

        let result = target.flush().await;
        self.inner.status.send_modify(|s| {
            s.is_saving = false;
            if result.is_err() {
                s.has_pending_changes = true;
            }
        });
        result
    }
}
