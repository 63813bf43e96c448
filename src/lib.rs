//! Optimistic-sync service layer for the sticky-note board.
//!
//! The [`canvas`] crate owns geometry, gestures, and the in-memory note store.
//! This crate wraps that store in a [`board::NoteBoard`] that mutates local
//! state first and reaches the persistence backend in the background, batching
//! edits through the [`autosave::AutoSave`] coordinator.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | Note store service: create/update/delete/load/flush |
//! | [`autosave`] | Debounced batch saves and the observable save status |
//! | [`draft`] | Debounced title/body editing buffer |
//! | [`timer`] | Cancellable one-shot debounce timer |
//! | [`persistence`] | Backend trait, row mapping, and the local-only backend |
//! | [`db`] | Postgres backend over `sqlx` |
//! | [`auth`] | Current user identity as seen by the board |
//! | [`config`] | Environment-driven configuration |
//! | [`logging`] | `tracing` subscriber setup |

pub mod auth;
pub mod autosave;
pub mod board;
pub mod config;
pub mod db;
pub mod draft;
pub mod logging;
pub mod persistence;
pub mod timer;
