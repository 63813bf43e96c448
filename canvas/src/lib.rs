//! Interaction core for the sticky-note board.
//!
//! Everything here is synchronous and free of I/O: the camera that maps
//! between screen and canvas space, the gesture controllers that turn raw
//! pointer and wheel input into camera changes or note commits, and the
//! in-memory note store with its pending-change set. The host wires DOM
//! events to these types and hands the resulting [`action::Commit`]s and
//! store mutations to the persistence layer.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`camera`] | Pan/zoom transform and screen/canvas conversions |
//! | [`viewport`] | Visible area of the board and its center |
//! | [`publish`] | Camera-change subscriptions |
//! | [`input`] | Pointer targets, wheel deltas, and the pan state machine |
//! | [`pan_zoom`] | Background pan and wheel zoom controller |
//! | [`drag`] | Per-note drag gesture |
//! | [`resize`] | Per-note resize gesture and size clamping |
//! | [`view`] | Transient per-note geometry shown during a gesture |
//! | [`action`] | Commits emitted when a gesture ends |
//! | [`doc`] | Notes, sparse updates, and the note store |
//! | [`consts`] | Shared numeric constants (zoom limits, note sizes, etc.) |

pub mod action;
pub mod camera;
pub mod consts;
pub mod doc;
pub mod drag;
pub mod input;
pub mod pan_zoom;
pub mod publish;
pub mod resize;
pub mod view;
pub mod viewport;
