//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed camera scale.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed camera scale.
pub const MAX_SCALE: f64 = 3.0;

/// Scale multiplier applied for one wheel notch scrolling up.
pub const WHEEL_ZOOM_IN_FACTOR: f64 = 1.1;

/// Scale multiplier applied for one wheel notch scrolling down.
pub const WHEEL_ZOOM_OUT_FACTOR: f64 = 0.9;

/// Height of the fixed top bar that overlaps the canvas, in screen pixels.
pub const TOP_BAR_HEIGHT_PX: f64 = 64.0;

// ── Notes ───────────────────────────────────────────────────────

/// Minimum note width or height after a resize, in canvas units.
pub const MIN_NOTE_SIZE: f64 = 200.0;

/// Maximum note width or height after a resize, in canvas units.
pub const MAX_NOTE_SIZE: f64 = 800.0;

/// Width used when a create request does not specify one.
pub const DEFAULT_NOTE_WIDTH: f64 = 350.0;

/// Height used when a create request does not specify one.
pub const DEFAULT_NOTE_HEIGHT: f64 = 300.0;

/// Width of a note created from the toolbar at the viewport center.
pub const TOOLBAR_NOTE_WIDTH: f64 = 300.0;

/// Height of a note created from the toolbar at the viewport center.
pub const TOOLBAR_NOTE_HEIGHT: f64 = 200.0;

/// Stacking order given to freshly created notes.
pub const DEFAULT_Z_INDEX: i32 = 1;

/// Owner id recorded on notes created without a signed-in user.
pub const ANONYMOUS_OWNER: &str = "anonymous";
