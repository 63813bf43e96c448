//! `tracing` subscriber setup for hosts embedding the board.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns false if a global subscriber was already installed, in which case
/// the existing one is kept.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "tracing subscriber already installed");
            false
        }
    }
}
