//! Board configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use tracing::{debug, warn};

pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_AUTO_SAVE_DELAY_MS: u64 = 5000;
pub const DEFAULT_CONTENT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A value that cannot fall back to its default.
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Postgres URL. `None` keeps every note local.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Quiet period before pending note changes are flushed.
    pub auto_save_delay: Duration,
    /// Quiet period before a title/body edit is committed to the store.
    pub content_debounce: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            auto_save_delay: Duration::from_millis(DEFAULT_AUTO_SAVE_DELAY_MS),
            content_debounce: Duration::from_millis(DEFAULT_CONTENT_DEBOUNCE_MS),
        }
    }
}

impl BoardConfig {
    /// Build typed config from the environment, loading `.env` first if present.
    ///
    /// Optional:
    /// - `DATABASE_URL`: unset or empty keeps notes local
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `AUTO_SAVE_DELAY_MS`: default 5000, must be non-zero
    /// - `CONTENT_DEBOUNCE_MS`: default 500
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `AUTO_SAVE_DELAY_MS` is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!(error = %e, "no .env file loaded");
        }

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Some(url),
            _ => None,
        };

        let auto_save_delay_ms = env_parse("AUTO_SAVE_DELAY_MS", DEFAULT_AUTO_SAVE_DELAY_MS);
        if auto_save_delay_ms == 0 {
            return Err(ConfigError::Invalid { key: "AUTO_SAVE_DELAY_MS".into(), value: "0".into() });
        }

        Ok(Self {
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            auto_save_delay: Duration::from_millis(auto_save_delay_ms),
            content_debounce: Duration::from_millis(env_parse("CONTENT_DEBOUNCE_MS", DEFAULT_CONTENT_DEBOUNCE_MS)),
        })
    }
}

/// Parse `key` from the environment, falling back to `default` when it is
/// unset or unparseable.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, "unparseable config value; using default");
            default
        }
    }
}
