//! Postgres backend for notes.
//!
//! Rows live in `sticky_notes`:
//!
//! ```text
//! id uuid primary key, user_id text, title text, content text,
//! settings jsonb, position_x int, position_y int, width int, height int,
//! z_index int, created_at timestamptz, updated_at timestamptz
//! ```
//!
//! The schema is owned by the hosting deployment; nothing here migrates it.
//! The pool connects lazily, so building a backend never blocks or fails on
//! an unreachable database. Errors surface per call.

#[cfg(test)]
#[path = "db_test.rs"]
mod db_test;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::QueryBuilder;
use sqlx::postgres::PgPoolOptions;
use time::OffsetDateTime;
use tracing::{info, warn};

use canvas::doc::NoteId;

use crate::config::BoardConfig;
use crate::persistence::{LocalOnly, NotePersistence, NoteRow, NoteRowUpdate, PersistenceError};

type NoteTuple = (
    NoteId,
    String,
    String,
    String,
    Option<serde_json::Value>,
    i32,
    i32,
    i32,
    i32,
    i32,
    OffsetDateTime,
    OffsetDateTime,
);

/// Build the backend for `config`: Postgres when a usable URL is set,
/// otherwise [`LocalOnly`].
#[must_use]
pub fn connect(config: &BoardConfig) -> Arc<dyn NotePersistence> {
    let Some(url) = config.database_url.as_deref() else {
        info!("DATABASE_URL not set; notes stay local");
        return Arc::new(LocalOnly);
    };

    match PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_lazy(url)
    {
        Ok(pool) => {
            info!(max_connections = config.db_max_connections, "note persistence configured");
            Arc::new(PgNotes::new(pool))
        }
        Err(e) => {
            warn!(error = %e, "invalid DATABASE_URL; notes stay local");
            Arc::new(LocalOnly)
        }
    }
}

/// `sqlx` Postgres implementation of [`NotePersistence`].
#[derive(Debug, Clone)]
pub struct PgNotes {
    pool: PgPool,
}

impl PgNotes {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotePersistence for PgNotes {
    async fn insert(&self, row: &NoteRow) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO sticky_notes \
             (id, user_id, title, content, settings, position_x, position_y, width, height, z_index, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(row.id)
        .bind(&row.user_id)
        .bind(&row.title)
        .bind(&row.content)
        .bind(&row.settings)
        .bind(row.position_x)
        .bind(row.position_y)
        .bind(row.width)
        .bind(row.height)
        .bind(row.z_index)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, id: NoteId, changes: &NoteRowUpdate, owner_id: &str) -> Result<(), PersistenceError> {
        let mut builder = QueryBuilder::new("UPDATE sticky_notes SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(title) = &changes.title {
                set.push("title = ").push_bind_unseparated(title.clone());
            }
            if let Some(content) = &changes.content {
                set.push("content = ").push_bind_unseparated(content.clone());
            }
            if let Some(settings) = &changes.settings {
                set.push("settings = ").push_bind_unseparated(settings.clone());
            }
            if let Some(x) = changes.position_x {
                set.push("position_x = ").push_bind_unseparated(x);
            }
            if let Some(y) = changes.position_y {
                set.push("position_y = ").push_bind_unseparated(y);
            }
            if let Some(width) = changes.width {
                set.push("width = ").push_bind_unseparated(width);
            }
            if let Some(height) = changes.height {
                set.push("height = ").push_bind_unseparated(height);
            }
            if let Some(z) = changes.z_index {
                set.push("z_index = ").push_bind_unseparated(z);
            }
            let updated_at = changes.updated_at.unwrap_or_else(OffsetDateTime::now_utc);
            set.push("updated_at = ").push_bind_unseparated(updated_at);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" AND user_id = ");
        builder.push_bind(owner_id.to_owned());

        builder.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn delete(&self, id: NoteId, owner_id: &str) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM sticky_notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<NoteRow>, PersistenceError> {
        let rows = sqlx::query_as::<_, NoteTuple>(
            "SELECT id, user_id, title, content, settings, position_x, position_y, width, height, z_index, created_at, updated_at \
             FROM sticky_notes WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, user_id, title, content, settings, position_x, position_y, width, height, z_index, created_at, updated_at)| {
                    NoteRow {
                        id,
                        user_id,
                        title,
                        content,
                        settings: settings.unwrap_or(serde_json::Value::Null),
                        position_x,
                        position_y,
                        width,
                        height,
                        z_index,
                        created_at,
                        updated_at,
                    }
                },
            )
            .collect())
    }
}
