//! Note repository implementation.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use jotter_core::{
    new_v7, CreateNoteRequest, Error, Note, NoteRepository, Result, UpdateNoteRequest,
};

use crate::gateway::Gateway;

const NOTE_COLUMNS: &str = "id, title, content, tags, summary, created_at, updated_at";

/// PostgreSQL implementation of NoteRepository.
///
/// Every call goes through [`Gateway::pool`], so the first call is the one
/// that connects.
pub struct PgNoteRepository {
    gateway: Arc<Gateway>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository over the given gateway.
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    async fn pool(&self) -> Result<&PgPool> {
        self.gateway.pool().await
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self) -> Result<Vec<Note>> {
        let start = Instant::now();
        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {} FROM notes ORDER BY updated_at DESC",
            NOTE_COLUMNS
        ))
        .fetch_all(self.pool().await?)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(notes)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Note>> {
        sqlx::query_as::<_, Note>(&format!("SELECT {} FROM notes WHERE id = $1", NOTE_COLUMNS))
            .bind(id)
            .fetch_optional(self.pool().await?)
            .await
            .map_err(Error::Database)
    }

    async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        req.validate()?;

        let id = new_v7();
        let now = Utc::now();
        let note = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes (id, title, content, tags, summary, created_at, updated_at)
             VALUES ($1, $2, $3, $4, NULL, $5, $5)
             RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.tags)
        .bind(now)
        .fetch_one(self.pool().await?)
        .await
        .map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "create",
            note_id = %note.id,
            tag_count = note.tags.len(),
            "Note created"
        );
        Ok(note)
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        req.validate()?;

        // `updated_at` must move forward even when two writes land in the
        // same clock tick; timestamptz resolution is one microsecond.
        let (set_summary, summary) = match req.summary {
            Some(value) => (true, value),
            None => (false, None),
        };
        let note = sqlx::query_as::<_, Note>(&format!(
            "UPDATE notes SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                tags = COALESCE($4::text[], tags),
                summary = CASE WHEN $5::boolean THEN $6::text ELSE summary END,
                updated_at = GREATEST($7, updated_at + INTERVAL '1 microsecond')
             WHERE id = $1
             RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(id)
        .bind(req.title.flatten())
        .bind(req.content.flatten())
        .bind(req.tags.flatten())
        .bind(set_summary)
        .bind(summary)
        .bind(Utc::now())
        .fetch_optional(self.pool().await?)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "update",
            note_id = %id,
            "Note updated"
        );
        Ok(note)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(self.pool().await?)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }

        info!(
            subsystem = "db",
            component = "notes",
            op = "delete",
            note_id = %id,
            "Note deleted"
        );
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.gateway.health_check().await
    }
}
