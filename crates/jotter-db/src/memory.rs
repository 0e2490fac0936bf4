//! In-process note repository for tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use jotter_core::{
    new_v7, CreateNoteRequest, Error, Note, NoteRepository, Result, UpdateNoteRequest,
};

/// Note repository backed by a `Vec` behind a lock.
///
/// Mirrors the PostgreSQL repository's observable behavior, including
/// validation before storage and strictly increasing `updated_at`.
#[derive(Default)]
pub struct MemoryNoteRepository {
    notes: RwLock<Vec<Note>>,
    unavailable: bool,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails as an unreachable database would.
    pub fn unavailable() -> Self {
        Self {
            notes: RwLock::default(),
            unavailable: true,
        }
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(Error::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn list(&self) -> Result<Vec<Note>> {
        self.ensure_available()?;
        let mut notes = self.notes.read().await.clone();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Note>> {
        self.ensure_available()?;
        Ok(self.notes.read().await.iter().find(|n| n.id == id).cloned())
    }

    async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        req.validate()?;
        self.ensure_available()?;

        let now = Utc::now();
        let note = Note {
            id: new_v7(),
            title: req.title,
            content: req.content,
            tags: req.tags,
            summary: None,
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        req.validate()?;
        self.ensure_available()?;

        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;

        req.apply_to(note);
        let floor = note.updated_at + Duration::microseconds(1);
        note.updated_at = Utc::now().max(floor);
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.ensure_available()?;
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.ensure_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = MemoryNoteRepository::new();
        let note = repo
            .create(CreateNoteRequest::new("Trip plan", "Fly out Friday.").with_tags(["travel"]))
            .await
            .unwrap();

        let fetched = repo.get(note.id).await.unwrap().unwrap();
        assert_eq!(fetched, note);
        assert_eq!(fetched.created_at, fetched.updated_at);
        assert!(fetched.summary.is_none());
    }

    #[tokio::test]
    async fn test_invalid_create_persists_nothing() {
        let repo = MemoryNoteRepository::new();
        assert!(repo.create(CreateNoteRequest::new("", "x")).await.is_err());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_update_advances_updated_at_only() {
        let repo = MemoryNoteRepository::new();
        let note = repo.create(CreateNoteRequest::new("t", "c")).await.unwrap();

        let updated = repo.update(note.id, UpdateNoteRequest::default()).await.unwrap();
        assert_eq!(updated.title, note.title);
        assert_eq!(updated.content, note.content);
        assert!(updated.updated_at > note.updated_at);
    }

    #[tokio::test]
    async fn test_list_orders_by_updated_at_desc() {
        let repo = MemoryNoteRepository::new();
        let first = repo.create(CreateNoteRequest::new("first", "a")).await.unwrap();
        let second = repo.create(CreateNoteRequest::new("second", "b")).await.unwrap();
        repo.update(first.id, UpdateNoteRequest::summary("bumped"))
            .await
            .unwrap();

        let ids: Vec<Uuid> = repo.list().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_missing_note_is_not_found() {
        let repo = MemoryNoteRepository::new();
        let id = Uuid::nil();
        assert!(matches!(
            repo.update(id, UpdateNoteRequest::default()).await,
            Err(Error::NoteNotFound(_))
        ));
        assert!(matches!(repo.delete(id).await, Err(Error::NoteNotFound(_))));
    }

    #[tokio::test]
    async fn test_unavailable_repository_fails_health_check() {
        let repo = MemoryNoteRepository::unavailable();
        assert!(matches!(repo.health_check().await, Err(Error::Database(_))));
    }
}
