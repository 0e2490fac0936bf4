//! Demo data and connectivity verification.

use tracing::{info, warn};
use uuid::Uuid;

use jotter_core::{CreateNoteRequest, Error, Note, NoteRepository, Result};

const VERIFY_CONTENT: &str = "This note was created by the automated database test.";

/// Notes inserted by `jotter-admin seed`.
pub fn demo_notes() -> Vec<CreateNoteRequest> {
    vec![
        CreateNoteRequest::new(
            "Welcome to the cloud",
            "Your notes are now stored in a serverless Postgres database. Feel free to edit or remove this note.",
        )
        .with_tags(["intro", "cloud"]),
        CreateNoteRequest::new(
            "Deploy checklist",
            "Remember to set DATABASE_URL and OPENAI_API_KEY in the Vercel dashboard before deploying.",
        )
        .with_tags(["vercel", "ops"]),
    ]
}

/// Outcome of a seeding run.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub created: Vec<Note>,
    /// Titles that failed to insert.
    pub skipped: Vec<String>,
}

/// Insert each note, logging and skipping the ones that fail.
pub async fn seed_notes(
    repo: &dyn NoteRepository,
    notes: Vec<CreateNoteRequest>,
) -> SeedReport {
    let mut report = SeedReport::default();
    for note in notes {
        let title = note.title.clone();
        match repo.create(note).await {
            Ok(created) => {
                info!(
                    subsystem = "db",
                    component = "seed",
                    note_id = %created.id,
                    title = %created.title,
                    "Seed note created"
                );
                report.created.push(created);
            }
            Err(e) => {
                warn!(
                    subsystem = "db",
                    component = "seed",
                    title = %title,
                    error = %e,
                    "Skipping seed note"
                );
                report.skipped.push(title);
            }
        }
    }
    report
}

/// Create, read back and delete a uniquely-titled note.
///
/// Fails if the stored content does not match what was written.
pub async fn verify_round_trip(repo: &dyn NoteRepository) -> Result<Uuid> {
    let title = format!("Automated test note {}", Uuid::new_v4());
    let created = repo
        .create(
            CreateNoteRequest::new(title, VERIFY_CONTENT).with_tags(["automation", "verification"]),
        )
        .await?;

    let retrieved = repo.get(created.id).await?;
    if retrieved.map(|n| n.content).as_deref() != Some(VERIFY_CONTENT) {
        return Err(Error::Internal(
            "Database verification failed: note content mismatch.".to_string(),
        ));
    }

    repo.delete(created.id).await?;
    Ok(created.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryNoteRepository;

    #[tokio::test]
    async fn test_seed_inserts_demo_notes() {
        let repo = MemoryNoteRepository::new();
        let report = seed_notes(&repo, demo_notes()).await;
        assert_eq!(report.created.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(report.created[0].tags, vec!["intro", "cloud"]);
    }

    #[tokio::test]
    async fn test_seed_skips_invalid_notes() {
        let repo = MemoryNoteRepository::new();
        let mut notes = demo_notes();
        notes.insert(0, CreateNoteRequest::new("", "no title"));

        let report = seed_notes(&repo, notes).await;
        assert_eq!(report.created.len(), 2);
        assert_eq!(report.skipped, vec![String::new()]);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_verify_round_trip_cleans_up() {
        let repo = MemoryNoteRepository::new();
        let id = verify_round_trip(&repo).await.unwrap();
        assert!(repo.get(id).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_verify_round_trip_surfaces_store_errors() {
        let repo = MemoryNoteRepository::unavailable();
        assert!(verify_round_trip(&repo).await.is_err());
    }
}
