//! Core data models for jotter.
//!
//! [`Note`] is the only persisted entity. The request types mirror the JSON
//! bodies accepted by the HTTP surface and carry their own validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::validation::{check_content, check_title, ValidationErrors};

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Insertion order as supplied by the caller; duplicates are kept.
    pub tags: Vec<String>,
    /// Last AI summary, overwritten on each summarization.
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateNoteRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_title(&mut errors, &self.title);
        check_content(&mut errors, &self.content);
        errors.into_result()
    }
}

/// Partial update payload. Absent fields are left untouched.
///
/// Every field keeps the difference between absent (`None`) and an explicit
/// `null` (`Some(None)`). Only `summary` accepts `null`, which clears it;
/// `validate` rejects `null` for the other fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<Option<String>>,
}

impl UpdateNoteRequest {
    /// Set only the summary, as done after an AI summarization.
    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(Some(summary.into())),
            ..Default::default()
        }
    }

    /// Replace title and content, as done after a translation.
    pub fn title_and_content(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(Some(title.into())),
            content: Some(Some(content.into())),
            ..Default::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.summary.is_none()
    }

    /// Validate the supplied fields only.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match &self.title {
            Some(Some(title)) => check_title(&mut errors, title),
            Some(None) => errors.push("title", "must not be null"),
            None => {}
        }
        match &self.content {
            Some(Some(content)) => check_content(&mut errors, content),
            Some(None) => errors.push("content", "must not be null"),
            None => {}
        }
        if let Some(None) = &self.tags {
            errors.push("tags", "must not be null");
        }
        errors.into_result()
    }

    /// Apply this update to an in-memory note. Does not touch timestamps.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(Some(title)) = &self.title {
            note.title = title.clone();
        }
        if let Some(Some(content)) = &self.content {
            note.content = content.clone();
        }
        if let Some(Some(tags)) = &self.tags {
            note.tags = tags.clone();
        }
        if let Some(summary) = &self.summary {
            note.summary = summary.clone();
        }
    }
}

/// Maps a present JSON value (including `null`) to `Some`, so that a missing
/// field stays `None` via `#[serde(default)]`.
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
