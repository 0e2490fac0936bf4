//! Core traits for jotter abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Repository for note CRUD operations.
///
/// Implementations validate payloads before touching storage, so a
/// rejected `create` or `update` never persists anything.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List every note, most recently updated first.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Fetch a note by ID. Absence is `Ok(None)`.
    async fn get(&self, id: Uuid) -> Result<Option<Note>>;

    /// Validate and insert a new note.
    async fn create(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Validate and apply a partial update, refreshing `updated_at`.
    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Permanently delete a note.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> Result<()>;
}

// =============================================================================
// GENERATION TRAITS
// =============================================================================

/// Sampling and output options for a single generation call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Ask the provider to constrain output to a JSON object.
    pub json_object: bool,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn json_object(mut self) -> Self {
        self.json_object = true;
        self
    }
}

/// Backend for text generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text with a system instruction and a user message.
    async fn generate_with_system(
        &self,
        system: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_builder() {
        let opts = GenerationOptions::new()
            .temperature(0.2)
            .max_tokens(300)
            .json_object();
        assert_eq!(opts.temperature, Some(0.2));
        assert_eq!(opts.max_tokens, Some(300));
        assert!(opts.json_object);
    }

    #[test]
    fn test_generation_options_default_is_plain_text() {
        let opts = GenerationOptions::default();
        assert!(opts.temperature.is_none());
        assert!(opts.max_tokens.is_none());
        assert!(!opts.json_object);
    }
}
