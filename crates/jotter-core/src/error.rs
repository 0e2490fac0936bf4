//! Error types for jotter.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type alias using jotter's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jotter operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Payload failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// AI provider call failed or returned unusable output
    #[error("AI provider error: {0}")]
    Provider(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
