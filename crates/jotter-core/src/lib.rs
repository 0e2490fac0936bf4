//! # jotter-core
//!
//! Core types, traits, and configuration for the jotter notes service.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other jotter crates depend on:
//! - The [`Note`] entity and its request payloads with explicit validation
//! - The [`NoteRepository`] and [`GenerationBackend`] seams
//! - The [`ConfigResolver`] that reads and memoizes process configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;
pub mod uuid_utils;
pub mod validation;

// Re-export commonly used types at crate root
pub use config::{
    Config, ConfigResolver, ProviderSettings, ServerSettings, DEFAULT_GEN_MODEL, DEFAULT_HOST,
    DEFAULT_OPENAI_URL, DEFAULT_PORT,
};
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::{is_v7, new_v7};
pub use validation::{FieldError, ValidationErrors, MAX_TITLE_LENGTH};
