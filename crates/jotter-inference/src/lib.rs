//! # jotter-inference
//!
//! AI augmentation for jotter notes.
//!
//! This crate provides:
//! - An OpenAI-compatible chat completion backend
//! - [`AugmentationService`], which summarizes, generates and translates
//!   notes, returning fixed fallbacks when no provider is configured
//!
//! # Feature Flags
//!
//! - `mock`: Scripted [`GenerationBackend`] for tests in dependent crates
//!
//! # Example
//!
//! ```rust,no_run
//! use jotter_core::ConfigResolver;
//! use jotter_inference::AugmentationService;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ConfigResolver::from_env().get().unwrap();
//!     let service = AugmentationService::from_config(&config).unwrap();
//!     let result = service.summarize("Trip plan", "Fly out Friday.").await.unwrap();
//!     println!("{} ({})", result.summary, result.source.as_str());
//! }
//! ```

pub mod augment;
pub mod openai;

// Scripted backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use jotter_core::*;

pub use augment::{AugmentSource, AugmentationService, NoteDraft, SummaryResult};
pub use openai::{OpenAIBackend, OpenAIConfig};
