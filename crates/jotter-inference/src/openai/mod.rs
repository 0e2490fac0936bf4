//! OpenAI-compatible generation backend.
//!
//! Works with any endpoint that speaks the chat completions API, including
//! the OpenAI cloud API and local servers such as Ollama or vLLM in
//! compatibility mode.
//!
//! # Example
//!
//! ```rust,no_run
//! use jotter_inference::openai::{OpenAIBackend, OpenAIConfig};
//! use jotter_core::{GenerationBackend, GenerationOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAIBackend::new(OpenAIConfig {
//!         api_key: Some("sk-...".to_string()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//!     let text = backend
//!         .generate_with_system("Be brief.", "Say hello", GenerationOptions::new())
//!         .await
//!         .unwrap();
//!     println!("{}", text);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{OpenAIBackend, OpenAIConfig};
pub use error::{to_provider_error, OpenAIErrorCode};
pub use types::*;
