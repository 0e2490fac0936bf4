//! Mock generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jotter_inference::mock::MockGenerationBackend;
//!
//! let backend = MockGenerationBackend::new().with_fixed_response("Short summary.");
//! let service = AugmentationService::with_backend(Arc::new(backend.clone()));
//! // ...
//! assert_eq!(backend.call_count(), 1);
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use jotter_core::{Error, GenerationBackend, GenerationOptions, Result};

/// A recorded call to the mock backend.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub prompt: String,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail(String),
}

/// Generation backend that returns a scripted reply and records every call.
#[derive(Clone)]
pub struct MockGenerationBackend {
    reply: MockReply,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockGenerationBackend {
    pub fn new() -> Self {
        Self {
            reply: MockReply::Text("Mock response".to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with this text to every call.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        self.reply = MockReply::Text(response.into());
        self
    }

    /// Fail every call with a provider error.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.reply = MockReply::Fail(message.into());
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.log().clone()
    }

    pub fn call_count(&self) -> usize {
        self.log().len()
    }

    fn log(&self) -> MutexGuard<'_, Vec<MockCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate_with_system(
        &self,
        system: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String> {
        self.log().push(MockCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
            options,
        });

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Fail(message) => Err(Error::Provider(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
