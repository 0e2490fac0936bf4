//! AI augmentation of notes: summaries, prompt-driven generation and
//! translation.
//!
//! One policy applies to every operation. Without a configured backend the
//! service returns a fixed placeholder tagged [`AugmentSource::Fallback`] and
//! never touches the network. With a backend it calls the provider exactly
//! once and tags the result [`AugmentSource::Provider`]. The two paths are
//! never mixed: a failing provider call is an error, not a fallback.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use jotter_core::{Config, Error, GenerationBackend, GenerationOptions, Result};

use crate::openai::OpenAIBackend;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are an assistant that writes a concise summary (max 50 words) for a personal note. Respond with the summary only.";

pub const GENERATE_SYSTEM_PROMPT: &str = "You are an assistant that writes a concise note based on the prompt. Return only JSON with keys 'title' and 'content'. Keep it practical and under 200 words.";

pub const TRANSLATE_SYSTEM_PROMPT: &str = "You are a helpful translator. Translate the provided note title and content into the target language.\n- Return only JSON in the shape: {\n  \"title\": \"...\",\n  \"content\": \"...\"\n}\n- Do not include explanations.";

pub const SUMMARY_FALLBACK: &str = "AI summarization is disabled. Provide an OPENAI_API_KEY in your environment to enable this feature.";

pub const GENERATE_FALLBACK_TITLE: &str = "AI Note (demo)";

pub const GENERATE_FALLBACK_CONTENT: &str =
    "AI generation is disabled. Provide an OPENAI_API_KEY to enable this feature.";

pub const TRANSLATE_FALLBACK_CONTENT: &str =
    "Translation unavailable. Provide an OPENAI_API_KEY to enable AI translation.";

/// Where an augmentation result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AugmentSource {
    #[serde(rename = "openai")]
    Provider,
    #[serde(rename = "fallback")]
    Fallback,
}

impl AugmentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provider => "openai",
            Self::Fallback => "fallback",
        }
    }
}

/// A note summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: String,
    pub source: AugmentSource,
}

/// A title and body produced by generation or translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub source: AugmentSource,
}

#[derive(Deserialize)]
struct DraftPayload {
    title: Option<String>,
    content: Option<String>,
}

/// Summarizes, generates and translates notes through an optional backend.
#[derive(Clone)]
pub struct AugmentationService {
    backend: Option<Arc<dyn GenerationBackend>>,
}

impl AugmentationService {
    /// A service that only ever returns fallbacks.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Build from configuration: an OpenAI backend if `OPENAI_API_KEY` is
    /// set, otherwise disabled.
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.openai_api_key {
            Some(key) => {
                let backend = OpenAIBackend::from_settings(&config.openai, key.clone())?;
                Ok(Self::with_backend(Arc::new(backend)))
            }
            None => {
                info!(
                    subsystem = "inference",
                    component = "augment",
                    "No OPENAI_API_KEY configured, AI features return fallbacks"
                );
                Ok(Self::disabled())
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Summarize a note in at most 50 words.
    pub async fn summarize(&self, title: &str, content: &str) -> Result<SummaryResult> {
        let Some(backend) = &self.backend else {
            debug!(
                subsystem = "inference",
                component = "augment",
                op = "summarize",
                source = "fallback",
                "Returning summary fallback"
            );
            return Ok(SummaryResult {
                summary: SUMMARY_FALLBACK.to_string(),
                source: AugmentSource::Fallback,
            });
        };

        let start = Instant::now();
        let prompt = format!("Title: {}\n\nBody: {}", title, content);
        let options = GenerationOptions::new().temperature(0.3).max_tokens(120);
        let text = backend
            .generate_with_system(SUMMARY_SYSTEM_PROMPT, &prompt, options)
            .await
            .map_err(|e| with_context(e, "Failed to generate summary"))?;

        let summary = text.trim();
        if summary.is_empty() {
            warn!(
                subsystem = "inference",
                component = "augment",
                op = "summarize",
                model = backend.model_name(),
                "Provider returned an empty summary"
            );
            return Err(Error::Provider(
                "OpenAI did not return a summary.".to_string(),
            ));
        }

        info!(
            subsystem = "inference",
            component = "augment",
            op = "summarize",
            source = "openai",
            model = backend.model_name(),
            response_len = summary.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Summary generated"
        );
        Ok(SummaryResult {
            summary: summary.to_string(),
            source: AugmentSource::Provider,
        })
    }

    /// Draft a new note from a free-text prompt.
    pub async fn generate_from_prompt(&self, prompt: &str) -> Result<NoteDraft> {
        let Some(backend) = &self.backend else {
            return Ok(NoteDraft {
                title: GENERATE_FALLBACK_TITLE.to_string(),
                content: GENERATE_FALLBACK_CONTENT.to_string(),
                source: AugmentSource::Fallback,
            });
        };

        let start = Instant::now();
        let options = GenerationOptions::new()
            .temperature(0.4)
            .max_tokens(500)
            .json_object();
        let text = backend
            .generate_with_system(GENERATE_SYSTEM_PROMPT, prompt, options)
            .await
            .map_err(|e| with_context(e, "OpenAI generation failed"))?;

        let draft = parse_draft(&text).ok_or_else(|| {
            Error::Provider("Failed to parse generation output from OpenAI.".to_string())
        })?;

        info!(
            subsystem = "inference",
            component = "augment",
            op = "generate",
            source = "openai",
            model = backend.model_name(),
            prompt_len = prompt.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Note generated from prompt"
        );
        Ok(draft)
    }

    /// Translate a note's title and content into `target`.
    pub async fn translate(&self, title: &str, content: &str, target: &str) -> Result<NoteDraft> {
        let Some(backend) = &self.backend else {
            return Ok(NoteDraft {
                title: format!("[{}] {}", target, title),
                content: TRANSLATE_FALLBACK_CONTENT.to_string(),
                source: AugmentSource::Fallback,
            });
        };

        let start = Instant::now();
        let prompt = format!(
            "Target language: {}\nTitle: {}\nContent: {}",
            target, title, content
        );
        let options = GenerationOptions::new()
            .temperature(0.2)
            .max_tokens(300)
            .json_object();
        let text = backend
            .generate_with_system(TRANSLATE_SYSTEM_PROMPT, &prompt, options)
            .await
            .map_err(|e| with_context(e, "OpenAI translation failed"))?;

        let draft = parse_draft(&text).ok_or_else(|| {
            Error::Provider("Failed to parse translation output from OpenAI.".to_string())
        })?;

        info!(
            subsystem = "inference",
            component = "augment",
            op = "translate",
            source = "openai",
            target_language = target,
            model = backend.model_name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Note translated"
        );
        Ok(draft)
    }
}

/// Parse `{"title", "content"}`, rejecting missing or blank keys.
fn parse_draft(text: &str) -> Option<NoteDraft> {
    let payload: DraftPayload = serde_json::from_str(text.trim()).ok()?;
    let title = payload.title.filter(|t| !t.trim().is_empty())?;
    let content = payload.content.filter(|c| !c.trim().is_empty())?;
    Some(NoteDraft {
        title,
        content,
        source: AugmentSource::Provider,
    })
}

fn with_context(err: Error, context: &str) -> Error {
    match err {
        Error::Provider(msg) => Error::Provider(format!("{}: {}", context, msg)),
        other => other,
    }
}
