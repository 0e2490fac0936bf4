//! # jotter-api
//!
//! HTTP surface for jotter: note CRUD, AI augmentation and health.
//!
//! The router is built from an [`AppState`] so that tests can drive it
//! in-process over any [`NoteRepository`].

pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method, Request};
use axum::routing::{get, post};
use axum::Router;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use jotter_core::{Config, NoteRepository};
use jotter_inference::AugmentationService;

/// Default request body limit.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notes: Arc<dyn NoteRepository>,
    pub augment: AugmentationService,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        notes: Arc<dyn NoteRepository>,
        augment: AugmentationService,
    ) -> Self {
        Self {
            config,
            notes,
            augment,
        }
    }
}

/// HTTP middleware settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// `None` allows any origin.
    pub allowed_origins: Option<Vec<HeaderValue>>,
    pub max_body_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            allowed_origins: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl HttpSettings {
    /// Read `CORS_ALLOWED_ORIGINS` and `MAX_BODY_BYTES`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .filter(|v| !v.trim().is_empty())
            .map(|v| parse_allowed_origins(&v));

        let max_body_bytes = lookup("MAX_BODY_BYTES")
            .and_then(|v| match v.trim().parse::<usize>() {
                Ok(n) => Some(n),
                Err(_) => {
                    tracing::warn!(value = %v, "Invalid MAX_BODY_BYTES, using default");
                    None
                }
            })
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Self {
            allowed_origins,
            max_body_bytes,
        }
    }
}

fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

fn cors_layer(settings: &HttpSettings) -> CorsLayer {
    match &settings.allowed_origins {
        None => CorsLayer::permissive(),
        Some(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins.clone()))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(3600)),
    }
}

/// Build the application router.
pub fn router(state: AppState, settings: &HttpSettings) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route("/notes/generate", post(handlers::ai::generate_note))
        .route(
            "/notes/:id",
            get(handlers::notes::get_note)
                .patch(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        .route("/notes/:id/summary", post(handlers::ai::summarize_note))
        .route("/notes/:id/translate", post(handlers::ai::translate_note))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(settings))
        .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
        .with_state(state)
}
