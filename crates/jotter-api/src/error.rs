//! HTTP error mapping.
//!
//! Every error body is `{"message": "..."}`. Validation failures also carry
//! `"errors": [{"field", "message"}]`.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use jotter_core::{Error, ValidationErrors};

pub const NOTE_NOT_FOUND: &str = "Note not found";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn note_not_found() -> Self {
        ApiError::NotFound(NOTE_NOT_FOUND.to_string())
    }

    /// Like `From<Error>`, but provider failures are the client's problem.
    ///
    /// Used by the translate and generate endpoints.
    pub fn provider_as_bad_request(err: Error) -> Self {
        match err {
            Error::Provider(msg) => ApiError::BadRequest(msg),
            other => other.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(errors) => ApiError::Validation(errors),
            Error::NoteNotFound(_) => ApiError::note_not_found(),
            Error::Provider(msg) => ApiError::Internal(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationErrors::single("body", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(errors) => json!({
                "message": Error::Validation(errors.clone()).to_string(),
                "errors": errors,
            }),
            ApiError::Internal(msg) => {
                tracing::error!(subsystem = "api", error = %msg, "Request failed");
                json!({ "message": msg })
            }
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => json!({ "message": msg }),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON extractor whose rejections are validation errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(Error::Validation(ValidationErrors::single("title", "x"))),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(Error::NoteNotFound(Uuid::nil())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(Error::Provider("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(Error::Config("DATABASE_URL is not set".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::provider_as_bad_request(Error::Provider("down".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::provider_as_bad_request(Error::NoteNotFound(Uuid::nil())),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "{:?}", err);
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::from(Error::NoteNotFound(Uuid::nil()));
        assert_eq!(err.to_string(), NOTE_NOT_FOUND);
    }
}
