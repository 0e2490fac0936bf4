//! AI augmentation handlers: summary, translation and generation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use jotter_core::{CreateNoteRequest, Note, UpdateNoteRequest, ValidationErrors};
use jotter_inference::AugmentSource;

use super::parse_note_id;
use crate::error::{ApiError, AppJson};
use crate::AppState;

/// A note together with the provenance of its AI-produced fields.
#[derive(Debug, Serialize)]
pub struct AugmentedNote {
    pub note: Note,
    pub source: AugmentSource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBody {
    pub target: Option<String>,
    #[serde(default)]
    pub save_as_new: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub prompt: Option<String>,
    /// Anything other than an array is treated as no tags.
    #[serde(default)]
    pub tags: Value,
}

pub async fn summarize_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_note_id(&id)?;
    let note = state
        .notes
        .get(id)
        .await?
        .ok_or_else(ApiError::note_not_found)?;

    let result = state.augment.summarize(&note.title, &note.content).await?;
    let note = state
        .notes
        .update(id, UpdateNoteRequest::summary(result.summary))
        .await?;

    Ok(Json(AugmentedNote {
        note,
        source: result.source,
    }))
}

pub async fn translate_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<TranslateBody>,
) -> Result<impl IntoResponse, ApiError> {
    let target = body
        .target
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing 'target' language code".to_string()))?;

    let id = parse_note_id(&id)?;
    let note = state
        .notes
        .get(id)
        .await?
        .ok_or_else(ApiError::note_not_found)?;

    let draft = state
        .augment
        .translate(&note.title, &note.content, &target)
        .await
        .map_err(ApiError::provider_as_bad_request)?;

    if body.save_as_new {
        let created = state
            .notes
            .create(CreateNoteRequest {
                title: draft.title,
                content: draft.content,
                tags: note.tags,
            })
            .await?;
        return Ok((
            StatusCode::CREATED,
            Json(AugmentedNote {
                note: created,
                source: draft.source,
            }),
        ));
    }

    let updated = state
        .notes
        .update(
            id,
            UpdateNoteRequest::title_and_content(draft.title, draft.content),
        )
        .await?;
    Ok((
        StatusCode::OK,
        Json(AugmentedNote {
            note: updated,
            source: draft.source,
        }),
    ))
}

pub async fn generate_note(
    State(state): State<AppState>,
    AppJson(body): AppJson<GenerateBody>,
) -> Result<impl IntoResponse, ApiError> {
    let prompt = body
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing 'prompt'".to_string()))?;
    let tags = tags_from_value(body.tags)?;

    let draft = state
        .augment
        .generate_from_prompt(&prompt)
        .await
        .map_err(ApiError::provider_as_bad_request)?;

    let note = state
        .notes
        .create(CreateNoteRequest {
            title: draft.title,
            content: draft.content,
            tags,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AugmentedNote {
            note,
            source: draft.source,
        }),
    ))
}

fn tags_from_value(value: Value) -> Result<Vec<String>, ApiError> {
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(tag) => Ok(tag),
            _ => Err(ApiError::Validation(ValidationErrors::single(
                "tags",
                "must be an array of strings",
            ))),
        })
        .collect()
}
