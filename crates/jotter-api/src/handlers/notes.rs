//! Note CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use jotter_core::{CreateNoteRequest, Note, UpdateNoteRequest};

use super::parse_note_id;
use crate::error::{ApiError, AppJson};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct NoteList {
    pub notes: Vec<Note>,
}

pub async fn list_notes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let notes = state.notes.list().await?;
    Ok(Json(NoteList { notes }))
}

pub async fn create_note(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.notes.create(body).await?;
    info!(
        subsystem = "api",
        component = "notes",
        op = "create",
        note_id = %note.id,
        "Note created"
    );
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_note_id(&id)?;
    let note = state
        .notes
        .get(id)
        .await?
        .ok_or_else(ApiError::note_not_found)?;
    Ok(Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_note_id(&id)?;
    let note = state.notes.update(id, body).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_note_id(&id)?;
    state.notes.delete(id).await?;
    info!(
        subsystem = "api",
        component = "notes",
        op = "delete",
        note_id = %id,
        "Note deleted"
    );
    Ok(Json(json!({ "success": true })))
}
