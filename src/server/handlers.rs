use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::{ApiError, NUMERIC_ID_EXPECTED};
use super::AppState;
use crate::entity::{DeleteAcknowledgement, Note, NoteInput};
use crate::storage::NoteStore;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = with_store(&state, |store| Ok(store.list()?)).await?;
    debug!(count = notes.len(), "listed notes");
    Ok(Json(notes))
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_id(&raw_id)?;
    let note = with_store(&state, move |store| Ok(store.get(id)?)).await?;
    Ok(Json(note))
}

pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(input) = payload.map_err(body_error)?;
    let note = with_store(&state, move |store| Ok(store.create(&input)?)).await?;
    info!(id = note.id, "created note");
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_id(&raw_id)?;
    let input = payload.map(|Json(input)| input).map_err(body_error);
    let note = with_store(&state, move |store| {
        // an unknown id outranks a body that could not be read
        let input = match input {
            Ok(input) => input,
            Err(err) => {
                store.get(id)?;
                return Err(err);
            }
        };
        Ok(store.update(id, &input)?)
    })
    .await?;
    info!(id, "updated note");
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteAcknowledgement>, ApiError> {
    let id = parse_id(&raw_id)?;
    with_store(&state, move |store| Ok(store.delete(id)?)).await?;
    info!(id, "deleted note");
    Ok(Json(DeleteAcknowledgement::single()))
}

/// Run `op` against the locked store on the blocking pool.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut NoteStore) -> Result<T, ApiError> + Send + 'static,
{
    let mut store = state.store.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || op(&mut *store))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(NUMERIC_ID_EXPECTED.to_string()))
}

fn body_error(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}
