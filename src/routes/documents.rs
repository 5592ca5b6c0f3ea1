//! Document upload and session lifecycle.

use axum::extract::{Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;
use uuid::Uuid;

use crate::extract::{self, UploadedDocument};
use crate::models::{AppState, SessionResponse, UploadResponse};
use crate::normalize::normalize;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/documents", post(upload_document))
        .route(
            "/api/documents/{id}",
            get(get_session).delete(delete_session),
        )
        .with_state(state)
}

/// Accepts one multipart file field, extracts its text, normalizes it, and
/// opens a fresh session around the result. The raw bytes are dropped when
/// this handler returns; only the normalized text is retained.
async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let document = read_uploaded_file(&mut multipart).await?;
    info!(filename = %document.filename, size = document.bytes.len(), "Document uploaded");

    let extracted = extract::extract(&document)?;
    let text = normalize(&extracted);

    let format = document.format();
    let session = state
        .sessions
        .create(document.filename, format, text)
        .await;
    info!(session_id = %session.id, characters = session.text.len(), "Session created");

    Ok(Json(UploadResponse {
        session_id: session.id,
        filename: session.filename,
        format: session.format,
        characters: session.text.len(),
        text: session.text,
    }))
}

async fn read_uploaded_file(multipart: &mut Multipart) -> AppResult<UploadedDocument> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|name| name.to_string()) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("failed to read upload: {}", e)))?;
        return Ok(UploadedDocument::new(filename, bytes.to_vec()));
    }
    Err(AppError::InvalidRequest(
        "no file field in upload".to_string(),
    ))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let session = state.sessions.get(id).await?;
    Ok(Json(SessionResponse {
        session_id: session.id,
        filename: session.filename,
        format: session.format,
        text: session.text,
        transcript: session.transcript,
    }))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state.sessions.remove(id).await?;
    info!(session_id = %id, "Session discarded");
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
