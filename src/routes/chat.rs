//! Chat grounded in a session's document text.
//!
//! Every turn resends the full document context; the transcript is appended
//! to only after a successful answer, so a failed call leaves the session
//! exactly as it was.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;
use uuid::Uuid;

use crate::llm::MistralClient;
use crate::models::{AppState, ChatRequest, ChatResponse};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/documents/{id}/chat", post(chat_with_document))
        .with_state(state)
}

async fn chat_with_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(AppError::InvalidRequest("question is empty".to_string()));
    }

    // Key check comes first: a missing key must never reach the network.
    let api_key = state.config.llm.api_key()?;
    let context = state.sessions.document_text(id).await?;

    let client = MistralClient::new(api_key);
    let answer = client.chat(question, &context).await?;

    let transcript_len = state.sessions.append_exchange(id, question, &answer).await?;
    info!(session_id = %id, transcript_len, "Chat turn completed");

    Ok(Json(ChatResponse {
        session_id: id,
        answer,
        transcript_len,
    }))
}
