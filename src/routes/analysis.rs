//! One-shot AI analysis of a session's document text.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;
use uuid::Uuid;

use crate::llm::MistralClient;
use crate::models::{AnalysisResponse, AppState};
use crate::types::AppResult;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/documents/{id}/analysis", post(analyze_document))
        .with_state(state)
}

async fn analyze_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AnalysisResponse>> {
    // Key check comes first: a missing key must never reach the network.
    let api_key = state.config.llm.api_key()?;
    let text = state.sessions.document_text(id).await?;

    let client = MistralClient::new(api_key);
    let analysis = client.analyze(&text).await?;
    info!(session_id = %id, analysis_len = analysis.len(), "Analysis completed");

    Ok(Json(AnalysisResponse {
        session_id: id,
        analysis,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LlmConfig, ServerConfig};
    use crate::extract::DocumentFormat;
    use crate::types::AppError;

    fn state_without_key() -> AppState {
        AppState::new(Config {
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                cors_allowed_origins: vec![],
            },
            llm: LlmConfig {
                mistral_api_key: None,
            },
        })
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits_before_any_network_attempt() {
        let state = state_without_key();
        let session = state
            .sessions
            .create("report.pdf".to_string(), DocumentFormat::Pdf, "text".to_string())
            .await;

        let err = analyze_document(State(state), Path(session.id))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::MissingApiKey));
    }
}
