// Shared error type for the extraction and completion pipeline

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The uploaded filename carries an extension we do not handle.
    /// Recoverable: the user re-uploads a supported format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The bytes could not be decoded as the declared format.
    /// Fatal for the single request that carried them, nothing else.
    #[error("failed to extract text: {0}")]
    Extraction(String),

    /// Non-200 from the completion endpoint. The raw body is surfaced
    /// verbatim so the caller can render it inline.
    #[error("status code {status}: {body}")]
    Api { status: u16, body: String },

    /// Network or parse failure talking to the completion endpoint.
    #[error("transport error: {0}")]
    Transport(String),

    /// MISTRAL_API_KEY is absent. AI actions are unavailable until it is
    /// configured; extraction and session reads still work.
    #[error("MISTRAL_API_KEY is not set; configure it to enable AI features")]
    MissingApiKey,

    #[error("no document session with id {0}")]
    SessionNotFound(uuid::Uuid),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Api { .. } | AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
