// Shared application state and API payload types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::extract::DocumentFormat;
use crate::session::{ChatMessage, SessionRegistry};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: SessionRegistry::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub session_id: Uuid,
    pub filename: String,
    pub format: DocumentFormat,
    pub characters: usize,
    /// The normalized document text, echoed back for display.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub filename: String,
    pub format: DocumentFormat,
    pub text: String,
    pub transcript: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub session_id: Uuid,
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub answer: String,
    pub transcript_len: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub ai_configured: bool,
}
