//! Per-document session state
//!
//! A session holds the single normalized document text and the chat
//! transcript for one uploaded document. Sessions live in process memory
//! only and disappear when deleted or when the process restarts. The
//! registry is the one shared structure in the service; everything else
//! touches only its own arguments.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::extract::DocumentFormat;
use crate::types::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSession {
    pub id: Uuid,
    pub filename: String,
    pub format: DocumentFormat,
    /// Normalized document text; the standing context for every chat turn.
    pub text: String,
    /// Append-only within the session's lifetime.
    pub transcript: Vec<ChatMessage>,
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, DocumentSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(
        &self,
        filename: String,
        format: DocumentFormat,
        text: String,
    ) -> DocumentSession {
        let session = DocumentSession {
            id: Uuid::new_v4(),
            filename,
            format,
            text,
            transcript: Vec::new(),
        };
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> AppResult<DocumentSession> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or(AppError::SessionNotFound(id))
    }

    pub async fn document_text(&self, id: Uuid) -> AppResult<String> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|s| s.text.clone())
            .ok_or(AppError::SessionNotFound(id))
    }

    /// Append one user question and the assistant's answer, returning the
    /// new transcript length.
    pub async fn append_exchange(
        &self,
        id: Uuid,
        question: &str,
        answer: &str,
    ) -> AppResult<usize> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(AppError::SessionNotFound(id))?;
        session.transcript.push(ChatMessage::user(question));
        session.transcript.push(ChatMessage::assistant(answer));
        Ok(session.transcript.len())
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::SessionNotFound(id))
    }
}
