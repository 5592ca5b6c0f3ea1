//! Mistral chat-completions client
//!
//! Stateless wrapper over `POST {base}/chat/completions`. Two operations:
//! a one-shot document analysis and a context-grounded chat answer. Each
//! call is a single attempt: no retry, no backoff, no timeout tuning beyond
//! the transport default. The API key is passed in at construction, never
//! read from ambient state.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{AppError, AppResult};

const MISTRAL_API_BASE: &str = "https://api.mistral.ai/v1";
const COMPLETION_MODEL: &str = "mistral-large-latest";
const TEMPERATURE: f32 = 0.7;
const ANALYZE_MAX_TOKENS: u32 = 2000;
const CHAT_MAX_TOKENS: u32 = 1000;

const ANALYZE_SYSTEM_PROMPT: &str = "You are an AI document analyzer. Analyze the following text and provide key insights, main topics, and a structured summary.";
const CHAT_SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions about documents. Use the provided document context to answer questions accurately. If the answer cannot be found in the document, say so clearly.";

pub struct MistralClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl MistralClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, MISTRAL_API_BASE)
    }

    /// Point the client at a different endpoint. Used by tests to target a
    /// local mock server.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// One-shot analysis of the full document text: key insights, main
    /// topics, and a structured summary.
    pub async fn analyze(&self, text: &str) -> AppResult<String> {
        info!(text_len = text.len(), "Requesting document analysis");
        self.complete(ANALYZE_SYSTEM_PROMPT, text, ANALYZE_MAX_TOKENS)
            .await
    }

    /// Answer a question grounded in the document context. The full context
    /// is resent on every turn; there is no incremental context.
    pub async fn chat(&self, question: &str, context: &str) -> AppResult<String> {
        info!(
            question_len = question.len(),
            context_len = context.len(),
            "Requesting chat answer"
        );
        let content = compose_chat_content(question, context);
        self.complete(CHAT_SYSTEM_PROMPT, &content, CHAT_MAX_TOKENS)
            .await
    }

    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = CompletionRequest {
            model: COMPLETION_MODEL,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            // The raw body is surfaced verbatim to the caller.
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Transport("completion contained no choices".to_string()))?;
        Ok(choice.message.content)
    }
}

/// The literal user-content composition for chat turns.
fn compose_chat_content(question: &str, context: &str) -> String {
    format!("Document context: {}\n\nQuestion: {}", context, question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_content_composition() {
        assert_eq!(
            compose_chat_content("What is X?", "doc text"),
            "Document context: doc text\n\nQuestion: What is X?"
        );
    }

    #[tokio::test]
    async fn test_analyze_success_returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "mistral-large-latest",
                "max_tokens": 2000,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [
                        { "message": { "role": "assistant", "content": "summary text" } }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = MistralClient::with_base_url("sk-test", &server.url());
        let result = client.analyze("anything").await.unwrap();
        assert_eq!(result, "summary text");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_200_surfaces_status_and_raw_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let client = MistralClient::with_base_url("sk-bad", &server.url());
        let err = client.analyze("anything").await.unwrap_err();
        assert!(matches!(err, AppError::Api { status: 401, .. }));
        assert_eq!(err.to_string(), "status code 401: unauthorized");
    }

    #[tokio::test]
    async fn test_chat_sends_exact_context_composition() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(json!({
                "max_tokens": 1000,
                "temperature": 0.7,
                "messages": [
                    { "role": "system", "content": CHAT_SYSTEM_PROMPT },
                    { "role": "user", "content": "Document context: doc text\n\nQuestion: What is X?" }
                ],
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [
                        { "message": { "role": "assistant", "content": "It is X." } }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = MistralClient::with_base_url("sk-test", &server.url());
        let answer = client.chat("What is X?", "doc text").await.unwrap();
        assert_eq!(answer, "It is X.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unparseable_success_body_is_a_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = MistralClient::with_base_url("sk-test", &server.url());
        let err = client.analyze("anything").await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_a_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "choices": [] }).to_string())
            .create_async()
            .await;

        let client = MistralClient::with_base_url("sk-test", &server.url());
        let err = client.analyze("anything").await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }
}
