use anyhow::Result;
use serde::Deserialize;
use std::env;

use crate::types::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Absent until the operator sets MISTRAL_API_KEY. Checked before any
    /// network attempt so a missing key never shows up as a transport error.
    pub mistral_api_key: Option<String>,
}

impl LlmConfig {
    pub fn api_key(&self) -> AppResult<&str> {
        self.mistral_api_key
            .as_deref()
            .ok_or(AppError::MissingApiKey)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            llm: LlmConfig {
                mistral_api_key: env::var("MISTRAL_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
            },
        })
    }
}
