//! API Routes
//!
//! HTTP endpoints for the document pipeline:
//! - `POST /api/documents` - upload a document, extract and normalize its text
//! - `GET /api/documents/{id}` - session snapshot (text + transcript)
//! - `DELETE /api/documents/{id}` - discard a session
//! - `POST /api/documents/{id}/analysis` - one-shot AI analysis
//! - `POST /api/documents/{id}/chat` - chat grounded in the document text
//! - `GET /api/health` - health check

pub mod analysis;
pub mod chat;
pub mod documents;
pub mod health;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origins: Vec<HeaderValue> = state
        .config
        .server
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(documents::router(state.clone()))
        .merge(analysis::router(state.clone()))
        .merge(chat::router(state.clone()))
        .merge(health::router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
