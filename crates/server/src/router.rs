//! HTTP router construction.
//!
//! Assembles the document routes and middleware into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api;
use crate::state::AppState;

/// Upload ceiling enforced before any handler runs (50 MiB).
pub const MAX_CONTENT_LENGTH: usize = 50 * 1024 * 1024;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(api::health).post(api::health))
        .route("/extract", post(api::extract))
        .route("/summarize", post(api::summarize))
        .route("/ask", post(api::ask))
        .layer(DefaultBodyLimit::max(MAX_CONTENT_LENGTH))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the configured origin; `*` allows everything.
pub fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            warn!("Invalid CORS_ORIGIN '{}': {}; falling back to permissive CORS", origin, e);
            CorsLayer::permissive()
        }
    }
}
