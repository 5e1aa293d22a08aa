//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Cached media (images and videos share one prefix)
        .route("/images/*path", get(handlers::get_media))

        // Cache inspection
        .route("/api/v1/cache/stats", get(handlers::cache_stats))

        // `/images/*path` never matches an empty remainder
        .fallback(handlers::not_found)

        .with_state(state)
}
