//! API route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, State},
    http::{self, header, StatusCode},
    response::Response,
    Json,
};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use mediacache_core::{MediaError, NOT_FOUND_MESSAGE};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /images/*path
///
/// Serves a file from the image or video cache. Only the last segment of
/// `path` is used; everything before it is discarded.
pub async fn get_media(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    let Path(path) = path.map_err(|rejection| match rejection {
        // Undecodable request text cannot name a cached file.
        PathRejection::FailedToDeserializePathParams(e) => {
            warn!(error = %e, "Undecodable media path");
            ApiError::not_found(NOT_FOUND_MESSAGE)
        }
        other => ApiError::internal(other.body_text()),
    })?;

    let media = state.lookup.resolve(&path).await?;
    let file = media.open().await?;
    // The cacher may rewrite the file after resolution; measure what was opened.
    let len = file.metadata().await.map_err(MediaError::Io)?.len();

    let mut builder = http::Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, media.content_type())
        .header(header::CONTENT_LENGTH, len);
    for (name, value) in media.headers() {
        builder = builder.header(name, value);
    }

    let response = builder.body(Body::from_stream(ReaderStream::new(file)))?;

    debug!(file = %media.file_name, bytes = len, "Streaming cached media");
    Ok(response)
}

/// Fallback for every unmatched route, including `/images/` with nothing
/// after the prefix.
pub async fn not_found() -> ApiError {
    ApiError::not_found(NOT_FOUND_MESSAGE)
}

/// GET /api/v1/cache/stats
pub async fn cache_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CacheStatsResponse>> {
    let stats = state.resolver.stats().await?;
    Ok(Json(CacheStatsResponse::from(stats)))
}

static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// GET /health
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Json<HealthResponse> {
    let start = START_TIME.get_or_init(Instant::now);
    let uptime = start.elapsed().as_secs();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: uptime,
        image_cache_ready: state.image_dir().is_dir(),
        video_cache_ready: state.video_dir().is_dir(),
    })
}
