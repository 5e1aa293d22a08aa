//! DTOs for API responses.

use serde::Serialize;

use mediacache_core::{CacheStats, DirectoryStats};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Whether the image cache directory exists
    pub image_cache_ready: bool,
    /// Whether the video cache directory exists
    pub video_cache_ready: bool,
}

/// Cache statistics response.
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    /// Image cache
    pub image: DirectoryStats,
    /// Video cache
    pub video: DirectoryStats,
    /// Files across both caches
    pub total_files: u64,
    /// Bytes across both caches
    pub total_bytes: u64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            total_files: stats.total_files(),
            total_bytes: stats.total_bytes(),
            image: stats.image,
            video: stats.video,
        }
    }
}
