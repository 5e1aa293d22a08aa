//! Constants shared by the resolver and the HTTP layer.
//!
//! Media types and response headers are fixed per media kind. They are never
//! derived from file content.

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Filename suffixes (lowercase, with the dot) that route a request to the
/// video cache. Everything else is served from the image cache.
pub const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".webm", ".mov", ".avi"];

/// Media type reported for every video, whatever the container.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Media type reported for every image, whatever the encoding.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE HEADERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Browser cache lifetime for served media (one day).
pub const CACHE_MAX_AGE_SECS: u64 = 86_400;

/// `Cache-Control` value attached to every served file.
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=86400";

/// `Access-Control-Allow-Origin` value attached to every served file.
pub const ALLOW_ORIGIN_VALUE: &str = "*";

/// Message returned to clients on a miss.
pub const NOT_FOUND_MESSAGE: &str = "File not found";

// ═══════════════════════════════════════════════════════════════════════════════
// DEFAULT LOCATIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default image cache directory, relative to the working directory.
pub const DEFAULT_IMAGE_CACHE_DIR: &str = "data/temp/image";

/// Default video cache directory, relative to the working directory.
pub const DEFAULT_VIDEO_CACHE_DIR: &str = "data/temp/video";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_control_matches_max_age() {
        assert_eq!(
            CACHE_CONTROL_VALUE,
            format!("public, max-age={}", CACHE_MAX_AGE_SECS)
        );
    }

    #[test]
    fn test_video_extensions_are_lowercase() {
        for ext in VIDEO_EXTENSIONS {
            assert!(ext.starts_with('.'));
            assert_eq!(ext, ext.to_lowercase());
        }
    }
}
