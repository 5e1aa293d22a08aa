//! Common traits for media resolution.
//!
//! These traits are the seams between the resolver, the processes that fill
//! the caches, and the HTTP layer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ResolvedMedia;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE DIRECTORY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A directory populated by an external caching process.
///
/// The resolver only ever reads from it. Implementations might be:
/// - a fixed path from configuration
/// - a handle owned by the image or video downloader
pub trait CacheDirectory: Send + Sync {
    /// Absolute path of the cache directory.
    fn cache_dir(&self) -> &Path;
}

impl CacheDirectory for PathBuf {
    fn cache_dir(&self) -> &Path {
        self.as_path()
    }
}

impl<T: CacheDirectory + ?Sized> CacheDirectory for std::sync::Arc<T> {
    fn cache_dir(&self) -> &Path {
        (**self).cache_dir()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOOKUP TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for turning an untrusted request path into a servable file.
#[async_trait]
pub trait MediaLookup: Send + Sync {
    /// Resolves a request path to a file in one of the caches.
    ///
    /// Returns [`MediaError::NotFound`](crate::MediaError::NotFound) on a miss.
    async fn resolve(&self, requested_path: &str) -> Result<ResolvedMedia>;
}
