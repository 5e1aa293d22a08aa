//! Safe media resolver.
//!
//! Maps an untrusted request path onto a file directly inside the image or
//! video cache root. Only the sanitized final component of the request is
//! ever joined onto a root, so a lookup cannot leave either directory.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, error, instrument, warn};

use crate::error::{MediaError, Result};
use crate::stats::{CacheStats, DirectoryStats};
use crate::traits::{CacheDirectory, MediaLookup};
use crate::types::{MediaKind, ResolvedMedia, SafeFileName};

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE ROOTS
// ═══════════════════════════════════════════════════════════════════════════════

/// The two cache directories the resolver reads from.
///
/// Injected at construction so the resolver holds no ambient state.
#[derive(Clone)]
pub struct CacheRoots {
    image: Arc<dyn CacheDirectory>,
    video: Arc<dyn CacheDirectory>,
}

impl CacheRoots {
    /// Creates roots from two cache directory providers.
    pub fn new(image: impl CacheDirectory + 'static, video: impl CacheDirectory + 'static) -> Self {
        Self {
            image: Arc::new(image),
            video: Arc::new(video),
        }
    }

    /// Creates roots from two fixed paths.
    pub fn from_dirs(image: impl Into<PathBuf>, video: impl Into<PathBuf>) -> Self {
        Self::new(image.into(), video.into())
    }

    /// Image cache directory.
    pub fn image_dir(&self) -> &Path {
        self.image.cache_dir()
    }

    /// Video cache directory.
    pub fn video_dir(&self) -> &Path {
        self.video.cache_dir()
    }

    /// Directory that holds files of the given kind.
    pub fn dir_for(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Image => self.image_dir(),
            MediaKind::Video => self.video_dir(),
        }
    }
}

impl std::fmt::Debug for CacheRoots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRoots")
            .field("image", &self.image_dir())
            .field("video", &self.video_dir())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVER
// ═══════════════════════════════════════════════════════════════════════════════

/// A planned lookup: where a request would be looked for, before touching
/// the filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lookup {
    /// Sanitized filename.
    pub file_name: SafeFileName,
    /// Cache selected by extension.
    pub kind: MediaKind,
    /// `root / file_name`.
    pub path: PathBuf,
}

/// Stateless resolver over a pair of cache roots.
///
/// Cheap to clone and safe to share between any number of concurrent
/// requests.
#[derive(Clone, Debug)]
pub struct MediaResolver {
    roots: CacheRoots,
}

impl MediaResolver {
    /// Creates a resolver over the given cache roots.
    pub fn new(roots: CacheRoots) -> Self {
        Self { roots }
    }

    /// Returns the cache roots.
    pub fn roots(&self) -> &CacheRoots {
        &self.roots
    }

    /// Computes the candidate path for a request without any I/O.
    ///
    /// Returns `None` when the request has no usable filename.
    pub fn plan(&self, requested_path: &str) -> Option<Lookup> {
        let file_name = SafeFileName::from_request(requested_path)?;
        let kind = MediaKind::classify(&file_name);
        let path = self.roots.dir_for(kind).join(&file_name);
        Some(Lookup {
            file_name,
            kind,
            path,
        })
    }

    /// Resolves a request path to a regular file in the matching cache.
    ///
    /// # Errors
    /// - [`MediaError::NotFound`] if the filename is unusable, or no regular
    ///   file exists at the computed path
    /// - [`MediaError::Io`] for any other filesystem failure
    #[instrument(skip(self), level = "debug")]
    pub async fn resolve(&self, requested_path: &str) -> Result<ResolvedMedia> {
        let Some(lookup) = self.plan(requested_path) else {
            warn!(requested = %requested_path, "No usable filename in request");
            return Err(MediaError::NotFound(requested_path.to_string()));
        };

        match fs::metadata(&lookup.path).await {
            Ok(meta) if meta.is_file() => {
                debug!(path = %lookup.path.display(), kind = lookup.kind.as_str(), "Serving cached file");
                Ok(ResolvedMedia {
                    path: lookup.path,
                    file_name: lookup.file_name,
                    kind: lookup.kind,
                    len: meta.len(),
                })
            }
            Ok(_) => {
                warn!(file = %lookup.file_name, "Not a regular file");
                Err(MediaError::NotFound(lookup.file_name.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(file = %lookup.file_name, "Not found");
                Err(MediaError::NotFound(lookup.file_name.to_string()))
            }
            Err(e) => {
                error!(path = %lookup.path.display(), error = %e, "Lookup failed");
                Err(MediaError::Io(e))
            }
        }
    }

    /// Collects file counts and sizes for both cache roots.
    pub async fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats {
            image: DirectoryStats::scan(self.roots.image_dir()).await?,
            video: DirectoryStats::scan(self.roots.video_dir()).await?,
        })
    }
}

#[async_trait]
impl MediaLookup for MediaResolver {
    async fn resolve(&self, requested_path: &str) -> Result<ResolvedMedia> {
        MediaResolver::resolve(self, requested_path).await
    }
}
