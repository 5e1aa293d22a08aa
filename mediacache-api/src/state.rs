//! App state: cache roots, resolver, config.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use mediacache_core::{
    CacheRoots, MediaError, MediaLookup, MediaResolver, DEFAULT_IMAGE_CACHE_DIR,
    DEFAULT_VIDEO_CACHE_DIR,
};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Absolute image cache directory.
    pub image_cache_dir: PathBuf,
    /// Absolute video cache directory.
    pub video_cache_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_CACHE_DIR, DEFAULT_VIDEO_CACHE_DIR)
    }
}

impl ApiConfig {
    /// Creates a config from two cache directories.
    ///
    /// Relative directories are anchored at the current working directory.
    pub fn new(image_cache_dir: impl Into<PathBuf>, video_cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_cache_dir: absolutize(image_cache_dir.into()),
            video_cache_dir: absolutize(video_cache_dir.into()),
        }
    }

    /// Reads `IMAGE_CACHE_DIR` and `VIDEO_CACHE_DIR`, after loading `.env`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self::new(
            std::env::var("IMAGE_CACHE_DIR").unwrap_or_else(|_| DEFAULT_IMAGE_CACHE_DIR.into()),
            std::env::var("VIDEO_CACHE_DIR").unwrap_or_else(|_| DEFAULT_VIDEO_CACHE_DIR.into()),
        )
    }

    /// Checks the cache directories before serving.
    ///
    /// A missing directory is only a warning (the cacher creates it on first
    /// write). A path that exists but is not a directory is an error.
    pub fn validate(&self) -> Result<(), MediaError> {
        for (label, dir) in [("image", &self.image_cache_dir), ("video", &self.video_cache_dir)] {
            if dir.as_os_str().is_empty() {
                return Err(MediaError::Config(format!("{} cache directory is empty", label)));
            }
            if !dir.exists() {
                warn!(path = %dir.display(), "{} cache directory does not exist yet", label);
            } else if !dir.is_dir() {
                return Err(MediaError::Config(format!(
                    "{} cache path is not a directory: {}",
                    label,
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Cache roots for the resolver.
    pub fn cache_roots(&self) -> CacheRoots {
        CacheRoots::from_dirs(&self.image_cache_dir, &self.video_cache_dir)
    }
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.as_os_str().is_empty() || path.is_absolute() {
        return path;
    }
    std::path::absolute(&path).unwrap_or(path)
}

/// Shared state for all handlers.
pub struct AppState {
    /// Configuration the state was built from.
    pub config: ApiConfig,
    /// Resolver over the configured roots.
    pub resolver: MediaResolver,
    /// Lookup used by the media route.
    pub lookup: Arc<dyn MediaLookup>,
}

impl AppState {
    /// Builds the resolver from the config.
    pub fn new(config: ApiConfig) -> Self {
        let resolver = MediaResolver::new(config.cache_roots());

        Self {
            lookup: Arc::new(resolver.clone()),
            resolver,
            config,
        }
    }

    /// Replaces the lookup used by the media route, keeping everything else.
    pub fn with_lookup(mut self, lookup: Arc<dyn MediaLookup>) -> Self {
        self.lookup = lookup;
        self
    }

    /// Image cache directory.
    pub fn image_dir(&self) -> &Path {
        self.resolver.roots().image_dir()
    }

    /// Video cache directory.
    pub fn video_dir(&self) -> &Path {
        self.resolver.roots().video_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_relative_dirs_become_absolute() {
        let config = ApiConfig::new("cache/img", "cache/vid");
        assert!(config.image_cache_dir.is_absolute());
        assert!(config.image_cache_dir.ends_with("cache/img"));
        assert!(config.video_cache_dir.ends_with("cache/vid"));
    }

    #[test]
    fn test_validate_tolerates_missing_dirs() {
        let dir = tempdir().unwrap();
        let config = ApiConfig::new(dir.path().join("image"), dir.path().join("video"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_file_as_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let config = ApiConfig::new(&file, dir.path());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MediaError::Config(_)));
    }

    #[test]
    fn test_state_roots_follow_config() {
        let config = ApiConfig::new("/srv/image", "/srv/video");
        let state = AppState::new(config);
        assert_eq!(state.image_dir(), Path::new("/srv/image"));
        assert_eq!(state.video_dir(), Path::new("/srv/video"));
    }
}
