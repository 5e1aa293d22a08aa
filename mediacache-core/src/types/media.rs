//! Media classification and resolution results.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs::File;

use super::SafeFileName;
use crate::constants::{
    ALLOW_ORIGIN_VALUE, CACHE_CONTROL_VALUE, IMAGE_CONTENT_TYPE, VIDEO_CONTENT_TYPE,
    VIDEO_EXTENSIONS,
};
use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// MEDIA KIND
// ═══════════════════════════════════════════════════════════════════════════════

/// Which cache a file lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Served from the image cache as `image/jpeg`.
    Image,
    /// Served from the video cache as `video/mp4`.
    Video,
}

impl MediaKind {
    /// Classifies a sanitized filename by its extension.
    pub fn classify(name: &SafeFileName) -> Self {
        Self::from_file_name(name.as_str())
    }

    /// Classifies a raw filename by its extension, case-insensitively.
    ///
    /// Anything that is not a known video suffix is an image, including
    /// names with no extension at all.
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    /// Media type sent as `Content-Type`.
    ///
    /// Fixed per kind: a `.webm` video is still reported as `video/mp4`,
    /// a `.png` image as `image/jpeg`. Existing clients rely on this.
    pub fn content_type(self) -> &'static str {
        match self {
            MediaKind::Image => IMAGE_CONTENT_TYPE,
            MediaKind::Video => VIDEO_CONTENT_TYPE,
        }
    }

    /// Lowercase label, used in logs and stats output.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVED MEDIA
// ═══════════════════════════════════════════════════════════════════════════════

/// A cache hit: a regular file that exists under one of the cache roots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedMedia {
    /// Absolute path of the file (cache root joined with `file_name`).
    pub path: PathBuf,
    /// Sanitized name used for the lookup.
    pub file_name: SafeFileName,
    /// Cache the file was found in.
    pub kind: MediaKind,
    /// File size in bytes at resolution time.
    pub len: u64,
}

impl ResolvedMedia {
    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Media type for the `Content-Type` header.
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    /// Extra response headers sent with every hit.
    pub fn headers(&self) -> [(&'static str, &'static str); 2] {
        [
            ("cache-control", CACHE_CONTROL_VALUE),
            ("access-control-allow-origin", ALLOW_ORIGIN_VALUE),
        ]
    }

    /// Opens the file for streaming.
    ///
    /// The file may have been evicted since resolution; that surfaces as an
    /// I/O error whose [`is_not_found`](crate::MediaError::is_not_found) is true.
    pub async fn open(&self) -> Result<File> {
        Ok(File::open(&self.path).await?)
    }
}
