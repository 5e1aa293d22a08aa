//! Read-only statistics over the cache directories.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::debug;

use crate::error::Result;

/// File count and size of one cache directory.
///
/// Only regular files directly inside the directory are counted; the
/// resolver never serves anything deeper.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    /// Directory that was scanned.
    pub path: PathBuf,
    /// Whether the directory exists.
    pub exists: bool,
    /// Number of regular files.
    pub file_count: u64,
    /// Sum of file sizes in bytes.
    pub total_bytes: u64,
}

impl DirectoryStats {
    /// Scans the top level of a directory.
    ///
    /// A missing directory is reported with `exists: false` rather than as an
    /// error, since the external cacher creates it lazily.
    pub async fn scan(path: &Path) -> Result<Self> {
        let mut stats = DirectoryStats {
            path: path.to_path_buf(),
            ..Default::default()
        };

        let mut entries = match fs::read_dir(path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(stats),
            Err(e) => return Err(e.into()),
        };
        stats.exists = true;

        while let Some(entry) = entries.next_entry().await? {
            let meta = match entry.metadata().await {
                Ok(meta) => meta,
                // Evicted mid-scan.
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if meta.is_file() {
                stats.file_count += 1;
                stats.total_bytes += meta.len();
            }
        }

        debug!(path = %path.display(), files = stats.file_count, bytes = stats.total_bytes, "Scanned cache directory");
        Ok(stats)
    }
}

/// Statistics for both caches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Image cache.
    pub image: DirectoryStats,
    /// Video cache.
    pub video: DirectoryStats,
}

impl CacheStats {
    /// Total files across both caches.
    pub fn total_files(&self) -> u64 {
        self.image.file_count + self.video.file_count
    }

    /// Total bytes across both caches.
    pub fn total_bytes(&self) -> u64 {
        self.image.total_bytes + self.video.total_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_scan_counts_top_level_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"12345").unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"123").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("deep.jpg"), b"ignored").unwrap();

        let stats = DirectoryStats::scan(dir.path()).await.unwrap();
        assert!(stats.exists);
        assert_eq!(stats.file_count, 2);
        assert_eq!(stats.total_bytes, 8);
    }

    #[tokio::test]
    async fn test_scan_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let stats = DirectoryStats::scan(&missing).await.unwrap();
        assert!(!stats.exists);
        assert_eq!(stats.file_count, 0);
        assert_eq!(stats.path, missing);
    }

    #[test]
    fn test_totals() {
        let stats = CacheStats {
            image: DirectoryStats {
                file_count: 2,
                total_bytes: 10,
                ..Default::default()
            },
            video: DirectoryStats {
                file_count: 1,
                total_bytes: 100,
                ..Default::default()
            },
        };
        assert_eq!(stats.total_files(), 3);
        assert_eq!(stats.total_bytes(), 110);
    }
}
