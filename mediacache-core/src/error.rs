//! Error types for media resolution.
//!
//! Two outcomes matter to callers: the file is not there ([`MediaError::NotFound`]),
//! or something else went wrong. [`MediaError::is_not_found`] is the single
//! classification point used at the HTTP boundary.

use std::io;

use thiserror::Error;

/// Result type alias using `MediaError`.
pub type Result<T> = std::result::Result<T, MediaError>;

/// Main error type for all media cache operations.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Sanitized filename was empty, or no regular file exists at the
    /// computed path. Carries the name that missed.
    #[error("File not found: {0}")]
    NotFound(String),

    /// Filesystem access failed for a reason other than absence.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid cache directory configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MediaError {
    /// Returns true if this error means "nothing to serve".
    ///
    /// An I/O error of kind `NotFound` (e.g. the file vanished between the
    /// existence check and the open) counts as a miss as well.
    pub fn is_not_found(&self) -> bool {
        match self {
            MediaError::NotFound(_) => true,
            MediaError::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
