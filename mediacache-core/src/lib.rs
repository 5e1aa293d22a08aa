//! # Mediacache Core
//!
//! Path-safe resolution of media requests against two on-disk caches, one
//! for images and one for videos.
//!
//! This crate provides:
//!
//! - **Types**: sanitized filenames, media kinds, resolution results
//! - **Resolver**: the stateless lookup from request path to cached file
//! - **Errors**: the not-found / internal split the HTTP layer relies on
//! - **Traits**: cache directory providers and the lookup interface
//!
//! ## Example
//!
//! ```rust,no_run
//! use mediacache_core::{CacheRoots, MediaResolver};
//!
//! # async fn demo() -> mediacache_core::Result<()> {
//! let resolver = MediaResolver::new(CacheRoots::from_dirs(
//!     "/srv/cache/image",
//!     "/srv/cache/video",
//! ));
//!
//! // Directory segments are discarded; only `abc.jpg` is looked up.
//! let media = resolver.resolve("../../abc.jpg").await?;
//! assert_eq!(media.content_type(), "image/jpeg");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod resolver;
pub mod stats;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{MediaError, Result};
pub use resolver::{CacheRoots, Lookup, MediaResolver};
pub use stats::{CacheStats, DirectoryStats};
pub use traits::*;
pub use types::*;
