//! Domain types for media resolution.
//!
//! - [`SafeFileName`]: sanitized final path component of a request
//! - [`MediaKind`]: image or video, decided by extension
//! - [`ResolvedMedia`]: a cache hit ready to be streamed

mod filename;
mod media;

pub use filename::*;
pub use media::*;
