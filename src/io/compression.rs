//! Pluggable decompression for transparent input handling.
//!
//! Input files are matched against the registered codecs by file-name suffix.
//! A match wraps the file in the codec's decompressor; anything else is read
//! as-is. Detection is by name only: the leading bytes are never sniffed.
//!
//! ## Built-in Codecs
//!
//! When enabled via feature flags, the following codecs are available:
//! - **Gzip** (`.gz`) - via `flate2` crate (feature: `compression-gzip`)
//!
//! ## Custom Codec Implementation
//! ```
//! use arff2tree::io::compression::CompressionCodec;
//! use std::io::{Read, Result};
//!
//! struct Identity;
//!
//! impl CompressionCodec for Identity {
//!     fn name(&self) -> &str { "identity" }
//!
//!     fn extensions(&self) -> &[&str] { &[".raw"] }
//!
//!     fn wrap_reader(&self, reader: Box<dyn Read>) -> Result<Box<dyn Read>> {
//!         Ok(reader)
//!     }
//! }
//! ```

use std::io::Read;
use std::path::Path;

/// Pluggable decompression codec.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g., "gzip").
    fn name(&self) -> &str;

    /// File name suffixes associated with this codec (e.g., `&[".gz"]`).
    ///
    /// Suffixes include the leading dot and are lowercase.
    fn extensions(&self) -> &[&str];

    /// Wrap a reader with decompression.
    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>>;
}

/// Built-in codecs, in detection order.
static BUILTIN_CODECS: &[&dyn CompressionCodec] = &[
    #[cfg(feature = "compression-gzip")]
    &GzipCodec,
];

/// Find the codec whose suffix matches `path`, ignoring ASCII case.
#[must_use]
pub fn detect_codec(path: impl AsRef<Path>) -> Option<&'static dyn CompressionCodec> {
    let path_str = path.as_ref().to_string_lossy().to_lowercase();
    BUILTIN_CODECS
        .iter()
        .copied()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz"]
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        use flate2::read::MultiGzDecoder;
        Ok(Box::new(MultiGzDecoder::new(reader)))
    }
}
