//! Input resolution.

pub mod compression;

use crate::error::{Error, Result};
use compression::detect_codec;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Open `path` for buffered reading, decompressing it when its suffix names a
/// registered codec.
///
/// # Errors
/// Returns [`Error::OpenInput`] if the file cannot be opened and
/// [`Error::Decompress`] if the codec cannot wrap it.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| Error::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;

    let reader: Box<dyn Read> = match detect_codec(path) {
        Some(codec) => {
            debug!(path = %path.display(), codec = codec.name(), "decompressing input");
            codec
                .wrap_reader(Box::new(file))
                .map_err(|source| Error::Decompress {
                    codec: codec.name().to_string(),
                    path: path.to_path_buf(),
                    source,
                })?
        }
        None => Box::new(file),
    };
    Ok(Box::new(BufReader::new(reader)))
}
