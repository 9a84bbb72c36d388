//! Acquisition of raw recording bytes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::ttyrec::DecodeError;

/// Failure to obtain or decode a recording.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read recording {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Read a recording file into memory.
pub fn read_recording<P: AsRef<Path>>(path: P) -> Result<Bytes, LoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read recording");
    Ok(Bytes::from(data))
}
