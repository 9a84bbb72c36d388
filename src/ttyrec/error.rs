//! Recording decode errors.

/// Boxed error returned by a [`Decompress`](super::Decompress) implementation.
pub type DecompressError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while decoding a ttyrec container.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Recording is truncated: record at offset {offset} needs {needed} bytes, only {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Recording is gzip-compressed but no decompressor is configured")]
    CompressionUnsupported,

    #[error("Failed to decompress recording: {0}")]
    DecompressionFailed(#[source] DecompressError),
}
