//! Compression detection and the pluggable decompression transform.

use super::error::DecompressError;

/// Big-endian gzip magic at offset 0 of a compressed container.
pub const GZIP_MAGIC: u16 = 0x1F8B;

/// Whether the buffer starts with the gzip magic.
pub fn is_gzip(raw: &[u8]) -> bool {
    match raw {
        [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]) == GZIP_MAGIC,
        _ => false,
    }
}

/// A byte transform that inflates a compressed container.
///
/// The decoder hands over the whole raw buffer (magic included) and
/// re-reads the returned bytes from offset 0.
pub trait Decompress: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Inflate `raw` into a fresh buffer.
    fn decompress(&self, raw: &[u8]) -> Result<Vec<u8>, DecompressError>;
}

impl<F> Decompress for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, DecompressError> + Send + Sync,
{
    fn name(&self) -> &'static str {
        "custom"
    }

    fn decompress(&self, raw: &[u8]) -> Result<Vec<u8>, DecompressError> {
        self(raw)
    }
}

/// gzip decompressor backed by `flate2`.
#[cfg(feature = "gzip")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Gzip;

#[cfg(feature = "gzip")]
impl Decompress for Gzip {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn decompress(&self, raw: &[u8]) -> Result<Vec<u8>, DecompressError> {
        use std::io::Read;

        let mut out = Vec::with_capacity(raw.len().saturating_mul(4));
        flate2::read::GzDecoder::new(raw).read_to_end(&mut out)?;
        Ok(out)
    }
}
