//! Record scanner.

use std::sync::Arc;

use bytes::Bytes;

use super::compression::{is_gzip, Decompress};
use super::error::DecodeError;
use super::{Frame, FrameSequence};

/// Size of a record header: `sec`, `usec`, `length` as little-endian u32.
pub const HEADER_LEN: usize = 12;

/// Decodes raw ttyrec containers into frame sequences.
///
/// Holds the optional decompression transform used when the input
/// carries the gzip magic.
#[derive(Clone, Default)]
pub struct Decoder {
    decompressor: Option<Arc<dyn Decompress>>,
}

impl std::fmt::Debug for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("decompressor", &self.decompressor.as_ref().map(|d| d.name()))
            .finish()
    }
}

impl Decoder {
    /// Decoder without decompression support.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder using `decompressor` for gzipped input.
    pub fn with_decompressor(decompressor: impl Decompress + 'static) -> Self {
        Self {
            decompressor: Some(Arc::new(decompressor)),
        }
    }

    /// Decoder with the built-in gzip support.
    #[cfg(feature = "gzip")]
    pub fn with_gzip() -> Self {
        Self::with_decompressor(super::Gzip)
    }

    /// Whether a decompressor is configured.
    pub fn can_decompress(&self) -> bool {
        self.decompressor.is_some()
    }

    /// Decode a raw container.
    ///
    /// Gzipped input is inflated first and scanned from offset 0 of the
    /// inflated buffer. An empty buffer yields an empty sequence.
    pub fn decode(&self, raw: impl Into<Bytes>) -> Result<FrameSequence, DecodeError> {
        let raw: Bytes = raw.into();
        let compressed = is_gzip(&raw);

        let data = if compressed {
            let decompressor = self
                .decompressor
                .as_ref()
                .ok_or(DecodeError::CompressionUnsupported)?;
            let inflated = decompressor
                .decompress(&raw)
                .map_err(DecodeError::DecompressionFailed)?;
            tracing::debug!(
                decompressor = decompressor.name(),
                compressed_len = raw.len(),
                inflated_len = inflated.len(),
                "inflated recording"
            );
            Bytes::from(inflated)
        } else {
            raw
        };

        let frames = scan(&data)?;
        tracing::debug!(
            frames = frames.len(),
            bytes = data.len(),
            compressed,
            "decoded recording"
        );

        Ok(FrameSequence::new(data, frames, compressed))
    }
}

/// Decode an uncompressed container.
///
/// Gzipped input fails with [`DecodeError::CompressionUnsupported`]; use a
/// [`Decoder`] with a decompressor for those.
pub fn decode(raw: impl Into<Bytes>) -> Result<FrameSequence, DecodeError> {
    Decoder::new().decode(raw)
}

/// Walk records from offset 0 to the end of `data`, in file order.
fn scan(data: &[u8]) -> Result<Vec<Frame>, DecodeError> {
    let mut frames = Vec::new();
    let mut offset = 0;

    while offset < data.len() {
        let available = data.len() - offset;
        if available < HEADER_LEN {
            return Err(DecodeError::Truncated {
                offset,
                needed: HEADER_LEN,
                available,
            });
        }

        let header = &data[offset..offset + HEADER_LEN];
        let sec = read_u32_le(&header[0..4]);
        let usec = read_u32_le(&header[4..8]);
        let len = read_u32_le(&header[8..12]) as usize;

        let payload_start = offset + HEADER_LEN;
        let remaining = data.len() - payload_start;
        if len > remaining {
            return Err(DecodeError::Truncated {
                offset,
                needed: HEADER_LEN.saturating_add(len),
                available,
            });
        }

        frames.push(Frame {
            timestamp_ms: timestamp_ms(sec, usec),
            offset: payload_start,
            len,
        });
        offset = payload_start + len;
    }

    Ok(frames)
}

/// Milliseconds from a `sec`/`usec` pair, microseconds truncated.
fn timestamp_ms(sec: u32, usec: u32) -> u64 {
    u64::from(sec) * 1_000 + u64::from(usec) / 1_000
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
