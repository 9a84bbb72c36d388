//! ttyrec container decoding.
//!
//! A ttyrec file is a flat run of records, each a 12-byte little-endian
//! header (`sec`, `usec`, `length`) followed by `length` payload bytes.
//! There is no frame count, index or end marker. A file may be gzipped as
//! a whole, which is detected from the leading magic.
//!
//! Decoding never copies payloads: a [`FrameSequence`] keeps the (possibly
//! inflated) buffer alive and each [`Frame`] is an offset/length into it.

mod compression;
mod decoder;
mod error;

use std::ops::Range;

use bytes::Bytes;

#[cfg(feature = "gzip")]
pub use compression::Gzip;
pub use compression::{is_gzip, Decompress, GZIP_MAGIC};
pub use decoder::{decode, Decoder, HEADER_LEN};
pub use error::{DecodeError, DecompressError};

/// One recorded chunk of terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Capture time in milliseconds (`sec * 1000 + usec / 1000`)
    pub timestamp_ms: u64,
    /// Payload start within the owning buffer
    pub offset: usize,
    /// Payload length in bytes
    pub len: usize,
}

impl Frame {
    /// Byte range of the payload within the owning buffer.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Ordered frames paired with the buffer they point into.
///
/// Immutable once built. Cloning is cheap: the buffer is reference-counted.
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    data: Bytes,
    frames: Vec<Frame>,
    compressed: bool,
}

impl FrameSequence {
    pub(crate) fn new(data: Bytes, frames: Vec<Frame>, compressed: bool) -> Self {
        debug_assert!(frames.iter().all(|f| f.offset + f.len <= data.len()));
        Self {
            data,
            frames,
            compressed,
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Frames in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Borrowed payload of a frame from this sequence.
    pub fn payload(&self, frame: &Frame) -> &[u8] {
        &self.data[frame.range()]
    }

    /// Zero-copy owned payload of a frame from this sequence.
    pub fn payload_bytes(&self, frame: &Frame) -> Bytes {
        self.data.slice(frame.range())
    }

    /// Span between the first and last timestamps in milliseconds.
    ///
    /// Zero for fewer than two frames or when the last timestamp is earlier
    /// than the first.
    pub fn duration_ms(&self) -> u64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }

    /// Sum of all payload lengths.
    pub fn total_payload_len(&self) -> usize {
        self.frames.iter().map(|f| f.len).sum()
    }

    /// Whether the container was gzip-compressed on input.
    pub fn was_compressed(&self) -> bool {
        self.compressed
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
