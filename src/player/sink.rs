//! Render sink collaborator.
//!
//! The player hands raw frame bytes to a sink and never interprets them.
//! Writing must not fail from the player's point of view.

use std::io::Write;

/// Consumer of raw terminal output bytes.
pub trait RenderSink {
    /// Accept a chunk of terminal output. Must be binary-safe.
    fn write(&mut self, bytes: &[u8]);
}

impl RenderSink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes);
    }
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes);
    }
}

/// Sink that forwards frames to an [`io::Write`](std::io::Write), flushing
/// after every frame.
///
/// I/O errors are logged and counted rather than surfaced, so a closed
/// pipe cannot abort playback mid-stream.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
    failed_writes: usize,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            failed_writes: 0,
        }
    }

    /// Number of frames that could not be written.
    pub fn failed_writes(&self) -> usize {
        self.failed_writes
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> RenderSink for WriterSink<W> {
    fn write(&mut self, bytes: &[u8]) {
        let result = self
            .inner
            .write_all(bytes)
            .and_then(|()| self.inner.flush());
        if let Err(e) = result {
            self.failed_writes += 1;
            if self.failed_writes == 1 {
                tracing::warn!(error = %e, "render sink write failed");
            } else {
                tracing::trace!(error = %e, failed = self.failed_writes, "render sink write failed");
            }
        }
    }
}
