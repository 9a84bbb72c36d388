//! Info subcommand handler

use std::path::Path;

use anyhow::{Context, Result};
use humansize::{format_size, DECIMAL};
use serde::Serialize;

use ttyplay::source::read_recording;
use ttyplay::FrameSequence;

/// Summary of a decoded recording.
#[derive(Debug, Serialize)]
pub struct RecordingInfo {
    pub file: String,
    pub frames: usize,
    pub duration_ms: u64,
    pub payload_bytes: usize,
    pub compressed: bool,
}

impl RecordingInfo {
    pub fn new(file: &Path, sequence: &FrameSequence) -> Self {
        let file = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        Self {
            file,
            frames: sequence.len(),
            duration_ms: sequence.duration_ms(),
            payload_bytes: sequence.total_payload_len(),
            compressed: sequence.was_compressed(),
        }
    }

    /// Human-readable multi-line summary.
    pub fn render(&self) -> String {
        format!(
            "File:       {}\nFrames:     {}\nDuration:   {}\nPayload:    {}\nCompressed: {}",
            self.file,
            self.frames,
            format_duration(self.duration_ms),
            format_size(self.payload_bytes as u64, DECIMAL),
            if self.compressed { "yes (gzip)" } else { "no" },
        )
    }
}

/// Format milliseconds as `1h 2m 3s`, `2m 3s` or `3.250s`.
fn format_duration(ms: u64) -> String {
    let secs = ms / 1_000;
    let (hours, minutes, seconds) = (secs / 3_600, (secs % 3_600) / 60, secs % 60);
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, ms % 1_000)
    }
}

/// Print a summary of `file`, as text or JSON.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, json: bool) -> Result<()> {
    let raw = read_recording(file)?;
    let sequence = super::decoder()
        .decode(raw)
        .with_context(|| format!("Failed to decode {}", file.display()))?;
    let info = RecordingInfo::new(file, &sequence);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&info).context("Failed to serialize info")?
        );
    } else {
        println!("{}", info.render());
    }
    Ok(())
}
