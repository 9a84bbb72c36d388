//! Player state management
//!
//! Contains the `PlaybackState` struct holding the loaded frames, the
//! cursor and the timing policy, plus the `PlayerState` lifecycle enum.

use std::time::Duration;

use crate::config::ConfigError;
use crate::player::timing::{frame_delay, Speed};
use crate::ttyrec::{Frame, FrameSequence};

/// Lifecycle of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No recording loaded
    Idle,
    /// Recording loaded, cursor at the start, nothing scheduled
    Ready,
    /// A tick is scheduled
    Playing,
    /// Stopped part way through
    Paused,
    /// Every frame has been emitted
    Finished,
}

/// Frames, cursor and timing policy of a playback session.
///
/// Timer bookkeeping lives in [`Player`](super::Player); this struct only
/// holds what does not depend on the host.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Loaded recording, if any
    sequence: Option<FrameSequence>,
    /// Index of the next frame to emit (0..=len)
    cursor: usize,
    /// Playback speed multiplier
    speed: Speed,
    /// Upper bound on any single inter-frame delay
    max_delay: Duration,
    /// Current lifecycle state
    status: PlayerState,
}

impl PlaybackState {
    /// Default cap on a single inter-frame delay.
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(1_000);

    /// Create an idle state with the given timing policy.
    pub fn new(speed: Speed, max_delay: Duration) -> Self {
        Self {
            sequence: None,
            cursor: 0,
            speed,
            max_delay,
            status: PlayerState::Idle,
        }
    }

    pub fn status(&self) -> PlayerState {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: PlayerState) {
        self.status = status;
    }

    pub fn sequence(&self) -> Option<&FrameSequence> {
        self.sequence.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of frames loaded (0 when idle).
    pub fn len(&self) -> usize {
        self.sequence.as_ref().map_or(0, FrameSequence::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Whether every loaded frame has been emitted.
    pub fn is_at_end(&self) -> bool {
        self.cursor == self.len()
    }

    /// Replace the recording and rewind.
    pub fn load(&mut self, sequence: FrameSequence) {
        self.sequence = Some(sequence);
        self.cursor = 0;
        self.status = PlayerState::Ready;
    }

    /// Frame under the cursor.
    pub fn current_frame(&self) -> Option<Frame> {
        self.sequence.as_ref()?.get(self.cursor).copied()
    }

    /// Move the cursor past the current frame and return it with its payload.
    pub(crate) fn advance(&mut self) -> Option<(Frame, &[u8])> {
        let sequence = self.sequence.as_ref()?;
        let frame = *sequence.get(self.cursor)?;
        self.cursor += 1;
        Some((frame, sequence.payload(&frame)))
    }

    /// Delay to wait after emitting `emitted` before the frame now under the
    /// cursor, or `None` at the end of the recording.
    pub fn delay_after(&self, emitted: &Frame) -> Option<Duration> {
        let next = self.current_frame()?;
        Some(frame_delay(emitted, &next, self.speed, self.max_delay))
    }

    /// Move the cursor, clamped to `0..=len`. Returns the new cursor.
    pub(crate) fn set_cursor(&mut self, index: usize) -> usize {
        self.cursor = index.min(self.len());
        self.cursor
    }

    /// Lifecycle state for a cursor position with nothing scheduled.
    pub(crate) fn resting_status(&self) -> PlayerState {
        if self.sequence.is_none() {
            PlayerState::Idle
        } else if self.cursor == 0 && !self.is_empty() {
            PlayerState::Ready
        } else if self.is_at_end() {
            PlayerState::Finished
        } else {
            PlayerState::Paused
        }
    }

    /// Change the speed multiplier (rejects ≤ 0, NaN and infinity).
    pub fn set_speed(&mut self, speed: f64) -> Result<(), ConfigError> {
        self.speed = Speed::new(speed)?;
        Ok(())
    }

    pub fn set_max_delay(&mut self, max_delay: Duration) {
        self.max_delay = max_delay;
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(Speed::NORMAL, Self::DEFAULT_MAX_DELAY)
    }
}
