//! Playback timing policy.
//!
//! Converts recorded inter-frame deltas into real delays: the delta is
//! divided by the speed multiplier, capped at the maximum frame delay and
//! floored at zero for recordings whose timestamps go backwards.

use std::time::Duration;

use crate::config::ConfigError;
use crate::ttyrec::Frame;

/// A validated playback speed multiplier (finite and > 0).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f64);

impl Speed {
    /// Real-time playback.
    pub const NORMAL: Speed = Speed(1.0);

    /// Validate a speed multiplier.
    pub fn new(speed: f64) -> Result<Self, ConfigError> {
        if speed.is_finite() && speed > 0.0 {
            Ok(Self(speed))
        } else {
            Err(ConfigError::InvalidSpeed(speed))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<f64> for Speed {
    type Error = ConfigError;

    fn try_from(speed: f64) -> Result<Self, Self::Error> {
        Self::new(speed)
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Delay between emitting `current` and emitting `next`.
///
/// `(next - current) / speed`, capped at `max_delay`, never negative.
pub fn frame_delay(current: &Frame, next: &Frame, speed: Speed, max_delay: Duration) -> Duration {
    let delta_ms = next.timestamp_ms.saturating_sub(current.timestamp_ms);
    let scaled_ms = delta_ms as f64 / speed.get();
    let max_ms = max_delay.as_secs_f64() * 1_000.0;

    if scaled_ms >= max_ms {
        max_delay
    } else {
        Duration::try_from_secs_f64(scaled_ms / 1_000.0).unwrap_or(max_delay)
    }
}
