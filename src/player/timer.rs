//! One-shot timer collaborator.
//!
//! The player never sleeps. It asks the host to call
//! [`Player::fire`](super::Player::fire) with a [`Tick`] after a delay,
//! and cancels through the returned handle. Each tick carries a
//! generation number so a callback that was already in flight when it
//! got cancelled is recognised as stale and ignored.

use std::collections::VecDeque;
use std::time::Duration;

/// Token identifying one scheduled playback tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tick(u64);

impl Tick {
    pub(crate) fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Host timer primitives: schedule once, cancel.
pub trait Timer {
    /// Handle used to cancel a scheduled tick.
    type Handle;

    /// Arrange for `tick` to be delivered to the player after `delay`.
    fn schedule_once(&mut self, delay: Duration, tick: Tick) -> Self::Handle;

    /// Cancel a tick scheduled earlier. Unknown or fired handles are ignored.
    fn cancel(&mut self, handle: Self::Handle);
}

/// A tick recorded by [`ManualTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub id: u64,
    pub delay: Duration,
    pub tick: Tick,
}

/// Timer that never fires on its own.
///
/// Records every request so tests can inspect delays and deliver ticks
/// by hand.
#[derive(Debug, Default)]
pub struct ManualTimer {
    next_id: u64,
    queue: VecDeque<Scheduled>,
    history: Vec<Scheduled>,
    cancelled: Vec<u64>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest tick that is scheduled and not cancelled.
    pub fn pending(&self) -> Option<&Scheduled> {
        self.queue.front()
    }

    /// Remove and return the oldest live tick, as if it elapsed.
    pub fn take_next(&mut self) -> Option<Scheduled> {
        self.queue.pop_front()
    }

    /// Every delay ever requested, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.history.iter().map(|s| s.delay).collect()
    }

    /// Every tick ever requested, in order.
    pub fn history(&self) -> &[Scheduled] {
        &self.history
    }

    /// Ids of cancelled ticks.
    pub fn cancelled(&self) -> &[u64] {
        &self.cancelled
    }
}

impl Timer for ManualTimer {
    type Handle = u64;

    fn schedule_once(&mut self, delay: Duration, tick: Tick) -> u64 {
        self.next_id += 1;
        let scheduled = Scheduled {
            id: self.next_id,
            delay,
            tick,
        };
        self.queue.push_back(scheduled);
        self.history.push(scheduled);
        self.next_id
    }

    fn cancel(&mut self, handle: u64) {
        self.queue.retain(|s| s.id != handle);
        self.cancelled.push(handle);
    }
}
