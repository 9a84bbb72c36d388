//! Single-threaded event loop host for the player.
//!
//! [`LoopTimer`] keeps the one pending deadline and [`run`] waits for it on
//! the calling thread, delivering ticks until playback finishes or an
//! interrupt arrives.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::player::scheduler::Player;
use crate::player::sink::RenderSink;
use crate::player::timer::{Tick, Timer};

/// How a [`run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Nothing left to schedule
    Finished,
    /// Stopped by an interrupt message
    Interrupted,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    id: u64,
    at: Instant,
    tick: Tick,
}

/// Stand-in deadline for delays too long to represent as an [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(u32::MAX as u64);

/// Timer holding a single wall-clock deadline, serviced by [`run`].
#[derive(Debug, Default)]
pub struct LoopTimer {
    next_id: u64,
    pending: Option<Deadline>,
}

impl LoopTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the pending tick is due, if any.
    pub fn next_deadline(&self) -> Option<(Instant, Tick)> {
        self.pending.map(|d| (d.at, d.tick))
    }

    /// Clear the pending deadline, returning its tick.
    fn take_due(&mut self) -> Option<Tick> {
        self.pending.take().map(|d| d.tick)
    }
}

impl Timer for LoopTimer {
    type Handle = u64;

    fn schedule_once(&mut self, delay: Duration, tick: Tick) -> u64 {
        self.next_id += 1;
        let now = Instant::now();
        let at = now
            .checked_add(delay)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        self.pending = Some(Deadline {
            id: self.next_id,
            at,
            tick,
        });
        self.next_id
    }

    fn cancel(&mut self, handle: u64) {
        if self.pending.is_some_and(|d| d.id == handle) {
            self.pending = None;
        }
    }
}

/// Drive `player` until nothing is scheduled or `interrupt` receives a
/// message, in which case playback is stopped (not rewound).
///
/// A disconnected `interrupt` channel just means nobody can interrupt.
pub fn run<S: RenderSink>(
    player: &mut Player<S, LoopTimer>,
    interrupt: &Receiver<()>,
) -> PlaybackResult {
    let mut can_interrupt = true;

    while let Some((deadline, _)) = player.timer().next_deadline() {
        let wait = deadline.saturating_duration_since(Instant::now());

        if can_interrupt {
            match interrupt.recv_timeout(wait) {
                Ok(()) => {
                    player.stop();
                    tracing::debug!(cursor = player.cursor(), "playback interrupted");
                    return PlaybackResult::Interrupted;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    can_interrupt = false;
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                }
            }
        } else if !wait.is_zero() {
            thread::sleep(wait);
        }

        if let Some(tick) = player.timer_mut().take_due() {
            player.fire(tick);
        }
    }

    PlaybackResult::Finished
}
