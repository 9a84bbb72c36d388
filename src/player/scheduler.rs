//! Timer-driven playback of a decoded recording.

use std::time::Duration;

use bytes::Bytes;

use crate::config::{ConfigError, PlaybackConfig};
use crate::player::playback::find_frame_index_at_time;
use crate::player::sink::RenderSink;
use crate::player::state::{PlaybackState, PlayerState};
use crate::player::timer::{Tick, Timer};
use crate::player::timing::Speed;
use crate::source::LoadError;
use crate::ttyrec::{Decoder, Frame, FrameSequence};

/// Callback receiving acquisition or decode failures from [`Player::open`].
pub type ErrorHandler = Box<dyn FnMut(&LoadError)>;

struct Pending<H> {
    handle: H,
    tick: Tick,
}

/// Replays a [`FrameSequence`] into a [`RenderSink`], pacing frames with a
/// host-provided [`Timer`].
///
/// All operations run synchronously on the caller's thread. The only
/// suspension point is between a scheduled tick and its delivery through
/// [`Player::fire`]. Callers must serialize calls.
pub struct Player<S: RenderSink, T: Timer> {
    state: PlaybackState,
    autostart: bool,
    decoder: Decoder,
    sink: S,
    timer: T,
    pending: Option<Pending<T::Handle>>,
    generation: u64,
    on_error: Option<ErrorHandler>,
}

impl<S: RenderSink, T: Timer> Player<S, T> {
    /// Create an idle player. Fails if the configured speed is not > 0.
    pub fn new(sink: S, timer: T, config: &PlaybackConfig) -> Result<Self, ConfigError> {
        let speed = config.validate()?;
        Ok(Self {
            state: PlaybackState::new(speed, config.max_delay()),
            autostart: config.autostart,
            decoder: Decoder::default(),
            sink,
            timer,
            pending: None,
            generation: 0,
            on_error: None,
        })
    }

    /// Use `decoder` for [`open`](Self::open).
    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Report load failures to `handler` instead of returning them.
    pub fn on_error(mut self, handler: impl FnMut(&LoadError) + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    pub fn status(&self) -> PlayerState {
        self.state.status()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor()
    }

    pub fn sequence(&self) -> Option<&FrameSequence> {
        self.state.sequence()
    }

    /// Whether a tick is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn speed(&self) -> Speed {
        self.state.speed()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Replace the recording, rewind and cancel any scheduled tick.
    pub fn load(&mut self, sequence: FrameSequence) {
        self.cancel_pending();
        tracing::debug!(frames = sequence.len(), "loaded recording");
        self.state.load(sequence);
    }

    /// Decode externally acquired bytes, load them and start playback when
    /// autostart is set.
    ///
    /// Failures go to the [`on_error`](Self::on_error) handler when one is
    /// registered, otherwise they are returned. Either way the previously
    /// loaded recording is left untouched.
    pub fn open(&mut self, acquired: Result<Bytes, LoadError>) -> Result<(), LoadError> {
        let decoded = acquired.and_then(|raw| self.decoder.decode(raw).map_err(LoadError::from));

        match decoded {
            Ok(sequence) => {
                self.load(sequence);
                if self.autostart {
                    self.play();
                }
                Ok(())
            }
            Err(err) => match self.on_error.as_mut() {
                Some(handler) => {
                    tracing::debug!(error = %err, "passing load failure to error handler");
                    handler(&err);
                    Ok(())
                }
                None => Err(err),
            },
        }
    }

    /// Emit the frame under the cursor and advance.
    ///
    /// Returns `None` without side effects at the end of the recording or
    /// when nothing is loaded. Does not touch a scheduled tick.
    pub fn step(&mut self) -> Option<Frame> {
        let (frame, payload) = self.state.advance()?;
        self.sink.write(payload);
        tracing::trace!(
            cursor = self.state.cursor(),
            timestamp_ms = frame.timestamp_ms,
            len = frame.len,
            "emitted frame"
        );

        if self.pending.is_none() {
            let resting = self.state.resting_status();
            self.state.set_status(resting);
        }
        Some(frame)
    }

    /// Emit the current frame now and schedule the next one.
    ///
    /// A tick that is already scheduled is cancelled first, so there is
    /// never more than one in flight.
    pub fn play(&mut self) {
        self.cancel_pending();

        let Some(emitted) = self.step() else {
            if self.state.sequence().is_some() {
                self.state.set_status(PlayerState::Finished);
            }
            return;
        };

        match self.state.delay_after(&emitted) {
            Some(delay) => self.schedule(delay),
            None => {
                tracing::debug!(frames = self.state.len(), "playback finished");
                self.state.set_status(PlayerState::Finished);
            }
        }
    }

    /// Deliver a tick scheduled through the [`Timer`].
    ///
    /// Returns `false` for a tick that was cancelled or superseded; such a
    /// tick emits nothing.
    pub fn fire(&mut self, tick: Tick) -> bool {
        let current = self.pending.as_ref().is_some_and(|p| p.tick == tick);
        if !current {
            tracing::debug!(tick = tick.generation(), "ignoring stale tick");
            return false;
        }

        self.pending = None;
        self.play();
        true
    }

    /// Cancel the scheduled tick, keeping the cursor so `play` resumes
    /// where playback left off. No-op when nothing is scheduled.
    pub fn stop(&mut self) {
        if self.cancel_pending() {
            let resting = self.state.resting_status();
            self.state.set_status(resting);
            tracing::debug!(cursor = self.state.cursor(), "playback stopped");
        }
    }

    /// Move the cursor to frame `index` (clamped to `0..=len`) without
    /// emitting anything. Cancels a scheduled tick.
    pub fn seek(&mut self, index: usize) -> usize {
        self.cancel_pending();
        let cursor = self.state.set_cursor(index);
        let resting = self.state.resting_status();
        self.state.set_status(resting);
        cursor
    }

    /// Move the cursor to the first frame at least `offset` into the
    /// recording, measured from the first frame's timestamp.
    pub fn seek_to_time(&mut self, offset: Duration) -> usize {
        let index = self
            .state
            .sequence()
            .map_or(0, |seq| find_frame_index_at_time(seq, offset));
        self.seek(index)
    }

    /// Change the speed multiplier; applies from the next scheduled delay.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), ConfigError> {
        self.state.set_speed(speed)
    }

    /// Change the delay cap; applies from the next scheduled delay.
    pub fn set_max_delay(&mut self, max_delay: Duration) {
        self.state.set_max_delay(max_delay);
    }

    fn schedule(&mut self, delay: Duration) {
        self.generation += 1;
        let tick = Tick::new(self.generation);
        let handle = self.timer.schedule_once(delay, tick);
        tracing::trace!(delay_ms = delay.as_millis() as u64, tick = tick.generation(), "scheduled tick");
        self.pending = Some(Pending { handle, tick });
        self.state.set_status(PlayerState::Playing);
    }

    /// Returns whether a tick was cancelled.
    fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.timer.cancel(pending.handle);
                true
            }
            None => false,
        }
    }
}
