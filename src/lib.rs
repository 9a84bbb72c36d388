//! ttyplay - decode and replay ttyrec terminal recordings.
//!
//! The library is split into two phases:
//!
//! - [`ttyrec`]: turns a raw (optionally gzipped) container into a
//!   [`FrameSequence`] of timestamped byte ranges, without copying payloads.
//! - [`player`]: replays a sequence into a render sink, pacing frames with a
//!   host timer under a speed multiplier and a per-frame delay cap.
//!
//! Decoding is a distinct step: a corrupt file fails before any frame is
//! scheduled, and playback of a decoded sequence cannot fail.

pub mod config;
pub mod player;
pub mod source;
pub mod ttyrec;

pub use config::{Config, ConfigError, PlaybackConfig};
pub use player::{Player, PlayerState, RenderSink, Timer};
pub use source::LoadError;
pub use ttyrec::{decode, DecodeError, Decoder, Frame, FrameSequence};
