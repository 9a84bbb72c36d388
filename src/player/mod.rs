//! ttyrec player module
//!
//! Replays a decoded [`FrameSequence`](crate::ttyrec::FrameSequence) into a
//! render sink at scaled real-time pacing.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `state`: PlaybackState struct and the PlayerState lifecycle
//! - `timing`: Speed validation and inter-frame delay computation
//! - `scheduler`: The `Player` itself (load, step, play, stop, seek)
//! - `timer` / `sink`: Collaborator traits supplied by the host
//! - `playback/`: Seeking helpers
//! - `native`: A single-threaded loop host driving a `Player` in real time
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::mpsc;
//! use ttyplay::config::PlaybackConfig;
//! use ttyplay::player::{run, LoopTimer, Player, PlaybackResult, WriterSink};
//! use ttyplay::source::read_recording;
//! use ttyplay::ttyrec::Decoder;
//!
//! let sink = WriterSink::new(std::io::stdout());
//! let mut player = Player::new(sink, LoopTimer::new(), &PlaybackConfig::default())
//!     .unwrap()
//!     .with_decoder(Decoder::new());
//! player.open(read_recording("session.ttyrec")).unwrap();
//!
//! let (_tx, rx) = mpsc::channel();
//! match run(&mut player, &rx) {
//!     PlaybackResult::Finished => println!("Finished"),
//!     PlaybackResult::Interrupted => println!("Stopped by user"),
//! }
//! ```

mod native;
pub(crate) mod playback;
mod scheduler;
mod sink;
pub mod state;
mod timer;
pub mod timing;

pub use native::{run, LoopTimer, PlaybackResult};
pub use playback::find_frame_index_at_time;
pub use scheduler::{ErrorHandler, Player};
pub use sink::{RenderSink, WriterSink};
pub use state::{PlaybackState, PlayerState};
pub use timer::{ManualTimer, Scheduled, Tick, Timer};
pub use timing::{frame_delay, Speed};
