//! Playback helpers for the player.
//!
//! This module handles locating frames by time for seeking.

mod seeking;

pub use seeking::find_frame_index_at_time;
