//! Frame lookup by time offset.

use std::time::Duration;

use crate::ttyrec::FrameSequence;

/// Find the first frame at least `offset` into the recording.
///
/// Offsets are measured from the first frame's timestamp. Frames are
/// scanned in file order, so a recording whose clock jumps backwards is
/// still searched front to back.
///
/// # Returns
/// The frame index, or `seq.len()` when no frame is that late
pub fn find_frame_index_at_time(seq: &FrameSequence, offset: Duration) -> usize {
    let Some(first) = seq.get(0) else {
        return 0;
    };
    let target_ms = u64::try_from(offset.as_millis()).unwrap_or(u64::MAX);
    let origin = first.timestamp_ms;

    seq.iter()
        .position(|frame| frame.timestamp_ms.saturating_sub(origin) >= target_ms)
        .unwrap_or(seq.len())
}
