//! Frame pacing for the simulator loop.
//!
//! Uses `std::time`, so it lives here rather than in the common crate.

use std::thread;
use std::time::{Duration, Instant};

/// Simulation step for one frame, in seconds.
#[inline]
pub fn step_seconds(frame_time: Duration) -> f64 { frame_time.as_secs_f64() }

/// Sleep out the rest of the frame. Returns how long it slept.
pub fn pace(
    frame_start: Instant,
    frame_time: Duration,
) -> Duration {
    let elapsed = frame_start.elapsed();
    let Some(remaining) = frame_time.checked_sub(elapsed) else {
        return Duration::ZERO;
    };
    thread::sleep(remaining);
    frame_start.elapsed().saturating_sub(elapsed)
}
