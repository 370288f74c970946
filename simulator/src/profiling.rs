//! Frame timing and draw statistics.
//!
//! Draw counts come from [`DrawStats`], which is time-free and lives in the
//! common crate. The timing half needs `std::time` and stays here.

use std::fmt::Write;
use std::time::{Duration, Instant};

use cluster_common::FrameOutcome;
use cluster_common::profiling::DrawStats;
use heapless::String;

/// Frame timing and render statistics.
pub struct FrameMetrics {
    // Frame timing (microseconds)
    pub frame_time_us: u32,
    pub render_time_us: u32,
    pub sleep_time_us: u32,

    // Statistics
    pub frame_time_min_us: u32,
    pub frame_time_max_us: u32,
    frame_time_avg_us: f32,

    // Counters
    pub total_frames: u64,
    pub skipped_frames: u64,
    pub rects_last_frame: u32,
    pub texts_last_frame: u32,
    pub last_digest: u64,

    start_time: Instant,
}

impl FrameMetrics {
    const EMA_ALPHA: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            skipped_frames: 0,
            rects_last_frame: 0,
            texts_last_frame: 0,
            last_digest: 0,
            start_time: Instant::now(),
        }
    }

    /// Record one frame.
    pub fn record_frame(
        &mut self,
        total_time: Duration,
        render_time: Duration,
        sleep_time: Duration,
        outcome: FrameOutcome,
        stats: &DrawStats,
    ) {
        let total_us = total_time.as_micros() as u32;
        self.frame_time_us = total_us;
        self.render_time_us = render_time.as_micros() as u32;
        self.sleep_time_us = sleep_time.as_micros() as u32;

        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        if outcome == FrameOutcome::MissingState {
            self.skipped_frames += 1;
        }
        self.rects_last_frame = stats.rects();
        self.texts_last_frame = stats.texts();
        self.last_digest = stats.digest();
        self.total_frames += 1;
    }

    /// Exponential moving average of the frame time.
    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    #[inline]
    pub fn uptime(&self) -> Duration { self.start_time.elapsed() }

    /// Uptime as HH:MM:SS.
    pub fn uptime_string(&self) -> String<12> { format_hms(self.uptime().as_secs()) }
}

impl Default for FrameMetrics {
    fn default() -> Self { Self::new() }
}

fn format_hms(secs: u64) -> String<12> {
    let mut s = String::new();
    let _ = write!(s, "{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60);
    s
}

#[cfg(test)]
mod tests {
    use cluster_common::colors::WHITE;
    use cluster_common::surface::{Rect, Surface};

    use super::*;

    #[test]
    fn test_record_frame_tracks_extremes() {
        let mut metrics = FrameMetrics::new();
        let stats = DrawStats::new();
        for ms in [20, 5, 40] {
            metrics.record_frame(
                Duration::from_millis(ms),
                Duration::from_millis(1),
                Duration::ZERO,
                FrameOutcome::Drawn,
                &stats,
            );
        }
        assert_eq!(metrics.total_frames, 3);
        assert_eq!(metrics.frame_time_min_us, 5_000);
        assert_eq!(metrics.frame_time_max_us, 40_000);
        assert!(metrics.frame_time_avg_us() > 5_000 && metrics.frame_time_avg_us() < 40_000);
    }

    #[test]
    fn test_record_frame_counts_skips_and_draws() {
        let mut metrics = FrameMetrics::new();
        let mut stats = DrawStats::new();
        stats.fill_rect(Rect::new(0, 0, 1, 1), WHITE);
        metrics.record_frame(Duration::ZERO, Duration::ZERO, Duration::ZERO, FrameOutcome::MissingState, &stats);
        assert_eq!(metrics.skipped_frames, 1);
        assert_eq!(metrics.rects_last_frame, 1);
        assert_eq!(metrics.last_digest, stats.digest());
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(3_725), "01:02:05");
    }
}
