//! Frame clock and frame-delta helpers.

use web_time::{Duration, Instant};

/// Longest frame delta handed to the animation layer. Longer gaps (tab in
/// background, debugger pause) are treated as one slow frame.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// `secs` as a [`Duration`]. Negative, non-finite and unrepresentable
/// values give [`Duration::ZERO`].
#[must_use]
pub fn seconds(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO)
}

/// Frame clock: elapsed time since start, per-frame delta, and a smoothed
/// FPS estimate.
pub struct FrameTiming {
    /// When the clock started.
    start: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Delta of the most recent frame, clamped to [`MAX_FRAME_DELTA`].
    delta: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Start a clock at `now`.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance to `now`. Returns the clamped frame delta.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        self.delta = elapsed.min(MAX_FRAME_DELTA);
        self.delta
    }

    /// Seconds since the clock started, as of the last tick.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.last_frame
            .saturating_duration_since(self.start)
            .as_secs_f32()
    }

    /// Clamped delta of the last tick.
    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
