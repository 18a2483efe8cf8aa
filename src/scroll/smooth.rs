//! Smooth scrolling: damped wheel input and eased scroll-to for anchor
//! navigation.

use web_time::{Duration, Instant};

use crate::options::ScrollOptions;
use crate::util::easing::EasingFunction;
use crate::util::frame_timing::seconds;

/// Damping reaches the target once this close, px.
const SETTLE_DISTANCE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollTo {
    from: f32,
    to: f32,
    started: Instant,
}

/// Smoothed page scroll position.
///
/// Wheel deltas move a target that the position follows with exponential
/// damping. [`SmoothScroll::scroll_to`] runs a fixed-length expo-out scroll
/// instead; wheel input or another scroll-to cancels it.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    lerp: f32,
    duration: Duration,
    limit: f32,
    target: f32,
    position: f32,
    scroll_to: Option<ScrollTo>,
}

impl SmoothScroll {
    /// Scroll-to curve.
    pub const EASING: EasingFunction = EasingFunction::ExpoOut;

    /// At the top of a page that cannot scroll yet.
    #[must_use]
    pub fn new(options: &ScrollOptions) -> Self {
        Self {
            lerp: options.wheel_lerp.clamp(0.0, 1.0),
            duration: seconds(options.anchor_duration),
            limit: 0.0,
            target: 0.0,
            position: 0.0,
            scroll_to: None,
        }
    }

    /// Current smoothed position.
    #[must_use]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Position being approached.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.scroll_to.map_or(self.target, |s| s.to)
    }

    /// Largest scroll offset.
    #[must_use]
    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// Whether the position has come to rest.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.scroll_to.is_none() && self.position == self.target
    }

    /// Set the largest scroll offset, pulling targets back inside it.
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        if let Some(s) = &mut self.scroll_to {
            s.to = s.to.clamp(0.0, self.limit);
        }
    }

    /// Adopt a position the page reached by other means.
    pub fn sync(&mut self, position: f32) {
        let position = position.clamp(0.0, self.limit);
        self.position = position;
        self.target = position;
        self.scroll_to = None;
    }

    /// Wheel input. Cancels a running scroll-to and continues from its
    /// current position.
    pub fn wheel(&mut self, delta: f32) {
        if self.scroll_to.take().is_some() {
            self.target = self.position;
        }
        self.target = (self.target + delta).clamp(0.0, self.limit);
    }

    /// Eased scroll to `offset`. Returns whether a running scroll-to was
    /// cancelled.
    pub fn scroll_to(&mut self, offset: f32, now: Instant) -> bool {
        let to = offset.clamp(0.0, self.limit);
        let cancelled = self.scroll_to.is_some();
        if self.duration.is_zero() {
            self.scroll_to = None;
            self.position = to;
            self.target = to;
        } else {
            self.scroll_to = Some(ScrollTo {
                from: self.position,
                to,
                started: now,
            });
        }
        cancelled
    }

    /// Advance by `dt` seconds to `now`. Returns the new position when it
    /// moved.
    pub fn update(&mut self, now: Instant, dt: f32) -> Option<f32> {
        let before = self.position;
        if let Some(s) = self.scroll_to {
            let t = now.saturating_duration_since(s.started).as_secs_f32()
                / self.duration.as_secs_f32();
            if t >= 1.0 {
                self.position = s.to;
                self.target = s.to;
                self.scroll_to = None;
            } else {
                self.position = s.from + (s.to - s.from) * Self::EASING.evaluate(t);
            }
        } else if self.position != self.target {
            let factor = 1.0 - (-self.lerp * 60.0 * dt.max(0.0)).exp();
            self.position += (self.target - self.position) * factor;
            if (self.target - self.position).abs() < SETTLE_DISTANCE {
                self.position = self.target;
            }
        }
        (self.position != before).then_some(self.position)
    }
}
