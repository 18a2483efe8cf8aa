//! Lagged following of a scroll-linked progress value.

use web_time::{Duration, Instant};

use crate::util::easing::EasingFunction;
use crate::util::frame_timing::seconds;

/// In-flight catch-up from one value to the latest target.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CatchUp {
    from: f32,
    to: f32,
    started: Instant,
}

/// Follows a target progress with a fixed lag.
///
/// Every new target restarts a `lag`-long power3-out catch-up from the
/// current value, cancelling the previous one.
#[derive(Debug, Clone)]
pub struct Scrub {
    lag: Duration,
    value: f32,
    catch_up: Option<CatchUp>,
}

impl Scrub {
    /// Catch-up curve.
    pub const EASING: EasingFunction = EasingFunction::Power3Out;

    /// A scrub at 0 with `lag_secs` of lag. Negative, non-finite and
    /// unrepresentable lags are treated as zero.
    #[must_use]
    pub fn new(lag_secs: f32) -> Self {
        Self {
            lag: seconds(lag_secs),
            value: 0.0,
            catch_up: None,
        }
    }

    /// Configured lag.
    #[must_use]
    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Value as of the last [`Self::sample`] or [`Self::set_target`].
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value being approached.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.catch_up.map_or(self.value, |c| c.to)
    }

    /// Whether the value has reached the target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.catch_up.is_none()
    }

    /// Aim at `target` from the value at `now`. Returns whether an
    /// unfinished catch-up was cancelled.
    pub fn set_target(&mut self, target: f32, now: Instant) -> bool {
        let current = self.sample(now);
        let cancelled = self.catch_up.take().is_some();
        if self.lag.is_zero() || (target - current).abs() <= f32::EPSILON {
            self.value = target;
        } else {
            self.catch_up = Some(CatchUp {
                from: current,
                to: target,
                started: now,
            });
        }
        cancelled
    }

    /// Jump to `value` with no catch-up.
    pub fn snap(&mut self, value: f32) {
        self.value = value;
        self.catch_up = None;
    }

    /// Advance to `now` and return the value.
    pub fn sample(&mut self, now: Instant) -> f32 {
        if let Some(c) = self.catch_up {
            let elapsed = now.saturating_duration_since(c.started);
            let t = elapsed.as_secs_f32() / self.lag.as_secs_f32();
            if t >= 1.0 {
                self.value = c.to;
                self.catch_up = None;
            } else {
                self.value = c.from + (c.to - c.from) * Self::EASING.evaluate(t);
            }
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn unusable_lags_fall_back_to_zero() {
        for lag in [-1.0, f32::NAN, f32::INFINITY, 1e20] {
            assert_eq!(Scrub::new(lag).lag(), Duration::ZERO, "{lag}");
        }
        assert_eq!(Scrub::new(0.5).lag(), secs(0.5));
    }

    #[test]
    fn zero_lag_is_immediate() {
        let now = Instant::now();
        let mut scrub = Scrub::new(0.0);
        let _ = scrub.set_target(0.6, now);
        assert_eq!(scrub.value(), 0.6);
        assert!(scrub.is_settled());
        assert!(Scrub::new(-1.0).lag().is_zero());
        assert!(Scrub::new(f32::NAN).lag().is_zero());
    }

    #[test]
    fn lags_then_arrives() {
        let t0 = Instant::now();
        let mut scrub = Scrub::new(1.0);
        assert!(!scrub.set_target(1.0, t0));
        assert_eq!(scrub.value(), 0.0);

        let mid = scrub.sample(t0 + secs(0.5));
        assert!(mid > 0.5 && mid < 1.0, "power3 out front-loads: {mid}");
        assert_eq!(scrub.sample(t0 + secs(1.0)), 1.0);
        assert!(scrub.is_settled());
    }

    #[test]
    fn retarget_cancels_and_continues_from_current() {
        let t0 = Instant::now();
        let mut scrub = Scrub::new(1.0);
        let _ = scrub.set_target(1.0, t0);
        let at_half = {
            let mut copy = scrub.clone();
            copy.sample(t0 + secs(0.5))
        };
        assert!(scrub.set_target(0.0, t0 + secs(0.5)));
        assert_eq!(scrub.value(), at_half);
        assert_eq!(scrub.target(), 0.0);
        assert_eq!(scrub.sample(t0 + secs(1.5)), 0.0);
    }

    #[test]
    fn snap_drops_catch_up() {
        let t0 = Instant::now();
        let mut scrub = Scrub::new(2.0);
        let _ = scrub.set_target(1.0, t0);
        scrub.snap(0.25);
        assert!(scrub.is_settled());
        assert_eq!(scrub.sample(t0 + secs(5.0)), 0.25);
    }
}
