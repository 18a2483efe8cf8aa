//! Time-boxed eased interpolation of the animated scalar values.
//!
//! At most one tween runs per [`TweenTarget`]. Starting a tween on a target
//! cancels the one already running there and hands it back, so the order
//! of competing writers is explicit.

use rustc_hash::FxHashMap;
use web_time::{Duration, Instant};

use crate::util::easing::EasingFunction;

/// A scalar that tweens may drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    /// Camera x (pointer parallax).
    CameraX,
    /// Camera y (scroll depth).
    CameraY,
    /// Hero group tilt about X.
    HeroTiltX,
    /// Hero group tilt about Y, added to its spin.
    HeroTiltY,
    /// Arena group rotation about X.
    ArenaTiltX,
}

/// Current values of every [`TweenTarget`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimatedValues {
    /// Camera x.
    pub camera_x: f32,
    /// Camera y.
    pub camera_y: f32,
    /// Hero tilt about X.
    pub hero_tilt_x: f32,
    /// Hero tilt about Y.
    pub hero_tilt_y: f32,
    /// Arena rotation about X.
    pub arena_tilt_x: f32,
}

impl AnimatedValues {
    /// Read one target.
    #[must_use]
    pub fn get(&self, target: TweenTarget) -> f32 {
        match target {
            TweenTarget::CameraX => self.camera_x,
            TweenTarget::CameraY => self.camera_y,
            TweenTarget::HeroTiltX => self.hero_tilt_x,
            TweenTarget::HeroTiltY => self.hero_tilt_y,
            TweenTarget::ArenaTiltX => self.arena_tilt_x,
        }
    }

    /// Write one target.
    pub fn set(&mut self, target: TweenTarget, value: f32) {
        let slot = match target {
            TweenTarget::CameraX => &mut self.camera_x,
            TweenTarget::CameraY => &mut self.camera_y,
            TweenTarget::HeroTiltX => &mut self.hero_tilt_x,
            TweenTarget::HeroTiltY => &mut self.hero_tilt_y,
            TweenTarget::ArenaTiltX => &mut self.arena_tilt_x,
        };
        *slot = value;
    }
}

/// One eased transition of a target from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Driven value.
    pub target: TweenTarget,
    /// Value at `started`.
    pub from: f32,
    /// Value at `started + duration`.
    pub to: f32,
    /// Length of the transition.
    pub duration: Duration,
    /// Progress curve.
    pub easing: EasingFunction,
    /// Start instant.
    pub started: Instant,
}

impl Tween {
    /// Tween from the target's current value in `values` to `to`.
    #[must_use]
    pub fn towards(
        values: &AnimatedValues,
        target: TweenTarget,
        to: f32,
        duration: Duration,
        easing: EasingFunction,
        now: Instant,
    ) -> Self {
        Self {
            target,
            from: values.get(target),
            to,
            duration,
            easing,
            started: now,
        }
    }

    /// Raw progress in [0, 1].
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased value at `now`.
    #[must_use]
    pub fn value_at(&self, now: Instant) -> f32 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.evaluate(t)
    }

    /// Whether `now` is at or past the end.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// The running tweens, one per target.
#[derive(Debug, Default)]
pub struct Tweens {
    active: FxHashMap<TweenTarget, Tween>,
}

impl Tweens {
    /// No running tweens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tween`, cancelling and returning whatever ran on its target.
    pub fn start(&mut self, tween: Tween) -> Option<Tween> {
        self.active.insert(tween.target, tween)
    }

    /// Cancel the tween on `target`, leaving the value where it is.
    pub fn cancel(&mut self, target: TweenTarget) -> Option<Tween> {
        self.active.remove(&target)
    }

    /// The tween running on `target`.
    #[must_use]
    pub fn get(&self, target: TweenTarget) -> Option<&Tween> {
        self.active.get(&target)
    }

    /// Number of running tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether nothing is running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Write every tween's value at `now` into `values`, then retire the
    /// finished ones. A finished tween always writes exactly its `to`.
    pub fn apply(&mut self, values: &mut AnimatedValues, now: Instant) {
        for tween in self.active.values() {
            values.set(tween.target, tween.value_at(now));
        }
        self.active.retain(|_, tween| !tween.is_finished(now));
    }
}
