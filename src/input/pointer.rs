use glam::Vec2;
use web_time::{Duration, Instant};

use crate::animation::tween::{AnimatedValues, Tween, TweenTarget, Tweens};
use crate::options::ParallaxOptions;
use crate::util::easing::EasingFunction;
use crate::util::frame_timing::seconds;

/// Pointer position in [-1, 1] on both axes, +y up.
///
/// A zero-sized viewport maps to the centre.
#[must_use]
pub fn normalize(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let nx = (x / width - 0.5) * 2.0;
    let ny = -(y / height - 0.5) * 2.0;
    Vec2::new(nx, ny).clamp(Vec2::NEG_ONE, Vec2::ONE)
}

/// Maps the pointer to camera and group tilt targets.
#[derive(Debug, Clone)]
pub struct PointerParallax {
    camera_gain: f32,
    hero_gain: f32,
    arena_gain: f32,
    arena_base_tilt: f32,
    duration: Duration,
}

impl PointerParallax {
    /// Curve of every parallax tween (`power1.out`).
    pub const EASING: EasingFunction = EasingFunction::QuadraticOut;

    /// Parallax from options.
    #[must_use]
    pub fn new(options: &ParallaxOptions) -> Self {
        Self {
            camera_gain: options.camera_gain,
            hero_gain: options.hero_gain,
            arena_gain: options.arena_gain,
            arena_base_tilt: options.arena_base_tilt,
            duration: seconds(options.duration),
        }
    }

    /// Target value of every driven target for a normalized pointer.
    #[must_use]
    pub fn targets(&self, pointer: Vec2) -> [(TweenTarget, f32); 4] {
        [
            (TweenTarget::CameraX, pointer.x * self.camera_gain),
            (TweenTarget::HeroTiltX, pointer.y * self.hero_gain),
            (TweenTarget::HeroTiltY, pointer.x * self.hero_gain),
            (
                TweenTarget::ArenaTiltX,
                self.arena_base_tilt + pointer.y * self.arena_gain,
            ),
        ]
    }

    /// Start a tween toward each target, cancelling the ones in flight.
    /// Returns how many were cancelled.
    pub fn on_pointer(
        &self,
        pointer: Vec2,
        values: &AnimatedValues,
        tweens: &mut Tweens,
        now: Instant,
    ) -> usize {
        self.targets(pointer)
            .into_iter()
            .filter_map(|(target, to)| {
                tweens.start(Tween::towards(
                    values,
                    target,
                    to,
                    self.duration,
                    Self::EASING,
                    now,
                ))
            })
            .count()
    }
}
