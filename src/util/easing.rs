//! Easing functions for tweens, scrubs and smooth scrolling.
//!
//! Curve names follow the power-ease family used by web animation tooling:
//! `power1` is quadratic, `power2` cubic, `power3` quartic.

use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-out (fast start, slow end). Same curve as `power1.out`.
    QuadraticOut,
    /// Quadratic ease-in-out (`power1.inOut`).
    Power1InOut,
    /// Cubic ease-out (`power2.out`).
    Power2Out,
    /// Quartic ease-out (`power3.out`). Used for scrub catch-up.
    Power3Out,
    /// Exponential ease-out used for anchor scrolling:
    /// `min(1, 1.001 - 2^(-10t))`.
    ExpoOut,
}

impl EasingFunction {
    /// Default easing for tweens that name no curve (`power1.out`).
    pub const DEFAULT: EasingFunction = EasingFunction::QuadraticOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let omt = 1.0 - t;
                    1.0 - 2.0 * omt * omt
                }
            }
            EasingFunction::Power2Out => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            EasingFunction::Power3Out => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt * omt
            }
            EasingFunction::ExpoOut => {
                // 1.001 - 2^-10 lands a hair above 1 at t=1, hence the min.
                (1.001 - 2.0_f32.powf(-10.0 * t)).min(1.0)
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 6] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticOut,
        EasingFunction::Power1InOut,
        EasingFunction::Power2Out,
        EasingFunction::Power3Out,
        EasingFunction::ExpoOut,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.evaluate(0.0).abs() < 1e-2, "{easing:?} at 0");
            assert!((easing.evaluate(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in ALL {
            let mut prev = easing.evaluate(0.0);
            for i in 1..=100 {
                let v = easing.evaluate(i as f32 / 100.0);
                assert!(v >= prev - 1e-6, "{easing:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);
        assert_eq!(EasingFunction::ExpoOut.evaluate(3.0), 1.0);
    }

    #[test]
    fn test_power1_in_out_midpoint() {
        let e = EasingFunction::Power1InOut;
        assert_eq!(e.evaluate(0.5), 0.5);
        assert_eq!(e.evaluate(0.25), 0.125);
    }

    #[test]
    fn test_power2_out() {
        let e = EasingFunction::Power2Out;
        assert_eq!(e.evaluate(0.5), 0.875); // 1 - 0.5³
    }

    #[test]
    fn test_expo_out_is_fast_early() {
        assert!(EasingFunction::ExpoOut.evaluate(0.2) > 0.7);
    }

    #[test]
    fn test_default_is_quadratic_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::QuadraticOut);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EasingFunction::Power2Out).unwrap();
        assert_eq!(json, "\"power2_out\"");
    }
}
