use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pointer parallax gains. Each gain multiplies the normalized pointer
/// coordinate in [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Parallax", inline)]
#[serde(default)]
pub struct ParallaxOptions {
    /// Camera x offset per unit of pointer x.
    #[schemars(title = "Camera Shift", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub camera_gain: f32,
    /// Hero group tilt (radians) per unit of pointer.
    #[schemars(title = "Hero Tilt", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub hero_gain: f32,
    /// Arena group tilt (radians) per unit of pointer y.
    #[schemars(title = "Arena Tilt", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub arena_gain: f32,
    /// Arena tilt the pointer offset is added to.
    #[schemars(skip)]
    pub arena_base_tilt: f32,
    /// Tween duration, seconds.
    #[schemars(title = "Parallax Lag", range(min = 0.0, max = 3.0), extend("step" = 0.1))]
    pub duration: f32,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            camera_gain: 2.0,
            hero_gain: 0.1,
            arena_gain: 0.05,
            arena_base_tilt: PI / 2.5,
            duration: 1.0,
        }
    }
}
