use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What to do with scroll positions outside `[0, max_scroll]` (rubber-band
/// overscroll on touch devices).
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum OverscrollPolicy {
    /// Clamp progress to [0, 1]; the camera never leaves the section range.
    #[default]
    Clamp,
    /// Let progress run past the ends so the camera follows the bounce.
    Extrapolate,
}

/// Scroll-to-camera mapping and smooth scrolling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scroll", inline)]
#[serde(default)]
pub struct ScrollOptions {
    /// Camera y offset at full scroll progress.
    #[schemars(skip)]
    pub total_depth: f32,
    /// Duration of the camera catch-up tween, seconds.
    #[schemars(title = "Camera Lag", range(min = 0.0, max = 3.0), extend("step" = 0.1))]
    pub camera_duration: f32,
    /// Handling of progress outside [0, 1].
    pub overscroll: OverscrollPolicy,
    /// Per-frame (at 60 Hz) damping factor for wheel scrolling.
    #[schemars(title = "Wheel Smoothing", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub wheel_lerp: f32,
    /// Duration of anchor-navigation scrolls, seconds.
    #[schemars(title = "Anchor Scroll", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub anchor_duration: f32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            total_depth: -165.0,
            camera_duration: 1.0,
            overscroll: OverscrollPolicy::Clamp,
            wheel_lerp: 0.1,
            anchor_duration: 1.5,
        }
    }
}
