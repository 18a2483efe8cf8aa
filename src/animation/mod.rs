//! Time-driven animation: eased tweens on the shared animated values and
//! the per-frame drift of the decorative scene.

pub mod frame;
pub mod tween;

pub use tween::{AnimatedValues, Tween, TweenTarget, Tweens};
