//! Camera for the scroll-driven scene.
//!
//! The camera never orbits: scroll moves it down the section stack and the
//! pointer nudges it sideways.

/// Core camera struct and GPU uniform types.
pub mod core;

pub use self::core::{Camera, CameraUniform};
