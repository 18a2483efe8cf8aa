//! Shared utilities: easing curves, frame timing, and colour parsing.

pub mod color;
pub mod easing;
pub mod frame_timing;
