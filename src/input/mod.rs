//! Input handling: the page event type and pointer parallax.

/// Platform-agnostic page events.
pub mod event;
/// Pointer normalization and parallax targets.
pub mod pointer;

pub use event::PageEvent;
pub use pointer::{normalize, PointerParallax};
