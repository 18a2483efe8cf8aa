use chrono::{DateTime, Utc};

use crate::scroll::mapper::ScrollMetrics;
use crate::scroll::sections::PageLayout;
use crate::widgets::tabs::Track;

/// Platform-agnostic page events.
///
/// Front ends translate DOM or window events into these and feed them to
/// [`Experience::handle_event`](crate::experience::Experience::handle_event).
///
/// # Example
///
/// ```ignore
/// let effects = experience.handle_event(
///     PageEvent::PointerMoved { x: 640.0, y: 360.0 },
///     Instant::now(),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The page scrolled.
    Scroll(ScrollMetrics),
    /// Wheel input to be smoothed (positive = down).
    Wheel {
        /// Delta in CSS pixels.
        delta: f32,
    },
    /// Pointer moved, in client pixels.
    PointerMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Viewport resized.
    Resize {
        /// Width in CSS pixels.
        width: f32,
        /// Height in CSS pixels.
        height: f32,
        /// Device pixel ratio.
        pixel_ratio: f32,
    },
    /// Page geometry re-measured.
    Layout(PageLayout),
    /// An in-page anchor (`href="#id"`) was clicked.
    AnchorClicked {
        /// Section id, without `#`.
        id: String,
    },
    /// A FAQ question was clicked.
    FaqClicked {
        /// Entry index in document order.
        index: usize,
    },
    /// The FAQ access trigger was clicked.
    FaqGateClicked,
    /// A prize track tab was requested.
    TrackSelected {
        /// Requested track.
        track: Track,
        /// Index of the clicked `.tab-btn`, when the click came from one.
        clicked: Option<usize>,
        /// Text of every `.tab-btn`, in document order.
        labels: Vec<String>,
        /// Number of `.prize-card`s in the requested track's view.
        cards: usize,
    },
    /// Countdown refresh at wall-clock time.
    CountdownTick(DateTime<Utc>),
}
