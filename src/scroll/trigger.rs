//! Scroll trigger bands.
//!
//! A band runs between two anchors. Each anchor pairs a point on the
//! trigger element with a point on the viewport, written
//! `"<element> <viewport>"`: `"top 70%"` fires when the element's top edge
//! reaches 70% of the way down the viewport. Positions are `top`, `center`,
//! `bottom`, a percentage (`"40%"`) or a pixel length (`"120px"`, `"120"`).

use std::fmt;
use std::str::FromStr;

use crate::error::DepthscrollError;

/// A position along an element or the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Fraction of the length (top = 0, bottom = 1).
    Fraction(f32),
    /// Absolute pixels from the top.
    Pixels(f32),
}

impl Position {
    /// Offset from the top of something `length` pixels tall.
    #[must_use]
    pub fn resolve(self, length: f32) -> f32 {
        match self {
            Self::Fraction(f) => f * length,
            Self::Pixels(px) => px,
        }
    }
}

impl FromStr for Position {
    type Err = DepthscrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || DepthscrollError::Trigger(format!("invalid position '{token}'"));
        match token {
            "top" => Ok(Self::Fraction(0.0)),
            "center" => Ok(Self::Fraction(0.5)),
            "bottom" => Ok(Self::Fraction(1.0)),
            _ => {
                let (number, percent) = match token.strip_suffix('%') {
                    Some(n) => (n, true),
                    None => (token.strip_suffix("px").unwrap_or(token), false),
                };
                let value: f32 = number.trim().parse().map_err(|_| invalid())?;
                if !value.is_finite() {
                    return Err(invalid());
                }
                Ok(if percent {
                    Self::Fraction(value / 100.0)
                } else {
                    Self::Pixels(value)
                })
            }
        }
    }
}

/// Element position meeting a viewport position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Point on the trigger element.
    pub element: Position,
    /// Point on the viewport.
    pub viewport: Position,
}

impl Anchor {
    /// Scroll offset at which the anchor is reached.
    #[must_use]
    pub fn scroll_position(&self, bounds: SectionBounds, viewport_height: f32) -> f32 {
        bounds.top + self.element.resolve(bounds.height)
            - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for Anchor {
    type Err = DepthscrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DepthscrollError::Trigger(format!(
                "anchor '{s}' must be '<element> <viewport>'"
            )));
        };
        Ok(Self {
            element: element.parse()?,
            viewport: viewport.parse()?,
        })
    }
}

/// Document-space extent of a trigger element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionBounds {
    /// Distance from the document top to the element's top edge.
    pub top: f32,
    /// Element height.
    pub height: f32,
}

impl SectionBounds {
    /// Bounds from document top and height.
    #[must_use]
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

// ---------------------------------------------------------------------------
// Band
// ---------------------------------------------------------------------------

/// The scroll range between a start and an end anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerBand {
    /// Where progress is 0.
    pub start: Anchor,
    /// Where progress is 1.
    pub end: Anchor,
}

impl TriggerBand {
    /// Parse both anchors.
    ///
    /// # Errors
    ///
    /// [`DepthscrollError::Trigger`] if either anchor is malformed.
    pub fn parse(start: &str, end: &str) -> Result<Self, DepthscrollError> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// Scroll offsets of the start and end. The end never precedes the
    /// start.
    #[must_use]
    pub fn range(&self, bounds: SectionBounds, viewport_height: f32) -> (f32, f32) {
        let start = self.start.scroll_position(bounds, viewport_height);
        let end = self.end.scroll_position(bounds, viewport_height).max(start);
        (start, end)
    }

    /// Progress through the band in [0, 1]. A zero-length band steps from
    /// 0 to 1 at its start.
    #[must_use]
    pub fn progress(&self, bounds: SectionBounds, viewport_height: f32, scroll_y: f32) -> f32 {
        let (start, end) = self.range(bounds, viewport_height);
        let length = end - start;
        if length <= f32::EPSILON {
            return if scroll_y >= start { 1.0 } else { 0.0 };
        }
        ((scroll_y - start) / length).clamp(0.0, 1.0)
    }

    /// Whether `scroll_y` lies inside the band. The end is exclusive so
    /// back-to-back bands are never active together.
    #[must_use]
    pub fn is_active(&self, bounds: SectionBounds, viewport_height: f32, scroll_y: f32) -> bool {
        let (start, end) = self.range(bounds, viewport_height);
        scroll_y >= start && scroll_y < end
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fraction(v) => write!(f, "{}%", v * 100.0),
            Self::Pixels(v) => write!(f, "{v}px"),
        }
    }
}
