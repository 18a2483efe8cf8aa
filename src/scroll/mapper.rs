//! Page scroll position to camera depth.

use web_time::{Duration, Instant};

use super::checkpoint::{current_index, Checkpoint};
use crate::animation::tween::{AnimatedValues, Tween, TweenTarget, Tweens};
use crate::options::{OverscrollPolicy, ScrollOptions};
use crate::util::easing::EasingFunction;
use crate::util::frame_timing::seconds;

/// Page scroll measurements, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset.
    pub scroll_y: f32,
    /// Total scrollable document height.
    pub document_height: f32,
    /// Viewport height.
    pub viewport_height: f32,
}

impl ScrollMetrics {
    /// Largest reachable scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        self.document_height - self.viewport_height
    }

    /// Scroll progress through the page. A page that cannot scroll is at
    /// progress 0.
    #[must_use]
    pub fn progress(&self, policy: OverscrollPolicy) -> f32 {
        let max = self.max_scroll();
        if max <= 0.0 || !max.is_finite() || !self.scroll_y.is_finite() {
            return 0.0;
        }
        let raw = self.scroll_y / max;
        match policy {
            OverscrollPolicy::Clamp => raw.clamp(0.0, 1.0),
            OverscrollPolicy::Extrapolate => raw,
        }
    }
}

/// Outcome of one scroll event.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollUpdate {
    /// Progress after the overscroll policy.
    pub progress: f32,
    /// Camera y the new tween heads for.
    pub target_y: f32,
    /// Camera tween cancelled by this one.
    pub cancelled: Option<Tween>,
    /// Section id, when the target moved into a different section.
    pub entered_section: Option<String>,
}

/// Maps scroll progress to a camera depth and tweens the camera there.
#[derive(Debug, Clone)]
pub struct ScrollMapper {
    initial_y: f32,
    total_depth: f32,
    duration: Duration,
    overscroll: OverscrollPolicy,
    checkpoints: Vec<Checkpoint>,
    current: Option<usize>,
}

impl ScrollMapper {
    /// Camera tween curve.
    pub const EASING: EasingFunction = EasingFunction::Power2Out;

    /// Mapper for a camera starting at `initial_y`.
    #[must_use]
    pub fn new(options: &ScrollOptions, initial_y: f32, checkpoints: Vec<Checkpoint>) -> Self {
        let current = current_index(&checkpoints, initial_y);
        Self {
            initial_y,
            total_depth: options.total_depth,
            duration: seconds(options.camera_duration),
            overscroll: options.overscroll,
            checkpoints,
            current,
        }
    }

    /// Camera y for a progress value.
    #[must_use]
    pub fn target_offset(&self, progress: f32) -> f32 {
        self.initial_y + progress * self.total_depth
    }

    /// Section the camera is heading for.
    #[must_use]
    pub fn current_section(&self) -> Option<&Checkpoint> {
        self.current.and_then(|i| self.checkpoints.get(i))
    }

    /// Handle a scroll: start a camera tween toward the mapped depth,
    /// cancelling the one in flight.
    pub fn on_scroll(
        &mut self,
        metrics: ScrollMetrics,
        values: &AnimatedValues,
        tweens: &mut Tweens,
        now: Instant,
    ) -> ScrollUpdate {
        let progress = metrics.progress(self.overscroll);
        let target_y = self.target_offset(progress);
        let cancelled = tweens.start(Tween::towards(
            values,
            TweenTarget::CameraY,
            target_y,
            self.duration,
            Self::EASING,
            now,
        ));

        let index = current_index(&self.checkpoints, target_y);
        let entered_section = if index == self.current {
            None
        } else {
            self.current = index;
            let id = self.current_section().map(|cp| cp.id.clone());
            if let Some(id) = &id {
                log::debug!("camera heading into section '{id}' (y = {target_y:.1})");
            }
            id
        };

        ScrollUpdate {
            progress,
            target_y,
            cancelled,
            entered_section,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_y: f32) -> ScrollMetrics {
        ScrollMetrics {
            scroll_y,
            document_height: 11_000.0,
            viewport_height: 1000.0,
        }
    }

    fn mapper(overscroll: OverscrollPolicy) -> ScrollMapper {
        let options = ScrollOptions {
            overscroll,
            ..ScrollOptions::default()
        };
        ScrollMapper::new(&options, 0.0, Checkpoint::defaults())
    }

    #[test]
    fn progress_endpoints_map_to_depth_range() {
        let m = mapper(OverscrollPolicy::Clamp);
        assert_eq!(m.target_offset(metrics(0.0).progress(OverscrollPolicy::Clamp)), 0.0);
        assert_eq!(
            m.target_offset(metrics(10_000.0).progress(OverscrollPolicy::Clamp)),
            -165.0
        );
    }

    #[test]
    fn offsets_are_monotonic() {
        let m = mapper(OverscrollPolicy::Clamp);
        let mut last = f32::INFINITY;
        for step in 0..=100 {
            let y = m.target_offset(metrics(step as f32 * 100.0).progress(OverscrollPolicy::Clamp));
            assert!(y <= last);
            last = y;
        }
    }

    #[test]
    fn overscroll_policies() {
        let over = metrics(11_000.0);
        let under = metrics(-500.0);
        assert_eq!(over.progress(OverscrollPolicy::Clamp), 1.0);
        assert_eq!(under.progress(OverscrollPolicy::Clamp), 0.0);
        assert_eq!(over.progress(OverscrollPolicy::Extrapolate), 1.1);
        assert_eq!(under.progress(OverscrollPolicy::Extrapolate), -0.05);
    }

    #[test]
    fn unscrollable_page_is_at_top() {
        let short = ScrollMetrics {
            scroll_y: 40.0,
            document_height: 800.0,
            viewport_height: 1000.0,
        };
        assert_eq!(short.progress(OverscrollPolicy::Extrapolate), 0.0);
    }

    #[test]
    fn scroll_restarts_camera_tween() {
        let t0 = Instant::now();
        let mut m = mapper(OverscrollPolicy::Clamp);
        let mut values = AnimatedValues::default();
        let mut tweens = Tweens::new();

        let first = m.on_scroll(metrics(5000.0), &values, &mut tweens, t0);
        assert!(first.cancelled.is_none());
        assert_eq!(first.target_y, -82.5);
        assert_eq!(first.entered_section.as_deref(), Some("timeline"));

        let later = t0 + Duration::from_millis(300);
        tweens.apply(&mut values, later);
        let second = m.on_scroll(metrics(0.0), &values, &mut tweens, later);
        assert_eq!(second.cancelled.map(|t| t.to), Some(-82.5));
        assert_eq!(second.entered_section.as_deref(), Some("hero"));
        assert_eq!(tweens.len(), 1);

        tweens.apply(&mut values, t0 + Duration::from_secs(2));
        assert_eq!(values.camera_y, 0.0);
    }

    #[test]
    fn same_section_reports_nothing() {
        let t0 = Instant::now();
        let mut m = mapper(OverscrollPolicy::Clamp);
        let values = AnimatedValues::default();
        let mut tweens = Tweens::new();
        let update = m.on_scroll(metrics(100.0), &values, &mut tweens, t0);
        assert_eq!(update.entered_section, None);
        assert_eq!(m.current_section().map(|c| c.id.as_str()), Some("hero"));
    }
}
