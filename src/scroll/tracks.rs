//! The pinned reveal timeline on the tracks section.
//!
//! Timeline, in timeline seconds:
//!
//! 1. each `.will-fade` element fades out, staggered;
//! 2. the masked image scales up while its mask grows (1 s);
//! 3. the masked content fades in (1 s).
//!
//! Band progress is scrubbed and mapped linearly onto the timeline.
//!
//! While the band is scrolled the section is held in place by translating
//! it down by the scroll distance covered so far. The section's bottom
//! margin reserves that same distance (the pin spacing), so content after
//! it is pushed down instead of being overlapped once the band ends.

use web_time::Instant;

use super::scrub::Scrub;
use super::sections::PageLayout;
use super::trigger::TriggerBand;
use crate::error::DepthscrollError;
use crate::options::TracksOptions;
use crate::util::easing::EasingFunction;

const MASK_STEP: f32 = 1.0;
const CONTENT_STEP: f32 = 1.0;

/// Styles of the tracks section at one point of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TracksFrame {
    /// Opacity of each `.will-fade` element, in document order.
    pub will_fade: Vec<f32>,
    /// Scale of `.masked-img-tracks`.
    pub image_scale: f32,
    /// Mask size of `.masked-img-tracks`, percent.
    pub mask_size: f32,
    /// Opacity of `#tracks-masked-content`.
    pub content_opacity: f32,
    /// Downward translation of the pinned section, px.
    pub pin_offset: f32,
    /// Space reserved below the pinned section: the band length, px.
    pub pin_spacing: f32,
}

/// Scroll-scrubbed, pinned tracks timeline.
#[derive(Debug, Clone)]
pub struct TracksReveal {
    section: String,
    desktop: TriggerBand,
    mobile: TriggerBand,
    mobile_breakpoint: f32,
    fade_duration: f32,
    fade_stagger: f32,
    image_scale: f32,
    mask_from: f32,
    mask_to: f32,
    scrub: Scrub,
    primed: bool,
    will_fade_count: usize,
    pin_offset: f32,
    pin_spacing: f32,
    emitted: Option<TracksFrame>,
}

impl TracksReveal {
    /// Curve of every step.
    pub const EASING: EasingFunction = EasingFunction::Power1InOut;

    /// Timeline from options.
    ///
    /// # Errors
    ///
    /// [`DepthscrollError::Trigger`] if a band string is malformed.
    pub fn new(options: &TracksOptions) -> Result<Self, DepthscrollError> {
        Ok(Self {
            section: options.section.clone(),
            desktop: TriggerBand::parse(&options.start, &options.end)?,
            mobile: TriggerBand::parse(&options.mobile_start, &options.end)?,
            mobile_breakpoint: options.mobile_breakpoint,
            fade_duration: options.fade_duration.max(0.0),
            fade_stagger: options.fade_stagger.max(0.0),
            image_scale: options.image_scale,
            mask_from: options.mask_from,
            mask_to: options.mask_to,
            scrub: Scrub::new(options.scrub),
            primed: false,
            will_fade_count: 0,
            pin_offset: 0.0,
            pin_spacing: 0.0,
            emitted: None,
        })
    }

    /// Band in effect for a viewport width.
    #[must_use]
    pub fn band(&self, viewport_width: f32) -> &TriggerBand {
        if viewport_width <= self.mobile_breakpoint {
            &self.mobile
        } else {
            &self.desktop
        }
    }

    /// Length of the fade-out step, seconds.
    #[must_use]
    pub fn fade_step(&self) -> f32 {
        match self.will_fade_count {
            0 => 0.0,
            n => self.fade_duration + self.fade_stagger * (n - 1) as f32,
        }
    }

    /// Length of the whole timeline, seconds.
    #[must_use]
    pub fn total_duration(&self) -> f32 {
        self.fade_step() + MASK_STEP + CONTENT_STEP
    }

    /// Retarget from the scroll position. Does nothing when the layout
    /// has no tracks section.
    pub fn on_scroll(&mut self, layout: &PageLayout, scroll_y: f32, now: Instant) {
        let Some(bounds) = layout.section(&self.section) else {
            return;
        };
        self.will_fade_count = layout.will_fade_count;
        let band = *self.band(layout.viewport_width);
        let (start, end) = band.range(bounds, layout.viewport_height);
        self.pin_spacing = (end - start).max(0.0);
        self.pin_offset = (scroll_y - start).clamp(0.0, self.pin_spacing);

        let progress = band.progress(bounds, layout.viewport_height, scroll_y);
        if self.primed {
            let _ = self.scrub.set_target(progress, now);
        } else {
            self.scrub.snap(progress);
            self.primed = true;
        }
    }

    /// Timeline state for a progress in [0, 1].
    #[must_use]
    pub fn frame_at(&self, progress: f32) -> TracksFrame {
        let time = progress.clamp(0.0, 1.0) * self.total_duration();
        let ease = |start: f32, length: f32| {
            if length <= 0.0 {
                return if time >= start { 1.0 } else { 0.0 };
            }
            Self::EASING.evaluate((time - start) / length)
        };

        let will_fade = (0..self.will_fade_count)
            .map(|i| 1.0 - ease(i as f32 * self.fade_stagger, self.fade_duration))
            .collect();
        let mask = ease(self.fade_step(), MASK_STEP);
        let content = ease(self.fade_step() + MASK_STEP, CONTENT_STEP);

        TracksFrame {
            will_fade,
            image_scale: 1.0 + (self.image_scale - 1.0) * mask,
            mask_size: self.mask_from + (self.mask_to - self.mask_from) * mask,
            content_opacity: content,
            pin_offset: self.pin_offset,
            pin_spacing: self.pin_spacing,
        }
    }

    /// Timeline state at `now`, only when it changed since the last poll.
    pub fn poll(&mut self, now: Instant) -> Option<TracksFrame> {
        if !self.primed {
            return None;
        }
        let progress = self.scrub.sample(now);
        let frame = self.frame_at(progress);
        if self.emitted.as_ref() == Some(&frame) {
            return None;
        }
        self.emitted = Some(frame.clone());
        Some(frame)
    }

    /// Re-emit on the next poll.
    pub fn invalidate(&mut self) {
        self.emitted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::trigger::SectionBounds;
    use web_time::Duration;

    fn layout(viewport_width: f32) -> PageLayout {
        let mut layout = PageLayout {
            viewport_width,
            viewport_height: 1000.0,
            document_height: 10_000.0,
            will_fade_count: 3,
            ..PageLayout::default()
        };
        let _ = layout
            .sections
            .insert("tracks".to_owned(), SectionBounds::new(2000.0, 1500.0));
        layout
    }

    fn reveal() -> TracksReveal {
        TracksReveal::new(&TracksOptions::default()).unwrap()
    }

    #[test]
    fn mobile_viewports_start_earlier() {
        let r = reveal();
        let bounds = SectionBounds::new(2000.0, 1500.0);
        assert_eq!(r.band(1280.0).range(bounds, 1000.0), (2000.0, 3000.0));
        assert_eq!(r.band(767.0).range(bounds, 1000.0), (1800.0, 3000.0));
    }

    #[test]
    fn timeline_endpoints() {
        let mut r = reveal();
        r.on_scroll(&layout(1280.0), 0.0, Instant::now());
        assert!((r.total_duration() - 2.9).abs() < 1e-6);

        let start = r.frame_at(0.0);
        assert_eq!(start.will_fade, vec![1.0; 3]);
        assert_eq!(start.image_scale, 1.0);
        assert_eq!(start.mask_size, 100.0);
        assert_eq!(start.content_opacity, 0.0);

        let end = r.frame_at(1.0);
        assert_eq!(end.will_fade, vec![0.0; 3]);
        assert!((end.image_scale - 1.3).abs() < 1e-6);
        assert_eq!(end.mask_size, 400.0);
        assert_eq!(end.content_opacity, 1.0);
    }

    #[test]
    fn steps_run_in_order() {
        let mut r = reveal();
        r.on_scroll(&layout(1280.0), 0.0, Instant::now());
        // Fade step ends at 0.9 s of 2.9 s.
        let after_fade = r.frame_at(0.9 / 2.9 + 1e-4);
        assert!(after_fade.will_fade.iter().all(|&o| o < 1e-3));
        assert!(after_fade.image_scale < 1.01);
        assert_eq!(after_fade.content_opacity, 0.0);

        let mid_fade = r.frame_at(0.35 / 2.9);
        assert!(mid_fade.will_fade[0] < mid_fade.will_fade[1]);
        assert!(mid_fade.will_fade[1] < mid_fade.will_fade[2]);
    }

    #[test]
    fn pin_offset_tracks_scroll_inside_band() {
        let t0 = Instant::now();
        let mut r = reveal();
        let layout = layout(1280.0);
        r.on_scroll(&layout, 1500.0, t0);
        assert_eq!(r.poll(t0).unwrap().pin_offset, 0.0);
        r.on_scroll(&layout, 2400.0, t0);
        assert_eq!(r.poll(t0 + Duration::from_secs(3)).unwrap().pin_offset, 400.0);
        r.on_scroll(&layout, 9000.0, t0);
        assert_eq!(r.frame_at(1.0).pin_offset, 1000.0);
    }

    #[test]
    fn pin_spacing_covers_the_final_offset() {
        let t0 = Instant::now();
        let mut r = reveal();
        let desktop = layout(1280.0);
        r.on_scroll(&desktop, 0.0, t0);
        let before = r.poll(t0).unwrap();
        assert_eq!(before.pin_spacing, 1000.0);
        assert_eq!(before.pin_offset, 0.0);

        // Past the band the section rests exactly inside its reserved space.
        r.on_scroll(&desktop, 9000.0, t0);
        let after = r.poll(t0 + Duration::from_secs(3)).unwrap();
        assert_eq!(after.pin_offset, after.pin_spacing);

        // Mobile starts 200 px earlier, so the band is longer.
        let mut mobile = reveal();
        mobile.on_scroll(&layout(600.0), 0.0, t0);
        assert_eq!(mobile.poll(t0).unwrap().pin_spacing, 1200.0);
    }

    #[test]
    fn no_section_no_frames() {
        let mut r = reveal();
        r.on_scroll(&PageLayout::default(), 100.0, Instant::now());
        assert!(r.poll(Instant::now()).is_none());
    }

    #[test]
    fn without_will_fade_elements_the_mask_starts_at_once() {
        let mut r = reveal();
        let mut l = layout(1280.0);
        l.will_fade_count = 0;
        r.on_scroll(&l, 0.0, Instant::now());
        assert_eq!(r.total_duration(), 2.0);
        assert!(r.frame_at(0.25).image_scale > 1.0);
        assert!(r.frame_at(0.25).will_fade.is_empty());
    }
}
