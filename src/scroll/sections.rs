//! Per-section scroll triggers: content fades, the navigation spy and the
//! timeline milestone reveals.

use rustc_hash::FxHashMap;
use web_time::Instant;

use super::checkpoint::{Checkpoint, NavIndicators};
use super::scrub::Scrub;
use super::trigger::{SectionBounds, TriggerBand};
use crate::error::DepthscrollError;
use crate::options::SectionOptions;
use crate::util::easing::EasingFunction;

/// Measured page geometry, in CSS pixels. Supplied by the front end and
/// re-measured on resize and after layout-changing interactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Viewport width.
    pub viewport_width: f32,
    /// Viewport height.
    pub viewport_height: f32,
    /// Full document height.
    pub document_height: f32,
    /// Section bounds by id. Missing sections have no triggers.
    pub sections: FxHashMap<String, SectionBounds>,
    /// Bounds of every `.timeline-milestone`, in document order.
    pub milestones: Vec<SectionBounds>,
    /// Number of `.will-fade` elements inside the tracks section.
    pub will_fade_count: usize,
    /// Number of `.faq-item` entries.
    pub faq_count: usize,
}

impl PageLayout {
    /// Bounds of section `id`.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<SectionBounds> {
        self.sections.get(id).copied()
    }
}

/// Opacity and vertical offset of a revealed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    /// 0 = hidden, 1 = fully shown.
    pub opacity: f32,
    /// CSS `translateY` in pixels.
    pub translate_y: f32,
}

impl Reveal {
    /// Fully hidden, pushed down by `offset`.
    #[must_use]
    pub fn hidden(offset: f32) -> Self {
        Self {
            opacity: 0.0,
            translate_y: offset,
        }
    }
}

// ---------------------------------------------------------------------------
// Reveal trigger
// ---------------------------------------------------------------------------

/// A scrubbed, reversible fade-up tied to a band.
#[derive(Debug, Clone)]
pub struct RevealTrigger {
    band: TriggerBand,
    scrub: Scrub,
    easing: EasingFunction,
    offset: f32,
    primed: bool,
    emitted: Option<Reveal>,
}

impl RevealTrigger {
    /// Fade from `offset` px below over `band`, following scroll with
    /// `scrub` seconds of lag.
    #[must_use]
    pub fn new(band: TriggerBand, scrub: f32, easing: EasingFunction, offset: f32) -> Self {
        Self {
            band,
            scrub: Scrub::new(scrub),
            easing,
            offset,
            primed: false,
            emitted: None,
        }
    }

    /// Retarget from the scroll position. The first measurement snaps.
    pub fn on_scroll(
        &mut self,
        bounds: SectionBounds,
        viewport_height: f32,
        scroll_y: f32,
        now: Instant,
    ) {
        let progress = self.band.progress(bounds, viewport_height, scroll_y);
        if self.primed {
            let _ = self.scrub.set_target(progress, now);
        } else {
            self.scrub.snap(progress);
            self.primed = true;
        }
    }

    /// Reveal state at `now`.
    pub fn sample(&mut self, now: Instant) -> Reveal {
        let eased = self.easing.evaluate(self.scrub.sample(now));
        Reveal {
            opacity: eased,
            translate_y: self.offset * (1.0 - eased),
        }
    }

    /// Reveal state at `now`, only when it differs from the last one
    /// returned. Nothing is reported before the first measurement.
    pub fn poll(&mut self, now: Instant) -> Option<Reveal> {
        if !self.primed {
            return None;
        }
        let reveal = self.sample(now);
        if self.emitted == Some(reveal) {
            return None;
        }
        self.emitted = Some(reveal);
        Some(reveal)
    }

    /// Forget the last emitted state so the next poll re-emits.
    pub fn invalidate(&mut self) {
        self.emitted = None;
    }
}

// ---------------------------------------------------------------------------
// Checkpoint triggers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct SectionTrigger {
    id: String,
    fade: RevealTrigger,
    spy_active: bool,
}

/// Fade-in and navigation-spy triggers for every checkpoint.
#[derive(Debug, Clone)]
pub struct CheckpointTriggerSet {
    spy_band: TriggerBand,
    sections: Vec<SectionTrigger>,
    nav: NavIndicators,
}

impl CheckpointTriggerSet {
    /// Content fade curve (`power1.out`).
    pub const FADE_EASING: EasingFunction = EasingFunction::QuadraticOut;

    /// Triggers for `options.checkpoints`.
    ///
    /// # Errors
    ///
    /// [`DepthscrollError::Trigger`] if a band string is malformed.
    pub fn new(options: &SectionOptions) -> Result<Self, DepthscrollError> {
        let fade_band = TriggerBand::parse(&options.fade_start, &options.fade_end)?;
        let spy_band = TriggerBand::parse(&options.spy_start, &options.spy_end)?;
        let sections = options
            .checkpoints
            .iter()
            .map(|cp: &Checkpoint| SectionTrigger {
                id: cp.id.clone(),
                fade: RevealTrigger::new(
                    fade_band,
                    options.fade_scrub,
                    Self::FADE_EASING,
                    options.fade_offset,
                ),
                spy_active: false,
            })
            .collect();
        Ok(Self {
            spy_band,
            sections,
            nav: NavIndicators::new(&options.checkpoints),
        })
    }

    /// Update every trigger for the scroll position. Returns the id of the
    /// section whose spy entered, after marking its indicator active. When
    /// several enter at once the last in page order wins.
    pub fn on_scroll(
        &mut self,
        layout: &PageLayout,
        scroll_y: f32,
        now: Instant,
    ) -> Option<String> {
        let vh = layout.viewport_height;
        let mut entered = None;
        for section in &mut self.sections {
            let Some(bounds) = layout.section(&section.id) else {
                continue;
            };
            section.fade.on_scroll(bounds, vh, scroll_y, now);
            let active = self.spy_band.is_active(bounds, vh, scroll_y);
            if active && !section.spy_active {
                entered = Some(section.id.clone());
            }
            section.spy_active = active;
        }
        if let Some(id) = &entered {
            if self.nav.activate(id) {
                log::debug!("nav indicator -> {id}");
            }
        }
        entered
    }

    /// Changed content reveals at `now`, by section id.
    pub fn poll(&mut self, now: Instant) -> Vec<(String, Reveal)> {
        self.sections
            .iter_mut()
            .filter_map(|s| s.fade.poll(now).map(|r| (s.id.clone(), r)))
            .collect()
    }

    /// Navigation indicators.
    #[must_use]
    pub fn nav(&self) -> &NavIndicators {
        &self.nav
    }

    /// Re-emit every reveal on the next poll (after a re-measure).
    pub fn invalidate(&mut self) {
        for section in &mut self.sections {
            section.fade.invalidate();
        }
    }
}

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

/// Scrubbed fade-ins of the timeline milestones.
#[derive(Debug, Clone)]
pub struct MilestoneReveals {
    band: TriggerBand,
    scrub: f32,
    offset: f32,
    triggers: Vec<RevealTrigger>,
}

impl MilestoneReveals {
    /// Milestone curve (`power2.out`).
    pub const EASING: EasingFunction = EasingFunction::Power2Out;

    /// Milestone triggers; one is created per measured milestone.
    ///
    /// # Errors
    ///
    /// [`DepthscrollError::Trigger`] if the band is malformed.
    pub fn new(options: &SectionOptions) -> Result<Self, DepthscrollError> {
        Ok(Self {
            band: TriggerBand::parse(&options.milestone_start, &options.milestone_end)?,
            scrub: options.milestone_scrub,
            offset: options.fade_offset,
            triggers: Vec::new(),
        })
    }

    /// Update for the scroll position, growing or shrinking the trigger
    /// list to the number of measured milestones.
    pub fn on_scroll(&mut self, layout: &PageLayout, scroll_y: f32, now: Instant) {
        let count = layout.milestones.len();
        if self.triggers.len() != count {
            self.triggers.resize_with(count, || {
                RevealTrigger::new(self.band, self.scrub, Self::EASING, self.offset)
            });
        }
        for (trigger, bounds) in self.triggers.iter_mut().zip(&layout.milestones) {
            trigger.on_scroll(*bounds, layout.viewport_height, scroll_y, now);
        }
    }

    /// Changed reveals at `now`, by milestone index.
    pub fn poll(&mut self, now: Instant) -> Vec<(usize, Reveal)> {
        self.triggers
            .iter_mut()
            .enumerate()
            .filter_map(|(i, t)| t.poll(now).map(|r| (i, r)))
            .collect()
    }

    /// Number of tracked milestones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Whether no milestones are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    const VH: f32 = 1000.0;

    /// Eight stacked 1000 px sections in checkpoint order.
    fn layout() -> PageLayout {
        let sections = Checkpoint::defaults()
            .into_iter()
            .enumerate()
            .map(|(i, cp)| (cp.id, SectionBounds::new(i as f32 * 1000.0, 1000.0)))
            .collect();
        PageLayout {
            viewport_width: 1280.0,
            viewport_height: VH,
            document_height: 8000.0,
            sections,
            milestones: vec![SectionBounds::new(3200.0, 200.0), SectionBounds::new(3600.0, 200.0)],
            will_fade_count: 3,
            faq_count: 4,
        }
    }

    #[test]
    fn spy_tracks_last_entered_section() {
        let t0 = Instant::now();
        let layout = layout();
        let mut set = CheckpointTriggerSet::new(&SectionOptions::default()).unwrap();

        assert_eq!(set.on_scroll(&layout, 0.0, t0).as_deref(), Some("hero"));
        assert_eq!(set.nav().active(), Some("hero"));

        // Still inside hero's band: no new entry.
        assert_eq!(set.on_scroll(&layout, 200.0, t0), None);

        assert_eq!(set.on_scroll(&layout, 2600.0, t0).as_deref(), Some("timeline"));
        assert_eq!(set.nav().active(), Some("timeline"));
        assert_eq!(set.nav().active_count(), 1);

        // Back up.
        assert_eq!(set.on_scroll(&layout, 600.0, t0).as_deref(), Some("about"));
        assert_eq!(set.nav().active(), Some("about"));
    }

    #[test]
    fn leaving_every_band_keeps_last_indicator() {
        let t0 = Instant::now();
        let layout = layout();
        let mut set = CheckpointTriggerSet::new(&SectionOptions::default()).unwrap();
        let _ = set.on_scroll(&layout, 7000.0, t0);
        assert_eq!(set.nav().active(), Some("join"));
        assert_eq!(set.on_scroll(&layout, 9000.0, t0), None);
        assert_eq!(set.nav().active(), Some("join"));
    }

    #[test]
    fn missing_sections_are_skipped() {
        let t0 = Instant::now();
        let mut layout = layout();
        let _ = layout.sections.remove("about");
        let mut set = CheckpointTriggerSet::new(&SectionOptions::default()).unwrap();
        assert_eq!(set.on_scroll(&layout, 600.0, t0), None);
        let ids: Vec<String> = set.poll(t0).into_iter().map(|(id, _)| id).collect();
        assert!(!ids.iter().any(|id| id == "about"));
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn content_fades_in_and_reverses() {
        let t0 = Instant::now();
        let layout = layout();
        let mut set = CheckpointTriggerSet::new(&SectionOptions::default()).unwrap();

        // about: band 300..600.
        let _ = set.on_scroll(&layout, 0.0, t0);
        let first = set.poll(t0);
        let about = first.iter().find(|(id, _)| id == "about").unwrap().1;
        assert_eq!(about, Reveal::hidden(50.0));

        let _ = set.on_scroll(&layout, 600.0, t0);
        let _ = set.poll(t0 + Duration::from_secs(2));
        let shown = set.sections[1].fade.sample(t0 + Duration::from_secs(2));
        assert_eq!(shown.opacity, 1.0);
        assert_eq!(shown.translate_y, 0.0);

        let t1 = t0 + Duration::from_secs(3);
        let _ = set.on_scroll(&layout, 0.0, t1);
        let back = set.sections[1].fade.sample(t1 + Duration::from_secs(2));
        assert_eq!(back, Reveal::hidden(50.0));
    }

    #[test]
    fn poll_only_reports_changes() {
        let t0 = Instant::now();
        let layout = layout();
        let mut set = CheckpointTriggerSet::new(&SectionOptions::default()).unwrap();
        let _ = set.on_scroll(&layout, 0.0, t0);
        assert_eq!(set.poll(t0).len(), 8);
        assert!(set.poll(t0).is_empty());
        set.invalidate();
        assert_eq!(set.poll(t0).len(), 8);
    }

    #[test]
    fn milestones_follow_layout() {
        let t0 = Instant::now();
        let mut layout = layout();
        let mut milestones = MilestoneReveals::new(&SectionOptions::default()).unwrap();

        // First milestone band: 3200-800=2400 .. 3200-500=2700.
        milestones.on_scroll(&layout, 2550.0, t0);
        assert_eq!(milestones.len(), 2);
        let reveals = milestones.poll(t0);
        assert_eq!(reveals.len(), 2);
        let (_, first) = reveals[0];
        assert!(first.opacity > 0.5 && first.opacity < 1.0);
        assert_eq!(reveals[1].1, Reveal::hidden(50.0));

        layout.milestones.clear();
        milestones.on_scroll(&layout, 2550.0, t0);
        assert!(milestones.is_empty());
    }

    #[test]
    fn malformed_band_is_an_error() {
        let options = SectionOptions {
            fade_start: "sideways".to_owned(),
            ..SectionOptions::default()
        };
        assert!(matches!(
            CheckpointTriggerSet::new(&options),
            Err(DepthscrollError::Trigger(_))
        ));
    }
}
