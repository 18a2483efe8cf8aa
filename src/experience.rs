//! The experience context: every piece of mutable page state in one place.
//!
//! An [`Experience`] is driven by two calls. Front ends translate platform
//! input into [`PageEvent`]s for [`Experience::handle_event`], and call
//! [`Experience::update`] once per rendered frame. Both return the
//! [`PageEffect`]s the front end should apply to the page. The scene and
//! camera are read back for rendering through [`Experience::scene`] and
//! [`Experience::camera`].

use chrono::{DateTime, Utc};
use web_time::Instant;

use crate::animation::{frame, AnimatedValues, Tweens};
use crate::camera::Camera;
use crate::error::DepthscrollError;
use crate::gpu::render_context::physical_size;
use crate::input::{normalize, PageEvent, PointerParallax};
use crate::options::Options;
use crate::scene::builder::SceneBuilder;
use crate::scene::Scene;
use crate::scroll::{
    CheckpointTriggerSet, MilestoneReveals, PageLayout, Reveal, ScrollMapper,
    ScrollMetrics, SmoothScroll, TracksFrame, TracksReveal,
};
use crate::util::frame_timing::FrameTiming;
use crate::widgets::{
    AccessGate, Accordion, CardPop, Countdown, CountdownDisplay, EntryState,
    TabSelection, Track, TrackTabs,
};

/// A change the front end applies to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEffect {
    /// Mark the navigation dot for section `id` active and clear the rest.
    NavActive {
        /// Section id.
        id: String,
    },
    /// Style a section's `.content` / `.content-wrapper`.
    ContentReveal {
        /// Section id.
        id: String,
        /// Opacity and offset.
        reveal: Reveal,
    },
    /// Style one `.timeline-milestone`.
    MilestoneReveal {
        /// Milestone index in document order.
        index: usize,
        /// Opacity and offset.
        reveal: Reveal,
    },
    /// Style the tracks section's timeline targets.
    Tracks(TracksFrame),
    /// Expand or collapse FAQ entries.
    FaqEntries(Vec<EntryState>),
    /// Show or hide the FAQ content.
    FaqGate {
        /// Whether the content is shown.
        open: bool,
    },
    /// Show one prize track and activate its tab.
    TrackShown(TabSelection),
    /// Style the `.prize-card`s of the shown track.
    CardPop(Vec<Reveal>),
    /// Page geometry changed; re-measure and send [`PageEvent::Layout`].
    RefreshLayout,
    /// Scroll the page to `y` immediately.
    ScrollTo {
        /// Document offset in CSS pixels.
        y: f32,
    },
    /// Update the countdown.
    Countdown(CountdownDisplay),
    /// Resize the rendering surface.
    ResizeSurface {
        /// Width in physical pixels.
        width: u32,
        /// Height in physical pixels.
        height: u32,
    },
}

/// Owns the scene, camera, tweens, triggers and widgets of the page.
pub struct Experience {
    options: Options,
    scene: Scene,
    camera: Camera,
    values: AnimatedValues,
    tweens: Tweens,
    mapper: ScrollMapper,
    checkpoints: CheckpointTriggerSet,
    milestones: MilestoneReveals,
    tracks: TracksReveal,
    smooth: SmoothScroll,
    parallax: PointerParallax,
    countdown: Countdown,
    faq: Accordion,
    faq_gate: AccessGate,
    tabs: TrackTabs,
    card_pop: Option<CardPop>,
    pin_spacing: Option<f32>,
    layout: PageLayout,
    metrics: ScrollMetrics,
    viewport: (f32, f32),
    frame_timing: FrameTiming,
}

impl Experience {
    /// Build the scene and every trigger from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::OptionsParse`] if a duration is out of
    /// range, and [`DepthscrollError::Trigger`] if a configured trigger
    /// band does not parse.
    pub fn new(options: Options, now: Instant) -> Result<Self, DepthscrollError> {
        options.validate()?;
        let scene = SceneBuilder::new(&options.scene).build();
        let camera = Camera::new(&options.camera, 1.0);
        let [x, y, _] = options.camera.initial_position;
        let values = AnimatedValues {
            camera_x: x,
            camera_y: y,
            ..AnimatedValues::default()
        };

        let mapper = ScrollMapper::new(
            &options.scroll,
            y,
            options.sections.checkpoints.clone(),
        );
        let checkpoints = CheckpointTriggerSet::new(&options.sections)?;
        let milestones = MilestoneReveals::new(&options.sections)?;
        let tracks = TracksReveal::new(&options.sections.tracks)?;

        log::info!(
            "experience ready: {} sections, {} rocks, {} bubbles, countdown to {}",
            options.sections.checkpoints.len(),
            scene.hero.content.rocks.len(),
            scene.water.content.bubbles.len(),
            options.countdown.target,
        );

        Ok(Self {
            scene,
            camera,
            values,
            tweens: Tweens::new(),
            mapper,
            checkpoints,
            milestones,
            tracks,
            smooth: SmoothScroll::new(&options.scroll),
            parallax: PointerParallax::new(&options.parallax),
            countdown: Countdown::new(&options.countdown),
            faq: Accordion::new(0),
            faq_gate: AccessGate::default(),
            tabs: TrackTabs::default(),
            card_pop: None,
            pin_spacing: None,
            layout: PageLayout::default(),
            metrics: ScrollMetrics::default(),
            viewport: (0.0, 0.0),
            frame_timing: FrameTiming::new(now),
            options,
        })
    }

    /// Options the experience was built from.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The decorative scene, for rendering.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The camera, for rendering.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current tweened values.
    #[must_use]
    pub fn values(&self) -> &AnimatedValues {
        &self.values
    }

    /// Last measured page layout.
    #[must_use]
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Last scroll state.
    #[must_use]
    pub fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    /// Active navigation section.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.checkpoints.nav().active()
    }

    /// Expanded FAQ entry.
    #[must_use]
    pub fn expanded_faq(&self) -> Option<usize> {
        self.faq.expanded()
    }

    /// Whether the FAQ content is shown.
    #[must_use]
    pub fn faq_open(&self) -> bool {
        self.faq_gate.is_open()
    }

    /// Shown prize track.
    #[must_use]
    pub fn track(&self) -> Track {
        self.tabs.track()
    }

    /// Frame timing, for diagnostics.
    #[must_use]
    pub fn frame_timing(&self) -> &FrameTiming {
        &self.frame_timing
    }

    /// React to one page event.
    pub fn handle_event(&mut self, event: PageEvent, now: Instant) -> Vec<PageEffect> {
        match event {
            PageEvent::Scroll(metrics) => {
                if self.smooth.is_idle() {
                    self.smooth.set_limit(metrics.max_scroll());
                    self.smooth.sync(metrics.scroll_y);
                }
                self.on_scroll(metrics, now)
            }
            PageEvent::Wheel { delta } => {
                self.smooth.wheel(delta);
                Vec::new()
            }
            PageEvent::PointerMoved { x, y } => {
                let (width, height) = self.viewport;
                let pointer = normalize(x, y, width, height);
                let cancelled =
                    self.parallax
                        .on_pointer(pointer, &self.values, &mut self.tweens, now);
                log::trace!("pointer {pointer}: {cancelled} tweens replaced");
                Vec::new()
            }
            PageEvent::Resize {
                width,
                height,
                pixel_ratio,
            } => self.on_resize(width, height, pixel_ratio),
            PageEvent::Layout(layout) => self.on_layout(layout, now),
            PageEvent::AnchorClicked { id } => {
                self.on_anchor(&id, now);
                Vec::new()
            }
            PageEvent::FaqClicked { index } => {
                let entries = self.faq.toggle(index);
                if entries.is_empty() {
                    Vec::new()
                } else {
                    vec![PageEffect::FaqEntries(entries), PageEffect::RefreshLayout]
                }
            }
            PageEvent::FaqGateClicked => {
                let open = self.faq_gate.toggle();
                vec![PageEffect::FaqGate { open }, PageEffect::RefreshLayout]
            }
            PageEvent::TrackSelected {
                track,
                clicked,
                labels,
                cards,
            } => {
                let selection = self.tabs.select(track, clicked, &labels);
                let pop = CardPop::new(cards, now);
                let first = pop.frame(now);
                self.card_pop = Some(pop);
                vec![
                    PageEffect::TrackShown(selection),
                    PageEffect::CardPop(first),
                    PageEffect::RefreshLayout,
                ]
            }
            PageEvent::CountdownTick(wall) => vec![self.countdown(&wall)],
        }
    }

    /// Countdown display at wall-clock `now`.
    pub fn countdown(&mut self, now: &DateTime<Utc>) -> PageEffect {
        PageEffect::Countdown(self.countdown.tick(now))
    }

    /// Advance one frame: tweens, camera, scene drift, smooth scrolling and
    /// every scrubbed reveal.
    pub fn update(&mut self, now: Instant) -> Vec<PageEffect> {
        let dt = self.frame_timing.tick(now).as_secs_f32();
        self.tweens.apply(&mut self.values, now);
        self.camera.follow(&self.values);
        frame::update(
            &mut self.scene,
            &self.values,
            self.frame_timing.elapsed(),
            dt,
        );

        let mut effects = Vec::new();
        if let Some(y) = self.smooth.update(now, dt) {
            effects.push(PageEffect::ScrollTo { y });
            let metrics = ScrollMetrics {
                scroll_y: y,
                ..self.metrics
            };
            effects.extend(self.on_scroll(metrics, now));
        }

        effects.extend(
            self.checkpoints
                .poll(now)
                .into_iter()
                .map(|(id, reveal)| PageEffect::ContentReveal { id, reveal }),
        );
        effects.extend(
            self.milestones
                .poll(now)
                .into_iter()
                .map(|(index, reveal)| PageEffect::MilestoneReveal { index, reveal }),
        );
        if let Some(tracks) = self.tracks.poll(now) {
            // New pin spacing moves everything below the tracks section.
            let respaced = self.pin_spacing != Some(tracks.pin_spacing);
            self.pin_spacing = Some(tracks.pin_spacing);
            effects.push(PageEffect::Tracks(tracks));
            if respaced {
                effects.push(PageEffect::RefreshLayout);
            }
        }
        if let Some(pop) = &self.card_pop {
            effects.push(PageEffect::CardPop(pop.frame(now)));
            if pop.is_finished(now) {
                self.card_pop = None;
            }
        }
        effects
    }

    fn on_scroll(&mut self, metrics: ScrollMetrics, now: Instant) -> Vec<PageEffect> {
        self.metrics = metrics;
        let update = self
            .mapper
            .on_scroll(metrics, &self.values, &mut self.tweens, now);
        if let Some(section) = &update.entered_section {
            log::debug!(
                "scroll progress {:.3}: camera heading for '{section}'",
                update.progress
            );
        }

        let y = metrics.scroll_y;
        self.milestones.on_scroll(&self.layout, y, now);
        self.tracks.on_scroll(&self.layout, y, now);
        self.checkpoints
            .on_scroll(&self.layout, y, now)
            .map(|id| PageEffect::NavActive { id })
            .into_iter()
            .collect()
    }

    fn on_resize(&mut self, width: f32, height: f32, pixel_ratio: f32) -> Vec<PageEffect> {
        self.viewport = (width, height);
        self.camera.resize(width, height);
        let (width, height) = physical_size(
            width,
            height,
            pixel_ratio,
            self.options.camera.max_pixel_ratio,
        );
        vec![
            PageEffect::ResizeSurface { width, height },
            PageEffect::RefreshLayout,
        ]
    }

    fn on_layout(&mut self, layout: PageLayout, now: Instant) -> Vec<PageEffect> {
        self.faq.set_len(layout.faq_count);
        if self.viewport == (0.0, 0.0) {
            self.viewport = (layout.viewport_width, layout.viewport_height);
            self.camera
                .resize(layout.viewport_width, layout.viewport_height);
        }
        self.metrics.document_height = layout.document_height;
        self.metrics.viewport_height = layout.viewport_height;
        self.smooth.set_limit(self.metrics.max_scroll());
        self.layout = layout;

        self.checkpoints.invalidate();
        self.tracks.invalidate();
        self.on_scroll(self.metrics, now)
    }

    fn on_anchor(&mut self, id: &str, now: Instant) {
        let Some(bounds) = self.layout.section(id) else {
            log::debug!("anchor target '#{id}' not in layout");
            return;
        };
        if self.smooth.scroll_to(bounds.top, now) {
            log::debug!("scroll to '#{id}' replaced a running scroll");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::{Checkpoint, SectionBounds};
    use chrono::TimeZone;
    use std::f32::consts::PI;
    use web_time::Duration;

    const VH: f32 = 1000.0;

    fn layout() -> PageLayout {
        let sections = Checkpoint::defaults()
            .into_iter()
            .enumerate()
            .map(|(i, cp)| (cp.id, SectionBounds::new(i as f32 * VH, VH)))
            .collect();
        PageLayout {
            viewport_width: 1280.0,
            viewport_height: VH,
            document_height: 8.0 * VH,
            sections,
            milestones: vec![SectionBounds::new(3200.0, 200.0)],
            will_fade_count: 2,
            faq_count: 3,
        }
    }

    fn experience(t0: Instant) -> Experience {
        let mut exp = Experience::new(Options::default(), t0).unwrap();
        let _ = exp.handle_event(PageEvent::Layout(layout()), t0);
        exp
    }

    fn scroll(y: f32) -> PageEvent {
        PageEvent::Scroll(ScrollMetrics {
            scroll_y: y,
            document_height: 8.0 * VH,
            viewport_height: VH,
        })
    }

    #[test]
    fn starts_at_initial_camera_position() {
        let t0 = Instant::now();
        let exp = Experience::new(Options::default(), t0).unwrap();
        assert_eq!(exp.values().camera_y, 0.0);
        assert_eq!(exp.camera().eye.z, 5.0);
        assert!(exp.scene().is_finite());
    }

    #[test]
    fn layout_activates_first_section() {
        let t0 = Instant::now();
        let mut exp = Experience::new(Options::default(), t0).unwrap();
        let effects = exp.handle_event(PageEvent::Layout(layout()), t0);
        assert!(effects.contains(&PageEffect::NavActive { id: "hero".to_owned() }));
        assert_eq!(exp.active_section(), Some("hero"));
    }

    #[test]
    fn scroll_moves_camera_to_mapped_depth() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let _ = exp.handle_event(scroll(7.0 * VH), t0);
        let _ = exp.update(t0 + Duration::from_millis(500));
        let mid = exp.values().camera_y;
        assert!(mid < 0.0 && mid > -165.0, "{mid}");
        let _ = exp.update(t0 + Duration::from_secs(3));
        assert_eq!(exp.values().camera_y, -165.0);
        assert_eq!(exp.camera().eye.y, -165.0);
    }

    #[test]
    fn at_most_one_section_active() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        for (i, y) in [0.0, 2500.0, 5200.0, 1200.0].into_iter().enumerate() {
            let _ = exp.handle_event(scroll(y), t0 + Duration::from_millis(i as u64));
            assert!(exp.active_section().is_some());
        }
        assert_eq!(exp.active_section(), Some("about"));
    }

    #[test]
    fn content_reveals_are_polled_each_frame() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let effects = exp.update(t0 + Duration::from_millis(16));
        assert!(effects
            .iter()
            .any(|e| matches!(e, PageEffect::ContentReveal { id, .. } if id == "hero")));
        let quiet = exp.update(t0 + Duration::from_millis(32));
        assert!(!quiet
            .iter()
            .any(|e| matches!(e, PageEffect::ContentReveal { .. })));
    }

    #[test]
    fn pointer_tilts_arena() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let _ = exp.handle_event(
            PageEvent::Resize {
                width: 1000.0,
                height: 800.0,
                pixel_ratio: 1.0,
            },
            t0,
        );
        let _ = exp.handle_event(PageEvent::PointerMoved { x: 1000.0, y: 0.0 }, t0);
        let _ = exp.update(t0 + Duration::from_secs(2));
        assert_eq!(exp.values().camera_x, 2.0);
        assert!((exp.values().arena_tilt_x - (PI / 2.5 + 0.05)).abs() < 1e-6);
    }

    #[test]
    fn pin_spacing_change_refreshes_layout_once() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let first = exp.update(t0 + Duration::from_millis(16));
        let at = first
            .iter()
            .position(|e| matches!(e, PageEffect::Tracks(frame) if frame.pin_spacing == 500.0))
            .unwrap();
        assert_eq!(first.get(at + 1), Some(&PageEffect::RefreshLayout));

        // Re-measuring the same page re-emits the frame but keeps the spacing.
        let _ = exp.handle_event(PageEvent::Layout(layout()), t0 + Duration::from_millis(20));
        let second = exp.update(t0 + Duration::from_millis(32));
        assert!(second.iter().any(|e| matches!(e, PageEffect::Tracks(_))));
        assert!(!second.contains(&PageEffect::RefreshLayout));
    }

    #[test]
    fn unrepresentable_durations_are_errors() {
        let options: Options = toml::from_str("[scroll]\ncamera_duration = 1e20").unwrap();
        assert!(matches!(
            Experience::new(options, Instant::now()),
            Err(DepthscrollError::OptionsParse(_))
        ));
        let options: Options = toml::from_str("[scroll]\nanchor_duration = inf").unwrap();
        assert!(Experience::new(options, Instant::now()).is_err());
    }

    #[test]
    fn resize_caps_pixel_ratio() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let effects = exp.handle_event(
            PageEvent::Resize {
                width: 800.0,
                height: 600.0,
                pixel_ratio: 3.0,
            },
            t0,
        );
        assert_eq!(
            effects[0],
            PageEffect::ResizeSurface {
                width: 1600,
                height: 1200
            }
        );
        assert!((exp.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn anchor_click_scrolls_to_section() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let _ = exp.handle_event(PageEvent::AnchorClicked { id: "faq".to_owned() }, t0);
        let _ = exp.update(t0);
        let effects = exp.update(t0 + Duration::from_secs(2));
        assert!(effects.contains(&PageEffect::ScrollTo { y: 4.0 * VH }));
        assert_eq!(exp.metrics().scroll_y, 4.0 * VH);

        let none = exp.handle_event(
            PageEvent::AnchorClicked {
                id: "missing".to_owned(),
            },
            t0,
        );
        assert!(none.is_empty());
    }

    #[test]
    fn wheel_scrolls_smoothly() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let _ = exp.handle_event(PageEvent::Wheel { delta: 500.0 }, t0);
        let effects = exp.update(t0 + Duration::from_millis(16));
        let y = effects
            .iter()
            .find_map(|e| match e {
                PageEffect::ScrollTo { y } => Some(*y),
                _ => None,
            })
            .unwrap();
        assert!(y > 0.0 && y < 500.0);
    }

    #[test]
    fn one_faq_entry_expanded() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let _ = exp.handle_event(PageEvent::FaqClicked { index: 0 }, t0);
        let _ = exp.handle_event(PageEvent::FaqClicked { index: 2 }, t0);
        assert_eq!(exp.expanded_faq(), Some(2));
        let _ = exp.handle_event(PageEvent::FaqClicked { index: 2 }, t0);
        assert_eq!(exp.expanded_faq(), None);
        assert!(exp
            .handle_event(PageEvent::FaqClicked { index: 9 }, t0)
            .is_empty());
    }

    #[test]
    fn faq_gate_toggles() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let effects = exp.handle_event(PageEvent::FaqGateClicked, t0);
        assert_eq!(effects[0], PageEffect::FaqGate { open: true });
        assert!(exp.faq_open());
    }

    #[test]
    fn track_switch_pops_cards() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let labels = vec!["Junior Track".to_owned(), "Senior Track".to_owned()];
        let effects = exp.handle_event(
            PageEvent::TrackSelected {
                track: Track::Senior,
                clicked: None,
                labels,
                cards: 3,
            },
            t0,
        );
        assert_eq!(exp.track(), Track::Senior);
        assert!(matches!(
            &effects[0],
            PageEffect::TrackShown(sel) if sel.active_button == Some(1)
        ));
        assert!(effects.contains(&PageEffect::RefreshLayout));

        let done = exp.update(t0 + Duration::from_secs(2));
        let last = done
            .iter()
            .find_map(|e| match e {
                PageEffect::CardPop(cards) => Some(cards.clone()),
                _ => None,
            })
            .unwrap();
        assert!(last.iter().all(|r| r.opacity == 1.0 && r.translate_y == 0.0));
        assert!(!exp
            .update(t0 + Duration::from_secs(3))
            .iter()
            .any(|e| matches!(e, PageEffect::CardPop(_))));
    }

    fn display(effect: PageEffect) -> CountdownDisplay {
        match effect {
            PageEffect::Countdown(display) => Some(display),
            _ => None,
        }
        .unwrap()
    }

    #[test]
    fn countdown_goes_live_and_stays() {
        let t0 = Instant::now();
        let mut exp = experience(t0);
        let before = Utc.with_ymd_and_hms(2026, 2, 13, 3, 30, 0).unwrap();
        let shown = display(exp.countdown(&before));
        assert_eq!(shown.units.days, 1);
        assert_eq!(shown.live_label, None);

        let after = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let _ = exp.handle_event(PageEvent::CountdownTick(after), t0);
        assert!(display(exp.countdown(&before)).live_label.is_some());
    }
}
