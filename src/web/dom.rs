//! Reading page geometry from the DOM and writing effects back to it.
//!
//! Optional elements that are missing are skipped and logged at `debug`.

use rustc_hash::FxHashMap;
use wasm_bindgen::JsCast;

use crate::error::DepthscrollError;
use crate::experience::PageEffect;
use crate::scroll::{PageLayout, Reveal, ScrollMetrics, SectionBounds, TracksFrame};
use crate::widgets::{CountdownDisplay, EntryState, TabSelection, Track};

const COUNTDOWN_IDS: [&str; 4] = ["days", "hours", "minutes", "seconds"];

/// Handle to the page's window and document.
pub struct Page {
    window: web_sys::Window,
    document: web_sys::Document,
    sections: Vec<String>,
    tracks_section: String,
}

impl Page {
    /// The current page, measuring the sections named in `sections`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::Dom`] without a window or document.
    pub fn new(sections: Vec<String>, tracks_section: String) -> Result<Self, DepthscrollError> {
        let window = web_sys::window()
            .ok_or_else(|| DepthscrollError::Dom("no global window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| DepthscrollError::Dom("window has no document".to_owned()))?;
        Ok(Self {
            window,
            document,
            sections,
            tracks_section,
        })
    }

    /// The browser window.
    #[must_use]
    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    /// The page document.
    #[must_use]
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    /// The rendering canvas `#webgl`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::Dom`] when it is missing or not a canvas.
    pub fn canvas(&self) -> Result<web_sys::HtmlCanvasElement, DepthscrollError> {
        self.document
            .get_element_by_id("webgl")
            .ok_or_else(|| DepthscrollError::Dom("missing #webgl canvas".to_owned()))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| DepthscrollError::Dom("#webgl is not a canvas".to_owned()))
    }

    /// Viewport size in CSS pixels.
    #[must_use]
    pub fn viewport(&self) -> (f32, f32) {
        let dimension = |v: Result<wasm_bindgen::JsValue, _>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        (
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    /// Device pixel ratio.
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        self.window.device_pixel_ratio() as f32
    }

    fn scroll_y(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }

    fn document_height(&self) -> f32 {
        self.document
            .document_element()
            .map_or(0.0, |root| root.scroll_height() as f32)
    }

    /// Current scroll state.
    #[must_use]
    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_y: self.scroll_y(),
            document_height: self.document_height(),
            viewport_height: self.viewport().1,
        }
    }

    /// Document-space bounds of `element`, ignoring CSS transforms.
    ///
    /// Pinning and reveals translate elements, so the box is read from the
    /// `offsetTop` chain rather than the client rect. Elements that are not
    /// HTML (no offset box) fall back to the client rect.
    fn bounds(&self, element: &web_sys::Element) -> SectionBounds {
        if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
            let mut top = html.offset_top();
            let mut parent = html.offset_parent();
            while let Some(el) = parent {
                let Some(ancestor) = el.dyn_ref::<web_sys::HtmlElement>() else {
                    break;
                };
                top += ancestor.offset_top();
                parent = ancestor.offset_parent();
            }
            return SectionBounds::new(top as f32, html.offset_height() as f32);
        }
        let rect = element.get_bounding_client_rect();
        SectionBounds::new(rect.top() as f32 + self.scroll_y(), rect.height() as f32)
    }

    /// Measure everything the triggers depend on.
    #[must_use]
    pub fn measure(&self) -> PageLayout {
        let (viewport_width, viewport_height) = self.viewport();
        let mut sections = FxHashMap::default();
        for id in &self.sections {
            match self.document.get_element_by_id(id) {
                Some(el) => {
                    let _ = sections.insert(id.clone(), self.bounds(&el));
                }
                None => log::debug!("section #{id} not found; its triggers are skipped"),
            }
        }
        let milestones = self
            .all(".timeline-milestone")
            .iter()
            .map(|el| self.bounds(el))
            .collect();
        PageLayout {
            viewport_width,
            viewport_height,
            document_height: self.document_height(),
            sections,
            milestones,
            will_fade_count: self
                .all(&format!("#{} .will-fade", self.tracks_section))
                .len(),
            faq_count: self.all(".faq-item").len(),
        }
    }

    /// Every element matching `selector`, in document order.
    #[must_use]
    pub fn all(&self, selector: &str) -> Vec<web_sys::Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            log::warn!("invalid selector '{selector}'");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect()
    }

    fn one(&self, selector: &str) -> Option<web_sys::Element> {
        let found = self.document.query_selector(selector).ok().flatten();
        if found.is_none() {
            log::debug!("'{selector}' not found");
        }
        found
    }

    /// Apply one effect. Effects needing a round trip through the
    /// experience ([`PageEffect::RefreshLayout`], [`PageEffect::ResizeSurface`])
    /// are handled by the caller.
    pub fn apply(&self, effect: &PageEffect, track: Track) {
        match effect {
            PageEffect::NavActive { id } => self.nav_active(id),
            PageEffect::ContentReveal { id, reveal } => {
                for el in self.all(&format!("#{id} .content-wrapper, #{id} .content")) {
                    set_reveal(&el, *reveal);
                }
            }
            PageEffect::MilestoneReveal { index, reveal } => {
                if let Some(el) = self.all(".timeline-milestone").get(*index) {
                    set_reveal(el, *reveal);
                }
            }
            PageEffect::Tracks(frame) => self.tracks(frame),
            PageEffect::FaqEntries(entries) => self.faq_entries(entries),
            PageEffect::FaqGate { open } => self.faq_gate(*open),
            PageEffect::TrackShown(selection) => self.track_shown(*selection),
            PageEffect::CardPop(cards) => {
                let selector = format!("#{} .prize-card", track.view_id());
                for (el, reveal) in self.all(&selector).iter().zip(cards) {
                    set_reveal(el, *reveal);
                }
            }
            PageEffect::ScrollTo { y } => {
                self.window.scroll_to_with_x_and_y(0.0, f64::from(*y));
            }
            PageEffect::Countdown(display) => self.countdown(display),
            PageEffect::RefreshLayout | PageEffect::ResizeSurface { .. } => {}
        }
    }

    fn nav_active(&self, id: &str) {
        for dot in self.all(".dot") {
            let _ = dot.class_list().remove_1("active");
        }
        if let Some(dot) = self.one(&format!(".dot[href=\"#{id}\"]")) {
            let _ = dot.class_list().add_1("active");
        }
    }

    fn tracks(&self, frame: &TracksFrame) {
        let section = &self.tracks_section;
        for (el, opacity) in self
            .all(&format!("#{section} .will-fade"))
            .iter()
            .zip(&frame.will_fade)
        {
            set_style(el, "opacity", &opacity.to_string());
        }
        if let Some(img) = self.one(".masked-img-tracks") {
            let mask = format!("{}%", frame.mask_size);
            set_style(&img, "transform", &format!("scale({})", frame.image_scale));
            set_style(&img, "mask-size", &mask);
            set_style(&img, "-webkit-mask-size", &mask);
        }
        if let Some(content) = self.one("#tracks-masked-content") {
            set_style(&content, "opacity", &frame.content_opacity.to_string());
        }
        // Held in place by counter-translating against the scroll; the
        // margin reserves the pinned distance so later sections follow it.
        if let Some(pinned) = self.document.get_element_by_id(section) {
            set_style(
                &pinned,
                "transform",
                &format!("translateY({}px)", frame.pin_offset),
            );
            set_style(
                &pinned,
                "margin-bottom",
                &format!("{}px", frame.pin_spacing),
            );
        }
    }

    fn faq_entries(&self, entries: &[EntryState]) {
        let items = self.all(".faq-item");
        for entry in entries {
            let Some(item) = items.get(entry.index) else {
                continue;
            };
            let classes = item.class_list();
            let _ = if entry.expanded {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
            let Ok(Some(answer)) = item.query_selector(".faq-answer") else {
                log::warn!("faq item {} has no .faq-answer", entry.index);
                continue;
            };
            if entry.expanded {
                let height = format!("{}px", answer.scroll_height());
                set_style(&answer, "max-height", &height);
            } else {
                clear_style(&answer, "max-height");
            }
        }
    }

    fn faq_gate(&self, open: bool) {
        if let Some(content) = self.document.get_element_by_id("faqContent") {
            let _ = content.class_list().toggle_with_force("visible", open);
        }
        if let Some(container) = self.one(".faq-trigger-container") {
            let _ = container.class_list().toggle_with_force("active", open);
        }
    }

    fn track_shown(&self, selection: TabSelection) {
        let Some(container) = self.document.get_element_by_id("prize-tab-container") else {
            log::debug!("#prize-tab-container not found");
            return;
        };
        if let Ok(buttons) = container.query_selector_all(".tab-btn") {
            for i in 0..buttons.length() {
                let Some(button) = buttons
                    .item(i)
                    .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
                else {
                    continue;
                };
                let active = selection.active_button == Some(i as usize);
                let _ = button.class_list().toggle_with_force("active", active);
            }
        }
        let senior = selection.track == Track::Senior;
        let _ = container
            .class_list()
            .toggle_with_force("senior-active", senior);
        let shown = selection.track;
        for track in [shown, shown.other()] {
            if let Some(view) = self.document.get_element_by_id(track.view_id()) {
                let _ = view
                    .class_list()
                    .toggle_with_force("active-track", track == shown);
            }
        }
    }

    fn countdown(&self, display: &CountdownDisplay) {
        for (id, text) in COUNTDOWN_IDS.iter().zip(display.units.padded()) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(&text));
            }
        }
        if let Some(label) = &display.live_label {
            if let Some(title) = self.one(".countdown-title") {
                title.set_text_content(Some(label));
            }
        }
    }

    /// Size the canvas backing store.
    pub fn size_canvas(&self, width: u32, height: u32) {
        if let Ok(canvas) = self.canvas() {
            canvas.set_width(width);
            canvas.set_height(height);
        }
    }

    /// Text of every `.tab-btn` and the index of `target` among them.
    #[must_use]
    pub fn tab_buttons(&self, target: Option<&web_sys::Element>) -> (Vec<String>, Option<usize>) {
        let buttons = self.all("#prize-tab-container .tab-btn");
        let clicked = target.and_then(|t| buttons.iter().position(|b| b == t));
        let labels = buttons
            .iter()
            .map(|b| b.text_content().unwrap_or_default())
            .collect();
        (labels, clicked)
    }

    /// Number of `.prize-card`s in a track's view.
    #[must_use]
    pub fn card_count(&self, track: Track) -> usize {
        self.all(&format!("#{} .prize-card", track.view_id())).len()
    }
}

fn style(element: &web_sys::Element) -> Option<web_sys::CssStyleDeclaration> {
    element
        .dyn_ref::<web_sys::HtmlElement>()
        .map(web_sys::HtmlElement::style)
}

fn set_style(element: &web_sys::Element, property: &str, value: &str) {
    if let Some(style) = style(element) {
        if let Err(e) = style.set_property(property, value) {
            log::debug!("cannot set {property}: {e:?}");
        }
    }
}

fn clear_style(element: &web_sys::Element, property: &str) {
    if let Some(style) = style(element) {
        let _ = style.remove_property(property);
    }
}

fn set_reveal(element: &web_sys::Element, reveal: Reveal) {
    set_style(element, "opacity", &reveal.opacity.to_string());
    set_style(
        element,
        "transform",
        &format!("translateY({}px)", reveal.translate_y),
    );
}
