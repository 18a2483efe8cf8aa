use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scroll::checkpoint::Checkpoint;

/// Page sections and the scroll triggers attached to them.
///
/// Bands are written as `"<start>" / "<end>"` anchor pairs, each anchor
/// being `"<element edge> <viewport position>"` (e.g. `"top 70%"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sections", inline)]
#[serde(default)]
pub struct SectionOptions {
    /// Ordered page sections with their camera offsets.
    #[schemars(skip)]
    pub checkpoints: Vec<Checkpoint>,
    /// Content fade band start.
    #[schemars(skip)]
    pub fade_start: String,
    /// Content fade band end.
    #[schemars(skip)]
    pub fade_end: String,
    /// Content fade scrub lag, seconds.
    #[schemars(title = "Fade Scrub", range(min = 0.0, max = 3.0), extend("step" = 0.1))]
    pub fade_scrub: f32,
    /// Vertical offset (px) content starts from before fading in.
    #[schemars(skip)]
    pub fade_offset: f32,
    /// Navigation spy band start.
    #[schemars(skip)]
    pub spy_start: String,
    /// Navigation spy band end.
    #[schemars(skip)]
    pub spy_end: String,
    /// Timeline milestone band start.
    #[schemars(skip)]
    pub milestone_start: String,
    /// Timeline milestone band end.
    #[schemars(skip)]
    pub milestone_end: String,
    /// Timeline milestone scrub lag, seconds.
    #[schemars(title = "Milestone Scrub", range(min = 0.0, max = 3.0), extend("step" = 0.1))]
    pub milestone_scrub: f32,
    /// Tracks reveal.
    pub tracks: TracksOptions,
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            checkpoints: Checkpoint::defaults(),
            fade_start: "top 70%".to_owned(),
            fade_end: "top 40%".to_owned(),
            fade_scrub: 1.0,
            fade_offset: 50.0,
            spy_start: "top center".to_owned(),
            spy_end: "bottom center".to_owned(),
            milestone_start: "top 80%".to_owned(),
            milestone_end: "top 50%".to_owned(),
            milestone_scrub: 0.5,
            tracks: TracksOptions::default(),
        }
    }
}

/// Pinned, scrubbed reveal timeline on the tracks section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tracks", inline)]
#[serde(default)]
pub struct TracksOptions {
    /// Section id the timeline is attached to.
    #[schemars(skip)]
    pub section: String,
    /// Band start on wide viewports.
    #[schemars(skip)]
    pub start: String,
    /// Band start at or below `mobile_breakpoint`.
    #[schemars(skip)]
    pub mobile_start: String,
    /// Band end.
    #[schemars(skip)]
    pub end: String,
    /// Viewport width (px) at or below which `mobile_start` applies.
    #[schemars(skip)]
    pub mobile_breakpoint: f32,
    /// Scrub lag, seconds.
    #[schemars(title = "Tracks Scrub", range(min = 0.0, max = 3.0), extend("step" = 0.1))]
    pub scrub: f32,
    /// Seconds each `.will-fade` element takes to fade out.
    #[schemars(skip)]
    pub fade_duration: f32,
    /// Delay between consecutive `.will-fade` elements.
    #[schemars(skip)]
    pub fade_stagger: f32,
    /// Final scale of the masked image.
    #[schemars(skip)]
    pub image_scale: f32,
    /// Mask size (percent) before the reveal.
    #[schemars(skip)]
    pub mask_from: f32,
    /// Mask size (percent) after the reveal.
    #[schemars(skip)]
    pub mask_to: f32,
}

impl Default for TracksOptions {
    fn default() -> Self {
        Self {
            section: "tracks".to_owned(),
            start: "top top".to_owned(),
            mobile_start: "top 20%".to_owned(),
            end: "bottom center".to_owned(),
            mobile_breakpoint: 767.0,
            scrub: 1.5,
            fade_duration: 0.5,
            fade_stagger: 0.2,
            image_scale: 1.3,
            mask_from: 100.0,
            mask_to: 400.0,
        }
    }
}
