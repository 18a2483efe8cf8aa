//! Centralized experience options with TOML preset and JSON support.
//!
//! All tweakable settings (camera, scene population, scroll mapping,
//! parallax, section triggers, countdown) are consolidated here. Options
//! serialize to/from TOML for presets on native builds, and are parsed from
//! JSON when the web build is mounted from JavaScript.

mod camera;
mod countdown;
mod parallax;
mod scene;
mod scroll;
mod sections;

use std::path::Path;

pub use camera::CameraOptions;
pub use countdown::CountdownOptions;
pub use parallax::ParallaxOptions;
pub use scene::{LightingOptions, SceneOptions};
pub use scroll::{OverscrollPolicy, ScrollOptions};
pub use sections::{SectionOptions, TracksOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DepthscrollError;

/// Longest accepted duration option, seconds.
pub const MAX_DURATION_SECS: f32 = 3600.0;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial files (e.g. only overriding `[scroll]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and resting position.
    pub camera: CameraOptions,
    /// Scene population, lights and fog.
    pub scene: SceneOptions,
    /// Scroll-to-camera mapping and smooth scrolling.
    pub scroll: ScrollOptions,
    /// Pointer parallax gains.
    pub parallax: ParallaxOptions,
    /// Page sections and their triggers.
    pub sections: SectionOptions,
    /// Event countdown.
    pub countdown: CountdownOptions,
}

impl Options {
    /// JSON Schema of the options document accepted by `mount`.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a JSON document. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::OptionsParse`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, DepthscrollError> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| DepthscrollError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`DepthscrollError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, DepthscrollError> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| DepthscrollError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check that every duration is finite and within
    /// `0..=MAX_DURATION_SECS`, and that the countdown interval is positive.
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::OptionsParse`] naming the first field
    /// out of range.
    pub fn validate(&self) -> Result<(), DepthscrollError> {
        let tracks = &self.sections.tracks;
        let durations = [
            ("scroll.camera_duration", self.scroll.camera_duration),
            ("scroll.anchor_duration", self.scroll.anchor_duration),
            ("parallax.duration", self.parallax.duration),
            ("sections.fade_scrub", self.sections.fade_scrub),
            ("sections.milestone_scrub", self.sections.milestone_scrub),
            ("sections.tracks.scrub", tracks.scrub),
            ("sections.tracks.fade_duration", tracks.fade_duration),
            ("sections.tracks.fade_stagger", tracks.fade_stagger),
            ("countdown.interval", self.countdown.interval),
        ];
        for (name, secs) in durations {
            if !(0.0..=MAX_DURATION_SECS).contains(&secs) {
                return Err(DepthscrollError::OptionsParse(format!(
                    "{name} = {secs} is outside 0..={MAX_DURATION_SECS} seconds"
                )));
            }
        }
        if self.countdown.interval <= 0.0 {
            return Err(DepthscrollError::OptionsParse(
                "countdown.interval must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), DepthscrollError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DepthscrollError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(DepthscrollError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[scroll]
overscroll = "extrapolate"

[countdown]
target = "2030-01-01T00:00:00+00:00"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.scroll.overscroll, OverscrollPolicy::Extrapolate);
        assert_eq!(opts.scroll.total_depth, -165.0);
        assert_eq!(opts.countdown.target.to_rfc3339(), "2030-01-01T00:00:00+00:00");
        assert_eq!(opts.countdown.live_label, "EVENT IS LIVE!");
        assert_eq!(opts.sections.checkpoints.len(), 8);
    }

    #[test]
    fn json_mount_argument_parses() {
        let opts =
            Options::from_json(r#"{ "parallax": { "camera_gain": 3.0 } }"#)
                .unwrap();
        assert_eq!(opts.parallax.camera_gain, 3.0);
        assert_eq!(opts.parallax.hero_gain, 0.1);
    }

    #[test]
    fn out_of_range_durations_are_rejected() {
        // 1e39 overflows f32 to infinity.
        let err = Options::from_json(r#"{ "parallax": { "duration": 1e39 } }"#)
            .unwrap_err();
        assert!(matches!(err, DepthscrollError::OptionsParse(_)));
        assert!(Options::from_json(r#"{ "scroll": { "anchor_duration": -1.0 } }"#).is_err());
        assert!(Options::from_json(r#"{ "countdown": { "interval": 0.0 } }"#).is_err());

        let mut opts = Options::default();
        opts.sections.tracks.scrub = f32::NAN;
        assert!(opts.validate().is_err());
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn load_rejects_unrepresentable_durations() {
        let dir = std::env::temp_dir().join("depthscroll-options-range-test");
        let path = dir.join("huge.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[scroll]\ncamera_duration = 1e20\n").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(DepthscrollError::OptionsParse(_))
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn malformed_json_is_an_options_error() {
        let err = Options::from_json("{ nope").unwrap_err();
        assert!(matches!(err, DepthscrollError::OptionsParse(_)));
    }

    #[test]
    fn save_and_load_preset() {
        let dir = std::env::temp_dir().join("depthscroll-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.scene.seed = 42;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded.scene.seed, 42);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("scroll"));
        assert!(props.contains_key("parallax"));
        assert!(props.contains_key("countdown"));

        // Skipped fields should be absent
        let scroll = &props["scroll"]["properties"];
        assert!(scroll.get("camera_duration").is_some());
        assert!(scroll.get("total_depth").is_none());
    }
}
