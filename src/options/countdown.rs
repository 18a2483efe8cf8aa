use chrono::{DateTime, FixedOffset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Event countdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Countdown", inline)]
#[serde(default)]
pub struct CountdownOptions {
    /// Instant the event starts (RFC 3339).
    #[schemars(with = "String")]
    pub target: DateTime<FixedOffset>,
    /// Status text shown once the event has started.
    pub live_label: String,
    /// Seconds between display refreshes.
    #[schemars(skip)]
    pub interval: f32,
}

/// Start of the event: 14 February 2026, 09:00 IST.
const DEFAULT_TARGET: &str = "2026-02-14T09:00:00+05:30";

impl Default for CountdownOptions {
    fn default() -> Self {
        Self {
            target: DateTime::parse_from_rfc3339(DEFAULT_TARGET)
                .unwrap_or_default(),
            live_label: "EVENT IS LIVE!".to_owned(),
            interval: 1.0,
        }
    }
}
