//! Named page sections and the navigation dot that marks the active one.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A page section and the camera offset that frames it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Checkpoint {
    /// Element id of the section (without `#`).
    pub id: String,
    /// Camera y when the page is scrolled to this section.
    pub offset: f32,
}

impl Checkpoint {
    /// Checkpoint for section `id` at camera offset `offset`.
    #[must_use]
    pub fn new(id: impl Into<String>, offset: f32) -> Self {
        Self {
            id: id.into(),
            offset,
        }
    }

    /// The landing page's sections, top to bottom.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        [
            ("hero", 0.0),
            ("about", -25.0),
            ("tracks", -45.0),
            ("timeline", -65.0),
            ("faq", -90.0),
            ("prizepool", -115.0),
            ("contact", -140.0),
            ("join", -165.0),
        ]
        .into_iter()
        .map(|(id, offset)| Self::new(id, offset))
        .collect()
    }

    /// CSS selector of the section element.
    #[must_use]
    pub fn selector(&self) -> String {
        format!("#{}", self.id)
    }
}

/// Index of the section the camera is in: the last checkpoint whose offset
/// is at or above `camera_y`. Offsets decrease down the page.
#[must_use]
pub fn current_index(checkpoints: &[Checkpoint], camera_y: f32) -> Option<usize> {
    checkpoints
        .iter()
        .rposition(|cp| cp.offset >= camera_y)
        .or_else(|| (!checkpoints.is_empty()).then_some(0))
}

// ---------------------------------------------------------------------------
// Navigation indicators
// ---------------------------------------------------------------------------

/// Navigation dots, one per section, at most one active.
#[derive(Debug, Clone, Default)]
pub struct NavIndicators {
    ids: Vec<String>,
    active: Option<usize>,
}

impl NavIndicators {
    /// One indicator per checkpoint, none active.
    #[must_use]
    pub fn new(checkpoints: &[Checkpoint]) -> Self {
        Self {
            ids: checkpoints.iter().map(|cp| cp.id.clone()).collect(),
            active: None,
        }
    }

    /// Clear every indicator, then mark the one for `id`. An unknown id
    /// leaves nothing active. Returns whether the active indicator changed.
    pub fn activate(&mut self, id: &str) -> bool {
        let next = self.ids.iter().position(|known| known == id);
        let changed = next != self.active;
        self.active = next;
        changed
    }

    /// Id of the active indicator.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.ids[i].as_str())
    }

    /// Whether the indicator for `id` is active.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active() == Some(id)
    }

    /// Number of active indicators (0 or 1).
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.ids.iter().filter(|id| self.is_active(id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_descend() {
        let cps = Checkpoint::defaults();
        assert_eq!(cps.len(), 8);
        assert_eq!(cps[0], Checkpoint::new("hero", 0.0));
        assert_eq!(cps[7], Checkpoint::new("join", -165.0));
        assert!(cps.windows(2).all(|w| w[0].offset > w[1].offset));
        assert_eq!(cps[4].selector(), "#faq");
    }

    #[test]
    fn current_section_by_camera_y() {
        let cps = Checkpoint::defaults();
        assert_eq!(current_index(&cps, 0.0), Some(0));
        assert_eq!(current_index(&cps, -10.0), Some(0));
        assert_eq!(current_index(&cps, -25.0), Some(1));
        assert_eq!(current_index(&cps, -100.0), Some(4));
        assert_eq!(current_index(&cps, -500.0), Some(7));
        // Above the first section still reports the first.
        assert_eq!(current_index(&cps, 10.0), Some(0));
        assert_eq!(current_index(&[], 0.0), None);
    }

    #[test]
    fn single_active_indicator() {
        let mut nav = NavIndicators::new(&Checkpoint::defaults());
        assert_eq!(nav.active(), None);

        assert!(nav.activate("about"));
        assert!(nav.activate("faq"));
        assert_eq!(nav.active(), Some("faq"));
        assert_eq!(nav.active_count(), 1);
        assert!(!nav.is_active("about"));

        assert!(!nav.activate("faq"));
        assert!(nav.activate("hero"));
        assert_eq!(nav.active(), Some("hero"));
    }

    #[test]
    fn unknown_id_clears() {
        let mut nav = NavIndicators::new(&Checkpoint::defaults());
        let _ = nav.activate("tracks");
        assert!(nav.activate("sponsors"));
        assert_eq!(nav.active(), None);
        assert_eq!(nav.active_count(), 0);
    }
}
