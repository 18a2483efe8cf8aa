//! Junior/senior prize track switcher.

use std::fmt;

use web_time::{Duration, Instant};

use crate::scroll::sections::Reveal;
use crate::util::easing::EasingFunction;

/// One of the two prize tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Track {
    /// Junior track (shown first).
    #[default]
    Junior,
    /// Senior track.
    Senior,
}

impl Track {
    /// Track named by an `onclick` argument. Anything but `"junior"` is
    /// the senior track.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("junior") {
            Self::Junior
        } else {
            Self::Senior
        }
    }

    /// Lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Senior => "senior",
        }
    }

    /// Element id of the track's view.
    #[must_use]
    pub fn view_id(self) -> &'static str {
        match self {
            Self::Junior => "junior-track",
            Self::Senior => "senior-track",
        }
    }

    /// The other track.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Junior => Self::Senior,
            Self::Senior => Self::Junior,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of switching tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSelection {
    /// Visible track.
    pub track: Track,
    /// Index of the single active tab button, if one could be found.
    pub active_button: Option<usize>,
}

/// The tab strip: which track is shown and which button is lit.
#[derive(Debug, Clone, Default)]
pub struct TrackTabs {
    track: Track,
    active_button: Option<usize>,
}

impl TrackTabs {
    /// Visible track.
    #[must_use]
    pub fn track(&self) -> Track {
        self.track
    }

    /// Active tab button.
    #[must_use]
    pub fn active_button(&self) -> Option<usize> {
        self.active_button
    }

    /// Show `track`. `clicked` is the index of the clicked tab button when
    /// the click came from one; otherwise the first button whose trimmed,
    /// lowercased label contains the track name is lit.
    pub fn select(
        &mut self,
        track: Track,
        clicked: Option<usize>,
        labels: &[String],
    ) -> TabSelection {
        let active_button = clicked.filter(|&i| i < labels.len()).or_else(|| {
            labels
                .iter()
                .position(|label| label.trim().to_lowercase().contains(track.name()))
        });
        if active_button.is_none() {
            log::debug!("no tab button matches track '{track}'");
        }
        self.track = track;
        self.active_button = active_button;
        TabSelection {
            track,
            active_button,
        }
    }
}

// ---------------------------------------------------------------------------
// Card pop
// ---------------------------------------------------------------------------

/// Staggered fade-up of the prize cards of a newly shown track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPop {
    count: usize,
    started: Instant,
}

impl CardPop {
    /// Length of each card's animation.
    pub const DURATION: Duration = Duration::from_millis(400);
    /// Delay between consecutive cards.
    pub const STAGGER: Duration = Duration::from_millis(100);
    /// Starting downward offset, px.
    pub const OFFSET: f32 = 20.0;
    /// Curve (`power1.out`).
    pub const EASING: EasingFunction = EasingFunction::QuadraticOut;

    /// Pop `count` cards starting at `now`.
    #[must_use]
    pub fn new(count: usize, now: Instant) -> Self {
        Self {
            count,
            started: now,
        }
    }

    /// Time from start until the last card settles.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        match self.count {
            0 => Duration::ZERO,
            n => Self::STAGGER * (n as u32 - 1) + Self::DURATION,
        }
    }

    /// Whether every card has settled by `now`.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.total_duration()
    }

    /// State of each card at `now`.
    #[must_use]
    pub fn frame(&self, now: Instant) -> Vec<Reveal> {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        let duration = Self::DURATION.as_secs_f32();
        let stagger = Self::STAGGER.as_secs_f32();
        (0..self.count)
            .map(|i| {
                let t = (elapsed - i as f32 * stagger) / duration;
                let eased = Self::EASING.evaluate(t);
                Reveal {
                    opacity: eased,
                    translate_y: Self::OFFSET * (1.0 - eased),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["  Junior Track ".to_owned(), "SENIOR TRACK".to_owned()]
    }

    #[test]
    fn names_map_to_tracks() {
        assert_eq!(Track::from_name("junior"), Track::Junior);
        assert_eq!(Track::from_name("senior"), Track::Senior);
        assert_eq!(Track::from_name("anything"), Track::Senior);
        assert_eq!(Track::Junior.other(), Track::Senior);
        assert_eq!(Track::Senior.view_id(), "senior-track");
    }

    #[test]
    fn clicked_button_wins() {
        let mut tabs = TrackTabs::default();
        let sel = tabs.select(Track::Senior, Some(1), &labels());
        assert_eq!(sel.active_button, Some(1));
        assert_eq!(tabs.track(), Track::Senior);
    }

    #[test]
    fn falls_back_to_label_match() {
        let mut tabs = TrackTabs::default();
        assert_eq!(tabs.select(Track::Senior, None, &labels()).active_button, Some(1));
        assert_eq!(tabs.select(Track::Junior, None, &labels()).active_button, Some(0));
        // Out-of-range click index also falls back.
        assert_eq!(tabs.select(Track::Senior, Some(9), &labels()).active_button, Some(1));
    }

    #[test]
    fn single_active_button_even_with_duplicate_labels() {
        let mut tabs = TrackTabs::default();
        let dup = vec!["junior".to_owned(), "junior again".to_owned()];
        assert_eq!(tabs.select(Track::Junior, None, &dup).active_button, Some(0));
        assert_eq!(tabs.select(Track::Senior, None, &dup).active_button, None);
        assert_eq!(tabs.active_button(), None);
    }

    #[test]
    fn cards_pop_in_sequence() {
        let t0 = Instant::now();
        let pop = CardPop::new(3, t0);
        assert_eq!(pop.total_duration(), Duration::from_millis(600));

        let start = pop.frame(t0);
        assert!(start.iter().all(|r| *r == Reveal::hidden(20.0)));

        let mid = pop.frame(t0 + Duration::from_millis(250));
        assert!(mid[0].opacity > mid[1].opacity);
        assert!(mid[1].opacity > mid[2].opacity);

        let end = pop.frame(t0 + Duration::from_millis(600));
        assert!(end.iter().all(|r| r.opacity == 1.0 && r.translate_y == 0.0));
        assert!(pop.is_finished(t0 + Duration::from_millis(600)));
    }
}
