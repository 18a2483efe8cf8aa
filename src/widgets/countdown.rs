//! Countdown to the event start.

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::options::CountdownOptions;

/// Whole days, hours, minutes and seconds of a remaining duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownUnits {
    /// Whole days.
    pub days: i64,
    /// Hours past the last whole day, 0..24.
    pub hours: i64,
    /// Minutes past the last whole hour, 0..60.
    pub minutes: i64,
    /// Seconds past the last whole minute, 0..60.
    pub seconds: i64,
}

impl CountdownUnits {
    /// Floor components of `millis` milliseconds. Negative input is zero.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        let secs = millis.max(0) / 1000;
        Self {
            days: secs / 86_400,
            hours: secs % 86_400 / 3600,
            minutes: secs % 3600 / 60,
            seconds: secs % 60,
        }
    }

    /// The four units, each zero-padded to at least two digits.
    #[must_use]
    pub fn padded(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds].map(|v| format!("{v:02}"))
    }
}

/// What the countdown shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDisplay {
    /// Remaining time.
    pub units: CountdownUnits,
    /// Replacement title once the event is live.
    pub live_label: Option<String>,
}

/// Counts down to a fixed instant; once reached it stays live.
#[derive(Debug, Clone)]
pub struct Countdown {
    target: DateTime<FixedOffset>,
    live_label: String,
    live: bool,
}

impl Countdown {
    /// Countdown from options.
    #[must_use]
    pub fn new(options: &CountdownOptions) -> Self {
        Self {
            target: options.target,
            live_label: options.live_label.clone(),
            live: false,
        }
    }

    /// The instant counted down to.
    #[must_use]
    pub fn target(&self) -> DateTime<FixedOffset> {
        self.target
    }

    /// Whether the target has been reached.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Display at wall-clock `now`. Reaching the target latches the live
    /// state; later calls with earlier clocks do not revert it.
    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> CountdownDisplay {
        if !self.live {
            let remaining = self.target.signed_duration_since(now);
            if remaining.num_milliseconds() <= 0 {
                self.live = true;
                log::info!("countdown reached {}: event is live", self.target);
            } else {
                return CountdownDisplay {
                    units: CountdownUnits::from_millis(remaining.num_milliseconds()),
                    live_label: None,
                };
            }
        }
        CountdownDisplay {
            units: CountdownUnits::default(),
            live_label: Some(self.live_label.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn countdown() -> Countdown {
        Countdown::new(&CountdownOptions::default())
    }

    #[test]
    fn floors_each_unit() {
        let mut c = countdown();
        let remaining = Duration::days(3)
            + Duration::hours(4)
            + Duration::minutes(5)
            + Duration::seconds(6)
            + Duration::milliseconds(999);
        let now = c.target() - remaining;
        let display = c.tick(&now);
        assert_eq!(
            display.units,
            CountdownUnits {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            }
        );
        assert_eq!(display.live_label, None);
        assert_eq!(display.units.padded(), ["03", "04", "05", "06"].map(String::from));
    }

    #[test]
    fn works_across_time_zones() {
        let mut c = countdown();
        // 03:30 UTC is 09:00 IST; one minute before.
        let now = Utc.with_ymd_and_hms(2026, 2, 14, 3, 29, 0).unwrap();
        assert_eq!(c.tick(&now).units.minutes, 1);
    }

    #[test]
    fn long_spans_keep_all_digits() {
        assert_eq!(CountdownUnits::from_millis(150 * 86_400_000).padded()[0], "150");
    }

    #[test]
    fn goes_live_and_stays_live() {
        let mut c = countdown();
        let at = c.target();
        let display = c.tick(&at);
        assert!(c.is_live());
        assert_eq!(display.units, CountdownUnits::default());
        assert_eq!(display.live_label.as_deref(), Some("EVENT IS LIVE!"));
        assert_eq!(display.units.padded(), ["00", "00", "00", "00"].map(String::from));

        // A clock stepping backwards does not revert.
        let earlier = at - Duration::hours(1);
        assert_eq!(c.tick(&earlier).live_label.as_deref(), Some("EVENT IS LIVE!"));
    }

    #[test]
    fn sub_second_remainder_is_not_live() {
        let mut c = countdown();
        let now = c.target() - Duration::milliseconds(500);
        let display = c.tick(&now);
        assert!(!c.is_live());
        assert_eq!(display.units, CountdownUnits::default());
        assert_eq!(display.live_label, None);
    }
}
