use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const DEFAULT_WINDOW_OPEN_DAYS_BEFORE: i64 = 90;
const DEFAULT_WINDOW_CLOSE_DAYS_BEFORE: i64 = 15;

/// Configuration for deriving the optimal outreach window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalConfig {
    /// Days before the estimated renewal at which outreach should begin.
    pub window_open_days_before: i64,
    /// Days before the estimated renewal at which outreach should stop.
    pub window_close_days_before: i64,
}

impl Default for RenewalConfig {
    fn default() -> Self {
        Self {
            window_open_days_before: DEFAULT_WINDOW_OPEN_DAYS_BEFORE,
            window_close_days_before: DEFAULT_WINDOW_CLOSE_DAYS_BEFORE,
        }
    }
}

/// How pressing outreach is given the time left before renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenewalUrgency {
    Critical,
    Urgent,
    Approaching,
    Distant,
    Unknown,
}

impl RenewalUrgency {
    pub const fn label(self) -> &'static str {
        match self {
            RenewalUrgency::Critical => "critical",
            RenewalUrgency::Urgent => "urgent",
            RenewalUrgency::Approaching => "approaching",
            RenewalUrgency::Distant => "distant",
            RenewalUrgency::Unknown => "unknown",
        }
    }
}

/// Date range in which outreach has the best odds of landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachWindow {
    pub opens_on: NaiveDate,
    pub closes_on: NaiveDate,
}

/// Derived outreach guidance for one prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalIntent {
    pub urgency: RenewalUrgency,
    pub window: Option<OutreachWindow>,
    pub days_until_renewal: Option<i64>,
}

/// Derives outreach timing from an estimated renewal date.
#[derive(Debug, Clone, Default)]
pub struct RenewalIntentAgent {
    config: RenewalConfig,
}

impl RenewalIntentAgent {
    pub fn new(config: RenewalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenewalConfig {
        &self.config
    }

    pub fn derive(&self, renewal_date: Option<NaiveDate>, today: NaiveDate) -> RenewalIntent {
        let Some(renewal) = renewal_date else {
            return RenewalIntent {
                urgency: RenewalUrgency::Unknown,
                window: None,
                days_until_renewal: None,
            };
        };

        let days = (renewal - today).num_days();
        let urgency = if days <= 15 {
            RenewalUrgency::Critical
        } else if days <= 45 {
            RenewalUrgency::Urgent
        } else if days <= 120 {
            RenewalUrgency::Approaching
        } else {
            RenewalUrgency::Distant
        };

        let window = OutreachWindow {
            opens_on: renewal - Duration::days(self.config.window_open_days_before),
            closes_on: renewal - Duration::days(self.config.window_close_days_before),
        };

        RenewalIntent {
            urgency,
            window: Some(window),
            days_until_renewal: Some(days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn no_renewal_data_yields_unknown_and_no_window() {
        let agent = RenewalIntentAgent::default();
        let intent = agent.derive(None, day(2026, 6, 1));
        assert_eq!(intent.urgency, RenewalUrgency::Unknown);
        assert!(intent.window.is_none());
        assert!(intent.days_until_renewal.is_none());
    }

    #[test]
    fn window_brackets_the_renewal_by_the_configured_offsets() {
        let agent = RenewalIntentAgent::default();
        let renewal = day(2026, 9, 1);
        let intent = agent.derive(Some(renewal), day(2026, 6, 1));

        let window = intent.window.expect("window derived");
        assert_eq!(window.opens_on, day(2026, 6, 3));
        assert_eq!(window.closes_on, day(2026, 8, 17));
    }

    #[test]
    fn urgency_ladder_follows_days_remaining() {
        let agent = RenewalIntentAgent::default();
        let today = day(2026, 6, 1);

        let cases = [
            (10, RenewalUrgency::Critical),
            (15, RenewalUrgency::Critical),
            (30, RenewalUrgency::Urgent),
            (45, RenewalUrgency::Urgent),
            (100, RenewalUrgency::Approaching),
            (300, RenewalUrgency::Distant),
        ];
        for (days, expected) in cases {
            let intent = agent.derive(Some(today + Duration::days(days)), today);
            assert_eq!(intent.urgency, expected, "{days} days");
            assert_eq!(intent.days_until_renewal, Some(days));
        }
    }

    #[test]
    fn custom_offsets_shift_the_window() {
        let agent = RenewalIntentAgent::new(RenewalConfig {
            window_open_days_before: 60,
            window_close_days_before: 30,
        });
        let renewal = day(2026, 9, 1);
        let window = agent
            .derive(Some(renewal), day(2026, 6, 1))
            .window
            .expect("window derived");
        assert_eq!(window.opens_on, day(2026, 7, 3));
        assert_eq!(window.closes_on, day(2026, 8, 2));
    }
}
