use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// What changed for the person in a movement event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementChange {
    Company,
    Title,
}

impl MovementChange {
    pub const fn label(self) -> &'static str {
        match self {
            MovementChange::Company => "company",
            MovementChange::Title => "title",
        }
    }
}

/// One observed personnel movement at a prospect company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEvent {
    pub person: String,
    pub role: String,
    pub occurred_on: NaiveDate,
    pub change: MovementChange,
}

const DEFAULT_LOOKBACK_DAYS: i64 = 180;
const BASE_EVENT_WEIGHT: u32 = 20;
const CRITICAL_SLOT_BONUS: u32 = 30;
const COMPANY_CHANGE_BONUS: u32 = 20;
const MAX_RECENCY_BONUS: f64 = 15.0;
const DEFAULT_MIN_EVENTS_FOR_VELOCITY: usize = 2;
const DAYS_PER_MONTH: f64 = 30.44;

/// Configuration for churn analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnConfig {
    pub lookback_days: i64,
    /// Role fragments whose movement is operationally significant on its own.
    pub critical_roles: Vec<String>,
    pub min_events_for_velocity: usize,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            critical_roles: vec![
                "hr".to_string(),
                "human resources".to_string(),
                "benefits".to_string(),
                "people".to_string(),
            ],
            min_events_for_velocity: DEFAULT_MIN_EVENTS_FOR_VELOCITY,
        }
    }
}

/// Churn risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurnRisk {
    Low,
    Medium,
    High,
}

impl ChurnRisk {
    pub const fn label(self) -> &'static str {
        match self {
            ChurnRisk::Low => "low",
            ChurnRisk::Medium => "medium",
            ChurnRisk::High => "high",
        }
    }
}

/// Per-event contribution inside the analysis window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnEventScore {
    pub person: String,
    pub role: String,
    pub occurred_on: NaiveDate,
    pub score: u32,
    pub critical_slot: bool,
}

/// Windowed churn picture for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnAnalysis {
    pub score: u8,
    pub risk: ChurnRisk,
    pub events_in_window: Vec<ChurnEventScore>,
    pub velocity_per_month: Option<f32>,
    pub critical_slot_event: bool,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

/// Windows movement events to a lookback period and scores the churn pattern.
#[derive(Debug, Clone, Default)]
pub struct ChurnAnalyzer {
    config: ChurnConfig,
}

impl ChurnAnalyzer {
    pub fn new(config: ChurnConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChurnConfig {
        &self.config
    }

    /// Score every event inside the lookback window ending at `today`.
    ///
    /// A single critical-slot event lifts risk to at least `Medium` whatever
    /// the raw score says: one change in a critical role is operationally
    /// significant on its own.
    pub fn analyze(&self, events: &[MovementEvent], today: NaiveDate) -> ChurnAnalysis {
        self.analyze_with_lookback(events, self.config.lookback_days, today)
    }

    pub fn analyze_with_lookback(
        &self,
        events: &[MovementEvent],
        lookback_days: i64,
        today: NaiveDate,
    ) -> ChurnAnalysis {
        let lookback_days = lookback_days.max(1);
        let window_start = today - Duration::days(lookback_days);

        let mut scored: Vec<ChurnEventScore> = events
            .iter()
            .filter(|event| event.occurred_on > window_start && event.occurred_on <= today)
            .map(|event| self.score_event(event, today, lookback_days))
            .collect();
        scored.sort_by(|a, b| a.occurred_on.cmp(&b.occurred_on));

        let total: u32 = scored.iter().map(|event| event.score).sum();
        let score = total.min(100) as u8;
        let critical_slot_event = scored.iter().any(|event| event.critical_slot);

        let velocity_per_month = velocity(&scored, self.config.min_events_for_velocity);

        let raw_risk = if score >= 70 {
            ChurnRisk::High
        } else if score >= 40 {
            ChurnRisk::Medium
        } else {
            ChurnRisk::Low
        };
        let risk = if critical_slot_event {
            raw_risk.max(ChurnRisk::Medium)
        } else {
            raw_risk
        };

        ChurnAnalysis {
            score,
            risk,
            events_in_window: scored,
            velocity_per_month,
            critical_slot_event,
            window_start,
            window_end: today,
        }
    }

    fn score_event(
        &self,
        event: &MovementEvent,
        today: NaiveDate,
        lookback_days: i64,
    ) -> ChurnEventScore {
        let critical_slot = self.is_critical_role(&event.role);

        let mut score = BASE_EVENT_WEIGHT;
        if critical_slot {
            score += CRITICAL_SLOT_BONUS;
        }
        if event.change == MovementChange::Company {
            score += COMPANY_CHANGE_BONUS;
        }

        let age = (today - event.occurred_on).num_days().max(0);
        let recency =
            (MAX_RECENCY_BONUS * (1.0 - age as f64 / lookback_days as f64)).round() as u32;
        score += recency;

        ChurnEventScore {
            person: event.person.clone(),
            role: event.role.clone(),
            occurred_on: event.occurred_on,
            score,
            critical_slot,
        }
    }

    fn is_critical_role(&self, role: &str) -> bool {
        let role = role.to_ascii_lowercase();
        self.config
            .critical_roles
            .iter()
            .any(|critical| role.contains(critical.as_str()))
    }
}

/// Events per month across the observed span, once enough events exist for
/// the rate to mean anything.
fn velocity(scored: &[ChurnEventScore], min_events: usize) -> Option<f32> {
    if scored.len() < min_events.max(2) {
        return None;
    }

    let first = scored.first()?.occurred_on;
    let last = scored.last()?.occurred_on;
    let span_days = (last - first).num_days().max(1) as f64;
    let months = span_days / DAYS_PER_MONTH;

    Some((scored.len() as f64 / months) as f32)
}
