use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized signals for one scoring run. Produced fresh per invocation and
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntentSignalBundle {
    pub movement_detected: bool,
    #[serde(default)]
    pub days_until_renewal: Option<i64>,
    #[serde(default)]
    pub in_renewal_window: bool,
    #[serde(default)]
    pub job_postings_count: u32,
    #[serde(default)]
    pub news_mentions_count: u32,
    /// 0-100; anything above is an invalid bundle.
    #[serde(default)]
    pub website_activity_score: u8,
    #[serde(default)]
    pub competitor_flag: bool,
    #[serde(default)]
    pub employee_count: u32,
}

impl IntentSignalBundle {
    /// Stable hash so callers can cache a score result by (entity, bundle).
    pub fn fingerprint(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }

    pub fn validate(&self) -> Result<(), SignalBundleError> {
        if self.website_activity_score > 100 {
            return Err(SignalBundleError::WebsiteActivityOutOfRange(
                self.website_activity_score,
            ));
        }
        Ok(())
    }
}

/// Validation failure for an inbound signal bundle.
#[derive(Debug, thiserror::Error)]
pub enum SignalBundleError {
    #[error("website activity score {0} exceeds the 0-100 scale")]
    WebsiteActivityOutOfRange(u8),
}

/// The four independent signal dimensions feeding the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Movement,
    Renewal,
    Activity,
    FirmSize,
}

impl SignalKind {
    pub const fn label(self) -> &'static str {
        match self {
            SignalKind::Movement => "movement",
            SignalKind::Renewal => "renewal",
            SignalKind::Activity => "activity",
            SignalKind::FirmSize => "firm_size",
        }
    }
}

/// Discrete contribution to a composite score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub signal: SignalKind,
    pub score: u8,
    pub weight: f32,
    pub notes: String,
}

/// Priority bucket derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentTier {
    Hot,
    Warm,
    Cool,
    Cold,
    Excluded,
}

impl IntentTier {
    pub const fn label(self) -> &'static str {
        match self {
            IntentTier::Hot => "hot",
            IntentTier::Warm => "warm",
            IntentTier::Cool => "cool",
            IntentTier::Cold => "cold",
            IntentTier::Excluded => "excluded",
        }
    }
}

/// Immutable output of one scoring invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub composite_score: u8,
    pub tier: IntentTier,
    pub components: Vec<ComponentScore>,
    pub signals_used: Vec<SignalKind>,
    pub breakdown: Vec<String>,
    pub scored_at: DateTime<Utc>,
}

/// Fixed weights applied to the normalized component scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub movement: f32,
    pub renewal: f32,
    pub activity: f32,
    pub size: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            movement: 0.35,
            renewal: 0.30,
            activity: 0.20,
            size: 0.15,
        }
    }
}

/// Composite-score cutoffs for tier assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub hot: u8,
    pub warm: u8,
    pub cool: u8,
    pub cold: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            hot: 80,
            warm: 60,
            cool: 40,
            cold: 20,
        }
    }
}

impl TierThresholds {
    pub fn tier_for(&self, composite: u8) -> IntentTier {
        if composite >= self.hot {
            IntentTier::Hot
        } else if composite >= self.warm {
            IntentTier::Warm
        } else if composite >= self.cool {
            IntentTier::Cool
        } else if composite >= self.cold {
            IntentTier::Cold
        } else {
            IntentTier::Excluded
        }
    }
}

/// Full scoring configuration: weights plus tier cutoffs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub thresholds: TierThresholds,
}
