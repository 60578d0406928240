//! Multi-signal composite intent scoring: four normalized component scorers
//! combined by a fixed weighted sum, plus the churn analyzer and the
//! renewal-intent agent that read the same movement and renewal signals.

pub mod batch;
pub mod churn;
mod components;
pub mod renewal;
pub mod signals;

pub use batch::score_all;
pub use churn::{
    ChurnAnalysis, ChurnAnalyzer, ChurnConfig, ChurnEventScore, ChurnRisk, MovementChange,
    MovementEvent,
};
pub use renewal::{
    OutreachWindow, RenewalConfig, RenewalIntent, RenewalIntentAgent, RenewalUrgency,
};
pub use signals::{
    ComponentScore, IntentSignalBundle, IntentTier, ScoreResult, ScoreWeights, ScoringConfig,
    SignalBundleError, SignalKind, TierThresholds,
};

use chrono::{DateTime, Utc};

/// Stateless engine applying weights and tier thresholds to a signal bundle.
pub struct IntentScoringEngine {
    config: ScoringConfig,
}

impl IntentScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compute component scores, the weighted composite, and the tier. The
    /// bundle is assumed validated; `scored_at` is injected by the caller so
    /// identical inputs always produce identical results.
    pub fn score(&self, bundle: &IntentSignalBundle, scored_at: DateTime<Utc>) -> ScoreResult {
        let (components, composite_score) =
            components::score_components(bundle, &self.config.weights);
        let tier = self.config.thresholds.tier_for(composite_score);
        let signals_used = signals_used(bundle);

        let mut breakdown: Vec<String> = components
            .iter()
            .map(|component| {
                format!(
                    "{}: {} x {:.2} = {:.1} ({})",
                    component.signal.label(),
                    component.score,
                    component.weight,
                    f64::from(component.score) * f64::from(component.weight),
                    component.notes
                )
            })
            .collect();
        breakdown.push(format!(
            "composite {composite_score} -> tier {}",
            tier.label()
        ));

        ScoreResult {
            composite_score,
            tier,
            components,
            signals_used,
            breakdown,
            scored_at,
        }
    }
}

/// A signal counts as used when its input was actually supplied; movement is
/// always evaluated, so it is always used.
fn signals_used(bundle: &IntentSignalBundle) -> Vec<SignalKind> {
    let mut used = vec![SignalKind::Movement];
    if bundle.days_until_renewal.is_some() || bundle.in_renewal_window {
        used.push(SignalKind::Renewal);
    }
    if bundle.job_postings_count > 0
        || bundle.news_mentions_count > 0
        || bundle.website_activity_score > 0
        || bundle.competitor_flag
    {
        used.push(SignalKind::Activity);
    }
    if bundle.employee_count > 0 {
        used.push(SignalKind::FirmSize);
    }
    used
}
