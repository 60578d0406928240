use serde::{Deserialize, Serialize};

use super::similarity;

const DEFAULT_ALIGNMENT_THRESHOLD: f32 = 0.85;

/// Policy dial backing employer-alignment validation.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentPolicy {
    threshold: f32,
}

impl AlignmentPolicy {
    pub fn new(threshold: f32) -> Self {
        let sanitized = if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
            threshold
        } else {
            DEFAULT_ALIGNMENT_THRESHOLD
        };

        Self {
            threshold: sanitized,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl Default for AlignmentPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALIGNMENT_THRESHOLD)
    }
}

/// Outcome of an employer-alignment check on a 0-1 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentOutcome {
    pub score: f32,
    pub aligned: bool,
    /// Alignment was granted without an observed employer; a later validator
    /// revisits the record once one exists.
    pub provisional: bool,
}

/// Guard validating that a person's observed employer string aligns with the
/// canonical company name already attached to the record.
#[derive(Debug, Clone, Default)]
pub struct EmployerAlignmentGuard {
    policy: AlignmentPolicy,
}

impl EmployerAlignmentGuard {
    pub fn with_policy(policy: AlignmentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AlignmentPolicy {
        &self.policy
    }

    /// Score the observed employer against the canonical name.
    ///
    /// The score is the higher of the composite similarity and, when one
    /// normalized string contains the other, the shorter/longer length ratio.
    /// No observed employer yet is a provisional pass; absence of negative
    /// evidence is not itself a failure.
    pub fn check(&self, observed: Option<&str>, canonical: &str) -> AlignmentOutcome {
        let Some(observed) = observed.map(str::trim).filter(|value| !value.is_empty()) else {
            return AlignmentOutcome {
                score: 1.0,
                aligned: true,
                provisional: true,
            };
        };

        let composite = f32::from(similarity::similarity(observed, canonical)) / 100.0;
        let containment = containment_ratio(observed, canonical);
        let score = composite.max(containment);

        AlignmentOutcome {
            score,
            aligned: score >= self.policy.threshold,
            provisional: false,
        }
    }
}

fn containment_ratio(observed: &str, canonical: &str) -> f32 {
    let left = similarity::normalize(observed);
    let right = similarity::normalize(canonical);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    if left.contains(&right) || right.contains(&left) {
        let shorter = left.chars().count().min(right.chars().count()) as f32;
        let longer = left.chars().count().max(right.chars().count()) as f32;
        shorter / longer
    } else {
        0.0
    }
}
