use tracing::debug;

use super::domain::{
    CandidateEntity, CompanyContext, EntityMention, MatchOptions, MatchPolicy, MatchResult,
    MatchStatus, RankedCandidate,
};
use super::similarity;

/// Title-hint boost applied when the supplied hint appears inside the
/// candidate's known title.
const TITLE_HINT_BOOST: u8 = 10;

/// Fuzzy matcher resolving a raw mention against a candidate set.
#[derive(Debug, Clone)]
pub struct EntityMatcher {
    policy: MatchPolicy,
}

impl Default for EntityMatcher {
    fn default() -> Self {
        Self::new(MatchPolicy::default())
    }
}

impl EntityMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Score every candidate against the mention and classify the best score.
    ///
    /// Zero candidates always yields `NewEntity` with score 0; absence of
    /// comparison data must never block processing.
    pub fn match_entity(
        &self,
        mention: &EntityMention,
        company: &CompanyContext,
        candidates: &[CandidateEntity],
        options: &MatchOptions,
    ) -> MatchResult {
        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .filter(|candidate| {
                !options.require_company_match || candidate.company_id == company.company_id
            })
            .map(|candidate| RankedCandidate {
                candidate: candidate.clone(),
                score: score_candidate(mention, candidate, options),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        let Some(best) = ranked.first().cloned() else {
            debug!(mention = %mention.name, "no candidates supplied; treating as new entity");
            return MatchResult {
                status: MatchStatus::NewEntity,
                matched: None,
                score: 0,
                ranked,
            };
        };

        let (status, matched) = if best.score >= self.policy.auto_accept_threshold {
            (MatchStatus::Matched, Some(best.candidate.clone()))
        } else if best.score >= self.policy.min_match_threshold {
            (MatchStatus::ManualReview, None)
        } else {
            (MatchStatus::NewEntity, None)
        };

        debug!(
            mention = %mention.name,
            best = %best.candidate.display_name,
            score = best.score,
            status = status.label(),
            "entity match decided"
        );

        MatchResult {
            status,
            matched,
            score: best.score,
            ranked,
        }
    }
}

fn score_candidate(
    mention: &EntityMention,
    candidate: &CandidateEntity,
    options: &MatchOptions,
) -> u8 {
    let base = similarity::name_similarity(&mention.name, &candidate.display_name);

    let boosted = match (&options.title_hint, &candidate.title) {
        (Some(hint), Some(title))
            if !hint.trim().is_empty()
                && title
                    .to_ascii_lowercase()
                    .contains(&hint.trim().to_ascii_lowercase()) =>
        {
            base.saturating_add(TITLE_HINT_BOOST)
        }
        _ => base,
    };

    boosted.min(100)
}
