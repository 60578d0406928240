//! Facade composing the matcher, alignment guard, gate chain, scoring engine,
//! and failure router into the four call contracts the surrounding system
//! consumes. Each call is one unit of work: a hard failure terminates it
//! without affecting any other record.

pub mod router;

#[cfg(test)]
mod tests;

pub use router::pipeline_router;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::workflows::audit::{
    AuditStoreError, ErrorTable, EventLog, FailureCode, FailureContext, FailureReport,
    FailureRouter,
};
use crate::workflows::gating::{GateChain, GateClearance, GateError, GatePolicy, LookupContext, UpstreamStatus};
use crate::workflows::resolution::{
    AlignmentOutcome, CandidateEntity, CompanyId, ContactRecord, EmailStatus, EmployerAlignmentGuard,
    EntityMatcher, MatchOptions, MatchResult,
};
use crate::workflows::scoring::{
    ChurnAnalysis, ChurnAnalyzer, IntentScoringEngine, IntentSignalBundle, MovementEvent,
    RenewalIntent, RenewalIntentAgent, ScoreResult,
};

/// Read-only candidate supply owned by the master-record store.
pub trait CandidateDirectory: Send + Sync {
    fn list_candidates(&self, company: &CompanyId) -> Result<Vec<CandidateEntity>, DirectoryError>;
}

/// Upstream identity-resolution status read.
pub trait UpstreamStatusSource: Send + Sync {
    fn upstream_status(&self, entity_ref: &str) -> Result<Option<UpstreamStatus>, DirectoryError>;
}

/// Failure reaching out to a read-only collaborator.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of resolving one contact record. `failure` is set when the record
/// was terminated through the failure router (employer mismatch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactResolution {
    pub record: ContactRecord,
    pub match_result: Option<MatchResult>,
    pub alignment: Option<AlignmentOutcome>,
    pub failure: Option<FailureReport>,
}

/// Error raised by the pipeline facade.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Gate(#[from] GateError),
    #[error(transparent)]
    Store(#[from] AuditStoreError),
    #[error("signal bundle rejected: {}", .0.message)]
    InvalidBundle(FailureReport),
}

/// Policies for each stage of the pipeline, injected as one value.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub match_policy: crate::workflows::resolution::MatchPolicy,
    pub alignment_policy: crate::workflows::resolution::AlignmentPolicy,
    pub gate_policy: GatePolicy,
    pub scoring: crate::workflows::scoring::ScoringConfig,
    pub churn: crate::workflows::scoring::ChurnConfig,
    pub renewal: crate::workflows::scoring::RenewalConfig,
}

pub struct ProspectPipeline<D, U, E, T> {
    directory: Arc<D>,
    upstream: Arc<U>,
    router: Arc<FailureRouter<E, T>>,
    matcher: EntityMatcher,
    alignment: EmployerAlignmentGuard,
    gates: GateChain<E, T>,
    scoring: IntentScoringEngine,
    churn: ChurnAnalyzer,
    renewal: RenewalIntentAgent,
}

impl<D, U, E, T> ProspectPipeline<D, U, E, T>
where
    D: CandidateDirectory + 'static,
    U: UpstreamStatusSource + 'static,
    E: EventLog + 'static,
    T: ErrorTable + 'static,
{
    pub fn new(
        directory: Arc<D>,
        upstream: Arc<U>,
        event_log: Arc<E>,
        error_table: Arc<T>,
        config: PipelineConfig,
    ) -> Self {
        let router = Arc::new(FailureRouter::new(event_log, error_table));
        let gates = GateChain::new(router.clone(), config.gate_policy);

        Self {
            directory,
            upstream,
            router,
            matcher: EntityMatcher::new(config.match_policy),
            alignment: EmployerAlignmentGuard::with_policy(config.alignment_policy),
            gates,
            scoring: IntentScoringEngine::new(config.scoring),
            churn: ChurnAnalyzer::new(config.churn),
            renewal: RenewalIntentAgent::new(config.renewal),
        }
    }

    /// Resolve a contact against the candidate directory and validate its
    /// employer alignment.
    ///
    /// Golden rule: a record whose company is already invalid is never
    /// matched. It comes back marked "email skipped" with the inherited
    /// reason, and the directory is not consulted at all.
    pub fn resolve_contact(
        &self,
        mut record: ContactRecord,
        options: &MatchOptions,
        now: DateTime<Utc>,
    ) -> Result<ContactResolution, PipelineError> {
        if !record.company_valid {
            debug!(
                contact = %record.full_name,
                reason = record.invalid_reason.as_deref().unwrap_or("unspecified"),
                "company invalid; skipping person-level resolution"
            );
            record.email_status = EmailStatus::Skipped;
            return Ok(ContactResolution {
                record,
                match_result: None,
                alignment: None,
                failure: None,
            });
        }

        let candidates = self.directory.list_candidates(&record.company.company_id)?;
        let match_result =
            self.matcher
                .match_entity(&record.mention(), &record.company, &candidates, options);

        let alignment = self
            .alignment
            .check(record.observed_employer.as_deref(), &record.company.canonical_name);

        let failure = if alignment.aligned {
            record.email_status = EmailStatus::Cleared;
            None
        } else {
            record.company_valid = false;
            record.invalid_reason = Some(FailureCode::PersonCompanyMismatch.label().to_string());
            record.email_status = EmailStatus::Skipped;

            let report = self.router.fail_hard(
                FailureCode::PersonCompanyMismatch,
                format!(
                    "observed employer '{}' does not align with '{}' (score {:.2})",
                    record.observed_employer.as_deref().unwrap_or_default(),
                    record.company.canonical_name,
                    alignment.score
                ),
                FailureContext::for_entity(record.company.company_id.0.clone()),
                now,
            )?;
            Some(report)
        };

        Ok(ContactResolution {
            record,
            match_result: Some(match_result),
            alignment: Some(alignment),
            failure,
        })
    }

    /// Validate every precondition for an identifier-dependent lookup.
    ///
    /// The upstream status is read fresh from its source before the chain
    /// runs; the context value supplied by the caller never overrides it.
    pub fn clear_for_enrichment(
        &self,
        mut context: LookupContext,
        now: DateTime<Utc>,
    ) -> Result<GateClearance, PipelineError> {
        context.upstream_status = self.upstream.upstream_status(&context.entity_ref)?;
        let clearance = self.gates.evaluate(&context, now)?;
        Ok(clearance)
    }

    /// Validate and score a signal bundle. An out-of-range bundle is routed
    /// through the failure router before the error is returned.
    pub fn score_intent(
        &self,
        entity_ref: &str,
        bundle: &IntentSignalBundle,
        scored_at: DateTime<Utc>,
    ) -> Result<ScoreResult, PipelineError> {
        if let Err(violation) = bundle.validate() {
            let report = self.router.fail_hard(
                FailureCode::InvalidSignalBundle,
                violation.to_string(),
                FailureContext::for_entity(entity_ref),
                scored_at,
            )?;
            return Err(PipelineError::InvalidBundle(report));
        }

        let result = self.scoring.score(bundle, scored_at);
        info!(
            entity = entity_ref,
            composite = result.composite_score,
            tier = result.tier.label(),
            "intent scored"
        );
        Ok(result)
    }

    /// Window and score movement events. Pure; never touches the stores.
    pub fn analyze_churn(
        &self,
        events: &[MovementEvent],
        lookback_days: Option<i64>,
        today: NaiveDate,
    ) -> ChurnAnalysis {
        match lookback_days {
            Some(days) => self.churn.analyze_with_lookback(events, days, today),
            None => self.churn.analyze(events, today),
        }
    }

    /// Derive the outreach window and urgency for an estimated renewal date.
    pub fn renewal_intent(&self, renewal_date: Option<NaiveDate>, today: NaiveDate) -> RenewalIntent {
        self.renewal.derive(renewal_date, today)
    }

    /// Parallel intent scoring over independent bundles; order preserved.
    pub fn score_intent_batch(
        &self,
        bundles: &[IntentSignalBundle],
        scored_at: DateTime<Utc>,
    ) -> Vec<ScoreResult> {
        crate::workflows::scoring::score_all(&self.scoring, bundles, scored_at)
    }
}
