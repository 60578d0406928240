use serde::{Deserialize, Serialize};

/// Identifier wrapper for canonical entities (companies or people).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

/// Identifier wrapper for the owning company of a person record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub String);

/// A raw, unvalidated reference to a person or company. Produced by ingestion,
/// consumed by the matcher, discarded after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMention {
    pub name: String,
    pub employer: Option<String>,
    pub identifier: Option<String>,
}

/// Canonical candidate row read from the directory collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntity {
    pub entity_id: EntityId,
    pub display_name: String,
    pub company_id: CompanyId,
    pub title: Option<String>,
}

/// Canonical company already attached to a record under resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyContext {
    pub company_id: CompanyId,
    pub canonical_name: String,
}

/// Decision tier produced by a match call. Manual review and new-entity are
/// successful outcomes, never failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    ManualReview,
    NewEntity,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MatchStatus::Matched => "matched",
            MatchStatus::ManualReview => "manual_review",
            MatchStatus::NewEntity => "new_entity",
        }
    }
}

/// A scored candidate within the ranked list of a match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate: CandidateEntity,
    pub score: u8,
}

/// Outcome of one match call. An empty `ranked` list distinguishes the
/// zero-candidate case from a low-score result with the same status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub status: MatchStatus,
    pub matched: Option<CandidateEntity>,
    pub score: u8,
    pub ranked: Vec<RankedCandidate>,
}

/// Per-call knobs for a match attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Restrict candidates to the owning company before scoring.
    #[serde(default)]
    pub require_company_match: bool,
    /// Title fragment expected on the matched candidate; a case-insensitive
    /// substring match earns a +10 boost.
    #[serde(default)]
    pub title_hint: Option<String>,
}

const DEFAULT_AUTO_ACCEPT_THRESHOLD: u8 = 90;
const DEFAULT_MIN_MATCH_THRESHOLD: u8 = 60;

/// Thresholds backing the matcher's decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub auto_accept_threshold: u8,
    pub min_match_threshold: u8,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            auto_accept_threshold: DEFAULT_AUTO_ACCEPT_THRESHOLD,
            min_match_threshold: DEFAULT_MIN_MATCH_THRESHOLD,
        }
    }
}

/// Email-enrichment disposition tracked on a contact record. `Skipped` is the
/// marker left by the golden-rule short circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Pending,
    Skipped,
    Cleared,
}

impl EmailStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EmailStatus::Pending => "pending",
            EmailStatus::Skipped => "skipped",
            EmailStatus::Cleared => "cleared",
        }
    }
}

/// A person record moving through the resolution pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub full_name: String,
    pub observed_employer: Option<String>,
    pub company: CompanyContext,
    pub company_valid: bool,
    pub invalid_reason: Option<String>,
    pub email_status: EmailStatus,
}

impl ContactRecord {
    /// Fresh record for a person observed at a validated company.
    pub fn new(full_name: impl Into<String>, company: CompanyContext) -> Self {
        Self {
            full_name: full_name.into(),
            observed_employer: None,
            company,
            company_valid: true,
            invalid_reason: None,
            email_status: EmailStatus::Pending,
        }
    }

    pub(crate) fn mention(&self) -> EntityMention {
        EntityMention {
            name: self.full_name.clone(),
            employer: self.observed_employer.clone(),
            identifier: None,
        }
    }
}
