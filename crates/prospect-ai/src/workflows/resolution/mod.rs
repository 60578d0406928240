//! Fuzzy entity resolution: composite string similarity, nickname-aware name
//! matching, candidate ranking, and employer-alignment validation.

pub mod alignment;
pub mod domain;
pub mod matcher;
mod nicknames;
pub mod similarity;

#[cfg(test)]
mod tests;

pub use alignment::{AlignmentOutcome, AlignmentPolicy, EmployerAlignmentGuard};
pub use domain::{
    CandidateEntity, CompanyContext, CompanyId, ContactRecord, EmailStatus, EntityId,
    EntityMention, MatchOptions, MatchPolicy, MatchResult, MatchStatus, RankedCandidate,
};
pub use matcher::EntityMatcher;
pub use similarity::{name_similarity, similarity};
