use serde::{Deserialize, Serialize};

/// Machine-readable reason for a hard failure. One code per gate case plus
/// the validator-raised failures, so remediation routing never has to parse
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    UpstreamFailed,
    UpstreamPending,
    UpstreamMissing,
    IdentifierUnresolved,
    IdentifierMalformed,
    AnchorMissing,
    CompanyRefMissing,
    JurisdictionMissing,
    SourceNotApproved,
    FilingStale,
    FilingYearMissing,
    FingerprintMissing,
    FingerprintMalformed,
    PersonCompanyMismatch,
    InvalidSignalBundle,
}

impl FailureCode {
    pub const fn label(self) -> &'static str {
        match self {
            FailureCode::UpstreamFailed => "upstream_failed",
            FailureCode::UpstreamPending => "upstream_pending",
            FailureCode::UpstreamMissing => "upstream_missing",
            FailureCode::IdentifierUnresolved => "identifier_unresolved",
            FailureCode::IdentifierMalformed => "identifier_malformed",
            FailureCode::AnchorMissing => "anchor_missing",
            FailureCode::CompanyRefMissing => "company_ref_missing",
            FailureCode::JurisdictionMissing => "jurisdiction_missing",
            FailureCode::SourceNotApproved => "source_not_approved",
            FailureCode::FilingStale => "filing_stale",
            FailureCode::FilingYearMissing => "filing_year_missing",
            FailureCode::FingerprintMissing => "fingerprint_missing",
            FailureCode::FingerprintMalformed => "fingerprint_malformed",
            FailureCode::PersonCompanyMismatch => "person_company_mismatch",
            FailureCode::InvalidSignalBundle => "invalid_signal_bundle",
        }
    }

    /// Which downstream path untangles this failure.
    pub const fn remediation(self) -> Remediation {
        match self {
            FailureCode::UpstreamPending => Remediation::Wait,
            FailureCode::IdentifierUnresolved
            | FailureCode::AnchorMissing
            | FailureCode::CompanyRefMissing
            | FailureCode::JurisdictionMissing
            | FailureCode::FilingStale
            | FailureCode::FilingYearMissing => Remediation::Enrichment,
            FailureCode::PersonCompanyMismatch => Remediation::Rescrape,
            FailureCode::UpstreamFailed
            | FailureCode::UpstreamMissing
            | FailureCode::IdentifierMalformed
            | FailureCode::SourceNotApproved
            | FailureCode::FingerprintMissing
            | FailureCode::FingerprintMalformed
            | FailureCode::InvalidSignalBundle => Remediation::ManualReview,
        }
    }
}

/// Remediation bay a routed failure lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remediation {
    /// Send the record through an enrichment path before retrying the chain.
    Enrichment,
    /// A human has to adjudicate.
    ManualReview,
    /// Re-scrape the observed employer before the record is usable.
    Rescrape,
    /// Upstream work is still in flight; nothing to do here yet.
    Wait,
}

impl Remediation {
    pub const fn label(self) -> &'static str {
        match self {
            Remediation::Enrichment => "enrichment",
            Remediation::ManualReview => "manual_review",
            Remediation::Rescrape => "rescrape",
            Remediation::Wait => "wait",
        }
    }
}

/// Severity recorded on operational error rows. Hard failures are the only
/// kind this system routes; the enum exists so the table schema stays closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Hard,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Hard => "hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_identifier_routes_to_enrichment() {
        assert_eq!(
            FailureCode::IdentifierUnresolved.remediation(),
            Remediation::Enrichment
        );
    }

    #[test]
    fn mismatch_routes_to_its_own_rescrape_bay() {
        assert_eq!(
            FailureCode::PersonCompanyMismatch.remediation(),
            Remediation::Rescrape
        );
    }

    #[test]
    fn pending_upstream_is_a_wait_not_a_review() {
        assert_eq!(FailureCode::UpstreamPending.remediation(), Remediation::Wait);
    }
}
