use chrono::NaiveDate;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::context::{ApprovedSource, GatePolicy, LookupContext, UpstreamStatus};
use crate::workflows::audit::FailureCode;

const FINGERPRINT_LEN: usize = 64;

/// The seven ordered gates. `ordered()` is the single source of truth for
/// execution order; the driver loop iterates it so the ordering invariant is
/// structural rather than a coding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    UpstreamStatus,
    IdentifierResolved,
    IdentifierFormat,
    IdentityAnchor,
    SourceWhitelist,
    Freshness,
    Integrity,
}

impl GateKind {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::UpstreamStatus,
            Self::IdentifierResolved,
            Self::IdentifierFormat,
            Self::IdentityAnchor,
            Self::SourceWhitelist,
            Self::Freshness,
            Self::Integrity,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UpstreamStatus => "upstream_status",
            Self::IdentifierResolved => "identifier_resolved",
            Self::IdentifierFormat => "identifier_format",
            Self::IdentityAnchor => "identity_anchor",
            Self::SourceWhitelist => "source_whitelist",
            Self::Freshness => "freshness",
            Self::Integrity => "integrity",
        }
    }
}

/// Outcome of a single gate: pass the context along, or a code and message
/// for the failure router.
pub(super) type GateOutcome = Result<(), (FailureCode, String)>;

pub(super) fn run_gate(
    kind: GateKind,
    context: &LookupContext,
    policy: &GatePolicy,
    today: NaiveDate,
) -> GateOutcome {
    match kind {
        GateKind::UpstreamStatus => check_upstream(context),
        GateKind::IdentifierResolved => check_identifier_resolved(context),
        GateKind::IdentifierFormat => check_identifier_format(context),
        GateKind::IdentityAnchor => check_identity_anchor(context),
        GateKind::SourceWhitelist => check_source_whitelist(context),
        GateKind::Freshness => check_freshness(context, policy, today),
        GateKind::Integrity => check_integrity(context),
    }
}

fn check_upstream(context: &LookupContext) -> GateOutcome {
    match context.upstream_status {
        Some(UpstreamStatus::Pass) => Ok(()),
        Some(UpstreamStatus::Fail) => Err((
            FailureCode::UpstreamFailed,
            format!("upstream resolution failed for {}", context.entity_ref),
        )),
        Some(UpstreamStatus::Pending) => Err((
            FailureCode::UpstreamPending,
            format!("upstream resolution still pending for {}", context.entity_ref),
        )),
        None => Err((
            FailureCode::UpstreamMissing,
            format!("no upstream status recorded for {}", context.entity_ref),
        )),
    }
}

fn check_identifier_resolved(context: &LookupContext) -> GateOutcome {
    match context.registration_id.as_deref() {
        Some(id) if !id.trim().is_empty() => Ok(()),
        _ => Err((
            FailureCode::IdentifierUnresolved,
            format!(
                "registration id missing for {}; route through enrichment before retrying",
                context.entity_ref
            ),
        )),
    }
}

/// Two digits, a hyphen, seven digits. Validated character by character so
/// only deterministic identifiers make it past this gate: a fuzzy-matched
/// value can never satisfy the shape by accident of scoring.
fn check_identifier_format(context: &LookupContext) -> GateOutcome {
    let id = context.registration_id.as_deref().unwrap_or_default().trim();

    if well_formed_registration_id(id) {
        Ok(())
    } else {
        Err((
            FailureCode::IdentifierMalformed,
            format!("registration id '{id}' does not match NN-NNNNNNN"),
        ))
    }
}

fn well_formed_registration_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    for (index, byte) in bytes.iter().enumerate() {
        let ok = if index == 2 {
            *byte == b'-'
        } else {
            byte.is_ascii_digit()
        };
        if !ok {
            return false;
        }
    }
    true
}

fn check_identity_anchor(context: &LookupContext) -> GateOutcome {
    let anchors = context.anchors();
    if !anchors.any() {
        return Err((
            FailureCode::AnchorMissing,
            format!(
                "neither domain nor network profile present for {}",
                context.entity_ref
            ),
        ));
    }

    if blank(context.company_ref.as_deref()) {
        return Err((
            FailureCode::CompanyRefMissing,
            format!("company reference missing for {}", context.entity_ref),
        ));
    }

    if blank(context.jurisdiction.as_deref()) {
        return Err((
            FailureCode::JurisdictionMissing,
            format!("jurisdiction missing for {}", context.entity_ref),
        ));
    }

    Ok(())
}

fn check_source_whitelist(context: &LookupContext) -> GateOutcome {
    let raw = context.source.as_deref().unwrap_or_default();
    match ApprovedSource::from_label(raw) {
        Some(_) => Ok(()),
        None => Err((
            FailureCode::SourceNotApproved,
            format!("source '{raw}' is not on the approved list"),
        )),
    }
}

fn check_freshness(context: &LookupContext, policy: &GatePolicy, today: NaiveDate) -> GateOutcome {
    let Some(filing_year) = context.filing_year else {
        return Err((
            FailureCode::FilingYearMissing,
            format!("no filing year recorded for {}", context.entity_ref),
        ));
    };

    let age = today.year() - filing_year;
    if age > policy.max_filing_age_years {
        Err((
            FailureCode::FilingStale,
            format!(
                "filing year {filing_year} is {age} years old (max {})",
                policy.max_filing_age_years
            ),
        ))
    } else {
        Ok(())
    }
}

fn check_integrity(context: &LookupContext) -> GateOutcome {
    let Some(fingerprint) = context
        .content_fingerprint
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    else {
        return Err((
            FailureCode::FingerprintMissing,
            format!("no content fingerprint supplied for {}", context.entity_ref),
        ));
    };

    let hex = fingerprint.len() == FINGERPRINT_LEN
        && fingerprint.bytes().all(|byte| byte.is_ascii_hexdigit());
    if hex {
        Ok(())
    } else {
        Err((
            FailureCode::FingerprintMalformed,
            format!(
                "fingerprint must be {FINGERPRINT_LEN} hexadecimal characters, got {}",
                fingerprint.len()
            ),
        ))
    }
}

fn blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}
