use serde::{Deserialize, Serialize};

use crate::workflows::audit::AnchorPresence;

/// Status reported by the upstream identity-resolution stage. Anything other
/// than `Pass` halts the chain at the first gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamStatus {
    Pass,
    Fail,
    Pending,
}

impl UpstreamStatus {
    pub const fn label(self) -> &'static str {
        match self {
            UpstreamStatus::Pass => "pass",
            UpstreamStatus::Fail => "fail",
            UpstreamStatus::Pending => "pending",
        }
    }
}

/// Closed whitelist of data sources allowed to feed gated lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovedSource {
    StateRegistry,
    RegulatoryFiling,
    VerifiedPartner,
    WebsiteScan,
}

impl ApprovedSource {
    pub const fn label(self) -> &'static str {
        match self {
            ApprovedSource::StateRegistry => "state_registry",
            ApprovedSource::RegulatoryFiling => "regulatory_filing",
            ApprovedSource::VerifiedPartner => "verified_partner",
            ApprovedSource::WebsiteScan => "website_scan",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "state_registry" => Some(Self::StateRegistry),
            "regulatory_filing" => Some(Self::RegulatoryFiling),
            "verified_partner" => Some(Self::VerifiedPartner),
            "website_scan" => Some(Self::WebsiteScan),
            _ => None,
        }
    }
}

/// Complete input for one gate-chain evaluation. The chain never mutates it;
/// a fresh context is built per gated operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupContext {
    pub entity_ref: String,
    #[serde(default)]
    pub upstream_status: Option<UpstreamStatus>,
    #[serde(default)]
    pub registration_id: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub network_profile_url: Option<String>,
    #[serde(default)]
    pub company_ref: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub filing_year: Option<i32>,
    #[serde(default)]
    pub content_fingerprint: Option<String>,
}

impl LookupContext {
    pub fn anchors(&self) -> AnchorPresence {
        AnchorPresence {
            domain: present(self.domain.as_deref()),
            network_profile: present(self.network_profile_url.as_deref()),
        }
    }
}

fn present(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

const DEFAULT_MAX_FILING_AGE_YEARS: i32 = 3;

/// Policy dial backing the freshness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatePolicy {
    pub max_filing_age_years: i32,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            max_filing_age_years: DEFAULT_MAX_FILING_AGE_YEARS,
        }
    }
}
