use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::codes::{FailureCode, Severity};

/// Identifier returned by the authoritative event log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

/// Identifier returned by the operational error table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorRowId(pub String);

/// Which identity anchors were present when an event was recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPresence {
    pub domain: bool,
    pub network_profile: bool,
}

impl AnchorPresence {
    pub const fn any(self) -> bool {
        self.domain || self.network_profile
    }
}

/// Terminal status carried on an authoritative event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Aborted,
    Cleared,
}

impl EventStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EventStatus::Aborted => "aborted",
            EventStatus::Cleared => "cleared",
        }
    }
}

/// Append-only record of one terminal outcome. Written before any error-table
/// row and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub status: EventStatus,
    pub code: Option<FailureCode>,
    pub message: String,
    pub entity_ref: Option<String>,
    pub identity_gate_passed: bool,
    pub anchors: AnchorPresence,
    pub payload: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

/// Operational error row linked to its authoritative event. Unlike the event
/// it may later be marked resolved by remediation tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRow {
    pub code: FailureCode,
    pub message: String,
    pub severity: Severity,
    pub entity_ref: Option<String>,
    pub payload: serde_json::Value,
    pub resolved: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Authoritative append-only store. The returned id links every downstream
/// artifact of the same logical failure.
pub trait EventLog: Send + Sync {
    fn append(&self, event: AuditEvent) -> Result<EventId, AuditStoreError>;
}

/// Operational, queryable store. Rows always reference the event written
/// first for the same failure.
pub trait ErrorTable: Send + Sync {
    fn write(&self, row: ErrorRow, event_id: &EventId) -> Result<ErrorRowId, AuditStoreError>;
}

/// Infrastructure failure from either audit store. Never absorbed: silently
/// continuing after a failed audit write would break the dual-write
/// invariant, so these propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AuditStoreError {
    #[error("event log unavailable: {0}")]
    EventLogUnavailable(String),
    #[error("error table unavailable: {0}")]
    ErrorTableUnavailable(String),
}
