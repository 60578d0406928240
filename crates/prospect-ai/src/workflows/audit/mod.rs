//! Fail-hard failure routing: the dual-write discipline recording every hard
//! failure in the authoritative event log and the operational error table.

pub mod codes;
pub mod router;
pub mod stores;

pub use codes::{FailureCode, Remediation, Severity};
pub use router::{FailureContext, FailureReport, FailureRouter};
pub use stores::{
    AnchorPresence, AuditEvent, AuditStoreError, ErrorRow, ErrorRowId, ErrorTable, EventId,
    EventLog, EventStatus,
};
