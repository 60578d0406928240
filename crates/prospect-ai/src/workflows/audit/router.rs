use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::codes::{FailureCode, Severity};
use super::stores::{
    AnchorPresence, AuditEvent, AuditStoreError, ErrorRow, ErrorRowId, ErrorTable, EventId,
    EventLog, EventStatus,
};

/// Entity and identity context attached to a routed failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureContext {
    pub entity_ref: Option<String>,
    pub identity_gate_passed: bool,
    pub anchors: AnchorPresence,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl FailureContext {
    pub fn for_entity(entity_ref: impl Into<String>) -> Self {
        Self {
            entity_ref: Some(entity_ref.into()),
            ..Self::default()
        }
    }
}

/// Structured result of a routed failure. A caller holding one of these must
/// treat the unit of work as terminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    pub event_id: EventId,
    pub error_id: ErrorRowId,
    pub code: FailureCode,
    pub message: String,
}

/// The single code path recording hard failures: one authoritative event,
/// then one operational error row linked by the event id, in that order.
pub struct FailureRouter<E, T> {
    event_log: Arc<E>,
    error_table: Arc<T>,
}

impl<E, T> FailureRouter<E, T>
where
    E: EventLog + 'static,
    T: ErrorTable + 'static,
{
    pub fn new(event_log: Arc<E>, error_table: Arc<T>) -> Self {
        Self {
            event_log,
            error_table,
        }
    }

    /// Record a hard failure in both stores and return the linked report.
    ///
    /// The event is written first; only the id it returns may link the error
    /// row. A store failure at either step propagates untouched: there is no
    /// retry and no alternate path.
    pub fn fail_hard(
        &self,
        code: FailureCode,
        message: impl Into<String>,
        context: FailureContext,
        now: DateTime<Utc>,
    ) -> Result<FailureReport, AuditStoreError> {
        let message = message.into();

        let event_id = self.event_log.append(AuditEvent {
            status: EventStatus::Aborted,
            code: Some(code),
            message: message.clone(),
            entity_ref: context.entity_ref.clone(),
            identity_gate_passed: context.identity_gate_passed,
            anchors: context.anchors,
            payload: context.payload.clone(),
            recorded_at: now,
        })?;

        let error_id = self.error_table.write(
            ErrorRow {
                code,
                message: message.clone(),
                severity: Severity::Hard,
                entity_ref: context.entity_ref.clone(),
                payload: context.payload,
                resolved: false,
                recorded_at: now,
            },
            &event_id,
        )?;

        warn!(
            code = code.label(),
            remediation = code.remediation().label(),
            entity = context.entity_ref.as_deref().unwrap_or("unknown"),
            event = %event_id.0,
            "hard failure routed"
        );

        Ok(FailureReport {
            event_id,
            error_id,
            code,
            message,
        })
    }

    /// Record the single authoritative success event for a fully cleared unit
    /// of work. The error table is never touched on this path.
    pub fn record_clearance(
        &self,
        message: impl Into<String>,
        context: FailureContext,
        now: DateTime<Utc>,
    ) -> Result<EventId, AuditStoreError> {
        self.event_log.append(AuditEvent {
            status: EventStatus::Cleared,
            code: None,
            message: message.into(),
            entity_ref: context.entity_ref,
            identity_gate_passed: context.identity_gate_passed,
            anchors: context.anchors,
            payload: context.payload,
            recorded_at: now,
        })
    }
}
