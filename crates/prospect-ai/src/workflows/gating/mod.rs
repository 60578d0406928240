//! Ordered execution-gate chain enforcing identity preconditions before any
//! identifier-dependent lookup runs. Each gate is terminal on failure: the
//! first rejection routes through the failure router and no later gate
//! executes.

pub mod context;
mod gates;

pub use context::{ApprovedSource, GatePolicy, LookupContext, UpstreamStatus};
pub use gates::GateKind;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::workflows::audit::{
    AuditStoreError, ErrorTable, EventId, EventLog, FailureContext, FailureReport, FailureRouter,
};

/// Success result: the single authoritative clearance event plus the gate
/// order that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateClearance {
    pub event_id: EventId,
    pub gates_passed: Vec<GateKind>,
}

/// First-failure result carrying the dual-write report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRejection {
    pub gate: GateKind,
    pub gates_passed: Vec<GateKind>,
    pub report: FailureReport,
}

/// Error surface of one chain evaluation. A rejection is the chain doing its
/// job; a store error is infrastructure and propagates untouched.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("{} gate rejected context: {}", .0.gate.label(), .0.report.message)]
    Rejected(GateRejection),
    #[error(transparent)]
    Store(#[from] AuditStoreError),
}

/// Stateless driver iterating `GateKind::ordered()`. Each call receives a
/// complete context and returns a complete result; nothing is shared between
/// invocations beyond the injected stores.
pub struct GateChain<E, T> {
    router: Arc<FailureRouter<E, T>>,
    policy: GatePolicy,
}

impl<E, T> GateChain<E, T>
where
    E: EventLog + 'static,
    T: ErrorTable + 'static,
{
    pub fn new(router: Arc<FailureRouter<E, T>>, policy: GatePolicy) -> Self {
        Self { router, policy }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Run every gate in order against the context.
    ///
    /// On full success exactly one clearance event is written and no
    /// error-table row. On the first failure the router performs its ordered
    /// dual write and the chain halts.
    pub fn evaluate(
        &self,
        context: &LookupContext,
        now: DateTime<Utc>,
    ) -> Result<GateClearance, GateError> {
        let today = now.date_naive();
        let mut gates_passed: Vec<GateKind> = Vec::new();

        for kind in GateKind::ordered() {
            match gates::run_gate(kind, context, &self.policy, today) {
                Ok(()) => gates_passed.push(kind),
                Err((code, message)) => {
                    let report = self.router.fail_hard(
                        code,
                        message,
                        self.failure_context(context, &gates_passed),
                        now,
                    )?;

                    return Err(GateError::Rejected(GateRejection {
                        gate: kind,
                        gates_passed,
                        report,
                    }));
                }
            }
        }

        let event_id = self.router.record_clearance(
            format!("all gates cleared for {}", context.entity_ref),
            self.failure_context(context, &gates_passed),
            now,
        )?;

        info!(entity = %context.entity_ref, event = %event_id.0, "gate chain cleared");

        Ok(GateClearance {
            event_id,
            gates_passed,
        })
    }

    fn failure_context(&self, context: &LookupContext, passed: &[GateKind]) -> FailureContext {
        FailureContext {
            entity_ref: Some(context.entity_ref.clone()),
            identity_gate_passed: passed.contains(&GateKind::IdentityAnchor),
            anchors: context.anchors(),
            payload: serde_json::json!({
                "gates_passed": passed.iter().map(|gate| gate.label()).collect::<Vec<_>>(),
                "source": context.source,
                "jurisdiction": context.jurisdiction,
            }),
        }
    }
}
