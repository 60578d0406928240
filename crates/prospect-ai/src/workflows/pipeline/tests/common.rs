use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::audit::{
    AuditEvent, AuditStoreError, ErrorRow, ErrorRowId, ErrorTable, EventId, EventLog,
};
use crate::workflows::gating::UpstreamStatus;
use crate::workflows::pipeline::{
    CandidateDirectory, DirectoryError, PipelineConfig, ProspectPipeline, UpstreamStatusSource,
};
use crate::workflows::resolution::{CandidateEntity, CompanyContext, CompanyId, EntityId};

#[derive(Default)]
pub(super) struct MemoryEventLog {
    events: Mutex<Vec<(EventId, AuditEvent)>>,
}

impl EventLog for MemoryEventLog {
    fn append(&self, event: AuditEvent) -> Result<EventId, AuditStoreError> {
        let mut events = self.events.lock().expect("event log mutex poisoned");
        let id = EventId(format!("evt-{:04}", events.len()));
        events.push((id.clone(), event));
        Ok(id)
    }
}

/// Event log double simulating an unavailable store.
pub(super) struct UnavailableEventLog;

impl EventLog for UnavailableEventLog {
    fn append(&self, _event: AuditEvent) -> Result<EventId, AuditStoreError> {
        Err(AuditStoreError::EventLogUnavailable(
            "connection refused".to_string(),
        ))
    }
}

#[derive(Default)]
pub(super) struct MemoryErrorTable {
    rows: Mutex<Vec<(ErrorRowId, ErrorRow, EventId)>>,
}

impl ErrorTable for MemoryErrorTable {
    fn write(&self, row: ErrorRow, event_id: &EventId) -> Result<ErrorRowId, AuditStoreError> {
        let mut rows = self.rows.lock().expect("error table mutex poisoned");
        let id = ErrorRowId(format!("err-{:04}", rows.len()));
        rows.push((id.clone(), row, event_id.clone()));
        Ok(id)
    }
}

pub(super) struct StaticDirectory {
    candidates: Vec<CandidateEntity>,
}

impl CandidateDirectory for StaticDirectory {
    fn list_candidates(&self, company: &CompanyId) -> Result<Vec<CandidateEntity>, DirectoryError> {
        Ok(self
            .candidates
            .iter()
            .filter(|candidate| &candidate.company_id == company)
            .cloned()
            .collect())
    }
}

pub(super) struct StaticUpstream {
    statuses: HashMap<String, UpstreamStatus>,
}

impl UpstreamStatusSource for StaticUpstream {
    fn upstream_status(&self, entity_ref: &str) -> Result<Option<UpstreamStatus>, DirectoryError> {
        Ok(self.statuses.get(entity_ref).copied())
    }
}

pub(super) type RoutingPipeline =
    ProspectPipeline<StaticDirectory, StaticUpstream, MemoryEventLog, MemoryErrorTable>;

pub(super) fn build_pipeline(status: UpstreamStatus) -> Arc<RoutingPipeline> {
    let directory = StaticDirectory {
        candidates: vec![CandidateEntity {
            entity_id: EntityId("p-1".to_string()),
            display_name: "Dana Whitfield".to_string(),
            company_id: CompanyId("co-midwest-401".to_string()),
            title: None,
        }],
    };
    let mut statuses = HashMap::new();
    statuses.insert("co-midwest-401".to_string(), status);

    Arc::new(ProspectPipeline::new(
        Arc::new(directory),
        Arc::new(StaticUpstream { statuses }),
        Arc::new(MemoryEventLog::default()),
        Arc::new(MemoryErrorTable::default()),
        PipelineConfig::default(),
    ))
}

pub(super) fn build_failing_store_pipeline(
) -> Arc<ProspectPipeline<StaticDirectory, StaticUpstream, UnavailableEventLog, MemoryErrorTable>> {
    let directory = StaticDirectory {
        candidates: Vec::new(),
    };
    let mut statuses = HashMap::new();
    statuses.insert("co-midwest-401".to_string(), UpstreamStatus::Fail);

    Arc::new(ProspectPipeline::new(
        Arc::new(directory),
        Arc::new(StaticUpstream { statuses }),
        Arc::new(UnavailableEventLog),
        Arc::new(MemoryErrorTable::default()),
        PipelineConfig::default(),
    ))
}

pub(super) fn midwest() -> CompanyContext {
    CompanyContext {
        company_id: CompanyId("co-midwest-401".to_string()),
        canonical_name: "Midwest Benefits Partners".to_string(),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
