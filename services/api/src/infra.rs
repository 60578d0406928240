use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use prospect_ai::workflows::audit::{
    AuditEvent, AuditStoreError, ErrorRow, ErrorRowId, ErrorTable, EventId, EventLog,
};
use prospect_ai::workflows::gating::UpstreamStatus;
use prospect_ai::workflows::pipeline::{
    CandidateDirectory, DirectoryError, PipelineConfig, ProspectPipeline, UpstreamStatusSource,
};
use prospect_ai::workflows::resolution::{CandidateEntity, CompanyId, EntityId};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Service pipeline wired against the in-memory infrastructure below.
pub(crate) type ServicePipeline = ProspectPipeline<
    InMemoryCandidateDirectory,
    InMemoryUpstreamStatusSource,
    InMemoryEventLog,
    InMemoryErrorTable,
>;

#[derive(Default)]
pub(crate) struct InMemoryEventLog {
    events: Mutex<Vec<(EventId, AuditEvent)>>,
}

impl InMemoryEventLog {
    pub(crate) fn entries(&self) -> Vec<(EventId, AuditEvent)> {
        self.events.lock().expect("event log mutex poisoned").clone()
    }
}

impl EventLog for InMemoryEventLog {
    fn append(&self, event: AuditEvent) -> Result<EventId, AuditStoreError> {
        let mut guard = self.events.lock().expect("event log mutex poisoned");
        let id = EventId(format!("evt-{:06}", guard.len()));
        guard.push((id.clone(), event));
        Ok(id)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryErrorTable {
    rows: Mutex<Vec<(ErrorRowId, ErrorRow, EventId)>>,
}

impl InMemoryErrorTable {
    pub(crate) fn entries(&self) -> Vec<(ErrorRowId, ErrorRow, EventId)> {
        self.rows.lock().expect("error table mutex poisoned").clone()
    }
}

impl ErrorTable for InMemoryErrorTable {
    fn write(&self, row: ErrorRow, event_id: &EventId) -> Result<ErrorRowId, AuditStoreError> {
        let mut guard = self.rows.lock().expect("error table mutex poisoned");
        let id = ErrorRowId(format!("err-{:06}", guard.len()));
        guard.push((id.clone(), row, event_id.clone()));
        Ok(id)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCandidateDirectory {
    candidates: Mutex<HashMap<CompanyId, Vec<CandidateEntity>>>,
}

impl InMemoryCandidateDirectory {
    pub(crate) fn seeded() -> Self {
        let directory = Self::default();
        directory.insert(CandidateEntity {
            entity_id: EntityId("p-1001".to_string()),
            display_name: "Dana Whitfield".to_string(),
            company_id: CompanyId("co-midwest-401".to_string()),
            title: Some("Director of Human Resources".to_string()),
        });
        directory.insert(CandidateEntity {
            entity_id: EntityId("p-1002".to_string()),
            display_name: "Robert Keene".to_string(),
            company_id: CompanyId("co-midwest-401".to_string()),
            title: Some("Benefits Manager".to_string()),
        });
        directory.insert(CandidateEntity {
            entity_id: EntityId("p-2001".to_string()),
            display_name: "Priya Raman".to_string(),
            company_id: CompanyId("co-lakeside-77".to_string()),
            title: Some("VP People".to_string()),
        });
        directory
    }

    pub(crate) fn insert(&self, candidate: CandidateEntity) {
        let mut guard = self.candidates.lock().expect("directory mutex poisoned");
        guard
            .entry(candidate.company_id.clone())
            .or_default()
            .push(candidate);
    }
}

impl CandidateDirectory for InMemoryCandidateDirectory {
    fn list_candidates(&self, company: &CompanyId) -> Result<Vec<CandidateEntity>, DirectoryError> {
        let guard = self.candidates.lock().expect("directory mutex poisoned");
        Ok(guard.get(company).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUpstreamStatusSource {
    statuses: Mutex<HashMap<String, UpstreamStatus>>,
}

impl InMemoryUpstreamStatusSource {
    pub(crate) fn seeded() -> Self {
        let source = Self::default();
        source.set("co-midwest-401", UpstreamStatus::Pass);
        source.set("co-lakeside-77", UpstreamStatus::Pending);
        source
    }

    pub(crate) fn set(&self, entity_ref: &str, status: UpstreamStatus) {
        self.statuses
            .lock()
            .expect("upstream mutex poisoned")
            .insert(entity_ref.to_string(), status);
    }
}

impl UpstreamStatusSource for InMemoryUpstreamStatusSource {
    fn upstream_status(&self, entity_ref: &str) -> Result<Option<UpstreamStatus>, DirectoryError> {
        let guard = self.statuses.lock().expect("upstream mutex poisoned");
        Ok(guard.get(entity_ref).copied())
    }
}

pub(crate) fn default_pipeline_config() -> PipelineConfig {
    PipelineConfig::default()
}

pub(crate) fn build_pipeline() -> Arc<ServicePipeline> {
    Arc::new(ProspectPipeline::new(
        Arc::new(InMemoryCandidateDirectory::seeded()),
        Arc::new(InMemoryUpstreamStatusSource::seeded()),
        Arc::new(InMemoryEventLog::default()),
        Arc::new(InMemoryErrorTable::default()),
        default_pipeline_config(),
    ))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
