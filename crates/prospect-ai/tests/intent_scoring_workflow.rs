//! Integration specifications for composite intent scoring through the
//! pipeline facade, including bundle validation routing, batch ordering, and
//! the churn and renewal sub-analyzers.

mod common {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use prospect_ai::workflows::audit::{
        AuditEvent, AuditStoreError, ErrorRow, ErrorRowId, ErrorTable, EventId, EventLog,
    };
    use prospect_ai::workflows::gating::UpstreamStatus;
    use prospect_ai::workflows::pipeline::{
        CandidateDirectory, DirectoryError, PipelineConfig, ProspectPipeline, UpstreamStatusSource,
    };
    use prospect_ai::workflows::resolution::{CandidateEntity, CompanyId};
    use prospect_ai::workflows::scoring::IntentSignalBundle;

    #[derive(Default)]
    pub(super) struct WriteOrder {
        counter: AtomicU64,
    }

    impl WriteOrder {
        pub(super) fn next(&self) -> u64 {
            self.counter.fetch_add(1, Ordering::SeqCst)
        }
    }

    pub(super) struct MemoryEventLog {
        order: Arc<WriteOrder>,
        pub(super) events: Mutex<Vec<(EventId, AuditEvent, u64)>>,
    }

    impl MemoryEventLog {
        pub(super) fn new(order: Arc<WriteOrder>) -> Self {
            Self {
                order,
                events: Mutex::new(Vec::new()),
            }
        }

        pub(super) fn entries(&self) -> Vec<(EventId, AuditEvent, u64)> {
            self.events.lock().expect("event log mutex poisoned").clone()
        }
    }

    impl EventLog for MemoryEventLog {
        fn append(&self, event: AuditEvent) -> Result<EventId, AuditStoreError> {
            let sequence = self.order.next();
            let id = EventId(format!("evt-{sequence:04}"));
            self.events
                .lock()
                .expect("event log mutex poisoned")
                .push((id.clone(), event, sequence));
            Ok(id)
        }
    }

    pub(super) struct MemoryErrorTable {
        order: Arc<WriteOrder>,
        pub(super) rows: Mutex<Vec<(ErrorRowId, ErrorRow, EventId, u64)>>,
    }

    impl MemoryErrorTable {
        pub(super) fn new(order: Arc<WriteOrder>) -> Self {
            Self {
                order,
                rows: Mutex::new(Vec::new()),
            }
        }

        pub(super) fn entries(&self) -> Vec<(ErrorRowId, ErrorRow, EventId, u64)> {
            self.rows.lock().expect("error table mutex poisoned").clone()
        }
    }

    impl ErrorTable for MemoryErrorTable {
        fn write(&self, row: ErrorRow, event_id: &EventId) -> Result<ErrorRowId, AuditStoreError> {
            let sequence = self.order.next();
            let id = ErrorRowId(format!("err-{sequence:04}"));
            self.rows
                .lock()
                .expect("error table mutex poisoned")
                .push((id.clone(), row, event_id.clone(), sequence));
            Ok(id)
        }
    }

    #[derive(Default)]
    pub(super) struct EmptyDirectory;

    impl CandidateDirectory for EmptyDirectory {
        fn list_candidates(
            &self,
            _company: &CompanyId,
        ) -> Result<Vec<CandidateEntity>, DirectoryError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    pub(super) struct NoUpstream;

    impl UpstreamStatusSource for NoUpstream {
        fn upstream_status(
            &self,
            _entity_ref: &str,
        ) -> Result<Option<UpstreamStatus>, DirectoryError> {
            Ok(None)
        }
    }

    pub(super) type TestPipeline =
        ProspectPipeline<EmptyDirectory, NoUpstream, MemoryEventLog, MemoryErrorTable>;

    pub(super) fn build_pipeline() -> (TestPipeline, Arc<MemoryEventLog>, Arc<MemoryErrorTable>) {
        let order = Arc::new(WriteOrder::default());
        let event_log = Arc::new(MemoryEventLog::new(order.clone()));
        let error_table = Arc::new(MemoryErrorTable::new(order));

        let pipeline = ProspectPipeline::new(
            Arc::new(EmptyDirectory),
            Arc::new(NoUpstream),
            event_log.clone(),
            error_table.clone(),
            PipelineConfig::default(),
        );

        (pipeline, event_log, error_table)
    }

    pub(super) fn active_bundle() -> IntentSignalBundle {
        IntentSignalBundle {
            movement_detected: true,
            days_until_renewal: Some(25),
            in_renewal_window: false,
            job_postings_count: 3,
            news_mentions_count: 1,
            website_activity_score: 50,
            competitor_flag: false,
            employee_count: 750,
        }
    }
}

use chrono::{NaiveDate, Utc};
use common::{active_bundle, build_pipeline};
use prospect_ai::workflows::audit::{EventStatus, FailureCode, Severity};
use prospect_ai::workflows::pipeline::PipelineError;
use prospect_ai::workflows::scoring::{
    ChurnRisk, IntentSignalBundle, IntentTier, MovementChange, MovementEvent, RenewalUrgency,
    SignalKind,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn active_bundle_scores_hot_with_every_signal_reported() {
    let (pipeline, event_log, _) = build_pipeline();

    let result = pipeline
        .score_intent("co-midwest-401", &active_bundle(), Utc::now())
        .expect("valid bundle scores");

    // movement 100*.35 + renewal 90*.30 + activity 50*.20 + size 100*.15
    assert_eq!(result.composite_score, 87);
    assert_eq!(result.tier, IntentTier::Hot);
    assert_eq!(result.components.len(), 4);
    assert!(result.signals_used.contains(&SignalKind::Movement));
    assert!(result.signals_used.contains(&SignalKind::Renewal));

    // Scoring a valid bundle writes nothing anywhere.
    assert!(event_log.entries().is_empty());
}

#[test]
fn mid_size_firms_outscore_both_tails_of_the_size_curve() {
    let (pipeline, _, _) = build_pipeline();

    let score_for = |employee_count: u32| {
        let bundle = IntentSignalBundle {
            employee_count,
            ..active_bundle()
        };
        pipeline
            .score_intent("co-midwest-401", &bundle, Utc::now())
            .expect("valid bundle scores")
            .composite_score
    };

    let sweet_spot = score_for(750);
    let tiny = score_for(30);
    let giant = score_for(12_000);

    assert!(sweet_spot > tiny);
    assert!(sweet_spot > giant);
}

#[test]
fn out_of_range_bundle_routes_a_hard_failure_before_returning() {
    let (pipeline, event_log, error_table) = build_pipeline();

    let bundle = IntentSignalBundle {
        website_activity_score: 140,
        ..active_bundle()
    };

    let error = pipeline
        .score_intent("co-midwest-401", &bundle, Utc::now())
        .expect_err("invalid bundle is rejected");

    let report = match error {
        PipelineError::InvalidBundle(report) => report,
        other => panic!("expected invalid-bundle error, got {other:?}"),
    };
    assert_eq!(report.code, FailureCode::InvalidSignalBundle);

    let events = event_log.entries();
    let rows = error_table.entries();
    assert_eq!(events.len(), 1);
    assert_eq!(rows.len(), 1);

    let (event_id, event, event_sequence) = &events[0];
    let (_, row, linked_event, row_sequence) = &rows[0];

    assert_eq!(event.status, EventStatus::Aborted);
    assert_eq!(event.code, Some(FailureCode::InvalidSignalBundle));
    assert_eq!(linked_event, event_id);
    assert_eq!(row.severity, Severity::Hard);
    assert!(event_sequence < row_sequence, "event must be written first");
}

#[test]
fn batch_scoring_preserves_input_order_and_matches_sequential_results() {
    let (pipeline, _, _) = build_pipeline();
    let scored_at = Utc::now();

    let bundles: Vec<IntentSignalBundle> = (0u32..24)
        .map(|step| IntentSignalBundle {
            movement_detected: step % 2 == 0,
            days_until_renewal: Some(i64::from(step) * 10),
            employee_count: step * 100,
            ..active_bundle()
        })
        .collect();

    let batch = pipeline.score_intent_batch(&bundles, scored_at);
    assert_eq!(batch.len(), bundles.len());

    for (bundle, batched) in bundles.iter().zip(&batch) {
        let sequential = pipeline
            .score_intent("co-midwest-401", bundle, scored_at)
            .expect("valid bundle scores");
        assert_eq!(batched.composite_score, sequential.composite_score);
        assert_eq!(batched.tier, sequential.tier);
    }
}

#[test]
fn critical_slot_departure_holds_churn_risk_at_medium_or_above() {
    let (pipeline, _, _) = build_pipeline();
    let today = date(2026, 8, 1);

    // One stale event plus one in-window critical departure.
    let events = vec![
        MovementEvent {
            person: "Priya Raman".to_string(),
            role: "Benefits Administrator".to_string(),
            occurred_on: date(2025, 6, 1),
            change: MovementChange::Company,
        },
        MovementEvent {
            person: "Dana Whitfield".to_string(),
            role: "Head of Human Resources".to_string(),
            occurred_on: date(2026, 7, 20),
            change: MovementChange::Company,
        },
    ];

    let analysis = pipeline.analyze_churn(&events, None, today);

    assert_eq!(analysis.events_in_window.len(), 1);
    assert!(analysis.critical_slot_event);
    assert!(analysis.risk >= ChurnRisk::Medium);
    // A single event never establishes a velocity trend.
    assert!(analysis.velocity_per_month.is_none());
}

#[test]
fn renewal_urgency_follows_the_distance_to_the_renewal_date() {
    let (pipeline, _, _) = build_pipeline();
    let today = date(2026, 8, 1);

    let urgency_at = |renewal: NaiveDate| pipeline.renewal_intent(Some(renewal), today).urgency;

    assert_eq!(urgency_at(date(2026, 8, 10)), RenewalUrgency::Critical);
    assert_eq!(urgency_at(date(2026, 9, 10)), RenewalUrgency::Urgent);
    assert_eq!(urgency_at(date(2026, 11, 10)), RenewalUrgency::Approaching);
    assert_eq!(urgency_at(date(2027, 6, 1)), RenewalUrgency::Distant);
    assert_eq!(
        pipeline.renewal_intent(None, today).urgency,
        RenewalUrgency::Unknown
    );

    let intent = pipeline.renewal_intent(Some(date(2026, 11, 10)), today);
    let window = intent.window.expect("known renewal date has a window");
    assert_eq!(window.opens_on, date(2026, 8, 12));
    assert_eq!(window.closes_on, date(2026, 10, 26));
}
