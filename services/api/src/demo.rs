use crate::infra::{
    default_pipeline_config, parse_date, InMemoryCandidateDirectory, InMemoryErrorTable,
    InMemoryEventLog, InMemoryUpstreamStatusSource,
};
use chrono::{Datelike, Local, NaiveDate, Utc};
use clap::Args;
use prospect_ai::error::AppError;
use prospect_ai::workflows::gating::{GateError, LookupContext, UpstreamStatus};
use prospect_ai::workflows::pipeline::{PipelineError, ProspectPipeline};
use prospect_ai::workflows::resolution::{CompanyContext, CompanyId, ContactRecord, MatchOptions};
use prospect_ai::workflows::scoring::{
    ChurnAnalysis, ChurnAnalyzer, ChurnConfig, IntentSignalBundle, MovementChange, MovementEvent,
};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ChurnReportArgs {
    /// Movement-event CSV export (person,role,occurred_on,change)
    #[arg(long)]
    pub(crate) events_csv: PathBuf,
    /// Override the lookback window in days
    #[arg(long)]
    pub(crate) lookback_days: Option<i64>,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the full per-signal breakdown for the scoring portion.
    #[arg(long)]
    pub(crate) include_breakdown: bool,
}

pub(crate) fn run_churn_report(args: ChurnReportArgs) -> Result<(), AppError> {
    let ChurnReportArgs {
        events_csv,
        lookback_days,
        today,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let events = load_movement_events(&events_csv)?;

    let analyzer = ChurnAnalyzer::new(ChurnConfig::default());
    let analysis = match lookback_days {
        Some(days) => analyzer.analyze_with_lookback(&events, days, today),
        None => analyzer.analyze(&events, today),
    };

    render_churn_analysis(&analysis, events.len());
    Ok(())
}

#[derive(Debug, serde::Deserialize)]
struct MovementRow {
    person: String,
    role: String,
    occurred_on: String,
    change: String,
}

fn load_movement_events(path: &PathBuf) -> Result<Vec<MovementEvent>, AppError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut events = Vec::new();
    for row in reader.deserialize::<MovementRow>() {
        let row = row.map_err(invalid_data)?;
        let occurred_on = parse_date(&row.occurred_on).map_err(invalid_data)?;
        let change = parse_change(&row.change).map_err(invalid_data)?;
        events.push(MovementEvent {
            person: row.person,
            role: row.role,
            occurred_on,
            change,
        });
    }
    Ok(events)
}

fn parse_change(raw: &str) -> Result<MovementChange, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "company" => Ok(MovementChange::Company),
        "title" => Ok(MovementChange::Title),
        other => Err(format!("unknown movement change '{other}'")),
    }
}

fn invalid_data(err: impl ToString) -> AppError {
    AppError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        err.to_string(),
    ))
}

fn render_churn_analysis(analysis: &ChurnAnalysis, total_events: usize) {
    println!("Churn report");
    println!(
        "- Window {} .. {} ({} of {} events in window)",
        analysis.window_start,
        analysis.window_end,
        analysis.events_in_window.len(),
        total_events
    );
    println!(
        "- Score {} -> {} risk{}",
        analysis.score,
        analysis.risk.label(),
        if analysis.critical_slot_event {
            " (critical slot affected)"
        } else {
            ""
        }
    );
    match analysis.velocity_per_month {
        Some(velocity) => println!("- Velocity {velocity:.2} events/month"),
        None => println!("- Velocity: not enough events to establish a trend"),
    }
    for event in &analysis.events_in_window {
        println!(
            "  - {} ({}) on {} | {} points{}",
            event.person,
            event.role,
            event.occurred_on,
            event.score,
            if event.critical_slot { " | critical slot" } else { "" }
        );
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        include_breakdown,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let now = Utc::now();

    let event_log = Arc::new(InMemoryEventLog::default());
    let error_table = Arc::new(InMemoryErrorTable::default());
    let pipeline = ProspectPipeline::new(
        Arc::new(InMemoryCandidateDirectory::seeded()),
        Arc::new(InMemoryUpstreamStatusSource::seeded()),
        event_log.clone(),
        error_table.clone(),
        default_pipeline_config(),
    );

    let midwest = CompanyContext {
        company_id: CompanyId("co-midwest-401".to_string()),
        canonical_name: "Midwest Benefits Partners".to_string(),
    };

    println!("Prospect intent engine demo");

    println!("\nEntity resolution");
    let mut record = ContactRecord::new("Bob Keene", midwest.clone());
    record.observed_employer = Some("Midwest Benefits Partners LLC".to_string());
    let options = MatchOptions {
        require_company_match: true,
        title_hint: Some("benefits".to_string()),
    };
    let resolution = pipeline.resolve_contact(record, &options, now)?;
    if let Some(match_result) = &resolution.match_result {
        println!(
            "- 'Bob Keene' -> {} (score {}, email {})",
            match_result.status.label(),
            match_result.score,
            resolution.record.email_status.label()
        );
        for ranked in &match_result.ranked {
            println!(
                "    candidate {} scored {}",
                ranked.candidate.display_name, ranked.score
            );
        }
    }

    let mut revoked = ContactRecord::new("Priya Raman", midwest.clone());
    revoked.company_valid = false;
    revoked.invalid_reason = Some("registration_revoked".to_string());
    let skipped = pipeline.resolve_contact(revoked, &MatchOptions::default(), now)?;
    println!(
        "- Invalid company -> email {} (reason: {})",
        skipped.record.email_status.label(),
        skipped.record.invalid_reason.as_deref().unwrap_or("unspecified")
    );

    let mut misaligned = ContactRecord::new("Dana Whitfield", midwest);
    misaligned.observed_employer = Some("Acme Logistics".to_string());
    let mismatch = pipeline.resolve_contact(misaligned, &MatchOptions::default(), now)?;
    if let Some(failure) = &mismatch.failure {
        println!(
            "- Employer mismatch routed as {} (event {}, row {})",
            failure.code.label(),
            failure.event_id.0,
            failure.error_id.0
        );
    }

    println!("\nExecution gates");
    let context = demo_context("co-midwest-401", today);
    match pipeline.clear_for_enrichment(context, now) {
        Ok(clearance) => println!(
            "- co-midwest-401 cleared all {} gates (event {})",
            clearance.gates_passed.len(),
            clearance.event_id.0
        ),
        Err(err) => println!("- co-midwest-401 unexpectedly rejected: {err}"),
    }

    let pending = demo_context("co-lakeside-77", today);
    match pipeline.clear_for_enrichment(pending, now) {
        Err(PipelineError::Gate(GateError::Rejected(rejection))) => println!(
            "- co-lakeside-77 rejected at the {} gate: {} (remediation: {})",
            rejection.gate.label(),
            rejection.report.code.label(),
            rejection.report.code.remediation().label()
        ),
        other => println!("- co-lakeside-77 produced an unexpected outcome: {other:?}"),
    }

    println!("\nIntent scoring");
    let bundle = IntentSignalBundle {
        movement_detected: true,
        days_until_renewal: Some(25),
        in_renewal_window: false,
        job_postings_count: 3,
        news_mentions_count: 1,
        website_activity_score: 50,
        competitor_flag: false,
        employee_count: 750,
    };
    let score = pipeline.score_intent("co-midwest-401", &bundle, now)?;
    println!(
        "- Composite {} -> {} (bundle fingerprint {})",
        score.composite_score,
        score.tier.label(),
        bundle.fingerprint()
    );
    if include_breakdown {
        for line in &score.breakdown {
            println!("    {line}");
        }
    }

    println!("\nChurn and renewal");
    let movement = vec![
        MovementEvent {
            person: "Dana Whitfield".to_string(),
            role: "Director of Human Resources".to_string(),
            occurred_on: today - chrono::Duration::days(20),
            change: MovementChange::Company,
        },
        MovementEvent {
            person: "Robert Keene".to_string(),
            role: "Benefits Manager".to_string(),
            occurred_on: today - chrono::Duration::days(75),
            change: MovementChange::Title,
        },
    ];
    let churn = pipeline.analyze_churn(&movement, None, today);
    println!(
        "- Churn score {} -> {} risk over {} in-window events",
        churn.score,
        churn.risk.label(),
        churn.events_in_window.len()
    );

    let renewal_date = NaiveDate::from_ymd_opt(today.year(), 12, 1)
        .unwrap_or(today)
        .max(today + chrono::Duration::days(40));
    let renewal = pipeline.renewal_intent(Some(renewal_date), today);
    println!(
        "- Renewal on {} -> {} urgency{}",
        renewal_date,
        renewal.urgency.label(),
        match renewal.window {
            Some(window) => format!(" (outreach {} .. {})", window.opens_on, window.closes_on),
            None => String::new(),
        }
    );

    println!("\nAudit trail");
    for (id, event) in event_log.entries() {
        println!(
            "- {} {} entity={} code={}",
            id.0,
            event.status.label(),
            event.entity_ref.as_deref().unwrap_or("unknown"),
            event.code.map(|code| code.label()).unwrap_or("-")
        );
    }
    for (id, row, event_id) in error_table.entries() {
        println!(
            "- {} {} linked to {} ({})",
            id.0,
            row.code.label(),
            event_id.0,
            row.message
        );
    }

    Ok(())
}

fn demo_context(entity_ref: &str, today: NaiveDate) -> LookupContext {
    LookupContext {
        entity_ref: entity_ref.to_string(),
        upstream_status: Some(UpstreamStatus::Pass),
        registration_id: Some("12-3456789".to_string()),
        domain: Some("example.com".to_string()),
        network_profile_url: None,
        company_ref: Some(entity_ref.to_string()),
        jurisdiction: Some("IA".to_string()),
        source: Some("state_registry".to_string()),
        filing_year: Some(today.year()),
        content_fingerprint: Some("0123456789abcdef".repeat(4)),
    }
}
