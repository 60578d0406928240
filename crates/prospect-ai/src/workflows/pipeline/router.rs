use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::{
    CandidateDirectory, PipelineError, ProspectPipeline, UpstreamStatusSource,
};
use crate::workflows::audit::{ErrorTable, EventLog};
use crate::workflows::gating::{GateError, LookupContext};
use crate::workflows::resolution::{ContactRecord, MatchOptions};
use crate::workflows::scoring::{IntentSignalBundle, MovementEvent};

/// Router builder exposing the four pipeline contracts as HTTP endpoints.
pub fn pipeline_router<D, U, E, T>(pipeline: Arc<ProspectPipeline<D, U, E, T>>) -> Router
where
    D: CandidateDirectory + 'static,
    U: UpstreamStatusSource + 'static,
    E: EventLog + 'static,
    T: ErrorTable + 'static,
{
    Router::new()
        .route("/api/v1/prospects/match", post(match_handler::<D, U, E, T>))
        .route("/api/v1/prospects/gate", post(gate_handler::<D, U, E, T>))
        .route("/api/v1/prospects/score", post(score_handler::<D, U, E, T>))
        .route("/api/v1/prospects/churn", post(churn_handler::<D, U, E, T>))
        .with_state(pipeline)
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) record: ContactRecord,
    #[serde(default)]
    pub(crate) options: MatchOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) entity_ref: String,
    pub(crate) bundle: IntentSignalBundle,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChurnRequest {
    pub(crate) events: Vec<MovementEvent>,
    #[serde(default)]
    pub(crate) lookback_days: Option<i64>,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn match_handler<D, U, E, T>(
    State(pipeline): State<Arc<ProspectPipeline<D, U, E, T>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    D: CandidateDirectory + 'static,
    U: UpstreamStatusSource + 'static,
    E: EventLog + 'static,
    T: ErrorTable + 'static,
{
    match pipeline.resolve_contact(request.record, &request.options, Utc::now()) {
        Ok(resolution) => (StatusCode::OK, axum::Json(resolution)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn gate_handler<D, U, E, T>(
    State(pipeline): State<Arc<ProspectPipeline<D, U, E, T>>>,
    axum::Json(context): axum::Json<LookupContext>,
) -> Response
where
    D: CandidateDirectory + 'static,
    U: UpstreamStatusSource + 'static,
    E: EventLog + 'static,
    T: ErrorTable + 'static,
{
    match pipeline.clear_for_enrichment(context, Utc::now()) {
        Ok(clearance) => (StatusCode::OK, axum::Json(clearance)).into_response(),
        Err(PipelineError::Gate(GateError::Rejected(rejection))) => {
            let payload = json!({
                "gate": rejection.gate.label(),
                "code": rejection.report.code.label(),
                "remediation": rejection.report.code.remediation().label(),
                "message": rejection.report.message,
                "event_id": rejection.report.event_id.0,
                "error_id": rejection.report.error_id.0,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<D, U, E, T>(
    State(pipeline): State<Arc<ProspectPipeline<D, U, E, T>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    D: CandidateDirectory + 'static,
    U: UpstreamStatusSource + 'static,
    E: EventLog + 'static,
    T: ErrorTable + 'static,
{
    match pipeline.score_intent(&request.entity_ref, &request.bundle, Utc::now()) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(PipelineError::InvalidBundle(report)) => {
            let payload = json!({
                "code": report.code.label(),
                "message": report.message,
                "event_id": report.event_id.0,
                "error_id": report.error_id.0,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn churn_handler<D, U, E, T>(
    State(pipeline): State<Arc<ProspectPipeline<D, U, E, T>>>,
    axum::Json(request): axum::Json<ChurnRequest>,
) -> Response
where
    D: CandidateDirectory + 'static,
    U: UpstreamStatusSource + 'static,
    E: EventLog + 'static,
    T: ErrorTable + 'static,
{
    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    let analysis = pipeline.analyze_churn(&request.events, request.lookback_days, today);
    (StatusCode::OK, axum::Json(analysis)).into_response()
}

fn error_response(error: PipelineError) -> Response {
    let status = match &error {
        PipelineError::Directory(_) | PipelineError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        PipelineError::Gate(GateError::Store(_)) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
