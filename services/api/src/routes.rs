use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use edital_ai::error::AppError;
use edital_ai::workflows::procurement::analysis::{
    analysis_router, AnalysisStore, BidAnalysisService, BidAnalyzer, BidDecision, BidNoticeDraft,
    CompanyProfileDraft, DecisionNotifier, NoticeIntake, ProcurementDirectory, ScoreSet,
    ScoreWeights, StrategicRecommendation,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Ad-hoc evaluation of inline drafts. Nothing is persisted; the caller
/// gets the full analysis back and decides what to do with it.
#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) bid: BidNoticeDraft,
    pub(crate) company: CompanyProfileDraft,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluateResponse {
    pub(crate) today: NaiveDate,
    pub(crate) scores: ScoreSet,
    pub(crate) decision: BidDecision,
    pub(crate) recommendation: StrategicRecommendation,
}

pub(crate) fn with_analysis_routes<D, S, N>(
    service: Arc<BidAnalysisService<D, S, N>>,
) -> axum::Router
where
    D: ProcurementDirectory + 'static,
    S: AnalysisStore + 'static,
    N: DecisionNotifier + 'static,
{
    analysis_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/procurement/evaluate",
            axum::routing::post(evaluate_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn evaluate_endpoint(
    Extension(weights): Extension<ScoreWeights>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let EvaluateRequest { bid, company, today } = payload;

    let intake = NoticeIntake;
    let notice = intake.notice_from_draft(bid)?;
    let profile = intake.company_from_draft(company)?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let analysis = BidAnalyzer::new(weights).analyze(&notice, &profile, today);

    Ok(Json(EvaluateResponse {
        today,
        scores: analysis.scores,
        decision: analysis.decision,
        recommendation: analysis.recommendation,
    }))
}
