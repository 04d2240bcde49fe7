use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnalysisId, BidId, CompanyId};
use super::repository::{AnalysisStore, DecisionNotifier, ProcurementDirectory};
use super::service::{AnalysisServiceError, BidAnalysisService};

/// Request body for triggering an analysis of stored records. The
/// evaluation date is an explicit input so replays stay reproducible;
/// when omitted it defaults to the server's current date.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub bid_id: String,
    pub company_id: String,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Router builder exposing HTTP endpoints for running and fetching
/// analyses.
pub fn analysis_router<D, S, N>(service: Arc<BidAnalysisService<D, S, N>>) -> Router
where
    D: ProcurementDirectory + 'static,
    S: AnalysisStore + 'static,
    N: DecisionNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/procurement/analyses",
            post(analyze_handler::<D, S, N>),
        )
        .route(
            "/api/v1/procurement/analyses/:analysis_id",
            get(status_handler::<D, S, N>),
        )
        .with_state(service)
}

pub(crate) async fn analyze_handler<D, S, N>(
    State(service): State<Arc<BidAnalysisService<D, S, N>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    D: ProcurementDirectory + 'static,
    S: AnalysisStore + 'static,
    N: DecisionNotifier + 'static,
{
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    let bid_id = BidId(request.bid_id);
    let company_id = CompanyId(request.company_id);

    match service.analyze(&bid_id, &company_id, today) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(error @ (AnalysisServiceError::UnknownBid(_) | AnalysisServiceError::UnknownCompany(_))) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<D, S, N>(
    State(service): State<Arc<BidAnalysisService<D, S, N>>>,
    Path(analysis_id): Path<String>,
) -> Response
where
    D: ProcurementDirectory + 'static,
    S: AnalysisStore + 'static,
    N: DecisionNotifier + 'static,
{
    let id = AnalysisId(analysis_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AnalysisServiceError::NotFound) => {
            let payload = json!({
                "analysis_id": id.0,
                "error": "analysis not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
