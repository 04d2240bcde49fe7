use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::procurement::analysis::router::{analyze_handler, status_handler};
use crate::workflows::procurement::analysis::{AnalysisRequest, BidAnalysisService, ScoreWeights};

#[tokio::test]
async fn analyze_route_accepts_stored_pairs() {
    let (service, _, _) = build_service();
    let router = analysis_router_with_service(service);

    let body = json!({
        "bid_id": bid_id().0,
        "company_id": company_id().0,
        "today": "2025-03-10",
    });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/procurement/analyses")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&body).expect("serialize request"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert!(payload.get("analysis_id").is_some());
    assert_eq!(
        payload.get("call").and_then(serde_json::Value::as_str),
        Some("participate")
    );
    assert_eq!(
        payload
            .get("overall_score")
            .and_then(serde_json::Value::as_u64),
        Some(93)
    );
}

#[tokio::test]
async fn analyze_route_returns_not_found_for_unknown_bids() {
    let (service, _, _) = build_service();
    let router = analysis_router_with_service(service);

    let body = json!({
        "bid_id": "missing",
        "company_id": company_id().0,
        "today": "2025-03-10",
    });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/procurement/analyses")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&body).expect("serialize request"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .contains("missing"));
}

#[tokio::test]
async fn status_route_returns_stored_analyses() {
    let (service, _, _) = build_service();
    let record = service
        .analyze(&bid_id(), &company_id(), today())
        .expect("analysis succeeds");
    let router = analysis_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get(format!(
                "/api/v1/procurement/analyses/{}",
                record.analysis_id.0
            ))
            .body(axum::body::Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .get("analysis_id")
            .and_then(serde_json::Value::as_str),
        Some(record.analysis_id.0.as_str())
    );
    assert_eq!(
        payload.get("priority").and_then(serde_json::Value::as_str),
        Some("high")
    );
}

#[tokio::test]
async fn status_handler_reports_missing_analyses() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);

    let response = status_handler::<MemoryDirectory, MemoryStore, MemoryNotifier>(
        State(service),
        axum::extract::Path("ana-999999".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("analysis_id"), Some(&json!("ana-999999")));
}

#[tokio::test]
async fn analyze_handler_surfaces_store_outages() {
    let service = Arc::new(BidAnalysisService::new(
        Arc::new(MemoryDirectory::seeded()),
        Arc::new(UnavailableStore),
        Arc::new(MemoryNotifier::default()),
        ScoreWeights::default(),
    ));

    let response = analyze_handler::<MemoryDirectory, UnavailableStore, MemoryNotifier>(
        State(service),
        axum::Json(AnalysisRequest {
            bid_id: bid_id().0,
            company_id: company_id().0,
            today: Some(today()),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
