use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::assessments::domain::{AssessmentInput, HeartInput};
use crate::assessments::scoring::ScoringConfig;
use crate::assessments::AssessmentService;

fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).unwrap(),
        ))
        .unwrap()
}

fn get_request(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::get(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn assess_route_creates_records() {
    let (service, _, _) = build_service(StubReply::Unavailable);
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/assessments",
            &AssessmentInput::Heart(heart_input()),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("id")
        .and_then(Value::as_str)
        .is_some_and(|id| id.starts_with("asm-")));
    assert_eq!(payload.get("kind").and_then(Value::as_str), Some("heart"));
    assert_eq!(
        payload.pointer("/payload/outcome/result/category"),
        Some(&json!("low"))
    );
}

#[tokio::test]
async fn assess_handler_returns_unprocessable_for_implausible_input() {
    let (service, _, _) = build_service(StubReply::Unavailable);
    let input = AssessmentInput::Heart(HeartInput {
        age: 250.0,
        ..heart_input()
    });

    let response = crate::assessments::router::assess_handler::<MemoryRepository, StubGateway>(
        State(Arc::new(service)),
        axum::Json(input),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error").and_then(Value::as_str),
        Some("invalid input")
    );
}

#[tokio::test]
async fn assess_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(AssessmentService::new(
        Arc::new(UnavailableRepository),
        Arc::new(StubGateway::new(StubReply::Unavailable)),
        ScoringConfig::default(),
    ));

    let response = crate::assessments::router::assess_handler::<UnavailableRepository, StubGateway>(
        State(service),
        axum::Json(AssessmentInput::Diabetes(diabetes_input())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn record_handler_returns_not_found_for_unknown_id() {
    let (service, _, _) = build_service(StubReply::Unavailable);

    let response = crate::assessments::router::record_handler::<MemoryRepository, StubGateway>(
        State(Arc::new(service)),
        Path("asm-999999".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("assessment_id").and_then(Value::as_str),
        Some("asm-999999")
    );
}

#[tokio::test]
async fn record_route_returns_stored_assessment() {
    let (service, _, _) = build_service(StubReply::Unavailable);
    let record = service
        .assess(AssessmentInput::Wellness(healthiest()))
        .expect("wellness recorded");
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request(&format!("/api/v1/assessments/{}", record.id)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("id").and_then(Value::as_str),
        Some(record.id.0.as_str())
    );
}

#[tokio::test]
async fn history_route_applies_kind_and_limit() {
    let (service, _, _) = build_service(StubReply::Unavailable);
    for input in [
        AssessmentInput::Heart(heart_input()),
        AssessmentInput::Diabetes(diabetes_input()),
        AssessmentInput::Heart(heart_input()),
    ] {
        service.assess(input).expect("assessment recorded");
    }
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/assessments?kind=heart&limit=1"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let summaries = payload.as_array().expect("summary list");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].get("kind").and_then(Value::as_str), Some("heart"));
    assert_eq!(summaries[0].get("source").and_then(Value::as_str), Some("local"));
    assert_eq!(summaries[0].get("category").and_then(Value::as_str), Some("Low"));
}

#[tokio::test]
async fn predict_route_returns_reconciled_record() {
    let (service, _, _) = build_service(StubReply::Prediction(remote_prediction(0.73)));
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("POST", "/api/predict/heart", &heart_features()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/payload/source").and_then(Value::as_str),
        Some("remote")
    );
    assert_eq!(
        payload.pointer("/payload/result/category"),
        Some(&json!("high"))
    );
}

#[tokio::test]
async fn predict_route_reports_unavailable_model() {
    let (service, _, _) = build_service(StubReply::Unavailable);
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("POST", "/api/predict/diabetes", &diabetes_features()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error").and_then(Value::as_str),
        Some("Prediction service unavailable")
    );
}

#[tokio::test]
async fn predict_route_passes_upstream_rejections_through() {
    let body = json!({ "error": "Missing required field: thal" });
    let (service, _, _) = build_service(StubReply::Upstream(400, body.clone()));
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("POST", "/api/predict/heart", &heart_features()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json_body(response).await, body);
}
