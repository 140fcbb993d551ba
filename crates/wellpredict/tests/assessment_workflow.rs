//! End-to-end scenarios for the assessment workflow.
//!
//! Requests enter through the public router as raw JSON so the wire shapes of every assessment
//! type, the audit history and the remote-prediction fallbacks are exercised together.

mod common {
    use std::sync::{Arc, Mutex};

    use axum::response::Response;
    use serde_json::Value;

    use wellpredict::assessments::{
        assessment_router, AssessmentId, AssessmentRecord, AssessmentRepository,
        AssessmentService, GatewayError, PredictionGateway, PredictionRequest, RecordFilter,
        RemotePrediction, RepositoryError, ScoringConfig,
    };

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<Vec<AssessmentRecord>>>,
    }

    impl AssessmentRepository for MemoryRepository {
        fn save(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            guard.push(record.clone());
            Ok(record)
        }

        fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.iter().find(|record| &record.id == id).cloned())
        }

        fn query(&self, filter: &RecordFilter) -> Result<Vec<AssessmentRecord>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard
                .iter()
                .rev()
                .filter(|record| filter.matches(record))
                .take(filter.limit)
                .cloned()
                .collect())
        }
    }

    /// Model endpoint that is never reachable.
    pub(super) struct OfflineModel;

    impl PredictionGateway for OfflineModel {
        async fn predict(
            &self,
            _request: &PredictionRequest,
        ) -> Result<RemotePrediction, GatewayError> {
            Err(GatewayError::ServiceUnavailable(
                "cannot connect to http://localhost:5001/predict".to_string(),
            ))
        }
    }

    pub(super) fn router_with(config: ScoringConfig) -> axum::Router {
        let service = AssessmentService::new(
            Arc::new(MemoryRepository::default()),
            Arc::new(OfflineModel),
            config,
        );
        assessment_router(Arc::new(service))
    }

    pub(super) fn router() -> axum::Router {
        router_with(ScoringConfig::default())
    }

    pub(super) async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;
use wellpredict::assessments::ScoringConfig;

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

async fn submit(router: &axum::Router, payload: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(post_json("/api/v1/assessments", payload))
        .await
        .expect("route executes");
    let status = response.status();
    (status, read_json_body(response).await)
}

#[tokio::test]
async fn every_assessment_type_is_scored_and_listed() {
    let router = router();

    let submissions = [
        json!({
            "kind": "heart",
            "age": 62, "gender": "male", "systolic": 145, "diastolic": 88,
            "total_cholesterol": 245, "hdl": 38, "smoker": true, "diabetic": false
        }),
        json!({
            "kind": "diabetes",
            "age": 48, "gender": "female", "weight_kg": 92, "height_cm": 165,
            "fasting_glucose": 112, "family_history": true,
            "activity_level": "light", "hypertension": false
        }),
        json!({
            "kind": "lung_cancer",
            "age": 58, "gender": "male", "smoking_status": "former",
            "years_smoked": 25, "packs_per_day": 1, "years_quit": 8,
            "exposures": { "radon": true }
        }),
        json!({
            "kind": "symptoms",
            "symptoms": ["fever", "cough", "bodyAches", "headache", "chills"],
            "duration_days": 4, "severity": "moderate"
        }),
        json!({
            "kind": "wellness",
            "sleep_hours": 6.5, "exercise_hours_per_week": 2, "stress_level": 6,
            "diet_quality": 6, "smoking_status": "never", "alcohol": "light"
        }),
    ];

    for payload in submissions {
        let (status, record) = submit(&router, payload).await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {record}");
        let score = record
            .pointer("/payload/outcome/result/score")
            .and_then(Value::as_f64)
            .expect("score present");
        assert!((0.0..=100.0).contains(&score));
    }

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/assessments")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let history = read_json_body(response).await;
    let kinds: Vec<&str> = history
        .as_array()
        .expect("history list")
        .iter()
        .filter_map(|summary| summary.get("kind").and_then(Value::as_str))
        .collect();
    assert_eq!(
        kinds,
        vec!["wellness", "symptoms", "lung_cancer", "diabetes", "heart"]
    );
}

#[tokio::test]
async fn flu_like_symptoms_resolve_to_influenza() {
    let router = router();

    let (status, record) = submit(
        &router,
        json!({
            "kind": "symptoms",
            "symptoms": ["fever", "cough", "bodyAches", "headache", "chills"],
            "duration_days": 4, "severity": "moderate"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        record
            .pointer("/payload/outcome/condition")
            .and_then(Value::as_str),
        Some("Influenza (Flu)")
    );
    assert_eq!(
        record
            .pointer("/payload/outcome/result/category")
            .and_then(Value::as_str),
        Some("high")
    );
}

#[tokio::test]
async fn malformed_and_implausible_payloads_are_rejected() {
    let router = router();

    let (status, body) = submit(
        &router,
        json!({
            "kind": "diabetes",
            "age": 48, "gender": "female", "weight_kg": 92, "height_cm": 0,
            "fasting_glucose": 112, "family_history": true,
            "activity_level": "light", "hypertension": false
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.get("error").and_then(Value::as_str), Some("invalid input"));

    let (status, _) = submit(
        &router,
        json!({ "kind": "symptoms", "symptoms": [], "duration_days": 2, "severity": "mild" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn overridden_thresholds_change_the_category() {
    let config: ScoringConfig = serde_json::from_value(json!({
        "heart": { "tiers": { "low_moderate": null, "moderate": 5, "high": 10 } }
    }))
    .expect("partial rules parse");
    let router = router_with(config);

    let (status, record) = submit(
        &router,
        json!({
            "kind": "heart",
            "age": 45, "gender": "female", "systolic": 118, "diastolic": 76,
            "total_cholesterol": 185, "hdl": 52, "smoker": false, "diabetic": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        record
            .pointer("/payload/outcome/result/category")
            .and_then(Value::as_str),
        Some("moderate")
    );
}

#[tokio::test]
async fn offline_model_reports_service_unavailable() {
    let router = router();

    let response = router
        .oneshot(post_json(
            "/api/predict/heart",
            json!({
                "age": 58, "sex": 1, "cp": 2, "trestbps": 140, "chol": 260, "fbs": 0,
                "restecg": 1, "thalach": 150, "exang": 0, "oldpeak": 1.4,
                "slope": 1, "ca": 1, "thal": 2
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("Prediction service unavailable")
    );
}
