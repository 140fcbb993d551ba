use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{AssessmentId, AssessmentInput};
use super::gateway::{
    DiabetesPredictionRequest, GatewayError, HeartPredictionRequest, PredictionGateway,
    PredictionRequest,
};
use super::repository::{AssessmentRepository, RecordFilter, RecordSummary, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing local scoring, remote prediction and history endpoints.
pub fn assessment_router<R, G>(service: Arc<AssessmentService<R, G>>) -> Router
where
    R: AssessmentRepository + 'static,
    G: PredictionGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments",
            post(assess_handler::<R, G>).get(history_handler::<R, G>),
        )
        .route(
            "/api/v1/assessments/:assessment_id",
            get(record_handler::<R, G>),
        )
        .route("/api/predict/heart", post(predict_heart_handler::<R, G>))
        .route(
            "/api/predict/diabetes",
            post(predict_diabetes_handler::<R, G>),
        )
        .with_state(service)
}

pub(crate) async fn assess_handler<R, G>(
    State(service): State<Arc<AssessmentService<R, G>>>,
    axum::Json(input): axum::Json<AssessmentInput>,
) -> Response
where
    R: AssessmentRepository + 'static,
    G: PredictionGateway + 'static,
{
    match service.assess(input) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_handler<R, G>(
    State(service): State<Arc<AssessmentService<R, G>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
    G: PredictionGateway + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "assessment not found",
                "assessment_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn history_handler<R, G>(
    State(service): State<Arc<AssessmentService<R, G>>>,
    Query(filter): Query<RecordFilter>,
) -> Response
where
    R: AssessmentRepository + 'static,
    G: PredictionGateway + 'static,
{
    match service.history(&filter) {
        Ok(records) => {
            let summaries: Vec<RecordSummary> =
                records.iter().map(|record| record.summary()).collect();
            (StatusCode::OK, axum::Json(summaries)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn predict_heart_handler<R, G>(
    State(service): State<Arc<AssessmentService<R, G>>>,
    axum::Json(request): axum::Json<HeartPredictionRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
    G: PredictionGateway + 'static,
{
    predict(service, PredictionRequest::Heart(request)).await
}

pub(crate) async fn predict_diabetes_handler<R, G>(
    State(service): State<Arc<AssessmentService<R, G>>>,
    axum::Json(request): axum::Json<DiabetesPredictionRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
    G: PredictionGateway + 'static,
{
    predict(service, PredictionRequest::Diabetes(request)).await
}

async fn predict<R, G>(service: Arc<AssessmentService<R, G>>, request: PredictionRequest) -> Response
where
    R: AssessmentRepository + 'static,
    G: PredictionGateway + 'static,
{
    match service.predict(request).await {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = error.status_code();
    let payload = match error {
        AssessmentServiceError::Validation(error) => json!({
            "error": "invalid input",
            "message": error.to_string(),
        }),
        AssessmentServiceError::Gateway(GatewayError::ServiceUnavailable(_)) => json!({
            "error": "Prediction service unavailable",
            "message": "The prediction service is currently unavailable. Please try again later.",
        }),
        AssessmentServiceError::Gateway(GatewayError::Upstream { body, .. }) => body,
        AssessmentServiceError::Gateway(error @ GatewayError::InvalidPayload(_)) => json!({
            "error": "Prediction failed",
            "message": error.to_string(),
        }),
        AssessmentServiceError::Repository(RepositoryError::Conflict) => json!({
            "error": "assessment already exists",
        }),
        other => json!({
            "error": other.to_string(),
        }),
    };
    (status, axum::Json(payload)).into_response()
}
