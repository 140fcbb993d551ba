//! Health risk assessments: typed inputs, entry validation, the pure scoring engine and the
//! boundary collaborators (remote prediction gateway, audit repository, HTTP routes) around it.

pub mod domain;
pub mod gateway;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ActivityLevel, AlcoholConsumption, AssessmentId, AssessmentInput, AssessmentKind,
    DiabetesInput, Gender, HeartInput, LungExposures, LungInput, Severity, SmokingStatus,
    Symptom, SymptomInput, WellnessInput,
};
pub use gateway::{
    DiabetesPredictionRequest, GatewayError, HeartPredictionRequest, HttpPredictionGateway,
    PredictionGateway, PredictionRequest, RemotePrediction,
};
pub use repository::{
    AssessmentRecord, AssessmentRepository, RecordFilter, RecordPayload, RecordSummary,
    RepositoryError, ResultSource, DEFAULT_HISTORY_LIMIT,
};
pub use router::assessment_router;
pub use scoring::{
    AssessmentOutcome, Certainty, HealthStatus, RiskCategory, ScoreComponent, ScoreResult,
    ScoringConfig, ScoringEngine, Urgency,
};
pub use service::{AssessmentService, AssessmentServiceError};
pub use validation::{Bounds, InputGuard, PlausibleRanges, ValidationError};
