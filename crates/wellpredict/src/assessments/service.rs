use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tracing::{info, warn};

use super::domain::{AssessmentId, AssessmentInput, AssessmentKind};
use super::gateway::{GatewayError, PredictionGateway, PredictionRequest};
use super::repository::{
    AssessmentRecord, AssessmentRepository, RecordFilter, RecordPayload, RepositoryError,
};
use super::scoring::{RiskTiers, ScoringConfig, ScoringEngine};
use super::validation::{InputGuard, ValidationError};

/// Service composing the input guard, scoring engine, prediction gateway and audit log.
pub struct AssessmentService<R, G> {
    guard: Arc<InputGuard>,
    engine: Arc<ScoringEngine>,
    repository: Arc<R>,
    gateway: Arc<G>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asm-{id:06}"))
}

impl<R, G> AssessmentService<R, G>
where
    R: AssessmentRepository + 'static,
    G: PredictionGateway + 'static,
{
    pub fn new(repository: Arc<R>, gateway: Arc<G>, config: ScoringConfig) -> Self {
        Self::with_guard(InputGuard::default(), repository, gateway, config)
    }

    pub fn with_guard(
        guard: InputGuard,
        repository: Arc<R>,
        gateway: Arc<G>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            guard: Arc::new(guard),
            engine: Arc::new(ScoringEngine::new(config)),
            repository,
            gateway,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Validate, score locally and record the outcome.
    pub fn assess(&self, input: AssessmentInput) -> Result<AssessmentRecord, AssessmentServiceError> {
        let kind = input.kind();
        if let Err(err) = self.guard.check(&input) {
            warn!(kind = kind.label(), error = %err, "assessment input rejected");
            return Err(err.into());
        }

        let outcome = self.engine.assess(&input);
        let record = AssessmentRecord {
            id: next_assessment_id(),
            kind,
            recorded_at: Utc::now(),
            payload: RecordPayload::Local { input, outcome },
        };

        let stored = self.repository.save(record)?;
        info!(
            assessment_id = %stored.id,
            kind = kind.label(),
            score = stored.score(),
            category = stored.summary().category,
            "assessment recorded"
        );
        Ok(stored)
    }

    /// Forward a feature payload to the remote model and record the reconciled result.
    pub async fn predict(
        &self,
        request: PredictionRequest,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let kind = request.kind();
        self.guard.check_prediction(&request)?;

        let prediction = match self.gateway.predict(&request).await {
            Ok(prediction) => prediction,
            Err(err) => {
                warn!(model = kind.label(), error = %err, "remote prediction failed");
                return Err(err.into());
            }
        };

        let result = prediction.reconcile(self.tiers_for(kind));
        let record = AssessmentRecord {
            id: next_assessment_id(),
            kind,
            recorded_at: Utc::now(),
            payload: RecordPayload::Remote {
                request,
                prediction,
                result,
            },
        };

        let stored = self.repository.save(record)?;
        info!(
            assessment_id = %stored.id,
            model = kind.label(),
            score = stored.score(),
            "remote prediction recorded"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn history(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        Ok(self.repository.query(filter)?)
    }

    fn tiers_for(&self, kind: AssessmentKind) -> &RiskTiers {
        let config = self.engine.config();
        match kind {
            AssessmentKind::Diabetes => &config.diabetes.tiers,
            AssessmentKind::LungCancer => &config.lung.tiers,
            _ => &config.heart.tiers,
        }
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl AssessmentServiceError {
    /// HTTP status reported for this failure by every response surface.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Gateway(GatewayError::ServiceUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Gateway(GatewayError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Gateway(GatewayError::InvalidPayload(_)) => StatusCode::BAD_GATEWAY,
            Self::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            Self::Gateway(GatewayError::Client(_)) | Self::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
