use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, AssessmentInput, AssessmentKind};
use super::gateway::{PredictionRequest, RemotePrediction};
use super::scoring::{AssessmentOutcome, RiskCategory, ScoreResult};

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Whether a record was scored by the local engine or a remote model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RecordPayload {
    Local {
        input: AssessmentInput,
        outcome: AssessmentOutcome,
    },
    Remote {
        request: PredictionRequest,
        prediction: RemotePrediction,
        result: ScoreResult<RiskCategory>,
    },
}

/// Audit entry: assessment type, input, result and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub kind: AssessmentKind,
    pub recorded_at: DateTime<Utc>,
    pub payload: RecordPayload,
}

impl AssessmentRecord {
    pub fn source(&self) -> ResultSource {
        match self.payload {
            RecordPayload::Local { .. } => ResultSource::Local,
            RecordPayload::Remote { .. } => ResultSource::Remote,
        }
    }

    pub fn score(&self) -> f64 {
        match &self.payload {
            RecordPayload::Local { outcome, .. } => outcome.score(),
            RecordPayload::Remote { result, .. } => result.score,
        }
    }

    pub fn summary(&self) -> RecordSummary {
        let category = match &self.payload {
            RecordPayload::Local { outcome, .. } => outcome.category_label(),
            RecordPayload::Remote { result, .. } => result.category.label(),
        };
        RecordSummary {
            id: self.id.clone(),
            kind: self.kind,
            source: self.source(),
            score: self.score(),
            category,
            recorded_at: self.recorded_at,
        }
    }
}

/// Compact listing view of a stored record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSummary {
    pub id: AssessmentId,
    pub kind: AssessmentKind,
    pub source: ResultSource,
    pub score: f64,
    pub category: &'static str,
    pub recorded_at: DateTime<Utc>,
}

/// History query. Results are returned newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default)]
    pub kind: Option<AssessmentKind>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            kind: None,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl RecordFilter {
    pub fn matches(&self, record: &AssessmentRecord) -> bool {
        self.kind.map_or(true, |kind| record.kind == kind)
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait AssessmentRepository: Send + Sync {
    fn save(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn query(&self, filter: &RecordFilter) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
