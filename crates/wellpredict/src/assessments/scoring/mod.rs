//! Pure, deterministic risk scoring.
//!
//! Every scorer accumulates point contributions from the rule tables in [`ScoringConfig`],
//! clamps the total into `[SCORE_FLOOR, SCORE_CEILING]` and derives its category from the
//! clamped score alone. Nothing in here performs I/O or holds mutable state.

mod config;
mod diabetes;
mod heart;
mod lung;
mod symptoms;
mod wellness;

pub use config::{
    ActivityPoints, AlcoholPoints, Band, BloodPressureStage, BmiClass, BmiTable, CertaintyCuts,
    DiabetesRules, GenderRule, GlucoseClass, GlucoseTable, HeartRules, LungRules, PressureStage,
    RiskTiers, RuleError, ScoringConfig, SmokingPoints, StatusThresholds, Step, Steps,
    SymptomRules, WellnessRules,
};
pub use diabetes::DiabetesAssessment;
pub use heart::HeartAssessment;
pub use lung::LungAssessment;
pub use symptoms::{
    condition_names, Certainty, SymptomAssessment, Urgency, INCONCLUSIVE, SERIOUS_CONDITION,
};
pub use wellness::{ComponentScore, WellnessAssessment, WellnessComponent};

use serde::{Deserialize, Serialize};

use super::domain::{
    AssessmentInput, AssessmentKind, DiabetesInput, HeartInput, LungInput, SymptomInput,
    WellnessInput,
};

pub const SCORE_FLOOR: f64 = 0.0;
pub const SCORE_CEILING: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    LowModerate,
    Moderate,
    High,
}

impl RiskCategory {
    pub const fn label(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::LowModerate => "Low-Moderate",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthStatus {
    pub const fn label(self) -> &'static str {
        match self {
            HealthStatus::Poor => "Poor",
            HealthStatus::Fair => "Fair",
            HealthStatus::Good => "Good",
            HealthStatus::Excellent => "Excellent",
        }
    }
}

/// Input dimension a score component was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Age,
    BloodPressure,
    Cholesterol,
    Hdl,
    Smoking,
    Diabetes,
    Gender,
    Bmi,
    Glucose,
    FamilyHistory,
    Hypertension,
    Activity,
    PackYears,
    Exposure,
    SymptomMatch,
    Sleep,
    Exercise,
    Stress,
    Diet,
    Alcohol,
    ModelProbability,
}

/// Discrete contribution to a score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: Factor,
    pub points: f64,
    pub notes: String,
}

/// Canonical scorer output shared by every assessment type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult<C> {
    pub score: f64,
    pub category: C,
    pub components: Vec<ScoreComponent>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Running total of point contributions for one scoring call.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    components: Vec<ScoreComponent>,
    total: f64,
}

impl Tally {
    pub(crate) fn starting_at(total: f64) -> Self {
        Self {
            components: Vec::new(),
            total,
        }
    }

    pub(crate) fn add(&mut self, factor: Factor, points: f64, notes: impl Into<String>) {
        self.total += points;
        self.components.push(ScoreComponent {
            factor,
            points,
            notes: notes.into(),
        });
    }

    /// Clamped total together with the recorded components.
    pub(crate) fn finish(self) -> (f64, Vec<ScoreComponent>) {
        (clamp_score(self.total), self.components)
    }
}

pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return SCORE_FLOOR;
    }
    raw.clamp(SCORE_FLOOR, SCORE_CEILING)
}

pub(crate) fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

/// Result of scoring one assessment input locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssessmentOutcome {
    Heart(HeartAssessment),
    Diabetes(DiabetesAssessment),
    LungCancer(LungAssessment),
    Symptoms(SymptomAssessment),
    Wellness(WellnessAssessment),
}

impl AssessmentOutcome {
    pub fn kind(&self) -> AssessmentKind {
        match self {
            AssessmentOutcome::Heart(_) => AssessmentKind::Heart,
            AssessmentOutcome::Diabetes(_) => AssessmentKind::Diabetes,
            AssessmentOutcome::LungCancer(_) => AssessmentKind::LungCancer,
            AssessmentOutcome::Symptoms(_) => AssessmentKind::Symptoms,
            AssessmentOutcome::Wellness(_) => AssessmentKind::Wellness,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            AssessmentOutcome::Heart(outcome) => outcome.result.score,
            AssessmentOutcome::Diabetes(outcome) => outcome.result.score,
            AssessmentOutcome::LungCancer(outcome) => outcome.result.score,
            AssessmentOutcome::Symptoms(outcome) => outcome.result.score,
            AssessmentOutcome::Wellness(outcome) => outcome.result.score,
        }
    }

    /// Human readable category or status, used in logs and summaries.
    pub fn category_label(&self) -> &'static str {
        match self {
            AssessmentOutcome::Heart(outcome) => outcome.result.category.label(),
            AssessmentOutcome::Diabetes(outcome) => outcome.result.category.label(),
            AssessmentOutcome::LungCancer(outcome) => outcome.tier_label(),
            AssessmentOutcome::Symptoms(outcome) => outcome.result.category.label(),
            AssessmentOutcome::Wellness(outcome) => outcome.result.category.label(),
        }
    }

    pub fn insights(&self) -> &[String] {
        match self {
            AssessmentOutcome::Heart(outcome) => &outcome.result.insights,
            AssessmentOutcome::Diabetes(outcome) => &outcome.result.insights,
            AssessmentOutcome::LungCancer(outcome) => &outcome.result.insights,
            AssessmentOutcome::Symptoms(outcome) => &outcome.result.insights,
            AssessmentOutcome::Wellness(outcome) => &outcome.result.insights,
        }
    }

    pub fn components(&self) -> &[ScoreComponent] {
        match self {
            AssessmentOutcome::Heart(outcome) => &outcome.result.components,
            AssessmentOutcome::Diabetes(outcome) => &outcome.result.components,
            AssessmentOutcome::LungCancer(outcome) => &outcome.result.components,
            AssessmentOutcome::Symptoms(outcome) => &outcome.result.components,
            AssessmentOutcome::Wellness(outcome) => &outcome.result.components,
        }
    }

    pub fn recommendations(&self) -> &[String] {
        match self {
            AssessmentOutcome::Heart(outcome) => &outcome.result.recommendations,
            AssessmentOutcome::Diabetes(outcome) => &outcome.result.recommendations,
            AssessmentOutcome::LungCancer(outcome) => &outcome.result.recommendations,
            AssessmentOutcome::Symptoms(outcome) => &outcome.result.recommendations,
            AssessmentOutcome::Wellness(outcome) => &outcome.result.recommendations,
        }
    }
}

/// Stateless evaluator that applies the rule tables to an assessment input.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn heart(&self, input: &HeartInput) -> HeartAssessment {
        heart::score(input, &self.config.heart)
    }

    pub fn diabetes(&self, input: &DiabetesInput) -> DiabetesAssessment {
        diabetes::score(input, &self.config.diabetes)
    }

    pub fn lung(&self, input: &LungInput) -> LungAssessment {
        lung::score(input, &self.config.lung)
    }

    pub fn symptoms(&self, input: &SymptomInput) -> SymptomAssessment {
        symptoms::match_symptoms(input, &self.config.symptoms)
    }

    pub fn wellness(&self, input: &WellnessInput) -> WellnessAssessment {
        wellness::score(input, &self.config.wellness)
    }

    pub fn assess(&self, input: &AssessmentInput) -> AssessmentOutcome {
        match input {
            AssessmentInput::Heart(input) => AssessmentOutcome::Heart(self.heart(input)),
            AssessmentInput::Diabetes(input) => AssessmentOutcome::Diabetes(self.diabetes(input)),
            AssessmentInput::LungCancer(input) => AssessmentOutcome::LungCancer(self.lung(input)),
            AssessmentInput::Symptoms(input) => AssessmentOutcome::Symptoms(self.symptoms(input)),
            AssessmentInput::Wellness(input) => AssessmentOutcome::Wellness(self.wellness(input)),
        }
    }
}
