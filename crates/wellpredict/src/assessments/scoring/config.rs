use serde::{Deserialize, Serialize};

use super::symptoms::Certainty;
use super::{HealthStatus, RiskCategory};

/// Rejection raised when a rule table is not usable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("{table}: step thresholds must be finite and strictly ascending")]
    UnorderedSteps { table: &'static str },
    #[error("{table}: tier cut points must be finite and ascending within 0..=100")]
    UnorderedTiers { table: &'static str },
    #[error("{table}: {detail}")]
    Invalid {
        table: &'static str,
        detail: &'static str,
    },
}

/// One rung of a bracket table: values at or above `at_least` earn `points`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub at_least: f64,
    pub points: f64,
}

/// Bracket table mapping an input dimension to a point contribution.
///
/// Values below the first step earn `base`; otherwise the highest step reached applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Steps {
    pub base: f64,
    pub steps: Vec<Step>,
}

impl Steps {
    pub fn new(base: f64, steps: &[(f64, f64)]) -> Self {
        Self {
            base,
            steps: steps
                .iter()
                .map(|&(at_least, points)| Step { at_least, points })
                .collect(),
        }
    }

    pub fn points_for(&self, value: f64) -> f64 {
        self.steps
            .iter()
            .rev()
            .find(|step| value >= step.at_least)
            .map(|step| step.points)
            .unwrap_or(self.base)
    }

    fn validate(&self, table: &'static str) -> Result<(), RuleError> {
        let finite = self.base.is_finite()
            && self
                .steps
                .iter()
                .all(|step| step.at_least.is_finite() && step.points.is_finite());
        let ascending = self
            .steps
            .windows(2)
            .all(|pair| pair[0].at_least < pair[1].at_least);

        if finite && ascending {
            Ok(())
        } else {
            Err(RuleError::UnorderedSteps { table })
        }
    }
}

/// Cut points turning a 0-100 risk score into a category.
///
/// `low_moderate` is only set for scorers reporting the finer four-tier scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskTiers {
    #[serde(default)]
    pub low_moderate: Option<f64>,
    pub moderate: f64,
    pub high: f64,
}

impl RiskTiers {
    pub fn classify(&self, score: f64) -> RiskCategory {
        if score >= self.high {
            RiskCategory::High
        } else if score >= self.moderate {
            RiskCategory::Moderate
        } else if self.low_moderate.is_some_and(|cut| score >= cut) {
            RiskCategory::LowModerate
        } else {
            RiskCategory::Low
        }
    }

    fn validate(&self, table: &'static str) -> Result<(), RuleError> {
        let floor = self.low_moderate.unwrap_or(0.0);
        let cuts = [floor, self.moderate, self.high];
        let ordered = cuts
            .iter()
            .all(|cut| cut.is_finite() && (0.0..=100.0).contains(cut))
            && floor <= self.moderate
            && self.moderate < self.high;

        if ordered {
            Ok(())
        } else {
            Err(RuleError::UnorderedTiers { table })
        }
    }
}

/// Clinical blood pressure staging used by the heart scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureStage {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    Crisis,
}

impl BloodPressureStage {
    pub const fn label(self) -> &'static str {
        match self {
            BloodPressureStage::Normal => "normal",
            BloodPressureStage::Elevated => "elevated",
            BloodPressureStage::Stage1 => "stage 1 hypertension",
            BloodPressureStage::Stage2 => "stage 2 hypertension",
            BloodPressureStage::Crisis => "hypertensive crisis",
        }
    }
}

/// A stage is reached when systolic OR diastolic meets its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureStage {
    pub stage: BloodPressureStage,
    pub systolic_at_least: f64,
    #[serde(default)]
    pub diastolic_at_least: Option<f64>,
    pub points: f64,
}

impl PressureStage {
    fn reached(&self, systolic: f64, diastolic: f64) -> bool {
        systolic >= self.systolic_at_least
            || self
                .diastolic_at_least
                .is_some_and(|threshold| diastolic >= threshold)
    }
}

/// Age-conditioned bonus reflecting the different risk curves by sex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderRule {
    pub male_older_than: f64,
    pub female_older_than: f64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartRules {
    pub age: Steps,
    pub blood_pressure: Vec<PressureStage>,
    pub total_cholesterol: Steps,
    pub hdl: Steps,
    pub smoker_points: f64,
    pub diabetic_points: f64,
    pub gender: GenderRule,
    /// Stage from which the hypertension insight is reported.
    pub hypertension_insight_stage: BloodPressureStage,
    pub cholesterol_insight_at_least: f64,
    pub tiers: RiskTiers,
}

impl HeartRules {
    /// Highest stage reached, `None` when below every stage in the table.
    pub fn pressure_stage(&self, systolic: f64, diastolic: f64) -> Option<&PressureStage> {
        self.blood_pressure
            .iter()
            .rev()
            .find(|stage| stage.reached(systolic, diastolic))
    }
}

impl Default for HeartRules {
    fn default() -> Self {
        Self {
            age: Steps::new(0.0, &[(40.0, 8.0), (50.0, 15.0), (60.0, 22.0), (70.0, 30.0)]),
            blood_pressure: vec![
                PressureStage {
                    stage: BloodPressureStage::Normal,
                    systolic_at_least: 0.0,
                    diastolic_at_least: None,
                    points: 0.0,
                },
                PressureStage {
                    stage: BloodPressureStage::Elevated,
                    systolic_at_least: 120.0,
                    diastolic_at_least: None,
                    points: 5.0,
                },
                PressureStage {
                    stage: BloodPressureStage::Stage1,
                    systolic_at_least: 130.0,
                    diastolic_at_least: Some(80.0),
                    points: 10.0,
                },
                PressureStage {
                    stage: BloodPressureStage::Stage2,
                    systolic_at_least: 140.0,
                    diastolic_at_least: Some(90.0),
                    points: 20.0,
                },
                PressureStage {
                    stage: BloodPressureStage::Crisis,
                    systolic_at_least: 180.0,
                    diastolic_at_least: Some(120.0),
                    points: 25.0,
                },
            ],
            total_cholesterol: Steps::new(0.0, &[(200.0, 10.0), (240.0, 20.0)]),
            hdl: Steps::new(10.0, &[(40.0, 0.0), (60.0, -5.0)]),
            smoker_points: 15.0,
            diabetic_points: 15.0,
            gender: GenderRule {
                male_older_than: 45.0,
                female_older_than: 55.0,
                points: 5.0,
            },
            hypertension_insight_stage: BloodPressureStage::Stage2,
            cholesterol_insight_at_least: 200.0,
            tiers: RiskTiers {
                low_moderate: None,
                moderate: 30.0,
                high: 70.0,
            },
        }
    }
}

/// Canonical BMI classification shared by every consumer of BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiClass {
    pub const fn label(self) -> &'static str {
        match self {
            BmiClass::Underweight => "underweight",
            BmiClass::Normal => "normal",
            BmiClass::Overweight => "overweight",
            BmiClass::Obese => "obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiTable {
    pub normal_at_least: f64,
    pub overweight_at_least: f64,
    pub obese_at_least: f64,
    pub underweight_points: f64,
    pub normal_points: f64,
    pub overweight_points: f64,
    pub obese_points: f64,
}

impl BmiTable {
    pub fn classify(&self, bmi: f64) -> BmiClass {
        if bmi >= self.obese_at_least {
            BmiClass::Obese
        } else if bmi >= self.overweight_at_least {
            BmiClass::Overweight
        } else if bmi >= self.normal_at_least {
            BmiClass::Normal
        } else {
            BmiClass::Underweight
        }
    }

    pub fn points_for(&self, class: BmiClass) -> f64 {
        match class {
            BmiClass::Underweight => self.underweight_points,
            BmiClass::Normal => self.normal_points,
            BmiClass::Overweight => self.overweight_points,
            BmiClass::Obese => self.obese_points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseClass {
    Normal,
    Prediabetic,
    Diabetic,
}

impl GlucoseClass {
    pub const fn label(self) -> &'static str {
        match self {
            GlucoseClass::Normal => "normal",
            GlucoseClass::Prediabetic => "prediabetic",
            GlucoseClass::Diabetic => "diabetic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlucoseTable {
    pub prediabetic_at_least: f64,
    pub diabetic_at_least: f64,
    pub prediabetic_points: f64,
    pub diabetic_points: f64,
}

impl GlucoseTable {
    pub fn classify(&self, fasting_glucose: f64) -> GlucoseClass {
        if fasting_glucose >= self.diabetic_at_least {
            GlucoseClass::Diabetic
        } else if fasting_glucose >= self.prediabetic_at_least {
            GlucoseClass::Prediabetic
        } else {
            GlucoseClass::Normal
        }
    }

    pub fn points_for(&self, class: GlucoseClass) -> f64 {
        match class {
            GlucoseClass::Normal => 0.0,
            GlucoseClass::Prediabetic => self.prediabetic_points,
            GlucoseClass::Diabetic => self.diabetic_points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityPoints {
    pub sedentary: f64,
    pub light: f64,
    pub moderate: f64,
    pub active: f64,
    pub very_active: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiabetesRules {
    pub age: Steps,
    pub bmi: BmiTable,
    pub glucose: GlucoseTable,
    pub family_history_points: f64,
    pub hypertension_points: f64,
    pub activity: ActivityPoints,
    pub tiers: RiskTiers,
}

impl Default for DiabetesRules {
    fn default() -> Self {
        Self {
            age: Steps::new(0.0, &[(40.0, 10.0), (50.0, 15.0), (60.0, 25.0)]),
            bmi: BmiTable {
                normal_at_least: 18.5,
                overweight_at_least: 25.0,
                obese_at_least: 30.0,
                underweight_points: 0.0,
                normal_points: 0.0,
                overweight_points: 10.0,
                obese_points: 20.0,
            },
            glucose: GlucoseTable {
                prediabetic_at_least: 100.0,
                diabetic_at_least: 126.0,
                prediabetic_points: 25.0,
                diabetic_points: 50.0,
            },
            family_history_points: 15.0,
            hypertension_points: 10.0,
            activity: ActivityPoints {
                sedentary: 15.0,
                light: 10.0,
                moderate: 5.0,
                active: 0.0,
                very_active: -5.0,
            },
            tiers: RiskTiers {
                low_moderate: None,
                moderate: 20.0,
                high: 50.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LungRules {
    pub age: Steps,
    pub current_base: f64,
    pub former_base: f64,
    /// Points removed from the former-smoker base per year since quitting.
    pub former_base_decay_per_year: f64,
    pub points_per_pack_year: f64,
    pub pack_year_cap: f64,
    /// Fraction of the per-pack-year weight lost per year since quitting.
    pub former_pack_year_decay_per_year: f64,
    pub exposure_points: f64,
    pub male_points: f64,
    pub screening_age: f64,
    pub tiers: RiskTiers,
}

impl Default for LungRules {
    fn default() -> Self {
        Self {
            age: Steps::new(0.0, &[(40.0, 5.0), (50.0, 15.0), (65.0, 25.0)]),
            current_base: 35.0,
            former_base: 25.0,
            former_base_decay_per_year: 2.0,
            points_per_pack_year: 1.0,
            pack_year_cap: 40.0,
            former_pack_year_decay_per_year: 0.05,
            exposure_points: 8.0,
            male_points: 5.0,
            screening_age: 65.0,
            tiers: RiskTiers {
                low_moderate: Some(20.0),
                moderate: 40.0,
                high: 70.0,
            },
        }
    }
}

/// Match-fraction cut points for certainty grading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CertaintyCuts {
    pub high_above: f64,
    pub medium_above: f64,
}

impl CertaintyCuts {
    /// Grade a match fraction; both cuts are exclusive.
    pub fn classify(&self, fraction: f64) -> Certainty {
        if fraction > self.high_above {
            Certainty::High
        } else if fraction > self.medium_above {
            Certainty::Medium
        } else {
            Certainty::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymptomRules {
    /// Best match must reach this fraction, otherwise the result is inconclusive.
    pub min_fraction: f64,
    /// Urgent conditions win outright once their fraction exceeds this value.
    pub urgent_override_fraction: f64,
    pub certainty: CertaintyCuts,
}

impl Default for SymptomRules {
    fn default() -> Self {
        Self {
            min_fraction: 0.5,
            urgent_override_fraction: 0.5,
            certainty: CertaintyCuts {
                high_above: 0.75,
                medium_above: 0.6,
            },
        }
    }
}

/// Points or sub-scores keyed by smoking status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmokingPoints {
    pub never: f64,
    pub former: f64,
    pub current: f64,
}

/// Points or sub-scores keyed by alcohol consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlcoholPoints {
    pub none: f64,
    pub light: f64,
    pub moderate: f64,
    pub heavy: f64,
}

/// Inclusive hour range earning a component sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl StatusThresholds {
    pub fn classify(&self, score: f64) -> HealthStatus {
        if score >= self.excellent {
            HealthStatus::Excellent
        } else if score >= self.good {
            HealthStatus::Good
        } else if score >= self.fair {
            HealthStatus::Fair
        } else {
            HealthStatus::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellnessRules {
    pub baseline: f64,
    pub sleep_optimal_min: f64,
    pub sleep_optimal_max: f64,
    pub sleep_penalty_per_hour: f64,
    pub sleep_penalty_cap: f64,
    pub exercise_target_hours: f64,
    pub exercise_penalty_per_hour: f64,
    pub exercise_penalty_cap: f64,
    pub exercise_bonus_at_least: f64,
    pub exercise_bonus: f64,
    pub stress_weight: f64,
    pub diet_midpoint: f64,
    pub diet_weight: f64,
    pub smoking: SmokingPoints,
    pub alcohol: AlcoholPoints,
    /// Component sub-score tables used to name improvement areas.
    pub sleep_bands: Vec<Band>,
    pub sleep_band_fallback: f64,
    pub exercise_component: Steps,
    pub smoking_component: SmokingPoints,
    pub alcohol_component: AlcoholPoints,
    /// Stress and diet sub-scores move this many points per rating step.
    pub stress_component_step: f64,
    pub diet_component_step: f64,
    pub component_ceiling: f64,
    pub improvement_threshold: f64,
    pub status: StatusThresholds,
}

impl Default for WellnessRules {
    fn default() -> Self {
        Self {
            baseline: 100.0,
            sleep_optimal_min: 7.0,
            sleep_optimal_max: 9.0,
            sleep_penalty_per_hour: 6.0,
            sleep_penalty_cap: 20.0,
            exercise_target_hours: 2.5,
            exercise_penalty_per_hour: 6.0,
            exercise_penalty_cap: 15.0,
            exercise_bonus_at_least: 5.0,
            exercise_bonus: 3.0,
            stress_weight: 2.0,
            diet_midpoint: 5.0,
            diet_weight: 2.0,
            smoking: SmokingPoints {
                never: 0.0,
                former: -5.0,
                current: -20.0,
            },
            alcohol: AlcoholPoints {
                none: 2.0,
                light: 0.0,
                moderate: -5.0,
                heavy: -15.0,
            },
            sleep_bands: vec![
                Band {
                    min: 7.0,
                    max: 9.0,
                    score: 100.0,
                },
                Band {
                    min: 6.0,
                    max: 10.0,
                    score: 80.0,
                },
                Band {
                    min: 5.0,
                    max: 12.0,
                    score: 60.0,
                },
            ],
            sleep_band_fallback: 40.0,
            exercise_component: Steps::new(
                30.0,
                &[
                    (f64::MIN_POSITIVE, 50.0),
                    (1.0, 70.0),
                    (2.5, 90.0),
                    (5.0, 100.0),
                ],
            ),
            smoking_component: SmokingPoints {
                never: 100.0,
                former: 80.0,
                current: 40.0,
            },
            alcohol_component: AlcoholPoints {
                none: 100.0,
                light: 90.0,
                moderate: 70.0,
                heavy: 40.0,
            },
            stress_component_step: 10.0,
            diet_component_step: 10.0,
            component_ceiling: 100.0,
            improvement_threshold: 70.0,
            status: StatusThresholds {
                excellent: 85.0,
                good: 70.0,
                fair: 50.0,
            },
        }
    }
}

/// Complete set of rule tables consumed by the scoring engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub heart: HeartRules,
    pub diabetes: DiabetesRules,
    pub lung: LungRules,
    pub symptoms: SymptomRules,
    pub wellness: WellnessRules,
}

impl ScoringConfig {
    /// Reject tables whose ordering assumptions the scorers rely on.
    pub fn validate(&self) -> Result<(), RuleError> {
        self.heart.age.validate("heart.age")?;
        self.heart.total_cholesterol.validate("heart.total_cholesterol")?;
        self.heart.hdl.validate("heart.hdl")?;
        self.heart.tiers.validate("heart.tiers")?;
        let stages_ordered = self.heart.blood_pressure.windows(2).all(|pair| {
            pair[0].stage < pair[1].stage
                && pair[0].systolic_at_least < pair[1].systolic_at_least
                && pair[0].points <= pair[1].points
        });
        if self.heart.blood_pressure.is_empty() || !stages_ordered {
            return Err(RuleError::Invalid {
                table: "heart.blood_pressure",
                detail: "stages must be non-empty and ascending in stage, threshold and points",
            });
        }

        self.diabetes.age.validate("diabetes.age")?;
        self.diabetes.tiers.validate("diabetes.tiers")?;
        let bmi = &self.diabetes.bmi;
        if !(bmi.normal_at_least < bmi.overweight_at_least
            && bmi.overweight_at_least < bmi.obese_at_least)
        {
            return Err(RuleError::Invalid {
                table: "diabetes.bmi",
                detail: "class boundaries must be ascending",
            });
        }
        if self.diabetes.glucose.prediabetic_at_least >= self.diabetes.glucose.diabetic_at_least {
            return Err(RuleError::Invalid {
                table: "diabetes.glucose",
                detail: "prediabetic threshold must sit below the diabetic threshold",
            });
        }

        self.lung.age.validate("lung.age")?;
        self.lung.tiers.validate("lung.tiers")?;
        if self.lung.pack_year_cap < 0.0 || self.lung.former_base_decay_per_year < 0.0 {
            return Err(RuleError::Invalid {
                table: "lung",
                detail: "pack-year cap and decay rates must be non-negative",
            });
        }

        let symptoms = &self.symptoms;
        if symptoms.certainty.medium_above > symptoms.certainty.high_above
            || !(0.0..=1.0).contains(&symptoms.min_fraction)
            || !(0.0..=1.0).contains(&symptoms.urgent_override_fraction)
        {
            return Err(RuleError::Invalid {
                table: "symptoms",
                detail: "fractions must lie within 0..=1 with medium below high certainty",
            });
        }

        let wellness = &self.wellness;
        wellness.exercise_component.validate("wellness.exercise_component")?;
        if wellness.sleep_optimal_min > wellness.sleep_optimal_max
            || !(wellness.status.fair < wellness.status.good
                && wellness.status.good < wellness.status.excellent)
        {
            return Err(RuleError::Invalid {
                table: "wellness",
                detail: "sleep window and status thresholds must be ascending",
            });
        }

        Ok(())
    }
}
