use super::domain::{
    AssessmentInput, DiabetesInput, HeartInput, LungInput, SmokingStatus, SymptomInput,
    WellnessInput,
};
use super::gateway::{DiabetesPredictionRequest, HeartPredictionRequest, PredictionRequest};

/// Validation errors raised before an input reaches a scorer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be between {min} and {max} (found {found})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
    #[error("{field} is inconsistent: {reason}")]
    Inconsistent {
        field: &'static str,
        reason: &'static str,
    },
    #[error("at least one symptom must be selected")]
    NoSymptoms,
}

/// Inclusive plausible range for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, field: &'static str, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < self.min || value > self.max {
            return Err(ValidationError::OutOfRange {
                field,
                min: self.min,
                max: self.max,
                found: value,
            });
        }
        Ok(value)
    }
}

/// Physiological ranges accepted by the guard.
#[derive(Debug, Clone, PartialEq)]
pub struct PlausibleRanges {
    pub age: Bounds,
    pub systolic: Bounds,
    pub diastolic: Bounds,
    pub total_cholesterol: Bounds,
    pub hdl: Bounds,
    pub weight_kg: Bounds,
    pub height_cm: Bounds,
    pub fasting_glucose: Bounds,
    pub packs_per_day: Bounds,
    pub sleep_hours: Bounds,
    pub exercise_hours_per_week: Bounds,
    pub rating: Bounds,
    pub max_symptom_days: u32,
}

impl Default for PlausibleRanges {
    fn default() -> Self {
        Self {
            age: Bounds::new(1.0, 120.0),
            systolic: Bounds::new(60.0, 260.0),
            diastolic: Bounds::new(30.0, 160.0),
            total_cholesterol: Bounds::new(50.0, 700.0),
            hdl: Bounds::new(10.0, 200.0),
            weight_kg: Bounds::new(20.0, 350.0),
            height_cm: Bounds::new(100.0, 250.0),
            fasting_glucose: Bounds::new(30.0, 600.0),
            packs_per_day: Bounds::new(0.0, 10.0),
            sleep_hours: Bounds::new(0.0, 24.0),
            exercise_hours_per_week: Bounds::new(0.0, 100.0),
            rating: Bounds::new(0.0, 10.0),
            max_symptom_days: 3650,
        }
    }
}

/// Guard that every submission passes before scoring or forwarding.
#[derive(Debug, Clone, Default)]
pub struct InputGuard {
    ranges: PlausibleRanges,
}

impl InputGuard {
    pub fn with_ranges(ranges: PlausibleRanges) -> Self {
        Self { ranges }
    }

    /// Reject non-finite, implausible or self-contradicting input.
    pub fn check(&self, input: &AssessmentInput) -> Result<(), ValidationError> {
        match input {
            AssessmentInput::Heart(input) => self.check_heart(input),
            AssessmentInput::Diabetes(input) => self.check_diabetes(input),
            AssessmentInput::LungCancer(input) => self.check_lung(input),
            AssessmentInput::Symptoms(input) => self.check_symptoms(input),
            AssessmentInput::Wellness(input) => self.check_wellness(input),
        }
    }

    fn check_heart(&self, input: &HeartInput) -> Result<(), ValidationError> {
        let ranges = &self.ranges;
        ranges.age.check("age", input.age)?;
        let systolic = ranges.systolic.check("systolic", input.systolic)?;
        let diastolic = ranges.diastolic.check("diastolic", input.diastolic)?;
        if diastolic >= systolic {
            return Err(ValidationError::Inconsistent {
                field: "diastolic",
                reason: "diastolic pressure must be below systolic pressure",
            });
        }
        let total = ranges
            .total_cholesterol
            .check("total_cholesterol", input.total_cholesterol)?;
        let hdl = ranges.hdl.check("hdl", input.hdl)?;
        if hdl > total {
            return Err(ValidationError::Inconsistent {
                field: "hdl",
                reason: "HDL cannot exceed total cholesterol",
            });
        }
        Ok(())
    }

    fn check_diabetes(&self, input: &DiabetesInput) -> Result<(), ValidationError> {
        let ranges = &self.ranges;
        ranges.age.check("age", input.age)?;
        ranges.weight_kg.check("weight_kg", input.weight_kg)?;
        ranges.height_cm.check("height_cm", input.height_cm)?;
        ranges
            .fasting_glucose
            .check("fasting_glucose", input.fasting_glucose)?;
        Ok(())
    }

    fn check_lung(&self, input: &LungInput) -> Result<(), ValidationError> {
        let ranges = &self.ranges;
        let age = ranges.age.check("age", input.age)?;
        if input.smoking_status == SmokingStatus::Never {
            return Ok(());
        }

        let smoked_for = Bounds::new(0.0, age);
        let years_smoked = smoked_for.check("years_smoked", input.years_smoked)?;
        ranges
            .packs_per_day
            .check("packs_per_day", input.packs_per_day)?;

        if input.smoking_status == SmokingStatus::Former {
            let years_quit = Bounds::new(0.0, age).check("years_quit", input.years_quit)?;
            if years_smoked + years_quit > age {
                return Err(ValidationError::Inconsistent {
                    field: "years_quit",
                    reason: "years smoked plus years since quitting exceed age",
                });
            }
        }
        Ok(())
    }

    fn check_symptoms(&self, input: &SymptomInput) -> Result<(), ValidationError> {
        if input.symptoms.is_empty() {
            return Err(ValidationError::NoSymptoms);
        }
        if input.duration_days > self.ranges.max_symptom_days {
            return Err(ValidationError::OutOfRange {
                field: "duration_days",
                min: 0.0,
                max: f64::from(self.ranges.max_symptom_days),
                found: f64::from(input.duration_days),
            });
        }
        Ok(())
    }

    fn check_wellness(&self, input: &WellnessInput) -> Result<(), ValidationError> {
        let ranges = &self.ranges;
        ranges.sleep_hours.check("sleep_hours", input.sleep_hours)?;
        ranges
            .exercise_hours_per_week
            .check("exercise_hours_per_week", input.exercise_hours_per_week)?;
        ranges.rating.check("stress_level", input.stress_level)?;
        ranges.rating.check("diet_quality", input.diet_quality)?;
        Ok(())
    }

    /// Apply the ranges the remote prediction models were trained on.
    pub fn check_prediction(&self, request: &PredictionRequest) -> Result<(), ValidationError> {
        match request {
            PredictionRequest::Heart(request) => check_heart_features(request),
            PredictionRequest::Diabetes(request) => check_diabetes_features(request),
        }
    }
}

fn check_heart_features(request: &HeartPredictionRequest) -> Result<(), ValidationError> {
    let fields: [(&'static str, f64, Bounds); 13] = [
        ("age", f64::from(request.age), Bounds::new(29.0, 80.0)),
        ("sex", f64::from(request.sex), Bounds::new(0.0, 1.0)),
        ("cp", f64::from(request.cp), Bounds::new(0.0, 3.0)),
        ("trestbps", f64::from(request.trestbps), Bounds::new(80.0, 200.0)),
        ("chol", f64::from(request.chol), Bounds::new(100.0, 600.0)),
        ("fbs", f64::from(request.fbs), Bounds::new(0.0, 1.0)),
        ("restecg", f64::from(request.restecg), Bounds::new(0.0, 2.0)),
        ("thalach", f64::from(request.thalach), Bounds::new(60.0, 210.0)),
        ("exang", f64::from(request.exang), Bounds::new(0.0, 1.0)),
        ("oldpeak", request.oldpeak, Bounds::new(0.0, 6.0)),
        ("slope", f64::from(request.slope), Bounds::new(0.0, 2.0)),
        ("ca", f64::from(request.ca), Bounds::new(0.0, 4.0)),
        ("thal", f64::from(request.thal), Bounds::new(1.0, 3.0)),
    ];
    fields
        .into_iter()
        .try_for_each(|(field, value, bounds)| bounds.check(field, value).map(|_| ()))
}

fn check_diabetes_features(request: &DiabetesPredictionRequest) -> Result<(), ValidationError> {
    let fields: [(&'static str, f64, Bounds); 12] = [
        ("pregnancies", f64::from(request.pregnancies), Bounds::new(0.0, 20.0)),
        ("glucose", f64::from(request.glucose), Bounds::new(50.0, 300.0)),
        ("blood_pressure", f64::from(request.blood_pressure), Bounds::new(40.0, 140.0)),
        ("skin_thickness", f64::from(request.skin_thickness), Bounds::new(0.0, 100.0)),
        ("insulin", f64::from(request.insulin), Bounds::new(0.0, 900.0)),
        ("bmi", request.bmi, Bounds::new(10.0, 70.0)),
        ("diabetes_pedigree", request.diabetes_pedigree, Bounds::new(0.0, 2.5)),
        ("age", f64::from(request.age), Bounds::new(10.0, 100.0)),
        ("family_history", f64::from(request.family_history), Bounds::new(0.0, 1.0)),
        ("physical_activity", request.physical_activity, Bounds::new(0.0, 20.0)),
        ("smoking", f64::from(request.smoking), Bounds::new(0.0, 1.0)),
        ("alcohol", f64::from(request.alcohol), Bounds::new(0.0, 30.0)),
    ];
    fields
        .into_iter()
        .try_for_each(|(field, value, bounds)| bounds.check(field, value).map(|_| ()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::domain::{Gender, LungExposures};

    fn heart() -> HeartInput {
        HeartInput {
            age: 50.0,
            gender: Gender::Male,
            systolic: 130.0,
            diastolic: 85.0,
            total_cholesterol: 210.0,
            hdl: 45.0,
            smoker: false,
            diabetic: false,
        }
    }

    #[test]
    fn accepts_plausible_heart_input() {
        let guard = InputGuard::default();
        assert_eq!(guard.check(&AssessmentInput::Heart(heart())), Ok(()));
    }

    #[test]
    fn rejects_non_finite_values_by_field() {
        let guard = InputGuard::default();
        let mut input = heart();
        input.total_cholesterol = f64::NAN;

        assert_eq!(
            guard.check(&AssessmentInput::Heart(input)),
            Err(ValidationError::NotFinite {
                field: "total_cholesterol"
            })
        );
    }

    #[test]
    fn rejects_negative_age() {
        let guard = InputGuard::default();
        let mut input = heart();
        input.age = -4.0;

        match guard.check(&AssessmentInput::Heart(input)) {
            Err(ValidationError::OutOfRange { field, found, .. }) => {
                assert_eq!(field, "age");
                assert_eq!(found, -4.0);
            }
            other => panic!("expected range error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_diastolic_above_systolic() {
        let guard = InputGuard::default();
        let mut input = heart();
        input.diastolic = 140.0;

        assert!(matches!(
            guard.check(&AssessmentInput::Heart(input)),
            Err(ValidationError::Inconsistent {
                field: "diastolic",
                ..
            })
        ));
    }

    #[test]
    fn never_smokers_skip_smoking_quantities() {
        let guard = InputGuard::default();
        let input = LungInput {
            age: 30.0,
            gender: Gender::Female,
            smoking_status: SmokingStatus::Never,
            years_smoked: f64::NAN,
            packs_per_day: -1.0,
            years_quit: 0.0,
            exposures: LungExposures::default(),
        };

        assert_eq!(guard.check(&AssessmentInput::LungCancer(input)), Ok(()));
    }

    #[test]
    fn smoking_history_cannot_exceed_age() {
        let guard = InputGuard::default();
        let input = LungInput {
            age: 40.0,
            gender: Gender::Male,
            smoking_status: SmokingStatus::Former,
            years_smoked: 30.0,
            packs_per_day: 1.0,
            years_quit: 15.0,
            exposures: LungExposures::default(),
        };

        assert!(matches!(
            guard.check(&AssessmentInput::LungCancer(input)),
            Err(ValidationError::Inconsistent {
                field: "years_quit",
                ..
            })
        ));
    }

    #[test]
    fn empty_symptom_selection_is_rejected() {
        let guard = InputGuard::default();
        let input = SymptomInput {
            symptoms: Default::default(),
            duration_days: 3,
            severity: crate::assessments::domain::Severity::Mild,
        };

        assert_eq!(
            guard.check(&AssessmentInput::Symptoms(input)),
            Err(ValidationError::NoSymptoms)
        );
    }
}
