use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for recorded assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

impl SmokingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SmokingStatus::Never => "Never Smoked",
            SmokingStatus::Former => "Former Smoker",
            SmokingStatus::Current => "Current Smoker",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholConsumption {
    None,
    Light,
    Moderate,
    Heavy,
}

impl AlcoholConsumption {
    pub const fn label(self) -> &'static str {
        match self {
            AlcoholConsumption::None => "none",
            AlcoholConsumption::Light => "light",
            AlcoholConsumption::Moderate => "moderate",
            AlcoholConsumption::Heavy => "heavy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

/// Fixed symptom vocabulary offered by the symptom checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Symptom {
    Cough,
    SoreThroat,
    Congestion,
    RunnyNose,
    Sneezing,
    Fever,
    HighFever,
    Chills,
    BodyAches,
    Fatigue,
    Headache,
    ShortnessOfBreath,
    ChestPain,
    LossOfTaste,
    Nausea,
    Diarrhea,
    AbdominalPain,
    Dizziness,
    ItchyEyes,
    ItchyThroat,
}

impl Symptom {
    pub const fn label(self) -> &'static str {
        match self {
            Symptom::Cough => "Cough",
            Symptom::SoreThroat => "Sore Throat",
            Symptom::Congestion => "Congestion",
            Symptom::RunnyNose => "Runny Nose",
            Symptom::Sneezing => "Sneezing",
            Symptom::Fever => "Fever",
            Symptom::HighFever => "High Fever",
            Symptom::Chills => "Chills",
            Symptom::BodyAches => "Body Aches",
            Symptom::Fatigue => "Fatigue",
            Symptom::Headache => "Headache",
            Symptom::ShortnessOfBreath => "Shortness Of Breath",
            Symptom::ChestPain => "Chest Pain",
            Symptom::LossOfTaste => "Loss Of Taste",
            Symptom::Nausea => "Nausea",
            Symptom::Diarrhea => "Diarrhea",
            Symptom::AbdominalPain => "Abdominal Pain",
            Symptom::Dizziness => "Dizziness",
            Symptom::ItchyEyes => "Itchy Eyes",
            Symptom::ItchyThroat => "Itchy Throat",
        }
    }
}

/// Inputs for the heart-disease scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartInput {
    pub age: f64,
    pub gender: Gender,
    pub systolic: f64,
    pub diastolic: f64,
    pub total_cholesterol: f64,
    pub hdl: f64,
    pub smoker: bool,
    pub diabetic: bool,
}

/// Inputs for the diabetes scorer. Weight in kilograms, height in centimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesInput {
    pub age: f64,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub fasting_glucose: f64,
    pub family_history: bool,
    pub activity_level: ActivityLevel,
    pub hypertension: bool,
}

impl DiabetesInput {
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

/// Environmental and hereditary exposures considered by the lung-cancer scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LungExposures {
    #[serde(default)]
    pub family_history: bool,
    #[serde(default)]
    pub air_pollution: bool,
    #[serde(default)]
    pub asbestos: bool,
    #[serde(default)]
    pub radiation_therapy: bool,
    #[serde(default)]
    pub radon: bool,
}

impl LungExposures {
    /// Labels of the flagged exposures in a fixed order.
    pub fn flagged(&self) -> Vec<&'static str> {
        [
            (self.family_history, "Family history of lung cancer"),
            (self.air_pollution, "Exposure to air pollution"),
            (self.asbestos, "Exposure to asbestos"),
            (self.radiation_therapy, "Previous radiation therapy to the chest"),
            (self.radon, "Exposure to radon gas"),
        ]
        .into_iter()
        .filter_map(|(flag, label)| flag.then_some(label))
        .collect()
    }
}

/// Inputs for the lung-cancer scorer. Smoking quantities are ignored for never-smokers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LungInput {
    pub age: f64,
    pub gender: Gender,
    pub smoking_status: SmokingStatus,
    #[serde(default)]
    pub years_smoked: f64,
    #[serde(default)]
    pub packs_per_day: f64,
    #[serde(default)]
    pub years_quit: f64,
    #[serde(default)]
    pub exposures: LungExposures,
}

impl LungInput {
    /// Pack-years of exposure, `None` when the person never smoked.
    pub fn pack_years(&self) -> Option<f64> {
        match self.smoking_status {
            SmokingStatus::Never => None,
            SmokingStatus::Former | SmokingStatus::Current => {
                Some(self.years_smoked * self.packs_per_day)
            }
        }
    }
}

/// Inputs for the symptom matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomInput {
    pub symptoms: BTreeSet<Symptom>,
    pub duration_days: u32,
    pub severity: Severity,
}

/// Inputs for the general wellness aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessInput {
    pub sleep_hours: f64,
    pub exercise_hours_per_week: f64,
    pub stress_level: f64,
    pub diet_quality: f64,
    pub smoking_status: SmokingStatus,
    pub alcohol: AlcoholConsumption,
}

/// A single user submission for one of the five assessment types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssessmentInput {
    Heart(HeartInput),
    Diabetes(DiabetesInput),
    LungCancer(LungInput),
    Symptoms(SymptomInput),
    Wellness(WellnessInput),
}

impl AssessmentInput {
    pub fn kind(&self) -> AssessmentKind {
        match self {
            AssessmentInput::Heart(_) => AssessmentKind::Heart,
            AssessmentInput::Diabetes(_) => AssessmentKind::Diabetes,
            AssessmentInput::LungCancer(_) => AssessmentKind::LungCancer,
            AssessmentInput::Symptoms(_) => AssessmentKind::Symptoms,
            AssessmentInput::Wellness(_) => AssessmentKind::Wellness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Heart,
    Diabetes,
    LungCancer,
    Symptoms,
    Wellness,
}

impl AssessmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentKind::Heart => "heart",
            AssessmentKind::Diabetes => "diabetes",
            AssessmentKind::LungCancer => "lung_cancer",
            AssessmentKind::Symptoms => "symptoms",
            AssessmentKind::Wellness => "wellness",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_uses_height_in_metres() {
        let input = DiabetesInput {
            age: 35.0,
            gender: Gender::Female,
            weight_kg: 70.0,
            height_cm: 175.0,
            fasting_glucose: 90.0,
            family_history: false,
            activity_level: ActivityLevel::Moderate,
            hypertension: false,
        };

        assert!((input.bmi() - 22.857).abs() < 0.01);
    }

    #[test]
    fn pack_years_not_applicable_for_never_smokers() {
        let input = LungInput {
            age: 30.0,
            gender: Gender::Female,
            smoking_status: SmokingStatus::Never,
            years_smoked: 12.0,
            packs_per_day: 1.0,
            years_quit: 0.0,
            exposures: LungExposures::default(),
        };

        assert_eq!(input.pack_years(), None);
    }

    #[test]
    fn assessment_input_is_tagged_by_kind() {
        let raw = serde_json::json!({
            "kind": "symptoms",
            "symptoms": ["chestPain", "shortnessOfBreath"],
            "duration_days": 2,
            "severity": "mild"
        });

        let input: AssessmentInput = serde_json::from_value(raw).expect("payload parses");

        assert_eq!(input.kind(), AssessmentKind::Symptoms);
        match input {
            AssessmentInput::Symptoms(symptoms) => {
                assert!(symptoms.symptoms.contains(&Symptom::ChestPain));
                assert!(symptoms.symptoms.contains(&Symptom::ShortnessOfBreath));
            }
            other => panic!("expected symptom input, got {other:?}"),
        }
    }
}
