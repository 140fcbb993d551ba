use serde::{Deserialize, Serialize};

use super::super::domain::{ActivityLevel, DiabetesInput};
use super::config::{BmiClass, DiabetesRules, GlucoseClass};
use super::{owned, Factor, RiskCategory, ScoreResult, Tally};

const LOW_RISK: &[&str] = &[
    "Maintain a healthy weight through balanced diet and regular exercise",
    "Continue with annual check-ups and blood glucose testing",
    "Limit sugar and refined carbohydrate intake",
];

const MODERATE_RISK: &[&str] = &[
    "Increase physical activity to at least 150 minutes per week",
    "Follow a low-glycemic diet rich in fiber and low in added sugars",
    "Get blood glucose levels checked every 6 months",
    "Consider consulting with a nutritionist for personalized diet plan",
];

const HIGH_RISK: &[&str] = &[
    "Consult with a healthcare provider as soon as possible",
    "Monitor blood glucose levels regularly",
    "Implement a structured weight management program if overweight",
    "Follow a diabetic diet plan recommended by a healthcare professional",
    "Consider joining a diabetes prevention program",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesAssessment {
    pub result: ScoreResult<RiskCategory>,
    /// Body-mass index rounded to one decimal.
    pub bmi: f64,
    pub bmi_class: BmiClass,
    pub glucose_class: GlucoseClass,
}

pub(crate) fn score(input: &DiabetesInput, rules: &DiabetesRules) -> DiabetesAssessment {
    let bmi = (input.bmi() * 10.0).round() / 10.0;
    let bmi_class = rules.bmi.classify(bmi);
    let glucose_class = rules.glucose.classify(input.fasting_glucose);

    let mut tally = Tally::default();
    tally.add(
        Factor::Age,
        rules.age.points_for(input.age),
        format!("age {:.0}", input.age),
    );
    tally.add(
        Factor::Bmi,
        rules.bmi.points_for(bmi_class),
        format!("BMI {bmi:.1} ({})", bmi_class.label()),
    );
    tally.add(
        Factor::Glucose,
        rules.glucose.points_for(glucose_class),
        format!("fasting glucose {:.0} mg/dL", input.fasting_glucose),
    );
    if input.family_history {
        tally.add(
            Factor::FamilyHistory,
            rules.family_history_points,
            "family history of diabetes",
        );
    }
    if input.hypertension {
        tally.add(
            Factor::Hypertension,
            rules.hypertension_points,
            "diagnosed hypertension",
        );
    }

    let activity = &rules.activity;
    let (activity_points, activity_note) = match input.activity_level {
        ActivityLevel::Sedentary => (activity.sedentary, "sedentary lifestyle"),
        ActivityLevel::Light => (activity.light, "light activity"),
        ActivityLevel::Moderate => (activity.moderate, "moderate activity"),
        ActivityLevel::Active => (activity.active, "active lifestyle"),
        ActivityLevel::VeryActive => (activity.very_active, "very active lifestyle"),
    };
    tally.add(Factor::Activity, activity_points, activity_note);

    let (score, components) = tally.finish();
    let category = rules.tiers.classify(score);

    let mut insights = Vec::new();
    if matches!(bmi_class, BmiClass::Overweight | BmiClass::Obese) {
        insights.push(format!(
            "Your BMI of {bmi:.1} falls in the {} range; excess weight increases insulin resistance.",
            bmi_class.label()
        ));
    }
    match glucose_class {
        GlucoseClass::Diabetic => insights.push(format!(
            "A fasting glucose of {:.0} mg/dL is in the diabetic range; please confirm with your doctor.",
            input.fasting_glucose
        )),
        GlucoseClass::Prediabetic => insights.push(format!(
            "A fasting glucose of {:.0} mg/dL is in the prediabetic range.",
            input.fasting_glucose
        )),
        GlucoseClass::Normal => {}
    }
    if input.family_history {
        insights.push("A family history of diabetes raises your baseline risk.".to_string());
    }
    if matches!(
        input.activity_level,
        ActivityLevel::Sedentary | ActivityLevel::Light
    ) {
        insights.push(
            "Low physical activity reduces how well your body regulates blood sugar.".to_string(),
        );
    }

    let recommendations = match category {
        RiskCategory::Low | RiskCategory::LowModerate => owned(LOW_RISK),
        RiskCategory::Moderate => owned(MODERATE_RISK),
        RiskCategory::High => owned(HIGH_RISK),
    };

    DiabetesAssessment {
        result: ScoreResult {
            score,
            category,
            components,
            insights,
            recommendations,
        },
        bmi,
        bmi_class,
        glucose_class,
    }
}
