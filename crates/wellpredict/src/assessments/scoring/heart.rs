use serde::{Deserialize, Serialize};

use super::super::domain::{Gender, HeartInput};
use super::config::{BloodPressureStage, HeartRules};
use super::{owned, Factor, RiskCategory, ScoreResult, Tally};

const LOW_RISK: &[&str] = &[
    "Maintain a healthy lifestyle with regular exercise",
    "Continue with a balanced diet low in saturated fats",
    "Schedule routine check-ups every 1-2 years",
];

const MODERATE_RISK: &[&str] = &[
    "Increase physical activity to at least 150 minutes per week",
    "Reduce sodium and saturated fat intake",
    "Consider discussing preventive medications with your doctor",
    "Schedule check-ups every 6-12 months",
];

const HIGH_RISK: &[&str] = &[
    "Consult with a healthcare provider as soon as possible",
    "Follow a heart-healthy diet recommended by a nutritionist",
    "Implement a regular exercise program under medical supervision",
    "Monitor blood pressure and cholesterol regularly",
    "Consider stress reduction techniques like meditation",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartAssessment {
    pub result: ScoreResult<RiskCategory>,
    pub blood_pressure_stage: BloodPressureStage,
}

pub(crate) fn score(input: &HeartInput, rules: &HeartRules) -> HeartAssessment {
    let mut tally = Tally::default();

    tally.add(
        Factor::Age,
        rules.age.points_for(input.age),
        format!("age {:.0}", input.age),
    );

    let stage = rules.pressure_stage(input.systolic, input.diastolic);
    let blood_pressure_stage = stage
        .map(|stage| stage.stage)
        .unwrap_or(BloodPressureStage::Normal);
    tally.add(
        Factor::BloodPressure,
        stage.map(|stage| stage.points).unwrap_or_default(),
        format!(
            "{:.0}/{:.0} mmHg ({})",
            input.systolic,
            input.diastolic,
            blood_pressure_stage.label()
        ),
    );

    tally.add(
        Factor::Cholesterol,
        rules.total_cholesterol.points_for(input.total_cholesterol),
        format!("total cholesterol {:.0} mg/dL", input.total_cholesterol),
    );
    tally.add(
        Factor::Hdl,
        rules.hdl.points_for(input.hdl),
        format!("HDL {:.0} mg/dL", input.hdl),
    );

    if input.smoker {
        tally.add(Factor::Smoking, rules.smoker_points, "active smoker");
    }
    if input.diabetic {
        tally.add(Factor::Diabetes, rules.diabetic_points, "diabetic comorbidity");
    }

    let gender_applies = match input.gender {
        Gender::Male => input.age > rules.gender.male_older_than,
        Gender::Female => input.age > rules.gender.female_older_than,
        Gender::Other => false,
    };
    if gender_applies {
        tally.add(
            Factor::Gender,
            rules.gender.points,
            "age-related risk increase for sex",
        );
    }

    let (score, components) = tally.finish();
    let category = rules.tiers.classify(score);

    let mut insights = Vec::new();
    if blood_pressure_stage >= rules.hypertension_insight_stage {
        insights.push(format!(
            "Your blood pressure of {:.0}/{:.0} mmHg is in the {} range, which strains the heart and arteries.",
            input.systolic,
            input.diastolic,
            blood_pressure_stage.label()
        ));
    }
    if input.total_cholesterol >= rules.cholesterol_insight_at_least {
        insights.push(format!(
            "A total cholesterol of {:.0} mg/dL is above the desirable level and contributes to plaque build-up.",
            input.total_cholesterol
        ));
    }
    if input.smoker {
        insights.push(
            "Smoking damages blood vessels and is one of the largest modifiable heart risks."
                .to_string(),
        );
    }
    if input.diabetic {
        insights.push(
            "Diabetes significantly raises the risk of cardiovascular disease.".to_string(),
        );
    }

    let recommendations = match category {
        RiskCategory::Low | RiskCategory::LowModerate => owned(LOW_RISK),
        RiskCategory::Moderate => owned(MODERATE_RISK),
        RiskCategory::High => owned(HIGH_RISK),
    };

    HeartAssessment {
        result: ScoreResult {
            score,
            category,
            components,
            insights,
            recommendations,
        },
        blood_pressure_stage,
    }
}
