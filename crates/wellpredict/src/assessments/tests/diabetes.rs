use super::common::*;
use crate::assessments::domain::{ActivityLevel, DiabetesInput};
use crate::assessments::scoring::{BmiClass, Factor, GlucoseClass, RiskCategory};

#[test]
fn normal_weight_normal_glucose_scores_low() {
    let outcome = engine().diabetes(&diabetes_input());

    assert_eq!(outcome.bmi, 22.9);
    assert_eq!(outcome.bmi_class, BmiClass::Normal);
    assert_eq!(outcome.glucose_class, GlucoseClass::Normal);
    assert_eq!(outcome.result.score, 5.0);
    assert_eq!(outcome.result.category, RiskCategory::Low);
}

#[test]
fn diabetic_glucose_jumps_score_and_flips_category() {
    let baseline = engine().diabetes(&diabetes_input());
    let elevated = engine().diabetes(&DiabetesInput {
        fasting_glucose: 130.0,
        ..diabetes_input()
    });

    assert!(elevated.result.score - baseline.result.score >= 50.0);
    assert_eq!(baseline.result.category, RiskCategory::Low);
    assert_eq!(elevated.result.category, RiskCategory::High);
    assert!(elevated.result.insights[0].contains("diabetic range"));
}

#[test]
fn stacked_factors_report_every_insight() {
    let input = DiabetesInput {
        age: 52.0,
        weight_kg: 100.0,
        height_cm: 170.0,
        fasting_glucose: 110.0,
        family_history: true,
        activity_level: ActivityLevel::Sedentary,
        hypertension: true,
        ..diabetes_input()
    };

    let outcome = engine().diabetes(&input);

    assert_eq!(outcome.bmi_class, BmiClass::Obese);
    assert_eq!(outcome.glucose_class, GlucoseClass::Prediabetic);
    assert_eq!(outcome.result.score, 100.0);
    assert_eq!(outcome.result.category, RiskCategory::High);

    let insights = &outcome.result.insights;
    assert_eq!(insights.len(), 4);
    assert!(insights[0].contains("obese"));
    assert!(insights[1].contains("prediabetic"));
    assert!(insights[2].contains("family history"));
    assert!(insights[3].contains("physical activity"));
}

#[test]
fn very_active_lifestyle_subtracts_points() {
    let input = DiabetesInput {
        age: 30.0,
        activity_level: ActivityLevel::VeryActive,
        ..diabetes_input()
    };

    let outcome = engine().diabetes(&input);

    let activity = outcome
        .result
        .components
        .iter()
        .find(|component| component.factor == Factor::Activity)
        .expect("activity component");
    assert_eq!(activity.points, -5.0);
    assert_eq!(outcome.result.score, 0.0);
}

#[test]
fn underweight_bmi_is_classified_without_penalty() {
    let input = DiabetesInput {
        weight_kg: 50.0,
        ..diabetes_input()
    };

    let outcome = engine().diabetes(&input);

    assert_eq!(outcome.bmi_class, BmiClass::Underweight);
    assert_eq!(outcome.result.score, 5.0);
}

#[test]
fn bmi_class_follows_the_reported_value_at_a_bucket_edge() {
    // 76.44 / 1.75^2 = 24.96, reported as 25.0
    let input = DiabetesInput {
        weight_kg: 76.44,
        ..diabetes_input()
    };

    let outcome = engine().diabetes(&input);

    assert_eq!(outcome.bmi, 25.0);
    assert_eq!(outcome.bmi_class, BmiClass::Overweight);
    assert_eq!(outcome.result.score, 15.0);

    let bmi = outcome
        .result
        .components
        .iter()
        .find(|component| component.factor == Factor::Bmi)
        .expect("bmi component");
    assert_eq!(bmi.notes, "BMI 25.0 (overweight)");
    assert!(outcome.result.insights[0].contains("BMI of 25.0"));
}
