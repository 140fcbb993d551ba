use serde::{Deserialize, Serialize};

use super::super::domain::{AlcoholConsumption, SmokingStatus, WellnessInput};
use super::config::{AlcoholPoints, SmokingPoints, WellnessRules};
use super::{owned, Factor, HealthStatus, ScoreResult, Tally};

const EXCELLENT: &[&str] = &[
    "Maintain your healthy lifestyle",
    "Consider adding variety to your exercise routine",
    "Stay current with preventive health screenings",
    "Share your healthy habits with friends and family",
];

const GOOD: &[&str] = &[
    "Continue your healthy habits",
    "Focus on improving your weakest health area first",
    "Schedule regular health check-ups",
    "Consider adding stress management techniques like meditation",
];

const FAIR: &[&str] = &[
    "Consult with a healthcare provider about improving your health",
    "Make gradual lifestyle changes rather than drastic ones",
    "Set specific, achievable health goals",
    "Consider joining a support group for motivation",
];

const POOR: &[&str] = &[
    "Schedule a comprehensive health assessment with a healthcare provider",
    "Focus on one health behavior change at a time",
    "Seek support from healthcare professionals for guidance",
    "Consider lifestyle medicine programs",
];

/// Lifestyle dimension graded by the wellness aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellnessComponent {
    Sleep,
    Exercise,
    Stress,
    Diet,
    Alcohol,
    Smoking,
}

impl WellnessComponent {
    /// Name used when the component is reported as an improvement area.
    pub const fn area(self) -> &'static str {
        match self {
            WellnessComponent::Sleep => "Sleep",
            WellnessComponent::Exercise => "Physical Activity",
            WellnessComponent::Stress => "Stress Management",
            WellnessComponent::Diet => "Nutrition",
            WellnessComponent::Alcohol => "Alcohol Consumption",
            WellnessComponent::Smoking => "Tobacco Use",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub component: WellnessComponent,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessAssessment {
    pub result: ScoreResult<HealthStatus>,
    pub component_scores: Vec<ComponentScore>,
    pub improvement_areas: Vec<WellnessComponent>,
}

fn by_smoking(table: &SmokingPoints, status: SmokingStatus) -> f64 {
    match status {
        SmokingStatus::Never => table.never,
        SmokingStatus::Former => table.former,
        SmokingStatus::Current => table.current,
    }
}

fn by_alcohol(table: &AlcoholPoints, alcohol: AlcoholConsumption) -> f64 {
    match alcohol {
        AlcoholConsumption::None => table.none,
        AlcoholConsumption::Light => table.light,
        AlcoholConsumption::Moderate => table.moderate,
        AlcoholConsumption::Heavy => table.heavy,
    }
}

pub(crate) fn score(input: &WellnessInput, rules: &WellnessRules) -> WellnessAssessment {
    let mut tally = Tally::starting_at(rules.baseline);

    let hours_outside = if input.sleep_hours < rules.sleep_optimal_min {
        rules.sleep_optimal_min - input.sleep_hours
    } else if input.sleep_hours > rules.sleep_optimal_max {
        input.sleep_hours - rules.sleep_optimal_max
    } else {
        0.0
    };
    if hours_outside > 0.0 {
        let penalty = (hours_outside * rules.sleep_penalty_per_hour).min(rules.sleep_penalty_cap);
        tally.add(
            Factor::Sleep,
            -penalty,
            format!("{:.1} h sleep, {hours_outside:.1} h outside the optimum", input.sleep_hours),
        );
    }

    if input.exercise_hours_per_week < rules.exercise_target_hours {
        let missing = rules.exercise_target_hours - input.exercise_hours_per_week;
        let penalty = (missing * rules.exercise_penalty_per_hour).min(rules.exercise_penalty_cap);
        tally.add(
            Factor::Exercise,
            -penalty,
            format!("{:.1} h exercise per week", input.exercise_hours_per_week),
        );
    } else if input.exercise_hours_per_week >= rules.exercise_bonus_at_least {
        tally.add(
            Factor::Exercise,
            rules.exercise_bonus,
            format!("{:.1} h exercise per week", input.exercise_hours_per_week),
        );
    }

    tally.add(
        Factor::Stress,
        -(input.stress_level * rules.stress_weight),
        format!("stress {:.0}/10", input.stress_level),
    );
    tally.add(
        Factor::Diet,
        (input.diet_quality - rules.diet_midpoint) * rules.diet_weight,
        format!("diet quality {:.0}/10", input.diet_quality),
    );

    let smoking = by_smoking(&rules.smoking, input.smoking_status);
    if smoking != 0.0 {
        tally.add(Factor::Smoking, smoking, input.smoking_status.label());
    }
    let alcohol = by_alcohol(&rules.alcohol, input.alcohol);
    if alcohol != 0.0 {
        tally.add(
            Factor::Alcohol,
            alcohol,
            format!("{} alcohol consumption", input.alcohol.label()),
        );
    }

    let (score, components) = tally.finish();
    let status = rules.status.classify(score);

    let component_scores = component_scores(input, rules);
    let improvement_areas: Vec<WellnessComponent> = component_scores
        .iter()
        .filter(|entry| entry.score < rules.improvement_threshold)
        .map(|entry| entry.component)
        .collect();

    let insights = improvement_areas
        .iter()
        .map(|component| format!("{} is an area for improvement.", component.area()))
        .collect();

    let mut recommendations = match status {
        HealthStatus::Excellent => owned(EXCELLENT),
        HealthStatus::Good => owned(GOOD),
        HealthStatus::Fair => owned(FAIR),
        HealthStatus::Poor => owned(POOR),
    };
    if matches!(status, HealthStatus::Fair | HealthStatus::Poor) {
        let severe = status == HealthStatus::Poor;
        if input.smoking_status == SmokingStatus::Current {
            recommendations.push(if severe {
                "Quitting smoking should be a priority".to_string()
            } else {
                "Consider a smoking cessation program".to_string()
            });
        }
        if input.alcohol == AlcoholConsumption::Heavy {
            recommendations.push(if severe {
                "Reducing alcohol consumption is strongly recommended".to_string()
            } else {
                "Reduce alcohol consumption".to_string()
            });
        }
    }

    WellnessAssessment {
        result: ScoreResult {
            score,
            category: status,
            components,
            insights,
            recommendations,
        },
        component_scores,
        improvement_areas,
    }
}

fn component_scores(input: &WellnessInput, rules: &WellnessRules) -> Vec<ComponentScore> {
    let sleep = rules
        .sleep_bands
        .iter()
        .find(|band| (band.min..=band.max).contains(&input.sleep_hours))
        .map(|band| band.score)
        .unwrap_or(rules.sleep_band_fallback);

    [
        (WellnessComponent::Sleep, sleep),
        (
            WellnessComponent::Exercise,
            rules
                .exercise_component
                .points_for(input.exercise_hours_per_week),
        ),
        (
            WellnessComponent::Stress,
            (rules.component_ceiling - rules.stress_component_step * input.stress_level).max(0.0),
        ),
        (
            WellnessComponent::Diet,
            (rules.diet_component_step * input.diet_quality).min(rules.component_ceiling),
        ),
        (
            WellnessComponent::Alcohol,
            by_alcohol(&rules.alcohol_component, input.alcohol),
        ),
        (
            WellnessComponent::Smoking,
            by_smoking(&rules.smoking_component, input.smoking_status),
        ),
    ]
    .into_iter()
    .map(|(component, score)| ComponentScore { component, score })
    .collect()
}
