use serde::{Deserialize, Serialize};

use super::super::domain::{Gender, LungInput, SmokingStatus};
use super::config::LungRules;
use super::{owned, Factor, RiskCategory, ScoreResult, Tally};

const LOW_RISK: &[&str] = &[
    "Maintain a smoke-free lifestyle",
    "Avoid secondhand smoke exposure",
    "Ensure good ventilation in your home",
    "Consider regular general health check-ups",
];

const SLIGHTLY_ELEVATED: &[&str] = &[
    "Maintain a smoke-free lifestyle",
    "Minimize exposure to identified risk factors when possible",
    "Ensure proper ventilation in your home and workplace",
    "Discuss your risk factors with a healthcare provider during regular check-ups",
];

const MODERATELY_ELEVATED: &[&str] = &[
    "Continue to avoid smoking and tobacco products",
    "Maintain regular health check-ups",
    "Consider discussing lung cancer screening with your doctor",
    "Follow a healthy diet rich in fruits and vegetables",
    "Exercise regularly to improve lung function",
];

const HIGH_RISK: &[&str] = &[
    "Discuss lung cancer screening options with your healthcare provider",
    "Schedule regular check-ups with focus on respiratory health",
    "Consider a lung function test",
    "Minimize exposure to other lung irritants",
];

const CURRENT_SMOKER_HIGH_RISK: &[&str] = &[
    "Seek professional help to quit smoking immediately",
    "Discuss regular lung cancer screening with your doctor",
    "Consider joining a smoking cessation program",
    "Schedule comprehensive health check-ups every 6-12 months",
    "Be alert to potential symptoms like persistent cough or shortness of breath",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LungAssessment {
    pub result: ScoreResult<RiskCategory>,
    /// `None` when pack-years do not apply (never smoked).
    pub pack_years: Option<f64>,
    pub smoking_status: SmokingStatus,
    pub exposures: Vec<String>,
    pub description: String,
}

impl LungAssessment {
    pub fn tier_label(&self) -> &'static str {
        tier_label(self.result.category)
    }
}

fn tier_label(category: RiskCategory) -> &'static str {
    match category {
        RiskCategory::Low => "Low Risk",
        RiskCategory::LowModerate => "Slightly Elevated Risk",
        RiskCategory::Moderate => "Moderately Elevated Risk",
        RiskCategory::High => "High Risk",
    }
}

pub(crate) fn score(input: &LungInput, rules: &LungRules) -> LungAssessment {
    let pack_years = input.pack_years();
    let exposures = input.exposures.flagged();

    let mut tally = Tally::default();
    tally.add(
        Factor::Age,
        rules.age.points_for(input.age),
        format!("age {:.0}", input.age),
    );

    match input.smoking_status {
        SmokingStatus::Never => {}
        SmokingStatus::Current => {
            tally.add(Factor::Smoking, rules.current_base, "current smoker");
        }
        SmokingStatus::Former => {
            let decayed = (rules.former_base - rules.former_base_decay_per_year * input.years_quit)
                .max(0.0);
            tally.add(
                Factor::Smoking,
                decayed,
                format!("former smoker, quit {:.0} years ago", input.years_quit),
            );
        }
    }

    if let Some(pack_years) = pack_years {
        let weight = match input.smoking_status {
            SmokingStatus::Former => {
                (1.0 - rules.former_pack_year_decay_per_year * input.years_quit).max(0.0)
            }
            _ => 1.0,
        };
        let points = (pack_years * rules.points_per_pack_year * weight).min(rules.pack_year_cap);
        tally.add(
            Factor::PackYears,
            points,
            format!("{pack_years:.1} pack-years"),
        );
    }

    for exposure in &exposures {
        tally.add(Factor::Exposure, rules.exposure_points, *exposure);
    }

    if input.gender == Gender::Male {
        tally.add(Factor::Gender, rules.male_points, "male");
    }

    let (score, components) = tally.finish();
    let category = rules.tiers.classify(score);

    let mut insights = Vec::new();
    match input.smoking_status {
        SmokingStatus::Current => insights.push(
            "Quitting smoking is the single most effective way to lower your lung cancer risk."
                .to_string(),
        ),
        SmokingStatus::Former => insights.push(
            "Your risk continues to fall the longer you stay smoke-free.".to_string(),
        ),
        SmokingStatus::Never => {}
    }
    if input.age >= rules.screening_age {
        insights.push(format!(
            "At {:.0} you may qualify for regular lung cancer screening.",
            input.age
        ));
    }
    insights.extend(
        exposures
            .iter()
            .map(|exposure| format!("{exposure} increases your risk.")),
    );

    let recommendations = match category {
        RiskCategory::Low => owned(LOW_RISK),
        RiskCategory::LowModerate => owned(SLIGHTLY_ELEVATED),
        RiskCategory::Moderate => owned(MODERATELY_ELEVATED),
        RiskCategory::High => match input.smoking_status {
            SmokingStatus::Current => owned(CURRENT_SMOKER_HIGH_RISK),
            SmokingStatus::Former => {
                let mut lines = vec!["Continue to avoid smoking".to_string()];
                lines.extend(owned(HIGH_RISK));
                lines
            }
            SmokingStatus::Never => {
                let mut lines = vec!["Maintain a smoke-free lifestyle".to_string()];
                lines.extend(owned(HIGH_RISK));
                lines
            }
        },
    };

    let description = describe(input, pack_years, category, exposures.len());

    LungAssessment {
        result: ScoreResult {
            score,
            category,
            components,
            insights,
            recommendations,
        },
        pack_years,
        smoking_status: input.smoking_status,
        exposures: exposures.into_iter().map(str::to_string).collect(),
        description,
    }
}

fn describe(
    input: &LungInput,
    pack_years: Option<f64>,
    category: RiskCategory,
    exposure_count: usize,
) -> String {
    let level = match category {
        RiskCategory::Low => {
            "Your risk of developing lung cancer is relatively low based on the information provided."
        }
        RiskCategory::LowModerate => "Your risk is slightly higher than average.",
        RiskCategory::Moderate => "Your risk is moderately elevated.",
        RiskCategory::High => "Your risk is significantly elevated.",
    };

    let history = match (input.smoking_status, pack_years) {
        (SmokingStatus::Current, Some(pack_years)) => format!(
            " As a current smoker you have accumulated {pack_years:.1} pack-years."
        ),
        (SmokingStatus::Former, Some(pack_years)) => format!(
            " As a former smoker you accumulated {pack_years:.1} pack-years and quit {:.0} years ago.",
            input.years_quit
        ),
        _ => " You have never smoked.".to_string(),
    };

    let mut description = format!("{level}{history}");
    if exposure_count > 0 {
        let plural = if exposure_count > 1 { "s" } else { "" };
        description.push_str(&format!(
            " The presence of {exposure_count} additional risk factor{plural} increases your overall risk."
        ));
    }
    description
}
