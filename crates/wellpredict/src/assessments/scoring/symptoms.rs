//! Table-driven symptom matcher.
//!
//! Conditions are evaluated in priority order, urgent ones first. An urgent condition whose
//! match fraction exceeds the override threshold wins outright; otherwise the strictly highest
//! fraction wins and ties stay with the earlier entry. The chest pain plus shortness of breath
//! override runs last and always takes precedence.

use serde::{Deserialize, Serialize};

use super::super::domain::{Severity, Symptom, SymptomInput};
use super::config::SymptomRules;
use super::{clamp_score, owned, Factor, ScoreComponent, ScoreResult};

pub const INCONCLUSIVE: &str = "Inconclusive";
pub const SERIOUS_CONDITION: &str = "Potential Serious Condition";

const SERIOUS_COMBINATION: [Symptom; 2] = [Symptom::ChestPain, Symptom::ShortnessOfBreath];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Certainty {
    Low,
    Medium,
    High,
}

impl Certainty {
    pub const fn label(self) -> &'static str {
        match self {
            Certainty::Low => "Low",
            Certainty::Medium => "Medium",
            Certainty::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Moderate,
    High,
}

/// Matched condition, its match fraction and the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomAssessment {
    pub result: ScoreResult<Certainty>,
    pub condition: String,
    pub urgency: Urgency,
    pub description: String,
    pub matched: Vec<Symptom>,
}

struct ConditionDefinition {
    name: &'static str,
    symptoms: &'static [Symptom],
    min_matches: usize,
    /// Beyond this many days the condition is not plausible.
    max_days: Option<u32>,
    excludes: &'static [Symptom],
    typical_days: Option<(u32, &'static str)>,
    urgent: bool,
    recommendations: &'static [&'static str],
}

const CONDITIONS: &[ConditionDefinition] = &[
    ConditionDefinition {
        name: "Possible Pneumonia",
        symptoms: &[
            Symptom::Fever,
            Symptom::Cough,
            Symptom::ShortnessOfBreath,
            Symptom::Fatigue,
            Symptom::ChestPain,
        ],
        min_matches: 3,
        max_days: None,
        excludes: &[],
        typical_days: None,
        urgent: true,
        recommendations: &[
            "Consult a healthcare provider immediately",
            "Chest X-ray may be needed for diagnosis",
            "Rest and stay hydrated",
            "Complete any prescribed antibiotic course if bacterial",
            "Seek emergency care if breathing becomes difficult",
        ],
    },
    ConditionDefinition {
        name: "Possible COVID-19",
        symptoms: &[
            Symptom::Fever,
            Symptom::Cough,
            Symptom::ShortnessOfBreath,
            Symptom::Fatigue,
            Symptom::BodyAches,
            Symptom::LossOfTaste,
        ],
        min_matches: 3,
        max_days: Some(28),
        excludes: &[],
        typical_days: None,
        urgent: false,
        recommendations: &[
            "Get tested for COVID-19 immediately",
            "Self-isolate to prevent potential spread",
            "Monitor your symptoms closely, especially breathing difficulties",
            "Contact healthcare provider for guidance",
            "Seek emergency care if you experience severe symptoms",
        ],
    },
    ConditionDefinition {
        name: "Influenza (Flu)",
        symptoms: &[
            Symptom::Fever,
            Symptom::Cough,
            Symptom::BodyAches,
            Symptom::Fatigue,
            Symptom::Headache,
            Symptom::Chills,
        ],
        min_matches: 3,
        max_days: Some(21),
        excludes: &[],
        typical_days: Some((
            14,
            "However, flu symptoms typically resolve within two weeks, so you should consult a doctor.",
        )),
        urgent: false,
        recommendations: &[
            "Rest and stay home to avoid spreading the virus",
            "Drink plenty of fluids",
            "Take over-the-counter pain relievers for fever and aches",
            "Consult a doctor, especially if you're at high risk for complications",
            "Consider antiviral medications if caught early",
        ],
    },
    ConditionDefinition {
        name: "Common Cold",
        symptoms: &[
            Symptom::Cough,
            Symptom::SoreThroat,
            Symptom::Congestion,
            Symptom::RunnyNose,
            Symptom::Sneezing,
        ],
        min_matches: 2,
        max_days: Some(21),
        excludes: &[],
        typical_days: Some((
            10,
            "However, cold symptoms typically don't last more than 10 days, so you should consult a doctor.",
        )),
        urgent: false,
        recommendations: &[
            "Rest and drink plenty of fluids",
            "Over-the-counter cold medications may help relieve symptoms",
            "Use a humidifier to ease congestion",
            "Consult a doctor if symptoms worsen or last more than 10 days",
        ],
    },
    ConditionDefinition {
        name: "Seasonal Allergies",
        symptoms: &[
            Symptom::Congestion,
            Symptom::Sneezing,
            Symptom::RunnyNose,
            Symptom::ItchyEyes,
            Symptom::ItchyThroat,
        ],
        min_matches: 2,
        max_days: None,
        excludes: &[Symptom::Fever, Symptom::BodyAches],
        typical_days: None,
        urgent: false,
        recommendations: &[
            "Try over-the-counter antihistamines to relieve symptoms",
            "Avoid known allergens when possible",
            "Consider nasal steroid sprays for congestion",
            "Consult an allergist if symptoms are severe or persistent",
        ],
    },
    ConditionDefinition {
        name: "Gastroenteritis",
        symptoms: &[
            Symptom::Nausea,
            Symptom::Diarrhea,
            Symptom::AbdominalPain,
            Symptom::Fatigue,
        ],
        min_matches: 2,
        max_days: Some(14),
        excludes: &[Symptom::Congestion, Symptom::SoreThroat],
        typical_days: None,
        urgent: false,
        recommendations: &[
            "Stay hydrated with clear fluids",
            "Eat bland, easy-to-digest foods when you can eat",
            "Rest to help recovery",
            "Seek medical care if symptoms are severe or include high fever",
        ],
    },
    ConditionDefinition {
        name: "Migraine",
        symptoms: &[Symptom::Headache, Symptom::Nausea, Symptom::Dizziness],
        min_matches: 2,
        max_days: None,
        excludes: &[Symptom::Cough, Symptom::SoreThroat, Symptom::Congestion],
        typical_days: None,
        urgent: false,
        recommendations: &[
            "Rest in a quiet, dark room",
            "Apply cold compresses to your forehead",
            "Over-the-counter pain medications may help",
            "Consider prescription medications if migraines are frequent",
            "Identify and avoid migraine triggers",
        ],
    },
];

const INCONCLUSIVE_RECOMMENDATIONS: &[&str] = &[
    "Rest and stay hydrated",
    "Monitor your symptoms for changes",
    "Consult with a healthcare provider if symptoms persist or worsen",
    "Consider keeping a symptom diary to share with your doctor",
];

const SERIOUS_RECOMMENDATIONS: &[&str] = &[
    "Seek immediate medical attention",
    "Call emergency services if the chest pain is severe, spreading or sudden",
    "Do not drive yourself to the hospital",
];

/// Names of the conditions the matcher can report, in priority order.
pub fn condition_names() -> impl Iterator<Item = &'static str> {
    CONDITIONS.iter().map(|condition| condition.name)
}

struct Candidate<'a> {
    definition: &'a ConditionDefinition,
    fraction: f64,
    matched: Vec<Symptom>,
}

fn evaluate<'a>(
    definition: &'a ConditionDefinition,
    input: &SymptomInput,
) -> Option<Candidate<'a>> {
    if definition
        .excludes
        .iter()
        .any(|symptom| input.symptoms.contains(symptom))
    {
        return None;
    }
    if definition
        .max_days
        .is_some_and(|max_days| input.duration_days > max_days)
    {
        return None;
    }

    let matched: Vec<Symptom> = definition
        .symptoms
        .iter()
        .copied()
        .filter(|symptom| input.symptoms.contains(symptom))
        .collect();
    if matched.len() < definition.min_matches {
        return None;
    }

    Some(Candidate {
        definition,
        fraction: matched.len() as f64 / definition.symptoms.len() as f64,
        matched,
    })
}

pub(crate) fn match_symptoms(input: &SymptomInput, rules: &SymptomRules) -> SymptomAssessment {
    let candidates: Vec<Candidate<'_>> = CONDITIONS
        .iter()
        .filter_map(|definition| evaluate(definition, input))
        .collect();

    let urgent = candidates.iter().find(|candidate| {
        candidate.definition.urgent && candidate.fraction > rules.urgent_override_fraction
    });

    let best = urgent.or_else(|| {
        candidates.iter().fold(None, |best: Option<&Candidate<'_>>, candidate| match best {
            Some(current) if candidate.fraction <= current.fraction => Some(current),
            _ => Some(candidate),
        })
    });

    let assessment = match best {
        Some(candidate) if candidate.fraction >= rules.min_fraction => {
            matched_condition(candidate, input, rules)
        }
        best => inconclusive(best.map(|candidate| candidate.fraction).unwrap_or(0.0), input),
    };

    if SERIOUS_COMBINATION
        .iter()
        .all(|symptom| input.symptoms.contains(symptom))
    {
        return serious_condition(input);
    }

    assessment
}

fn matched_condition(
    candidate: &Candidate<'_>,
    input: &SymptomInput,
    rules: &SymptomRules,
) -> SymptomAssessment {
    let definition = candidate.definition;
    let score = clamp_score(candidate.fraction * 100.0);
    let certainty = rules.certainty.classify(candidate.fraction);

    let mut description = format!("Based on your symptoms, you may have {}.", definition.name);
    let mut insights = vec![format!(
        "{} of {} symptoms associated with {} are present.",
        candidate.matched.len(),
        definition.symptoms.len(),
        definition.name
    )];

    let beyond_typical = match definition.typical_days {
        Some((typical_days, caveat)) if input.duration_days > typical_days => {
            description.push(' ');
            description.push_str(caveat);
            insights.push(caveat.to_string());
            true
        }
        _ => false,
    };

    let urgency = if definition.urgent {
        Urgency::High
    } else if beyond_typical || input.severity == Severity::Severe {
        Urgency::Moderate
    } else {
        Urgency::Low
    };

    SymptomAssessment {
        result: ScoreResult {
            score,
            category: certainty,
            components: vec![ScoreComponent {
                factor: Factor::SymptomMatch,
                points: score,
                notes: format!(
                    "{} matched {}",
                    definition.name,
                    labels(&candidate.matched)
                ),
            }],
            insights,
            recommendations: owned(definition.recommendations),
        },
        condition: definition.name.to_string(),
        urgency,
        description,
        matched: candidate.matched.clone(),
    }
}

fn inconclusive(fraction: f64, input: &SymptomInput) -> SymptomAssessment {
    let score = clamp_score(fraction * 100.0);
    let urgency = if input.severity == Severity::Severe {
        Urgency::Moderate
    } else {
        Urgency::Low
    };

    SymptomAssessment {
        result: ScoreResult {
            score,
            category: Certainty::Low,
            components: Vec::new(),
            insights: Vec::new(),
            recommendations: owned(INCONCLUSIVE_RECOMMENDATIONS),
        },
        condition: INCONCLUSIVE.to_string(),
        urgency,
        description: "Based on the symptoms provided, a specific condition couldn't be identified with confidence. Your symptoms could be due to various causes.".to_string(),
        matched: Vec::new(),
    }
}

fn serious_condition(input: &SymptomInput) -> SymptomAssessment {
    let matched = SERIOUS_COMBINATION.to_vec();
    let score = clamp_score(100.0);

    SymptomAssessment {
        result: ScoreResult {
            score,
            category: Certainty::High,
            components: vec![ScoreComponent {
                factor: Factor::SymptomMatch,
                points: score,
                notes: format!("{SERIOUS_CONDITION} matched {}", labels(&matched)),
            }],
            insights: vec![format!(
                "Chest pain together with shortness of breath reported over {} day(s) needs prompt evaluation.",
                input.duration_days
            )],
            recommendations: owned(SERIOUS_RECOMMENDATIONS),
        },
        condition: SERIOUS_CONDITION.to_string(),
        urgency: Urgency::High,
        description: "Your symptoms include chest pain and shortness of breath, which could indicate a serious condition requiring immediate medical attention.".to_string(),
        matched,
    }
}

fn labels(symptoms: &[Symptom]) -> String {
    symptoms
        .iter()
        .map(|symptom| symptom.label())
        .collect::<Vec<_>>()
        .join(", ")
}
