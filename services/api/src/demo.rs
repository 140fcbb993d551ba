use clap::Args;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use wellpredict::assessments::{
    ActivityLevel, AlcoholConsumption, AssessmentInput, AssessmentOutcome,
    AssessmentServiceError, DiabetesInput, Gender, HeartInput, InputGuard, LungExposures,
    LungInput, ScoringConfig, ScoringEngine, Severity, SmokingStatus, Symptom, SymptomInput,
    WellnessInput,
};
use wellpredict::config::AppConfig;
use wellpredict::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding one assessment input (tagged by "kind")
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Scoring rule overrides (defaults to SCORING_RULES_PATH or the built-in tables)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Print the full outcome as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Scoring rule overrides (defaults to SCORING_RULES_PATH or the built-in tables)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Include the per-factor point breakdown for every sample.
    #[arg(long)]
    pub(crate) components: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { input, rules, json } = args;

    let engine = ScoringEngine::new(load_rules(rules)?);
    let raw = fs::read_to_string(&input)?;
    let input: AssessmentInput = serde_json::from_str(&raw)?;
    InputGuard::default()
        .check(&input)
        .map_err(AssessmentServiceError::from)?;

    let outcome = engine.assess(&input);
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        render_outcome(&outcome, true);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { rules, components } = args;

    let engine = ScoringEngine::new(load_rules(rules)?);
    let guard = InputGuard::default();

    println!("WellPredict assessment demo");
    for input in sample_inputs() {
        if let Err(err) = guard.check(&input) {
            println!("\n{} sample rejected: {}", input.kind().label(), err);
            continue;
        }
        println!();
        render_outcome(&engine.assess(&input), components);
    }

    Ok(())
}

fn load_rules(path: Option<PathBuf>) -> Result<ScoringConfig, AppError> {
    let mut config = AppConfig::load()?;
    if path.is_some() {
        config.scoring_rules = path;
    }
    Ok(config.scoring_config()?)
}

fn render_outcome(outcome: &AssessmentOutcome, components: bool) {
    println!(
        "{} assessment -> score {:.0} ({})",
        outcome.kind().label(),
        outcome.score(),
        outcome.category_label()
    );

    match outcome {
        AssessmentOutcome::Heart(heart) => {
            println!("  Blood pressure: {}", heart.blood_pressure_stage.label());
        }
        AssessmentOutcome::Diabetes(diabetes) => {
            println!(
                "  BMI {:.1} ({}) | fasting glucose {}",
                diabetes.bmi,
                diabetes.bmi_class.label(),
                diabetes.glucose_class.label()
            );
        }
        AssessmentOutcome::LungCancer(lung) => {
            println!("  {}", lung.description);
        }
        AssessmentOutcome::Symptoms(symptoms) => {
            println!(
                "  {} | certainty {} | urgency {:?}",
                symptoms.condition,
                symptoms.result.category.label(),
                symptoms.urgency
            );
            println!("  {}", symptoms.description);
        }
        AssessmentOutcome::Wellness(wellness) => {
            let areas: Vec<&str> = wellness
                .improvement_areas
                .iter()
                .map(|component| component.area())
                .collect();
            if areas.is_empty() {
                println!("  No improvement areas");
            } else {
                println!("  Improvement areas: {}", areas.join(", "));
            }
        }
    }

    if components {
        println!("  Score components:");
        for component in outcome.components() {
            println!(
                "    - {:?}: {:+.1} ({})",
                component.factor, component.points, component.notes
            );
        }
    }
    for insight in outcome.insights() {
        println!("  * {}", insight);
    }
    println!("  Recommendations:");
    for recommendation in outcome.recommendations() {
        println!("    - {}", recommendation);
    }
}

fn sample_inputs() -> Vec<AssessmentInput> {
    vec![
        AssessmentInput::Heart(HeartInput {
            age: 58.0,
            gender: Gender::Male,
            systolic: 142.0,
            diastolic: 88.0,
            total_cholesterol: 232.0,
            hdl: 41.0,
            smoker: false,
            diabetic: false,
        }),
        AssessmentInput::Diabetes(DiabetesInput {
            age: 47.0,
            gender: Gender::Female,
            weight_kg: 84.0,
            height_cm: 165.0,
            fasting_glucose: 108.0,
            family_history: true,
            activity_level: ActivityLevel::Light,
            hypertension: false,
        }),
        AssessmentInput::LungCancer(LungInput {
            age: 66.0,
            gender: Gender::Female,
            smoking_status: SmokingStatus::Former,
            years_smoked: 22.0,
            packs_per_day: 1.0,
            years_quit: 6.0,
            exposures: LungExposures {
                radon: true,
                ..LungExposures::default()
            },
        }),
        AssessmentInput::Symptoms(SymptomInput {
            symptoms: BTreeSet::from([
                Symptom::Cough,
                Symptom::SoreThroat,
                Symptom::Congestion,
                Symptom::RunnyNose,
            ]),
            duration_days: 4,
            severity: Severity::Mild,
        }),
        AssessmentInput::Wellness(WellnessInput {
            sleep_hours: 6.0,
            exercise_hours_per_week: 2.0,
            stress_level: 6.0,
            diet_quality: 6.0,
            smoking_status: SmokingStatus::Never,
            alcohol: AlcoholConsumption::Light,
        }),
    ]
}
