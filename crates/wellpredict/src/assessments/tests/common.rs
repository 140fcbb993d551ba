use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessments::domain::{
    ActivityLevel, AlcoholConsumption, AssessmentId, DiabetesInput, Gender, HeartInput,
    LungExposures, LungInput, Severity, SmokingStatus, Symptom, SymptomInput, WellnessInput,
};
use crate::assessments::gateway::{
    DiabetesPredictionRequest, GatewayError, HeartPredictionRequest, PredictionGateway,
    PredictionRequest, RemotePrediction,
};
use crate::assessments::repository::{
    AssessmentRecord, AssessmentRepository, RecordFilter, RepositoryError,
};
use crate::assessments::scoring::{ScoringConfig, ScoringEngine};
use crate::assessments::{assessment_router, AssessmentService};

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::default())
}

pub(super) fn heart_input() -> HeartInput {
    HeartInput {
        age: 45.0,
        gender: Gender::Female,
        systolic: 118.0,
        diastolic: 76.0,
        total_cholesterol: 185.0,
        hdl: 52.0,
        smoker: false,
        diabetic: false,
    }
}

pub(super) fn diabetes_input() -> DiabetesInput {
    DiabetesInput {
        age: 35.0,
        gender: Gender::Female,
        weight_kg: 70.0,
        height_cm: 175.0,
        fasting_glucose: 90.0,
        family_history: false,
        activity_level: ActivityLevel::Moderate,
        hypertension: false,
    }
}

pub(super) fn lung_input(smoking_status: SmokingStatus) -> LungInput {
    LungInput {
        age: 30.0,
        gender: Gender::Female,
        smoking_status,
        years_smoked: 0.0,
        packs_per_day: 0.0,
        years_quit: 0.0,
        exposures: LungExposures::default(),
    }
}

pub(super) fn current_smoker() -> LungInput {
    LungInput {
        age: 55.0,
        years_smoked: 20.0,
        packs_per_day: 1.0,
        ..lung_input(SmokingStatus::Current)
    }
}

pub(super) fn symptom_input(symptoms: &[Symptom], duration_days: u32) -> SymptomInput {
    SymptomInput {
        symptoms: symptoms.iter().copied().collect::<BTreeSet<_>>(),
        duration_days,
        severity: Severity::Mild,
    }
}

pub(super) fn healthiest() -> WellnessInput {
    WellnessInput {
        sleep_hours: 8.0,
        exercise_hours_per_week: 6.0,
        stress_level: 0.0,
        diet_quality: 10.0,
        smoking_status: SmokingStatus::Never,
        alcohol: AlcoholConsumption::None,
    }
}

pub(super) fn unhealthiest() -> WellnessInput {
    WellnessInput {
        sleep_hours: 3.0,
        exercise_hours_per_week: 0.0,
        stress_level: 10.0,
        diet_quality: 0.0,
        smoking_status: SmokingStatus::Current,
        alcohol: AlcoholConsumption::Heavy,
    }
}

pub(super) fn heart_features() -> HeartPredictionRequest {
    HeartPredictionRequest {
        age: 58,
        sex: 1,
        cp: 2,
        trestbps: 140,
        chol: 260,
        fbs: 0,
        restecg: 1,
        thalach: 150,
        exang: 0,
        oldpeak: 1.4,
        slope: 1,
        ca: 1,
        thal: 2,
    }
}

pub(super) fn diabetes_features() -> DiabetesPredictionRequest {
    DiabetesPredictionRequest {
        pregnancies: 1,
        glucose: 148,
        blood_pressure: 72,
        skin_thickness: 35,
        insulin: 0,
        bmi: 33.6,
        diabetes_pedigree: 0.627,
        age: 50,
        family_history: 1,
        physical_activity: 2.0,
        smoking: 0,
        alcohol: 2,
    }
}

pub(super) fn remote_prediction(probability: f64) -> RemotePrediction {
    RemotePrediction {
        prediction: u8::from(probability > 0.5),
        probability,
        risk_level: "High".to_string(),
        confidence: 0.82,
        recommendations: vec!["Schedule a cardiology consultation".to_string()],
        risk_factors: vec!["Elevated cholesterol".to_string()],
        timestamp: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl AssessmentRepository for MemoryRepository {
    fn save(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn query(&self, filter: &RecordFilter) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| filter.matches(record))
            .take(filter.limit)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn save(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn query(&self, _filter: &RecordFilter) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Canned reply for the stub gateway.
#[derive(Debug, Clone)]
pub(super) enum StubReply {
    Prediction(RemotePrediction),
    Unavailable,
    Upstream(u16, Value),
}

pub(super) struct StubGateway {
    reply: StubReply,
    pub(super) calls: Mutex<Vec<PredictionRequest>>,
}

impl StubGateway {
    pub(super) fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.lock().expect("gateway mutex poisoned").len()
    }
}

impl PredictionGateway for StubGateway {
    async fn predict(&self, request: &PredictionRequest) -> Result<RemotePrediction, GatewayError> {
        self.calls
            .lock()
            .expect("gateway mutex poisoned")
            .push(request.clone());
        match &self.reply {
            StubReply::Prediction(prediction) => Ok(prediction.clone()),
            StubReply::Unavailable => Err(GatewayError::ServiceUnavailable(
                "connection refused".to_string(),
            )),
            StubReply::Upstream(status, body) => Err(GatewayError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

pub(super) type TestService = AssessmentService<MemoryRepository, StubGateway>;

pub(super) fn build_service(reply: StubReply) -> (TestService, Arc<MemoryRepository>, Arc<StubGateway>) {
    let repository = Arc::new(MemoryRepository::default());
    let gateway = Arc::new(StubGateway::new(reply));
    let service = AssessmentService::new(repository.clone(), gateway.clone(), ScoringConfig::default());
    (service, repository, gateway)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
