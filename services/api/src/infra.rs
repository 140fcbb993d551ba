use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use wellpredict::assessments::{
    AssessmentId, AssessmentRecord, AssessmentRepository, RecordFilter, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local audit log. Records are kept in insertion order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wellpredict::assessments::{
        AssessmentInput, AssessmentKind, RecordPayload, ScoringConfig, ScoringEngine,
        WellnessInput,
    };
    use wellpredict::assessments::{AlcoholConsumption, SmokingStatus};

    fn record(id: &str) -> AssessmentRecord {
        let input = AssessmentInput::Wellness(WellnessInput {
            sleep_hours: 8.0,
            exercise_hours_per_week: 3.0,
            stress_level: 4.0,
            diet_quality: 7.0,
            smoking_status: SmokingStatus::Never,
            alcohol: AlcoholConsumption::Light,
        });
        let outcome = ScoringEngine::new(ScoringConfig::default()).assess(&input);
        AssessmentRecord {
            id: AssessmentId(id.to_string()),
            kind: AssessmentKind::Wellness,
            recorded_at: Utc::now(),
            payload: RecordPayload::Local { input, outcome },
        }
    }

    #[test]
    fn duplicate_ids_conflict() {
        let repository = InMemoryAssessmentRepository::default();
        repository.save(record("asm-000001")).expect("first save");

        let err = repository
            .save(record("asm-000001"))
            .expect_err("duplicate rejected");

        assert!(matches!(err, RepositoryError::Conflict));
    }

    #[test]
    fn query_returns_newest_first_within_limit() {
        let repository = InMemoryAssessmentRepository::default();
        for id in ["asm-000001", "asm-000002", "asm-000003"] {
            repository.save(record(id)).expect("save");
        }

        let records = repository
            .query(&RecordFilter {
                kind: Some(AssessmentKind::Wellness),
                limit: 2,
            })
            .expect("query");

        let ids: Vec<_> = records.iter().map(|record| record.id.0.as_str()).collect();
        assert_eq!(ids, vec!["asm-000003", "asm-000002"]);
    }
}
