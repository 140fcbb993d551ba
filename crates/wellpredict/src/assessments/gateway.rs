//! Boundary to the external ML prediction services.
//!
//! The gateway forwards feature payloads as-is and reconciles the model response into the
//! canonical [`ScoreResult`]. Connection failures and timeouts surface as
//! [`GatewayError::ServiceUnavailable`]; a score is never invented when the model is absent.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::domain::AssessmentKind;
use super::scoring::{clamp_score, Factor, RiskCategory, RiskTiers, ScoreComponent, ScoreResult};
use crate::config::GatewayConfig;

/// Feature vector expected by the heart-disease model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartPredictionRequest {
    pub age: u8,
    pub sex: u8,
    pub cp: u8,
    pub trestbps: u16,
    pub chol: u16,
    pub fbs: u8,
    pub restecg: u8,
    pub thalach: u16,
    pub exang: u8,
    pub oldpeak: f64,
    pub slope: u8,
    pub ca: u8,
    pub thal: u8,
}

/// Feature vector expected by the diabetes model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesPredictionRequest {
    pub pregnancies: u8,
    pub glucose: u16,
    pub blood_pressure: u16,
    pub skin_thickness: u16,
    pub insulin: u16,
    pub bmi: f64,
    pub diabetes_pedigree: f64,
    pub age: u8,
    pub family_history: u8,
    pub physical_activity: f64,
    pub smoking: u8,
    pub alcohol: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PredictionRequest {
    Heart(HeartPredictionRequest),
    Diabetes(DiabetesPredictionRequest),
}

impl PredictionRequest {
    pub fn kind(&self) -> AssessmentKind {
        match self {
            PredictionRequest::Heart(_) => AssessmentKind::Heart,
            PredictionRequest::Diabetes(_) => AssessmentKind::Diabetes,
        }
    }
}

/// Prediction payload returned by the model services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePrediction {
    pub prediction: u8,
    #[serde(alias = "risk_score")]
    pub probability: f64,
    pub risk_level: String,
    pub confidence: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl RemotePrediction {
    /// Map the model output onto the canonical score and thresholds of its assessment type.
    pub fn reconcile(&self, tiers: &RiskTiers) -> ScoreResult<RiskCategory> {
        let score = clamp_score(self.probability * 100.0);

        ScoreResult {
            score,
            category: tiers.classify(score),
            components: vec![ScoreComponent {
                factor: Factor::ModelProbability,
                points: score,
                notes: format!(
                    "model probability {:.2} (confidence {:.2}, reported level {})",
                    self.probability, self.confidence, self.risk_level
                ),
            }],
            insights: self.risk_factors.clone(),
            recommendations: self.recommendations.clone(),
        }
    }

    fn check(&self) -> Result<(), GatewayError> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.probability) || !unit.contains(&self.confidence) {
            return Err(GatewayError::InvalidPayload(format!(
                "probability {} / confidence {} outside 0..=1",
                self.probability, self.confidence
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("prediction service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("prediction service responded with status {status}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },
    #[error("prediction service returned an invalid payload: {0}")]
    InvalidPayload(String),
    #[error("unable to build prediction client: {0}")]
    Client(String),
}

/// Remote inference boundary so the service can be exercised without a live model.
pub trait PredictionGateway: Send + Sync {
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<RemotePrediction, GatewayError>> + Send;
}

/// Gateway posting JSON feature payloads to the Flask model services.
#[derive(Debug, Clone)]
pub struct HttpPredictionGateway {
    client: reqwest::Client,
    heart_url: String,
    diabetes_url: String,
    timeout: Duration,
}

impl HttpPredictionGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Client(err.to_string()))?;

        Ok(Self {
            client,
            heart_url: config.heart_url.clone(),
            diabetes_url: config.diabetes_url.clone(),
            timeout: config.timeout,
        })
    }

    fn url_for(&self, request: &PredictionRequest) -> &str {
        match request {
            PredictionRequest::Heart(_) => &self.heart_url,
            PredictionRequest::Diabetes(_) => &self.diabetes_url,
        }
    }

    fn map_transport(&self, url: &str, err: reqwest::Error) -> GatewayError {
        if err.is_connect() {
            GatewayError::ServiceUnavailable(format!("cannot connect to {url}"))
        } else if err.is_timeout() {
            GatewayError::ServiceUnavailable(format!(
                "no response from {url} within {}s",
                self.timeout.as_secs()
            ))
        } else {
            GatewayError::ServiceUnavailable(err.to_string())
        }
    }
}

impl PredictionGateway for HttpPredictionGateway {
    async fn predict(&self, request: &PredictionRequest) -> Result<RemotePrediction, GatewayError> {
        let url = self.url_for(request);
        let builder = match request {
            PredictionRequest::Heart(features) => self.client.post(url).json(features),
            PredictionRequest::Diabetes(features) => self.client.post(url).json(features),
        };

        let response = builder
            .send()
            .await
            .map_err(|err| self.map_transport(url, err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .json::<serde_json::Value>()
                .await
                .unwrap_or(serde_json::Value::Null);
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let prediction: RemotePrediction = response.json().await.map_err(|err| {
            if err.is_timeout() {
                self.map_transport(url, err)
            } else {
                GatewayError::InvalidPayload(err.to_string())
            }
        })?;
        prediction.check()?;
        Ok(prediction)
    }
}
