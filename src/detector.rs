//! Detector - URL classification pipeline
//!
//! ```text
//! event ──► url ──► features::extract ──► ScoringClient ──► classify
//!                                                              │
//!                        response ◄── PredictionStore::put ◄───┘
//! ```
//!
//! Straight-line and stateless per call. The record is written before the
//! response is built, so a storage failure fails the whole request.

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::features;
use crate::models::{DetectResponse, InvocationResponse, Label, PredictionRecord, PHISHING_THRESHOLD};
use crate::scoring::{ScoringClient, ScoringError};
use crate::store::{PredictionStore, StoreError};

/// Per-invocation failures
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("scoring unavailable: {0}")]
    ScoringUnavailable(String),

    #[error("malformed scoring response: {0}")]
    ScoringResponseMalformed(String),

    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl DetectionError {
    pub fn status_code(&self) -> u16 {
        match self {
            DetectionError::InvalidInput(_) => 400,
            DetectionError::ScoringUnavailable(_) => 502,
            DetectionError::ScoringResponseMalformed(_) => 502,
            DetectionError::StorageFailure(_) => 500,
        }
    }

    /// Message safe to hand back to callers; collaborator details stay in logs
    pub fn public_message(&self) -> &str {
        match self {
            DetectionError::InvalidInput(msg) => msg,
            DetectionError::ScoringUnavailable(_) | DetectionError::ScoringResponseMalformed(_) => {
                "Scoring service error"
            }
            DetectionError::StorageFailure(_) => "Database error occurred",
        }
    }
}

/// Invocation envelope for a failed request
pub fn error_envelope(err: &DetectionError) -> InvocationResponse {
    let status = err.status_code();
    InvocationResponse {
        status_code: status,
        body: json!({ "error": err.public_message(), "status": status }).to_string(),
    }
}

impl From<ScoringError> for DetectionError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::Unavailable(msg) => DetectionError::ScoringUnavailable(msg),
            ScoringError::Malformed(msg) => DetectionError::ScoringResponseMalformed(msg),
        }
    }
}

impl From<StoreError> for DetectionError {
    fn from(err: StoreError) -> Self {
        DetectionError::StorageFailure(err.to_string())
    }
}

/// Label for a score: strictly greater than the threshold is phishing
pub fn classify(score: f64) -> Label {
    if score > PHISHING_THRESHOLD {
        Label::Phishing
    } else {
        Label::Legit
    }
}

/// Round to two decimals, ties resolved on the exact binary value
pub fn round_confidence(score: f64) -> f64 {
    format!("{:.2}", score).parse().unwrap_or(score)
}

/// Pull `url` out of an invocation event
pub fn event_url(event: &Value) -> Result<&str, DetectionError> {
    match event.get("url") {
        Some(Value::String(url)) => Ok(url),
        Some(other) => Err(DetectionError::InvalidInput(format!(
            "url must be a string, got {}",
            other
        ))),
        None => Err(DetectionError::InvalidInput("url is required".to_string())),
    }
}

/// Classification pipeline over injected collaborators
pub struct Detector {
    scorer: Arc<dyn ScoringClient>,
    store: Arc<dyn PredictionStore>,
}

impl Detector {
    pub fn new(scorer: Arc<dyn ScoringClient>, store: Arc<dyn PredictionStore>) -> Self {
        Self { scorer, store }
    }

    /// Score, classify and persist one URL
    pub async fn detect(&self, url: &str) -> Result<DetectResponse, DetectionError> {
        let span = tracing::info_span!("detect", request_id = %Uuid::new_v4());
        self.run(url).instrument(span).await
    }

    async fn run(&self, url: &str) -> Result<DetectResponse, DetectionError> {
        let vector = features::extract(url);
        tracing::debug!(features = %vector.to_log_entry(), "Extracted features");

        let score = self.scorer.score(&vector.to_csv()).await.map_err(|e| {
            tracing::warn!("Scoring failed for {}: {}", url, e);
            DetectionError::from(e)
        })?;

        let prediction = classify(score);
        let record = PredictionRecord::new(url, prediction, score);

        self.store.put(&record).await.map_err(|e| {
            tracing::error!("Failed to store prediction for {}: {}", url, e);
            DetectionError::from(e)
        })?;

        tracing::info!("{} classified as {} (score {:.4})", url, prediction, score);

        Ok(DetectResponse {
            url: url.to_string(),
            prediction,
            confidence: round_confidence(score),
        })
    }

    /// Handle a raw invocation event, always producing an envelope
    pub async fn handle_event(&self, event: &Value) -> InvocationResponse {
        let outcome = match event_url(event) {
            Ok(url) => self.detect(url).await,
            Err(e) => {
                tracing::warn!("Rejected event: {}", e);
                Err(e)
            }
        };

        match outcome {
            Ok(result) => InvocationResponse {
                status_code: 200,
                body: json!({
                    "url": result.url,
                    "prediction": result.prediction,
                    "confidence": result.confidence,
                })
                .to_string(),
            },
            Err(e) => error_envelope(&e),
        }
    }
}
