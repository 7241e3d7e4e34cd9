//! Scoring Module - hosted inference endpoint
//!
//! The detector only sees [`ScoringClient`]; the HTTP implementation
//! lives in `client.rs` and tests substitute their own.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpScoringClient;

/// Content type of the feature payload
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Scoring collaborator errors
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Transport failure, timeout or non-success status
    #[error("scoring endpoint unavailable: {0}")]
    Unavailable(String),

    /// Response body is not a single JSON number
    #[error("malformed scoring response: {0}")]
    Malformed(String),
}

/// Something that turns a CSV feature row into a phishing score
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// Score one `text/csv` feature row
    async fn score(&self, payload: &str) -> Result<f64, ScoringError>;
}

/// Decode a response body as UTF-8 and parse it as a bare JSON number
pub fn parse_score(body: &[u8]) -> Result<f64, ScoringError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| ScoringError::Malformed(format!("body is not UTF-8: {}", e)))?;

    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| ScoringError::Malformed(format!("body is not JSON: {}", e)))?;

    value.as_f64()
        .ok_or_else(|| ScoringError::Malformed(format!("expected a number, got {}", value)))
}
