//! Prediction model

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Scores strictly above this are phishing; exactly 0.5 is legit
pub const PHISHING_THRESHOLD: f64 = 0.5;

/// Classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Phishing,
    Legit,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Phishing => "phishing",
            Label::Legit => "legit",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted outcome of one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub url: String,
    pub prediction: Label,
    pub score: f64,
    /// Naive UTC, microsecond precision
    pub timestamp: NaiveDateTime,
}

impl PredictionRecord {
    /// Build a record stamped with the current UTC time
    pub fn new(url: &str, prediction: Label, score: f64) -> Self {
        Self {
            url: url.to_string(),
            prediction,
            score,
            timestamp: Utc::now().naive_utc().trunc_subsecs(6),
        }
    }

    /// ISO-8601 without offset, e.g. `2024-03-01T12:30:05.123456`
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }

    /// Insert into `table`, which must already be a quoted identifier
    pub async fn insert(&self, pool: &PgPool, table: &str) -> Result<(), sqlx::Error> {
        sqlx::query(&insert_sql(table))
            .bind(&self.url)
            .bind(self.prediction.as_str())
            .bind(self.score)
            .bind(self.timestamp)
            .execute(pool)
            .await?;

        Ok(())
    }
}

fn insert_sql(table: &str) -> String {
    format!(
        "INSERT INTO {} (url, prediction, score, timestamp) VALUES ($1, $2, $3, $4)",
        table
    )
}

/// Detection result, also the invocation response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    pub url: String,
    pub prediction: Label,
    /// Score rounded to two decimals
    pub confidence: f64,
}

/// Invocation-style envelope: status plus a JSON-encoded body string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}
