//! Database module - PostgreSQL pool and prediction table schema

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

/// PostgreSQL identifier length limit
const MAX_IDENTIFIER_LEN: usize = 63;

/// Create database connection pool
pub async fn create_pool(database_url: &str, acquire_timeout: Duration) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid table name {0:?}: expected [A-Za-z_][A-Za-z0-9_]* up to 63 characters")]
pub struct InvalidTableName(pub String);

/// A configured table name, checked once and always emitted quoted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn parse(name: &str) -> Result<Self, InvalidTableName> {
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false);
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if valid_start && valid_rest && name.len() <= MAX_IDENTIFIER_LEN {
            Ok(Self(name.to_string()))
        } else {
            Err(InvalidTableName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form; keeps mixed case such as `PhishingDetections`
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

/// Create the prediction table if it does not exist
pub async fn ensure_table(pool: &PgPool, table: &TableName) -> Result<(), sqlx::Error> {
    sqlx::query(&schema_sql(table))
        .execute(pool)
        .await?;

    tracing::info!("Prediction table {} ready", table.as_str());
    Ok(())
}

fn schema_sql(table: &TableName) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    id BIGSERIAL PRIMARY KEY,
    url TEXT NOT NULL,
    prediction VARCHAR(16) NOT NULL,
    score DOUBLE PRECISION NOT NULL,
    timestamp TIMESTAMP NOT NULL
)"#,
        table.quoted()
    )
}
