//! Prediction store
//!
//! Insert-only persistence of [`PredictionRecord`]s.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::db::TableName;
use crate::models::PredictionRecord;

/// Storage collaborator errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("write timed out after {0:?}")]
    Timeout(Duration),
}

/// Something that can persist one prediction record
#[async_trait]
pub trait PredictionStore: Send + Sync {
    async fn put(&self, record: &PredictionRecord) -> Result<(), StoreError>;
}

/// PostgreSQL-backed store addressed by a configured table name
pub struct PgPredictionStore {
    pool: PgPool,
    table: TableName,
    timeout: Duration,
}

impl PgPredictionStore {
    pub fn new(pool: PgPool, table: TableName, timeout: Duration) -> Self {
        Self { pool, table, timeout }
    }

    /// Create the backing table if missing
    pub async fn ensure_table(&self) -> Result<(), sqlx::Error> {
        crate::db::ensure_table(&self.pool, &self.table).await
    }
}

#[async_trait]
impl PredictionStore for PgPredictionStore {
    async fn put(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        let table = self.table.quoted();

        tokio::time::timeout(self.timeout, record.insert(&self.pool, &table))
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))??;

        tracing::debug!("Stored prediction for {} in {}", record.url, self.table.as_str());
        Ok(())
    }
}
