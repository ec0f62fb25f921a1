//! [`ReadingStore`] and [`AlertStore`] backed by PostgreSQL.

use async_trait::async_trait;
use vitalwatch_core::store::{AlertStore, ReadingStore, StoreError};
use vitalwatch_core::{Alert, Reading};

use crate::models::alert::UpsertAlert;
use crate::models::reading::UpsertReading;
use crate::repositories::{AlertRepo, ReadingRepo};
use crate::table::TableName;
use crate::DbPool;

/// Reading store writing to one table through a shared pool.
#[derive(Debug, Clone)]
pub struct PgReadingStore {
    pool: DbPool,
    table: TableName,
}

impl PgReadingStore {
    pub fn new(pool: DbPool, table: TableName) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    fn name(&self) -> &str {
        self.table.as_str()
    }

    async fn put_reading(&self, reading: &Reading) -> Result<(), StoreError> {
        ReadingRepo::upsert(&self.pool, &self.table, &UpsertReading::from(reading))
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

/// Alert store writing to one table through a shared pool.
#[derive(Debug, Clone)]
pub struct PgAlertStore {
    pool: DbPool,
    table: TableName,
}

impl PgAlertStore {
    pub fn new(pool: DbPool, table: TableName) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl AlertStore for PgAlertStore {
    fn name(&self) -> &str {
        self.table.as_str()
    }

    async fn put_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        AlertRepo::upsert(&self.pool, &self.table, &UpsertAlert::from(alert))
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

/// Classify a sqlx error as a refused write or an unreachable backend.
///
/// - Errors raised by the database itself (constraint, permission, missing
///   table) are rejections.
/// - Everything else (pool timeout, I/O, TLS, protocol) means the store
///   was unavailable.
fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Rejected(db_err.to_string()),
        other => StoreError::Unavailable(other.to_string()),
    }
}
