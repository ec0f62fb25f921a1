//! PostgreSQL persistence for readings and alerts.
//!
//! Store names from configuration map to table names (see [`TableName`]).
//! Tables are created on startup by [`ensure_schema`] if they do not exist.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;
pub mod table;

pub use store::{PgAlertStore, PgReadingStore};
pub use table::TableName;

pub type DbPool = sqlx::PgPool;

/// Upper bound on waiting for a pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the reading and alert tables if they are missing.
pub async fn ensure_schema(
    pool: &DbPool,
    readings: &TableName,
    alerts: &TableName,
) -> Result<(), sqlx::Error> {
    repositories::ReadingRepo::create_table(pool, readings).await?;
    repositories::AlertRepo::create_table(pool, alerts).await?;
    tracing::info!(readings = %readings, alerts = %alerts, "Schema ensured");
    Ok(())
}
