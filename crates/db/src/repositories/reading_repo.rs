//! Repository for readings tables.
//!
//! The table name is configurable, so queries are assembled at runtime from
//! a validated [`TableName`].

use sqlx::PgPool;

use crate::models::reading::{UpsertReading, VitalReadingRow};
use crate::table::TableName;

/// Column list for SELECT/RETURNING clauses.
const COLUMNS: &str =
    "patient_id, recorded_at, heart_rate, spo2, bp_systolic, tier, created_at";

/// Column list for INSERT statements (excludes `created_at`).
const INSERT_COLUMNS: &str = "patient_id, recorded_at, heart_rate, spo2, bp_systolic, tier";

/// Provides write operations for vital readings.
pub struct ReadingRepo;

impl ReadingRepo {
    /// Create `table` if it does not exist, keyed by `(patient_id, recorded_at)`.
    pub async fn create_table(pool: &PgPool, table: &TableName) -> Result<(), sqlx::Error> {
        let query = create_table_sql(table);
        sqlx::query(&query).execute(pool).await?;
        Ok(())
    }

    /// Insert a reading, overwriting any existing row with the same key.
    pub async fn upsert(
        pool: &PgPool,
        table: &TableName,
        reading: &UpsertReading<'_>,
    ) -> Result<VitalReadingRow, sqlx::Error> {
        let query = upsert_sql(table);
        sqlx::query_as::<_, VitalReadingRow>(&query)
            .bind(reading.patient_id)
            .bind(reading.recorded_at)
            .bind(reading.heart_rate)
            .bind(reading.spo2)
            .bind(reading.bp_systolic)
            .bind(reading.tier)
            .fetch_one(pool)
            .await
    }
}

fn create_table_sql(table: &TableName) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} ( \
            patient_id TEXT NOT NULL, \
            recorded_at TIMESTAMPTZ NOT NULL, \
            heart_rate DOUBLE PRECISION NOT NULL, \
            spo2 DOUBLE PRECISION NOT NULL, \
            bp_systolic DOUBLE PRECISION NOT NULL, \
            tier TEXT NOT NULL, \
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(), \
            PRIMARY KEY (patient_id, recorded_at) \
         )"
    )
}

fn upsert_sql(table: &TableName) -> String {
    format!(
        "INSERT INTO {table} ({INSERT_COLUMNS}) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (patient_id, recorded_at) DO UPDATE SET \
            heart_rate = EXCLUDED.heart_rate, \
            spo2 = EXCLUDED.spo2, \
            bp_systolic = EXCLUDED.bp_systolic, \
            tier = EXCLUDED.tier \
         RETURNING {COLUMNS}"
    )
}
