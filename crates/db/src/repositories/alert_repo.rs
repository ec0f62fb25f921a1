//! Repository for alert history tables.

use sqlx::PgPool;

use crate::models::alert::{UpsertAlert, VitalAlertRow};
use crate::table::TableName;

const COLUMNS: &str = "patient_id, recorded_at, tier, alert_msg, created_at";

const INSERT_COLUMNS: &str = "patient_id, recorded_at, tier, alert_msg";

/// Provides write operations for alert history.
pub struct AlertRepo;

impl AlertRepo {
    /// Create `table` if it does not exist, keyed by `(patient_id, recorded_at)`.
    pub async fn create_table(pool: &PgPool, table: &TableName) -> Result<(), sqlx::Error> {
        let query = create_table_sql(table);
        sqlx::query(&query).execute(pool).await?;
        Ok(())
    }

    /// Insert an alert, overwriting any existing row with the same key.
    pub async fn upsert(
        pool: &PgPool,
        table: &TableName,
        alert: &UpsertAlert<'_>,
    ) -> Result<VitalAlertRow, sqlx::Error> {
        let query = upsert_sql(table);
        sqlx::query_as::<_, VitalAlertRow>(&query)
            .bind(alert.patient_id)
            .bind(alert.recorded_at)
            .bind(alert.tier)
            .bind(alert.alert_msg)
            .fetch_one(pool)
            .await
    }
}

fn create_table_sql(table: &TableName) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} ( \
            patient_id TEXT NOT NULL, \
            recorded_at TIMESTAMPTZ NOT NULL, \
            tier TEXT NOT NULL, \
            alert_msg TEXT NOT NULL, \
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(), \
            PRIMARY KEY (patient_id, recorded_at) \
         )"
    )
}

fn upsert_sql(table: &TableName) -> String {
    format!(
        "INSERT INTO {table} ({INSERT_COLUMNS}) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (patient_id, recorded_at) DO UPDATE SET \
            tier = EXCLUDED.tier, \
            alert_msg = EXCLUDED.alert_msg \
         RETURNING {COLUMNS}"
    )
}
