//! Alert history rows and insert DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitalwatch_core::types::Timestamp;
use vitalwatch_core::Alert;

/// A row from an alerts table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VitalAlertRow {
    pub patient_id: String,
    pub recorded_at: Timestamp,
    pub tier: String,
    pub alert_msg: String,
    pub created_at: Timestamp,
}

/// DTO for upserting an alert.
#[derive(Debug, Clone)]
pub struct UpsertAlert<'a> {
    pub patient_id: &'a str,
    pub recorded_at: Timestamp,
    pub tier: &'static str,
    pub alert_msg: &'a str,
}

impl<'a> From<&'a Alert> for UpsertAlert<'a> {
    fn from(alert: &'a Alert) -> Self {
        Self {
            patient_id: &alert.patient_id,
            recorded_at: alert.recorded_at,
            tier: alert.tier.as_str(),
            alert_msg: &alert.message,
        }
    }
}
