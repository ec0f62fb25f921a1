//! Vital reading rows and insert DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitalwatch_core::types::Timestamp;
use vitalwatch_core::Reading;

/// A row from a readings table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VitalReadingRow {
    pub patient_id: String,
    pub recorded_at: Timestamp,
    pub heart_rate: f64,
    pub spo2: f64,
    pub bp_systolic: f64,
    pub tier: String,
    pub created_at: Timestamp,
}

/// DTO for upserting a classified reading.
#[derive(Debug, Clone)]
pub struct UpsertReading<'a> {
    pub patient_id: &'a str,
    pub recorded_at: Timestamp,
    pub heart_rate: f64,
    pub spo2: f64,
    pub bp_systolic: f64,
    pub tier: &'static str,
}

impl<'a> From<&'a Reading> for UpsertReading<'a> {
    fn from(reading: &'a Reading) -> Self {
        Self {
            patient_id: reading.patient_id(),
            recorded_at: reading.recorded_at(),
            heart_rate: reading.heart_rate(),
            spo2: reading.spo2(),
            bp_systolic: reading.bp_systolic(),
            tier: reading.tier().as_str(),
        }
    }
}
