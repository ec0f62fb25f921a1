//! Critical-tier alerts derived from a single reading.

use serde::Serialize;

use crate::reading::Reading;
use crate::risk::RiskTier;
use crate::types::{format_timestamp, Timestamp};

/// An alert raised for one critical [`Reading`].
///
/// Shares the reading's `(patient_id, recorded_at)` key but lives in its own
/// store namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub patient_id: String,
    pub recorded_at: Timestamp,
    pub heart_rate: f64,
    pub spo2: f64,
    pub bp_systolic: f64,
    pub tier: RiskTier,
    /// Human-readable summary, also used as the notification body.
    pub message: String,
}

impl Alert {
    /// Build the alert for `reading`.
    ///
    /// Returns `None` unless the reading is critical.
    pub fn for_reading(reading: &Reading) -> Option<Self> {
        if !reading.tier().is_critical() {
            return None;
        }
        Some(Self {
            patient_id: reading.patient_id().to_string(),
            recorded_at: reading.recorded_at(),
            heart_rate: reading.heart_rate(),
            spo2: reading.spo2(),
            bp_systolic: reading.bp_systolic(),
            tier: reading.tier(),
            message: alert_message(reading),
        })
    }

    /// Subject line for the outbound notification.
    pub fn subject(&self) -> String {
        format!("{} HEALTH ALERT: Patient {}", self.tier.label(), self.patient_id)
    }
}

fn alert_message(reading: &Reading) -> String {
    format!(
        "🚨 [ALERT] Patient {patient} - {label}\n\
         Anomaly detected at {at}\n\
         Vitals: HR={hr}, SpO2={spo2}, BP={bp}\n\
         Risk Level: {label}",
        patient = reading.patient_id(),
        label = reading.tier().label(),
        at = format_timestamp(&reading.recorded_at()),
        hr = reading.heart_rate(),
        spo2 = reading.spo2(),
        bp = reading.bp_systolic(),
    )
}
