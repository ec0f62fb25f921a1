//! Vital-sign readings.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::risk::{classify, RiskTier};
use crate::types::Timestamp;

/// The three vitals that drive classification, plus the patient they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VitalSigns {
    /// Opaque identifier; must contain at least one non-whitespace character.
    #[validate(custom(function = "validate_patient_id"))]
    pub patient_id: String,
    /// Beats per minute.
    pub heart_rate: f64,
    /// Oxygen saturation, percent.
    pub spo2: f64,
    /// Systolic blood pressure, mmHg.
    pub bp_systolic: f64,
}

/// Stricter than the wire format, which only asks for a string: a
/// whitespace-only id cannot be attributed to a patient and is rejected.
fn validate_patient_id(patient_id: &str) -> Result<(), ValidationError> {
    if patient_id.trim().is_empty() {
        return Err(ValidationError::new("blank_patient_id"));
    }
    Ok(())
}

/// A classified reading.
///
/// Only constructible through [`Reading::classify`], so the tier always
/// matches the vitals it was computed from. Fields are read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    #[serde(flatten)]
    vitals: VitalSigns,
    /// Processing time at which the pipeline handled the record. Sensor time
    /// is not carried by the stream payload.
    recorded_at: Timestamp,
    tier: RiskTier,
}

impl Reading {
    /// Classify `vitals` and stamp the result with `recorded_at`.
    pub fn classify(vitals: VitalSigns, recorded_at: Timestamp) -> Self {
        let tier = classify(vitals.heart_rate, vitals.spo2, vitals.bp_systolic);
        Self {
            vitals,
            recorded_at,
            tier,
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.vitals.patient_id
    }

    pub fn heart_rate(&self) -> f64 {
        self.vitals.heart_rate
    }

    pub fn spo2(&self) -> f64 {
        self.vitals.spo2
    }

    pub fn bp_systolic(&self) -> f64 {
        self.vitals.bp_systolic
    }

    pub fn recorded_at(&self) -> Timestamp {
        self.recorded_at
    }

    pub fn tier(&self) -> RiskTier {
        self.tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vitals(hr: f64, spo2: f64, bp: f64) -> VitalSigns {
        VitalSigns {
            patient_id: "P1".to_string(),
            heart_rate: hr,
            spo2,
            bp_systolic: bp,
        }
    }

    #[test]
    fn classify_sets_tier_from_vitals() {
        let now = Utc::now();
        let reading = Reading::classify(vitals(95.0, 97.0, 118.0), now);
        assert_eq!(reading.tier(), RiskTier::Normal);
        assert_eq!(reading.patient_id(), "P1");
        assert_eq!(reading.recorded_at(), now);

        let reading = Reading::classify(vitals(150.0, 80.0, 190.0), now);
        assert_eq!(reading.tier(), RiskTier::Critical);
    }

    #[test]
    fn blank_patient_id_fails_validation() {
        let mut v = vitals(95.0, 97.0, 118.0);
        assert!(v.validate().is_ok());
        v.patient_id = "   ".to_string();
        assert!(v.validate().is_err());
        v.patient_id = String::new();
        assert!(v.validate().is_err());
    }

    #[test]
    fn serializes_flat_with_tier() {
        let reading = Reading::classify(vitals(130.0, 97.0, 118.0), Utc::now());
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["patient_id"], "P1");
        assert_eq!(json["heart_rate"], 130.0);
        assert_eq!(json["tier"], "warning");
        assert!(json["recorded_at"].is_string());
    }
}
