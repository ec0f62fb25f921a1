//! Fixed-threshold risk classification for vital signs.
//!
//! Pure logic. Rules are evaluated in priority order and the first match
//! wins: any critical condition beats any warning condition. Inputs are not
//! checked for physiological plausibility.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Heart rate strictly above this is critical.
pub const HR_CRITICAL_ABOVE: f64 = 140.0;
/// Heart rate strictly above this (and not critical) is a warning.
pub const HR_WARNING_ABOVE: f64 = 120.0;

/// Oxygen saturation strictly below this is critical.
pub const SPO2_CRITICAL_BELOW: f64 = 86.0;
/// Oxygen saturation strictly below this (and not critical) is a warning.
pub const SPO2_WARNING_BELOW: f64 = 92.0;

/// Systolic blood pressure strictly above this is critical.
pub const BP_SYS_CRITICAL_ABOVE: f64 = 180.0;
/// Systolic blood pressure strictly above this (and not critical) is a warning.
pub const BP_SYS_WARNING_ABOVE: f64 = 160.0;

/// Clinical risk tier of a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Normal,
    Warning,
    Critical,
}

impl RiskTier {
    /// Lowercase label used in storage and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Normal => "normal",
            RiskTier::Warning => "warning",
            RiskTier::Critical => "critical",
        }
    }

    /// Uppercase label used in human-facing alert text.
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Normal => "NORMAL",
            RiskTier::Warning => "WARNING",
            RiskTier::Critical => "CRITICAL",
        }
    }

    pub fn is_critical(self) -> bool {
        self == RiskTier::Critical
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a (heart rate, SpO2, systolic BP) triple.
///
/// Total over all `f64` inputs. NaN fails every comparison and therefore
/// lands in [`RiskTier::Normal`]; the record decoder never produces NaN.
pub fn classify(heart_rate: f64, spo2: f64, bp_systolic: f64) -> RiskTier {
    if heart_rate > HR_CRITICAL_ABOVE
        || spo2 < SPO2_CRITICAL_BELOW
        || bp_systolic > BP_SYS_CRITICAL_ABOVE
    {
        RiskTier::Critical
    } else if (heart_rate > HR_WARNING_ABOVE && heart_rate <= HR_CRITICAL_ABOVE)
        || (spo2 >= SPO2_CRITICAL_BELOW && spo2 < SPO2_WARNING_BELOW)
        || (bp_systolic > BP_SYS_WARNING_ABOVE && bp_systolic <= BP_SYS_CRITICAL_ABOVE)
    {
        RiskTier::Warning
    } else {
        RiskTier::Normal
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const CALM_SPO2: f64 = 98.0;
    const CALM_BP: f64 = 120.0;
    const CALM_HR: f64 = 80.0;

    #[test]
    fn calm_vitals_are_normal() {
        assert_eq!(classify(CALM_HR, CALM_SPO2, CALM_BP), RiskTier::Normal);
        assert_eq!(classify(95.0, 97.0, 118.0), RiskTier::Normal);
    }

    #[test]
    fn heart_rate_boundaries() {
        assert_eq!(classify(120.0, CALM_SPO2, CALM_BP), RiskTier::Normal);
        assert_eq!(classify(120.01, CALM_SPO2, CALM_BP), RiskTier::Warning);
        assert_eq!(classify(140.0, CALM_SPO2, CALM_BP), RiskTier::Warning);
        assert_eq!(classify(140.0001, CALM_SPO2, CALM_BP), RiskTier::Critical);
        assert_eq!(classify(140.01, CALM_SPO2, CALM_BP), RiskTier::Critical);
    }

    #[test]
    fn spo2_boundaries() {
        assert_eq!(classify(CALM_HR, 92.0, CALM_BP), RiskTier::Normal);
        assert_eq!(classify(CALM_HR, 91.99, CALM_BP), RiskTier::Warning);
        assert_eq!(classify(CALM_HR, 86.0, CALM_BP), RiskTier::Warning);
        assert_eq!(classify(CALM_HR, 85.999, CALM_BP), RiskTier::Critical);
    }

    #[test]
    fn systolic_boundaries() {
        assert_eq!(classify(CALM_HR, CALM_SPO2, 160.0), RiskTier::Normal);
        assert_eq!(classify(CALM_HR, CALM_SPO2, 160.01), RiskTier::Warning);
        assert_eq!(classify(CALM_HR, CALM_SPO2, 180.0), RiskTier::Warning);
        assert_eq!(classify(CALM_HR, CALM_SPO2, 180.0001), RiskTier::Critical);
    }

    #[test]
    fn critical_takes_precedence_over_warning() {
        // hr critical, spo2 in the warning band.
        assert_eq!(classify(150.0, 94.0, 100.0), RiskTier::Critical);
        assert_eq!(classify(150.0, 90.0, 170.0), RiskTier::Critical);
        // bp critical, hr in the warning band.
        assert_eq!(classify(130.0, CALM_SPO2, 200.0), RiskTier::Critical);
    }

    #[test]
    fn out_of_range_inputs_still_classify() {
        assert_eq!(classify(-10.0, CALM_SPO2, CALM_BP), RiskTier::Normal);
        assert_eq!(classify(CALM_HR, -1.0, CALM_BP), RiskTier::Critical);
        assert_eq!(classify(f64::INFINITY, CALM_SPO2, CALM_BP), RiskTier::Critical);
        assert_eq!(classify(f64::NAN, f64::NAN, f64::NAN), RiskTier::Normal);
    }

    #[test]
    fn classification_is_deterministic() {
        let samples = [
            (95.0, 97.0, 118.0),
            (130.0, 90.0, 170.0),
            (150.0, 80.0, 190.0),
            (0.0, 0.0, 0.0),
            (-5.5, 200.0, 1e9),
        ];
        for (hr, spo2, bp) in samples {
            let first = classify(hr, spo2, bp);
            for _ in 0..10 {
                assert_eq!(classify(hr, spo2, bp), first);
            }
        }
    }

    #[test]
    fn tier_labels() {
        assert_eq!(RiskTier::Critical.as_str(), "critical");
        assert_eq!(RiskTier::Critical.label(), "CRITICAL");
        assert_eq!(RiskTier::Warning.to_string(), "warning");
        assert_eq!(
            serde_json::to_string(&RiskTier::Normal).unwrap(),
            "\"normal\""
        );
    }
}
