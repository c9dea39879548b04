//! Health factor classification.

use loanscope_config::RiskThresholds;
use serde::{Deserialize, Serialize};

/// Classification of a loan's health factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Health factor is NaN or not positive; the inputs cannot be trusted.
    Invalid,
    /// Below the danger threshold; liquidation is close or already possible.
    Danger,
    /// Below the alert threshold.
    Warning,
    /// At or above the alert threshold, including debt-free (+∞).
    Safe,
}

impl HealthStatus {
    /// Classifies a health factor against `thresholds`.
    #[must_use]
    pub fn classify(health_factor: f64, thresholds: &RiskThresholds) -> Self {
        if health_factor.is_nan() || health_factor <= 0.0 {
            Self::Invalid
        } else if health_factor < thresholds.danger_health_factor {
            Self::Danger
        } else if health_factor < thresholds.alert_health_factor {
            Self::Warning
        } else {
            Self::Safe
        }
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::Danger => "Danger",
            Self::Warning => "Warning",
            Self::Safe => "Safe",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let t = RiskThresholds::default();
        assert_eq!(HealthStatus::classify(f64::NAN, &t), HealthStatus::Invalid);
        assert_eq!(HealthStatus::classify(0.0, &t), HealthStatus::Invalid);
        assert_eq!(HealthStatus::classify(-1.0, &t), HealthStatus::Invalid);
        assert_eq!(HealthStatus::classify(0.95, &t), HealthStatus::Danger);
        assert_eq!(HealthStatus::classify(1.2, &t), HealthStatus::Warning);
        assert_eq!(HealthStatus::classify(1.5, &t), HealthStatus::Safe);
        assert_eq!(HealthStatus::classify(f64::INFINITY, &t), HealthStatus::Safe);
    }

    #[test]
    fn test_display() {
        assert_eq!(HealthStatus::Warning.to_string(), "Warning");
    }
}
