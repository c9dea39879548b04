//! Advisory risk thresholds.
//!
//! These drive alert flags and status classification only. They are not
//! protocol constants: liquidation itself happens at a health factor of 1.

use crate::error::{Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Thresholds for alerts and health status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// A health factor below this raises an alert.
    pub alert_health_factor: f64,

    /// An LTV above `alert_ltv_fraction × liquidation threshold` raises an alert.
    pub alert_ltv_fraction: f64,

    /// A health factor below this is classified as danger.
    pub danger_health_factor: f64,

    /// Collateral price move used for the equity sensitivity figure.
    pub price_shock: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            alert_health_factor: 1.5,
            alert_ltv_fraction: 0.7,
            danger_health_factor: 1.1,
            price_shock: 0.10,
        }
    }
}

impl RiskThresholds {
    /// Sets the alert health factor.
    #[must_use]
    pub fn with_alert_health_factor(mut self, value: f64) -> Self {
        self.alert_health_factor = value;
        self
    }

    /// Sets the alert LTV fraction.
    #[must_use]
    pub fn with_alert_ltv_fraction(mut self, value: f64) -> Self {
        self.alert_ltv_fraction = value;
        self
    }

    /// Sets the danger health factor.
    #[must_use]
    pub fn with_danger_health_factor(mut self, value: f64) -> Self {
        self.danger_health_factor = value;
        self
    }

    /// Sets the price shock.
    #[must_use]
    pub fn with_price_shock(mut self, value: f64) -> Self {
        self.price_shock = value;
        self
    }
}

impl Validate for RiskThresholds {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let positive = [
            ("thresholds.alert_health_factor", self.alert_health_factor),
            ("thresholds.alert_ltv_fraction", self.alert_ltv_fraction),
            ("thresholds.danger_health_factor", self.danger_health_factor),
            ("thresholds.price_shock", self.price_shock),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ValidationError::new(field, "must be a positive number"));
            }
        }

        if self.danger_health_factor > self.alert_health_factor {
            errors.push(ValidationError::new(
                "thresholds.danger_health_factor",
                "must not exceed alert_health_factor",
            ));
        }

        errors
    }
}
