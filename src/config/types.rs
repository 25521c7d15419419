//! Settings types for the payroll engine.
//!
//! This module contains the strongly-typed settings structure that is
//! deserialized from the YAML settings file.

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

/// How monetary values are rounded to the currency's minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero (commercial rounding). The default.
    HalfUp,
    /// Round half to even (banker's rounding).
    Bankers,
    /// Drop digits beyond the precision (matches fixed-point truncation).
    Truncate,
}

impl RoundingMode {
    /// Maps the setting to the corresponding `rust_decimal` strategy.
    pub fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Bankers => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Truncate => RoundingStrategy::ToZero,
        }
    }
}

/// Engine-wide settings for payroll computation.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{PayrollSettings, RoundingMode};
///
/// let settings = PayrollSettings::default();
/// assert_eq!(settings.currency_precision, 2);
/// assert_eq!(settings.rounding, RoundingMode::HalfUp);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Number of minor-unit decimal places for monetary values.
    #[serde(default = "default_currency_precision")]
    pub currency_precision: u32,
    /// How monetary values are rounded to that precision.
    #[serde(default = "default_rounding")]
    pub rounding: RoundingMode,
    /// Prefix for generated payment references.
    #[serde(default = "default_payment_reference_prefix")]
    pub payment_reference_prefix: String,
}

fn default_currency_precision() -> u32 {
    2
}

fn default_rounding() -> RoundingMode {
    RoundingMode::HalfUp
}

fn default_payment_reference_prefix() -> String {
    "PAY".to_string()
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            currency_precision: default_currency_precision(),
            rounding: default_rounding(),
            payment_reference_prefix: default_payment_reference_prefix(),
        }
    }
}
