//! Validation warnings and structural errors
//!
//! Neither kind is ever thrown. Both are collected in call order and
//! returned inside the calculation result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Out-of-range or ineligible selection; the calculation proceeds with the
/// nearest valid value
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Adjustment factor outside 0.0..=1.0
    #[error("adjustment factor {requested} is outside 0-1, using {applied}")]
    FactorClamped { requested: Decimal, applied: Decimal },

    /// Device carries no leasing figures
    #[error("device {device} has no leasing bounds, leasing cost is 0")]
    MissingLeasingBounds { device: String },

    /// Tariff table exists but has no row for the chosen duration
    #[error("no leasing tariff for {months} months, using linear leasing bounds")]
    TariffRowMissing { months: u32 },

    /// Flatrate requested below the leasing eligibility threshold
    #[error("flatrate requires an adjustment factor of at least {threshold} when leasing (got {factor}), using pay-per-use")]
    FlatrateIneligible { factor: Decimal, threshold: Decimal },

    /// Flatrate requested for a device without consumables
    #[error("device does not use consumables, flatrate selection ignored")]
    FlatrateNotApplicable,

    /// Negative usage volume
    #[error("usage of {requested} per day is negative, using 0")]
    UsageClamped { requested: Decimal },

    /// Usage above the daily capacity ceiling
    #[error("usage of {uses_per_day} per day exceeds the daily capacity of {capacity}")]
    UsageImplausible { uses_per_day: Decimal, capacity: Decimal },

    /// Working days outside 1..=31
    #[error("{requested} working days per month is out of range, using {applied}")]
    WorkingDaysOutOfRange { requested: u32, applied: u32 },

    /// No unit price in inputs or on the device
    #[error("no price per treatment given and the device has no default, revenue is 0")]
    MissingUnitPrice,

    /// Unit price zero or negative
    #[error("price per treatment {price} is not positive, revenue is 0")]
    NonPositiveUnitPrice { price: Decimal },

    /// All-inclusive model without a strategic figure on the device
    #[error("device has no all-inclusive leasing figure, using the computed leasing cost")]
    StrategicFigureMissing,

    /// Insurance requested without a premium on the device
    #[error("insurance requested but the device has no insurance premium")]
    InsuranceUnavailable,
}

/// Problem that makes the result meaningless; numeric fields are zeroed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralError {
    /// No device in the inputs
    #[error("no device selected")]
    MissingDevice,

    /// Device base price zero or negative
    #[error("device {device} has a non-positive price ({price})")]
    NonPositivePrice { device: String, price: Decimal },

    /// Leasing bounds or tariff row malformed
    #[error("device {device} has a malformed leasing tariff{}: {reason}", .months.map(|m| format!(" for {} months", m)).unwrap_or_default())]
    MalformedTariff {
        device: String,
        months: Option<u32>,
        reason: String,
    },

    /// Consumable profile malformed
    #[error("device {device} has malformed consumable pricing: {reason}")]
    MalformedConsumables { device: String, reason: String },

    /// Device daily capacity zero or negative
    #[error("device {device} has a non-positive daily capacity ({capacity})")]
    NonPositiveCapacity { device: String, capacity: Decimal },

    /// Figure too large for the monthly and yearly money arithmetic
    #[error("{field} of {value} exceeds the supported magnitude of {limit}")]
    OutOfRange {
        field: String,
        value: Decimal,
        limit: Decimal,
    },
}

/// Ordered, de-duplicated collector for one calculation call
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<ValidationWarning>,
    errors: Vec<StructuralError>,
}

impl Diagnostics {
    /// Create empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning (once per call)
    pub fn warn(&mut self, warning: ValidationWarning) {
        if self.warnings.contains(&warning) {
            return;
        }
        tracing::warn!(%warning, "Validation warning");
        self.warnings.push(warning);
    }

    /// Record a structural error (once per call)
    pub fn error(&mut self, error: StructuralError) {
        if self.errors.contains(&error) {
            return;
        }
        tracing::warn!(%error, "Structural error");
        self.errors.push(error);
    }

    /// Whether any structural error was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Warnings so far
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Errors so far
    pub fn errors(&self) -> &[StructuralError] {
        &self.errors
    }

    /// Split into (warnings, errors)
    pub fn into_parts(self) -> (Vec<ValidationWarning>, Vec<StructuralError>) {
        (self.warnings, self.errors)
    }
}
