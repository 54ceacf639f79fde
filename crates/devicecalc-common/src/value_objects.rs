//! Value Objects - Immutable domain primitives with validation

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CalcError;

/// Device identifier (Value Object)
///
/// # Invariants
/// - Must be non-empty
/// - Max 64 characters
/// - Alphanumeric with hyphens and underscores only
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Create new device ID with validation
    pub fn new(id: impl Into<String>) -> Result<Self, CalcError> {
        let id = id.into();

        if id.is_empty() {
            return Err(CalcError::InvalidDeviceId("cannot be empty".into()));
        }
        if id.len() > 64 {
            return Err(CalcError::InvalidDeviceId("max 64 characters".into()));
        }
        if !id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
            return Err(CalcError::InvalidDeviceId(format!("'{}' is not alphanumeric", id)));
        }

        Ok(Self(id))
    }

    /// Get inner value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceId {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Leasing adjustment factor (Value Object)
///
/// Position of the leasing slider between the device's minimum (0.0)
/// and maximum (1.0) leasing rate.
///
/// # Invariants
/// - Range: 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjustmentFactor(Decimal);

impl AdjustmentFactor {
    /// Create factor with validation
    pub fn new(value: Decimal) -> Result<Self, CalcError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(CalcError::InvalidFactor(format!(
                "must be 0.0-1.0, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Create factor clamping to valid range
    pub fn clamped(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE))
    }

    /// Get value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Slider at the minimum leasing rate
    pub const fn minimum() -> Self {
        Self(Decimal::ZERO)
    }

    /// Slider at the standard leasing rate
    pub fn standard() -> Self {
        Self(dec!(0.5))
    }

    /// Slider at the maximum leasing rate
    pub const fn maximum() -> Self {
        Self(Decimal::ONE)
    }

    /// Remaining distance to the maximum (1.0 - factor)
    pub fn complement(&self) -> Decimal {
        Decimal::ONE - self.0
    }
}

impl Default for AdjustmentFactor {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for AdjustmentFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_id_validation() {
        assert!(DeviceId::new("emsculpt-neo").is_ok());
        assert!(DeviceId::new("").is_err());
        assert!(DeviceId::new("a".repeat(65)).is_err());
        assert!(DeviceId::new("with space").is_err());
    }

    #[test]
    fn test_device_id_serde_rejects_invalid() {
        let ok: Result<DeviceId, _> = serde_json::from_str("\"laser_01\"");
        assert!(ok.is_ok());
        let bad: Result<DeviceId, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_factor_bounds() {
        assert!(AdjustmentFactor::new(dec!(0.3)).is_ok());
        assert!(AdjustmentFactor::new(dec!(1.01)).is_err());
        assert!(AdjustmentFactor::new(dec!(-0.1)).is_err());
    }

    #[test]
    fn test_factor_clamping() {
        assert_eq!(AdjustmentFactor::clamped(dec!(1.7)), AdjustmentFactor::maximum());
        assert_eq!(AdjustmentFactor::clamped(dec!(-2)), AdjustmentFactor::minimum());
        assert_eq!(AdjustmentFactor::clamped(dec!(0.42)).value(), dec!(0.42));
        assert_eq!(AdjustmentFactor::clamped(dec!(0.25)).complement(), dec!(0.75));
    }
}
