//! Leasing Cost Model
//!
//! Monthly leasing cost is a linear interpolation across the device's
//! min..max envelope. A tariff row for the chosen duration takes precedence
//! over the device-level bounds.

use devicecalc_common::{AdjustmentFactor, Device, LeasingBounds, Money, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::issues::{Diagnostics, ValidationWarning};

/// Leasing band the adjustment factor falls in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeasingTier {
    /// Below the standard threshold
    #[default]
    Minimum,
    /// From the standard threshold up to (excluding) 1.0
    Standard,
    /// Slider at 1.0
    Maximum,
}

impl LeasingTier {
    /// Classify a factor against the standard threshold
    pub fn from_factor(factor: AdjustmentFactor, standard_threshold: Rate) -> Self {
        if factor == AdjustmentFactor::maximum() {
            LeasingTier::Maximum
        } else if factor.value() >= standard_threshold {
            LeasingTier::Standard
        } else {
            LeasingTier::Minimum
        }
    }
}

/// Where the leasing envelope came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum BoundsSource {
    /// Tariff row for the chosen duration
    Tariff { months: u32 },
    /// Device-level linear bounds
    Linear,
    /// Device has no leasing figures
    #[default]
    Missing,
}

/// Leasing cost result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeasingCost {
    /// Monthly leasing cost
    pub monthly: Money,
    /// Factor actually applied after clamping
    pub factor: AdjustmentFactor,
    /// Band of the applied factor
    pub tier: LeasingTier,
    /// Leasing duration in months
    pub duration_months: u32,
    /// Envelope used for the interpolation
    pub bounds: Option<LeasingBounds>,
    /// Origin of the envelope
    pub source: BoundsSource,
    /// Monthly cost over the full duration
    pub contract_total: Money,
}

/// Leasing cost model
#[derive(Debug, Clone)]
pub struct LeasingCostModel {
    standard_threshold: Rate,
}

impl LeasingCostModel {
    /// Create model; `standard_threshold` is the factor where the standard band starts
    pub fn new(standard_threshold: Rate) -> Self {
        Self { standard_threshold }
    }

    /// `min + factor * (max - min)`, kept inside the envelope
    pub fn interpolate(bounds: &LeasingBounds, factor: AdjustmentFactor) -> Money {
        (bounds.min + factor.value() * bounds.spread()).clamp(bounds.min, bounds.max)
    }

    /// Pick the envelope for a duration: tariff row first, then linear bounds
    pub fn resolve_bounds(
        device: &Device,
        months: u32,
        diag: &mut Diagnostics,
    ) -> (Option<LeasingBounds>, BoundsSource) {
        if let Some(row) = device.tariff_for(months) {
            return (Some(*row), BoundsSource::Tariff { months });
        }
        if !device.tariffs.is_empty() {
            diag.warn(ValidationWarning::TariffRowMissing { months });
        }
        match device.leasing {
            Some(bounds) => (Some(bounds), BoundsSource::Linear),
            None => {
                diag.warn(ValidationWarning::MissingLeasingBounds {
                    device: device.id.to_string(),
                });
                (None, BoundsSource::Missing)
            }
        }
    }

    /// Reference leasing value for service tier pricing
    ///
    /// Standard rate of the tariff row at `reference_months`, else the
    /// standard rate of the linear bounds, else 0. Independent of the slider.
    pub fn reference_value(device: &Device, reference_months: u32) -> Money {
        device
            .tariff_for(reference_months)
            .or(device.leasing.as_ref())
            .map(|b| b.standard)
            .unwrap_or(Decimal::ZERO)
    }

    /// Calculate monthly leasing cost
    ///
    /// A factor outside 0..=1 is clamped and reported, never rejected.
    pub fn calculate(
        &self,
        device: &Device,
        months: u32,
        raw_factor: Decimal,
        diag: &mut Diagnostics,
    ) -> LeasingCost {
        let factor = AdjustmentFactor::clamped(raw_factor);
        if factor.value() != raw_factor {
            diag.warn(ValidationWarning::FactorClamped {
                requested: raw_factor,
                applied: factor.value(),
            });
        }

        let (bounds, source) = Self::resolve_bounds(device, months, diag);
        let monthly = bounds
            .as_ref()
            .map(|b| Self::interpolate(b, factor))
            .unwrap_or(Decimal::ZERO);

        tracing::debug!(
            device = %device.id,
            months,
            factor = %factor,
            %monthly,
            "Leasing cost"
        );

        LeasingCost {
            monthly,
            factor,
            tier: LeasingTier::from_factor(factor, self.standard_threshold),
            duration_months: months,
            bounds,
            source,
            contract_total: monthly * Decimal::from(months),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devicecalc_common::DeviceId;
    use rust_decimal_macros::dec;

    fn device() -> Device {
        let mut d = Device::new(DeviceId::new("laser").unwrap(), "Laser", dec!(500000));
        d.leasing = Some(LeasingBounds::new(dec!(10000), dec!(12500), dec!(15000)));
        d
    }

    #[test]
    fn test_linear_interpolation() {
        let model = LeasingCostModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();

        let low = model.calculate(&device(), 60, dec!(0), &mut diag);
        let mid = model.calculate(&device(), 60, dec!(0.5), &mut diag);
        let high = model.calculate(&device(), 60, dec!(1), &mut diag);

        assert_eq!(low.monthly, dec!(10000));
        assert_eq!(mid.monthly, dec!(12500));
        assert_eq!(high.monthly, dec!(15000));
        assert_eq!(mid.source, BoundsSource::Linear);
        assert_eq!(mid.contract_total, dec!(750000));
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_tariff_row_takes_precedence() {
        let mut d = device();
        d.tariffs.insert(36, LeasingBounds::new(dec!(16000), dec!(18000), dec!(20000)));
        let model = LeasingCostModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();

        let cost = model.calculate(&d, 36, dec!(0.25), &mut diag);
        assert_eq!(cost.monthly, dec!(17000));
        assert_eq!(cost.source, BoundsSource::Tariff { months: 36 });

        let fallback = model.calculate(&d, 48, dec!(0.25), &mut diag);
        assert_eq!(fallback.monthly, dec!(11250));
        assert_eq!(diag.warnings(), &[ValidationWarning::TariffRowMissing { months: 48 }]);
    }

    #[test]
    fn test_factor_is_clamped_with_warning() {
        let model = LeasingCostModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();

        let cost = model.calculate(&device(), 60, dec!(1.4), &mut diag);
        assert_eq!(cost.monthly, dec!(15000));
        assert_eq!(cost.tier, LeasingTier::Maximum);
        assert_eq!(
            diag.warnings(),
            &[ValidationWarning::FactorClamped { requested: dec!(1.4), applied: dec!(1) }]
        );
    }

    #[test]
    fn test_missing_bounds_yield_zero() {
        let d = Device::new(DeviceId::new("bare").unwrap(), "Bare", dec!(1000));
        let model = LeasingCostModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();

        let cost = model.calculate(&d, 60, dec!(0.7), &mut diag);
        assert_eq!(cost.monthly, dec!(0));
        assert_eq!(cost.source, BoundsSource::Missing);
        assert_eq!(diag.warnings().len(), 1);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_tiers() {
        let threshold = dec!(0.5);
        assert_eq!(LeasingTier::from_factor(AdjustmentFactor::clamped(dec!(0.49)), threshold), LeasingTier::Minimum);
        assert_eq!(LeasingTier::from_factor(AdjustmentFactor::standard(), threshold), LeasingTier::Standard);
        assert_eq!(LeasingTier::from_factor(AdjustmentFactor::maximum(), threshold), LeasingTier::Maximum);
    }

    #[test]
    fn test_reference_value_ignores_slider() {
        let mut d = device();
        assert_eq!(LeasingCostModel::reference_value(&d, 60), dec!(12500));
        d.tariffs.insert(60, LeasingBounds::new(dec!(9000), dec!(9500), dec!(11000)));
        assert_eq!(LeasingCostModel::reference_value(&d, 60), dec!(9500));
    }
}
