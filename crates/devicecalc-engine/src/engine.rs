//! Calculation Engine
//!
//! Single entry point: validates the input snapshot, runs the models in
//! dependency order and aggregates their output. `calculate` is total: any
//! problem ends up in the result's warning or error list.

use devicecalc_common::{AdjustmentFactor, CalcResult, Device, DeviceId, Money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::alternatives::{AlternativeOffer, AlternativesRanker, BundleKind};
use crate::config::EngineConfig;
use crate::credits::{CreditEconomics, CreditEconomicsModel, CreditUsage};
use crate::inputs::{CalculationInputs, ConsumptionPreference, LeasingModel};
use crate::issues::{Diagnostics, StructuralError, ValidationWarning};
use crate::leasing::{LeasingCost, LeasingCostModel};
use crate::net::{NetResult, NetResultCalculator, OperatingCost, Profitability};
use crate::revenue::{OccupancyScenario, Revenue, RevenueModel};
use crate::service::{ServiceTierCost, ServiceTierModel};

/// Largest money figure accepted from the inputs or the catalog
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Largest per-day or per-use quantity accepted from the inputs or the catalog
pub const MAX_QUANTITY: Decimal = dec!(1000000);

/// Full calculation output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// No structural error occurred
    pub is_valid: bool,
    /// Device the result belongs to
    pub device_id: Option<DeviceId>,
    /// Leasing cost
    pub leasing: LeasingCost,
    /// Consumable economics
    pub credits: CreditEconomics,
    /// Service tier cost
    pub service: ServiceTierCost,
    /// Consumable/flatrate plus service tier cost
    pub operating_cost: OperatingCost,
    /// Monthly insurance premium
    pub insurance_cost: Money,
    /// Revenue at the current usage
    pub revenue: Revenue,
    /// Revenue at fixed occupancy levels
    pub occupancy: Vec<OccupancyScenario>,
    /// Net result
    pub net: NetResult,
    /// Break-even figures and the fixed usage rule
    pub profitability: Profitability,
    /// Ranked bundle alternatives
    pub alternatives: Vec<AlternativeOffer>,
    /// Structural errors in the order raised
    pub errors: Vec<StructuralError>,
    /// Validation warnings in the order raised
    pub warnings: Vec<ValidationWarning>,
}

impl CalculationResult {
    /// Fully shaped result with zeroed figures
    fn invalid(device_id: Option<DeviceId>, diag: Diagnostics) -> Self {
        let (warnings, errors) = diag.into_parts();
        Self {
            is_valid: false,
            device_id,
            leasing: LeasingCost {
                factor: AdjustmentFactor::minimum(),
                ..Default::default()
            },
            errors,
            warnings,
            ..Default::default()
        }
    }

    /// Monthly leasing cost
    pub fn leasing_cost(&self) -> Money {
        self.leasing.monthly
    }

    /// Price per consumable
    pub fn credit_unit_price(&self) -> Money {
        self.credits.unit_price
    }
}

/// Calculation engine
///
/// Stateless: concurrent calls with different inputs need no locking.
#[derive(Debug, Clone)]
pub struct CalculationEngine {
    config: EngineConfig,
    leasing: LeasingCostModel,
    credits: CreditEconomicsModel,
    service: ServiceTierModel,
    revenue: RevenueModel,
    ranker: AlternativesRanker,
}

impl CalculationEngine {
    /// Create engine with the given constants
    ///
    /// Constants failing [`EngineConfig::validate`] are replaced by the
    /// defaults.
    pub fn new(config: EngineConfig) -> Self {
        match Self::try_new(config) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid engine config, using defaults");
                Self::build(EngineConfig::default())
            }
        }
    }

    /// Create engine, rejecting invalid constants
    pub fn try_new(config: EngineConfig) -> CalcResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            leasing: LeasingCostModel::new(config.flatrate_eligibility_threshold),
            credits: CreditEconomicsModel::new(config.flatrate_eligibility_threshold),
            service: ServiceTierModel::from_config(&config),
            revenue: RevenueModel::from_config(&config),
            ranker: AlternativesRanker::from_config(&config),
            config,
        }
    }

    /// Engine constants
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one calculation
    pub fn calculate(&self, inputs: &CalculationInputs<'_>) -> CalculationResult {
        let mut diag = Diagnostics::new();

        let Some(device) = inputs.device else {
            diag.error(StructuralError::MissingDevice);
            return CalculationResult::invalid(None, diag);
        };

        self.check_device(device, &mut diag);
        Self::check_magnitudes(device, inputs, &mut diag);
        if diag.has_errors() {
            return CalculationResult::invalid(Some(device.id.clone()), diag);
        }

        let working_days = self.working_days(inputs, &mut diag);
        let uses_per_day = self.uses_per_day(device, inputs, &mut diag);
        let unit_price = self.unit_price(device, inputs, &mut diag);
        let months = inputs.leasing_months.unwrap_or(self.config.default_leasing_months);
        let all_inclusive = inputs.leasing_model == LeasingModel::AllInclusive;

        // Leasing first; credits and service tier depend on it
        let leasing = self
            .leasing
            .calculate(device, months, inputs.adjustment_factor, &mut diag);

        let reference = LeasingCostModel::reference_value(device, self.config.reference_leasing_months);
        let mut service = self.service.calculate(inputs.service_tier, reference);

        // consumables are part of the all-inclusive figure, flatrate is moot
        let preference = if all_inclusive {
            ConsumptionPreference::PayPerUse
        } else {
            inputs.consumption
        };
        let mut credits = self.credits.calculate(
            device,
            CreditUsage {
                uses_per_day,
                working_days,
                payment_mode: inputs.payment_mode,
                factor: leasing.factor,
                preference,
                flatrate_discount: service.flatrate_discount,
            },
            &mut diag,
        );

        let insurance_cost = if inputs.insurance {
            device.insurance_per_month.unwrap_or_else(|| {
                diag.warn(ValidationWarning::InsuranceUnavailable);
                Decimal::ZERO
            })
        } else {
            Decimal::ZERO
        };

        let (leasing_component, operating_cost) = if all_inclusive {
            let strategic = device.strategic_leasing.unwrap_or_else(|| {
                diag.warn(ValidationWarning::StrategicFigureMissing);
                leasing.monthly
            });
            // consumables and service are part of the bundle
            credits = credits.included_in_bundle();
            service = service.included_in_bundle();
            (strategic, OperatingCost::new(Decimal::ZERO, Decimal::ZERO))
        } else {
            (
                leasing.monthly,
                OperatingCost::new(credits.consumable_cost, service.monthly),
            )
        };

        let revenue = self.revenue.calculate(uses_per_day, unit_price, working_days);
        let capacity = device
            .max_daily_capacity
            .unwrap_or(self.config.max_daily_capacity);
        let occupancy = self.revenue.occupancy(capacity, unit_price, working_days);

        let net = NetResultCalculator::calculate(
            revenue.monthly_ex_tax,
            leasing_component,
            &operating_cost,
            insurance_cost,
        );

        let profitability = self.profitability(
            device,
            uses_per_day,
            unit_price,
            working_days,
            &credits,
            &net,
            all_inclusive,
        );

        let current = BundleKind::matching(inputs.leasing_model, inputs.service_tier, credits.flatrate_applied);
        let alternatives = self.ranker.rank(leasing.monthly, device, current);

        tracing::debug!(
            device = %device.id,
            leasing = %leasing.monthly,
            operating = %operating_cost.total_cost,
            revenue_ex_tax = %revenue.monthly_ex_tax,
            net = %net.per_month_ex_tax,
            warnings = diag.warnings().len(),
            "Calculation complete"
        );

        let (warnings, errors) = diag.into_parts();
        CalculationResult {
            is_valid: errors.is_empty(),
            device_id: Some(device.id.clone()),
            leasing,
            credits,
            service,
            operating_cost,
            insurance_cost,
            revenue,
            occupancy,
            net,
            profitability,
            alternatives,
            errors,
            warnings,
        }
    }

    /// Structural checks that invalidate the whole result
    fn check_device(&self, device: &Device, diag: &mut Diagnostics) {
        let name = device.id.to_string();

        if device.price <= Decimal::ZERO {
            diag.error(StructuralError::NonPositivePrice {
                device: name.clone(),
                price: device.price,
            });
        }
        if let Some(bounds) = &device.leasing {
            if let Err(reason) = bounds.check() {
                diag.error(StructuralError::MalformedTariff {
                    device: name.clone(),
                    months: None,
                    reason,
                });
            }
        }
        for (months, row) in &device.tariffs {
            if let Err(reason) = row.check() {
                diag.error(StructuralError::MalformedTariff {
                    device: name.clone(),
                    months: Some(*months),
                    reason,
                });
            }
        }
        if let Some(profile) = &device.consumables {
            if let Err(reason) = profile.check() {
                diag.error(StructuralError::MalformedConsumables {
                    device: name.clone(),
                    reason,
                });
            }
        }
        if let Some(capacity) = device.max_daily_capacity {
            if capacity <= Decimal::ZERO {
                diag.error(StructuralError::NonPositiveCapacity { device: name, capacity });
            }
        }
    }

    /// Reject figures whose products could overflow `Decimal`
    ///
    /// Below these limits the longest product (usage × consumables per use ×
    /// unit price × working days × 12) stays far inside the `Decimal` range.
    /// Negative usage and prices are handled as warnings later and only
    /// their positive side is limited here.
    fn check_magnitudes(device: &Device, inputs: &CalculationInputs<'_>, diag: &mut Diagnostics) {
        let mut check = |field: &str, value: Decimal, limit: Decimal| {
            if value.abs() > limit {
                diag.error(StructuralError::OutOfRange {
                    field: field.to_string(),
                    value,
                    limit,
                });
            }
        };

        check("uses_per_day", inputs.uses_per_day.max(Decimal::ZERO), MAX_QUANTITY);
        if let Some(price) = inputs.unit_price {
            check("unit_price", price.max(Decimal::ZERO), MAX_AMOUNT);
        }
        if let Some(price) = device.default_usage_price {
            check("default_usage_price", price.max(Decimal::ZERO), MAX_AMOUNT);
        }
        for bounds in device.leasing.iter().chain(device.tariffs.values()) {
            check("leasing_max", bounds.max, MAX_AMOUNT);
            check("leasing_min", bounds.min, MAX_AMOUNT);
        }
        if let Some(profile) = &device.consumables {
            check("consumable_max_price", profile.max_price, MAX_AMOUNT);
            check("consumable_min_price", profile.min_price, MAX_AMOUNT);
            check("consumables_per_use", profile.per_use, MAX_QUANTITY);
            check("flatrate_price", profile.flatrate_price, MAX_AMOUNT);
        }
        if let Some(strategic) = device.strategic_leasing {
            check("strategic_leasing", strategic, MAX_AMOUNT);
        }
        if let Some(insurance) = device.insurance_per_month {
            check("insurance_per_month", insurance, MAX_AMOUNT);
        }
        if let Some(capacity) = device.max_daily_capacity {
            check("max_daily_capacity", capacity, MAX_QUANTITY);
        }
    }

    fn working_days(&self, inputs: &CalculationInputs<'_>, diag: &mut Diagnostics) -> u32 {
        let fallback = self.config.working_days_per_month;
        match inputs.working_days_per_month {
            Some(days) if (1..=31).contains(&days) => days,
            Some(days) => {
                diag.warn(ValidationWarning::WorkingDaysOutOfRange {
                    requested: days,
                    applied: fallback,
                });
                fallback
            }
            None => fallback,
        }
    }

    fn uses_per_day(&self, device: &Device, inputs: &CalculationInputs<'_>, diag: &mut Diagnostics) -> Decimal {
        let requested = inputs.uses_per_day;
        if requested < Decimal::ZERO {
            diag.warn(ValidationWarning::UsageClamped { requested });
            return Decimal::ZERO;
        }

        let capacity = device
            .max_daily_capacity
            .unwrap_or(self.config.max_daily_capacity);
        if requested > capacity {
            diag.warn(ValidationWarning::UsageImplausible {
                uses_per_day: requested,
                capacity,
            });
        }
        requested
    }

    fn unit_price(&self, device: &Device, inputs: &CalculationInputs<'_>, diag: &mut Diagnostics) -> Money {
        match inputs.unit_price.or(device.default_usage_price) {
            Some(price) if price > Decimal::ZERO => price,
            Some(price) => {
                diag.warn(ValidationWarning::NonPositiveUnitPrice { price });
                Decimal::ZERO
            }
            None => {
                diag.warn(ValidationWarning::MissingUnitPrice);
                Decimal::ZERO
            }
        }
    }

    fn profitability(
        &self,
        device: &Device,
        uses_per_day: Decimal,
        unit_price: Money,
        working_days: u32,
        credits: &CreditEconomics,
        net: &NetResult,
        all_inclusive: bool,
    ) -> Profitability {
        // pay-per-use consumables scale with usage; everything else is fixed
        let variable = credits.active && !credits.flatrate_applied && !all_inclusive;
        let (fixed, variable_per_use) = match device.consumables.as_ref() {
            Some(profile) if variable => (
                net.total_monthly_cost - credits.consumable_cost,
                credits.unit_price * profile.per_use,
            ),
            _ => (net.total_monthly_cost, Decimal::ZERO),
        };

        let operating_break_even = NetResultCalculator::operating_break_even(
            fixed,
            self.revenue.ex_tax(unit_price),
            variable_per_use,
            working_days,
        );

        Profitability::assess(
            uses_per_day,
            credits.break_even_uses_per_day,
            self.config.profitability_min_uses_per_day,
            operating_break_even,
        )
    }
}

impl Default for CalculationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceTier;
    use devicecalc_common::{ConsumableProfile, LeasingBounds};
    use rust_decimal_macros::dec;

    fn device() -> Device {
        let mut d = Device::new(DeviceId::new("cryo").unwrap(), "Cryo", dec!(500000));
        d.leasing = Some(LeasingBounds::new(dec!(10000), dec!(12500), dec!(15000)));
        d.consumables = Some(ConsumableProfile {
            min_price: dec!(300),
            max_price: dec!(500),
            per_use: dec!(1),
            flatrate_price: dec!(22000),
        });
        d.default_usage_price = Some(dec!(2500));
        d
    }

    #[test]
    fn test_missing_device_is_structural() {
        let engine = CalculationEngine::default();
        let result = engine.calculate(&CalculationInputs::default());

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![StructuralError::MissingDevice]);
        assert_eq!(result.leasing_cost(), dec!(0));
        assert_eq!(result.leasing.factor, AdjustmentFactor::minimum());
        assert!(result.occupancy.is_empty());
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn test_huge_usage_is_rejected_not_panicking() {
        let d = device();
        let result = CalculationEngine::default().calculate(&CalculationInputs {
            uses_per_day: Decimal::MAX / dec!(10),
            unit_price: Some(dec!(3500)),
            ..CalculationInputs::for_device(&d)
        });

        assert!(!result.is_valid);
        assert!(matches!(
            &result.errors[..],
            [StructuralError::OutOfRange { field, limit, .. }] if field == "uses_per_day" && *limit == MAX_QUANTITY
        ));
        assert_eq!(result.revenue, Revenue::default());
    }

    #[test]
    fn test_huge_catalog_figures_are_rejected() {
        let mut d = device();
        d.consumables = Some(ConsumableProfile {
            min_price: dec!(300),
            max_price: Decimal::MAX,
            per_use: dec!(1),
            flatrate_price: dec!(22000),
        });
        d.strategic_leasing = Some(Decimal::MAX);

        let result = CalculationEngine::default().calculate(&CalculationInputs {
            uses_per_day: dec!(12),
            unit_price: Some(Decimal::MAX),
            leasing_model: LeasingModel::AllInclusive,
            ..CalculationInputs::for_device(&d)
        });

        assert!(!result.is_valid);
        let fields: Vec<_> = result
            .errors
            .iter()
            .filter_map(|e| match e {
                StructuralError::OutOfRange { field, .. } => Some(field.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fields, vec!["unit_price", "consumable_max_price", "strategic_leasing"]);
    }

    #[test]
    fn test_largest_accepted_figures_calculate() {
        let mut d = device();
        d.consumables = Some(ConsumableProfile {
            min_price: MAX_AMOUNT,
            max_price: MAX_AMOUNT,
            per_use: MAX_QUANTITY,
            flatrate_price: MAX_AMOUNT,
        });
        d.leasing = Some(LeasingBounds::new(MAX_AMOUNT, MAX_AMOUNT, MAX_AMOUNT));
        d.insurance_per_month = Some(MAX_AMOUNT);
        d.max_daily_capacity = Some(MAX_QUANTITY);

        let result = CalculationEngine::default().calculate(&CalculationInputs {
            uses_per_day: MAX_QUANTITY,
            unit_price: Some(MAX_AMOUNT),
            service_tier: ServiceTier::Silver,
            insurance: true,
            leasing_months: Some(u32::MAX),
            working_days_per_month: Some(31),
            ..CalculationInputs::for_device(&d)
        });

        assert!(result.is_valid);
        assert_eq!(result.credits.pay_per_use_cost, dec!(31) * MAX_QUANTITY * MAX_QUANTITY * MAX_AMOUNT);
    }

    #[test]
    fn test_non_positive_device_capacity_is_structural() {
        let mut d = device();
        d.max_daily_capacity = Some(dec!(0));

        let result = CalculationEngine::default().calculate(&CalculationInputs {
            uses_per_day: dec!(4),
            ..CalculationInputs::for_device(&d)
        });
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![StructuralError::NonPositiveCapacity {
                device: "cryo".into(),
                capacity: dec!(0),
            }]
        );
        assert!(result.occupancy.is_empty());
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let config = EngineConfig {
            tax_rate: dec!(-1),
            occupancy_levels: vec![],
            ..Default::default()
        };
        assert!(CalculationEngine::try_new(config.clone()).is_err());

        let engine = CalculationEngine::new(config);
        assert_eq!(engine.config(), &EngineConfig::default());

        let d = device();
        let result = engine.calculate(&CalculationInputs {
            uses_per_day: dec!(4),
            ..CalculationInputs::for_device(&d)
        });
        assert_eq!(result.revenue.monthly_ex_tax, dec!(176000));
        assert_eq!(result.occupancy.len(), 3);
    }

    #[test]
    fn test_non_positive_price_and_bad_tariff_reported_together() {
        let mut d = device();
        d.price = dec!(0);
        d.tariffs.insert(36, LeasingBounds::new(dec!(20000), dec!(18000), dec!(16000)));

        let result = CalculationEngine::default().calculate(&CalculationInputs::for_device(&d));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert!(matches!(result.errors[0], StructuralError::NonPositivePrice { .. }));
        assert!(matches!(
            result.errors[1],
            StructuralError::MalformedTariff { months: Some(36), .. }
        ));
        assert_eq!(result.net, NetResult::default());
        assert_eq!(result.device_id.as_ref().map(|id| id.as_str()), Some("cryo"));
    }

    #[test]
    fn test_defaults_fill_partial_inputs() {
        let d = device();
        let result = CalculationEngine::default().calculate(&CalculationInputs {
            uses_per_day: dec!(4),
            ..CalculationInputs::for_device(&d)
        });

        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
        assert_eq!(result.leasing.duration_months, 60);
        // device default usage price: 4 * 2500 * 22
        assert_eq!(result.revenue.monthly_inc_tax, dec!(220000));
    }

    #[test]
    fn test_out_of_range_inputs_warn() {
        let d = device();
        let result = CalculationEngine::default().calculate(&CalculationInputs {
            uses_per_day: dec!(-3),
            adjustment_factor: dec!(-0.2),
            working_days_per_month: Some(40),
            unit_price: Some(dec!(0)),
            ..CalculationInputs::for_device(&d)
        });

        assert!(result.is_valid);
        assert_eq!(
            result.warnings,
            vec![
                ValidationWarning::WorkingDaysOutOfRange { requested: 40, applied: 22 },
                ValidationWarning::UsageClamped { requested: dec!(-3) },
                ValidationWarning::NonPositiveUnitPrice { price: dec!(0) },
                ValidationWarning::FactorClamped { requested: dec!(-0.2), applied: dec!(0) },
            ]
        );
        assert_eq!(result.leasing_cost(), dec!(10000));
        assert_eq!(result.revenue, Revenue::default());
    }

    #[test]
    fn test_implausible_usage_is_kept() {
        let d = device();
        let result = CalculationEngine::default().calculate(&CalculationInputs {
            uses_per_day: dec!(30),
            ..CalculationInputs::for_device(&d)
        });

        assert!(result.warnings.contains(&ValidationWarning::UsageImplausible {
            uses_per_day: dec!(30),
            capacity: dec!(12),
        }));
        assert_eq!(result.revenue.daily_inc_tax, dec!(75000));
    }

    #[test]
    fn test_all_inclusive_uses_strategic_figure() {
        let mut d = device();
        d.strategic_leasing = Some(dec!(30000));
        let result = CalculationEngine::default().calculate(&CalculationInputs {
            uses_per_day: dec!(5),
            leasing_model: LeasingModel::AllInclusive,
            consumption: ConsumptionPreference::Flatrate,
            service_tier: ServiceTier::Gold,
            adjustment_factor: dec!(0.1),
            ..CalculationInputs::for_device(&d)
        });

        assert!(result.warnings.is_empty());
        assert_eq!(result.operating_cost, OperatingCost::default());
        assert_eq!(result.credits.consumable_cost, dec!(0));
        assert_eq!(result.credits.pay_per_use_cost, dec!(0));
        assert_eq!(result.credits.flatrate_cost_per_month, dec!(0));
        assert_eq!(result.service.monthly, dec!(0));
        assert_eq!(result.service.tier, ServiceTier::Gold);
        // consumption volume is still reported
        assert_eq!(result.credits.consumables_per_month, dec!(110));
        assert_eq!(result.net.leasing_cost, dec!(30000));
        assert_eq!(result.net.total_monthly_cost, dec!(30000));
        let current: Vec<_> = result.alternatives.iter().filter(|o| o.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].kind, BundleKind::StrategicAllInclusive);
    }

    #[test]
    fn test_all_inclusive_without_figure_falls_back() {
        let d = device();
        let result = CalculationEngine::default().calculate(&CalculationInputs {
            leasing_model: LeasingModel::AllInclusive,
            ..CalculationInputs::for_device(&d)
        });

        assert_eq!(result.warnings, vec![ValidationWarning::StrategicFigureMissing]);
        assert_eq!(result.net.leasing_cost, result.leasing_cost());
    }

    #[test]
    fn test_insurance_added_to_costs() {
        let mut d = device();
        d.insurance_per_month = Some(dec!(750));
        let base = CalculationInputs {
            uses_per_day: dec!(4),
            ..CalculationInputs::for_device(&d)
        };
        let insured = CalculationInputs { insurance: true, ..base.clone() };

        let engine = CalculationEngine::default();
        let without = engine.calculate(&base);
        let with = engine.calculate(&insured);

        assert_eq!(with.insurance_cost, dec!(750));
        assert_eq!(without.net.per_month_ex_tax - with.net.per_month_ex_tax, dec!(750));

        let bare = device();
        let missing = engine.calculate(&CalculationInputs { insurance: true, ..CalculationInputs::for_device(&bare) });
        assert!(missing.warnings.contains(&ValidationWarning::InsuranceUnavailable));
    }

    #[test]
    fn test_operating_break_even_zeroes_net() {
        let d = device();
        let engine = CalculationEngine::default();
        let result = engine.calculate(&CalculationInputs {
            uses_per_day: dec!(4),
            ..CalculationInputs::for_device(&d)
        });

        let be = result.profitability.operating_break_even_uses_per_day.unwrap();
        let at_be = engine.calculate(&CalculationInputs {
            uses_per_day: be,
            ..CalculationInputs::for_device(&d)
        });
        assert!(at_be.net.per_month_ex_tax.abs() < dec!(0.01));
    }
}
