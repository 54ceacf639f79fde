//! Credit Economics Model
//!
//! Consumable ("credit") cost for devices billed per consumable: unit
//! price, monthly consumption, flatrate eligibility and the break-even
//! usage between pay-per-use and flatrate.

use devicecalc_common::{AdjustmentFactor, Device, Money, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inputs::{ConsumptionPreference, PaymentMode};
use crate::issues::{Diagnostics, ValidationWarning};

/// Usage side of a credit calculation
#[derive(Debug, Clone, Copy)]
pub struct CreditUsage {
    /// Treatments per working day
    pub uses_per_day: Decimal,
    /// Working days per month
    pub working_days: u32,
    /// Leasing or cash
    pub payment_mode: PaymentMode,
    /// Applied leasing factor
    pub factor: AdjustmentFactor,
    /// Requested consumption model
    pub preference: ConsumptionPreference,
    /// Flatrate discount granted by the service tier
    pub flatrate_discount: Rate,
}

/// Credit economics result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditEconomics {
    /// Device uses consumables at all
    pub active: bool,
    /// Price per consumable at the applied factor
    pub unit_price: Money,
    /// Consumables used per month
    pub consumables_per_month: Decimal,
    /// Monthly cost when paying per consumable
    pub pay_per_use_cost: Money,
    /// Flatrate list price
    pub flatrate_list_price: Money,
    /// Flatrate after the service tier discount
    pub flatrate_cost_per_month: Money,
    /// Flatrate selectable with the current payment mode and factor
    pub flatrate_eligible: bool,
    /// Flatrate actually used for the operating cost
    pub flatrate_applied: bool,
    /// Consumable or flatrate cost entering the operating cost
    pub consumable_cost: Money,
    /// Uses per day where pay-per-use equals the flatrate
    pub break_even_uses_per_day: Option<Decimal>,
    /// Cheaper selectable option at the current usage; never flatrate
    /// while flatrate is ineligible
    pub recommendation: Option<ConsumptionPreference>,
}

impl CreditEconomics {
    /// Consumables covered by an all-inclusive bundle: volumes and prices
    /// stay, every cost is 0
    pub fn included_in_bundle(self) -> Self {
        Self {
            pay_per_use_cost: Decimal::ZERO,
            flatrate_cost_per_month: Decimal::ZERO,
            flatrate_applied: false,
            consumable_cost: Decimal::ZERO,
            break_even_uses_per_day: None,
            recommendation: None,
            ..self
        }
    }
}

/// Credit economics model
#[derive(Debug, Clone)]
pub struct CreditEconomicsModel {
    eligibility_threshold: Rate,
}

impl CreditEconomicsModel {
    /// Create model with the leasing factor needed for flatrate
    pub fn new(eligibility_threshold: Rate) -> Self {
        Self { eligibility_threshold }
    }

    /// Unit price moves from the max price (factor 0) to the min price (factor 1)
    pub fn unit_price(min_price: Money, max_price: Money, factor: AdjustmentFactor) -> Money {
        max_price - factor.value() * (max_price - min_price)
    }

    /// Cash purchases may always pick flatrate; leasing needs the threshold
    pub fn flatrate_eligible(&self, payment_mode: PaymentMode, factor: AdjustmentFactor) -> bool {
        match payment_mode {
            PaymentMode::Cash => true,
            PaymentMode::Leasing => factor.value() >= self.eligibility_threshold,
        }
    }

    /// `flatrate / (unit_price * per_use) / working_days`
    ///
    /// `None` when consumables cost nothing per use, or the quotient does
    /// not fit a `Decimal`.
    pub fn break_even(
        flatrate_cost: Money,
        unit_price: Money,
        per_use: Decimal,
        working_days: u32,
    ) -> Option<Decimal> {
        let per_use_cost = unit_price * per_use;
        if per_use_cost <= Decimal::ZERO || working_days == 0 {
            return None;
        }
        flatrate_cost
            .checked_div(per_use_cost)?
            .checked_div(Decimal::from(working_days))
    }

    /// Calculate credit economics for a device
    pub fn calculate(&self, device: &Device, usage: CreditUsage, diag: &mut Diagnostics) -> CreditEconomics {
        let wants_flatrate = usage.preference == ConsumptionPreference::Flatrate;

        let Some(profile) = device.consumables.as_ref() else {
            if wants_flatrate {
                diag.warn(ValidationWarning::FlatrateNotApplicable);
            }
            return CreditEconomics::default();
        };

        let unit_price = Self::unit_price(profile.min_price, profile.max_price, usage.factor);
        let consumables_per_month =
            usage.uses_per_day * Decimal::from(usage.working_days) * profile.per_use;
        let pay_per_use_cost = consumables_per_month * unit_price;
        let flatrate_cost_per_month = (profile.flatrate_price
            * (Decimal::ONE - usage.flatrate_discount))
            .max(Decimal::ZERO);

        let flatrate_eligible = self.flatrate_eligible(usage.payment_mode, usage.factor);
        if wants_flatrate && !flatrate_eligible {
            diag.warn(ValidationWarning::FlatrateIneligible {
                factor: usage.factor.value(),
                threshold: self.eligibility_threshold,
            });
        }
        let flatrate_applied = wants_flatrate && flatrate_eligible;
        let consumable_cost = if flatrate_applied {
            flatrate_cost_per_month
        } else {
            pay_per_use_cost
        };

        let break_even_uses_per_day = Self::break_even(
            flatrate_cost_per_month,
            unit_price,
            profile.per_use,
            usage.working_days,
        );
        let recommendation = Some(match break_even_uses_per_day {
            Some(be) if flatrate_eligible && usage.uses_per_day >= be => ConsumptionPreference::Flatrate,
            _ => ConsumptionPreference::PayPerUse,
        });

        tracing::debug!(
            device = %device.id,
            %unit_price,
            %pay_per_use_cost,
            %flatrate_cost_per_month,
            flatrate_applied,
            "Credit economics"
        );

        CreditEconomics {
            active: true,
            unit_price,
            consumables_per_month,
            pay_per_use_cost,
            flatrate_list_price: profile.flatrate_price,
            flatrate_cost_per_month,
            flatrate_eligible,
            flatrate_applied,
            consumable_cost,
            break_even_uses_per_day,
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devicecalc_common::{ConsumableProfile, DeviceId};
    use rust_decimal_macros::dec;

    fn device() -> Device {
        let mut d = Device::new(DeviceId::new("cryo").unwrap(), "Cryo", dec!(500000));
        d.consumables = Some(ConsumableProfile {
            min_price: dec!(300),
            max_price: dec!(500),
            per_use: dec!(1),
            flatrate_price: dec!(22000),
        });
        d
    }

    fn usage(factor: Decimal, preference: ConsumptionPreference) -> CreditUsage {
        CreditUsage {
            uses_per_day: dec!(4),
            working_days: 22,
            payment_mode: PaymentMode::Leasing,
            factor: AdjustmentFactor::clamped(factor),
            preference,
            flatrate_discount: dec!(0),
        }
    }

    #[test]
    fn test_pay_per_use_cost() {
        let model = CreditEconomicsModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();

        let credits = model.calculate(&device(), usage(dec!(0.5), ConsumptionPreference::PayPerUse), &mut diag);
        assert_eq!(credits.unit_price, dec!(400));
        assert_eq!(credits.consumables_per_month, dec!(88));
        assert_eq!(credits.pay_per_use_cost, dec!(35200));
        assert_eq!(credits.consumable_cost, dec!(35200));
        assert!(!credits.flatrate_applied);
    }

    #[test]
    fn test_flatrate_below_threshold_falls_back() {
        let model = CreditEconomicsModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();

        let credits = model.calculate(&device(), usage(dec!(0.3), ConsumptionPreference::Flatrate), &mut diag);
        assert!(!credits.flatrate_eligible);
        assert!(!credits.flatrate_applied);
        assert_eq!(credits.consumable_cost, credits.pay_per_use_cost);
        assert!(matches!(diag.warnings(), [ValidationWarning::FlatrateIneligible { .. }]));
    }

    #[test]
    fn test_cash_purchase_always_eligible() {
        let model = CreditEconomicsModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();
        let mut u = usage(dec!(0.1), ConsumptionPreference::Flatrate);
        u.payment_mode = PaymentMode::Cash;

        let credits = model.calculate(&device(), u, &mut diag);
        assert!(credits.flatrate_applied);
        assert_eq!(credits.consumable_cost, dec!(22000));
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_gold_discount_zeroes_flatrate() {
        let model = CreditEconomicsModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();
        let mut u = usage(dec!(0.8), ConsumptionPreference::Flatrate);
        u.flatrate_discount = dec!(1);

        let credits = model.calculate(&device(), u, &mut diag);
        assert_eq!(credits.flatrate_cost_per_month, dec!(0));
        assert_eq!(credits.consumable_cost, dec!(0));
        assert_eq!(credits.break_even_uses_per_day, Some(dec!(0)));
        assert_eq!(credits.recommendation, Some(ConsumptionPreference::Flatrate));
    }

    #[test]
    fn test_break_even_and_recommendation() {
        // factor 0.5 -> unit price 400, 22000 / 400 / 22 = 2.5 uses per day
        let model = CreditEconomicsModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();

        let mut u = usage(dec!(0.5), ConsumptionPreference::PayPerUse);
        u.uses_per_day = dec!(2);
        let below = model.calculate(&device(), u, &mut diag);
        assert_eq!(below.break_even_uses_per_day, Some(dec!(2.5)));
        assert_eq!(below.recommendation, Some(ConsumptionPreference::PayPerUse));

        u.uses_per_day = dec!(2.5);
        let at = model.calculate(&device(), u, &mut diag);
        assert_eq!(at.recommendation, Some(ConsumptionPreference::Flatrate));
        assert_eq!(at.pay_per_use_cost, at.flatrate_cost_per_month);
    }

    #[test]
    fn test_ineligible_flatrate_never_recommended() {
        // factor 0.3 -> unit price 440, break-even 22000 / 440 / 22 = 2.27 uses
        let model = CreditEconomicsModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();

        let credits = model.calculate(&device(), usage(dec!(0.3), ConsumptionPreference::PayPerUse), &mut diag);
        assert!(!credits.flatrate_eligible);
        assert!(credits.break_even_uses_per_day.unwrap() < dec!(4));
        assert_eq!(credits.recommendation, Some(ConsumptionPreference::PayPerUse));
    }

    #[test]
    fn test_break_even_out_of_range_is_none() {
        let tiny = Decimal::new(1, 26);
        assert_eq!(CreditEconomicsModel::break_even(dec!(1000000000000), tiny, dec!(1), 22), None);
        assert_eq!(CreditEconomicsModel::break_even(dec!(22000), dec!(0), dec!(1), 22), None);
    }

    #[test]
    fn test_included_in_bundle_zeroes_costs() {
        let model = CreditEconomicsModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();

        let credits = model
            .calculate(&device(), usage(dec!(0.5), ConsumptionPreference::Flatrate), &mut diag)
            .included_in_bundle();
        assert_eq!(credits.unit_price, dec!(400));
        assert_eq!(credits.consumables_per_month, dec!(88));
        assert_eq!(credits.pay_per_use_cost, dec!(0));
        assert_eq!(credits.flatrate_cost_per_month, dec!(0));
        assert_eq!(credits.consumable_cost, dec!(0));
        assert!(!credits.flatrate_applied);
        assert_eq!(credits.recommendation, None);
    }

    #[test]
    fn test_device_without_consumables() {
        let model = CreditEconomicsModel::new(dec!(0.5));
        let mut diag = Diagnostics::new();
        let d = Device::new(DeviceId::new("rf").unwrap(), "RF", dec!(100000));

        let credits = model.calculate(&d, usage(dec!(0.9), ConsumptionPreference::Flatrate), &mut diag);
        assert!(!credits.active);
        assert_eq!(credits.consumable_cost, dec!(0));
        assert_eq!(diag.warnings(), &[ValidationWarning::FlatrateNotApplicable]);
    }
}
