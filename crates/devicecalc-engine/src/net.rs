//! Net Result Calculator
//!
//! Single-month net figure; any ramp-up or multi-year projection belongs to
//! the presentation layer.

use devicecalc_common::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly operating cost
///
/// # Invariants
/// - `total_cost == consumable_or_flatrate_cost + service_tier_cost`
/// - No component is negative
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingCost {
    /// Pay-per-use consumables or the discounted flatrate
    pub consumable_or_flatrate_cost: Money,
    /// Monthly service tier cost
    pub service_tier_cost: Money,
    /// Sum of both components
    pub total_cost: Money,
}

impl OperatingCost {
    /// Build from components, flooring each at zero
    pub fn new(consumable_or_flatrate_cost: Money, service_tier_cost: Money) -> Self {
        let consumable_or_flatrate_cost = consumable_or_flatrate_cost.max(Decimal::ZERO);
        let service_tier_cost = service_tier_cost.max(Decimal::ZERO);
        Self {
            consumable_or_flatrate_cost,
            service_tier_cost,
            total_cost: consumable_or_flatrate_cost + service_tier_cost,
        }
    }
}

/// Net result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetResult {
    /// Leasing component entering the net result
    pub leasing_cost: Money,
    /// Operating cost total
    pub operating_cost: Money,
    /// Monthly insurance premium, 0 when not selected
    pub insurance_cost: Money,
    /// Sum of all monthly costs
    pub total_monthly_cost: Money,
    /// Revenue ex tax minus all monthly costs
    pub per_month_ex_tax: Money,
    /// Monthly net result × 12
    pub per_year_ex_tax: Money,
}

impl NetResult {
    /// Net result is at least zero
    pub fn is_profitable(&self) -> bool {
        self.per_month_ex_tax >= Decimal::ZERO
    }
}

/// Both profitability rules, side by side
///
/// The numeric credit break-even and the fixed uses-per-day rule can
/// disagree. Neither is preferred here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profitability {
    /// Current usage
    pub uses_per_day: Decimal,
    /// Uses per day where pay-per-use equals the flatrate
    pub credit_break_even_uses_per_day: Option<Decimal>,
    /// Threshold of the fixed rule
    pub usage_rule_min_uses_per_day: Decimal,
    /// Current usage is strictly above the fixed rule threshold
    pub meets_usage_rule: bool,
    /// Uses per day where the net result reaches zero
    pub operating_break_even_uses_per_day: Option<Decimal>,
    /// Fixed rule and credit break-even point in different directions
    pub rules_disagree: bool,
}

impl Profitability {
    /// Evaluate both rules for the current usage
    pub fn assess(
        uses_per_day: Decimal,
        credit_break_even: Option<Decimal>,
        usage_rule_min: Decimal,
        operating_break_even: Option<Decimal>,
    ) -> Self {
        let meets_usage_rule = uses_per_day > usage_rule_min;
        let rules_disagree = credit_break_even
            .map(|be| meets_usage_rule != (uses_per_day >= be))
            .unwrap_or(false);

        Self {
            uses_per_day,
            credit_break_even_uses_per_day: credit_break_even,
            usage_rule_min_uses_per_day: usage_rule_min,
            meets_usage_rule,
            operating_break_even_uses_per_day: operating_break_even,
            rules_disagree,
        }
    }
}

/// Net result calculator
pub struct NetResultCalculator;

impl NetResultCalculator {
    /// `revenue_ex_tax - (leasing + operating + insurance)`, and ×12 for the year
    pub fn calculate(
        monthly_revenue_ex_tax: Money,
        leasing_cost: Money,
        operating: &OperatingCost,
        insurance_cost: Money,
    ) -> NetResult {
        let total_monthly_cost = leasing_cost + operating.total_cost + insurance_cost;
        let per_month_ex_tax = monthly_revenue_ex_tax - total_monthly_cost;

        NetResult {
            leasing_cost,
            operating_cost: operating.total_cost,
            insurance_cost,
            total_monthly_cost,
            per_month_ex_tax,
            per_year_ex_tax: per_month_ex_tax * Decimal::from(12),
        }
    }

    /// Uses per day at which the monthly net result is zero
    ///
    /// `fixed_monthly` covers everything independent of usage; each use
    /// contributes `revenue_ex_tax_per_use - variable_cost_per_use`.
    /// `None` when a use does not contribute a positive margin, or the
    /// margin is too thin for the quotient to fit a `Decimal`.
    pub fn operating_break_even(
        fixed_monthly: Money,
        revenue_ex_tax_per_use: Money,
        variable_cost_per_use: Money,
        working_days: u32,
    ) -> Option<Decimal> {
        let margin = (revenue_ex_tax_per_use - variable_cost_per_use) * Decimal::from(working_days);
        if margin <= Decimal::ZERO {
            return None;
        }
        fixed_monthly.max(Decimal::ZERO).checked_div(margin)
    }
}
