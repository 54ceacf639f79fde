//! Revenue Model
//!
//! Revenue from treatments, tax-inclusive and tax-exclusive, plus the fixed
//! occupancy scenarios computed from the daily capacity ceiling.

use devicecalc_common::{Money, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Revenue by time unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    /// Per working day, tax included
    pub daily_inc_tax: Money,
    /// Per working day, tax removed
    pub daily_ex_tax: Money,
    /// Yearly / 52, tax included
    pub weekly_inc_tax: Money,
    /// Yearly / 52, tax removed
    pub weekly_ex_tax: Money,
    /// Daily × working days, tax included
    pub monthly_inc_tax: Money,
    /// Daily × working days, tax removed
    pub monthly_ex_tax: Money,
    /// Monthly × 12, tax included
    pub yearly_inc_tax: Money,
    /// Monthly × 12, tax removed
    pub yearly_ex_tax: Money,
}

/// Revenue at a fixed share of daily capacity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyScenario {
    /// Share of capacity (0.75 = 75%)
    pub occupancy: Rate,
    /// Uses per day at this occupancy
    pub uses_per_day: Decimal,
    /// Daily revenue, tax included
    pub daily_inc_tax: Money,
    /// Monthly revenue, tax included
    pub monthly_inc_tax: Money,
    /// Monthly revenue, tax removed
    pub monthly_ex_tax: Money,
    /// Yearly revenue, tax removed
    pub yearly_ex_tax: Money,
}

/// Revenue model
#[derive(Debug, Clone)]
pub struct RevenueModel {
    tax_rate: Rate,
    occupancy_levels: Vec<Rate>,
}

impl RevenueModel {
    /// Create from engine config
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            tax_rate: config.tax_rate,
            occupancy_levels: config.occupancy_levels.clone(),
        }
    }

    /// Remove tax from a tax-inclusive amount
    pub fn ex_tax(&self, amount: Money) -> Money {
        amount / (Decimal::ONE + self.tax_rate)
    }

    /// Revenue for a usage volume and tax-inclusive unit price
    pub fn calculate(&self, uses_per_day: Decimal, unit_price: Money, working_days: u32) -> Revenue {
        let daily_inc_tax = uses_per_day * unit_price;
        let monthly_inc_tax = daily_inc_tax * Decimal::from(working_days);
        let yearly_inc_tax = monthly_inc_tax * Decimal::from(12);
        let weekly_inc_tax = yearly_inc_tax / Decimal::from(52);

        Revenue {
            daily_inc_tax,
            daily_ex_tax: self.ex_tax(daily_inc_tax),
            weekly_inc_tax,
            weekly_ex_tax: self.ex_tax(weekly_inc_tax),
            monthly_inc_tax,
            monthly_ex_tax: self.ex_tax(monthly_inc_tax),
            yearly_inc_tax,
            yearly_ex_tax: self.ex_tax(yearly_inc_tax),
        }
    }

    /// Revenue at each configured occupancy of `capacity` uses per day
    ///
    /// Independent of the user's current usage.
    pub fn occupancy(&self, capacity: Decimal, unit_price: Money, working_days: u32) -> Vec<OccupancyScenario> {
        self.occupancy_levels
            .iter()
            .map(|&occupancy| {
                let uses_per_day = capacity * occupancy;
                let revenue = self.calculate(uses_per_day, unit_price, working_days);
                OccupancyScenario {
                    occupancy,
                    uses_per_day,
                    daily_inc_tax: revenue.daily_inc_tax,
                    monthly_inc_tax: revenue.monthly_inc_tax,
                    monthly_ex_tax: revenue.monthly_ex_tax,
                    yearly_ex_tax: revenue.yearly_ex_tax,
                }
            })
            .collect()
    }
}

impl Default for RevenueModel {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_revenue_time_units() {
        let model = RevenueModel::default();
        let revenue = model.calculate(dec!(6), dec!(3500), 22);

        assert_eq!(revenue.daily_inc_tax, dec!(21000));
        assert_eq!(revenue.daily_ex_tax, dec!(16800));
        assert_eq!(revenue.monthly_inc_tax, dec!(462000));
        assert_eq!(revenue.monthly_ex_tax, dec!(369600));
        assert_eq!(revenue.yearly_inc_tax, dec!(5544000));
        assert_eq!(revenue.yearly_ex_tax, dec!(4435200));
        assert_eq!(revenue.weekly_inc_tax.round_dp(2), dec!(106615.38));
    }

    #[test]
    fn test_occupancy_scenarios() {
        let model = RevenueModel::default();
        let scenarios = model.occupancy(dec!(12), dec!(1000), 20);

        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].uses_per_day, dec!(6));
        assert_eq!(scenarios[1].uses_per_day, dec!(9));
        assert_eq!(scenarios[2].monthly_inc_tax, dec!(240000));
        assert_eq!(scenarios[2].monthly_ex_tax, dec!(192000));
    }

    #[test]
    fn test_zero_price_zero_revenue() {
        let revenue = RevenueModel::default().calculate(dec!(8), dec!(0), 22);
        assert_eq!(revenue, Revenue::default());
    }
}
