//! Engine Configuration

use devicecalc_common::{CalcError, CalcResult, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engine::MAX_QUANTITY;

/// Fixed constants used by the calculation models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Working days per month when the inputs give none
    pub working_days_per_month: u32,
    /// VAT rate included in end-customer prices
    pub tax_rate: Rate,
    /// Adjustment factor from which flatrate is selectable in leasing mode
    pub flatrate_eligibility_threshold: Rate,
    /// Uses per day above which flatrate is messaged as profitable
    pub profitability_min_uses_per_day: Decimal,
    /// Daily capacity ceiling for devices that carry none
    pub max_daily_capacity: Decimal,
    /// Occupancy levels for the revenue upside scenarios
    pub occupancy_levels: Vec<Rate>,
    /// Leasing duration whose standard rate is the service tier reference
    pub reference_leasing_months: u32,
    /// Leasing duration when the inputs give none
    pub default_leasing_months: u32,
    /// Silver tier cost as share of the reference leasing value
    pub silver_tier_rate: Rate,
    /// Gold tier cost as share of the reference leasing value
    pub gold_tier_rate: Rate,
    /// Flatrate discount granted by Silver
    pub silver_flatrate_discount: Rate,
    /// Flatrate discount granted by Gold
    pub gold_flatrate_discount: Rate,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            working_days_per_month: 22,
            tax_rate: dec!(0.25),
            flatrate_eligibility_threshold: dec!(0.5),
            profitability_min_uses_per_day: dec!(2),
            max_daily_capacity: dec!(12),
            occupancy_levels: vec![dec!(0.50), dec!(0.75), dec!(1.00)],
            reference_leasing_months: 60,
            default_leasing_months: 60,
            silver_tier_rate: dec!(0.25),
            gold_tier_rate: dec!(0.50),
            silver_flatrate_discount: dec!(0.50),
            gold_flatrate_discount: dec!(1.00),
        }
    }
}

impl EngineConfig {
    /// Load from a `.toml` or `.json` file and validate
    pub fn load(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| CalcError::Config(format!("{}: {}", path.display(), e)))?,
            _ => serde_json::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the models cannot work with
    pub fn validate(&self) -> CalcResult<()> {
        let unit = |name: &str, value: Rate| -> CalcResult<()> {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(CalcError::Config(format!("{} must be 0.0-1.0, got {}", name, value)));
            }
            Ok(())
        };

        unit("tax_rate", self.tax_rate)?;
        unit("flatrate_eligibility_threshold", self.flatrate_eligibility_threshold)?;
        unit("silver_flatrate_discount", self.silver_flatrate_discount)?;
        unit("gold_flatrate_discount", self.gold_flatrate_discount)?;
        unit("silver_tier_rate", self.silver_tier_rate)?;
        unit("gold_tier_rate", self.gold_tier_rate)?;
        if self.occupancy_levels.is_empty() {
            return Err(CalcError::Config("occupancy_levels cannot be empty".into()));
        }
        for level in &self.occupancy_levels {
            unit("occupancy_levels", *level)?;
        }

        if !(1..=31).contains(&self.working_days_per_month) {
            return Err(CalcError::Config(format!(
                "working_days_per_month must be 1-31, got {}",
                self.working_days_per_month
            )));
        }
        if self.max_daily_capacity <= Decimal::ZERO || self.max_daily_capacity > MAX_QUANTITY {
            return Err(CalcError::Config(format!(
                "max_daily_capacity must be positive and at most {}, got {}",
                MAX_QUANTITY, self.max_daily_capacity
            )));
        }
        if self.profitability_min_uses_per_day < Decimal::ZERO {
            return Err(CalcError::Config(
                "profitability_min_uses_per_day cannot be negative".into(),
            ));
        }
        if self.reference_leasing_months == 0 || self.default_leasing_months == 0 {
            return Err(CalcError::Config("leasing durations must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.working_days_per_month, 22);
        assert_eq!(config.tax_rate, dec!(0.25));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            working_days_per_month = 20
            max_daily_capacity = "16"
            "#,
        )
        .unwrap();

        assert_eq!(config.working_days_per_month, 20);
        assert_eq!(config.max_daily_capacity, dec!(16));
        assert_eq!(config.flatrate_eligibility_threshold, dec!(0.5));
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let config = EngineConfig {
            tax_rate: dec!(1.5),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CalcError::Config(_))));

        let config = EngineConfig {
            working_days_per_month: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            tax_rate: dec!(-1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_occupancy_and_capacity() {
        let empty = EngineConfig {
            occupancy_levels: vec![],
            ..Default::default()
        };
        assert!(matches!(empty.validate(), Err(CalcError::Config(_))));

        let negative = EngineConfig {
            occupancy_levels: vec![dec!(0.5), dec!(-0.25)],
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let huge = EngineConfig {
            max_daily_capacity: MAX_QUANTITY + dec!(1),
            ..Default::default()
        };
        assert!(huge.validate().is_err());

        let tier = EngineConfig {
            gold_tier_rate: dec!(2),
            ..Default::default()
        };
        assert!(tier.validate().is_err());
    }

    #[test]
    fn test_load_json() {
        let path = std::env::temp_dir().join(format!("devicecalc-engine-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "tax_rate": "0.2" }"#).unwrap();

        let config = EngineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.tax_rate, dec!(0.2));
    }
}
