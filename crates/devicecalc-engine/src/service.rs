//! Service Tier Model
//!
//! Bronze is included with every device. Silver and Gold cost a share of the
//! device's *reference* leasing value, which is fixed per device and does
//! not follow the leasing slider.

use devicecalc_common::{Money, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::EngineConfig;

/// Service tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceTier {
    /// Included, no flatrate discount
    #[default]
    Bronze,
    /// Paid, halves the flatrate
    Silver,
    /// Paid, flatrate free
    Gold,
}

impl ServiceTier {
    /// All tiers, cheapest first
    pub const ALL: [ServiceTier; 3] = [ServiceTier::Bronze, ServiceTier::Silver, ServiceTier::Gold];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ServiceTier::Bronze => "Bronze",
            ServiceTier::Silver => "Silver",
            ServiceTier::Gold => "Gold",
        }
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bronze" => Ok(ServiceTier::Bronze),
            "silver" => Ok(ServiceTier::Silver),
            "gold" => Ok(ServiceTier::Gold),
            other => Err(format!("unknown service tier '{}'", other)),
        }
    }
}

/// Service tier cost breakdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTierCost {
    /// Selected tier
    pub tier: ServiceTier,
    /// Reference leasing value the tier rate applies to
    pub reference_leasing: Money,
    /// Share of the reference value charged
    pub rate: Rate,
    /// Monthly tier cost
    pub monthly: Money,
    /// Discount on the flatrate granted by the tier
    pub flatrate_discount: Rate,
}

impl ServiceTierCost {
    /// Service covered by an all-inclusive bundle
    pub fn included_in_bundle(self) -> Self {
        Self {
            monthly: Decimal::ZERO,
            ..self
        }
    }
}

/// Service tier model
#[derive(Debug, Clone)]
pub struct ServiceTierModel {
    silver_rate: Rate,
    gold_rate: Rate,
    silver_discount: Rate,
    gold_discount: Rate,
}

impl ServiceTierModel {
    /// Create from engine config
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            silver_rate: config.silver_tier_rate,
            gold_rate: config.gold_tier_rate,
            silver_discount: config.silver_flatrate_discount,
            gold_discount: config.gold_flatrate_discount,
        }
    }

    /// Share of the reference leasing value charged for a tier
    pub fn rate(&self, tier: ServiceTier) -> Rate {
        match tier {
            ServiceTier::Bronze => Decimal::ZERO,
            ServiceTier::Silver => self.silver_rate,
            ServiceTier::Gold => self.gold_rate,
        }
    }

    /// Flatrate discount granted by a tier
    pub fn flatrate_discount(&self, tier: ServiceTier) -> Rate {
        match tier {
            ServiceTier::Bronze => Decimal::ZERO,
            ServiceTier::Silver => self.silver_discount,
            ServiceTier::Gold => self.gold_discount,
        }
    }

    /// Flatrate price after the tier discount
    pub fn discounted_flatrate(&self, tier: ServiceTier, flatrate: Money) -> Money {
        (flatrate * (Decimal::ONE - self.flatrate_discount(tier))).max(Decimal::ZERO)
    }

    /// Calculate tier cost against the device's reference leasing value
    pub fn calculate(&self, tier: ServiceTier, reference_leasing: Money) -> ServiceTierCost {
        let rate = self.rate(tier);
        let monthly = (reference_leasing * rate).max(Decimal::ZERO);

        tracing::debug!(%tier, %reference_leasing, %monthly, "Service tier cost");

        ServiceTierCost {
            tier,
            reference_leasing,
            rate,
            monthly,
            flatrate_discount: self.flatrate_discount(tier),
        }
    }
}

impl Default for ServiceTierModel {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
