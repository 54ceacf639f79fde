//! Device records as supplied by the device catalog

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value_objects::DeviceId;
use crate::Money;

/// Treatment device
///
/// Immutable once fetched. All prices are monthly unless the field name
/// says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    /// Device identity
    pub id: DeviceId,
    /// Display name
    pub name: String,
    /// Category
    #[serde(default)]
    pub category: DeviceCategory,
    /// Base (purchase) price
    pub price: Money,
    /// Whether the catalog lists the device as active
    #[serde(default = "default_active")]
    pub active: bool,
    /// Consumable ("credit") settings, present when the device uses consumables
    #[serde(default)]
    pub consumables: Option<ConsumableProfile>,
    /// Default price charged to the end customer per use (tax-inclusive)
    #[serde(default)]
    pub default_usage_price: Option<Money>,
    /// Linear leasing bounds, used when no tariff row matches the duration
    #[serde(default)]
    pub leasing: Option<LeasingBounds>,
    /// Leasing tariff table keyed by duration in months
    #[serde(default)]
    pub tariffs: BTreeMap<u32, LeasingBounds>,
    /// Precomputed strategic all-inclusive monthly leasing figure
    #[serde(default)]
    pub strategic_leasing: Option<Money>,
    /// Monthly insurance premium
    #[serde(default)]
    pub insurance_per_month: Option<Money>,
    /// Maximum uses per working day the device can sustain
    #[serde(default)]
    pub max_daily_capacity: Option<Decimal>,
    /// Last modification timestamp from the catalog
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Device {
    /// Create an active device with only identity and price set
    pub fn new(id: DeviceId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            category: DeviceCategory::default(),
            price,
            active: true,
            consumables: None,
            default_usage_price: None,
            leasing: None,
            tariffs: BTreeMap::new(),
            strategic_leasing: None,
            insurance_per_month: None,
            max_daily_capacity: None,
            updated_at: None,
        }
    }

    /// Whether the device is billed per consumable
    pub fn uses_consumables(&self) -> bool {
        self.consumables.is_some()
    }

    /// Flatrate price per month, 0 for devices without consumables
    pub fn flatrate_amount(&self) -> Money {
        self.consumables
            .as_ref()
            .map(|c| c.flatrate_price)
            .unwrap_or(Decimal::ZERO)
    }

    /// Tariff row for a leasing duration, if the table has one
    pub fn tariff_for(&self, months: u32) -> Option<&LeasingBounds> {
        self.tariffs.get(&months)
    }

    /// Whether the device carries any leasing figures at all
    pub fn has_leasing_data(&self) -> bool {
        self.leasing.is_some() || !self.tariffs.is_empty()
    }
}

/// Device category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    /// Laser and IPL systems
    Laser,
    /// Radiofrequency
    Radiofrequency,
    /// Focused ultrasound
    Ultrasound,
    /// Fat freezing
    Cryolipolysis,
    /// Electromagnetic muscle stimulation
    Electromagnetic,
    /// Anything else
    #[default]
    Other,
}

/// Monthly leasing envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeasingBounds {
    /// Lowest monthly leasing rate (factor 0.0)
    pub min: Money,
    /// Standard / reference monthly leasing rate
    pub standard: Money,
    /// Highest monthly leasing rate (factor 1.0)
    pub max: Money,
}

impl LeasingBounds {
    /// Create bounds
    pub fn new(min: Money, standard: Money, max: Money) -> Self {
        Self { min, standard, max }
    }

    /// Check ordering and sign, returning a reason when malformed
    pub fn check(&self) -> Result<(), String> {
        if self.min < Decimal::ZERO || self.standard < Decimal::ZERO || self.max < Decimal::ZERO {
            return Err("negative leasing bound".into());
        }
        if self.min > self.max {
            return Err(format!("min {} exceeds max {}", self.min, self.max));
        }
        if self.standard < self.min || self.standard > self.max {
            return Err(format!(
                "standard {} outside {}..={}",
                self.standard, self.min, self.max
            ));
        }
        Ok(())
    }

    /// Width of the envelope
    pub fn spread(&self) -> Money {
        self.max - self.min
    }
}

/// Consumable ("credit") pricing of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsumableProfile {
    /// Cheapest unit price (reached at the maximum leasing factor)
    pub min_price: Money,
    /// Most expensive unit price (at the minimum leasing factor)
    pub max_price: Money,
    /// Consumables used per treatment
    pub per_use: Decimal,
    /// Monthly flatrate price for unlimited consumables
    pub flatrate_price: Money,
}

impl ConsumableProfile {
    /// Check ordering and sign, returning a reason when malformed
    pub fn check(&self) -> Result<(), String> {
        if self.min_price < Decimal::ZERO
            || self.max_price < Decimal::ZERO
            || self.per_use < Decimal::ZERO
            || self.flatrate_price < Decimal::ZERO
        {
            return Err("negative consumable figure".into());
        }
        if self.min_price > self.max_price {
            return Err(format!(
                "min price {} exceeds max price {}",
                self.min_price, self.max_price
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bounds_check() {
        assert!(LeasingBounds::new(dec!(100), dec!(150), dec!(200)).check().is_ok());
        assert!(LeasingBounds::new(dec!(300), dec!(150), dec!(200)).check().is_err());
        assert!(LeasingBounds::new(dec!(-1), dec!(0), dec!(200)).check().is_err());
        assert!(LeasingBounds::new(dec!(100), dec!(250), dec!(200)).check().is_err());
    }

    #[test]
    fn test_device_from_catalog_json() {
        let json = r#"{
            "id": "cryo-one",
            "name": "Cryo One",
            "category": "cryolipolysis",
            "price": "500000",
            "consumables": {
                "min_price": "300", "max_price": "500",
                "per_use": "1", "flatrate_price": "20000"
            },
            "leasing": { "min": "10000", "standard": "12500", "max": "15000" },
            "tariffs": {
                "36": { "min": "16000", "standard": "18000", "max": "20000" }
            }
        }"#;

        let device: Device = serde_json::from_str(json).unwrap();
        assert!(device.active);
        assert!(device.uses_consumables());
        assert_eq!(device.flatrate_amount(), dec!(20000));
        assert_eq!(device.tariff_for(36).map(|t| t.max), Some(dec!(20000)));
        assert!(device.tariff_for(48).is_none());
        assert_eq!(device.category, DeviceCategory::Cryolipolysis);
    }

    #[test]
    fn test_consumable_check() {
        let profile = ConsumableProfile {
            min_price: dec!(500),
            max_price: dec!(300),
            per_use: dec!(1),
            flatrate_price: dec!(0),
        };
        assert!(profile.check().is_err());
    }
}
