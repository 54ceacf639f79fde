//! Calculation inputs

use devicecalc_common::{Device, Money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::service::ServiceTier;

/// How the device is paid for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Monthly leasing
    #[default]
    Leasing,
    /// Outright purchase
    Cash,
}

/// Strategic leasing model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeasingModel {
    /// Leasing plus separately billed consumables and service tier
    #[default]
    Hybrid,
    /// Single strategic figure covering leasing, consumables and service
    AllInclusive,
}

/// How consumables are paid for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionPreference {
    /// Pay for each consumable used
    #[default]
    PayPerUse,
    /// Fixed monthly price for unlimited consumables
    Flatrate,
}

/// Full input snapshot for one calculation
///
/// Every field has a default so partial inputs never break the engine.
/// The device is borrowed for the duration of the calculation only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CalculationInputs<'a> {
    /// Device to calculate for
    pub device: Option<&'a Device>,
    /// Treatments per working day
    pub uses_per_day: Decimal,
    /// Price per treatment charged to the end customer (tax-inclusive);
    /// falls back to the device's default usage price
    pub unit_price: Option<Money>,
    /// Leasing or cash purchase
    pub payment_mode: PaymentMode,
    /// Leasing duration in months; falls back to the configured default
    pub leasing_months: Option<u32>,
    /// Include the device's insurance premium
    pub insurance: bool,
    /// Selected service tier
    pub service_tier: ServiceTier,
    /// Raw leasing slider position, clamped to 0.0..=1.0 by the engine
    pub adjustment_factor: Decimal,
    /// Flatrate vs pay-per-use
    pub consumption: ConsumptionPreference,
    /// Working days per month; falls back to the configured default
    pub working_days_per_month: Option<u32>,
    /// Hybrid vs all-inclusive
    pub leasing_model: LeasingModel,
}

impl Default for CalculationInputs<'_> {
    fn default() -> Self {
        Self {
            device: None,
            uses_per_day: Decimal::ZERO,
            unit_price: None,
            payment_mode: PaymentMode::default(),
            leasing_months: None,
            insurance: false,
            service_tier: ServiceTier::default(),
            adjustment_factor: dec!(0.5),
            consumption: ConsumptionPreference::default(),
            working_days_per_month: None,
            leasing_model: LeasingModel::default(),
        }
    }
}

impl<'a> CalculationInputs<'a> {
    /// Default inputs for a device
    pub fn for_device(device: &'a Device) -> Self {
        Self {
            device: Some(device),
            ..Default::default()
        }
    }
}
