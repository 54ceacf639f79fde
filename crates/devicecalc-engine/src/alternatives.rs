//! Alternatives Ranker
//!
//! Builds the fixed catalog of commercial bundles from the current leasing
//! cost and device metadata, then ranks them by monthly cost, most
//! expensive first.

use devicecalc_common::{Device, Money, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::inputs::LeasingModel;
use crate::service::ServiceTier;

/// Bundle in the alternatives catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleKind {
    LeasingWithFlatrate,
    LeasingWithGold,
    LeasingWithSilver,
    StrategicAllInclusive,
    LeasingOnly,
}

impl BundleKind {
    /// Catalog in declaration order; ties keep this order
    pub const CATALOG: [BundleKind; 5] = [
        BundleKind::LeasingWithFlatrate,
        BundleKind::LeasingWithGold,
        BundleKind::LeasingWithSilver,
        BundleKind::StrategicAllInclusive,
        BundleKind::LeasingOnly,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            BundleKind::LeasingWithFlatrate => "Leasing + flatrate",
            BundleKind::LeasingWithGold => "Leasing + Gold service",
            BundleKind::LeasingWithSilver => "Leasing + Silver service",
            BundleKind::StrategicAllInclusive => "All-inclusive (strategic)",
            BundleKind::LeasingOnly => "Leasing only",
        }
    }

    /// Fixed feature set of the bundle
    pub fn features(&self) -> BundleFeatures {
        match self {
            BundleKind::LeasingWithFlatrate => BundleFeatures {
                unlimited_use: true,
                free_consumables_included: false,
                service_tier: ServiceTier::Bronze,
                annual_service_included: false,
                loaner_device_included: false,
            },
            BundleKind::LeasingWithGold => BundleFeatures {
                unlimited_use: true,
                free_consumables_included: true,
                service_tier: ServiceTier::Gold,
                annual_service_included: true,
                loaner_device_included: true,
            },
            BundleKind::LeasingWithSilver => BundleFeatures {
                unlimited_use: true,
                free_consumables_included: false,
                service_tier: ServiceTier::Silver,
                annual_service_included: true,
                loaner_device_included: false,
            },
            BundleKind::StrategicAllInclusive => BundleFeatures {
                unlimited_use: true,
                free_consumables_included: true,
                service_tier: ServiceTier::Gold,
                annual_service_included: true,
                loaner_device_included: true,
            },
            BundleKind::LeasingOnly => BundleFeatures {
                unlimited_use: false,
                free_consumables_included: false,
                service_tier: ServiceTier::Bronze,
                annual_service_included: false,
                loaner_device_included: false,
            },
        }
    }

    /// Bundle matching the user's current selection
    pub fn matching(model: LeasingModel, tier: ServiceTier, flatrate_applied: bool) -> Self {
        match (model, tier) {
            (LeasingModel::AllInclusive, _) => BundleKind::StrategicAllInclusive,
            (LeasingModel::Hybrid, ServiceTier::Gold) => BundleKind::LeasingWithGold,
            (LeasingModel::Hybrid, ServiceTier::Silver) => BundleKind::LeasingWithSilver,
            (LeasingModel::Hybrid, ServiceTier::Bronze) if flatrate_applied => BundleKind::LeasingWithFlatrate,
            (LeasingModel::Hybrid, ServiceTier::Bronze) => BundleKind::LeasingOnly,
        }
    }
}

/// Feature flags of a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleFeatures {
    /// No per-use charge for consumables
    pub unlimited_use: bool,
    /// Consumables come with the bundle
    pub free_consumables_included: bool,
    /// Service tier bundled in
    pub service_tier: ServiceTier,
    /// Yearly maintenance visit included
    pub annual_service_included: bool,
    /// Replacement device during repairs
    pub loaner_device_included: bool,
}

/// Ranked bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeOffer {
    /// 1-based rank, most expensive first
    pub rank: usize,
    /// Stable bundle identifier
    pub kind: BundleKind,
    /// Display name
    pub name: String,
    /// Total monthly cost of the bundle
    pub monthly_cost: Money,
    /// Fixed feature flags
    pub features: BundleFeatures,
    /// Human-readable cost composition
    pub breakdown: String,
    /// Bundle matches the current selection
    pub is_current: bool,
}

/// Alternatives ranker
#[derive(Debug, Clone)]
pub struct AlternativesRanker {
    silver_rate: Rate,
    gold_rate: Rate,
    silver_flatrate_discount: Rate,
}

fn money(amount: Money) -> String {
    amount.round_dp(2).normalize().to_string()
}

impl AlternativesRanker {
    /// Create from engine config
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            silver_rate: config.silver_tier_rate,
            gold_rate: config.gold_tier_rate,
            silver_flatrate_discount: config.silver_flatrate_discount,
        }
    }

    /// Monthly cost and breakdown of one bundle
    fn price(&self, kind: BundleKind, leasing_cost: Money, device: &Device) -> (Money, String) {
        let flatrate = device.flatrate_amount();
        match kind {
            BundleKind::LeasingWithFlatrate => (
                leasing_cost + flatrate,
                format!("Leasing {} + flatrate {}", money(leasing_cost), money(flatrate)),
            ),
            BundleKind::LeasingWithGold => {
                let tier = self.gold_rate * leasing_cost;
                (
                    leasing_cost + tier,
                    format!(
                        "Leasing {} + Gold service {} (flatrate included)",
                        money(leasing_cost),
                        money(tier)
                    ),
                )
            }
            BundleKind::LeasingWithSilver => {
                let tier = self.silver_rate * leasing_cost;
                let reduced = (Decimal::ONE - self.silver_flatrate_discount) * flatrate;
                (
                    leasing_cost + tier + reduced,
                    format!(
                        "Leasing {} + Silver service {} + reduced flatrate {}",
                        money(leasing_cost),
                        money(tier),
                        money(reduced)
                    ),
                )
            }
            BundleKind::StrategicAllInclusive => match device.strategic_leasing {
                Some(strategic) => (strategic, format!("All-inclusive leasing {}", money(strategic))),
                None => (
                    leasing_cost,
                    format!("All-inclusive leasing {} (standard leasing rate)", money(leasing_cost)),
                ),
            },
            BundleKind::LeasingOnly => (leasing_cost, format!("Leasing {}", money(leasing_cost))),
        }
    }

    /// Price every bundle and rank by monthly cost, descending
    ///
    /// Equal costs keep catalog order; ranks are always `1..=N`.
    pub fn rank(&self, leasing_cost: Money, device: &Device, current: BundleKind) -> Vec<AlternativeOffer> {
        let mut offers: Vec<AlternativeOffer> = BundleKind::CATALOG
            .iter()
            .map(|&kind| {
                let (monthly_cost, breakdown) = self.price(kind, leasing_cost, device);
                AlternativeOffer {
                    rank: 0,
                    kind,
                    name: kind.name().to_string(),
                    monthly_cost,
                    features: kind.features(),
                    breakdown,
                    is_current: kind == current,
                }
            })
            .collect();

        // sort_by is stable
        offers.sort_by(|a, b| b.monthly_cost.cmp(&a.monthly_cost));
        for (idx, offer) in offers.iter_mut().enumerate() {
            offer.rank = idx + 1;
        }
        offers
    }
}

impl Default for AlternativesRanker {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
