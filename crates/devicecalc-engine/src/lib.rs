//! DeviceCalc Engine
//!
//! Pure calculation engine turning a device's pricing parameters and a
//! user's usage assumptions into leasing cost, consumable cost, service tier
//! cost, revenue, net result and a ranked list of purchase alternatives.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CALCULATION ENGINE                               │
//! │                                                                         │
//! │   CalculationInputs ─► validation ─► Diagnostics (warnings / errors)    │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐                 │
//! │  │   Leasing    │──►│   Credit     │   │   Service    │                 │
//! │  │  Cost Model  │──►│  Economics   │◄──│  Tier Model  │                 │
//! │  └──────────────┘   └──────────────┘   └──────────────┘                 │
//! │         │                  │                  │                         │
//! │         │           ┌──────────────┐          │                         │
//! │         │           │   Revenue    │          │                         │
//! │         │           │    Model     │          │                         │
//! │         │           └──────────────┘          │                         │
//! │         ▼                  ▼                  ▼                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              NET RESULT  ─►  ALTERNATIVES RANKER                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine holds no state between calls. Callers that want to skip
//! identical recomputation wrap it in a [`MemoizedEngine`].

#![warn(missing_docs)]

pub mod alternatives;
pub mod config;
pub mod credits;
pub mod engine;
pub mod inputs;
pub mod issues;
pub mod leasing;
pub mod memo;
pub mod net;
pub mod revenue;
pub mod service;

pub use alternatives::{AlternativeOffer, AlternativesRanker, BundleFeatures, BundleKind};
pub use config::EngineConfig;
pub use credits::{CreditEconomics, CreditEconomicsModel};
pub use engine::{CalculationEngine, CalculationResult, MAX_AMOUNT, MAX_QUANTITY};
pub use inputs::{CalculationInputs, ConsumptionPreference, LeasingModel, PaymentMode};
pub use issues::{Diagnostics, StructuralError, ValidationWarning};
pub use leasing::{BoundsSource, LeasingCost, LeasingCostModel, LeasingTier};
pub use memo::MemoizedEngine;
pub use net::{NetResult, NetResultCalculator, OperatingCost, Profitability};
pub use revenue::{OccupancyScenario, Revenue, RevenueModel};
pub use service::{ServiceTier, ServiceTierCost, ServiceTierModel};

pub use devicecalc_common::{Money, Rate};
