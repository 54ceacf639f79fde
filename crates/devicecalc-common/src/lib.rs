//! DeviceCalc Common - Shared types for the device economics engine
//!
//! This crate provides the read-only side of the calculation:
//! - Device records and their leasing tariff tables
//! - Value objects (device identifiers, adjustment factors)
//! - The device catalog contract and two catalog implementations
//! - Error handling
//!
//! Nothing in here mutates a device once it has been fetched. The engine
//! crate borrows devices for the duration of a single calculation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod device;
pub mod error;
pub mod value_objects;

pub use catalog::*;
pub use device::*;
pub use error::*;
pub use value_objects::*;

use rust_decimal::Decimal;

/// Monetary amount in the device's pricing currency
pub type Money = Decimal;

/// Fraction in 0.0..=1.0 unless stated otherwise (0.25 = 25%)
pub type Rate = Decimal;
