//! Error types for DeviceCalc

use thiserror::Error;

/// DeviceCalc error type
///
/// Only boundary operations (catalog reads, config loading) return this.
/// The calculation itself reports problems inside its result.
#[derive(Error, Debug)]
pub enum CalcError {
    /// Device not found in the catalog
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Invalid device identifier
    #[error("invalid device id: {0}")]
    InvalidDeviceId(String),

    /// Adjustment factor outside 0.0..=1.0
    #[error("invalid adjustment factor: {0}")]
    InvalidFactor(String),

    /// Catalog backend failure
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for DeviceCalc
pub type CalcResult<T> = Result<T, CalcError>;
