//! CLI Commands

pub mod calculate;
pub mod config;
pub mod devices;

use anyhow::Result;
use devicecalc_common::{DeviceCatalog, JsonFileCatalog};

use crate::config::Config;

/// Catalog from flag or config
pub fn open_catalog(config: &Config, flag: Option<&str>) -> Result<JsonFileCatalog> {
    Ok(JsonFileCatalog::new(config.catalog(flag)?))
}

/// Fetch one active device
pub async fn fetch_device(
    catalog: &impl DeviceCatalog,
    id: &str,
) -> Result<devicecalc_common::Device> {
    let id = devicecalc_common::DeviceId::new(id)?;
    Ok(catalog.get(&id).await?)
}
