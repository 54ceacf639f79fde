//! Device catalog - read contract for the remote device store
//!
//! The calculation never talks to the catalog itself. Callers fetch the
//! active devices first and hand a borrowed device to the engine.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::device::Device;
use crate::error::{CalcError, CalcResult};
use crate::value_objects::DeviceId;

/// Device catalog trait
#[async_trait]
pub trait DeviceCatalog: Send + Sync {
    /// Fetch all active devices
    async fn fetch_active(&self) -> CalcResult<Vec<Device>>;

    /// Get a single active device by ID
    async fn get(&self, id: &DeviceId) -> CalcResult<Device> {
        self.fetch_active()
            .await?
            .into_iter()
            .find(|d| &d.id == id)
            .ok_or_else(|| CalcError::DeviceNotFound(id.to_string()))
    }
}

/// In-memory device catalog (for testing and development)
pub struct InMemoryDeviceCatalog {
    devices: RwLock<BTreeMap<DeviceId, Device>>,
}

impl InMemoryDeviceCatalog {
    /// Create empty catalog
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create catalog seeded with devices
    pub fn with_devices(devices: impl IntoIterator<Item = Device>) -> Self {
        let catalog = Self::new();
        for device in devices {
            catalog.insert(device);
        }
        catalog
    }

    /// Insert or replace a device
    pub fn insert(&self, device: Device) {
        self.devices.write().insert(device.id.clone(), device);
    }

    /// Number of devices, active or not
    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    /// Whether the catalog holds no devices
    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }
}

impl Default for InMemoryDeviceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceCatalog for InMemoryDeviceCatalog {
    async fn fetch_active(&self) -> CalcResult<Vec<Device>> {
        Ok(self
            .devices
            .read()
            .values()
            .filter(|d| d.active)
            .cloned()
            .collect())
    }
}

/// Catalog backed by a JSON file holding an array of devices
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    /// Create catalog reading from `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DeviceCatalog for JsonFileCatalog {
    async fn fetch_active(&self) -> CalcResult<Vec<Device>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CalcError::Catalog(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let devices: Vec<Device> = serde_json::from_str(&content)?;
        let total = devices.len();
        let active: Vec<Device> = devices.into_iter().filter(|d| d.active).collect();

        tracing::debug!(
            path = %self.path.display(),
            total,
            active = active.len(),
            "Loaded device catalog"
        );
        Ok(active)
    }
}
