//! Device/command catalog: logical device and action names -> simulator click ids.
//!
//! Builders only ever speak in names (`"CDU"`, `"LSK_3L"`); the catalog is the one place
//! that knows the numeric ids the in-sim receiver expects.

mod device;

pub use device::{Device, FIRST_COMMAND_CODE};

use indexmap::IndexMap;
use std::sync::Arc;

use crate::error::BuildError;

/// All devices for one airframe, keyed by logical device name.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub airframe: Arc<str>,
    devices: IndexMap<Arc<str>, Device>,
}

impl Catalog {
    pub fn new(airframe: &str) -> Self {
        Self {
            airframe: Arc::from(airframe),
            devices: IndexMap::new(),
        }
    }

    /// Add (or replace) a device. Chainable so airframe tables read top-down.
    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.insert(device.name.clone(), device);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn device(&self, name: &str) -> Result<&Device, BuildError> {
        self.devices
            .get(name)
            .ok_or_else(|| BuildError::UnknownDevice {
                device: name.to_string(),
            })
    }

    /// Resolve `(device, action)` to `(device_id, command_code)`.
    pub fn resolve(&self, device: &str, action: &str) -> Result<(u32, u32), BuildError> {
        let dev = self.device(device)?;
        let code = dev.code(action).ok_or_else(|| BuildError::UnknownAction {
            device: device.to_string(),
            action: action.to_string(),
        })?;
        Ok((dev.id, code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }
}
