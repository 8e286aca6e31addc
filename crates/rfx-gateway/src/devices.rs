//! Configured devices and address lookup

use rfx_core::DeviceIdentifier;

use crate::config::{DeviceConfig, DeviceRole, DeviceType};

/// A validated, enabled device belonging to this plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredDevice {
    pub id: String,
    pub name: Option<String>,
    pub role: DeviceRole,
    pub device_type: DeviceType,
    pub identifier: DeviceIdentifier,
}

impl ConfiguredDevice {
    pub fn new(config: &DeviceConfig, identifier: DeviceIdentifier) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            role: config.role,
            device_type: config.device_type,
            identifier,
        }
    }
}

/// Devices attached to the dispatcher, in configuration order
#[derive(Debug, Default)]
pub struct DeviceDirectory {
    devices: Vec<ConfiguredDevice>,
}

impl DeviceDirectory {
    pub fn new(devices: Vec<ConfiguredDevice>) -> Self {
        Self { devices }
    }

    /// Devices whose `address[/unitCode]` equals `address`, in list order
    pub fn matching<'a>(&'a self, address: &'a str) -> impl Iterator<Item = &'a ConfiguredDevice> {
        self.devices
            .iter()
            .filter(move |device| device.identifier.address_with_unit() == address)
    }

    pub fn devices(&self) -> &[ConfiguredDevice] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
