//! Gateway configuration
//!
//! The plugin settings, driver transport and device records are read from a
//! single TOML file. Typed deserialisation enforces the required plugin
//! attributes; device identifiers are validated when the device list for
//! this plugin is built.

use std::path::Path;

use rfx_core::{DeviceIdentifier, GatewayError, GatewayResult};
use rfx_driver::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::devices::ConfiguredDevice;

/// Complete gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub plugin: PluginSettings,
    /// Driver transport
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

/// Plugin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Plugin id that device records refer to
    #[serde(default = "default_plugin_id")]
    pub id: String,
    /// Transceiver port
    pub port: String,
    /// Only log received events; no identity resolution or command dispatch
    pub listen_only: bool,
    /// Firmware protocol names that should be enabled on the receiver
    pub enabled_protocols: Vec<String>,
    #[serde(default)]
    pub debug: bool,
}

fn default_plugin_id() -> String {
    "RFXCOM".to_string()
}

/// Device role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceRole {
    Input,
    Output,
}

impl DeviceRole {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceRole::Input => "input",
            DeviceRole::Output => "output",
        }
    }
}

/// Device type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Temperature,
    Switch,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Temperature => "temperature",
            DeviceType::Switch => "switch",
        }
    }
}

/// Plugin binding of a device record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicePlugin {
    pub id: String,
    /// Encoded device identifier
    pub device_id: String,
}

/// A device record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: DeviceRole,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub plugin: DevicePlugin,
}

fn default_enabled() -> bool {
    true
}

impl GatewayConfig {
    /// Parse configuration from TOML
    pub fn from_toml_str(content: &str) -> GatewayResult<Self> {
        toml::from_str(content).map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Enabled devices bound to this plugin, with decoded identifiers
    ///
    /// Devices whose identifier does not decode are skipped with a warning
    /// and never reach the dispatcher.
    pub fn plugin_devices(&self) -> Vec<ConfiguredDevice> {
        self.devices
            .iter()
            .filter(|device| device.plugin.id == self.plugin.id && device.enabled)
            .filter_map(|device| match DeviceIdentifier::decode(&device.plugin.device_id) {
                Ok(identifier) => Some(ConfiguredDevice::new(device, identifier)),
                Err(e) => {
                    warn!(device = %device.id, error = %e, "Skipping device with invalid identifier");
                    None
                }
            })
            .collect()
    }
}
