//! Driver configuration

use serde::{Deserialize, Serialize};

/// Transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Serial/USB transceiver
    Serial(SerialConfig),
    /// In-process mock transceiver
    Mock(MockConfig),
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Mock(MockConfig::default())
    }
}

/// Serial transceiver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Serial device path (e.g., "/dev/ttyUSB0")
    pub port: String,
    /// Enable driver-level frame tracing
    #[serde(default)]
    pub debug: bool,
}

/// Mock transceiver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Simulated latency in milliseconds
    #[serde(default)]
    pub latency_ms: u64,
    /// Receiver type reported in the status report
    #[serde(default = "default_receiver_type")]
    pub receiver_type: String,
    /// Firmware version reported in the status report
    #[serde(default = "default_firmware_version")]
    pub firmware_version: u32,
    /// Protocols the simulated receiver reports as enabled
    #[serde(default)]
    pub enabled_protocols: Vec<String>,
    /// Fail the handshake (exercises initialization error handling)
    #[serde(default)]
    pub fail_handshake: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            receiver_type: default_receiver_type(),
            firmware_version: default_firmware_version(),
            enabled_protocols: Vec::new(),
            fail_handshake: false,
        }
    }
}

fn default_receiver_type() -> String {
    "433.92MHz transceiver".to_string()
}

fn default_firmware_version() -> u32 {
    1001
}
