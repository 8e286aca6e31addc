//! Generic bus signals

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayResult;
use crate::identity::DeviceIdentifier;

/// Attribute map carried by a signal
pub type SignalData = serde_json::Map<String, Value>;

/// Origin of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalSender {
    /// Issued by the bus or by the gateway on the bus' behalf
    #[default]
    Bus,
    /// Originated from a physical switch, remote or sensor
    HardwareEcho,
}

/// A signal exchanged with the home-automation bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    /// Encoded device identifier
    pub device_id: String,
    #[serde(default)]
    pub data: SignalData,
    #[serde(default)]
    pub sender: SignalSender,
}

impl Signal {
    pub fn new(device_id: impl Into<String>, data: SignalData, sender: SignalSender) -> Self {
        Self {
            device_id: device_id.into(),
            data,
            sender,
        }
    }

    /// Build a `{state}` signal
    pub fn state(device_id: impl Into<String>, state: &str, sender: SignalSender) -> Self {
        let mut data = SignalData::new();
        data.insert("state".to_string(), Value::String(state.to_string()));
        Self::new(device_id, data, sender)
    }

    /// Decode the device identifier
    pub fn identifier(&self) -> GatewayResult<DeviceIdentifier> {
        DeviceIdentifier::decode(&self.device_id)
    }

    /// The `data.state` value, if it is a string
    pub fn state_value(&self) -> Option<&str> {
        self.data.get("state").and_then(Value::as_str)
    }
}
