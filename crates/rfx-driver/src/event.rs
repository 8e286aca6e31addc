//! Inbound hardware events
//!
//! Every event the transceiver delivers is a [`HardwareEvent`]: the event
//! family it was decoded as, plus a tagged payload. Families the gateway
//! translates carry typed payloads; the rest are passed through as JSON
//! for logging.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Event families the transceiver driver emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Lighting1,
    Lighting2,
    Lighting3,
    Lighting4,
    Lighting5,
    Lighting6,
    Chime1,
    Blinds1,
    Security1,
    Camera1,
    Remote,
    Thermostat1,
    Thermostat3,
    Bbq1,
    Rain1,
    Wind1,
    Uv1,
    DateTime,
    Elec1,
    Elec23,
    Elec4,
    Elec5,
    Weight1,
    Temperature1,
    Humidity1,
    TemperatureHumidity1,
    TempHumBaro1,
    TemperatureRain1,
    RfxSensor,
    RfxMeter,
    CartElectronic,
    Response,
    Status,
}

impl EventKind {
    pub const ALL: [EventKind; 33] = [
        EventKind::Lighting1,
        EventKind::Lighting2,
        EventKind::Lighting3,
        EventKind::Lighting4,
        EventKind::Lighting5,
        EventKind::Lighting6,
        EventKind::Chime1,
        EventKind::Blinds1,
        EventKind::Security1,
        EventKind::Camera1,
        EventKind::Remote,
        EventKind::Thermostat1,
        EventKind::Thermostat3,
        EventKind::Bbq1,
        EventKind::Rain1,
        EventKind::Wind1,
        EventKind::Uv1,
        EventKind::DateTime,
        EventKind::Elec1,
        EventKind::Elec23,
        EventKind::Elec4,
        EventKind::Elec5,
        EventKind::Weight1,
        EventKind::Temperature1,
        EventKind::Humidity1,
        EventKind::TemperatureHumidity1,
        EventKind::TempHumBaro1,
        EventKind::TemperatureRain1,
        EventKind::RfxSensor,
        EventKind::RfxMeter,
        EventKind::CartElectronic,
        EventKind::Response,
        EventKind::Status,
    ];

    /// Driver event name
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Lighting1 => "lighting1",
            EventKind::Lighting2 => "lighting2",
            EventKind::Lighting3 => "lighting3",
            EventKind::Lighting4 => "lighting4",
            EventKind::Lighting5 => "lighting5",
            EventKind::Lighting6 => "lighting6",
            EventKind::Chime1 => "chime1",
            EventKind::Blinds1 => "blinds1",
            EventKind::Security1 => "security1",
            EventKind::Camera1 => "camera1",
            EventKind::Remote => "remote",
            EventKind::Thermostat1 => "thermostat1",
            EventKind::Thermostat3 => "thermostat3",
            EventKind::Bbq1 => "bbq1",
            EventKind::Rain1 => "rain1",
            EventKind::Wind1 => "wind1",
            EventKind::Uv1 => "uv1",
            EventKind::DateTime => "datetime",
            EventKind::Elec1 => "elec1",
            EventKind::Elec23 => "elec23",
            EventKind::Elec4 => "elec4",
            EventKind::Elec5 => "elec5",
            EventKind::Weight1 => "weight1",
            EventKind::Temperature1 => "temperature1",
            EventKind::Humidity1 => "humidity1",
            EventKind::TemperatureHumidity1 => "temperaturehumidity1",
            EventKind::TempHumBaro1 => "temphumbaro1",
            EventKind::TemperatureRain1 => "temperaturerain1",
            EventKind::RfxSensor => "rfxsensor",
            EventKind::RfxMeter => "rfxmeter",
            EventKind::CartElectronic => "cartelectronic",
            EventKind::Response => "response",
            EventKind::Status => "status",
        }
    }

    /// Parse an event name case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Switch/remote event decoded from a lighting or chime family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchEvent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i32>,
}

impl SwitchEvent {
    /// `id`, or `id/unitCode` when a unit code is present
    pub fn address(&self) -> String {
        match &self.unit_code {
            Some(unit) => format!("{}/{}", self.id, unit),
            None => self.id.clone(),
        }
    }
}

/// Temperature/humidity sensor reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorEvent {
    pub id: String,
    /// Sensor subtype code as reported by the transceiver (`1`, `b1`, ...)
    pub subtype: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub humidity_status: Option<u8>,
    #[serde(default)]
    pub battery_level: Option<u8>,
    #[serde(default)]
    pub rssi: Option<i32>,
}

/// Humidity comfort status reported by sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityStatus {
    Dry,
    Comfort,
    Normal,
    Wet,
    Other(u8),
}

impl HumidityStatus {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => HumidityStatus::Dry,
            1 => HumidityStatus::Comfort,
            2 => HumidityStatus::Normal,
            3 => HumidityStatus::Wet,
            other => HumidityStatus::Other(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            HumidityStatus::Dry => 0,
            HumidityStatus::Comfort => 1,
            HumidityStatus::Normal => 2,
            HumidityStatus::Wet => 3,
            HumidityStatus::Other(code) => code,
        }
    }
}

impl fmt::Display for HumidityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HumidityStatus::Dry => f.write_str("dry"),
            HumidityStatus::Comfort => f.write_str("comfort"),
            HumidityStatus::Normal => f.write_str("normal"),
            HumidityStatus::Wet => f.write_str("wet"),
            HumidityStatus::Other(code) => write!(f, "status {}", code),
        }
    }
}

/// Status report sent by the transceiver after the handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub receiver_type: String,
    pub firmware_version: u32,
    /// Firmware protocol names currently enabled on the receiver
    pub enabled_protocols: Vec<String>,
}

/// Event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EventPayload {
    Switch(SwitchEvent),
    Sensor(SensorEvent),
    Status(StatusReport),
    /// Families the gateway only logs
    Raw(serde_json::Value),
}

/// An event received from the transceiver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareEvent {
    pub kind: EventKind,
    pub payload: EventPayload,
}

impl HardwareEvent {
    pub fn new(kind: EventKind, payload: EventPayload) -> Self {
        Self { kind, payload }
    }

    pub fn switch(kind: EventKind, event: SwitchEvent) -> Self {
        Self::new(kind, EventPayload::Switch(event))
    }

    pub fn sensor(kind: EventKind, event: SensorEvent) -> Self {
        Self::new(kind, EventPayload::Sensor(event))
    }

    /// Device id carried by the payload, if any
    pub fn device_id(&self) -> Option<String> {
        match &self.payload {
            EventPayload::Switch(event) => Some(event.id.clone()),
            EventPayload::Sensor(event) => Some(event.id.clone()),
            EventPayload::Status(_) => None,
            EventPayload::Raw(value) => value
                .get("id")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_serde() {
        for kind in EventKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
            assert_eq!(EventKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn switch_address_composition() {
        let mut event = SwitchEvent {
            id: "0x02".to_string(),
            unit_code: None,
            command: Some("On".to_string()),
            rssi: None,
        };
        assert_eq!(event.address(), "0x02");
        event.unit_code = Some("3".to_string());
        assert_eq!(event.address(), "0x02/3");
    }

    #[test]
    fn humidity_status_passes_unknown_codes_through() {
        assert_eq!(HumidityStatus::from_code(3), HumidityStatus::Wet);
        assert_eq!(HumidityStatus::from_code(7).code(), 7);
        assert_eq!(HumidityStatus::from_code(1).to_string(), "comfort");
    }

    #[test]
    fn raw_payload_device_id() {
        let event = HardwareEvent::new(
            EventKind::Wind1,
            EventPayload::Raw(serde_json::json!({"id": "0x3301", "gust": 4.2})),
        );
        assert_eq!(event.device_id().as_deref(), Some("0x3301"));
    }
}
