//! Inbound event dispatch
//!
//! During bootstrap every configured device is turned into an
//! `(event kind, listener key, handler)` triple. The first device to claim a
//! listener key registers the handler; later devices with the same key are
//! attached to the directory but do not register again, so each hardware
//! event is converted exactly once.
//!
//! Handlers are closures over the shared device directory, captured when the
//! dispatcher is bound. Registrations are never added or removed afterwards.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use rfx_core::{Signal, SignalData, SignalSender, SubtypeCatalog};
use rfx_driver::{
    EventKind, EventPayload, HardwareEvent, HumidityStatus, SensorEvent, SwitchEvent,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{DeviceRole, DeviceType};
use crate::devices::{ConfiguredDevice, DeviceDirectory};

/// Event handler bound at bootstrap
pub type EventHandler = Arc<dyn Fn(&EventPayload) -> Vec<Signal> + Send + Sync>;

/// Deduplication key for listener registrations
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerKey(String);

impl ListenerKey {
    /// Key shared by all input/temperature devices of a plugin
    pub fn for_role(plugin_id: &str, role: DeviceRole, device_type: DeviceType) -> Self {
        Self(format!("{}{}{}", plugin_id, role.as_str(), device_type.as_str()))
    }

    /// Key shared by all switch devices of one protocol family
    pub fn for_family(plugin_id: &str, family: &str) -> Self {
        Self(format!("{}{}", plugin_id, family.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct Registration {
    kind: EventKind,
    key: ListenerKey,
    handler: EventHandler,
}

/// Converts hardware events into bus signals for the configured devices
pub struct EventDispatcher {
    registrations: Vec<Registration>,
    directory: Arc<DeviceDirectory>,
}

impl EventDispatcher {
    /// Bind handlers for the given devices
    pub fn bind(plugin_id: &str, devices: &[ConfiguredDevice]) -> Self {
        let mut seen = HashSet::new();
        let mut pending = Vec::new();

        for device in devices {
            let family = device.identifier.protocol_family();
            let Some(kind) = EventKind::parse(family) else {
                warn!(device = %device.id, %family, "No hardware event for protocol family");
                continue;
            };

            let (key, role) = match (device.role, device.device_type) {
                (DeviceRole::Input, DeviceType::Temperature) => (
                    ListenerKey::for_role(plugin_id, device.role, device.device_type),
                    HandlerRole::Temperature,
                ),
                (DeviceRole::Output, DeviceType::Switch) => {
                    (ListenerKey::for_family(plugin_id, family), HandlerRole::Switch)
                }
                (role, device_type) => {
                    warn!(
                        device = %device.id,
                        role = role.as_str(),
                        device_type = device_type.as_str(),
                        "No handler for device role and type"
                    );
                    continue;
                }
            };

            if seen.insert(key.clone()) {
                debug!(%key, %kind, "Registering listener");
                pending.push((kind, key, role));
            } else {
                debug!(%key, device = %device.id, "Listener already registered");
            }
        }

        let directory = Arc::new(DeviceDirectory::new(devices.to_vec()));
        let registrations = pending
            .into_iter()
            .map(|(kind, key, role)| Registration {
                kind,
                key,
                handler: role.handler(directory.clone()),
            })
            .collect();

        Self {
            registrations,
            directory,
        }
    }

    /// Convert a hardware event into signals, in device-list order
    pub fn dispatch(&self, event: &HardwareEvent) -> Vec<Signal> {
        self.registrations
            .iter()
            .filter(|registration| registration.kind == event.kind)
            .flat_map(|registration| (registration.handler)(&event.payload))
            .collect()
    }

    /// Number of underlying event subscriptions
    pub fn subscription_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn registered_keys(&self) -> Vec<&ListenerKey> {
        self.registrations.iter().map(|r| &r.key).collect()
    }

    /// Event kinds with at least one registration
    pub fn subscribed_kinds(&self) -> Vec<EventKind> {
        let mut kinds: Vec<EventKind> = Vec::new();
        for registration in &self.registrations {
            if !kinds.contains(&registration.kind) {
                kinds.push(registration.kind);
            }
        }
        kinds
    }

    pub fn attached_devices(&self) -> &[ConfiguredDevice] {
        self.directory.devices()
    }
}

#[derive(Clone, Copy)]
enum HandlerRole {
    Temperature,
    Switch,
}

impl HandlerRole {
    fn handler(self, directory: Arc<DeviceDirectory>) -> EventHandler {
        match self {
            HandlerRole::Temperature => Arc::new(move |payload: &EventPayload| match payload {
                EventPayload::Sensor(event) => on_input_temperature(&directory, event),
                _ => Vec::new(),
            }),
            HandlerRole::Switch => Arc::new(move |payload: &EventPayload| match payload {
                EventPayload::Switch(event) => on_output_switch(&directory, event),
                _ => Vec::new(),
            }),
        }
    }
}

fn on_input_temperature(directory: &DeviceDirectory, event: &SensorEvent) -> Vec<Signal> {
    directory
        .matching(&event.id)
        .map(|device| {
            let key = SubtypeCatalog::key(device.identifier.protocol_family(), &event.subtype);
            let description = SubtypeCatalog::describe(&key);
            let status = event
                .humidity_status
                .map(|code| HumidityStatus::from_code(code).to_string());

            debug!(
                device = %device.id,
                model = description,
                temperature = ?event.temperature,
                humidity = ?event.humidity,
                humidity_status = status.as_deref(),
                "Sensor reading"
            );

            let mut data = SignalData::new();
            data.insert(
                "deviceTypeString".to_string(),
                Value::String(description.to_string()),
            );
            insert_opt(&mut data, "temperature", event.temperature);
            insert_opt(&mut data, "humidity", event.humidity);
            insert_opt(&mut data, "humidityStatus", event.humidity_status);
            insert_opt(&mut data, "batteryLevel", event.battery_level);
            insert_opt(&mut data, "rssi", event.rssi);

            Signal::new(device.identifier.encode(), data, SignalSender::HardwareEcho)
        })
        .collect()
}

fn on_output_switch(directory: &DeviceDirectory, event: &SwitchEvent) -> Vec<Signal> {
    let address = event.address();
    let state = event
        .command
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_else(|| "trigger".to_string());

    directory
        .matching(&address)
        .map(|device| {
            debug!(device = %device.id, %address, %state, "Switch event");
            Signal::state(device.identifier.encode(), &state, SignalSender::HardwareEcho)
        })
        .collect()
}

fn insert_opt<T: Into<Value>>(data: &mut SignalData, field: &str, value: Option<T>) {
    if let Some(value) = value {
        data.insert(field.to_string(), value.into());
    }
}
