//! Listen-only monitor
//!
//! Logs every received event together with a device record snippet that can
//! be pasted into the configuration. Nothing is translated or published.

use rfx_driver::{EventPayload, HardwareEvent};
use tracing::info;

pub struct ListenMonitor {
    plugin_id: String,
}

impl ListenMonitor {
    pub fn new(plugin_id: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
        }
    }

    /// Device record snippet for an event, if it carries a device id
    pub fn config_snippet(&self, event: &HardwareEvent) -> Option<String> {
        let id = event.device_id()?;
        Some(format!(
            "plugin = {{ id = \"{}\", device_id = \"{}-{}\" }}",
            self.plugin_id, event.kind, id
        ))
    }

    /// Log a received event; status reports are skipped
    pub fn observe(&self, event: &HardwareEvent) {
        if matches!(event.payload, EventPayload::Status(_)) {
            return;
        }

        let payload = serde_json::to_string(&event.payload).unwrap_or_default();
        match self.config_snippet(event) {
            Some(snippet) => info!(kind = %event.kind, %payload, %snippet, "Received event"),
            None => info!(kind = %event.kind, %payload, "Received event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfx_driver::{EventKind, SwitchEvent};
    use serde_json::json;

    #[test]
    fn snippet_uses_event_kind_and_id() {
        let monitor = ListenMonitor::new("RFXCOM");
        let event = HardwareEvent::switch(
            EventKind::Lighting2,
            SwitchEvent {
                id: "0x0102ABCD".to_string(),
                unit_code: Some("1".to_string()),
                command: Some("On".to_string()),
                rssi: Some(7),
            },
        );

        assert_eq!(
            monitor.config_snippet(&event).as_deref(),
            Some(r#"plugin = { id = "RFXCOM", device_id = "lighting2-0x0102ABCD" }"#)
        );
    }

    #[test]
    fn raw_events_with_id() {
        let monitor = ListenMonitor::new("RFXCOM");
        let event = HardwareEvent::new(
            EventKind::Wind1,
            EventPayload::Raw(json!({"id": "0x3301", "direction": 180})),
        );
        assert_eq!(
            monitor.config_snippet(&event).as_deref(),
            Some(r#"plugin = { id = "RFXCOM", device_id = "wind1-0x3301" }"#)
        );

        let anonymous = HardwareEvent::new(EventKind::DateTime, EventPayload::Raw(json!({})));
        assert_eq!(monitor.config_snippet(&anonymous), None);
        monitor.observe(&anonymous);
    }
}
