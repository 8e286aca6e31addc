//! End-to-end tests for the RFX gateway against the mock transceiver
//!
//! Each test writes a gateway config to a temp file, loads it the way the
//! daemon does, bootstraps the gateway on a mock transceiver and observes
//! the signal bus.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rfx_core::{HandlerMethod, ProtocolFamily};
use rfx_driver::{
    EventKind, EventPayload, HardwareEvent, MockTransceiver, ProtocolFlag, SensorEvent,
    SwitchEvent, TransportConfig,
};
use rfx_gateway::{
    Gateway, GatewayConfig, GatewayError, OperatingMode, Signal, SignalBus, SignalSender,
};
use serde_json::json;
use tokio::sync::broadcast;
use tokio_test::{assert_err, assert_ok};

const SIGNAL_TIMEOUT: Duration = Duration::from_secs(2);
const QUIET_PERIOD: Duration = Duration::from_millis(150);

const BASE_CONFIG: &str = r#"
[plugin]
id = "RFXCOM"
port = "/dev/ttyUSB0"
listen_only = false
enabled_protocols = ["AC", "ARC", "OREGON"]

[transport]
type = "mock"
latency_ms = 5
enabled_protocols = ["OREGON", "AC", "ARC"]

[[devices]]
id = "lamp"
role = "output"
type = "switch"
plugin = { id = "RFXCOM", device_id = "Lighting2/AC-0x01" }

[[devices]]
id = "lamp-gang3"
role = "output"
type = "switch"
plugin = { id = "RFXCOM", device_id = "Lighting2/AC-0x02/3" }

[[devices]]
id = "doorbell"
role = "output"
type = "switch"
plugin = { id = "RFXCOM", device_id = "Chime1/BYRON_SX-0x00A1" }

[[devices]]
id = "garden"
role = "input"
type = "temperature"
plugin = { id = "RFXCOM", device_id = "temperaturehumidity1-0x7A02" }

[[devices]]
id = "broken"
role = "output"
type = "switch"
plugin = { id = "RFXCOM", device_id = "Lighting2" }

[[devices]]
id = "elsewhere"
role = "output"
type = "switch"
plugin = { id = "OTHER", device_id = "Lighting2/AC-0x01" }
"#;

/// Test harness owning the mock transceiver, the gateway and a bus receiver
struct GatewayHarness {
    mock: Arc<MockTransceiver>,
    gateway: Arc<Gateway>,
    signals: broadcast::Receiver<Signal>,
    _config_file: tempfile::NamedTempFile,
}

impl GatewayHarness {
    async fn new(config: &str) -> Result<Self, GatewayError> {
        let mut file = tempfile::NamedTempFile::new().expect("create temp config");
        file.write_all(config.as_bytes()).expect("write temp config");

        let config = GatewayConfig::load(file.path())?;
        let TransportConfig::Mock(mock_config) = &config.transport else {
            panic!("tests require the mock transport");
        };
        let mock = Arc::new(MockTransceiver::new(mock_config));

        let bus = SignalBus::default();
        let signals = bus.subscribe();
        let gateway = Arc::new(Gateway::start(&config, mock.clone(), bus).await?);
        gateway.spawn_event_loop();

        Ok(Self {
            mock,
            gateway,
            signals,
            _config_file: file,
        })
    }

    async fn next_signal(&mut self) -> Signal {
        tokio::time::timeout(SIGNAL_TIMEOUT, self.signals.recv())
            .await
            .expect("timed out waiting for signal")
            .expect("signal bus closed")
    }

    async fn assert_quiet(&mut self) {
        let result = tokio::time::timeout(QUIET_PERIOD, self.signals.recv()).await;
        assert!(result.is_err(), "unexpected signal: {:?}", result);
    }
}

fn switch_event(
    kind: EventKind,
    id: &str,
    unit_code: Option<&str>,
    command: Option<&str>,
) -> HardwareEvent {
    HardwareEvent::switch(
        kind,
        SwitchEvent {
            id: id.to_string(),
            unit_code: unit_code.map(str::to_string),
            command: command.map(str::to_string),
            rssi: Some(5),
        },
    )
}

fn sensor_event(id: &str, subtype: &str) -> HardwareEvent {
    HardwareEvent::sensor(
        EventKind::TemperatureHumidity1,
        SensorEvent {
            id: id.to_string(),
            subtype: subtype.to_string(),
            temperature: Some(12.3),
            humidity: Some(81.0),
            humidity_status: Some(3),
            battery_level: Some(9),
            rssi: Some(4),
        },
    )
}

#[tokio::test]
async fn test_bootstrap_in_sync() {
    let harness = GatewayHarness::new(BASE_CONFIG).await.unwrap();

    let state = harness.gateway.state();
    assert_eq!(state.plugin_id, "RFXCOM");
    assert_eq!(state.mode, OperatingMode::Normal);
    assert!(!state.reconcile.as_ref().unwrap().restart_required());
    assert!(harness.mock.enable_requests().is_empty());

    let dispatcher = harness.gateway.dispatcher().unwrap();
    // broken and elsewhere are never attached
    assert_eq!(dispatcher.attached_devices().len(), 4);
    // lighting2 (shared by two switches), chime1, input temperature
    assert_eq!(dispatcher.subscription_count(), 3);
}

#[tokio::test]
async fn test_bootstrap_reprograms_receiver() {
    let config = BASE_CONFIG.replace(
        r#"enabled_protocols = ["OREGON", "AC", "ARC"]"#,
        r#"enabled_protocols = ["AC"]"#,
    );
    let harness = GatewayHarness::new(&config).await.unwrap();

    assert!(harness
        .gateway
        .state()
        .reconcile
        .as_ref()
        .unwrap()
        .restart_required());
    assert_eq!(
        harness.mock.enable_requests(),
        vec![vec![
            ProtocolFlag::for_name("AC").unwrap(),
            ProtocolFlag::for_name("ARC").unwrap(),
            ProtocolFlag::for_name("OREGON").unwrap(),
        ]]
    );
}

#[tokio::test]
async fn test_unknown_configured_protocol_stops_bootstrap() {
    let config = BASE_CONFIG.replace(
        r#"enabled_protocols = ["AC", "ARC", "OREGON"]"#,
        r#"enabled_protocols = ["AC", "NOPE"]"#,
    );

    let result = GatewayHarness::new(&config).await;
    assert!(matches!(
        result,
        Err(GatewayError::UnknownProtocolName(name)) if name == "NOPE"
    ));
}

#[tokio::test]
async fn test_handshake_failure() {
    let config = BASE_CONFIG.replace("latency_ms = 5", "latency_ms = 5\nfail_handshake = true");

    let result = GatewayHarness::new(&config).await;
    assert!(matches!(result, Err(GatewayError::Initialization(_))));
}

#[tokio::test]
async fn test_outbound_commands_are_transmitted_and_confirmed() {
    let mut harness = GatewayHarness::new(BASE_CONFIG).await.unwrap();

    let on = Signal::state("Lighting2/AC-0x02/3", "on", SignalSender::Bus);
    let confirmation = assert_ok!(harness.gateway.handle_outbound(&on).await);
    assert_eq!(confirmation, Some(on.clone()));
    assert_eq!(harness.next_signal().await, on);

    let ring = Signal::state("Chime1/BYRON_SX-0x00A1", "trigger", SignalSender::Bus);
    assert_ok!(harness.gateway.handle_outbound(&ring).await);
    assert_eq!(harness.next_signal().await, ring);

    let sent = harness.mock.transmitted();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].family, ProtocolFamily::Lighting2);
    assert_eq!(sent[0].address, "0x02/3");
    assert_eq!(sent[0].method, HandlerMethod::SwitchOn);
    assert_eq!(sent[1].family, ProtocolFamily::Chime1);
    assert_eq!(sent[1].subtype, 0x00);
    assert_eq!(sent[1].method, HandlerMethod::Chime);
}

#[tokio::test]
async fn test_rejected_commands_do_not_reach_hardware() {
    let mut harness = GatewayHarness::new(BASE_CONFIG).await.unwrap();

    let unsupported = |e: &GatewayError| matches!(e, GatewayError::UnsupportedCommand(_));
    let cases: [(&str, &str, &dyn Fn(&GatewayError) -> bool); 5] = [
        ("Lighting2/AC-0x01", "dim", &unsupported),
        ("Chime1/BYRON_SX-0x00A1", "off", &unsupported),
        ("Security1/X10-0x01", "on", &|e: &GatewayError| {
            matches!(e, GatewayError::UnknownProtocol(_))
        }),
        ("Lighting2-AC", "on", &|e: &GatewayError| {
            matches!(e, GatewayError::UnknownSubtype { .. })
        }),
        ("nodash", "on", &|e: &GatewayError| {
            matches!(e, GatewayError::MalformedIdentifier(_))
        }),
    ];

    for (device_id, state, expected) in cases {
        let signal = Signal::state(device_id, state, SignalSender::Bus);
        let err = assert_err!(harness.gateway.handle_outbound(&signal).await);
        assert!(expected(&err), "{}: unexpected error {:?}", device_id, err);
        assert!(err.is_command_local());
    }

    assert!(harness.mock.transmitted().is_empty());
    harness.assert_quiet().await;
}

#[tokio::test]
async fn test_physical_switch_is_echoed_once() {
    let mut harness = GatewayHarness::new(BASE_CONFIG).await.unwrap();

    harness
        .mock
        .inject(switch_event(EventKind::Lighting2, "0x02", Some("3"), Some("Off")));

    let echo = harness.next_signal().await;
    assert_eq!(
        echo,
        Signal::state("Lighting2/AC-0x02/3", "off", SignalSender::HardwareEcho)
    );
    harness.assert_quiet().await;

    // The host bus feeding the echo back must not retransmit it
    assert_eq!(assert_ok!(harness.gateway.handle_outbound(&echo).await), None);
    assert!(harness.mock.transmitted().is_empty());
}

#[tokio::test]
async fn test_remote_without_command_is_trigger() {
    let mut harness = GatewayHarness::new(BASE_CONFIG).await.unwrap();

    harness
        .mock
        .inject(switch_event(EventKind::Chime1, "0x00A1", None, None));

    let signal = harness.next_signal().await;
    assert_eq!(signal.device_id, "Chime1/BYRON_SX-0x00A1");
    assert_eq!(signal.state_value(), Some("trigger"));
    assert_eq!(signal.sender, SignalSender::HardwareEcho);
}

#[tokio::test]
async fn test_sensor_reading_is_normalized() {
    let mut harness = GatewayHarness::new(BASE_CONFIG).await.unwrap();

    harness.mock.inject(sensor_event("0x7A02", "5"));

    let signal = harness.next_signal().await;
    assert_eq!(signal.device_id, "temperaturehumidity1-0x7A02");
    assert_eq!(signal.sender, SignalSender::HardwareEcho);
    assert_eq!(
        serde_json::Value::Object(signal.data),
        json!({
            "deviceTypeString": "WTGR800",
            "temperature": 12.3,
            "humidity": 81.0,
            "humidityStatus": 3,
            "batteryLevel": 9,
            "rssi": 4
        })
    );
}

#[tokio::test]
async fn test_unknown_addresses_produce_nothing() {
    let mut harness = GatewayHarness::new(BASE_CONFIG).await.unwrap();

    harness.mock.inject(sensor_event("0xFFFF", "1"));
    harness
        .mock
        .inject(switch_event(EventKind::Lighting2, "0x09", None, Some("On")));
    // No device listens for this family
    harness
        .mock
        .inject(switch_event(EventKind::Lighting5, "0x01", None, Some("On")));
    harness.mock.inject(HardwareEvent::new(
        EventKind::Wind1,
        EventPayload::Raw(json!({"id": "0x3301", "averageSpeed": 4.2})),
    ));

    harness.assert_quiet().await;
}

#[tokio::test]
async fn test_listen_only_mode_translates_nothing() {
    let config = BASE_CONFIG.replace("listen_only = false", "listen_only = true");
    let mut harness = GatewayHarness::new(&config).await.unwrap();

    assert_eq!(harness.gateway.state().mode, OperatingMode::ListenOnly);
    assert!(harness.gateway.state().reconcile.is_none());

    harness
        .mock
        .inject(switch_event(EventKind::Lighting2, "0x01", None, Some("On")));
    harness.mock.inject(sensor_event("0x7A02", "1"));
    harness.assert_quiet().await;

    let signal = Signal::state("Lighting2/AC-0x01", "on", SignalSender::Bus);
    assert_eq!(assert_ok!(harness.gateway.handle_outbound(&signal).await), None);
    assert!(harness.mock.transmitted().is_empty());
    assert!(harness.mock.enable_requests().is_empty());
}

#[tokio::test]
async fn test_wire_format_of_produced_signals() {
    let mut harness = GatewayHarness::new(BASE_CONFIG).await.unwrap();

    let inbound: Signal =
        serde_json::from_str(r#"{"deviceId":"Lighting2/AC-0x01","data":{"state":"off"}}"#)
            .unwrap();
    assert_ok!(harness.gateway.handle_outbound(&inbound).await);

    let confirmation = serde_json::to_value(harness.next_signal().await).unwrap();
    assert_eq!(
        confirmation,
        json!({
            "deviceId": "Lighting2/AC-0x01",
            "data": {"state": "off"},
            "sender": "bus"
        })
    );
}
