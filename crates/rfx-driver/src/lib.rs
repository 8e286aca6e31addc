//! rfx-driver - Transceiver driver interface for the RFX gateway
//!
//! This crate expresses the RF transceiver driver the gateway consumes:
//! the handshake, the inbound event source, the enable-protocols command,
//! and the per-protocol handler objects that transmit switch commands.
//! Byte-level framing belongs to the driver implementation behind the trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TransceiverDriver                        │
//! │  initialise() -> StatusReport                               │
//! │  subscribe()  -> broadcast<HardwareEvent {kind, payload}>   │
//! │  enable_protocols(&[ProtocolFlag])                          │
//! │  transmit(&TransmitRequest)                                 │
//! │                          ▲                                  │
//! │              ┌───────────┴───────────┐                      │
//! │              │    ProtocolHandler    │                      │
//! │              │ switch_on/off, chime  │                      │
//! │              └───────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod adapter;
pub mod config;
pub mod error;
pub mod event;
pub mod firmware;
pub mod handler;
pub mod mock;

pub use adapter::{TransceiverDriver, TransmitRequest};
pub use config::{MockConfig, SerialConfig, TransportConfig};
pub use error::DriverError;
pub use event::{
    EventKind, EventPayload, HardwareEvent, HumidityStatus, SensorEvent, StatusReport,
    SwitchEvent,
};
pub use firmware::ProtocolFlag;
pub use handler::ProtocolHandler;
pub use mock::MockTransceiver;

use std::sync::Arc;

/// Create a transceiver driver based on configuration
pub fn create_driver(config: &TransportConfig) -> Result<Arc<dyn TransceiverDriver>, DriverError> {
    match config {
        TransportConfig::Serial(cfg) => Err(DriverError::Unsupported(format!(
            "no serial transceiver driver is linked into this build (port {})",
            cfg.port
        ))),
        TransportConfig::Mock(cfg) => {
            let driver = MockTransceiver::new(cfg);
            Ok(Arc::new(driver))
        }
    }
}
