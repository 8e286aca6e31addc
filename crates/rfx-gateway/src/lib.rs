//! rfx-gateway - Protocol translation and device dispatch
//!
//! This crate sits between the generic home-automation signal bus and the RF
//! transceiver driver. Outbound `{state}` signals become protocol handler
//! invocations; inbound hardware events become generic signals.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            Gateway                               │
//! │                                                                  │
//! │   bus ──▶ CommandTranslator ──▶ ProtocolHandler ──▶ driver       │
//! │    ▲                                                   │         │
//! │    └────── EventDispatcher ◀── HardwareEvent {kind} ◀──┘         │
//! │                 │                                                │
//! │          one registration per ListenerKey (deduplicated)         │
//! │                                                                  │
//! │   bootstrap: initialise ─▶ ProtocolReconciler ─▶ bind listeners  │
//! │              (or ListenMonitor in listen-only mode)              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use rfx_gateway::{Gateway, GatewayConfig, SignalBus};
//!
//! let config = GatewayConfig::load("rfxd.toml")?;
//! let driver = rfx_driver::create_driver(&config.transport)?;
//! let bus = SignalBus::default();
//!
//! let gateway = Arc::new(Gateway::start(&config, driver, bus.clone()).await?);
//! gateway.spawn_event_loop();
//! gateway.handle_outbound(&signal).await?;
//! ```

pub mod bus;
pub mod config;
pub mod devices;
pub mod dispatcher;
mod gateway;
pub mod listen;
pub mod reconciler;
pub mod translator;

pub use bus::SignalBus;
pub use config::{
    DeviceConfig, DevicePlugin, DeviceRole, DeviceType, GatewayConfig, PluginSettings,
};
pub use devices::{ConfiguredDevice, DeviceDirectory};
pub use dispatcher::{EventDispatcher, ListenerKey};
pub use gateway::{Gateway, GatewayState, OperatingMode};
pub use listen::ListenMonitor;
pub use reconciler::{ProtocolReconciler, ReconcileOutcome};
pub use translator::CommandTranslator;

// Re-export core types for convenience
pub use rfx_core::{DeviceIdentifier, GatewayError, GatewayResult, Signal, SignalSender};
