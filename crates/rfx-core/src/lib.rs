//! rfx-core - Core types for the RFX transceiver gateway
//!
//! This crate provides the leaf abstractions shared by the driver and gateway
//! layers: the composite device identifier used on the home-automation bus,
//! the generic signal model, the registry of transmit-capable RF protocol
//! families, and the static subtype catalog.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod protocol;
pub mod signal;

pub use catalog::{SubtypeCatalog, UNKNOWN_DEVICE};
pub use error::{GatewayError, GatewayResult};
pub use identity::DeviceIdentifier;
pub use protocol::{GenericVerb, HandlerMethod, ProtocolDescriptor, ProtocolFamily};
pub use signal::{Signal, SignalData, SignalSender};
