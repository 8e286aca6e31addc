//! Transceiver driver trait and types

use async_trait::async_trait;
use rfx_core::{HandlerMethod, ProtocolFamily};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::event::{HardwareEvent, StatusReport};
use crate::firmware::ProtocolFlag;
use crate::DriverError;

/// A single protocol command handed to the driver for transmission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransmitRequest {
    pub family: ProtocolFamily,
    /// Firmware subtype code
    pub subtype: u8,
    /// Hardware address, including `/unitCode` when present
    pub address: String,
    pub method: HandlerMethod,
}

/// Interface to the RF transceiver driver
///
/// Implementations own the physical transport and the byte-level encoding.
/// Inbound events of every family arrive on one broadcast channel as
/// [`HardwareEvent`] values.
#[async_trait]
pub trait TransceiverDriver: Send + Sync {
    /// Perform the hardware handshake
    ///
    /// Resolves with the status report the transceiver sends once it is
    /// ready. There is no timeout: a transceiver that never answers keeps
    /// the caller waiting.
    async fn initialise(&self) -> Result<StatusReport, DriverError>;

    /// Subscribe to inbound hardware events
    fn subscribe(&self) -> broadcast::Receiver<HardwareEvent>;

    /// Program the set of enabled receive protocols
    ///
    /// The firmware does not apply the change until the host restarts.
    async fn enable_protocols(&self, flags: &[ProtocolFlag]) -> Result<(), DriverError>;

    /// Transmit a protocol command, resolving when the driver reports completion
    async fn transmit(&self, request: &TransmitRequest) -> Result<(), DriverError>;
}
