//! Mock transceiver for testing and demo mode

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::adapter::{TransceiverDriver, TransmitRequest};
use crate::config::MockConfig;
use crate::event::{EventKind, EventPayload, HardwareEvent, StatusReport};
use crate::firmware::ProtocolFlag;
use crate::DriverError;

/// Mock transceiver that records every command it receives
pub struct MockTransceiver {
    config: MockConfig,
    connected: AtomicBool,
    events_tx: broadcast::Sender<HardwareEvent>,
    transmitted: RwLock<Vec<TransmitRequest>>,
    enable_requests: RwLock<Vec<Vec<ProtocolFlag>>>,
    /// Failure injected into the next transmit
    transmit_failure: RwLock<Option<DriverError>>,
}

impl MockTransceiver {
    pub fn new(config: &MockConfig) -> Self {
        let (events_tx, _) = broadcast::channel(256);
        Self {
            config: config.clone(),
            connected: AtomicBool::new(false),
            events_tx,
            transmitted: RwLock::new(Vec::new()),
            enable_requests: RwLock::new(Vec::new()),
            transmit_failure: RwLock::new(None),
        }
    }

    /// Inject an inbound event (simulates a radio frame being received)
    pub fn inject(&self, event: HardwareEvent) {
        let _ = self.events_tx.send(event);
    }

    /// Commands transmitted so far, in order
    pub fn transmitted(&self) -> Vec<TransmitRequest> {
        self.transmitted.read().clone()
    }

    /// Flag sets passed to `enable_protocols`, one entry per call
    pub fn enable_requests(&self) -> Vec<Vec<ProtocolFlag>> {
        self.enable_requests.read().clone()
    }

    /// Make the next transmit fail with the given error
    pub fn fail_next_transmit(&self, error: DriverError) {
        *self.transmit_failure.write() = Some(error);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn status_report(&self) -> StatusReport {
        StatusReport {
            receiver_type: self.config.receiver_type.clone(),
            firmware_version: self.config.firmware_version,
            enabled_protocols: self.config.enabled_protocols.clone(),
        }
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

#[async_trait]
impl TransceiverDriver for MockTransceiver {
    async fn initialise(&self) -> Result<StatusReport, DriverError> {
        self.simulate_latency().await;

        if self.config.fail_handshake {
            return Err(DriverError::HandshakeFailed(
                "mock transceiver configured to fail the handshake".to_string(),
            ));
        }

        self.connected.store(true, Ordering::SeqCst);
        let status = self.status_report();
        let _ = self.events_tx.send(HardwareEvent::new(
            EventKind::Status,
            EventPayload::Status(status.clone()),
        ));

        tracing::debug!(?status, "Mock transceiver: handshake complete");
        Ok(status)
    }

    fn subscribe(&self) -> broadcast::Receiver<HardwareEvent> {
        self.events_tx.subscribe()
    }

    async fn enable_protocols(&self, flags: &[ProtocolFlag]) -> Result<(), DriverError> {
        if !self.is_connected() {
            return Err(DriverError::ConnectionClosed);
        }

        self.simulate_latency().await;
        tracing::debug!(?flags, "Mock transceiver: enable protocols");
        self.enable_requests.write().push(flags.to_vec());
        Ok(())
    }

    async fn transmit(&self, request: &TransmitRequest) -> Result<(), DriverError> {
        if !self.is_connected() {
            return Err(DriverError::ConnectionClosed);
        }

        self.simulate_latency().await;

        if let Some(error) = self.transmit_failure.write().take() {
            return Err(error);
        }

        tracing::debug!(?request, "Mock transceiver: transmitted");
        self.transmitted.write().push(request.clone());
        Ok(())
    }
}
