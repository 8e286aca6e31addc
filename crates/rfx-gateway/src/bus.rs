//! Produced-signal channel towards the host bus

use rfx_core::Signal;
use tokio::sync::broadcast;
use tracing::debug;

/// Broadcast channel carrying signals produced by the gateway
#[derive(Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<Signal>,
}

impl SignalBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a signal; returns the number of receivers it reached
    pub fn publish(&self, signal: Signal) -> usize {
        debug!(device_id = %signal.device_id, sender = ?signal.sender, "Broadcasting signal");
        self.tx.send(signal).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.tx.subscribe()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfx_core::SignalSender;

    #[tokio::test]
    async fn publish_reaches_subscribers() {
        let bus = SignalBus::default();
        let mut rx = bus.subscribe();

        let delivered = bus.publish(Signal::state("Lighting2/AC-0x01", "on", SignalSender::Bus));
        assert_eq!(delivered, 1);
        assert_eq!(rx.recv().await.unwrap().state_value(), Some("on"));
    }

    #[test]
    fn publish_without_subscribers_is_not_an_error() {
        let bus = SignalBus::default();
        assert_eq!(
            bus.publish(Signal::state("Lighting2/AC-0x01", "on", SignalSender::Bus)),
            0
        );
    }
}
