//! Gateway bootstrap and runtime

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rfx_core::{GatewayError, GatewayResult, Signal, SignalSender};
use rfx_driver::{HardwareEvent, StatusReport, TransceiverDriver};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::bus::SignalBus;
use crate::config::GatewayConfig;
use crate::dispatcher::EventDispatcher;
use crate::listen::ListenMonitor;
use crate::reconciler::{ProtocolReconciler, ReconcileOutcome};
use crate::translator::CommandTranslator;

/// Operating mode, fixed at bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    ListenOnly,
    Normal,
}

/// Immutable result of the bootstrap sequence
#[derive(Debug, Clone, Serialize)]
pub struct GatewayState {
    pub plugin_id: String,
    pub mode: OperatingMode,
    /// Status captured from the handshake
    pub status: StatusReport,
    /// `None` in listen-only mode
    pub reconcile: Option<ReconcileOutcome>,
}

enum Inbound {
    Listen(ListenMonitor),
    Dispatch(EventDispatcher),
}

/// A bootstrapped gateway instance
pub struct Gateway {
    state: GatewayState,
    inbound: Inbound,
    translator: CommandTranslator,
    bus: SignalBus,
    events: Mutex<Option<broadcast::Receiver<HardwareEvent>>>,
    listener_handle: RwLock<Option<JoinHandle<()>>>,
}

impl Gateway {
    /// Run the bootstrap sequence
    ///
    /// Waits for the handshake, then either enters listen-only mode or
    /// reconciles the enabled protocols and binds the device listeners.
    pub async fn start(
        config: &GatewayConfig,
        driver: Arc<dyn TransceiverDriver>,
        bus: SignalBus,
    ) -> GatewayResult<Self> {
        let plugin = &config.plugin;
        // Subscribe first so nothing sent during the handshake is missed
        let events = driver.subscribe();

        info!(port = %plugin.port, listen_only = plugin.listen_only, "Initialising transceiver");
        let status = driver.initialise().await.map_err(|e| {
            error!(error = %e, port = %plugin.port, "Transceiver handshake failed");
            GatewayError::Initialization(e.to_string())
        })?;
        info!(
            receiver_type = %status.receiver_type,
            firmware_version = status.firmware_version,
            protocols = ?status.enabled_protocols,
            "Transceiver ready"
        );

        let (mode, inbound, reconcile) = if plugin.listen_only {
            info!("Listen-only mode, received events are logged and not translated");
            (
                OperatingMode::ListenOnly,
                Inbound::Listen(ListenMonitor::new(&plugin.id)),
                None,
            )
        } else {
            let outcome = ProtocolReconciler::new(driver.clone())
                .reconcile(&plugin.enabled_protocols, &status)
                .await?;

            let devices = config.plugin_devices();
            let dispatcher = EventDispatcher::bind(&plugin.id, &devices);
            info!(
                devices = devices.len(),
                subscriptions = dispatcher.subscription_count(),
                "Device listeners bound"
            );
            (
                OperatingMode::Normal,
                Inbound::Dispatch(dispatcher),
                Some(outcome),
            )
        };

        Ok(Self {
            state: GatewayState {
                plugin_id: plugin.id.clone(),
                mode,
                status,
                reconcile,
            },
            inbound,
            translator: CommandTranslator::new(driver),
            bus,
            events: Mutex::new(Some(events)),
            listener_handle: RwLock::new(None),
        })
    }

    pub fn state(&self) -> &GatewayState {
        &self.state
    }

    pub fn dispatcher(&self) -> Option<&EventDispatcher> {
        match &self.inbound {
            Inbound::Dispatch(dispatcher) => Some(dispatcher),
            Inbound::Listen(_) => None,
        }
    }

    /// Handle an outbound signal from the bus
    ///
    /// Returns the published confirmation, or `None` when the signal was
    /// ignored (listen-only mode, or an echo of a hardware event).
    pub async fn handle_outbound(&self, signal: &Signal) -> GatewayResult<Option<Signal>> {
        if self.state.mode == OperatingMode::ListenOnly {
            debug!(device_id = %signal.device_id, "Listen-only mode, ignoring outbound signal");
            return Ok(None);
        }
        if signal.sender == SignalSender::HardwareEcho {
            debug!(device_id = %signal.device_id, "Ignoring hardware echo");
            return Ok(None);
        }

        let confirmation = self.translator.execute(signal).await.map_err(|e| {
            warn!(device_id = %signal.device_id, error = %e, "Outbound signal dropped");
            e
        })?;
        self.bus.publish(confirmation.clone());
        Ok(Some(confirmation))
    }

    /// Handle one hardware event, publishing the produced signals
    pub fn handle_event(&self, event: &HardwareEvent) -> Vec<Signal> {
        match &self.inbound {
            Inbound::Listen(monitor) => {
                monitor.observe(event);
                Vec::new()
            }
            Inbound::Dispatch(dispatcher) => {
                let signals = dispatcher.dispatch(event);
                for signal in &signals {
                    self.bus.publish(signal.clone());
                }
                signals
            }
        }
    }

    /// Start the background loop consuming hardware events
    ///
    /// The loop runs until the driver's event channel closes. Calling this
    /// more than once has no effect.
    pub fn spawn_event_loop(self: &Arc<Self>) {
        let Some(mut events) = self.events.lock().take() else {
            warn!("Event loop already running");
            return;
        };
        let gateway = Arc::clone(self);

        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        gateway.handle_event(&event);
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "Hardware event listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        info!("Hardware event channel closed");
                        break;
                    }
                }
            }
        });

        *self.listener_handle.write() = Some(handle);
    }

    /// Whether the event loop task is still running
    pub fn is_listening(&self) -> bool {
        self.listener_handle
            .read()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
