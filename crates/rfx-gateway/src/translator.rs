//! Outbound command translation
//!
//! A `{state}` signal from the bus is resolved to a protocol handler and one
//! of its methods. All validation happens before the driver is touched, so a
//! rejected command never reaches the hardware.

use std::sync::Arc;

use rfx_core::{
    DeviceIdentifier, GatewayError, GatewayResult, GenericVerb, HandlerMethod, ProtocolFamily,
    Signal, SignalSender,
};
use rfx_driver::{ProtocolHandler, TransceiverDriver};
use tracing::{debug, info};

/// A validated outbound command, ready to be sent
pub struct PreparedCommand {
    pub identifier: DeviceIdentifier,
    pub verb: GenericVerb,
    handler: ProtocolHandler,
}

impl PreparedCommand {
    pub fn method(&self) -> HandlerMethod {
        self.verb.method()
    }
}

/// Converts outbound signals into protocol handler invocations
pub struct CommandTranslator {
    driver: Arc<dyn TransceiverDriver>,
}

impl CommandTranslator {
    pub fn new(driver: Arc<dyn TransceiverDriver>) -> Self {
        Self { driver }
    }

    /// Validate a signal and bind it to a protocol handler
    pub fn prepare(&self, signal: &Signal) -> GatewayResult<PreparedCommand> {
        let identifier = signal.identifier()?;

        let family = ProtocolFamily::parse(identifier.protocol_family()).ok_or_else(|| {
            GatewayError::UnknownProtocol(identifier.protocol_family().to_string())
        })?;

        let handler = ProtocolHandler::new(
            self.driver.clone(),
            family,
            identifier.protocol_sub_type(),
        )?;

        let state = signal.state_value().unwrap_or_default();
        let verb = GenericVerb::parse(state)
            .filter(|verb| family.descriptor().supports(*verb))
            .ok_or_else(|| GatewayError::UnsupportedCommand(state.to_string()))?;

        Ok(PreparedCommand {
            identifier,
            verb,
            handler,
        })
    }

    /// Send a prepared command and build its confirmation signal
    ///
    /// The confirmation echoes the requested state once the driver reports
    /// completion; no state is read back from the hardware.
    pub async fn send(&self, command: PreparedCommand) -> GatewayResult<Signal> {
        let address = command.identifier.address_with_unit();
        command.handler.invoke(command.method(), &address).await?;

        info!(
            device_id = %command.identifier,
            state = %command.verb,
            "Command delivered"
        );
        Ok(Signal::state(
            command.identifier.encode(),
            command.verb.as_str(),
            SignalSender::Bus,
        ))
    }

    /// Translate and send an outbound signal
    pub async fn execute(&self, signal: &Signal) -> GatewayResult<Signal> {
        let command = self.prepare(signal)?;
        debug!(
            device_id = %command.identifier,
            method = %command.method(),
            "Translated outbound signal"
        );
        self.send(command).await
    }
}
