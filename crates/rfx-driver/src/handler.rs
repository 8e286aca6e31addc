//! Protocol handler objects
//!
//! A handler binds the driver to one protocol family and subtype and exposes
//! the switch methods of that family.

use std::sync::Arc;

use rfx_core::{GatewayError, GatewayResult, HandlerMethod, ProtocolFamily};
use tracing::debug;

use crate::adapter::{TransceiverDriver, TransmitRequest};
use crate::DriverError;

/// Handler for one protocol family/subtype, bound to a driver
pub struct ProtocolHandler {
    driver: Arc<dyn TransceiverDriver>,
    family: ProtocolFamily,
    subtype: u8,
}

impl ProtocolHandler {
    /// Construct a handler for a family and subtype name
    pub fn new(
        driver: Arc<dyn TransceiverDriver>,
        family: ProtocolFamily,
        subtype_name: &str,
    ) -> GatewayResult<Self> {
        let subtype = family
            .descriptor()
            .subtype_code(subtype_name)
            .ok_or_else(|| GatewayError::UnknownSubtype {
                family: family.name().to_string(),
                subtype: subtype_name.to_string(),
            })?;

        Ok(Self {
            driver,
            family,
            subtype,
        })
    }

    pub fn family(&self) -> ProtocolFamily {
        self.family
    }

    pub fn subtype(&self) -> u8 {
        self.subtype
    }

    pub async fn switch_on(&self, address: &str) -> Result<(), DriverError> {
        self.invoke(HandlerMethod::SwitchOn, address).await
    }

    pub async fn switch_off(&self, address: &str) -> Result<(), DriverError> {
        self.invoke(HandlerMethod::SwitchOff, address).await
    }

    pub async fn chime(&self, address: &str) -> Result<(), DriverError> {
        self.invoke(HandlerMethod::Chime, address).await
    }

    /// Invoke a handler method, resolving on the driver's completion
    pub async fn invoke(&self, method: HandlerMethod, address: &str) -> Result<(), DriverError> {
        let request = TransmitRequest {
            family: self.family,
            subtype: self.subtype,
            address: address.to_string(),
            method,
        };
        debug!(family = %self.family, subtype = self.subtype, %address, %method, "Transmitting");
        self.driver.transmit(&request).await
    }
}
