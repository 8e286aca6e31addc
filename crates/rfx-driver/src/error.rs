//! Driver layer errors

use rfx_core::GatewayError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum DriverError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Handshake failed: {0}")]
    HandshakeFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Driver not supported: {0}")]
    Unsupported(String),
}

impl From<DriverError> for GatewayError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::HandshakeFailed(msg) | DriverError::ConnectionFailed(msg) => {
                GatewayError::Initialization(msg)
            }
            DriverError::InvalidConfig(msg) | DriverError::Unsupported(msg) => {
                GatewayError::Config(msg)
            }
            other => GatewayError::Driver(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_failure_maps_to_initialization() {
        let err: GatewayError = DriverError::HandshakeFailed("no response".into()).into();
        assert_eq!(err, GatewayError::Initialization("no response".into()));
    }

    #[test]
    fn send_failure_maps_to_driver() {
        let err: GatewayError = DriverError::SendFailed("tx buffer full".into()).into();
        assert_eq!(
            err,
            GatewayError::Driver("Send failed: tx buffer full".into())
        );
    }
}
