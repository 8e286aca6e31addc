//! Common error types for the gateway

use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while translating, dispatching or bootstrapping
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Device identifier lacks the required delimiters
    #[error("Malformed device identifier: {0}")]
    MalformedIdentifier(String),

    /// Outbound command names a protocol family with no registered constructor
    #[error("Unknown protocol family: {0}")]
    UnknownProtocol(String),

    /// Protocol family is known but the subtype is not in its table
    #[error("Unknown subtype {subtype} for protocol {family}")]
    UnknownSubtype { family: String, subtype: String },

    /// Outbound verb is not in the translation table or the family vocabulary
    #[error("Unsupported command: {0}")]
    UnsupportedCommand(String),

    /// Hardware handshake failed; the plugin stays non-functional
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// A configured enabled-protocol name has no firmware flag
    #[error("Unknown firmware protocol name: {0}")]
    UnknownProtocolName(String),

    /// Driver/transport failure while executing a command
    #[error("Driver error: {0}")]
    Driver(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Whether the error is local to a single outbound command.
    ///
    /// Command-local errors are returned to the caller and never affect the
    /// dispatch loop or other devices.
    pub fn is_command_local(&self) -> bool {
        matches!(
            self,
            GatewayError::MalformedIdentifier(_)
                | GatewayError::UnknownProtocol(_)
                | GatewayError::UnknownSubtype { .. }
                | GatewayError::UnsupportedCommand(_)
                | GatewayError::Driver(_)
        )
    }
}
