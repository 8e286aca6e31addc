//! Integration tests for the RFX gateway
//!
//! End-to-end tests that drive the full stack against the mock transceiver:
//! - configuration loading
//! - bootstrap (handshake, protocol reconciliation, listener binding)
//! - outbound command translation and confirmation
//! - inbound event dispatch onto the signal bus
//!
//! No hardware is required:
//!
//! ```bash
//! cargo test -p rfx-tests
//! ```

// This crate only contains tests, no library code
