//! Enabled-protocol reconciliation
//!
//! Runs once after the handshake. When the protocols reported by the
//! receiver differ from the configured list, the configured set is written to
//! the firmware. The firmware only applies the new mode after a restart.

use std::sync::Arc;

use rfx_core::{GatewayError, GatewayResult};
use rfx_driver::{ProtocolFlag, StatusReport, TransceiverDriver};
use serde::Serialize;
use tracing::{error, info, warn};

/// Result of a reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// Receiver already has the configured protocols enabled
    InSync,
    /// The configured protocols were written to the firmware
    Reprogrammed {
        flags: Vec<ProtocolFlag>,
        restart_required: bool,
    },
}

impl ReconcileOutcome {
    pub fn restart_required(&self) -> bool {
        matches!(
            self,
            ReconcileOutcome::Reprogrammed {
                restart_required: true,
                ..
            }
        )
    }
}

pub struct ProtocolReconciler {
    driver: Arc<dyn TransceiverDriver>,
}

impl ProtocolReconciler {
    pub fn new(driver: Arc<dyn TransceiverDriver>) -> Self {
        Self { driver }
    }

    /// Compare configured and reported protocol names, reprogramming on mismatch
    pub async fn reconcile(
        &self,
        configured: &[String],
        status: &StatusReport,
    ) -> GatewayResult<ReconcileOutcome> {
        if same_protocols(configured, &status.enabled_protocols) {
            info!(protocols = ?configured, "Enabled protocols match configuration");
            return Ok(ReconcileOutcome::InSync);
        }

        warn!(
            configured = ?configured,
            reported = ?status.enabled_protocols,
            "Enabled protocols differ from configuration"
        );

        let flags = configured
            .iter()
            .map(|name| {
                ProtocolFlag::for_name(name)
                    .ok_or_else(|| GatewayError::UnknownProtocolName(name.clone()))
            })
            .collect::<GatewayResult<Vec<_>>>()?;

        self.driver.enable_protocols(&flags).await?;
        error!("Enabling protocols finished, please restart");

        Ok(ReconcileOutcome::Reprogrammed {
            flags,
            restart_required: true,
        })
    }
}

/// Sort-then-compare; names are compared exactly as written
fn same_protocols(configured: &[String], reported: &[String]) -> bool {
    let mut configured = configured.to_vec();
    let mut reported = reported.to_vec();
    configured.sort();
    reported.sort();
    configured == reported
}
