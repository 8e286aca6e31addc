//! rfxd - RFX Gateway Daemon
//!
//! Bridges a home-automation signal bus to an RF transceiver.
//!
//! Usage:
//!   rfxd [--config <rfxd.toml>] [--log-format text|json]
//!
//! Outbound signals are read from stdin as JSON lines
//! (`{"deviceId":"Lighting2/AC-0x01","data":{"state":"on"}}`); every signal
//! the gateway produces is written to stdout as a JSON line. Logs go to
//! stderr.
//!
//! If no config file is provided, a demo configuration against the mock
//! transceiver is used.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use rfx_driver::TransportConfig;
use rfx_gateway::{Gateway, GatewayConfig, ReconcileOutcome, Signal, SignalBus};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEMO_CONFIG: &str = r#"
[plugin]
id = "RFXCOM"
port = "/dev/ttyUSB0"
listen_only = false
enabled_protocols = ["AC", "ARC", "OREGON"]

[transport]
type = "mock"
latency_ms = 20
enabled_protocols = ["AC", "ARC", "OREGON"]

[[devices]]
id = "livingroom-lamp"
name = "Living room lamp"
role = "output"
type = "switch"
plugin = { id = "RFXCOM", device_id = "Lighting2/AC-0x01/1" }

[[devices]]
id = "doorbell"
name = "Door bell"
role = "output"
type = "switch"
plugin = { id = "RFXCOM", device_id = "Lighting1/ARC-0x41/1" }

[[devices]]
id = "garden-sensor"
name = "Garden temperature"
role = "input"
type = "temperature"
plugin = { id = "RFXCOM", device_id = "temperaturehumidity1-0x7A02" }
"#;

#[derive(Parser, Debug)]
#[command(name = "rfxd")]
#[command(version, about = "RF transceiver gateway daemon")]
struct Args {
    /// Gateway config file (TOML)
    #[arg(short, long, env = "RFXD_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rfxd=info,rfx_gateway=info,rfx_driver=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries signals
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    tracing::info!("Starting rfxd (RFX Gateway Daemon)");

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            GatewayConfig::load(path)?
        }
        None => {
            tracing::info!("No config file provided, using mock transceiver");
            GatewayConfig::from_toml_str(DEMO_CONFIG)?
        }
    };

    if let TransportConfig::Serial(serial) = &mut config.transport {
        serial.debug |= config.plugin.debug;
    }

    let driver = rfx_driver::create_driver(&config.transport)?;
    let bus = SignalBus::default();
    let writer = tokio::spawn(write_signals(bus.subscribe()));

    let gateway = match Gateway::start(&config, driver, bus).await {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            tracing::error!(error = %e, "Gateway failed to start, not retrying");
            return Err(e.into());
        }
    };
    gateway.spawn_event_loop();

    let state = gateway.state();
    tracing::info!(plugin = %state.plugin_id, mode = ?state.mode, "Gateway running");
    if state
        .reconcile
        .as_ref()
        .is_some_and(ReconcileOutcome::restart_required)
    {
        tracing::warn!("Receiver protocols were reprogrammed, restart rfxd to apply them");
    }

    let reader = tokio::spawn(read_signals(gateway.clone()));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    reader.abort();
    writer.abort();
    Ok(())
}

/// Feed JSON-line signals from stdin to the gateway
async fn read_signals(gateway: Arc<Gateway>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!("Signal input closed");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read signal input");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let signal: Signal = match serde_json::from_str(line) {
            Ok(signal) => signal,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed signal");
                continue;
            }
        };

        // Rejections are logged by the gateway
        let _ = gateway.handle_outbound(&signal).await;
    }
}

/// Write produced signals to stdout as JSON lines
async fn write_signals(mut signals: broadcast::Receiver<Signal>) {
    let mut stdout = tokio::io::stdout();

    loop {
        match signals.recv().await {
            Ok(signal) => {
                let mut line = match serde_json::to_string(&signal) {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to serialize signal");
                        continue;
                    }
                };
                line.push('\n');

                if let Err(e) = stdout.write_all(line.as_bytes()).await {
                    tracing::error!(error = %e, "Failed to write signal output");
                    break;
                }
                let _ = stdout.flush().await;
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "Signal writer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
