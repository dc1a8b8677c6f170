//! OSC2Hue - OSC to Philips Hue bridge
//!
//! Usage: `osc2hue [config.json]`

mod bridge_setup;
mod logging_setup;

use std::path::PathBuf;

use anyhow::{Context, Result};
use osc2hue_control::osc::address::all_address;
use osc2hue_control::{CommandRouter, OscServer};
use osc2hue_core::{AppConfig, Shape};
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let (mut config, load_error) = AppConfig::load_or_default(&config_path);
    let _log_guard = logging_setup::init(&config.logging)?;

    info!("==================================================");
    info!("OSC2Hue v{}", env!("CARGO_PKG_VERSION"));
    info!("Config file: {:?}", config_path);
    info!("==================================================");

    if let Some(e) = load_error {
        warn!("Failed to load config: {}", e);
        info!("Using default configuration...");
    }

    bridge_setup::ensure_credentials(&mut config, &config_path).await;
    let (bridge, registry) = bridge_setup::connect(&config).await;
    let router = CommandRouter::new(bridge, registry);
    if !router.is_connected() {
        warn!("No Hue bridge: commands are logged but not applied");
    }
    info!("{} OSC addresses registered", router.addresses().len());

    let server = OscServer::bind(&config.osc.host, config.osc.port)
        .await
        .with_context(|| format!("Failed to bind OSC server on {}", config.osc.bind_address()))?;

    info!("Starting OSC2Hue bridge...");
    info!("OSC Server: {}", server.local_addr());
    info!("Hue Bridge: {}", config.hue.bridge_ip);
    log_command_surface();

    server.run_until(&router, shutdown_signal()).await?;
    info!("Shutting down...");
    Ok(())
}

fn log_command_surface() {
    info!("Available OSC commands:");
    for shape in Shape::ALL {
        info!("  /hue/light/{{id}}/{} {}", shape, shape.usage());
    }
    for shape in Shape::ALL {
        info!("  {} {}", all_address(shape), shape.usage());
    }
    info!("  {{id}} is the bridge light id or its 1-based index");
    info!("Note: Use -1 for null values in /set commands to skip color, brightness, or duration");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
