//! Bridge discovery, pairing and connection at startup
//!
//! Every step logs and carries on when it fails: the OSC server starts
//! regardless, so incoming traffic can still be observed.

use std::path::Path;
use std::time::Duration;

use osc2hue_control::hue::api::{client, discovery};
use osc2hue_control::HueBridge;
use osc2hue_core::{AppConfig, DeviceRegistry};
use tracing::{info, warn};

const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);
const PAIRING_TIMEOUT: Duration = Duration::from_secs(60);
const PAIRING_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Fill in a missing bridge IP and API key, persisting whatever is found
pub async fn ensure_credentials(config: &mut AppConfig, config_path: &Path) {
    if config.hue.bridge_ip.is_empty() {
        discover_and_save(config, config_path).await;
    }

    if config.hue.has_valid_api_key() {
        info!("Using existing API key: {}", config.hue.api_key_preview());
    } else {
        pair_and_save(config, config_path).await;
    }
}

async fn discover_and_save(config: &mut AppConfig, config_path: &Path) {
    info!("Discovering Hue bridges...");
    let ip = match discovery::discover_bridge(DISCOVERY_TIMEOUT).await {
        Ok(ip) => ip,
        Err(e) => {
            warn!("Bridge discovery failed: {}", e);
            warn!("Please set hue.bridge_ip in {:?} manually", config_path);
            return;
        }
    };

    info!("Found Hue bridge at {}", ip);
    if config.hue.bridge_ip != ip {
        config.hue.bridge_ip = ip;
        save(config, config_path, "discovered bridge IP");
    }
}

async fn pair_and_save(config: &mut AppConfig, config_path: &Path) {
    if config.hue.bridge_ip.is_empty() {
        warn!("Skipping pairing: no bridge IP known");
        return;
    }

    info!(
        "Setting up authentication with Hue bridge at {}",
        config.hue.bridge_ip
    );
    info!("Press the link button on your Hue bridge now...");

    let registration = match client::register(
        &config.hue.bridge_ip,
        &device_type(),
        PAIRING_TIMEOUT,
        PAIRING_POLL_INTERVAL,
    )
    .await
    {
        Ok(registration) => registration,
        Err(e) => {
            warn!("Authentication failed: {}", e);
            warn!(
                "Set hue.api_key in {:?} manually or restart to retry pairing",
                config_path
            );
            return;
        }
    };

    config.hue.api_key = registration.username;
    info!("API key obtained: {}", config.hue.api_key_preview());
    save(config, config_path, "new API key");
}

fn save(config: &AppConfig, config_path: &Path, what: &str) {
    match config.save(config_path) {
        Ok(()) => info!("Configuration saved with {}", what),
        Err(e) => warn!("Failed to save updated config: {}", e),
    }
}

fn device_type() -> String {
    let host = std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "server".to_string());
    format!("osc2hue#{}", host)
}

/// Connect to the bridge and list its lights.
///
/// A client that cannot be built yields no bridge. A bridge whose light
/// listing fails is kept with an empty registry.
pub async fn connect(config: &AppConfig) -> (Option<HueBridge>, DeviceRegistry) {
    let bridge = match HueBridge::new(&config.hue) {
        Ok(bridge) => bridge,
        Err(e) => {
            warn!("Failed to create Hue client: {}", e);
            warn!("Continuing anyway - OSC messages are logged but won't control lights");
            return (None, DeviceRegistry::default());
        }
    };

    match bridge.discover_lights().await {
        Ok(registry) => {
            info!("Successfully connected! Found {} lights:", registry.len());
            for (index, light) in registry.indexed() {
                info!("  Light #{} {}: {}", index, light.id, light.name);
            }
            (Some(bridge), registry)
        }
        Err(e) => {
            warn!("Failed to connect to Hue Bridge: {}", e);
            warn!("Continuing anyway - OSC messages are logged but won't control lights");
            (Some(bridge), DeviceRegistry::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_prefix() {
        assert!(device_type().starts_with("osc2hue#"));
    }

    #[tokio::test]
    async fn test_connect_without_credentials() {
        let config = AppConfig::default();
        let (bridge, registry) = connect(&config).await;
        assert!(bridge.is_none());
        assert!(registry.is_empty());
    }
}
