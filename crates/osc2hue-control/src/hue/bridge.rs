use async_trait::async_trait;
use osc2hue_core::{DeviceRegistry, HueSettings, UpdateIntent};
use tracing::info;

use super::api::{self, error::HueError};
use super::models::LightPut;

/// Anything that can apply an [`UpdateIntent`] to a light.
///
/// The router only ever talks to the bridge through this trait.
#[async_trait]
pub trait LightBridge: Send + Sync {
    /// Apply the intent to one light
    async fn update_light(&self, light_id: &str, intent: &UpdateIntent) -> Result<(), HueError>;
}

/// Authenticated connection to a Hue bridge
pub struct HueBridge {
    client: reqwest::Client,
    bridge_ip: String,
    api_key: String,
}

impl HueBridge {
    /// Create a client from stored settings.
    ///
    /// Fails when the bridge IP or the API key is missing; no request is
    /// made yet.
    pub fn new(settings: &HueSettings) -> Result<Self, HueError> {
        if settings.bridge_ip.is_empty() {
            return Err(HueError::NotConfigured("bridge IP is missing".to_string()));
        }
        if !settings.has_valid_api_key() {
            return Err(HueError::NotConfigured("API key is missing".to_string()));
        }

        Ok(Self {
            client: api::build_client()?,
            bridge_ip: settings.bridge_ip.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    /// Fetch the lights and build the registry
    pub async fn discover_lights(&self) -> Result<DeviceRegistry, HueError> {
        info!("Testing connection to Hue Bridge at {}...", self.bridge_ip);
        let lights = api::lights::get_lights(&self.client, &self.bridge_ip, &self.api_key).await?;
        Ok(DeviceRegistry::new(lights))
    }
}

impl std::fmt::Debug for HueBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HueBridge")
            .field("bridge_ip", &self.bridge_ip)
            .field("api_key", &"***REDACTED***")
            .finish()
    }
}

#[async_trait]
impl LightBridge for HueBridge {
    async fn update_light(&self, light_id: &str, intent: &UpdateIntent) -> Result<(), HueError> {
        let body = LightPut::from(intent);
        api::lights::update_light(&self.client, &self.bridge_ip, &self.api_key, light_id, &body)
            .await
    }
}
