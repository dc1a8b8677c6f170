use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::build_client;
use super::error::HueError;

/// Credentials issued by the bridge on pairing
#[derive(Clone, PartialEq)]
pub struct Registration {
    /// Application key, used as `hue-application-key`
    pub username: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &"***REDACTED***")
            .finish()
    }
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    devicetype: &'a str,
}

#[derive(Deserialize)]
struct RegisterSuccess {
    username: String,
}

#[derive(Deserialize)]
struct HueErrorResponse {
    #[serde(rename = "type")]
    error_type: i32,
    description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RegisterResponseItem {
    Success { success: RegisterSuccess },
    Error { error: HueErrorResponse },
}

/// Bridge error code for "link button not pressed"
const LINK_BUTTON_NOT_PRESSED: i32 = 101;

fn parse_register_response(items: Vec<RegisterResponseItem>) -> Result<Registration, HueError> {
    match items.into_iter().next() {
        Some(RegisterResponseItem::Success { success }) => Ok(Registration {
            username: success.username,
        }),
        Some(RegisterResponseItem::Error { error }) => {
            if error.error_type == LINK_BUTTON_NOT_PRESSED {
                Err(HueError::LinkButtonNotPressed)
            } else {
                Err(HueError::ApiError(error.description))
            }
        }
        None => Err(HueError::ApiError(
            "Empty response from Hue Bridge".to_string(),
        )),
    }
}

/// Registers a new application with the Hue Bridge (single attempt).
pub async fn register_user(ip: &str, device_type: &str) -> Result<Registration, HueError> {
    if ip.is_empty() {
        return Err(HueError::NotConfigured("bridge IP not set".to_string()));
    }

    let client = build_client()?;
    let body = RegisterBody {
        devicetype: device_type,
    };

    let url = format!("https://{}/api", ip);
    let resp = client.post(&url).json(&body).send().await?;
    let items: Vec<RegisterResponseItem> = resp.json().await?;

    parse_register_response(items)
}

/// Register with the bridge, polling until the link button is pressed.
///
/// Any error other than "link button not pressed" fails immediately.
pub async fn register(
    ip: &str,
    device_type: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Registration, HueError> {
    info!(
        "Starting Bridge registration at {} ({}s timeout)...",
        ip,
        timeout.as_secs()
    );

    let start_time = Instant::now();
    while start_time.elapsed() < timeout {
        match register_user(ip, device_type).await {
            Ok(registration) => {
                info!("Successfully registered with Hue Bridge!");
                return Ok(registration);
            }
            Err(HueError::LinkButtonNotPressed) => {
                info!(
                    "Link button not pressed yet ({}s/{}s). Retrying...",
                    start_time.elapsed().as_secs(),
                    timeout.as_secs()
                );
            }
            Err(e) => return Err(e),
        }
        tokio::time::sleep(poll_interval).await;
    }

    Err(HueError::PairingTimeout(timeout.as_secs()))
}
