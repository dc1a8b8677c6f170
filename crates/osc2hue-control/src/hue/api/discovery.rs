//! Bridge discovery through the meethue.com N-UPnP endpoint

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::build_client;
use super::error::HueError;

const DISCOVERY_URL: &str = "https://discovery.meethue.com";
const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Deserialize, Debug, Clone, PartialEq)]
struct Candidate {
    id: String,
    #[serde(rename = "internalipaddress")]
    ip: String,
}

fn parse_candidates(body: &str) -> Result<Vec<Candidate>, HueError> {
    let candidates: Vec<Candidate> = serde_json::from_str(body)?;
    if candidates.is_empty() {
        return Err(HueError::DiscoveryFailed);
    }
    Ok(candidates)
}

/// First reachable candidate, else the first one listed
fn select(checked: Vec<(Candidate, bool)>) -> Option<Candidate> {
    let fallback = checked.first().map(|(candidate, _)| candidate.clone());
    checked
        .into_iter()
        .find_map(|(candidate, reachable)| reachable.then_some(candidate))
        .or(fallback)
}

/// Whether the bridge answers its unauthenticated config endpoint
async fn answers_config(client: &reqwest::Client, ip: &str) -> bool {
    let url = format!("https://{}/api/0/config", ip);
    match client.get(&url).timeout(REACHABILITY_TIMEOUT).send().await {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            debug!("Bridge at {} did not answer: {}", ip, e);
            false
        }
    }
}

/// Find a bridge on the local network and return its IP.
///
/// When several bridges are listed the first one that answers wins.
pub async fn discover_bridge(timeout: Duration) -> Result<String, HueError> {
    let client = build_client()?;
    let resp = client.get(DISCOVERY_URL).timeout(timeout).send().await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(HueError::ApiError(format!(
            "Discovery service returned HTTP {}",
            status
        )));
    }

    let mut checked = Vec::new();
    for candidate in parse_candidates(&body)? {
        let reachable = answers_config(&client, &candidate.ip).await;
        checked.push((candidate, reachable));
    }

    if checked.iter().all(|(_, reachable)| !reachable) {
        warn!("No discovered bridge answered; using the first one listed");
    }

    select(checked)
        .map(|candidate| {
            debug!("Selected bridge {} at {}", candidate.id, candidate.ip);
            candidate.ip
        })
        .ok_or(HueError::DiscoveryFailed)
}
