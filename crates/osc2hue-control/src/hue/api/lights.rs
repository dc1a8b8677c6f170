use super::error::HueError;
use super::APPLICATION_KEY_HEADER;
use crate::hue::models::LightPut;
use osc2hue_core::Light;
use serde::Deserialize;

// V2 API structures
#[derive(Deserialize, Debug)]
struct V2Response<T> {
    #[serde(default)]
    errors: Vec<V2Error>,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Deserialize, Debug)]
struct V2Error {
    description: String,
}

#[derive(Deserialize, Debug)]
struct V2Light {
    id: String,
    metadata: V2Metadata,
}

#[derive(Deserialize, Debug)]
struct V2Metadata {
    name: String,
}

fn check_errors<T>(response: &V2Response<T>) -> Result<(), HueError> {
    if response.errors.is_empty() {
        return Ok(());
    }
    let descriptions: Vec<&str> = response
        .errors
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    Err(HueError::ApiError(descriptions.join("; ")))
}

fn parse_lights(body: &str) -> Result<Vec<Light>, HueError> {
    let response: V2Response<V2Light> = serde_json::from_str(body)?;
    check_errors(&response)?;
    Ok(response
        .data
        .into_iter()
        .map(|light| Light::new(light.id, light.metadata.name))
        .collect())
}

/// Lists every light known to the bridge, in bridge order.
pub async fn get_lights(
    client: &reqwest::Client,
    bridge_ip: &str,
    api_key: &str,
) -> Result<Vec<Light>, HueError> {
    let url = format!("https://{}/clip/v2/resource/light", bridge_ip);

    let resp = client
        .get(&url)
        .header(APPLICATION_KEY_HEADER, api_key)
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(HueError::ApiError(format!(
            "Failed to get lights: HTTP {} - {}",
            status, body
        )));
    }

    parse_lights(&body)
}

/// Applies a state change to one light.
pub async fn update_light(
    client: &reqwest::Client,
    bridge_ip: &str,
    api_key: &str,
    light_id: &str,
    body: &LightPut,
) -> Result<(), HueError> {
    let url = format!(
        "https://{}/clip/v2/resource/light/{}",
        bridge_ip, light_id
    );

    let resp = client
        .put(&url)
        .header(APPLICATION_KEY_HEADER, api_key)
        .json(body)
        .send()
        .await?;

    let status = resp.status();
    let response_text = resp.text().await?;

    if !status.is_success() {
        return Err(HueError::ApiError(format!(
            "HTTP {} - {}",
            status, response_text
        )));
    }

    // The bridge can answer 200 with per-field errors
    if let Ok(response) = serde_json::from_str::<V2Response<serde_json::Value>>(&response_text) {
        check_errors(&response)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_v2_lights() {
        let body = json!({
            "errors": [],
            "data": [
                {
                    "id": "3a3e1dd0-7c3f-4a8a-9d5b-2d3c3a0f1f01",
                    "type": "light",
                    "metadata": { "name": "Desk", "archetype": "desk_lamp" },
                    "on": { "on": true }
                },
                {
                    "id": "7b1c2f4e-11aa-4c47-8b55-0c8b6d9e2a02",
                    "type": "light",
                    "metadata": { "name": "Shelf", "archetype": "sultan_bulb" },
                    "on": { "on": false }
                }
            ]
        })
        .to_string();

        let lights = parse_lights(&body).unwrap();
        assert_eq!(lights.len(), 2);
        assert_eq!(lights[0].id, "3a3e1dd0-7c3f-4a8a-9d5b-2d3c3a0f1f01");
        assert_eq!(lights[0].name, "Desk");
        assert_eq!(lights[1].name, "Shelf");
    }

    #[test]
    fn test_parse_v2_errors() {
        let body = json!({
            "errors": [{ "description": "unauthorized user" }],
            "data": []
        })
        .to_string();

        match parse_lights(&body) {
            Err(HueError::ApiError(msg)) => assert_eq!(msg, "unauthorized user"),
            other => panic!("Expected API error, got {:?}", other),
        }
    }
}
