pub mod client;
pub mod discovery;
pub mod error;
pub mod lights;

use error::HueError;

/// Header carrying the application key on every authenticated request
pub(crate) const APPLICATION_KEY_HEADER: &str = "hue-application-key";

// The bridge serves HTTPS with a self-signed certificate
pub(crate) fn build_client() -> Result<reqwest::Client, HueError> {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .build()
        .map_err(HueError::Network)
}
