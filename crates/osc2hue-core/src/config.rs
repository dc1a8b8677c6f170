//! Application configuration
//!
//! Stored as pretty-printed JSON. Bridge IP and API key start out empty and
//! are filled in by discovery and pairing on first start.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LogConfig;

/// Placeholder shipped in the sample configuration
pub const API_KEY_PLACEHOLDER: &str = "your-hue-api-key-here";

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// OSC listener
    pub osc: OscConfig,
    /// Hue bridge credentials
    pub hue: HueSettings,
    /// Logging
    #[serde(default)]
    pub logging: LogConfig,
}

/// OSC listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscConfig {
    /// Interface to bind
    pub host: String,
    /// UDP port
    pub port: u16,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl OscConfig {
    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Hue bridge settings
#[derive(Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HueSettings {
    /// Bridge IP, empty until discovered
    pub bridge_ip: String,
    /// Application key, sent as `hue-application-key`
    pub api_key: String,
}

impl HueSettings {
    /// Whether the API key is usable (neither empty nor the placeholder)
    pub fn has_valid_api_key(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != API_KEY_PLACEHOLDER
    }

    /// Shortened key for log output
    pub fn api_key_preview(&self) -> String {
        match self.api_key.char_indices().nth(10) {
            Some((cut, _)) => format!("{}...", &self.api_key[..cut]),
            None => self.api_key.clone(),
        }
    }
}

impl fmt::Debug for HueSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HueSettings")
            .field("bridge_ip", &self.bridge_ip)
            .field("api_key", &"***REDACTED***")
            .finish()
    }
}

impl AppConfig {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Load from a JSON file, falling back to the defaults.
    ///
    /// The load error is handed back so the caller can report it once
    /// logging is up.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
