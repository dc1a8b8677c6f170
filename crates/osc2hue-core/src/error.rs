//! Error types for command handling and configuration
use thiserror::Error;

/// Reasons a command did not result in a light update.
///
/// None of these are fatal: every variant is reported and the command is
/// dropped (or, for a fan-out, only the affected light is skipped).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Wrong argument count or an unsupported argument type
    #[error("Malformed command: {0}")]
    Malformed(String),

    /// Every optional field resolved to "absent"
    #[error("No valid parameters provided")]
    NoOp,

    /// The bridge rejected or failed the update
    #[error("Error updating light {light}: {message}")]
    DeviceUpdate {
        /// Light the update was addressed to
        light: String,
        /// Error reported by the bridge client
        message: String,
    },

    /// No bridge client is available
    #[error("Hue bridge not connected")]
    NotConnected,

    /// No route is registered for the address
    #[error("No handler for address {0}")]
    UnknownAddress(String),
}

impl CommandError {
    pub(crate) fn invalid_type(field: &str, found: &str) -> Self {
        CommandError::Malformed(format!("Invalid {} type: {}", field, found))
    }
}

/// Configuration load/save errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
