//! Error types for the control system
use thiserror::Error;

/// Control system errors
#[derive(Error, Debug)]
pub enum ControlError {
    /// OSC error
    #[error("OSC error: {0}")]
    OscError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid message format
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;
