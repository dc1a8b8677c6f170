//! OSC address layout
//!
//! ```text
//! /hue/light/{id}/{on|brightness|color|set}
//! /hue/all/{on|brightness|color|set}
//! ```
//!
//! `{id}` is either the bridge's light id or the light's 1-based position.

use osc2hue_core::Shape;

use crate::{error::ControlError, Result};

/// Maximum length of an OSC address string
pub const MAX_OSC_ADDRESS_LENGTH: usize = 1024;

/// Root segment of every address
pub const NAMESPACE: &str = "hue";

/// Address of a shape for one light (by id or index)
pub fn light_address(key: &str, shape: Shape) -> String {
    format!("/{}/light/{}/{}", NAMESPACE, key, shape)
}

/// Address of a shape for every light
pub fn all_address(shape: Shape) -> String {
    format!("/{}/all/{}", NAMESPACE, shape)
}

/// Reject addresses that cannot be one of ours before any lookup
pub fn validate_address(address: &str) -> Result<()> {
    if address.len() > MAX_OSC_ADDRESS_LENGTH {
        return Err(ControlError::InvalidMessage(format!(
            "OSC address too long (max {} chars)",
            MAX_OSC_ADDRESS_LENGTH
        )));
    }

    if !address.starts_with('/') {
        return Err(ControlError::InvalidMessage(format!(
            "OSC address must start with '/': {}",
            address
        )));
    }

    Ok(())
}
