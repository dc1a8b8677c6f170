//! OSC2Hue Control - OSC Transport and Hue Bridge Integration
//!
//! This crate connects the command model from `osc2hue-core` to the outside
//! world:
//! - **OSC**: UDP server decoding messages into scalar argument lists
//! - **Router**: address table mapping every OSC address to a light and shape
//! - **Hue**: REST client for discovery, pairing, light listing and updates
//!
//! ## Feature Flags
//!
//! - `osc`: Enable the OSC server (requires `rosc`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use osc2hue_control::{CommandRouter, HueBridge};
//! use osc2hue_core::DeviceRegistry;
//!
//! // Without a bridge every command reports "not connected"
//! let router: CommandRouter<HueBridge> = CommandRouter::new(None, DeviceRegistry::default());
//! assert!(router.addresses().iter().any(|a| a == "/hue/all/set"));
//! ```
//!
//! ## Modules
//!
//! - [`osc`] - OSC server, address layout and type conversion
//! - [`router`] - Routing table and shape delegation
//! - [`hue`] - Philips Hue REST integration
//! - [`error`] - Error types

#![allow(missing_docs)]

/// Error types
pub mod error;
/// Philips Hue integration
pub mod hue;
/// OSC server, address layout and type conversion
pub mod osc;
/// Routing table and command delegation
pub mod router;

// Re-exports
pub use error::{ControlError, Result};
pub use hue::{HueBridge, HueError, LightBridge};
pub use router::{CommandRouter, Dispatch, FanOutReport, Route};

#[cfg(feature = "osc")]
pub use osc::OscServer;
