//! OSC2Hue Core - Command Model and Normalization
//!
//! This crate contains everything that decides *what* a light should do,
//! independent of how commands arrive or how the bridge is reached:
//! - Scalar argument model with the `-1` skip sentinel
//! - Normalization of `set` / `on` commands into an [`UpdateIntent`]
//! - Delegation of the narrow shapes (brightness, color) onto `set`
//! - The read-only light registry
//! - Application configuration and logging settings

#![warn(missing_docs)]

pub mod command;
pub mod config;
pub mod error;
pub mod intent;
pub mod logging;
pub mod normalize;
pub mod registry;
pub mod scalar;

pub use command::{brightness_to_set, color_to_set, Shape, Target};
pub use config::{AppConfig, HueSettings, OscConfig};
pub use error::{CommandError, ConfigError};
pub use intent::{UpdateIntent, XyColor};
pub use logging::LogConfig;
pub use normalize::{brightness_fraction, normalize_on, normalize_set};
pub use registry::{DeviceRegistry, Light};
pub use scalar::{Number, Scalar, Slot, NULL};
