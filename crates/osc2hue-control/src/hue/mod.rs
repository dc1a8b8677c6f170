//! Philips Hue REST integration (CLIP v2 for lights, v1 for pairing)

pub mod api;
pub mod bridge;
pub mod models;

pub use api::error::HueError;
pub use bridge::{HueBridge, LightBridge};
pub use models::LightPut;
