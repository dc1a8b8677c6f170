//! OSC transport
//!
//! The address layout is always available; decoding and the UDP server need
//! the `osc` feature.

pub mod address;
#[cfg(feature = "osc")]
pub mod server;
#[cfg(feature = "osc")]
pub mod types;

#[cfg(feature = "osc")]
pub use server::OscServer;
