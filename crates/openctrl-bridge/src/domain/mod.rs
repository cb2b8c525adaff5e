//! Domain layer for openctrl-bridge.
//!
//! Pure configuration types with no I/O, no async and no framework types.
//! The device-class and report model lives in `openctrl-core`; this layer only
//! adds what is specific to running a bridge process.

pub mod config;

pub use config::{BridgeConfig, DevicePaths};
