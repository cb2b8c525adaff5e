//! Infrastructure layer for openctrl-bridge.
//!
//! Everything that touches the outside world:
//!
//! - `http_server`: the axum router and listener
//! - `transport`: device-node writers behind the `HidTransport` trait, and the
//!   startup registry assembly
//! - `config_file`: the optional TOML configuration file

pub mod config_file;
pub mod http_server;
pub mod transport;

pub use http_server::{router, run_server, serve};
pub use transport::build_registry;
