//! Application layer for openctrl-bridge.
//!
//! Knows *what* happens to a request: which channel owns a device class, how a
//! body becomes a report, and how a report reaches the wire.  It delegates
//! *how* bytes are written to a [`HidTransport`] supplied by the
//! infrastructure layer.
//!
//! # What does NOT belong here?
//!
//! - HTTP routing, status codes and response text (infrastructure)
//! - Opening device nodes (infrastructure)
//! - Reading configuration files or the command line (`main.rs`)

pub mod channel;
pub mod dispatch;
pub mod registry;

pub use channel::{ChannelState, DeviceChannel, HidTransport, SendError, TransportError};
pub use dispatch::{check_content_type, decode_body, dispatch, DispatchError, JSON_MEDIA_TYPE};
pub use registry::{DeviceRegistry, DeviceSlot, DeviceUnavailable, RegistryBuilder};
