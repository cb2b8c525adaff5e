//! openctrl-bridge library crate.
//!
//! Accepts small JSON requests over HTTP and writes the matching USB HID
//! reports to the gadget nodes of a board plugged into a host, so the host
//! sees a real keyboard, mouse, gamepad or digitizer.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! HTTP client (JSON over HTTP POST)
//!         ↕
//! [openctrl-bridge]
//!   ├── domain/           BridgeConfig, DevicePaths
//!   ├── application/      DeviceChannel, DeviceRegistry, dispatch
//!   └── infrastructure/
//!         ├── http_server/  axum router and listener
//!         ├── transport/    /dev/hidgN writer, dry-run logger, recorder
//!         └── config_file/  optional TOML file
//!         ↕
//! Linux USB gadget (f_hid) ──USB──► host computer
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `openctrl-core`; it reaches the
//!   outside world only through the `HidTransport` trait.
//! - `infrastructure` depends on all other layers plus `axum` and `tokio` I/O.
//!
//! # Security
//!
//! The control surface is unauthenticated.  Anyone who can reach the listen
//! address can type on and move the pointer of the attached host.  Bind to a
//! private interface.

/// Domain layer: configuration types (no I/O).
pub mod domain;

/// Application layer: channels, registry and request dispatch.
pub mod application;

/// Infrastructure layer: HTTP server, HID transports, config file.
pub mod infrastructure;
