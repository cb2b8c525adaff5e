//! # openctrl-core
//!
//! Shared library for the OpenCtrl HID bridge containing the device-class
//! model, the fixed-layout USB HID report types, and the codec that turns
//! loosely-typed request fields into those reports.
//!
//! This crate performs no I/O.  It has no dependency on sockets, device nodes,
//! or an async runtime, so every function here can be tested in isolation.
//!
//! # Architecture overview (for beginners)
//!
//! OpenCtrl lets a remote client drive a keyboard, mouse, gamepad, and
//! digitizer on a host computer.  The bridge device is plugged into the host
//! as a USB gadget; a client sends it small JSON requests over HTTP and the
//! bridge turns each request into a *HID report*: a tiny fixed-size byte
//! structure the host's USB stack understands natively.
//!
//! This crate defines:
//!
//! - **`domain`** – The [`DeviceClass`] enumeration: which kinds of emulated
//!   input device exist.
//!
//! - **`report`** – One report struct per device class, each with a
//!   `to_bytes()` method producing the exact on-wire layout.
//!
//! - **`codec`** – Pure `build_*` functions that take a decoded JSON body,
//!   apply per-field defaults and bit-width truncation, and produce a fully
//!   populated report.

pub mod codec;
pub mod domain;
pub mod report;

// Re-export the most-used types at the crate root so callers can write
// `openctrl_core::Report` instead of `openctrl_core::report::Report`.
pub use codec::{build_report, FieldValue, RawFieldSet, ValidationError};
pub use domain::device::DeviceClass;
pub use report::{
    GamepadReport, KeyboardReport, Modifiers, MouseButtons, MouseReport, PenReport, Report,
    TouchReport,
};
