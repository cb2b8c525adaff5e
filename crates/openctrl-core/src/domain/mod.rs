//! Domain entities for OpenCtrl.
//!
//! This module contains pure business types with no infrastructure
//! dependencies.  Code in the outer layers (the HTTP router, the USB gadget
//! transport) depends on these types, but they never depend on the outer
//! layers.

/// Device classes the bridge can emulate.
///
/// See [`device::DeviceClass`] for the main type.
pub mod device;
