//! [`HidTransport`] implementations and registry assembly.
//!
//! - [`GadgetTransport`]: writes to a `/dev/hidgN` node (production).
//! - [`LogTransport`]: logs the bytes (`--dry-run`).
//! - [`RecordingTransport`]: keeps the bytes in memory (tests).

pub mod gadget;
pub mod log;
pub mod recording;

pub use gadget::GadgetTransport;
pub use log::LogTransport;
pub use recording::RecordingTransport;

use openctrl_core::DeviceClass;
use tracing::info;

use crate::application::{DeviceRegistry, HidTransport};
use crate::domain::BridgeConfig;

/// Builds the startup registry from `config`.
///
/// Each class with a configured device path gets a channel; the rest stay
/// `Unavailable`.  In dry-run mode the configured classes are bound to a
/// [`LogTransport`] instead of their gadget node.
pub fn build_registry(config: &BridgeConfig) -> DeviceRegistry {
    let mut builder = DeviceRegistry::builder();
    for class in DeviceClass::ALL {
        let Some(path) = config.devices.get(class) else {
            info!(%class, "no device configured, class unavailable");
            continue;
        };
        let transport: Box<dyn HidTransport> = if config.dry_run {
            Box::new(LogTransport::new(class))
        } else {
            Box::new(GadgetTransport::new(path.clone()))
        };
        info!(%class, target = %transport.describe(), "device bound");
        builder = builder.bind(class, transport);
    }
    builder.build()
}
