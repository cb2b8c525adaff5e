//! Device registry: which device classes this bridge can drive.
//!
//! The registry is built once at startup and never changes afterwards.  Every
//! [`DeviceClass`] has exactly one slot: either an available
//! [`DeviceChannel`] or [`DeviceSlot::Unavailable`].  Unavailability is a
//! first-class state, not a missing map entry, so a request for an unbound
//! class is answered explicitly instead of falling through.

use std::collections::BTreeMap;

use openctrl_core::DeviceClass;
use thiserror::Error;

use super::channel::{DeviceChannel, HidTransport};

/// The requested device class has no channel in this build/configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} device is not available")]
pub struct DeviceUnavailable(pub DeviceClass);

/// One registry entry.
#[derive(Debug)]
pub enum DeviceSlot {
    Available(DeviceChannel),
    Unavailable,
}

/// Immutable table from device class to channel.
#[derive(Debug)]
pub struct DeviceRegistry {
    slots: BTreeMap<DeviceClass, DeviceSlot>,
}

impl DeviceRegistry {
    /// Starts building a registry in which every class is unavailable.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the channel bound to `class`.
    ///
    /// # Errors
    ///
    /// [`DeviceUnavailable`] if the class was not bound at startup.
    pub fn resolve(&self, class: DeviceClass) -> Result<&DeviceChannel, DeviceUnavailable> {
        match self.slots.get(&class) {
            Some(DeviceSlot::Available(channel)) => Ok(channel),
            Some(DeviceSlot::Unavailable) | None => Err(DeviceUnavailable(class)),
        }
    }

    pub fn is_available(&self, class: DeviceClass) -> bool {
        self.resolve(class).is_ok()
    }

    /// Classes with a bound channel, in [`DeviceClass`] order.
    pub fn available_classes(&self) -> Vec<DeviceClass> {
        self.slots
            .iter()
            .filter(|(_, slot)| matches!(slot, DeviceSlot::Available(_)))
            .map(|(class, _)| *class)
            .collect()
    }
}

/// Collects channel bindings before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    bound: BTreeMap<DeviceClass, Box<dyn HidTransport>>,
}

impl RegistryBuilder {
    /// Binds `class` to `transport`.  A later call for the same class
    /// replaces the earlier binding.
    pub fn bind(mut self, class: DeviceClass, transport: Box<dyn HidTransport>) -> Self {
        self.bound.insert(class, transport);
        self
    }

    /// Freezes the registry.  Every class not bound is `Unavailable`.
    pub fn build(mut self) -> DeviceRegistry {
        let slots = DeviceClass::ALL
            .into_iter()
            .map(|class| {
                let slot = match self.bound.remove(&class) {
                    Some(transport) => DeviceSlot::Available(DeviceChannel::new(class, transport)),
                    None => DeviceSlot::Unavailable,
                };
                (class, slot)
            })
            .collect();
        DeviceRegistry { slots }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::channel::MockHidTransport;

    fn transport() -> Box<dyn HidTransport> {
        let mut mock = MockHidTransport::new();
        mock.expect_describe().return_const("mock".to_string());
        Box::new(mock)
    }

    #[test]
    fn test_empty_registry_has_every_class_unavailable() {
        // Arrange / Act
        let registry = DeviceRegistry::builder().build();

        // Assert
        for class in DeviceClass::ALL {
            assert_eq!(registry.resolve(class).unwrap_err(), DeviceUnavailable(class));
        }
        assert!(registry.available_classes().is_empty());
    }

    #[test]
    fn test_bound_classes_resolve_to_their_channel() {
        // Arrange
        let registry = DeviceRegistry::builder()
            .bind(DeviceClass::Keyboard, transport())
            .bind(DeviceClass::Gamepad, transport())
            .build();

        // Act
        let channel = registry.resolve(DeviceClass::Gamepad).unwrap();

        // Assert
        assert_eq!(channel.class(), DeviceClass::Gamepad);
        assert!(registry.is_available(DeviceClass::Keyboard));
        assert!(!registry.is_available(DeviceClass::Mouse));
        assert_eq!(
            registry.available_classes(),
            vec![DeviceClass::Keyboard, DeviceClass::Gamepad]
        );
    }

    #[test]
    fn test_unavailable_error_names_the_class() {
        let err = DeviceUnavailable(DeviceClass::Pen);
        assert_eq!(err.to_string(), "pen device is not available");
    }
}
