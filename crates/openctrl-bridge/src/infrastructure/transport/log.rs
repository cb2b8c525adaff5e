//! Dry-run transport: logs each report instead of writing it.

use async_trait::async_trait;
use openctrl_core::DeviceClass;
use tracing::info;

use crate::application::channel::{HidTransport, TransportError};

/// Logs report bytes at `info` level.  Never fails.
#[derive(Debug, Clone, Copy)]
pub struct LogTransport {
    class: DeviceClass,
}

impl LogTransport {
    pub fn new(class: DeviceClass) -> Self {
        Self { class }
    }
}

#[async_trait]
impl HidTransport for LogTransport {
    async fn write_report(&mut self, report: &[u8]) -> Result<(), TransportError> {
        info!(class = %self.class, bytes = ?report, "dry-run report");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("dry-run log ({})", self.class)
    }
}
