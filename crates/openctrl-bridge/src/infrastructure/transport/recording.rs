//! In-memory transport that records every report written to it.
//!
//! Used by the integration tests to observe exactly what a channel put on the
//! wire.  Clones share the same log, so a test keeps one handle and gives the
//! other to the registry.
//!
//! # Example
//!
//! ```rust
//! use openctrl_bridge::application::HidTransport;
//! use openctrl_bridge::infrastructure::transport::RecordingTransport;
//!
//! # tokio_test::block_on(async {
//! let recorder = RecordingTransport::new("kbd");
//! let mut handle = recorder.clone();
//! handle.write_report(&[1, 2, 3]).await.unwrap();
//! assert_eq!(recorder.reports(), vec![vec![1, 2, 3]]);
//! # });
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::channel::{HidTransport, TransportError};

#[derive(Debug, Clone)]
pub struct RecordingTransport {
    name: String,
    reports: Arc<Mutex<Vec<Vec<u8>>>>,
    down: Arc<AtomicBool>,
}

impl RecordingTransport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reports: Arc::new(Mutex::new(Vec::new())),
            down: Arc::new(AtomicBool::new(false)),
        }
    }

    /// All reports written so far, oldest first.
    pub fn reports(&self) -> Vec<Vec<u8>> {
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Simulates the host disconnecting (`true`) or reconnecting (`false`).
    /// While down, every write fails with [`TransportError::NotReady`] and is
    /// not recorded.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl HidTransport for RecordingTransport {
    async fn write_report(&mut self, report: &[u8]) -> Result<(), TransportError> {
        // Yield so concurrent tests get a chance to interleave if the channel
        // lock were not held.
        tokio::task::yield_now().await;
        if self.down.load(Ordering::SeqCst) {
            return Err(TransportError::NotReady(format!("{} is down", self.name)));
        }
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(report.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("recording ({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_down_transport_rejects_and_records_nothing() {
        // Arrange
        let recorder = RecordingTransport::new("pad");
        let mut handle = recorder.clone();
        recorder.set_down(true);

        // Act
        let down = handle.write_report(&[1]).await;
        recorder.set_down(false);
        let up = handle.write_report(&[2]).await;

        // Assert
        assert!(matches!(assert_err!(down), TransportError::NotReady(_)));
        assert_ok!(up);
        assert_eq!(recorder.reports(), vec![vec![2]]);
    }
}
