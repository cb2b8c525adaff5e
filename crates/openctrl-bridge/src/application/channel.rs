//! Device channels: the single owner of one device class's on-wire state.
//!
//! A [`DeviceChannel`] wraps the transport for one device class (for example
//! the `/dev/hidg0` keyboard gadget node) together with that class's logical
//! state.  [`DeviceChannel::send`] is the only way to write a report.
//!
//! # Exclusion
//!
//! The transport and state live behind a `tokio::sync::Mutex` that is held for
//! the whole send, including the keyboard's implicit release.  Two requests
//! for the same class therefore never interleave at the wire level, while
//! channels for different classes never contend with each other.
//!
//! # Momentary keyboard input
//!
//! The HTTP surface has no "key down" / "key up" verbs; each request describes
//! one combination to type.  The keyboard channel models that explicitly with
//! [`DeviceChannel::press_and_release`]: it writes the requested report and
//! then the all-released report, so no key is ever left held on the host.

use std::fmt;

use async_trait::async_trait;
use openctrl_core::{DeviceClass, KeyboardReport, Report};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failure reported by a [`HidTransport`] implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The device is not ready to accept reports (node missing, host has not
    /// enumerated the gadget yet, cable unplugged).
    #[error("not ready: {0}")]
    NotReady(String),

    /// Any other write failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error type for [`DeviceChannel`] operations.
#[derive(Debug, Error)]
pub enum SendError {
    /// The underlying transport is not ready.  Not retried by the bridge.
    #[error("{class} transport is down: {reason}")]
    TransportDown { class: DeviceClass, reason: String },

    /// The transport failed for a reason other than readiness.
    #[error("{class} transport write failed: {source}")]
    Io {
        class: DeviceClass,
        #[source]
        source: std::io::Error,
    },

    /// A report for another device class was offered to this channel.
    #[error("{got} report offered to the {expected} channel")]
    WrongDevice {
        expected: DeviceClass,
        got: DeviceClass,
    },
}

impl SendError {
    fn from_transport(class: DeviceClass, err: TransportError) -> Self {
        match err {
            TransportError::NotReady(reason) => SendError::TransportDown { class, reason },
            TransportError::Io(source) => SendError::Io { class, source },
        }
    }
}

// ── Transport seam ────────────────────────────────────────────────────────────

/// Byte sink for one device class.
///
/// Infrastructure implementations write to a USB gadget node or log the bytes;
/// test implementations record them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HidTransport: Send {
    /// Writes one complete report.  Must not return until the bytes have
    /// been handed to the device or the write has failed.
    async fn write_report(&mut self, report: &[u8]) -> Result<(), TransportError>;

    /// Short human-readable description of the destination, for logs.
    fn describe(&self) -> String;
}

// ── Channel state ─────────────────────────────────────────────────────────────

/// Logical state of one channel.  Owned exclusively by its [`DeviceChannel`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelState {
    /// Input currently held on the host that must be explicitly released.
    /// Only the keyboard ever holds input, and only between its press and
    /// release writes (or after a failed release).
    pub held: Option<Report>,
    /// The most recent report successfully written.
    pub last_written: Option<Report>,
    /// Number of reports successfully written since startup.
    pub reports_written: u64,
}

struct ChannelInner {
    transport: Box<dyn HidTransport>,
    state: ChannelState,
}

impl ChannelInner {
    async fn write(&mut self, class: DeviceClass, report: Report) -> Result<(), SendError> {
        let bytes = report.to_bytes();
        if let Err(e) = self.transport.write_report(&bytes).await {
            let err = SendError::from_transport(class, e);
            warn!(%class, "report not delivered: {err}");
            return Err(err);
        }
        debug!(%class, ?bytes, "report written");
        self.state.last_written = Some(report);
        self.state.reports_written += 1;
        Ok(())
    }

    async fn press_and_release(&mut self, report: KeyboardReport) -> Result<(), SendError> {
        self.write(DeviceClass::Keyboard, report.into()).await?;
        if !report.is_released() {
            self.state.held = Some(report.into());
        }
        self.release_all().await
    }

    async fn release_all(&mut self) -> Result<(), SendError> {
        self.write(DeviceClass::Keyboard, KeyboardReport::released().into())
            .await?;
        self.state.held = None;
        Ok(())
    }
}

// ── DeviceChannel ─────────────────────────────────────────────────────────────

/// The exclusive gate for sending one device class's reports.
pub struct DeviceChannel {
    class: DeviceClass,
    target: String,
    inner: Mutex<ChannelInner>,
}

impl DeviceChannel {
    /// Creates a channel for `class` writing through `transport`.
    pub fn new(class: DeviceClass, transport: Box<dyn HidTransport>) -> Self {
        let target = transport.describe();
        Self {
            class,
            target,
            inner: Mutex::new(ChannelInner {
                transport,
                state: ChannelState::default(),
            }),
        }
    }

    pub fn class(&self) -> DeviceClass {
        self.class
    }

    /// Description of the transport destination (e.g. `/dev/hidg0`).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Sends one report.
    ///
    /// Keyboard reports go through [`Self::press_and_release`]; every other
    /// class performs a single one-shot write.
    ///
    /// # Errors
    ///
    /// - [`SendError::WrongDevice`] if `report` belongs to another class.
    /// - [`SendError::TransportDown`] if the transport is not ready.
    /// - [`SendError::Io`] for any other transport failure.
    pub async fn send(&self, report: Report) -> Result<(), SendError> {
        self.ensure_class(report.class())?;
        let mut inner = self.inner.lock().await;
        match report {
            Report::Keyboard(keys) => inner.press_and_release(keys).await,
            other => inner.write(self.class, other).await,
        }
    }

    /// Writes `report` followed immediately by the all-released report.
    ///
    /// If the press write fails, no release is attempted and nothing is held.
    /// If the release write fails, the pressed report stays recorded in
    /// [`ChannelState::held`] until a later release succeeds.
    ///
    /// # Errors
    ///
    /// [`SendError::WrongDevice`] on a non-keyboard channel, otherwise any
    /// transport failure as for [`Self::send`].
    pub async fn press_and_release(&self, report: KeyboardReport) -> Result<(), SendError> {
        self.ensure_class(DeviceClass::Keyboard)?;
        self.inner.lock().await.press_and_release(report).await
    }

    /// Writes the all-released keyboard report.
    ///
    /// # Errors
    ///
    /// [`SendError::WrongDevice`] on a non-keyboard channel, otherwise any
    /// transport failure as for [`Self::send`].
    pub async fn release_all(&self) -> Result<(), SendError> {
        self.ensure_class(DeviceClass::Keyboard)?;
        self.inner.lock().await.release_all().await
    }

    /// Returns a copy of the current channel state.
    pub async fn state(&self) -> ChannelState {
        self.inner.lock().await.state.clone()
    }

    fn ensure_class(&self, got: DeviceClass) -> Result<(), SendError> {
        if got == self.class {
            Ok(())
        } else {
            Err(SendError::WrongDevice {
                expected: self.class,
                got,
            })
        }
    }
}

impl fmt::Debug for DeviceChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceChannel")
            .field("class", &self.class)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
