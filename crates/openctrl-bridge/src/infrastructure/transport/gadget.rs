//! USB gadget transport: writes reports to a Linux `f_hid` character device.
//!
//! The node is opened lazily on the first write and kept open.  Any failed
//! write drops the handle so the next request reopens it; that is how the
//! bridge recovers after the host re-enumerates the gadget or the cable is
//! replugged.
//!
//! Error classification:
//!
//! | `io::Error`                       | Meaning                        | Mapped to  |
//! |-----------------------------------|--------------------------------|------------|
//! | `NotFound`                        | configfs function not set up   | `NotReady` |
//! | `ESHUTDOWN` (errno 108)           | host has not enumerated / unplugged | `NotReady` |
//! | anything else                     | permissions, short write, …    | `Io`       |

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::application::channel::{HidTransport, TransportError};

/// `ESHUTDOWN` on Linux: "Cannot send after transport endpoint shutdown".
const ESHUTDOWN: i32 = 108;

/// Writes reports to a `/dev/hidgN` node.
#[derive(Debug)]
pub struct GadgetTransport {
    path: PathBuf,
    file: Option<File>,
}

impl GadgetTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn open(&self) -> io::Result<File> {
        let file = OpenOptions::new().write(true).open(&self.path).await?;
        info!(path = %self.path.display(), "opened HID gadget node");
        Ok(file)
    }

    /// The handle is only put back after a successful write.
    async fn try_write(&mut self, report: &[u8]) -> io::Result<()> {
        let mut file = match self.file.take() {
            Some(file) => file,
            None => self.open().await?,
        };
        file.write_all(report).await?;
        file.flush().await?;
        self.file = Some(file);
        Ok(())
    }
}

#[async_trait]
impl HidTransport for GadgetTransport {
    async fn write_report(&mut self, report: &[u8]) -> Result<(), TransportError> {
        self.try_write(report).await.map_err(|e| {
            debug!(path = %self.path.display(), "gadget write failed, handle dropped: {e}");
            classify(&self.path, e)
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn classify(path: &Path, err: io::Error) -> TransportError {
    if err.kind() == io::ErrorKind::NotFound {
        TransportError::NotReady(format!("{} does not exist", path.display()))
    } else if err.raw_os_error() == Some(ESHUTDOWN) {
        TransportError::NotReady(format!("{}: host is not connected", path.display()))
    } else {
        TransportError::Io(err)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
