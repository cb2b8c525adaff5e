//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for all runtime settings.
//! It is assembled in `main.rs` from defaults, an optional TOML file and the
//! command line, in that order of precedence (last wins).
//!
//! The struct holds no global state and reads no environment variables, so
//! tests can build one directly.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use openctrl_core::DeviceClass;

/// Default gadget node for each class on a typical single-function-per-node
/// `f_hid` configfs setup.
pub const DEFAULT_KEYBOARD_DEV: &str = "/dev/hidg0";
pub const DEFAULT_MOUSE_DEV: &str = "/dev/hidg1";
pub const DEFAULT_GAMEPAD_DEV: &str = "/dev/hidg2";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 80;

/// Default log filter when neither `RUST_LOG` nor `--log-level` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Device node path for each class.  `None` leaves the class unbound, which
/// the registry exposes as `Unavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePaths {
    pub keyboard: Option<PathBuf>,
    pub mouse: Option<PathBuf>,
    pub gamepad: Option<PathBuf>,
    pub pen: Option<PathBuf>,
    pub touch: Option<PathBuf>,
}

impl DevicePaths {
    /// Returns the configured path for `class`, if any.
    pub fn get(&self, class: DeviceClass) -> Option<&PathBuf> {
        match class {
            DeviceClass::Keyboard => self.keyboard.as_ref(),
            DeviceClass::Mouse => self.mouse.as_ref(),
            DeviceClass::Gamepad => self.gamepad.as_ref(),
            DeviceClass::Pen => self.pen.as_ref(),
            DeviceClass::Touch => self.touch.as_ref(),
        }
    }

    /// Sets (or clears) the path for `class`.
    pub fn set(&mut self, class: DeviceClass, path: Option<PathBuf>) {
        let slot = match class {
            DeviceClass::Keyboard => &mut self.keyboard,
            DeviceClass::Mouse => &mut self.mouse,
            DeviceClass::Gamepad => &mut self.gamepad,
            DeviceClass::Pen => &mut self.pen,
            DeviceClass::Touch => &mut self.touch,
        };
        *slot = path;
    }
}

impl Default for DevicePaths {
    /// Keyboard, mouse and gamepad on `/dev/hidg0..2`; pen and touch unbound.
    fn default() -> Self {
        Self {
            keyboard: Some(PathBuf::from(DEFAULT_KEYBOARD_DEV)),
            mouse: Some(PathBuf::from(DEFAULT_MOUSE_DEV)),
            gamepad: Some(PathBuf::from(DEFAULT_GAMEPAD_DEV)),
            pen: None,
            touch: None,
        }
    }
}

/// All runtime configuration for the bridge.
///
/// # Example
///
/// ```rust
/// use openctrl_bridge::domain::BridgeConfig;
///
/// let cfg = BridgeConfig::default();
/// assert_eq!(cfg.listen_addr.port(), 80);
/// assert!(!cfg.dry_run);
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Address the HTTP server binds to.
    ///
    /// `0.0.0.0` exposes the unauthenticated control surface on every
    /// interface.  Prefer a link-local or loopback address where possible.
    pub listen_addr: SocketAddr,

    /// Gadget node per device class.
    pub devices: DevicePaths,

    /// Log report bytes instead of writing them to device nodes.
    pub dry_run: bool,

    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for BridgeConfig {
    /// | Field       | Default                                  |
    /// |-------------|------------------------------------------|
    /// | listen_addr | `0.0.0.0:80`                             |
    /// | devices     | `/dev/hidg0..2` for keyboard/mouse/gamepad |
    /// | dry_run     | `false`                                  |
    /// | log_level   | `info`                                   |
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            devices: DevicePaths::default(),
            dry_run: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
