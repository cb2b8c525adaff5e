//! Optional TOML configuration file.
//!
//! Every key is optional; an empty file yields the same configuration as no
//! file at all.  Command-line flags are applied on top in `main.rs`.
//!
//! ```toml
//! [server]
//! bind = "192.168.7.1"
//! port = 8080
//! log_level = "debug"
//! dry_run = false
//!
//! [devices]
//! keyboard = "/dev/hidg0"
//! mouse = "/dev/hidg1"
//! pen = "/dev/hidg3"
//! disabled = ["gamepad"]
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` take the return value
//! of `some_fn()` when absent, so the defaults below match
//! [`BridgeConfig::default`] exactly.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use openctrl_core::DeviceClass;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::config::{
    DevicePaths, DEFAULT_GAMEPAD_DEV, DEFAULT_KEYBOARD_DEV, DEFAULT_LOG_LEVEL, DEFAULT_MOUSE_DEV,
    DEFAULT_PORT,
};
use crate::domain::BridgeConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `server.bind` is not an IP address.
    #[error("invalid bind address {0:?}")]
    InvalidBind(String),
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Top-level file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub devices: DevicesSection,
}

/// `[server]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    /// IP address to bind.  `"0.0.0.0"` binds all interfaces.
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// `tracing` filter: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub dry_run: bool,
}

/// `[devices]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DevicesSection {
    #[serde(default = "default_keyboard")]
    pub keyboard: Option<PathBuf>,
    #[serde(default = "default_mouse")]
    pub mouse: Option<PathBuf>,
    #[serde(default = "default_gamepad")]
    pub gamepad: Option<PathBuf>,
    #[serde(default)]
    pub pen: Option<PathBuf>,
    #[serde(default)]
    pub touch: Option<PathBuf>,
    /// Classes to leave unavailable even if a path is set.
    #[serde(default)]
    pub disabled: Vec<DeviceClass>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_bind() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_keyboard() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_KEYBOARD_DEV))
}
fn default_mouse() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_MOUSE_DEV))
}
fn default_gamepad() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_GAMEPAD_DEV))
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl Default for DevicesSection {
    fn default() -> Self {
        Self {
            keyboard: default_keyboard(),
            mouse: default_mouse(),
            gamepad: default_gamepad(),
            pen: None,
            touch: None,
            disabled: Vec::new(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl FileConfig {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`]
    /// if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on invalid TOML or unknown device class names.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Converts the file contents into a [`BridgeConfig`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidBind`] if `server.bind` is not an IP address.
    pub fn into_bridge_config(self) -> Result<BridgeConfig, ConfigError> {
        let ip: IpAddr = self
            .server
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.server.bind.clone()))?;

        let mut devices = DevicePaths {
            keyboard: self.devices.keyboard,
            mouse: self.devices.mouse,
            gamepad: self.devices.gamepad,
            pen: self.devices.pen,
            touch: self.devices.touch,
        };
        for class in self.devices.disabled {
            devices.set(class, None);
        }

        Ok(BridgeConfig {
            listen_addr: SocketAddr::new(ip, self.server.port),
            devices,
            dry_run: self.server.dry_run,
            log_level: self.server.log_level,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
