//! OpenCtrl HID bridge: entry point.
//!
//! Runs on a board whose USB device controller is configured as a HID gadget
//! and serves a tiny HTTP API that turns JSON bodies into keyboard, mouse,
//! gamepad, pen and touch reports for the attached host.
//!
//! # Usage
//!
//! ```text
//! openctrl-bridge [OPTIONS]
//!
//! Options:
//!   --config <FILE>        Optional TOML configuration file
//!   --bind <IP>            Listen address [default: 0.0.0.0]
//!   --port <PORT>          Listen port [default: 80]
//!   --keyboard-dev <PATH>  Keyboard gadget node [default: /dev/hidg0]
//!   --mouse-dev <PATH>     Mouse gadget node [default: /dev/hidg1]
//!   --gamepad-dev <PATH>   Gamepad gadget node [default: /dev/hidg2]
//!   --pen-dev <PATH>       Pen gadget node [default: unset, pen unavailable]
//!   --touch-dev <PATH>     Touch gadget node [default: unset, touch unavailable]
//!   --dry-run              Log reports instead of writing them
//!   --log-level <FILTER>   Log filter when RUST_LOG is unset [default: info]
//! ```
//!
//! # Precedence
//!
//! Built-in defaults, then the `--config` file, then environment variables and
//! flags (flags win over their environment variable).
//!
//! | Variable                | Flag             |
//! |-------------------------|------------------|
//! | `OPENCTRL_CONFIG`       | `--config`       |
//! | `OPENCTRL_BIND`         | `--bind`         |
//! | `OPENCTRL_PORT`         | `--port`         |
//! | `OPENCTRL_KEYBOARD_DEV` | `--keyboard-dev` |
//! | `OPENCTRL_MOUSE_DEV`    | `--mouse-dev`    |
//! | `OPENCTRL_GAMEPAD_DEV`  | `--gamepad-dev`  |
//! | `OPENCTRL_PEN_DEV`      | `--pen-dev`      |
//! | `OPENCTRL_TOUCH_DEV`    | `--touch-dev`    |
//! | `OPENCTRL_DRY_RUN`      | `--dry-run`      |
//! | `OPENCTRL_LOG_LEVEL`    | `--log-level`    |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use openctrl_core::DeviceClass;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use openctrl_bridge::domain::BridgeConfig;
use openctrl_bridge::infrastructure::config_file::FileConfig;
use openctrl_bridge::infrastructure::{build_registry, run_server};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// OpenCtrl HID bridge.
///
/// Every option is optional so that values from `--config` are only replaced
/// when a flag or environment variable is actually given.
#[derive(Debug, Parser)]
#[command(
    name = "openctrl-bridge",
    about = "HTTP-to-USB-HID bridge for keyboard, mouse, gamepad and digitizer input",
    version
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, env = "OPENCTRL_CONFIG")]
    config: Option<PathBuf>,

    /// IP address to listen on.  `0.0.0.0` exposes the bridge on every
    /// interface.
    #[arg(long, env = "OPENCTRL_BIND")]
    bind: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "OPENCTRL_PORT")]
    port: Option<u16>,

    /// Keyboard gadget node.
    #[arg(long, env = "OPENCTRL_KEYBOARD_DEV")]
    keyboard_dev: Option<PathBuf>,

    /// Mouse gadget node.
    #[arg(long, env = "OPENCTRL_MOUSE_DEV")]
    mouse_dev: Option<PathBuf>,

    /// Gamepad gadget node.
    #[arg(long, env = "OPENCTRL_GAMEPAD_DEV")]
    gamepad_dev: Option<PathBuf>,

    /// Pen digitizer gadget node.  Pen requests answer 501 while unset.
    #[arg(long, env = "OPENCTRL_PEN_DEV")]
    pen_dev: Option<PathBuf>,

    /// Touch digitizer gadget node.  Touch requests answer 501 while unset.
    #[arg(long, env = "OPENCTRL_TOUCH_DEV")]
    touch_dev: Option<PathBuf>,

    /// Log every report instead of writing it to a gadget node.
    #[arg(long, env = "OPENCTRL_DRY_RUN")]
    dry_run: bool,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[arg(long, env = "OPENCTRL_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    /// Merges defaults, the config file and the CLI into a [`BridgeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or if `--bind` is
    /// not a valid IP address.
    fn into_bridge_config(self) -> anyhow::Result<BridgeConfig> {
        let mut config = match &self.config {
            Some(path) => FileConfig::load(path)
                .and_then(FileConfig::into_bridge_config)
                .with_context(|| format!("failed to load config file {}", path.display()))?,
            None => BridgeConfig::default(),
        };

        if let Some(bind) = &self.bind {
            let ip: IpAddr = bind
                .parse()
                .with_context(|| format!("invalid bind address: '{bind}'"))?;
            config.listen_addr = SocketAddr::new(ip, config.listen_addr.port());
        }
        if let Some(port) = self.port {
            config.listen_addr.set_port(port);
        }

        let overrides = [
            (DeviceClass::Keyboard, self.keyboard_dev),
            (DeviceClass::Mouse, self.mouse_dev),
            (DeviceClass::Gamepad, self.gamepad_dev),
            (DeviceClass::Pen, self.pen_dev),
            (DeviceClass::Touch, self.touch_dev),
        ];
        for (class, path) in overrides {
            if path.is_some() {
                config.devices.set(class, path);
            }
        }

        config.dry_run |= self.dry_run;
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. CLI arguments (and the optional config file) become a [`BridgeConfig`].
/// 2. `tracing_subscriber` is initialised from `RUST_LOG`, falling back to
///    the configured log level.
/// 3. The device registry is built: one channel per configured class.
/// 4. The HTTP server runs until Ctrl+C, then drains in-flight requests.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_bridge_config()?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "OpenCtrl HID bridge starting, listen={}, dry_run={}",
        config.listen_addr, config.dry_run
    );
    warn!(
        "the control API has no authentication; anyone who can reach {} can inject input",
        config.listen_addr
    );

    let registry = Arc::new(build_registry(&config));

    // ── Graceful shutdown ─────────────────────────────────────────────────────
    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, initiating graceful shutdown"),
            Err(e) => {
                error!("failed to listen for Ctrl+C signal: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    run_server(config.listen_addr, registry, shutdown).await?;

    info!("OpenCtrl HID bridge stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
