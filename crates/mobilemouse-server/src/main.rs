//! MobileMouse host: entry point.
//!
//! Listens for a phone on a WebSocket and replays its touchpad and keyboard
//! events as real input on this machine.
//!
//! # Usage
//!
//! ```text
//! mobilemouse-server [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Config file [default: platform config dir]
//!   --bind   <ADDR>   Listener IP, overrides [server].bind_address
//!   --port   <PORT>   Listener port, overrides [server].port
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Overrides   |
//! |-----------------------|-------------|
//! | `MOBILEMOUSE_CONFIG`  | `--config`  |
//! | `MOBILEMOUSE_BIND`    | `--bind`    |
//! | `MOBILEMOUSE_PORT`    | `--port`    |
//! | `RUST_LOG`            | `[server].log_level` |
//!
//! # Input backends
//!
//! Built with `--features native`, input goes through enigo and the
//! clipboard through arboard.  The default build logs every action instead,
//! which is handy for trying the protocol on a headless machine.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mobilemouse_server::application::{ActionSink, InputEngine, ScreenEnumerator};
use mobilemouse_server::infrastructure::storage::config::{
    config_file_path, load_config, load_or_create, ServerConfig,
};
use mobilemouse_server::infrastructure::{run_server, ChannelConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// MobileMouse host.
///
/// Turns a phone into a touchpad and keyboard for this computer.
#[derive(Debug, Parser)]
#[command(
    name = "mobilemouse-server",
    about = "Receives touch and keyboard events from a phone and injects them as local input",
    version
)]
struct Cli {
    /// Path to the TOML config file.
    ///
    /// Created with defaults if it does not exist.
    #[arg(long, env = "MOBILEMOUSE_CONFIG")]
    config: Option<PathBuf>,

    /// IP address to bind the WebSocket server to.
    ///
    /// `0.0.0.0` lets phones on the LAN connect; `127.0.0.1` is local only.
    #[arg(long, env = "MOBILEMOUSE_BIND")]
    bind: Option<String>,

    /// TCP port for the WebSocket server.
    #[arg(long, env = "MOBILEMOUSE_PORT")]
    port: Option<u16>,
}

impl Cli {
    /// The config file to use: `--config`, else the platform default.
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => config_file_path().context("no --config given and no platform config dir"),
        }
    }

    /// Merges CLI overrides over the `[server]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting bind address is not a valid IP.
    fn into_channel_config(self, server: &ServerConfig) -> anyhow::Result<ChannelConfig> {
        let host = self.bind.unwrap_or_else(|| server.bind_address.clone());
        let port = self.port.unwrap_or(server.port);

        let bind_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid bind address: '{host}:{port}'"))?;

        Ok(ChannelConfig {
            bind_addr,
            path: server.path.clone(),
        })
    }
}

// ── Host backends ─────────────────────────────────────────────────────────────

#[cfg(feature = "native")]
fn build_host() -> anyhow::Result<(Arc<dyn ActionSink>, Arc<dyn ScreenEnumerator>)> {
    use mobilemouse_server::infrastructure::action_sink::EnigoSink;

    let enigo = Arc::new(EnigoSink::new().context("failed to open the native input backend")?);
    let sink: Arc<dyn ActionSink> = enigo.clone();

    #[cfg(target_os = "windows")]
    let screens: Arc<dyn ScreenEnumerator> =
        Arc::new(mobilemouse_server::infrastructure::screen_info::WindowsScreenEnumerator::new());
    #[cfg(not(target_os = "windows"))]
    let screens: Arc<dyn ScreenEnumerator> = enigo;

    Ok((sink, screens))
}

#[cfg(not(feature = "native"))]
fn build_host() -> anyhow::Result<(Arc<dyn ActionSink>, Arc<dyn ScreenEnumerator>)> {
    use mobilemouse_server::infrastructure::action_sink::LoggingSink;
    use mobilemouse_server::infrastructure::screen_info::MockScreenEnumerator;

    tracing::warn!("built without the `native` feature: actions are logged, not injected");
    Ok((
        Arc::new(LoggingSink::new()),
        Arc::new(MockScreenEnumerator::single_1080p()),
    ))
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// 1. Parse the CLI and locate the config file.
/// 2. Initialise `tracing` (`RUST_LOG`, else the configured level).
/// 3. Load or create the config file.
/// 4. Build the input backend and the shared [`InputEngine`].
/// 5. Serve WebSocket connections until Ctrl+C.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config_path()?;

    // Peek at the log level before the subscriber exists; load_or_create
    // below reports any problem with the file once logging is up.
    let log_level = load_config(&config_path)
        .map(|c| c.server.log_level)
        .unwrap_or_else(|_| ServerConfig::default().log_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let app_config = load_or_create(&config_path);
    let channel = cli.into_channel_config(&app_config.server)?;

    info!(
        "MobileMouse host starting: ws://{}{} (config {})",
        channel.bind_addr,
        channel.path,
        config_path.display()
    );

    let (sink, screens) = build_host()?;
    let engine = Arc::new(InputEngine::new(sink, screens, app_config.engine_config()));

    // ── Graceful shutdown flag ─────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, shutting down");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    run_server(channel, engine, running).await?;

    info!("MobileMouse host stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_leave_overrides_unset() {
        // Arrange / Act
        let cli = Cli::parse_from(["mobilemouse-server"]);

        // Assert
        assert!(cli.bind.is_none());
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_cli_config_path_override() {
        let cli = Cli::parse_from(["mobilemouse-server", "--config", "/tmp/mm.toml"]);
        assert_eq!(cli.config_path().unwrap(), PathBuf::from("/tmp/mm.toml"));
    }

    #[test]
    fn test_channel_config_uses_file_values_without_overrides() {
        // Arrange
        let cli = Cli {
            config: None,
            bind: None,
            port: None,
        };

        // Act
        let channel = cli.into_channel_config(&ServerConfig::default()).unwrap();

        // Assert
        assert_eq!(channel.bind_addr.to_string(), "0.0.0.0:8988");
        assert_eq!(channel.path, "/ws");
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let cli = Cli::parse_from([
            "mobilemouse-server",
            "--bind",
            "127.0.0.1",
            "--port",
            "9100",
        ]);
        let channel = cli.into_channel_config(&ServerConfig::default()).unwrap();
        assert_eq!(channel.bind_addr.to_string(), "127.0.0.1:9100");
    }

    #[test]
    fn test_invalid_bind_address_returns_error() {
        // Arrange
        let cli = Cli {
            config: None,
            bind: Some("not.an.ip".to_string()),
            port: None,
        };

        // Act
        let result = cli.into_channel_config(&ServerConfig::default());

        // Assert: must return an error, not panic
        assert!(result.is_err());
    }
}
