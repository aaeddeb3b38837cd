//! TOML-based configuration persistence for the MobileMouse host.
//!
//! Reads and writes [`AppConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\MobileMouse\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/mobilemouse/config.toml` (or `~/.config/...`)
//! - macOS:    `~/Library/Application Support/MobileMouse/config.toml`
//!
//! ```toml
//! [input]
//! sensitivity = 1.0
//! scroll_speed = 1.0
//! invert_scroll = false
//!
//! [gestures]
//! pinch_factor = 10.0
//! rotate_factor = 0.1
//! two_finger_factor = 1.0
//! double_tap_gap_ms = 40
//!
//! [server]
//! bind_address = "0.0.0.0"
//! port = 8988
//! path = "/ws"
//! log_level = "info"
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "...")]` and every section is
//! `#[serde(default)]`, so an empty file, a file from an older version, or a
//! file with only `[input]` all load cleanly.
//!
//! # Load-or-create
//!
//! [`load_or_create`] is what the binary calls at startup: a missing file is
//! written with defaults, and an unreadable or malformed file is reported
//! with a warning and replaced *in memory* by defaults (the file on disk is
//! left alone so the user can fix it).

use std::path::{Path, PathBuf};
use std::time::Duration;

use mobilemouse_core::{EngineConfig, GestureTuning};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Pointer and scroll scaling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Pointer speed multiplier.  `<= 0` behaves as `1.0`.
    #[serde(default = "default_one")]
    pub sensitivity: f64,
    /// Wheel speed multiplier.  `<= 0` behaves as `1.0`.
    #[serde(default = "default_one")]
    pub scroll_speed: f64,
    /// Reverse the vertical scroll direction ("natural" scrolling).
    #[serde(default)]
    pub invert_scroll: bool,
}

/// Gesture tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    /// Wheel steps per unit of pinch scale change.
    #[serde(default = "default_pinch_factor")]
    pub pinch_factor: f64,
    /// Wheel steps per degree of rotation.
    #[serde(default = "default_rotate_factor")]
    pub rotate_factor: f64,
    /// Wheel steps per pixel of two-finger travel.
    #[serde(default = "default_one")]
    pub two_finger_factor: f64,
    /// Pause between the two clicks of a double tap, in milliseconds.
    #[serde(default = "default_double_tap_gap_ms")]
    pub double_tap_gap_ms: u64,
}

/// WebSocket listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// IP address to bind.  `"0.0.0.0"` accepts phones on the LAN.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Only WebSocket upgrades on this path are accepted.
    #[serde(default = "default_path")]
    pub path: String,
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_one() -> f64 {
    1.0
}
fn default_pinch_factor() -> f64 {
    10.0
}
fn default_rotate_factor() -> f64 {
    0.1
}
fn default_double_tap_gap_ms() -> u64 {
    40
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8988
}
fn default_path() -> String {
    "/ws".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sensitivity: default_one(),
            scroll_speed: default_one(),
            invert_scroll: false,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_factor: default_pinch_factor(),
            rotate_factor: default_rotate_factor(),
            two_finger_factor: default_one(),
            double_tap_gap_ms: default_double_tap_gap_ms(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            path: default_path(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// The engine's read-only view of `[input]` and `[gestures]`.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            sensitivity: self.input.sensitivity,
            scroll_speed: self.input.scroll_speed,
            invert_scroll: self.input.invert_scroll,
            gestures: GestureTuning {
                pinch_factor: self.gestures.pinch_factor,
                rotate_factor: self.gestures.rotate_factor,
                two_finger_factor: self.gestures.two_finger_factor,
                double_tap_gap: Duration::from_millis(self.gestures.double_tap_gap_ms),
            },
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Startup loader: never fails.
///
/// - File missing → defaults are written to `path` and returned.  A failed
///   write is only a warning.
/// - File unreadable or malformed → warning, defaults returned, file kept.
pub fn load_or_create(path: &Path) -> AppConfig {
    if !path.exists() {
        let config = AppConfig::default();
        match save_config(path, &config) {
            Ok(()) => info!("wrote default configuration to {}", path.display()),
            Err(e) => warn!("could not write default configuration: {e}"),
        }
        return config;
    }

    match load_config(path) {
        Ok(config) => {
            info!("loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            warn!("ignoring configuration file, using defaults: {e}");
            AppConfig::default()
        }
    }
}

/// Resolves the platform config base directory including the `MobileMouse`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("MobileMouse"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("mobilemouse"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("MobileMouse")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("mobilemouse_test_{}", Uuid::new_v4()))
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_config_default_values() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert_eq!(cfg.input.sensitivity, 1.0);
        assert_eq!(cfg.input.scroll_speed, 1.0);
        assert!(!cfg.input.invert_scroll);
        assert_eq!(cfg.server.port, 8988);
        assert_eq!(cfg.server.path, "/ws");
        assert_eq!(cfg.server.log_level, "info");
        assert_eq!(cfg.gestures.double_tap_gap_ms, 40);
    }

    #[test]
    fn test_engine_config_matches_file_values() {
        let mut cfg = AppConfig::default();
        cfg.input.sensitivity = 2.5;
        cfg.input.invert_scroll = true;
        cfg.gestures.double_tap_gap_ms = 25;

        let engine = cfg.engine_config();

        assert_eq!(engine.sensitivity, 2.5);
        assert!(engine.invert_scroll);
        assert_eq!(engine.gestures.double_tap_gap, Duration::from_millis(25));
        assert_eq!(engine.gestures.pinch_factor, 10.0);
    }

    // ── TOML parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        // Arrange
        let toml_str = r#"
[input]
scroll_speed = 3.0
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.input.scroll_speed, 3.0);
        assert_eq!(cfg.input.sensitivity, 1.0);
        assert_eq!(cfg.server, ServerConfig::default());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 9000;
        cfg.gestures.rotate_factor = 0.25;

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: AppConfig = toml::from_str(&text).expect("deserialize");

        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[input]\nsensitivity = \"fast\"\n");
        assert!(result.is_err());
    }

    // ── File handling ─────────────────────────────────────────────────────────

    #[test]
    fn test_load_config_missing_file_is_default() {
        let path = temp_dir().join("config.toml");
        assert_eq!(load_config(&path).expect("load"), AppConfig::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("nested").join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.input.sensitivity = 0.5;
        cfg.server.log_level = "debug".to_string();

        // Act
        save_config(&path, &cfg).expect("save");
        let loaded = load_config(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_or_create_writes_defaults_when_missing() {
        let dir = temp_dir();
        let path = dir.join("config.toml");

        let cfg = load_or_create(&path);

        assert_eq!(cfg, AppConfig::default());
        assert!(path.exists(), "default config must be written");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_or_create_falls_back_on_malformed_file() {
        // Arrange
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("config.toml");
        std::fs::write(&path, "[[[ not valid toml").expect("write");

        // Act
        let cfg = load_or_create(&path);

        // Assert: defaults in memory, broken file left for the user.
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "[[[ not valid toml"
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        // NoPlatformConfigDir in a stripped environment is also acceptable.
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("config.toml"), "got {path:?}");
        }
    }
}
