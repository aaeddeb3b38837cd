//! Storage infrastructure: configuration file persistence.
//!
//! The engine only ever sees an immutable [`EngineConfig`]; reading,
//! defaulting and writing the TOML file is this module's job.
//!
//! [`EngineConfig`]: mobilemouse_core::EngineConfig

pub mod config;

pub use config::{load_or_create, AppConfig, ConfigError};
