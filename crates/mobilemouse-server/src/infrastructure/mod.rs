//! Infrastructure layer for the MobileMouse host.
//!
//! Everything that touches the outside world lives here:
//!
//! - `action_sink` – implementations of the [`ActionSink`] seam (native,
//!   logging, recording).
//! - `screen_info` – implementations of the [`ScreenEnumerator`] seam.
//! - `storage`     – the TOML configuration file.
//! - `ws_server`   – the WebSocket message channel feeding the engine.
//!
//! # What does NOT belong here?
//!
//! - Pointer math, key ordering, gesture translation (application layer)
//! - Key tables and wire message types (`mobilemouse-core`)
//!
//! [`ActionSink`]: crate::application::ActionSink
//! [`ScreenEnumerator`]: crate::application::ScreenEnumerator

pub mod action_sink;
pub mod screen_info;
pub mod storage;
pub mod ws_server;

pub use ws_server::{run_server, serve, ChannelConfig};
