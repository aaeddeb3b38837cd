//! mobilemouse-server library crate.
//!
//! The host side of MobileMouse: a WebSocket server that receives touch and
//! keyboard events from a phone and replays them as real input on this
//! machine.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Phone (JSON over WebSocket, path /ws)
//!         ↕
//! [mobilemouse-server]
//!   ├── application/        InputEngine: events → ordered sink calls
//!   │     ├── pointer       relative moves, clamping, wheel
//!   │     ├── text_input    keystrokes + clipboard paste fallback
//!   │     ├── gestures      tap, pinch, rotate, two-finger scroll
//!   │     └── modifiers     per-connection held-modifier tracking
//!   └── infrastructure/
//!         ├── ws_server     accept loop and sessions (tokio-tungstenite)
//!         ├── action_sink   enigo/arboard, logging and recording sinks
//!         ├── screen_info   monitor enumeration
//!         └── storage       TOML config file
//!         ↕
//! Host OS (keyboard, pointer, clipboard)
//! ```
//!
//! # Layer rules
//!
//! - `application` is synchronous and never calls the OS; it only sees the
//!   [`ActionSink`](application::ActionSink) and
//!   [`ScreenEnumerator`](application::ScreenEnumerator) traits.
//! - `infrastructure` depends on `application` plus `tokio`, `enigo` and
//!   friends.
//!
//! # For beginners: why traits at the edges?
//!
//! Injecting input on a CI machine would move the build agent's real
//! mouse.  Because the engine only talks to a trait, tests swap in a
//! `RecordingSink` and assert on the exact sequence of key presses and
//! pointer moves instead.

/// Application layer: the synchronous injection engine.
pub mod application;

/// Infrastructure layer: sinks, screen enumeration, config and WebSocket.
pub mod infrastructure;
