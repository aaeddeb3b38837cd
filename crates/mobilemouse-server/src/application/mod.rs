//! Application layer: the input injection engine.
//!
//! Everything here is synchronous and OS-free.  The host is reached only
//! through the [`ActionSink`] and [`ScreenEnumerator`] traits, whose
//! implementations live in the infrastructure layer.
//!
//! # Module map
//!
//! - `action_sink`   – the host primitive seam and [`SinkError`].
//! - `screen_layout` – display enumeration seam and fallback layout.
//! - `modifiers`     – fixed-order modifier press/release with held-state.
//! - `pointer`       – relative moves, clamping, wheel scaling, buttons.
//! - `text_input`    – keystrokes plus clipboard paste for unmappable runs.
//! - `gestures`      – tap, double tap, long press, pinch, rotate, two-finger.
//! - `engine`        – [`InputEngine`] dispatch and per-connection [`SessionState`].

pub mod action_sink;
pub mod engine;
pub mod gestures;
pub mod modifiers;
pub mod pointer;
pub mod screen_layout;
pub mod text_input;

pub use action_sink::{ActionSink, SinkError};
pub use engine::{InputEngine, SessionState};
pub use screen_layout::{ScreenEnumerator, ScreenInfoError};
