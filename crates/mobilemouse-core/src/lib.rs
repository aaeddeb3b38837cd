//! # mobilemouse-core
//!
//! Shared, OS-free building blocks for the MobileMouse host: the key symbol
//! tables, the control-event and wire-message types, and the screen geometry
//! and configuration values the injection engine works with.
//!
//! # Architecture overview (for beginners)
//!
//! MobileMouse lets a phone act as a touchpad and keyboard for a desktop
//! computer.  The phone sends small JSON messages ("move the pointer 3 px
//! right", "type `Hi!`", "pinch by 0.2") over a WebSocket; the host turns
//! each one into real key presses, pointer moves and wheel steps.
//!
//! This crate holds everything that can be tested without a screen, a
//! keyboard or a socket:
//!
//! - **`keymap`** – Maps key names (`"Enter"`, `"F5"`) and characters
//!   (`'!'`, `'A'`) to physical keys under a US layout, or reports them as
//!   unmappable so they can be pasted instead.
//!
//! - **`protocol`** – The typed [`ControlEvent`] the engine consumes, and the
//!   lenient JSON decoder that produces it from a client frame.
//!
//! - **`domain`** – Monitor rectangles, virtual-desktop clamping and the
//!   immutable [`EngineConfig`].
//!
//! The engine itself and the OS adapters live in `mobilemouse-server`.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::config::{EngineConfig, GestureTuning};
pub use domain::geometry::{MonitorInfo, ScreenBounds, ScreenLayout};
pub use keymap::{HidKeyCode, KeyMapper, KeyStroke};
pub use protocol::events::{ButtonAction, ControlEvent, KeyAction, ModifierSet, MouseButton};
pub use protocol::wire::{decode_client_message, DecodeError, Inbound, ServerMessage};
