//! The action sink seam: the host primitive that performs one input action.
//!
//! The engine only ever *calls* an [`ActionSink`]; it never knows whether the
//! action lands in the real OS (the `native` feature), in a log, or in a test
//! recorder.  Implementations live in `infrastructure::action_sink`.

use std::time::Duration;

use mobilemouse_core::{HidKeyCode, MouseButton};
use thiserror::Error;

/// Error type for action sink calls.
///
/// The engine never retries a failed call: the event that issued it is
/// abandoned and the error is returned to the message channel.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The host injection API rejected the action (permission denied, no
    /// display connection, ...).
    #[error("platform error: {0}")]
    Platform(String),
    /// The host clipboard could not be written.
    #[error("clipboard error: {0}")]
    Clipboard(String),
    /// The sink was never initialised.
    #[error("action sink unavailable")]
    Unavailable,
}

/// Host-level input primitive.
///
/// Each method performs exactly one atomic action.  Implementations must be
/// `Send + Sync` because the sink is shared by every connection; the engine
/// serialises whole events around it, so a sink never sees two events
/// interleaved.
pub trait ActionSink: Send + Sync {
    /// Presses a physical key.
    fn key_down(&self, key: HidKeyCode) -> Result<(), SinkError>;

    /// Releases a physical key.
    fn key_up(&self, key: HidKeyCode) -> Result<(), SinkError>;

    /// Moves the pointer to an absolute desktop position.
    fn move_to(&self, x: i32, y: i32) -> Result<(), SinkError>;

    /// Presses (`pressed = true`) or releases a pointer button.
    fn button(&self, button: MouseButton, pressed: bool) -> Result<(), SinkError>;

    /// Turns the vertical wheel by `steps` notches.  Positive scrolls down
    /// (content moves up), negative scrolls up.
    fn wheel(&self, steps: i32) -> Result<(), SinkError>;

    /// Replaces the host clipboard with `text`.
    fn set_clipboard(&self, text: &str) -> Result<(), SinkError>;

    /// Current absolute pointer position.
    fn cursor_position(&self) -> Result<(i32, i32), SinkError>;

    /// Blocks for `duration` between two actions of one event.
    ///
    /// Part of the seam so tests can observe pauses instead of sleeping.
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
