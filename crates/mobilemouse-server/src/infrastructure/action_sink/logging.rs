//! Log-only action sink.
//!
//! Used when the binary is built without the `native` feature (headless CI,
//! containers, a first try-out over the network).  Every action is logged at
//! `info` and otherwise discarded; the cursor is simulated so relative moves
//! still produce sensible coordinates in the log.

use std::sync::{Mutex, PoisonError};

use mobilemouse_core::{HidKeyCode, MouseButton};
use tracing::info;

use crate::application::action_sink::{ActionSink, SinkError};

/// An [`ActionSink`] that only logs.
#[derive(Debug, Default)]
pub struct LoggingSink {
    cursor: Mutex<(i32, i32)>,
}

impl LoggingSink {
    /// Creates a sink with the simulated cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActionSink for LoggingSink {
    fn key_down(&self, key: HidKeyCode) -> Result<(), SinkError> {
        info!(?key, "key down");
        Ok(())
    }

    fn key_up(&self, key: HidKeyCode) -> Result<(), SinkError> {
        info!(?key, "key up");
        Ok(())
    }

    fn move_to(&self, x: i32, y: i32) -> Result<(), SinkError> {
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner) = (x, y);
        info!(x, y, "pointer move");
        Ok(())
    }

    fn button(&self, button: MouseButton, pressed: bool) -> Result<(), SinkError> {
        info!(?button, pressed, "button");
        Ok(())
    }

    fn wheel(&self, steps: i32) -> Result<(), SinkError> {
        info!(steps, "wheel");
        Ok(())
    }

    fn set_clipboard(&self, text: &str) -> Result<(), SinkError> {
        // Length only: the text may be a password.
        info!(chars = text.chars().count(), "clipboard set");
        Ok(())
    }

    fn cursor_position(&self) -> Result<(i32, i32), SinkError> {
        Ok(*self.cursor.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
