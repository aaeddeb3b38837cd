//! Native action sink backed by `enigo` (input) and `arboard` (clipboard).
//!
//! `enigo` drives `SendInput` on Windows, XTest/libei on Linux and
//! CoreGraphics events on macOS, so one adapter covers all three hosts.
//!
//! # Key translation
//!
//! The engine speaks HID usage IDs.  Named keys map to the matching
//! [`enigo::Key`] variant; letter, digit and punctuation keys map to
//! `Key::Unicode` of the character the key prints *without* Shift on a US
//! layout.  Shift is always sent as its own key press by the engine, so the
//! OS applies it exactly as for a physical keyboard.

use std::sync::{Mutex, MutexGuard, PoisonError};

use arboard::Clipboard;
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use mobilemouse_core::{HidKeyCode, KeyStroke, MonitorInfo, MouseButton};
use tracing::{debug, info};

use crate::application::action_sink::{ActionSink, SinkError};
use crate::application::screen_layout::{ScreenEnumerator, ScreenInfoError};

/// [`ActionSink`] that injects real input into the host session.
pub struct EnigoSink {
    enigo: Mutex<Enigo>,
    // Created on first paste and kept alive: on X11 the owning process must
    // stay around to serve the selection.
    clipboard: Mutex<Option<Clipboard>>,
}

impl EnigoSink {
    /// Connects to the host input system.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Platform`] if `enigo` cannot open a connection
    /// (no display server, missing accessibility permission, ...).
    pub fn new() -> Result<Self, SinkError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| SinkError::Platform(format!("failed to initialise enigo: {e}")))?;
        info!("native input sink ready");
        Ok(Self {
            enigo: Mutex::new(enigo),
            clipboard: Mutex::new(None),
        })
    }

    fn enigo(&self) -> MutexGuard<'_, Enigo> {
        self.enigo.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key(&self, key: HidKeyCode, direction: Direction) -> Result<(), SinkError> {
        let Some(k) = to_enigo_key(key) else {
            debug!(?key, "no enigo key for HID code");
            return Ok(());
        };
        self.enigo().key(k, direction).map_err(platform)
    }
}

fn platform(e: enigo::InputError) -> SinkError {
    SinkError::Platform(e.to_string())
}

impl ActionSink for EnigoSink {
    fn key_down(&self, key: HidKeyCode) -> Result<(), SinkError> {
        self.key(key, Direction::Press)
    }

    fn key_up(&self, key: HidKeyCode) -> Result<(), SinkError> {
        self.key(key, Direction::Release)
    }

    fn move_to(&self, x: i32, y: i32) -> Result<(), SinkError> {
        self.enigo()
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(platform)
    }

    fn button(&self, button: MouseButton, pressed: bool) -> Result<(), SinkError> {
        let b = match button {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
        };
        let direction = if pressed {
            Direction::Press
        } else {
            Direction::Release
        };
        self.enigo().button(b, direction).map_err(platform)
    }

    fn wheel(&self, steps: i32) -> Result<(), SinkError> {
        self.enigo().scroll(steps, Axis::Vertical).map_err(platform)
    }

    fn set_clipboard(&self, text: &str) -> Result<(), SinkError> {
        let mut slot = self.clipboard.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(Clipboard::new().map_err(|e| SinkError::Clipboard(e.to_string()))?);
        }
        match slot.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|e| SinkError::Clipboard(e.to_string())),
            None => Err(SinkError::Clipboard("clipboard not initialised".into())),
        }
    }

    fn cursor_position(&self) -> Result<(i32, i32), SinkError> {
        self.enigo().location().map_err(platform)
    }
}

/// Single-display enumerator: the main display as reported by `enigo`.
///
/// Used on hosts without a dedicated multi-monitor enumerator.
impl ScreenEnumerator for EnigoSink {
    fn enumerate_monitors(&self) -> Result<Vec<MonitorInfo>, ScreenInfoError> {
        let (w, h) = self
            .enigo()
            .main_display()
            .map_err(|e| ScreenInfoError::PlatformError(e.to_string()))?;
        if w <= 0 || h <= 0 {
            return Ok(Vec::new());
        }
        Ok(vec![MonitorInfo::new(0, 0, w as u32, h as u32).primary()])
    }
}

/// Maps a HID usage ID to an `enigo` key.
pub fn to_enigo_key(key: HidKeyCode) -> Option<Key> {
    let named = match key {
        HidKeyCode::Enter => Key::Return,
        HidKeyCode::Escape => Key::Escape,
        HidKeyCode::Backspace => Key::Backspace,
        HidKeyCode::Tab => Key::Tab,
        HidKeyCode::Space => Key::Space,
        HidKeyCode::Delete => Key::Delete,
        HidKeyCode::Home => Key::Home,
        HidKeyCode::End => Key::End,
        HidKeyCode::PageUp => Key::PageUp,
        HidKeyCode::PageDown => Key::PageDown,
        HidKeyCode::ArrowLeft => Key::LeftArrow,
        HidKeyCode::ArrowRight => Key::RightArrow,
        HidKeyCode::ArrowUp => Key::UpArrow,
        HidKeyCode::ArrowDown => Key::DownArrow,
        HidKeyCode::F1 => Key::F1,
        HidKeyCode::F2 => Key::F2,
        HidKeyCode::F3 => Key::F3,
        HidKeyCode::F4 => Key::F4,
        HidKeyCode::F5 => Key::F5,
        HidKeyCode::F6 => Key::F6,
        HidKeyCode::F7 => Key::F7,
        HidKeyCode::F8 => Key::F8,
        HidKeyCode::F9 => Key::F9,
        HidKeyCode::F10 => Key::F10,
        HidKeyCode::F11 => Key::F11,
        HidKeyCode::F12 => Key::F12,
        HidKeyCode::ControlLeft => Key::Control,
        HidKeyCode::ShiftLeft => Key::Shift,
        HidKeyCode::AltLeft => Key::Alt,
        HidKeyCode::MetaLeft => Key::Meta,
        printable => return KeyStroke::plain(printable).us_char().map(Key::Unicode),
    };
    Some(named)
}
