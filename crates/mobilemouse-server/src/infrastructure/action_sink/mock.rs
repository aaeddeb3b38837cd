//! Recording action sink for tests.
//!
//! # Why a recording sink?
//!
//! The real sink moves the cursor and presses keys on the machine running the
//! tests, and nothing it does can be observed from Rust afterwards.  The
//! `RecordingSink` instead appends every call to a `Mutex<Vec<SinkAction>>`
//! so a test can assert on the exact sequence, in order.
//!
//! It also keeps a simulated cursor (updated by `move_to`) so consecutive
//! relative moves compose the way they would on a real desktop.
//!
//! # Failure injection
//!
//! - [`RecordingSink::failing`]: every call fails.
//! - [`RecordingSink::fail_after`]: the first `n` calls succeed, the rest fail.
//! - [`RecordingSink::failing_clipboard`]: only `set_clipboard` fails.
//!
//! Failed calls are not recorded.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mobilemouse_core::{HidKeyCode, KeyStroke, MouseButton};

use crate::application::action_sink::{ActionSink, SinkError};

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkAction {
    KeyDown(HidKeyCode),
    KeyUp(HidKeyCode),
    MoveTo(i32, i32),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Wheel(i32),
    SetClipboard(String),
    Pause(Duration),
}

/// A sink that records every call instead of touching the OS.
#[derive(Debug, Default)]
pub struct RecordingSink {
    actions: Mutex<Vec<SinkAction>>,
    cursor: Mutex<(i32, i32)>,
    calls: AtomicUsize,
    /// Number of calls that succeed before every later call fails.
    /// `None` means never fail.
    fail_after: Option<usize>,
    /// When `true`, `set_clipboard` fails with [`SinkError::Clipboard`].
    fail_clipboard: bool,
}

impl RecordingSink {
    /// Empty record, cursor at `(0, 0)`, never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every call fails with [`SinkError::Platform`].
    pub fn failing() -> Self {
        Self::new().fail_after(0)
    }

    /// Lets the first `n` calls succeed and fails all later ones.
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Makes `set_clipboard` fail; everything else still succeeds.
    pub fn failing_clipboard(mut self) -> Self {
        self.fail_clipboard = true;
        self
    }

    /// Starts the simulated cursor at `(x, y)`.
    pub fn with_cursor(self, x: i32, y: i32) -> Self {
        *lock(&self.cursor) = (x, y);
        self
    }

    /// Snapshot of the recorded actions, oldest first.
    pub fn actions(&self) -> Vec<SinkAction> {
        lock(&self.actions).clone()
    }

    /// Forgets the recorded actions (the cursor is kept).
    pub fn clear(&self) {
        lock(&self.actions).clear();
    }

    /// Current simulated cursor position.
    pub fn cursor(&self) -> (i32, i32) {
        *lock(&self.cursor)
    }

    /// Reconstructs the text the recorded keystrokes and pastes would
    /// produce under a US layout.
    ///
    /// Shift state follows `ShiftLeft` down/up, a `V` pressed while Ctrl is
    /// down inserts the last clipboard text, Enter and Tab insert `\n` and
    /// `\t`.  Other non-printing keys are skipped.
    pub fn replay_us_text(&self) -> String {
        let mut out = String::new();
        let mut shift = false;
        let mut ctrl = false;
        let mut clipboard = String::new();
        for action in lock(&self.actions).iter() {
            match action {
                SinkAction::KeyDown(HidKeyCode::ShiftLeft) => shift = true,
                SinkAction::KeyUp(HidKeyCode::ShiftLeft) => shift = false,
                SinkAction::KeyDown(HidKeyCode::ControlLeft) => ctrl = true,
                SinkAction::KeyUp(HidKeyCode::ControlLeft) => ctrl = false,
                SinkAction::SetClipboard(text) => clipboard = text.clone(),
                SinkAction::KeyDown(HidKeyCode::KeyV) if ctrl => out.push_str(&clipboard),
                SinkAction::KeyDown(HidKeyCode::Enter) => out.push('\n'),
                SinkAction::KeyDown(HidKeyCode::Tab) => out.push('\t'),
                SinkAction::KeyDown(key) => {
                    if let Some(c) = (KeyStroke { key: *key, shift }).us_char() {
                        out.push(c);
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Counts the call and fails it if the failure budget is spent.
    fn check(&self) -> Result<(), SinkError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_after {
            Some(limit) if n >= limit => Err(SinkError::Platform("mock failure".into())),
            _ => Ok(()),
        }
    }

    fn record(&self, action: SinkAction) -> Result<(), SinkError> {
        self.check()?;
        lock(&self.actions).push(action);
        Ok(())
    }
}

/// Locks ignoring poison; a panicking test must not hide the record.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ActionSink for RecordingSink {
    fn key_down(&self, key: HidKeyCode) -> Result<(), SinkError> {
        self.record(SinkAction::KeyDown(key))
    }

    fn key_up(&self, key: HidKeyCode) -> Result<(), SinkError> {
        self.record(SinkAction::KeyUp(key))
    }

    fn move_to(&self, x: i32, y: i32) -> Result<(), SinkError> {
        self.record(SinkAction::MoveTo(x, y))?;
        *lock(&self.cursor) = (x, y);
        Ok(())
    }

    fn button(&self, button: MouseButton, pressed: bool) -> Result<(), SinkError> {
        self.record(if pressed {
            SinkAction::ButtonDown(button)
        } else {
            SinkAction::ButtonUp(button)
        })
    }

    fn wheel(&self, steps: i32) -> Result<(), SinkError> {
        self.record(SinkAction::Wheel(steps))
    }

    fn set_clipboard(&self, text: &str) -> Result<(), SinkError> {
        if self.fail_clipboard {
            return Err(SinkError::Clipboard("mock clipboard failure".into()));
        }
        self.record(SinkAction::SetClipboard(text.to_string()))
    }

    /// Not recorded, but it does count towards `fail_after`.
    fn cursor_position(&self) -> Result<(i32, i32), SinkError> {
        self.check()?;
        Ok(self.cursor())
    }

    /// Recorded instead of sleeping; never fails.
    fn pause(&self, duration: Duration) {
        lock(&self.actions).push(SinkAction::Pause(duration));
    }
}
