//! InputEngine: the single entry point from the message channel.
//!
//! One [`InputEngine`] is shared by every connection.  Each connection owns a
//! [`SessionState`] and passes it to [`InputEngine::handle`] for every
//! decoded event, then to [`InputEngine::end_session`] when it closes.
//!
//! # Ordering and exclusion
//!
//! `handle` holds an engine-wide lock for the whole event, so the action
//! sequence of one event (say Ctrl down, wheel, Ctrl up) is never interleaved
//! with another connection's.  Events of one connection are processed
//! strictly one after another because the channel awaits each `handle`
//! before reading the next frame.

use std::sync::{Arc, Mutex, PoisonError};

use mobilemouse_core::{ControlEvent, EngineConfig, KeyAction, KeyMapper};
use tracing::{debug, trace};
use uuid::Uuid;

use super::action_sink::{ActionSink, SinkError};
use super::gestures;
use super::modifiers::ModifierTracker;
use super::pointer;
use super::screen_layout::ScreenEnumerator;
use super::text_input;

/// Connection-scoped engine state.
///
/// Created when a client connects, flushed with
/// [`InputEngine::end_session`] and dropped when it disconnects.
#[derive(Debug)]
pub struct SessionState {
    id: Uuid,
    modifiers: ModifierTracker,
    touching: bool,
}

impl SessionState {
    /// Fresh state: nothing held, not touching.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            modifiers: ModifierTracker::new(),
            touching: false,
        }
    }

    /// Identifier used in log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// `true` between a `touch_start` and the next `touch_end`.
    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Modifier tracker for this connection.
    pub fn modifiers(&self) -> &ModifierTracker {
        &self.modifiers
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Translates control events into ordered action sink calls.
pub struct InputEngine {
    sink: Arc<dyn ActionSink>,
    screens: Arc<dyn ScreenEnumerator>,
    config: EngineConfig,
    serial: Mutex<()>,
}

impl InputEngine {
    /// Creates an engine over the given sink and display enumerator.
    ///
    /// `config` is fixed for the engine's lifetime.
    pub fn new(
        sink: Arc<dyn ActionSink>,
        screens: Arc<dyn ScreenEnumerator>,
        config: EngineConfig,
    ) -> Self {
        Self {
            sink,
            screens,
            config,
            serial: Mutex::new(()),
        }
    }

    /// Processes one event to completion.
    ///
    /// Unmappable key names, zero deltas and gestures that round to zero
    /// steps issue no actions and return `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the first [`SinkError`]; the remaining actions of this event
    /// are abandoned.  Modifiers it left pressed stay recorded in `session`
    /// and are released by [`end_session`](Self::end_session).
    pub fn handle(
        &self,
        session: &mut SessionState,
        event: &ControlEvent,
    ) -> Result<(), SinkError> {
        let _guard = self.serial.lock().unwrap_or_else(PoisonError::into_inner);
        trace!(session = %session.id, kind = event.kind(), "handling event");

        let sink = self.sink.as_ref();
        let tuning = &self.config.gestures;
        match event {
            ControlEvent::MouseMove { dx, dy }
            | ControlEvent::Drag { dx, dy }
            | ControlEvent::TouchMove { dx, dy } => {
                // Touch motion is forwarded whether or not a touch is active.
                pointer::move_relative(sink, self.screens.as_ref(), &self.config, *dx, *dy)
            }
            ControlEvent::MouseButton { button, action } => {
                pointer::mouse_button(sink, *button, *action)
            }
            ControlEvent::Scroll { dx, dy } => pointer::scroll(sink, &self.config, *dx, *dy),
            ControlEvent::KeyEvent {
                key,
                action,
                modifiers,
            } => {
                let Some(stroke) = KeyMapper::map_key_name(key) else {
                    debug!(session = %session.id, key = %key, "dropping unmappable key name");
                    return Ok(());
                };
                // Shift comes from the client's flags, never from letter case.
                match action {
                    KeyAction::Down => {
                        session.modifiers.set_modifiers(sink, *modifiers, true)?;
                        sink.key_down(stroke.key)
                    }
                    KeyAction::Up => {
                        sink.key_up(stroke.key)?;
                        session.modifiers.set_modifiers(sink, *modifiers, false)
                    }
                }
            }
            ControlEvent::TextInput { text } => {
                text_input::type_text(sink, &mut session.modifiers, text)
            }
            ControlEvent::Tap => gestures::tap(sink),
            ControlEvent::DoubleTap => gestures::double_tap(sink, tuning),
            ControlEvent::LongPress => gestures::long_press(sink),
            ControlEvent::Pinch { dscale } => {
                gestures::pinch(sink, &mut session.modifiers, tuning, *dscale)
            }
            ControlEvent::Rotate { dr } => {
                gestures::rotate(sink, &mut session.modifiers, tuning, *dr)
            }
            ControlEvent::TwoFingerMove { ds, dy } => {
                gestures::two_finger_move(sink, &mut session.modifiers, tuning, *ds, *dy)
            }
            ControlEvent::TouchStart => {
                session.touching = true;
                Ok(())
            }
            ControlEvent::TouchEnd => {
                session.touching = false;
                Ok(())
            }
        }
    }

    /// Releases every modifier the session still holds.
    ///
    /// Call once when the connection closes, before dropping `session`.
    ///
    /// # Errors
    ///
    /// Propagates a failed key release.
    pub fn end_session(&self, session: &mut SessionState) -> Result<(), SinkError> {
        let _guard = self.serial.lock().unwrap_or_else(PoisonError::into_inner);
        let held = session.modifiers.held();
        if !held.is_empty() {
            debug!(session = %session.id, ?held, "releasing held modifiers");
        }
        session.touching = false;
        session.modifiers.release_all(self.sink.as_ref())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
