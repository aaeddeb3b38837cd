//! Modifier state tracker.
//!
//! Presses modifiers in the fixed order ctrl → alt → shift → meta and
//! releases them in reverse, whatever order the client listed them in.  It
//! does not de-duplicate: pressing Ctrl twice sends two key-downs.  Callers
//! keep press/release pairs balanced.
//!
//! The tracker also remembers which modifiers it has pressed and not yet
//! released, so a closing connection can let go of everything (see
//! [`ModifierTracker::release_all`]).  That includes a modifier left down
//! because a later sink call in the same event failed.

use mobilemouse_core::{HidKeyCode, ModifierSet};
use tracing::trace;

use super::action_sink::{ActionSink, SinkError};

/// Press order.  Release walks it backwards.
const PRESS_ORDER: [Modifier; 4] = [Modifier::Ctrl, Modifier::Alt, Modifier::Shift, Modifier::Meta];

#[derive(Debug, Clone, Copy)]
enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

impl Modifier {
    fn key(self) -> HidKeyCode {
        match self {
            Modifier::Ctrl => HidKeyCode::ControlLeft,
            Modifier::Alt => HidKeyCode::AltLeft,
            Modifier::Shift => HidKeyCode::ShiftLeft,
            Modifier::Meta => HidKeyCode::MetaLeft,
        }
    }

    fn is_in(self, set: ModifierSet) -> bool {
        match self {
            Modifier::Ctrl => set.ctrl,
            Modifier::Alt => set.alt,
            Modifier::Shift => set.shift,
            Modifier::Meta => set.meta,
        }
    }

    fn assign(self, set: &mut ModifierSet, value: bool) {
        match self {
            Modifier::Ctrl => set.ctrl = value,
            Modifier::Alt => set.alt = value,
            Modifier::Shift => set.shift = value,
            Modifier::Meta => set.meta = value,
        }
    }
}

/// Connection-scoped record of the modifiers currently held on the host.
#[derive(Debug, Default)]
pub struct ModifierTracker {
    held: ModifierSet,
}

impl ModifierTracker {
    /// Creates a tracker with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Modifiers pressed through this tracker and not yet released.
    pub fn held(&self) -> ModifierSet {
        self.held
    }

    /// Presses (`pressing = true`) or releases the modifiers flagged in `mods`.
    ///
    /// Emits between zero and four sink calls.  Stops at the first failing
    /// call; whatever was already pressed stays recorded as held.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SinkError`].
    pub fn set_modifiers(
        &mut self,
        sink: &dyn ActionSink,
        mods: ModifierSet,
        pressing: bool,
    ) -> Result<(), SinkError> {
        if pressing {
            for m in PRESS_ORDER.into_iter().filter(|m| m.is_in(mods)) {
                sink.key_down(m.key())?;
                m.assign(&mut self.held, true);
            }
        } else {
            for m in PRESS_ORDER.into_iter().rev().filter(|m| m.is_in(mods)) {
                sink.key_up(m.key())?;
                m.assign(&mut self.held, false);
            }
        }
        trace!(?mods, pressing, held = ?self.held, "modifiers applied");
        Ok(())
    }

    /// Releases every held modifier, meta first and ctrl last.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SinkError`]; modifiers not yet released stay
    /// recorded as held so a second call can retry them.
    pub fn release_all(&mut self, sink: &dyn ActionSink) -> Result<(), SinkError> {
        if self.held.is_empty() {
            return Ok(());
        }
        let held = self.held;
        self.set_modifiers(sink, held, false)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
