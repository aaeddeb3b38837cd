//! Text injector: types an arbitrary Unicode string.
//!
//! Characters with a US-layout keystroke are typed key by key.  Runs of
//! characters without one are collected and pasted in one go: clipboard,
//! then Ctrl+V.  So `"A😀😀B"` is Shift+A, one paste of `"😀😀"`, Shift+B.

use mobilemouse_core::{HidKeyCode, KeyMapper, KeyStroke, ModifierSet};
use tracing::{debug, warn};

use super::action_sink::{ActionSink, SinkError};
use super::modifiers::ModifierTracker;

/// Types `text`.  Empty text issues nothing.
///
/// # Errors
///
/// Propagates the first failed keystroke.  A clipboard write failure is not
/// an error: that run is skipped with a warning and typing continues.
pub fn type_text(
    sink: &dyn ActionSink,
    modifiers: &mut ModifierTracker,
    text: &str,
) -> Result<(), SinkError> {
    let mut pending = String::new();
    for c in text.chars() {
        match KeyMapper::map_char(c) {
            Some(stroke) => {
                flush_paste(sink, modifiers, &mut pending)?;
                type_stroke(sink, modifiers, stroke)?;
            }
            None => pending.push(c),
        }
    }
    flush_paste(sink, modifiers, &mut pending)
}

/// Presses and releases one key, wrapped in Shift if the stroke needs it.
fn type_stroke(
    sink: &dyn ActionSink,
    modifiers: &mut ModifierTracker,
    stroke: KeyStroke,
) -> Result<(), SinkError> {
    if stroke.shift {
        modifiers.set_modifiers(sink, ModifierSet::SHIFT, true)?;
    }
    sink.key_down(stroke.key)?;
    sink.key_up(stroke.key)?;
    if stroke.shift {
        modifiers.set_modifiers(sink, ModifierSet::SHIFT, false)?;
    }
    Ok(())
}

/// Pastes and clears the pending run, if any.
fn flush_paste(
    sink: &dyn ActionSink,
    modifiers: &mut ModifierTracker,
    pending: &mut String,
) -> Result<(), SinkError> {
    if pending.is_empty() {
        return Ok(());
    }
    let run = std::mem::take(pending);
    if let Err(e) = sink.set_clipboard(&run) {
        warn!(chars = run.chars().count(), "clipboard unavailable, skipping paste: {e}");
        return Ok(());
    }
    debug!(chars = run.chars().count(), "pasting unmappable run");
    paste_shortcut(sink, modifiers)
}

/// Ctrl+V as one group.
fn paste_shortcut(sink: &dyn ActionSink, modifiers: &mut ModifierTracker) -> Result<(), SinkError> {
    modifiers.set_modifiers(sink, ModifierSet::CTRL, true)?;
    sink.key_down(HidKeyCode::KeyV)?;
    sink.key_up(HidKeyCode::KeyV)?;
    modifiers.set_modifiers(sink, ModifierSet::CTRL, false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
