//! Gesture translator: composite touch gestures to pointer, wheel and
//! modifier actions.
//!
//! | Gesture           | Actions                                            |
//! |-------------------|----------------------------------------------------|
//! | tap               | left click                                         |
//! | double tap        | left click, short pause, left click                |
//! | long press        | right click                                        |
//! | pinch `dscale`    | Ctrl held around wheel `-round(dscale * pinch)`    |
//! | rotate `dr`       | Shift held around wheel `+round(dr * rotate)`      |
//! | two-finger move   | wheel `round(dy * f)`, then Shift + wheel `round(ds * f)` |
//!
//! A positive pinch (fingers apart, zoom in) scrolls up with Ctrl held,
//! which is what desktop applications treat as zoom in.  The host has no
//! rotation or horizontal-wheel primitive, so both are approximated with a
//! Shift-modified vertical wheel.
//!
//! Every modifier pressed here is released within the same call.

use mobilemouse_core::{GestureTuning, ModifierSet, MouseButton};
use tracing::trace;

use super::action_sink::{ActionSink, SinkError};
use super::modifiers::ModifierTracker;
use super::pointer::{click, scale_round};

/// One left click.
pub fn tap(sink: &dyn ActionSink) -> Result<(), SinkError> {
    click(sink, MouseButton::Left)
}

/// Two left clicks separated by the configured (nonzero) gap.
pub fn double_tap(sink: &dyn ActionSink, tuning: &GestureTuning) -> Result<(), SinkError> {
    click(sink, MouseButton::Left)?;
    sink.pause(tuning.effective_double_tap_gap());
    click(sink, MouseButton::Left)
}

/// One right click.  No hold timing is modelled.
pub fn long_press(sink: &dyn ActionSink) -> Result<(), SinkError> {
    click(sink, MouseButton::Right)
}

/// Ctrl + wheel zoom.  Spreading the fingers (positive `dscale`) scrolls up.
/// Rounds to zero steps → nothing.
pub fn pinch(
    sink: &dyn ActionSink,
    modifiers: &mut ModifierTracker,
    tuning: &GestureTuning,
    dscale: f64,
) -> Result<(), SinkError> {
    // Negate before rounding: a saturated i32::MIN has no positive twin.
    let steps = scale_round(-dscale * tuning.pinch_factor);
    trace!(dscale, steps, "pinch");
    modified_wheel(sink, modifiers, ModifierSet::CTRL, steps)
}

/// Shift + wheel.  Rounds to zero steps → nothing.
pub fn rotate(
    sink: &dyn ActionSink,
    modifiers: &mut ModifierTracker,
    tuning: &GestureTuning,
    dr: f64,
) -> Result<(), SinkError> {
    let steps = scale_round(dr * tuning.rotate_factor);
    trace!(dr, steps, "rotate");
    modified_wheel(sink, modifiers, ModifierSet::SHIFT, steps)
}

/// Vertical wheel for `dy`, then Shift + wheel for the horizontal `ds`.
pub fn two_finger_move(
    sink: &dyn ActionSink,
    modifiers: &mut ModifierTracker,
    tuning: &GestureTuning,
    ds: f64,
    dy: f64,
) -> Result<(), SinkError> {
    let vertical = scale_round(dy * tuning.two_finger_factor);
    let horizontal = scale_round(ds * tuning.two_finger_factor);
    trace!(ds, dy, vertical, horizontal, "two-finger move");
    if vertical != 0 {
        sink.wheel(vertical)?;
    }
    modified_wheel(sink, modifiers, ModifierSet::SHIFT, horizontal)
}

/// `mods` down, wheel, `mods` up; nothing at all for zero steps.
fn modified_wheel(
    sink: &dyn ActionSink,
    modifiers: &mut ModifierTracker,
    mods: ModifierSet,
    steps: i32,
) -> Result<(), SinkError> {
    if steps == 0 {
        return Ok(());
    }
    modifiers.set_modifiers(sink, mods, true)?;
    sink.wheel(steps)?;
    modifiers.set_modifiers(sink, mods, false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
