//! Pointer and scroll translator.
//!
//! Turns relative deltas into clamped absolute moves and wheel steps.

use mobilemouse_core::{ButtonAction, EngineConfig, MouseButton};
use tracing::trace;

use super::action_sink::{ActionSink, SinkError};
use super::screen_layout::{current_layout, ScreenEnumerator};

/// Moves the pointer by `(dx, dy)` scaled by the configured sensitivity.
///
/// The target is `round(current + delta * sensitivity)`, clamped first to
/// the primary display's extent and then to the virtual desktop.  A zero
/// delta issues nothing.
///
/// # Errors
///
/// Propagates a failed cursor query or move.
pub fn move_relative(
    sink: &dyn ActionSink,
    screens: &dyn ScreenEnumerator,
    config: &EngineConfig,
    dx: i32,
    dy: i32,
) -> Result<(), SinkError> {
    if dx == 0 && dy == 0 {
        return Ok(());
    }
    let s = config.effective_sensitivity();
    let (px, py) = sink.cursor_position()?;
    let nx = scale_round(f64::from(px) + f64::from(dx) * s);
    let ny = scale_round(f64::from(py) + f64::from(dy) * s);

    let (x, y) = current_layout(screens).clamp_pointer(nx, ny);
    trace!(dx, dy, from = ?(px, py), to = ?(x, y), "pointer move");
    sink.move_to(x, y)
}

/// Scrolls vertically by `dy` notches; `dx` is ignored because the sink has
/// no horizontal wheel.
///
/// Steps are `round(±dy * scroll_speed)`, negated when `invert_scroll` is
/// set.  Zero steps issue nothing.
///
/// # Errors
///
/// Propagates a failed wheel call.
pub fn scroll(
    sink: &dyn ActionSink,
    config: &EngineConfig,
    _dx: i32,
    dy: i32,
) -> Result<(), SinkError> {
    let dy = if config.invert_scroll { -f64::from(dy) } else { f64::from(dy) };
    let steps = scale_round(dy * config.effective_scroll_speed());
    if steps != 0 {
        sink.wheel(steps)?;
    }
    Ok(())
}

/// Presses, releases, or clicks a pointer button.
///
/// # Errors
///
/// Propagates a failed button call.
pub fn mouse_button(
    sink: &dyn ActionSink,
    button: MouseButton,
    action: ButtonAction,
) -> Result<(), SinkError> {
    match action {
        ButtonAction::Down => sink.button(button, true),
        ButtonAction::Up => sink.button(button, false),
        ButtonAction::Click => click(sink, button),
    }
}

/// Press immediately followed by release.
pub fn click(sink: &dyn ActionSink, button: MouseButton) -> Result<(), SinkError> {
    sink.button(button, true)?;
    sink.button(button, false)
}

/// Rounds to the nearest integer, saturating at the `i32` range.
pub(crate) fn scale_round(v: f64) -> i32 {
    if v.is_nan() {
        0
    } else {
        v.round() as i32
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
