//! Engine configuration values.
//!
//! [`EngineConfig`] is built once when the server starts (from the TOML file
//! in the server crate) and handed to the engine by shared reference.  The
//! engine never writes it; a changed file takes effect on the next start.

use std::time::Duration;

/// Pointer and scroll scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Multiplier applied to relative pointer deltas.  Values `<= 0` are
    /// treated as `1.0`.
    pub sensitivity: f64,
    /// Multiplier applied to wheel steps.  Values `<= 0` are treated as `1.0`.
    pub scroll_speed: f64,
    /// Negates the vertical scroll direction before scaling.
    pub invert_scroll: bool,
    /// Multipliers and timing for composite gestures.
    pub gestures: GestureTuning,
}

impl EngineConfig {
    /// Sensitivity actually applied to pointer motion.
    pub fn effective_sensitivity(&self) -> f64 {
        positive_or_one(self.sensitivity)
    }

    /// Scroll speed actually applied to wheel steps.
    pub fn effective_scroll_speed(&self) -> f64 {
        positive_or_one(self.scroll_speed)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            scroll_speed: 1.0,
            invert_scroll: false,
            gestures: GestureTuning::default(),
        }
    }
}

/// UX tuning for gestures.
///
/// The factors convert a gesture magnitude into wheel steps:
/// `steps = round(magnitude * factor)`.  Their defaults were picked by feel,
/// not derived from anything, which is why they live in the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTuning {
    /// Wheel steps per unit of pinch scale change.
    pub pinch_factor: f64,
    /// Wheel steps per degree of rotation.
    pub rotate_factor: f64,
    /// Wheel steps per pixel of two-finger travel.
    pub two_finger_factor: f64,
    /// Pause between the two clicks of a double tap.  Must stay nonzero.
    pub double_tap_gap: Duration,
}

/// Shortest double-tap gap the engine will use.
pub const MIN_DOUBLE_TAP_GAP: Duration = Duration::from_millis(1);

impl GestureTuning {
    /// The double-tap gap, raised to [`MIN_DOUBLE_TAP_GAP`] if configured as zero.
    pub fn effective_double_tap_gap(&self) -> Duration {
        self.double_tap_gap.max(MIN_DOUBLE_TAP_GAP)
    }
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            pinch_factor: 10.0,
            rotate_factor: 0.1,
            two_finger_factor: 1.0,
            double_tap_gap: Duration::from_millis(40),
        }
    }
}

fn positive_or_one(v: f64) -> f64 {
    // NaN fails the comparison too.
    if v > 0.0 {
        v
    } else {
        1.0
    }
}
