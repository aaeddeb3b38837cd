//! Display enumeration adapters.
//!
//! The pointer translator asks a [`ScreenEnumerator`] for the attached
//! monitors on every move so it can clamp to the virtual desktop.
//!
//! | Module    | When                          | API used                                  |
//! |-----------|-------------------------------|-------------------------------------------|
//! | `windows` | Windows with `native` feature | `EnumDisplayMonitors` + `GetMonitorInfoW` |
//! | (enigo)   | other hosts with `native`     | `Mouse::main_display`, primary only       |
//!
//! Without the `native` feature the binary uses
//! [`MockScreenEnumerator::single_1080p`], matching the logging sink.
//!
//! A [`MockScreenEnumerator`] is always compiled (not guarded by `#[cfg]`) so
//! tests on any platform can use it without a physical display.

use mobilemouse_core::MonitorInfo;

use crate::application::screen_layout::{ScreenEnumerator, ScreenInfoError};

#[cfg(all(target_os = "windows", feature = "native"))]
pub mod windows;

#[cfg(all(target_os = "windows", feature = "native"))]
pub use windows::WindowsScreenEnumerator;

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A screen enumerator returning a fixed monitor list.
///
/// # Example
///
/// ```ignore
/// let screens = MockScreenEnumerator::dual_1440p();
/// let layout = current_layout(&screens);
/// assert_eq!(layout.virtual_bounds.width, 5120);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockScreenEnumerator {
    /// The monitors returned on every call.
    pub monitors: Vec<MonitorInfo>,
    /// When `true`, every call fails with [`ScreenInfoError::PlatformError`].
    pub should_fail: bool,
}

impl MockScreenEnumerator {
    /// One 1920×1080 primary monitor.
    pub fn single_1080p() -> Self {
        Self {
            monitors: vec![MonitorInfo::new(0, 0, 1920, 1080).primary()],
            should_fail: false,
        }
    }

    /// Two 2560×1440 monitors side by side, primary on the left.
    pub fn dual_1440p() -> Self {
        Self {
            monitors: vec![
                MonitorInfo::new(0, 0, 2560, 1440).primary(),
                MonitorInfo::new(2560, 0, 2560, 1440),
            ],
            should_fail: false,
        }
    }

    /// A 1920×1080 primary with a 1280×1024 secondary to its left, raised by
    /// 200 px, so the virtual desktop has a negative origin.
    pub fn left_of_primary() -> Self {
        Self {
            monitors: vec![
                MonitorInfo::new(0, 0, 1920, 1080).primary(),
                MonitorInfo::new(-1280, -200, 1280, 1024),
            ],
            should_fail: false,
        }
    }

    /// Reports no monitors at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fails every call.
    pub fn failing() -> Self {
        Self {
            monitors: Vec::new(),
            should_fail: true,
        }
    }
}

impl ScreenEnumerator for MockScreenEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<MonitorInfo>, ScreenInfoError> {
        if self.should_fail {
            return Err(ScreenInfoError::PlatformError("mock failure".into()));
        }
        Ok(self.monitors.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_enumerator_single_1080p_returns_one_primary() {
        // Act
        let monitors = MockScreenEnumerator::single_1080p()
            .enumerate_monitors()
            .expect("enumerate");

        // Assert
        assert_eq!(monitors.len(), 1);
        assert_eq!((monitors[0].width, monitors[0].height), (1920, 1080));
        assert!(monitors[0].is_primary);
    }

    #[test]
    fn test_mock_enumerator_dual_1440p_secondary_is_to_the_right() {
        let monitors = MockScreenEnumerator::dual_1440p()
            .enumerate_monitors()
            .expect("enumerate");
        assert_eq!(monitors.len(), 2);
        assert!(!monitors[1].is_primary);
        assert_eq!(monitors[1].x, 2560);
    }

    #[test]
    fn test_mock_enumerator_left_of_primary_has_negative_offset() {
        let monitors = MockScreenEnumerator::left_of_primary()
            .enumerate_monitors()
            .expect("enumerate");
        assert!(monitors.iter().any(|m| m.x < 0 && m.y < 0));
    }

    #[test]
    fn test_mock_enumerator_failing_returns_error() {
        assert!(MockScreenEnumerator::failing().enumerate_monitors().is_err());
    }
}
