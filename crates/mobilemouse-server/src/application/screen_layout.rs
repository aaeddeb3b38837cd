//! Display enumeration seam and the layout the pointer translator clamps to.

use mobilemouse_core::{MonitorInfo, ScreenLayout};
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for screen enumeration.
#[derive(Debug, Error)]
pub enum ScreenInfoError {
    /// The platform API call to enumerate monitors failed.
    #[error("platform API error while enumerating monitors: {0}")]
    PlatformError(String),
}

/// Lists the displays currently attached to the host.
///
/// Called on every pointer move, so implementations should be cheap; the
/// engine does not cache the result because displays can be hot-plugged.
pub trait ScreenEnumerator: Send + Sync {
    /// Returns the attached monitors in any order.  One of them should be
    /// flagged `is_primary`; if none is, the first is treated as primary.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenInfoError::PlatformError`] if the OS API call fails.
    fn enumerate_monitors(&self) -> Result<Vec<MonitorInfo>, ScreenInfoError>;
}

/// Resolves the current layout, substituting a single assumed primary
/// display when nothing can be enumerated.
pub fn current_layout(screens: &dyn ScreenEnumerator) -> ScreenLayout {
    match screens.enumerate_monitors() {
        Ok(monitors) => ScreenLayout::from_monitors(&monitors).unwrap_or_else(|| {
            debug!("no displays reported; using fallback screen size");
            ScreenLayout::fallback()
        }),
        Err(e) => {
            warn!("display enumeration failed, using fallback screen size: {e}");
            ScreenLayout::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::screen_info::MockScreenEnumerator;

    #[test]
    fn test_current_layout_uses_reported_monitors() {
        let layout = current_layout(&MockScreenEnumerator::dual_1440p());
        assert_eq!(layout.virtual_bounds.width, 5120);
        assert_eq!(layout.primary_width, 2560);
    }

    #[test]
    fn test_current_layout_falls_back_when_enumeration_fails() {
        assert_eq!(
            current_layout(&MockScreenEnumerator::failing()),
            ScreenLayout::fallback()
        );
    }

    #[test]
    fn test_current_layout_falls_back_when_no_monitors() {
        assert_eq!(
            current_layout(&MockScreenEnumerator::empty()),
            ScreenLayout::fallback()
        );
    }
}
