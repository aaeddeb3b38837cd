//! Windows display enumeration via `EnumDisplayMonitors` / `GetMonitorInfoW`.

use mobilemouse_core::MonitorInfo;
use windows::Win32::Foundation::{BOOL, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};

use crate::application::screen_layout::{ScreenEnumerator, ScreenInfoError};

/// `MONITORINFOF_PRIMARY`.
const MONITORINFOF_PRIMARY: u32 = 1;

/// Lists every monitor of the virtual desktop.
#[derive(Debug, Default)]
pub struct WindowsScreenEnumerator;

impl WindowsScreenEnumerator {
    /// Creates a new `WindowsScreenEnumerator`.
    pub fn new() -> Self {
        Self
    }
}

impl ScreenEnumerator for WindowsScreenEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<MonitorInfo>, ScreenInfoError> {
        let mut monitors: Vec<MonitorInfo> = Vec::new();

        // SAFETY: the callback runs synchronously inside `EnumDisplayMonitors`
        // and `lParam` points at `monitors`, which outlives the call.  A null
        // HDC enumerates the whole virtual desktop.
        let ok = unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(monitor_enum_proc),
                LPARAM(&mut monitors as *mut Vec<MonitorInfo> as isize),
            )
        };

        if !ok.as_bool() {
            return Err(ScreenInfoError::PlatformError(
                "EnumDisplayMonitors failed".to_string(),
            ));
        }
        Ok(monitors)
    }
}

/// # Safety
///
/// Called by Win32 inside `EnumDisplayMonitors`; `lparam` must point at a
/// live `Vec<MonitorInfo>`.
unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let monitors = &mut *(lparam.0 as *mut Vec<MonitorInfo>);

    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if GetMonitorInfoW(hmonitor, &mut info).as_bool() {
        let rc = info.rcMonitor;
        monitors.push(MonitorInfo {
            x: rc.left,
            y: rc.top,
            width: (rc.right - rc.left).max(0) as u32,
            height: (rc.bottom - rc.top).max(0) as u32,
            is_primary: info.dwFlags & MONITORINFOF_PRIMARY != 0,
        });
    }

    BOOL(1) // keep enumerating
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Needs a desktop session; only checks that one primary is reported.
    #[test]
    fn test_windows_enumerator_reports_a_primary_monitor() {
        let monitors = WindowsScreenEnumerator::new()
            .enumerate_monitors()
            .expect("enumerate");
        assert!(monitors.iter().any(|m| m.is_primary));
    }
}
