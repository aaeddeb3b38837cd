//! Screen geometry: monitor rectangles, the virtual desktop, and pointer
//! clamping.
//!
//! Coordinates follow the host convention: the primary monitor's top-left
//! corner is `(0, 0)`, X grows to the right, Y grows downward, and monitors
//! placed left of or above the primary have negative offsets.

/// Size assumed for the primary display when the host reports no displays.
pub const FALLBACK_SCREEN_WIDTH: u32 = 1920;
/// See [`FALLBACK_SCREEN_WIDTH`].
pub const FALLBACK_SCREEN_HEIGHT: u32 = 1080;

/// One attached display as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorInfo {
    /// X of the top-left corner in desktop coordinates (may be negative).
    pub x: i32,
    /// Y of the top-left corner in desktop coordinates (may be negative).
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `true` for the display the OS calls primary.
    pub is_primary: bool,
}

impl MonitorInfo {
    /// Convenience constructor for a non-primary monitor.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            is_primary: false,
        }
    }

    /// Marks this monitor as the primary one.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// This monitor's rectangle.
    pub fn bounds(&self) -> ScreenBounds {
        ScreenBounds {
            origin_x: self.x,
            origin_y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// An axis-aligned rectangle in desktop coordinates.
///
/// Used for the virtual desktop: the bounding box of every attached display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBounds {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenBounds {
    /// A rectangle anchored at the origin.
    pub fn at_origin(width: u32, height: u32) -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.origin_x.saturating_add(self.width as i32)
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.origin_y.saturating_add(self.height as i32)
    }

    /// Returns `true` if `(x, y)` is a pixel inside this rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.origin_x && x < self.right() && y >= self.origin_y && y < self.bottom()
    }

    /// Bounding box of all `monitors`, or `None` if the slice is empty.
    pub fn union_of(monitors: &[MonitorInfo]) -> Option<Self> {
        let first = monitors.first()?.bounds();
        let (min_x, min_y, max_x, max_y) = monitors.iter().skip(1).map(MonitorInfo::bounds).fold(
            (first.origin_x, first.origin_y, first.right(), first.bottom()),
            |(min_x, min_y, max_x, max_y), b| {
                (
                    min_x.min(b.origin_x),
                    min_y.min(b.origin_y),
                    max_x.max(b.right()),
                    max_y.max(b.bottom()),
                )
            },
        );
        Some(Self {
            origin_x: min_x,
            origin_y: min_y,
            width: (max_x - min_x) as u32,
            height: (max_y - min_y) as u32,
        })
    }

    /// Clamps a point to the last addressable pixel on each axis.
    ///
    /// A zero-sized rectangle clamps everything to its origin.
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        let max_x = (self.right() - 1).max(self.origin_x);
        let max_y = (self.bottom() - 1).max(self.origin_y);
        (x.clamp(self.origin_x, max_x), y.clamp(self.origin_y, max_y))
    }
}

/// The display topology the pointer translator clamps against.
///
/// Rebuilt on every pointer move so hot-plugged monitors are picked up
/// without any notification plumbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Size of the primary display.  Only width and height are used; the
    /// first clamp always treats the primary as anchored at `(0, 0)`.
    pub primary_width: u32,
    pub primary_height: u32,
    /// Union of every attached display.
    pub virtual_bounds: ScreenBounds,
}

impl ScreenLayout {
    /// Builds a layout from the host's monitor list.
    ///
    /// The primary is the monitor flagged `is_primary`, or the first one if
    /// none is flagged.  Returns `None` for an empty list.
    pub fn from_monitors(monitors: &[MonitorInfo]) -> Option<Self> {
        let primary = monitors
            .iter()
            .find(|m| m.is_primary)
            .or_else(|| monitors.first())?;
        Some(Self {
            primary_width: primary.width,
            primary_height: primary.height,
            virtual_bounds: ScreenBounds::union_of(monitors)?,
        })
    }

    /// Single assumed primary display of
    /// [`FALLBACK_SCREEN_WIDTH`]×[`FALLBACK_SCREEN_HEIGHT`].
    pub fn fallback() -> Self {
        Self {
            primary_width: FALLBACK_SCREEN_WIDTH,
            primary_height: FALLBACK_SCREEN_HEIGHT,
            virtual_bounds: ScreenBounds::at_origin(FALLBACK_SCREEN_WIDTH, FALLBACK_SCREEN_HEIGHT),
        }
    }

    /// Clamps a pointer target: first to the primary display's extent, then
    /// to the virtual desktop, so the result is always inside the union.
    pub fn clamp_pointer(&self, x: i32, y: i32) -> (i32, i32) {
        let (x, y) =
            ScreenBounds::at_origin(self.primary_width, self.primary_height).clamp(x, y);
        self.virtual_bounds.clamp(x, y)
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::fallback()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dual_side_by_side() -> Vec<MonitorInfo> {
        vec![
            MonitorInfo::new(0, 0, 2560, 1440).primary(),
            MonitorInfo::new(2560, 0, 2560, 1440),
        ]
    }

    #[test]
    fn test_union_of_empty_is_none() {
        assert_eq!(ScreenBounds::union_of(&[]), None);
    }

    #[test]
    fn test_union_of_side_by_side_monitors() {
        // Act
        let bounds = ScreenBounds::union_of(&dual_side_by_side()).expect("union");

        // Assert
        assert_eq!(bounds, ScreenBounds::at_origin(5120, 1440));
    }

    #[test]
    fn test_union_includes_negative_offsets() {
        // Arrange: secondary sits left of the primary and starts higher.
        let monitors = [
            MonitorInfo::new(0, 0, 1920, 1080).primary(),
            MonitorInfo::new(-1280, -200, 1280, 1024),
        ];

        // Act
        let bounds = ScreenBounds::union_of(&monitors).expect("union");

        // Assert
        assert_eq!(bounds.origin_x, -1280);
        assert_eq!(bounds.origin_y, -200);
        assert_eq!(bounds.right(), 1920);
        assert_eq!(bounds.bottom(), 1080);
    }

    #[test]
    fn test_clamp_keeps_inside_points_unchanged() {
        let b = ScreenBounds::at_origin(100, 50);
        assert_eq!(b.clamp(10, 20), (10, 20));
    }

    #[test]
    fn test_clamp_pins_to_last_pixel() {
        let b = ScreenBounds::at_origin(100, 50);
        assert_eq!(b.clamp(500, -3), (99, 0));
        assert!(b.contains(99, 49));
        assert!(!b.contains(100, 49));
    }

    #[test]
    fn test_clamp_zero_sized_rect_collapses_to_origin() {
        let b = ScreenBounds {
            origin_x: 5,
            origin_y: 7,
            width: 0,
            height: 0,
        };
        assert_eq!(b.clamp(100, -100), (5, 7));
    }

    #[test]
    fn test_layout_picks_flagged_primary() {
        // Arrange: primary is listed second.
        let monitors = [
            MonitorInfo::new(-1024, 0, 1024, 768),
            MonitorInfo::new(0, 0, 1920, 1080).primary(),
        ];

        // Act
        let layout = ScreenLayout::from_monitors(&monitors).expect("layout");

        // Assert
        assert_eq!((layout.primary_width, layout.primary_height), (1920, 1080));
    }

    #[test]
    fn test_layout_without_flag_uses_first_monitor() {
        let monitors = [MonitorInfo::new(0, 0, 800, 600), MonitorInfo::new(800, 0, 1024, 768)];
        let layout = ScreenLayout::from_monitors(&monitors).expect("layout");
        assert_eq!((layout.primary_width, layout.primary_height), (800, 600));
    }

    #[test]
    fn test_layout_from_empty_list_is_none() {
        assert_eq!(ScreenLayout::from_monitors(&[]), None);
    }

    #[test]
    fn test_clamp_pointer_result_is_always_inside_virtual_bounds() {
        let layouts = [
            ScreenLayout::fallback(),
            ScreenLayout::from_monitors(&dual_side_by_side()).expect("layout"),
            ScreenLayout::from_monitors(&[
                MonitorInfo::new(0, 0, 1920, 1080).primary(),
                MonitorInfo::new(-1280, -200, 1280, 1024),
            ])
            .expect("layout"),
            // Secondary entirely right of and below the primary: the union
            // still contains the primary's extent.
            ScreenLayout::from_monitors(&[
                MonitorInfo::new(0, 0, 640, 480).primary(),
                MonitorInfo::new(640, 480, 640, 480),
            ])
            .expect("layout"),
        ];
        let probes = [i32::MIN, -100_000, -1, 0, 1, 639, 1919, 1920, 5119, 5120, i32::MAX];

        for layout in layouts {
            for &x in &probes {
                for &y in &probes {
                    // Act
                    let (cx, cy) = layout.clamp_pointer(x, y);

                    // Assert
                    assert!(
                        layout.virtual_bounds.contains(cx, cy),
                        "({x},{y}) clamped to ({cx},{cy}) outside {:?}",
                        layout.virtual_bounds
                    );
                }
            }
        }
    }

    #[test]
    fn test_clamp_pointer_is_idempotent_at_the_edge() {
        let layout = ScreenLayout::fallback();
        let edge = layout.clamp_pointer(10_000, 10_000);
        assert_eq!(edge, (1919, 1079));
        assert_eq!(layout.clamp_pointer(edge.0 + 50, edge.1 + 50), edge);
    }
}
