//! Device-agnostic control events.
//!
//! A [`ControlEvent`] is what the message channel hands to the injection
//! engine: one fully decoded, typed instruction.  Events are built once from
//! a wire message and consumed exactly once.

use serde::Deserialize;

/// The four modifier keys a client can hold.
///
/// The engine always presses held modifiers in the order ctrl, alt, shift,
/// meta and releases them in the reverse order, regardless of how the
/// client lists them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct ModifierSet {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl ModifierSet {
    /// No modifiers.
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Only Ctrl.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Only Shift.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Returns `true` if no modifier flag is set.
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    /// Union of both sets.
    pub fn union(self, other: Self) -> Self {
        Self {
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            shift: self.shift || other.shift,
            meta: self.meta || other.meta,
        }
    }
}

/// Pointer buttons a client can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// What to do with a pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    Down,
    Up,
    /// Press immediately followed by release.
    Click,
}

/// Direction of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Down,
    Up,
}

/// One decoded control instruction from the client.
///
/// Pointer and scroll deltas are whole pixels / wheel notches; the message
/// channel rounds the client's floating-point values before building the
/// event.  Gesture magnitudes stay fractional because the engine scales them
/// before rounding.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    MouseMove { dx: i32, dy: i32 },
    MouseButton { button: MouseButton, action: ButtonAction },
    Scroll { dx: i32, dy: i32 },
    /// Relative motion while the client holds a button; treated like `MouseMove`.
    Drag { dx: i32, dy: i32 },
    KeyEvent {
        key: String,
        action: KeyAction,
        modifiers: ModifierSet,
    },
    TextInput { text: String },
    Tap,
    DoubleTap,
    LongPress,
    Pinch { dscale: f64 },
    Rotate { dr: f64 },
    TwoFingerMove { ds: f64, dy: f64 },
    TouchStart,
    TouchMove { dx: i32, dy: i32 },
    TouchEnd,
}

impl ControlEvent {
    /// Short name for log lines; never includes payload values such as typed text.
    pub fn kind(&self) -> &'static str {
        match self {
            ControlEvent::MouseMove { .. } => "mouse_move",
            ControlEvent::MouseButton { .. } => "mouse_button",
            ControlEvent::Scroll { .. } => "scroll",
            ControlEvent::Drag { .. } => "drag",
            ControlEvent::KeyEvent { .. } => "key_event",
            ControlEvent::TextInput { .. } => "text_input",
            ControlEvent::Tap => "tap",
            ControlEvent::DoubleTap => "double_tap",
            ControlEvent::LongPress => "long_press",
            ControlEvent::Pinch { .. } => "pinch",
            ControlEvent::Rotate { .. } => "rotate",
            ControlEvent::TwoFingerMove { .. } => "two_finger_move",
            ControlEvent::TouchStart => "touch_start",
            ControlEvent::TouchMove { .. } => "touch_move",
            ControlEvent::TouchEnd => "touch_end",
        }
    }
}
