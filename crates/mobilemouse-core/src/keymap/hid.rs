//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page).
//!
//! This is the physical-key vocabulary shared by the whole engine.  The key
//! symbol mapper produces these codes, the injection engine passes them to
//! the action sink, and each sink backend translates them to whatever its
//! host API wants (enigo keys, virtual-key codes, ...).
//!
//! # Why physical keys and not characters? (for beginners)
//!
//! A HID Usage ID names a *position* on the keyboard, not the character it
//! prints.  The key at position 0x1E prints `1` on its own and `!` with
//! Shift held on a US layout, but something else entirely on a French
//! AZERTY keyboard.  The engine therefore describes every character as
//! "which key, and is Shift needed" (a [`KeyStroke`](super::KeyStroke)) under
//! an assumed US layout, and routes anything it cannot describe that way to
//! the clipboard-paste fallback.
//!
//! Only the subset of the keyboard page that the engine can emit is listed.

/// USB HID Usage ID for keyboard keys (page 0x07).
///
/// The numeric value of each variant is its HID Usage ID on the keyboard/keypad page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HidKeyCode {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control and punctuation keys (HID 0x28–0x38)
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,

    // Function keys (HID 0x3A–0x45)
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Navigation cluster
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Modifier keys (left-hand variants only; the engine never needs the right ones)
    ControlLeft = 0xE0,
    ShiftLeft = 0xE1,
    AltLeft = 0xE2,
    MetaLeft = 0xE3,
}

/// Letter keys in alphabetical order, indexed by `c - 'a'`.
pub(crate) const LETTERS: [HidKeyCode; 26] = {
    use HidKeyCode::*;
    [
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM, KeyN,
        KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    ]
};

/// Digit keys indexed by their numeric value (so index 0 is `Digit0`).
pub(crate) const DIGITS: [HidKeyCode; 10] = {
    use HidKeyCode::*;
    [
        Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
    ]
};

/// Function keys `F1`..`F12` in order.
pub(crate) const FUNCTION_KEYS: [HidKeyCode; 12] = {
    use HidKeyCode::*;
    [F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12]
};

impl HidKeyCode {
    /// Returns the letter key for an ASCII letter of either case.
    pub fn from_ascii_letter(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            let idx = (c.to_ascii_lowercase() as u8 - b'a') as usize;
            Some(LETTERS[idx])
        } else {
            None
        }
    }

    /// Returns the top-row digit key for an ASCII digit.
    pub fn from_ascii_digit(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| DIGITS[d as usize])
    }
}
