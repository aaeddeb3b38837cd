//! Key symbol mapping: logical key names and Unicode characters to physical
//! keystrokes.
//!
//! The canonical physical-key representation is USB HID Usage IDs
//! ([`HidKeyCode`]).  Two inputs are mapped:
//!
//! - **Logical key names** sent with `key_event` messages (`"Enter"`,
//!   `"ArrowLeft"`, `"a"`, ...) via [`KeyMapper::map_key_name`].
//! - **Characters** of a `text_input` string via [`KeyMapper::map_char`].
//!
//! Both return `None` ("unmappable") for anything that has no key on a
//! standard US layout.  Unmappable characters are typed through the
//! clipboard instead; unmappable key names are dropped.

pub mod hid;
mod us_ascii;

pub use hid::HidKeyCode;

use hid::FUNCTION_KEYS;
use us_ascii::{CONTROL, PUNCTUATION};

/// How to produce one character with physical keys: which key, and whether
/// Shift must be held while it is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    /// The physical key to press.
    pub key: HidKeyCode,
    /// `true` if Shift must be held around the key press.
    pub shift: bool,
}

impl KeyStroke {
    /// A stroke that needs no Shift.
    pub const fn plain(key: HidKeyCode) -> Self {
        Self { key, shift: false }
    }

    /// A stroke that needs Shift held.
    pub const fn shifted(key: HidKeyCode) -> Self {
        Self { key, shift: true }
    }

    /// Returns the printable character this stroke produces on a standard
    /// US keyboard layout, or `None` for non-printing keys.
    ///
    /// This is the inverse of [`KeyMapper::map_char`] over printable ASCII.
    pub fn us_char(self) -> Option<char> {
        if let Some(i) = hid::LETTERS.iter().position(|&k| k == self.key) {
            let c = char::from(b'a' + i as u8);
            return Some(if self.shift { c.to_ascii_uppercase() } else { c });
        }
        if !self.shift {
            if let Some(d) = hid::DIGITS.iter().position(|&k| k == self.key) {
                return char::from_digit(d as u32, 10);
            }
        }
        PUNCTUATION
            .iter()
            .find(|(_, k, s)| *k == self.key && *s == self.shift)
            .map(|(c, _, _)| *c)
    }
}

/// Unified key mapper for both key names and characters.
pub struct KeyMapper;

impl KeyMapper {
    /// Maps a character to the keystroke that types it on a US layout.
    ///
    /// Covers printable ASCII plus `\n`, `\r` (Enter), `\t` (Tab) and
    /// backspace.  Every other character (accented letters, non-Latin
    /// scripts, emoji, other control characters) returns `None`.
    pub fn map_char(c: char) -> Option<KeyStroke> {
        if let Some(key) = HidKeyCode::from_ascii_letter(c) {
            return Some(KeyStroke {
                key,
                shift: c.is_ascii_uppercase(),
            });
        }
        if let Some(key) = HidKeyCode::from_ascii_digit(c) {
            return Some(KeyStroke::plain(key));
        }
        if let Some((_, key)) = CONTROL.iter().find(|(ch, _)| *ch == c) {
            return Some(KeyStroke::plain(*key));
        }
        PUNCTUATION
            .iter()
            .find(|(ch, _, _)| *ch == c)
            .map(|&(_, key, shift)| KeyStroke { key, shift })
    }

    /// Maps a logical key name to a keystroke.
    ///
    /// Recognised names: `Enter`, `Escape`, `Backspace`, `Tab`, `Space`,
    /// `ArrowLeft`/`Up`/`Right`/`Down`, `Delete`, `Home`, `End`, `PageUp`,
    /// `PageDown`, `F1`–`F12`, and any single printable ASCII character.
    /// A single uppercase letter reports `shift = true`; callers that take
    /// Shift from explicit modifier flags should use only [`KeyStroke::key`].
    pub fn map_key_name(name: &str) -> Option<KeyStroke> {
        let named = match name {
            "Enter" => Some(HidKeyCode::Enter),
            "Escape" => Some(HidKeyCode::Escape),
            "Backspace" => Some(HidKeyCode::Backspace),
            "Tab" => Some(HidKeyCode::Tab),
            "Space" => Some(HidKeyCode::Space),
            "ArrowLeft" => Some(HidKeyCode::ArrowLeft),
            "ArrowUp" => Some(HidKeyCode::ArrowUp),
            "ArrowRight" => Some(HidKeyCode::ArrowRight),
            "ArrowDown" => Some(HidKeyCode::ArrowDown),
            "Delete" => Some(HidKeyCode::Delete),
            "Home" => Some(HidKeyCode::Home),
            "End" => Some(HidKeyCode::End),
            "PageUp" => Some(HidKeyCode::PageUp),
            "PageDown" => Some(HidKeyCode::PageDown),
            _ => function_key(name),
        };
        if let Some(key) = named {
            return Some(KeyStroke::plain(key));
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_graphic() => Self::map_char(c),
            _ => None,
        }
    }
}

/// Parses `"F1"`..`"F12"`.
fn function_key(name: &str) -> Option<HidKeyCode> {
    let n: usize = name.strip_prefix('F')?.parse().ok()?;
    if (1..=FUNCTION_KEYS.len()).contains(&n) {
        Some(FUNCTION_KEYS[n - 1])
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_char_lowercase_letter_needs_no_shift() {
        assert_eq!(
            KeyMapper::map_char('i'),
            Some(KeyStroke::plain(HidKeyCode::KeyI))
        );
    }

    #[test]
    fn test_map_char_uppercase_letter_needs_shift() {
        assert_eq!(
            KeyMapper::map_char('H'),
            Some(KeyStroke::shifted(HidKeyCode::KeyH))
        );
    }

    #[test]
    fn test_map_char_shifted_punctuation() {
        assert_eq!(
            KeyMapper::map_char('!'),
            Some(KeyStroke::shifted(HidKeyCode::Digit1))
        );
        assert_eq!(
            KeyMapper::map_char('<'),
            Some(KeyStroke::shifted(HidKeyCode::Comma))
        );
        assert_eq!(
            KeyMapper::map_char(','),
            Some(KeyStroke::plain(HidKeyCode::Comma))
        );
    }

    #[test]
    fn test_map_char_control_characters() {
        assert_eq!(KeyMapper::map_char('\n').map(|s| s.key), Some(HidKeyCode::Enter));
        assert_eq!(KeyMapper::map_char('\r').map(|s| s.key), Some(HidKeyCode::Enter));
        assert_eq!(KeyMapper::map_char('\t').map(|s| s.key), Some(HidKeyCode::Tab));
        assert_eq!(
            KeyMapper::map_char('\u{8}').map(|s| s.key),
            Some(HidKeyCode::Backspace)
        );
        assert_eq!(KeyMapper::map_char('\u{7}'), None);
    }

    #[test]
    fn test_map_char_rejects_non_ascii() {
        for c in ['é', 'ß', '中', 'ж', '😀', '\u{a0}'] {
            assert_eq!(KeyMapper::map_char(c), None, "{c:?} must be unmappable");
        }
    }

    #[test]
    fn test_every_printable_ascii_round_trips_through_us_layout() {
        for c in (0x20u8..=0x7E).map(char::from) {
            // Act
            let stroke = KeyMapper::map_char(c).unwrap_or_else(|| panic!("{c:?} unmapped"));

            // Assert
            assert_eq!(stroke.us_char(), Some(c), "round trip failed for {c:?}");
        }
    }

    #[test]
    fn test_us_char_of_non_printing_key_is_none() {
        assert_eq!(KeyStroke::plain(HidKeyCode::Enter).us_char(), None);
        assert_eq!(KeyStroke::plain(HidKeyCode::F5).us_char(), None);
    }

    #[test]
    fn test_map_key_name_named_keys() {
        let cases = [
            ("Enter", HidKeyCode::Enter),
            ("Escape", HidKeyCode::Escape),
            ("Backspace", HidKeyCode::Backspace),
            ("Tab", HidKeyCode::Tab),
            ("Space", HidKeyCode::Space),
            ("ArrowLeft", HidKeyCode::ArrowLeft),
            ("ArrowUp", HidKeyCode::ArrowUp),
            ("ArrowRight", HidKeyCode::ArrowRight),
            ("ArrowDown", HidKeyCode::ArrowDown),
            ("Delete", HidKeyCode::Delete),
            ("PageDown", HidKeyCode::PageDown),
        ];
        for (name, key) in cases {
            assert_eq!(
                KeyMapper::map_key_name(name),
                Some(KeyStroke::plain(key)),
                "{name}"
            );
        }
    }

    #[test]
    fn test_map_key_name_function_keys() {
        assert_eq!(KeyMapper::map_key_name("F1").map(|s| s.key), Some(HidKeyCode::F1));
        assert_eq!(KeyMapper::map_key_name("F12").map(|s| s.key), Some(HidKeyCode::F12));
        assert_eq!(KeyMapper::map_key_name("F13"), None);
        assert_eq!(KeyMapper::map_key_name("F0"), None);
    }

    #[test]
    fn test_map_key_name_single_characters() {
        assert_eq!(
            KeyMapper::map_key_name("a"),
            Some(KeyStroke::plain(HidKeyCode::KeyA))
        );
        assert_eq!(
            KeyMapper::map_key_name("A"),
            Some(KeyStroke::shifted(HidKeyCode::KeyA))
        );
        assert_eq!(
            KeyMapper::map_key_name("5"),
            Some(KeyStroke::plain(HidKeyCode::Digit5))
        );
    }

    #[test]
    fn test_map_key_name_unknown_names_are_unmappable() {
        for name in ["", "enter", "Shift", "Control", "ü", "ab", " "] {
            assert_eq!(KeyMapper::map_key_name(name), None, "{name:?}");
        }
    }
}
