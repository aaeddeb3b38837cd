//! The US-ASCII stroke table.
//!
//! Describes how each printable ASCII character is produced on a standard US
//! keyboard layout.  Letters and digits follow directly from
//! [`HidKeyCode::from_ascii_letter`] / [`HidKeyCode::from_ascii_digit`]; this
//! table holds the space bar and the punctuation keys in their unshifted and
//! shifted forms.

use super::hid::HidKeyCode;

/// `(character, key, shift required)` for every printable ASCII character
/// that is neither a letter nor a digit.
pub(crate) const PUNCTUATION: [(char, HidKeyCode, bool); 33] = {
    use HidKeyCode::*;
    [
        (' ', Space, false),
        // Unshifted punctuation
        (',', Comma, false),
        ('.', Period, false),
        ('/', Slash, false),
        ('-', Minus, false),
        ('=', Equal, false),
        ('[', BracketLeft, false),
        (']', BracketRight, false),
        (';', Semicolon, false),
        ('\'', Quote, false),
        ('\\', Backslash, false),
        ('`', Backquote, false),
        // Shifted digit row
        ('!', Digit1, true),
        ('@', Digit2, true),
        ('#', Digit3, true),
        ('$', Digit4, true),
        ('%', Digit5, true),
        ('^', Digit6, true),
        ('&', Digit7, true),
        ('*', Digit8, true),
        ('(', Digit9, true),
        (')', Digit0, true),
        // Shifted punctuation
        ('_', Minus, true),
        ('+', Equal, true),
        ('{', BracketLeft, true),
        ('}', BracketRight, true),
        (':', Semicolon, true),
        ('"', Quote, true),
        ('<', Comma, true),
        ('>', Period, true),
        ('?', Slash, true),
        ('|', Backslash, true),
        ('~', Backquote, true),
    ]
};

/// Control characters that have a dedicated key.
///
/// `\r` and `\n` both press Enter; these are deliberately outside the
/// printable table because the reverse direction is ambiguous.
pub(crate) const CONTROL: [(char, HidKeyCode); 4] = [
    ('\n', HidKeyCode::Enter),
    ('\r', HidKeyCode::Enter),
    ('\t', HidKeyCode::Tab),
    ('\u{8}', HidKeyCode::Backspace),
];
