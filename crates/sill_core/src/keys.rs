//! OS-independent key identifiers and cursor shapes.
//!
//! Native key codes are translated into [`Keys`] by the platform backends with
//! a static table; codes without a logical meaning map to `None`.

/// Closed set of logical keys. Several native codes may map to one key
/// (e.g. both period keys map to [`Keys::Period`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keys {
    Esc,
    Return,
    Tab,
    Space,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Print,
    Plus,
    Minus,
    LeftBracket,
    RightBracket,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Backslash,
    Tilde,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    NumPad0,
    NumPad1,
    NumPad2,
    NumPad3,
    NumPad4,
    NumPad5,
    NumPad6,
    NumPad7,
    NumPad8,
    NumPad9,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,
    GamepadA,
    GamepadB,
    GamepadX,
    GamepadY,
    GamepadThumbL,
    GamepadThumbR,
    GamepadShoulderL,
    GamepadShoulderR,
    GamepadUp,
    GamepadDown,
    GamepadLeft,
    GamepadRight,
    GamepadBack,
    GamepadStart,
    GamepadGuide,
}

impl Keys {
    /// Every key, in declaration order.
    pub const ALL: &'static [Keys] = &[
        Keys::Esc,
        Keys::Return,
        Keys::Tab,
        Keys::Space,
        Keys::Backspace,
        Keys::Up,
        Keys::Down,
        Keys::Left,
        Keys::Right,
        Keys::Insert,
        Keys::Delete,
        Keys::Home,
        Keys::End,
        Keys::PageUp,
        Keys::PageDown,
        Keys::Print,
        Keys::Plus,
        Keys::Minus,
        Keys::LeftBracket,
        Keys::RightBracket,
        Keys::Semicolon,
        Keys::Quote,
        Keys::Comma,
        Keys::Period,
        Keys::Slash,
        Keys::Backslash,
        Keys::Tilde,
        Keys::F1,
        Keys::F2,
        Keys::F3,
        Keys::F4,
        Keys::F5,
        Keys::F6,
        Keys::F7,
        Keys::F8,
        Keys::F9,
        Keys::F10,
        Keys::F11,
        Keys::F12,
        Keys::NumPad0,
        Keys::NumPad1,
        Keys::NumPad2,
        Keys::NumPad3,
        Keys::NumPad4,
        Keys::NumPad5,
        Keys::NumPad6,
        Keys::NumPad7,
        Keys::NumPad8,
        Keys::NumPad9,
        Keys::Key0,
        Keys::Key1,
        Keys::Key2,
        Keys::Key3,
        Keys::Key4,
        Keys::Key5,
        Keys::Key6,
        Keys::Key7,
        Keys::Key8,
        Keys::Key9,
        Keys::KeyA,
        Keys::KeyB,
        Keys::KeyC,
        Keys::KeyD,
        Keys::KeyE,
        Keys::KeyF,
        Keys::KeyG,
        Keys::KeyH,
        Keys::KeyI,
        Keys::KeyJ,
        Keys::KeyK,
        Keys::KeyL,
        Keys::KeyM,
        Keys::KeyN,
        Keys::KeyO,
        Keys::KeyP,
        Keys::KeyQ,
        Keys::KeyR,
        Keys::KeyS,
        Keys::KeyT,
        Keys::KeyU,
        Keys::KeyV,
        Keys::KeyW,
        Keys::KeyX,
        Keys::KeyY,
        Keys::KeyZ,
        Keys::GamepadA,
        Keys::GamepadB,
        Keys::GamepadX,
        Keys::GamepadY,
        Keys::GamepadThumbL,
        Keys::GamepadThumbR,
        Keys::GamepadShoulderL,
        Keys::GamepadShoulderR,
        Keys::GamepadUp,
        Keys::GamepadDown,
        Keys::GamepadLeft,
        Keys::GamepadRight,
        Keys::GamepadBack,
        Keys::GamepadStart,
        Keys::GamepadGuide,
    ];

    pub fn is_gamepad(self) -> bool {
        self >= Keys::GamepadA
    }

    pub fn is_function(self) -> bool {
        (Keys::F1..=Keys::F12).contains(&self)
    }

    /// The letter/digit for `KeyA..KeyZ` and `Key0..Key9`.
    pub fn to_char(self) -> Option<char> {
        let idx = Self::ALL.iter().position(|k| *k == self)?;
        let digits = Self::ALL.iter().position(|k| *k == Keys::Key0)?;
        let letters = Self::ALL.iter().position(|k| *k == Keys::KeyA)?;
        if (digits..digits + 10).contains(&idx) {
            char::from_digit((idx - digits) as u32, 10)
        } else if (letters..letters + 26).contains(&idx) {
            Some((b'A' + (idx - letters) as u8) as char)
        } else {
            None
        }
    }
}

/// Cursor shapes a window can request. `None` hides the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cursor {
    None,
    #[default]
    Arrow,
    TextInput,
    ResizeAll,
    ResizeNS,
    ResizeEW,
    ResizeNESW,
    ResizeNWSE,
    Hand,
    NotAllowed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_sorted_and_unique() {
        for pair in Keys::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn gamepad_range_is_at_the_end() {
        assert!(Keys::GamepadGuide.is_gamepad());
        assert!(Keys::GamepadA.is_gamepad());
        assert!(!Keys::KeyZ.is_gamepad());
    }

    #[test]
    fn function_keys() {
        assert!(Keys::F1.is_function());
        assert!(Keys::F12.is_function());
        assert!(!Keys::NumPad0.is_function());
        assert!(!Keys::Tilde.is_function());
    }

    #[test]
    fn letters_and_digits_convert_to_chars() {
        assert_eq!(Keys::KeyA.to_char(), Some('A'));
        assert_eq!(Keys::KeyZ.to_char(), Some('Z'));
        assert_eq!(Keys::Key0.to_char(), Some('0'));
        assert_eq!(Keys::Key9.to_char(), Some('9'));
        assert_eq!(Keys::Space.to_char(), None);
        assert_eq!(Keys::NumPad5.to_char(), None);
    }

    #[test]
    fn default_cursor_is_arrow() {
        assert_eq!(Cursor::default(), Cursor::Arrow);
    }
}
