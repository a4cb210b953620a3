//! Static translation from winit's vocabulary to the engine's.

use sill_core::{Cursor, Keys, ModifierKey, WindowStyle};
use winit::event::Modifiers;
use winit::keyboard::{KeyCode, ModifiersKeyState};
use winit::window::{CursorIcon, WindowButtons};

/// Physical key code to logical key. Total over `KeyCode`; codes without a
/// logical counterpart give `None`.
pub fn map_key(code: KeyCode) -> Option<Keys> {
    let key = match code {
        KeyCode::Escape => Keys::Esc,
        KeyCode::Enter => Keys::Return,
        KeyCode::NumpadEnter => Keys::Return,
        KeyCode::Tab => Keys::Tab,
        KeyCode::Backspace => Keys::Backspace,
        KeyCode::Space => Keys::Space,
        KeyCode::ArrowUp => Keys::Up,
        KeyCode::ArrowDown => Keys::Down,
        KeyCode::ArrowLeft => Keys::Left,
        KeyCode::ArrowRight => Keys::Right,
        KeyCode::Insert => Keys::Insert,
        KeyCode::Delete => Keys::Delete,
        KeyCode::Home => Keys::Home,
        KeyCode::End => Keys::End,
        KeyCode::PageUp => Keys::PageUp,
        KeyCode::PageDown => Keys::PageDown,
        KeyCode::PrintScreen => Keys::Print,
        KeyCode::Equal => Keys::Plus,
        KeyCode::NumpadAdd => Keys::Plus,
        KeyCode::Minus => Keys::Minus,
        KeyCode::NumpadSubtract => Keys::Minus,
        KeyCode::BracketLeft => Keys::LeftBracket,
        KeyCode::BracketRight => Keys::RightBracket,
        KeyCode::Semicolon => Keys::Semicolon,
        KeyCode::Quote => Keys::Quote,
        KeyCode::Comma => Keys::Comma,
        KeyCode::Period => Keys::Period,
        KeyCode::NumpadDecimal => Keys::Period,
        KeyCode::Slash => Keys::Slash,
        KeyCode::NumpadDivide => Keys::Slash,
        KeyCode::Backslash => Keys::Backslash,
        KeyCode::Backquote => Keys::Tilde,
        KeyCode::F1 => Keys::F1,
        KeyCode::F2 => Keys::F2,
        KeyCode::F3 => Keys::F3,
        KeyCode::F4 => Keys::F4,
        KeyCode::F5 => Keys::F5,
        KeyCode::F6 => Keys::F6,
        KeyCode::F7 => Keys::F7,
        KeyCode::F8 => Keys::F8,
        KeyCode::F9 => Keys::F9,
        KeyCode::F10 => Keys::F10,
        KeyCode::F11 => Keys::F11,
        KeyCode::F12 => Keys::F12,
        KeyCode::Numpad0 => Keys::NumPad0,
        KeyCode::Numpad1 => Keys::NumPad1,
        KeyCode::Numpad2 => Keys::NumPad2,
        KeyCode::Numpad3 => Keys::NumPad3,
        KeyCode::Numpad4 => Keys::NumPad4,
        KeyCode::Numpad5 => Keys::NumPad5,
        KeyCode::Numpad6 => Keys::NumPad6,
        KeyCode::Numpad7 => Keys::NumPad7,
        KeyCode::Numpad8 => Keys::NumPad8,
        KeyCode::Numpad9 => Keys::NumPad9,
        KeyCode::Digit0 => Keys::Key0,
        KeyCode::Digit1 => Keys::Key1,
        KeyCode::Digit2 => Keys::Key2,
        KeyCode::Digit3 => Keys::Key3,
        KeyCode::Digit4 => Keys::Key4,
        KeyCode::Digit5 => Keys::Key5,
        KeyCode::Digit6 => Keys::Key6,
        KeyCode::Digit7 => Keys::Key7,
        KeyCode::Digit8 => Keys::Key8,
        KeyCode::Digit9 => Keys::Key9,
        KeyCode::KeyA => Keys::KeyA,
        KeyCode::KeyB => Keys::KeyB,
        KeyCode::KeyC => Keys::KeyC,
        KeyCode::KeyD => Keys::KeyD,
        KeyCode::KeyE => Keys::KeyE,
        KeyCode::KeyF => Keys::KeyF,
        KeyCode::KeyG => Keys::KeyG,
        KeyCode::KeyH => Keys::KeyH,
        KeyCode::KeyI => Keys::KeyI,
        KeyCode::KeyJ => Keys::KeyJ,
        KeyCode::KeyK => Keys::KeyK,
        KeyCode::KeyL => Keys::KeyL,
        KeyCode::KeyM => Keys::KeyM,
        KeyCode::KeyN => Keys::KeyN,
        KeyCode::KeyO => Keys::KeyO,
        KeyCode::KeyP => Keys::KeyP,
        KeyCode::KeyQ => Keys::KeyQ,
        KeyCode::KeyR => Keys::KeyR,
        KeyCode::KeyS => Keys::KeyS,
        KeyCode::KeyT => Keys::KeyT,
        KeyCode::KeyU => Keys::KeyU,
        KeyCode::KeyV => Keys::KeyV,
        KeyCode::KeyW => Keys::KeyW,
        KeyCode::KeyX => Keys::KeyX,
        KeyCode::KeyY => Keys::KeyY,
        KeyCode::KeyZ => Keys::KeyZ,
        _ => return None,
    };
    Some(key)
}

/// Sided modifier mask. Platforms that cannot tell left from right report
/// the left bit.
pub fn translate_modifiers(modifiers: &Modifiers) -> ModifierKey {
    let state = modifiers.state();
    let mut mask = ModifierKey::empty();
    let sides = [
        (
            modifiers.lalt_state(),
            modifiers.ralt_state(),
            state.alt_key(),
            ModifierKey::LEFT_ALT,
            ModifierKey::RIGHT_ALT,
        ),
        (
            modifiers.lcontrol_state(),
            modifiers.rcontrol_state(),
            state.control_key(),
            ModifierKey::LEFT_CTRL,
            ModifierKey::RIGHT_CTRL,
        ),
        (
            modifiers.lshift_state(),
            modifiers.rshift_state(),
            state.shift_key(),
            ModifierKey::LEFT_SHIFT,
            ModifierKey::RIGHT_SHIFT,
        ),
        (
            modifiers.lsuper_state(),
            modifiers.rsuper_state(),
            state.super_key(),
            ModifierKey::LEFT_META,
            ModifierKey::RIGHT_META,
        ),
    ];
    for (left, right, held, left_bit, right_bit) in sides {
        let left = left == ModifiersKeyState::Pressed;
        let right = right == ModifiersKeyState::Pressed;
        if left {
            mask |= left_bit;
        }
        if right {
            mask |= right_bit;
        }
        if held && !left && !right {
            mask |= left_bit;
        }
    }
    mask
}

/// `None` means "hide the cursor".
pub fn cursor_icon(cursor: Cursor) -> Option<CursorIcon> {
    let icon = match cursor {
        Cursor::None => return None,
        Cursor::Arrow => CursorIcon::Default,
        Cursor::TextInput => CursorIcon::Text,
        Cursor::ResizeAll => CursorIcon::Move,
        Cursor::ResizeNS => CursorIcon::NsResize,
        Cursor::ResizeEW => CursorIcon::EwResize,
        Cursor::ResizeNESW => CursorIcon::NeswResize,
        Cursor::ResizeNWSE => CursorIcon::NwseResize,
        Cursor::Hand => CursorIcon::Pointer,
        Cursor::NotAllowed => CursorIcon::NotAllowed,
    };
    Some(icon)
}

pub fn window_buttons(style: WindowStyle) -> WindowButtons {
    let mut buttons = WindowButtons::empty();
    if style.contains(WindowStyle::BUTTON_MIN) {
        buttons |= WindowButtons::MINIMIZE;
    }
    if style.contains(WindowStyle::BUTTON_MAX) {
        buttons |= WindowButtons::MAXIMIZE;
    }
    if style.contains(WindowStyle::BUTTON_CLOSE) {
        buttons |= WindowButtons::CLOSE;
    }
    buttons
}
