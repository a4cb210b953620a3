//! The event model every native notification is translated into before it
//! reaches a window.
//!
//! An [`Event`] lives for exactly one dispatch. Its `result` field is the
//! out-parameter of cancelable events: for [`EventKind::Closing`], `0` lets the
//! close proceed and any other value vetoes it.

use crate::keys::Keys;

bitflags::bitflags! {
    /// Modifier keys held while a key event was produced. Left and right
    /// variants are independent bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierKey: u8 {
        const LEFT_ALT    = 0x01;
        const RIGHT_ALT   = 0x02;
        const LEFT_CTRL   = 0x04;
        const RIGHT_CTRL  = 0x08;
        const LEFT_SHIFT  = 0x10;
        const RIGHT_SHIFT = 0x20;
        const LEFT_META   = 0x40;
        const RIGHT_META  = 0x80;
    }
}

impl ModifierKey {
    pub fn alt(self) -> bool {
        self.intersects(Self::LEFT_ALT | Self::RIGHT_ALT)
    }

    pub fn ctrl(self) -> bool {
        self.intersects(Self::LEFT_CTRL | Self::RIGHT_CTRL)
    }

    pub fn shift(self) -> bool {
        self.intersects(Self::LEFT_SHIFT | Self::RIGHT_SHIFT)
    }

    pub fn meta(self) -> bool {
        self.intersects(Self::LEFT_META | Self::RIGHT_META)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Payload of key events. `key` is `None` for native codes with no logical
/// mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Option<Keys>,
    pub modifiers: ModifierKey,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    None,
    /// The native handle was just bound.
    Create,
    /// Close was requested; cancelable through `Event::result`.
    Closing,
    /// The native handle was destroyed. Terminal.
    Closed,
    Resize,
    DpiChanged,
    VisibleChanged,

    /// A typed character.
    Input(char),

    KeyDown(KeyInput),
    KeyUp(KeyInput),
    KeyPress(KeyInput),

    MouseEnter,
    MouseExit,
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    MouseMove,
    MouseWheel { x: f32, y: f32 },
    MouseClick(MouseButton),
    MouseDoubleClick(MouseButton),
}

impl EventKind {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Create => "create",
            Self::Closing => "closing",
            Self::Closed => "closed",
            Self::Resize => "resize",
            Self::DpiChanged => "dpi-changed",
            Self::VisibleChanged => "visible-changed",
            Self::Input(_) => "input",
            Self::KeyDown(_) => "key-down",
            Self::KeyUp(_) => "key-up",
            Self::KeyPress(_) => "key-press",
            Self::MouseEnter => "mouse-enter",
            Self::MouseExit => "mouse-exit",
            Self::MouseDown(_) => "mouse-down",
            Self::MouseUp(_) => "mouse-up",
            Self::MouseMove => "mouse-move",
            Self::MouseWheel { .. } => "mouse-wheel",
            Self::MouseClick(_) => "mouse-click",
            Self::MouseDoubleClick(_) => "mouse-double-click",
        }
    }

    /// Only `Closing` honours a non-zero `result`.
    pub fn is_cancelable(&self) -> bool {
        matches!(self, Self::Closing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub result: u32,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self { kind, result: 0 }
    }

    /// True when a cancelable event was refused by a hook or listener.
    pub fn is_vetoed(&self) -> bool {
        self.kind.is_cancelable() && self.result != 0
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_has_zero_result() {
        let e = Event::new(EventKind::Closing);
        assert_eq!(e.result, 0);
        assert!(!e.is_vetoed());
    }

    #[test]
    fn only_closing_can_be_vetoed() {
        let mut closing = Event::new(EventKind::Closing);
        closing.result = 1;
        assert!(closing.is_vetoed());

        let mut resize = Event::new(EventKind::Resize);
        resize.result = 1;
        assert!(!resize.is_vetoed());
    }

    #[test]
    fn modifier_bits_are_independent() {
        let m = ModifierKey::LEFT_CTRL | ModifierKey::RIGHT_SHIFT;
        assert!(m.ctrl());
        assert!(m.shift());
        assert!(!m.alt());
        assert!(!m.meta());
        assert_eq!(m.bits(), 0x04 | 0x20);
    }

    #[test]
    fn all_modifier_bits_fill_a_byte() {
        assert_eq!(ModifierKey::all().bits(), 0xFF);
    }

    #[test]
    fn names_are_distinct_for_payload_variants() {
        let input = KeyInput {
            key: Some(Keys::KeyA),
            modifiers: ModifierKey::empty(),
        };
        assert_eq!(EventKind::KeyDown(input).name(), "key-down");
        assert_eq!(EventKind::KeyUp(input).name(), "key-up");
        assert_eq!(EventKind::MouseWheel { x: 0.0, y: 1.0 }.name(), "mouse-wheel");
    }
}
