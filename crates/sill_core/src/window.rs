use std::fmt;

/// Identity of a window for its whole lifetime, assigned at construction and
/// never reused within one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Opaque token for a native window owned by a platform backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

bitflags::bitflags! {
    /// Frame decorations of a window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        const NO_TITLE     = 1 << 0;
        const BUTTON_MIN   = 1 << 1;
        const BUTTON_MAX   = 1 << 2;
        const BUTTON_CLOSE = 1 << 3;
        const RESIZABLE    = 1 << 4;
    }
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self::RESIZABLE | Self::BUTTON_MIN | Self::BUTTON_MAX | Self::BUTTON_CLOSE
    }
}
