//! Boundary between the window engine and the native window manager.
//!
//! A [`Platform`] owns native windows and hands out opaque [`NativeHandle`]s.
//! It reports everything that happened since the last call to
//! [`Platform::pump_events`] as already-translated [`Event`]s tagged with the
//! engine's [`WindowId`]; it never calls back into the engine. That keeps
//! dispatch (and any re-entrancy it causes) entirely on the engine side.
//!
//! Conventions shared by every backend:
//! - Creation takes a rectangle in logical units; every runtime query and
//!   mutation works in physical pixels. The engine converts with
//!   [`Platform::dpi_scale`].
//! - Operations on an unknown or destroyed handle fail safely: queries return
//!   `None`/`false`, mutations return `false`.
//! - A native close request is reported as [`EventKind::Closing`]; the
//!   engine decides whether to call [`Platform::destroy_window`]. A window
//!   destroyed behind the engine's back is reported as [`EventKind::Closed`].
//!
//! [`EventKind::Closing`]: sill_core::EventKind::Closing
//! [`EventKind::Closed`]: sill_core::EventKind::Closed

pub mod headless;
#[cfg(all(
    feature = "winit",
    any(
        target_os = "windows",
        target_os = "macos",
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    )
))]
pub mod winit_backend;
pub mod window;

use sill_core::{
    Cursor, Event, NativeHandle, Point, Rect, Size, WindowId, WindowState, WindowStyle,
};

pub use headless::{HeadlessController, HeadlessPlatform, HeadlessWindow};
pub use window::{NativeWindowSpec, WindowDescriptor};

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("operation not supported by the {0} backend")]
    Unsupported(&'static str),
    #[error("native window creation failed: {0}")]
    CreationFailed(String),
    #[error("event loop error: {0}")]
    EventLoop(String),
    #[error("invalid native handle {0:?}")]
    InvalidHandle(NativeHandle),
}

/// Everything one pump produced.
#[derive(Debug, Default)]
pub struct Pumped {
    pub events: Vec<(WindowId, Event)>,
    /// An exit was requested (by [`Platform::request_exit`] or by the OS).
    pub quit_requested: bool,
}

pub trait Platform {
    fn name(&self) -> &'static str;

    fn create_window(
        &mut self,
        id: WindowId,
        spec: &NativeWindowSpec,
    ) -> Result<NativeHandle, PlatformError>;

    /// Release the native window. Returns false if the handle was unknown.
    fn destroy_window(&mut self, handle: NativeHandle) -> bool;

    /// Drain pending native notifications without blocking.
    fn pump_events(&mut self) -> Pumped;

    /// Ask the next pump to report `quit_requested`.
    fn request_exit(&mut self);

    /// Drop an exit request that no pump has reported yet.
    fn clear_exit_request(&mut self);

    fn is_visible(&self, handle: NativeHandle) -> Option<bool>;
    fn set_visible(&mut self, handle: NativeHandle, visible: bool) -> bool;

    fn dpi_scale(&self, handle: NativeHandle) -> Option<f32>;

    fn outer_rect(&self, handle: NativeHandle) -> Option<Rect>;
    fn set_outer_rect(&mut self, handle: NativeHandle, rect: Rect) -> bool;
    fn client_size(&self, handle: NativeHandle) -> Option<Size>;
    /// Resize so the client area is exactly `size`, keeping the position.
    fn set_client_size(&mut self, handle: NativeHandle, size: Size) -> bool;
    /// Usable area of the screen the window is on.
    fn work_area(&self, handle: NativeHandle) -> Option<Rect>;

    fn window_state(&self, handle: NativeHandle) -> Option<WindowState>;
    fn set_window_state(&mut self, handle: NativeHandle, state: WindowState) -> bool;

    fn top_most(&self, handle: NativeHandle) -> Option<bool>;
    fn set_top_most(&mut self, handle: NativeHandle, top_most: bool) -> bool;

    fn transparency(&self, handle: NativeHandle) -> Option<f32>;
    fn set_transparency(&mut self, handle: NativeHandle, alpha: f32) -> bool;

    fn title(&self, handle: NativeHandle) -> Option<String>;
    fn set_title(&mut self, handle: NativeHandle, title: &str) -> bool;

    /// Re-apply frame decorations after a style change.
    fn apply_style(&mut self, handle: NativeHandle, style: WindowStyle) -> bool;

    /// Cursor position relative to the client area.
    fn cursor_position(&self, handle: NativeHandle) -> Option<Point>;
    fn set_cursor_position(&mut self, handle: NativeHandle, position: Point) -> bool;
    fn set_cursor(&mut self, handle: NativeHandle, cursor: Cursor) -> bool;

    fn mouse_capture(&self, handle: NativeHandle) -> bool;
    fn set_mouse_capture(&mut self, handle: NativeHandle, capture: bool) -> bool;

    fn has_focus(&self, handle: NativeHandle) -> bool;
    fn set_focus(&mut self, handle: NativeHandle, focus: bool) -> bool;

    fn is_enabled(&self, handle: NativeHandle) -> Option<bool>;
    fn set_enabled(&mut self, handle: NativeHandle, enabled: bool) -> bool;
}
