//! Desktop backend on top of winit.
//!
//! winit 0.30 only lets windows be created from inside an
//! `ApplicationHandler` callback, and only delivers events while its loop is
//! being pumped. Both are bridged the same way: the handler records what
//! happened (created windows, translated events) and `WinitPlatform` pumps the
//! loop with a zero timeout whenever it needs something serviced. Events seen
//! while pumping for a window creation are kept for the next `pump_events`.
//!
//! Gaps in winit's surface are tracked in the entry instead of being sent to
//! the OS: layered-window transparency, enabled state (outside Windows) and the
//! last cursor position.

pub mod keymap;

use std::collections::HashMap;
use std::time::Duration;

use sill_core::{
    Cursor, Event, EventKind, KeyInput, ModifierKey, MouseButton, NativeHandle, Point, Rect, Size,
    WindowId, WindowState, WindowStyle,
};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorGrabMode, Window as WinitWindow, WindowAttributes, WindowLevel};

use crate::{NativeWindowSpec, Platform, PlatformError, Pumped};

/// Pixel-precise wheels (touchpads) are normalised to notches of this size.
const PIXELS_PER_WHEEL_LINE: f64 = 120.0;
/// Pumps to wait for `resumed` before giving up on a window creation.
const CREATE_PUMP_ATTEMPTS: usize = 4;

struct NativeEntry {
    id: WindowId,
    window: WinitWindow,
    visible: bool,
    top_most: bool,
    transparency: f32,
    enabled: bool,
    captured: bool,
    cursor_position: Point,
}

impl NativeEntry {
    fn new(id: WindowId, window: WinitWindow) -> Self {
        Self {
            id,
            window,
            visible: false,
            top_most: false,
            transparency: 1.0,
            enabled: true,
            captured: false,
            cursor_position: Point::ZERO,
        }
    }
}

struct PendingCreate {
    token: u64,
    id: WindowId,
    attributes: WindowAttributes,
}

#[derive(Default)]
struct Handler {
    resumed: bool,
    windows: HashMap<NativeHandle, NativeEntry>,
    by_winit: HashMap<winit::window::WindowId, NativeHandle>,
    pending: Vec<PendingCreate>,
    created: HashMap<u64, Result<NativeHandle, PlatformError>>,
    events: Vec<(WindowId, Event)>,
    modifiers: ModifierKey,
    next_handle: u64,
    quit_requested: bool,
}

impl Handler {
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        if !self.resumed {
            return;
        }
        for pending in std::mem::take(&mut self.pending) {
            let result = match event_loop.create_window(pending.attributes) {
                Ok(window) => {
                    self.next_handle += 1;
                    let handle = NativeHandle(self.next_handle);
                    self.by_winit.insert(window.id(), handle);
                    self.windows
                        .insert(handle, NativeEntry::new(pending.id, window));
                    Ok(handle)
                }
                Err(err) => Err(PlatformError::CreationFailed(err.to_string())),
            };
            self.created.insert(pending.token, result);
        }
    }

    fn forget(&mut self, handle: NativeHandle) -> Option<NativeEntry> {
        let entry = self.windows.remove(&handle)?;
        self.by_winit.remove(&entry.window.id());
        Some(entry)
    }

    fn push(&mut self, id: WindowId, kind: EventKind) {
        self.events.push((id, Event::new(kind)));
    }

    fn translate(&mut self, handle: NativeHandle, event: WindowEvent) {
        let Some(id) = self.windows.get(&handle).map(|entry| entry.id) else {
            return;
        };
        let kind = match event {
            WindowEvent::CloseRequested => EventKind::Closing,
            WindowEvent::Destroyed => {
                self.forget(handle);
                EventKind::Closed
            }
            WindowEvent::Resized(_) => EventKind::Resize,
            WindowEvent::ScaleFactorChanged { .. } => EventKind::DpiChanged,
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(entry) = self.windows.get_mut(&handle) {
                    entry.cursor_position = Point::new(position.x as f32, position.y as f32);
                }
                EventKind::MouseMove
            }
            WindowEvent::CursorEntered { .. } => EventKind::MouseEnter,
            WindowEvent::CursorLeft { .. } => EventKind::MouseExit,
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = wheel_lines(delta);
                EventKind::MouseWheel { x, y }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_mouse_button(button) else {
                    return;
                };
                match state {
                    ElementState::Pressed => EventKind::MouseDown(button),
                    ElementState::Released => EventKind::MouseUp(button),
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = keymap::translate_modifiers(&modifiers);
                return;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.translate_key(id, event);
                return;
            }
            _ => return,
        };
        self.push(id, kind);
    }

    fn translate_key(&mut self, id: WindowId, event: KeyEvent) {
        let key = match event.physical_key {
            PhysicalKey::Code(code) => keymap::map_key(code),
            PhysicalKey::Unidentified(_) => None,
        };
        let input = KeyInput {
            key,
            modifiers: self.modifiers,
        };
        match event.state {
            ElementState::Pressed => {
                self.push(id, EventKind::KeyDown(input));
                if let Some(text) = &event.text {
                    for ch in text.chars().filter(|ch| *ch != '\0') {
                        self.push(id, EventKind::Input(ch));
                    }
                }
            }
            ElementState::Released => self.push(id, EventKind::KeyUp(input)),
        }
    }
}

impl ApplicationHandler for Handler {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: StartCause) {
        self.create_pending(event_loop);
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.resumed = true;
        self.create_pending(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if let Some(handle) = self.by_winit.get(&window_id).copied() {
            self.translate(handle, event);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }
}

fn map_mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

fn wheel_lines(delta: MouseScrollDelta) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (x, y),
        MouseScrollDelta::PixelDelta(p) => (
            (p.x / PIXELS_PER_WHEEL_LINE) as f32,
            (p.y / PIXELS_PER_WHEEL_LINE) as f32,
        ),
    }
}

pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    handler: Handler,
    next_token: u64,
}

impl WinitPlatform {
    pub fn new() -> Result<Self, PlatformError> {
        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        Ok(Self {
            event_loop,
            handler: Handler::default(),
            next_token: 0,
        })
    }

    fn pump_once(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);
        if let PumpStatus::Exit(code) = status {
            log::info!("winit event loop exited with code {code}");
            self.handler.quit_requested = true;
        }
    }

    fn entry(&self, handle: NativeHandle) -> Option<&NativeEntry> {
        self.handler.windows.get(&handle)
    }

    fn entry_mut(&mut self, handle: NativeHandle) -> Option<&mut NativeEntry> {
        self.handler.windows.get_mut(&handle)
    }
}

impl Platform for WinitPlatform {
    fn name(&self) -> &'static str {
        "winit"
    }

    fn create_window(
        &mut self,
        id: WindowId,
        spec: &NativeWindowSpec,
    ) -> Result<NativeHandle, PlatformError> {
        if spec.parent.is_some() {
            log::debug!("{id}: native parenting is not applied by the winit backend");
        }
        let attributes = WindowAttributes::default()
            .with_title(spec.title.as_str())
            .with_position(LogicalPosition::new(spec.rect.x as f64, spec.rect.y as f64))
            .with_inner_size(LogicalSize::new(
                spec.rect.width as f64,
                spec.rect.height as f64,
            ))
            .with_visible(false)
            .with_decorations(!spec.style.contains(WindowStyle::NO_TITLE))
            .with_resizable(spec.style.contains(WindowStyle::RESIZABLE))
            .with_enabled_buttons(keymap::window_buttons(spec.style));

        self.next_token += 1;
        let token = self.next_token;
        self.handler.pending.push(PendingCreate {
            token,
            id,
            attributes,
        });

        for _ in 0..CREATE_PUMP_ATTEMPTS {
            self.pump_once();
            if let Some(result) = self.handler.created.remove(&token) {
                return result;
            }
        }
        self.handler.pending.retain(|p| p.token != token);
        Err(PlatformError::CreationFailed(format!(
            "event loop never became ready to create {id}"
        )))
    }

    fn destroy_window(&mut self, handle: NativeHandle) -> bool {
        // Dropping the winit window closes it natively.
        self.handler.forget(handle).is_some()
    }

    fn pump_events(&mut self) -> Pumped {
        self.pump_once();
        Pumped {
            events: std::mem::take(&mut self.handler.events),
            quit_requested: std::mem::take(&mut self.handler.quit_requested),
        }
    }

    fn request_exit(&mut self) {
        self.handler.quit_requested = true;
    }

    fn clear_exit_request(&mut self) {
        self.handler.quit_requested = false;
    }

    fn is_visible(&self, handle: NativeHandle) -> Option<bool> {
        let entry = self.entry(handle)?;
        Some(entry.window.is_visible().unwrap_or(entry.visible))
    }

    fn set_visible(&mut self, handle: NativeHandle, visible: bool) -> bool {
        let Some(entry) = self.entry_mut(handle) else {
            return false;
        };
        entry.window.set_visible(visible);
        entry.visible = visible;
        true
    }

    fn dpi_scale(&self, handle: NativeHandle) -> Option<f32> {
        self.entry(handle)
            .map(|entry| entry.window.scale_factor() as f32)
    }

    fn outer_rect(&self, handle: NativeHandle) -> Option<Rect> {
        let window = &self.entry(handle)?.window;
        let position = window
            .outer_position()
            .unwrap_or(PhysicalPosition::new(0, 0));
        let size = window.outer_size();
        Some(Rect::new(
            position.x as f32,
            position.y as f32,
            size.width as f32,
            size.height as f32,
        ))
    }

    fn set_outer_rect(&mut self, handle: NativeHandle, rect: Rect) -> bool {
        let Some(entry) = self.entry(handle) else {
            return false;
        };
        let window = &entry.window;
        window.set_outer_position(PhysicalPosition::new(rect.x as i32, rect.y as i32));
        let outer = window.outer_size();
        let inner = window.inner_size();
        let frame_w = outer.width.saturating_sub(inner.width) as f32;
        let frame_h = outer.height.saturating_sub(inner.height) as f32;
        let _ = window.request_inner_size(PhysicalSize::new(
            (rect.width - frame_w).max(1.0) as u32,
            (rect.height - frame_h).max(1.0) as u32,
        ));
        true
    }

    fn client_size(&self, handle: NativeHandle) -> Option<Size> {
        let size = self.entry(handle)?.window.inner_size();
        Some(Size::new(size.width as f32, size.height as f32))
    }

    fn set_client_size(&mut self, handle: NativeHandle, size: Size) -> bool {
        let Some(entry) = self.entry(handle) else {
            return false;
        };
        let _ = entry.window.request_inner_size(PhysicalSize::new(
            size.width.max(1.0) as u32,
            size.height.max(1.0) as u32,
        ));
        true
    }

    fn work_area(&self, handle: NativeHandle) -> Option<Rect> {
        let monitor = self.entry(handle)?.window.current_monitor()?;
        let position = monitor.position();
        let size = monitor.size();
        Some(Rect::new(
            position.x as f32,
            position.y as f32,
            size.width as f32,
            size.height as f32,
        ))
    }

    fn window_state(&self, handle: NativeHandle) -> Option<WindowState> {
        let window = &self.entry(handle)?.window;
        let state = if window.is_minimized() == Some(true) {
            WindowState::Minimized
        } else if window.is_maximized() {
            WindowState::Maximized
        } else {
            WindowState::Normal
        };
        Some(state)
    }

    fn set_window_state(&mut self, handle: NativeHandle, state: WindowState) -> bool {
        let Some(entry) = self.entry(handle) else {
            return false;
        };
        match state {
            WindowState::Normal => {
                entry.window.set_minimized(false);
                entry.window.set_maximized(false);
            }
            WindowState::Minimized => entry.window.set_minimized(true),
            WindowState::Maximized => entry.window.set_maximized(true),
        }
        true
    }

    fn top_most(&self, handle: NativeHandle) -> Option<bool> {
        self.entry(handle).map(|entry| entry.top_most)
    }

    fn set_top_most(&mut self, handle: NativeHandle, top_most: bool) -> bool {
        let Some(entry) = self.entry_mut(handle) else {
            return false;
        };
        entry.window.set_window_level(if top_most {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        });
        entry.top_most = top_most;
        true
    }

    fn transparency(&self, handle: NativeHandle) -> Option<f32> {
        self.entry(handle).map(|entry| entry.transparency)
    }

    fn set_transparency(&mut self, handle: NativeHandle, alpha: f32) -> bool {
        let Some(entry) = self.entry_mut(handle) else {
            return false;
        };
        if alpha < 1.0 {
            log::debug!("{}: window opacity is recorded but not applied by winit", entry.id);
        }
        entry.transparency = alpha;
        true
    }

    fn title(&self, handle: NativeHandle) -> Option<String> {
        self.entry(handle).map(|entry| entry.window.title())
    }

    fn set_title(&mut self, handle: NativeHandle, title: &str) -> bool {
        let Some(entry) = self.entry(handle) else {
            return false;
        };
        entry.window.set_title(title);
        true
    }

    fn apply_style(&mut self, handle: NativeHandle, style: WindowStyle) -> bool {
        let Some(entry) = self.entry(handle) else {
            return false;
        };
        entry
            .window
            .set_decorations(!style.contains(WindowStyle::NO_TITLE));
        entry
            .window
            .set_resizable(style.contains(WindowStyle::RESIZABLE));
        entry
            .window
            .set_enabled_buttons(keymap::window_buttons(style));
        true
    }

    fn cursor_position(&self, handle: NativeHandle) -> Option<Point> {
        self.entry(handle).map(|entry| entry.cursor_position)
    }

    fn set_cursor_position(&mut self, handle: NativeHandle, position: Point) -> bool {
        let Some(entry) = self.entry_mut(handle) else {
            return false;
        };
        let moved = entry
            .window
            .set_cursor_position(PhysicalPosition::new(position.x as f64, position.y as f64))
            .is_ok();
        if moved {
            entry.cursor_position = position;
        }
        moved
    }

    fn set_cursor(&mut self, handle: NativeHandle, cursor: Cursor) -> bool {
        let Some(entry) = self.entry(handle) else {
            return false;
        };
        match keymap::cursor_icon(cursor) {
            Some(icon) => {
                entry.window.set_cursor_visible(true);
                entry.window.set_cursor(icon);
            }
            None => entry.window.set_cursor_visible(false),
        }
        true
    }

    fn mouse_capture(&self, handle: NativeHandle) -> bool {
        self.entry(handle).is_some_and(|entry| entry.captured)
    }

    fn set_mouse_capture(&mut self, handle: NativeHandle, capture: bool) -> bool {
        let Some(entry) = self.entry_mut(handle) else {
            return false;
        };
        let mode = if capture {
            CursorGrabMode::Confined
        } else {
            CursorGrabMode::None
        };
        match entry.window.set_cursor_grab(mode) {
            Ok(()) => {
                entry.captured = capture;
                true
            }
            Err(err) => {
                log::debug!("{}: cursor grab unavailable: {err}", entry.id);
                false
            }
        }
    }

    fn has_focus(&self, handle: NativeHandle) -> bool {
        self.entry(handle)
            .is_some_and(|entry| entry.window.has_focus())
    }

    fn set_focus(&mut self, handle: NativeHandle, focus: bool) -> bool {
        let Some(entry) = self.entry(handle) else {
            return false;
        };
        if focus {
            entry.window.focus_window();
        }
        true
    }

    fn is_enabled(&self, handle: NativeHandle) -> Option<bool> {
        self.entry(handle).map(|entry| entry.enabled)
    }

    fn set_enabled(&mut self, handle: NativeHandle, enabled: bool) -> bool {
        let Some(entry) = self.entry_mut(handle) else {
            return false;
        };
        #[cfg(target_os = "windows")]
        {
            use winit::platform::windows::WindowExtWindows;
            entry.window.set_enable(enabled);
        }
        entry.enabled = enabled;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn line_wheel_passes_through() {
        assert_eq!(wheel_lines(MouseScrollDelta::LineDelta(0.0, -2.0)), (0.0, -2.0));
    }

    #[test]
    fn pixel_wheel_is_normalised_to_lines() {
        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 240.0));
        assert_eq!(wheel_lines(delta), (0.0, 2.0));
    }

    #[test]
    fn extra_mouse_buttons_are_ignored() {
        assert_eq!(
            map_mouse_button(winit::event::MouseButton::Left),
            Some(MouseButton::Left)
        );
        assert_eq!(map_mouse_button(winit::event::MouseButton::Back), None);
        assert_eq!(map_mouse_button(winit::event::MouseButton::Other(9)), None);
    }
}
