//! In-memory window manager.
//!
//! Behaves like a very small desktop: windows have a frame with a title bar,
//! live on a single screen, and notifications are queued until the next pump.
//! Nothing is delivered unless a [`HeadlessController`] queues it, which makes
//! the engine's behaviour fully deterministic under test.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use sill_core::{
    Cursor, Event, EventKind, NativeHandle, Point, Rect, Size, WindowId, WindowState, WindowStyle,
};

use crate::{NativeWindowSpec, Platform, PlatformError, Pumped};

/// Title bar height at a DPI scale of 1.0.
const TITLE_BAR_HEIGHT: f32 = 30.0;
const DEFAULT_WORK_AREA: Rect = Rect::new(0.0, 0.0, 1920.0, 1040.0);

/// Snapshot of one headless window. Geometry is in physical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    pub id: WindowId,
    pub parent: Option<NativeHandle>,
    pub title: String,
    pub rect: Rect,
    pub visible: bool,
    pub state: WindowState,
    pub top_most: bool,
    pub transparency: f32,
    pub style: WindowStyle,
    pub style_applications: u32,
    pub enabled: bool,
    pub cursor: Cursor,
    pub cursor_position: Point,
    dpi_scale: f32,
    restore_rect: Option<Rect>,
}

impl HeadlessWindow {
    fn title_bar(&self) -> f32 {
        if self.style.contains(WindowStyle::NO_TITLE) {
            0.0
        } else {
            TITLE_BAR_HEIGHT * self.dpi_scale
        }
    }

    fn client_size(&self) -> Size {
        Size::new(self.rect.width, (self.rect.height - self.title_bar()).max(0.0))
    }
}

struct HeadlessState {
    windows: HashMap<NativeHandle, HeadlessWindow>,
    queue: VecDeque<(WindowId, Event)>,
    quit_requested: bool,
    next_handle: u64,
    dpi_scale: f32,
    work_area: Rect,
    fail_next_create: bool,
    focused: Option<NativeHandle>,
    captured: Option<NativeHandle>,
    destroyed: Vec<NativeHandle>,
}

impl HeadlessState {
    fn new() -> Self {
        Self {
            windows: HashMap::new(),
            queue: VecDeque::new(),
            quit_requested: false,
            next_handle: 1,
            dpi_scale: 1.0,
            work_area: DEFAULT_WORK_AREA,
            fail_next_create: false,
            focused: None,
            captured: None,
            destroyed: Vec::new(),
        }
    }
}

pub struct HeadlessPlatform {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState::new())),
        }
    }

    /// A handle for driving and inspecting this platform from outside the
    /// engine. Any number of controllers may exist.
    pub fn controller(&self) -> HeadlessController {
        HeadlessController {
            state: Rc::clone(&self.state),
        }
    }

    fn with_window<R>(
        &self,
        handle: NativeHandle,
        f: impl FnOnce(&HeadlessWindow) -> R,
    ) -> Option<R> {
        self.state.borrow().windows.get(&handle).map(f)
    }

    fn with_window_mut(
        &mut self,
        handle: NativeHandle,
        f: impl FnOnce(&mut HeadlessWindow),
    ) -> bool {
        match self.state.borrow_mut().windows.get_mut(&handle) {
            Some(win) => {
                f(win);
                true
            }
            None => false,
        }
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for HeadlessPlatform {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn create_window(
        &mut self,
        id: WindowId,
        spec: &NativeWindowSpec,
    ) -> Result<NativeHandle, PlatformError> {
        let mut state = self.state.borrow_mut();
        if std::mem::take(&mut state.fail_next_create) {
            return Err(PlatformError::CreationFailed(format!(
                "headless creation of {id} was set to fail"
            )));
        }
        if let Some(parent) = spec.parent {
            if !state.windows.contains_key(&parent) {
                return Err(PlatformError::InvalidHandle(parent));
            }
        }

        let handle = NativeHandle(state.next_handle);
        state.next_handle += 1;
        let dpi_scale = state.dpi_scale;
        state.windows.insert(
            handle,
            HeadlessWindow {
                id,
                parent: spec.parent,
                title: spec.title.clone(),
                rect: spec.rect.scaled(dpi_scale),
                visible: false,
                state: WindowState::Normal,
                top_most: false,
                transparency: 1.0,
                style: spec.style,
                style_applications: 0,
                enabled: true,
                cursor: Cursor::Arrow,
                cursor_position: Point::ZERO,
                dpi_scale,
                restore_rect: None,
            },
        );
        Ok(handle)
    }

    fn destroy_window(&mut self, handle: NativeHandle) -> bool {
        let mut state = self.state.borrow_mut();
        if state.windows.remove(&handle).is_none() {
            return false;
        }
        if state.focused == Some(handle) {
            state.focused = None;
        }
        if state.captured == Some(handle) {
            state.captured = None;
        }
        state.destroyed.push(handle);
        true
    }

    fn pump_events(&mut self) -> Pumped {
        let mut state = self.state.borrow_mut();
        Pumped {
            events: state.queue.drain(..).collect(),
            quit_requested: std::mem::take(&mut state.quit_requested),
        }
    }

    fn request_exit(&mut self) {
        self.state.borrow_mut().quit_requested = true;
    }

    fn clear_exit_request(&mut self) {
        self.state.borrow_mut().quit_requested = false;
    }

    fn is_visible(&self, handle: NativeHandle) -> Option<bool> {
        self.with_window(handle, |w| w.visible)
    }

    fn set_visible(&mut self, handle: NativeHandle, visible: bool) -> bool {
        self.with_window_mut(handle, |w| w.visible = visible)
    }

    fn dpi_scale(&self, handle: NativeHandle) -> Option<f32> {
        self.with_window(handle, |w| w.dpi_scale)
    }

    fn outer_rect(&self, handle: NativeHandle) -> Option<Rect> {
        self.with_window(handle, |w| w.rect)
    }

    fn set_outer_rect(&mut self, handle: NativeHandle, rect: Rect) -> bool {
        self.with_window_mut(handle, |w| w.rect = rect)
    }

    fn client_size(&self, handle: NativeHandle) -> Option<Size> {
        self.with_window(handle, |w| w.client_size())
    }

    fn set_client_size(&mut self, handle: NativeHandle, size: Size) -> bool {
        self.with_window_mut(handle, |w| {
            let title_bar = w.title_bar();
            w.rect.width = size.width;
            w.rect.height = size.height + title_bar;
        })
    }

    fn work_area(&self, handle: NativeHandle) -> Option<Rect> {
        let state = self.state.borrow();
        let win = state.windows.get(&handle)?;
        Some(state.work_area.scaled(win.dpi_scale))
    }

    fn window_state(&self, handle: NativeHandle) -> Option<WindowState> {
        self.with_window(handle, |w| w.state)
    }

    fn set_window_state(&mut self, handle: NativeHandle, new_state: WindowState) -> bool {
        let mut state = self.state.borrow_mut();
        let work_area = state.work_area;
        let Some(win) = state.windows.get_mut(&handle) else {
            return false;
        };
        match (win.state, new_state) {
            (WindowState::Maximized, WindowState::Maximized) => {}
            (_, WindowState::Maximized) => {
                win.restore_rect = Some(win.rect);
                win.rect = work_area.scaled(win.dpi_scale);
            }
            (WindowState::Maximized, _) => {
                if let Some(rect) = win.restore_rect.take() {
                    win.rect = rect;
                }
            }
            _ => {}
        }
        win.state = new_state;
        true
    }

    fn top_most(&self, handle: NativeHandle) -> Option<bool> {
        self.with_window(handle, |w| w.top_most)
    }

    fn set_top_most(&mut self, handle: NativeHandle, top_most: bool) -> bool {
        self.with_window_mut(handle, |w| w.top_most = top_most)
    }

    fn transparency(&self, handle: NativeHandle) -> Option<f32> {
        self.with_window(handle, |w| w.transparency)
    }

    fn set_transparency(&mut self, handle: NativeHandle, alpha: f32) -> bool {
        self.with_window_mut(handle, |w| w.transparency = alpha)
    }

    fn title(&self, handle: NativeHandle) -> Option<String> {
        self.with_window(handle, |w| w.title.clone())
    }

    fn set_title(&mut self, handle: NativeHandle, title: &str) -> bool {
        self.with_window_mut(handle, |w| w.title = title.to_string())
    }

    fn apply_style(&mut self, handle: NativeHandle, style: WindowStyle) -> bool {
        self.with_window_mut(handle, |w| {
            // Keep the client area stable when the title bar appears/disappears.
            let client = w.client_size();
            w.style = style;
            w.rect.height = client.height + w.title_bar();
            w.style_applications += 1;
        })
    }

    fn cursor_position(&self, handle: NativeHandle) -> Option<Point> {
        self.with_window(handle, |w| w.cursor_position)
    }

    fn set_cursor_position(&mut self, handle: NativeHandle, position: Point) -> bool {
        self.with_window_mut(handle, |w| w.cursor_position = position)
    }

    fn set_cursor(&mut self, handle: NativeHandle, cursor: Cursor) -> bool {
        self.with_window_mut(handle, |w| w.cursor = cursor)
    }

    fn mouse_capture(&self, handle: NativeHandle) -> bool {
        self.state.borrow().captured == Some(handle)
    }

    fn set_mouse_capture(&mut self, handle: NativeHandle, capture: bool) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.windows.contains_key(&handle) {
            return false;
        }
        if capture {
            state.captured = Some(handle);
        } else if state.captured == Some(handle) {
            state.captured = None;
        }
        true
    }

    fn has_focus(&self, handle: NativeHandle) -> bool {
        self.state.borrow().focused == Some(handle)
    }

    fn set_focus(&mut self, handle: NativeHandle, focus: bool) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.windows.contains_key(&handle) {
            return false;
        }
        if focus {
            state.focused = Some(handle);
        } else if state.focused == Some(handle) {
            state.focused = None;
        }
        true
    }

    fn is_enabled(&self, handle: NativeHandle) -> Option<bool> {
        self.with_window(handle, |w| w.enabled)
    }

    fn set_enabled(&mut self, handle: NativeHandle, enabled: bool) -> bool {
        self.with_window_mut(handle, |w| w.enabled = enabled)
    }
}

/// Test-side handle to a [`HeadlessPlatform`]: queue native notifications,
/// simulate the user, and inspect window state.
#[derive(Clone)]
pub struct HeadlessController {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessController {
    /// Queue a notification for the next pump.
    pub fn push_event(&self, id: WindowId, kind: EventKind) {
        self.state.borrow_mut().queue.push_back((id, Event::new(kind)));
    }

    /// Simulate the user clicking the close button.
    pub fn request_close(&self, id: WindowId) {
        self.push_event(id, EventKind::Closing);
    }

    /// Simulate the OS tearing the window down without asking first.
    pub fn destroy_externally(&self, id: WindowId) {
        let mut state = self.state.borrow_mut();
        let handle = state
            .windows
            .iter()
            .find(|(_, w)| w.id == id)
            .map(|(h, _)| *h);
        if let Some(handle) = handle {
            state.windows.remove(&handle);
            state.destroyed.push(handle);
        }
        state.queue.push_back((id, Event::new(EventKind::Closed)));
    }

    pub fn request_quit(&self) {
        self.state.borrow_mut().quit_requested = true;
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// DPI scale given to windows created from now on.
    pub fn set_dpi_scale(&self, scale: f32) {
        self.state.borrow_mut().dpi_scale = scale;
    }

    /// Work area at a DPI scale of 1.0.
    pub fn set_work_area(&self, area: Rect) {
        self.state.borrow_mut().work_area = area;
    }

    /// Make the next `create_window` fail.
    pub fn fail_next_create(&self) {
        self.state.borrow_mut().fail_next_create = true;
    }

    pub fn window(&self, handle: NativeHandle) -> Option<HeadlessWindow> {
        self.state.borrow().windows.get(&handle).cloned()
    }

    pub fn window_for(&self, id: WindowId) -> Option<HeadlessWindow> {
        self.state
            .borrow()
            .windows
            .values()
            .find(|w| w.id == id)
            .cloned()
    }

    /// Simulate the user minimizing/maximizing/restoring a window.
    pub fn set_window_state(&self, handle: NativeHandle, new_state: WindowState) -> bool {
        HeadlessPlatform {
            state: Rc::clone(&self.state),
        }
        .set_window_state(handle, new_state)
    }

    pub fn live_windows(&self) -> usize {
        self.state.borrow().windows.len()
    }

    /// Every handle destroyed so far, in order.
    pub fn destroyed(&self) -> Vec<NativeHandle> {
        self.state.borrow().destroyed.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(rect: Rect) -> NativeWindowSpec {
        NativeWindowSpec {
            title: "Test".to_string(),
            rect,
            parent: None,
            style: WindowStyle::default(),
        }
    }

    #[test]
    fn create_scales_rect_to_physical() {
        let mut platform = HeadlessPlatform::new();
        let ctl = platform.controller();
        ctl.set_dpi_scale(2.0);
        let h = platform
            .create_window(WindowId(1), &spec(Rect::new(10.0, 10.0, 100.0, 50.0)))
            .unwrap();
        assert_eq!(platform.outer_rect(h), Some(Rect::new(20.0, 20.0, 200.0, 100.0)));
        assert_eq!(platform.dpi_scale(h), Some(2.0));
        assert_eq!(platform.client_size(h), Some(Size::new(200.0, 40.0)));
    }

    #[test]
    fn new_windows_are_hidden_and_opaque() {
        let mut platform = HeadlessPlatform::new();
        let h = platform
            .create_window(WindowId(1), &spec(Rect::new(0.0, 0.0, 10.0, 10.0)))
            .unwrap();
        assert_eq!(platform.is_visible(h), Some(false));
        assert_eq!(platform.transparency(h), Some(1.0));
    }

    #[test]
    fn forced_creation_failure_is_one_shot() {
        let mut platform = HeadlessPlatform::new();
        platform.controller().fail_next_create();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(platform.create_window(WindowId(1), &spec(rect)).is_err());
        assert!(platform.create_window(WindowId(1), &spec(rect)).is_ok());
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut platform = HeadlessPlatform::new();
        let mut child = spec(Rect::new(0.0, 0.0, 10.0, 10.0));
        child.parent = Some(NativeHandle(99));
        assert!(matches!(
            platform.create_window(WindowId(1), &child),
            Err(PlatformError::InvalidHandle(NativeHandle(99)))
        ));
    }

    #[test]
    fn destroyed_handle_fails_safely() {
        let mut platform = HeadlessPlatform::new();
        let h = platform
            .create_window(WindowId(1), &spec(Rect::new(0.0, 0.0, 10.0, 10.0)))
            .unwrap();
        assert!(platform.destroy_window(h));
        assert!(!platform.destroy_window(h));
        assert_eq!(platform.outer_rect(h), None);
        assert!(!platform.set_title(h, "gone"));
        assert!(!platform.set_focus(h, true));
        assert!(!platform.has_focus(h));
    }

    #[test]
    fn pump_drains_queue_and_quit_flag_once() {
        let mut platform = HeadlessPlatform::new();
        let ctl = platform.controller();
        ctl.push_event(WindowId(1), EventKind::Resize);
        ctl.push_event(WindowId(1), EventKind::MouseMove);
        platform.request_exit();

        let first = platform.pump_events();
        assert_eq!(first.events.len(), 2);
        assert_eq!(first.events[0].1.kind, EventKind::Resize);
        assert!(first.quit_requested);

        let second = platform.pump_events();
        assert!(second.events.is_empty());
        assert!(!second.quit_requested);
    }

    #[test]
    fn cleared_exit_request_is_not_reported() {
        let mut platform = HeadlessPlatform::new();
        platform.request_exit();
        platform.clear_exit_request();
        assert!(!platform.pump_events().quit_requested);

        platform.controller().request_quit();
        platform.clear_exit_request();
        assert!(!platform.pump_events().quit_requested);
    }

    #[test]
    fn maximize_fills_work_area_and_restore_returns() {
        let mut platform = HeadlessPlatform::new();
        let h = platform
            .create_window(WindowId(1), &spec(Rect::new(5.0, 5.0, 300.0, 200.0)))
            .unwrap();
        assert!(platform.set_window_state(h, WindowState::Maximized));
        assert_eq!(platform.outer_rect(h), Some(DEFAULT_WORK_AREA));
        assert!(platform.set_window_state(h, WindowState::Normal));
        assert_eq!(platform.outer_rect(h), Some(Rect::new(5.0, 5.0, 300.0, 200.0)));
    }

    #[test]
    fn removing_title_keeps_client_area() {
        let mut platform = HeadlessPlatform::new();
        let h = platform
            .create_window(WindowId(1), &spec(Rect::new(0.0, 0.0, 300.0, 230.0)))
            .unwrap();
        assert_eq!(platform.client_size(h), Some(Size::new(300.0, 200.0)));
        assert!(platform.apply_style(h, WindowStyle::default() | WindowStyle::NO_TITLE));
        assert_eq!(platform.client_size(h), Some(Size::new(300.0, 200.0)));
        assert_eq!(platform.outer_rect(h).map(|r| r.height), Some(200.0));
    }

    #[test]
    fn capture_and_focus_are_exclusive() {
        let mut platform = HeadlessPlatform::new();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let a = platform.create_window(WindowId(1), &spec(rect)).unwrap();
        let b = platform.create_window(WindowId(2), &spec(rect)).unwrap();
        platform.set_focus(a, true);
        platform.set_focus(b, true);
        assert!(!platform.has_focus(a));
        assert!(platform.has_focus(b));

        platform.set_mouse_capture(a, true);
        assert!(platform.mouse_capture(a));
        platform.set_mouse_capture(b, false);
        assert!(platform.mouse_capture(a));
    }

    #[test]
    fn external_destroy_queues_closed() {
        let mut platform = HeadlessPlatform::new();
        let ctl = platform.controller();
        let h = platform
            .create_window(WindowId(4), &spec(Rect::new(0.0, 0.0, 10.0, 10.0)))
            .unwrap();
        ctl.destroy_externally(WindowId(4));
        assert_eq!(ctl.live_windows(), 0);
        assert_eq!(ctl.destroyed(), vec![h]);
        let pumped = platform.pump_events();
        assert_eq!(pumped.events, vec![(WindowId(4), Event::new(EventKind::Closed))]);
    }
}
