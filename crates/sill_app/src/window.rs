//! Window lifecycle and event dispatch.
//!
//! A window moves through `Unrealized -> Realized -> Closing -> Closed`.
//! It joins the application's registry when constructed, binds a native handle
//! in [`WindowHandle::create`], and leaves the registry when its `Closed`
//! event is dispatched. `Closing` can be vetoed, which returns it to
//! `Realized`. `Closed` is terminal and the native handle is released exactly
//! once on the way there.
//!
//! [`Window`] owns the window; dropping it forces a close without asking the
//! hooks. [`WindowHandle`] is the clonable reference given to hooks and
//! listeners. All geometry crossing this API is in logical units.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::ops::Deref;
use std::rc::{Rc, Weak};

use sill_core::{
    Cursor, Event, EventKind, NativeHandle, Point, Rect, Size, WindowId, WindowState, WindowStyle,
};
use sill_platform::{NativeWindowSpec, Platform, WindowDescriptor};

use crate::application::{AppShared, Application};
use crate::event_bus::{EventBus, ListenerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Unrealized,
    Realized,
    Closing,
    Closed,
}

/// What [`WindowHooks::create_params`] hands to native creation.
#[derive(Clone)]
pub struct CreateParams {
    pub parent: Option<WindowHandle>,
    pub title: String,
    /// Logical units.
    pub rect: Rect,
}

impl CreateParams {
    pub fn from_descriptor(desc: &WindowDescriptor) -> Self {
        Self {
            parent: None,
            title: desc.title.clone(),
            rect: desc.rect(),
        }
    }
}

impl Default for CreateParams {
    fn default() -> Self {
        Self::from_descriptor(&WindowDescriptor::default())
    }
}

/// Per-window behaviour. Every method has a default, so implementors only
/// override what they care about.
///
/// Hooks take `&self` and may be re-entered: a modal loop started from
/// `on_update` keeps ticking the owner and asks it before a native close, and
/// a window can close itself from its own hooks. Keep mutable state in
/// `Cell`/`RefCell`.
pub trait WindowHooks {
    fn create_params(&self) -> CreateParams {
        CreateParams::default()
    }

    fn on_create(&self, _window: &WindowHandle) {}

    /// Once per run-loop iteration.
    fn on_update(&self, _window: &WindowHandle) {}

    /// Return false to veto the close.
    fn on_closing(&self, _window: &WindowHandle) -> bool {
        true
    }

    fn on_close(&self, _window: &WindowHandle) {}

    fn on_visible_changed(&self, _window: &WindowHandle, _visible: bool) {}
}

/// Hooks that only describe the initial window.
impl WindowHooks for WindowDescriptor {
    fn create_params(&self) -> CreateParams {
        CreateParams::from_descriptor(self)
    }
}

pub struct DefaultHooks;

impl WindowHooks for DefaultHooks {}

pub(crate) struct WindowShared {
    id: WindowId,
    app: Rc<AppShared>,
    native: Cell<Option<NativeHandle>>,
    style: Cell<WindowStyle>,
    lifecycle: Cell<Lifecycle>,
    parent: RefCell<Option<Weak<WindowShared>>>,
    listeners: EventBus<WindowHandle>,
    hooks: RefCell<Option<Rc<dyn WindowHooks>>>,
}

#[derive(Clone)]
pub struct WindowHandle(pub(crate) Rc<WindowShared>);

/// Owning side of a window. Closes the window when dropped.
pub struct Window {
    handle: WindowHandle,
}

impl Window {
    /// Construct a window and register it with `app`. No native window exists
    /// until [`WindowHandle::create`].
    pub fn new(app: &Application, hooks: impl WindowHooks + 'static) -> Self {
        let shared = &app.inner;
        let id = shared.allocate_window_id();
        let inner = Rc::new(WindowShared {
            id,
            app: Rc::clone(shared),
            native: Cell::new(None),
            style: Cell::new(WindowStyle::default()),
            lifecycle: Cell::new(Lifecycle::Unrealized),
            parent: RefCell::new(None),
            listeners: EventBus::new(),
            hooks: RefCell::new(Some(Rc::new(hooks))),
        });

        let weak = Rc::downgrade(&inner);
        shared.routes.borrow_mut().insert(id, weak.clone());
        shared.registry.register(
            id,
            Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    WindowHandle(inner).update();
                }
            }),
        );

        Self {
            handle: WindowHandle(inner),
        }
    }

    pub fn to_handle(&self) -> WindowHandle {
        self.handle.clone()
    }
}

impl Deref for Window {
    type Target = WindowHandle;

    fn deref(&self) -> &WindowHandle {
        &self.handle
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        let window = &self.handle;
        match window.lifecycle() {
            Lifecycle::Closed => {}
            Lifecycle::Unrealized => {
                window.0.lifecycle.set(Lifecycle::Closed);
                window.0.app.registry.unregister(window.id());
                window.0.app.routes.borrow_mut().remove(&window.id());
            }
            Lifecycle::Realized | Lifecycle::Closing => {
                log::debug!("{} dropped while open, forcing close", window.id());
                window.release_native();
                window.finish_close();
            }
        }
        // Listeners and hooks may hold handles to this window.
        window.0.listeners.clear();
        let hooks = window.0.hooks.borrow_mut().take();
        drop(hooks);
    }
}

impl WindowHandle {
    pub fn id(&self) -> WindowId {
        self.0.id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.0.lifecycle.get()
    }

    pub fn is_closed(&self) -> bool {
        self.lifecycle() == Lifecycle::Closed
    }

    /// The native handle, while the window is realized.
    pub fn handle(&self) -> Option<NativeHandle> {
        self.0.native.get()
    }

    pub fn application(&self) -> Application {
        Application {
            inner: Rc::clone(&self.0.app),
        }
    }

    pub fn parent(&self) -> Option<WindowHandle> {
        self.0
            .parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(WindowHandle)
    }

    fn platform(&self) -> Ref<'_, Box<dyn Platform>> {
        self.0.app.platform.borrow()
    }

    fn platform_mut(&self) -> RefMut<'_, Box<dyn Platform>> {
        self.0.app.platform.borrow_mut()
    }

    fn with_hooks<R>(
        &self,
        default: R,
        f: impl FnOnce(&dyn WindowHooks, &WindowHandle) -> R,
    ) -> R {
        // The cell is only borrowed for the clone so hooks can re-enter.
        let hooks = self.0.hooks.borrow().clone();
        match hooks {
            Some(hooks) => f(hooks.as_ref(), self),
            None => default,
        }
    }

    // --- lifecycle ---

    /// Create the native window from the hooks' [`CreateParams`].
    ///
    /// Returns false if native creation fails or the window was already
    /// created (a window is created at most once).
    pub fn create(&self) -> bool {
        if !self.can_create() {
            return false;
        }
        let params = self.with_hooks(CreateParams::default(), |hooks, _| hooks.create_params());
        self.create_impl(params.parent.as_ref(), &params.title, params.rect)
    }

    /// Create the native window with explicit parameters.
    pub fn create_impl(&self, parent: Option<&WindowHandle>, title: &str, rect: Rect) -> bool {
        if !self.can_create() {
            return false;
        }
        let spec = NativeWindowSpec {
            title: title.to_string(),
            rect,
            parent: parent.and_then(WindowHandle::handle),
            style: self.style(),
        };
        let created = self.platform_mut().create_window(self.id(), &spec);
        let native = match created {
            Ok(native) => native,
            Err(err) => {
                log::error!("{}: {err}", self.id());
                return false;
            }
        };

        self.0.native.set(Some(native));
        self.0.lifecycle.set(Lifecycle::Realized);
        *self.0.parent.borrow_mut() = parent.map(|p| Rc::downgrade(&p.0));
        log::info!(
            "{} created ({native:?}, \"{title}\") on the {} platform",
            self.id(),
            self.platform().name()
        );

        self.on_event(&mut Event::new(EventKind::Create));
        self.with_hooks((), |hooks, window| hooks.on_create(window));
        self.set_transparency(1.0);
        self.apply_style();
        true
    }

    fn can_create(&self) -> bool {
        if self.handle().is_some() || self.lifecycle() != Lifecycle::Unrealized {
            log::warn!(
                "{}: create ignored, window is {:?}",
                self.id(),
                self.lifecycle()
            );
            return false;
        }
        true
    }

    /// Ask the window to close. The hooks and listeners see a `Closing` event
    /// and may veto it; otherwise the native window is destroyed and `Closed`
    /// is dispatched. Returns true if the window closed.
    pub fn close(&self) -> bool {
        if self.lifecycle() != Lifecycle::Realized {
            log::debug!("{}: close ignored, window is {:?}", self.id(), self.lifecycle());
            return false;
        }
        self.0.lifecycle.set(Lifecycle::Closing);

        let mut event = Event::new(EventKind::Closing);
        self.on_event(&mut event);
        if self.lifecycle() != Lifecycle::Closing {
            // Closed from inside its own Closing dispatch.
            return false;
        }
        if event.is_vetoed() {
            log::debug!("{} vetoed close (result {})", self.id(), event.result);
            self.0.lifecycle.set(Lifecycle::Realized);
            return false;
        }

        self.release_native();
        self.finish_close();
        true
    }

    /// The native window was destroyed without negotiation.
    pub(crate) fn handle_destroyed(&self) {
        if self.is_closed() {
            return;
        }
        self.0.native.set(None);
        self.finish_close();
    }

    fn release_native(&self) {
        if let Some(native) = self.0.native.take() {
            self.platform_mut().destroy_window(native);
        }
    }

    fn finish_close(&self) {
        let id = self.id();
        self.0.lifecycle.set(Lifecycle::Closed);
        log::info!("{id} destroyed");
        self.on_event(&mut Event::new(EventKind::Closed));
        self.0.app.routes.borrow_mut().remove(&id);
        if self.0.app.main_window.get() == Some(id) {
            log::info!("main window {id} closed, requesting exit");
            self.0.app.exit();
        }
    }

    pub(crate) fn update(&self) {
        self.with_hooks((), |hooks, window| hooks.on_update(window));
    }

    // --- dispatch ---

    /// Deliver `event` to this window: built-in handling first, then every
    /// listener registered when dispatch starts.
    pub fn on_event(&self, event: &mut Event) {
        match event.kind {
            EventKind::Closing => {
                let allowed = self.with_hooks(true, |hooks, window| hooks.on_closing(window));
                event.result = if allowed { 0 } else { 1 };
            }
            EventKind::Closed => {
                self.0.app.registry.unregister(self.id());
                self.with_hooks((), |hooks, window| hooks.on_close(window));
            }
            EventKind::VisibleChanged => {
                let visible = self.native_visible();
                self.with_hooks((), |hooks, window| {
                    hooks.on_visible_changed(window, visible)
                });
            }
            _ => {}
        }
        self.0.listeners.dispatch(self, event);
    }

    pub fn add_event_listener(
        &self,
        listener: impl Fn(&WindowHandle, &mut Event) + 'static,
    ) -> ListenerId {
        self.0.listeners.add(listener)
    }

    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.0.listeners.remove(id)
    }

    // --- visibility ---

    pub fn show(&self) -> bool {
        self.set_visible(true)
    }

    pub fn hide(&self) -> bool {
        self.set_visible(false)
    }

    fn set_visible(&self, visible: bool) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        let was_visible = self.native_visible();
        if !self.platform_mut().set_visible(native, visible) {
            return false;
        }
        if was_visible != visible {
            self.on_event(&mut Event::new(EventKind::VisibleChanged));
        }
        true
    }

    fn native_visible(&self) -> bool {
        self.handle()
            .and_then(|native| self.platform().is_visible(native))
            .unwrap_or(false)
    }

    /// Shown and not minimized.
    pub fn is_visible(&self) -> bool {
        self.native_visible() && self.window_state() != Some(WindowState::Minimized)
    }

    /// Show as a modal dialog and run a nested loop until this window closes.
    /// The parent is disabled meanwhile; every registered window keeps
    /// receiving its update tick.
    pub fn show_dialog(&self) {
        if self.handle().is_none() {
            log::warn!("{}: show_dialog on a window that is not created", self.id());
            return;
        }
        let parent = self.parent();
        let parent_was_enabled = parent.as_ref().map(|parent| {
            let was_enabled = parent.is_enabled();
            parent.set_enabled(false);
            was_enabled
        });

        self.show();
        self.0.app.run_loop(Some(self.id()));

        if let (Some(parent), Some(was_enabled)) = (parent, parent_was_enabled) {
            parent.set_enabled(was_enabled);
            parent.set_focus(true);
        }
    }

    // --- style ---

    pub fn style(&self) -> WindowStyle {
        self.0.style.get()
    }

    pub fn has_style(&self, style: WindowStyle) -> bool {
        self.style().contains(style)
    }

    pub fn set_style(&self, style: WindowStyle) {
        if self.style() == style {
            return;
        }
        self.0.style.set(style);
        self.apply_style();
    }

    pub fn add_style(&self, style: WindowStyle) {
        self.set_style(self.style() | style);
    }

    pub fn remove_style(&self, style: WindowStyle) {
        self.set_style(self.style() - style);
    }

    fn apply_style(&self) {
        if let Some(native) = self.handle() {
            let style = self.style();
            self.platform_mut().apply_style(native, style);
        }
    }

    // --- geometry ---

    /// Native pixels per logical unit; 1.0 before creation.
    pub fn dpi_scale(&self) -> f32 {
        self.handle()
            .and_then(|native| self.platform().dpi_scale(native))
            .filter(|scale| *scale > 0.0)
            .unwrap_or(1.0)
    }

    /// Outer rectangle, frame included.
    pub fn rect(&self) -> Option<Rect> {
        let native = self.handle()?;
        let scale = self.dpi_scale();
        let rect = self.platform().outer_rect(native)?;
        Some(rect.scaled(1.0 / scale))
    }

    /// No-op while maximized.
    pub fn set_rect(&self, rect: Rect) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        if self.window_state() == Some(WindowState::Maximized) {
            return false;
        }
        let scale = self.dpi_scale();
        self.platform_mut().set_outer_rect(native, rect.scaled(scale))
    }

    pub fn client_size(&self) -> Option<Size> {
        let native = self.handle()?;
        let scale = self.dpi_scale();
        let size = self.platform().client_size(native)?;
        Some(size.scaled(1.0 / scale))
    }

    /// No-op while maximized.
    pub fn set_client_size(&self, size: Size) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        if self.window_state() == Some(WindowState::Maximized) {
            return false;
        }
        let scale = self.dpi_scale();
        self.platform_mut().set_client_size(native, size.scaled(scale))
    }

    pub fn window_state(&self) -> Option<WindowState> {
        let native = self.handle()?;
        self.platform().window_state(native)
    }

    pub fn set_window_state(&self, state: WindowState) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        self.platform_mut().set_window_state(native, state)
    }

    /// Centre on the work area of the window's screen. Only in the normal
    /// state.
    pub fn move_to_center(&self) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        if self.window_state() != Some(WindowState::Normal) {
            return false;
        }
        let (Some(area), Some(rect)) = (
            self.platform().work_area(native),
            self.platform().outer_rect(native),
        ) else {
            return false;
        };
        self.platform_mut()
            .set_outer_rect(native, rect.centered_in(&area))
    }

    pub fn top_most(&self) -> bool {
        self.handle()
            .and_then(|native| self.platform().top_most(native))
            .unwrap_or(false)
    }

    pub fn set_top_most(&self, top_most: bool) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        self.platform_mut().set_top_most(native, top_most)
    }

    /// Whole-window opacity in `[0, 1]`.
    pub fn transparency(&self) -> Option<f32> {
        let native = self.handle()?;
        self.platform().transparency(native)
    }

    pub fn set_transparency(&self, alpha: f32) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        self.platform_mut()
            .set_transparency(native, alpha.clamp(0.0, 1.0))
    }

    pub fn title(&self) -> Option<String> {
        let native = self.handle()?;
        self.platform().title(native)
    }

    pub fn set_title(&self, title: &str) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        self.platform_mut().set_title(native, title)
    }

    // --- input ---

    /// Cursor position relative to the client area, clamped into it.
    pub fn mouse_position(&self) -> Option<Point> {
        let native = self.handle()?;
        let scale = self.dpi_scale();
        let platform = self.platform();
        let position = platform.cursor_position(native)?;
        let client = platform.client_size(native)?;
        Some(client.clamp_point(position) / scale)
    }

    pub fn set_mouse_position(&self, position: Point) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        let scale = self.dpi_scale();
        self.platform_mut()
            .set_cursor_position(native, position * scale)
    }

    pub fn set_cursor(&self, cursor: Cursor) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        self.platform_mut().set_cursor(native, cursor)
    }

    pub fn mouse_capture(&self) -> bool {
        self.handle()
            .is_some_and(|native| self.platform().mouse_capture(native))
    }

    pub fn set_mouse_capture(&self, capture: bool) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        self.platform_mut().set_mouse_capture(native, capture)
    }

    pub fn focus(&self) -> bool {
        self.handle()
            .is_some_and(|native| self.platform().has_focus(native))
    }

    pub fn set_focus(&self, focus: bool) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        self.platform_mut().set_focus(native, focus)
    }

    pub fn is_enabled(&self) -> bool {
        self.handle()
            .and_then(|native| self.platform().is_enabled(native))
            .unwrap_or(false)
    }

    pub fn set_enabled(&self, enabled: bool) -> bool {
        let Some(native) = self.handle() else {
            return false;
        };
        self.platform_mut().set_enabled(native, enabled)
    }
}
