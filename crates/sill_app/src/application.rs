//! The application object and its run loop.
//!
//! One iteration of the loop:
//!   1. pump the platform and dispatch what it reported, then run queued
//!      cross-thread invocations; stop if the platform asked to quit
//!   2. stop if the scoping window (modal dialog) has left the registry
//!   3. tick every registered window; stop if there is nothing left to run
//!   4. sleep out the rest of the frame budget
//!
//! Everything here is single-threaded. Other threads only reach the loop
//! through [`MainThreadInvoker`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use sill_core::{EventKind, FramePacer, WindowId};
use sill_platform::Platform;

use crate::config::AppConfig;
use crate::invoker::{self, Job, MainThreadInvoker};
use crate::registry::WindowRegistry;
use crate::window::{Window, WindowHandle, WindowHooks, WindowShared};

pub(crate) struct AppShared {
    pub(crate) platform: RefCell<Box<dyn Platform>>,
    pub(crate) registry: WindowRegistry,
    /// Window id -> window, for routing pumped events.
    pub(crate) routes: RefCell<HashMap<WindowId, Weak<WindowShared>>>,
    pub(crate) main_window: Cell<Option<WindowId>>,
    invoker: MainThreadInvoker,
    jobs: Receiver<Job>,
    next_window_id: Cell<u64>,
    config: AppConfig,
}

impl AppShared {
    pub(crate) fn allocate_window_id(&self) -> WindowId {
        let id = self.next_window_id.get();
        self.next_window_id.set(id + 1);
        WindowId(id)
    }

    pub(crate) fn exit(&self) {
        self.platform.borrow_mut().request_exit();
    }

    fn window(&self, id: WindowId) -> Option<WindowHandle> {
        let inner = self.routes.borrow().get(&id).and_then(Weak::upgrade)?;
        Some(WindowHandle(inner))
    }

    fn pump(&self) -> bool {
        let pumped = self.platform.borrow_mut().pump_events();
        let quit_requested = pumped.quit_requested;

        for (id, event) in pumped.events {
            let Some(window) = self.window(id) else {
                log::trace!("{} for unknown {id} dropped", event.kind.name());
                continue;
            };
            match event.kind {
                EventKind::Closing => {
                    window.close();
                }
                EventKind::Closed => window.handle_destroyed(),
                _ => {
                    let mut event = event;
                    window.on_event(&mut event);
                }
            }
        }

        invoker::drain(&self.jobs);
        !quit_requested
    }

    fn update_all_windows(&self) -> bool {
        if self.registry.is_empty() {
            return false;
        }
        if let Some(main) = self.main_window.get() {
            if !self.registry.contains(main) {
                log::info!("main window {main} is no longer registered, exiting");
                self.exit();
                return false;
            }
        }
        for (_, updater) in self.registry.snapshot() {
            updater();
        }
        true
    }

    pub(crate) fn run_loop(&self, scope: Option<WindowId>) {
        let mut pacer = FramePacer::new(self.config.frame_interval());
        loop {
            pacer.begin_frame();
            if !self.pump() {
                if scope.is_some() {
                    // Let the enclosing loop see the quit too.
                    self.exit();
                }
                break;
            }
            if let Some(scope) = scope {
                if !self.registry.contains(scope) {
                    break;
                }
            }
            if !self.update_all_windows() {
                break;
            }
            pacer.end_frame();
        }
        log::debug!(
            "run loop ({}) ended after {} frames, {:.2}ms average work, {} overruns",
            scope.map_or_else(|| "main".to_string(), |id| id.to_string()),
            pacer.frame_count,
            pacer.smoothed_work_ms,
            pacer.overrun_count
        );
    }
}

/// Owns the platform, the window registry and the main-thread queue.
///
/// The thread that constructs the application is its main thread: only that
/// thread may pump, and [`MainThreadInvoker`]s handed out by it marshal work
/// back to it. Clones share the same application.
#[derive(Clone)]
pub struct Application {
    pub(crate) inner: Rc<AppShared>,
}

impl Application {
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self::with_config(platform, AppConfig::default())
    }

    pub fn with_config(platform: impl Platform + 'static, config: AppConfig) -> Self {
        Self::with_boxed_platform(Box::new(platform), config)
    }

    /// For callers that pick the backend at runtime.
    pub fn with_boxed_platform(platform: Box<dyn Platform>, config: AppConfig) -> Self {
        let (invoker, jobs) = invoker::channel();
        log::info!(
            "Application on the {} platform, {}ms frame budget",
            platform.name(),
            config.frame_interval_ms
        );
        Self {
            inner: Rc::new(AppShared {
                platform: RefCell::new(platform),
                registry: WindowRegistry::new(),
                routes: RefCell::new(HashMap::new()),
                main_window: Cell::new(None),
                invoker,
                jobs,
                next_window_id: Cell::new(1),
                config,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn frame_interval(&self) -> Duration {
        self.inner.config.frame_interval()
    }

    pub fn platform_name(&self) -> &'static str {
        self.inner.platform.borrow().name()
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.inner.registry
    }

    pub fn invoker(&self) -> MainThreadInvoker {
        self.inner.invoker.clone()
    }

    /// A live window by id.
    pub fn window(&self, id: WindowId) -> Option<WindowHandle> {
        self.inner.window(id)
    }

    pub fn create_window(&self, hooks: impl WindowHooks + 'static) -> Window {
        Window::new(self, hooks)
    }

    pub fn main_window(&self) -> Option<WindowId> {
        self.inner.main_window.get()
    }

    /// The window whose closing ends [`Application::run`].
    pub fn set_main_window(&self, id: Option<WindowId>) {
        self.inner.main_window.set(id);
    }

    /// Tick every registered window once. Returns false when the loop should
    /// stop: nothing is registered, or the main window has left the registry
    /// (which also requests exit).
    pub fn update_all_windows(&self) -> bool {
        self.inner.update_all_windows()
    }

    /// Dispatch everything the platform reported and run queued invocations.
    /// Returns false if the platform asked to quit.
    pub fn pump(&self) -> bool {
        self.inner.pump()
    }

    /// Run the loop until it stops. With a `scope`, it also stops as soon as
    /// that window leaves the registry.
    pub fn run_loop(&self, scope: Option<WindowId>) {
        self.inner.run_loop(scope);
    }

    /// Show `window`, make it the main window and run until it closes or an
    /// exit is requested. Returns 0.
    ///
    /// An exit request still pending when the loop stops is dropped, so `run`
    /// can be called again on the same application.
    pub fn run(&self, window: &WindowHandle) -> i32 {
        let previous = self.inner.main_window.replace(Some(window.id()));
        if window.handle().is_some() && !window.is_visible() {
            window.show();
        }
        self.inner.run_loop(None);
        self.inner.main_window.set(previous);
        self.inner.platform.borrow_mut().clear_exit_request();
        0
    }

    /// Create a window from `hooks` and run it as the main window. Returns 1
    /// if the native window could not be created.
    pub fn run_new(&self, hooks: impl WindowHooks + 'static) -> i32 {
        let window = Window::new(self, hooks);
        if !window.create() {
            return 1;
        }
        self.run(&window)
    }

    /// Ask the loop to stop at its next pump.
    pub fn exit(&self) {
        log::debug!("exit requested");
        self.inner.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{CreateParams, DefaultHooks, Lifecycle};
    use sill_core::{Event, KeyInput, Keys, ModifierKey, Rect};
    use sill_platform::{HeadlessController, HeadlessPlatform};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    fn app_with_interval(frame_interval_ms: u64) -> (Application, HeadlessController) {
        let platform = HeadlessPlatform::new();
        let ctl = platform.controller();
        let config = AppConfig {
            frame_interval_ms,
            ..AppConfig::default()
        };
        (Application::with_config(platform, config), ctl)
    }

    fn app() -> (Application, HeadlessController) {
        app_with_interval(1)
    }

    /// Counts update ticks; optionally closes itself after a number of them.
    struct Ticker {
        ticks: Rc<Cell<u32>>,
        close_after: Option<u32>,
    }

    impl Ticker {
        fn counting(ticks: &Rc<Cell<u32>>) -> Self {
            Self {
                ticks: Rc::clone(ticks),
                close_after: None,
            }
        }
    }

    impl WindowHooks for Ticker {
        fn on_update(&self, window: &WindowHandle) {
            self.ticks.set(self.ticks.get() + 1);
            if self.close_after == Some(self.ticks.get()) {
                window.close();
            }
        }
    }

    #[test]
    fn update_all_on_empty_registry_stops() {
        let (app, _ctl) = app();
        assert!(!app.update_all_windows());
    }

    #[test]
    fn update_all_ticks_every_window() {
        let (app, _ctl) = app();
        let a_ticks = Rc::new(Cell::new(0));
        let b_ticks = Rc::new(Cell::new(0));
        let _a = Window::new(&app, Ticker::counting(&a_ticks));
        let _b = Window::new(&app, Ticker::counting(&b_ticks));
        assert!(app.update_all_windows());
        assert_eq!((a_ticks.get(), b_ticks.get()), (1, 1));
    }

    #[test]
    fn closing_a_secondary_window_keeps_the_loop_alive() {
        let (app, _ctl) = app();
        let a_ticks = Rc::new(Cell::new(0));
        let b_ticks = Rc::new(Cell::new(0));
        let a = Window::new(&app, Ticker::counting(&a_ticks));
        let b = Window::new(&app, Ticker::counting(&b_ticks));
        a.create();
        b.create();
        app.set_main_window(Some(a.id()));

        assert!(app.update_all_windows());
        assert!(b.close());
        assert!(app.update_all_windows());
        assert!(app.update_all_windows());
        assert_eq!((a_ticks.get(), b_ticks.get()), (3, 1));
    }

    #[test]
    fn losing_the_main_window_stops_and_requests_exit() {
        let (app, _ctl) = app();
        let a = Window::new(&app, DefaultHooks);
        let b = Window::new(&app, DefaultHooks);
        a.create();
        b.create();
        app.set_main_window(Some(a.id()));

        app.registry().unregister(a.id());
        assert!(app.registry().contains(b.id()));
        assert!(!app.update_all_windows());
        assert!(!app.pump());
    }

    #[test]
    fn run_returns_zero_after_native_close() {
        let (app, ctl) = app();
        let window = Window::new(&app, DefaultHooks);
        assert!(window.create());
        ctl.request_close(window.id());

        assert_eq!(app.run(&window), 0);
        assert!(window.is_closed());
        assert!(app.registry().is_empty());
        assert_eq!(ctl.live_windows(), 0);
        assert_eq!(app.main_window(), None);
    }

    #[test]
    fn run_shows_the_main_window() {
        let (app, ctl) = app();
        let window = Window::new(&app, DefaultHooks);
        window.create();
        let native = window.handle().unwrap();
        let visible_during_run = Rc::new(Cell::new(false));
        {
            let ctl = ctl.clone();
            let seen = Rc::clone(&visible_during_run);
            window.add_event_listener(move |_, event| {
                if event.kind == EventKind::VisibleChanged {
                    seen.set(ctl.window(native).map_or(false, |w| w.visible));
                }
            });
        }
        ctl.request_close(window.id());
        app.run(&window);
        assert!(visible_during_run.get());
    }

    #[test]
    fn vetoed_native_close_keeps_running() {
        struct VetoOnce {
            vetoed: Cell<bool>,
        }
        impl WindowHooks for VetoOnce {
            fn on_closing(&self, _window: &WindowHandle) -> bool {
                self.vetoed.replace(true)
            }
        }

        let (app, ctl) = app();
        let window = Window::new(
            &app,
            VetoOnce {
                vetoed: Cell::new(false),
            },
        );
        window.create();
        ctl.request_close(window.id());
        ctl.request_close(window.id());
        assert_eq!(app.run(&window), 0);
        assert!(window.is_closed());
    }

    #[test]
    fn external_destroy_closes_without_a_second_release() {
        let (app, ctl) = app();
        let closed = Rc::new(Cell::new(0));
        let window = Window::new(&app, DefaultHooks);
        window.create();
        {
            let closed = Rc::clone(&closed);
            window.add_event_listener(move |_, event| {
                if event.kind == EventKind::Closed {
                    closed.set(closed.get() + 1);
                }
            });
        }
        ctl.destroy_externally(window.id());
        assert!(app.pump());
        assert!(window.is_closed());
        assert_eq!(window.handle(), None);
        assert_eq!(closed.get(), 1);
        assert_eq!(ctl.destroyed().len(), 1);
        assert!(app.registry().is_empty());
    }

    #[test]
    fn pumped_events_reach_the_owning_window() {
        let (app, ctl) = app();
        let a = Window::new(&app, DefaultHooks);
        let b = Window::new(&app, DefaultHooks);
        let a_events = Rc::new(RefCell::new(Vec::new()));
        {
            let a_events = Rc::clone(&a_events);
            a.add_event_listener(move |_, event| a_events.borrow_mut().push(event.kind));
        }
        b.add_event_listener(|_, _| panic!("event routed to the wrong window"));

        ctl.push_event(a.id(), EventKind::Resize);
        ctl.push_event(a.id(), EventKind::MouseMove);
        ctl.push_event(WindowId(999), EventKind::Resize);
        assert!(app.pump());
        assert_eq!(*a_events.borrow(), vec![EventKind::Resize, EventKind::MouseMove]);
    }

    #[test]
    fn exit_is_reported_by_the_next_pump_only() {
        let (app, _ctl) = app();
        app.exit();
        assert!(!app.pump());
        assert!(app.pump());
    }

    #[test]
    fn run_can_be_repeated_on_the_same_application() {
        let (app, ctl) = app();
        let first = Window::new(&app, DefaultHooks);
        first.create();
        ctl.request_close(first.id());
        assert_eq!(app.run(&first), 0);
        assert!(first.is_closed());

        let ticks = Rc::new(Cell::new(0));
        let second = Window::new(
            &app,
            Ticker {
                ticks: Rc::clone(&ticks),
                close_after: Some(3),
            },
        );
        second.create();
        assert_eq!(app.run(&second), 0);
        assert_eq!(ticks.get(), 3);
        assert!(second.is_closed());
    }

    #[test]
    fn run_new_drives_update_until_the_window_closes_itself() {
        let (app, ctl) = app();
        let ticks = Rc::new(Cell::new(0));
        let code = app.run_new(Ticker {
            ticks: Rc::clone(&ticks),
            close_after: Some(3),
        });
        assert_eq!(code, 0);
        assert_eq!(ticks.get(), 3);
        assert_eq!(ctl.live_windows(), 0);
        assert!(app.registry().is_empty());
    }

    #[test]
    fn run_new_reports_creation_failure() {
        let (app, ctl) = app();
        ctl.fail_next_create();
        assert_eq!(app.run_new(DefaultHooks), 1);
        assert!(app.registry().is_empty());
    }

    #[test]
    fn short_iterations_are_paced_to_the_budget() {
        let (app, _ctl) = app_with_interval(20);
        let ticks = Rc::new(Cell::new(0));
        let start = Instant::now();
        app.run_new(Ticker {
            ticks: Rc::clone(&ticks),
            close_after: Some(3),
        });
        assert_eq!(ticks.get(), 3);
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn worker_invoke_is_serviced_by_the_pump() {
        let (app, _ctl) = app();
        let invoker = app.invoker();
        let flag = Arc::new(AtomicBool::new(false));
        let worker = {
            let flag = Arc::clone(&flag);
            std::thread::spawn(move || {
                let set = Arc::clone(&flag);
                invoker
                    .invoke(move || set.store(true, Ordering::SeqCst))
                    .unwrap();
                flag.load(Ordering::SeqCst)
            })
        };
        while !worker.is_finished() {
            app.pump();
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(worker.join().unwrap());
    }

    #[test]
    fn queued_invocations_run_in_order_before_quit() {
        let (app, _ctl) = app();
        let window = Window::new(&app, DefaultHooks);
        window.create();
        let order = Arc::new(Mutex::new(Vec::new()));
        let invoker = app.invoker();
        for n in 1..=3 {
            let order = Arc::clone(&order);
            invoker
                .invoke_async(move || order.lock().unwrap().push(n))
                .unwrap();
        }
        app.exit();
        assert_eq!(app.run(&window), 0);
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
        assert!(!window.is_closed());
    }

    #[test]
    fn invoke_after_teardown_is_an_error() {
        let (app, _ctl) = app();
        let invoker = app.invoker();
        drop(app);
        assert_eq!(
            invoker.invoke_async(|| {}),
            Err(crate::InvokeError::Disconnected)
        );
    }

    /// Records whether its owner was enabled while the close was negotiated,
    /// and asks the platform to close it on its first tick.
    struct Dialog {
        owner: WindowHandle,
        ctl: HeadlessController,
        owner_enabled_while_modal: Rc<Cell<Option<bool>>>,
    }

    impl WindowHooks for Dialog {
        fn create_params(&self) -> CreateParams {
            CreateParams {
                parent: Some(self.owner.clone()),
                title: "dialog".to_string(),
                rect: Rect::new(0.0, 0.0, 200.0, 100.0),
            }
        }

        fn on_update(&self, window: &WindowHandle) {
            self.ctl.request_close(window.id());
        }

        fn on_closing(&self, _window: &WindowHandle) -> bool {
            self.owner_enabled_while_modal
                .set(Some(self.owner.is_enabled()));
            true
        }
    }

    #[test]
    fn dialog_disables_its_owner_until_closed() {
        let (app, ctl) = app();
        let owner_ticks = Rc::new(Cell::new(0));
        let owner = Window::new(&app, Ticker::counting(&owner_ticks));
        owner.create();
        owner.show();
        app.set_main_window(Some(owner.id()));

        let observed = Rc::new(Cell::new(None));
        let dialog = Window::new(
            &app,
            Dialog {
                owner: owner.to_handle(),
                ctl: ctl.clone(),
                owner_enabled_while_modal: Rc::clone(&observed),
            },
        );
        assert!(dialog.create());
        assert_eq!(dialog.parent().map(|p| p.id()), Some(owner.id()));

        dialog.show_dialog();

        assert_eq!(dialog.lifecycle(), Lifecycle::Closed);
        assert_eq!(observed.get(), Some(false));
        assert!(owner.is_enabled());
        assert!(owner.focus());
        // The owner kept ticking while the dialog was modal.
        assert_eq!(owner_ticks.get(), 1);
        assert!(app.update_all_windows());
    }

    /// Counts its ticks, optionally asks the platform to close its owner, and
    /// closes itself on `close_at`.
    struct ScriptedDialog {
        owner: WindowId,
        ctl: HeadlessController,
        ticks: Rc<Cell<u32>>,
        owner_enabled_while_modal: Rc<Cell<Option<bool>>>,
        request_owner_close_at: Option<u32>,
        close_at: u32,
    }

    impl ScriptedDialog {
        fn open(self, owner: &WindowHandle) {
            let dialog = Window::new(&owner.application(), self);
            assert!(dialog.create_impl(Some(owner), "modal", Rect::new(0.0, 0.0, 200.0, 100.0)));
            dialog.show_dialog();
            assert!(dialog.is_closed());
        }
    }

    impl WindowHooks for ScriptedDialog {
        fn on_update(&self, window: &WindowHandle) {
            let tick = self.ticks.get() + 1;
            self.ticks.set(tick);
            if tick == 1 {
                self.owner_enabled_while_modal
                    .set(window.parent().map(|owner| owner.is_enabled()));
            }
            if self.request_owner_close_at == Some(tick) {
                self.ctl.request_close(self.owner);
            }
            if tick == self.close_at {
                window.close();
            }
        }
    }

    /// Opens a dialog from its first tick and refuses every close.
    struct ModalOwner {
        ctl: HeadlessController,
        ticks: Rc<Cell<u32>>,
        closing_calls: Rc<Cell<u32>>,
        dialog_ticks: Rc<Cell<u32>>,
        owner_enabled_while_modal: Rc<Cell<Option<bool>>>,
    }

    impl WindowHooks for ModalOwner {
        fn on_update(&self, window: &WindowHandle) {
            self.ticks.set(self.ticks.get() + 1);
            if self.ticks.get() > 1 {
                return;
            }
            ScriptedDialog {
                owner: window.id(),
                ctl: self.ctl.clone(),
                ticks: Rc::clone(&self.dialog_ticks),
                owner_enabled_while_modal: Rc::clone(&self.owner_enabled_while_modal),
                request_owner_close_at: Some(2),
                close_at: 5,
            }
            .open(window);
        }

        fn on_closing(&self, _window: &WindowHandle) -> bool {
            self.closing_calls.set(self.closing_calls.get() + 1);
            false
        }
    }

    #[test]
    fn owner_keeps_ticking_and_vetoing_while_its_dialog_is_modal() {
        let (app, ctl) = app();
        let ticks = Rc::new(Cell::new(0));
        let closing_calls = Rc::new(Cell::new(0));
        let dialog_ticks = Rc::new(Cell::new(0));
        let owner_enabled = Rc::new(Cell::new(None));
        let owner = Window::new(
            &app,
            ModalOwner {
                ctl: ctl.clone(),
                ticks: Rc::clone(&ticks),
                closing_calls: Rc::clone(&closing_calls),
                dialog_ticks: Rc::clone(&dialog_ticks),
                owner_enabled_while_modal: Rc::clone(&owner_enabled),
            },
        );
        owner.create();
        app.set_main_window(Some(owner.id()));

        // The dialog runs to completion inside the owner's first tick.
        assert!(app.update_all_windows());
        assert_eq!(dialog_ticks.get(), 5);
        assert_eq!(ticks.get(), 6);
        assert_eq!(owner_enabled.get(), Some(false));
        assert_eq!(closing_calls.get(), 1);
        assert!(!owner.is_closed());
        assert!(owner.is_enabled());
        assert!(app.pump());
        assert!(app.update_all_windows());
        assert_eq!(ticks.get(), 7);
    }

    #[test]
    fn dialog_opened_from_a_listener_runs_inside_the_pump() {
        let (app, ctl) = app();
        let owner_ticks = Rc::new(Cell::new(0));
        let owner = Window::new(&app, Ticker::counting(&owner_ticks));
        owner.create();
        app.set_main_window(Some(owner.id()));

        let dialog_ticks = Rc::new(Cell::new(0));
        let owner_enabled = Rc::new(Cell::new(None));
        {
            let ctl = ctl.clone();
            let dialog_ticks = Rc::clone(&dialog_ticks);
            let owner_enabled = Rc::clone(&owner_enabled);
            owner.add_event_listener(move |window, event| {
                if !matches!(event.kind, EventKind::KeyDown(_)) {
                    return;
                }
                ScriptedDialog {
                    owner: window.id(),
                    ctl: ctl.clone(),
                    ticks: Rc::clone(&dialog_ticks),
                    owner_enabled_while_modal: Rc::clone(&owner_enabled),
                    request_owner_close_at: None,
                    close_at: 3,
                }
                .open(window);
            });
        }

        ctl.push_event(
            owner.id(),
            EventKind::KeyDown(KeyInput {
                key: Some(Keys::Return),
                modifiers: ModifierKey::empty(),
            }),
        );
        assert!(app.pump());
        assert_eq!(dialog_ticks.get(), 3);
        assert_eq!(owner_ticks.get(), 3);
        assert_eq!(owner_enabled.get(), Some(false));
        assert!(owner.is_enabled());
        assert!(!owner.is_closed());
        assert!(app.update_all_windows());
    }

    #[test]
    fn quit_inside_a_dialog_reaches_the_outer_loop() {
        let (app, ctl) = app();
        let owner = Window::new(&app, DefaultHooks);
        owner.create();
        let dialog = Window::new(&app, DefaultHooks);
        dialog.create_impl(Some(&owner), "dialog", Rect::new(0.0, 0.0, 50.0, 50.0));

        ctl.request_quit();
        dialog.show_dialog();
        assert!(!dialog.is_closed());
        assert!(!app.pump());
    }

    #[test]
    fn listener_can_close_another_window_mid_dispatch() {
        let (app, ctl) = app();
        let a = Window::new(&app, DefaultHooks);
        let b = Window::new(&app, DefaultHooks);
        a.create();
        b.create();
        let b_handle = b.to_handle();
        a.add_event_listener(move |_, event| {
            if event.kind == EventKind::Resize {
                b_handle.close();
            }
        });
        ctl.push_event(a.id(), EventKind::Resize);
        ctl.push_event(b.id(), EventKind::Resize);
        assert!(app.pump());
        assert!(b.is_closed());
        assert!(app.update_all_windows());

        let mut event = Event::new(EventKind::Resize);
        b.on_event(&mut event);
        assert_eq!(event.result, 0);
    }
}
