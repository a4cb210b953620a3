//! Sill demo -- one fixed-size, always-on-top window centred on screen.
//!
//! Reads `assets/config/app.json` when present. Runs on winit where the
//! backend is available and falls back to the headless platform otherwise
//! (in which case the window is closed after a few seconds, since nothing
//! else can close it).

use std::cell::Cell;
use std::path::Path;

use sill_app::{
    load_config_from_path, AppConfig, Application, CreateParams, Window, WindowHandle, WindowHooks,
};
use sill_core::{EventKind, WindowStyle};
use sill_platform::{HeadlessPlatform, Platform, WindowDescriptor};

const CONFIG_PATH: &str = "assets/config/app.json";
const HEADLESS_FRAME_LIMIT: u64 = 90;

struct DemoWindow {
    descriptor: WindowDescriptor,
    frames: Cell<u64>,
    frame_limit: Option<u64>,
}

impl WindowHooks for DemoWindow {
    fn create_params(&self) -> CreateParams {
        CreateParams::from_descriptor(&self.descriptor)
    }

    fn on_create(&self, window: &WindowHandle) {
        log::info!(
            "{} ready: {:?} at dpi scale {}",
            window.id(),
            window.client_size(),
            window.dpi_scale()
        );
    }

    fn on_update(&self, window: &WindowHandle) {
        let frames = self.frames.get() + 1;
        self.frames.set(frames);
        if self.frame_limit == Some(frames) {
            log::info!("headless demo reached {frames} frames, closing");
            window.close();
        }
    }

    fn on_closing(&self, _window: &WindowHandle) -> bool {
        log::info!("close requested after {} frames", self.frames.get());
        true
    }

    fn on_close(&self, window: &WindowHandle) {
        log::info!("{} closed", window.id());
    }
}

fn load_config() -> AppConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        log::info!("{CONFIG_PATH} not found, using defaults");
        return AppConfig::default();
    }
    match load_config_from_path(path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}; using defaults");
            AppConfig::default()
        }
    }
}

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
fn native_platform() -> Option<Box<dyn Platform>> {
    match sill_platform::winit_backend::WinitPlatform::new() {
        Ok(platform) => Some(Box::new(platform)),
        Err(err) => {
            log::warn!("winit unavailable ({err}), falling back to headless");
            None
        }
    }
}

#[cfg(not(all(
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
)))]
fn native_platform() -> Option<Box<dyn Platform>> {
    None
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let native = native_platform();
    let frame_limit = native.is_none().then_some(HEADLESS_FRAME_LIMIT);
    let platform: Box<dyn Platform> = match native {
        Some(platform) => platform,
        None => Box::new(HeadlessPlatform::new()),
    };
    let app = Application::with_boxed_platform(platform, config.clone());

    let window = Window::new(
        &app,
        DemoWindow {
            descriptor: config.window,
            frames: Cell::new(0),
            frame_limit,
        },
    );
    if !window.create() {
        log::error!("could not create the demo window");
        std::process::exit(1);
    }
    window.remove_style(WindowStyle::RESIZABLE | WindowStyle::BUTTON_MAX);
    window.set_top_most(true);
    window.move_to_center();
    window.add_event_listener(|window, event| match event.kind {
        EventKind::KeyDown(input) => log::debug!("{} key down {:?}", window.id(), input),
        EventKind::DpiChanged => log::info!("{} dpi scale now {}", window.id(), window.dpi_scale()),
        _ => {}
    });

    let code = app.run(&window);
    log::info!("run loop finished with {code}");
    std::process::exit(code);
}
