//! The window engine: windows with lifecycle hooks and listeners, the registry
//! that keeps the run loop alive, cross-thread invocation onto the main
//! thread, and the [`Application`] that owns all of it.
//!
//! ```
//! use sill_app::{Application, WindowHandle, WindowHooks};
//! use sill_platform::HeadlessPlatform;
//!
//! struct CloseOnFirstTick;
//!
//! impl WindowHooks for CloseOnFirstTick {
//!     fn on_update(&self, window: &WindowHandle) {
//!         window.close();
//!     }
//! }
//!
//! let app = Application::new(HeadlessPlatform::new());
//! assert_eq!(app.run_new(CloseOnFirstTick), 0);
//! ```

pub mod application;
pub mod config;
pub mod event_bus;
pub mod invoker;
pub mod registry;
pub mod window;

pub use application::Application;
pub use config::{load_config_from_path, AppConfig};
pub use event_bus::{EventBus, ListenerId};
pub use invoker::{InvokeError, MainThreadInvoker};
pub use registry::WindowRegistry;
pub use sill_platform::WindowDescriptor;
pub use window::{CreateParams, DefaultHooks, Lifecycle, Window, WindowHandle, WindowHooks};
