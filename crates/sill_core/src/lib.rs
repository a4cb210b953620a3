//! Platform-independent value types shared by the platform backends and the
//! application engine: geometry, the event model, key identifiers, window
//! identity/state/style and the frame pacer that drives the run loop.

pub mod event;
pub mod geometry;
pub mod keys;
pub mod time;
pub mod window;

pub use event::{Event, EventKind, KeyInput, ModifierKey, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use keys::{Cursor, Keys};
pub use time::FramePacer;
pub use window::{NativeHandle, WindowId, WindowState, WindowStyle};
