use serde::Deserialize;
use sill_core::{NativeHandle, Rect, WindowStyle};

/// User-facing description of a window's initial appearance, loadable from
/// config files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowDescriptor {
    pub title: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowDescriptor {
    fn default() -> Self {
        Self {
            title: "Sill".to_string(),
            x: 100.0,
            y: 100.0,
            width: 960.0,
            height: 640.0,
        }
    }
}

impl WindowDescriptor {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

/// What a backend needs to create one native window.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeWindowSpec {
    pub title: String,
    /// Logical units.
    pub rect: Rect,
    pub parent: Option<NativeHandle>,
    pub style: WindowStyle,
}

impl NativeWindowSpec {
    pub fn from_descriptor(desc: &WindowDescriptor) -> Self {
        Self {
            title: desc.title.clone(),
            rect: desc.rect(),
            parent: None,
            style: WindowStyle::default(),
        }
    }
}
