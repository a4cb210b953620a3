use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use sill_platform::WindowDescriptor;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Minimum duration of one run-loop iteration.
    pub frame_interval_ms: u64,
    pub window: WindowDescriptor,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: sill_core::time::DEFAULT_FRAME_INTERVAL.as_millis() as u64,
            window: WindowDescriptor::default(),
        }
    }
}

impl AppConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.frame_interval_ms == 0 {
            return Err("Config validation failed: frame_interval_ms must be > 0".to_string());
        }
        self.window
            .validate()
            .map_err(|e| format!("Config validation failed: {e}"))
    }
}

pub fn load_config_from_path(config_path: &Path) -> Result<AppConfig, String> {
    let raw = fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read config file {}: {e}", config_path.display()))?;
    let config: AppConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", config_path.display()))?;
    config.validate()?;
    Ok(config)
}
