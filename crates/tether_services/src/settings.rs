//! Settings management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tether_core::FrameOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON")]
    Parse(#[from] serde_json::Error),
}

/// Runtime settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub runtime: RuntimeSettings,
    pub demo: DemoSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Frames to run before exiting.
    pub frames: u64,
    pub tick_rate_hz: u32,
    pub sweep_each_frame: bool,
    pub skip_marked: bool,
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Entities that periodically spawn short-lived entities.
    pub spawners: u32,
    /// Frames between spawns.
    pub spawn_interval: u64,
    /// Frames a spawned entity lives before destroying itself.
    pub lifetime_frames: u64,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            frames: 120,
            tick_rate_hz: 60,
            sweep_each_frame: true,
            skip_marked: false,
            log_level: "info".to_string(),
        }
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            spawners: 2,
            spawn_interval: 10,
            lifetime_frames: 30,
        }
    }
}

impl RuntimeSettings {
    pub fn frame_options(&self) -> FrameOptions {
        FrameOptions {
            sweep_each_frame: self.sweep_each_frame,
            skip_marked: self.skip_marked,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
