use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::playback::{clamp_speed, PlaybackConfig, DEFAULT_CAPACITY};

/// Persistent terminal settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub capacity: usize,
    pub speed: f64,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            speed: 1.0,
            color: true,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tesser-terminal").join("settings.json"))
    }

    /// Load settings from the user config directory, falling back to defaults
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`. A missing file gives defaults; a corrupt one is logged.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| serde_json::from_str::<Settings>(&contents).map_err(anyhow::Error::from));

        match parsed {
            Ok(settings) if settings.capacity == 0 => {
                warn!("Ignoring capacity 0 in {}; using {}", path.display(), DEFAULT_CAPACITY);
                Self {
                    capacity: DEFAULT_CAPACITY,
                    ..settings
                }
            }
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring unreadable settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to the user config directory, returning the path written
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("No config directory on this platform")?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write settings to `path`. Settings a session would reject are not written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        anyhow::ensure!(self.capacity > 0, "Refusing to save capacity 0");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            capacity: self.capacity,
            speed: clamp_speed(self.speed),
        }
    }
}
