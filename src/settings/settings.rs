// Settings management and persistence
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::sound::DEFAULT_SOUND_NAME;

/// Sound settings, stored as `settings.json` in the app directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    pub version: i32, // Settings schema version for future migrations
    /// Directory holding bundled sounds; the host's resource dir when unset
    pub sounds_dir: Option<PathBuf>,
    /// Bundled sound played by `play_custom_sound` and `play_alert`
    pub default_sound: String,
    /// Replaces the platform's default notification sound
    pub notification_sound: Option<PathBuf>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            version: 1,
            sounds_dir: None,
            default_sound: DEFAULT_SOUND_NAME.to_string(),
            notification_sound: None,
        }
    }
}

impl SoundSettings {
    /// Get the settings file path
    pub fn get_settings_path(app_dir: &Path) -> PathBuf {
        app_dir.join("settings.json")
    }

    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load(app_dir: &Path) -> Result<Self> {
        let path = Self::get_settings_path(app_dir);

        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;

        let settings: SoundSettings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;

        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        fs::create_dir_all(app_dir)
            .with_context(|| format!("Failed to create settings directory {:?}", app_dir))?;

        let path = Self::get_settings_path(app_dir);
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(&path, content).with_context(|| format!("Failed to write settings file {:?}", path))?;

        info!("Saved settings to {:?}", path);
        Ok(())
    }
}
