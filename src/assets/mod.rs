// Sound asset resolution
// Bundled sounds by name, plus the platform's default notification sound

pub mod catalog;
pub mod system;

use std::path::PathBuf;

pub use catalog::SoundCatalog;

use crate::settings::SoundSettings;
use crate::sound::SoundSource;

/// Everything a backend needs to turn a play request into a file on disk.
pub struct SoundLibrary {
    catalog: SoundCatalog,
    notification_override: Option<PathBuf>,
    notification_candidates: Vec<PathBuf>,
}

impl SoundLibrary {
    pub fn new(sounds_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog: SoundCatalog::new(sounds_dir),
            notification_override: None,
            notification_candidates: system::platform_candidates(),
        }
    }

    /// Build from settings, with `fallback_dir` used when no sounds directory is configured.
    pub fn from_settings(settings: &SoundSettings, fallback_dir: impl Into<PathBuf>) -> Self {
        let sounds_dir = settings.sounds_dir.clone().unwrap_or_else(|| fallback_dir.into());
        Self::new(sounds_dir).with_notification_override(settings.notification_sound.clone())
    }

    pub fn with_notification_override(mut self, path: Option<PathBuf>) -> Self {
        self.notification_override = path;
        self
    }

    pub fn with_notification_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.notification_candidates = candidates;
        self
    }

    pub fn catalog(&self) -> &SoundCatalog {
        &self.catalog
    }

    pub fn default_notification(&self) -> Option<SoundSource> {
        system::default_notification_sound(self.notification_override.as_deref(), &self.notification_candidates)
            .map(SoundSource::default_notification)
    }

    pub fn bundled(&self, name: &str) -> Option<SoundSource> {
        self.catalog.resolve(name).map(|path| SoundSource::bundled(name, path))
    }
}
