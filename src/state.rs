// Application state management
use crate::settings::SoundSettings;
use crate::sound::{PlaybackController, SoundBackend, SoundError};

/// What the host keeps alive for the bridge: one controller plus the
/// settings it was built from. Hosts own this explicitly; there is no global.
pub struct AppState<B: SoundBackend> {
    pub controller: PlaybackController<B>,
    pub settings: SoundSettings,
}

impl<B: SoundBackend> AppState<B> {
    pub fn new(backend: B, settings: SoundSettings) -> Self {
        let controller = PlaybackController::with_default_sound(backend, settings.default_sound.clone());
        Self { controller, settings }
    }

    /// Play `name`, or the configured default bundled sound when none is given.
    pub fn play_custom(&self, name: Option<&str>) -> Result<String, SoundError> {
        match name {
            Some(name) => self.controller.play_bundled_sound(name),
            None => self.controller.play_custom_sound(),
        }
    }
}
