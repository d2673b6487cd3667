// Playback controller
// Owns at most one playback handle and releases it before creating the next
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::backend::{PlaybackHandle, SoundBackend, SoundSource};
use super::error::SoundError;

/// Bundled sound played when the host does not name one.
pub const DEFAULT_SOUND_NAME: &str = "ding";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Holding,
}

/// Serializes access to the single player the host may use for notification
/// sounds and turns backend outcomes into [`SoundError`]s.
///
/// Every play operation takes the handle lock, releases whatever is held,
/// then creates and starts the new player before unlocking, so concurrent
/// callers can never observe two live handles.
pub struct PlaybackController<B: SoundBackend> {
    backend: B,
    default_sound: String,
    current: Mutex<Option<B::Handle>>,
}

impl<B: SoundBackend> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_default_sound(backend, DEFAULT_SOUND_NAME)
    }

    pub fn with_default_sound(backend: B, default_sound: impl Into<String>) -> Self {
        Self {
            backend,
            default_sound: default_sound.into(),
            current: Mutex::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn default_sound(&self) -> &str {
        &self.default_sound
    }

    /// Play the platform's default notification sound.
    pub fn play_default_notification_sound(&self) -> Result<String, SoundError> {
        let mut current = self.current.lock();
        Self::release_slot(&mut current);

        let source = self.backend.default_notification_source()?.ok_or_else(|| {
            warn!("No default notification sound available");
            SoundError::PlayerCreationFailed
        })?;

        self.start_into(&mut current, &source)?;
        Ok("Sound played successfully".to_string())
    }

    /// Play a sound bundled with the application, looked up by name.
    pub fn play_bundled_sound(&self, name: &str) -> Result<String, SoundError> {
        let mut current = self.current.lock();
        Self::release_slot(&mut current);

        let source = self.backend.bundled_source(name)?.ok_or_else(|| {
            warn!("Bundled sound '{}' not found", name);
            SoundError::AssetNotFound(name.to_string())
        })?;

        self.start_into(&mut current, &source)?;
        Ok("Custom sound played successfully".to_string())
    }

    /// Play the configured default bundled sound.
    pub fn play_custom_sound(&self) -> Result<String, SoundError> {
        self.play_bundled_sound(&self.default_sound)
    }

    /// Try the default bundled sound, falling back to the notification sound.
    pub fn play_alert(&self) -> Result<String, SoundError> {
        match self.play_custom_sound() {
            Ok(message) => Ok(message),
            Err(e) => {
                debug!("Custom sound failed ({}), trying notification sound", e);
                self.play_default_notification_sound()
            }
        }
    }

    /// Release the held player, if any. Never fails.
    pub fn release_current(&self) {
        let mut current = self.current.lock();
        Self::release_slot(&mut current);
    }

    pub fn state(&self) -> ControllerState {
        if self.current.lock().is_some() {
            ControllerState::Holding
        } else {
            ControllerState::Idle
        }
    }

    /// True while a held player has not reached the end of its sound.
    pub fn is_playing(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    fn start_into(&self, slot: &mut Option<B::Handle>, source: &SoundSource) -> Result<(), SoundError> {
        let mut handle = self.backend.create_player(source)?.ok_or_else(|| {
            warn!("Could not create media player for {}", source);
            SoundError::PlayerCreationFailed
        })?;

        if let Err(e) = handle.start() {
            // The new handle never becomes current; give it back right away.
            if let Err(release_err) = handle.release() {
                warn!("Failed to release player after start error: {:#}", release_err);
            }
            return Err(e.into());
        }

        info!("Playing {}", source);
        *slot = Some(handle);
        Ok(())
    }

    fn release_slot(slot: &mut Option<B::Handle>) {
        if let Some(handle) = slot.take() {
            debug!("Releasing current player");
            if let Err(e) = handle.release() {
                warn!("Failed to release player: {:#}", e);
            }
        }
    }
}

impl<B: SoundBackend> Drop for PlaybackController<B> {
    fn drop(&mut self) {
        Self::release_slot(self.current.get_mut());
    }
}
