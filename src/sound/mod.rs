// Sound playback module
// The controller and the backend seam it drives

pub mod backend;
pub mod controller;
pub mod error;

pub use backend::{PlaybackHandle, SoundBackend, SoundSource, SourceKind};
pub use controller::{ControllerState, PlaybackController, DEFAULT_SOUND_NAME};
pub use error::{CommandError, SoundError};

#[cfg(test)]
pub(crate) mod testing;
