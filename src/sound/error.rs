// Playback error taxonomy reported to the host
use serde::Serialize;
use thiserror::Error;

/// Why a play request could not be honoured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// The backend could not build a player for an otherwise valid source
    #[error("Could not create media player")]
    PlayerCreationFailed,

    /// No bundled sound is packaged under this name
    #[error("Sound file not found in bundled sounds: {0}")]
    AssetNotFound(String),

    /// Anything else that went wrong while resolving, building or starting
    #[error("Unexpected sound error: {0}")]
    Unexpected(String),
}

impl SoundError {
    /// Stable error code handed to the host alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            SoundError::PlayerCreationFailed => "PLAYER_CREATION_FAILED",
            SoundError::AssetNotFound(_) => "ASSET_NOT_FOUND",
            SoundError::Unexpected(_) => "SOUND_ERROR",
        }
    }
}

impl From<anyhow::Error> for SoundError {
    fn from(err: anyhow::Error) -> Self {
        SoundError::Unexpected(format!("{:#}", err))
    }
}

/// Rejection payload for the host bridge: `{ "code": ..., "message": ... }`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommandError {
    pub code: String,
    pub message: String,
}

impl From<SoundError> for CommandError {
    fn from(err: SoundError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}
