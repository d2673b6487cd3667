//! Seam between the playback controller and whatever actually makes noise.
//!
//! A backend resolves sound sources and builds players for them. The
//! controller never touches the OS audio API directly; it only creates,
//! starts and releases [`PlaybackHandle`]s through this trait.

use std::fmt;
use std::path::PathBuf;

/// Where a source came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// The platform's default notification sound
    DefaultNotification,
    /// A sound shipped with the application, looked up by name
    Bundled(String),
}

/// A resolved, playable sound location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSource {
    pub kind: SourceKind,
    pub path: PathBuf,
}

impl SoundSource {
    pub fn default_notification(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceKind::DefaultNotification,
            path: path.into(),
        }
    }

    pub fn bundled(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceKind::Bundled(name.into()),
            path: path.into(),
        }
    }
}

impl fmt::Display for SoundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SourceKind::DefaultNotification => write!(f, "default notification ({})", self.path.display()),
            SourceKind::Bundled(name) => write!(f, "bundled '{}' ({})", name, self.path.display()),
        }
    }
}

/// One loaded sound, exclusively owned by whoever created it.
pub trait PlaybackHandle: Send {
    /// Begin playback and return without waiting for it to finish.
    fn start(&mut self) -> anyhow::Result<()>;

    /// Give the underlying resource back to the OS.
    fn release(self) -> anyhow::Result<()>;

    /// Whether playback has run to its end. Backends that cannot tell report `false`.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Connects a [`PlaybackController`](crate::sound::PlaybackController) to an audio API.
///
/// Resolution methods return `Ok(None)` when nothing usable exists.
/// `create_player` returns `Ok(None)` when the API declines to build a player
/// for the source; `Err` is reserved for unexpected faults.
pub trait SoundBackend: Send + Sync {
    type Handle: PlaybackHandle;

    fn default_notification_source(&self) -> anyhow::Result<Option<SoundSource>>;

    fn bundled_source(&self, name: &str) -> anyhow::Result<Option<SoundSource>>;

    fn create_player(&self, source: &SoundSource) -> anyhow::Result<Option<Self::Handle>>;
}
