// Default notification sound resolution
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[cfg(target_os = "linux")]
const PLATFORM_CANDIDATES: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo/message-new-instant.oga",
    "/usr/share/sounds/freedesktop/stereo/message.oga",
    "/usr/share/sounds/freedesktop/stereo/complete.oga",
    "/usr/share/sounds/freedesktop/stereo/bell.oga",
];

#[cfg(target_os = "windows")]
const PLATFORM_CANDIDATES: &[&str] = &[
    r"C:\Windows\Media\Windows Notify System Generic.wav",
    r"C:\Windows\Media\Windows Notify.wav",
    r"C:\Windows\Media\notify.wav",
];

#[cfg(target_os = "macos")]
const PLATFORM_CANDIDATES: &[&str] = &[];

#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
const PLATFORM_CANDIDATES: &[&str] = &[];

/// Well-known locations of the platform's notification sound, in preference order.
pub fn platform_candidates() -> Vec<PathBuf> {
    PLATFORM_CANDIDATES.iter().map(PathBuf::from).collect()
}

/// Resolve the default notification sound.
///
/// A configured override wins when it exists; otherwise the first existing
/// candidate is used.
pub fn default_notification_sound(override_path: Option<&Path>, candidates: &[PathBuf]) -> Option<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        warn!("Configured notification sound {:?} does not exist, using platform default", path);
    }

    let found = candidates.iter().find(|path| path.is_file()).cloned();
    if found.is_none() {
        debug!("None of {} notification sound candidates exist", candidates.len());
    }
    found
}
