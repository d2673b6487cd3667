// chime - notification sound bridge
// Module declarations
pub mod assets;
pub mod audio;
#[cfg(feature = "tauri-plugin")]
mod commands;
pub mod settings;
pub mod sound;
pub mod state;

pub use settings::SoundSettings;
pub use sound::{ControllerState, PlaybackController, SoundBackend, SoundError};
pub use state::AppState;

#[cfg(feature = "tauri-plugin")]
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

/// The `sound` plugin: exposes the playback controller to a Tauri host.
///
/// Bundled sounds are looked up in `settings.sounds_dir`, or in `sounds/`
/// under the app's resource directory. The held player is released when the
/// plugin is dropped.
#[cfg(feature = "tauri-plugin")]
pub fn init<R: Runtime>(settings: SoundSettings) -> TauriPlugin<R> {
    Builder::new("sound")
        .invoke_handler(tauri::generate_handler![
            commands::play_notification_sound,
            commands::play_custom_sound,
            commands::play_alert,
            commands::release,
        ])
        .setup(move |app, _api| {
            let resource_dir = app.path().resource_dir()?;
            let library = assets::SoundLibrary::from_settings(&settings, resource_dir.join("sounds"));
            let backend = audio::CpalBackend::new(library);
            app.manage(commands::SoundState::new(backend, settings));
            tracing::info!("Sound plugin ready");
            Ok(())
        })
        .on_drop(|app| {
            if let Some(state) = app.try_state::<commands::SoundState>() {
                state.controller.release_current();
            }
        })
        .build()
}
