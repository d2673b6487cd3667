// Tauri command handlers
use tauri::State;

use crate::audio::CpalBackend;
use crate::sound::CommandError;
use crate::state::AppState;

pub type SoundState = AppState<CpalBackend>;

#[tauri::command]
pub fn play_notification_sound(state: State<'_, SoundState>) -> Result<String, CommandError> {
    state
        .controller
        .play_default_notification_sound()
        .map_err(CommandError::from)
}

#[tauri::command]
pub fn play_custom_sound(name: Option<String>, state: State<'_, SoundState>) -> Result<String, CommandError> {
    state.play_custom(name.as_deref()).map_err(CommandError::from)
}

#[tauri::command]
pub fn play_alert(state: State<'_, SoundState>) -> Result<String, CommandError> {
    state.controller.play_alert().map_err(CommandError::from)
}

#[tauri::command]
pub fn release(state: State<'_, SoundState>) {
    state.controller.release_current();
}
