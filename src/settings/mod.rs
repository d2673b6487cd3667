// Settings module
// Persistent sound configuration

#[allow(clippy::module_inception)]
mod settings;

pub use settings::SoundSettings;
