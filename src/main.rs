//! chime - play notification sounds from the command line
//!
//! Composes a playback controller over the default output device, the same
//! way the Tauri plugin does, and runs one play request.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chime_lib::assets::SoundLibrary;
use chime_lib::audio::CpalBackend;
use chime_lib::{AppState, SoundSettings};

/// Longest a single sound is waited on before the player is torn down
const MAX_WAIT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "chime", version, about = "Play notification sounds")]
struct Cli {
    /// Directory holding bundled sounds (overrides settings)
    #[arg(long, env = "CHIME_SOUNDS_DIR")]
    sounds_dir: Option<PathBuf>,

    /// Directory containing settings.json
    #[arg(long, env = "CHIME_SETTINGS_DIR")]
    settings_dir: Option<PathBuf>,

    /// Sound file used instead of the platform notification sound
    #[arg(long)]
    notification_sound: Option<PathBuf>,

    /// Return as soon as playback has started
    #[arg(long)]
    no_wait: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play the platform's default notification sound
    Notify,
    /// Play a bundled sound (the configured default when NAME is omitted)
    Play { name: Option<String> },
    /// Play the default bundled sound, falling back to the notification sound
    Alert,
    /// List bundled sounds
    List,
}

fn load_settings(cli: &Cli) -> Result<SoundSettings> {
    let mut settings = match &cli.settings_dir {
        Some(dir) => SoundSettings::load(dir)?,
        None => SoundSettings::default(),
    };
    if let Some(dir) = &cli.sounds_dir {
        settings.sounds_dir = Some(dir.clone());
    }
    if let Some(path) = &cli.notification_sound {
        settings.notification_sound = Some(path.clone());
    }
    Ok(settings)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings(&cli)?;
    let fallback_dir = std::env::current_dir()?.join("sounds");
    let library = SoundLibrary::from_settings(&settings, fallback_dir);

    let state = AppState::new(CpalBackend::new(library), settings);
    let result = match &cli.command {
        Command::List => {
            for name in state.controller.backend().library().catalog().names() {
                println!("{}", name);
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::Notify => state.controller.play_default_notification_sound(),
        Command::Play { name } => state.play_custom(name.as_deref()),
        Command::Alert => state.controller.play_alert(),
    };

    match result {
        Ok(message) => {
            info!("{}", message);
            if !cli.no_wait {
                let started = Instant::now();
                while state.controller.is_playing() && started.elapsed() < MAX_WAIT {
                    thread::sleep(POLL_INTERVAL);
                }
            }
            state.controller.release_current();
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(code = e.code(), "{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chime=info,chime_lib=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
