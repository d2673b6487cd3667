//! End-to-end checks of the controller over real sound files: bundled sounds
//! are resolved on disk and decoded with symphonia, only the output device is
//! replaced by an in-memory player.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hound::{SampleFormat, WavSpec, WavWriter};

use chime_lib::assets::SoundLibrary;
use chime_lib::audio::DecodedClip;
use chime_lib::sound::{PlaybackHandle, SoundBackend, SoundSource};
use chime_lib::{AppState, ControllerState, SoundError, SoundSettings};

struct MemoryPlayer {
    clip: DecodedClip,
    live: Arc<AtomicUsize>,
}

impl PlaybackHandle for MemoryPlayer {
    fn start(&mut self) -> anyhow::Result<()> {
        assert!(!self.clip.samples.is_empty());
        Ok(())
    }

    fn release(self) -> anyhow::Result<()> {
        self.live.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

struct DecodingBackend {
    library: SoundLibrary,
    live: Arc<AtomicUsize>,
}

impl SoundBackend for DecodingBackend {
    type Handle = MemoryPlayer;

    fn default_notification_source(&self) -> anyhow::Result<Option<SoundSource>> {
        Ok(self.library.default_notification())
    }

    fn bundled_source(&self, name: &str) -> anyhow::Result<Option<SoundSource>> {
        Ok(self.library.bundled(name))
    }

    fn create_player(&self, source: &SoundSource) -> anyhow::Result<Option<MemoryPlayer>> {
        let Ok(clip) = DecodedClip::load(&source.path) else {
            return Ok(None);
        };
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Some(MemoryPlayer {
            clip,
            live: self.live.clone(),
        }))
    }
}

fn write_ding(path: &Path) {
    let spec = WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for i in 0..4410u32 {
        let t = i as f32 / 44100.0;
        let value = (t * 880.0 * std::f32::consts::TAU).sin() * 0.5;
        writer.write_sample((value * i16::MAX as f32) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

fn setup(with_notification: bool) -> (tempfile::TempDir, AppState<DecodingBackend>, Arc<AtomicUsize>) {
    let dir = tempfile::tempdir().unwrap();
    let sounds = dir.path().join("sounds");
    std::fs::create_dir_all(&sounds).unwrap();
    write_ding(&sounds.join("ding.wav"));
    std::fs::write(sounds.join("broken.wav"), b"not a wav file").unwrap();

    let notification = dir.path().join("notification.wav");
    if with_notification {
        write_ding(&notification);
    }

    let settings = SoundSettings {
        sounds_dir: Some(sounds),
        notification_sound: Some(notification),
        ..SoundSettings::default()
    };
    let library = SoundLibrary::from_settings(&settings, dir.path()).with_notification_candidates(vec![]);
    let live = Arc::new(AtomicUsize::new(0));
    let backend = DecodingBackend {
        library,
        live: live.clone(),
    };
    (dir, AppState::new(backend, settings), live)
}

#[test]
fn plays_bundled_ding() {
    let (_dir, state, live) = setup(true);
    assert_eq!(state.play_custom(None).unwrap(), "Custom sound played successfully");
    assert_eq!(state.controller.state(), ControllerState::Holding);
    assert_eq!(live.load(Ordering::SeqCst), 1);
}

#[test]
fn repeated_plays_keep_one_player() {
    let (_dir, state, live) = setup(true);
    for _ in 0..5 {
        state.controller.play_default_notification_sound().unwrap();
        state.play_custom(Some("ding")).unwrap();
        assert_eq!(live.load(Ordering::SeqCst), 1);
    }
    state.controller.release_current();
    state.controller.release_current();
    assert_eq!(live.load(Ordering::SeqCst), 0);
    assert_eq!(state.controller.state(), ControllerState::Idle);
}

#[test]
fn undecodable_sound_is_player_creation_failure() {
    let (_dir, state, live) = setup(true);
    state.play_custom(None).unwrap();

    assert_eq!(state.play_custom(Some("broken")), Err(SoundError::PlayerCreationFailed));
    assert_eq!(state.controller.state(), ControllerState::Idle);
    assert_eq!(live.load(Ordering::SeqCst), 0);
}

#[test]
fn unknown_sound_is_asset_not_found() {
    let (_dir, state, _live) = setup(true);
    assert_eq!(
        state.play_custom(Some("nonexistent")),
        Err(SoundError::AssetNotFound("nonexistent".to_string()))
    );
    assert_eq!(state.controller.state(), ControllerState::Idle);
}

#[test]
fn missing_notification_sound() {
    let (_dir, state, _live) = setup(false);
    assert_eq!(
        state.controller.play_default_notification_sound(),
        Err(SoundError::PlayerCreationFailed)
    );
    assert_eq!(state.controller.state(), ControllerState::Idle);
}
