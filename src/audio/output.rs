// Audio output using cpal
// One output stream per player, owned by a dedicated voice thread

use anyhow::{anyhow, bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use ringbuf::{
    traits::{Consumer, Observer, Producer, Split},
    HeapRb,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

use super::clip::DecodedClip;
use crate::assets::SoundLibrary;
use crate::sound::{PlaybackHandle, SoundBackend, SoundSource};

type RingConsumer = ringbuf::HeapCons<f32>;

/// Plays sounds on the default output device.
pub struct CpalBackend {
    library: SoundLibrary,
}

impl CpalBackend {
    pub fn new(library: SoundLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &SoundLibrary {
        &self.library
    }
}

impl SoundBackend for CpalBackend {
    type Handle = CpalPlayer;

    fn default_notification_source(&self) -> Result<Option<SoundSource>> {
        Ok(self.library.default_notification())
    }

    fn bundled_source(&self, name: &str) -> Result<Option<SoundSource>> {
        Ok(self.library.bundled(name))
    }

    fn create_player(&self, source: &SoundSource) -> Result<Option<CpalPlayer>> {
        let clip = match DecodedClip::load(&source.path) {
            Ok(clip) => clip,
            Err(e) => {
                warn!("Could not decode {}: {:#}", source, e);
                return Ok(None);
            }
        };
        CpalPlayer::open(clip)
    }
}

enum VoiceCommand {
    Start(SyncSender<Result<(), String>>),
    Release,
}

/// A loaded sound waiting on, or playing through, its own output stream.
///
/// `cpal::Stream` cannot leave the thread that built it, so the stream lives
/// on a voice thread and this handle drives it over a channel.
pub struct CpalPlayer {
    control: Sender<VoiceCommand>,
    worker: Option<JoinHandle<()>>,
    finished: Arc<AtomicBool>,
}

impl CpalPlayer {
    /// Build a paused stream for `clip`. `Ok(None)` when the device refuses.
    fn open(clip: DecodedClip) -> Result<Option<Self>> {
        let finished = Arc::new(AtomicBool::new(false));
        let finished_flag = finished.clone();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), String>>(1);
        let (control_tx, control_rx) = mpsc::channel::<VoiceCommand>();

        let worker = thread::Builder::new()
            .name("chime-voice".to_string())
            .spawn(move || {
                let stream = match open_stream(clip, finished_flag) {
                    Ok(stream) => stream,
                    Err(e) => {
                        let _ = ready_tx.send(Err(format!("{:#}", e)));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                run_voice(stream, control_rx);
            })
            .context("Failed to spawn voice thread")?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Some(Self {
                control: control_tx,
                worker: Some(worker),
                finished,
            })),
            Ok(Err(message)) => {
                warn!("Could not open audio output: {}", message);
                let _ = worker.join();
                Ok(None)
            }
            Err(_) => {
                let _ = worker.join();
                bail!("Voice thread exited before opening the output stream")
            }
        }
    }

    fn shutdown(&mut self) -> Result<()> {
        if let Some(worker) = self.worker.take() {
            let _ = self.control.send(VoiceCommand::Release);
            worker.join().map_err(|_| anyhow!("Voice thread panicked"))?;
        }
        Ok(())
    }
}

impl PlaybackHandle for CpalPlayer {
    fn start(&mut self) -> Result<()> {
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        self.control
            .send(VoiceCommand::Start(reply_tx))
            .map_err(|_| anyhow!("Voice thread is gone"))?;
        reply_rx
            .recv()
            .context("Voice thread did not answer")?
            .map_err(anyhow::Error::msg)
    }

    fn release(mut self) -> Result<()> {
        self.shutdown()
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

impl Drop for CpalPlayer {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("Failed to shut down voice: {:#}", e);
        }
    }
}

fn run_voice(stream: Stream, commands: Receiver<VoiceCommand>) {
    while let Ok(command) = commands.recv() {
        match command {
            VoiceCommand::Start(reply) => {
                let result = stream.play().map_err(|e| format!("Failed to start stream: {}", e));
                let _ = reply.send(result);
            }
            VoiceCommand::Release => break,
        }
    }
    if let Err(e) = stream.pause() {
        debug!("Failed to pause stream on release: {}", e);
    }
}

/// Open the default device and load `clip` into a paused stream.
fn open_stream(clip: DecodedClip, finished: Arc<AtomicBool>) -> Result<Stream> {
    let host = cpal::default_host();

    let device = host.default_output_device().context("No output device available")?;

    let config = device
        .default_output_config()
        .context("Failed to get default output config")?;

    let sample_format = config.sample_format();
    let stream_config: StreamConfig = config.into();

    let clip = clip.prepare_for(stream_config.sample_rate.0, stream_config.channels)?;
    debug!(
        "Loaded {:?} of audio for {}Hz x{}",
        clip.duration(),
        clip.sample_rate,
        clip.channels
    );

    // The whole clip fits in the buffer, so the producer side is done after this
    let rb = HeapRb::<f32>::new(clip.samples.len().max(1));
    let (mut producer, consumer) = rb.split();
    producer.push_slice(&clip.samples);

    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, consumer, finished)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, consumer, finished)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, consumer, finished)?,
        format => bail!("Unsupported sample format: {:?}", format),
    };

    Ok(stream)
}

fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut consumer: RingConsumer,
    finished: Arc<AtomicBool>,
) -> Result<Stream> {
    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for sample in data.iter_mut() {
                    let value = consumer.try_pop().unwrap_or(0.0);
                    *sample = T::from_sample(value);
                }
                if consumer.is_empty() {
                    finished.store(true, Ordering::SeqCst);
                }
            },
            move |err| {
                warn!("Audio output error: {}", err);
            },
            None,
        )
        .context("Failed to build output stream")?;

    // Streams may start running as soon as they are built on some hosts
    let _ = stream.pause();
    Ok(stream)
}
