// Audio decoder using Symphonia
// Decodes sound files to raw PCM samples

use anyhow::{anyhow, Context, Result};
use symphonia::core::audio::{AudioBufferRef, AudioPlanes, Signal};
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

use super::clip::DecodedClip;

pub struct AudioDecoder {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    sample_rate: u32,
    channels: usize,
}

impl AudioDecoder {
    /// Open an audio file and prepare for decoding
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open sound file {:?}", path))?;

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create a hint using the file extension
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .context("Failed to probe file format")?;

        let format = probed.format;

        // Find the first audio track
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| anyhow!("No audio track found"))?;

        let track_id = track.id;
        let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
        let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(2);

        let decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .context("Failed to create decoder")?;

        Ok(Self {
            format,
            decoder,
            track_id,
            sample_rate,
            channels,
        })
    }

    /// Decode next packet, returns interleaved f32 samples
    /// Returns None when end of stream is reached
    pub fn decode_next(&mut self) -> Result<Option<Vec<f32>>> {
        loop {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    return Ok(None);
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(anyhow!("Failed to read packet: {}", e)),
            };

            // Skip packets from other tracks
            if packet.track_id() != self.track_id {
                continue;
            }

            match self.decoder.decode(&packet) {
                Ok(decoded) => {
                    // Trust the decoded layout over what the container advertised
                    let spec = decoded.spec();
                    self.channels = spec.channels.count();
                    self.sample_rate = spec.rate;
                    return Ok(Some(Self::audio_buf_to_f32(&decoded)));
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    warn!("Decode error (skipping): {}", e);
                    continue;
                }
                Err(e) => return Err(anyhow!("Decode failed: {}", e)),
            }
        }
    }

    /// Decode the whole stream into memory. Notification sounds are short.
    pub fn decode_all(mut self) -> Result<DecodedClip> {
        let mut samples = Vec::new();
        while let Some(chunk) = self.decode_next()? {
            samples.extend_from_slice(&chunk);
        }

        if samples.is_empty() {
            return Err(anyhow!("Sound contains no audio samples"));
        }

        let channels = u16::try_from(self.channels).context("Too many channels")?;
        debug!(
            "Decoded {} frames at {}Hz ({} channels)",
            samples.len() / self.channels.max(1),
            self.sample_rate,
            channels
        );

        Ok(DecodedClip {
            samples,
            sample_rate: self.sample_rate,
            channels,
        })
    }

    /// Convert any AudioBufferRef to interleaved f32 samples
    fn audio_buf_to_f32(buf: &AudioBufferRef) -> Vec<f32> {
        match buf {
            AudioBufferRef::F32(b) => Self::interleave_convert(b.planes(), b.frames(), |s: f32| s),
            AudioBufferRef::F64(b) => Self::interleave_convert(b.planes(), b.frames(), |s: f64| s as f32),
            AudioBufferRef::S8(b) => {
                let scale = 1.0 / 128.0;
                Self::interleave_convert(b.planes(), b.frames(), |s: i8| s as f32 * scale)
            }
            AudioBufferRef::S16(b) => {
                let scale = 1.0 / 32768.0;
                Self::interleave_convert(b.planes(), b.frames(), |s: i16| s as f32 * scale)
            }
            AudioBufferRef::S24(b) => {
                let scale = 1.0 / 8388608.0;
                Self::interleave_convert(b.planes(), b.frames(), |s| s.inner() as f32 * scale)
            }
            AudioBufferRef::S32(b) => {
                let scale = 1.0 / 2147483648.0;
                Self::interleave_convert(b.planes(), b.frames(), |s: i32| s as f32 * scale)
            }
            AudioBufferRef::U8(b) => {
                Self::interleave_convert(b.planes(), b.frames(), |s: u8| (s as f32 - 128.0) / 128.0)
            }
            AudioBufferRef::U16(b) => {
                Self::interleave_convert(b.planes(), b.frames(), |s: u16| (s as f32 - 32768.0) / 32768.0)
            }
            AudioBufferRef::U24(b) => {
                Self::interleave_convert(b.planes(), b.frames(), |s| (s.inner() as f32 - 8388608.0) / 8388608.0)
            }
            AudioBufferRef::U32(b) => Self::interleave_convert(b.planes(), b.frames(), |s: u32| {
                (s as f64 - 2147483648.0) as f32 / 2147483648.0
            }),
        }
    }

    fn interleave_convert<T: Sample + Copy, F: Fn(T) -> f32>(
        planes: AudioPlanes<T>,
        frames: usize,
        convert: F,
    ) -> Vec<f32> {
        let num_channels = planes.planes().len();
        if num_channels == 0 || frames == 0 {
            return vec![];
        }

        let mut interleaved = Vec::with_capacity(frames * num_channels);

        for frame in 0..frames {
            for ch in 0..num_channels {
                interleaved.push(convert(planes.planes()[ch][frame]));
            }
        }

        interleaved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};

    fn write_wav(path: &Path, channels: u16, sample_rate: u32, frames: u32) {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..frames * channels as u32 {
            let value = if i % 2 == 0 { 16384i16 } else { -16384i16 };
            writer.write_sample(value).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_decodes_whole_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ding.wav");
        write_wav(&path, 2, 22050, 2205);

        let clip = AudioDecoder::open(&path).unwrap().decode_all().unwrap();
        assert_eq!(clip.sample_rate, 22050);
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.frames(), 2205);
        assert!((clip.samples[0] - 0.5).abs() < 1e-3);
        assert!((clip.samples[1] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_mono_layout_comes_from_decoded_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chirp.wav");
        write_wav(&path, 1, 8000, 800);

        let clip = AudioDecoder::open(&path).unwrap().decode_all().unwrap();
        assert_eq!(clip.channels, 1);
        assert_eq!(clip.sample_rate, 8000);
        assert_eq!(clip.frames(), 800);
        assert_eq!(clip.samples.len(), 800);
    }

    #[test]
    fn test_missing_file() {
        let err = AudioDecoder::open(Path::new("/no/such/ding.wav")).err().unwrap();
        assert!(format!("{:#}", err).contains("Failed to open sound file"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ding.wav");
        std::fs::write(&path, b"this is not audio at all").unwrap();
        assert!(AudioDecoder::open(&path).is_err());
    }

    #[test]
    fn test_empty_wav_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        write_wav(&path, 1, 44100, 0);
        let result = AudioDecoder::open(&path).and_then(AudioDecoder::decode_all);
        assert!(result.is_err());
    }
}
