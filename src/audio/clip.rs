// Decoded sound clip
// A whole sound held in memory as interleaved f32 samples

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use super::decoder::AudioDecoder;
use super::resampler::Resampler;

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl DecodedClip {
    /// Decode a sound file completely.
    pub fn load(path: &Path) -> Result<Self> {
        AudioDecoder::open(path)?.decode_all()
    }

    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Map the clip onto `channels` output channels.
    ///
    /// Mono is copied to every output channel, anything folded down to mono is
    /// averaged, other layouts wrap source channels round-robin.
    pub fn remix(self, channels: u16) -> Self {
        if channels == self.channels || channels == 0 || self.channels == 0 {
            return self;
        }

        let src = self.channels as usize;
        let dst = channels as usize;
        let mut samples = Vec::with_capacity(self.frames() * dst);

        for frame in self.samples.chunks_exact(src) {
            if dst == 1 {
                samples.push(frame.iter().sum::<f32>() / src as f32);
            } else {
                samples.extend((0..dst).map(|ch| frame[ch % src]));
            }
        }

        Self {
            samples,
            sample_rate: self.sample_rate,
            channels,
        }
    }

    /// Convert to the layout an output device expects.
    pub fn prepare_for(self, sample_rate: u32, channels: u16) -> Result<Self> {
        let clip = self.remix(channels);
        let samples = Resampler::resample(&clip.samples, clip.sample_rate, sample_rate, clip.channels)?;
        Ok(Self {
            samples,
            sample_rate,
            channels: clip.channels,
        })
    }
}
