//! Audio resampling using rubato
//!
//! Converts a decoded clip to the output device's sample rate.

use anyhow::{anyhow, Result};
use rubato::{FastFixedIn, PolynomialDegree, Resampler as RubatoResampler};
use tracing::debug;

/// Whole-buffer sample rate conversion using rubato.
pub struct Resampler;

impl Resampler {
    /// Resample interleaved audio from `input_rate` to `output_rate`.
    ///
    /// Returns a copy when the rates already match.
    pub fn resample(input: &[f32], input_rate: u32, output_rate: u32, channels: u16) -> Result<Vec<f32>> {
        if input_rate == output_rate || input.is_empty() {
            return Ok(input.to_vec());
        }
        if channels == 0 || input_rate == 0 || output_rate == 0 {
            return Err(anyhow!(
                "Cannot resample {}Hz -> {}Hz with {} channels",
                input_rate,
                output_rate,
                channels
            ));
        }

        debug!(
            "Resampling from {}Hz to {}Hz ({} channels)",
            input_rate, output_rate, channels
        );

        // De-interleave samples for rubato (which expects planar format)
        let planar_input = Self::deinterleave(input, channels);
        let input_frames = planar_input[0].len();
        if input_frames == 0 {
            return Ok(Vec::new());
        }

        let mut resampler = FastFixedIn::<f32>::new(
            output_rate as f64 / input_rate as f64,
            1.0, // no runtime ratio changes
            PolynomialDegree::Septic,
            input_frames,
            channels as usize,
        )
        .map_err(|e| anyhow!("Failed to create resampler: {}", e))?;

        let planar_output = resampler
            .process(&planar_input, None)
            .map_err(|e| anyhow!("Resampling failed: {}", e))?;

        let interleaved = Self::interleave(planar_output);

        debug!(
            "Resampled {} input frames to {} output frames",
            input_frames,
            interleaved.len() / channels as usize
        );

        Ok(interleaved)
    }

    /// Convert interleaved samples to planar format.
    ///
    /// Input:  [L, R, L, R, ...]
    /// Output: [[L, L, ...], [R, R, ...]]
    fn deinterleave(samples: &[f32], channels: u16) -> Vec<Vec<f32>> {
        let num_channels = channels as usize;
        let num_frames = samples.len() / num_channels;

        let mut planar = vec![Vec::with_capacity(num_frames); num_channels];
        for frame in samples.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                planar[ch].push(sample);
            }
        }
        planar
    }

    /// Convert planar samples back to interleaved format.
    fn interleave(planar: Vec<Vec<f32>>) -> Vec<f32> {
        let num_frames = planar.iter().map(Vec::len).min().unwrap_or(0);
        let mut interleaved = Vec::with_capacity(num_frames * planar.len());
        for frame in 0..num_frames {
            for channel in &planar {
                interleaved.push(channel[frame]);
            }
        }
        interleaved
    }
}
