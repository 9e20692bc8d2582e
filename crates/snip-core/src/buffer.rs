//! Decoded PCM audio held in memory.

use crate::resample::{resample_planar, ResampleQuality};
use crate::{Error, Result};
use std::sync::Arc;

/// Fixed-length interleaved PCM with a nominal sample rate.
///
/// Sample storage is shared, so clones and [`with_sample_rate`](Self::with_sample_rate)
/// are cheap. Every operation returns a new buffer; the samples of an existing
/// buffer are never modified.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    samples: Arc<[f32]>,
    channels: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer from interleaved samples.
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidBuffer("channel count must be at least 1".into()));
        }
        if sample_rate == 0 {
            return Err(Error::InvalidBuffer("sample rate must be non-zero".into()));
        }
        if samples.len() % channels as usize != 0 {
            return Err(Error::InvalidBuffer(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }

        Ok(Self {
            samples: samples.into(),
            channels,
            sample_rate,
        })
    }

    /// Create a buffer from one `Vec` per channel. All channels must have equal length.
    pub fn from_planar(channels: &[Vec<f32>], sample_rate: u32) -> Result<Self> {
        let count = u16::try_from(channels.len())
            .map_err(|_| Error::InvalidBuffer(format!("too many channels: {}", channels.len())))?;
        let frames = channels.first().map(Vec::len).unwrap_or(0);
        if channels.iter().any(|ch| ch.len() != frames) {
            return Err(Error::InvalidBuffer(
                "planar channels have different lengths".into(),
            ));
        }

        let mut samples = Vec::with_capacity(frames * channels.len());
        for frame in 0..frames {
            samples.extend(channels.iter().map(|ch| ch[frame]));
        }
        Self::new(samples, count, sample_rate)
    }

    /// Silent buffer of the given frame count.
    pub fn silence(channels: u16, sample_rate: u32, frames: usize) -> Result<Self> {
        Self::new(vec![0.0; frames * channels as usize], channels, sample_rate)
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Nominal sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Duration in whole milliseconds, rounded to nearest.
    pub fn length_ms(&self) -> u64 {
        let frames = self.frames() as u64;
        let rate = self.sample_rate as u64;
        (frames * 1000 + rate / 2) / rate
    }

    /// Frame offset of a millisecond position, clamped to the buffer end.
    pub fn frame_at_ms(&self, ms: u64) -> usize {
        let frame = ms.saturating_mul(self.sample_rate as u64) / 1000;
        usize::try_from(frame)
            .unwrap_or(usize::MAX)
            .min(self.frames())
    }

    /// Copy of the `[start_ms, end_ms)` window. Positions past the end are clamped.
    pub fn subrange(&self, start_ms: u64, end_ms: u64) -> AudioBuffer {
        let start = self.frame_at_ms(start_ms);
        let end = self.frame_at_ms(end_ms).max(start);
        let ch = self.channels as usize;

        Self {
            samples: self.samples[start * ch..end * ch].into(),
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }

    /// Same samples, reinterpreted at a different nominal rate.
    ///
    /// Playing the result changes both speed and pitch.
    pub fn with_sample_rate(&self, sample_rate: u32) -> Result<AudioBuffer> {
        if sample_rate == 0 {
            return Err(Error::InvalidBuffer("sample rate must be non-zero".into()));
        }
        Ok(Self {
            samples: Arc::clone(&self.samples),
            channels: self.channels,
            sample_rate,
        })
    }

    /// Convert to a new sample rate with the default quality.
    pub fn resample(&self, target_rate: u32) -> Result<AudioBuffer> {
        self.resample_with_quality(target_rate, ResampleQuality::default())
    }

    /// Convert to a new sample rate.
    ///
    /// Output length is `ceil(frames * target / source)` frames.
    pub fn resample_with_quality(
        &self,
        target_rate: u32,
        quality: ResampleQuality,
    ) -> Result<AudioBuffer> {
        if target_rate == self.sample_rate {
            return Ok(self.clone());
        }
        if target_rate == 0 {
            return Err(Error::InvalidBuffer("sample rate must be non-zero".into()));
        }

        let planar = self.to_planar();
        let converted = resample_planar(&planar, self.sample_rate, target_rate, quality)?;
        Self::from_planar(&converted, target_rate)
    }

    /// Deinterleaved copy of one channel.
    pub fn channel(&self, index: usize) -> Vec<f32> {
        let ch = self.channels as usize;
        if index >= ch {
            return Vec::new();
        }
        self.samples.iter().skip(index).step_by(ch).copied().collect()
    }

    /// Deinterleaved copy of all channels.
    pub fn to_planar(&self) -> Vec<Vec<f32>> {
        (0..self.channels as usize).map(|i| self.channel(i)).collect()
    }
}
