//! Audio resampling using rubato
//!
//! Band-limited sample rate conversion for any channel count.

use crate::{Error, Result};
use rubato::{FftFixedIn, Resampler};

/// Resampling quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleQuality {
    /// Fast resampling (lower quality)
    Fast,
    /// Balanced quality/speed (default)
    #[default]
    Medium,
    /// High quality
    High,
}

impl ResampleQuality {
    fn chunk_size(&self) -> usize {
        match self {
            ResampleQuality::Fast => 512,
            ResampleQuality::Medium => 1024,
            ResampleQuality::High => 2048,
        }
    }

    fn sub_chunks(&self) -> usize {
        match self {
            ResampleQuality::Fast => 1,
            ResampleQuality::Medium => 2,
            ResampleQuality::High => 4,
        }
    }
}

/// Resample planar audio from `source_rate` to `target_rate`.
///
/// Every output channel holds exactly `ceil(frames * target / source)` frames,
/// aligned with the input (resampler latency is trimmed from the front).
pub fn resample_planar(
    channels: &[Vec<f32>],
    source_rate: u32,
    target_rate: u32,
    quality: ResampleQuality,
) -> Result<Vec<Vec<f32>>> {
    if source_rate == target_rate {
        return Ok(channels.to_vec());
    }
    if source_rate == 0 || target_rate == 0 {
        return Err(Error::Resample(format!(
            "invalid rate conversion {source_rate} -> {target_rate}"
        )));
    }
    if channels.is_empty() {
        return Ok(Vec::new());
    }

    let input_frames = channels[0].len();
    if channels.iter().any(|ch| ch.len() != input_frames) {
        return Err(Error::InvalidBuffer(
            "channels have different lengths".into(),
        ));
    }

    let expected_output_frames = output_frames(input_frames, source_rate, target_rate);
    if input_frames == 0 {
        return Ok(vec![Vec::new(); channels.len()]);
    }

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        target_rate as usize,
        quality.chunk_size(),
        quality.sub_chunks(),
        channels.len(),
    )?;

    let delay = resampler.output_delay();
    let wanted = expected_output_frames + delay;
    let mut output: Vec<Vec<f32>> = channels
        .iter()
        .map(|_| Vec::with_capacity(wanted))
        .collect();

    // Feed whole chunks, zero-padding the tail, until the delayed output covers the input
    let mut pos = 0;
    while pos < input_frames || output[0].len() < wanted {
        let needed = resampler.input_frames_next();
        let take = needed.min(input_frames.saturating_sub(pos));

        let chunk: Vec<Vec<f32>> = channels
            .iter()
            .map(|ch| {
                let mut buf = vec![0.0f32; needed];
                buf[..take].copy_from_slice(&ch[pos..pos + take]);
                buf
            })
            .collect();

        let processed = resampler.process(&chunk, None)?;
        for (out, block) in output.iter_mut().zip(processed) {
            out.extend_from_slice(&block);
        }

        pos += take;
    }

    for out in output.iter_mut() {
        out.drain(..delay.min(out.len()));
        out.truncate(expected_output_frames);
    }

    Ok(output)
}

/// Frame count produced when converting `frames` from `source_rate` to `target_rate`.
pub fn output_frames(frames: usize, source_rate: u32, target_rate: u32) -> usize {
    if source_rate == 0 {
        return 0;
    }
    let numerator = frames as u128 * target_rate as u128;
    numerator.div_ceil(source_rate as u128) as usize
}
