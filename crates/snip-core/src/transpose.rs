//! Rate-based transposition.
//!
//! Pitch moves by reinterpreting the excerpt at `rate * 2^(semitones/12)` and
//! converting back to the original nominal rate. Duration scales by
//! `2^(-semitones/12)`; there is no time-stretching.

use crate::{AudioBuffer, Result};

/// Rate at which a buffer must be reinterpreted to sound `semitones` higher.
pub fn transposed_rate(sample_rate: u32, semitones: i32) -> u32 {
    let ratio = 2f64.powf(semitones as f64 / 12.0);
    (sample_rate as f64 * ratio).round().max(1.0) as u32
}

/// Transpose a buffer, returning audio at the original nominal rate.
pub fn transpose(buffer: &AudioBuffer, semitones: i32) -> Result<AudioBuffer> {
    if semitones == 0 {
        return Ok(buffer.clone());
    }

    let rate = buffer.sample_rate();
    let shifted_rate = transposed_rate(rate, semitones);
    tracing::debug!(semitones, rate, shifted_rate, "transposing excerpt");

    buffer.with_sample_rate(shifted_rate)?.resample(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f32, sample_rate: u32, frames: usize) -> AudioBuffer {
        let samples = (0..frames)
            .map(|i| (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32).sin())
            .collect();
        AudioBuffer::new(samples, 1, sample_rate).unwrap()
    }

    fn rising_crossings(samples: &[f32]) -> usize {
        samples
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count()
    }

    #[test]
    fn test_transposed_rate() {
        assert_eq!(transposed_rate(44100, 0), 44100);
        assert_eq!(transposed_rate(44100, 12), 88200);
        assert_eq!(transposed_rate(44100, -12), 22050);
        assert_eq!(transposed_rate(44100, 24), 176400);
        assert_eq!(transposed_rate(44100, 1), 46722);
        assert_eq!(transposed_rate(44100, 7), 66075);
        assert_eq!(transposed_rate(48000, -1), 45306);
    }

    #[test]
    fn test_zero_semitones_is_unchanged() {
        let buffer = sine(440.0, 8000, 800);
        assert_eq!(transpose(&buffer, 0).unwrap(), buffer);
    }

    #[test]
    fn test_octave_up_halves_duration_and_doubles_frequency() {
        let buffer = sine(250.0, 8000, 8000);
        let up = transpose(&buffer, 12).unwrap();

        assert_eq!(up.sample_rate(), 8000);
        assert_eq!(up.frames(), 4000);

        // 0.375 s at 500 Hz
        let crossings = rising_crossings(&up.samples()[500..3500]);
        assert!(
            (177..=198).contains(&crossings),
            "expected ~187 cycles, got {crossings}"
        );
    }

    #[test]
    fn test_octave_down_doubles_duration() {
        let buffer = sine(250.0, 8000, 8000);
        let down = transpose(&buffer, -12).unwrap();

        assert_eq!(down.sample_rate(), 8000);
        assert_eq!(down.frames(), 16000);

        // 1.5 s at 125 Hz
        let crossings = rising_crossings(&down.samples()[2000..14000]);
        assert!(
            (178..=197).contains(&crossings),
            "expected ~187 cycles, got {crossings}"
        );
    }

    #[test]
    fn test_octave_up_moves_step_to_half_time() {
        let samples = (0..8000).map(|i| if i < 4000 { 0.0 } else { 1.0 }).collect();
        let buffer = AudioBuffer::new(samples, 1, 8000).unwrap();
        let up = transpose(&buffer, 12).unwrap();

        let onset = up.samples().iter().position(|&s| s >= 0.5).unwrap();
        assert!((1999..=2001).contains(&onset), "step at {onset}");
    }

    #[test]
    fn test_source_buffer_untouched() {
        let buffer = sine(250.0, 8000, 1000);
        let before = buffer.samples().to_vec();
        let _ = transpose(&buffer, 5).unwrap();
        assert_eq!(buffer.samples(), before.as_slice());
        assert_eq!(buffer.sample_rate(), 8000);
    }
}
