//! Test helpers for snip integration tests.
//!
//! Provides a playback device that records instead of making sound and a
//! WAV writer for fixtures generated at test time.

#![allow(dead_code)]

use parking_lot::Mutex;
use snip::prelude::*;
use snip::sampler;
use std::path::Path;
use std::sync::Arc;

/// Something that happened on a [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Start {
        id: usize,
        frames: usize,
        sample_rate: u32,
    },
    Stop {
        id: usize,
    },
}

/// Playback device that logs starts and stops.
#[derive(Default, Clone)]
pub struct RecordingDevice {
    pub events: Arc<Mutex<Vec<Event>>>,
    /// PCM handed to the device, in start order.
    pub played: Arc<Mutex<Vec<AudioBuffer>>>,
}

pub struct RecordingHandle {
    id: usize,
    events: Arc<Mutex<Vec<Event>>>,
}

impl PlaybackDevice for RecordingDevice {
    type Handle = RecordingHandle;

    fn start(&self, pcm: &AudioBuffer) -> sampler::Result<RecordingHandle> {
        let mut played = self.played.lock();
        let id = played.len();
        played.push(pcm.clone());
        self.events.lock().push(Event::Start {
            id,
            frames: pcm.frames(),
            sample_rate: pcm.sample_rate(),
        });
        Ok(RecordingHandle {
            id,
            events: Arc::clone(&self.events),
        })
    }
}

impl PlaybackHandle for RecordingHandle {
    fn stop(self) {
        self.events.lock().push(Event::Stop { id: self.id });
    }
}

/// Generate a mono sine wave.
pub fn generate_sine(freq: f32, sample_rate: u32, frames: usize, amplitude: f32) -> Vec<f32> {
    (0..frames)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
        })
        .collect()
}

/// Write interleaved samples as 16-bit PCM.
pub fn save_wav_file_pcm16(path: &Path, samples: &[f32], channels: u16, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &sample in samples {
        writer
            .write_sample((sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}

/// Engine playing into a [`RecordingDevice`], importing into `upload_dir`.
pub fn test_engine(upload_dir: &Path) -> (SnipEngine<RecordingDevice>, RecordingDevice) {
    let device = RecordingDevice::default();
    let engine = SnipEngineBuilder::default()
        .upload_dir(upload_dir)
        .build_with_device(device.clone())
        .expect("Failed to create test engine");
    (engine, device)
}
