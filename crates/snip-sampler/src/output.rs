//! CPAL playback device.

use crate::playback::{PlaybackDevice, PlaybackHandle};
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use snip_core::AudioBuffer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Plays PCM on a CPAL output device, one stream per playback.
///
/// PCM is converted to the device's default rate and spread over its
/// channels (mono is duplicated, extra outputs take the last source channel).
#[derive(Debug, Clone, Default)]
pub struct CpalDevice {
    device_index: Option<usize>,
}

impl CpalDevice {
    /// Use the output device at `index` in [`list_devices`](Self::list_devices),
    /// or the host default when `None`.
    pub fn new(device_index: Option<usize>) -> Self {
        Self { device_index }
    }

    /// List available output devices.
    pub fn list_devices() -> Result<Vec<String>> {
        cpal::default_host()
            .output_devices()?
            .enumerate()
            .map(|(i, d)| Ok(format!("{i}: {}", d.name()?)))
            .collect()
    }

    /// Name of the selected output device.
    pub fn device_name(&self) -> Result<String> {
        Ok(get_device(self.device_index)?.name()?)
    }
}

impl PlaybackDevice for CpalDevice {
    type Handle = CpalPlayback;

    fn start(&self, pcm: &AudioBuffer) -> Result<CpalPlayback> {
        if pcm.is_empty() {
            return Err(Error::EmptyBuffer);
        }

        let device = get_device(self.device_index)?;
        let config = device.default_output_config()?;
        let device_rate = config.sample_rate().0;

        let pcm = pcm.resample(device_rate)?;
        let finished = Arc::new(AtomicBool::new(false));

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config.into(), pcm, Arc::clone(&finished))?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config.into(), pcm, Arc::clone(&finished))?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config.into(), pcm, Arc::clone(&finished))?
            }
            format => return Err(Error::UnsupportedSampleFormat(format!("{format:?}"))),
        };

        stream.play()?;

        Ok(CpalPlayback {
            stream: StreamHandle(stream),
            finished,
        })
    }
}

/// Wrapper to hold `cpal::Stream` in a `Send` context.
///
/// # Safety
/// `cpal::Stream` is `!Send` due to platform internals. The stream is only
/// paused and dropped, never shared, and on the supported hosts (ALSA,
/// CoreAudio, WASAPI) a stream may be dropped on a thread other than the
/// one that built it.
struct StreamHandle(cpal::Stream);

unsafe impl Send for StreamHandle {}

/// A running CPAL stream. Dropping or stopping it ends playback.
pub struct CpalPlayback {
    stream: StreamHandle,
    finished: Arc<AtomicBool>,
}

impl PlaybackHandle for CpalPlayback {
    fn stop(self) {
        if let Err(e) = self.stream.0.pause() {
            tracing::debug!("pause before drop failed: {e}");
        }
    }

    fn is_playing(&self) -> bool {
        !self.finished.load(Ordering::Acquire)
    }
}

fn get_device(index: Option<usize>) -> Result<cpal::Device> {
    let host = cpal::default_host();

    match index {
        Some(i) => {
            let devices: Vec<_> = host.output_devices()?.collect();
            let count = devices.len();
            devices.into_iter().nth(i).ok_or_else(|| {
                Error::DeviceNotFound(format!("Device index {i} out of range ({count} available)"))
            })
        }
        None => host
            .default_output_device()
            .ok_or_else(|| Error::DeviceNotFound("No output device available".into())),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    pcm: AudioBuffer,
    finished: Arc<AtomicBool>,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let out_channels = config.channels as usize;
    let src_channels = pcm.channels() as usize;
    let mut position = 0usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let samples = pcm.samples();
            if fill_frames(data, samples, src_channels, out_channels, &mut position) {
                finished.store(true, Ordering::Release);
            }
        },
        |err| tracing::warn!("audio stream error: {err}"),
        None,
    )?;

    Ok(stream)
}

/// Fill one output block from interleaved `samples`, starting at frame `position`.
///
/// Output channels beyond the source take the last source channel, so mono
/// is duplicated. Frames past the end are silent. Returns `true` once every
/// source frame has been written.
fn fill_frames<T>(
    data: &mut [T],
    samples: &[f32],
    src_channels: usize,
    out_channels: usize,
    position: &mut usize,
) -> bool
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let total_frames = samples.len() / src_channels;

    for frame in data.chunks_mut(out_channels) {
        if *position >= total_frames {
            output_silence(frame);
            continue;
        }
        let base = *position * src_channels;
        for (ch, sample) in frame.iter_mut().enumerate() {
            let src = ch.min(src_channels - 1);
            *sample = T::from_sample(samples[base + src]);
        }
        *position += 1;
    }

    *position >= total_frames
}

/// Output silence after the end of the PCM.
#[inline]
fn output_silence<T: cpal::SizedSample + cpal::FromSample<f32>>(data: &mut [T]) {
    for sample in data.iter_mut() {
        *sample = T::from_sample(0.0);
    }
}
