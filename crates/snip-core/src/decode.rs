//! Audio file decoding.
//!
//! WAV goes through hound. Everything else is probed by symphonia.

use crate::{AudioBuffer, Error, Result};
use hound::{SampleFormat, WavReader};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode a whole audio file into memory.
pub fn decode(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    let path = path.as_ref();

    let buffer = if is_wav_file(path) {
        decode_wav(path)?
    } else {
        decode_compressed(path)?
    };

    tracing::info!(
        path = %path.display(),
        channels = buffer.channels(),
        sample_rate = buffer.sample_rate(),
        length_ms = buffer.length_ms(),
        "decoded audio file"
    );

    Ok(buffer)
}

fn is_wav_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

fn decode_wav(path: &Path) -> Result<AudioBuffer> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(Error::UnsupportedFormat(format!(
                    "unsupported bit depth: {}",
                    spec.bits_per_sample
                )));
            }
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    AudioBuffer::new(samples, spec.channels, spec.sample_rate)
}

fn decode_compressed(path: &Path) -> Result<AudioBuffer> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::UnsupportedFormat("no audio track found".into()))?;
    let track_id = track.id;

    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count() as u16);

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                tracing::debug!("skipping undecodable packet: {msg}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        sample_rate.get_or_insert(spec.rate);
        channels.get_or_insert(spec.channels.count() as u16);

        let mut block = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        block.copy_interleaved_ref(decoded);
        samples.extend_from_slice(block.samples());
    }

    match (channels, sample_rate) {
        (Some(channels), Some(sample_rate)) => AudioBuffer::new(samples, channels, sample_rate),
        _ => Err(Error::Decode("stream carries no audio".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_wav(path: &Path, spec: WavSpec, frames: usize) {
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..frames * spec.channels as usize {
            match spec.sample_format {
                SampleFormat::Float => writer.write_sample(0.5f32).unwrap(),
                SampleFormat::Int => writer.write_sample((i % 2) as i16 * 16384).unwrap(),
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_decode_int16_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        write_wav(&path, spec, 2205);

        let buffer = decode(&path).unwrap();
        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.sample_rate(), 22050);
        assert_eq!(buffer.frames(), 2205);
        assert_eq!(buffer.length_ms(), 100);
        approx::assert_relative_eq!(buffer.samples()[1], 0.5);
        approx::assert_relative_eq!(buffer.samples()[0], 0.0);
    }

    #[test]
    fn test_decode_float_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.WAV");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        write_wav(&path, spec, 480);

        let buffer = decode(&path).unwrap();
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.length_ms(), 10);
        assert!(buffer.samples().iter().all(|&s| s == 0.5));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            decode(dir.path().join("missing.wav")),
            Err(Error::Io(_))
        ));
        assert!(matches!(
            decode(dir.path().join("missing.mp3")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_unknown_container_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.xyz");
        std::fs::write(&path, b"definitely not audio, just some text bytes").unwrap();

        assert!(matches!(decode(&path), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_wav_handled_by_symphonia_when_misnamed() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("clip.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        write_wav(&wav, spec, 800);

        let renamed = dir.path().join("clip.bin");
        std::fs::copy(&wav, &renamed).unwrap();

        let buffer = decode(&renamed).unwrap();
        assert_eq!(buffer.sample_rate(), 8000);
        assert_eq!(buffer.frames(), 800);
    }
}
