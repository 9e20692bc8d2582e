//! Error types.

use crate::slice::SliceField;
use thiserror::Error;

/// Error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Audio buffer, decode or resample failure.
    #[error(transparent)]
    Core(#[from] snip_core::Error),

    /// Slice count below 1 at table creation.
    #[error("Invalid slice count: {0}. Must be at least 1")]
    InvalidSliceCount(usize),

    /// Slice index outside `[0, len)`.
    #[error("Slice index {index} out of range ({len} slices)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Adjusted start, end or pitch falls outside its allowed range.
    #[error("{field} is out of range. Must be between {min} and {max}{}.", .field.unit())]
    OutOfRange {
        field: SliceField,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Adjusted start exceeds adjusted end.
    #[error("Start ({start} ms) must be less than or equal to end ({end} ms).")]
    InvalidOrder { start: i64, end: i64 },

    /// The playback device rejected the PCM.
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Nothing to play.
    #[error("Empty audio buffer")]
    EmptyBuffer,

    /// Output device not found.
    #[error("Audio device not found: {0}")]
    DeviceNotFound(String),

    /// Unsupported device sample format.
    #[error("Unsupported device sample format: {0}")]
    UnsupportedSampleFormat(String),

    /// Failed to enumerate devices.
    #[cfg(feature = "output")]
    #[error("Failed to enumerate audio devices")]
    DevicesError(#[from] cpal::DevicesError),

    /// Failed to get device name.
    #[cfg(feature = "output")]
    #[error("Failed to get audio device name")]
    DeviceNameError(#[from] cpal::DeviceNameError),

    /// Failed to get device config.
    #[cfg(feature = "output")]
    #[error("Failed to get audio device config")]
    DeviceConfigError(#[from] cpal::DefaultStreamConfigError),

    /// Failed to build stream.
    #[cfg(feature = "output")]
    #[error("Failed to build audio stream")]
    BuildStreamError(#[from] cpal::BuildStreamError),

    /// Failed to play stream.
    #[cfg(feature = "output")]
    #[error("Failed to play audio stream")]
    PlayStreamError(#[from] cpal::PlayStreamError),
}

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;
