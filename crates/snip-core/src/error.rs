//! Error types for snip-core.

use std::io;
use thiserror::Error;

/// Error type for buffer, decode and resample operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading an audio file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Container or codec not recognised.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Stream recognised but could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Sample rate conversion failed.
    #[error("Resampling error: {0}")]
    Resample(String),

    /// Buffer layout is inconsistent (zero channels, zero rate, ragged frames).
    #[error("Invalid audio buffer: {0}")]
    InvalidBuffer(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

// External library errors are flattened to strings at the API boundary

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => Error::Io(io),
            hound::Error::FormatError(msg) => Error::UnsupportedFormat(msg.to_string()),
            hound::Error::Unsupported => Error::UnsupportedFormat("unsupported WAV layout".into()),
            other => Error::Decode(other.to_string()),
        }
    }
}

impl From<symphonia::core::errors::Error> for Error {
    fn from(e: symphonia::core::errors::Error) -> Self {
        use symphonia::core::errors::Error as SymphoniaError;
        match e {
            SymphoniaError::IoError(io) => Error::Io(io),
            SymphoniaError::Unsupported(what) => Error::UnsupportedFormat(what.to_string()),
            other => Error::Decode(other.to_string()),
        }
    }
}

impl From<rubato::ResamplerConstructionError> for Error {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        Error::Resample(e.to_string())
    }
}

impl From<rubato::ResampleError> for Error {
    fn from(e: rubato::ResampleError) -> Self {
        Error::Resample(e.to_string())
    }
}
