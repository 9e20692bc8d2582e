//! Audio primitives for the snip slicer.
//!
//! # Primary API
//!
//! - [`AudioBuffer`]: immutable decoded PCM with a nominal sample rate
//! - [`decode`]: load a WAV/MP3/FLAC/OGG file into an [`AudioBuffer`]
//! - [`transpose`]: rate-based pitch shift (speed changes with pitch)
//! - [`resample_planar`]: band-limited sample rate conversion
//!
//! # Example
//!
//! ```ignore
//! use snip_core::{decode, transpose};
//!
//! let buffer = decode("loop.wav")?;
//! let excerpt = buffer.subrange(0, 500);
//! let higher = transpose(&excerpt, 7)?;
//! ```

pub mod error;
pub use error::{Error, Result};

mod buffer;
pub use buffer::AudioBuffer;

pub mod decode;
pub use decode::decode;

pub mod resample;
pub use resample::{resample_planar, ResampleQuality};

pub mod transpose;
pub use transpose::{transpose, transposed_rate};
