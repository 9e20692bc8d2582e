//! # Snip - Audio Sample Slicer
//!
//! Load a sound file, cut it into equal slices, nudge each slice's bounds and
//! pitch, and trigger slices from the keyboard.
//!
//! ## Architecture
//!
//! Snip is an umbrella crate that coordinates:
//! - **snip-core** - Audio buffers, decoding, resampling, rate-based transposition
//! - **snip-sampler** - Slice table and single-slot slice playback
//!
//! On top of those it adds the session layer: configuration, key mapping,
//! file import and the line command grammar used by the `snip` binary.
//!
//! ## Quick Start
//!
//! ```ignore
//! use snip::prelude::*;
//!
//! let mut engine = SnipEngine::builder().build()?;
//! engine.load_file("amen.wav", 8)?;
//!
//! // Slice 1: end 50 ms later, three semitones up
//! engine.adjust(1, SliceAdjustment::new().end(50).pitch(3))?;
//! engine.press_key('a')?;
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - `output` and `mp3`
//! - `output` - Hardware playback via CPAL (required by the binary)
//! - `mp3` - MP3 decoding

/// Re-export of snip-core for direct access
pub use snip_core as core;
/// Re-export of snip-sampler for direct access
pub use snip_sampler as sampler;

pub use snip_core::{decode, transpose, AudioBuffer};
pub use snip_sampler::{
    PlaybackController, PlaybackDevice, PlaybackHandle, Slice, SliceAdjustment, SliceField,
    SliceTable, MAX_PITCH_SHIFT, MIN_PITCH_SHIFT,
};

#[cfg(feature = "output")]
pub use snip_sampler::{CpalDevice, CpalPlayback};

mod builder;
pub mod command;
mod config;
mod engine;
mod error;
mod import;
mod keymap;

pub use builder::SnipEngineBuilder;
pub use command::{Command, CommandError};
pub use config::{SnipConfig, DEFAULT_KEYMAP};
pub use engine::{SliceRow, SnipEngine};
pub use error::{Error, Result};
pub use import::import_file;
pub use keymap::KeyMap;

/// Common imports for slicing sessions.
pub mod prelude {
    pub use crate::{
        AudioBuffer, Error, KeyMap, PlaybackDevice, PlaybackHandle, Result, Slice,
        SliceAdjustment, SliceRow, SnipConfig, SnipEngine, SnipEngineBuilder,
    };

    #[cfg(feature = "output")]
    pub use crate::CpalDevice;
}
