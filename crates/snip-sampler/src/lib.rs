//! Slice bookkeeping and slice playback.
//!
//! # Features
//!
//! - **Slice table**: even initial partition, delta-based adjustment with
//!   validate-then-commit semantics
//! - **Playback**: one slice at a time, new playback preempts the previous one
//! - **CPAL output** (`output` feature): hardware playback device
//!
//! # Example
//!
//! ```ignore
//! use snip_sampler::{CpalDevice, PlaybackController, SliceAdjustment, SliceTable};
//!
//! let buffer = snip_core::decode("break.wav")?;
//! let mut table = SliceTable::new(buffer, 8)?;
//! table.adjust_slice(0, SliceAdjustment::new().end(50).pitch(3))?;
//!
//! let player = PlaybackController::new(CpalDevice::default());
//! player.play(&table, 0)?;
//! ```

// Error types
pub mod error;
pub use error::{Error, Result};

mod slice;
pub use slice::{Slice, SliceAdjustment, SliceField, MAX_PITCH_SHIFT, MIN_PITCH_SHIFT};

mod table;
pub use table::SliceTable;

pub mod playback;
pub use playback::{PlaybackController, PlaybackDevice, PlaybackHandle};

#[cfg(feature = "output")]
mod output;
#[cfg(feature = "output")]
pub use output::{CpalDevice, CpalPlayback};
