//! Slice records and adjustment requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest allowed pitch shift (-2 octaves).
pub const MIN_PITCH_SHIFT: i32 = -24;
/// Highest allowed pitch shift (+2 octaves).
pub const MAX_PITCH_SHIFT: i32 = 24;

/// A time window over the loaded audio plus a pitch offset.
///
/// Always `start_ms <= end_ms <= buffer length` and
/// `MIN_PITCH_SHIFT <= pitch_shift <= MAX_PITCH_SHIFT`. Different slices may
/// overlap after adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slice {
    pub start_ms: u64,
    pub end_ms: u64,
    /// Semitones.
    pub pitch_shift: i32,
}

impl Slice {
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        Self {
            start_ms,
            end_ms,
            pitch_shift: 0,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Signed deltas applied to one slice. `None` leaves the field unchanged.
///
/// # Example
/// ```ignore
/// table.adjust_slice(0, SliceAdjustment::new().end(50).pitch(3))?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceAdjustment {
    pub start_delta: Option<i64>,
    pub end_delta: Option<i64>,
    pub pitch_delta: Option<i32>,
}

impl SliceAdjustment {
    /// An adjustment that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the start by `delta_ms`.
    pub fn start(mut self, delta_ms: i64) -> Self {
        self.start_delta = Some(delta_ms);
        self
    }

    /// Move the end by `delta_ms`.
    pub fn end(mut self, delta_ms: i64) -> Self {
        self.end_delta = Some(delta_ms);
        self
    }

    /// Shift pitch by `semitones`, relative to the current shift.
    pub fn pitch(mut self, semitones: i32) -> Self {
        self.pitch_delta = Some(semitones);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.start_delta.is_none() && self.end_delta.is_none() && self.pitch_delta.is_none()
    }
}

/// Slice field named in range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceField {
    Start,
    End,
    PitchShift,
}

impl SliceField {
    pub(crate) fn unit(&self) -> &'static str {
        match self {
            Self::Start | Self::End => " ms",
            Self::PitchShift => "",
        }
    }
}

impl fmt::Display for SliceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "Start adjust",
            Self::End => "End adjust",
            Self::PitchShift => "Pitch shift",
        };
        f.write_str(name)
    }
}
