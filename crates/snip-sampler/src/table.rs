//! Slice table: the loaded buffer plus its slice records.

use crate::slice::{Slice, SliceAdjustment, SliceField, MAX_PITCH_SHIFT, MIN_PITCH_SHIFT};
use crate::{Error, Result};
use snip_core::{transpose, AudioBuffer};

/// The loaded audio and its independently adjustable slices.
///
/// The buffer is never modified. Slices are created as an even partition and
/// mutated in place through [`adjust_slice`](Self::adjust_slice). Mutation is
/// not synchronised; callers sharing a table across threads must serialise
/// adjustments themselves.
#[derive(Debug, Clone)]
pub struct SliceTable {
    buffer: AudioBuffer,
    length_ms: u64,
    slices: Vec<Slice>,
}

impl SliceTable {
    /// Partition `buffer` into `slice_count` equal-width contiguous slices.
    ///
    /// Width is `floor(length_ms / slice_count)`. Any remainder at the tail is
    /// left outside every slice.
    pub fn new(buffer: AudioBuffer, slice_count: usize) -> Result<Self> {
        if slice_count == 0 {
            return Err(Error::InvalidSliceCount(slice_count));
        }

        let length_ms = buffer.length_ms();
        let width = length_ms / slice_count as u64;
        let slices = (0..slice_count as u64)
            .map(|i| Slice::new(i * width, i * width + width))
            .collect();

        tracing::info!(slice_count, length_ms, width, "created slice table");

        Ok(Self {
            buffer,
            length_ms,
            slices,
        })
    }

    /// The original audio.
    pub fn buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    /// Buffer length in milliseconds; the upper bound for every slice end.
    pub fn length_ms(&self) -> u64 {
        self.length_ms
    }

    /// Read view of all slices in order.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Slice at a 0-based index.
    pub fn slice(&self, index: usize) -> Result<&Slice> {
        self.slices.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.slices.len(),
        })
    }

    /// Apply deltas to one slice.
    ///
    /// All fields are validated before anything is written; on error the
    /// slice is unchanged. Returns the committed slice.
    pub fn adjust_slice(&mut self, index: usize, adjustment: SliceAdjustment) -> Result<Slice> {
        let current = *self.slice(index)?;
        let max = i64::try_from(self.length_ms).unwrap_or(i64::MAX);

        let start = offset(current.start_ms, adjustment.start_delta);
        let start = check_bound(SliceField::Start, start, max)?;

        let end = offset(current.end_ms, adjustment.end_delta);
        let end = check_bound(SliceField::End, end, max)?;

        if start > end {
            return Err(Error::InvalidOrder { start, end });
        }

        let pitch_shift = match adjustment.pitch_delta {
            Some(delta) => {
                let pitch = current.pitch_shift.checked_add(delta);
                match pitch {
                    Some(p) if (MIN_PITCH_SHIFT..=MAX_PITCH_SHIFT).contains(&p) => p,
                    _ => {
                        return Err(Error::OutOfRange {
                            field: SliceField::PitchShift,
                            value: current.pitch_shift as i64 + delta as i64,
                            min: MIN_PITCH_SHIFT as i64,
                            max: MAX_PITCH_SHIFT as i64,
                        })
                    }
                }
            }
            None => current.pitch_shift,
        };

        // Bounds are checked non-negative above
        let committed = Slice {
            start_ms: start as u64,
            end_ms: end as u64,
            pitch_shift,
        };
        self.slices[index] = committed;

        tracing::debug!(
            index,
            start_ms = committed.start_ms,
            end_ms = committed.end_ms,
            pitch_shift = committed.pitch_shift,
            "adjusted slice"
        );

        Ok(committed)
    }

    /// PCM to play for a slice, transposed when its pitch shift is non-zero.
    pub fn derive_playback_audio(&self, index: usize) -> Result<AudioBuffer> {
        let slice = self.slice(index)?;
        let excerpt = self.buffer.subrange(slice.start_ms, slice.end_ms);

        if slice.pitch_shift == 0 {
            return Ok(excerpt);
        }
        Ok(transpose(&excerpt, slice.pitch_shift)?)
    }
}

/// `value + delta` in signed arithmetic; `None` on overflow.
fn offset(value: u64, delta: Option<i64>) -> Option<i64> {
    let value = i64::try_from(value).ok()?;
    value.checked_add(delta.unwrap_or(0))
}

fn check_bound(field: SliceField, value: Option<i64>, max: i64) -> Result<i64> {
    match value {
        Some(v) if (0..=max).contains(&v) => Ok(v),
        other => Err(Error::OutOfRange {
            field,
            value: other.unwrap_or(i64::MAX),
            min: 0,
            max,
        }),
    }
}
