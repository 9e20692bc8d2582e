//! SnipEngine: the loaded sample, its slices and the playback slot.

use crate::config::SnipConfig;
use crate::import::import_file;
use crate::keymap::KeyMap;
use crate::{Error, Result};
use serde::Serialize;
use snip_core::{decode, AudioBuffer};
use snip_sampler::{PlaybackController, PlaybackDevice, Slice, SliceAdjustment, SliceTable};
use std::path::{Path, PathBuf};

/// One line of the slice table as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliceRow {
    /// 1-based slice number.
    pub number: usize,
    /// Key that plays the slice; `None` when the keymap is shorter.
    pub key: Option<char>,
    pub start_ms: u64,
    pub end_ms: u64,
    pub pitch_shift: i32,
}

/// An interactive slicing session.
///
/// Slices are addressed by 1-based number here, matching what the table
/// shows. Loading replaces the table wholesale; a failed load keeps the
/// previous one.
///
/// # Example
///
/// ```ignore
/// use snip::prelude::*;
///
/// let mut engine = SnipEngine::builder().max_slices(8).build()?;
/// engine.load_file("break.wav", 8)?;
/// engine.adjust(1, SliceAdjustment::new().end(50).pitch(3))?;
/// engine.press_key('a')?;
/// ```
pub struct SnipEngine<D: PlaybackDevice> {
    config: SnipConfig,
    keymap: KeyMap,
    player: PlaybackController<D>,
    table: Option<SliceTable>,
    source_path: Option<PathBuf>,
}

impl<D: PlaybackDevice> SnipEngine<D> {
    pub(crate) fn new(config: SnipConfig, device: D) -> Result<Self> {
        config.validate()?;
        let keymap = KeyMap::new(&config.keymap);

        Ok(Self {
            config,
            keymap,
            player: PlaybackController::new(device),
            table: None,
            source_path: None,
        })
    }

    /// Import (when an upload directory is configured), decode and slice a file.
    pub fn load_file(&mut self, path: impl AsRef<Path>, slice_count: usize) -> Result<()> {
        self.check_slice_count(slice_count)?;

        let path = match &self.config.upload_dir {
            Some(dir) => import_file(path.as_ref(), dir)?,
            None => path.as_ref().to_path_buf(),
        };

        let buffer = decode(&path)?;
        self.install(SliceTable::new(buffer, slice_count)?);
        self.source_path = Some(path);
        Ok(())
    }

    /// Slice audio that is already in memory.
    pub fn load_buffer(&mut self, buffer: AudioBuffer, slice_count: usize) -> Result<()> {
        self.check_slice_count(slice_count)?;
        self.install(SliceTable::new(buffer, slice_count)?);
        self.source_path = None;
        Ok(())
    }

    fn check_slice_count(&self, count: usize) -> Result<()> {
        if count == 0 || count > self.config.max_slices {
            return Err(Error::SliceCountOutOfRange {
                count,
                max: self.config.max_slices,
            });
        }
        Ok(())
    }

    fn install(&mut self, table: SliceTable) {
        self.player.stop();
        self.table = Some(table);
    }

    /// Apply deltas to slice `number` (1-based). Returns the committed slice.
    pub fn adjust(&mut self, number: usize, adjustment: SliceAdjustment) -> Result<Slice> {
        let table = self.table.as_mut().ok_or(Error::NoSampleLoaded)?;
        let index = to_index(number, table.len())?;
        Ok(table.adjust_slice(index, adjustment)?)
    }

    /// Play slice `number` (1-based), stopping whatever is playing.
    pub fn play(&self, number: usize) -> Result<()> {
        let table = self.table()?;
        let index = to_index(number, table.len())?;
        Ok(self.player.play(table, index)?)
    }

    /// Play the slice mapped to `key`.
    ///
    /// Returns the slice number played, or `None` when the key is unmapped
    /// or maps past the current slice count.
    pub fn press_key(&self, key: char) -> Result<Option<usize>> {
        let table = self.table()?;
        match self.keymap.slice_for(key) {
            Some(index) if index < table.len() => {
                self.player.play(table, index)?;
                Ok(Some(index + 1))
            }
            _ => Ok(None),
        }
    }

    pub fn stop(&self) {
        self.player.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// 1-based number of the slice holding the playback slot.
    pub fn current_slice(&self) -> Option<usize> {
        self.player.current_slice().map(|i| i + 1)
    }

    pub fn table(&self) -> Result<&SliceTable> {
        self.table.as_ref().ok_or(Error::NoSampleLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Display rows for every slice, in order. Empty before a load.
    pub fn rows(&self) -> Vec<SliceRow> {
        let Some(table) = &self.table else {
            return Vec::new();
        };

        table
            .slices()
            .iter()
            .enumerate()
            .map(|(i, slice)| SliceRow {
                number: i + 1,
                key: self.keymap.key_for(i),
                start_ms: slice.start_ms,
                end_ms: slice.end_ms,
                pitch_shift: slice.pitch_shift,
            })
            .collect()
    }

    /// Path the current sample was decoded from (the imported copy, if any).
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn config(&self) -> &SnipConfig {
        &self.config
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn device(&self) -> &D {
        self.player.device()
    }
}

#[cfg(feature = "output")]
impl SnipEngine<snip_sampler::CpalDevice> {
    /// Start configuring an engine that plays through CPAL.
    pub fn builder() -> crate::SnipEngineBuilder {
        crate::SnipEngineBuilder::default()
    }
}

fn to_index(number: usize, count: usize) -> Result<usize> {
    if number == 0 || number > count {
        return Err(Error::SliceNumberOutOfRange { number, count });
    }
    Ok(number - 1)
}
