//! Builder for configuring and constructing a `SnipEngine`.

use crate::config::SnipConfig;
use crate::{Result, SnipEngine};
use snip_sampler::PlaybackDevice;
use std::path::PathBuf;

/// Settings default to [`SnipConfig::default`]: up to 9 slices on the home
/// row keys, files imported into `./upload`, default output device.
///
/// # Example
///
/// ```ignore
/// use snip::prelude::*;
///
/// let engine = SnipEngine::builder()
///     .max_slices(4)
///     .keymap("qwer")
///     .no_upload()
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnipEngineBuilder {
    config: SnipConfig,
}

impl SnipEngineBuilder {
    /// Default: 9
    pub fn max_slices(mut self, max: usize) -> Self {
        self.config.max_slices = max;
        self
    }

    /// Default: `"asdfghjkl"`
    pub fn keymap(mut self, keys: impl Into<String>) -> Self {
        self.config.keymap = keys.into();
        self
    }

    /// Default: `upload`
    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = Some(dir.into());
        self
    }

    /// Load files in place instead of copying them first.
    pub fn no_upload(mut self) -> Self {
        self.config.upload_dir = None;
        self
    }

    pub fn output_device(mut self, index: usize) -> Self {
        self.config.output_device = Some(index);
        self
    }

    /// Build an engine that plays through CPAL.
    #[cfg(feature = "output")]
    pub fn build(self) -> Result<SnipEngine<snip_sampler::CpalDevice>> {
        let device = snip_sampler::CpalDevice::new(self.config.output_device);
        self.build_with_device(device)
    }

    /// Build an engine around a custom playback device.
    ///
    /// `output_device` is ignored; the device decides where audio goes.
    pub fn build_with_device<D: PlaybackDevice>(self, device: D) -> Result<SnipEngine<D>> {
        let engine = SnipEngine::new(self.config, device)?;
        tracing::info!(
            max_slices = engine.config().max_slices,
            keymap = %engine.config().keymap,
            "snip engine ready"
        );
        Ok(engine)
    }
}
