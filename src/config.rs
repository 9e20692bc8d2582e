//! Session configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Playback keys, one per slice in order.
pub const DEFAULT_KEYMAP: &str = "asdfghjkl";

/// Configuration for a slicing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnipConfig {
    /// Largest slice count accepted when loading a file.
    pub max_slices: usize,
    /// Keys that trigger slices; the i-th key plays slice i.
    pub keymap: String,
    /// Loaded files are copied here first. `None` loads in place.
    pub upload_dir: Option<PathBuf>,
    /// Output device index; host default when `None`.
    pub output_device: Option<usize>,
}

impl Default for SnipConfig {
    fn default() -> Self {
        Self {
            max_slices: 9,
            keymap: DEFAULT_KEYMAP.to_string(),
            upload_dir: Some(PathBuf::from("upload")),
            output_device: None,
        }
    }
}

impl SnipConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_slices == 0 {
            return Err(Error::InvalidConfig(
                "max_slices must be at least 1".into(),
            ));
        }
        if self.keymap.is_empty() {
            return Err(Error::InvalidConfig("keymap must not be empty".into()));
        }

        let mut seen = Vec::new();
        for key in self.keymap.chars() {
            if seen.contains(&key) {
                return Err(Error::InvalidConfig(format!(
                    "keymap assigns '{key}' more than once"
                )));
            }
            seen.push(key);
        }
        Ok(())
    }
}
