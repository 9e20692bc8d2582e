//! Keyboard keys to slice indices.

/// Maps playback keys to 0-based slice indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    keys: Vec<char>,
}

impl KeyMap {
    pub fn new(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect(),
        }
    }

    /// Slice index triggered by `key`.
    pub fn slice_for(&self, key: char) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }

    /// Key that triggers slice `index`, if any.
    pub fn key_for(&self, index: usize) -> Option<char> {
        self.keys.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_KEYMAP)
    }
}
