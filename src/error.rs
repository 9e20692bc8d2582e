//! Error type for the snip umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates across crate boundaries.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] snip_core::Error),

    #[error(transparent)]
    Sampler(#[from] snip_sampler::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not a file path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Slice count must be between 1 and {max}, got {count}")]
    SliceCountOutOfRange { count: usize, max: usize },

    #[error("Slice number must be between 1 and {count}, got {number}")]
    SliceNumberOutOfRange { number: usize, count: usize },

    #[error("No sample loaded")]
    NoSampleLoaded,
}

pub type Result<T> = std::result::Result<T, Error>;
