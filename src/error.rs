//! Error type of the crate.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while editing, rendering or persisting a colormap.
#[derive(Debug, Error)]
pub enum Error {
    /// An interval with `min >= max` (or a non-finite endpoint).
    #[error("invalid interval range [{min}, {max})")]
    InvalidRange { min: f64, max: f64 },

    /// Global bounds with `min >= max` (or a non-finite endpoint).
    #[error("degenerate bounds [{min}, {max})")]
    DegenerateBounds { min: f64, max: f64 },

    /// A sequence of intervals that does not tile its bounds.
    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    /// No saved colormap carries this name.
    #[error("no saved colormap named “{0}”")]
    NotFound(String),

    /// Reading or writing the durable store failed.
    #[error("cannot access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The durable store holds something that is not a colormap record.
    #[error("corrupt colormap record in {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    /// Says whether the failure comes from the durable store rather
    /// than from the in-memory partition.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Error::Persistence { .. } | Error::Corrupt { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
