//! Error types for the wave simulation core.
//!
//! The solver itself cannot fail once constructed; everything here is either
//! a rejected configuration or configuration/snapshot I/O.

use thiserror::Error;

pub type WaveResult<T> = Result<T, WaveError>;

#[derive(Error, Debug)]
pub enum WaveError {
    /// The lattice must be at least 2x2 to form a single quad.
    #[error("invalid grid size {width}x{height}: both dimensions must be at least 2")]
    InvalidGridSize { width: usize, height: usize },

    #[error("invalid parameter `{name}` = {value}: must be finite and positive")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),
}

impl WaveError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}
