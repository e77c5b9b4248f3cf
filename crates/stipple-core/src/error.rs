//! Error types for Stipple

use thiserror::Error;

/// Result type alias using Stipple's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Stipple operations
#[derive(Error, Debug)]
pub enum Error {
    /// Sequences with differing declared shapes were combined
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Shape of the first sequence
        expected: Vec<usize>,
        /// Offending shape
        got: Vec<usize>,
    },

    /// Operation invoked on a rank it does not support
    #[error("rank {ndim} unsupported for '{op}'")]
    RankUnsupported {
        /// Rank of the offending sequence
        ndim: usize,
        /// The operation name
        op: &'static str,
    },

    /// Configured chunk byte bound cannot hold any record
    #[error("invalid chunksize: {chunksize}")]
    InvalidChunksize {
        /// The configured value in bytes
        chunksize: usize,
    },

    /// Constructor parts are inconsistent
    #[error("invalid parts: {0}")]
    InvalidParts(String),

    /// Backend matrix assembly failure passthrough
    #[error("backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Create a shape mismatch error
    #[must_use]
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }
}
