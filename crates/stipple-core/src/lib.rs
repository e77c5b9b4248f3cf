//! Core data structures and traits for Stipple (pure Rust)
//!
//! A sparse N-dimensional array is a flat sequence of (index-tuple, value)
//! records sharing one declared shape. Sequences are not required to be
//! sorted or deduplicated; records with equal index tuples denote additive
//! contributions to the same cell.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod backend;
pub mod error;
pub mod kind;
pub mod nd;
pub mod records;

pub use backend::MatrixBackend;
pub use error::{Error, Result};
pub use kind::{Value, ValueKind};
pub use nd::SparseNd;
pub use records::{SparseArray, SparseSeq};
