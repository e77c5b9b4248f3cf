//! Chunk-bounded kernels for Stipple (pure Rust, parallel ready)
//!
//! Assembly code produces unsorted, possibly-duplicated record sequences;
//! these kernels condition them (`dedup`, `prune`), combine them (`add`) and
//! materialize them (`toarray`, `tomatrix`, `convert`) in working memory
//! bounded by the configured chunk size.

pub fn init_parallel() {
    // Rayon auto-detects threads by default; users may set RAYON_NUM_THREADS.
}

pub mod arith;
pub mod chunk;
pub mod cleanup;
pub mod convert;
pub mod dedup;
pub mod extract;

pub use arith::add;
pub use chunk::{chunksize, set_chunksize, DEFAULT_CHUNKSIZE};
pub use cleanup::{prune, prune_inplace, prune_inplace_with, prune_with};
pub use convert::{
    convert, toarray, tomatrix, DenseBackend, DenseMatrix, Materialized,
};
pub use dedup::{dedup, dedup_inplace, dedup_inplace_with, dedup_with};
pub use extract::{
    array_extract, array_indices, array_values, extract, indices, values, ArrayValues,
};
