//! Process-wide chunk configuration.
//!
//! Chunked operations partition a record sequence into contiguous slices of
//! at most `chunksize` bytes and process them independently, so working
//! memory stays bounded regardless of total record count. The bound is read
//! once at the start of each chunked operation; changing it mid-operation is
//! not observable. Chunk boundaries never change results, only the memory
//! and performance profile.

use std::sync::atomic::{AtomicUsize, Ordering};

use stipple_core::{Error, Result, SparseSeq};

/// Default chunk byte bound: large enough that realistic assembly workloads
/// run single-chunk.
pub const DEFAULT_CHUNKSIZE: usize = 0x1000_0000;

static CHUNKSIZE: AtomicUsize = AtomicUsize::new(DEFAULT_CHUNKSIZE);

/// Current process-wide chunk byte bound.
#[must_use]
pub fn chunksize() -> usize {
    CHUNKSIZE.load(Ordering::Relaxed)
}

/// Set the process-wide chunk byte bound. Takes effect for operations
/// started after the call; zero is rejected at the point of use.
pub fn set_chunksize(bytes: usize) {
    CHUNKSIZE.store(bytes, Ordering::Relaxed);
}

/// Records per chunk for `seq` under `chunksize` bytes, never less than one
/// record. A zero bound is a configuration error.
pub(crate) fn records_per_chunk<T>(
    seq: &SparseSeq<T>,
    chunksize: usize,
) -> Result<usize> {
    if chunksize == 0 {
        return Err(Error::InvalidChunksize { chunksize });
    }
    Ok((chunksize / seq.record_size()).max(1))
}

/// Contiguous `[start, end)` record ranges covering `nnz` in steps of `per`.
pub(crate) fn chunk_ranges(nnz: usize, per: usize) -> Vec<(usize, usize)> {
    (0..nnz)
        .step_by(per)
        .map(|s| (s, (s + per).min(nnz)))
        .collect()
}
