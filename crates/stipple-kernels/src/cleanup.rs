//! Zero-value pruning.
//!
//! Removes records whose value is exactly the additive identity, preserving
//! relative order and never merging duplicate index tuples. This is the
//! cheap pre-filter; the expensive canonicalization lives in `dedup`.

use rayon::prelude::*;
use stipple_core::{Result, SparseSeq, Value};

use crate::chunk::{self, chunk_ranges, records_per_chunk};

const SMALL_NNZ_PRUNE: usize = 16384;

/// Order-preserving copy of `seq` without exact-zero records, under an
/// explicit chunk byte bound. A chunked filter is just concatenation of
/// per-chunk filtered slices, so surviving records keep their order.
pub fn prune_with<T: Value>(seq: &SparseSeq<T>, chunksize: usize) -> Result<SparseSeq<T>> {
    let per = records_per_chunk(seq, chunksize)?;
    let nnz = seq.nnz();
    let ndim = seq.ndim();
    if nnz < SMALL_NNZ_PRUNE {
        let mut indices = Vec::with_capacity(seq.indices.len());
        let mut values = Vec::with_capacity(nnz);
        for k in 0..nnz {
            if seq.values[k] != T::ZERO {
                indices.extend_from_slice(seq.record(k));
                values.push(seq.values[k]);
            }
        }
        return Ok(SparseSeq::from_parts_unchecked(
            seq.shape.clone(),
            indices,
            values,
        ));
    }
    // If no zeros, structure unchanged
    let has_zero = seq.values.par_iter().any(|v| *v == T::ZERO);
    if !has_zero {
        return Ok(seq.clone());
    }
    let filtered: Vec<(Vec<i64>, Vec<T>)> = chunk_ranges(nnz, per)
        .par_iter()
        .map(|&(s, e)| {
            let mut idx = Vec::with_capacity((e - s) * ndim);
            let mut val = Vec::with_capacity(e - s);
            for k in s..e {
                if seq.values[k] != T::ZERO {
                    idx.extend_from_slice(seq.record(k));
                    val.push(seq.values[k]);
                }
            }
            (idx, val)
        })
        .collect();
    let mut indices = Vec::with_capacity(seq.indices.len());
    let mut values = Vec::with_capacity(nnz);
    for (idx, val) in filtered {
        indices.extend_from_slice(&idx);
        values.extend_from_slice(&val);
    }
    Ok(SparseSeq::from_parts_unchecked(
        seq.shape.clone(),
        indices,
        values,
    ))
}

/// Order-preserving copy of `seq` without exact-zero records, under the
/// process-wide chunk bound.
pub fn prune<T: Value>(seq: &SparseSeq<T>) -> Result<SparseSeq<T>> {
    prune_with(seq, chunk::chunksize())
}

/// In-place prune: compacts the caller's storage and shrinks it to the
/// surviving length.
pub fn prune_inplace_with<T: Value>(seq: &mut SparseSeq<T>, chunksize: usize) -> Result<()> {
    records_per_chunk(seq, chunksize)?;
    let nnz = seq.nnz();
    let ndim = seq.ndim();
    let mut w = 0usize;
    for k in 0..nnz {
        if seq.values[k] != T::ZERO {
            if w != k {
                seq.indices.copy_within(k * ndim..(k + 1) * ndim, w * ndim);
                seq.values[w] = seq.values[k];
            }
            w += 1;
        }
    }
    seq.indices.truncate(w * ndim);
    seq.values.truncate(w);
    Ok(())
}

/// In-place prune under the process-wide chunk bound.
pub fn prune_inplace<T: Value>(seq: &mut SparseSeq<T>) -> Result<()> {
    prune_inplace_with(seq, chunk::chunksize())
}
