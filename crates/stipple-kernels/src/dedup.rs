//! Chunked sort-merge deduplication.
//!
//! Transforms an arbitrary-order, possibly-duplicated record sequence into
//! the canonical form: lexicographic ascending index tuples (axis 0 most
//! significant), exactly one record per distinct tuple, value = sum of all
//! contributions. Zero-valued sums are retained; dropping them is `prune`'s
//! job.

use rayon::prelude::*;
use stipple_core::{Result, SparseSeq, Value};

use crate::chunk::{self, chunk_ranges, records_per_chunk};

type Parts<T> = (Vec<i64>, Vec<T>);

/// Stable-sort one chunk by index tuple and collapse adjacent equal tuples
/// by summing.
fn sort_dedup_chunk<T: Value>(ndim: usize, idx: &[i64], val: &[T]) -> Parts<T> {
    let n = val.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| idx[a * ndim..(a + 1) * ndim].cmp(&idx[b * ndim..(b + 1) * ndim]));
    let mut out_idx = Vec::with_capacity(n * ndim);
    let mut out_val: Vec<T> = Vec::with_capacity(n);
    for &k in &order {
        let key = &idx[k * ndim..(k + 1) * ndim];
        let m = out_val.len();
        if m > 0 && &out_idx[(m - 1) * ndim..] == key {
            out_val[m - 1] += val[k];
        } else {
            out_idx.extend_from_slice(key);
            out_val.push(val[k]);
        }
    }
    (out_idx, out_val)
}

/// Linear merge of two sorted, deduplicated chunks; equal keys across the
/// two inputs sum into one record.
fn merge_chunks<T: Value>(ndim: usize, a: &Parts<T>, b: &Parts<T>) -> Parts<T> {
    let (ai, av) = a;
    let (bi, bv) = b;
    let (na, nb) = (av.len(), bv.len());
    let mut out_idx = Vec::with_capacity((na + nb) * ndim);
    let mut out_val = Vec::with_capacity(na + nb);
    let (mut pa, mut pb) = (0usize, 0usize);
    while pa < na && pb < nb {
        let ka = &ai[pa * ndim..(pa + 1) * ndim];
        let kb = &bi[pb * ndim..(pb + 1) * ndim];
        match ka.cmp(kb) {
            std::cmp::Ordering::Less => {
                out_idx.extend_from_slice(ka);
                out_val.push(av[pa]);
                pa += 1;
            }
            std::cmp::Ordering::Greater => {
                out_idx.extend_from_slice(kb);
                out_val.push(bv[pb]);
                pb += 1;
            }
            std::cmp::Ordering::Equal => {
                let mut v = av[pa];
                v += bv[pb];
                out_idx.extend_from_slice(ka);
                out_val.push(v);
                pa += 1;
                pb += 1;
            }
        }
    }
    out_idx.extend_from_slice(&ai[pa * ndim..]);
    out_val.extend_from_slice(&av[pa..]);
    out_idx.extend_from_slice(&bi[pb * ndim..]);
    out_val.extend_from_slice(&bv[pb..]);
    (out_idx, out_val)
}

/// Canonical sorted-deduplicated parts of `seq` under an explicit chunk byte
/// bound. Chunk sorts run in parallel; the pairwise merge tree is bottom-up.
fn sorted_merged<T: Value>(seq: &SparseSeq<T>, chunksize: usize) -> Result<Parts<T>> {
    let per = records_per_chunk(seq, chunksize)?;
    let ndim = seq.ndim();
    let nnz = seq.nnz();
    if nnz == 0 {
        return Ok((Vec::new(), Vec::new()));
    }
    let mut chunks: Vec<Parts<T>> = if nnz <= per {
        vec![sort_dedup_chunk(ndim, &seq.indices, &seq.values)]
    } else {
        chunk_ranges(nnz, per)
            .par_iter()
            .map(|&(s, e)| {
                sort_dedup_chunk(ndim, &seq.indices[s * ndim..e * ndim], &seq.values[s..e])
            })
            .collect()
    };
    while chunks.len() > 1 {
        let mut next = Vec::with_capacity(chunks.len().div_ceil(2));
        let mut it = chunks.into_iter();
        while let Some(a) = it.next() {
            match it.next() {
                Some(b) => next.push(merge_chunks(ndim, &a, &b)),
                None => next.push(a),
            }
        }
        chunks = next;
    }
    Ok(chunks.pop().unwrap_or_default())
}

/// Sorted-deduplicated copy of `seq` under an explicit chunk byte bound.
pub fn dedup_with<T: Value>(seq: &SparseSeq<T>, chunksize: usize) -> Result<SparseSeq<T>> {
    let (indices, values) = sorted_merged(seq, chunksize)?;
    Ok(SparseSeq::from_parts_unchecked(
        seq.shape.clone(),
        indices,
        values,
    ))
}

/// Sorted-deduplicated copy of `seq` under the process-wide chunk bound.
pub fn dedup<T: Value>(seq: &SparseSeq<T>) -> Result<SparseSeq<T>> {
    dedup_with(seq, chunk::chunksize())
}

/// In-place dedup: rewrites and shrinks the caller's storage instead of
/// returning new storage.
pub fn dedup_inplace_with<T: Value>(seq: &mut SparseSeq<T>, chunksize: usize) -> Result<()> {
    let (indices, values) = sorted_merged(seq, chunksize)?;
    seq.indices.truncate(indices.len());
    seq.indices.copy_from_slice(&indices);
    seq.values.truncate(values.len());
    seq.values.copy_from_slice(&values);
    Ok(())
}

/// In-place dedup under the process-wide chunk bound.
pub fn dedup_inplace<T: Value>(seq: &mut SparseSeq<T>) -> Result<()> {
    dedup_inplace_with(seq, chunk::chunksize())
}
