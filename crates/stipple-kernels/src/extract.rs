//! Read-only decomposition views over a record sequence.
//!
//! These never sort, merge or drop records; they report the sequence in its
//! current order.

use stipple_core::{SparseArray, SparseSeq, Value};

/// Per-axis index arrays: for axis `d`, the `idx[d]` component of every
/// record in sequence order.
#[must_use]
pub fn indices<T: Value>(seq: &SparseSeq<T>) -> Vec<Vec<i64>> {
    let ndim = seq.ndim();
    let nnz = seq.nnz();
    let mut out: Vec<Vec<i64>> = (0..ndim).map(|_| Vec::with_capacity(nnz)).collect();
    for k in 0..nnz {
        let base = k * ndim;
        for (d, axis) in out.iter_mut().enumerate() {
            axis.push(seq.indices[base + d]);
        }
    }
    out
}

/// Record values in sequence order.
#[must_use]
pub fn values<T: Value>(seq: &SparseSeq<T>) -> Vec<T> {
    seq.values.clone()
}

/// Bundled (per-axis index arrays, values, shape), consistent with
/// [`indices`], [`values`] and the declared shape taken independently.
#[must_use]
pub fn extract<T: Value>(seq: &SparseSeq<T>) -> (Vec<Vec<i64>>, Vec<T>, Vec<usize>) {
    (indices(seq), values(seq), seq.shape.clone())
}

/// Value array of a kind-tagged sequence, carrying the kind tag along.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValues {
    Int(Vec<i64>),
    Float(Vec<f64>),
}

/// Per-axis index arrays of a kind-tagged sequence.
#[must_use]
pub fn array_indices(a: &SparseArray) -> Vec<Vec<i64>> {
    match a {
        SparseArray::Int(s) => indices(s),
        SparseArray::Float(s) => indices(s),
    }
}

/// Record values of a kind-tagged sequence in sequence order.
#[must_use]
pub fn array_values(a: &SparseArray) -> ArrayValues {
    match a {
        SparseArray::Int(s) => ArrayValues::Int(values(s)),
        SparseArray::Float(s) => ArrayValues::Float(values(s)),
    }
}

/// Bundled (per-axis index arrays, values, shape) of a kind-tagged sequence.
#[must_use]
pub fn array_extract(a: &SparseArray) -> (Vec<Vec<i64>>, ArrayValues, Vec<usize>) {
    (array_indices(a), array_values(a), a.shape().to_vec())
}
