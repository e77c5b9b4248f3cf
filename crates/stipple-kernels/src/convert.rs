//! Materialization: dense arrays and backend matrix assembly.

use std::cell::RefCell;

use rayon::prelude::*;
use stipple_core::{Error, MatrixBackend, Result, SparseSeq, Value};
use thread_local::ThreadLocal;

use crate::extract::extract;

const SMALL_NNZ_SCATTER: usize = 16 * 1024;

#[inline]
fn i64_to_usize(x: i64) -> usize {
    debug_assert!(x >= 0);
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    {
        x as usize
    }
}

/// Row-major flat offset of one record's index tuple.
#[inline]
fn flat_offset(shape: &[usize], record: &[i64]) -> usize {
    let mut off = 0usize;
    for (d, &extent) in shape.iter().enumerate() {
        off = off * extent + i64_to_usize(record[d]);
    }
    off
}

/// Densify `seq` into a row-major array of its declared shape, accumulating
/// duplicate index tuples into their cell (rank 0 gives a single cell).
/// Large inputs scatter through per-thread accumulators merged at the end.
#[must_use]
pub fn toarray<T: Value>(seq: &SparseSeq<T>) -> Vec<T> {
    let size: usize = seq.shape.iter().product();
    let nnz = seq.nnz();
    let mut out = vec![T::ZERO; size];
    if nnz < SMALL_NNZ_SCATTER {
        for k in 0..nnz {
            out[flat_offset(&seq.shape, seq.record(k))] += seq.values[k];
        }
        return out;
    }
    let tls: ThreadLocal<RefCell<Vec<T>>> = ThreadLocal::new();
    (0..nnz).into_par_iter().for_each(|k| {
        let cell = tls.get_or(|| RefCell::new(vec![T::ZERO; size]));
        let mut acc = cell.borrow_mut();
        acc[flat_offset(&seq.shape, seq.record(k))] += seq.values[k];
    });
    for cell in tls {
        let acc = cell.into_inner();
        for (o, a) in out.iter_mut().zip(acc) {
            *o += a;
        }
    }
    out
}

/// Hand the (not necessarily deduplicated) extract triple of a rank-2
/// sequence to the backend and return its opaque matrix handle. The backend
/// accumulates duplicate index tuples, mirroring `toarray`.
pub fn tomatrix<T, B>(seq: &SparseSeq<T>, backend: &B) -> Result<B::Matrix>
where
    T: Value,
    B: MatrixBackend<T>,
{
    if seq.ndim() != 2 {
        return Err(Error::RankUnsupported {
            ndim: seq.ndim(),
            op: "tomatrix",
        });
    }
    let (indices, values, shape) = extract(seq);
    backend.assemble(&indices, &values, &shape)
}

/// Result of rank-dispatched materialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Materialized<T, M> {
    Array(Vec<T>),
    Matrix(M),
}

/// Materialize by rank: dense array for rank <= 1, backend matrix for rank
/// 2; higher ranks are unsupported.
pub fn convert<T, B>(seq: &SparseSeq<T>, backend: &B) -> Result<Materialized<T, B::Matrix>>
where
    T: Value,
    B: MatrixBackend<T>,
{
    match seq.ndim() {
        0 | 1 => Ok(Materialized::Array(toarray(seq))),
        2 => Ok(Materialized::Matrix(tomatrix(seq, backend)?)),
        ndim => Err(Error::RankUnsupported { ndim, op: "convert" }),
    }
}

/// Dense row-major matrix handle produced by [`DenseBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    pub nrows: usize,
    pub ncols: usize,
    pub data: Vec<T>,
}

impl<T: Value> DenseMatrix<T> {
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.ncols + j]
    }

    /// Export as a flat row-major dense buffer.
    #[must_use]
    pub fn export_dense(&self) -> Vec<T> {
        self.data.clone()
    }
}

/// Reference backend that assembles into a dense row-major buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenseBackend;

impl<T: Value> MatrixBackend<T> for DenseBackend {
    type Matrix = DenseMatrix<T>;

    fn assemble(
        &self,
        indices: &[Vec<i64>],
        values: &[T],
        shape: &[usize],
    ) -> Result<DenseMatrix<T>> {
        if shape.len() != 2 || indices.len() != 2 {
            return Err(Error::RankUnsupported {
                ndim: shape.len(),
                op: "DenseBackend::assemble",
            });
        }
        let (nrows, ncols) = (shape[0], shape[1]);
        let mut data = vec![T::ZERO; nrows * ncols];
        for ((&i, &j), &v) in indices[0].iter().zip(&indices[1]).zip(values) {
            data[i64_to_usize(i) * ncols + i64_to_usize(j)] += v;
        }
        Ok(DenseMatrix { nrows, ncols, data })
    }
}
