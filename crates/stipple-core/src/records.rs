//! Sparse record sequences: the coordinate layout and its kind-tagged wrapper.

use crate::error::{Error, Result};
use crate::kind::{Value, ValueKind};

/// A homogeneous sequence of (index-tuple, value) records over one declared
/// shape. Index tuples are stored flattened row-major
/// (`indices.len() == nnz * ndim`). Records may repeat index tuples; such
/// records are additive contributions to the same cell.
///
/// Index components must lie in `[0, shape[axis])`. This is a producer
/// contract, not validated on the hot path; `from_parts` with `check` can
/// verify it at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseSeq<T> {
    pub shape: Vec<usize>,
    pub indices: Vec<i64>, // length nnz * ndim
    pub values: Vec<T>,    // length nnz
}

impl<T> SparseSeq<T> {
    #[inline]
    #[must_use]
    pub const fn nnz(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub const fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index tuple of record `k` (empty slice at rank 0).
    #[inline]
    #[must_use]
    pub fn record(&self, k: usize) -> &[i64] {
        let ndim = self.ndim();
        &self.indices[k * ndim..(k + 1) * ndim]
    }

    /// Bytes occupied by one record as stored: one i64 per axis plus the
    /// value field. Drives the chunk partitioning of the sort-merge core.
    #[inline]
    #[must_use]
    pub const fn record_size(&self) -> usize {
        self.ndim() * std::mem::size_of::<i64>() + std::mem::size_of::<T>()
    }
}

impl<T: Value> SparseSeq<T> {
    /// An empty sequence over `shape` (rank 0 allowed: empty shape).
    #[must_use]
    pub const fn empty(shape: Vec<usize>) -> Self {
        Self {
            shape,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn from_parts(
        shape: Vec<usize>,
        indices: Vec<i64>,
        values: Vec<T>,
        check: bool,
    ) -> Result<Self> {
        let ndim = shape.len();
        let nnz = values.len();
        let expected = nnz
            .checked_mul(ndim)
            .ok_or_else(|| Error::InvalidParts("indices length overflow".into()))?;
        if indices.len() != expected {
            return Err(Error::InvalidParts(
                "indices length must be nnz * ndim".into(),
            ));
        }
        if check {
            for k in 0..nnz {
                for d in 0..ndim {
                    let idx = indices[k * ndim + d];
                    if idx < 0 {
                        return Err(Error::InvalidParts(
                            "indices must be non-negative".into(),
                        ));
                    }
                    let ok = usize::try_from(idx).is_ok_and(|ii| ii < shape[d]);
                    if !ok {
                        return Err(Error::InvalidParts("index out of bounds".into()));
                    }
                }
            }
        }
        Ok(Self {
            shape,
            indices,
            values,
        })
    }

    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(
        shape: Vec<usize>,
        indices: Vec<i64>,
        values: Vec<T>,
    ) -> Self {
        Self {
            shape,
            indices,
            values,
        }
    }
}

/// Kind-tagged record sequence. The value kind is resolved at construction;
/// combining arrays of different kinds promotes through
/// [`ValueKind::promote`].
#[derive(Debug, Clone, PartialEq)]
pub enum SparseArray {
    Int(SparseSeq<i64>),
    Float(SparseSeq<f64>),
}

impl SparseArray {
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
        }
    }

    #[inline]
    #[must_use]
    pub fn ndim(&self) -> usize {
        match self {
            Self::Int(s) => s.ndim(),
            Self::Float(s) => s.ndim(),
        }
    }

    #[inline]
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Int(s) => s.shape(),
            Self::Float(s) => s.shape(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int(s) => s.nnz(),
            Self::Float(s) => s.nnz(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<SparseSeq<i64>> for SparseArray {
    fn from(seq: SparseSeq<i64>) -> Self {
        Self::Int(seq)
    }
}

impl From<SparseSeq<f64>> for SparseArray {
    fn from(seq: SparseSeq<f64>) -> Self {
        Self::Float(seq)
    }
}
