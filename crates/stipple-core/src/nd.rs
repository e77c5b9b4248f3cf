pub trait SparseNd {
    fn nnz(&self) -> usize;
    fn ndim(&self) -> usize;
    fn shape(&self) -> &[usize];
}

use crate::records::{SparseArray, SparseSeq};

impl<T> SparseNd for SparseSeq<T> {
    #[inline]
    fn nnz(&self) -> usize {
        self.nnz()
    }

    #[inline]
    fn ndim(&self) -> usize {
        self.ndim()
    }

    #[inline]
    fn shape(&self) -> &[usize] {
        &self.shape
    }
}

impl SparseNd for SparseArray {
    #[inline]
    fn nnz(&self) -> usize {
        self.len()
    }

    #[inline]
    fn ndim(&self) -> usize {
        self.ndim()
    }

    #[inline]
    fn shape(&self) -> &[usize] {
        self.shape()
    }
}
