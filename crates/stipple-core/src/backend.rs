//! Backend matrix abstraction boundary.

use crate::error::Result;
use crate::kind::Value;

/// Capability interface supplied by the surrounding system for building
/// matrix objects out of a record stream. The engine hands over per-axis
/// index arrays, values and the declared shape (rank 1 or 2) and treats the
/// returned handle as opaque; duplicate index tuples in the stream must be
/// accumulated by the backend.
pub trait MatrixBackend<T: Value> {
    type Matrix;

    fn assemble(
        &self,
        indices: &[Vec<i64>],
        values: &[T],
        shape: &[usize],
    ) -> Result<Self::Matrix>;
}
