//! Concatenation of record sequences with value-kind promotion.

use stipple_core::{Error, Result, SparseArray, SparseSeq, Value, ValueKind};

/// Concatenate record sequences of identical shape into one un-deduplicated
/// sequence, promoting the value kind to the least general common kind (any
/// floating-point input forces a floating-point output, with integer values
/// re-encoded exactly). No summing, no sorting: condition the result with
/// `dedup` if one record per cell is needed.
pub fn add(arrays: &[SparseArray]) -> Result<SparseArray> {
    let first = arrays
        .first()
        .ok_or_else(|| Error::InvalidParts("add requires at least one sequence".into()))?;
    let shape = first.shape().to_vec();
    for a in &arrays[1..] {
        if a.shape() != shape {
            return Err(Error::shape_mismatch(&shape, a.shape()));
        }
    }
    let kind = arrays
        .iter()
        .fold(ValueKind::Int, |k, a| ValueKind::promote(k, a.kind()));
    let total: usize = arrays.iter().map(SparseArray::len).sum();
    let ndim = shape.len();
    match kind {
        ValueKind::Int => {
            let mut indices = Vec::with_capacity(total * ndim);
            let mut values: Vec<i64> = Vec::with_capacity(total);
            for a in arrays {
                // promote() returned Int, so every input is Int
                if let SparseArray::Int(s) = a {
                    indices.extend_from_slice(&s.indices);
                    values.extend_from_slice(&s.values);
                }
            }
            Ok(SparseArray::Int(SparseSeq::from_parts_unchecked(
                shape, indices, values,
            )))
        }
        ValueKind::Float => {
            let mut indices = Vec::with_capacity(total * ndim);
            let mut values: Vec<f64> = Vec::with_capacity(total);
            for a in arrays {
                match a {
                    SparseArray::Int(s) => {
                        indices.extend_from_slice(&s.indices);
                        values.extend(s.values.iter().map(|&v| f64::from_int(v)));
                    }
                    SparseArray::Float(s) => {
                        indices.extend_from_slice(&s.indices);
                        values.extend_from_slice(&s.values);
                    }
                }
            }
            Ok(SparseArray::Float(SparseSeq::from_parts_unchecked(
                shape, indices, values,
            )))
        }
    }
}
