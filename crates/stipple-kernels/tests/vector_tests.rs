use stipple_core::{SparseArray, SparseSeq, ValueKind};
use stipple_kernels::*;

// Rank-1 fixture over extent 5; duplicate tuples at 4, 2, 3 and 0, with one
// exact-zero record at 0.
fn sample_vector() -> SparseSeq<i64> {
    SparseSeq::from_parts(
        vec![5],
        vec![4, 4, 3, 2, 1, 2, 3, 0, 0],
        vec![10, 20, 1, 30, 40, 50, -1, 0, 60],
        true,
    )
    .unwrap()
}

// 3 records per chunk, matching the fixture's record size of 16 bytes.
const CHUNK3: usize = 16 * 3;

#[test]
fn test_ndim_shape() {
    let a = sample_vector();
    assert_eq!(a.ndim(), 1);
    assert_eq!(a.shape(), &[5]);
}

#[test]
fn test_indices() {
    let a = sample_vector();
    let idx = indices(&a);
    assert_eq!(idx.len(), 1);
    assert_eq!(idx[0], vec![4, 4, 3, 2, 1, 2, 3, 0, 0]);
}

#[test]
fn test_values() {
    let a = sample_vector();
    assert_eq!(values(&a), vec![10, 20, 1, 30, 40, 50, -1, 0, 60]);
}

#[test]
fn test_extract() {
    let a = sample_vector();
    let (idx, val, shape) = extract(&a);
    assert_eq!(idx, indices(&a));
    assert_eq!(val, values(&a));
    assert_eq!(shape, a.shape);
}

#[test]
fn test_dedup() {
    let a = sample_vector();
    let d = dedup_with(&a, CHUNK3).unwrap();
    assert_eq!(d.indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(d.values, vec![60, 40, 80, 0, 30]);
    assert_eq!(d.shape, vec![5]);
}

#[test]
fn test_dedup_inplace() {
    let mut a = sample_vector();
    dedup_inplace_with(&mut a, CHUNK3).unwrap();
    assert_eq!(a.indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(a.values, vec![60, 40, 80, 0, 30]);
}

#[test]
fn test_prune() {
    let a = sample_vector();
    let p = prune_with(&a, CHUNK3).unwrap();
    assert_eq!(p.indices, vec![4, 4, 3, 2, 1, 2, 3, 0]);
    assert_eq!(p.values, vec![10, 20, 1, 30, 40, 50, -1, 60]);
}

#[test]
fn test_prune_inplace() {
    let mut a = sample_vector();
    prune_inplace_with(&mut a, CHUNK3).unwrap();
    assert_eq!(a.indices, vec![4, 4, 3, 2, 1, 2, 3, 0]);
    assert_eq!(a.values, vec![10, 20, 1, 30, 40, 50, -1, 60]);
}

#[test]
fn test_toarray() {
    let a = sample_vector();
    assert_eq!(toarray(&a), vec![60, 40, 80, 0, 30]);
}

#[test]
fn test_convert_is_array() {
    let a = sample_vector();
    match convert(&a, &DenseBackend).unwrap() {
        Materialized::Array(dense) => assert_eq!(dense, vec![60, 40, 80, 0, 30]),
        Materialized::Matrix(_) => panic!("rank-1 sequence must convert to an array"),
    }
}

#[test]
fn test_tagged_decomposition() {
    let a = SparseArray::from(sample_vector());
    assert_eq!(array_indices(&a), indices(&sample_vector()));
    match array_values(&a) {
        ArrayValues::Int(v) => assert_eq!(v, vec![10, 20, 1, 30, 40, 50, -1, 0, 60]),
        ArrayValues::Float(_) => panic!("int sequence must decompose to int values"),
    }
    let (idx, val, shape) = array_extract(&a);
    assert_eq!(idx, array_indices(&a));
    assert_eq!(val, array_values(&a));
    assert_eq!(shape, vec![5]);

    let f = SparseArray::from(
        SparseSeq::from_parts(vec![5], vec![1, 2], vec![-40.0, 0.5], true).unwrap(),
    );
    match array_values(&f) {
        ArrayValues::Float(v) => assert_eq!(v, vec![-40.0, 0.5]),
        ArrayValues::Int(_) => panic!("float sequence must decompose to float values"),
    }
}

#[test]
fn test_add_int() {
    let a = SparseArray::from(sample_vector());
    let other = SparseArray::from(
        SparseSeq::from_parts(vec![5], vec![1, 2], vec![-40i64, 70], true).unwrap(),
    );
    let out = add(&[a, other]).unwrap();
    assert_eq!(out.kind(), ValueKind::Int);
    assert_eq!(out.len(), 11);
    match out {
        SparseArray::Int(s) => {
            assert_eq!(s.indices, vec![4, 4, 3, 2, 1, 2, 3, 0, 0, 1, 2]);
            assert_eq!(s.values, vec![10, 20, 1, 30, 40, 50, -1, 0, 60, -40, 70]);
        }
        SparseArray::Float(_) => panic!("int + int must stay int"),
    }
}

#[test]
fn test_add_float() {
    let a = SparseArray::from(sample_vector());
    let other = SparseArray::from(
        SparseSeq::from_parts(vec![5], vec![1, 2], vec![-40.0, 0.5], true).unwrap(),
    );
    let out = add(&[a, other]).unwrap();
    assert_eq!(out.kind(), ValueKind::Float);
    match out {
        SparseArray::Float(s) => {
            assert_eq!(s.indices, vec![4, 4, 3, 2, 1, 2, 3, 0, 0, 1, 2]);
            assert_eq!(
                s.values,
                vec![10.0, 20.0, 1.0, 30.0, 40.0, 50.0, -1.0, 0.0, 60.0, -40.0, 0.5]
            );
        }
        SparseArray::Int(_) => panic!("float input must force a float result"),
    }
}

#[test]
fn test_add_shape_mismatch() {
    let a = SparseArray::from(sample_vector());
    let other = SparseArray::from(
        SparseSeq::from_parts(vec![6], vec![1], vec![1i64], true).unwrap(),
    );
    let err = add(&[a, other]).unwrap_err();
    assert!(err.to_string().contains("shape mismatch"));
}

#[test]
fn test_add_empty_list_rejected() {
    assert!(add(&[]).is_err());
}
