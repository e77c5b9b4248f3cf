use stipple_core::{Error, SparseSeq};
use stipple_kernels::*;

fn scrambled() -> SparseSeq<i64> {
    SparseSeq::from_parts(
        vec![5],
        vec![4, 4, 3, 2, 1, 2, 3, 0, 0],
        vec![10, 20, 1, 30, 40, 50, -1, 0, 60],
        true,
    )
    .unwrap()
}

// Exercises the parallel code paths: well above the serial-scatter and
// serial-prune thresholds.
fn large() -> SparseSeq<i64> {
    let nnz = 20_000usize;
    let indices: Vec<i64> = (0..nnz).map(|k| (k % 100) as i64).collect();
    let values: Vec<i64> = (0..nnz).map(|k| (k % 7) as i64).collect();
    SparseSeq::from_parts(vec![100], indices, values, true).unwrap()
}

#[test]
fn dedup_is_idempotent() {
    let a = scrambled();
    let once = dedup_with(&a, 48).unwrap();
    let twice = dedup_with(&once, 48).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn dedup_chunk_size_invariance() {
    let a = scrambled();
    // 16 bytes per record: one-record chunks up to whole-input chunks.
    let reference = dedup_with(&a, DEFAULT_CHUNKSIZE).unwrap();
    for chunksize in [16, 32, 48, 64, 160, 1 << 20] {
        assert_eq!(dedup_with(&a, chunksize).unwrap(), reference);
    }
}

#[test]
fn dedup_preserves_sums() {
    let a = scrambled();
    let d = dedup_with(&a, 48).unwrap();
    assert_eq!(toarray(&d), toarray(&a));
}

#[test]
fn dedup_keeps_zero_sums_prune_drops_them() {
    // (3, 1) and (3, -1) cancel: dedup must keep the zero-sum cell, a
    // following prune must drop it.
    let a = scrambled();
    let d = dedup_with(&a, 48).unwrap();
    assert!(d.indices.contains(&3));
    assert!(d.values.contains(&0));
    let p = prune_with(&d, 48).unwrap();
    assert!(!p.indices.contains(&3));
    assert!(!p.values.contains(&0));
}

#[test]
fn dedup_distinct_input_keeps_length() {
    let a = SparseSeq::from_parts(vec![5], vec![3, 0, 4], vec![7i64, 8, 9], true).unwrap();
    let d = dedup_with(&a, 16).unwrap();
    assert_eq!(d.nnz(), a.nnz());
    assert_eq!(d.indices, vec![0, 3, 4]);
    assert_eq!(d.values, vec![8, 7, 9]);
}

#[test]
fn dedup_rank_zero_collapses_to_one_record() {
    let a = SparseSeq::from_parts(vec![], vec![], vec![1i64, 2, 3], true).unwrap();
    let d = dedup_with(&a, 8).unwrap();
    assert_eq!(d.nnz(), 1);
    assert_eq!(d.values, vec![6]);
    assert!(d.indices.is_empty());
}

#[test]
fn dedup_empty_input() {
    let a = SparseSeq::<f64>::empty(vec![3]);
    let d = dedup_with(&a, 48).unwrap();
    assert!(d.is_empty());
    assert_eq!(d.shape, vec![3]);
}

#[test]
fn dedup_inplace_matches_copying() {
    let a = scrambled();
    let copied = dedup_with(&a, 48).unwrap();
    let mut inplace = scrambled();
    dedup_inplace_with(&mut inplace, 48).unwrap();
    assert_eq!(inplace, copied);
}

#[test]
fn prune_is_idempotent() {
    let a = scrambled();
    let once = prune_with(&a, 48).unwrap();
    let twice = prune_with(&once, 48).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn prune_chunk_size_invariance() {
    let a = large();
    let reference = prune_with(&a, DEFAULT_CHUNKSIZE).unwrap();
    for chunksize in [16, 1 << 10, 1 << 16] {
        assert_eq!(prune_with(&a, chunksize).unwrap(), reference);
    }
}

#[test]
fn prune_is_an_order_preserving_subsequence() {
    let a = large();
    let p = prune_with(&a, 1 << 10).unwrap();
    let expected: Vec<i64> = a.values.iter().copied().filter(|&v| v != 0).collect();
    assert_eq!(p.values, expected);
    assert!(p.nnz() <= a.nnz());
    let expected_idx: Vec<i64> = a
        .values
        .iter()
        .zip(&a.indices)
        .filter(|(&v, _)| v != 0)
        .map(|(_, &i)| i)
        .collect();
    assert_eq!(p.indices, expected_idx);
}

#[test]
fn prune_inplace_matches_copying() {
    let a = large();
    let copied = prune_with(&a, 1 << 10).unwrap();
    let mut inplace = large();
    prune_inplace_with(&mut inplace, 1 << 10).unwrap();
    assert_eq!(inplace, copied);
}

#[test]
fn large_dedup_and_scatter() {
    let a = large();
    // Every index class 0..100 receives 200 contributions of k % 7.
    let d = dedup_with(&a, 1 << 10).unwrap();
    assert_eq!(d.nnz(), 100);
    assert_eq!(toarray(&d), toarray(&a));
}

#[test]
fn zero_chunksize_is_rejected() {
    let a = scrambled();
    assert!(matches!(
        dedup_with(&a, 0).unwrap_err(),
        Error::InvalidChunksize { chunksize: 0 }
    ));
    assert!(matches!(
        prune_with(&a, 0).unwrap_err(),
        Error::InvalidChunksize { chunksize: 0 }
    ));
}

#[test]
fn global_chunksize_roundtrip() {
    // Other tests use the explicit-bound variants, so resizing the global
    // here cannot break them; any valid bound yields identical results.
    assert!(chunksize() > 0);
    set_chunksize(64);
    assert_eq!(chunksize(), 64);
    let a = scrambled();
    let d = dedup(&a).unwrap();
    assert_eq!(d, dedup_with(&a, DEFAULT_CHUNKSIZE).unwrap());
    let p = prune(&a).unwrap();
    assert_eq!(p, prune_with(&a, DEFAULT_CHUNKSIZE).unwrap());
    let mut b = scrambled();
    dedup_inplace(&mut b).unwrap();
    assert_eq!(b, d);
    let mut c = scrambled();
    prune_inplace(&mut c).unwrap();
    assert_eq!(c, p);
    set_chunksize(DEFAULT_CHUNKSIZE);
}
