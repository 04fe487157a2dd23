// Integration tests for snnf tensors
//
// Shape behavior across crates' public API: construction policy, reshape,
// transpose, matmul, broadcasting and reductions.

use snnf::prelude::*;
use snnf::rng;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

fn assert_vec_approx(got: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(
        got.len(),
        expected.len(),
        "length mismatch: {} vs {}",
        got.len(),
        expected.len()
    );
    for (i, (g, e)) in got.iter().zip(expected.iter()).enumerate() {
        assert!(
            approx_eq(*g, *e, tol),
            "index {}: got {} expected {} (tol {})",
            i,
            g,
            e,
            tol
        );
    }
}

// Construction

#[test]
fn test_construct_is_zeroed() -> snnf::Result<()> {
    let t = Tensor::<f32>::new((2, 3))?;
    assert_eq!(t.dims(), &[2, 3]);
    assert_eq!(t.elem_count(), 6);
    assert_eq!(t.dtype(), DType::F32);
    assert!(t.as_slice().iter().all(|&v| v == 0.0));
    Ok(())
}

#[test]
fn test_empty_and_zero_sized_shapes_rejected() {
    assert!(matches!(Tensor::<f32>::new(Vec::<usize>::new()), Err(Error::EmptyShape)));
    assert!(matches!(Tensor::<f32>::new((3, 0)), Err(Error::ZeroDim { dim: 1, .. })));
    assert!(matches!(
        Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0], (2, 2)),
        Err(Error::ElementCountMismatch { .. })
    ));
}

#[test]
fn test_fill_and_clone_are_independent() -> snnf::Result<()> {
    let mut a = Tensor::<f64>::zeros((2, 2))?;
    a.fill(3.5);
    let mut b = a.clone();
    b.fill(-1.0);
    assert_eq!(a.as_slice(), &[3.5; 4]);
    assert_eq!(b.as_slice(), &[-1.0; 4]);
    Ok(())
}

#[test]
fn test_random_default_range_and_seed() -> snnf::Result<()> {
    let (low, high) = snnf::DEFAULT_UNIFORM_RANGE;
    let mut a = Tensor::<f64>::zeros((16, 16))?;
    rng::manual_seed(7);
    a.random();
    assert!(a.as_slice().iter().all(|&v| v >= low && v < high));

    let mut b = Tensor::<f64>::zeros((16, 16))?;
    rng::manual_seed(7);
    b.random();
    assert_eq!(a, b);
    Ok(())
}

// Reshape

#[test]
fn test_reshape_round_trip() -> snnf::Result<()> {
    let original = Tensor::<f32>::from_f64_slice(&[1., 2., 3., 4., 5., 6.], (2, 3))?;
    let mut t = original.clone();
    t.reshape((3, 2))?;
    assert_eq!(t.dims(), &[3, 2]);
    t.reshape(6)?;
    t.reshape((2, 3))?;
    assert_eq!(t, original);
    Ok(())
}

#[test]
fn test_reshape_element_mismatch_keeps_shape() -> snnf::Result<()> {
    let mut t = Tensor::<f32>::zeros((2, 3))?;
    let err = t.reshape((4, 2)).unwrap_err();
    assert!(matches!(err, Error::ReshapeElementMismatch { src: 6, dst: 8, .. }));
    assert!(err.is_shape_error());
    assert_eq!(t.dims(), &[2, 3]);
    Ok(())
}

// Transpose

#[test]
fn test_transpose_twice_is_identity() -> snnf::Result<()> {
    let mut a = Tensor::<f64>::zeros((3, 5))?;
    a.random_with(&mut <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1));
    let at = a.transpose()?;
    assert_eq!(at.dims(), &[5, 3]);
    assert_eq!(at.get(&[4, 2])?, a.get(&[2, 4])?);
    assert_eq!(at.transpose()?, a);
    Ok(())
}

#[test]
fn test_transpose_requires_rank_2() -> snnf::Result<()> {
    let t = Tensor::<f32>::zeros((2, 2, 2))?;
    assert!(matches!(t.transpose(), Err(Error::RankMismatch { .. })));
    Ok(())
}

// Matmul

#[test]
fn test_matmul_shapes_and_values() -> snnf::Result<()> {
    let a = Tensor::<f64>::from_f64_slice(&[1., 2., 3., 4., 5., 6.], (2, 3))?;
    let b = Tensor::<f64>::from_f64_slice(&[7., 8., 9., 10., 11., 12.], (3, 2))?;
    let c = a.matmul(&b)?;
    assert_eq!(c.dims(), &[2, 2]);
    assert_eq!(c.as_slice(), &[58., 64., 139., 154.]);
    Ok(())
}

#[test]
fn test_matmul_non_conformant_leaves_operands() -> snnf::Result<()> {
    let a = Tensor::<f32>::ones((2, 3))?;
    let b = Tensor::<f32>::ones((2, 3))?;
    let (a_before, b_before) = (a.clone(), b.clone());
    let err = a.matmul(&b).unwrap_err();
    assert!(matches!(
        err,
        Error::MatmulShapeMismatch { m: 2, k1: 3, k2: 2, n: 3 }
    ));
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
    Ok(())
}

#[test]
fn test_matmul_half_precision() -> snnf::Result<()> {
    use half::f16;
    let a = Tensor::<f16>::from_f64_slice(&[1., 2., 3., 4.], (2, 2))?;
    let b = Tensor::<f16>::ones((2, 1))?;
    let c = a.matmul(&b)?;
    assert_eq!(c.dtype(), DType::F16);
    assert_vec_approx(&c.to_f64_vec(), &[3., 7.], 1e-3);
    Ok(())
}

// Add, sum and broadcast

#[test]
fn test_add_requires_identical_shapes() -> snnf::Result<()> {
    let a = Tensor::<f64>::ones((2, 2))?;
    let b = Tensor::<f64>::ones((1, 2))?;
    assert!(matches!(a.add(&b), Err(Error::ShapeMismatch { .. })));
    assert_eq!(a.add(&a)?.as_slice(), &[2.0; 4]);
    Ok(())
}

#[test]
fn test_sum_keeps_reduced_axis() -> snnf::Result<()> {
    let t = Tensor::<f64>::from_f64_slice(&[1., 2., 3., 4., 5., 6.], (2, 3))?;
    let s0 = t.sum(0)?;
    assert_eq!(s0.dims(), &[1, 3]);
    assert_eq!(s0.as_slice(), &[5., 7., 9.]);
    let s1 = t.sum(1)?;
    assert_eq!(s1.dims(), &[2, 1]);
    assert_eq!(s1.as_slice(), &[6., 15.]);
    assert!(matches!(t.sum(2), Err(Error::DimOutOfRange { dim: 2, rank: 2 })));
    Ok(())
}

#[test]
fn test_broadcast_row_replicates() -> snnf::Result<()> {
    let row = Tensor::<f64>::from_f64_slice(&[1., 2., 3.], (1, 3))?;
    let b = row.broadcast_to((4, 3))?;
    assert_eq!(b.dims(), &[4, 3]);
    for r in 0..4 {
        for c in 0..3 {
            assert_eq!(b.get(&[r, c])?, row.get(&[0, c])?);
        }
    }
    Ok(())
}

#[test]
fn test_broadcast_incompatible() -> snnf::Result<()> {
    let t = Tensor::<f32>::ones((2, 3))?;
    let err = t.broadcast_to((3, 3)).unwrap_err();
    assert!(matches!(err, Error::BroadcastIncompatible { .. }));
    assert!(err.is_shape_error());
    Ok(())
}

#[test]
fn test_broadcast_adds_leading_dims() -> snnf::Result<()> {
    let t = Tensor::<f32>::from_f64_slice(&[1., 2.], 2)?;
    let b = t.broadcast_to((2, 2, 2))?;
    assert_vec_approx(&b.to_f64_vec(), &[1., 2., 1., 2., 1., 2., 1., 2.], 1e-12);
    Ok(())
}
