//! Integration tests for dense algebra and the solver facade
//!
//! Tests verify:
//! - Transpose, product, norms, trace
//! - Solve correctness for square, tall, and wide systems
//! - Determinant sign under row swaps
//! - Rank and condition number via SVD, at any input magnitude
//! - Error conditions: DimensionMismatch, SingularMatrix

mod common;

use common::{assert_allclose_f64, assert_matrix_close, mat};
use matr::algorithm::linalg;
use matr::error::Error;
use matr::prelude::*;

// ============================================================================
// Dense Algebra
// ============================================================================

#[test]
fn test_transpose_and_product() {
    let a = mat(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let at = a.transpose();
    assert_eq!(at.shape(), Shape::new(3, 2));
    assert_eq!(at.transpose(), a);

    let gram = a.matrix_multiply(&at).unwrap();
    assert_eq!(gram.to_vec().unwrap(), vec![14.0, 32.0, 32.0, 77.0]);
}

#[test]
fn test_product_inner_dimension_mismatch() {
    let a = zeros(2, 3);
    assert_eq!(
        a.matrix_multiply(&zeros(2, 3)).unwrap_err(),
        Error::DimensionMismatch {
            op: "matrix_multiply",
            lhs: (2, 3),
            rhs: (2, 3)
        }
    );
}

#[test]
fn test_identity_product() {
    let a = random_seeded(4, 3, 7);
    assert_eq!(identity(4, 4).matrix_multiply(&a).unwrap(), a);
    assert_eq!(a.matrix_multiply(&identity(3, 3)).unwrap(), a);
}

#[test]
fn test_parallel_threshold_does_not_change_result() {
    let a = random_seeded(70, 40, 1);
    let b = random_seeded(40, 30, 2);
    let serial = a
        .matrix_multiply_with_config(
            &b,
            &LinalgConfig::default().with_parallel_threshold(usize::MAX),
        )
        .unwrap();
    let parallel = a
        .matrix_multiply_with_config(&b, &LinalgConfig::default().with_parallel_threshold(1))
        .unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn test_norms_and_trace() {
    let a = mat(&[[1.0, -2.0], [-3.0, 4.0]]);
    assert_eq!(a.norm1().unwrap(), 6.0);
    assert_eq!(a.norm_inf().unwrap(), 7.0);
    assert_allclose_f64(&[a.norm_f().unwrap()], &[30f64.sqrt()], 1e-14, 0.0, "norm_f");
    assert_eq!(a.trace().unwrap(), 5.0);

    // norm2 is the largest singular value
    let s = a.svd().unwrap();
    assert_allclose_f64(&[a.norm2().unwrap()], &[s.singular_values()[0]], 1e-15, 0.0, "norm2");
    assert!(a.norm2().unwrap() <= a.norm_f().unwrap());
}

#[test]
fn test_norms_propagate_nan() {
    let a = nan(2, 2);
    assert!(a.norm1().unwrap().is_nan());
    assert!(a.norm_inf().unwrap().is_nan());
    assert!(a.norm_f().unwrap().is_nan());

    let mut b = mat(&[[1.0, 2.0], [3.0, 4.0]]);
    b.set(0, 0, f64::NAN).unwrap();
    assert!(b.norm1().unwrap().is_nan());
    assert!(b.norm_inf().unwrap().is_nan());
}

#[test]
fn test_frobenius_avoids_overflow() {
    let a = Matrix::filled(2, 2, 1e200);
    assert_allclose_f64(&[a.norm_f().unwrap()], &[2e200], 1e-14, 0.0, "norm_f");
}

// ============================================================================
// Solve
// ============================================================================

#[test]
fn test_solve_residual() {
    let a = mat(&[
        [4.0, 1.0, 0.0, 2.0],
        [1.0, 5.0, 1.0, 0.0],
        [0.0, 1.0, 6.0, 1.0],
        [2.0, 0.0, 1.0, 7.0],
    ]);
    let b = mat(&[[1.0, 0.0], [2.0, 1.0], [3.0, 0.0], [4.0, -1.0]]);
    let x = a.solve(&b).unwrap();
    assert_matrix_close(&a.matrix_multiply(&x).unwrap(), &b, 1e-12, 1e-12, "A·X = B");
    assert_eq!(linalg::solve(&a, &b).unwrap(), x);
}

#[test]
fn test_solve_row_count_mismatch() {
    let a = identity(3, 3);
    assert!(matches!(
        a.solve(&zeros(4, 1)),
        Err(Error::DimensionMismatch { op: "solve", .. })
    ));
}

#[test]
fn test_solve_singular_square() {
    let a = mat(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]]);
    assert_eq!(
        a.solve(&ones(3, 1)).unwrap_err(),
        Error::SingularMatrix { op: "solve" }
    );
}

#[test]
fn test_least_squares_normal_equations() {
    let a = mat(&[[1.0, 1.0], [1.0, 2.0], [1.0, 3.0], [1.0, 4.0]]);
    let b = mat(&[[6.0], [5.0], [7.0], [10.0]]);
    let x = a.solve(&b).unwrap();
    // Residual is orthogonal to the column space
    let r = a.matrix_multiply(&x).unwrap().minus(&b).unwrap();
    let at_r = a.transpose().matrix_multiply(&r).unwrap();
    assert_allclose_f64(&at_r.to_vec().unwrap(), &[0.0, 0.0], 0.0, 1e-12, "Aᵀr");
    assert_allclose_f64(&x.to_vec().unwrap(), &[3.5, 1.4], 1e-12, 1e-12, "x");
}

#[test]
fn test_wide_solve_is_minimum_norm() {
    let a = mat(&[[1.0, 2.0, 2.0]]);
    let b = mat(&[[9.0]]);
    let x = a.solve(&b).unwrap();
    // Minimum-norm solution lies along the row: x = b / |a|² · aᵀ
    assert_allclose_f64(&x.to_vec().unwrap(), &[1.0, 2.0, 2.0], 1e-12, 1e-12, "x");
}

#[test]
fn test_solve_transpose_consistency() {
    let a = mat(&[[3.0, 1.0, 0.0], [1.0, 4.0, 2.0], [0.0, 1.0, 5.0]]);
    let b = mat(&[[1.0, 2.0, 3.0], [0.0, -1.0, 4.0]]);
    let x = a.solve_transpose(&b).unwrap();
    assert_eq!(x.shape(), Shape::new(2, 3));
    assert_matrix_close(&x.matrix_multiply(&a).unwrap(), &b, 1e-12, 1e-12, "X·A = B");

    let direct = a.transpose().solve(&b.transpose()).unwrap().transpose();
    assert_matrix_close(&x, &direct, 1e-15, 1e-15, "transpose route");
}

#[test]
fn test_inverse_round_trip() {
    let a = mat(&[[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]]);
    let inv = linalg::inverse(&a).unwrap();
    assert_matrix_close(
        &a.matrix_multiply(&inv).unwrap(),
        &identity(3, 3),
        0.0,
        1e-12,
        "A·A⁻¹",
    );
    assert_allclose_f64(
        &inv.to_vec().unwrap(),
        &[0.75, 0.5, 0.25, 0.5, 1.0, 0.5, 0.25, 0.5, 0.75],
        1e-12,
        1e-12,
        "A⁻¹",
    );
}

// ============================================================================
// Determinant, Rank, Condition
// ============================================================================

#[test]
fn test_det_row_swap_negates() {
    let a = mat(&[[2.0, 1.0, 3.0], [0.0, -1.0, 4.0], [1.0, 2.0, 0.0]]);
    let swapped = mat(&[[0.0, -1.0, 4.0], [2.0, 1.0, 3.0], [1.0, 2.0, 0.0]]);
    let d = a.det().unwrap();
    assert_allclose_f64(&[d], &[-9.0], 1e-12, 1e-12, "det");
    assert_allclose_f64(&[swapped.det().unwrap()], &[-d], 1e-12, 1e-12, "swapped det");
}

#[test]
fn test_det_requires_square() {
    assert_eq!(
        linalg::det(&zeros(2, 3)).unwrap_err(),
        Error::DimensionMismatch {
            op: "det",
            lhs: (2, 3),
            rhs: (2, 2)
        }
    );
}

#[test]
fn test_det_singular_and_empty() {
    assert_eq!(mat(&[[1.0, 2.0], [2.0, 4.0]]).det().unwrap(), 0.0);
    assert_eq!(zeros(0, 0).det().unwrap(), 1.0);
}

#[test]
fn test_rank_of_dependent_rows() {
    // Third row is the sum of the first two
    let a = mat(&[[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [1.0, 2.0, 0.0]]);
    assert_eq!(a.rank().unwrap(), 2);
    assert_eq!(identity(5, 5).rank().unwrap(), 5);
    assert_eq!(zeros(3, 2).rank().unwrap(), 0);
}

#[test]
fn test_cond_of_identity() {
    for n in 1..=6 {
        assert_eq!(identity(n, n).cond().unwrap(), 1.0, "n = {n}");
    }
}

#[test]
fn test_cond_edge_cases() {
    assert_eq!(mat(&[[1.0, 0.0], [0.0, 0.0]]).cond().unwrap(), f64::INFINITY);
    assert!(zeros(0, 0).cond().unwrap().is_nan());
    assert_allclose_f64(
        &[mat(&[[10.0, 0.0], [0.0, 0.5]]).cond().unwrap()],
        &[20.0],
        1e-15,
        0.0,
        "cond",
    );
}

#[test]
fn test_svd_queries_scale_invariant() {
    let a = mat(&[[1.0, 1.0], [0.0, 1.0]]);
    let golden = (1.0 + 5f64.sqrt()) / 2.0;
    for c in [1.0, 1e160, 1e-170] {
        let scaled = a.scale(c).unwrap();
        assert_allclose_f64(&[scaled.norm2().unwrap()], &[golden * c], 1e-12, 0.0, "norm2");
        assert_allclose_f64(&[scaled.cond().unwrap()], &[golden * golden], 1e-12, 0.0, "cond");
        assert_eq!(scaled.rank().unwrap(), 2, "c = {c}");
    }
}
