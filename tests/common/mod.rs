//! Common test utilities
#![allow(dead_code)]

use matr::Matrix;

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two numeric matrices have the same shape and close values
pub fn assert_matrix_close(a: &Matrix, b: &Matrix, rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape mismatch", msg);
    assert_allclose_f64(
        &a.to_vec().expect("numeric matrix"),
        &b.to_vec().expect("numeric matrix"),
        rtol,
        atol,
        msg,
    );
}

/// Assert a square row-major buffer is close to the identity
pub fn assert_near_identity(data: &[f64], n: usize, tol: f64, msg: &str) {
    for i in 0..n {
        for j in 0..n {
            let expected = if i == j { 1.0 } else { 0.0 };
            let actual = data[i * n + j];
            assert!(
                (actual - expected).abs() <= tol,
                "{}: element [{},{}] differs: {} vs {}",
                msg,
                i,
                j,
                actual,
                expected
            );
        }
    }
}

/// Build a numeric matrix from nested rows
pub fn mat<R: AsRef<[f64]>>(rows: &[R]) -> Matrix {
    Matrix::from_rows(rows).expect("rectangular rows")
}
