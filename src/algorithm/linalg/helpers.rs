//! Helper functions for linear algebra operations
//!
//! Validation utilities and raw-buffer helpers shared by the decompositions.

use crate::error::{Error, Result};
use crate::matrix::{Matrix, Shape};

/// Validate matrix is square, returning its order
pub fn validate_square_matrix(op: &'static str, shape: Shape) -> Result<usize> {
    if !shape.is_square() {
        return Err(Error::dimension_mismatch(
            op,
            shape.dims(),
            (shape.rows, shape.rows),
        ));
    }
    Ok(shape.rows)
}

/// Validate that a right-hand side has `rows` rows
pub fn validate_rhs_rows(op: &'static str, lhs: Shape, rhs: Shape) -> Result<()> {
    if rhs.rows != lhs.rows {
        return Err(Error::dimension_mismatch(op, lhs.dims(), rhs.dims()));
    }
    Ok(())
}

/// Copy a matrix out as a row-major f64 buffer with its dimensions
pub(crate) fn ingest(a: &Matrix) -> Result<(Vec<f64>, usize, usize)> {
    Ok((a.to_vec()?, a.rows(), a.columns()))
}

/// Row-major transpose of an `rows × cols` buffer
pub(crate) fn transpose_buffer(data: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    let mut out = vec![0.0; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            out[j * rows + i] = data[i * cols + j];
        }
    }
    out
}

/// Returns true if the square buffer equals its transpose exactly
pub(crate) fn is_exactly_symmetric(data: &[f64], n: usize) -> bool {
    (0..n).all(|i| (0..i).all(|j| data[i * n + j] == data[j * n + i]))
}

/// Wrap a row-major buffer as a numeric matrix
#[inline]
pub(crate) fn to_matrix(data: Vec<f64>, rows: usize, cols: usize) -> Matrix {
    Matrix::from_f64_vec(data, Shape::new(rows, cols))
}

/// Divide a buffer by the power of two nearest below its largest magnitude
///
/// Returns the divisor, or 1 when the buffer is all zero or holds a
/// non-finite entry. Power-of-two scaling is exact.
pub(crate) fn normalize_scale(data: &mut [f64]) -> f64 {
    let max = data.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    if max == 0.0 || !max.is_finite() {
        return 1.0;
    }
    let exponent = (max.log2().floor() as i32).clamp(f64::MIN_EXP - 1, f64::MAX_EXP - 1);
    let scale = 2f64.powi(exponent);
    for x in data.iter_mut() {
        *x /= scale;
    }
    scale
}

/// Complex division `(xr + i·xi) / (yr + i·yi)` without intermediate overflow
#[inline]
pub(crate) fn complex_div(xr: f64, xi: f64, yr: f64, yi: f64) -> (f64, f64) {
    if yr.abs() > yi.abs() {
        let r = yi / yr;
        let d = yr + r * yi;
        ((xr + r * xi) / d, (xi - r * xr) / d)
    } else {
        let r = yr / yi;
        let d = yi + r * yr;
        ((r * xr + xi) / d, (r * xi - xr) / d)
    }
}
