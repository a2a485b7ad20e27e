//! Jacobi rotation utilities for the one-sided SVD
//!
//! The rotation parameters use the numerically stable LAPACK formula to
//! avoid catastrophic cancellation.

use std::cmp::Ordering;

/// Jacobi rotation parameters (cosine and sine of rotation angle).
///
/// These parameters define a Givens rotation matrix:
/// ```text
/// J = [ c  -s ]
///     [ s   c ]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JacobiRotation {
    /// Cosine of rotation angle
    pub c: f64,
    /// Sine of rotation angle
    pub s: f64,
}

impl JacobiRotation {
    /// Compute the rotation that zeroes the off-diagonal of a 2x2 Gram block.
    ///
    /// # Algorithm
    /// ```text
    /// τ = (a_qq - a_pp) / (2 * a_pq)
    /// t = sign(τ) / (|τ| + sqrt(1 + τ²))
    /// c = 1 / sqrt(1 + t²)
    /// s = t * c
    /// ```
    #[inline]
    pub fn compute(a_pp: f64, a_qq: f64, a_pq: f64) -> Self {
        let tau_den = 2.0 * a_pq;
        if tau_den.abs() < 1e-300 {
            return Self { c: 1.0, s: 0.0 };
        }

        let tau = (a_qq - a_pp) / tau_den;
        let t = if tau >= 0.0 {
            1.0 / (tau + (1.0 + tau * tau).sqrt())
        } else {
            -1.0 / (-tau + (1.0 + tau * tau).sqrt())
        };

        let c = 1.0 / (1.0 + t * t).sqrt();
        Self { c, s: t * c }
    }
}

/// Apply a Jacobi rotation to columns `p` and `q` of a row-major matrix.
///
/// Computes: `[col_p', col_q'] = [col_p, col_q] @ [[c, s], [-s, c]]`
#[inline]
pub fn apply_rotation_to_columns(
    data: &mut [f64],
    rows: usize,
    cols: usize,
    p: usize,
    q: usize,
    rot: &JacobiRotation,
) {
    let JacobiRotation { c, s } = *rot;
    for i in 0..rows {
        let idx_p = i * cols + p;
        let idx_q = i * cols + q;
        let val_p = data[idx_p];
        let val_q = data[idx_q];
        data[idx_p] = c * val_p - s * val_q;
        data[idx_q] = s * val_p + c * val_q;
    }
}

/// Gram matrix elements `(a_pp, a_qq, a_pq)` for columns `p` and `q`.
#[inline]
pub fn compute_gram_elements(
    b: &[f64],
    rows: usize,
    cols: usize,
    p: usize,
    q: usize,
) -> (f64, f64, f64) {
    let mut a_pp = 0.0;
    let mut a_qq = 0.0;
    let mut a_pq = 0.0;
    for i in 0..rows {
        let bp = b[i * cols + p];
        let bq = b[i * cols + q];
        a_pp += bp * bp;
        a_qq += bq * bq;
        a_pq += bp * bq;
    }
    (a_pp, a_qq, a_pq)
}

/// Sort indices by value (descending).
#[inline]
pub fn argsort_desc(values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&i, &j| values[j].partial_cmp(&values[i]).unwrap_or(Ordering::Equal));
    indices
}

/// Reorder matrix columns according to an index permutation, keeping `new_cols`.
#[inline]
pub fn permute_columns(
    data: &[f64],
    rows: usize,
    cols: usize,
    indices: &[usize],
    new_cols: usize,
) -> Vec<f64> {
    let mut result = vec![0.0; rows * new_cols];
    for (new_idx, &old_idx) in indices.iter().take(new_cols).enumerate() {
        for i in 0..rows {
            result[i * new_cols + new_idx] = data[i * cols + old_idx];
        }
    }
    result
}

/// Identity matrix [n × n].
#[inline]
pub fn identity_matrix(n: usize) -> Vec<f64> {
    let mut result = vec![0.0; n * n];
    for i in 0..n {
        result[i * n + i] = 1.0;
    }
    result
}

/// Compute column norms and normalize columns in place.
///
/// Columns whose norm is zero are left as zero. Returns the norms.
#[inline]
pub fn normalize_columns(data: &mut [f64], rows: usize, cols: usize) -> Vec<f64> {
    let mut norms = vec![0.0; cols];
    for (j, norm_out) in norms.iter_mut().enumerate() {
        let norm = (0..rows)
            .map(|i| data[i * cols + j])
            .fold(0.0, f64::hypot);
        *norm_out = norm;
        if norm > 0.0 {
            for i in 0..rows {
                data[i * cols + j] /= norm;
            }
        }
    }
    norms
}

/// Replace the zero columns of a row-major buffer with unit vectors
/// orthogonal to every other column.
///
/// Each replacement is the standard basis vector with the largest residual
/// after two Gram-Schmidt passes. Requires `rows >= cols` and the nonzero
/// columns to be orthonormal.
pub fn fill_null_columns(data: &mut [f64], rows: usize, cols: usize, norms: &[f64]) {
    for j in (0..cols).filter(|&j| norms[j] == 0.0) {
        let mut best: Option<(f64, Vec<f64>)> = None;
        for e in 0..rows {
            let mut w = vec![0.0; rows];
            w[e] = 1.0;
            for _ in 0..2 {
                for c in (0..cols).filter(|&c| c != j) {
                    let dot: f64 = (0..rows).map(|i| data[i * cols + c] * w[i]).sum();
                    for (i, wi) in w.iter_mut().enumerate() {
                        *wi -= dot * data[i * cols + c];
                    }
                }
            }
            let norm = w.iter().copied().fold(0.0, f64::hypot);
            if best.as_ref().is_none_or(|(b, _)| norm > *b) {
                best = Some((norm, w));
            }
        }
        if let Some((norm, w)) = best.filter(|(norm, _)| *norm > 0.0) {
            for (i, wi) in w.iter().enumerate() {
                data[i * cols + j] = wi / norm;
            }
        }
    }
}
