//! LU, Cholesky, and QR decompositions
//!
//! Each result owns the buffers it needs, so it outlives the source matrix.

use super::helpers::{ingest, to_matrix, validate_rhs_rows, validate_square_matrix};
use crate::error::{Error, Result};
use crate::matrix::{Matrix, Shape};
use tracing::{debug, warn};

// ============================================================================
// LU
// ============================================================================

/// LU decomposition result: PA = LU
///
/// L is lower trapezoidal with unit diagonal (`m × k`), U is upper
/// trapezoidal (`k × n`), with `k = min(m, n)`. P is stored as the row
/// permutation `pivot`, so row `i` of `PA` is row `pivot[i]` of `A`.
///
/// A zero pivot does not abort the factorization; it clears the
/// nonsingular flag and the elimination step for that column is skipped.
#[derive(Clone, Debug)]
pub struct LuDecomposition {
    /// L (strictly below the diagonal) and U (on and above), row-major `m × n`
    lu: Vec<f64>,
    m: usize,
    n: usize,
    pivot: Vec<usize>,
    pivot_sign: f64,
    nonsingular: bool,
}

impl LuDecomposition {
    /// LU decomposition with partial pivoting (Doolittle algorithm)
    pub fn new(a: &Matrix) -> Result<Self> {
        let (mut lu, m, n) = ingest(a)?;
        let k = m.min(n);
        let mut pivot: Vec<usize> = (0..m).collect();
        let mut pivot_sign = 1.0;
        let mut zero_pivots = 0usize;

        for col in 0..k {
            // Find pivot: max absolute value in column col, rows col..m
            let mut pivot_row = col;
            let mut max_val = lu[col * n + col].abs();
            for row in (col + 1)..m {
                let val = lu[row * n + col].abs();
                if val > max_val {
                    max_val = val;
                    pivot_row = row;
                }
            }

            if pivot_row != col {
                for j in 0..n {
                    lu.swap(col * n + j, pivot_row * n + j);
                }
                pivot.swap(col, pivot_row);
                pivot_sign = -pivot_sign;
            }

            let p = lu[col * n + col];
            if p == 0.0 {
                zero_pivots += 1;
                continue;
            }

            // Multipliers, then the trailing submatrix update
            for row in (col + 1)..m {
                lu[row * n + col] /= p;
            }
            for row in (col + 1)..m {
                let multiplier = lu[row * n + col];
                if multiplier == 0.0 {
                    continue;
                }
                for j in (col + 1)..n {
                    lu[row * n + j] -= multiplier * lu[col * n + j];
                }
            }
        }

        let nonsingular = m == n && zero_pivots == 0;
        debug!(m, n, zero_pivots, nonsingular, "lu decomposition");
        Ok(Self {
            lu,
            m,
            n,
            pivot,
            pivot_sign,
            nonsingular,
        })
    }

    /// Shape of the factored matrix
    pub fn shape(&self) -> Shape {
        Shape::new(self.m, self.n)
    }

    /// Whether the factored matrix is square with no zero pivot
    pub fn is_nonsingular(&self) -> bool {
        self.nonsingular
    }

    /// Unit lower trapezoidal factor L [m, min(m, n)]
    pub fn l(&self) -> Matrix {
        let k = self.m.min(self.n);
        let mut l = vec![0.0; self.m * k];
        for i in 0..self.m {
            for j in 0..k.min(i + 1) {
                l[i * k + j] = if i == j { 1.0 } else { self.lu[i * self.n + j] };
            }
        }
        to_matrix(l, self.m, k)
    }

    /// Upper trapezoidal factor U [min(m, n), n]
    pub fn u(&self) -> Matrix {
        let k = self.m.min(self.n);
        let mut u = vec![0.0; k * self.n];
        for i in 0..k {
            for j in i..self.n {
                u[i * self.n + j] = self.lu[i * self.n + j];
            }
        }
        to_matrix(u, k, self.n)
    }

    /// Row permutation: row `i` of `PA` is row `pivot()[i]` of `A`
    pub fn pivot(&self) -> &[usize] {
        &self.pivot
    }

    /// Row permutation as floating point values
    pub fn pivot_f64(&self) -> Vec<f64> {
        self.pivot.iter().map(|&p| p as f64).collect()
    }

    /// Determinant: product of U's diagonal times the permutation sign
    ///
    /// Requires a square matrix. A singular matrix yields 0.
    pub fn det(&self) -> Result<f64> {
        validate_square_matrix("det", self.shape())?;
        Ok((0..self.n).fold(self.pivot_sign, |d, j| d * self.lu[j * self.n + j]))
    }

    /// Solve `A·X = B` by forward and back substitution
    ///
    /// Requires a square, nonsingular matrix and `B.rows == A.rows`.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        validate_square_matrix("lu_solve", self.shape())?;
        validate_rhs_rows("solve", self.shape(), b.shape())?;
        if !self.nonsingular {
            warn!(n = self.n, "lu solve on a singular matrix");
            return Err(Error::SingularMatrix { op: "solve" });
        }

        let n = self.n;
        let nx = b.columns();
        let b_data = b.to_vec()?;

        // X = P·B
        let mut x = vec![0.0; n * nx];
        for (i, &src) in self.pivot.iter().enumerate() {
            x[i * nx..(i + 1) * nx].copy_from_slice(&b_data[src * nx..(src + 1) * nx]);
        }

        // Forward substitution: L·Y = P·B (L has unit diagonal)
        for k in 0..n {
            for i in (k + 1)..n {
                let l_ik = self.lu[i * n + k];
                for j in 0..nx {
                    x[i * nx + j] -= x[k * nx + j] * l_ik;
                }
            }
        }

        // Back substitution: U·X = Y
        for k in (0..n).rev() {
            let u_kk = self.lu[k * n + k];
            for j in 0..nx {
                x[k * nx + j] /= u_kk;
            }
            for i in 0..k {
                let u_ik = self.lu[i * n + k];
                for j in 0..nx {
                    x[i * nx + j] -= x[k * nx + j] * u_ik;
                }
            }
        }

        Ok(to_matrix(x, n, nx))
    }
}

// ============================================================================
// Cholesky
// ============================================================================

/// Cholesky decomposition result: A = LL^T
///
/// Only exists for symmetric positive-definite matrices; construction fails
/// with [`Error::NotPositiveDefinite`] otherwise.
#[derive(Clone, Debug)]
pub struct CholeskyDecomposition {
    l: Vec<f64>,
    n: usize,
}

impl CholeskyDecomposition {
    /// Cholesky decomposition (Cholesky-Banachiewicz algorithm)
    ///
    /// Symmetry is checked exactly, row by row, as the factor is built.
    pub fn new(a: &Matrix) -> Result<Self> {
        let n = validate_square_matrix("cholesky", a.shape())?;
        let a_data = a.to_vec()?;
        let mut l = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..i {
                if a_data[i * n + j] != a_data[j * n + i] {
                    debug!(row = i, column = j, "cholesky: input not symmetric");
                    return Err(Error::NotPositiveDefinite);
                }
                let mut sum_prod = 0.0;
                for k in 0..j {
                    sum_prod += l[i * n + k] * l[j * n + k];
                }
                l[i * n + j] = (a_data[i * n + j] - sum_prod) / l[j * n + j];
            }

            let mut sum_sq = 0.0;
            for k in 0..i {
                sum_sq += l[i * n + k] * l[i * n + k];
            }
            let diag = a_data[i * n + i] - sum_sq;
            if diag.is_nan() || diag <= 0.0 {
                debug!(row = i, diag, "cholesky: non-positive pivot");
                return Err(Error::NotPositiveDefinite);
            }
            l[i * n + i] = diag.sqrt();
        }

        debug!(n, "cholesky decomposition");
        Ok(Self { l, n })
    }

    /// Lower triangular factor L such that A = L @ L^T
    pub fn l(&self) -> Matrix {
        to_matrix(self.l.clone(), self.n, self.n)
    }

    /// Solve `A·X = B` via `L·Y = B`, then `L^T·X = Y`
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        let n = self.n;
        validate_rhs_rows("solve", Shape::new(n, n), b.shape())?;
        let nx = b.columns();
        let mut x = b.to_vec()?;
        let l = &self.l;

        for k in 0..n {
            for j in 0..nx {
                for i in 0..k {
                    x[k * nx + j] -= x[i * nx + j] * l[k * n + i];
                }
                x[k * nx + j] /= l[k * n + k];
            }
        }

        for k in (0..n).rev() {
            for j in 0..nx {
                for i in (k + 1)..n {
                    x[k * nx + j] -= x[i * nx + j] * l[i * n + k];
                }
                x[k * nx + j] /= l[k * n + k];
            }
        }

        Ok(to_matrix(x, n, nx))
    }
}

// ============================================================================
// QR
// ============================================================================

/// QR decomposition result: A = QR, via Householder reflections
///
/// Reflection vectors are kept below the diagonal of a compact `m × n`
/// buffer, with R's diagonal held separately. For `k = min(m, n)`, Q is the
/// thin `m × k` orthonormal factor and R is `k × n` upper trapezoidal.
#[derive(Clone, Debug)]
pub struct QrDecomposition {
    qr: Vec<f64>,
    r_diag: Vec<f64>,
    m: usize,
    n: usize,
}

impl QrDecomposition {
    /// QR decomposition using Householder reflections
    pub fn new(a: &Matrix) -> Result<Self> {
        let (qr, m, n) = ingest(a)?;
        Ok(Self::from_buffer(qr, m, n))
    }

    pub(crate) fn from_buffer(mut qr: Vec<f64>, m: usize, n: usize) -> Self {
        let k = m.min(n);
        let mut r_diag = vec![0.0; k];

        for col in 0..k {
            // Norm of x = R[col:m, col], accumulated with hypot
            let mut norm_x = 0.0f64;
            for i in col..m {
                norm_x = norm_x.hypot(qr[i * n + col]);
            }

            if norm_x != 0.0 {
                // alpha = -sign(x[0]) * ||x||; v = x / alpha + e_0
                if qr[col * n + col] < 0.0 {
                    norm_x = -norm_x;
                }
                for i in col..m {
                    qr[i * n + col] /= norm_x;
                }
                qr[col * n + col] += 1.0;

                // Apply the reflection to the remaining columns
                for j in (col + 1)..n {
                    let mut s = 0.0;
                    for i in col..m {
                        s += qr[i * n + col] * qr[i * n + j];
                    }
                    s = -s / qr[col * n + col];
                    for i in col..m {
                        qr[i * n + j] += s * qr[i * n + col];
                    }
                }
            }
            r_diag[col] = -norm_x;
        }

        let full_rank = k == n && r_diag.iter().all(|&d| d != 0.0);
        debug!(m, n, full_rank, "qr decomposition");
        Self { qr, r_diag, m, n }
    }

    /// Shape of the factored matrix
    pub fn shape(&self) -> Shape {
        Shape::new(self.m, self.n)
    }

    /// Whether R has full column rank (requires `m >= n`)
    pub fn is_full_rank(&self) -> bool {
        self.r_diag.len() == self.n && self.r_diag.iter().all(|&d| d != 0.0)
    }

    /// Householder vectors, lower trapezoidal [m, min(m, n)]
    pub fn h(&self) -> Matrix {
        let k = self.r_diag.len();
        let mut h = vec![0.0; self.m * k];
        for i in 0..self.m {
            for j in 0..k.min(i + 1) {
                h[i * k + j] = self.qr[i * self.n + j];
            }
        }
        to_matrix(h, self.m, k)
    }

    /// Upper trapezoidal factor R [min(m, n), n]
    pub fn r(&self) -> Matrix {
        let k = self.r_diag.len();
        let n = self.n;
        let mut r = vec![0.0; k * n];
        for i in 0..k {
            r[i * n + i] = self.r_diag[i];
            for j in (i + 1)..n {
                r[i * n + j] = self.qr[i * n + j];
            }
        }
        to_matrix(r, k, n)
    }

    /// Thin orthonormal factor Q [m, min(m, n)]
    pub fn q(&self) -> Matrix {
        let k = self.r_diag.len();
        let (m, n) = (self.m, self.n);
        let mut q = vec![0.0; m * k];
        for col in (0..k).rev() {
            q[col * k + col] = 1.0;
            if self.qr[col * n + col] == 0.0 {
                continue;
            }
            for j in col..k {
                let mut s = 0.0;
                for i in col..m {
                    s += self.qr[i * n + col] * q[i * k + j];
                }
                s = -s / self.qr[col * n + col];
                for i in col..m {
                    q[i * k + j] += s * self.qr[i * n + col];
                }
            }
        }
        to_matrix(q, m, k)
    }

    /// Least-squares solution of `A·X ≈ B`
    ///
    /// Minimizes `‖A·X − B‖` column by column. Requires `B.rows == A.rows`
    /// and full column rank (`m >= n`), otherwise [`Error::SingularMatrix`].
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        validate_rhs_rows("solve", self.shape(), b.shape())?;
        if !self.is_full_rank() {
            warn!(m = self.m, n = self.n, "qr solve on a rank deficient matrix");
            return Err(Error::SingularMatrix { op: "solve" });
        }

        let (m, n) = (self.m, self.n);
        let nx = b.columns();
        let mut x = b.to_vec()?;

        // Y = Q^T·B
        for col in 0..n {
            for j in 0..nx {
                let mut s = 0.0;
                for i in col..m {
                    s += self.qr[i * n + col] * x[i * nx + j];
                }
                s = -s / self.qr[col * n + col];
                for i in col..m {
                    x[i * nx + j] += s * self.qr[i * n + col];
                }
            }
        }

        // R·X = Y
        for col in (0..n).rev() {
            for j in 0..nx {
                x[col * nx + j] /= self.r_diag[col];
            }
            for i in 0..col {
                let r_ic = self.qr[i * n + col];
                for j in 0..nx {
                    x[i * nx + j] -= x[col * nx + j] * r_ic;
                }
            }
        }

        x.truncate(n * nx);
        Ok(to_matrix(x, n, nx))
    }

    /// Minimum-norm solution of `Aᵀ·X = B` where this is the QR of `A`
    ///
    /// With `A = Q·R` of full column rank, `Aᵀ = Rᵀ·Qᵀ`; solving `Rᵀ·Y = B`
    /// and taking `X = Q·Y` yields the solution of least norm.
    pub(crate) fn solve_transposed_min_norm(&self, b: &Matrix) -> Result<Matrix> {
        let (m, n) = (self.m, self.n);
        validate_rhs_rows("solve", Shape::new(n, m), b.shape())?;
        if !self.is_full_rank() {
            warn!(rows = n, columns = m, "minimum norm solve on a rank deficient matrix");
            return Err(Error::SingularMatrix { op: "solve" });
        }

        let nx = b.columns();
        let b_data = b.to_vec()?;
        let mut x = vec![0.0; m * nx];

        // Rᵀ·Y = B, forward substitution into the top n rows of X
        for i in 0..n {
            for j in 0..nx {
                let mut s = b_data[i * nx + j];
                for p in 0..i {
                    s -= self.qr[p * n + i] * x[p * nx + j];
                }
                x[i * nx + j] = s / self.r_diag[i];
            }
        }

        // X = Q·[Y; 0], applying the reflections last to first
        for col in (0..n).rev() {
            for j in 0..nx {
                let mut s = 0.0;
                for i in col..m {
                    s += self.qr[i * n + col] * x[i * nx + j];
                }
                s = -s / self.qr[col * n + col];
                for i in col..m {
                    x[i * nx + j] += s * self.qr[i * n + col];
                }
            }
        }

        Ok(to_matrix(x, m, nx))
    }
}
