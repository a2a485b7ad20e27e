//! Solver facade on [`Matrix`]
//!
//! Each query builds the decomposition it needs, answers, and drops it.
//! Square systems go through LU, overdetermined ones through QR least
//! squares, underdetermined ones through QR of the transpose (minimum-norm
//! solution). Conditioning is never pre-validated: a nonsingular but
//! ill-conditioned input still gets an answer, and callers check
//! [`Matrix::cond`] or [`Matrix::rank`] first when that matters.

use super::decompositions::{CholeskyDecomposition, LuDecomposition, QrDecomposition};
use super::eigen::EigenDecomposition;
use super::helpers::{ingest, transpose_buffer, validate_rhs_rows, validate_square_matrix};
use super::svd::SvdDecomposition;
use crate::config::LinalgConfig;
use crate::error::{Error, Result};
use crate::matrix::{Matrix, identity};
use tracing::{debug, instrument, warn};

impl Matrix {
    /// LU decomposition with partial pivoting
    pub fn lu(&self) -> Result<LuDecomposition> {
        LuDecomposition::new(self)
    }

    /// Householder QR decomposition
    pub fn qr(&self) -> Result<QrDecomposition> {
        QrDecomposition::new(self)
    }

    /// Cholesky decomposition of a symmetric positive-definite matrix
    pub fn chol(&self) -> Result<CholeskyDecomposition> {
        CholeskyDecomposition::new(self)
    }

    /// Singular value decomposition
    pub fn svd(&self) -> Result<SvdDecomposition> {
        SvdDecomposition::new(self)
    }

    /// Eigendecomposition of a square matrix
    pub fn eig(&self) -> Result<EigenDecomposition> {
        EigenDecomposition::new(self)
    }

    /// Eigendecomposition with an explicit iteration budget
    pub fn eig_with_config(&self, config: &LinalgConfig) -> Result<EigenDecomposition> {
        EigenDecomposition::with_config(self, config)
    }

    /// Solve `A·X = B`
    ///
    /// - square `A`: LU with partial pivoting; a zero pivot fails with
    ///   [`Error::SingularMatrix`]
    /// - `rows > columns`: least-squares solution via QR
    /// - `rows < columns`: minimum-norm solution via QR of `Aᵀ`
    ///
    /// `B.rows` must equal `A.rows`, otherwise [`Error::DimensionMismatch`].
    ///
    /// # Example
    ///
    /// ```
    /// use matr::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[2.0, 0.0], [0.0, 4.0]])?;
    /// let b = Matrix::from_rows(&[[2.0], [8.0]])?;
    /// let x = a.solve(&b)?;
    /// assert_eq!(x.to_vec()?, vec![1.0, 2.0]);
    /// # Ok::<(), matr::error::Error>(())
    /// ```
    #[instrument(skip_all, fields(rows = self.rows(), columns = self.columns()))]
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        validate_rhs_rows("solve", self.shape(), b.shape())?;
        let (m, n) = self.shape().dims();

        if m == n {
            let lu = LuDecomposition::new(self)?;
            if !lu.is_nonsingular() {
                warn!(n, "square solve on a singular matrix");
            }
            lu.solve(b)
        } else if m > n {
            debug!(m, n, "least-squares solve");
            QrDecomposition::new(self)?.solve(b)
        } else {
            debug!(m, n, "minimum-norm solve");
            let (data, _, _) = ingest(self)?;
            QrDecomposition::from_buffer(transpose_buffer(&data, m, n), n, m)
                .solve_transposed_min_norm(b)
        }
    }

    /// Solve `X·A = B`, computed as `(Aᵀ \ Bᵀ)ᵀ`
    ///
    /// `B.columns` must equal `A.columns`.
    #[instrument(skip_all, fields(rows = self.rows(), columns = self.columns()))]
    pub fn solve_transpose(&self, b: &Matrix) -> Result<Matrix> {
        if b.columns() != self.columns() {
            return Err(Error::dimension_mismatch(
                "solve_transpose",
                self.shape().dims(),
                b.shape().dims(),
            ));
        }
        Ok(self.transpose().solve(&b.transpose())?.transpose())
    }

    /// Inverse (pseudo-inverse when non-square) via `solve(I)`
    ///
    /// The result of a nearly singular input is returned as computed.
    #[instrument(skip_all, fields(rows = self.rows(), columns = self.columns()))]
    pub fn inverse(&self) -> Result<Matrix> {
        self.solve(&identity(self.rows(), self.rows()))
    }

    /// Determinant via LU
    ///
    /// Requires a square matrix. Singular input gives 0; the empty matrix
    /// gives 1.
    #[instrument(skip_all, fields(rows = self.rows(), columns = self.columns()))]
    pub fn det(&self) -> Result<f64> {
        validate_square_matrix("det", self.shape())?;
        LuDecomposition::new(self)?.det()
    }

    /// Numerical rank: singular values above `max(m, n) · σ_max · ε`
    pub fn rank(&self) -> Result<usize> {
        self.rank_with_config(&LinalgConfig::default())
    }

    /// Numerical rank, honouring [`LinalgConfig::rank_tolerance`]
    #[instrument(skip_all, fields(rows = self.rows(), columns = self.columns()))]
    pub fn rank_with_config(&self, config: &LinalgConfig) -> Result<usize> {
        let svd = SvdDecomposition::with_config(self, config)?;
        Ok(match config.rank_tolerance {
            Some(tol) => svd.rank_with_tolerance(tol),
            None => svd.rank(),
        })
    }

    /// Two-norm condition number `σ_max / σ_min`
    ///
    /// Infinite when `σ_min` is exactly zero, NaN for an empty matrix.
    pub fn cond(&self) -> Result<f64> {
        self.cond_with_config(&LinalgConfig::default())
    }

    /// Condition number with an explicit sweep budget
    #[instrument(skip_all, fields(rows = self.rows(), columns = self.columns()))]
    pub fn cond_with_config(&self, config: &LinalgConfig) -> Result<f64> {
        Ok(SvdDecomposition::with_config(self, config)?.cond())
    }

    /// Two-norm: the largest singular value
    pub fn norm2(&self) -> Result<f64> {
        self.norm2_with_config(&LinalgConfig::default())
    }

    /// Two-norm with an explicit sweep budget
    #[instrument(skip_all, fields(rows = self.rows(), columns = self.columns()))]
    pub fn norm2_with_config(&self, config: &LinalgConfig) -> Result<f64> {
        Ok(SvdDecomposition::with_config(self, config)?.norm2())
    }
}

/// `A \ B` (see [`Matrix::solve`])
pub fn solve(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.solve(b)
}

/// Inverse of `a` (see [`Matrix::inverse`])
pub fn inverse(a: &Matrix) -> Result<Matrix> {
    a.inverse()
}

/// Determinant of `a` (see [`Matrix::det`])
pub fn det(a: &Matrix) -> Result<f64> {
    a.det()
}
