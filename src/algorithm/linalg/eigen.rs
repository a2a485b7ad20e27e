//! Eigendecomposition: A·V = V·D

use super::eig_general::{GeneralEigen, general_eigen};
use super::eig_symmetric::{SymmetricEigen, symmetric_eigen};
use super::helpers::{
    ingest, is_exactly_symmetric, normalize_scale, to_matrix, validate_square_matrix,
};
use crate::config::LinalgConfig;
use crate::error::Result;
use crate::matrix::{Matrix, Shape};
use tracing::debug;

/// Eigendecomposition result: A·V = V·D
///
/// Symmetric input (A equal to its transpose, compared exactly) takes the
/// tridiagonal QL path: eigenvalues are real and ascending, V is
/// orthogonal, D is diagonal.
///
/// Any other square input takes the Hessenberg/Schur path. D is block
/// diagonal: a real eigenvalue `λ` sits on the diagonal, a conjugate pair
/// `a ± bi` becomes the 2×2 block `[[a, b], [-b, a]]`. V is real and in
/// general not orthogonal.
#[derive(Clone, Debug)]
pub struct EigenDecomposition {
    n: usize,
    real: Vec<f64>,
    imag: Vec<f64>,
    vectors: Vec<f64>,
    symmetric: bool,
}

impl EigenDecomposition {
    /// Eigendecomposition with the default iteration budget
    pub fn new(a: &Matrix) -> Result<Self> {
        Self::with_config(a, &LinalgConfig::default())
    }

    /// Eigendecomposition with an explicit iteration budget
    ///
    /// The QR/QL iteration stops with
    /// [`Error::ConvergenceFailure`](crate::error::Error::ConvergenceFailure)
    /// after [`LinalgConfig::eigen_iteration_budget`] steps.
    pub fn with_config(a: &Matrix, config: &LinalgConfig) -> Result<Self> {
        let n = validate_square_matrix("eig", a.shape())?;
        let (mut data, _, _) = ingest(a)?;
        let budget = config.eigen_iteration_budget(n);
        let symmetric = is_exactly_symmetric(&data, n);
        // Eigenvalues scale with A and eigenvectors do not
        let scale = normalize_scale(&mut data);
        debug!(n, symmetric, budget, scale, "eigendecomposition");

        let (mut real, mut imag, vectors) = if symmetric {
            let SymmetricEigen {
                values,
                vectors,
                iterations,
            } = symmetric_eigen(data, n, budget)?;
            debug!(n, iterations, "symmetric eigendecomposition");
            (values, vec![0.0; n], vectors)
        } else {
            let GeneralEigen { wr, wi, vectors } = general_eigen(data, n, budget)?;
            (wr, wi, vectors)
        };
        for x in real.iter_mut().chain(imag.iter_mut()) {
            *x *= scale;
        }

        Ok(Self {
            n,
            real,
            imag,
            vectors,
            symmetric,
        })
    }

    /// Shape of the factored matrix
    pub fn shape(&self) -> Shape {
        Shape::new(self.n, self.n)
    }

    /// True when the symmetric path was taken
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Real parts of the eigenvalues
    pub fn real_eigenvalues(&self) -> &[f64] {
        &self.real
    }

    /// Imaginary parts of the eigenvalues
    pub fn imag_eigenvalues(&self) -> &[f64] {
        &self.imag
    }

    /// Eigenvector matrix V [n, n]
    pub fn v(&self) -> Matrix {
        to_matrix(self.vectors.clone(), self.n, self.n)
    }

    /// Block-diagonal eigenvalue matrix D [n, n]
    pub fn d(&self) -> Matrix {
        let n = self.n;
        let mut d = vec![0.0; n * n];
        for (i, (&re, &im)) in self.real.iter().zip(&self.imag).enumerate() {
            d[i * n + i] = re;
            if im > 0.0 {
                d[i * n + i + 1] = im;
            } else if im < 0.0 {
                d[i * n + i - 1] = im;
            }
        }
        to_matrix(d, n, n)
    }
}
