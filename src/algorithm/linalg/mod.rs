//! Factorization engine and solver facade
//!
//! All kernels run on row-major `f64` buffers copied out of a [`Matrix`]
//! (cells that do not coerce fail with `NotNumeric` before any arithmetic).
//! Each decomposition owns its buffers, so results outlive the input.
//!
//! # Module Structure
//!
//! - `decompositions`: LU (partial pivoting), Householder QR, Cholesky
//! - `svd`: one-sided Jacobi SVD, backed by the rotations in `jacobi`
//! - `eigen`: eigendecomposition dispatch; `eig_symmetric` (tridiagonal QL)
//!   and `eig_general` (Hessenberg + Francis QR via `schur`)
//! - `solvers`: `solve`, `solve_transpose`, `inverse`, `det`, `rank`,
//!   `cond`, `norm2` as [`Matrix`] methods
//! - `helpers`: validation and buffer utilities
//!
//! [`Matrix`]: crate::matrix::Matrix

pub mod decompositions;
mod eig_general;
mod eig_symmetric;
pub mod eigen;
pub mod helpers;
mod jacobi;
mod schur;
pub mod solvers;
pub mod svd;

pub use decompositions::{CholeskyDecomposition, LuDecomposition, QrDecomposition};
pub use eigen::EigenDecomposition;
pub use helpers::{validate_rhs_rows, validate_square_matrix};
pub use solvers::{det, inverse, solve};
pub use svd::SvdDecomposition;
