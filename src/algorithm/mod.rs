//! Numerical algorithms
//!
//! - [`linalg`] - LU, QR, Cholesky, SVD, and eigendecompositions plus the
//!   solver facade built on them

pub mod linalg;
