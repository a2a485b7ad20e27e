//! # matr
//!
//! **Dense matrices with broadcasting arithmetic and factorization-backed
//! linear algebra.**
//!
//! A [`Matrix`] is a 2-D grid of cells. A cell holds a number, a piece of
//! text, or nothing; the matrix tracks whether it is numeric, text, or
//! mixed. Arithmetic broadcasts along any axis of extent 1 and coerces
//! numeric-like text on the fly. Linear algebra runs on double precision
//! and is built on LU, QR, Cholesky, SVD, and eigendecompositions.
//!
//! ## Features
//!
//! - **Arithmetic**: `plus`, `minus`, `times`, `right_divide`,
//!   `left_divide` against scalars, text, or broadcastable matrices, with
//!   in-place `*_equals` forms
//! - **Dense algebra**: transpose, matrix product, 1/∞/Frobenius/2-norms,
//!   trace
//! - **Decompositions**: LU, QR, Cholesky, SVD, symmetric and general
//!   eigendecomposition
//! - **Solvers**: `solve` (square, least squares, minimum norm),
//!   `solve_transpose`, `inverse`, `det`, `rank`, `cond`
//!
//! ## Quick Start
//!
//! ```
//! use matr::prelude::*;
//!
//! let a = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]])?;
//! let b = a.plus(1.0)?.times(&identity(2, 2))?;
//! assert_eq!(b.to_vec()?, vec![5.0, 0.0, 0.0, 7.0]);
//!
//! let x = a.solve(&Matrix::from_rows(&[[1.0], [0.0]])?)?;
//! let back = a.matrix_multiply(&x)?;
//! assert!((back.get_numeric(0, 0)? - 1.0).abs() < 1e-12);
//! # Ok::<(), matr::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): row-parallel dense matrix product

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod config;
pub mod dtype;
pub mod error;
pub mod matrix;
pub mod ops;

pub use matrix::{Matrix, Shape};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::linalg::{
        CholeskyDecomposition, EigenDecomposition, LuDecomposition, QrDecomposition,
        SvdDecomposition,
    };
    pub use crate::config::LinalgConfig;
    pub use crate::dtype::{Cell, CellKind};
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{
        Matrix, Shape, diag, horizontal_merge, identity, nan, ones, random, random_seeded,
        vertical_merge, zeros,
    };
    pub use crate::ops::Operand;
}
