//! Matrix operations
//!
//! This module holds the broadcasting arithmetic engine and the dense
//! algebra core, plus free functions mirroring the [`Matrix`] methods for
//! call sites where method dispatch is inconvenient.
//!
//! # Operation Categories
//!
//! ## Element-wise Operations
//! `plus`, `minus`, `times`, `right_divide`, `left_divide` against a scalar,
//! a text value (`plus` only), or another matrix. Matrix operands broadcast
//! along any axis of extent 1; see [`broadcast`].
//!
//! ## Matrix Operations
//! Transpose and the true matrix product. Inner dimensions must match.
//!
//! ## Norms
//! 1-norm, ∞-norm, Frobenius norm, and trace. The 2-norm is in
//! [`crate::algorithm::linalg`] since it needs the SVD.

mod arithmetic;
pub mod broadcast;
pub mod coerce;
mod matmul;
mod norms;

pub use arithmetic::Operand;
pub use broadcast::{Broadcast, broadcast_shape, can_broadcast};
pub use coerce::{BinaryOp, OperandKind, result_kind};
pub use matmul::MatmulParams;

pub use crate::matrix::factory::{
    diag, horizontal_merge, identity, nan, ones, random, random_seeded, vertical_merge, zeros,
};

use crate::error::Result;
use crate::matrix::Matrix;

/// `a + b` (see [`Matrix::plus`])
pub fn plus<'a>(a: &Matrix, b: impl Into<Operand<'a>>) -> Result<Matrix> {
    a.plus(b)
}

/// `a - b` (see [`Matrix::minus`])
pub fn minus<'a>(a: &Matrix, b: impl Into<Operand<'a>>) -> Result<Matrix> {
    a.minus(b)
}

/// Element-wise `a * b` (see [`Matrix::times`])
pub fn times<'a>(a: &Matrix, b: impl Into<Operand<'a>>) -> Result<Matrix> {
    a.times(b)
}

/// Element-wise `a / b` (see [`Matrix::right_divide`])
pub fn right_divide<'a>(a: &Matrix, b: impl Into<Operand<'a>>) -> Result<Matrix> {
    a.right_divide(b)
}

/// Element-wise `b / a` (see [`Matrix::left_divide`])
pub fn left_divide<'a>(a: &Matrix, b: impl Into<Operand<'a>>) -> Result<Matrix> {
    a.left_divide(b)
}

/// Matrix product `a · b` (see [`Matrix::matrix_multiply`])
pub fn matrix_multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.matrix_multiply(b)
}

/// Transpose of `a`
pub fn transpose(a: &Matrix) -> Matrix {
    a.transpose()
}
