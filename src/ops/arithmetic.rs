//! Broadcasting arithmetic engine
//!
//! Every operator takes one [`Operand`] and allocates a fresh result. The
//! `*_equals` variants compute the same result and then replace `self`.

use super::broadcast::Broadcast;
use super::coerce::{BinaryOp, OperandKind, result_kind};
use crate::dtype::{Cell, CellKind};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use std::borrow::Cow;

/// Right-hand side of an element-wise operator
#[derive(Clone, Debug, PartialEq)]
pub enum Operand<'a> {
    /// Number replicated to every cell
    Scalar(f64),
    /// String appended to every cell (only accepted by `plus`)
    Text(Cow<'a, str>),
    /// Matrix broadcast against the receiver
    Matrix(&'a Matrix),
}

impl Operand<'_> {
    /// Coercion view of this operand
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Scalar(_) => OperandKind::Scalar,
            Operand::Text(_) => OperandKind::Text,
            Operand::Matrix(m) => OperandKind::Matrix(m.kind()),
        }
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Operand::Scalar(value as f64)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(value: &'a str) -> Self {
        Operand::Text(Cow::Borrowed(value))
    }
}

impl From<String> for Operand<'_> {
    fn from(value: String) -> Self {
        Operand::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(value: &'a Matrix) -> Self {
        Operand::Matrix(value)
    }
}

impl Matrix {
    /// Element-wise addition, or text concatenation for a text operand
    ///
    /// # Example
    ///
    /// ```
    /// use matr::prelude::*;
    ///
    /// let row = Matrix::from_rows(&[[1.0, 2.0]])?;
    /// let col = Matrix::from_rows(&[[10.0], [20.0]])?;
    /// let sum = row.plus(&col)?;
    /// assert_eq!(sum.to_vec()?, vec![11.0, 12.0, 21.0, 22.0]);
    /// # Ok::<(), matr::error::Error>(())
    /// ```
    pub fn plus<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<Matrix> {
        binary(self, BinaryOp::Add, &operand.into())
    }

    /// Element-wise subtraction
    pub fn minus<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<Matrix> {
        binary(self, BinaryOp::Sub, &operand.into())
    }

    /// Element-wise multiplication
    pub fn times<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<Matrix> {
        binary(self, BinaryOp::Mul, &operand.into())
    }

    /// Element-wise `self / operand`
    pub fn right_divide<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<Matrix> {
        binary(self, BinaryOp::RightDiv, &operand.into())
    }

    /// Element-wise `operand / self`
    pub fn left_divide<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<Matrix> {
        binary(self, BinaryOp::LeftDiv, &operand.into())
    }

    /// In-place [`Matrix::plus`]
    pub fn plus_equals<'a>(&mut self, operand: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.assign(BinaryOp::Add, &operand.into())
    }

    /// In-place [`Matrix::minus`]
    pub fn minus_equals<'a>(&mut self, operand: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.assign(BinaryOp::Sub, &operand.into())
    }

    /// In-place [`Matrix::times`]
    pub fn times_equals<'a>(&mut self, operand: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.assign(BinaryOp::Mul, &operand.into())
    }

    /// In-place [`Matrix::right_divide`]
    pub fn right_divide_equals<'a>(
        &mut self,
        operand: impl Into<Operand<'a>>,
    ) -> Result<&mut Self> {
        self.assign(BinaryOp::RightDiv, &operand.into())
    }

    /// In-place [`Matrix::left_divide`]
    pub fn left_divide_equals<'a>(
        &mut self,
        operand: impl Into<Operand<'a>>,
    ) -> Result<&mut Self> {
        self.assign(BinaryOp::LeftDiv, &operand.into())
    }

    /// Unary negation
    pub fn uminus(&self) -> Result<Matrix> {
        let data = self.to_vec()?.into_iter().map(|v| -v).collect();
        Ok(Matrix::from_f64_vec(data, self.shape()))
    }

    /// Multiply every cell by `s`
    pub fn scale(&self, s: f64) -> Result<Matrix> {
        binary(self, BinaryOp::Mul, &Operand::Scalar(s))
    }

    // The operand may broadcast into self, but self never grows.
    fn assign(&mut self, op: BinaryOp, operand: &Operand<'_>) -> Result<&mut Self> {
        let result = binary(self, op, operand)?;
        if result.shape() != self.shape() {
            return Err(Error::dimension_mismatch(
                op.name(),
                self.shape().dims(),
                result.shape().dims(),
            ));
        }
        *self = result;
        Ok(self)
    }
}

fn binary(lhs: &Matrix, op: BinaryOp, operand: &Operand<'_>) -> Result<Matrix> {
    let kind = result_kind(op, operand.kind())?;
    match operand {
        Operand::Scalar(s) => scalar_op(lhs, op, *s),
        Operand::Text(text) => Ok(concat(lhs, text)),
        Operand::Matrix(rhs) => matrix_op(lhs, rhs, op, kind),
    }
}

fn scalar_op(lhs: &Matrix, op: BinaryOp, s: f64) -> Result<Matrix> {
    let data = lhs.to_vec()?.into_iter().map(|a| op.apply(a, s)).collect();
    Ok(Matrix::from_f64_vec(data, lhs.shape()))
}

fn concat(lhs: &Matrix, text: &str) -> Matrix {
    let data = lhs
        .cells()
        .iter()
        .map(|cell| Cell::Text(format!("{cell}{text}")))
        .collect();
    Matrix::from_parts(lhs.shape(), CellKind::Text, data)
}

fn matrix_op(lhs: &Matrix, rhs: &Matrix, op: BinaryOp, kind: CellKind) -> Result<Matrix> {
    let plan = Broadcast::new(lhs.shape(), rhs.shape())?;
    let out = plan.output_shape();
    let mut data = Vec::with_capacity(out.elem_count());
    for i in 0..out.rows {
        for j in 0..out.columns {
            let (li, lj) = plan.lhs_index(i, j);
            let (ri, rj) = plan.rhs_index(i, j);
            let a = lhs.numeric_at(li, lj)?;
            let b = rhs.numeric_at(ri, rj)?;
            data.push(Cell::Number(op.apply(a, b)));
        }
    }
    Ok(Matrix::from_parts(out, kind, data))
}
