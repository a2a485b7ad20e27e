//! Element coercion: result kind selection and per-cell combine functions

use crate::dtype::CellKind;
use crate::error::{Error, Result};

/// Binary element-wise operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition: a + b
    Add,
    /// Subtraction: a - b
    Sub,
    /// Multiplication: a * b
    Mul,
    /// Right division: a / b
    RightDiv,
    /// Left division: b / a
    LeftDiv,
}

impl BinaryOp {
    /// Combine two coerced cell values
    #[inline]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::RightDiv => a / b,
            BinaryOp::LeftDiv => b / a,
        }
    }

    /// Public operator name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "plus",
            BinaryOp::Sub => "minus",
            BinaryOp::Mul => "times",
            BinaryOp::RightDiv => "right_divide",
            BinaryOp::LeftDiv => "left_divide",
        }
    }
}

/// Kind of the right-hand operand, as seen by coercion
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandKind {
    /// A single number
    Scalar,
    /// A single string
    Text,
    /// Another matrix of the given container kind
    Matrix(CellKind),
}

impl OperandKind {
    /// Short name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            OperandKind::Scalar => "scalar",
            OperandKind::Text => "text",
            OperandKind::Matrix(_) => "matrix",
        }
    }
}

/// Select the result container kind for `matrix op operand`
///
/// - matrix ⊕ scalar → `Numeric`
/// - matrix + text → `Text` (concatenation; only `Add` accepts text)
/// - matrix ⊕ matrix → `Mixed`, cells combined numerically
pub fn result_kind(op: BinaryOp, operand: OperandKind) -> Result<CellKind> {
    match operand {
        OperandKind::Scalar => Ok(CellKind::Numeric),
        OperandKind::Text if op == BinaryOp::Add => Ok(CellKind::Text),
        OperandKind::Text => Err(Error::TypeMismatch {
            op: op.name(),
            operand: operand.name(),
        }),
        OperandKind::Matrix(_) => Ok(CellKind::Mixed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_division_order() {
        assert_eq!(BinaryOp::RightDiv.apply(6.0, 3.0), 2.0);
        assert_eq!(BinaryOp::LeftDiv.apply(6.0, 3.0), 0.5);
        assert_eq!(BinaryOp::Sub.apply(1.0, 4.0), -3.0);
    }

    #[test]
    fn test_result_kind() {
        use CellKind::*;
        assert_eq!(result_kind(BinaryOp::Mul, OperandKind::Scalar).unwrap(), Numeric);
        assert_eq!(result_kind(BinaryOp::Add, OperandKind::Text).unwrap(), Text);
        assert_eq!(
            result_kind(BinaryOp::Sub, OperandKind::Text).unwrap_err(),
            Error::TypeMismatch {
                op: "minus",
                operand: "text"
            }
        );
        for kind in [Numeric, Text, Mixed] {
            assert_eq!(result_kind(BinaryOp::Mul, OperandKind::Matrix(kind)).unwrap(), Mixed);
        }
    }
}
