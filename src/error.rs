//! Error types for matr

use thiserror::Error;

/// Result type alias using matr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in matr operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Exact or inner dimensions disagree for an operation that needs them to match
    #[error("Dimension mismatch in '{op}': {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        /// The operation name
        op: &'static str,
        /// Shape of the left-hand operand as (rows, columns)
        lhs: (usize, usize),
        /// Shape of the right-hand operand as (rows, columns)
        rhs: (usize, usize),
    },

    /// Shapes cannot be broadcast together
    #[error("Cannot broadcast shapes {lhs:?} and {rhs:?}")]
    ShapeMismatch {
        /// Left-hand side shape
        lhs: (usize, usize),
        /// Right-hand side shape
        rhs: (usize, usize),
    },

    /// Operand kind is not accepted by an arithmetic operator
    #[error("Operator '{op}' does not accept a {operand} operand")]
    TypeMismatch {
        /// The operation name
        op: &'static str,
        /// Kind of the rejected operand
        operand: &'static str,
    },

    /// A cell could not be coerced to a double-precision number
    #[error("Cell ({row}, {column}) is not numeric: {value:?}")]
    NotNumeric {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        column: usize,
        /// Stringified cell value
        value: String,
    },

    /// Factorization hit a zero pivot or rank deficiency
    #[error("Matrix is singular or rank deficient in '{op}'")]
    SingularMatrix {
        /// The operation name
        op: &'static str,
    },

    /// Cholesky factorization precondition violated
    #[error("Matrix is not symmetric positive definite")]
    NotPositiveDefinite,

    /// Iterative decomposition exhausted its iteration budget
    #[error("{algorithm} did not converge within {iterations} iterations")]
    ConvergenceFailure {
        /// The algorithm that failed to converge
        algorithm: &'static str,
        /// Iterations performed before giving up
        iterations: usize,
    },

    /// Cell index outside the matrix
    #[error("Index ({row}, {column}) out of bounds for {rows}x{columns} matrix")]
    IndexOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        column: usize,
        /// Number of rows in the matrix
        rows: usize,
        /// Number of columns in the matrix
        columns: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(op: &'static str, lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Self::DimensionMismatch { op, lhs, rhs }
    }

    /// Create a broadcast error
    pub fn shape_mismatch(lhs: (usize, usize), rhs: (usize, usize)) -> Self {
        Self::ShapeMismatch { lhs, rhs }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
