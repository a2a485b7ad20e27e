//! Cell type system for matr matrices
//!
//! This module provides the [`Cell`] value type stored in every matrix slot,
//! the [`CellKind`] container tag, and the promotion rules that decide which
//! kind a matrix becomes when values of different kinds meet.

mod cell;
mod promotion;

pub use cell::{Cell, is_numeric_like, parse_numeric};
pub use promotion::promote;
pub(crate) use promotion::promote_all_cells;

use std::fmt;

/// Container kind of a matrix
///
/// A matrix is homogeneously numeric, homogeneously text, or heterogeneous.
/// The tag is derived from the cells it holds; [`Cell::Empty`] slots are
/// compatible with every kind.
///
/// | Kind | Cells |
/// |------|-------|
/// | `Numeric` | `Number` or `Empty` |
/// | `Text` | `Text` or `Empty` |
/// | `Mixed` | anything |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Every cell holds a double-precision number
    #[default]
    Numeric,
    /// Every cell holds text
    Text,
    /// Cells are typed individually
    Mixed,
}

impl CellKind {
    /// Short name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Mixed => "mixed",
        }
    }

    /// Returns true if cells of `kind` may be stored without widening
    #[inline]
    pub fn admits(self, kind: CellKind) -> bool {
        self == CellKind::Mixed || self == kind
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
