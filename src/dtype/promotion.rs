//! Kind promotion rules for stores and merges

use super::{Cell, CellKind};

/// Promote two cell kinds to the narrowest kind that holds both
///
/// - Equal kinds stay as they are
/// - Anything combined with a different kind becomes `Mixed`
pub fn promote(lhs: CellKind, rhs: CellKind) -> CellKind {
    if lhs == rhs { lhs } else { CellKind::Mixed }
}

/// Promote a sequence of kinds, starting from `Numeric` for an empty sequence
pub(crate) fn promote_all<I: IntoIterator<Item = CellKind>>(kinds: I) -> CellKind {
    let mut iter = kinds.into_iter();
    let Some(first) = iter.next() else {
        return CellKind::Numeric;
    };
    iter.fold(first, promote)
}

/// Kind of a cell collection, ignoring unset cells
pub(crate) fn promote_all_cells(cells: &[Cell]) -> CellKind {
    promote_all(cells.iter().filter(|c| !c.is_empty()).map(Cell::kind))
}
