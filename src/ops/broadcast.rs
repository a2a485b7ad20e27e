//! Broadcasting rules for element-wise binary operations
//!
//! Two shapes are compatible when, on each axis, their extents are equal or
//! one of them is 1. The result extent on an axis is the larger one, and an
//! operand whose extent is smaller reads index 0 on that axis. Replicated
//! operands are never materialised; the source index is remapped per cell.

use crate::error::{Error, Result};
use crate::matrix::Shape;

/// Compute the output shape for binary operations with broadcasting
///
/// Returns None if the shapes are incompatible for broadcasting.
pub fn broadcast_shape(a: Shape, b: Shape) -> Option<Shape> {
    Some(Shape::new(
        broadcast_extent(a.rows, b.rows)?,
        broadcast_extent(a.columns, b.columns)?,
    ))
}

#[inline]
fn broadcast_extent(a: usize, b: usize) -> Option<usize> {
    if a == b {
        Some(a)
    } else if a == 1 {
        Some(b)
    } else if b == 1 {
        Some(a)
    } else {
        None
    }
}

/// Check if two shapes are compatible for element-wise operations
pub fn can_broadcast(a: Shape, b: Shape) -> bool {
    broadcast_shape(a, b).is_some()
}

/// Index plan for one broadcast binary operation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Broadcast {
    lhs: Shape,
    rhs: Shape,
    out: Shape,
}

impl Broadcast {
    /// Plan a broadcast of `lhs` against `rhs`
    ///
    /// Fails with [`Error::ShapeMismatch`] if the shapes are incompatible.
    pub fn new(lhs: Shape, rhs: Shape) -> Result<Self> {
        let out = broadcast_shape(lhs, rhs)
            .ok_or_else(|| Error::shape_mismatch(lhs.dims(), rhs.dims()))?;
        Ok(Self { lhs, rhs, out })
    }

    /// Result shape
    #[inline]
    pub fn output_shape(&self) -> Shape {
        self.out
    }

    /// Cell of the left operand read for output cell `(row, column)`
    #[inline]
    pub fn lhs_index(&self, row: usize, column: usize) -> (usize, usize) {
        source_index(self.lhs, self.out, row, column)
    }

    /// Cell of the right operand read for output cell `(row, column)`
    #[inline]
    pub fn rhs_index(&self, row: usize, column: usize) -> (usize, usize) {
        source_index(self.rhs, self.out, row, column)
    }
}

#[inline]
fn source_index(src: Shape, out: Shape, row: usize, column: usize) -> (usize, usize) {
    let r = if src.rows < out.rows { 0 } else { row };
    let c = if src.columns < out.columns { 0 } else { column };
    (r, c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_shape() {
        // Same shapes
        assert_eq!(
            broadcast_shape(Shape::new(2, 3), Shape::new(2, 3)),
            Some(Shape::new(2, 3))
        );

        // Broadcasting with 1
        assert_eq!(
            broadcast_shape(Shape::new(2, 3), Shape::new(1, 3)),
            Some(Shape::new(2, 3))
        );
        assert_eq!(
            broadcast_shape(Shape::new(2, 1), Shape::new(2, 3)),
            Some(Shape::new(2, 3))
        );

        // Row vector against column vector
        assert_eq!(
            broadcast_shape(Shape::new(1, 4), Shape::new(3, 1)),
            Some(Shape::new(3, 4))
        );

        // Incompatible shapes
        assert_eq!(broadcast_shape(Shape::new(2, 3), Shape::new(2, 4)), None);
        assert!(!can_broadcast(Shape::new(3, 2), Shape::new(2, 3)));
    }

    #[test]
    fn test_index_remap() {
        let plan = Broadcast::new(Shape::new(1, 4), Shape::new(3, 1)).unwrap();
        assert_eq!(plan.output_shape(), Shape::new(3, 4));
        assert_eq!(plan.lhs_index(2, 3), (0, 3));
        assert_eq!(plan.rhs_index(2, 3), (2, 0));
    }

    #[test]
    fn test_incompatible_is_shape_mismatch() {
        let err = Broadcast::new(Shape::new(2, 3), Shape::new(3, 2)).unwrap_err();
        assert_eq!(err, Error::shape_mismatch((2, 3), (3, 2)));
    }
}
