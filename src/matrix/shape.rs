//! Shape type: dimensions of a matrix

use std::fmt;

/// Dimensions of a matrix as `rows × columns`
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub columns: usize,
}

impl Shape {
    /// Create a shape
    #[inline]
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Total number of cells
    #[inline]
    pub const fn elem_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Shape with rows and columns swapped
    #[inline]
    pub const fn transposed(&self) -> Self {
        Self::new(self.columns, self.rows)
    }

    /// Whether this shape holds no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Whether this shape is `1 × 1`.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        self.rows == 1 && self.columns == 1
    }

    /// Whether this shape has exactly one row
    #[inline]
    pub const fn is_row_vector(&self) -> bool {
        self.rows == 1
    }

    /// Whether this shape has exactly one column
    #[inline]
    pub const fn is_column_vector(&self) -> bool {
        self.columns == 1
    }

    /// Whether one of the dimensions is 1
    #[inline]
    pub const fn is_vector(&self) -> bool {
        self.is_row_vector() || self.is_column_vector()
    }

    /// Whether rows equal columns
    #[inline]
    pub const fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Smaller of the two dimensions
    #[inline]
    pub const fn min_dim(&self) -> usize {
        if self.rows < self.columns {
            self.rows
        } else {
            self.columns
        }
    }

    /// Row-major offset of `(row, column)`
    #[inline]
    pub const fn offset(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// Returns true if `(row, column)` addresses a cell
    #[inline]
    pub const fn contains(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns
    }

    /// Dimensions as a tuple, the form used in error payloads
    #[inline]
    pub const fn dims(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.rows, self.columns)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, columns): (usize, usize)) -> Self {
        Self::new(rows, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_predicates() {
        assert!(Shape::new(1, 5).is_row_vector());
        assert!(!Shape::new(1, 5).is_column_vector());
        assert!(Shape::new(4, 1).is_vector());
        assert!(Shape::new(1, 1).is_scalar());
        assert!(!Shape::new(2, 3).is_vector());
        assert!(Shape::new(0, 3).is_empty());
    }

    #[test]
    fn test_offsets() {
        let shape = Shape::new(2, 3);
        assert_eq!(shape.elem_count(), 6);
        assert_eq!(shape.offset(1, 2), 5);
        assert!(shape.contains(1, 2));
        assert!(!shape.contains(2, 0));
        assert_eq!(shape.transposed(), Shape::new(3, 2));
        assert_eq!(shape.min_dim(), 2);
        assert_eq!(format!("{shape}"), "2x3");
    }
}
