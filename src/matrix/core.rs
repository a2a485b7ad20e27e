//! Core Matrix type

use super::Shape;
use crate::dtype::{Cell, CellKind, promote};
use crate::error::{Error, Result};
use std::ops::Range;

/// Rectangular grid of cells, addressed row-major by `(row, column)`
///
/// `Matrix` is the fundamental data structure in matr. It consists of:
/// - **Shape**: `rows × columns`, fixed at construction
/// - **Kind**: container tag ([`CellKind`]) describing which cell values it holds
/// - **Storage**: exclusively owned row-major `Vec<Cell>`
///
/// Every operation that returns a matrix allocates fresh storage. Only the
/// `*_equals` arithmetic variants and [`Matrix::set`] mutate in place.
///
/// # Example
///
/// ```
/// use matr::prelude::*;
///
/// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
/// assert_eq!(a.get_numeric(1, 0)?, 3.0);
/// # Ok::<(), matr::error::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    shape: Shape,
    kind: CellKind,
    data: Vec<Cell>,
}

impl Matrix {
    /// Create a numeric matrix filled with zeros
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::filled(rows, columns, 0.0)
    }

    /// Create a matrix with every cell set to `value`
    pub fn filled(rows: usize, columns: usize, value: impl Into<Cell>) -> Self {
        let value = value.into();
        let shape = Shape::new(rows, columns);
        Self {
            shape,
            kind: value.kind(),
            data: vec![value; shape.elem_count()],
        }
    }

    /// Create a matrix of unset cells tagged with `kind`
    pub fn empty(rows: usize, columns: usize, kind: CellKind) -> Self {
        let shape = Shape::new(rows, columns);
        Self {
            shape,
            kind,
            data: vec![Cell::Empty; shape.elem_count()],
        }
    }

    /// Create a numeric matrix from row-major data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal `rows * columns`.
    /// For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice(data: &[f64], rows: usize, columns: usize) -> Self {
        Self::try_from_slice(data, rows, columns).expect("Matrix::from_slice failed")
    }

    /// Create a numeric matrix from row-major data (fallible version)
    pub fn try_from_slice(data: &[f64], rows: usize, columns: usize) -> Result<Self> {
        let shape = Shape::new(rows, columns);
        if data.len() != shape.elem_count() {
            return Err(Error::invalid_argument(
                "data",
                format!(
                    "expected {} values for a {shape} matrix, got {}",
                    shape.elem_count(),
                    data.len()
                ),
            ));
        }
        Ok(Self::from_f64_vec(data.to_vec(), shape))
    }

    /// Create a numeric matrix from a 2-D array of rows
    ///
    /// Every row must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(Error::invalid_argument(
                    "rows",
                    format!("row {i} has {} columns, expected {columns}", row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_f64_vec(data, Shape::new(rows.len(), columns)))
    }

    /// Create a text matrix from a 2-D array of strings
    pub fn from_text_rows<S: AsRef<str>, R: AsRef<[S]>>(rows: &[R]) -> Result<Self> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(Error::invalid_argument(
                    "rows",
                    format!("row {i} has {} columns, expected {columns}", row.len()),
                ));
            }
            data.extend(row.iter().map(|s| Cell::Text(s.as_ref().to_string())));
        }
        Ok(Self {
            shape: Shape::new(rows.len(), columns),
            kind: CellKind::Text,
            data,
        })
    }

    /// Create a matrix from row-major cells, inferring the kind
    ///
    /// Unset cells do not influence the inferred kind.
    pub fn from_cells(cells: Vec<Cell>, rows: usize, columns: usize) -> Result<Self> {
        let shape = Shape::new(rows, columns);
        if cells.len() != shape.elem_count() {
            return Err(Error::invalid_argument(
                "cells",
                format!(
                    "expected {} cells for a {shape} matrix, got {}",
                    shape.elem_count(),
                    cells.len()
                ),
            ));
        }
        let kind = crate::dtype::promote_all_cells(&cells);
        Ok(Self {
            shape,
            kind,
            data: cells,
        })
    }

    /// Wrap a row-major f64 buffer as a numeric matrix
    pub(crate) fn from_f64_vec(data: Vec<f64>, shape: Shape) -> Self {
        debug_assert_eq!(data.len(), shape.elem_count());
        Self {
            shape,
            kind: CellKind::Numeric,
            data: data.into_iter().map(Cell::Number).collect(),
        }
    }

    /// Wrap cells produced by an operation, with the kind already decided
    pub(crate) fn from_parts(shape: Shape, kind: CellKind, data: Vec<Cell>) -> Self {
        debug_assert_eq!(data.len(), shape.elem_count());
        Self { shape, kind, data }
    }

    // ===== Shape =====

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns
    #[inline]
    pub fn columns(&self) -> usize {
        self.shape.columns
    }

    /// Shape as `rows × columns`
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Container kind
    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Total number of cells
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix holds no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Whether the matrix has exactly one row
    #[inline]
    pub fn is_row_vector(&self) -> bool {
        self.shape.is_row_vector()
    }

    /// Whether the matrix has exactly one column
    #[inline]
    pub fn is_column_vector(&self) -> bool {
        self.shape.is_column_vector()
    }

    /// Whether either dimension is 1
    #[inline]
    pub fn is_vector(&self) -> bool {
        self.shape.is_vector()
    }

    /// Whether the matrix is `1 × 1`
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_scalar()
    }

    /// Whether rows equal columns
    #[inline]
    pub fn is_square(&self) -> bool {
        self.shape.is_square()
    }

    // ===== Cell access =====

    fn check_index(&self, row: usize, column: usize) -> Result<usize> {
        if !self.shape.contains(row, column) {
            return Err(Error::IndexOutOfBounds {
                row,
                column,
                rows: self.shape.rows,
                columns: self.shape.columns,
            });
        }
        Ok(self.shape.offset(row, column))
    }

    /// Borrow the cell at `(row, column)`
    pub fn get(&self, row: usize, column: usize) -> Result<&Cell> {
        let idx = self.check_index(row, column)?;
        Ok(&self.data[idx])
    }

    /// Cell at `(row, column)` coerced to `f64`
    ///
    /// Fails with [`Error::NotNumeric`] if the cell is text that does not
    /// read as a number.
    pub fn get_numeric(&self, row: usize, column: usize) -> Result<f64> {
        self.check_index(row, column)?;
        self.numeric_at(row, column)
    }

    /// Cell at `(row, column)` rendered as text
    pub fn get_text(&self, row: usize, column: usize) -> Result<String> {
        Ok(self.get(row, column)?.to_string())
    }

    /// Store `value` at `(row, column)`
    ///
    /// Storing a value of a different kind widens the matrix to
    /// [`CellKind::Mixed`].
    pub fn set(&mut self, row: usize, column: usize, value: impl Into<Cell>) -> Result<()> {
        let idx = self.check_index(row, column)?;
        let value = value.into();
        if !value.is_empty() && !self.kind.admits(value.kind()) {
            self.kind = promote(self.kind, value.kind());
        }
        self.data[idx] = value;
        Ok(())
    }

    /// Row-major view of all cells
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    /// Unchecked cell lookup for kernels that already validated indices
    #[inline]
    pub(crate) fn cell(&self, row: usize, column: usize) -> &Cell {
        &self.data[self.shape.offset(row, column)]
    }

    /// Numeric coercion without the bounds check
    #[inline]
    pub(crate) fn numeric_at(&self, row: usize, column: usize) -> Result<f64> {
        let cell = self.cell(row, column);
        cell.as_f64().ok_or_else(|| Error::NotNumeric {
            row,
            column,
            value: cell.to_string(),
        })
    }

    /// Copy all cells out as row-major `f64`
    ///
    /// This is the ingestion path for every numeric kernel.
    pub fn to_vec(&self) -> Result<Vec<f64>> {
        let columns = self.shape.columns.max(1);
        self.data
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                cell.as_f64().ok_or_else(|| Error::NotNumeric {
                    row: idx / columns,
                    column: idx % columns,
                    value: cell.to_string(),
                })
            })
            .collect()
    }

    /// Copy all cells out as nested rows of `f64`
    pub fn to_rows(&self) -> Result<Vec<Vec<f64>>> {
        let flat = self.to_vec()?;
        if self.shape.columns == 0 {
            return Ok(vec![Vec::new(); self.shape.rows]);
        }
        Ok(flat
            .chunks(self.shape.columns)
            .map(|row| row.to_vec())
            .collect())
    }

    /// Returns true if any cell fails numeric coercion
    pub fn has_non_numeric(&self) -> bool {
        self.data.iter().any(|cell| !cell.is_numeric())
    }

    // ===== Slicing =====

    /// Copy of rows `rows` and columns `columns`
    pub fn submatrix(&self, rows: Range<usize>, columns: Range<usize>) -> Result<Self> {
        if rows.start > rows.end
            || columns.start > columns.end
            || rows.end > self.shape.rows
            || columns.end > self.shape.columns
        {
            return Err(Error::IndexOutOfBounds {
                row: rows.end,
                column: columns.end,
                rows: self.shape.rows,
                columns: self.shape.columns,
            });
        }
        let shape = Shape::new(rows.len(), columns.len());
        let mut data = Vec::with_capacity(shape.elem_count());
        for i in rows {
            for j in columns.clone() {
                data.push(self.cell(i, j).clone());
            }
        }
        Ok(Self::from_parts(shape, self.kind, data))
    }

    /// Copy of row `row` as a `1 × columns` matrix
    pub fn row(&self, row: usize) -> Result<Self> {
        if row >= self.shape.rows {
            return Err(Error::IndexOutOfBounds {
                row,
                column: 0,
                rows: self.shape.rows,
                columns: self.shape.columns,
            });
        }
        self.submatrix(row..row + 1, 0..self.shape.columns)
    }

    /// Copy of column `column` as a `rows × 1` matrix
    pub fn column(&self, column: usize) -> Result<Self> {
        if column >= self.shape.columns {
            return Err(Error::IndexOutOfBounds {
                row: 0,
                column,
                rows: self.shape.rows,
                columns: self.shape.columns,
            });
        }
        self.submatrix(0..self.shape.rows, column..column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), Shape::new(2, 3));
        assert_eq!(m.kind(), CellKind::Numeric);
        assert_eq!(m.to_vec().unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        let err = Matrix::from_rows(&rows).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "rows", .. }));
    }

    #[test]
    fn test_try_from_slice_length() {
        assert!(Matrix::try_from_slice(&[1.0, 2.0, 3.0], 2, 2).is_err());
        assert!(Matrix::try_from_slice(&[], 0, 4).is_ok());
    }

    #[test]
    fn test_get_set_widens_kind() {
        let mut m = Matrix::new(2, 2);
        m.set(0, 1, 5.0).unwrap();
        assert_eq!(m.kind(), CellKind::Numeric);
        m.set(1, 1, "7").unwrap();
        assert_eq!(m.kind(), CellKind::Mixed);
        assert_eq!(m.get_numeric(1, 1).unwrap(), 7.0);
        assert_eq!(m.get(0, 1).unwrap(), &Cell::Number(5.0));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = Matrix::new(2, 2);
        assert!(matches!(
            m.get(2, 0),
            Err(Error::IndexOutOfBounds { row: 2, .. })
        ));
    }

    #[test]
    fn test_not_numeric() {
        let m = Matrix::from_text_rows(&[["1", "x"]]).unwrap();
        assert_eq!(m.kind(), CellKind::Text);
        assert_eq!(m.get_numeric(0, 0).unwrap(), 1.0);
        let err = m.get_numeric(0, 1).unwrap_err();
        assert_eq!(
            err,
            Error::NotNumeric {
                row: 0,
                column: 1,
                value: "x".to_string()
            }
        );
        assert!(m.has_non_numeric());
        assert!(m.to_vec().is_err());
    }

    #[test]
    fn test_from_cells_infers_kind() {
        let cells = vec![Cell::from("a"), Cell::Empty, Cell::from("b"), Cell::from("c")];
        let m = Matrix::from_cells(cells, 2, 2).unwrap();
        assert_eq!(m.kind(), CellKind::Text);

        let cells = vec![Cell::from("a"), Cell::from(1.0)];
        let m = Matrix::from_cells(cells, 1, 2).unwrap();
        assert_eq!(m.kind(), CellKind::Mixed);
    }

    #[test]
    fn test_submatrix_row_column() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
        let sub = m.submatrix(1..3, 0..2).unwrap();
        assert_eq!(sub.to_vec().unwrap(), vec![4.0, 5.0, 7.0, 8.0]);
        assert_eq!(m.row(2).unwrap().to_vec().unwrap(), vec![7.0, 8.0, 9.0]);
        assert_eq!(m.column(1).unwrap().to_vec().unwrap(), vec![2.0, 5.0, 8.0]);
        assert!(m.column(3).is_err());
        assert!(m.submatrix(0..4, 0..1).is_err());
    }
}
