//! Plain-text rendering of a matrix

use super::Matrix;
use std::fmt;

impl fmt::Display for Matrix {
    /// Rows on separate lines, cells right-aligned to the widest rendered cell.
    ///
    /// A precision (`{:.3}`) applies to numeric cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .cells()
            .iter()
            .map(|cell| match (cell, f.precision()) {
                (crate::dtype::Cell::Number(v), Some(p)) => format!("{v:.p$}"),
                _ => cell.to_string(),
            })
            .collect();
        let width = rendered.iter().map(|s| s.chars().count()).max().unwrap_or(0);

        for i in 0..self.rows() {
            for j in 0..self.columns() {
                if j > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{:>width$}", rendered[i * self.columns() + j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_alignment() {
        let m = Matrix::from_rows(&[[1.0, -20.5], [300.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "    1  -20.5\n  300      4\n");
    }

    #[test]
    fn test_display_precision() {
        let m = Matrix::from_rows(&[[1.0, 2.5]]).unwrap();
        assert_eq!(format!("{m:.2}"), "1.00  2.50\n");
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(Matrix::new(0, 3).to_string(), "");
    }
}
