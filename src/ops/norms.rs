//! Entry-wise and induced norms, and the trace
//!
//! The 2-norm lives with the solver facade since it needs the SVD.

use crate::error::Result;
use crate::matrix::Matrix;

impl Matrix {
    /// Maximum absolute column sum
    pub fn norm1(&self) -> Result<f64> {
        let (rows, columns) = self.shape().dims();
        let data = self.to_vec()?;
        Ok((0..columns)
            .map(|j| (0..rows).map(|i| data[i * columns + j].abs()).sum::<f64>())
            .fold(0.0, nan_max))
    }

    /// Maximum absolute row sum
    pub fn norm_inf(&self) -> Result<f64> {
        let columns = self.columns();
        if columns == 0 {
            return Ok(0.0);
        }
        let data = self.to_vec()?;
        Ok(data
            .chunks(columns)
            .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
            .fold(0.0, nan_max))
    }

    /// Frobenius norm, accumulated with `hypot` so large entries do not overflow
    pub fn norm_f(&self) -> Result<f64> {
        Ok(self.to_vec()?.into_iter().fold(0.0, f64::hypot))
    }

    /// Sum of the main diagonal
    pub fn trace(&self) -> Result<f64> {
        (0..self.shape().min_dim())
            .map(|i| self.numeric_at(i, i))
            .sum()
    }
}

// Unlike `f64::max`, a NaN on either side wins.
fn nan_max(acc: f64, x: f64) -> f64 {
    if x.is_nan() || x > acc { x } else { acc }
}
