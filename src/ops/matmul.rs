//! Transpose and the dense matrix product
//!
//! The product caches the right operand column-major before accumulating,
//! so the inner loop walks two contiguous slices. Each output cell sums
//! its `k` terms in ascending order; the parallel path splits work by
//! output row only, so results do not depend on the thread count.

use crate::config::LinalgConfig;
use crate::error::{Error, Result};
use crate::matrix::{Matrix, Shape};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Matrix multiplication parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatmulParams {
    /// Number of rows in A (M)
    pub m: usize,
    /// Number of columns in A / rows in B (K)
    pub k: usize,
    /// Number of columns in B (N)
    pub n: usize,
}

impl MatmulParams {
    /// Create params for C`[M,N]` = A`[M,K]` @ B`[K,N]`
    pub fn new(m: usize, k: usize, n: usize) -> Self {
        Self { m, k, n }
    }

    /// Validate operand shapes and return the product dimensions
    ///
    /// Inner dimensions must match, otherwise [`Error::DimensionMismatch`].
    pub fn validate(a: Shape, b: Shape) -> Result<Self> {
        if a.columns != b.rows {
            return Err(Error::dimension_mismatch(
                "matrix_multiply",
                a.dims(),
                b.dims(),
            ));
        }
        Ok(Self::new(a.rows, a.columns, b.columns))
    }

    /// Output shape
    pub fn output_shape(&self) -> Shape {
        Shape::new(self.m, self.n)
    }
}

impl Matrix {
    /// New `columns × rows` matrix with `result[j][i] = self[i][j]`
    ///
    /// Works for every cell kind; cells are copied as they are.
    pub fn transpose(&self) -> Matrix {
        let shape = self.shape();
        let mut data = Vec::with_capacity(shape.elem_count());
        for j in 0..shape.columns {
            for i in 0..shape.rows {
                data.push(self.cell(i, j).clone());
            }
        }
        Matrix::from_parts(shape.transposed(), self.kind(), data)
    }

    /// True matrix product `self · other`
    ///
    /// # Example
    ///
    /// ```
    /// use matr::prelude::*;
    ///
    /// let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])?;
    /// let b = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]])?;
    /// assert_eq!(a.matrix_multiply(&b)?.to_vec()?, vec![22.0, 28.0, 49.0, 64.0]);
    /// # Ok::<(), matr::error::Error>(())
    /// ```
    pub fn matrix_multiply(&self, other: &Matrix) -> Result<Matrix> {
        self.matrix_multiply_with_config(other, &LinalgConfig::default())
    }

    /// [`Matrix::matrix_multiply`] with an explicit parallel threshold
    pub fn matrix_multiply_with_config(
        &self,
        other: &Matrix,
        config: &LinalgConfig,
    ) -> Result<Matrix> {
        let params = MatmulParams::validate(self.shape(), other.shape())?;
        let a = self.to_vec()?;
        let b = other.to_vec()?;
        let c = matmul_f64(&a, &b, params, config.parallel_threshold);
        Ok(Matrix::from_f64_vec(c, params.output_shape()))
    }
}

/// Row-major `C = A · B` over raw buffers
fn matmul_f64(
    a: &[f64],
    b: &[f64],
    params: MatmulParams,
    parallel_threshold: usize,
) -> Vec<f64> {
    let MatmulParams { m, k, n } = params;
    let mut c = vec![0.0; m * n];
    if m == 0 || n == 0 {
        return c;
    }

    // Column j of B becomes the contiguous slice bt[j*k..(j+1)*k].
    let mut bt = vec![0.0; k * n];
    for p in 0..k {
        for j in 0..n {
            bt[j * k + p] = b[p * n + j];
        }
    }

    let fill_row = |i: usize, row: &mut [f64]| {
        let a_row = &a[i * k..(i + 1) * k];
        for (j, out) in row.iter_mut().enumerate() {
            let b_col = &bt[j * k..(j + 1) * k];
            let mut sum = 0.0;
            for p in 0..k {
                sum += a_row[p] * b_col[p];
            }
            *out = sum;
        }
    };

    #[cfg(feature = "rayon")]
    {
        if m >= parallel_threshold {
            c.par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, row)| fill_row(i, row));
            return c;
        }
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel_threshold;

    for (i, row) in c.chunks_mut(n).enumerate() {
        fill_row(i, row);
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), Shape::new(3, 2));
        assert_eq!(t.to_vec().unwrap(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_transpose_keeps_text() {
        let a = Matrix::from_text_rows(&[["a", "b"]]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), Shape::new(2, 1));
        assert_eq!(t.get_text(1, 0).unwrap(), "b");
    }

    #[test]
    fn test_matmul_2x3_3x2() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let c = a.matrix_multiply(&b).unwrap();
        assert_eq!(c.shape(), Shape::new(2, 2));
        assert_eq!(c.to_vec().unwrap(), vec![22.0, 28.0, 49.0, 64.0]);
    }

    #[test]
    fn test_matmul_inner_mismatch() {
        let a = Matrix::new(2, 3);
        let err = a.matrix_multiply(&Matrix::new(2, 3)).unwrap_err();
        assert_eq!(err, Error::dimension_mismatch("matrix_multiply", (2, 3), (2, 3)));
    }

    #[test]
    fn test_matmul_empty_inner() {
        let a = Matrix::new(2, 0);
        let b = Matrix::new(0, 3);
        let c = a.matrix_multiply(&b).unwrap();
        assert_eq!(c.to_vec().unwrap(), vec![0.0; 6]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let a = crate::matrix::random_seeded(9, 7, 1);
        let b = crate::matrix::random_seeded(7, 5, 2);
        let seq = a
            .matrix_multiply_with_config(
                &b,
                &LinalgConfig::default().with_parallel_threshold(usize::MAX),
            )
            .unwrap();
        let par = a
            .matrix_multiply_with_config(&b, &LinalgConfig::default().with_parallel_threshold(1))
            .unwrap();
        assert_eq!(seq, par);
    }
}
