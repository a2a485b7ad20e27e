//! Matrix factories: constant fills, identity, random, diagonal, merges
//!
//! Pure constructor functions with no shared state. Each returns freshly
//! allocated storage.

use super::{Matrix, Shape};
use crate::dtype::{Cell, promote};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `rows × columns` matrix of zeros
pub fn zeros(rows: usize, columns: usize) -> Matrix {
    Matrix::filled(rows, columns, 0.0)
}

/// `rows × columns` matrix of ones
pub fn ones(rows: usize, columns: usize) -> Matrix {
    Matrix::filled(rows, columns, 1.0)
}

/// `rows × columns` matrix of NaN
pub fn nan(rows: usize, columns: usize) -> Matrix {
    Matrix::filled(rows, columns, f64::NAN)
}

/// `rows × columns` matrix with ones on the main diagonal and zeros elsewhere
pub fn identity(rows: usize, columns: usize) -> Matrix {
    let shape = Shape::new(rows, columns);
    let mut data = vec![0.0; shape.elem_count()];
    for i in 0..shape.min_dim() {
        data[shape.offset(i, i)] = 1.0;
    }
    Matrix::from_f64_vec(data, shape)
}

/// `rows × columns` matrix of uniform samples from `[0, 1)`
pub fn random(rows: usize, columns: usize) -> Matrix {
    let mut rng = rand::rng();
    fill_random(&mut rng, rows, columns)
}

/// Like [`random`], but reproducible for a given `seed`
pub fn random_seeded(rows: usize, columns: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    fill_random(&mut rng, rows, columns)
}

fn fill_random<G: Rng>(rng: &mut G, rows: usize, columns: usize) -> Matrix {
    let shape = Shape::new(rows, columns);
    let data: Vec<f64> = (0..shape.elem_count()).map(|_| rng.random()).collect();
    Matrix::from_f64_vec(data, shape)
}

/// Square diagonal matrix built from a row vector
///
/// For a `1 × n` input the result is `n × n` with `result[i][j] = v[j]`
/// where `i == j + offset`, and zero elsewhere. A positive `offset` places
/// the values below the main diagonal, a negative one above it.
pub fn diag(vector: &Matrix, offset: isize) -> Result<Matrix> {
    if !vector.is_row_vector() {
        return Err(Error::dimension_mismatch(
            "diag",
            vector.shape().dims(),
            (1, vector.columns()),
        ));
    }
    let n = vector.columns();
    let mut result = zeros(n, n);
    for j in 0..n {
        let i = j as isize + offset;
        if (0..n as isize).contains(&i) {
            result.set(i as usize, j, vector.cell(0, j).clone())?;
        }
    }
    Ok(result)
}

/// Stack `bottom` below `top`
///
/// Both matrices must have the same number of columns.
pub fn vertical_merge(top: &Matrix, bottom: &Matrix) -> Result<Matrix> {
    if top.columns() != bottom.columns() {
        return Err(Error::dimension_mismatch(
            "vertical_merge",
            top.shape().dims(),
            bottom.shape().dims(),
        ));
    }
    let shape = Shape::new(top.rows() + bottom.rows(), top.columns());
    let data: Vec<Cell> = top.cells().iter().chain(bottom.cells()).cloned().collect();
    Ok(Matrix::from_parts(
        shape,
        promote(top.kind(), bottom.kind()),
        data,
    ))
}

/// Place `right` to the right of `left`
///
/// Both matrices must have the same number of rows.
pub fn horizontal_merge(left: &Matrix, right: &Matrix) -> Result<Matrix> {
    if left.rows() != right.rows() {
        return Err(Error::dimension_mismatch(
            "horizontal_merge",
            left.shape().dims(),
            right.shape().dims(),
        ));
    }
    let shape = Shape::new(left.rows(), left.columns() + right.columns());
    let mut data = Vec::with_capacity(shape.elem_count());
    for i in 0..shape.rows {
        for j in 0..left.columns() {
            data.push(left.cell(i, j).clone());
        }
        for j in 0..right.columns() {
            data.push(right.cell(i, j).clone());
        }
    }
    Ok(Matrix::from_parts(
        shape,
        promote(left.kind(), right.kind()),
        data,
    ))
}
