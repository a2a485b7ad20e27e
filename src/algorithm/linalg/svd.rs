//! Singular Value Decomposition (SVD) using the one-sided Jacobi algorithm

use super::helpers::{ingest, normalize_scale, to_matrix, transpose_buffer};
use super::jacobi::{
    JacobiRotation, apply_rotation_to_columns, argsort_desc, compute_gram_elements,
    fill_null_columns, identity_matrix, normalize_columns, permute_columns,
};
use crate::config::LinalgConfig;
use crate::error::{Error, Result};
use crate::matrix::{Matrix, Shape};
use tracing::{debug, trace, warn};

/// Singular Value Decomposition result: A = U @ S @ V^T
///
/// With `k = min(m, n)`: U is `m × k`, S holds `k` singular values in
/// descending order, V is `n × k`.
#[derive(Clone, Debug)]
pub struct SvdDecomposition {
    u: Vec<f64>,
    s: Vec<f64>,
    v: Vec<f64>,
    m: usize,
    n: usize,
}

impl SvdDecomposition {
    /// SVD with the default sweep budget
    pub fn new(a: &Matrix) -> Result<Self> {
        Self::with_config(a, &LinalgConfig::default())
    }

    /// SVD decomposition using One-Sided Jacobi algorithm
    ///
    /// Algorithm: One-Sided Jacobi SVD
    /// 1. If m < n: factor A^T instead and swap U↔V at the end
    /// 2. Initialize: B = A / 2^e (working copy, largest entry in [1, 2)),
    ///    V = I_n
    /// 3. REPEAT (at most `max_sweeps` sweeps):
    ///    FOR each pair (p, q) where p < q:
    ///      - Compute Gram elements: a_pp, a_qq, a_pq = B[:,p]·B[:,q]
    ///      - If |a_pq| > tol·sqrt(a_pp·a_qq) and neither column is
    ///        negligible: rotate B and V columns
    ///    Converged when a sweep performs no rotation
    /// 4. Extract: S[j] = 2^e·||B[:,j]||, U[:,j] = B[:,j]/||B[:,j]||
    /// 5. Sort S descending, reorder U and V columns accordingly
    /// 6. Complete U to an orthonormal basis where S[j] = 0
    ///
    /// Fails with [`Error::ConvergenceFailure`] if the sweep budget runs out.
    pub fn with_config(a: &Matrix, config: &LinalgConfig) -> Result<Self> {
        let (data, m, n) = ingest(a)?;
        let k = m.min(n);

        if k == 0 {
            return Ok(Self {
                u: Vec::new(),
                s: Vec::new(),
                v: Vec::new(),
                m,
                n,
            });
        }

        // If m < n, transpose and swap U/V at the end
        let transpose = m < n;
        let (work_m, work_n) = if transpose { (n, m) } else { (m, n) };
        let mut b = if transpose {
            transpose_buffer(&data, m, n)
        } else {
            data
        };
        // The Gram entries square B, so keep them clear of overflow and
        // underflow
        let scale = normalize_scale(&mut b);
        let mut v = identity_matrix(work_n);

        let tol = work_m as f64 * f64::EPSILON;
        // Columns below ε·‖A‖_F are numerically zero; rotating them only
        // shrinks them further.
        let negligible = f64::EPSILON * f64::EPSILON * b.iter().map(|x| x * x).sum::<f64>();
        let mut converged = false;
        let mut sweeps = 0;

        while sweeps < config.max_sweeps {
            sweeps += 1;
            let mut rotations = 0usize;

            for p in 0..work_n {
                for q in (p + 1)..work_n {
                    let (a_pp, a_qq, a_pq) = compute_gram_elements(&b, work_m, work_n, p, q);
                    if a_pq == 0.0
                        || a_pp.min(a_qq) <= negligible
                        || a_pq.abs() <= tol * (a_pp * a_qq).sqrt()
                    {
                        continue;
                    }

                    let rot = JacobiRotation::compute(a_pp, a_qq, a_pq);
                    apply_rotation_to_columns(&mut b, work_m, work_n, p, q, &rot);
                    apply_rotation_to_columns(&mut v, work_n, work_n, p, q, &rot);
                    rotations += 1;
                }
            }

            trace!(sweep = sweeps, rotations, "svd sweep");
            if rotations == 0 {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(m, n, sweeps, "svd did not converge");
            return Err(Error::ConvergenceFailure {
                algorithm: "svd",
                iterations: sweeps,
            });
        }

        // S[j] = 2^e·||B[:,j]||, U[:,j] = B[:,j] / ||B[:,j]||
        let norms = normalize_columns(&mut b, work_m, work_n);
        let indices = argsort_desc(&norms);
        let sorted: Vec<f64> = indices.iter().map(|&i| norms[i]).collect();
        let mut u_sorted = permute_columns(&b, work_m, work_n, &indices, work_n);
        let v_sorted = permute_columns(&v, work_n, work_n, &indices, work_n);
        fill_null_columns(&mut u_sorted, work_m, work_n, &sorted);
        let s: Vec<f64> = sorted.iter().map(|sigma| sigma * scale).collect();

        debug!(m, n, sweeps, sigma_max = s[0], "svd decomposition");

        // A^T = U' S V'^T  =>  A = V' S U'^T
        let (u, v) = if transpose {
            (v_sorted, u_sorted)
        } else {
            (u_sorted, v_sorted)
        };
        Ok(Self { u, s, v, m, n })
    }

    /// Shape of the factored matrix
    pub fn shape(&self) -> Shape {
        Shape::new(self.m, self.n)
    }

    /// Left singular vectors U [m, k]
    ///
    /// Columns are orthonormal, including those paired with a zero
    /// singular value.
    pub fn u(&self) -> Matrix {
        to_matrix(self.u.clone(), self.m, self.s.len())
    }

    /// Singular values as a diagonal matrix S [k, k]
    pub fn s(&self) -> Matrix {
        let k = self.s.len();
        let mut s = vec![0.0; k * k];
        for (i, &sigma) in self.s.iter().enumerate() {
            s[i * k + i] = sigma;
        }
        to_matrix(s, k, k)
    }

    /// Singular values, descending
    pub fn singular_values(&self) -> &[f64] {
        &self.s
    }

    /// Right singular vectors V [n, k]
    pub fn v(&self) -> Matrix {
        to_matrix(self.v.clone(), self.n, self.s.len())
    }

    /// Two-norm: the largest singular value, 0 for an empty matrix
    pub fn norm2(&self) -> f64 {
        self.s.first().copied().unwrap_or(0.0)
    }

    /// Ratio of the largest to the smallest singular value
    ///
    /// Infinite when the smallest singular value is exactly zero, NaN for an
    /// empty matrix.
    pub fn cond(&self) -> f64 {
        match (self.s.first(), self.s.last()) {
            (Some(_), Some(&min)) if min == 0.0 => f64::INFINITY,
            (Some(&max), Some(&min)) => max / min,
            _ => f64::NAN,
        }
    }

    /// Number of singular values above `max(m, n) · σ_max · ε`
    pub fn rank(&self) -> usize {
        let tol = self.m.max(self.n) as f64 * self.norm2() * f64::EPSILON;
        self.rank_with_tolerance(tol)
    }

    /// Number of singular values strictly above `tol`
    pub fn rank_with_tolerance(&self, tol: f64) -> usize {
        self.s.iter().filter(|&&sigma| sigma > tol).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(svd: &SvdDecomposition) -> Matrix {
        svd.u()
            .matrix_multiply(&svd.s())
            .unwrap()
            .matrix_multiply(&svd.v().transpose())
            .unwrap()
    }

    fn assert_close(a: &Matrix, b: &Matrix, tol: f64) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.to_vec().unwrap().iter().zip(b.to_vec().unwrap()) {
            assert!((x - y).abs() <= tol, "{x} vs {y}");
        }
    }

    #[test]
    fn test_svd_tall() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let svd = SvdDecomposition::new(&a).unwrap();
        assert_eq!(svd.u().shape(), Shape::new(3, 2));
        assert_eq!(svd.v().shape(), Shape::new(2, 2));
        let s = svd.singular_values();
        assert!(s[0] >= s[1]);
        assert_close(&reconstruct(&svd), &a, 1e-10);
    }

    #[test]
    fn test_svd_wide() {
        let a = Matrix::from_rows(&[[1.0, 0.0, 2.0], [0.0, 3.0, 0.0]]).unwrap();
        let svd = SvdDecomposition::new(&a).unwrap();
        assert_eq!(svd.u().shape(), Shape::new(2, 2));
        assert_eq!(svd.v().shape(), Shape::new(3, 2));
        assert!((svd.norm2() - 3.0).abs() < 1e-12);
        assert!((svd.singular_values()[1] - 5f64.sqrt()).abs() < 1e-12);
        assert_close(&reconstruct(&svd), &a, 1e-10);
    }

    #[test]
    fn test_svd_diagonal_values() {
        let a = Matrix::from_rows(&[[2.0, 0.0, 0.0], [0.0, -5.0, 0.0], [0.0, 0.0, 1.0]]).unwrap();
        let svd = SvdDecomposition::new(&a).unwrap();
        assert_eq!(svd.singular_values(), &[5.0, 2.0, 1.0]);
        assert!((svd.cond() - 5.0).abs() < 1e-12);
        assert_eq!(svd.rank(), 3);
    }

    #[test]
    fn test_svd_rank_and_cond_singular() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [0.0, 0.0]]).unwrap();
        let svd = SvdDecomposition::new(&a).unwrap();
        assert_eq!(svd.rank(), 1);
        assert_eq!(svd.cond(), f64::INFINITY);
        assert_eq!(svd.rank_with_tolerance(10.0), 0);
    }

    fn assert_orthonormal_columns(q: &Matrix, tol: f64) {
        let gram = q.transpose().matrix_multiply(q).unwrap();
        let k = gram.rows();
        assert_close(&gram, &crate::ops::identity(k, k), tol);
    }

    #[test]
    fn test_svd_rank_deficient_bases_orthonormal() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let svd = SvdDecomposition::new(&a).unwrap();
        assert_eq!(svd.singular_values()[1], 0.0);
        assert_orthonormal_columns(&svd.u(), 1e-12);
        assert_orthonormal_columns(&svd.v(), 1e-12);
        assert_close(&reconstruct(&svd), &a, 1e-12);

        let wide = Matrix::from_rows(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0]]).unwrap();
        let svd = SvdDecomposition::new(&wide).unwrap();
        assert_orthonormal_columns(&svd.u(), 1e-12);
        assert_orthonormal_columns(&svd.v(), 1e-12);
        assert_close(&reconstruct(&svd), &wide, 1e-12);
    }

    #[test]
    fn test_svd_extreme_magnitudes() {
        let a = Matrix::from_rows(&[[1.0, 1.0], [0.0, 1.0]]).unwrap();
        let base = SvdDecomposition::new(&a).unwrap();
        let golden = (1.0 + 5f64.sqrt()) / 2.0;
        assert!((base.norm2() - golden).abs() < 1e-12);

        for c in [1e160, 1e-170] {
            let svd = SvdDecomposition::new(&a.scale(c).unwrap()).unwrap();
            for (x, y) in svd.singular_values().iter().zip(base.singular_values()) {
                assert!((x / c - y).abs() < 1e-12, "{c}: {x} vs {y}");
            }
            assert!((svd.cond() - golden * golden).abs() < 1e-10);
            assert_eq!(svd.rank(), 2);
        }
    }

    #[test]
    fn test_svd_empty() {
        let svd = SvdDecomposition::new(&Matrix::new(0, 3)).unwrap();
        assert_eq!(svd.norm2(), 0.0);
        assert_eq!(svd.rank(), 0);
        assert!(svd.cond().is_nan());
    }

    #[test]
    fn test_svd_sweep_budget() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let config = LinalgConfig::default().with_max_sweeps(0);
        assert_eq!(
            SvdDecomposition::with_config(&a, &config).unwrap_err(),
            Error::ConvergenceFailure {
                algorithm: "svd",
                iterations: 0
            }
        );
    }
}
