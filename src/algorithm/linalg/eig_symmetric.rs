//! Symmetric eigendecomposition via Householder tridiagonalization and
//! implicit QL iteration

use crate::error::{Error, Result};
use tracing::{trace, warn};

/// Eigenpairs of a symmetric matrix
#[derive(Clone, Debug)]
pub(crate) struct SymmetricEigen {
    /// Eigenvalues in ascending order
    pub values: Vec<f64>,
    /// Orthogonal eigenvectors as columns [n, n]
    pub vectors: Vec<f64>,
    /// QL iterations spent
    pub iterations: usize,
}

/// Eigendecomposition of a symmetric `n × n` row-major buffer
///
/// Only the lower triangle is read. Fails with
/// [`Error::ConvergenceFailure`] once `max_iterations` QL steps have been
/// spent without deflating every eigenvalue.
pub(crate) fn symmetric_eigen(
    a: Vec<f64>,
    n: usize,
    max_iterations: usize,
) -> Result<SymmetricEigen> {
    if n == 0 {
        return Ok(SymmetricEigen {
            values: Vec::new(),
            vectors: Vec::new(),
            iterations: 0,
        });
    }

    let mut v = a;
    let mut d = vec![0.0; n];
    let mut e = vec![0.0; n];
    tridiagonalize(&mut v, &mut d, &mut e, n);
    let iterations = tridiagonal_ql(&mut v, &mut d, &mut e, n, max_iterations)?;

    Ok(SymmetricEigen {
        values: d,
        vectors: v,
        iterations,
    })
}

/// Householder reduction to tridiagonal form
///
/// On return `d` holds the diagonal, `e[1..]` the subdiagonal and `v` the
/// accumulated orthogonal transformation.
fn tridiagonalize(v: &mut [f64], d: &mut [f64], e: &mut [f64], n: usize) {
    let at = |i: usize, j: usize| i * n + j;

    for j in 0..n {
        d[j] = v[at(n - 1, j)];
    }

    for i in (1..n).rev() {
        // Scale to avoid under/overflow
        let scale: f64 = d[..i].iter().map(|x| x.abs()).sum();
        let mut h = 0.0;

        if scale == 0.0 {
            e[i] = d[i - 1];
            for j in 0..i {
                d[j] = v[at(i - 1, j)];
                v[at(i, j)] = 0.0;
                v[at(j, i)] = 0.0;
            }
        } else {
            // Generate Householder vector
            for dk in &mut d[..i] {
                *dk /= scale;
                h += *dk * *dk;
            }
            let mut f = d[i - 1];
            let mut g = h.sqrt();
            if f > 0.0 {
                g = -g;
            }
            e[i] = scale * g;
            h -= f * g;
            d[i - 1] = f - g;
            e[..i].fill(0.0);

            // Apply similarity transformation to remaining columns
            for j in 0..i {
                f = d[j];
                v[at(j, i)] = f;
                g = e[j] + v[at(j, j)] * f;
                for k in (j + 1)..i {
                    g += v[at(k, j)] * d[k];
                    e[k] += v[at(k, j)] * f;
                }
                e[j] = g;
            }
            f = 0.0;
            for j in 0..i {
                e[j] /= h;
                f += e[j] * d[j];
            }
            let hh = f / (h + h);
            for j in 0..i {
                e[j] -= hh * d[j];
            }
            for j in 0..i {
                f = d[j];
                g = e[j];
                for k in j..i {
                    v[at(k, j)] -= f * e[k] + g * d[k];
                }
                d[j] = v[at(i - 1, j)];
                v[at(i, j)] = 0.0;
            }
        }
        d[i] = h;
    }

    // Accumulate transformations
    for i in 0..(n - 1) {
        v[at(n - 1, i)] = v[at(i, i)];
        v[at(i, i)] = 1.0;
        let h = d[i + 1];
        if h != 0.0 {
            for k in 0..=i {
                d[k] = v[at(k, i + 1)] / h;
            }
            for j in 0..=i {
                let mut g = 0.0;
                for k in 0..=i {
                    g += v[at(k, i + 1)] * v[at(k, j)];
                }
                for k in 0..=i {
                    v[at(k, j)] -= g * d[k];
                }
            }
        }
        for k in 0..=i {
            v[at(k, i + 1)] = 0.0;
        }
    }
    for j in 0..n {
        d[j] = v[at(n - 1, j)];
        v[at(n - 1, j)] = 0.0;
    }
    v[at(n - 1, n - 1)] = 1.0;
    e[0] = 0.0;
}

/// Implicit QL iteration on the tridiagonal form, then ascending sort
///
/// Returns the number of QL steps spent.
fn tridiagonal_ql(
    v: &mut [f64],
    d: &mut [f64],
    e: &mut [f64],
    n: usize,
    max_iterations: usize,
) -> Result<usize> {
    let at = |i: usize, j: usize| i * n + j;
    let eps = f64::EPSILON;

    e.copy_within(1..n, 0);
    e[n - 1] = 0.0;

    let mut f = 0.0;
    let mut tst1 = 0.0f64;
    let mut total = 0usize;

    for l in 0..n {
        // Find small subdiagonal element
        tst1 = tst1.max(d[l].abs() + e[l].abs());
        let mut m = l;
        while m < n - 1 && e[m].abs() > eps * tst1 {
            m += 1;
        }

        // If m == l, d[l] is already an eigenvalue
        if m > l {
            loop {
                if total >= max_iterations {
                    warn!(n, iterations = total, "symmetric ql did not converge");
                    return Err(Error::ConvergenceFailure {
                        algorithm: "symmetric_ql",
                        iterations: total,
                    });
                }
                total += 1;
                trace!(l, m, iteration = total, "ql step");

                // Compute implicit shift
                let mut g = d[l];
                let mut p = (d[l + 1] - g) / (2.0 * e[l]);
                let mut r = p.hypot(1.0);
                if p < 0.0 {
                    r = -r;
                }
                d[l] = e[l] / (p + r);
                d[l + 1] = e[l] * (p + r);
                let dl1 = d[l + 1];
                let mut h = g - d[l];
                for di in &mut d[(l + 2)..n] {
                    *di -= h;
                }
                f += h;

                // Implicit QL transformation
                p = d[m];
                let mut c = 1.0;
                let mut c2 = c;
                let mut c3 = c;
                let el1 = e[l + 1];
                let mut s = 0.0;
                let mut s2 = 0.0;
                for i in (l..m).rev() {
                    c3 = c2;
                    c2 = c;
                    s2 = s;
                    g = c * e[i];
                    h = c * p;
                    r = p.hypot(e[i]);
                    e[i + 1] = s * r;
                    s = e[i] / r;
                    c = p / r;
                    p = c * d[i] - s * g;
                    d[i + 1] = h + s * (c * g + s * d[i]);

                    // Accumulate transformation
                    for k in 0..n {
                        let t = v[at(k, i + 1)];
                        v[at(k, i + 1)] = s * v[at(k, i)] + c * t;
                        v[at(k, i)] = c * v[at(k, i)] - s * t;
                    }
                }
                p = -s * s2 * c3 * el1 * e[l] / dl1;
                e[l] = s * p;
                d[l] = c * p;

                if e[l].abs() <= eps * tst1 {
                    break;
                }
            }
        }
        d[l] += f;
        e[l] = 0.0;
    }

    // Selection sort to ascending order, swapping eigenvector columns along
    for i in 0..(n - 1) {
        let mut k = i;
        let mut p = d[i];
        for (j, &dj) in d.iter().enumerate().skip(i + 1) {
            if dj < p {
                k = j;
                p = dj;
            }
        }
        if k != i {
            d[k] = d[i];
            d[i] = p;
            for row in 0..n {
                v.swap(at(row, i), at(row, k));
            }
        }
    }

    Ok(total)
}
