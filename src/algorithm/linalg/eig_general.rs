//! General (non-symmetric) eigendecomposition
//!
//! Reduces to Hessenberg form, iterates to real Schur form, then recovers
//! eigenvectors by back-substitution on the quasi-triangular factor and
//! maps them back through the Schur vectors.

use super::helpers::complex_div;
use super::jacobi::identity_matrix;
use super::schur::{RealSchur, hessenberg_reduction, real_schur};
use crate::error::Result;
use tracing::debug;

/// Eigenpairs of a general real matrix in real block form
#[derive(Clone, Debug)]
pub(crate) struct GeneralEigen {
    /// Real parts of the eigenvalues
    pub wr: Vec<f64>,
    /// Imaginary parts; conjugate pairs appear as `+b`, `-b`
    pub wi: Vec<f64>,
    /// Real eigenvector matrix [n, n]
    ///
    /// For a pair `a ± bi` at columns `j, j+1`, the complex eigenvector of
    /// `a + bi` is `V[:, j] + i·V[:, j+1]`.
    pub vectors: Vec<f64>,
}

pub(crate) fn general_eigen(a: Vec<f64>, n: usize, max_iterations: usize) -> Result<GeneralEigen> {
    let mut h = a;
    let mut z = identity_matrix(n);
    hessenberg_reduction(&mut h, &mut z, n);

    let RealSchur {
        mut t,
        mut z,
        wr,
        wi,
        norm,
    } = real_schur(h, z, n, max_iterations)?;

    back_substitute(&mut t, &wr, &wi, n, norm);
    back_transform(&mut z, &t, n);

    debug!(
        n,
        complex_pairs = wi.iter().filter(|&&x| x > 0.0).count(),
        "general eigendecomposition"
    );
    Ok(GeneralEigen {
        wr,
        wi,
        vectors: z,
    })
}

/// Solve for the eigenvectors of the quasi-triangular T in place
///
/// Column `j` of `t` (columns `j, j+1` for a complex pair) is overwritten
/// with the eigenvector in the Schur basis.
fn back_substitute(t: &mut [f64], wr: &[f64], wi: &[f64], nn: usize, norm: f64) {
    if norm == 0.0 {
        return;
    }
    let at = |i: usize, j: usize| i * nn + j;
    let eps = f64::EPSILON;

    for n in (0..nn).rev() {
        let p = wr[n];
        let q = wi[n];

        if q == 0.0 {
            // Real vector
            let mut l = n;
            t[at(n, n)] = 1.0;
            let (mut zz, mut s) = (0.0, 0.0);
            for i in (0..n).rev() {
                let w = t[at(i, i)] - p;
                let r: f64 = (l..=n).map(|j| t[at(i, j)] * t[at(j, n)]).sum();

                if wi[i] < 0.0 {
                    zz = w;
                    s = r;
                    continue;
                }

                l = i;
                if wi[i] == 0.0 {
                    t[at(i, n)] = if w != 0.0 { -r / w } else { -r / (eps * norm) };
                } else {
                    // Solve the real 2×2 system
                    let x = t[at(i, i + 1)];
                    let y = t[at(i + 1, i)];
                    let denom = (wr[i] - p) * (wr[i] - p) + wi[i] * wi[i];
                    let ti = (x * s - zz * r) / denom;
                    t[at(i, n)] = ti;
                    t[at(i + 1, n)] = if x.abs() > zz.abs() {
                        (-r - w * ti) / x
                    } else {
                        (-s - y * ti) / zz
                    };
                }

                // Overflow control
                let tmax = t[at(i, n)].abs();
                if (eps * tmax) * tmax > 1.0 {
                    for j in i..=n {
                        t[at(j, n)] /= tmax;
                    }
                }
            }
        } else if q < 0.0 {
            // Complex vector, stored in columns n-1 (real) and n (imaginary)
            let mut l = n - 1;

            // Last vector component imaginary so matrix is triangular
            if t[at(n, n - 1)].abs() > t[at(n - 1, n)].abs() {
                t[at(n - 1, n - 1)] = q / t[at(n, n - 1)];
                t[at(n - 1, n)] = -(t[at(n, n)] - p) / t[at(n, n - 1)];
            } else {
                let (cr, ci) = complex_div(0.0, -t[at(n - 1, n)], t[at(n - 1, n - 1)] - p, q);
                t[at(n - 1, n - 1)] = cr;
                t[at(n - 1, n)] = ci;
            }
            t[at(n, n - 1)] = 0.0;
            t[at(n, n)] = 1.0;

            let (mut zz, mut r, mut s) = (0.0, 0.0, 0.0);
            for i in (0..(n - 1)).rev() {
                let mut ra = 0.0;
                let mut sa = 0.0;
                for j in l..=n {
                    ra += t[at(i, j)] * t[at(j, n - 1)];
                    sa += t[at(i, j)] * t[at(j, n)];
                }
                let w = t[at(i, i)] - p;

                if wi[i] < 0.0 {
                    zz = w;
                    r = ra;
                    s = sa;
                    continue;
                }

                l = i;
                if wi[i] == 0.0 {
                    let (cr, ci) = complex_div(-ra, -sa, w, q);
                    t[at(i, n - 1)] = cr;
                    t[at(i, n)] = ci;
                } else {
                    // Solve the complex 2×2 system
                    let x = t[at(i, i + 1)];
                    let y = t[at(i + 1, i)];
                    let mut vr = (wr[i] - p) * (wr[i] - p) + wi[i] * wi[i] - q * q;
                    let vi = (wr[i] - p) * 2.0 * q;
                    if vr == 0.0 && vi == 0.0 {
                        vr = eps * norm * (w.abs() + q.abs() + x.abs() + y.abs() + zz.abs());
                    }
                    let (cr, ci) = complex_div(
                        x * r - zz * ra + q * sa,
                        x * s - zz * sa - q * ra,
                        vr,
                        vi,
                    );
                    t[at(i, n - 1)] = cr;
                    t[at(i, n)] = ci;

                    if x.abs() > zz.abs() + q.abs() {
                        t[at(i + 1, n - 1)] = (-ra - w * t[at(i, n - 1)] + q * t[at(i, n)]) / x;
                        t[at(i + 1, n)] = (-sa - w * t[at(i, n)] - q * t[at(i, n - 1)]) / x;
                    } else {
                        let (cr, ci) = complex_div(
                            -r - y * t[at(i, n - 1)],
                            -s - y * t[at(i, n)],
                            zz,
                            q,
                        );
                        t[at(i + 1, n - 1)] = cr;
                        t[at(i + 1, n)] = ci;
                    }
                }

                // Overflow control
                let tmax = t[at(i, n - 1)].abs().max(t[at(i, n)].abs());
                if (eps * tmax) * tmax > 1.0 {
                    for j in i..=n {
                        t[at(j, n - 1)] /= tmax;
                        t[at(j, n)] /= tmax;
                    }
                }
            }
        }
    }
}

/// Z ← Z · upper(T), column by column from the right so each step reads
/// only columns not yet overwritten
fn back_transform(z: &mut [f64], t: &[f64], n: usize) {
    for j in (0..n).rev() {
        for i in 0..n {
            let sum: f64 = (0..=j).map(|k| z[i * n + k] * t[k * n + j]).sum();
            z[i * n + j] = sum;
        }
    }
}
