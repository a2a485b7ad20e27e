//! Real Schur form via Hessenberg reduction and Francis double-shift QR

use crate::error::{Error, Result};
use tracing::{debug, trace, warn};

/// Real Schur factorization: A = Z @ T @ Z^T
///
/// T is upper quasi-triangular with 1×1 blocks for real eigenvalues and
/// 2×2 blocks for complex conjugate pairs. Eigenvalues are recorded as the
/// iteration deflates them.
#[derive(Clone, Debug)]
pub(crate) struct RealSchur {
    /// Quasi-triangular Schur form T [n, n]
    pub t: Vec<f64>,
    /// Orthogonal transformation Z [n, n]
    pub z: Vec<f64>,
    /// Real parts of the eigenvalues
    pub wr: Vec<f64>,
    /// Imaginary parts; a pair is stored as `+b` then `-b`
    pub wi: Vec<f64>,
    /// Sum of absolute values of the Hessenberg input
    pub norm: f64,
}

/// Reduce matrix to upper Hessenberg form using Householder reflections.
/// Modifies H in-place and accumulates transformations into Q.
pub(crate) fn hessenberg_reduction(h: &mut [f64], q: &mut [f64], n: usize) {
    for k in 0..n.saturating_sub(2) {
        // Householder vector for column k, rows k+1 to n-1
        let mut v: Vec<f64> = ((k + 1)..n).map(|i| h[i * n + k]).collect();
        // Scale the column so its squares stay finite
        let scale: f64 = v.iter().map(|x| x.abs()).sum();
        if scale == 0.0 {
            continue;
        }
        for vi in &mut v {
            *vi /= scale;
        }

        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        let alpha = if v[0] >= 0.0 { -norm } else { norm };
        v[0] -= alpha;

        let v_norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if v_norm == 0.0 {
            continue;
        }
        for vi in &mut v {
            *vi /= v_norm;
        }

        // Left multiplication: H[k+1:n, :] -= 2 * v * (v^T @ H[k+1:n, :])
        for j in 0..n {
            let dot: f64 = v
                .iter()
                .enumerate()
                .map(|(i, vi)| vi * h[(k + 1 + i) * n + j])
                .sum();
            for (i, vi) in v.iter().enumerate() {
                h[(k + 1 + i) * n + j] -= 2.0 * vi * dot;
            }
        }

        // Right multiplication: H[:, k+1:n] -= 2 * (H[:, k+1:n] @ v) * v^T
        for i in 0..n {
            reflect_row(&mut h[i * n + k + 1..(i + 1) * n], &v);
        }

        // Accumulate into Q: Q[:, k+1:n] -= 2 * (Q[:, k+1:n] @ v) * v^T
        for i in 0..n {
            reflect_row(&mut q[i * n + k + 1..(i + 1) * n], &v);
        }
    }

    // Everything below the subdiagonal is rounding noise now
    for i in 2..n {
        for j in 0..(i - 1) {
            h[i * n + j] = 0.0;
        }
    }
}

#[inline]
fn reflect_row(row: &mut [f64], v: &[f64]) {
    let dot: f64 = row.iter().zip(v).map(|(a, b)| a * b).sum();
    for (a, b) in row.iter_mut().zip(v) {
        *a -= 2.0 * dot * b;
    }
}

/// Iterate an upper Hessenberg matrix to real Schur form
///
/// `z` must hold the transformation that produced `h` (identity if `h` was
/// already Hessenberg); the iteration's rotations are accumulated into it.
/// Uses Francis double shifts with exceptional shifts after 10 and 30
/// stagnant iterations. Fails with [`Error::ConvergenceFailure`] once
/// `max_iterations` QR steps have been spent.
pub(crate) fn real_schur(
    mut h: Vec<f64>,
    mut z: Vec<f64>,
    nn: usize,
    max_iterations: usize,
) -> Result<RealSchur> {
    let at = |i: usize, j: usize| i * nn + j;
    let eps = f64::EPSILON;
    let mut wr = vec![0.0; nn];
    let mut wi = vec![0.0; nn];
    let mut exshift = 0.0;

    let mut norm = 0.0;
    for i in 0..nn {
        for j in i.saturating_sub(1)..nn {
            norm += h[at(i, j)].abs();
        }
    }

    let mut iter = 0usize;
    let mut total = 0usize;
    // Index of the last row still being iterated; -1 when done
    let mut hi = nn as isize - 1;

    while hi >= 0 {
        let n = hi as usize;

        // Look for a single small subdiagonal element
        let mut l = n;
        while l > 0 {
            let mut s = h[at(l - 1, l - 1)].abs() + h[at(l, l)].abs();
            if s == 0.0 {
                s = norm;
            }
            if h[at(l, l - 1)].abs() <= eps * s {
                break;
            }
            l -= 1;
        }

        if l == n {
            // One root found
            h[at(n, n)] += exshift;
            wr[n] = h[at(n, n)];
            wi[n] = 0.0;
            hi -= 1;
            iter = 0;
        } else if l == n - 1 {
            // Two roots found
            let w = h[at(n, n - 1)] * h[at(n - 1, n)];
            let p = (h[at(n - 1, n - 1)] - h[at(n, n)]) / 2.0;
            let q = p * p + w;
            let mut zz = q.abs().sqrt();
            h[at(n, n)] += exshift;
            h[at(n - 1, n - 1)] += exshift;
            let x = h[at(n, n)];

            if q >= 0.0 {
                // Real pair: rotate the block to upper triangular
                zz = if p >= 0.0 { p + zz } else { p - zz };
                wr[n - 1] = x + zz;
                wr[n] = if zz != 0.0 { x - w / zz } else { wr[n - 1] };
                wi[n - 1] = 0.0;
                wi[n] = 0.0;

                let x = h[at(n, n - 1)];
                let s = x.abs() + zz.abs();
                let (mut p, mut q) = (x / s, zz / s);
                let r = p.hypot(q);
                p /= r;
                q /= r;

                for j in (n - 1)..nn {
                    let t = h[at(n - 1, j)];
                    h[at(n - 1, j)] = q * t + p * h[at(n, j)];
                    h[at(n, j)] = q * h[at(n, j)] - p * t;
                }
                for i in 0..=n {
                    let t = h[at(i, n - 1)];
                    h[at(i, n - 1)] = q * t + p * h[at(i, n)];
                    h[at(i, n)] = q * h[at(i, n)] - p * t;
                }
                for i in 0..nn {
                    let t = z[at(i, n - 1)];
                    z[at(i, n - 1)] = q * t + p * z[at(i, n)];
                    z[at(i, n)] = q * z[at(i, n)] - p * t;
                }
            } else {
                // Complex pair
                wr[n - 1] = x + p;
                wr[n] = x + p;
                wi[n - 1] = zz;
                wi[n] = -zz;
            }
            hi -= 2;
            iter = 0;
        } else {
            if total >= max_iterations {
                warn!(n = nn, iterations = total, "schur iteration did not converge");
                return Err(Error::ConvergenceFailure {
                    algorithm: "schur",
                    iterations: total,
                });
            }

            // Form shift
            let mut x = h[at(n, n)];
            let mut y = h[at(n - 1, n - 1)];
            let mut w = h[at(n, n - 1)] * h[at(n - 1, n)];

            // Wilkinson's exceptional shift
            if iter == 10 {
                exshift += x;
                for i in 0..=n {
                    h[at(i, i)] -= x;
                }
                let s = h[at(n, n - 1)].abs() + h[at(n - 1, n - 2)].abs();
                x = 0.75 * s;
                y = x;
                w = -0.4375 * s * s;
            }

            // Second exceptional shift
            if iter == 30 {
                let mut s = (y - x) / 2.0;
                s = s * s + w;
                if s > 0.0 {
                    s = s.sqrt();
                    if y < x {
                        s = -s;
                    }
                    s = x - w / ((y - x) / 2.0 + s);
                    for i in 0..=n {
                        h[at(i, i)] -= s;
                    }
                    exshift += s;
                    x = 0.964;
                    y = x;
                    w = x;
                }
            }

            iter += 1;
            total += 1;
            trace!(active = n + 1, iteration = total, "schur qr step");

            // Look for two consecutive small subdiagonal elements
            let mut m = n - 2;
            let (mut p, mut q, mut r);
            loop {
                let zz = h[at(m, m)];
                let rr = x - zz;
                let s = y - zz;
                p = (rr * s - w) / h[at(m + 1, m)] + h[at(m, m + 1)];
                q = h[at(m + 1, m + 1)] - zz - rr - s;
                r = h[at(m + 2, m + 1)];
                let scale = p.abs() + q.abs() + r.abs();
                p /= scale;
                q /= scale;
                r /= scale;
                if m == l {
                    break;
                }
                let lhs = h[at(m, m - 1)].abs() * (q.abs() + r.abs());
                let rhs = eps
                    * (p.abs()
                        * (h[at(m - 1, m - 1)].abs() + zz.abs() + h[at(m + 1, m + 1)].abs()));
                if lhs < rhs {
                    break;
                }
                m -= 1;
            }

            for i in (m + 2)..=n {
                h[at(i, i - 2)] = 0.0;
                if i > m + 2 {
                    h[at(i, i - 3)] = 0.0;
                }
            }

            // Double QR step involving rows l:n and columns m:n
            for k in m..n {
                let notlast = k != n - 1;
                let mut x = 0.0;
                if k != m {
                    p = h[at(k, k - 1)];
                    q = h[at(k + 1, k - 1)];
                    r = if notlast { h[at(k + 2, k - 1)] } else { 0.0 };
                    x = p.abs() + q.abs() + r.abs();
                    if x == 0.0 {
                        continue;
                    }
                    p /= x;
                    q /= x;
                    r /= x;
                }

                let mut s = (p * p + q * q + r * r).sqrt();
                if p < 0.0 {
                    s = -s;
                }
                if s == 0.0 {
                    continue;
                }

                if k != m {
                    h[at(k, k - 1)] = -s * x;
                } else if l != m {
                    h[at(k, k - 1)] = -h[at(k, k - 1)];
                }
                p += s;
                let x = p / s;
                let y = q / s;
                let zz = r / s;
                q /= p;
                r /= p;

                // Row modification
                for j in k..nn {
                    let mut t = h[at(k, j)] + q * h[at(k + 1, j)];
                    if notlast {
                        t += r * h[at(k + 2, j)];
                        h[at(k + 2, j)] -= t * zz;
                    }
                    h[at(k, j)] -= t * x;
                    h[at(k + 1, j)] -= t * y;
                }

                // Column modification
                for i in 0..=n.min(k + 3) {
                    let mut t = x * h[at(i, k)] + y * h[at(i, k + 1)];
                    if notlast {
                        t += zz * h[at(i, k + 2)];
                        h[at(i, k + 2)] -= t * r;
                    }
                    h[at(i, k)] -= t;
                    h[at(i, k + 1)] -= t * q;
                }

                // Accumulate transformations
                for i in 0..nn {
                    let mut t = x * z[at(i, k)] + y * z[at(i, k + 1)];
                    if notlast {
                        t += zz * z[at(i, k + 2)];
                        z[at(i, k + 2)] -= t * r;
                    }
                    z[at(i, k)] -= t;
                    z[at(i, k + 1)] -= t * q;
                }
            }
        }
    }

    debug!(n = nn, iterations = total, "real schur form");
    Ok(RealSchur {
        t: h,
        z,
        wr,
        wi,
        norm,
    })
}
