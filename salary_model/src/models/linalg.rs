use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{Result, SalaryErr};

const RELATIVE_JITTER: f64 = 1e-10;
const MAX_ATTEMPTS: usize = 16;

/// Factorizes the symmetric matrix `a` as `L Lᵀ`.
///
/// # Returns
/// The lower triangular factor, or `None` if `a` isn't numerically positive definite.
fn cholesky(a: ArrayView2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let mut l = Array2::zeros((n, n));

    for j in 0..n {
        let mut diag = a[(j, j)];
        for k in 0..j {
            diag -= l[(j, k)] * l[(j, k)];
        }

        if !(diag > 0.0 && diag.is_finite()) {
            return None;
        }

        let ljj = diag.sqrt();
        l[(j, j)] = ljj;

        for i in j + 1..n {
            let mut v = a[(i, j)];
            for k in 0..j {
                v -= l[(i, k)] * l[(j, k)];
            }
            l[(i, j)] = v / ljj;
        }
    }

    Some(l)
}

/// Solves `L Lᵀ x = b` given the cholesky factor `l`.
fn substitute(l: &Array2<f64>, b: ArrayView1<f64>) -> Array1<f64> {
    let n = b.len();
    let mut z = Array1::zeros(n);

    for i in 0..n {
        let mut v = b[i];
        for k in 0..i {
            v -= l[(i, k)] * z[k];
        }
        z[i] = v / l[(i, i)];
    }

    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut v = z[i];
        for k in i + 1..n {
            v -= l[(k, i)] * x[k];
        }
        x[i] = v / l[(i, i)];
    }

    x
}

/// Solves the symmetric positive semi-definite system `a x = b`.
///
/// A ridge of `1e-10` times the mean diagonal is added to `a`, growing tenfold every
/// time the factorization fails, so rank deficient systems still get a solution.
///
/// # Errors
/// `Singular` if no jitter made the system factorizable.
pub fn solve_psd(a: ArrayView2<f64>, b: ArrayView1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();
    if n == 0 {
        return Ok(Array1::zeros(0));
    }

    let mean_diag = a.diag().sum() / n as f64;
    let scale = if mean_diag > 0.0 { mean_diag } else { 1.0 };
    let mut jitter = RELATIVE_JITTER * scale;

    for _ in 0..MAX_ATTEMPTS {
        let mut shifted = a.to_owned();
        shifted.diag_mut().mapv_inplace(|d| d + jitter);

        if let Some(l) = cholesky(shifted.view()) {
            return Ok(substitute(&l, b));
        }

        jitter *= 10.0;
    }

    Err(SalaryErr::Singular)
}
