use super::Solvable;
use crate::base::UpdateError;
use russell_lab::{mat_add, mat_norm, Matrix, Norm, Vector};

/// Specifies the finite-difference scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FdScheme {
    /// (R(x + h eⱼ) - R(x)) / h
    Forward,

    /// (R(x + h eⱼ) - R(x - h eⱼ)) / 2h
    Central,
}

/// Computes the Jacobian of a system by finite differences
///
/// The perturbation of the j-th unknown is `h = step · max(|xⱼ|, 1)`.
///
/// **Note:** This function is meant for verification only.
pub fn numerical_jacobian<S: Solvable>(
    system: &S,
    x: &Vector,
    ts: &S::TrialState,
    scheme: FdScheme,
    step: f64,
) -> Result<Matrix, UpdateError> {
    let n = system.n_params();
    if x.dim() != n {
        return Err(UpdateError::InvalidInput("x.dim() must equal the number of parameters"));
    }
    let mut jj_num = Matrix::new(n, n);
    let mut jj_aux = Matrix::new(n, n);
    let mut rr_0 = Vector::new(n);
    let mut rr_p = Vector::new(n);
    let mut rr_m = Vector::new(n);
    let mut xx = x.clone();
    if scheme == FdScheme::Forward {
        system.calc_rj(&mut rr_0, &mut jj_aux, x, ts)?;
    }
    for j in 0..n {
        let h = step * f64::max(f64::abs(x[j]), 1.0);
        xx[j] = x[j] + h;
        system.calc_rj(&mut rr_p, &mut jj_aux, &xx, ts)?;
        match scheme {
            FdScheme::Forward => {
                for i in 0..n {
                    jj_num.set(i, j, (rr_p[i] - rr_0[i]) / h);
                }
            }
            FdScheme::Central => {
                xx[j] = x[j] - h;
                system.calc_rj(&mut rr_m, &mut jj_aux, &xx, ts)?;
                for i in 0..n {
                    jj_num.set(i, j, (rr_p[i] - rr_m[i]) / (2.0 * h));
                }
            }
        }
        xx[j] = x[j];
    }
    Ok(jj_num)
}

/// Compares the analytic Jacobian with the central finite-difference approximation
///
/// Returns `(jj_num, discrepancy)` where the discrepancy is the Frobenius norm of the difference
/// divided by the Frobenius norm of the analytic Jacobian (or not divided if the latter is zero).
pub fn jacobian_discrepancy<S: Solvable>(
    system: &S,
    x: &Vector,
    ts: &S::TrialState,
    step: f64,
) -> Result<(Matrix, f64), UpdateError> {
    let n = system.n_params();
    let jj_num = numerical_jacobian(system, x, ts, FdScheme::Central, step)?;
    let mut rr = Vector::new(n);
    let mut jj = Matrix::new(n, n);
    system.calc_rj(&mut rr, &mut jj, x, ts)?;
    let mut diff = Matrix::new(n, n);
    mat_add(&mut diff, 1.0, &jj_num, -1.0, &jj).map_err(UpdateError::Numerical)?;
    let norm_diff = mat_norm(&diff, Norm::Fro);
    let norm_jj = mat_norm(&jj, Norm::Fro);
    let discrepancy = if norm_jj > 0.0 { norm_diff / norm_jj } else { norm_diff };
    Ok((jj_num, discrepancy))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
