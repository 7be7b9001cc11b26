use super::Solvable;
use crate::base::{ParamNewton, UpdateError};
use crate::StrError;
use russell_lab::{solve_lin_sys, vec_add, vec_copy_scaled, vec_norm, Matrix, Norm, Vector};
use tracing::{error, info, trace};

/// Holds statistics of a successful Newton solve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonStats {
    /// Number of Newton iterations (zero if the initial guess is already converged)
    pub n_iterations: usize,

    /// Number of residual/Jacobian evaluations (including the ones in the line search)
    pub n_evaluations: usize,

    /// Norm of the residual at the initial guess
    pub norm_rr0: f64,

    /// Norm of the residual at the solution
    pub norm_rr: f64,
}

/// Implements the (damped) Newton method for square nonlinear systems
///
/// At each iteration, `J·Δx = -R` is solved and the unknowns are updated with `x ← x + α·Δx`.
/// Without line search, α = 1. With line search, α is multiplied by β while the norm of the
/// residual does not decrease (up to a maximum number of reductions).
///
/// The solver holds only the (read-only) configuration; thus, it may be shared by many threads.
pub struct NewtonSolver {
    /// Holds the configuration
    param: ParamNewton,
}

impl NewtonSolver {
    /// Allocates a new instance
    pub fn new(param: ParamNewton) -> Result<Self, StrError> {
        if let Some(msg) = param.validate() {
            error!("{}", msg);
            return Err("cannot allocate NewtonSolver because param.validate() failed");
        }
        Ok(NewtonSolver { param })
    }

    /// Solves R(x) = 0
    ///
    /// # Output
    ///
    /// * `x` -- the solution (the initial guess is set by `system.init_x`)
    pub fn solve<S: Solvable>(
        &self,
        system: &S,
        x: &mut Vector,
        ts: &S::TrialState,
    ) -> Result<NewtonStats, UpdateError> {
        // check
        let n = system.n_params();
        if x.dim() != n {
            return Err(UpdateError::InvalidInput("x.dim() must equal the number of parameters"));
        }

        // initial residual
        let mut rr = Vector::new(n);
        let mut jj = Matrix::new(n, n);
        system.init_x(x, ts)?;
        system.calc_rj(&mut rr, &mut jj, x, ts)?;
        let mut stats = NewtonStats {
            n_iterations: 0,
            n_evaluations: 1,
            norm_rr0: vec_norm(&rr, Norm::Euc),
            norm_rr: 0.0,
        };
        stats.norm_rr = stats.norm_rr0;
        if !stats.norm_rr0.is_finite() {
            return Err(UpdateError::Numerical("the initial residual is not finite"));
        }
        self.report(0, 1.0, stats.norm_rr);
        if self.converged(&stats) {
            return Ok(stats);
        }

        // auxiliary
        let mut mdx = Vector::new(n);
        let mut x_trial = Vector::new(n);
        let mut rr_trial = Vector::new(n);
        let mut jj_trial = Matrix::new(n, n);

        // iterations
        for it in 1..=self.param.n_max_iterations {
            // solve J·Δx = -R
            vec_copy_scaled(&mut mdx, -1.0, &rr).map_err(UpdateError::Numerical)?;
            let mut kk = jj.clone();
            solve_lin_sys(&mut mdx, &mut kk).map_err(|_| UpdateError::Numerical("cannot solve J·Δx = -R"))?;
            if mdx.as_data().iter().any(|v| !v.is_finite()) {
                return Err(UpdateError::Numerical("the Newton increment is not finite"));
            }

            // update x (with or without line search)
            let mut alpha = 1.0;
            let mut n_reductions = 0;
            let mut norm_rr_trial;
            loop {
                vec_add(&mut x_trial, 1.0, x, alpha, &mdx).map_err(UpdateError::Numerical)?;
                system.calc_rj(&mut rr_trial, &mut jj_trial, &x_trial, ts)?;
                stats.n_evaluations += 1;
                norm_rr_trial = vec_norm(&rr_trial, Norm::Euc);
                if !self.param.line_search
                    || norm_rr_trial < stats.norm_rr
                    || n_reductions == self.param.n_max_line_search
                {
                    break;
                }
                alpha *= self.param.line_search_beta;
                n_reductions += 1;
            }
            if !norm_rr_trial.is_finite() {
                return Err(UpdateError::Numerical("the residual is not finite"));
            }

            // accept
            std::mem::swap(x, &mut x_trial);
            std::mem::swap(&mut rr, &mut rr_trial);
            std::mem::swap(&mut jj, &mut jj_trial);
            stats.n_iterations = it;
            stats.norm_rr = norm_rr_trial;
            self.report(it, alpha, stats.norm_rr);
            if self.converged(&stats) {
                return Ok(stats);
            }
        }
        Err(UpdateError::Convergence {
            iterations: self.param.n_max_iterations,
            norm_rr: stats.norm_rr,
        })
    }

    /// Performs the convergence test
    fn converged(&self, stats: &NewtonStats) -> bool {
        self.param
            .criterion
            .converged(stats.norm_rr, stats.norm_rr0, self.param.tol_abs, self.param.tol_rel)
    }

    /// Reports one iteration
    fn report(&self, iteration: usize, alpha: f64, norm_rr: f64) {
        if self.param.verbose {
            info!(iteration, alpha, norm_rr, "newton");
        } else {
            trace!(iteration, alpha, norm_rr, "newton");
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::NewtonSolver;
    use crate::base::{Criterion, ParamNewton, UpdateError};
    use crate::solver::{Arctangent, NoRoot, Rosenbrock};
    use russell_lab::{approx_eq, vec_approx_eq, Vector};

    #[test]
    fn new_captures_errors() {
        let mut param = ParamNewton::new();
        param.n_max_iterations = 0;
        assert_eq!(
            NewtonSolver::new(param).err(),
            Some("cannot allocate NewtonSolver because param.validate() failed")
        );
    }

    #[test]
    fn solve_captures_errors() {
        let solver = NewtonSolver::new(ParamNewton::new()).unwrap();
        let mut x = Vector::new(3);
        assert_eq!(
            solver.solve(&Rosenbrock {}, &mut x, &(1.0, 10.0)).err(),
            Some(UpdateError::InvalidInput("x.dim() must equal the number of parameters"))
        );
    }

    #[test]
    fn solve_works_rosenbrock() {
        let solver = NewtonSolver::new(ParamNewton::new()).unwrap();
        let mut x = Vector::new(2);
        let stats = solver.solve(&Rosenbrock {}, &mut x, &(1.0, 10.0)).unwrap();
        vec_approx_eq(&x, &[1.0, 1.0], 1e-12);
        assert_eq!(stats.n_iterations, 2);
        assert_eq!(stats.n_evaluations, 3);
        assert!(stats.norm_rr <= 1e-8);
        assert!(stats.norm_rr0 > 1.0);

        let stats = solver.solve(&Rosenbrock {}, &mut x, &(2.0, 10.0)).unwrap();
        vec_approx_eq(&x, &[2.0, 4.0], 1e-12);
        assert_eq!(stats.n_iterations, 2);
    }

    #[test]
    fn solve_works_relative_criterion() {
        let mut param = ParamNewton::new();
        param.criterion = Criterion::Relative;
        param.tol_rel = 1e-2;
        let solver = NewtonSolver::new(param).unwrap();
        let mut x = Vector::new(1);
        let stats = solver.solve(&Arctangent {}, &mut x, &0.5).unwrap();
        assert!(stats.norm_rr <= 1e-2 * stats.norm_rr0);
        assert!(stats.n_iterations >= 1);
    }

    #[test]
    fn solve_captures_singular_jacobian() {
        // the initial guess x = 0 gives J = 0
        let solver = NewtonSolver::new(ParamNewton::new()).unwrap();
        let mut x = Vector::new(1);
        let res = solver.solve(&NoRoot {}, &mut x, &0.0);
        assert!(matches!(res, Err(UpdateError::Numerical(..))));
    }

    #[test]
    fn solve_captures_non_convergence() {
        let mut param = ParamNewton::new();
        param.n_max_iterations = 5;
        let solver = NewtonSolver::new(param).unwrap();
        let mut x = Vector::new(1);
        match solver.solve(&NoRoot {}, &mut x, &2.0) {
            Err(UpdateError::Convergence { iterations, norm_rr }) => {
                assert_eq!(iterations, 5);
                assert!(norm_rr >= 1.0);
            }
            _ => panic!("convergence failure expected"),
        }
    }

    #[test]
    fn line_search_works() {
        // full Newton steps diverge for atan(x) = 0 when |x₀| > 1.39
        let solver = NewtonSolver::new(ParamNewton::new()).unwrap();
        let mut x = Vector::new(1);
        assert!(solver.solve(&Arctangent {}, &mut x, &2.0).is_err());

        let mut param = ParamNewton::new();
        param.line_search = true;
        param.n_max_line_search = 20;
        let solver = NewtonSolver::new(param).unwrap();
        let stats = solver.solve(&Arctangent {}, &mut x, &2.0).unwrap();
        approx_eq(x[0], 0.0, 1e-8);
        assert!(stats.n_evaluations > stats.n_iterations + 1);
    }
}
