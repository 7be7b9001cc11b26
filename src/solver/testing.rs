use super::Solvable;
use crate::base::UpdateError;
use russell_lab::{Matrix, Vector};

/// Implements the Rosenbrock system R = [a - x₀, b (x₁ - x₀²)] with root at (a, a²)
///
/// The trial state is (a, b) and the initial guess is (-1.2, 1.0).
pub(crate) struct Rosenbrock {}

/// Implements R = atan(x) with the initial guess given by the trial state
pub(crate) struct Arctangent {}

/// Implements R = x² + 1 (without real root) with the initial guess given by the trial state
pub(crate) struct NoRoot {}

impl Solvable for Rosenbrock {
    type TrialState = (f64, f64);

    fn n_params(&self) -> usize {
        2
    }

    fn init_x(&self, x: &mut Vector, _: &Self::TrialState) -> Result<(), UpdateError> {
        x[0] = -1.2;
        x[1] = 1.0;
        Ok(())
    }

    fn calc_rj(&self, rr: &mut Vector, jj: &mut Matrix, x: &Vector, ts: &Self::TrialState) -> Result<(), UpdateError> {
        let (a, b) = *ts;
        rr[0] = a - x[0];
        rr[1] = b * (x[1] - x[0] * x[0]);
        jj.set(0, 0, -1.0);
        jj.set(0, 1, 0.0);
        jj.set(1, 0, -2.0 * b * x[0]);
        jj.set(1, 1, b);
        Ok(())
    }
}

impl Solvable for Arctangent {
    type TrialState = f64;

    fn n_params(&self) -> usize {
        1
    }

    fn init_x(&self, x: &mut Vector, ts: &Self::TrialState) -> Result<(), UpdateError> {
        x[0] = *ts;
        Ok(())
    }

    fn calc_rj(&self, rr: &mut Vector, jj: &mut Matrix, x: &Vector, _: &Self::TrialState) -> Result<(), UpdateError> {
        rr[0] = f64::atan(x[0]);
        jj.set(0, 0, 1.0 / (1.0 + x[0] * x[0]));
        Ok(())
    }
}

impl Solvable for NoRoot {
    type TrialState = f64;

    fn n_params(&self) -> usize {
        1
    }

    fn init_x(&self, x: &mut Vector, ts: &Self::TrialState) -> Result<(), UpdateError> {
        x[0] = *ts;
        Ok(())
    }

    fn calc_rj(&self, rr: &mut Vector, jj: &mut Matrix, x: &Vector, _: &Self::TrialState) -> Result<(), UpdateError> {
        rr[0] = x[0] * x[0] + 1.0;
        jj.set(0, 0, 2.0 * x[0]);
        Ok(())
    }
}
