use crate::base::UpdateError;
use russell_lab::{Matrix, Vector};

/// Defines a square nonlinear system R(x) = 0 with an analytic Jacobian J = ∂R/∂x
///
/// The system is evaluated for a given (read-only) trial state, which holds all the data
/// that remain constant during the iterations.
pub trait Solvable {
    /// Holds the data that remain constant during the iterations
    type TrialState;

    /// Returns the number of unknowns N
    fn n_params(&self) -> usize;

    /// Sets the initial guess (x.dim() = N)
    fn init_x(&self, x: &mut Vector, ts: &Self::TrialState) -> Result<(), UpdateError>;

    /// Calculates the residual vector R(x) and the Jacobian matrix J(x)
    ///
    /// The dimensions are rr.dim() = N and jj.dims() = (N, N)
    fn calc_rj(&self, rr: &mut Vector, jj: &mut Matrix, x: &Vector, ts: &Self::TrialState) -> Result<(), UpdateError>;
}
