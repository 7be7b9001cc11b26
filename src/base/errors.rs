use crate::StrError;
use thiserror::Error;

/// Defines the failures of a stress update
///
/// Element deletion is not a failure; it is reported through the returned statistics.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum UpdateError {
    /// The Newton iterations reached the maximum number of iterations without convergence
    ///
    /// The caller (e.g., an adaptive time stepper) may retry with a smaller increment.
    #[error("nonlinear solver did not converge after {iterations} iterations (‖R‖ = {norm_rr:e})")]
    Convergence { iterations: usize, norm_rr: f64 },

    /// Singular Jacobian, NaN or Inf in the residual/Jacobian, or a failing derivative evaluation
    #[error("numerical failure: {0}")]
    Numerical(StrError),

    /// Invalid input such as a decreasing time or a wrong number of internal values
    #[error("invalid input: {0}")]
    InvalidInput(StrError),
}

impl UpdateError {
    /// Returns true if the step may succeed with a smaller increment
    pub fn is_recoverable(&self) -> bool {
        matches!(self, UpdateError::Convergence { .. })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
