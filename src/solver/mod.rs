//! Implements the Newton root-finder for square nonlinear systems

mod newton;
mod numerical_jacobian;
mod solvable;
pub use crate::solver::newton::*;
pub use crate::solver::numerical_jacobian::*;
pub use crate::solver::solvable::*;

#[cfg(test)]
mod testing;
#[cfg(test)]
pub(crate) use crate::solver::testing::*;
