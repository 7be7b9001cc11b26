//! Implicit scalar-damage stress updates with consistent tangent operators
//!
//! A damaged material point is described by an undamaged base material (e.g., linear elastic or
//! von Mises plasticity), a damage law giving the increment of a scalar damage variable, and a
//! Newton solver that integrates both with a fully implicit (backward Euler) scheme:
//!
//! ```text
//! σ = (1 - d) σ'(ε)
//! d = dₙ + Δd(d, ε, σ')
//! ```

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod material;
pub mod prelude;
pub mod solver;
