//! Makes available common structures needed to run a damaged stress update
//!
//! You may write `use dmgmat::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{
    Criterion, Interp, ParamBase, ParamDamage, ParamDamagedSolid, ParamEffectiveStress, ParamElementKill, ParamNewton,
    Settings, UpdateError,
};
pub use crate::material::{DamageLaw, DamageStats, EffectiveStress, LocalState, MaterialModel, ScalarDamage};
pub use crate::solver::{NewtonSolver, NewtonStats, Solvable};
