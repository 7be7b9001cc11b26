//! Implements material models with scalar damage

mod damage_combined;
mod damage_creep;
mod damage_law;
mod damage_residual;
mod damage_standard;
mod damage_work;
mod effective_stress;
mod linear_elastic;
mod local_state;
mod material_model;
mod scalar_damage;
mod trial_state;
mod von_mises;
pub use crate::material::damage_combined::*;
pub use crate::material::damage_creep::*;
pub use crate::material::damage_law::*;
pub use crate::material::damage_standard::*;
pub use crate::material::damage_work::*;
pub use crate::material::effective_stress::*;
pub use crate::material::linear_elastic::*;
pub use crate::material::local_state::*;
pub use crate::material::material_model::*;
pub use crate::material::scalar_damage::*;
pub use crate::material::trial_state::*;
pub use crate::material::von_mises::*;

#[cfg(test)]
mod testing;
#[cfg(test)]
pub(crate) use crate::material::testing::*;
