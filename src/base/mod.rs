//! Implements the base structures: errors, parameters and settings

mod errors;
mod interp;
mod parameters;
mod sample_params;
mod settings;
pub use crate::base::errors::*;
pub use crate::base::interp::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_params::*;
pub use crate::base::settings::*;
