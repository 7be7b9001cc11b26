use super::{LinearElastic, LocalState, VonMises};
use crate::base::{ParamBase, UpdateError};
use crate::StrError;
use russell_tensor::{Tensor2, Tensor4};
use std::sync::Arc;

/// Specifies the essential functions of (small-strain) material models
///
/// The models hold only read-only parameters; all mutable data lives in [LocalState].
pub trait MaterialModel: Send + Sync {
    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize;

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), StrError>;

    /// Updates the state given the strain, temperature and time at the end of the increment
    ///
    /// # Input
    ///
    /// * `state` -- the state at step n on entry and the state at step n+1 on exit
    /// * `strain_new` -- the strain at step n+1
    /// * `temperature_new` -- the temperature at step n+1
    /// * `time_new` -- the time at step n+1
    ///
    /// # Output
    ///
    /// * `dd` -- the (algorithmic) tangent modulus dσ/dε at step n+1
    fn update(
        &self,
        state: &mut LocalState,
        dd: &mut Tensor4,
        strain_new: &Tensor2,
        temperature_new: f64,
        time_new: f64,
    ) -> Result<(), UpdateError>;

    /// Calculates the elastic rigidity modulus
    fn elastic_rigidity(&self, dde: &mut Tensor4, temperature: f64) -> Result<(), StrError>;

    /// Calculates the elastic compliance modulus
    fn elastic_compliance(&self, cce: &mut Tensor4, temperature: f64) -> Result<(), StrError>;
}

/// Allocates an undamaged (base) material model
pub fn allocate_base_model(param: &ParamBase) -> Result<Arc<dyn MaterialModel>, StrError> {
    let model: Arc<dyn MaterialModel> = match *param {
        // Linear elastic model
        ParamBase::LinearElastic { young, poisson } => Arc::new(LinearElastic::new(young, poisson)?),

        // von Mises plasticity model
        ParamBase::VonMises { young, poisson, hh, z0 } => Arc::new(VonMises::new(young, poisson, hh, z0)?),
    };
    Ok(model)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::allocate_base_model;
    use crate::base::{ParamBase, SampleParams};

    #[test]
    fn allocate_base_model_works() {
        let model = allocate_base_model(&SampleParams::param_elastic()).unwrap();
        assert_eq!(model.n_internal_values(), 0);
        let model = allocate_base_model(&SampleParams::param_von_mises()).unwrap();
        assert_eq!(model.n_internal_values(), 1);
    }

    #[test]
    fn allocate_base_model_captures_errors() {
        let param = ParamBase::LinearElastic {
            young: -1.0,
            poisson: 0.3,
        };
        assert_eq!(
            allocate_base_model(&param).err(),
            Some("the Young modulus must be positive")
        );
    }
}
