use super::{LocalState, MaterialModel};
use crate::base::UpdateError;
use crate::StrError;
use russell_lab::vec_inner;
use russell_tensor::{t2_add, t4_ddot_t2_update, LinElasticity, Mandel, Tensor2, Tensor4};

/// Checks the elastic constants
pub(crate) fn check_elastic_constants(young: f64, poisson: f64) -> Result<(), StrError> {
    if young <= 0.0 {
        return Err("the Young modulus must be positive");
    }
    if poisson <= -1.0 || poisson >= 0.5 {
        return Err("the Poisson coefficient must satisfy -1 < ν < 0.5");
    }
    Ok(())
}

/// Calculates ½ (σ_old + σ_new) : x (trapezoidal rule)
pub(crate) fn trapezoidal_work(stress_old: &Tensor2, stress_new: &Tensor2, x: &Tensor2) -> f64 {
    0.5 * (vec_inner(stress_old.vector(), x.vector()) + vec_inner(stress_new.vector(), x.vector()))
}

/// Implements a linear elastic model
pub struct LinearElastic {
    /// Linear elasticity
    model: LinElasticity,
}

impl LinearElastic {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64) -> Result<Self, StrError> {
        check_elastic_constants(young, poisson)?;
        Ok(LinearElastic {
            model: LinElasticity::new(young, poisson, false, false),
        })
    }
}

impl MaterialModel for LinearElastic {
    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        0
    }

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, _state: &mut LocalState) -> Result<(), StrError> {
        Ok(())
    }

    /// Updates the state given the strain, temperature and time at the end of the increment
    fn update(
        &self,
        state: &mut LocalState,
        dd: &mut Tensor4,
        strain_new: &Tensor2,
        temperature_new: f64,
        time_new: f64,
    ) -> Result<(), UpdateError> {
        let dde = self.model.get_modulus();
        let mut delta_strain = Tensor2::new(Mandel::Symmetric);
        t2_add(&mut delta_strain, 1.0, strain_new, -1.0, &state.strain);
        let stress_old = state.stress.clone();
        t4_ddot_t2_update(&mut state.stress, 1.0, dde, &delta_strain, 1.0); // σ += D : Δε
        state.energy += trapezoidal_work(&stress_old, &state.stress, &delta_strain);
        state.strain.set_tensor(1.0, strain_new);
        state.temperature = temperature_new;
        state.time = time_new;
        dd.set_tensor(1.0, dde);
        Ok(())
    }

    /// Calculates the elastic rigidity modulus
    fn elastic_rigidity(&self, dde: &mut Tensor4, _temperature: f64) -> Result<(), StrError> {
        dde.set_tensor(1.0, self.model.get_modulus());
        Ok(())
    }

    /// Calculates the elastic compliance modulus
    fn elastic_compliance(&self, cce: &mut Tensor4, _temperature: f64) -> Result<(), StrError> {
        self.model.calc_compliance(cce)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
