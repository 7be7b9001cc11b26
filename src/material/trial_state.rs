use super::{DamageArgs, LocalState};
use crate::base::UpdateError;
use russell_tensor::{Mandel, Tensor2, Tensor4};

/// Holds the data that remain constant during the damage iterations of one increment
///
/// The trial state is a snapshot of step n (taken once before the iterations) plus the
/// prescribed strain, temperature and time at step n+1.
pub struct DamageTrialState {
    /// Undamaged state at step n
    ///
    /// Holds the undamaged stress σ'ₙ = σₙ / (1 - dₙ) and the internal values of the base model.
    pub base_old: LocalState,

    /// Damaged stress σₙ at step n
    pub stress_old: Tensor2,

    /// Damage dₙ at step n
    pub d_old: f64,

    /// Strain at step n+1
    pub strain_new: Tensor2,

    /// Temperature at step n+1
    pub temperature_new: f64,

    /// Time at step n+1
    pub time_new: f64,

    /// Elastic compliance at step n+1
    pub compliance: Tensor4,
}

impl DamageTrialState {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `state` -- the complete state at step n with the damage stored at `state.internal_values[n_base]`
    /// * `n_base` -- the number of internal values of the base model
    pub fn new(
        state: &LocalState,
        n_base: usize,
        strain_new: &Tensor2,
        temperature_new: f64,
        time_new: f64,
        compliance: Tensor4,
    ) -> Result<Self, UpdateError> {
        let d_old = state.internal_values[n_base];
        if d_old >= 1.0 {
            return Err(UpdateError::Numerical("the damage at step n must be smaller than one"));
        }
        let mut base_old = LocalState::new(n_base);
        base_old.strain.set_tensor(1.0, &state.strain);
        base_old.stress.set_tensor(1.0 / (1.0 - d_old), &state.stress);
        for i in 0..n_base {
            base_old.internal_values[i] = state.internal_values[i];
        }
        base_old.temperature = state.temperature;
        base_old.time = state.time;
        base_old.energy = state.energy;
        base_old.plastic_work = state.plastic_work;
        Ok(DamageTrialState {
            base_old,
            stress_old: state.stress.clone(),
            d_old,
            strain_new: strain_new.clone(),
            temperature_new,
            time_new,
            compliance,
        })
    }

    /// Returns the arguments of the damage law at a damage guess
    ///
    /// `stress_new` is the undamaged stress σ' at step n+1.
    pub fn args<'a>(&'a self, d_new: f64, stress_new: &'a Tensor2) -> DamageArgs<'a> {
        DamageArgs {
            d_new,
            d_old: self.d_old,
            strain_new: &self.strain_new,
            strain_old: &self.base_old.strain,
            stress_new,
            stress_old: &self.base_old.stress,
            compliance: &self.compliance,
            temperature_new: self.temperature_new,
            temperature_old: self.base_old.temperature,
            time_new: self.time_new,
            time_old: self.base_old.time,
        }
    }

    /// Computes the undamaged stress σ' = σ / (1 - d) from the unknowns x = [σ, d]
    pub fn undamaged_stress(x: &[f64]) -> Tensor2 {
        let mut stress = Tensor2::new(Mandel::Symmetric);
        let w = x[6];
        let v = stress.vector_mut();
        for i in 0..6 {
            v[i] = x[i] / (1.0 - w);
        }
        stress
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
