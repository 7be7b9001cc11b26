use super::damage_residual::{DAMAGE, N_UNKNOWNS};
use super::{
    allocate_base_model, allocate_damage_law, trapezoidal_work, DamageLaw, DamageTrialState,
    LocalState, MaterialModel,
};
use crate::base::{ParamDamagedSolid, Settings, UpdateError};
use crate::solver::{NewtonSolver, Solvable};
use crate::StrError;
use russell_lab::{mat_inverse, mat_mat_mul, Matrix, Vector};
use russell_tensor::{t2_add, t4_ddot_t2, Mandel, Tensor2, Tensor4};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Holds statistics of a damaged stress update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageStats {
    /// Number of Newton iterations (zero if the element was killed before the solve)
    pub n_iterations: usize,

    /// Damage at step n+1 (one if the element was killed)
    pub damage: f64,

    /// Indicates that the element-deletion policy was applied
    pub element_killed: bool,
}

/// Implements an isotropic scalar damage model on top of an undamaged (base) model
///
/// The damaged stress is σ = (1 - d) σ' where σ' is the stress of the base model. The damage
/// evolves according to a [DamageLaw] integrated with the backward Euler method; thus, the
/// stress and the damage are found simultaneously by the Newton method.
///
/// The internal values are `[base internal values..., d]`.
pub struct ScalarDamage {
    /// Undamaged model
    pub(crate) base: Arc<dyn MaterialModel>,

    /// Damage law
    pub(crate) law: Arc<dyn DamageLaw>,

    /// Settings
    settings: Settings,

    /// Nonlinear solver
    solver: NewtonSolver,
}

impl ScalarDamage {
    /// Allocates a new instance from parameters
    pub fn new(param: &ParamDamagedSolid) -> Result<Self, StrError> {
        let base = allocate_base_model(&param.base)?;
        let law = allocate_damage_law(&param.damage)?;
        ScalarDamage::from_parts(base, law, param.settings)
    }

    /// Allocates a new instance from already allocated models
    pub fn from_parts(
        base: Arc<dyn MaterialModel>,
        law: Arc<dyn DamageLaw>,
        settings: Settings,
    ) -> Result<Self, StrError> {
        if let Some(msg) = settings.validate() {
            error!("{}", msg);
            return Err("cannot allocate ScalarDamage because settings.validate() failed");
        }
        let solver = NewtonSolver::new(settings.newton)?;
        Ok(ScalarDamage {
            base,
            law,
            settings,
            solver,
        })
    }

    /// Returns the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the index of the damage in the internal values
    pub fn damage_index(&self) -> usize {
        self.base.n_internal_values()
    }

    /// Returns the damage stored in a state
    pub fn damage(&self, state: &LocalState) -> f64 {
        state.internal_values[self.damage_index()]
    }

    /// Updates the state and returns the statistics
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
    /// * `dd` -- the consistent tangent modulus dσ/dε at step n+1
    ///
    /// On error, `state` is not modified.
    pub fn update_stress(
        &self,
        state: &mut LocalState,
        dd: &mut Tensor4,
        strain_new: &Tensor2,
        temperature_new: f64,
        time_new: f64,
    ) -> Result<DamageStats, UpdateError> {
        // check
        if time_new < state.time {
            return Err(UpdateError::InvalidInput("time must be non-decreasing"));
        }
        if state.internal_values.dim() != self.n_internal_values() {
            return Err(UpdateError::InvalidInput("the number of internal values is incorrect"));
        }

        // element deletion before the solve
        let n_base = self.damage_index();
        let d_old = state.internal_values[n_base];
        if self.must_kill(d_old) {
            self.kill_element(state, dd, strain_new, temperature_new, time_new)?;
            return Ok(DamageStats {
                n_iterations: 0,
                damage: 1.0,
                element_killed: true,
            });
        }

        // trial state
        let mut compliance = Tensor4::new(Mandel::Symmetric);
        self.base
            .elastic_compliance(&mut compliance, temperature_new)
            .map_err(UpdateError::Numerical)?;
        let ts = DamageTrialState::new(state, n_base, strain_new, temperature_new, time_new, compliance)?;

        // solve
        let mut x = Vector::new(N_UNKNOWNS);
        let stats = match self.solver.solve(self, &mut x, &ts) {
            Ok(stats) => stats,
            Err(err) => {
                warn!(%err, time_new, d_old, "damage update failed");
                return Err(err);
            }
        };

        // element deletion after the solve
        let d_new = x[DAMAGE];
        if self.must_kill(d_new) {
            self.kill_element(state, dd, strain_new, temperature_new, time_new)?;
            return Ok(DamageStats {
                n_iterations: stats.n_iterations,
                damage: 1.0,
                element_killed: true,
            });
        }

        // undamaged state at step n+1 and consistent tangent
        let (base_new, aa) = self.base_response(&ts)?;
        self.consistent_tangent(dd, &x, &ts, &aa)?;

        // stress
        let mut stress_new = Tensor2::new(Mandel::Symmetric);
        let s = stress_new.vector_mut();
        for i in 0..6 {
            s[i] = x[i];
        }

        // energy and plastic work: Δεp = Δε - C : (σ'_{n+1} - σ'_n)
        let mut delta_strain = Tensor2::new(Mandel::Symmetric);
        let mut delta_stress = Tensor2::new(Mandel::Symmetric);
        let mut delta_strain_e = Tensor2::new(Mandel::Symmetric);
        let mut delta_strain_p = Tensor2::new(Mandel::Symmetric);
        t2_add(&mut delta_strain, 1.0, strain_new, -1.0, &state.strain);
        t2_add(&mut delta_stress, 1.0, &base_new.stress, -1.0, &ts.base_old.stress);
        t4_ddot_t2(&mut delta_strain_e, 1.0, &ts.compliance, &delta_stress);
        t2_add(&mut delta_strain_p, 1.0, &delta_strain, -1.0, &delta_strain_e);
        state.energy += trapezoidal_work(&state.stress, &stress_new, &delta_strain);
        state.plastic_work += trapezoidal_work(&state.stress, &stress_new, &delta_strain_p);

        // finalize
        state.stress.set_tensor(1.0, &stress_new);
        state.strain.set_tensor(1.0, strain_new);
        for i in 0..n_base {
            state.internal_values[i] = base_new.internal_values[i];
        }
        state.internal_values[n_base] = d_new;
        state.temperature = temperature_new;
        state.time = time_new;
        Ok(DamageStats {
            n_iterations: stats.n_iterations,
            damage: d_new,
            element_killed: false,
        })
    }

    /// Returns true if the element-deletion policy applies to the damage d
    fn must_kill(&self, d: f64) -> bool {
        let ekill = &self.settings.element_kill;
        ekill.enabled && d >= ekill.damage_threshold
    }

    /// Applies the element-deletion policy
    ///
    /// The tangent becomes D/sfact and the stress (D/sfact) : ε_{n+1}, with D the elastic
    /// rigidity. The internal values of step n are kept and the damage is set to one.
    /// The stored energy is moved into the plastic work.
    fn kill_element(
        &self,
        state: &mut LocalState,
        dd: &mut Tensor4,
        strain_new: &Tensor2,
        temperature_new: f64,
        time_new: f64,
    ) -> Result<(), UpdateError> {
        let mut dde = Tensor4::new(Mandel::Symmetric);
        self.base
            .elastic_rigidity(&mut dde, temperature_new)
            .map_err(UpdateError::Numerical)?;
        dd.set_tensor(1.0 / self.settings.element_kill.stiffness_divisor, &dde);
        t4_ddot_t2(&mut state.stress, 1.0, dd, strain_new);
        state.strain.set_tensor(1.0, strain_new);
        state.internal_values[self.damage_index()] = 1.0;
        if state.energy > 0.0 {
            state.plastic_work += state.energy;
            state.energy = 0.0;
        }
        state.temperature = temperature_new;
        state.time = time_new;
        debug!(time_new, "element killed");
        Ok(())
    }

    /// Calculates the consistent tangent modulus at the converged solution
    ///
    /// Differentiating R(x, ε) = 0 gives J · dx/dε = E with
    ///
    /// ```text
    /// E = [ (1 - d) A' ]
    ///     [ ∂Δd/∂ε    ]
    /// ```
    ///
    /// where A' is the tangent of the base model. The tangent dσ/dε is the stress block of dx/dε.
    fn consistent_tangent(
        &self,
        dd: &mut Tensor4,
        x: &Vector,
        ts: &DamageTrialState,
        aa: &Tensor4,
    ) -> Result<(), UpdateError> {
        let mut rr = Vector::new(N_UNKNOWNS);
        let mut jj = Matrix::new(N_UNKNOWNS, N_UNKNOWNS);
        self.calc_rj(&mut rr, &mut jj, x, ts)?;

        let w = x[DAMAGE];
        let stress = DamageTrialState::undamaged_stress(x.as_data());
        let args = ts.args(w, &stress);
        let mut we = Tensor2::new(Mandel::Symmetric);
        self.law.ddamage_de(&mut we, &args).map_err(UpdateError::Numerical)?;

        // dx/dε = J⁻¹ E with E = [(1 - w) A ; ∂Δd/∂ε]
        let mut jj_inv = Matrix::new(N_UNKNOWNS, N_UNKNOWNS);
        mat_inverse(&mut jj_inv, &jj).map_err(|_| UpdateError::Numerical("cannot compute the consistent tangent"))?;
        let aa = aa.matrix();
        let mut ee = Matrix::new(N_UNKNOWNS, 6);
        for j in 0..6 {
            for i in 0..6 {
                ee.set(i, j, (1.0 - w) * aa.get(i, j));
            }
            ee.set(DAMAGE, j, we.vector()[j]);
        }
        let mut xx = Matrix::new(N_UNKNOWNS, 6);
        mat_mat_mul(&mut xx, 1.0, &jj_inv, &ee, 0.0).map_err(UpdateError::Numerical)?;
        let out = dd.matrix_mut();
        for j in 0..6 {
            for i in 0..6 {
                out.set(i, j, xx.get(i, j));
            }
        }
        Ok(())
    }
}

impl MaterialModel for ScalarDamage {
    /// Returns the number of internal values (base model plus damage)
    fn n_internal_values(&self) -> usize {
        self.base.n_internal_values() + 1
    }

    /// Initializes the internal values of the base model and sets the damage to zero
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), StrError> {
        let n_base = self.damage_index();
        let mut base_state = LocalState::new(n_base);
        base_state.strain.set_tensor(1.0, &state.strain);
        base_state.stress.set_tensor(1.0, &state.stress);
        base_state.temperature = state.temperature;
        base_state.time = state.time;
        self.base.initialize_internal_values(&mut base_state)?;
        for i in 0..n_base {
            state.internal_values[i] = base_state.internal_values[i];
        }
        state.internal_values[n_base] = 0.0;
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
        self.update_stress(state, dd, strain_new, temperature_new, time_new)?;
        Ok(())
    }

    /// Calculates the elastic rigidity modulus of the undamaged material
    fn elastic_rigidity(&self, dde: &mut Tensor4, temperature: f64) -> Result<(), StrError> {
        self.base.elastic_rigidity(dde, temperature)
    }

    /// Calculates the elastic compliance modulus of the undamaged material
    fn elastic_compliance(&self, cce: &mut Tensor4, temperature: f64) -> Result<(), StrError> {
        self.base.elastic_compliance(cce, temperature)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
