use super::{check_elastic_constants, trapezoidal_work, LocalState, MaterialModel};
use crate::base::UpdateError;
use crate::StrError;
use russell_tensor::{t2_add, t4_ddot_t2, t4_ddot_t2_update, LinElasticity, Mandel, Tensor2, Tensor4, SQRT_2_BY_3};

/// Holds the Mandel components of the second-order identity tensor
const I: [f64; 6] = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0];

/// Holds the index of z internal variable (size of yield surface)
const Z0: usize = 0;

/// Implements the von Mises plasticity model with linear isotropic hardening
///
/// The stress update uses the closest-point (radial) return and the tangent is the
/// consistent (algorithmic) elastoplastic modulus.
pub struct VonMises {
    /// Linear elasticity
    lin_elasticity: LinElasticity,

    /// Elastic compliance
    compliance: Tensor4,

    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,

    /// Hardening coefficient
    hh: f64,

    /// Initial size of the yield surface
    ///
    /// This value corresponds to the von Mises stress:
    ///
    /// ```text
    /// f = σd - z
    /// ```
    z0: f64,
}

impl VonMises {
    /// Allocates a new instance
    pub fn new(young: f64, poisson: f64, hh: f64, z0: f64) -> Result<Self, StrError> {
        check_elastic_constants(young, poisson)?;
        if z0 <= 0.0 {
            return Err("the initial size of the yield surface must be positive");
        }
        if hh < 0.0 {
            return Err("the hardening coefficient must be non-negative");
        }
        let lin_elasticity = LinElasticity::new(young, poisson, false, false);
        let mut compliance = Tensor4::new(Mandel::Symmetric);
        lin_elasticity.calc_compliance(&mut compliance)?;
        let (kk, gg) = lin_elasticity.get_bulk_shear();
        Ok(VonMises {
            lin_elasticity,
            compliance,
            kk,
            gg,
            hh,
            z0,
        })
    }

    /// Calculates the consistent tangent modulus after a plastic update
    fn consistent_tangent(&self, dd: &mut Tensor4, stress: &Tensor2, lambda: f64) {
        let mut s = Tensor2::new(Mandel::Symmetric);
        stress.deviator(&mut s); // s = dev(σ)

        // coefficients
        let (kk, gg, hh) = (self.kk, self.gg, self.hh);
        let sigma_d = stress.invariant_sigma_d();
        let sigma_d_trial = sigma_d + lambda * 3.0 * gg;
        let norm_s = sigma_d * SQRT_2_BY_3;
        let d = 3.0 * gg + hh;
        let a = 2.0 * gg * (1.0 - lambda * 3.0 * gg / sigma_d_trial);
        let b = 6.0 * gg * gg * (lambda / sigma_d_trial - 1.0 / d) / (norm_s * norm_s);

        // D = a Psd + b s ⊗ s + K I ⊗ I
        let mat = dd.matrix_mut();
        let s = s.vector();
        for i in 0..6 {
            for j in 0..6 {
                let delta = if i == j { 1.0 } else { 0.0 };
                let psd = delta - I[i] * I[j] / 3.0;
                mat.set(i, j, a * psd + b * s[i] * s[j] + kk * I[i] * I[j]);
            }
        }
    }
}

impl MaterialModel for VonMises {
    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        1 // [z]
    }

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), StrError> {
        state.internal_values[Z0] = self.z0;
        let f = state.stress.invariant_sigma_d() - self.z0;
        if f > 0.0 {
            return Err("stress is outside the yield surface");
        }
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
        // trial stress: σ ← σ_trial
        let dde = self.lin_elasticity.get_modulus();
        let mut delta_strain = Tensor2::new(Mandel::Symmetric);
        t2_add(&mut delta_strain, 1.0, strain_new, -1.0, &state.strain);
        let stress_old = state.stress.clone();
        t4_ddot_t2_update(&mut state.stress, 1.0, dde, &delta_strain, 1.0); // σ += D : Δε

        // yield function
        let z = state.internal_values[Z0];
        let sigma_d_trial = state.stress.invariant_sigma_d();
        let f_trial = sigma_d_trial - z;

        if f_trial <= 0.0 {
            // elastic update
            dd.set_tensor(1.0, dde);
        } else {
            // coefficients
            let (gg, hh) = (self.gg, self.hh);
            let sigma_m_trial = state.stress.invariant_sigma_m();
            let lambda = f_trial / (3.0 * gg + hh);
            let m = 1.0 - lambda * 3.0 * gg / sigma_d_trial;

            // σ_new = m s_trial + σm_trial I
            let mut s_trial = Tensor2::new(Mandel::Symmetric);
            state.stress.deviator(&mut s_trial);
            let vec = state.stress.vector_mut();
            let s_trial = s_trial.vector();
            for i in 0..6 {
                vec[i] = m * s_trial[i] + sigma_m_trial * I[i];
            }

            // elastoplastic update
            state.internal_values[Z0] = z + hh * lambda;
            self.consistent_tangent(dd, &state.stress, lambda);
        }

        // energy and plastic work: Δεp = Δε - C : Δσ
        let mut delta_stress = Tensor2::new(Mandel::Symmetric);
        t2_add(&mut delta_stress, 1.0, &state.stress, -1.0, &stress_old);
        let mut delta_strain_e = Tensor2::new(Mandel::Symmetric);
        t4_ddot_t2(&mut delta_strain_e, 1.0, &self.compliance, &delta_stress);
        let mut delta_strain_p = Tensor2::new(Mandel::Symmetric);
        t2_add(&mut delta_strain_p, 1.0, &delta_strain, -1.0, &delta_strain_e);
        state.energy += trapezoidal_work(&stress_old, &state.stress, &delta_strain);
        state.plastic_work += trapezoidal_work(&stress_old, &state.stress, &delta_strain_p);

        // finalize
        state.strain.set_tensor(1.0, strain_new);
        state.temperature = temperature_new;
        state.time = time_new;
        Ok(())
    }

    /// Calculates the elastic rigidity modulus
    fn elastic_rigidity(&self, dde: &mut Tensor4, _temperature: f64) -> Result<(), StrError> {
        dde.set_tensor(1.0, self.lin_elasticity.get_modulus());
        Ok(())
    }

    /// Calculates the elastic compliance modulus
    fn elastic_compliance(&self, cce: &mut Tensor4, _temperature: f64) -> Result<(), StrError> {
        cce.set_tensor(1.0, &self.compliance);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
