use super::{DamageTrialState, LocalState, ScalarDamage};
use crate::base::UpdateError;
use crate::solver::Solvable;
use russell_lab::{Matrix, Vector};
use russell_tensor::{Mandel, Tensor2, Tensor4};

/// Holds the number of unknowns: six stress components and the damage
pub(crate) const N_UNKNOWNS: usize = 7;

/// Holds the index of the damage in the vector of unknowns
pub(crate) const DAMAGE: usize = 6;

impl ScalarDamage {
    /// Updates the base (undamaged) model from step n to step n+1
    ///
    /// Returns the undamaged state at step n+1 and the undamaged tangent A' = dσ'/dε.
    pub(crate) fn base_response(&self, ts: &DamageTrialState) -> Result<(LocalState, Tensor4), UpdateError> {
        let mut base_new = ts.base_old.clone();
        let mut aa = Tensor4::new(Mandel::Symmetric);
        self.base
            .update(&mut base_new, &mut aa, &ts.strain_new, ts.temperature_new, ts.time_new)?;
        Ok((base_new, aa))
    }
}

/// Implements the residual of the implicit damage update
///
/// The unknowns are x = [σ, d] with the damaged stress σ. The residual reads:
///
/// ```text
/// R_σ = σ - (1 - d) σ'(ε_{n+1})
/// R_d = d - dₙ - Δd(d, ε_{n+1}, σ / (1 - d), ...)
/// ```
///
/// where σ' is the stress of the base model.
impl Solvable for ScalarDamage {
    type TrialState = DamageTrialState;

    fn n_params(&self) -> usize {
        N_UNKNOWNS
    }

    /// Sets x = [(1 - d₀) σ'_{n+1}, d₀] with the initial damage d₀ given by the law
    fn init_x(&self, x: &mut Vector, ts: &DamageTrialState) -> Result<(), UpdateError> {
        let (base_new, _) = self.base_response(ts)?;
        let args = ts.args(ts.d_old, &base_new.stress);
        let d0 = self.law.d_guess(&args);
        let s = base_new.stress.vector();
        for i in 0..6 {
            x[i] = (1.0 - d0) * s[i];
        }
        x[DAMAGE] = d0;
        Ok(())
    }

    fn calc_rj(&self, rr: &mut Vector, jj: &mut Matrix, x: &Vector, ts: &DamageTrialState) -> Result<(), UpdateError> {
        let (base_new, _) = self.base_response(ts)?;
        let w = x[DAMAGE];
        let stress = DamageTrialState::undamaged_stress(x.as_data());
        let args = ts.args(w, &stress);

        // damage law
        let delta = self.law.damage(&args).map_err(UpdateError::Numerical)?;
        let ww = self.law.ddamage_dd(&args).map_err(UpdateError::Numerical)?;
        let mut ws = Tensor2::new(Mandel::Symmetric);
        self.law.ddamage_ds(&mut ws, &args).map_err(UpdateError::Numerical)?;

        // residual
        let s_base = base_new.stress.vector();
        for i in 0..6 {
            rr[i] = x[i] - (1.0 - w) * s_base[i];
        }
        rr[DAMAGE] = w - ts.d_old - delta;

        // Jacobian
        let ws = ws.vector();
        let s = stress.vector();
        jj.fill(0.0);
        let mut ws_dot_s = 0.0;
        for i in 0..6 {
            jj.set(i, i, 1.0);
            jj.set(i, DAMAGE, s_base[i]);
            jj.set(DAMAGE, i, -ws[i] / (1.0 - w));
            ws_dot_s += ws[i] * s[i];
        }
        jj.set(DAMAGE, DAMAGE, 1.0 - ww - ws_dot_s / (1.0 - w));
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
