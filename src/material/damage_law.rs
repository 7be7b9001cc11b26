use super::{
    allocate_effective_stress, ClassicalCreep, CombinedDamage, ExponentialWorkDamage, ModularCreep, PowerLawDamage,
    WorkDamage,
};
use crate::base::ParamDamage;
use crate::StrError;
use russell_tensor::{Tensor2, Tensor4};
use std::sync::Arc;

/// Holds the arguments of the damage-law functions
///
/// The stresses are the undamaged (effective) stresses σ' = σ / (1 - d).
pub struct DamageArgs<'a> {
    /// Damage at step n+1 (the current guess)
    pub d_new: f64,

    /// Damage at step n
    pub d_old: f64,

    /// Strain at step n+1
    pub strain_new: &'a Tensor2,

    /// Strain at step n
    pub strain_old: &'a Tensor2,

    /// Undamaged stress at step n+1
    pub stress_new: &'a Tensor2,

    /// Undamaged stress at step n
    pub stress_old: &'a Tensor2,

    /// Elastic compliance at step n+1
    pub compliance: &'a Tensor4,

    /// Temperature at step n+1
    pub temperature_new: f64,

    /// Temperature at step n
    pub temperature_old: f64,

    /// Time at step n+1
    pub time_new: f64,

    /// Time at step n
    pub time_old: f64,
}

impl<'a> DamageArgs<'a> {
    /// Returns the time increment Δt
    pub fn dt(&self) -> f64 {
        self.time_new - self.time_old
    }
}

/// Specifies a scalar damage law
///
/// The law gives the damage increment Δd such that the implicit damage equation reads:
///
/// ```text
/// d_{n+1} = d_n + Δd(d_{n+1}, ε_{n+1}, σ'_{n+1}, ...)
/// ```
///
/// The derivatives must be the exact derivatives of `damage` because the Newton solver and the
/// consistent tangent rely on them.
pub trait DamageLaw: Send + Sync {
    /// Calculates the damage increment Δd
    fn damage(&self, args: &DamageArgs) -> Result<f64, StrError>;

    /// Calculates ∂Δd/∂d
    fn ddamage_dd(&self, args: &DamageArgs) -> Result<f64, StrError>;

    /// Calculates ∂Δd/∂ε
    fn ddamage_de(&self, dd_de: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError>;

    /// Calculates ∂Δd/∂σ'
    fn ddamage_ds(&self, dd_ds: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError>;

    /// Returns the initial guess of the damage at step n+1
    ///
    /// The arguments hold `d_new = dₙ` and the undamaged stress of the base model at step n+1.
    /// Laws with a singularity (or a trivial root) at d = 0 override the default guess dₙ.
    fn d_guess(&self, args: &DamageArgs) -> f64 {
        args.d_old
    }
}

/// Implements a law without damage (Δd = 0)
pub struct NoDamage {}

impl DamageLaw for NoDamage {
    fn damage(&self, _args: &DamageArgs) -> Result<f64, StrError> {
        Ok(0.0)
    }

    fn ddamage_dd(&self, _args: &DamageArgs) -> Result<f64, StrError> {
        Ok(0.0)
    }

    fn ddamage_de(&self, dd_de: &mut Tensor2, _args: &DamageArgs) -> Result<(), StrError> {
        dd_de.vector_mut().fill(0.0);
        Ok(())
    }

    fn ddamage_ds(&self, dd_ds: &mut Tensor2, _args: &DamageArgs) -> Result<(), StrError> {
        dd_ds.vector_mut().fill(0.0);
        Ok(())
    }
}

/// Allocates a damage law
pub fn allocate_damage_law(param: &ParamDamage) -> Result<Arc<dyn DamageLaw>, StrError> {
    let law: Arc<dyn DamageLaw> = match param {
        ParamDamage::None => Arc::new(NoDamage {}),
        ParamDamage::ClassicalCreep { aa, xi, phi } => {
            Arc::new(ClassicalCreep::new(aa.clone(), xi.clone(), phi.clone())?)
        }
        ParamDamage::ModularCreep { aa, xi, phi, effective } => {
            let effective = allocate_effective_stress(effective)?;
            Arc::new(ModularCreep::new(aa.clone(), xi.clone(), phi.clone(), effective)?)
        }
        ParamDamage::PowerLaw { aa, a } => Arc::new(PowerLawDamage::new(aa.clone(), a.clone())?),
        ParamDamage::ExponentialWork { ww0, k0, af } => {
            Arc::new(ExponentialWorkDamage::new(ww0.clone(), k0.clone(), af.clone())?)
        }
        ParamDamage::Work { ww_crit, n, eps } => Arc::new(WorkDamage::new(ww_crit.clone(), n.clone(), *eps)?),
        ParamDamage::Combined { laws } => {
            let laws = laws.iter().map(allocate_damage_law).collect::<Result<Vec<_>, _>>()?;
            Arc::new(CombinedDamage::new(laws)?)
        }
    };
    Ok(law)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
