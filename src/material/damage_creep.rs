use super::{DamageArgs, DamageLaw, EffectiveStress};
use crate::base::Interp;
use crate::StrError;
use russell_tensor::{deriv1_invariant_sigma_d, Tensor2};
use std::sync::Arc;

/// Implements the classical (Kachanov-Rabotnov) creep damage law
///
/// ```text
/// Δd = (σd/A)^ξ (1-d)^(-φ) Δt
/// ```
///
/// where σd is the von Mises stress of the undamaged stress. A, ξ and φ are evaluated at the
/// temperature of step n+1.
pub struct ClassicalCreep {
    aa: Interp,
    xi: Interp,
    phi: Interp,
}

/// Implements the modular creep damage law
///
/// ```text
/// Δd = (σe/A)^ξ (1-d)^(ξ-φ) Δt
/// ```
///
/// where σe is a pluggable effective stress of the undamaged stress.
pub struct ModularCreep {
    aa: Interp,
    xi: Interp,
    phi: Interp,
    effective: Arc<dyn EffectiveStress>,
}

impl ClassicalCreep {
    /// Allocates a new instance
    pub fn new(aa: Interp, xi: Interp, phi: Interp) -> Result<Self, StrError> {
        aa.validate()?;
        xi.validate()?;
        phi.validate()?;
        Ok(ClassicalCreep { aa, xi, phi })
    }

    /// Returns (A, ξ, φ) at the temperature of step n+1
    fn coefficients(&self, args: &DamageArgs) -> (f64, f64, f64) {
        let t = args.temperature_new;
        (self.aa.value(t), self.xi.value(t), self.phi.value(t))
    }
}

impl DamageLaw for ClassicalCreep {
    fn damage(&self, args: &DamageArgs) -> Result<f64, StrError> {
        let (aa, xi, phi) = self.coefficients(args);
        let se = args.stress_new.invariant_sigma_d();
        Ok(f64::powf(se / aa, xi) * f64::powf(1.0 - args.d_new, -phi) * args.dt())
    }

    fn ddamage_dd(&self, args: &DamageArgs) -> Result<f64, StrError> {
        let (aa, xi, phi) = self.coefficients(args);
        let se = args.stress_new.invariant_sigma_d();
        Ok(f64::powf(se / aa, xi) * phi * f64::powf(1.0 - args.d_new, -(phi + 1.0)) * args.dt())
    }

    fn ddamage_de(&self, dd_de: &mut Tensor2, _args: &DamageArgs) -> Result<(), StrError> {
        dd_de.vector_mut().fill(0.0);
        Ok(())
    }

    fn ddamage_ds(&self, dd_ds: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        let (aa, xi, phi) = self.coefficients(args);
        let se = match deriv1_invariant_sigma_d(dd_ds, args.stress_new) {
            Some(se) => se,
            None => {
                dd_ds.vector_mut().fill(0.0);
                return Ok(());
            }
        };
        let scalar = xi / aa * f64::powf(se / aa, xi - 1.0) * f64::powf(1.0 - args.d_new, -phi) * args.dt();
        let d = dd_ds.vector_mut();
        for i in 0..d.dim() {
            d[i] *= scalar;
        }
        Ok(())
    }
}

impl ModularCreep {
    /// Allocates a new instance
    pub fn new(aa: Interp, xi: Interp, phi: Interp, effective: Arc<dyn EffectiveStress>) -> Result<Self, StrError> {
        aa.validate()?;
        xi.validate()?;
        phi.validate()?;
        Ok(ModularCreep { aa, xi, phi, effective })
    }

    /// Returns (A, ξ, φ) at the temperature of step n+1
    fn coefficients(&self, args: &DamageArgs) -> (f64, f64, f64) {
        let t = args.temperature_new;
        (self.aa.value(t), self.xi.value(t), self.phi.value(t))
    }
}

impl DamageLaw for ModularCreep {
    fn damage(&self, args: &DamageArgs) -> Result<f64, StrError> {
        let (aa, xi, phi) = self.coefficients(args);
        let se = self.effective.effective(args.stress_new)?;
        Ok(f64::powf(se / aa, xi) * f64::powf(1.0 - args.d_new, xi - phi) * args.dt())
    }

    fn ddamage_dd(&self, args: &DamageArgs) -> Result<f64, StrError> {
        let (aa, xi, phi) = self.coefficients(args);
        let se = self.effective.effective(args.stress_new)?;
        Ok(f64::powf(se / aa, xi) * (phi - xi) * f64::powf(1.0 - args.d_new, xi - phi - 1.0) * args.dt())
    }

    fn ddamage_de(&self, dd_de: &mut Tensor2, _args: &DamageArgs) -> Result<(), StrError> {
        dd_de.vector_mut().fill(0.0);
        Ok(())
    }

    fn ddamage_ds(&self, dd_ds: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        let (aa, xi, phi) = self.coefficients(args);
        let se = self.effective.effective(args.stress_new)?;
        if se == 0.0 {
            dd_ds.vector_mut().fill(0.0);
            return Ok(());
        }
        let scalar = xi / aa * f64::powf(se / aa, xi - 1.0) * f64::powf(1.0 - args.d_new, xi - phi) * args.dt();
        self.effective.deffective(dd_ds, args.stress_new)?;
        let d = dd_ds.vector_mut();
        for i in 0..d.dim() {
            d[i] *= scalar;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
