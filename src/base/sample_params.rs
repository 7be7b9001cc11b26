use super::{Interp, ParamBase, ParamDamage, ParamDamagedSolid, ParamEffectiveStress, Settings};

/// Holds samples of material parameters
pub struct SampleParams {}

impl SampleParams {
    /// Returns sample parameters for a linear elastic steel-like solid (MPa)
    pub fn param_elastic() -> ParamBase {
        ParamBase::LinearElastic {
            young: 200000.0, // MPa
            poisson: 0.3,    // -
        }
    }

    /// Returns sample parameters for a von Mises steel-like solid (MPa)
    pub fn param_von_mises() -> ParamBase {
        ParamBase::VonMises {
            young: 200000.0, // MPa
            poisson: 0.3,    // -
            hh: 2000.0,      // MPa
            z0: 200.0,       // MPa
        }
    }

    /// Returns sample parameters for the classical creep-damage law
    pub fn param_classical_creep(aa: f64, xi: f64, phi: f64) -> ParamDamage {
        ParamDamage::ClassicalCreep {
            aa: Interp::Constant(aa),
            xi: Interp::Constant(xi),
            phi: Interp::Constant(phi),
        }
    }

    /// Returns sample parameters for the modular creep-damage law
    pub fn param_modular_creep(effective: ParamEffectiveStress) -> ParamDamage {
        ParamDamage::ModularCreep {
            aa: Interp::Constant(1000.0),
            xi: Interp::Constant(3.0),
            phi: Interp::Constant(1.5),
            effective,
        }
    }

    /// Returns sample parameters for the inelastic-work damage law
    pub fn param_work() -> ParamDamage {
        ParamDamage::Work {
            ww_crit: Interp::PowerLaw { a: 10.0, n: 0.2 },
            n: Interp::Constant(2.0),
            eps: 1e-30,
        }
    }

    /// Returns sample parameters for an elastic solid with classical creep damage
    ///
    /// E = 200000, ν = 0.3, A = 10⁴, ξ = 4, φ = 0 and default settings.
    pub fn param_damaged_creep() -> ParamDamagedSolid {
        ParamDamagedSolid {
            base: SampleParams::param_elastic(),
            damage: SampleParams::param_classical_creep(1e4, 4.0, 0.0),
            settings: Settings::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SampleParams;
    use crate::base::{ParamBase, ParamDamage};

    #[test]
    fn sample_params_work() {
        let p = SampleParams::param_damaged_creep();
        assert_eq!(p.base.young_poisson(), (200000.0, 0.3));
        match p.damage {
            ParamDamage::ClassicalCreep { aa, .. } => assert_eq!(aa.value(300.0), 1e4),
            _ => panic!("wrong damage law"),
        }
        match SampleParams::param_von_mises() {
            ParamBase::VonMises { z0, .. } => assert_eq!(z0, 200.0),
            _ => panic!("wrong base model"),
        }
        match SampleParams::param_work() {
            ParamDamage::Work { eps, .. } => assert_eq!(eps, 1e-30),
            _ => panic!("wrong damage law"),
        }
    }
}
