use super::{Interp, Settings};
use serde::{Deserialize, Serialize};

/// Holds parameters for the undamaged (base) stress-strain relation
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ParamBase {
    /// Linear elastic model
    LinearElastic {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },

    /// von Mises plasticity model with linear isotropic hardening
    VonMises {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,

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
    },
}

impl ParamBase {
    /// Returns the Young modulus and the Poisson coefficient
    pub fn young_poisson(&self) -> (f64, f64) {
        match self {
            ParamBase::LinearElastic { young, poisson } => (*young, *poisson),
            ParamBase::VonMises { young, poisson, .. } => (*young, *poisson),
        }
    }
}

/// Holds parameters for scalar effective-stress measures
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum ParamEffectiveStress {
    /// von Mises stress σd = √(3 J2)
    VonMises,

    /// Mean stress σm = tr(σ)/3
    Mean,

    /// Largest principal stress, clipped at zero
    MaxPrincipal,

    /// Huddleston stress σe exp(b (I1/σs - 1))
    Huddleston {
        /// Multiaxiality coefficient
        b: f64,
    },

    /// Maximum value of several measures
    MaxSeveral {
        /// The measures
        measures: Vec<ParamEffectiveStress>,
    },

    /// Weighted sum of several measures
    SumSeveral {
        /// The measures
        measures: Vec<ParamEffectiveStress>,

        /// The weights (one per measure)
        weights: Vec<f64>,
    },
}

/// Holds parameters for scalar damage laws
///
/// The temperature-dependent coefficients are evaluated at the end-of-step temperature.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum ParamDamage {
    /// No damage (Δd = 0)
    None,

    /// Classical creep damage
    ///
    /// ```text
    /// Δd = (σd/A)^ξ (1-d)^(-φ) Δt
    /// ```
    ClassicalCreep {
        /// Reference stress A
        aa: Interp,

        /// Stress exponent ξ
        xi: Interp,

        /// Damage exponent φ
        phi: Interp,
    },

    /// Modular creep damage with a pluggable effective stress
    ///
    /// ```text
    /// Δd = (σe/A)^ξ (1-d)^(ξ-φ) Δt
    /// ```
    ModularCreep {
        /// Reference stress A
        aa: Interp,

        /// Stress exponent ξ
        xi: Interp,

        /// Damage exponent φ
        phi: Interp,

        /// Effective stress measure σe
        effective: ParamEffectiveStress,
    },

    /// Power law in the von Mises stress times the inelastic strain increment
    ///
    /// ```text
    /// Δd = A σd^a Δεp
    /// ```
    PowerLaw {
        /// Coefficient A
        aa: Interp,

        /// Exponent a
        a: Interp,
    },

    /// Exponential work damage
    ///
    /// ```text
    /// Δd = (d + k0)^af / W0 σd Δεp
    /// ```
    ExponentialWork {
        /// Critical work W0
        ww0: Interp,

        /// Regularization k0
        k0: Interp,

        /// Exponent af
        af: Interp,
    },

    /// Inelastic-work damage
    ///
    /// ```text
    /// Δd = n |d|^((n-1)/n) Ẇ Δt / Wcrit(Ẇ)
    /// ```
    Work {
        /// Critical work as a function of the work rate Ẇ
        ww_crit: Interp,

        /// Exponent n (function of temperature)
        n: Interp,

        /// Initial guess of the damage (avoids the singularity at d = 0)
        eps: f64,
    },

    /// Sum of several damage laws
    Combined {
        /// The laws
        laws: Vec<ParamDamage>,
    },
}

/// Holds parameters for a damaged solid
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ParamDamagedSolid {
    /// Undamaged stress-strain relation
    pub base: ParamBase,

    /// Damage law
    pub damage: ParamDamage,

    /// Solver and element-deletion settings
    pub settings: Settings,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ParamBase, ParamDamage, ParamDamagedSolid, ParamEffectiveStress};
    use crate::base::{Interp, Settings};

    #[test]
    fn param_base_derive_works() {
        let p = ParamBase::LinearElastic {
            young: 1000.0,
            poisson: 0.2,
        };
        let q = p.clone();
        let correct = "LinearElastic { young: 1000.0, poisson: 0.2 }";
        assert_eq!(format!("{:?}", q), correct);
        assert_eq!(q.young_poisson(), (1000.0, 0.2));
        let p = ParamBase::VonMises {
            young: 1000.0,
            poisson: 0.25,
            hh: 10.0,
            z0: 9.0,
        };
        assert_eq!(p.young_poisson(), (1000.0, 0.25));
    }

    #[test]
    fn param_effective_stress_derive_works() {
        let p = ParamEffectiveStress::SumSeveral {
            measures: vec![ParamEffectiveStress::VonMises, ParamEffectiveStress::Mean],
            weights: vec![0.5, 0.5],
        };
        let q = p.clone();
        let correct = "SumSeveral { measures: [VonMises, Mean], weights: [0.5, 0.5] }";
        assert_eq!(format!("{:?}", q), correct);
    }

    #[test]
    fn param_damage_derive_works() {
        let p = ParamDamage::ClassicalCreep {
            aa: Interp::Constant(10000.0),
            xi: Interp::Constant(4.0),
            phi: Interp::Constant(0.0),
        };
        let q = p.clone();
        let correct = "ClassicalCreep { aa: Constant(10000.0), xi: Constant(4.0), phi: Constant(0.0) }";
        assert_eq!(format!("{:?}", q), correct);
    }

    #[test]
    fn param_damaged_solid_serde_works() {
        let p = ParamDamagedSolid {
            base: ParamBase::LinearElastic {
                young: 200000.0,
                poisson: 0.3,
            },
            damage: ParamDamage::Combined {
                laws: vec![
                    ParamDamage::None,
                    ParamDamage::ModularCreep {
                        aa: Interp::Constant(10000.0),
                        xi: Interp::Constant(4.0),
                        phi: Interp::Constant(2.0),
                        effective: ParamEffectiveStress::Huddleston { b: 0.24 },
                    },
                ],
            },
            settings: Settings::new(),
        };
        let json = serde_json::to_string(&p).unwrap();
        let q: ParamDamagedSolid = serde_json::from_str(&json).unwrap();
        assert_eq!(format!("{:?}", q), format!("{:?}", p));
    }
}
