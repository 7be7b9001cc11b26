use crate::base::ParamEffectiveStress;
use crate::StrError;
use russell_lab::vec_inner;
use russell_tensor::{deriv1_invariant_sigma_d, Mandel, Spectral2, Tensor2};
use std::sync::Arc;

/// Holds the Mandel components of the second-order identity tensor
const I: [f64; 6] = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0];

/// Specifies a scalar measure of a stress tensor used to drive damage laws
pub trait EffectiveStress: Send + Sync {
    /// Calculates the effective stress
    fn effective(&self, sigma: &Tensor2) -> Result<f64, StrError>;

    /// Calculates the derivative of the effective stress w.r.t the stress tensor
    fn deffective(&self, deff: &mut Tensor2, sigma: &Tensor2) -> Result<(), StrError>;
}

/// Implements the von Mises stress σd = √(3 J2)
pub struct VonMisesEffective {}

/// Implements the mean stress σm = tr(σ)/3
pub struct MeanEffective {}

/// Implements the largest principal stress (zero if all principal stresses are negative)
pub struct MaxPrincipalEffective {}

/// Implements the Huddleston stress
///
/// ```text
/// σh = σe exp(b (I1/σs - 1))
/// σe = √(3 J2)
/// σs = √(3 J2 + I2) = ‖σ‖
/// ```
pub struct HuddlestonEffective {
    /// Multiaxiality coefficient
    b: f64,
}

/// Implements the maximum of several effective stresses
pub struct MaxSeveralEffective {
    measures: Vec<Arc<dyn EffectiveStress>>,
}

/// Implements the weighted sum of several effective stresses
pub struct SumSeveralEffective {
    measures: Vec<Arc<dyn EffectiveStress>>,
    weights: Vec<f64>,
}

impl EffectiveStress for VonMisesEffective {
    fn effective(&self, sigma: &Tensor2) -> Result<f64, StrError> {
        Ok(sigma.invariant_sigma_d())
    }

    fn deffective(&self, deff: &mut Tensor2, sigma: &Tensor2) -> Result<(), StrError> {
        // the derivative at σd = 0 is taken as zero
        if deriv1_invariant_sigma_d(deff, sigma).is_none() {
            deff.vector_mut().fill(0.0);
        }
        Ok(())
    }
}

impl EffectiveStress for MeanEffective {
    fn effective(&self, sigma: &Tensor2) -> Result<f64, StrError> {
        Ok(sigma.invariant_sigma_m())
    }

    fn deffective(&self, deff: &mut Tensor2, _sigma: &Tensor2) -> Result<(), StrError> {
        let d = deff.vector_mut();
        for i in 0..6 {
            d[i] = I[i] / 3.0;
        }
        Ok(())
    }
}

impl MaxPrincipalEffective {
    /// Returns the largest eigenvalue and the spectral decomposition
    fn largest(&self, sigma: &Tensor2) -> Result<(usize, f64, Spectral2), StrError> {
        let mut spectral = Spectral2::new(false);
        spectral.decompose(sigma)?;
        let mut k = 0;
        for i in 1..3 {
            if spectral.lambda[i] > spectral.lambda[k] {
                k = i;
            }
        }
        let value = spectral.lambda[k];
        Ok((k, value, spectral))
    }
}

impl EffectiveStress for MaxPrincipalEffective {
    fn effective(&self, sigma: &Tensor2) -> Result<f64, StrError> {
        let (_, value, _) = self.largest(sigma)?;
        Ok(f64::max(value, 0.0))
    }

    fn deffective(&self, deff: &mut Tensor2, sigma: &Tensor2) -> Result<(), StrError> {
        let (k, value, spectral) = self.largest(sigma)?;
        if value < 0.0 {
            deff.vector_mut().fill(0.0);
        } else {
            deff.set_tensor(1.0, &spectral.projectors[k]); // dλ/dσ = n ⊗ n
        }
        Ok(())
    }
}

impl HuddlestonEffective {
    /// Allocates a new instance
    pub fn new(b: f64) -> Self {
        HuddlestonEffective { b }
    }
}

impl EffectiveStress for HuddlestonEffective {
    fn effective(&self, sigma: &Tensor2) -> Result<f64, StrError> {
        let ss = f64::sqrt(vec_inner(sigma.vector(), sigma.vector()));
        if ss == 0.0 {
            return Ok(0.0);
        }
        let i1 = 3.0 * sigma.invariant_sigma_m();
        let se = sigma.invariant_sigma_d();
        Ok(se * f64::exp(self.b * (i1 / ss - 1.0)))
    }

    fn deffective(&self, deff: &mut Tensor2, sigma: &Tensor2) -> Result<(), StrError> {
        deff.vector_mut().fill(0.0);
        let ss = f64::sqrt(vec_inner(sigma.vector(), sigma.vector()));
        let se = sigma.invariant_sigma_d();
        if ss == 0.0 || se == 0.0 {
            return Ok(());
        }
        let i1 = 3.0 * sigma.invariant_sigma_m();
        let ex = f64::exp(self.b * (i1 / ss - 1.0));
        let eff = se * ex;

        // dσe/dσ = 3 s / (2 σe) and dσs/dσ = σ / σs
        let mut s = Tensor2::new(Mandel::Symmetric);
        sigma.deviator(&mut s);
        let (s, sig) = (s.vector(), sigma.vector());
        let d = deff.vector_mut();
        for i in 0..6 {
            let dse = 1.5 * s[i] / se;
            let dss = sig[i] / ss;
            d[i] = ex * dse + eff * self.b * (I[i] / ss - i1 * dss / (ss * ss));
        }
        Ok(())
    }
}

impl MaxSeveralEffective {
    /// Allocates a new instance
    pub fn new(measures: Vec<Arc<dyn EffectiveStress>>) -> Result<Self, StrError> {
        if measures.is_empty() {
            return Err("at least one effective stress measure is required");
        }
        Ok(MaxSeveralEffective { measures })
    }

    /// Returns the index and value of the largest measure
    fn select(&self, sigma: &Tensor2) -> Result<(usize, f64), StrError> {
        let mut index = 0;
        let mut value = f64::NEG_INFINITY;
        for (i, measure) in self.measures.iter().enumerate() {
            let v = measure.effective(sigma)?;
            if v > value {
                value = v;
                index = i;
            }
        }
        Ok((index, value))
    }
}

impl EffectiveStress for MaxSeveralEffective {
    fn effective(&self, sigma: &Tensor2) -> Result<f64, StrError> {
        let (_, value) = self.select(sigma)?;
        Ok(value)
    }

    fn deffective(&self, deff: &mut Tensor2, sigma: &Tensor2) -> Result<(), StrError> {
        let (index, _) = self.select(sigma)?;
        self.measures[index].deffective(deff, sigma)
    }
}

impl SumSeveralEffective {
    /// Allocates a new instance
    pub fn new(measures: Vec<Arc<dyn EffectiveStress>>, weights: Vec<f64>) -> Result<Self, StrError> {
        if measures.len() != weights.len() {
            return Err("the numbers of measures and weights must be equal");
        }
        Ok(SumSeveralEffective { measures, weights })
    }
}

impl EffectiveStress for SumSeveralEffective {
    fn effective(&self, sigma: &Tensor2) -> Result<f64, StrError> {
        let mut eff = 0.0;
        for (measure, weight) in self.measures.iter().zip(&self.weights) {
            eff += weight * measure.effective(sigma)?;
        }
        Ok(eff)
    }

    fn deffective(&self, deff: &mut Tensor2, sigma: &Tensor2) -> Result<(), StrError> {
        let mut aux = Tensor2::new(Mandel::Symmetric);
        deff.vector_mut().fill(0.0);
        for (measure, weight) in self.measures.iter().zip(&self.weights) {
            measure.deffective(&mut aux, sigma)?;
            deff.update(*weight, &aux);
        }
        Ok(())
    }
}

/// Allocates an effective stress measure
pub fn allocate_effective_stress(param: &ParamEffectiveStress) -> Result<Arc<dyn EffectiveStress>, StrError> {
    let measure: Arc<dyn EffectiveStress> = match param {
        ParamEffectiveStress::VonMises => Arc::new(VonMisesEffective {}),
        ParamEffectiveStress::Mean => Arc::new(MeanEffective {}),
        ParamEffectiveStress::MaxPrincipal => Arc::new(MaxPrincipalEffective {}),
        ParamEffectiveStress::Huddleston { b } => Arc::new(HuddlestonEffective::new(*b)),
        ParamEffectiveStress::MaxSeveral { measures } => {
            let measures = measures
                .iter()
                .map(allocate_effective_stress)
                .collect::<Result<Vec<_>, _>>()?;
            Arc::new(MaxSeveralEffective::new(measures)?)
        }
        ParamEffectiveStress::SumSeveral { measures, weights } => {
            let measures = measures
                .iter()
                .map(allocate_effective_stress)
                .collect::<Result<Vec<_>, _>>()?;
            Arc::new(SumSeveralEffective::new(measures, weights.clone())?)
        }
    };
    Ok(measure)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
