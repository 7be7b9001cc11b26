use super::{DamageArgs, DamageLaw};
use crate::StrError;
use russell_tensor::{Mandel, Tensor2};
use std::sync::Arc;

/// Implements the sum of several damage laws
///
/// The increments and the derivatives of all laws are added together. The initial guess is
/// the largest guess among the laws.
pub struct CombinedDamage {
    laws: Vec<Arc<dyn DamageLaw>>,
}

impl CombinedDamage {
    /// Allocates a new instance
    pub fn new(laws: Vec<Arc<dyn DamageLaw>>) -> Result<Self, StrError> {
        if laws.is_empty() {
            return Err("at least one damage law is required");
        }
        Ok(CombinedDamage { laws })
    }

    /// Accumulates a tensor derivative over all laws
    fn accumulate<F>(&self, res: &mut Tensor2, mut calc: F) -> Result<(), StrError>
    where
        F: FnMut(&dyn DamageLaw, &mut Tensor2) -> Result<(), StrError>,
    {
        let mut aux = Tensor2::new(Mandel::Symmetric);
        res.vector_mut().fill(0.0);
        for law in &self.laws {
            calc(law.as_ref(), &mut aux)?;
            res.update(1.0, &aux);
        }
        Ok(())
    }
}

impl DamageLaw for CombinedDamage {
    fn damage(&self, args: &DamageArgs) -> Result<f64, StrError> {
        let mut sum = 0.0;
        for law in &self.laws {
            sum += law.damage(args)?;
        }
        Ok(sum)
    }

    fn ddamage_dd(&self, args: &DamageArgs) -> Result<f64, StrError> {
        let mut sum = 0.0;
        for law in &self.laws {
            sum += law.ddamage_dd(args)?;
        }
        Ok(sum)
    }

    fn ddamage_de(&self, dd_de: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        self.accumulate(dd_de, |law, aux| law.ddamage_de(aux, args))
    }

    fn ddamage_ds(&self, dd_ds: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        self.accumulate(dd_ds, |law, aux| law.ddamage_ds(aux, args))
    }

    fn d_guess(&self, args: &DamageArgs) -> f64 {
        self.laws.iter().fold(args.d_old, |acc, law| f64::max(acc, law.d_guess(args)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
