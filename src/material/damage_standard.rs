use super::{DamageArgs, DamageLaw};
use crate::base::Interp;
use crate::StrError;
use russell_lab::vec_inner;
use russell_tensor::{t2_add, t4_ddot_t2, Mandel, Tensor2};

/// Specifies the damage function f of a standard damage law
///
/// A standard law integrates the damage rate from the equivalent inelastic strain increment:
///
/// ```text
/// Δd = f(σ', d) Δεp
/// Δεp = √(2/3 e : e)
/// e = Δε - S : Δσ'
/// ```
///
/// where S is the elastic compliance and σ' the undamaged stress.
trait StandardFunction {
    /// Calculates f
    fn f(&self, args: &DamageArgs) -> f64;

    /// Calculates ∂f/∂σ'
    fn df_ds(&self, df_ds: &mut Tensor2, args: &DamageArgs);

    /// Calculates ∂f/∂d
    fn df_dd(&self, args: &DamageArgs) -> f64;
}

/// Holds the inelastic strain increment e and its equivalent value Δεp
struct InelasticIncrement {
    e: Tensor2,
    dep: f64,
}

impl InelasticIncrement {
    /// Computes e = Δε - S : Δσ' and Δεp = √(2/3 e : e)
    fn new(args: &DamageArgs) -> Self {
        let mut delta_strain = Tensor2::new(Mandel::Symmetric);
        let mut delta_stress = Tensor2::new(Mandel::Symmetric);
        let mut delta_strain_e = Tensor2::new(Mandel::Symmetric);
        let mut e = Tensor2::new(Mandel::Symmetric);
        t2_add(&mut delta_strain, 1.0, args.strain_new, -1.0, args.strain_old);
        t2_add(&mut delta_stress, 1.0, args.stress_new, -1.0, args.stress_old);
        t4_ddot_t2(&mut delta_strain_e, 1.0, args.compliance, &delta_stress);
        t2_add(&mut e, 1.0, &delta_strain, -1.0, &delta_strain_e);
        let val = 2.0 / 3.0 * vec_inner(e.vector(), e.vector());
        let dep = if val < 0.0 { 0.0 } else { f64::sqrt(val) };
        InelasticIncrement { e, dep }
    }
}

fn standard_damage(fun: &dyn StandardFunction, args: &DamageArgs) -> f64 {
    let inc = InelasticIncrement::new(args);
    fun.f(args) * inc.dep
}

fn standard_ddamage_dd(fun: &dyn StandardFunction, args: &DamageArgs) -> f64 {
    let inc = InelasticIncrement::new(args);
    fun.df_dd(args) * inc.dep
}

fn standard_ddamage_de(fun: &dyn StandardFunction, dd_de: &mut Tensor2, args: &DamageArgs) {
    let inc = InelasticIncrement::new(args);
    if inc.dep == 0.0 {
        dd_de.vector_mut().fill(0.0);
        return;
    }
    dd_de.set_tensor(2.0 * fun.f(args) / (3.0 * inc.dep), &inc.e);
}

fn standard_ddamage_ds(fun: &dyn StandardFunction, dd_ds: &mut Tensor2, args: &DamageArgs) {
    let inc = InelasticIncrement::new(args);
    if inc.dep == 0.0 {
        dd_ds.vector_mut().fill(0.0);
        return;
    }
    // dd_ds = ∂f/∂σ' Δεp - S : (2 f / (3 Δεp)) e
    let mut aux = Tensor2::new(Mandel::Symmetric);
    t4_ddot_t2(&mut aux, -2.0 * fun.f(args) / (3.0 * inc.dep), args.compliance, &inc.e);
    fun.df_ds(dd_ds, args);
    let d = dd_ds.vector_mut();
    let a = aux.vector();
    for i in 0..d.dim() {
        d[i] = d[i] * inc.dep + a[i];
    }
}

/// Implements the power law damage with f = A σd^a
pub struct PowerLawDamage {
    aa: Interp,
    a: Interp,
}

/// Implements the exponential work damage with f = (d + k0)^af σd / W0
pub struct ExponentialWorkDamage {
    ww0: Interp,
    k0: Interp,
    af: Interp,
}

impl PowerLawDamage {
    /// Allocates a new instance
    pub fn new(aa: Interp, a: Interp) -> Result<Self, StrError> {
        aa.validate()?;
        a.validate()?;
        Ok(PowerLawDamage { aa, a })
    }
}

impl StandardFunction for PowerLawDamage {
    fn f(&self, args: &DamageArgs) -> f64 {
        let t = args.temperature_new;
        let se = args.stress_new.invariant_sigma_d();
        self.aa.value(t) * f64::powf(se, self.a.value(t))
    }

    fn df_ds(&self, df_ds: &mut Tensor2, args: &DamageArgs) {
        let t = args.temperature_new;
        let se = args.stress_new.invariant_sigma_d();
        if se == 0.0 {
            df_ds.vector_mut().fill(0.0);
            return;
        }
        let (aa, a) = (self.aa.value(t), self.a.value(t));
        args.stress_new.deviator(df_ds);
        let d = df_ds.vector_mut();
        let scalar = 3.0 * aa * a / 2.0 * f64::powf(se, a - 2.0);
        for i in 0..d.dim() {
            d[i] *= scalar;
        }
    }

    fn df_dd(&self, _args: &DamageArgs) -> f64 {
        0.0
    }
}

impl DamageLaw for PowerLawDamage {
    fn damage(&self, args: &DamageArgs) -> Result<f64, StrError> {
        Ok(standard_damage(self, args))
    }

    fn ddamage_dd(&self, args: &DamageArgs) -> Result<f64, StrError> {
        Ok(standard_ddamage_dd(self, args))
    }

    fn ddamage_de(&self, dd_de: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        standard_ddamage_de(self, dd_de, args);
        Ok(())
    }

    fn ddamage_ds(&self, dd_ds: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        standard_ddamage_ds(self, dd_ds, args);
        Ok(())
    }
}

impl ExponentialWorkDamage {
    /// Allocates a new instance
    pub fn new(ww0: Interp, k0: Interp, af: Interp) -> Result<Self, StrError> {
        ww0.validate()?;
        k0.validate()?;
        af.validate()?;
        Ok(ExponentialWorkDamage { ww0, k0, af })
    }

    /// Returns (W0, k0, af) at the temperature of step n+1
    fn coefficients(&self, args: &DamageArgs) -> (f64, f64, f64) {
        let t = args.temperature_new;
        (self.ww0.value(t), self.k0.value(t), self.af.value(t))
    }
}

impl StandardFunction for ExponentialWorkDamage {
    fn f(&self, args: &DamageArgs) -> f64 {
        let (ww0, k0, af) = self.coefficients(args);
        let dk = args.d_new + k0;
        if dk < 0.0 {
            return 0.0;
        }
        f64::powf(dk, af) / ww0 * args.stress_new.invariant_sigma_d()
    }

    fn df_ds(&self, df_ds: &mut Tensor2, args: &DamageArgs) {
        let (ww0, k0, af) = self.coefficients(args);
        let dk = args.d_new + k0;
        let se = args.stress_new.invariant_sigma_d();
        if dk < 0.0 || se == 0.0 {
            df_ds.vector_mut().fill(0.0);
            return;
        }
        args.stress_new.deviator(df_ds);
        let d = df_ds.vector_mut();
        let scalar = 3.0 * f64::powf(dk, af) / (2.0 * se * ww0);
        for i in 0..d.dim() {
            d[i] *= scalar;
        }
    }

    fn df_dd(&self, args: &DamageArgs) -> f64 {
        let (ww0, k0, af) = self.coefficients(args);
        let dk = args.d_new + k0;
        if dk < 0.0 {
            return 0.0;
        }
        af * f64::powf(dk, af - 1.0) * args.stress_new.invariant_sigma_d() / ww0
    }
}

impl DamageLaw for ExponentialWorkDamage {
    fn damage(&self, args: &DamageArgs) -> Result<f64, StrError> {
        Ok(standard_damage(self, args))
    }

    fn ddamage_dd(&self, args: &DamageArgs) -> Result<f64, StrError> {
        Ok(standard_ddamage_dd(self, args))
    }

    fn ddamage_de(&self, dd_de: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        standard_ddamage_de(self, dd_de, args);
        Ok(())
    }

    fn ddamage_ds(&self, dd_ds: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        standard_ddamage_ds(self, dd_ds, args);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
