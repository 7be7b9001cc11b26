use super::{DamageArgs, DamageLaw};
use crate::base::Interp;
use crate::StrError;
use russell_lab::vec_inner;
use russell_tensor::{t2_add, t4_ddot_t2, Mandel, Tensor2};

/// Implements a damage law driven by the inelastic work rate
///
/// ```text
/// Δd = n d^((n-1)/n) Ẇ Δt / Wcrit(Ẇ)
/// Ẇ = |σ' : Δεp| (1 - d) / Δt
/// Δεp = Δε - S : (σ' (1 - d) - σ'ₙ (1 - dₙ))
/// ```
///
/// Wcrit is the critical work as a function of the work rate and n is a function of the
/// temperature. The law vanishes at d = 0 (a trivial root of the damage equation); thus the
/// initial guess is an upper bound of the nontrivial root and never smaller than `eps`.
pub struct WorkDamage {
    ww_crit: Interp,
    n: Interp,
    eps: f64,
}

/// Holds the intermediate values of the work rate
struct WorkRate {
    /// Inelastic strain increment Δεp
    dp: Tensor2,

    /// Work increment g = σ' : Δεp
    g: f64,

    /// Work rate Ẇ
    wdot: f64,
}

impl WorkDamage {
    /// Allocates a new instance
    pub fn new(ww_crit: Interp, n: Interp, eps: f64) -> Result<Self, StrError> {
        ww_crit.validate()?;
        n.validate()?;
        if eps <= 0.0 {
            return Err("the initial damage guess must be positive");
        }
        Ok(WorkDamage { ww_crit, n, eps })
    }

    /// Computes the inelastic strain increment and the work rate
    fn work_rate(&self, args: &DamageArgs) -> WorkRate {
        let (d, dn) = (args.d_new, args.d_old);
        let mut delta_strain = Tensor2::new(Mandel::Symmetric);
        let mut delta_stress = Tensor2::new(Mandel::Symmetric);
        let mut delta_strain_e = Tensor2::new(Mandel::Symmetric);
        let mut dp = Tensor2::new(Mandel::Symmetric);
        t2_add(&mut delta_strain, 1.0, args.strain_new, -1.0, args.strain_old);
        t2_add(&mut delta_stress, 1.0 - d, args.stress_new, -(1.0 - dn), args.stress_old);
        t4_ddot_t2(&mut delta_strain_e, 1.0, args.compliance, &delta_stress);
        t2_add(&mut dp, 1.0, &delta_strain, -1.0, &delta_strain_e);
        let g = vec_inner(args.stress_new.vector(), dp.vector());
        let dt = args.dt();
        let wdot = if dt <= 0.0 { 0.0 } else { f64::abs(g) * (1.0 - d) / dt };
        WorkRate { dp, g, wdot }
    }

    /// Returns true if the law is inactive (no damage or no work)
    fn inactive(&self, args: &DamageArgs, rate: &WorkRate) -> bool {
        args.d_new <= 0.0 || rate.wdot == 0.0
    }

    /// Calculates the common factor of the strain and stress derivatives
    ///
    /// ```text
    /// fact = n d^((n-1)/n) / Wcrit (1 - Ẇ Wcrit' / Wcrit) (1 - d) sign(g)
    /// ```
    fn factor(&self, args: &DamageArgs, rate: &WorkRate) -> f64 {
        let d = args.d_new;
        let n = self.n.value(args.temperature_new);
        let ww = self.ww_crit.value(rate.wdot);
        let dww = self.ww_crit.derivative(rate.wdot);
        n * f64::powf(d, (n - 1.0) / n) / ww * (1.0 - rate.wdot * dww / ww) * (1.0 - d) * f64::signum(rate.g)
    }
}

impl DamageLaw for WorkDamage {
    fn damage(&self, args: &DamageArgs) -> Result<f64, StrError> {
        let rate = self.work_rate(args);
        if self.inactive(args, &rate) {
            return Ok(0.0);
        }
        let d = args.d_new;
        let n = self.n.value(args.temperature_new);
        let ww = self.ww_crit.value(rate.wdot);
        Ok(n * f64::powf(d, (n - 1.0) / n) * rate.wdot * args.dt() / ww)
    }

    fn ddamage_dd(&self, args: &DamageArgs) -> Result<f64, StrError> {
        let rate = self.work_rate(args);
        if self.inactive(args, &rate) {
            return Ok(0.0);
        }
        let (d, dt, wdot) = (args.d_new, args.dt(), rate.wdot);
        let n = self.n.value(args.temperature_new);
        let ww = self.ww_crit.value(wdot);
        let dww = self.ww_crit.derivative(wdot);

        // dẆ/dd = -Ẇ/(1-d) + sign(g) (1-d) (σ' : S : σ') / Δt
        let mut s_sigma = Tensor2::new(Mandel::Symmetric);
        t4_ddot_t2(&mut s_sigma, 1.0, args.compliance, args.stress_new);
        let sss = vec_inner(args.stress_new.vector(), s_sigma.vector());
        let dwdot_dd = -wdot / (1.0 - d) + f64::signum(rate.g) * (1.0 - d) * sss / dt;

        let term1 = (n - 1.0) * f64::powf(d, -1.0 / n) * wdot * dt / ww;
        let term2 = n * f64::powf(d, (n - 1.0) / n) * dt / ww * (1.0 - wdot * dww / ww) * dwdot_dd;
        Ok(term1 + term2)
    }

    fn ddamage_de(&self, dd_de: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        let rate = self.work_rate(args);
        if self.inactive(args, &rate) {
            dd_de.vector_mut().fill(0.0);
            return Ok(());
        }
        dd_de.set_tensor(self.factor(args, &rate), args.stress_new);
        Ok(())
    }

    fn ddamage_ds(&self, dd_ds: &mut Tensor2, args: &DamageArgs) -> Result<(), StrError> {
        let rate = self.work_rate(args);
        if self.inactive(args, &rate) {
            dd_ds.vector_mut().fill(0.0);
            return Ok(());
        }
        // dd_ds = fact (Δεp - (1-d) S : σ')
        let d = args.d_new;
        let fact = self.factor(args, &rate);
        let mut s_sigma = Tensor2::new(Mandel::Symmetric);
        t4_ddot_t2(&mut s_sigma, 1.0, args.compliance, args.stress_new);
        t2_add(dd_ds, fact, &rate.dp, -fact * (1.0 - d), &s_sigma);
        Ok(())
    }

    /// Returns an upper bound of the root of the damage equation
    ///
    /// With k = n Ẇ Δt / Wcrit(Ẇ) evaluated at dₙ, the root of d = dₙ + k d^((n-1)/n) is
    /// bounded by (dₙ^(1/n) + k)^n. Newton's method converges monotonically from above the
    /// root, whereas it jumps to d ≤ 0 from below it.
    fn d_guess(&self, args: &DamageArgs) -> f64 {
        let d_old = f64::max(args.d_old, 0.0);
        let rate = self.work_rate(args);
        if rate.wdot == 0.0 {
            return if d_old > 0.0 { d_old } else { self.eps };
        }
        let n = self.n.value(args.temperature_new);
        let k = n * rate.wdot * args.dt() / self.ww_crit.value(rate.wdot);
        let bound = f64::powf(f64::powf(d_old, 1.0 / n) + k, n);
        f64::max(self.eps, f64::min(bound, 0.5 * (1.0 + d_old)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
