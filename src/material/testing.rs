use super::{DamageArgs, DamageLaw, LinearElastic, MaterialModel};
use russell_lab::{approx_eq, deriv1_central5};
use russell_tensor::{Mandel, Tensor2, Tensor4};

/// Returns a stress tensor with distinct principal values
pub(crate) fn sample_stress() -> Tensor2 {
    Tensor2::from_matrix(
        &[[100.0, 30.0, 10.0], [30.0, -20.0, 15.0], [10.0, 15.0, 50.0]],
        Mandel::Symmetric,
    )
    .unwrap()
}

/// Holds the data of a plausible damage-law evaluation
///
/// E = 200000, ν = 0.3, d = 0.1, dₙ = 0.05, Δt = 1 and an inelastic strain increment.
pub(crate) struct SampleDamageArgs {
    pub d_new: f64,
    pub d_old: f64,
    pub strain_new: Tensor2,
    pub strain_old: Tensor2,
    pub stress_new: Tensor2,
    pub stress_old: Tensor2,
    pub compliance: Tensor4,
    pub dt: f64,
}

impl SampleDamageArgs {
    pub fn new() -> Self {
        let elastic = LinearElastic::new(200000.0, 0.3).unwrap();
        let mut compliance = Tensor4::new(Mandel::Symmetric);
        elastic.elastic_compliance(&mut compliance, 300.0).unwrap();
        let strain_new = Tensor2::from_matrix(
            &[[0.002, 0.0004, 0.0], [0.0004, -0.0005, 0.0002], [0.0, 0.0002, -0.0006]],
            Mandel::Symmetric,
        )
        .unwrap();
        let stress_old = Tensor2::from_matrix(
            &[[20.0, 5.0, 0.0], [5.0, -4.0, 1.0], [0.0, 1.0, 8.0]],
            Mandel::Symmetric,
        )
        .unwrap();
        SampleDamageArgs {
            d_new: 0.1,
            d_old: 0.05,
            strain_new,
            strain_old: Tensor2::new(Mandel::Symmetric),
            stress_new: sample_stress(),
            stress_old,
            compliance,
            dt: 1.0,
        }
    }

    /// Returns a grid of plausible states around the sample
    ///
    /// ```text
    /// d  ∈ {0.01, 0.1, 0.5} with dₙ = d/2
    /// σ' ∈ {0.5, 1, 2} × sample_stress()
    /// Δε ∈ two strain increments
    /// Δt ∈ {0.1, 1}
    /// ```
    pub fn grid() -> Vec<Self> {
        let strains = [
            [[0.002, 0.0004, 0.0], [0.0004, -0.0005, 0.0002], [0.0, 0.0002, -0.0006]],
            [[0.003, 0.0, 0.0003], [0.0, -0.001, 0.0], [0.0003, 0.0, -0.0012]],
        ];
        let mut grid = Vec::new();
        for d in [0.01, 0.1, 0.5] {
            for scale in [0.5, 1.0, 2.0] {
                for strain in &strains {
                    for dt in [0.1, 1.0] {
                        let mut data = SampleDamageArgs::new();
                        data.d_new = d;
                        data.d_old = 0.5 * d;
                        data.stress_new.set_tensor(scale, &sample_stress());
                        data.strain_new = Tensor2::from_matrix(strain, Mandel::Symmetric).unwrap();
                        data.dt = dt;
                        grid.push(data);
                    }
                }
            }
        }
        grid
    }

    /// Negates the strain increment
    pub fn negate_strain(&mut self) {
        let strain = self.strain_new.clone();
        self.strain_new.set_tensor(-1.0, &strain);
    }

    pub fn args(&self) -> DamageArgs {
        DamageArgs {
            d_new: self.d_new,
            d_old: self.d_old,
            strain_new: &self.strain_new,
            strain_old: &self.strain_old,
            stress_new: &self.stress_new,
            stress_old: &self.stress_old,
            compliance: &self.compliance,
            temperature_new: 300.0,
            temperature_old: 300.0,
            time_new: self.dt,
            time_old: 0.0,
        }
    }
}

/// Compares the analytic derivatives of a damage law with central differences
///
/// The damage and the strain are perturbed in units of 1e-3 (the step of `deriv1_central5`
/// then corresponds to 1e-6). The comparison uses the relative tolerance `tol` (absolute if
/// the derivative is smaller than one).
pub(crate) fn check_damage_derivatives(law: &dyn DamageLaw, data: &SampleDamageArgs, tol: f64) {
    const UNIT: f64 = 1e-3;
    let check = |ana: f64, num: f64| approx_eq(ana, num, tol * f64::max(1.0, f64::abs(num)));

    // d
    let args = data.args();
    let ana = law.ddamage_dd(&args).unwrap();
    let mut aux = 0;
    let num = deriv1_central5(data.d_new / UNIT, &mut aux, |u, _| {
        let mut args = data.args();
        args.d_new = u * UNIT;
        law.damage(&args)
    })
    .unwrap();
    check(ana, num / UNIT);

    // ε
    let mut dd_de = Tensor2::new(Mandel::Symmetric);
    law.ddamage_de(&mut dd_de, &args).unwrap();
    let mut strain = data.strain_new.clone();
    for j in 0..6 {
        let x = data.strain_new.vector()[j];
        let num = deriv1_central5(x / UNIT, &mut strain, |u, strain| {
            strain.vector_mut()[j] = u * UNIT;
            let mut args = data.args();
            args.strain_new = &*strain;
            law.damage(&args)
        })
        .unwrap();
        strain.vector_mut()[j] = x;
        check(dd_de.vector()[j], num / UNIT);
    }

    // σ'
    let mut dd_ds = Tensor2::new(Mandel::Symmetric);
    law.ddamage_ds(&mut dd_ds, &args).unwrap();
    let mut stress = data.stress_new.clone();
    for j in 0..6 {
        let x = data.stress_new.vector()[j];
        let num = deriv1_central5(x, &mut stress, |s, stress| {
            stress.vector_mut()[j] = s;
            let mut args = data.args();
            args.stress_new = &*stress;
            law.damage(&args)
        })
        .unwrap();
        stress.vector_mut()[j] = x;
        check(dd_ds.vector()[j], num);
    }
}
