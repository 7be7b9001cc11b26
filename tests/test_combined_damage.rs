use dmgmat::base::SampleParams;
use dmgmat::prelude::*;
use dmgmat::StrError;
use russell_lab::approx_eq;
use russell_tensor::{Mandel, Tensor2, Tensor4};

// Combined damage laws
//
// TEST GOAL
//
// Verifies that a combination of two identical laws doubles the damage
// increment of the single law in a complete stress update.
//
// MATERIAL
//
// * Linear elastic base: E = 200000, ν = 0.3
// * Classical creep damage (A = 10⁴, ξ = 4, φ = 0), alone and twice combined
//
// LOADING
//
// * Constant uniaxial strain ε₁₁ = 0.001 during three unit time steps

const N_STEPS: usize = 3;

fn run(damage: ParamDamage) -> Result<Vec<f64>, StrError> {
    let param = ParamDamagedSolid {
        damage,
        ..SampleParams::param_damaged_creep()
    };
    let model = ScalarDamage::new(&param)?;
    let mut state = LocalState::new(model.n_internal_values());
    model.initialize_internal_values(&mut state)?;
    let mut dd = Tensor4::new(Mandel::Symmetric);
    let mut strain = Tensor2::new(Mandel::Symmetric);
    strain.vector_mut()[0] = 0.001;
    let mut damage = Vec::new();
    for n in 1..=N_STEPS {
        let stats = model
            .update_stress(&mut state, &mut dd, &strain, 300.0, n as f64)
            .map_err(|_| "update failed")?;
        damage.push(stats.damage);
    }
    Ok(damage)
}

#[test]
fn test_combined_damage() -> Result<(), StrError> {
    let single = run(SampleParams::param_classical_creep(1e4, 4.0, 0.0))?;
    let double = run(ParamDamage::Combined {
        laws: vec![
            SampleParams::param_classical_creep(1e4, 4.0, 0.0),
            SampleParams::param_classical_creep(1e4, 4.0, 0.0),
        ],
    })?;
    for n in 0..N_STEPS {
        assert!(single[n] > 0.0);
        approx_eq(double[n] / single[n], 2.0, 1e-12);
    }
    Ok(())
}
