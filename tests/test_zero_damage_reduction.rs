use dmgmat::base::SampleParams;
use dmgmat::material::allocate_base_model;
use dmgmat::prelude::*;
use dmgmat::StrError;
use russell_lab::{approx_eq, mat_approx_eq, vec_approx_eq};
use russell_tensor::{Mandel, Tensor2, Tensor4};

// Damaged model without damage
//
// TEST GOAL
//
// Verifies that the damaged model reproduces the base model when the damage
// law gives no damage: same stress, same internal values, same energy and
// plastic work, and same tangent.
//
// MATERIAL
//
// * von Mises base: E = 200000, ν = 0.3, H = 2000, z0 = 200
// * No damage
//
// LOADING
//
// * Four strain increments; the first is elastic, the others are plastic

const N_STEPS: usize = 4;

#[test]
fn test_zero_damage_reduction() -> Result<(), StrError> {
    // models
    let param = ParamDamagedSolid {
        base: SampleParams::param_von_mises(),
        damage: ParamDamage::None,
        settings: Settings::new(),
    };
    let damaged = ScalarDamage::new(&param)?;
    let base = allocate_base_model(&param.base)?;
    assert_eq!(damaged.n_internal_values(), base.n_internal_values() + 1);

    // states
    let mut state_d = LocalState::new(damaged.n_internal_values());
    let mut state_b = LocalState::new(base.n_internal_values());
    damaged.initialize_internal_values(&mut state_d)?;
    base.initialize_internal_values(&mut state_b)?;
    let mut dd_d = Tensor4::new(Mandel::Symmetric);
    let mut dd_b = Tensor4::new(Mandel::Symmetric);

    // loading
    let strain_max = Tensor2::from_matrix(
        &[[0.003, 0.0004, 0.0], [0.0004, -0.001, 0.0001], [0.0, 0.0001, -0.0012]],
        Mandel::Symmetric,
    )?;
    let mut strain = Tensor2::new(Mandel::Symmetric);
    for n in 1..=N_STEPS {
        let factor = (n as f64) / (N_STEPS as f64);
        strain.set_tensor(factor, &strain_max);
        let time_new = n as f64;
        let stats = damaged.update_stress(&mut state_d, &mut dd_d, &strain, 0.0, time_new).unwrap();
        base.update(&mut state_b, &mut dd_b, &strain, 0.0, time_new).unwrap();
        assert_eq!(stats.damage, 0.0);
        assert!(!stats.element_killed);
        vec_approx_eq(state_d.stress.vector(), state_b.stress.vector(), 1e-9);
        approx_eq(state_d.internal_values[0], state_b.internal_values[0], 1e-9);
        approx_eq(state_d.internal_values[1], 0.0, 1e-15);
        approx_eq(state_d.energy, state_b.energy, 1e-12);
        approx_eq(state_d.plastic_work, state_b.plastic_work, 1e-12);
        mat_approx_eq(dd_d.matrix(), dd_b.matrix(), 1e-8);
    }
    assert!(state_b.internal_values[0] > 200.0);
    Ok(())
}
