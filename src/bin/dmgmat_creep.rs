use dmgmat::base::SampleParams;
use dmgmat::prelude::*;
use dmgmat::StrError;
use russell_tensor::{Mandel, Tensor2, Tensor4};
use std::fs;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "dmgmat_creep",
    about = "Runs a creep test of a damaged material point under constant uniaxial strain"
)]
struct Options {
    /// JSON file with the material parameters (ParamDamagedSolid)
    #[structopt(short, long)]
    param: Option<String>,

    /// Axial strain
    #[structopt(short, long, default_value = "0.001")]
    strain: f64,

    /// Time increment
    #[structopt(long, default_value = "1.0")]
    dt: f64,

    /// Number of time steps
    #[structopt(short, long, default_value = "100")]
    n_steps: usize,

    /// Temperature
    #[structopt(long, default_value = "300.0")]
    temperature: f64,
}

fn main() -> Result<(), StrError> {
    // logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // parse options
    let options = Options::from_args();

    // parameters
    let param = match &options.param {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|_| "cannot read the parameters file")?;
            serde_json::from_str::<ParamDamagedSolid>(&json).map_err(|_| "cannot parse the parameters file")?
        }
        None => SampleParams::param_damaged_creep(),
    };
    let model = ScalarDamage::new(&param)?;
    let (young, poisson) = param.base.young_poisson();
    let settings = model.settings();
    println!(
        "E = {}, ν = {}, tol_abs = {:e}, element deletion = {}",
        young, poisson, settings.newton.tol_abs, settings.element_kill.enabled
    );

    // initial state
    let mut state = LocalState::new(model.n_internal_values());
    state.temperature = options.temperature;
    model.initialize_internal_values(&mut state)?;
    let mut dd = Tensor4::new(Mandel::Symmetric);
    let mut strain = Tensor2::new(Mandel::Symmetric);
    strain.vector_mut()[0] = options.strain;

    // time march
    println!("{:>6} {:>14} {:>14} {:>14} {:>6}", "step", "t", "d", "σ11", "iter");
    for step in 1..=options.n_steps {
        let time_new = state.time + options.dt;
        let stats = match model.update_stress(&mut state, &mut dd, &strain, options.temperature, time_new) {
            Ok(stats) => stats,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                return Err("stress update failed");
            }
        };
        println!(
            "{:>6} {:>14.6e} {:>14.6e} {:>14.6e} {:>6}",
            step,
            state.time,
            stats.damage,
            state.stress.vector()[0],
            stats.n_iterations
        );
        if stats.element_killed {
            println!("element killed at t = {:e}", state.time);
            break;
        }
    }
    Ok(())
}
