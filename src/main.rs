use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use log::LevelFilter;
use rand::SeedableRng;
use rand::rngs::StdRng;

use stable_fluids::conditions;
use stable_fluids::emitters::place_random_emitters;
use stable_fluids::visualization::run_simulation;
use stable_fluids::{FluidError, FluidSolver};

const DEFAULT_CONFIG: &str = "fluid.yaml";

/// Value following `flag` on the command line, e.g. `--config sim.yaml`.
fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn init_logging(level: Option<&str>) {
    let log_level = level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(buf, "[{} {:5}] {}", buf.timestamp_millis(), record.level(), record.args())
        })
        .init();
    log::debug!("logger initialized (level: {log_level})");
}

fn run() -> Result<(), FluidError> {
    let path = arg_value("--config").map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let config = match arg_value("--config") {
        Some(_) => conditions::load_strict(&path)?,
        None => conditions::load(&path),
    };

    let mut solver = FluidSolver::new(config.simulation.clone())?;

    let emitters = match config.emitters.seed {
        Some(seed) => place_random_emitters(&config.emitters, solver.n(), &mut StdRng::seed_from_u64(seed)),
        None => place_random_emitters(&config.emitters, solver.n(), &mut rand::rng()),
    };
    for e in &emitters {
        log::debug!("emitter at ({}, {}) dye {:?} force {:?}", e.i, e.j, e.dye, e.force);
    }

    let start = Instant::now();
    run_simulation(&mut solver, &config.display, &emitters)?;
    log::info!("simulation ran for {:?}", start.elapsed());
    Ok(())
}

fn main() {
    init_logging(arg_value("--log").as_deref());
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
