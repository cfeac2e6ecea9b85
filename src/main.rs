use std::{fs, path::PathBuf, sync::mpsc, time::Duration};

use clap::Parser;
use tracing::info;

use lifegrid::{
    centered_origin, config::DEFAULT_TICK_INTERVAL, parse_pattern, parse_seed, seed::DEFAULT_SEED,
    Config, Result, Sim, SimCmd, Simulation, View,
};

#[derive(Parser)]
#[command(name = "lifegrid")]
#[command(version)]
#[command(about = "Watch Conway's game of life evolve on a bounded board")]
struct Cli {
    /// Board width in cells
    #[arg(long, default_value_t = lifegrid::grid::DEFAULT_WIDTH)]
    width: i32,

    /// Board height in cells
    #[arg(long, default_value_t = lifegrid::grid::DEFAULT_HEIGHT)]
    height: i32,

    /// Milliseconds between two generations while running
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL.as_millis() as u64)]
    tick_interval_ms: u64,

    /// Seed of the random starting population
    #[arg(long, default_value_t = DEFAULT_SEED, value_parser = |s: &str| parse_seed(s))]
    seed: u64,

    /// `#`-art file to start from instead of a random population
    pattern: Option<PathBuf>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            width: cli.width,
            height: cli.height,
            tick_interval: Duration::from_millis(cli.tick_interval_ms),
            rng_seed: cli.seed,
            pattern: cli.pattern,
        }
    }
}

fn build_simulation(config: &Config) -> Result<Simulation> {
    let grid = config.grid()?;
    match &config.pattern {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let live_set = parse_pattern(&grid, &text, centered_origin(&grid, &text))?;
            info!(path = %path.display(), alive = live_set.len(), "loaded pattern");
            Ok(Simulation::new(grid, live_set))
        }
        None => Ok(Simulation::seeded(grid, config.rng_seed)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lifegrid=warn")),
        )
        .init();

    let config = Config::from(Cli::parse());
    let simulation = build_simulation(&config)?;
    let grid = *simulation.grid();
    info!(width = grid.width(), height = grid.height(), seed = config.rng_seed, "starting");

    let (frames_sender, frames) = mpsc::channel();
    let sim = Sim::spawn(simulation, config.tick_interval, frames_sender);
    let handle = sim.handle();
    let view = View::spawn(sim.handle(), frames, grid, config.rng_seed);

    let result = view.join();
    // the view only stops the simulation on a clean exit
    let _ = handle.send(SimCmd::Exit);
    sim.join();
    result
}
