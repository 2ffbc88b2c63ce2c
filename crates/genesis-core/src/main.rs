//! Genesis headless runner
//!
//! Runs the two-agent simulation for a fixed number of ticks, logging progress
//! and optionally writing periodic JSONL snapshots.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use genesis_core::output::SnapshotWriter;
use genesis_core::{Config, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "genesis")]
#[command(about = "Two chemically driven agents, one predator, four seasons")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 2000)]
    ticks: u64,

    /// Tuning file (defaults to tuning.toml when present)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Interval between world snapshots (in ticks)
    #[arg(long, default_value_t = 100)]
    snapshot_interval: u64,

    /// JSONL file to append snapshots to
    #[arg(long)]
    output: Option<PathBuf>,

    /// Interval between progress log lines (in ticks)
    #[arg(long, default_value_t = 100)]
    log_interval: u64,

    /// Log filter, e.g. "debug" or "genesis_core=trace" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let config = match &args.tuning {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };

    tracing::info!(
        seed = args.seed,
        ticks = args.ticks,
        grid_size = config.world.grid_size,
        predator = config.predator.enabled,
        "Starting simulation"
    );

    let mut sim = Simulation::new(config, args.seed);
    let mut writer = match &args.output {
        Some(path) => SnapshotWriter::create(path, args.snapshot_interval)?,
        None => SnapshotWriter::null(args.snapshot_interval),
    };
    writer.record(&sim)?;

    let mut deaths = 0u64;
    for _ in 0..args.ticks {
        let events = sim.step();
        deaths += events.iter().filter(|e| e.died).count() as u64;
        writer.record(&sim)?;

        let tick = sim.tick();
        if args.log_interval > 0 && tick % args.log_interval == 0 {
            let grid = sim.grid();
            let energy: Vec<f64> = sim.agents().iter().map(|a| a.energy).collect();
            tracing::info!(
                tick,
                season = grid.season().name(),
                total_food = grid.total_food(),
                blue_energy = energy[0],
                red_energy = energy[1],
                "Progress"
            );
        }
    }
    writer.flush()?;

    let generations: Vec<u32> = sim.agents().iter().map(|a| a.generation).collect();
    tracing::info!(
        ticks = sim.tick(),
        deaths,
        blue_generation = generations[0],
        red_generation = generations[1],
        snapshots = writer.written(),
        "Simulation complete"
    );

    Ok(())
}
