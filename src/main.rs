// src/main.rs - CLI runner: load a config, drive the clock, trace ticks

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use quesim::config::{self, RunConfig};
use quesim::simulation::Simulation;

#[derive(Debug, Parser)]
#[command(name = "quesim", about = "Tick-driven closed queueing network simulator")]
struct Args {
    /// Path to the run configuration.
    #[arg(long, default_value = "quesim.toml")]
    config: PathBuf,

    /// Override the configured number of ticks.
    #[arg(long)]
    ticks: Option<u64>,

    /// Write one JSON record per tick to this file.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Enable debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = if args.config.exists() {
        tracing::info!(path = %args.config.display(), "loading configuration");
        config::load_config(&args.config)?
    } else {
        tracing::warn!(
            path = %args.config.display(),
            "config file not found, running with defaults"
        );
        RunConfig::default()
    };

    let simulation = config.simulation;
    let max_ticks = args.ticks.unwrap_or(simulation.max_ticks);

    let mut trace_file = match &args.trace {
        Some(path) => Some(File::create(path)?),
        None => None,
    };

    let mut sim = Simulation::new();
    sim.start_simulation(
        simulation.queue_count,
        simulation.processor_count,
        simulation.connection_mode,
    )?;

    for _ in 0..max_ticks {
        if !sim.is_running() {
            break;
        }
        sim.step_simulation()?;

        if let Some(file) = trace_file.as_mut() {
            let record = serde_json::to_string(&sim.snapshot())?;
            writeln!(file, "{record}")?;
        }
    }

    let failed = sim.failed_queues();
    if failed.is_empty() {
        sim.stop_simulation();
        tracing::info!(ticks = sim.current_time(), "run complete");
    } else {
        tracing::info!(
            ticks = sim.current_time(),
            failed_queues = ?failed,
            "run halted by queue overflow"
        );
    }

    Ok(())
}
