//! `haul` — trucks shuttling between storage A and storage B through a
//! single-lane crossing controlled by a traffic light.
//!
//! Every truck loads at A, drives to the light, waits while it is red, drives
//! on to B, unloads and comes back the same way, for a configured number of
//! round trips.  The run narrates each truck's progress, then prints one
//! result line per truck that finished before the horizon.
//!
//! Run with:
//!   cargo run -p haul --release -- --seed 42
//!   cargo run -p haul --release -- --config demos/haul/reference.json -o ./output --quiet

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cs_core::{LoadTimeSampling, SimConfig};
use cs_model::SimBuilder;
use cs_output::{ConsoleReporter, CsvWriter, SimOutputObserver, print_summary};

/// Signalled-crossing haulage simulation.
///
/// Deterministic for a given seed.  Without `--seed` (and without a seed in
/// the config file) a random seed is drawn and reported.
#[derive(Parser, Debug)]
#[command(name = "haul")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON configuration file; missing fields take their defaults
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of trucks
    #[arg(short = 'n', long)]
    trucks: Option<u32>,

    /// Simulation horizon in minutes
    #[arg(long)]
    horizon: Option<f64>,

    /// Round trips each truck has to complete
    #[arg(long)]
    round_trips: Option<u32>,

    /// Draw load times from the continuous range instead of whole minutes
    #[arg(long)]
    continuous: bool,

    /// Write events.csv and results.csv into this directory
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// Suppress the per-event narration
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Also narrate traffic light transitions
    #[arg(long)]
    show_signal: bool,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "cs_engine=debug")
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;
    let mut builder = SimBuilder::new(config);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let mut sim = builder.build().context("building simulation")?;

    info!(
        trucks = sim.config().truck_count,
        horizon = sim.config().simulation_horizon,
        seed = sim.seed(),
        "starting run"
    );

    let mut console = (!args.quiet).then(|| ConsoleReporter::stdout().with_signal(args.show_signal));
    let mut files = match &args.output_dir {
        Some(dir) => Some(open_csv(dir)?),
        None => None,
    };

    let t_run = Instant::now();
    let stats = sim.run(&mut (&mut console, &mut files))?;
    let elapsed = t_run.elapsed();

    if let Some(e) = console.as_mut().and_then(ConsoleReporter::take_error) {
        return Err(e).context("writing narration");
    }

    let report = sim.into_report();
    if let Some(obs) = files.as_mut() {
        obs.finish(&report).context("writing CSV output")?;
    }

    print_summary(&mut io::stdout().lock(), &report)?;

    let summary = report.results.summary();
    info!(
        delivered = summary.delivered,
        abandoned = report.abandoned(),
        total_stops = summary.total_stops,
        mean_total_time = summary.mean_total_time.unwrap_or(0.0),
        signal_cycles = report.signal_cycles,
        wakeups = stats.delivered,
        elapsed_ms = elapsed.as_millis() as u64,
        "run complete"
    );
    eprintln!("seed: {}", report.seed);

    Ok(())
}

/// Defaults, overlaid by the config file, overlaid by command-line flags.
fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(n) = args.trucks {
        config.truck_count = n;
    }
    if let Some(h) = args.horizon {
        config.simulation_horizon = h;
    }
    if let Some(r) = args.round_trips {
        config.round_trips = r;
    }
    if args.continuous {
        config.load_time_sampling = LoadTimeSampling::Continuous;
    }
    Ok(config)
}

fn open_csv(dir: &Path) -> Result<SimOutputObserver<CsvWriter>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer = CsvWriter::new(dir).with_context(|| format!("opening CSV files in {}", dir.display()))?;
    Ok(SimOutputObserver::new(writer))
}
