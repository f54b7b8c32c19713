//! Pipeline simulator CLI.
//!
//! This binary runs a binary instruction trace through the superscalar in-order
//! pipeline model. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON config file, then flag overrides.
//! 2. **Simulation:** Ticks the pipeline until the last instruction retires.
//! 3. **Reporting:** Prints the statistics report, or the statistics as JSON.
//!
//! Log output goes to stderr and is filtered with `RUST_LOG`
//! (e.g. `RUST_LOG=pipesim_core=debug` together with `--trace-pipeline`).

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use pipesim_core::Simulator;
use pipesim_core::common::SimError;
use pipesim_core::config::{BranchPredictor, Config};
use pipesim_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Trace-driven superscalar in-order pipeline simulator",
    long_about = "Run a binary instruction trace through a cycle-accurate five-stage in-order pipeline.\n\nExamples:\n  sim run --trace gcc.trace --width 4 --exe-fwd --mem-fwd --bpred gshare\n  sim run --trace gcc.trace --config configs/wide.json --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate one trace and print the statistics.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Binary trace file (24-byte records).
    #[arg(short, long)]
    trace: PathBuf,

    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pipeline width (instructions per cycle).
    #[arg(short, long)]
    width: Option<usize>,

    /// Enable forwarding from the Execute latch.
    #[arg(long)]
    exe_fwd: bool,

    /// Enable forwarding from the Memory latch.
    #[arg(long)]
    mem_fwd: bool,

    /// Branch predictor policy.
    #[arg(long, value_enum)]
    bpred: Option<BpredArg>,

    /// GShare global history length in bits.
    #[arg(long)]
    history_bits: Option<usize>,

    /// Fail if the pipeline has not halted after this many cycles.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Log the pipeline occupancy grid every cycle (debug level).
    #[arg(long)]
    trace_pipeline: bool,

    /// Print statistics as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Limit the text report to these sections (repeatable or comma-separated).
    #[arg(
        long = "stats",
        value_name = "SECTION",
        value_delimiter = ',',
        value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
    )]
    sections: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BpredArg {
    None,
    AlwaysTaken,
    Gshare,
}

impl From<BpredArg> for BranchPredictor {
    fn from(arg: BpredArg) -> Self {
        match arg {
            BpredArg::None => Self::None,
            BpredArg::AlwaysTaken => Self::AlwaysTaken,
            BpredArg::Gshare => Self::GShare,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => cmd_run(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Builds the configuration: defaults or the config file, then flag overrides.
fn build_config(args: &RunArgs) -> Result<Config, SimError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let pipe = &mut config.pipeline;
    if let Some(width) = args.width {
        pipe.width = width;
    }
    pipe.enable_exe_fwd |= args.exe_fwd;
    pipe.enable_mem_fwd |= args.mem_fwd;
    if let Some(bpred) = args.bpred {
        pipe.branch_predictor = bpred.into();
    }
    if let Some(bits) = args.history_bits {
        pipe.history_bits = bits;
    }

    config.general.trace_pipeline |= args.trace_pipeline;
    if args.max_cycles.is_some() {
        config.general.max_cycles = args.max_cycles;
    }

    config.validate()?;
    Ok(config)
}

/// Runs the trace to completion and prints the statistics.
fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = build_config(args)?;
    tracing::debug!(pipeline = ?config.pipeline, general = ?config.general, "configuration resolved");
    let mut sim = Simulator::from_trace_file(&config, &args.trace)?;
    let stats = sim.run()?;

    if args.json {
        let json = serde_json::to_string_pretty(&stats)?;
        println!("{json}");
    } else {
        println!("Trace: {}", args.trace.display());
        println!(
            "  Width: {}  Forwarding: exe={} mem={}  Predictor: {:?}",
            config.pipeline.width,
            config.pipeline.enable_exe_fwd,
            config.pipeline.enable_mem_fwd,
            config.pipeline.branch_predictor
        );
        println!();
        stats.print_sections(&args.sections);
    }
    Ok(())
}
