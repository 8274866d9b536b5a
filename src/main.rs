use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use life_grid::{FlatOrder, JsonLinesSink, Simulation, SimulationConfig, TerminationReason};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "life-grid",
    version,
    about = "Evolve a Game of Life grid and write one JSON frame per time step"
)]
struct Cli {
    /// JSON run configuration (time_end, periodic, rows, cols, cells).
    config: PathBuf,

    /// Result file; previous contents are replaced. Frames go to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Count neighbors with the row-parallel kernel.
    #[arg(long)]
    parallel: bool,

    /// Write frames in row-major order instead of column-major.
    #[arg(long)]
    row_major: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = SimulationConfig::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let initial = config.validate().context("invalid configuration")?;

    let mut options = config.driver_options();
    options.parallel |= cli.parallel;

    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl-C handler")?;

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            info!(path = %path.display(), "writing results");
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    let order = if cli.row_major {
        FlatOrder::RowMajor
    } else {
        FlatOrder::ColumnMajor
    };
    let mut sink = JsonLinesSink::with_order(writer, order);

    let mut simulation = Simulation::new(initial, config.boundary_mode(), options)?;
    let reason = simulation.run_with(config.time_end, &mut sink, &mut || {
        cancelled.load(Ordering::SeqCst)
    })?;

    let state = simulation.state();
    match reason {
        TerminationReason::Cancelled => warn!(
            time = state.time,
            "cancel requested; results up to this step were kept"
        ),
        TerminationReason::AllDead => info!(time = state.time, "all cells are dead"),
        TerminationReason::TimeLimit => {}
    }
    info!(
        %reason,
        time = state.time,
        alive = state.grid.alive_count(),
        frames = sink.frames_written(),
        "simulation finished"
    );

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
