//! sigbatch CLI: run the rolling-mean signal job once.
//!
//! Reads a config file and a CSV dataset, writes the metrics record to
//! `--output`, echoes it to stdout, and logs milestones to `--log-file`.
//! Exit code 0 on success, 1 on any validation or execution error.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use sigbatch_runner::{render_record, run_job, write_record, write_signals_csv, JobInputs};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "sigbatch",
    about = "sigbatch: rolling-mean signal batch job"
)]
struct Cli {
    /// Input CSV file (must have a `close` column).
    #[arg(long)]
    input: PathBuf,

    /// Run config (YAML by default; `.toml` and `.json` by extension).
    #[arg(long)]
    config: PathBuf,

    /// Output metrics JSON.
    #[arg(long)]
    output: PathBuf,

    /// Log file; appended to.
    #[arg(long)]
    log_file: PathBuf,

    /// Also write the input table with `rolling_mean` and `signal` columns.
    #[arg(long)]
    signals: Option<PathBuf>,
}

fn main() -> ExitCode {
    let started = Instant::now();
    let cli = Cli::parse();

    match run(cli, started) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, started: Instant) -> Result<ExitCode> {
    init_tracing(&cli.log_file)?;

    let inputs = JobInputs::new(&cli.config, &cli.input);
    let outcome = run_job(&inputs, started);

    if let (Some(path), Some(artifacts)) = (&cli.signals, &outcome.artifacts) {
        write_signals_csv(path, &artifacts.dataset, &artifacts.frame)?;
        tracing::info!("Signals written to {}", path.display());
    }

    write_record(&cli.output, &outcome.record)?;
    println!("{}", render_record(&outcome.record)?);

    Ok(if outcome.record.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S,%3f".to_string()));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize tracing: {err}"))
}
