use std::{
    io::{stdout, BufWriter, Write},
    num::NonZeroUsize,
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use station_scan::{aggregate_file, engine, write_report, ScanOptions};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(version, about = "Per-station min/mean/max over a measurements file")]
struct Cli {
    /// Path to the measurements file
    #[arg(default_value = "measurements.txt")]
    path: PathBuf,

    /// Number of scan workers (defaults to, and capped at, the available parallelism)
    #[arg(short, long, default_value_t = default_workers())]
    workers: NonZeroUsize,

    /// Distinct station names each worker's table is sized for
    #[arg(short, long, default_value_t = default_stations())]
    stations: NonZeroUsize,
}

fn default_workers() -> NonZeroUsize {
    NonZeroUsize::new(engine::default_workers()).unwrap_or(NonZeroUsize::MIN)
}

fn default_stations() -> NonZeroUsize {
    NonZeroUsize::new(engine::DEFAULT_EXPECTED_STATIONS).unwrap_or(NonZeroUsize::MIN)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    let cli = Cli::parse();
    let start = Instant::now();

    let options = ScanOptions {
        workers: cli.workers.get(),
        expected_stations: cli.stations.get(),
    };
    let result = aggregate_file(&cli.path, &options)?;
    let stations = result.len();

    let mut lock = BufWriter::new(stdout().lock());
    write_report(result, &mut lock).context("couldn't write result")?;
    lock.flush()?;

    info!(
        stations,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}
