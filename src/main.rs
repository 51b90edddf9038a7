//! # Catch Patterns Command Line Entry Point
//!
//! Reads a trip log and an optional spot directory (JSON), builds the
//! pattern report and prints it as JSON for the presentation layer.

use anyhow::Context;
use catch_patterns::config::{Config, DEFAULT_CONFIG_FILE};
use catch_patterns::report::PatternReport;
use catch_patterns::spots::Spot;
use catch_patterns::timeout::with_timeout_ms;
use catch_patterns::trip::TripRecord;
use clap::Parser;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "catch-patterns", version, about = "Find the conditions and spots that catch fish")]
struct Cli {
    /// Trip log: a JSON array of trip objects
    #[arg(long)]
    trips: PathBuf,

    /// Spot directory: a JSON array of {id, name} objects
    #[arg(long)]
    spots: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

/// Read and parse a JSON file, bounded by the lookup deadline.
async fn load_json<T: DeserializeOwned>(path: PathBuf, timeout_ms: u64) -> anyhow::Result<T> {
    let label = format!("Loading {}", path.display());
    let read_path = path.clone();
    let bytes = with_timeout_ms(
        async move { tokio::fs::read(read_path).await },
        timeout_ms,
        &label,
    )
    .await
    .with_context(|| format!("failed to read {}", path.display()))?;

    serde_json::from_slice(&bytes).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_from_path(&cli.config);
    let timeout_ms = config.lookup.timeout_ms;

    let rt = tokio::runtime::Runtime::new()?;
    let (trips, spots) = rt.block_on(async {
        let trips: Vec<TripRecord> = load_json(cli.trips.clone(), timeout_ms).await?;
        let spots: Vec<Spot> = match cli.spots.clone() {
            Some(path) => load_json(path, timeout_ms).await?,
            None => Vec::new(),
        };
        anyhow::Ok((trips, spots))
    })?;
    info!(trips = trips.len(), spots = spots.len(), "inputs loaded");

    let report = PatternReport::build(&trips, &spots, &config.analysis);
    let output = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    Ok(())
}
