mod actors;
mod aggregation;
mod config;
mod engine;
mod features;
mod models;
mod output;
mod pipeline;
mod storage;
mod types;

use std::fs::File;
use std::io::{stderr, stdout, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::PipelineConfig;
use crate::engine::AsyncEngine;
use crate::output::{write_enriched, write_unprocessable};
use crate::pipeline::Enrichment;
use crate::storage::PartitionStorage;

/// Enriches raw transactions with AML risk features and a rolling per-sender count.
#[derive(Debug, Parser)]
#[command(name = "aml-enrichment-engine", version)]
struct Cli {
    /// Input CSV with SAML-D columns.
    input: PathBuf,

    /// Enriched CSV destination (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Destination for rows that could not be partitioned (logged when omitted).
    #[arg(short, long)]
    rejected: Option<PathBuf>,

    /// JSON policy file overriding the default jurisdictions, bounds and window.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rows buffered between the CSV reader and the partition router.
    #[arg(short, long, default_value_t = 256)]
    backpressure: usize,

    /// One of error, warn, info, debug, trace.
    #[arg(short, long, default_value = "error")]
    log_level: String
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default()
    };

    let storage = Arc::new(PartitionStorage::new());
    let engine = AsyncEngine::new(&config, storage).with_backpressure(cli.backpressure);

    let timer = Instant::now();
    let enrichment = engine.run(&cli.input).await?;
    let duration = timer.elapsed();

    info!(
        "Enriched [{}] transactions in: {duration:?} ([{}] unprocessable)",
        enrichment.records.len(),
        enrichment.unprocessable.len()
    );

    write_results(&cli, &enrichment)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout may carry the enriched CSV, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results(cli: &Cli, enrichment: &Enrichment) -> Result<()> {
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Could not create output file {}", path.display()))?;
            write_enriched(BufWriter::new(file), &enrichment.records)?;
        }
        None => write_enriched(BufWriter::new(stdout().lock()), &enrichment.records)?
    }

    match &cli.rejected {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Could not create rejected rows file {}", path.display()))?;
            write_unprocessable(BufWriter::new(file), &enrichment.unprocessable)?;
        }
        None if !enrichment.unprocessable.is_empty() => {
            error!("[{}] unprocessable rows were not written, pass --rejected to keep them", enrichment.unprocessable.len());
        }
        None => {}
    }

    Ok(())
}
