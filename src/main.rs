// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use record_pipeline::config::{load_and_validate_config, load_config, validate_config};
use record_pipeline::engine::StreamRunner;
use record_pipeline::errors::ConfigError;
use record_pipeline::generator::RecordGenerator;
use record_pipeline::observability::messages::pipeline::{ConfigLoaded, ConfigValidationFailed};
use record_pipeline::records::RecordKind;

#[derive(Parser, Debug)]
#[command(
    name = "record-pipeline",
    version,
    about = "Validate, enrich and aggregate streams of JSON records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print synthetic records as JSON lines
    Generate {
        /// user_event, sensor_reading or transaction (topic names also work)
        #[arg(short, long)]
        kind: RecordKind,
        /// Number of records; 0 keeps going until interrupted
        #[arg(short, long, default_value_t = 10)]
        count: u64,
        /// Pause between records
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a pipeline over JSON lines and print summaries as JSON lines
    Process {
        #[arg(short, long)]
        config: PathBuf,
        /// Input file; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Load and validate a pipeline config
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a clean JSON-lines stream.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            kind,
            count,
            interval_ms,
            seed,
        } => generate(kind, count, Duration::from_millis(interval_ms), seed).await,
        Commands::Process { config, input } => process(config, input).await,
        Commands::Check { config } => check(config),
    }
}

async fn generate(
    kind: RecordKind,
    count: u64,
    interval: Duration,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut generator = match seed {
        Some(seed) => RecordGenerator::seeded(seed),
        None => RecordGenerator::from_entropy(),
    };
    let mut stdout = tokio::io::stdout();
    tracing::info!("Generating {} records on topic '{}'", kind, kind.topic());

    let mut produced: u64 = 0;
    while count == 0 || produced < count {
        let mut line = serde_json::to_vec(&generator.next(kind))?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        produced += 1;
        if !interval.is_zero() {
            stdout.flush().await?;
            tokio::time::sleep(interval).await;
        }
    }

    stdout.flush().await?;
    Ok(())
}

async fn process(config_path: PathBuf, input: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_and_validate_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    tracing::info!(
        "{}",
        ConfigLoaded {
            path: &config_path.display().to_string(),
            kind: config.kind.as_str(),
            processor_count: config.processors.len(),
        }
    );

    let mut runner = StreamRunner::from_config(&config)?;
    let stdout = tokio::io::stdout();

    let stats = match input {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            runner.run(BufReader::new(file), stdout).await?
        }
        None => runner.run(BufReader::new(tokio::io::stdin()), stdout).await?,
    };

    tracing::info!("Run stats: {}", serde_json::to_string(&stats)?);
    Ok(())
}

fn check(config_path: PathBuf) -> anyhow::Result<()> {
    let path = config_path.display().to_string();
    let config = load_config(&config_path).with_context(|| format!("loading {}", path))?;

    if let Err(errors) = validate_config(&config) {
        tracing::error!(
            "{}",
            ConfigValidationFailed {
                path: &path,
                error_count: errors.len(),
            }
        );
        return Err(ConfigError::Invalid(errors).into());
    }

    tracing::info!(
        "{}",
        ConfigLoaded {
            path: &path,
            kind: config.kind.as_str(),
            processor_count: config.processors.len(),
        }
    );
    println!("{}: ok", path);
    Ok(())
}
