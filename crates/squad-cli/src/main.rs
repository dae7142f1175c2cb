//! Squadscan CLI
//!
//! The `squadscan` command rebuilds a fantasy squad from OCR detections.
//!
//! ## Commands
//!
//! - `process`: Reconstruct a squad from a detection dump
//! - `validate`: Check a manually corrected selection by player id
//! - `filter`: Show which detections survive the candidate filter
//!
//! Logs go to stderr; results are printed to stdout as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};

use squad_core::{
    filter_candidates, validate_selection, CandidateName, ConfidenceFloor, JsonDetectionsEngine,
    OcrEngine, OcrResult, Pipeline, PipelineConfig, SelectionReport, SquadRules,
};
use squad_directory::{JsonFileDirectory, PlayerDirectory};

#[derive(Parser)]
#[command(name = "squadscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rebuild a fantasy squad from screenshot OCR output", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct a squad from a JSON detection dump
    Process {
        /// Detection dump: [{"text": "...", "confidence": 0.9}, ...]
        #[arg(short, long)]
        detections: PathBuf,

        /// Player directory (bootstrap document or bare array of players)
        #[arg(long)]
        directory: PathBuf,

        /// Minimum fuzzy similarity (0-100) to accept a match
        #[arg(long)]
        threshold: Option<f64>,

        /// Drop detections below this OCR confidence
        #[arg(long)]
        min_confidence: Option<f32>,
    },

    /// Validate a corrected selection given as player ids
    Validate {
        /// Player directory (bootstrap document or bare array of players)
        #[arg(long)]
        directory: PathBuf,

        /// Comma-separated player ids of the full squad
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u32>,

        /// Comma-separated player ids of the starting eleven
        #[arg(long, value_delimiter = ',')]
        starters: Option<Vec<u32>>,
    },

    /// Show the candidates that survive filtering
    Filter {
        /// Detection dump: [{"text": "...", "confidence": 0.9}, ...]
        #[arg(short, long)]
        detections: PathBuf,

        /// Drop detections below this OCR confidence
        #[arg(long)]
        min_confidence: Option<f32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    squad_core::init_tracing(cli.json, level);

    let config = PipelineConfig::from_env().context("Invalid pipeline configuration")?;

    match cli.command {
        Commands::Process {
            detections,
            directory,
            threshold,
            min_confidence,
        } => cmd_process(config, &detections, &directory, threshold, min_confidence).await,
        Commands::Validate {
            directory,
            ids,
            starters,
        } => cmd_validate(&directory, &ids, starters.as_deref()).await,
        Commands::Filter {
            detections,
            min_confidence,
        } => cmd_filter(config, &detections, min_confidence).await,
    }
}

// ---------------------------------------------------------------------------
// process
// ---------------------------------------------------------------------------

async fn cmd_process(
    config: PipelineConfig,
    detections: &Path,
    directory: &Path,
    threshold: Option<f64>,
    min_confidence: Option<f32>,
) -> Result<()> {
    let result = run_process(config, detections, directory, threshold, min_confidence).await?;
    print_json(&result)?;

    if !result.success {
        anyhow::bail!("No players matched");
    }
    Ok(())
}

async fn run_process(
    mut config: PipelineConfig,
    detections: &Path,
    directory: &Path,
    threshold: Option<f64>,
    min_confidence: Option<f32>,
) -> Result<OcrResult> {
    if let Some(threshold) = threshold {
        config = config.with_fuzzy_threshold(threshold);
    }
    if let Some(min_confidence) = min_confidence {
        config = config.with_ocr_confidence_threshold(min_confidence);
    }
    config.validate().context("Invalid command-line override")?;

    let payload = read_file(detections).await?;
    let ocr = ConfidenceFloor::new(JsonDetectionsEngine::new(), config.ocr_confidence_threshold);
    let directory: Arc<dyn PlayerDirectory> = Arc::new(JsonFileDirectory::new(directory));

    info!(
        detections = %detections.display(),
        threshold = config.fuzzy_threshold,
        "Processing detection dump"
    );
    let pipeline = Pipeline::new(Arc::new(ocr), directory, config);
    Ok(pipeline.process(&payload).await)
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

async fn cmd_validate(directory: &Path, ids: &[u32], starters: Option<&[u32]>) -> Result<()> {
    let report = run_validate(directory, ids, starters).await?;
    print_json(&report)
}

async fn run_validate(
    directory: &Path,
    ids: &[u32],
    starters: Option<&[u32]>,
) -> Result<SelectionReport> {
    let snapshot = JsonFileDirectory::new(directory)
        .snapshot()
        .await
        .with_context(|| format!("Failed to load player directory {:?}", directory))?;

    let report = validate_selection(ids, starters, &snapshot, &SquadRules::standard())
        .context("Selection rejected")?;
    Ok(report)
}

// ---------------------------------------------------------------------------
// filter
// ---------------------------------------------------------------------------

async fn cmd_filter(
    config: PipelineConfig,
    detections: &Path,
    min_confidence: Option<f32>,
) -> Result<()> {
    let candidates = run_filter(config, detections, min_confidence).await?;
    if candidates.is_empty() {
        info!("No detections survived the filter");
    }
    print_json(&candidates)
}

async fn run_filter(
    config: PipelineConfig,
    detections: &Path,
    min_confidence: Option<f32>,
) -> Result<Vec<CandidateName>> {
    let config = match min_confidence {
        Some(min_confidence) => config.with_ocr_confidence_threshold(min_confidence),
        None => config,
    };
    config.validate().context("Invalid command-line override")?;

    let payload = read_file(detections).await?;
    let raw = ConfidenceFloor::new(JsonDetectionsEngine::new(), config.ocr_confidence_threshold)
        .recognize(&payload)
        .await
        .with_context(|| format!("Failed to decode detections {:?}", detections))?;
    Ok(filter_candidates(&raw))
}

// ---------------------------------------------------------------------------
// helpers
// ---------------------------------------------------------------------------

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {:?}", path))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}
