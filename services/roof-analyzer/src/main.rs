//! Roof analyzer CLI.
//!
//! Reads a JSON job, runs roof extraction or panel layout, and writes the
//! JSON result to stdout or a file. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roof_analyzer::{run_extract, run_pack, AnalyzerConfig};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "roof-analyzer")]
#[command(about = "Extract roof outlines from solar rasters and lay out panels")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// YAML configuration file (default: environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract roof regions from a raster JSON file
    Extract {
        /// Raster JSON (width, height, bands, bounds)
        input: PathBuf,
    },

    /// Lay out panels for a packing job JSON file
    Pack {
        /// Packing job JSON ({"requests": [...]})
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level, args.json_logs)?;

    let config = AnalyzerConfig::load(args.config.as_deref())?;
    info!(config = ?args.config, "Loaded configuration");

    match &args.command {
        Command::Extract { input } => {
            let output = run_extract(&read_input(input)?, &config)?;
            info!(
                regions = output.regions.len(),
                skipped = output.skipped.len(),
                "Extraction finished"
            );
            write_output(&output, args.output.as_deref())
        }
        Command::Pack { input } => {
            let report = run_pack(&read_input(input)?, &config)?;
            info!(
                roofs = report.roofs.len(),
                panels = report.roofs.iter().map(|r| r.panel_count).sum::<usize>(),
                "Packing finished"
            );
            write_output(&report, args.output.as_deref())
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read input from {:?}", path))
}

fn write_output<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    match path {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
            info!(path = %path.display(), "Wrote result");
        }
        None => println!("{}", json),
    }
    Ok(())
}
