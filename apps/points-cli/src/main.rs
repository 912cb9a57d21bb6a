//! # points
//!
//! Command line front-end for the receipt scoring rules.
//!
//! ## Usage
//! ```bash
//! # Score a receipt file
//! points score receipts/target.json
//!
//! # Score from stdin, JSON output
//! cat receipt.json | points score --format json
//!
//! # Only the number
//! points score receipt.json --total-only
//! ```
//!
//! ## Environment
//! - `RUST_LOG` / `POINTS_LOG` - log filter (logs go to stderr)
//! - `POINTS_OUTPUT_FORMAT` - `text` (default) or `json`
//! - `POINTS_TOTAL_ONLY` - print only the total

mod config;
mod output;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use points_core::ReceiptPayload;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "points",
    about = "Score purchase receipts with the loyalty points rules",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a receipt JSON document and print the points breakdown
    Score(ScoreArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Receipt JSON file; reads stdin when omitted or `-`
    path: Option<PathBuf>,

    /// Output format (overrides POINTS_OUTPUT_FORMAT)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Print only the point total
    #[arg(long)]
    total_only: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.log_filter)?;

    debug!(?config, "Configuration loaded");

    match cli.command {
        Command::Score(args) => score(args, &config),
    }
}

fn score(args: ScoreArgs, config: &CliConfig) -> Result<()> {
    let source = args.path.as_deref().filter(|p| *p != Path::new("-"));
    let json = read_input(source)?;

    let record = ReceiptPayload::parse_record(&json).context("Invalid receipt")?;
    let breakdown = points_core::calculate(&record);

    info!(
        retailer = %record.retailer,
        items = record.item_count(),
        points = breakdown.total_points,
        "Receipt scored"
    );

    let format = args.format.unwrap_or(config.output_format);
    let total_only = args.total_only || config.total_only;
    let rendered = output::render(&breakdown, format, total_only)
        .context("Failed to render points breakdown")?;

    println!("{rendered}");
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read receipt from {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read receipt from stdin")?;
            Ok(buf)
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=points_core=warn` - Only diagnostics from the rules
/// - Default: `POINTS_LOG`, else warnings plus `points` info
fn init_tracing(fallback: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback)
            .with_context(|| format!("Invalid log filter '{}'", fallback))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_score_args() {
        let cli = Cli::try_parse_from(["points", "score", "receipt.json", "--format", "json", "--total-only"])
            .unwrap();
        let Command::Score(args) = cli.command;
        assert_eq!(args.path, Some(PathBuf::from("receipt.json")));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.total_only);
    }

    #[test]
    fn test_parse_score_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["points", "score"]).unwrap();
        let Command::Score(args) = cli.command;
        assert_eq!(args.path, None);
        assert_eq!(args.format, None);
        assert!(!args.total_only);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read receipt from"));
    }
}
