use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use lockbox_core::{MatchConfig, MatchPolicy, MatchResult, Pipeline, SimilarityMode};
use lockbox_ingest::{load_entity_csv, read_statement_text};

mod config;
mod export;

#[derive(Parser, Debug)]
#[command(name = "lockbox", version, about = "Match bank statement deposits to AR entities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match a statement text file against an AR table and report deposits
    Match {
        /// Extracted statement text (one transaction per line)
        statement: PathBuf,

        /// AR reference table CSV
        #[arg(long)]
        ar_table: PathBuf,

        /// TOML config file (default: ./lockbox.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the acceptance threshold (0-100)
        #[arg(long)]
        threshold: Option<u8>,

        /// Override the similarity mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Accept any non-excluded credit line, no deposit keyword required
        #[arg(long)]
        loose: bool,

        /// Include unmatched deposit candidates in the output
        #[arg(long)]
        all: bool,

        /// Write results to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: FormatArg,
    },

    /// Write the default configuration file
    InitConfig {
        /// Destination (default: lockbox.toml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Partial,
    TokenSet,
}

impl From<ModeArg> for SimilarityMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Partial => SimilarityMode::Partial,
            ModeArg::TokenSet => SimilarityMode::TokenSet,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Match {
            statement,
            ar_table,
            config,
            threshold,
            mode,
            loose,
            all,
            out,
            format,
        } => {
            if !statement.exists() {
                bail!("statement file not found: {}", statement.display());
            }
            if !ar_table.exists() {
                bail!("AR table not found: {}", ar_table.display());
            }

            let mut cfg = config::load_config(config.as_deref())?;
            if let Some(threshold) = threshold {
                cfg.threshold = threshold;
            }
            if let Some(mode) = mode {
                cfg.mode = mode.into();
            }
            if loose {
                cfg.policy = MatchPolicy::AnyCredit;
            }

            run_match(cfg, &statement, &ar_table, all, out, format)?;
        }

        Command::InitConfig { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
            config::init_config(&path)?;
        }
    }

    Ok(())
}

fn run_match(
    cfg: MatchConfig,
    statement: &Path,
    ar_table: &Path,
    show_all: bool,
    out: Option<PathBuf>,
    format: FormatArg,
) -> Result<()> {
    // Table problems (missing name column) abort before any line is read.
    let table = load_entity_csv(ar_table, &cfg.columns)?;
    let lines = read_statement_text(statement)?;

    println!(
        "Loaded {} AR entities from {}",
        table.len(),
        ar_table.display()
    );
    println!("Read {} lines from {}", lines.len(), statement.display());

    let pipeline = Pipeline::new(cfg, table)?;
    let results = pipeline.run(&lines);

    let matched_count = results.iter().filter(|r| r.is_matched()).count();
    let visible: Vec<MatchResult> = results
        .iter()
        .filter(|r| show_all || r.is_matched())
        .cloned()
        .collect();

    if matched_count == 0 {
        println!("No ARs matched in this bank statement.");
    } else {
        println!(
            "{} matches found ({} deposit rows)\n",
            matched_count,
            results.len()
        );
    }

    for result in &visible {
        println!(
            "{:>3}  {:<30}  {}",
            result.score(),
            result.ar_name(),
            result.transaction
        );
    }

    if let Some(out) = out {
        let file = File::create(&out).with_context(|| format!("creating {}", out.display()))?;
        match format {
            FormatArg::Csv => export::write_csv(&visible, file)?,
            FormatArg::Json => export::write_json(&visible, file)?,
        }
        println!("\nWrote {} rows to {}", visible.len(), out.display());
    }

    Ok(())
}
