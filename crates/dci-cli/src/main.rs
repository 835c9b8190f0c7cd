//! CLI for the Dependency Coupling Index toolkit.
//!
//! Generates synthetic Zipkin-style traces from built-in architecture
//! patterns and validates externally computed DCI results.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dci_analysis::DEFAULT_DIFFERENCE_THRESHOLD;
use dci_synth::PatternCatalog;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "dci")]
#[command(about = "Dependency Coupling Index trace synthesis and validation", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level used when neither RUST_LOG nor LOG_LEVEL is set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in architecture patterns
    Patterns,

    /// Generate synthetic traces for a pattern
    Generate {
        /// Pattern name (see `dci patterns`)
        pattern: String,

        /// Number of traces to generate
        #[arg(default_value_t = 100)]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (default: traces_<pattern>.json)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show the expected DCI of every service in a pattern
    Expected {
        /// Pattern name (see `dci patterns`)
        pattern: String,

        /// Also write the scores as a DCI results CSV
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Analyze DCI results and compare them with reference MCI data
    Validate {
        /// DCI results CSV (Service,DCI,Status)
        dci_results: PathBuf,

        /// Reference CSV (Service,MCI_Afferent[,MCI_Efferent])
        reference: Option<PathBuf>,

        /// Differences above this value are flagged
        #[arg(long, default_value_t = DEFAULT_DIFFERENCE_THRESHOLD, value_parser = parse_threshold)]
        threshold: f64,

        /// Where to write the comparison template when no reference is given
        #[arg(long, default_value = "mci_comparison_template.csv")]
        template_out: PathBuf,

        /// Also write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

/// Difference thresholds must be finite and non-negative.
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|e| format!("'{}' is not a number: {}", s, e))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{}' must be a finite, non-negative number", s));
    }
    Ok(value)
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `LOG_LEVEL`,
/// which wins over `--log-level`.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let catalog = PatternCatalog::builtin()?;

    match cli.command {
        Commands::Patterns => commands::patterns(&catalog),
        Commands::Generate {
            pattern,
            count,
            seed,
            output,
        } => commands::generate::generate(&catalog, &pattern, count, seed, output),
        Commands::Expected { pattern, output } => {
            commands::expected(&catalog, &pattern, output.as_deref())
        }
        Commands::Validate {
            dci_results,
            reference,
            threshold,
            template_out,
            json,
        } => commands::validate::validate(
            &dci_results,
            reference.as_deref(),
            threshold,
            &template_out,
            json.as_deref(),
        ),
    }
}
