//! Command line argument parsing for the edt CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// edt - compile and inspect Elasticsearch search requests
#[derive(Parser, Debug, Clone)]
#[command(name = "edt")]
#[command(about = "Compile and inspect Elasticsearch search requests")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct EdtArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON); defaults and ELASTICSEARCH_HOSTS otherwise
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl EdtArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a search request from flags and print it
    Compile(CompileArgs),

    /// Show the page window for a result size
    Window(WindowArgs),
}

/// Arguments for compiling a request
///
/// Clauses are written `kind:field=value`, e.g. `term:color=red`,
/// `range:price=10..20`, `terms:tag=a,b`, `exists:title`, `match_all`.
#[derive(Parser, Debug, Clone)]
pub struct CompileArgs {
    /// Target index (defaults to the configured default index)
    #[arg(short, long)]
    pub index: Option<String>,

    /// Target mapping type
    #[arg(long = "type")]
    pub doc_type: Option<String>,

    /// Clause that must match
    #[arg(long, value_name = "CLAUSE")]
    pub must: Vec<String>,

    /// Clause that should match
    #[arg(long, value_name = "CLAUSE")]
    pub should: Vec<String>,

    /// Clause that must not match
    #[arg(long = "must-not", value_name = "CLAUSE")]
    pub must_not: Vec<String>,

    /// Clause that must match without scoring
    #[arg(long, value_name = "CLAUSE")]
    pub filter: Vec<String>,

    /// Minimum number of should clauses that must match
    #[arg(long)]
    pub minimum_should_match: Option<String>,

    /// Sort field, optionally suffixed with `:asc` or `:desc`
    #[arg(long, value_name = "FIELD[:ORDER]")]
    pub sort: Vec<String>,

    /// Field to highlight (`*` for all fields)
    #[arg(long, value_name = "FIELD")]
    pub highlight: Vec<String>,

    /// Aggregation written `kind:alias=field`, e.g. `avg:avg_price=price`
    #[arg(long, value_name = "AGGREGATION")]
    pub agg: Vec<String>,

    /// Offset of the first hit
    #[arg(long, conflicts_with_all = ["page", "limit"])]
    pub from: Option<u64>,

    /// Number of hits
    #[arg(long, conflicts_with_all = ["page", "limit"])]
    pub size: Option<u64>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u64>,

    /// Page size (defaults to the configured per_page)
    #[arg(long)]
    pub limit: Option<u64>,

    /// Minimum score of returned hits
    #[arg(long)]
    pub min_score: Option<f64>,
}

/// Arguments for the page window calculation
#[derive(Parser, Debug, Clone)]
pub struct WindowArgs {
    /// Total number of hits
    #[arg(long)]
    pub total: u64,

    /// Page size (defaults to the configured per_page)
    #[arg(long)]
    pub limit: Option<u64>,

    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u64,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
