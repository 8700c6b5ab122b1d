//! CLI argument parsing using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// dumpscrub - normalize SQL schema dumps for code generators
#[derive(Parser, Debug)]
#[command(name = "dumpscrub")]
#[command(about = "Normalize SQL schema dumps for code generators", long_about = None)]
#[command(version)]
pub struct Args {
    /// SQL dump files to normalize (reads from stdin if none provided)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Rewrite the input files instead of printing the result
    #[arg(short, long, requires = "files")]
    pub in_place: bool,

    /// JSON file with normalizer options (command-line flags take precedence)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Schema written into an empty `set_config('search_path', ...)` call
    #[arg(long, value_name = "SCHEMA", conflicts_with = "no_search_path_fix")]
    pub search_path_schema: Option<String>,

    /// Leave an empty search_path as it is
    #[arg(long)]
    pub no_search_path_fix: bool,

    /// Schema qualifier to strip from identifiers
    #[arg(long, value_name = "SCHEMA", conflicts_with = "keep_qualifier")]
    pub qualifier: Option<String>,

    /// Keep schema qualifiers on identifiers
    #[arg(long)]
    pub keep_qualifier: bool,

    /// Meta-command keyword to drop, without the backslash (can be repeated;
    /// replaces the default `restrict`/`unrestrict` set)
    #[arg(long = "meta-command", value_name = "KEYWORD")]
    pub meta_commands: Vec<String>,

    /// Fail when a string literal or quoted identifier is never closed
    #[arg(long)]
    pub strict: bool,

    /// Print a summary of the applied rewrites to stderr
    #[arg(short, long, value_enum)]
    pub report: Option<ReportFormat>,

    /// Compact JSON report (no pretty-printing)
    #[arg(long)]
    pub compact: bool,

    /// Suppress warnings on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

/// Report format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Text,
    /// JSON document
    Json,
}
