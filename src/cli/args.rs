//! Defines the command-line arguments for the proba harness.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which renderer formats the aggregated results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colorized per-test lines plus a summary.
    Console,
    /// Self-contained HTML table.
    Html,
    /// Pretty-printed JSON.
    Json,
}

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "proba",
    version,
    about = "Runs file-family tests through an external parse/interpret pipeline."
)]
pub struct ProbaArgs {
    /// Directory containing the test families.
    #[arg(long, default_value = ".")]
    pub directory: PathBuf,

    /// Also descend into subdirectories.
    #[arg(long)]
    pub recursive: bool,

    /// Run the parser stage only.
    #[arg(long)]
    pub parse_only: bool,

    /// Run the interpreter stage only.
    #[arg(long)]
    pub int_only: bool,

    /// Parser program (reads source on stdin, writes to stdout).
    #[arg(long)]
    pub parse_script: Option<PathBuf>,

    /// Interpreter program (takes --source= and --input= arguments).
    #[arg(long)]
    pub int_script: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    pub report: ReportFormat,

    /// Write the rendered report to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Only list the discovered test base paths; run nothing.
    #[arg(long)]
    pub list: bool,
}
