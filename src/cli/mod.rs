//! CLI argument parsing for lintdelta.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::classify::MatchPolicy;
use crate::output::OutputFormat;

/// Lintdelta: diff-scoped linting.
///
/// Runs your linter against the old and new revision of each changed file,
/// maps line numbers across the diff, and reports only the issues your
/// change introduced. Pre-existing issues are suppressed.
#[derive(Parser, Debug)]
#[command(name = "lintdelta")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for lintdelta.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check files for newly introduced lint issues.
    ///
    /// Diffs each file against the base revision, lints both revisions,
    /// and reports issues not present in the baseline. With no files
    /// given, checks every file changed since the base revision.
    Check(CheckArgs),

    /// Classify pre-computed inputs from disk.
    ///
    /// Takes a unified diff and the linter reports for the old and new
    /// revisions as files, without invoking git or a linter. Useful in CI
    /// pipelines that already have this data.
    Classify(ClassifyArgs),

    /// Write a starter .lintdelta.yml to the current directory.
    Init(InitArgs),
}

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files to check, relative to the current directory.
    pub files: Vec<String>,

    /// Base revision to compare against (overrides config).
    #[arg(long)]
    pub base: Option<String>,

    /// Linter command template; `{file}` is replaced with the path to lint.
    #[arg(long)]
    pub linter: Option<String>,

    /// Worker threads (overrides config).
    #[arg(long)]
    pub jobs: Option<u32>,

    /// Report format (overrides config).
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to a config file (default: .lintdelta.yml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `classify` command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Unified diff file. Omitting it means "no baseline": every message
    /// in the new report classifies as new.
    #[arg(long)]
    pub diff: Option<PathBuf>,

    /// Linter report (JSON) for the old revision. Omitting it means the
    /// old revision produced no report.
    #[arg(long)]
    pub old_report: Option<PathBuf>,

    /// Linter report (JSON) for the new revision.
    #[arg(long)]
    pub new_report: PathBuf,

    /// File name to classify, when the diff carries no usable header.
    #[arg(long)]
    pub file: Option<String>,

    /// How messages are matched across revisions.
    #[arg(long, value_enum)]
    pub match_policy: Option<MatchPolicy>,

    /// Report format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `init` command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
