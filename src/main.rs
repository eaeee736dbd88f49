//! Lintdelta: diff-scoped linting for files under version control.
//!
//! This is the main entry point for the `lintdelta` CLI. It parses
//! arguments, dispatches to the appropriate command handler, and converts
//! errors to exit codes so callers can tell a tooling failure apart from
//! "your change introduced issues".

mod cli;
mod commands;
pub mod classify;
pub mod config;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod output;
pub mod report;
pub mod runner;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr; the report
            // itself (if any) already went to stdout.
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
