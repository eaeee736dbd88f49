//! Command implementations for lintdelta.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod check;
mod classify_cmd;
mod init;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Check(args) => check::cmd_check(args),
        Command::Classify(args) => classify_cmd::cmd_classify(args),
        Command::Init(args) => init::cmd_init(args),
    }
}
