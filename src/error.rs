//! Error types for the lintdelta CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! The "no baseline" condition (file absent from the old revision) is NOT an
//! error; it is an expected success variant handled by the runner.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lintdelta operations.
///
/// Each variant maps to a specific exit code so callers can tell a tooling
/// failure apart from a clean pass or a found-new-issues outcome.
#[derive(Error, Debug)]
pub enum LintDeltaError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// Diff text does not conform to unified-diff grammar, or hunk counts
    /// are inconsistent with the hunk body.
    #[error("malformed diff: {0}")]
    MalformedDiff(String),

    /// Non-empty linter output is not parseable as a structured report.
    #[error("malformed linter report: {0}")]
    MalformedReport(String),

    /// Git command failed or could not be executed.
    #[error("git operation failed: {0}")]
    GitError(String),

    /// The linter could not be executed at all.
    #[error("linter invocation failed: {0}")]
    LinterError(String),

    /// Not a tooling failure: the change introduced new lint issues.
    /// Carried as an error so `main` can select the dedicated exit code
    /// after the report has been rendered.
    #[error("found {0} new lint issue(s)")]
    NewIssues(usize),
}

impl LintDeltaError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LintDeltaError::UserError(_) => exit_codes::USER_ERROR,
            LintDeltaError::NewIssues(_) => exit_codes::NEW_ISSUES,
            LintDeltaError::MalformedDiff(_) => exit_codes::GIT_FAILURE,
            LintDeltaError::GitError(_) => exit_codes::GIT_FAILURE,
            LintDeltaError::MalformedReport(_) => exit_codes::LINT_FAILURE,
            LintDeltaError::LinterError(_) => exit_codes::LINT_FAILURE,
        }
    }
}

/// Result type alias for lintdelta operations.
pub type Result<T> = std::result::Result<T, LintDeltaError>;
