//! The `init` command: write a starter config file.

use std::path::Path;

use crate::cli::InitArgs;
use crate::config::CONFIG_FILE_NAME;
use crate::error::{LintDeltaError, Result};

/// Starter config written by `lintdelta init`. Must stay parseable by
/// `Config::from_yaml` (covered by a test).
const STARTER_CONFIG: &str = "\
# lintdelta configuration
#
# Linter command; {file} is replaced with the path to lint. The linter
# must write a JSON array of messages to stdout.
linter: \"pylint --output-format=json {file}\"

# Base revision new content is compared against.
base: HEAD

# Worker threads for per-file classification.
jobs: 4

# Report format: text or json.
format: text

# How messages are matched across revisions: code_and_text or code_only.
match_policy: code_and_text

# Path globs excluded from checking.
ignore_paths: []

# Regexes over rule codes; matching messages are suppressed.
ignore_rules: []
";

pub fn cmd_init(args: InitArgs) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() && !args.force {
        return Err(LintDeltaError::UserError(format!(
            "'{}' already exists.\n\
             Fix: edit it directly, or re-run with --force to overwrite.",
            CONFIG_FILE_NAME
        )));
    }

    std::fs::write(path, STARTER_CONFIG).map_err(|e| {
        LintDeltaError::UserError(format!("failed to write '{}': {}", CONFIG_FILE_NAME, e))
    })?;

    println!("Wrote {}", CONFIG_FILE_NAME);
    Ok(())
}
