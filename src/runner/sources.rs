//! External collaborators: git-backed diff/content retrieval and linter
//! invocation.
//!
//! Everything that blocks lives here; the classification engine itself is
//! purely computational. All git operations go through [`run_git`] with
//! captured output and structured errors.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::debug;

use crate::error::{LintDeltaError, Result};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Raw standard output. Not trimmed: file content and diff text must
    /// keep their exact line structure.
    pub stdout: String,
    /// Standard error, trimmed for use in messages.
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Errors
///
/// Returns `GitError` when the command cannot be executed or exits
/// non-zero, with stderr (or stdout) included in the message.
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let output = git_command(cwd.as_ref(), args)?;
    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.trim().to_string()
        } else {
            git_output.stderr.clone()
        };

        Err(LintDeltaError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Run a git command where a non-zero exit is an expected answer, not a
/// failure (e.g. `cat-file -e`). Only failure to spawn is an error.
fn git_succeeds<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<bool> {
    let output = git_command(cwd.as_ref(), args)?;
    Ok(output.status.success())
}

fn git_command(cwd: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            LintDeltaError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })
}

/// Outcome of asking git for a file's diff against the base revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// The file differs from the base revision.
    Changed(String),
    /// The file is identical to the base revision; it contributes zero new
    /// issues and classification is skipped.
    NoChanges,
    /// The file does not exist in the base revision. Not an error: the old
    /// message set and diff model are empty, so every message is new.
    NoBaseline,
}

/// Git-backed input source for one run: a working directory and the base
/// revision new content is compared against.
#[derive(Debug, Clone)]
pub struct GitSource {
    cwd: PathBuf,
    base: String,
}

impl GitSource {
    pub fn new<P: AsRef<Path>>(cwd: P, base: &str) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            base: base.to_string(),
        }
    }

    /// The directory file arguments are resolved against.
    pub fn workdir(&self) -> &Path {
        &self.cwd
    }

    /// Check that the base revision resolves to a commit. Without this, a
    /// mistyped revision would read as "no baseline" for every file and
    /// flag the whole world as new.
    pub fn verify_base(&self) -> Result<()> {
        let spec = format!("{}^{{commit}}", self.base);
        run_git(&self.cwd, &["rev-parse", "--verify", "--quiet", &spec])
            .map_err(|_| {
                LintDeltaError::GitError(format!(
                    "base revision '{}' does not resolve to a commit",
                    self.base
                ))
            })
            .map(|_| ())
    }

    /// Changed files (cwd-relative, forward slashes) between the base
    /// revision and the working tree, for runs with no explicit file list.
    pub fn changed_files(&self) -> Result<Vec<String>> {
        let output = run_git(&self.cwd, &["diff", "--name-only", "--relative", &self.base])?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.replace('\\', "/"))
            .collect())
    }

    /// Diff `file` (cwd-relative) against the base revision.
    pub fn diff_for(&self, file: &str) -> Result<DiffOutcome> {
        // `base:./path` resolves the path relative to the working directory,
        // matching how the `--` pathspec is resolved below.
        let spec = self.object_spec(file);
        if !git_succeeds(&self.cwd, &["cat-file", "-e", &spec])? {
            debug!("{}: no baseline at {}", file, self.base);
            return Ok(DiffOutcome::NoBaseline);
        }

        let diff = run_git(&self.cwd, &["diff", &self.base, "--", file])?;
        if diff.stdout.trim().is_empty() {
            Ok(DiffOutcome::NoChanges)
        } else {
            Ok(DiffOutcome::Changed(diff.stdout))
        }
    }

    /// Write the base-revision content of `file` into `dir`, keeping the
    /// file name so extension-driven linters behave the same. Returns the
    /// path written.
    pub fn materialize_old(&self, file: &str, dir: &Path) -> Result<PathBuf> {
        let spec = self.object_spec(file);
        let content = run_git(&self.cwd, &["show", &spec])?;

        let name = Path::new(file)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "old".to_string());
        let path = dir.join(name);

        std::fs::write(&path, &content.stdout).map_err(|e| {
            LintDeltaError::GitError(format!(
                "failed to write baseline copy of '{}': {}",
                file, e
            ))
        })?;
        Ok(path)
    }

    fn object_spec(&self, file: &str) -> String {
        format!("{}:./{}", self.base, file.replace('\\', "/"))
    }
}

/// A configured linter command, split once and reused per invocation.
///
/// The template's `{file}` placeholder is replaced with the path to lint;
/// without a placeholder the path is appended as the last argument.
#[derive(Debug, Clone)]
pub struct LinterRunner {
    argv: Vec<String>,
    has_placeholder: bool,
}

impl LinterRunner {
    /// Split a command template with shell-words.
    ///
    /// # Errors
    ///
    /// Returns `UserError` for empty commands or unmatched quotes.
    pub fn from_command(command: &str) -> Result<Self> {
        let argv = shell_words::split(command).map_err(|e| {
            LintDeltaError::UserError(format!(
                "failed to parse linter command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command, e
            ))
        })?;

        if argv.is_empty() {
            return Err(LintDeltaError::UserError(
                "linter command is empty.\n\
                 Fix: set `linter` in the config or pass --linter."
                    .to_string(),
            ));
        }

        let has_placeholder = argv.iter().any(|a| a.contains("{file}"));
        Ok(Self {
            argv,
            has_placeholder,
        })
    }

    /// Run the linter on one file and return its stdout.
    ///
    /// Linters exit non-zero when they find issues, so a non-zero exit with
    /// output on stdout is a normal result. Empty stdout is the "no report"
    /// case. A linter that exits non-zero with *no* stdout did not produce
    /// a report at all and is treated as a failure.
    pub fn run(&self, file: &Path) -> Result<String> {
        let file_str = file.to_string_lossy();
        let mut args: Vec<String> = self
            .argv
            .iter()
            .map(|a| a.replace("{file}", &file_str))
            .collect();
        if !self.has_placeholder {
            args.push(file_str.to_string());
        }

        let program = args[0].clone();
        let output = Command::new(&program).args(&args[1..]).output().map_err(|e| {
            LintDeltaError::LinterError(format!(
                "failed to execute '{}': {}\n\
                 Fix: ensure the linter is installed and in PATH.",
                program, e
            ))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() && stdout.trim().is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LintDeltaError::LinterError(format!(
                "'{}' exited with code {} and produced no report: {}",
                program,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(stdout)
    }
}
