//! Per-file classification pipeline and run orchestration.
//!
//! Each file's classification depends only on that file's own diff text and
//! two linter outputs, so files are processed by a bounded worker pool with
//! no cross-worker sharing. Results are collected by input index and handed
//! to the merger sequentially, keeping output order deterministic
//! regardless of completion order.

mod pool;
mod sources;


pub use pool::run_ordered;
pub use sources::{DiffOutcome, GitOutput, GitSource, LinterRunner, run_git};

use std::path::Path;

use log::debug;

use crate::classify::{MatchPolicy, classify};
use crate::diff::{DiffModel, LineMap};
use crate::error::{LintDeltaError, Result};
use crate::report::MessageSet;

/// Classified result for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file: String,
    /// Newly introduced messages, in linter-report order.
    pub new_issues: MessageSet,
    /// Messages dropped as pre-existing, for diagnostics.
    pub pre_existing: usize,
}

impl FileReport {
    fn empty(file: &str) -> Self {
        Self {
            file: file.to_string(),
            new_issues: MessageSet::default(),
            pre_existing: 0,
        }
    }
}

/// Options for a `check` run.
#[derive(Debug)]
pub struct CheckOptions {
    pub base: String,
    pub linter: LinterRunner,
    pub policy: MatchPolicy,
    pub jobs: usize,
}

/// Classify every file concurrently and return per-file reports in input
/// order.
///
/// Fail-fast: the first failing file (by input order) aborts the run with
/// its error; in-flight files finish, queued files are abandoned. There is
/// no partial success output.
pub fn check_files<P: AsRef<Path>>(
    cwd: P,
    files: &[String],
    opts: &CheckOptions,
) -> Result<Vec<FileReport>> {
    let source = GitSource::new(cwd, &opts.base);
    source.verify_base()?;
    let jobs: Vec<String> = files.to_vec();

    let outcomes = run_ordered(jobs, opts.jobs, |file| {
        process_file(&source, &opts.linter, opts.policy, file)
    });

    let mut reports = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Some(Ok(report)) => reports.push(report),
            Some(Err(err)) => return Err(err),
            None => {
                return Err(LintDeltaError::UserError(
                    "run aborted before all files were processed".to_string(),
                ));
            }
        }
    }
    Ok(reports)
}

/// Classify one file: fetch its diff and both linter reports, build the
/// line map, run the classifier.
pub fn process_file(
    source: &GitSource,
    linter: &LinterRunner,
    policy: MatchPolicy,
    file: &str,
) -> Result<FileReport> {
    match source.diff_for(file)? {
        DiffOutcome::NoChanges => {
            debug!("{}: unchanged, skipping", file);
            Ok(FileReport::empty(file))
        }
        DiffOutcome::NoBaseline => {
            // No prior revision: an empty model maps every line to None and
            // every message classifies as new.
            let mut new_set = MessageSet::parse(&linter.run(&source.workdir().join(file))?, file)?;
            new_set.relabel(file);

            let map = LineMap::new(&DiffModel::default());
            let classified = classify(&MessageSet::default(), &new_set, &map, policy);
            Ok(FileReport {
                file: file.to_string(),
                new_issues: classified.new_issues(),
                pre_existing: classified.pre_existing_count(),
            })
        }
        DiffOutcome::Changed(diff_text) => {
            let model = DiffModel::parse(&diff_text)?;
            if model.is_empty() {
                // Mode-only or binary change: no content hunks, so the file's
                // text is identical to the baseline.
                debug!("{}: diff carries no content hunks, skipping", file);
                return Ok(FileReport::empty(file));
            }
            let map = LineMap::new(&model);

            let tmp = tempfile::tempdir().map_err(|e| {
                LintDeltaError::UserError(format!("failed to create temp directory: {}", e))
            })?;
            let old_path = source.materialize_old(file, tmp.path())?;

            let mut old_set = MessageSet::parse(&linter.run(&old_path)?, file)?;
            old_set.relabel(file);
            let mut new_set = MessageSet::parse(&linter.run(&source.workdir().join(file))?, file)?;
            new_set.relabel(file);

            let classified = classify(&old_set, &new_set, &map, policy);
            Ok(FileReport {
                file: file.to_string(),
                new_issues: classified.new_issues(),
                pre_existing: classified.pre_existing_count(),
            })
        }
    }
}
