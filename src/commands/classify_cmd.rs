//! The `classify` command: classification of pre-computed inputs.
//!
//! Consumes a unified diff (possibly covering several files) plus the old
//! and new linter reports from disk. No git and no linter processes: this is
//! the engine driven directly, for pipelines that already hold the data.

use std::collections::HashSet;
use std::path::Path;

use log::warn;

use crate::classify::classify;
use crate::cli::ClassifyArgs;
use crate::diff::{DiffModel, LineMap};
use crate::error::{LintDeltaError, Result};
use crate::output;
use crate::report::{MessageSet, merge};
use crate::runner::FileReport;

/// One file's worth of classification input.
struct Target {
    file: String,
    model: DiffModel,
}

pub fn cmd_classify(args: ClassifyArgs) -> Result<()> {
    let diff_text = match &args.diff {
        Some(path) => read_input(path)?,
        None => String::new(),
    };
    let targets = resolve_targets(&diff_text, &args)?;

    // With a single target, unlabeled report messages belong to it; with
    // several, messages must carry their own file labels to be attributed.
    let fallback = match targets.as_slice() {
        [only] => only.file.clone(),
        _ => String::new(),
    };

    let old_text = match &args.old_report {
        Some(path) => read_input(path)?,
        None => String::new(),
    };
    let old_all = MessageSet::parse(&old_text, &fallback)?;
    let new_all = MessageSet::parse(&read_input(&args.new_report)?, &fallback)?;

    // Report messages for files no diff section covers cannot be
    // classified; surface them instead of dropping silently.
    let covered: HashSet<&str> = targets.iter().map(|t| t.file.as_str()).collect();
    for (file, set) in new_all.split_by_file() {
        if !covered.contains(file.as_str()) {
            warn!(
                "{}: {} message(s) not covered by any diff section, skipping",
                file,
                set.len()
            );
        }
    }

    let policy = args.match_policy.unwrap_or_default();
    let mut reports = Vec::with_capacity(targets.len());
    for target in &targets {
        let old_set = old_all.for_file(&target.file);
        let new_set = new_all.for_file(&target.file);
        let map = LineMap::new(&target.model);

        let classified = classify(&old_set, &new_set, &map, policy);
        reports.push(FileReport {
            file: target.file.clone(),
            new_issues: classified.new_issues(),
            pre_existing: classified.pre_existing_count(),
        });
    }

    let merged = merge(reports.iter().map(|r| r.new_issues.clone()));
    print!(
        "{}",
        output::render(&reports, &merged, args.format.unwrap_or_default())
    );

    if merged.is_empty() {
        Ok(())
    } else {
        Err(LintDeltaError::NewIssues(merged.len()))
    }
}

/// Pair each diff section with a file name. No diff at all means one
/// no-baseline target, which needs an explicit --file to label it.
fn resolve_targets(diff_text: &str, args: &ClassifyArgs) -> Result<Vec<Target>> {
    let models = DiffModel::parse_many(diff_text)?;

    if models.is_empty() {
        let file = args.file.clone().ok_or_else(|| {
            LintDeltaError::UserError(
                "no diff given and no file name to classify under.\n\
                 Fix: pass --file <path> (or provide --diff)."
                    .to_string(),
            )
        })?;
        return Ok(vec![Target {
            file,
            model: DiffModel::default(),
        }]);
    }

    models
        .into_iter()
        .map(|model| {
            let file = model
                .file
                .clone()
                .or_else(|| args.file.clone())
                .ok_or_else(|| {
                    LintDeltaError::UserError(
                        "diff section declares no file name.\n\
                         Fix: pass --file <path> or use a diff with ---/+++ headers."
                            .to_string(),
                    )
                })?;
            Ok(Target { file, model })
        })
        .collect()
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        LintDeltaError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })
}
