//! The `check` command: git-driven diff-scoped linting.

use log::{debug, warn};

use crate::cli::CheckArgs;
use crate::config::{CompiledFilters, Config};
use crate::error::{LintDeltaError, Result};
use crate::output;
use crate::report::merge;
use crate::runner::{CheckOptions, FileReport, GitSource, LinterRunner, check_files};

pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| LintDeltaError::UserError(format!("failed to resolve current dir: {}", e)))?;

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&cwd)?,
    };
    apply_overrides(&mut config, &args);
    config.validate()?;

    let filters = CompiledFilters::from_config(&config)?;
    let linter_command = config.linter.clone().ok_or_else(|| {
        LintDeltaError::UserError(
            "no linter command configured.\n\
             Fix: pass --linter or set `linter` in .lintdelta.yml."
                .to_string(),
        )
    })?;
    let linter = LinterRunner::from_command(&linter_command)?;

    let files = resolve_files(&cwd, &args, &config, &filters)?;
    if files.is_empty() {
        println!("No files to check.");
        return Ok(());
    }

    let opts = CheckOptions {
        base: config.base.clone(),
        linter,
        policy: config.match_policy,
        jobs: config.jobs as usize,
    };
    let reports = check_files(&cwd, &files, &opts)?;
    let reports = apply_rule_filters(reports, &filters);

    let merged = merge(reports.iter().map(|r| r.new_issues.clone()));
    print!("{}", output::render(&reports, &merged, config.format));

    if merged.is_empty() {
        Ok(())
    } else {
        Err(LintDeltaError::NewIssues(merged.len()))
    }
}

fn apply_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(base) = &args.base {
        config.base = base.clone();
    }
    if let Some(linter) = &args.linter {
        config.linter = Some(linter.clone());
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
}

/// The explicit file list, or every file changed since the base revision,
/// minus ignored paths and paths that no longer exist in the working tree.
fn resolve_files(
    cwd: &std::path::Path,
    args: &CheckArgs,
    config: &Config,
    filters: &CompiledFilters,
) -> Result<Vec<String>> {
    let candidates = if args.files.is_empty() {
        let source = GitSource::new(cwd, &config.base);
        let changed = source.changed_files()?;
        debug!("{} file(s) changed since {}", changed.len(), config.base);
        changed
    } else {
        args.files.clone()
    };

    let mut files = Vec::with_capacity(candidates.len());
    for file in candidates {
        if filters.is_ignored_path(&file) {
            warn!("{}: ignored by config", file);
            continue;
        }
        if args.files.is_empty() && !cwd.join(&file).is_file() {
            // Discovered via git but deleted in the working tree; nothing
            // to lint on the new side.
            warn!("{}: not present in working tree, skipping", file);
            continue;
        }
        files.push(file);
    }
    Ok(files)
}

fn apply_rule_filters(reports: Vec<FileReport>, filters: &CompiledFilters) -> Vec<FileReport> {
    reports
        .into_iter()
        .map(|mut report| {
            let (kept, suppressed) = filters.filter_messages(&report.new_issues);
            if suppressed > 0 {
                debug!("{}: {} message(s) suppressed by ignore_rules", report.file, suppressed);
            }
            report.new_issues = kept;
            report
        })
        .collect()
}
