//! Compiled ignore filters.

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

use super::model::Config;
use crate::error::{LintDeltaError, Result};
use crate::report::{Message, MessageSet};

/// Compiled path globs and rule-code regexes for efficient matching.
///
/// Create once per run; both pattern lists come from config.
pub struct CompiledFilters {
    ignore_paths: GlobSet,
    ignore_rules: Vec<(Regex, String)>,
}

impl std::fmt::Debug for CompiledFilters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledFilters")
            .field(
                "ignore_rules",
                &self.ignore_rules.iter().map(|(_, s)| s).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl CompiledFilters {
    /// Compile the ignore patterns from config.
    ///
    /// # Errors
    ///
    /// Returns `UserError` when a glob or regex fails to compile, with a
    /// hint naming the offending pattern.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.ignore_paths {
            let normalized = pattern.trim().replace('\\', "/");
            if normalized.is_empty() {
                continue;
            }
            let glob = Glob::new(&normalized).map_err(|e| {
                LintDeltaError::UserError(format!(
                    "invalid glob in ignore_paths: '{}' - {}\n\
                     Fix: edit {} and correct or remove this pattern.",
                    pattern,
                    e,
                    super::CONFIG_FILE_NAME
                ))
            })?;
            builder.add(glob);
        }
        let ignore_paths = builder
            .build()
            .map_err(|e| LintDeltaError::UserError(format!("failed to build glob set: {}", e)))?;

        let mut ignore_rules = Vec::with_capacity(config.ignore_rules.len());
        for pattern in &config.ignore_rules {
            let regex = Regex::new(pattern).map_err(|e| {
                LintDeltaError::UserError(format!(
                    "invalid regex in ignore_rules: '{}' - {}\n\
                     Fix: edit {} and correct or remove this pattern.",
                    pattern,
                    e,
                    super::CONFIG_FILE_NAME
                ))
            })?;
            ignore_rules.push((regex, pattern.clone()));
        }

        Ok(Self {
            ignore_paths,
            ignore_rules,
        })
    }

    /// Whether a file path is excluded from checking.
    pub fn is_ignored_path(&self, path: &str) -> bool {
        self.ignore_paths.is_match(path.replace('\\', "/"))
    }

    /// The pattern suppressing this message's rule code, if any.
    pub fn ignored_rule(&self, message: &Message) -> Option<&str> {
        self.ignore_rules
            .iter()
            .find(|(regex, _)| regex.is_match(&message.code))
            .map(|(_, pattern)| pattern.as_str())
    }

    /// Drop messages whose rule code matches an ignore pattern. Returns the
    /// kept set and the number suppressed.
    pub fn filter_messages(&self, set: &MessageSet) -> (MessageSet, usize) {
        if self.ignore_rules.is_empty() {
            return (set.clone(), 0);
        }

        let mut kept = MessageSet::default();
        let mut suppressed = 0;
        for message in &set.messages {
            match self.ignored_rule(message) {
                Some(pattern) => {
                    log::debug!(
                        "{}:{}: [{}] suppressed by ignore_rules pattern '{}'",
                        message.file,
                        message.line,
                        message.code,
                        pattern
                    );
                    suppressed += 1;
                }
                None => kept.push(message.clone()),
            }
        }
        (kept, suppressed)
    }
}
