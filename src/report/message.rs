//! Typed linter messages and the per-file message set.

use serde::{Deserialize, Serialize};

use crate::error::{LintDeltaError, Result};

/// Message severity. Linters spell these a few different ways; the serde
/// aliases accept the common variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "err", alias = "E")]
    Error,
    #[serde(alias = "warn", alias = "W")]
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One linter message. Line and column are 1-indexed; a column of 0 means
/// the linter did not report one.
///
/// The serde aliases cover the field spellings of the widespread JSON
/// report formats (pylint's `message-id`/`type`/`message`, ESLint-style
/// `rule`, generic `path`/`filename`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, alias = "path", alias = "filename")]
    pub file: String,
    pub line: u32,
    #[serde(default, alias = "col")]
    pub column: u32,
    #[serde(alias = "type")]
    pub severity: Severity,
    #[serde(alias = "message-id", alias = "rule")]
    pub code: String,
    #[serde(alias = "message")]
    pub text: String,
}

/// Ordered collection of messages plus summary counts.
///
/// Order is the order the linter reported them and is stable under merge.
/// Before merging, a set holds one file's messages; the merged result spans
/// files (each message carries its own path).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSet {
    pub messages: Vec<Message>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl MessageSet {
    /// Parse a linter's JSON report.
    ///
    /// Empty (or whitespace-only) input yields an empty set with zero
    /// counts, not an error. "No output" is the normal result of linting
    /// a revision that produced no report. Messages without a file label
    /// are attributed to `fallback_file`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedReport` when non-empty input is not a valid JSON
    /// array of messages.
    pub fn parse(input: &str, fallback_file: &str) -> Result<MessageSet> {
        if input.trim().is_empty() {
            return Ok(MessageSet::default());
        }

        let messages: Vec<Message> = serde_json::from_str(input)
            .map_err(|e| LintDeltaError::MalformedReport(e.to_string()))?;

        let mut set = MessageSet::default();
        for mut message in messages {
            if message.file.is_empty() {
                message.file = fallback_file.to_string();
            }
            set.push(message);
        }
        Ok(set)
    }

    /// Append a message, keeping the summary counts in sync.
    pub fn push(&mut self, message: Message) {
        match message.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.messages.push(message);
    }

    /// Attribute every message to `file`. Linters print whatever path they
    /// were invoked with (a temp copy, an absolute path); per-file callers
    /// relabel with the path the user named.
    pub fn relabel(&mut self, file: &str) {
        for message in &mut self.messages {
            message.file = file.to_string();
        }
    }

    /// Messages reported at the given line, in report order.
    pub fn messages_at_line(&self, line: u32) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.line == line).collect()
    }

    /// Partition by file path, preserving report order within each file and
    /// ordering files by first appearance. Used when a linter report covers
    /// a whole run rather than a single file.
    pub fn split_by_file(&self) -> Vec<(String, MessageSet)> {
        let mut groups: Vec<(String, MessageSet)> = Vec::new();
        for message in &self.messages {
            match groups.iter_mut().find(|(file, _)| *file == message.file) {
                Some((_, set)) => set.push(message.clone()),
                None => {
                    let mut set = MessageSet::default();
                    set.push(message.clone());
                    groups.push((message.file.clone(), set));
                }
            }
        }
        groups
    }

    /// The subset of messages attributed to `file` (empty set when absent).
    pub fn for_file(&self, file: &str) -> MessageSet {
        let mut set = MessageSet::default();
        for message in self.messages.iter().filter(|m| m.file == file) {
            set.push(message.clone());
        }
        set
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
