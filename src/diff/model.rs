//! Unified-diff data model and parser.

use crate::error::{LintDeltaError, Result};

/// One line of a hunk body, tagged by how it participates in the change.
///
/// The raw text is unused by classification but retained for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// Present in both revisions; consumes one old and one new line number.
    Context(String),
    /// Present only in the new revision; consumes one new line number.
    Added(String),
    /// Present only in the old revision; consumes one old line number.
    Removed(String),
}

/// One contiguous block of a unified diff.
///
/// Line numbers and spans are 1-indexed as declared in the hunk header.
/// Invariant (enforced by the parser): the number of context+removed lines
/// in `lines` equals `old_count`, and context+added equals `new_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffHunk {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    pub lines: Vec<DiffLine>,
}

/// Parsed unified diff for one file: ordered hunks plus the file path
/// declared in the diff headers.
///
/// An empty model (no hunks) is a legal value meaning "no unified diff
/// available": the new file has no old counterpart for any line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffModel {
    /// Target file name from the `+++ b/...` header (falling back to the
    /// `--- a/...` header when the new side is /dev/null). Used to label
    /// the resulting message set when the name is not otherwise known.
    pub file: Option<String>,
    pub hunks: Vec<DiffHunk>,
}

impl DiffModel {
    /// Parse unified-diff text for a single file.
    ///
    /// Empty (or whitespace-only) input is valid and yields an empty model,
    /// not an error. Callers treat it as "entire file is new content".
    ///
    /// # Errors
    ///
    /// Returns `MalformedDiff` when a body line appears before any hunk
    /// header, a hunk header fails to parse, or a hunk's body does not add
    /// up to the counts its header declares.
    pub fn parse(input: &str) -> Result<DiffModel> {
        let mut parser = Parser::default();
        for line in input.lines() {
            parser.feed(line)?;
        }
        parser.finish()
    }

    /// Split multi-file diff text on `diff --git` boundaries and parse each
    /// section as its own model.
    ///
    /// Input without any `diff --git` line is treated as a single-file diff.
    /// Empty input yields an empty vector.
    pub fn parse_many(input: &str) -> Result<Vec<DiffModel>> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut sections: Vec<String> = Vec::new();
        for line in input.lines() {
            if line.starts_with("diff --git ") || sections.is_empty() {
                sections.push(String::new());
            }
            if let Some(section) = sections.last_mut() {
                section.push_str(line);
                section.push('\n');
            }
        }

        sections.iter().map(|s| DiffModel::parse(s)).collect()
    }

    /// Returns true when the model carries no hunks ("no diff available").
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

/// Incremental single-file parser state.
#[derive(Default)]
struct Parser {
    file_old: Option<String>,
    file_new: Option<String>,
    new_side_deleted: bool,
    hunks: Vec<DiffHunk>,
    current: Option<OpenHunk>,
}

/// A hunk whose body is still being consumed.
struct OpenHunk {
    hunk: DiffHunk,
    seen_old: u32,
    seen_new: u32,
}

impl OpenHunk {
    fn is_complete(&self) -> bool {
        self.seen_old == self.hunk.old_count && self.seen_new == self.hunk.new_count
    }

    fn feed_line(&mut self, line: &str) -> Result<()> {
        // The marker annotates the previous line and counts toward neither side.
        if line.starts_with('\\') {
            return Ok(());
        }

        // Some diff producers emit a completely empty line for an empty
        // context line; count it as context with empty text.
        let diff_line = if line.is_empty() {
            self.seen_old += 1;
            self.seen_new += 1;
            DiffLine::Context(String::new())
        } else if let Some(text) = line.strip_prefix(' ') {
            self.seen_old += 1;
            self.seen_new += 1;
            DiffLine::Context(text.to_string())
        } else if let Some(text) = line.strip_prefix('+') {
            self.seen_new += 1;
            DiffLine::Added(text.to_string())
        } else if let Some(text) = line.strip_prefix('-') {
            self.seen_old += 1;
            DiffLine::Removed(text.to_string())
        } else {
            return Err(LintDeltaError::MalformedDiff(format!(
                "unexpected line inside hunk: '{}'",
                line
            )));
        };

        if self.seen_old > self.hunk.old_count || self.seen_new > self.hunk.new_count {
            return Err(LintDeltaError::MalformedDiff(format!(
                "hunk body exceeds declared counts (-{},{} +{},{})",
                self.hunk.old_start, self.hunk.old_count, self.hunk.new_start, self.hunk.new_count
            )));
        }

        self.hunk.lines.push(diff_line);
        Ok(())
    }
}

impl Parser {
    fn feed(&mut self, line: &str) -> Result<()> {
        // While a hunk still expects body lines, classification is by prefix
        // only. Header-looking lines ("--- x" as a removed "-- x", "+++ y"
        // as an added "++ y") are body content here, never headers.
        if let Some(open) = self.current.as_mut() {
            if !open.is_complete() {
                return open.feed_line(line);
            }
        }
        self.close_current();

        if let Some(rest) = line.strip_prefix("--- ") {
            self.file_old = header_path(rest, "a/");
            return Ok(());
        }
        if let Some(rest) = line.strip_prefix("+++ ") {
            self.file_new = header_path(rest, "b/");
            self.new_side_deleted = rest.trim() == "/dev/null";
            return Ok(());
        }
        if line.starts_with("@@ ") {
            self.current = Some(OpenHunk {
                hunk: parse_hunk_header(line)?,
                seen_old: 0,
                seen_new: 0,
            });
            return Ok(());
        }
        if line.starts_with(' ') || line.starts_with('+') || line.starts_with('-') {
            return Err(LintDeltaError::MalformedDiff(format!(
                "body line outside any hunk: '{}'",
                line
            )));
        }

        // Remaining lines are git metadata ("diff --git", "index", mode and
        // rename lines, "Binary files ... differ") or blank separators.
        Ok(())
    }

    /// Move a completed hunk into the result list. Call sites guarantee the
    /// hunk is complete when a new header or EOF arrives; `finish` reports
    /// the mismatch otherwise.
    fn close_current(&mut self) {
        if let Some(open) = self.current.take() {
            self.hunks.push(open.hunk);
        }
    }

    fn finish(mut self) -> Result<DiffModel> {
        if let Some(open) = &self.current {
            if !open.is_complete() {
                return Err(LintDeltaError::MalformedDiff(format!(
                    "hunk body has {} old / {} new lines but header declares -{},{} +{},{}",
                    open.seen_old,
                    open.seen_new,
                    open.hunk.old_start,
                    open.hunk.old_count,
                    open.hunk.new_start,
                    open.hunk.new_count
                )));
            }
        }
        self.close_current();

        // Prefer the new-side path; a deleted file only has the old side.
        let file = if self.new_side_deleted {
            self.file_old
        } else {
            self.file_new.or(self.file_old)
        };

        Ok(DiffModel {
            file,
            hunks: self.hunks,
        })
    }
}

/// Extract the path from a `---`/`+++` header rest, stripping the `a/`/`b/`
/// prefix and any trailing tab-separated timestamp. `/dev/null` yields None.
fn header_path(rest: &str, prefix: &str) -> Option<String> {
    let path = rest.split('\t').next().unwrap_or(rest).trim();
    if path == "/dev/null" {
        return None;
    }
    let path = path.strip_prefix(prefix).unwrap_or(path);
    Some(path.replace('\\', "/"))
}

/// Parse a hunk header line.
///
/// Format: `@@ -oldStart[,oldCount] +newStart[,newCount] @@ optional context`.
/// Counts default to 1 when omitted.
fn parse_hunk_header(line: &str) -> Result<DiffHunk> {
    let malformed = || LintDeltaError::MalformedDiff(format!("invalid hunk header: '{}'", line));

    let rest = line.strip_prefix("@@ ").ok_or_else(malformed)?;
    let end = rest.find(" @@").ok_or_else(malformed)?;
    let ranges = &rest[..end];

    let mut parts = ranges.split_whitespace();
    let old_part = parts
        .next()
        .and_then(|p| p.strip_prefix('-'))
        .ok_or_else(malformed)?;
    let new_part = parts
        .next()
        .and_then(|p| p.strip_prefix('+'))
        .ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }

    let (old_start, old_count) = parse_range(old_part).ok_or_else(malformed)?;
    let (new_start, new_count) = parse_range(new_part).ok_or_else(malformed)?;

    Ok(DiffHunk {
        old_start,
        old_count,
        new_start,
        new_count,
        lines: Vec::new(),
    })
}

/// Parse a range specification: `start` or `start,count` (count defaults to 1).
fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}
