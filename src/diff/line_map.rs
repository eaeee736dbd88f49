//! Line correspondence between the old and new revisions of a file.

use std::collections::HashMap;

use super::model::{DiffLine, DiffModel};

/// Bidirectional line map built once per file from a [`DiffModel`] and
/// queried once per message.
///
/// Lines covered by a hunk get explicit entries (context lines map to their
/// counterpart, added/removed lines map to nothing). Lines outside every
/// hunk are implicit context: new and old numbers are related by the offset
/// accumulated from the hunks seen so far, open-ended past the last hunk
/// since the diff does not declare the file length.
///
/// A map built from an empty model answers `None` in both directions for
/// every line: with no diff available there is no baseline to map into, and
/// every message on the new side counts as newly introduced.
///
/// Queries for lines beyond the real length of either file are the caller's
/// responsibility; the map assumes valid input lines.
#[derive(Debug)]
pub struct LineMap {
    no_baseline: bool,
    new_to_old: HashMap<u32, Option<u32>>,
    old_to_new: HashMap<u32, Option<u32>>,
    /// Gap regions on the new side: (first line of region, old - new offset),
    /// ascending. The last entry is open-ended.
    new_gaps: Vec<(u32, i64)>,
    /// Gap regions on the old side: (first line of region, new - old offset).
    old_gaps: Vec<(u32, i64)>,
}

impl LineMap {
    /// Build the map by walking the model's hunks in order.
    pub fn new(model: &DiffModel) -> LineMap {
        let mut map = LineMap {
            no_baseline: model.is_empty(),
            new_to_old: HashMap::new(),
            old_to_new: HashMap::new(),
            new_gaps: Vec::new(),
            old_gaps: Vec::new(),
        };

        let mut old_line: u32 = 1;
        let mut new_line: u32 = 1;

        for hunk in &model.hunks {
            // The region before this hunk is implicit context at the current
            // offset; record it, then jump both counters to the declared
            // starts. A zero-count range names the line *before* the hunk,
            // so counting resumes one past it.
            map.push_gap(new_line, old_line);
            old_line = range_first_line(hunk.old_start, hunk.old_count);
            new_line = range_first_line(hunk.new_start, hunk.new_count);

            for line in &hunk.lines {
                match line {
                    DiffLine::Context(_) => {
                        map.new_to_old.insert(new_line, Some(old_line));
                        map.old_to_new.insert(old_line, Some(new_line));
                        old_line += 1;
                        new_line += 1;
                    }
                    DiffLine::Removed(_) => {
                        map.old_to_new.insert(old_line, None);
                        old_line += 1;
                    }
                    DiffLine::Added(_) => {
                        map.new_to_old.insert(new_line, None);
                        new_line += 1;
                    }
                }
            }
        }

        // Everything past the last hunk is implicit context at the final offset.
        map.push_gap(new_line, old_line);
        map
    }

    /// The old-revision line corresponding to new-revision line `new_line`,
    /// or `None` when the line was introduced by the diff (pure addition)
    /// or no baseline exists at all.
    pub fn map_new_to_old(&self, new_line: u32) -> Option<u32> {
        if self.no_baseline || new_line == 0 {
            return None;
        }
        if let Some(entry) = self.new_to_old.get(&new_line) {
            return *entry;
        }
        offset_lookup(&self.new_gaps, new_line)
    }

    /// The new-revision line corresponding to old-revision line `old_line`,
    /// or `None` when the line was removed by the diff or no baseline exists.
    pub fn map_old_to_new(&self, old_line: u32) -> Option<u32> {
        if self.no_baseline || old_line == 0 {
            return None;
        }
        if let Some(entry) = self.old_to_new.get(&old_line) {
            return *entry;
        }
        offset_lookup(&self.old_gaps, old_line)
    }

    fn push_gap(&mut self, new_line: u32, old_line: u32) {
        let offset = i64::from(old_line) - i64::from(new_line);
        self.new_gaps.push((new_line, offset));
        self.old_gaps.push((old_line, -offset));
    }
}

/// First line a hunk range actually occupies. Zero-count ranges declare the
/// line before the change site (`@@ -5,0 +6,2 @@` inserts after old line 5).
fn range_first_line(start: u32, count: u32) -> u32 {
    if count == 0 { start + 1 } else { start }
}

/// Resolve a line through the gap regions: the last region starting at or
/// before `line` supplies the offset. In-hunk lines never reach here (they
/// always have explicit entries), so the match is a genuine gap region.
fn offset_lookup(gaps: &[(u32, i64)], line: u32) -> Option<u32> {
    let (_, offset) = gaps
        .iter()
        .rev()
        .find(|(start, _)| *start <= line)
        .copied()?;
    let mapped = i64::from(line) + offset;
    u32::try_from(mapped).ok().filter(|&n| n > 0)
}
