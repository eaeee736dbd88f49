//! Combining per-file classified results into one ordered result set.

use super::message::MessageSet;

/// Concatenate per-file message sets in the order the files were supplied
/// to the run, summing the summary counts.
///
/// No reordering and no cross-file de-duplication: two different files
/// never share a message. Merging zero inputs yields an empty set, which is
/// the success path for "no files had new issues".
pub fn merge<I>(sets: I) -> MessageSet
where
    I: IntoIterator<Item = MessageSet>,
{
    let mut merged = MessageSet::default();
    for set in sets {
        merged.messages.extend(set.messages);
        merged.error_count += set.error_count;
        merged.warning_count += set.warning_count;
    }
    merged
}
