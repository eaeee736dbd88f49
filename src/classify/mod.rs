//! Classification of new-revision messages as newly introduced or
//! pre-existing.
//!
//! The decision is per-message and independent: no global matching across
//! the two revisions is needed, because lookup is by exact match key at a
//! specific mapped old line.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::diff::LineMap;
use crate::report::{Message, MessageSet};


/// How a new-revision message is matched against old-revision messages on
/// its mapped line.
///
/// Column and severity are never part of the key: a rule's exact column or
/// severity can shift between linter versions without the issue being new.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Same rule code and same text, case-sensitive exact match (default).
    #[default]
    CodeAndText,
    /// Same rule code only; tolerates linters that embed line numbers or
    /// other drifting detail in the message text.
    CodeOnly,
}

impl MatchPolicy {
    fn matches(self, old: &Message, new: &Message) -> bool {
        if old.code != new.code {
            return false;
        }
        match self {
            MatchPolicy::CodeAndText => old.text == new.text,
            MatchPolicy::CodeOnly => true,
        }
    }
}

/// Classification outcome for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Introduced by the change; propagates to the report.
    New,
    /// Present in materially the same form in the old revision; dropped
    /// from the report but counted for diagnostics.
    PreExisting,
}

/// A message tagged with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedMessage {
    pub message: Message,
    pub classification: Classification,
}

/// Result of classifying one file's messages.
#[derive(Debug, Clone)]
pub struct ClassifiedSet {
    pub messages: Vec<ClassifiedMessage>,
}

impl ClassifiedSet {
    /// The newly introduced messages as an owned set, in original order.
    pub fn new_issues(&self) -> MessageSet {
        let mut set = MessageSet::default();
        for classified in &self.messages {
            if classified.classification == Classification::New {
                set.push(classified.message.clone());
            }
        }
        set
    }

    /// How many messages were dropped as pre-existing.
    pub fn pre_existing_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|c| c.classification == Classification::PreExisting)
            .count()
    }
}

/// Classify each message of `new_messages`, in original order.
///
/// A message on a line with no old counterpart (pure addition, or no
/// baseline at all) is `New`: there is no old-revision content to compare
/// against. Otherwise it is `PreExisting` exactly when the old set carries
/// a matching message at the mapped line, and `New` when it does not: the
/// old line existed but did not carry this issue, so the surrounding edits
/// caused the linter to newly flag it there.
///
/// Pure function of its inputs; no failure modes.
pub fn classify(
    old_messages: &MessageSet,
    new_messages: &MessageSet,
    mapper: &LineMap,
    policy: MatchPolicy,
) -> ClassifiedSet {
    let mut messages = Vec::with_capacity(new_messages.len());

    for message in &new_messages.messages {
        let classification = match mapper.map_new_to_old(message.line) {
            None => Classification::New,
            Some(old_line) => {
                let carried_over = old_messages
                    .messages_at_line(old_line)
                    .iter()
                    .any(|old| policy.matches(old, message));
                if carried_over {
                    Classification::PreExisting
                } else {
                    Classification::New
                }
            }
        };
        messages.push(ClassifiedMessage {
            message: message.clone(),
            classification,
        });
    }

    let set = ClassifiedSet { messages };
    debug!(
        "classified {} message(s): {} new, {} pre-existing",
        set.messages.len(),
        set.messages.len() - set.pre_existing_count(),
        set.pre_existing_count()
    );
    set
}
