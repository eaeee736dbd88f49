//! Linter report parsing and result merging.

mod merge;
mod message;


pub use merge::merge;
pub use message::{Message, MessageSet, Severity};
