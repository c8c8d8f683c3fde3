//! Domain model for note lines and reversible actions.
//!
//! # Responsibility
//! - Define the records shared by the store, action log and services.
//!
//! # Invariants
//! - A note line never contains a line break.
//! - Notes are identified by position only; positions shift on insert/remove.

pub mod action;

/// One persisted line of user text.
pub type NoteLine = String;

/// Returns whether `content` can be stored as a single note line.
pub fn is_single_line(content: &str) -> bool {
    !content.contains(['\n', '\r'])
}
