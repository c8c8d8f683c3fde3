//! Reversible action record.
//!
//! # Responsibility
//! - Describe one applied add/delete with enough data to invert it.
//!
//! # Invariants
//! - `index` is the position at which the action was originally applied:
//!   the append position for `Add`, the pre-removal position for `Delete`.
//! - `index` is positional, not content-addressed; it goes stale once an
//!   unrelated mutation shifts earlier lines.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Kind of a reversible note mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// A line was appended.
    Add,
    /// A line was removed.
    Delete,
}

impl ActionKind {
    /// Stable lowercase name used in logs and dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Delete => "delete",
        }
    }
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the undo/redo log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    /// Full note text affected by the action.
    pub content: String,
    /// Zero-based position where the action was applied.
    pub index: usize,
}

impl Action {
    /// Records an append of `content` at `index`.
    pub fn add(content: impl Into<String>, index: usize) -> Self {
        Self {
            kind: ActionKind::Add,
            content: content.into(),
            index,
        }
    }

    /// Records a removal of `content` from `index`.
    pub fn delete(content: impl Into<String>, index: usize) -> Self {
        Self {
            kind: ActionKind::Delete,
            content: content.into(),
            index,
        }
    }
}
