//! In-memory edit history for undo/redo.

pub mod action_log;
