//! Two-stack undo/redo log.
//!
//! # Responsibility
//! - Keep applied actions (history) and undone actions (future) in order.
//! - Move actions between the stacks without touching storage.
//!
//! # Invariants
//! - The last element of each stack is the next one to pop.
//! - Recording a new action clears the future stack.
//! - The log lives in memory only and is never persisted.

use crate::model::action::Action;
use serde::Serialize;

/// Applied and undone actions for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionLog {
    history: Vec<Action>,
    future: Vec<Action>,
}

impl ActionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly applied action.
    ///
    /// Any previously undone actions are discarded; their recorded indices
    /// no longer describe the store once a new mutation lands.
    pub fn record(&mut self, action: Action) {
        self.future.clear();
        self.history.push(action);
    }

    /// Moves the most recent applied action to the future stack.
    ///
    /// Returns the moved action, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Action> {
        let action = self.history.pop()?;
        self.future.push(action.clone());
        Some(action)
    }

    /// Moves the most recently undone action back to history.
    ///
    /// Returns the moved action, or `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<Action> {
        let action = self.future.pop()?;
        self.history.push(action.clone());
        Some(action)
    }

    /// Reverts the last `undo` move. Used when inverting against storage fails.
    pub(crate) fn rollback_undo(&mut self) {
        if let Some(action) = self.future.pop() {
            self.history.push(action);
        }
    }

    /// Reverts the last `redo` move. Used when re-applying against storage fails.
    pub(crate) fn rollback_redo(&mut self) {
        if let Some(action) = self.history.pop() {
            self.future.push(action);
        }
    }

    /// Applied actions, oldest first.
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Undone actions, in undo order.
    pub fn future(&self) -> &[Action] {
        &self.future
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ActionLog;
    use crate::model::action::Action;

    #[test]
    fn undo_and_redo_move_actions_between_stacks() {
        let mut log = ActionLog::new();
        log.record(Action::add("a", 0));
        log.record(Action::add("b", 1));

        assert_eq!(log.undo(), Some(Action::add("b", 1)));
        assert_eq!(log.history(), &[Action::add("a", 0)]);
        assert_eq!(log.future(), &[Action::add("b", 1)]);

        assert_eq!(log.redo(), Some(Action::add("b", 1)));
        assert_eq!(log.history().len(), 2);
        assert!(log.future().is_empty());
    }

    #[test]
    fn undo_on_empty_history_leaves_future_untouched() {
        let mut log = ActionLog::new();
        log.record(Action::add("a", 0));
        log.undo();
        let before = log.clone();

        assert_eq!(log.undo(), None);
        assert_eq!(log, before);
        assert!(log.can_redo());
    }

    #[test]
    fn record_clears_future() {
        let mut log = ActionLog::new();
        log.record(Action::add("a", 0));
        log.undo();
        log.record(Action::add("b", 0));

        assert!(!log.can_redo());
        assert_eq!(log.redo(), None);
    }

    #[test]
    fn rollback_restores_previous_stack_shape() {
        let mut log = ActionLog::new();
        log.record(Action::delete("a", 2));
        let before = log.clone();

        log.undo();
        log.rollback_undo();
        assert_eq!(log, before);

        log.undo();
        let undone = log.clone();
        log.redo();
        log.rollback_redo();
        assert_eq!(log, undone);
    }
}
