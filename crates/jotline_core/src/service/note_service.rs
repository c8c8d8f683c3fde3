//! Note use-case service and undo/redo engine.
//!
//! # Responsibility
//! - Provide add/delete/search/list over a `LineRepository`.
//! - Record every add/delete in the session `ActionLog`.
//! - Invert and re-apply logged actions against the store for undo/redo.
//!
//! # Invariants
//! - Every operation reloads the full store, mutates in memory and rewrites
//!   the full store; nothing is cached between calls.
//! - `delete` removes only the first exact match.
//! - An action is logged only after its mutation was saved.
//! - A failed undo/redo leaves both stacks as they were before the call.
//! - Recorded indices are positional. An index past the end of the current
//!   store is treated as stale: removals become no-ops, insertions append.

use crate::history::action_log::ActionLog;
use crate::model::action::{Action, ActionKind};
use crate::model::{is_single_line, NoteLine};
use crate::repo::line_repo::{LineRepository, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Note content contains a line break and cannot be stored as one line.
    InvalidNote(String),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNote(value) => write!(
                f,
                "note must be a single line, got {} chars with a line break",
                value.chars().count()
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidNote(_) => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The first exact match was removed from `index`.
    Deleted { index: usize },
    /// No line equals the requested content; nothing changed.
    NotFound,
}

/// Result of an undo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The action was inverted and moved to the future stack.
    Undone(Action),
    /// History was empty; nothing changed.
    NothingToUndo,
}

/// Result of a redo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedoOutcome {
    /// The action was re-applied and moved back to history.
    Redone(Action),
    /// Future stack was empty; nothing changed.
    NothingToRedo,
}

/// One interactive session: a line store plus its undo/redo log.
pub struct NoteService<R: LineRepository> {
    repo: R,
    log: ActionLog,
    session_id: Uuid,
}

impl<R: LineRepository> NoteService<R> {
    /// Creates a session over `repo` with empty history and future stacks.
    pub fn new(repo: R) -> Self {
        let session_id = Uuid::new_v4();
        info!("event=session_start module=service status=ok session_id={session_id}");
        Self {
            repo,
            log: ActionLog::new(),
            session_id,
        }
    }

    /// Identifier included in this session's log events.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Read-only view of the undo/redo stacks.
    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    /// Appends `content` as the new last line and records an `Add` action.
    ///
    /// Returns the zero-based index the note was stored at. Duplicates are
    /// allowed.
    pub fn add(&mut self, content: impl Into<String>) -> NoteServiceResult<usize> {
        let content = content.into();
        if !is_single_line(&content) {
            return Err(NoteServiceError::InvalidNote(content));
        }

        let mut lines = self.repo.load()?;
        let index = lines.len();
        lines.push(content.clone());
        self.repo.save(&lines)?;

        info!(
            "event=note_add module=service status=ok session_id={} index={} content_len={}",
            self.session_id,
            index,
            content.len()
        );
        self.log.record(Action::add(content, index));
        Ok(index)
    }

    /// Removes the first line exactly equal to `content`.
    pub fn delete(&mut self, content: &str) -> NoteServiceResult<DeleteOutcome> {
        let mut lines = self.repo.load()?;
        let Some(index) = lines.iter().position(|line| line == content) else {
            info!(
                "event=note_delete module=service status=not_found session_id={}",
                self.session_id
            );
            return Ok(DeleteOutcome::NotFound);
        };

        let removed = lines.remove(index);
        self.repo.save(&lines)?;

        info!(
            "event=note_delete module=service status=ok session_id={} index={}",
            self.session_id, index
        );
        self.log.record(Action::delete(removed, index));
        Ok(DeleteOutcome::Deleted { index })
    }

    /// Returns every line containing `needle` (case-sensitive), in file order.
    pub fn search(&self, needle: &str) -> NoteServiceResult<Vec<NoteLine>> {
        let hits: Vec<NoteLine> = self
            .repo
            .load()?
            .into_iter()
            .filter(|line| line.contains(needle))
            .collect();
        info!(
            "event=note_search module=service status=ok session_id={} hits={}",
            self.session_id,
            hits.len()
        );
        Ok(hits)
    }

    /// Returns all stored lines in order.
    pub fn list(&self) -> NoteServiceResult<Vec<NoteLine>> {
        Ok(self.repo.load()?)
    }

    /// Inverts the most recent applied action.
    ///
    /// # Errors
    /// - Returns `NoteServiceError::Store` when the store cannot be loaded or
    ///   saved; the action stays on the history stack in that case.
    pub fn undo(&mut self) -> NoteServiceResult<UndoOutcome> {
        let Some(action) = self.log.undo() else {
            info!(
                "event=undo module=service status=empty session_id={}",
                self.session_id
            );
            return Ok(UndoOutcome::NothingToUndo);
        };

        let inverse = match action.kind {
            ActionKind::Add => Mutation::Remove,
            ActionKind::Delete => Mutation::Insert,
        };
        if let Err(err) = self.apply(&action, inverse, "undo") {
            self.log.rollback_undo();
            return Err(err);
        }
        Ok(UndoOutcome::Undone(action))
    }

    /// Re-applies the most recently undone action.
    ///
    /// # Errors
    /// - Returns `NoteServiceError::Store` when the store cannot be loaded or
    ///   saved; the action stays on the future stack in that case.
    pub fn redo(&mut self) -> NoteServiceResult<RedoOutcome> {
        let Some(action) = self.log.redo() else {
            info!(
                "event=redo module=service status=empty session_id={}",
                self.session_id
            );
            return Ok(RedoOutcome::NothingToRedo);
        };

        let replay = match action.kind {
            ActionKind::Add => Mutation::Insert,
            ActionKind::Delete => Mutation::Remove,
        };
        if let Err(err) = self.apply(&action, replay, "redo") {
            self.log.rollback_redo();
            return Err(err);
        }
        Ok(RedoOutcome::Redone(action))
    }

    fn apply(&self, action: &Action, mutation: Mutation, event: &str) -> NoteServiceResult<()> {
        let mut lines = self.repo.load()?;
        let len_before = lines.len();
        let stale = match mutation {
            Mutation::Remove => !remove_at(&mut lines, action.index),
            Mutation::Insert => !insert_at(&mut lines, action.index, &action.content),
        };
        self.repo.save(&lines)?;

        if stale {
            warn!(
                "event={} module=service status=ok session_id={} kind={} index={} len={} stale_index=true",
                event, self.session_id, action.kind, action.index, len_before
            );
        } else {
            info!(
                "event={} module=service status=ok session_id={} kind={} index={}",
                event, self.session_id, action.kind, action.index
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Mutation {
    Remove,
    Insert,
}

/// Removes the line at `index`. Returns `false` when `index` is out of range.
fn remove_at(lines: &mut Vec<NoteLine>, index: usize) -> bool {
    if index < lines.len() {
        lines.remove(index);
        true
    } else {
        false
    }
}

/// Inserts `content` at `index`, shifting later lines right.
///
/// Returns `false` when `index` is past the end; the line is appended then.
fn insert_at(lines: &mut Vec<NoteLine>, index: usize, content: &str) -> bool {
    if index <= lines.len() {
        lines.insert(index, content.to_string());
        true
    } else {
        lines.push(content.to_string());
        false
    }
}
