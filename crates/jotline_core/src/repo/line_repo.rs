//! Line store contracts and file/in-memory implementations.
//!
//! # Responsibility
//! - Load and save the full ordered list of note lines.
//! - Keep file-format details inside the persistence boundary.
//!
//! # Invariants
//! - Every `load` reads the backing store in full; nothing is cached.
//! - `save` overwrites the whole store; a non-empty store always ends with
//!   a line terminator, an empty store is an empty file.
//! - A missing backing file loads as an empty sequence.

use crate::model::NoteLine;
use log::{debug, error};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::rc::Rc;

/// Default backing file, relative to the working directory.
pub const DEFAULT_NOTES_FILE: &str = "notes.txt";

#[cfg(windows)]
pub const LINE_TERMINATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_TERMINATOR: &str = "\n";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for line store reads and writes.
#[derive(Debug)]
pub enum StoreError {
    /// Backing file could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Backing file could not be written.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read notes file `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write notes file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

/// Repository interface for the ordered note line sequence.
pub trait LineRepository {
    /// Reads every stored line in order.
    fn load(&self) -> StoreResult<Vec<NoteLine>>;
    /// Replaces the stored sequence with `lines`.
    fn save(&self, lines: &[NoteLine]) -> StoreResult<()>;
}

/// Plain-text file store: one note per line.
#[derive(Debug, Clone)]
pub struct FileLineRepository {
    path: PathBuf,
}

impl FileLineRepository {
    /// Creates a store backed by `path`. The file is not touched until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LineRepository for FileLineRepository {
    fn load(&self) -> StoreResult<Vec<NoteLine>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=store_load module=repo status=ok missing_file=true path={}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        let lines = parse_lines(&raw);
        debug!(
            "event=store_load module=repo status=ok lines={}",
            lines.len()
        );
        Ok(lines)
    }

    fn save(&self, lines: &[NoteLine]) -> StoreResult<()> {
        let rendered = render_lines(lines);
        std::fs::write(&self.path, rendered).map_err(|err| {
            error!(
                "event=store_save module=repo status=error path={} error={}",
                self.path.display(),
                err
            );
            StoreError::Write {
                path: self.path.clone(),
                source: err,
            }
        })?;
        debug!(
            "event=store_save module=repo status=ok lines={}",
            lines.len()
        );
        Ok(())
    }
}

/// Process-local store, used by tests and embedders without a file.
///
/// Clones share the same underlying sequence, so a caller can keep a handle
/// for inspection after moving one into a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineRepository {
    lines: Rc<RefCell<Vec<NoteLine>>>,
}

impl MemoryLineRepository {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory store seeded with `lines`.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NoteLine>,
    {
        Self {
            lines: Rc::new(RefCell::new(lines.into_iter().map(Into::into).collect())),
        }
    }

    /// Returns a copy of the current sequence.
    pub fn snapshot(&self) -> Vec<NoteLine> {
        self.lines.borrow().clone()
    }
}

impl LineRepository for MemoryLineRepository {
    fn load(&self) -> StoreResult<Vec<NoteLine>> {
        Ok(self.lines.borrow().clone())
    }

    fn save(&self, lines: &[NoteLine]) -> StoreResult<()> {
        *self.lines.borrow_mut() = lines.to_vec();
        Ok(())
    }
}

/// Splits file content into note lines, accepting `\n` and `\r\n`.
pub fn parse_lines(raw: &str) -> Vec<NoteLine> {
    raw.lines().map(str::to_string).collect()
}

/// Joins note lines with the platform terminator plus a trailing terminator.
pub fn render_lines(lines: &[NoteLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push_str(LINE_TERMINATOR);
    }
    out
}
