//! Command parsing and dispatch.
//!
//! # Responsibility
//! - Turn one input line into a typed `Command`.
//! - Run a command against a `NoteService` and render user-visible output.
//!
//! # Invariants
//! - Service errors are reported to the user and never end the session.
//! - Only `exit` returns `Flow::Exit`.

use crate::repo::line_repo::LineRepository;
use crate::service::note_service::{
    DeleteOutcome, NoteService, NoteServiceError, RedoOutcome, UndoOutcome,
};
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, Write};
use std::time::Instant;

/// Verb, then everything after the first single space.
static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S*)(?: (.*))?$").expect("valid command regex"));

const GENERATED_NOTE_COUNT: usize = 10;

pub const WELCOME: &str = "Welcome to jotline. Type 'help' to see available commands.";
pub const PROMPT: &str = ">> ";

const HELP_TEXT: &str = "Available commands:
  add [note] - Add a new note
  show - Show all notes
  delete [note] - Delete a note
  search [note] - Search for a note
  undo - Undo the last action
  redo - Redo the last undone action
  print - Dump the undo/redo stacks
  test - Add 10 generated notes
  exit - Exit the application";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Show,
    Delete(String),
    Search(String),
    Undo,
    Redo,
    Help,
    Exit,
    /// Dumps the history and future stacks.
    Print,
    /// Appends a batch of generated notes.
    Test,
    /// Anything else, carrying the unrecognized verb.
    Unknown(String),
}

impl Command {
    /// Parses a raw input line.
    ///
    /// Surrounding whitespace is trimmed; the argument is everything after the
    /// first single space, kept verbatim. Commands that take no argument ignore
    /// one if given.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let Some(caps) = COMMAND_RE.captures(trimmed) else {
            return Self::Unknown(trimmed.to_string());
        };
        let verb = caps.get(1).map_or("", |m| m.as_str());
        let arg = caps
            .get(2)
            .map_or_else(String::new, |m| m.as_str().to_string());

        match verb {
            "add" => Self::Add(arg),
            "show" => Self::Show,
            "delete" => Self::Delete(arg),
            "search" => Self::Search(arg),
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "help" => Self::Help,
            "exit" => Self::Exit,
            "print" => Self::Print,
            "test" => Self::Test,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Verb name used in log events.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Show => "show",
            Self::Delete(_) => "delete",
            Self::Search(_) => "search",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Help => "help",
            Self::Exit => "exit",
            Self::Print => "print",
            Self::Test => "test",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

enum DispatchError {
    /// Writing output failed; fatal for the session.
    Output(io::Error),
    /// Use-case failure; reported and survived.
    Service(NoteServiceError),
    /// Stack dump could not be rendered; reported and survived.
    Dump(serde_json::Error),
}

impl From<io::Error> for DispatchError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

impl From<NoteServiceError> for DispatchError {
    fn from(value: NoteServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(value: serde_json::Error) -> Self {
        Self::Dump(value)
    }
}

/// How a command ended, for the per-command log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ok,
    Error,
}

impl Status {
    fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// Parses and executes one input line.
pub fn dispatch_line<R: LineRepository, W: Write>(
    service: &mut NoteService<R>,
    input: &str,
    out: &mut W,
) -> io::Result<Flow> {
    execute(service, &Command::parse(input), out)
}

/// Executes `command`, writes its user-visible output to `out` and logs one
/// `event=command` entry with its status and duration.
///
/// # Errors
/// - Returns an error only when writing to `out` fails. Service errors are
///   printed as `Error: ...` lines and the session continues.
pub fn execute<R: LineRepository, W: Write>(
    service: &mut NoteService<R>,
    command: &Command,
    out: &mut W,
) -> io::Result<Flow> {
    let started_at = Instant::now();
    let result = run(service, command, out);
    let (flow, status) = settle(command, result, out)?;
    info!(
        "event=command module=command status={} verb={} duration_ms={}",
        status.as_str(),
        command.verb(),
        started_at.elapsed().as_millis()
    );
    Ok(flow)
}

/// Reports recoverable failures to the user; only output errors escape.
fn settle<W: Write>(
    command: &Command,
    result: Result<Flow, DispatchError>,
    out: &mut W,
) -> io::Result<(Flow, Status)> {
    let message = match result {
        Ok(flow) => return Ok((flow, Status::Ok)),
        Err(DispatchError::Output(err)) => return Err(err),
        Err(DispatchError::Service(err)) => err.to_string(),
        Err(DispatchError::Dump(err)) => err.to_string(),
    };
    error!(
        "event=command_failed module=command status=error verb={} error={}",
        command.verb(),
        message
    );
    writeln!(out, "Error: {message}")?;
    Ok((Flow::Continue, Status::Error))
}

fn run<R: LineRepository, W: Write>(
    service: &mut NoteService<R>,
    command: &Command,
    out: &mut W,
) -> Result<Flow, DispatchError> {
    match command {
        Command::Add(note) => {
            service.add(note.as_str())?;
            writeln!(out, "Note added.")?;
        }
        Command::Show => {
            for (idx, line) in service.list()?.iter().enumerate() {
                writeln!(out, "{:>4} | {}", idx + 1, line)?;
            }
        }
        Command::Delete(note) => match service.delete(note)? {
            DeleteOutcome::Deleted { .. } => writeln!(out, "Note deleted.")?,
            DeleteOutcome::NotFound => writeln!(out, "Note not found.")?,
        },
        Command::Search(needle) => {
            let hits = service.search(needle)?;
            if hits.is_empty() {
                writeln!(out, "Note not found.")?;
            }
            for hit in &hits {
                writeln!(out, "Note found: {hit}")?;
            }
        }
        Command::Undo => match service.undo()? {
            UndoOutcome::Undone(_) => writeln!(out, "Undo successful.")?,
            UndoOutcome::NothingToUndo => writeln!(out, "No actions to undo.")?,
        },
        Command::Redo => match service.redo()? {
            RedoOutcome::Redone(_) => writeln!(out, "Redo successful.")?,
            RedoOutcome::NothingToRedo => writeln!(out, "No actions to redo.")?,
        },
        Command::Help => writeln!(out, "{HELP_TEXT}")?,
        Command::Exit => {
            writeln!(out, "Exiting jotline.")?;
            return Ok(Flow::Exit);
        }
        Command::Print => {
            let dump = serde_json::to_string_pretty(service.action_log())?;
            writeln!(out, "{dump}")?;
        }
        Command::Test => {
            let stamp = chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            for i in 1..=GENERATED_NOTE_COUNT {
                service.add(format!("Line {i} added at {stamp}"))?;
                writeln!(out, "Note added.")?;
            }
        }
        Command::Unknown(_) => {
            writeln!(out, "Unknown command. Type 'help' to see available commands.")?
        }
    }
    Ok(Flow::Continue)
}
