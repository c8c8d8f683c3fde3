//! Core domain logic for jotline.
//! Line-based note storage with a session undo/redo log.

pub mod command;
pub mod history;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use command::{dispatch_line, execute, Command, Flow};
pub use history::action_log::ActionLog;
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::action::{Action, ActionKind};
pub use model::NoteLine;
pub use repo::line_repo::{
    FileLineRepository, LineRepository, MemoryLineRepository, StoreError, StoreResult,
    DEFAULT_NOTES_FILE,
};
pub use service::note_service::{
    DeleteOutcome, NoteService, NoteServiceError, NoteServiceResult, RedoOutcome, UndoOutcome,
};
pub use session::run_session;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
