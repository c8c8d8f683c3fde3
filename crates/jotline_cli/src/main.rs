//! Interactive jotline shell.
//!
//! # Responsibility
//! - Wire environment-driven logging, the default notes file and stdin/stdout
//!   into a core session.

use jotline_core::{
    init_logging, run_session, FileLineRepository, LogConfig, NoteService, DEFAULT_NOTES_FILE,
};
use log::error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logging is optional; a bad setting must not block note taking.
    match LogConfig::from_env() {
        Ok(Some(config)) => {
            if let Err(err) = init_logging(&config) {
                eprintln!("warning: logging disabled: {err}");
            }
        }
        Ok(None) => {}
        Err(err) => eprintln!("warning: logging disabled: {err}"),
    }

    let mut service = NoteService::new(FileLineRepository::new(DEFAULT_NOTES_FILE));
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match run_session(&mut service, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=session_end module=cli status=error error={err}");
            eprintln!("jotline: {err}");
            ExitCode::FAILURE
        }
    }
}
