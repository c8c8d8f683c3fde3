//! Interactive read loop.
//!
//! # Responsibility
//! - Print the banner and prompt, read one command per line, dispatch it.
//!
//! # Invariants
//! - One command is fully processed before the next line is read.
//! - End of input ends the session like `exit`.

use crate::command::{dispatch_line, Flow, PROMPT, WELCOME};
use crate::repo::line_repo::LineRepository;
use crate::service::note_service::NoteService;
use log::info;
use std::io::{self, BufRead, Write};

/// Runs commands from `input` until `exit` or end of input.
///
/// # Errors
/// - Returns an error when reading input or writing output fails.
pub fn run_session<R, I, W>(
    service: &mut NoteService<R>,
    mut input: I,
    out: &mut W,
) -> io::Result<()>
where
    R: LineRepository,
    I: BufRead,
    W: Write,
{
    writeln!(out, "{WELCOME}")?;
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            info!(
                "event=session_end module=session status=ok reason=eof session_id={}",
                service.session_id()
            );
            writeln!(out)?;
            return Ok(());
        }

        if dispatch_line(service, &line, out)? == Flow::Exit {
            info!(
                "event=session_end module=session status=ok reason=exit session_id={}",
                service.session_id()
            );
            return Ok(());
        }
    }
}
