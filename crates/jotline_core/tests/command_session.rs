use jotline_core::{
    dispatch_line, execute, run_session, Command, FileLineRepository, Flow, MemoryLineRepository,
    NoteService,
};
use std::fs;
use std::io::Cursor;

fn run_script(script: &str) -> (String, MemoryLineRepository) {
    let repo = MemoryLineRepository::new();
    let mut service = NoteService::new(repo.clone());
    let mut out = Vec::new();
    run_session(&mut service, Cursor::new(script), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), repo)
}

#[test]
fn show_prints_padded_one_based_index() {
    let (out, _) = run_script("add first\nadd second\nshow\nexit\n");
    assert!(out.contains("   1 | first\n"));
    assert!(out.contains("   2 | second\n"));
    assert!(out.ends_with("Exiting jotline.\n"));
}

#[test]
fn session_reports_outcomes_for_each_command() {
    let (out, repo) = run_script(
        "add a\ndelete zzz\nsearch a\nundo\nundo\nredo\nredo\nbogus\nexit\n",
    );
    let expected = [
        "Note added.",
        "Note not found.",
        "Note found: a",
        "Undo successful.",
        "No actions to undo.",
        "Redo successful.",
        "No actions to redo.",
        "Unknown command. Type 'help' to see available commands.",
    ];
    let mut cursor = 0;
    for line in expected {
        let found = out[cursor..]
            .find(line)
            .unwrap_or_else(|| panic!("missing `{line}` in output:\n{out}"));
        cursor += found + line.len();
    }
    assert_eq!(repo.snapshot(), vec!["a"]);
}

#[test]
fn session_prints_banner_and_prompts() {
    let (out, _) = run_script("exit\n");
    assert!(out.starts_with("Welcome to jotline."));
    assert!(out.contains(">> "));
}

#[test]
fn session_ends_at_end_of_input() {
    let (out, repo) = run_script("add kept");
    assert!(out.contains("Note added."));
    assert_eq!(repo.snapshot(), vec!["kept"]);
}

#[test]
fn commands_after_exit_are_not_run() {
    let (_, repo) = run_script("exit\nadd never\n");
    assert!(repo.snapshot().is_empty());
}

#[test]
fn print_dumps_both_stacks_as_json() {
    let mut service = NoteService::new(MemoryLineRepository::new());
    let mut out = Vec::new();
    dispatch_line(&mut service, "add a", &mut out).unwrap();
    dispatch_line(&mut service, "add b", &mut out).unwrap();
    dispatch_line(&mut service, "undo", &mut out).unwrap();
    out.clear();

    dispatch_line(&mut service, "print", &mut out).unwrap();
    let dump: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(dump["history"][0]["kind"], "add");
    assert_eq!(dump["history"][0]["content"], "a");
    assert_eq!(dump["future"][0]["content"], "b");
    assert_eq!(dump["future"][0]["index"], 1);
}

#[test]
fn test_command_appends_ten_generated_notes() {
    let repo = MemoryLineRepository::new();
    let mut service = NoteService::new(repo.clone());
    let mut out = Vec::new();

    let flow = execute(&mut service, &Command::Test, &mut out).unwrap();
    assert_eq!(flow, Flow::Continue);

    let lines = repo.snapshot();
    assert_eq!(lines.len(), 10);
    assert!(lines[0].starts_with("Line 1 added at "));
    assert!(lines[9].starts_with("Line 10 added at "));
    assert_eq!(service.action_log().history().len(), 10);
}

#[test]
fn help_lists_every_command() {
    let mut service = NoteService::new(MemoryLineRepository::new());
    let mut out = Vec::new();
    execute(&mut service, &Command::Help, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    for verb in ["add", "show", "delete", "search", "undo", "redo", "exit"] {
        assert!(text.contains(verb), "help should mention `{verb}`");
    }
}

#[test]
fn store_errors_are_reported_and_session_continues() {
    let dir = tempfile::tempdir().unwrap();
    // Backing path is a directory: every load fails.
    let mut service = NoteService::new(FileLineRepository::new(dir.path()));
    let mut out = Vec::new();

    let flow = dispatch_line(&mut service, "add x", &mut out).unwrap();
    assert_eq!(flow, Flow::Continue);
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Error: failed to read notes file"));
    assert!(service.action_log().history().is_empty());
}

#[test]
fn exit_returns_exit_flow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut service = NoteService::new(FileLineRepository::new(&path));
    let mut out = Vec::new();

    assert_eq!(
        dispatch_line(&mut service, "add persisted", &mut out).unwrap(),
        Flow::Continue
    );
    assert_eq!(
        dispatch_line(&mut service, "exit", &mut out).unwrap(),
        Flow::Exit
    );
    assert!(fs::read_to_string(&path).unwrap().starts_with("persisted"));
}
