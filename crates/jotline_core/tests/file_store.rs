use jotline_core::repo::line_repo::LINE_TERMINATOR;
use jotline_core::{FileLineRepository, LineRepository, NoteService, StoreError};
use std::fs;

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileLineRepository::new(dir.path().join("notes.txt"));
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn save_writes_terminated_lines_and_load_reads_them_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let repo = FileLineRepository::new(&path);

    repo.save(&["one".to_string(), "two".to_string()]).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw, format!("one{LINE_TERMINATOR}two{LINE_TERMINATOR}"));
    assert_eq!(repo.load().unwrap(), vec!["one", "two"]);
}

#[test]
fn saving_empty_sequence_leaves_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let repo = FileLineRepository::new(&path);

    repo.save(&[]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn load_accepts_hand_edited_file_without_final_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "alpha\r\nbeta").unwrap();

    let repo = FileLineRepository::new(&path);
    assert_eq!(repo.load().unwrap(), vec!["alpha", "beta"]);
}

#[test]
fn unreadable_path_reports_read_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a notes file.
    let repo = FileLineRepository::new(dir.path());
    let err = repo.load().unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }));
    assert!(err.to_string().contains("failed to read notes file"));
}

#[test]
fn unwritable_path_reports_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileLineRepository::new(dir.path().join("missing-dir").join("notes.txt"));
    let err = repo.save(&["x".to_string()]).unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }));
}

#[test]
fn session_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut service = NoteService::new(FileLineRepository::new(&path));

    service.add("a").unwrap();
    service.add("b").unwrap();
    service.delete("a").unwrap();
    service.undo().unwrap();
    assert_eq!(service.list().unwrap(), vec!["a", "b"]);

    service.undo().unwrap();
    service.undo().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    service.redo().unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("a{LINE_TERMINATOR}")
    );
}

#[test]
fn failed_undo_keeps_action_in_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut service = NoteService::new(FileLineRepository::new(&path));
    service.add("a").unwrap();

    // Replace the file with a directory so the next load fails.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    assert!(service.undo().is_err());
    assert_eq!(service.action_log().history().len(), 1);
    assert!(service.action_log().future().is_empty());
}

#[test]
fn failed_redo_keeps_action_in_future() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut service = NoteService::new(FileLineRepository::new(&path));
    service.add("a").unwrap();
    service.undo().unwrap();

    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    assert!(service.redo().is_err());
    assert!(service.action_log().history().is_empty());
    assert_eq!(service.action_log().future().len(), 1);

    fs::remove_dir(&path).unwrap();
    assert!(service.redo().is_ok());
    assert_eq!(service.list().unwrap(), vec!["a"]);
    assert!(service.action_log().future().is_empty());
}
