use armature::constants::COMMIT_BACKUP_FILE;
use armature::hook::{backup_file_path, prepare_commit_msg, HookOutcome};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_skips_presupplied_message_sources() {
    let temp_dir = TempDir::new().unwrap();
    let msg_file = temp_dir.path().join("COMMIT_EDITMSG");
    fs::write(&msg_file, "feat: already written\n").unwrap();

    for source in ["message", "template"] {
        let outcome = prepare_commit_msg(&msg_file, Some(source)).unwrap();
        assert_eq!(outcome, HookOutcome::Skipped);
    }

    // The draft file is left untouched on skip.
    assert_eq!(fs::read_to_string(&msg_file).unwrap(), "feat: already written\n");
}

#[test]
fn test_backup_location() {
    let backup = backup_file_path();
    assert_eq!(backup.file_name().unwrap(), COMMIT_BACKUP_FILE);
    assert!(backup.starts_with(std::env::temp_dir()));
}

#[test]
#[ignore = "requires a controlling terminal and the cz composer"]
fn test_interactive_compose() {
    let temp_dir = TempDir::new().unwrap();
    let msg_file = temp_dir.path().join("COMMIT_EDITMSG");
    fs::write(&msg_file, "").unwrap();

    let outcome = prepare_commit_msg(&msg_file, None).unwrap();
    assert!(matches!(outcome, HookOutcome::Written { .. }));
}
