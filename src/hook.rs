//! prepare-commit-msg hook logic: runs the interactive conventional-commit
//! composer against the draft commit-message file and backs up the result.
//! The binary entry point lives in `src/bin/prepare_commit_msg.rs`.

use crate::constants::COMMIT_BACKUP_FILE;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Commit sources for which the message was already supplied and the
/// composer must not run.
const SKIP_SOURCES: [&str; 2] = ["message", "template"];

/// What the hook did for one invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum HookOutcome {
    /// The commit source indicated a pre-supplied message
    Skipped,
    /// The composer wrote the message; a backup copy was stored
    Written { backup: PathBuf },
}

/// Fixed location of the commit-message backup copy.
pub fn backup_file_path() -> PathBuf {
    std::env::temp_dir().join(COMMIT_BACKUP_FILE)
}

/// Runs the prepare-commit-msg flow.
///
/// # Arguments
/// * `commit_msg_file` - Draft commit-message file supplied by git
/// * `commit_source` - Optional source tag (second hook argument)
///
/// # Errors
/// * `Error::HookCancelledError` when the composer exits non-zero
/// * `Error::MissingExecutableError` when the composer is not installed
/// * `Error::HookError` when no controlling terminal is reachable
pub fn prepare_commit_msg(
    commit_msg_file: &Path,
    commit_source: Option<&str>,
) -> Result<HookOutcome> {
    if let Some(source) = commit_source {
        if SKIP_SOURCES.contains(&source) {
            return Ok(HookOutcome::Skipped);
        }
    }

    let mut command = Command::new("cz");
    command.args(["commit", "--dry-run", "--write-message-to-file"]).arg(commit_msg_file);
    attach_terminal(&mut command)?;

    // The terminal handle is owned by the command's stdin slot; it is
    // released when `command` goes out of scope on every path below.
    let status = match command.status() {
        Ok(status) => status,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingExecutableError { command: "cz".to_string() })
        }
        Err(e) => return Err(Error::IoError(e)),
    };

    if !status.success() {
        return Err(Error::HookCancelledError);
    }

    let backup = backup_file_path();
    std::fs::copy(commit_msg_file, &backup).map_err(Error::IoError)?;
    Ok(HookOutcome::Written { backup })
}

/// Connects the composer to the controlling terminal so its interactive
/// prompt works even though git runs hooks with redirected stdin.
#[cfg(not(windows))]
fn attach_terminal(command: &mut Command) -> Result<()> {
    let tty = std::fs::File::open("/dev/tty").map_err(|e| {
        Error::HookError(format!("cannot open controlling terminal /dev/tty: {}", e))
    })?;
    command.stdin(std::process::Stdio::from(tty));
    Ok(())
}

/// On Windows the composer needs a fresh console instead of an inherited
/// terminal handle.
#[cfg(windows)]
fn attach_terminal(command: &mut Command) -> Result<()> {
    use std::os::windows::process::CommandExt;
    const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
    command.creation_flags(CREATE_NEW_CONSOLE);
    command.stdin(std::process::Stdio::null());
    Ok(())
}
