//! prepare-commit-msg binary, invoked by git before a commit message is
//! finalized. Exit code 0 on success or intentional skip, 1 on composer
//! cancellation or any unexpected error.

use armature::error::Error;
use armature::hook::{prepare_commit_msg, HookOutcome};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(commit_msg_file) = args.next() else {
        eprintln!("usage: prepare-commit-msg <commit-msg-file> [commit-source]");
        return ExitCode::FAILURE;
    };
    let commit_source = args.next();

    match prepare_commit_msg(&PathBuf::from(commit_msg_file), commit_source.as_deref()) {
        Ok(HookOutcome::Skipped) | Ok(HookOutcome::Written { .. }) => ExitCode::SUCCESS,
        Err(err @ Error::HookCancelledError) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("An unexpected error occurred: {}", err);
            ExitCode::FAILURE
        }
    }
}
