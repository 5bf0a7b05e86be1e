//! Pre and post generation hook processing.
//! Templates may carry executable hooks in:
//! - hooks/pre_generate
//! - hooks/post_generate
//! Hooks receive the template directory, output directory and resolved
//! options as a JSON payload on stdin.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{ChildStdout, Command, Stdio};

use crate::error::{Error, Result};
use crate::prompt::Prompter;
use serde::Serialize;

/// JSON payload piped to a hook's stdin.
#[derive(Serialize)]
pub struct HookPayload<'a> {
    pub template_dir: &'a str,
    pub output_dir: &'a str,
    pub context: &'a serde_json::Value,
}

/// Returns the pre and post generation hook paths for a template.
pub fn get_hook_files<P: AsRef<Path>>(template_dir: P) -> (PathBuf, PathBuf) {
    let hooks_dir = template_dir.as_ref().join("hooks");
    (hooks_dir.join("pre_generate"), hooks_dir.join("post_generate"))
}

/// Asks for confirmation before executing template-defined hooks.
/// Returns `false` without prompting when the template has no hooks.
pub fn confirm_hook_execution<P: AsRef<Path>>(
    prompter: &dyn Prompter,
    template_dir: P,
    skip_hooks_check: bool,
) -> Result<bool> {
    let (pre_hook, post_hook) = get_hook_files(&template_dir);
    if !pre_hook.exists() && !post_hook.exists() {
        return Ok(false);
    }
    prompter.confirm(
        skip_hooks_check,
        "This template contains hooks that will execute commands on your system. Run them?"
            .to_string(),
    )
}

/// Executes a single hook script.
///
/// # Arguments
/// * `capture_stdout` - When set, the hook's stdout is returned so its
///   output can preload answers; otherwise it is inherited
///
/// # Errors
/// * `Error::HookError` if the hook exits non-zero
pub fn run_hook(
    template_dir: &Path,
    output_dir: &Path,
    script_path: &Path,
    context: &serde_json::Value,
    capture_stdout: bool,
) -> Result<Option<ChildStdout>> {
    if !script_path.exists() {
        return Ok(None);
    }

    let payload = serde_json::to_string(&HookPayload {
        template_dir: &template_dir.display().to_string(),
        output_dir: &output_dir.display().to_string(),
        context,
    })?;

    let mut child = Command::new(script_path)
        .stdin(Stdio::piped())
        .stdout(if capture_stdout { Stdio::piped() } else { Stdio::inherit() })
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(Error::IoError)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(payload.as_bytes()).map_err(Error::IoError)?;
    }

    let stdout = child.stdout.take();

    let status = child.wait().map_err(Error::IoError)?;
    if !status.success() {
        return Err(Error::HookError(format!(
            "Hook '{}' failed with status: {}",
            script_path.display(),
            status
        )));
    }

    Ok(stdout)
}
