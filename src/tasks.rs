//! Post-generation task execution: runs named maintenance tasks of a
//! generated project through its task-runner front end, and arbitrary
//! external commands (git, gh) with bounded wall-clock timeouts and
//! captured output.

use crate::constants::{CHECK_TIMEOUT_SECS, INSTALL_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::schema::OptionSet;
use log::debug;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// The command-prefix style used to invoke named tasks in a generated
/// project. The choice never changes task semantics, only the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFrontEnd {
    Pdm,
    Just,
}

impl TaskFrontEnd {
    /// Derives the front end from the resolved `task_runner` option.
    pub fn from_options(options: &OptionSet) -> Result<Self> {
        match options.text("task_runner") {
            "pdm" => Ok(TaskFrontEnd::Pdm),
            "just" => Ok(TaskFrontEnd::Just),
            other => Err(Error::InvalidValueError {
                option: "task_runner".to_string(),
                value: other.to_string(),
                expected: "one of: pdm, just".to_string(),
            }),
        }
    }

    /// Primary argv for a named task.
    pub fn argv(&self, task: &str) -> Vec<String> {
        match self {
            TaskFrontEnd::Pdm => {
                vec!["pdm".to_string(), "run".to_string(), task.to_string()]
            }
            TaskFrontEnd::Just => vec!["just".to_string(), task.to_string()],
        }
    }

    /// The single declared fallback argv, attempted once when the primary
    /// executable is absent. `just` has no equivalent module entry point,
    /// so it declares none.
    pub fn fallback_argv(&self, task: &str) -> Option<Vec<String>> {
        match self {
            TaskFrontEnd::Pdm => Some(vec![
                "python".to_string(),
                "-m".to_string(),
                "pdm".to_string(),
                "run".to_string(),
                task.to_string(),
            ]),
            TaskFrontEnd::Just => None,
        }
    }
}

/// Default wall-clock timeout for a named task. Dependency installation is
/// allowed substantially longer than check-style tasks.
pub fn default_timeout(task: &str) -> Duration {
    match task {
        "install" => Duration::from_secs(INSTALL_TIMEOUT_SECS),
        _ => Duration::from_secs(CHECK_TIMEOUT_SECS),
    }
}

/// Captured output of a completed external command.
#[derive(Debug)]
pub struct TaskOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs a named task of a generated project.
///
/// # Errors
/// * `Error::TaskExecutionError` on non-zero exit, with both streams
/// * `Error::TaskTimeoutError` when the timeout expires
/// * `Error::MissingExecutableError` when neither the front end nor its
///   declared fallback can be spawned
pub fn run_task(
    front_end: TaskFrontEnd,
    task: &str,
    cwd: &Path,
    timeout: Duration,
) -> Result<TaskOutput> {
    match run_command(&front_end.argv(task), cwd, timeout, task) {
        Err(Error::MissingExecutableError { command }) => {
            let Some(fallback) = front_end.fallback_argv(task) else {
                return Err(Error::MissingExecutableError { command });
            };
            debug!("'{}' not found, falling back to '{}'", command, fallback.join(" "));
            run_command(&fallback, cwd, timeout, task)
        }
        other => other,
    }
}

/// Runs an external command with captured output and a wall-clock timeout.
/// `label` names the operation in errors.
pub fn run_command(
    argv: &[String],
    cwd: &Path,
    timeout: Duration,
    label: &str,
) -> Result<TaskOutput> {
    run_command_env(argv, cwd, timeout, label, &[])
}

/// Like [`run_command`], with additional environment variables.
pub fn run_command_env(
    argv: &[String],
    cwd: &Path,
    timeout: Duration,
    label: &str,
    envs: &[(&str, &str)],
) -> Result<TaskOutput> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        Error::ConfigError(format!("empty command line for task '{}'", label))
    })?;

    debug!("Running '{}' in {}", argv.join(" "), cwd.display());

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        command.env(key, value);
    }

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingExecutableError { command: program.clone() })
        }
        Err(e) => return Err(Error::IoError(e)),
    };

    // Drain both pipes on their own threads so a chatty child cannot fill
    // a pipe buffer and stall before the wait.
    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let status = match child.wait_timeout(timeout).map_err(Error::IoError)? {
        Some(status) => status,
        None => {
            child.kill().map_err(Error::IoError)?;
            child.wait().map_err(Error::IoError)?;
            join_reader(stdout_reader);
            join_reader(stderr_reader);
            return Err(Error::TaskTimeoutError {
                task: label.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
    };

    let stdout = join_reader(stdout_reader);
    let stderr = join_reader(stderr_reader);

    if !status.success() {
        return Err(Error::TaskExecutionError {
            task: label.to_string(),
            status: status.to_string(),
            stdout,
            stderr,
        });
    }

    Ok(TaskOutput { stdout, stderr })
}

fn spawn_reader<R: Read + Send + 'static>(
    pipe: Option<R>,
) -> Option<std::thread::JoinHandle<String>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buffer = String::new();
            let _ = pipe.read_to_string(&mut buffer);
            buffer
        })
    })
}

fn join_reader(handle: Option<std::thread::JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}
