//! Error handling for the Armature application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for Armature operations.
///
/// Configuration errors (unknown options, invalid values, unsupported
/// licenses, conflicting rules) indicate a caller or template-authoring
/// defect and are never retried.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised by the template engine
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Represents errors that occur during template processing
    #[error("Template error: {0}.")]
    TemplateError(String),

    #[error("Template directory does not exist: '{template_dir}'.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Output directory already exists: '{output_dir}'. Use --force to overwrite.")]
    OutputDirectoryExistsError { output_dir: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Unknown option: '{name}'.")]
    UnknownOptionError { name: String },

    #[error("Invalid value '{value}' for option '{option}' (expected {expected}).")]
    InvalidValueError { option: String, value: String, expected: String },

    #[error("Unsupported license: '{license}'.")]
    UnsupportedLicenseError { license: String },

    #[error("Conflicting rules emit the same file: '{target}'.")]
    ConflictingRuleError { target: String },

    /// Represents errors that occur during hook script execution
    #[error("Hook execution error: {0}.")]
    HookError(String),

    /// The interactive commit composer exited unsuccessfully
    #[error("Commit composer cancelled. Aborting commit.")]
    HookCancelledError,

    /// Represents errors in processing .armatureignore files
    #[error("Ignore pattern error: {0}.")]
    IgnoreError(String),

    /// Represents failures during interactive prompting
    #[error("Prompt error: {0}.")]
    PromptError(String),

    #[error("Executable not found: '{command}'.")]
    MissingExecutableError { command: String },

    #[error("Task '{task}' failed with {status}.\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}")]
    TaskExecutionError { task: String, status: String, stdout: String, stderr: String },

    #[error("Task '{task}' timed out after {timeout_secs} seconds.")]
    TaskTimeoutError { task: String, timeout_secs: u64 },

    /// Non-fatal, per-file processing failures surfaced as warnings
    #[error("Failed to process '{source_path}': {message}.")]
    ProcessError { source_path: String, message: String },
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
