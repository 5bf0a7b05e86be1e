use armature::error::Error;
use armature::tasks::{default_timeout, run_command, run_task, TaskFrontEnd};
use std::path::Path;
use std::time::Duration;

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_front_end_argv() {
    assert_eq!(TaskFrontEnd::Pdm.argv("test"), argv(&["pdm", "run", "test"]));
    assert_eq!(TaskFrontEnd::Just.argv("test"), argv(&["just", "test"]));
}

#[test]
fn test_front_end_from_options() {
    let engine = armature::renderer::MiniJinjaRenderer::new();
    let schema = armature::schema::builtin_schema();

    let options = schema.resolve(&serde_json::json!(null), &engine).unwrap();
    assert_eq!(TaskFrontEnd::from_options(&options).unwrap(), TaskFrontEnd::Pdm);

    let options = schema
        .resolve(&serde_json::json!({"task_runner": "just"}), &engine)
        .unwrap();
    assert_eq!(TaskFrontEnd::from_options(&options).unwrap(), TaskFrontEnd::Just);
}

#[test]
fn test_fallback_policy() {
    // pdm declares exactly one fallback, just declares none.
    assert_eq!(
        TaskFrontEnd::Pdm.fallback_argv("lint"),
        Some(argv(&["python", "-m", "pdm", "run", "lint"]))
    );
    assert_eq!(TaskFrontEnd::Just.fallback_argv("lint"), None);
}

#[test]
fn test_default_timeouts() {
    assert_eq!(default_timeout("install"), Duration::from_secs(300));
    assert_eq!(default_timeout("test"), Duration::from_secs(120));
    assert_eq!(default_timeout("safety-check"), Duration::from_secs(120));
}

#[test]
fn test_run_command_captures_stdout() {
    let output = run_command(
        &argv(&["sh", "-c", "echo hello"]),
        Path::new("."),
        Duration::from_secs(10),
        "echo",
    )
    .unwrap();
    assert_eq!(output.stdout.trim(), "hello");
}

#[test]
fn test_run_command_failure_carries_streams() {
    let err = run_command(
        &argv(&["sh", "-c", "echo progress; echo oops >&2; exit 3"]),
        Path::new("."),
        Duration::from_secs(10),
        "failing-task",
    )
    .unwrap_err();

    match err {
        Error::TaskExecutionError { task, stdout, stderr, .. } => {
            assert_eq!(task, "failing-task");
            assert!(stdout.contains("progress"));
            assert!(stderr.contains("oops"));
        }
        other => panic!("Expected TaskExecutionError, got {:?}", other),
    }
}

#[test]
fn test_run_command_timeout() {
    let err = run_command(
        &argv(&["sleep", "5"]),
        Path::new("."),
        Duration::from_secs(1),
        "sleepy",
    )
    .unwrap_err();

    match err {
        Error::TaskTimeoutError { task, timeout_secs } => {
            assert_eq!(task, "sleepy");
            assert_eq!(timeout_secs, 1);
        }
        other => panic!("Expected TaskTimeoutError, got {:?}", other),
    }
}

#[test]
fn test_run_command_missing_executable() {
    let err = run_command(
        &argv(&["armature-no-such-binary"]),
        Path::new("."),
        Duration::from_secs(1),
        "missing",
    )
    .unwrap_err();

    assert!(matches!(err, Error::MissingExecutableError { .. }));
}

#[test]
fn test_run_task_without_fallback_propagates_missing() {
    // `just` declares no fallback; a missing executable surfaces directly.
    // If just happens to be installed the task itself fails instead, so
    // only the missing case is asserted.
    if let Err(err) = run_task(
        TaskFrontEnd::Just,
        "armature-no-such-task",
        Path::new("."),
        Duration::from_secs(5),
    ) {
        assert!(matches!(
            err,
            Error::MissingExecutableError { .. } | Error::TaskExecutionError { .. }
        ));
    }
}
