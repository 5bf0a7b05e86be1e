use std::io;

use armature::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::UnknownOptionError { name: "use_tox".to_string() };
    assert_eq!(err.to_string(), "Unknown option: 'use_tox'.");

    let err = Error::UnsupportedLicenseError { license: "WTFPL".to_string() };
    assert_eq!(err.to_string(), "Unsupported license: 'WTFPL'.");

    let err = Error::TaskTimeoutError { task: "test".to_string(), timeout_secs: 120 };
    assert_eq!(err.to_string(), "Task 'test' timed out after 120 seconds.");

    let err = Error::HookCancelledError;
    assert_eq!(err.to_string(), "Commit composer cancelled. Aborting commit.");
}
