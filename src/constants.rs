//! Common constants used throughout the Armature application.

/// Supported schema configuration file names, tried in order
pub const CONFIG_FILES: [&str; 3] = ["armature.json", "armature.yml", "armature.yaml"];

/// Armature's ignore file name
pub const IGNORE_FILE: &str = ".armatureignore";

/// Suffix marking a file body as a template
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// Token in the generated roadmap that the bootstrap step replaces with the
/// live project-board URL
pub const PROJECT_BOARD_PLACEHOLDER: &str = "PROJECT_BOARD_URL_PLACEHOLDER";

/// Name of the commit-message backup file, written under the system temp dir
pub const COMMIT_BACKUP_FILE: &str = "cz.commit.backup";

/// Wall-clock timeout for git and repository-hosting operations
pub const GIT_TIMEOUT_SECS: u64 = 60;

/// Wall-clock timeout for dependency installation
pub const INSTALL_TIMEOUT_SECS: u64 = 300;

/// Wall-clock timeout for test, lint and security-check tasks
pub const CHECK_TIMEOUT_SECS: u64 = 120;
