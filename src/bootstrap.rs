//! Post-generation bootstrap: git initialization, remote repository
//! creation and project-board wiring, driven by the resolved options and
//! executed strictly sequentially against the generated project directory.

use crate::constants::{GIT_TIMEOUT_SECS, PROJECT_BOARD_PLACEHOLDER};
use crate::error::{Error, Result};
use crate::schema::OptionSet;
use crate::tasks::{run_command, run_command_env, TaskOutput};
use log::{debug, info, warn};
use std::path::Path;
use std::time::Duration;

/// Remote repository-hosting operations, kept behind a trait so the
/// verification harness can substitute a stub for the `gh` CLI.
pub trait RepoHost {
    /// Creates the remote repository for the generated project and pushes
    /// the initial commit.
    fn create_repository(&self, account: &str, slug: &str, cwd: &Path) -> Result<()>;

    /// Creates a project board and returns its URL.
    fn create_project_board(&self, account: &str, slug: &str, cwd: &Path) -> Result<String>;

    /// Deletes the remote repository. Used by harness teardown.
    fn delete_repository(&self, account: &str, slug: &str, cwd: &Path) -> Result<()>;
}

/// RepoHost backed by the `gh` CLI.
pub struct GhCli;

impl GhCli {
    fn timeout() -> Duration {
        Duration::from_secs(GIT_TIMEOUT_SECS)
    }
}

impl RepoHost for GhCli {
    fn create_repository(&self, account: &str, slug: &str, cwd: &Path) -> Result<()> {
        let name = format!("{}/{}", account, slug);
        let argv: Vec<String> = ["gh", "repo", "create", &name, "--private", "--source", ".", "--push"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        run_command(&argv, cwd, Self::timeout(), "gh repo create")?;
        Ok(())
    }

    fn create_project_board(&self, account: &str, slug: &str, cwd: &Path) -> Result<String> {
        let argv: Vec<String> =
            ["gh", "project", "create", "--owner", account, "--title", slug, "--format", "json"]
                .iter()
                .map(|s| s.to_string())
                .collect();
        let TaskOutput { stdout, .. } =
            run_command(&argv, cwd, Self::timeout(), "gh project create")?;
        let payload: serde_json::Value = serde_json::from_str(stdout.trim())?;
        payload
            .get("url")
            .and_then(|url| url.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::ConfigError("gh project create returned no project URL".to_string())
            })
    }

    fn delete_repository(&self, account: &str, slug: &str, cwd: &Path) -> Result<()> {
        let name = format!("{}/{}", account, slug);
        let argv: Vec<String> = ["gh", "repo", "delete", &name, "--yes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        run_command(&argv, cwd, Self::timeout(), "gh repo delete")?;
        Ok(())
    }
}

/// Runs the optional post-generation steps in order: git init and initial
/// commit, remote repository creation, project-board creation with the
/// roadmap rewrite.
pub fn bootstrap(options: &OptionSet, project_dir: &Path, host: &dyn RepoHost) -> Result<()> {
    if options.flag("initialize_git") {
        init_repository(project_dir)?;
    }

    let account = options.text("github_account");
    let slug = options.text("project_slug");

    if options.flag("push_to_github") {
        info!("Creating remote repository {}/{}", account, slug);
        host.create_repository(account, slug, project_dir)?;
    }

    if options.flag("create_github_project") {
        info!("Creating project board for {}/{}", account, slug);
        let url = host.create_project_board(account, slug, project_dir)?;
        rewrite_roadmap(project_dir, &url)?;
    }

    Ok(())
}

/// Initializes a git repository with an initial commit. Skips cleanly when
/// the directory is already a repository.
pub fn init_repository(project_dir: &Path) -> Result<()> {
    if project_dir.join(".git").exists() {
        debug!("Git repository already exists at {}", project_dir.display());
        return Ok(());
    }

    let timeout = Duration::from_secs(GIT_TIMEOUT_SECS);
    git(&["init", "--initial-branch", "main"], project_dir, timeout)?;
    git(&["add", "-A"], project_dir, timeout)?;
    // The generated pre-commit hooks are not installed yet at this point.
    run_command_env(
        &to_argv(&["git", "commit", "-m", "chore: initial project structure"]),
        project_dir,
        timeout,
        "git commit",
        &[("SKIP", "pre-commit-hooks")],
    )?;
    info!("Initialized git repository in {}", project_dir.display());
    Ok(())
}

/// Replaces the roadmap's project-board placeholder with the live URL,
/// at most once.
pub fn rewrite_roadmap(project_dir: &Path, url: &str) -> Result<()> {
    let roadmap_path = project_dir.join("ROADMAP.md");
    let content = std::fs::read_to_string(&roadmap_path).map_err(Error::IoError)?;
    if !content.contains(PROJECT_BOARD_PLACEHOLDER) {
        warn!("Roadmap has no project-board placeholder, leaving it unchanged");
        return Ok(());
    }
    let rewritten = content.replacen(PROJECT_BOARD_PLACEHOLDER, url, 1);
    std::fs::write(&roadmap_path, rewritten).map_err(Error::IoError)
}

fn git(args: &[&str], cwd: &Path, timeout: Duration) -> Result<TaskOutput> {
    let mut argv = vec!["git"];
    argv.extend_from_slice(args);
    let label = format!("git {}", args.first().copied().unwrap_or_default());
    run_command(&to_argv(&argv), cwd, timeout, &label)
}

fn to_argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
