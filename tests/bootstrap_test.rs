use armature::bootstrap::{bootstrap, init_repository, rewrite_roadmap, RepoHost};
use armature::constants::PROJECT_BOARD_PLACEHOLDER;
use armature::error::Result;
use armature::renderer::MiniJinjaRenderer;
use armature::schema::{builtin_schema, OptionSet};
use serde_json::json;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

struct StubHost {
    calls: RefCell<Vec<String>>,
    board_url: String,
}

impl StubHost {
    fn new(board_url: &str) -> Self {
        Self { calls: RefCell::new(Vec::new()), board_url: board_url.to_string() }
    }
}

impl RepoHost for StubHost {
    fn create_repository(&self, account: &str, slug: &str, _cwd: &Path) -> Result<()> {
        self.calls.borrow_mut().push(format!("create {}/{}", account, slug));
        Ok(())
    }

    fn create_project_board(&self, account: &str, slug: &str, _cwd: &Path) -> Result<String> {
        self.calls.borrow_mut().push(format!("board {}/{}", account, slug));
        Ok(self.board_url.clone())
    }

    fn delete_repository(&self, account: &str, slug: &str, _cwd: &Path) -> Result<()> {
        self.calls.borrow_mut().push(format!("delete {}/{}", account, slug));
        Ok(())
    }
}

fn options(overrides: serde_json::Value) -> OptionSet {
    let engine = MiniJinjaRenderer::new();
    builtin_schema().resolve(&overrides, &engine).unwrap()
}

fn write_roadmap(dir: &Path) {
    fs::write(
        dir.join("ROADMAP.md"),
        format!("# Roadmap\n\nProject board: {}\n", PROJECT_BOARD_PLACEHOLDER),
    )
    .unwrap();
}

#[test]
fn test_placeholder_retained_without_project_board() {
    let project = TempDir::new().unwrap();
    write_roadmap(project.path());
    let host = StubHost::new("https://github.com/orgs/acme/projects/7");

    bootstrap(&options(json!({})), project.path(), &host).unwrap();

    let roadmap = fs::read_to_string(project.path().join("ROADMAP.md")).unwrap();
    assert!(roadmap.contains(PROJECT_BOARD_PLACEHOLDER));
    assert!(host.calls.borrow().is_empty());
}

#[test]
fn test_placeholder_replaced_exactly_once() {
    let project = TempDir::new().unwrap();
    // Two placeholder occurrences: only the first is rewritten.
    fs::write(
        project.path().join("ROADMAP.md"),
        format!("{}\n{}\n", PROJECT_BOARD_PLACEHOLDER, PROJECT_BOARD_PLACEHOLDER),
    )
    .unwrap();
    let host = StubHost::new("https://github.com/orgs/acme/projects/7");

    bootstrap(
        &options(json!({
            "github_account": "acme",
            "project_name": "Test Project",
            "create_github_project": true,
        })),
        project.path(),
        &host,
    )
    .unwrap();

    let roadmap = fs::read_to_string(project.path().join("ROADMAP.md")).unwrap();
    assert_eq!(
        roadmap.matches("https://github.com/orgs/acme/projects/7").count(),
        1
    );
    assert_eq!(roadmap.matches(PROJECT_BOARD_PLACEHOLDER).count(), 1);
    assert_eq!(host.calls.borrow().as_slice(), ["board acme/test-project"]);
}

#[test]
fn test_push_to_github_creates_repository() {
    let project = TempDir::new().unwrap();
    write_roadmap(project.path());
    let host = StubHost::new("https://github.com/orgs/acme/projects/7");

    bootstrap(
        &options(json!({
            "github_account": "acme",
            "project_name": "Test Project",
            "push_to_github": true,
        })),
        project.path(),
        &host,
    )
    .unwrap();

    assert_eq!(host.calls.borrow().as_slice(), ["create acme/test-project"]);
}

#[test]
fn test_rewrite_roadmap_missing_placeholder_is_noop() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("ROADMAP.md"), "# Roadmap\n").unwrap();

    rewrite_roadmap(project.path(), "https://example.com").unwrap();

    let roadmap = fs::read_to_string(project.path().join("ROADMAP.md")).unwrap();
    assert_eq!(roadmap, "# Roadmap\n");
}

#[test]
fn test_init_repository() {
    if Command::new("git").arg("--version").output().is_err() {
        eprintln!("git not available, skipping");
        return;
    }

    // Hermetic commit identity for environments without git config
    std::env::set_var("GIT_AUTHOR_NAME", "Armature Test");
    std::env::set_var("GIT_AUTHOR_EMAIL", "test@example.com");
    std::env::set_var("GIT_COMMITTER_NAME", "Armature Test");
    std::env::set_var("GIT_COMMITTER_EMAIL", "test@example.com");

    let project = TempDir::new().unwrap();
    fs::write(project.path().join("README.md"), "# Test\n").unwrap();

    init_repository(project.path()).unwrap();
    assert!(project.path().join(".git").exists());

    // Second call is a clean no-op on an existing repository
    init_repository(project.path()).unwrap();
}
