//! Shared test fixtures
//!
//! These are test utilities - not every helper is used by every test file.

#![allow(dead_code)]

mod mock_hosting;

pub use mock_hosting::MockHostingService;

use backport_pr::project::Project;
use backport_pr::types::{Issue, Milestone, PullRequest};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run a git command in `repo_dir`, panicking on failure
pub fn run_git(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A temporary git repository with one initial commit on `main`
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        run_git(dir.path(), &["init", "-b", "main"]);
        run_git(dir.path(), &["config", "user.name", "test-user"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["commit", "--allow-empty", "-m", "initial"]);
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self, args: &[&str]) -> String {
        run_git(self.path(), args)
    }

    /// Write a file and commit it with the given message
    pub fn commit_file(&self, name: &str, content: &str, message: &str) {
        std::fs::write(self.path().join(name), content).unwrap();
        self.git(&["add", name]);
        self.git(&["commit", "-m", message]);
    }

    /// Commit hash of `rev`
    pub fn rev_parse(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev]).trim().to_string()
    }

    /// Full message of the commit at `rev`
    pub fn message_of(&self, rev: &str) -> String {
        self.git(&["log", "-1", "--format=%B", rev])
    }
}

/// Project used by fixtures
pub fn test_project() -> Project {
    Project {
        owner: "jupyter".to_string(),
        repo: "notebook".to_string(),
    }
}

/// Build a merged PR record
pub fn make_pr(number: u64, title: &str, body: &str, merge_commit_sha: &str) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        body: Some(body.to_string()),
        merged: true,
        merge_commit_sha: Some(merge_commit_sha.to_string()),
        patch_url: Some(format!("https://patch.test/{number}.patch")),
        milestone: None,
    }
}

/// Build a PR record carrying a milestone
pub fn make_pr_with_milestone(number: u64, milestone: &str) -> PullRequest {
    PullRequest {
        milestone: Some(Milestone {
            number: 1,
            title: milestone.to_string(),
        }),
        ..make_pr(number, "some change", "", "0000000000")
    }
}

/// Build an issue record that is a pull request
pub fn make_pr_issue(number: u64) -> Issue {
    Issue {
        number,
        pull_request: Some(serde_json::json!({
            "url": format!("https://api.test/pulls/{number}")
        })),
    }
}

/// Build a plain (non-PR) issue record
pub fn make_plain_issue(number: u64) -> Issue {
    Issue {
        number,
        pull_request: None,
    }
}
