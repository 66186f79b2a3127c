//! Error types for backport-pr

use std::path::PathBuf;
use thiserror::Error;

/// Result alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// All errors that can occur in backport-pr
#[derive(Debug, Error)]
pub enum Error {
    /// Path is not inside a git working tree
    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),

    /// A git command exited nonzero
    #[error("git {command} failed: {stderr}")]
    Git {
        /// The subcommand that failed (e.g. "checkout")
        command: String,
        /// Captured stderr from git
        stderr: String,
    },

    /// Repository status reports an in-progress cherry-pick of a different
    /// commit than the one being backported
    #[error("not resuming the cherry-pick of {sha}")]
    UnrelatedCherryPick {
        /// The merge commit we were asked to apply
        sha: String,
        /// Full `git status` text at the time of the check
        status: String,
    },

    /// Cherry-pick stopped on conflicts; the working tree is left as-is for
    /// manual resolution
    #[error("cherry-pick did not apply cleanly")]
    CherryPickConflict {
        /// Captured stderr from the cherry-pick invocation
        stderr: String,
        /// Full `git status` text after the failure
        status: String,
    },

    /// `git apply --check` rejected the patch; it has been saved for editing
    #[error("patch did not apply, saved to {file}")]
    PatchDoesNotApply {
        /// Path of the saved `PR<number>.patch` file
        file: PathBuf,
    },

    /// Pull request has no patch URL (should only happen for never-merged PRs)
    #[error("PR #{0} has no patch URL")]
    MissingPatchUrl(u64),

    /// Pull request has no merge commit (not merged, or API omitted it)
    #[error("PR #{0} has no merge commit")]
    MissingMergeCommit(u64),

    /// No milestone with the requested title exists in the project
    #[error("no milestone titled {title:?} in {project}")]
    MilestoneNotFound {
        /// The milestone title that was looked up
        title: String,
        /// The project searched
        project: String,
    },

    /// Neither an `upstream` nor an `origin` remote was found
    #[error("no {0} remote configured")]
    RemoteNotFound(String),

    /// A remote URL or `--project` value could not be parsed as `owner/repo`
    #[error("cannot determine project from {0:?}")]
    ProjectParse(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// HTTP request failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}
