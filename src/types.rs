//! Core types for backport-pr

use serde::{Deserialize, Serialize};

/// A merged (or at least closed) pull request, as fetched from the hosting API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number, unique within a project
    pub number: u64,
    /// PR title (first line of the synthesized commit message)
    pub title: String,
    /// PR description in markdown (may be absent)
    pub body: Option<String>,
    /// Whether the PR was merged (a closed PR may be closed without merging)
    pub merged: bool,
    /// Merge commit hash, present once merged
    pub merge_commit_sha: Option<String>,
    /// URL of the unified diff for this PR
    pub patch_url: Option<String>,
    /// Milestone the PR is tagged with, if any
    pub milestone: Option<Milestone>,
}

/// A milestone, looked up by title to obtain the number used in issue queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Per-repository milestone number (the id issue queries filter on)
    pub number: u64,
    /// Milestone title, conventionally a version string like "2.1"
    pub title: String,
}

/// An issue record from the hosting API
///
/// Pull requests show up in issue listings; the `pull_request` field is the
/// marker distinguishing them from plain issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number (shared numbering space with PRs)
    pub number: u64,
    /// Present iff this issue is a pull request
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    /// Whether this issue record is actually a pull request
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// One file touched by a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Path of the file relative to the repository root
    pub filename: String,
}

/// A git remote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}
