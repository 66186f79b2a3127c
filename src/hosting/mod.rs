//! Hosting API services
//!
//! Provides the interface the core consumes for pull request, issue and
//! milestone data. The core only sees the plain records in [`crate::types`];
//! everything hosting-specific stays behind this trait.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::project::Project;
use crate::types::{ChangedFile, Issue, Milestone, PullRequest};
use async_trait::async_trait;

/// Hosting service trait for issue/PR/milestone queries
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Fetch a single pull request by number
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest>;

    /// List the files touched by a pull request
    async fn list_changed_files(&self, number: u64) -> Result<Vec<ChangedFile>>;

    /// Resolve a milestone title to its record (including the number used to
    /// filter issue queries)
    async fn get_milestone(&self, title: &str) -> Result<Milestone>;

    /// List closed issues tagged with the given milestone number
    ///
    /// Pull requests appear in the listing too; use
    /// [`Issue::is_pull_request`] to tell them apart.
    async fn list_closed_issues(&self, milestone: u64) -> Result<Vec<Issue>>;

    /// Download a unified diff from the given URL
    async fn download_patch(&self, url: &str) -> Result<Vec<u8>>;

    /// The project this service is bound to
    fn project(&self) -> &Project;
}
