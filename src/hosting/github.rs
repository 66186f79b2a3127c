//! GitHub hosting service implementation

use crate::error::{Error, Result};
use crate::hosting::HostingService;
use crate::project::Project;
use crate::types::{ChangedFile, Issue, Milestone, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use tracing::{debug, warn};

/// One page is fetched per listing; past this the result may be truncated.
const PAGE_SIZE: usize = 100;

/// GitHub service using octocrab, plus raw HTTP for the endpoints octocrab
/// models poorly (milestone and issue listings, PR file lists, patches)
pub struct GitHubService {
    client: Octocrab,
    project: Project,
    /// Token for raw HTTP requests
    token: Option<String>,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL for raw requests
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance (`https://{host}/api/v3`);
    /// a full `http(s)://` URL is used as the API base verbatim. `None` means
    /// github.com.
    pub fn new(token: Option<&str>, project: Project, host: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }

        let api_base = match host.as_deref() {
            Some(h) if h.starts_with("http://") || h.starts_with("https://") => {
                h.trim_end_matches('/').to_string()
            }
            Some(h) => format!("https://{h}/api/v3"),
            None => "https://api.github.com".to_string(),
        };
        if host.is_some() {
            builder = builder
                .base_uri(&api_base)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("backport-pr")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            project,
            token: token.map(ToString::to_string),
            http_client,
            api_base,
        })
    }

    /// Issue an authenticated GET against the REST API, failing on non-2xx
    async fn api_get(&self, path_and_query: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.api_base, path_and_query);
        let mut request = self
            .http_client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = request.send().await?;
        Ok(response.error_for_status()?)
    }
}

#[async_trait]
impl HostingService for GitHubService {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        debug!(number, "fetching pull request");
        let pr = self
            .client
            .pulls(&self.project.owner, &self.project.repo)
            .get(number)
            .await?;

        Ok(PullRequest {
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            body: pr.body.clone(),
            merged: pr.merged_at.is_some(),
            merge_commit_sha: pr.merge_commit_sha.clone(),
            patch_url: pr.patch_url.as_ref().map(ToString::to_string),
            milestone: pr.milestone.map(|m| Milestone {
                number: u64::try_from(m.number).unwrap_or_default(),
                title: m.title,
            }),
        })
    }

    async fn list_changed_files(&self, number: u64) -> Result<Vec<ChangedFile>> {
        debug!(number, "listing changed files");
        let path = format!(
            "/repos/{}/{}/pulls/{number}/files?per_page={PAGE_SIZE}",
            self.project.owner, self.project.repo
        );
        let files: Vec<ChangedFile> = self.api_get(&path).await?.json().await?;
        if files.len() == PAGE_SIZE {
            warn!(number, "file list filled a full page; it may be truncated");
        }
        debug!(number, count = files.len(), "listed changed files");
        Ok(files)
    }

    async fn get_milestone(&self, title: &str) -> Result<Milestone> {
        debug!(title, "resolving milestone");
        let path = format!(
            "/repos/{}/{}/milestones?state=all&per_page={PAGE_SIZE}",
            self.project.owner, self.project.repo
        );
        let milestones: Vec<Milestone> = self.api_get(&path).await?.json().await?;
        if milestones.len() == PAGE_SIZE {
            warn!("milestone list filled a full page; it may be truncated");
        }
        milestones
            .into_iter()
            .find(|m| m.title == title)
            .ok_or_else(|| Error::MilestoneNotFound {
                title: title.to_string(),
                project: self.project.to_string(),
            })
    }

    async fn list_closed_issues(&self, milestone: u64) -> Result<Vec<Issue>> {
        debug!(milestone, "listing closed issues");
        let path = format!(
            "/repos/{}/{}/issues?milestone={milestone}&state=closed&per_page={PAGE_SIZE}",
            self.project.owner, self.project.repo
        );
        let issues: Vec<Issue> = self.api_get(&path).await?.json().await?;
        if issues.len() == PAGE_SIZE {
            warn!(milestone, "issue list filled a full page; it may be truncated");
        }
        debug!(milestone, count = issues.len(), "listed closed issues");
        Ok(issues)
    }

    async fn download_patch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "downloading patch");
        let response = self.http_client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    fn project(&self) -> &Project {
        &self.project
    }
}
