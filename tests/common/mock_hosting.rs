//! Mock hosting service for testing
//!
//! Manually implements `HostingService` with canned responses, call
//! tracking, and error injection, in the same spirit as the real service
//! but with no network.

use async_trait::async_trait;
use backport_pr::error::{Error, Result};
use backport_pr::hosting::HostingService;
use backport_pr::project::Project;
use backport_pr::types::{ChangedFile, Issue, Milestone, PullRequest};
use std::collections::HashMap;
use std::sync::Mutex;

/// Canned-response hosting service
pub struct MockHostingService {
    project: Project,
    pull_requests: Mutex<HashMap<u64, PullRequest>>,
    changed_files: Mutex<HashMap<u64, Vec<ChangedFile>>>,
    milestones: Mutex<Vec<Milestone>>,
    issues_by_milestone: Mutex<HashMap<u64, Vec<Issue>>>,
    patches_by_url: Mutex<HashMap<String, Vec<u8>>>,
    // Call tracking
    get_pr_calls: Mutex<Vec<u64>>,
    download_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_get_pr: Mutex<Option<String>>,
}

impl MockHostingService {
    /// Create a new mock bound to the given project
    pub fn new(project: Project) -> Self {
        Self {
            project,
            pull_requests: Mutex::new(HashMap::new()),
            changed_files: Mutex::new(HashMap::new()),
            milestones: Mutex::new(Vec::new()),
            issues_by_milestone: Mutex::new(HashMap::new()),
            patches_by_url: Mutex::new(HashMap::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            download_calls: Mutex::new(Vec::new()),
            error_on_get_pr: Mutex::new(None),
        }
    }

    // === Response setup ===

    pub fn add_pull_request(&self, pr: PullRequest) {
        self.pull_requests.lock().unwrap().insert(pr.number, pr);
    }

    pub fn add_changed_files(&self, number: u64, filenames: &[&str]) {
        let files = filenames
            .iter()
            .map(|f| ChangedFile {
                filename: (*f).to_string(),
            })
            .collect();
        self.changed_files.lock().unwrap().insert(number, files);
    }

    pub fn add_milestone(&self, number: u64, title: &str) {
        self.milestones.lock().unwrap().push(Milestone {
            number,
            title: title.to_string(),
        });
    }

    pub fn add_issues(&self, milestone: u64, issues: Vec<Issue>) {
        self.issues_by_milestone
            .lock()
            .unwrap()
            .insert(milestone, issues);
    }

    pub fn add_patch(&self, url: &str, patch: &[u8]) {
        self.patches_by_url
            .lock()
            .unwrap()
            .insert(url.to_string(), patch.to_vec());
    }

    // === Error injection ===

    /// Make `get_pull_request` return an error
    pub fn fail_get_pull_request(&self, msg: &str) {
        *self.error_on_get_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    pub fn get_pull_request_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    pub fn download_calls(&self) -> Vec<String> {
        self.download_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostingService for MockHostingService {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        self.get_pr_calls.lock().unwrap().push(number);
        if let Some(msg) = self.error_on_get_pr.lock().unwrap().clone() {
            return Err(Error::GitHubApi(msg));
        }
        self.pull_requests
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("no such PR: {number}")))
    }

    async fn list_changed_files(&self, number: u64) -> Result<Vec<ChangedFile>> {
        Ok(self
            .changed_files
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_milestone(&self, title: &str) -> Result<Milestone> {
        self.milestones
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.title == title)
            .cloned()
            .ok_or_else(|| Error::MilestoneNotFound {
                title: title.to_string(),
                project: self.project.to_string(),
            })
    }

    async fn list_closed_issues(&self, milestone: u64) -> Result<Vec<Issue>> {
        Ok(self
            .issues_by_milestone
            .lock()
            .unwrap()
            .get(&milestone)
            .cloned()
            .unwrap_or_default())
    }

    async fn download_patch(&self, url: &str) -> Result<Vec<u8>> {
        self.download_calls.lock().unwrap().push(url.to_string());
        self.patches_by_url
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("no patch at {url}")))
    }

    fn project(&self) -> &Project {
        &self.project
    }
}
