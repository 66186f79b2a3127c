//! Project identity
//!
//! A project is the `owner/repo` pair the hosting API is addressed with.
//! When not given explicitly it is guessed from the repository's remotes,
//! preferring `upstream` over `origin`.

use crate::error::{Error, Result};
use crate::repo::{GitRepo, preferred_remote};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// `owner/repo` identifier of a hosted project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for Project {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(Error::ProjectParse(s.to_string())),
        }
    }
}

// Matches owner/repo in both remote URL forms:
//   https://github.com/jupyter/notebook.git
//   git@github.com:jupyter/notebook.git
fn remote_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i).*[:/]([^/:]+)/([^/:]+)\.git$").expect("hardcoded pattern")
    })
}

/// Extract `owner/repo` from a remote URL of the form `.../owner/repo.git`
pub fn project_from_url(url: &str) -> Result<Project> {
    let captures = remote_url_pattern()
        .captures(url)
        .ok_or_else(|| Error::ProjectParse(url.to_string()))?;
    Ok(Project {
        owner: captures[1].to_string(),
        repo: captures[2].to_string(),
    })
}

/// Guess the project for a repository from its remote configuration
pub fn guess_project(repo: &GitRepo) -> Result<Project> {
    let remotes = repo.remotes()?;
    let remote = preferred_remote(&remotes)?;
    let project = project_from_url(&remote.url)?;
    debug!(remote = %remote.name, %project, "guessed project from remote");
    Ok(project)
}
