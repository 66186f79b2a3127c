//! Shared command context for CLI commands
//!
//! Extracts the setup code shared by todo and apply: opening the repository,
//! resolving the project, discovering auth, and building the hosting service.

use backport_pr::auth::discover_github_auth;
use backport_pr::error::Result;
use backport_pr::hosting::{GitHubService, HostingService};
use backport_pr::project::{Project, guess_project};
use backport_pr::repo::GitRepo;
use std::path::Path;
use tracing::warn;

/// Everything a command needs to talk to the repository and the hosting API
pub struct CommandContext {
    /// The local repository
    pub repo: GitRepo,
    /// The resolved `owner/repo` identity
    pub project: Project,
    /// Hosting service bound to the project
    pub hosting: Box<dyn HostingService>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// The project comes from `--project` when given, otherwise it is
    /// guessed from the `upstream`/`origin` remote. Requests run
    /// unauthenticated (with a warning) when no token is discoverable.
    pub fn new(path: &Path, project: Option<Project>) -> Result<Self> {
        let repo = GitRepo::open(path)?;
        let project = match project {
            Some(project) => project,
            None => guess_project(&repo)?,
        };

        let auth = discover_github_auth();
        if auth.is_none() {
            warn!("no GitHub token found; API requests will be unauthenticated");
        }
        let hosting = GitHubService::new(
            auth.as_ref().map(|a| a.token.as_str()),
            project.clone(),
            None,
        )?;

        Ok(Self {
            repo,
            project,
            hosting: Box::new(hosting),
        })
    }
}
