//! GitHub authentication
//!
//! Supports environment variables and CLI-based auth (gh). The token is
//! optional: unauthenticated requests work for public projects, with lower
//! rate limits.

use std::process::Command;
use tracing::debug;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from the gh CLI tool
    Cli,
}

/// A discovered token and where it came from
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The personal access token
    pub token: String,
    /// Where the token was found
    pub source: AuthSource,
}

/// Look for a GitHub token: `GITHUB_TOKEN`, then `GH_TOKEN`, then
/// `gh auth token`. Returns `None` when nothing is configured.
#[must_use]
pub fn discover_github_auth() -> Option<AuthConfig> {
    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(var)
            && !token.trim().is_empty()
        {
            debug!(var, "using token from environment");
            return Some(AuthConfig {
                token: token.trim().to_string(),
                source: AuthSource::EnvVar,
            });
        }
    }

    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        debug!("using token from gh CLI");
        Some(AuthConfig {
            token,
            source: AuthSource::Cli,
        })
    }
}
