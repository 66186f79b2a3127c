//! Git collaborator
//!
//! Every repository operation goes through the `git` CLI. Cherry-pick,
//! status inspection and describe are porcelain commands, so shelling out is
//! the whole story here; there is no plumbing-library fallback.

use crate::error::{Error, Result};
use crate::types::GitRemote;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// A local git repository at a fixed path
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository at `path`, verifying it is inside a git work tree
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let probe = Command::new("git")
            .args(["rev-parse", "--is-inside-work-tree"])
            .current_dir(&path)
            .output();
        match probe {
            Ok(output) if output.status.success() => Ok(Self { path }),
            _ => Err(Error::NotARepository(path)),
        }
    }

    /// Repository path this handle operates on
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()?;
        collect_output(args, output)
    }

    fn run_with_input(&self, args: &[&str], input: &[u8]) -> Result<String> {
        debug!(?args, bytes = input.len(), "running git with stdin");
        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input)?;
        }
        let output = child.wait_with_output()?;
        collect_output(args, output)
    }

    /// Name of the currently checked-out branch
    pub fn active_branch(&self) -> Result<String> {
        Ok(self.run(&["symbolic-ref", "--short", "HEAD"])?.trim().to_string())
    }

    /// Check out `branch`
    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch]).map(drop)
    }

    /// Short name of the upstream tracking ref for `branch`, if it has one
    pub fn upstream_of(&self, branch: &str) -> Result<Option<String>> {
        let refspec = format!("refs/heads/{branch}");
        let out = self.run(&["for-each-ref", "--format=%(upstream:short)", &refspec])?;
        let upstream = out.trim();
        if upstream.is_empty() {
            Ok(None)
        } else {
            Ok(Some(upstream.to_string()))
        }
    }

    /// Pull (fast-forward/merge) the current branch from its upstream
    pub fn pull(&self) -> Result<()> {
        self.run(&["pull"]).map(drop)
    }

    /// Full human-readable `git status` text
    pub fn status(&self) -> Result<String> {
        self.run(&["status"])
    }

    /// Start cherry-picking `sha`, taking its first parent as the mainline
    ///
    /// `core.editor` is overridden to a no-op on the command line so git never
    /// opens an editor; the commit message is rewritten by a later amend.
    pub fn cherry_pick_mainline(&self, sha: &str) -> Result<()> {
        self.run(&["-c", "core.editor=true", "cherry-pick", "-m", "1", sha])
            .map(drop)
    }

    /// Resume an interrupted cherry-pick after conflicts were staged
    pub fn cherry_pick_continue(&self) -> Result<()> {
        self.run(&["-c", "core.editor=true", "cherry-pick", "--continue"])
            .map(drop)
    }

    /// Rewrite the message of the commit at HEAD
    pub fn commit_amend(&self, message: &str) -> Result<()> {
        self.run(&["commit", "--amend", "-m", message]).map(drop)
    }

    /// Create a commit from the index with the given message
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).map(drop)
    }

    /// Stage the named paths
    pub fn stage(&self, paths: &[String]) -> Result<()> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args).map(drop)
    }

    /// One-line log of commits in `since..branch`
    pub fn log_oneline(&self, since: &str, branch: &str) -> Result<String> {
        let range = format!("{since}..{branch}");
        self.run(&["log", &range, "--oneline"])
    }

    /// Nearest ancestor tag reachable from `branch` (`describe --abbrev=0`)
    pub fn latest_tag(&self, branch: &str) -> Result<String> {
        Ok(self.run(&["describe", branch, "--abbrev=0"])?.trim().to_string())
    }

    /// Dry-run a unified diff against the working tree
    pub fn apply_check(&self, patch: &[u8]) -> Result<()> {
        self.run_with_input(&["apply", "--check", "--verbose"], patch)
            .map(drop)
    }

    /// Apply a unified diff to the working tree
    pub fn apply_patch(&self, patch: &[u8]) -> Result<()> {
        self.run_with_input(&["apply"], patch).map(drop)
    }

    /// Configured remotes, one entry per remote (fetch URLs)
    pub fn remotes(&self) -> Result<Vec<GitRemote>> {
        Ok(parse_remotes(&self.run(&["remote", "-v"])?))
    }
}

fn collect_output(args: &[&str], output: std::process::Output) -> Result<String> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(Error::Git {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Parse `git remote -v` output into one record per remote
fn parse_remotes(text: &str) -> Vec<GitRemote> {
    let mut remotes = Vec::new();
    for line in text.lines() {
        let mut fields = line.split_whitespace();
        let (Some(name), Some(url)) = (fields.next(), fields.next()) else {
            continue;
        };
        // Each remote lists a fetch and a push line; keep the fetch one.
        if fields.next() == Some("(push)") {
            continue;
        }
        remotes.push(GitRemote {
            name: name.to_string(),
            url: url.to_string(),
        });
    }
    remotes
}

/// Pick the remote the project identity is derived from
///
/// Prefers `upstream` (for the upstream=project, origin=fork convention),
/// then falls back to `origin`.
pub fn preferred_remote(remotes: &[GitRemote]) -> Result<&GitRemote> {
    remotes
        .iter()
        .find(|r| r.name == "upstream")
        .or_else(|| remotes.iter().find(|r| r.name == "origin"))
        .ok_or_else(|| Error::RemoteNotFound("upstream or origin".to_string()))
}
