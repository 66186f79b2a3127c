//! Patch application - transplant one PR onto a maintenance branch
//!
//! Two interchangeable strategies behind one entry point: cherry-picking the
//! PR's merge commit (the primary workflow), or downloading and applying its
//! raw unified diff. Both synthesize the commit message from the PR title
//! and description, and both are resumable: after a failure the documented
//! recovery path is to fix up the working tree and re-run the identical
//! command.

use crate::error::{Error, Result};
use crate::hosting::HostingService;
use crate::repo::GitRepo;
use std::fs;
use tracing::{debug, info, warn};

/// How a pull request's changes are transplanted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// `git cherry-pick -m 1 <merge-sha>`, message written by a final amend
    #[default]
    CherryPick,
    /// Download the unified diff, `git apply` it, stage the PR's files,
    /// commit fresh
    Patch,
}

/// A successfully applied backport
#[derive(Debug, Clone)]
pub struct AppliedBackport {
    /// The backported PR number
    pub number: u64,
    /// Branch the commit landed on
    pub branch: String,
    /// The synthesized commit message
    pub message: String,
}

/// What the status inspection says about an in-progress cherry-pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CherryPickAction {
    /// No cherry-pick in progress; start one
    Start,
    /// Our own interrupted cherry-pick; run `--continue`
    Continue,
    /// Some other cherry-pick is in progress; refuse to touch it
    Unrelated,
}

/// Decide how to proceed given `git status` text and the target merge sha
///
/// Status reports an in-progress cherry-pick with an abbreviated hash; the
/// first six characters are compared. Refusing on a mismatch is what keeps a
/// re-run from blindly continuing someone else's interrupted operation.
#[must_use]
pub fn cherry_pick_action(status: &str, sha: &str) -> CherryPickAction {
    if !status.contains("cherry-picking") {
        return CherryPickAction::Start;
    }
    let prefix = &sha[..sha.len().min(6)];
    if status.contains(&format!("cherry-picking commit {prefix}")) {
        CherryPickAction::Continue
    } else {
        CherryPickAction::Unrelated
    }
}

/// Replace `@` and `#` so the backported message can't ping mentions or
/// re-link issues
#[must_use]
pub fn scrub_mentions_and_refs(body: &str) -> String {
    body.replace('@', " ").replace('#', " ")
}

/// Replace only `@`, keeping issue references intact
#[must_use]
pub fn scrub_mentions(body: &str) -> String {
    body.replace('@', "_")
}

/// The synthesized backport commit message
#[must_use]
pub fn backport_message(number: u64, title: &str, body: &str) -> String {
    format!("Backport PR #{number}: {title}\n\n{body}")
}

/// Backport one pull request onto `branch` using the given strategy
///
/// Checks out `branch` if it isn't active, restores the original branch on
/// success, and leaves a conflicted working tree exactly as git reports it
/// so the operator can resolve and re-run.
pub async fn backport_pr(
    repo: &GitRepo,
    hosting: &dyn HostingService,
    branch: &str,
    number: u64,
    strategy: Strategy,
) -> Result<AppliedBackport> {
    let original = repo.active_branch()?;
    let switched = branch != original;
    if switched {
        repo.checkout(branch)?;
    }

    let result = match strategy {
        Strategy::CherryPick => cherry_pick_backport(repo, hosting, branch, number).await,
        Strategy::Patch => patch_backport(repo, hosting, branch, number).await,
    };

    match result {
        Ok(applied) => {
            if switched {
                repo.checkout(&original)?;
            }
            Ok(applied)
        }
        Err(err @ Error::UnrelatedCherryPick { .. }) => {
            if switched {
                // best-effort: the diagnostic matters more than the switch back
                let _ = repo.checkout(&original);
            }
            Err(err)
        }
        // conflicted state stays in place for manual resolution
        Err(err) => Err(err),
    }
}

/// Strategy A: cherry-pick the merge commit, then amend the message
async fn cherry_pick_backport(
    repo: &GitRepo,
    hosting: &dyn HostingService,
    branch: &str,
    number: u64,
) -> Result<AppliedBackport> {
    if repo.upstream_of(branch)?.is_some() {
        repo.pull()?;
    } else {
        warn!("Branch {branch} not tracking upstream; skipping pull");
    }

    let pr = hosting.get_pull_request(number).await?;
    let sha = pr
        .merge_commit_sha
        .ok_or(Error::MissingMergeCommit(number))?;
    let body = scrub_mentions_and_refs(&pr.body.unwrap_or_default());

    let status = repo.status()?;
    let outcome = match cherry_pick_action(&status, &sha) {
        CherryPickAction::Unrelated => {
            return Err(Error::UnrelatedCherryPick { sha, status });
        }
        CherryPickAction::Continue => {
            info!(%sha, "continuing interrupted cherry-pick");
            repo.cherry_pick_continue()
        }
        CherryPickAction::Start => {
            info!(%sha, "cherry-picking");
            repo.cherry_pick_mainline(&sha)
        }
    };

    if let Err(err) = outcome {
        let stderr = match err {
            Error::Git { stderr, .. } => stderr,
            other => other.to_string(),
        };
        let status = repo.status()?;
        return Err(Error::CherryPickConflict { stderr, status });
    }

    let message = backport_message(number, &pr.title, &body);
    repo.commit_amend(&message)?;
    Ok(AppliedBackport {
        number,
        branch: branch.to_string(),
        message,
    })
}

/// Strategy B: apply the raw unified diff, stage the PR's files, commit
async fn patch_backport(
    repo: &GitRepo,
    hosting: &dyn HostingService,
    branch: &str,
    number: u64,
) -> Result<AppliedBackport> {
    repo.pull()?;

    let pr = hosting.get_pull_request(number).await?;
    let files = hosting.list_changed_files(number).await?;
    let body = scrub_mentions(&pr.body.unwrap_or_default());

    let patch_file = repo.path().join(format!("PR{number}.patch"));
    let patch = if patch_file.exists() {
        info!(file = %patch_file.display(), "using saved patch");
        fs::read(&patch_file)?
    } else {
        let url = pr.patch_url.ok_or(Error::MissingPatchUrl(number))?;
        hosting.download_patch(&url).await?
    };

    if let Err(err) = repo.apply_check(&patch) {
        debug!(%err, "patch check failed");
        // never overwrite a manually edited patch
        if !patch_file.exists() {
            fs::write(&patch_file, &patch)?;
        }
        return Err(Error::PatchDoesNotApply { file: patch_file });
    }

    repo.apply_patch(&patch)?;
    let filenames: Vec<String> = files.into_iter().map(|f| f.filename).collect();
    repo.stage(&filenames)?;

    let message = backport_message(number, &pr.title, &body);
    repo.commit(&message)?;
    Ok(AppliedBackport {
        number,
        branch: branch.to_string(),
        message,
    })
}
