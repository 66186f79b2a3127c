//! Backport reconciliation - classify PRs for a milestone against a branch
//!
//! The effectful steps (log scan, API queries) gather plain data; the
//! classification itself is a pure function over that data.

use crate::error::Result;
use crate::hosting::HostingService;
use crate::repo::GitRepo;
use crate::version::Version;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Default pattern for backport markers in commit messages
///
/// Matches "backport" or "merge" (case-insensitive) followed eventually by a
/// digit run with a non-dot character after it, and captures the digits. A
/// text heuristic, not ground truth; callers with different commit
/// conventions can pass their own pattern to
/// [`already_backported_matching`].
pub const DEFAULT_MARKER_PATTERN: &str = r"(?i)(?:backport|merge).*?(\d+)[^.]";

/// The compiled [`DEFAULT_MARKER_PATTERN`]
pub fn default_marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(DEFAULT_MARKER_PATTERN).expect("hardcoded pattern"))
}

/// Extract every PR number the marker pattern finds in one-line log text
#[must_use]
pub fn marked_numbers(log: &str, pattern: &Regex) -> BTreeSet<u64> {
    pattern
        .captures_iter(log)
        .filter_map(|c| c[1].parse().ok())
        .collect()
}

/// PR numbers already present in `branch` since `since_tag`, per the default
/// marker pattern
///
/// With no tag given, the comparison base is the nearest ancestor tag of the
/// branch (`git describe --abbrev=0`).
pub fn already_backported(
    repo: &GitRepo,
    branch: &str,
    since_tag: Option<&str>,
) -> Result<BTreeSet<u64>> {
    already_backported_matching(repo, branch, since_tag, default_marker_pattern())
}

/// [`already_backported`] with a caller-supplied marker pattern
pub fn already_backported_matching(
    repo: &GitRepo,
    branch: &str,
    since_tag: Option<&str>,
    pattern: &Regex,
) -> Result<BTreeSet<u64>> {
    let since = match since_tag {
        Some(tag) => tag.to_string(),
        None => repo.latest_tag(branch)?,
    };
    let log = repo.log_oneline(&since, branch)?;
    let numbers = marked_numbers(&log, pattern);
    debug!(branch, since, count = numbers.len(), "scanned backport markers");
    Ok(numbers)
}

/// PRs marked for backport via the milestone, split into merged and
/// closed-without-merge
#[derive(Debug, Clone, Default)]
pub struct ShouldBackport {
    /// Numbers of merged PRs in the milestone
    pub numbers: BTreeSet<u64>,
    /// Closed-but-unmerged PRs found along the way (reported, not included)
    pub closed_unmerged: Vec<u64>,
}

/// Resolve the milestone and collect every merged PR tagged with it
pub async fn should_backport(
    hosting: &dyn HostingService,
    milestone_title: &str,
) -> Result<ShouldBackport> {
    let milestone = hosting.get_milestone(milestone_title).await?;
    let issues = hosting.list_closed_issues(milestone.number).await?;

    let mut result = ShouldBackport::default();
    for issue in issues {
        if !issue.is_pull_request() {
            continue;
        }
        let pr = hosting.get_pull_request(issue.number).await?;
        if pr.merged {
            result.numbers.insert(pr.number);
        } else {
            debug!(number = pr.number, "closed PR was never merged");
            result.closed_unmerged.push(pr.number);
        }
    }
    Ok(result)
}

/// The reconciliation result, ready for reporting
#[derive(Debug, Clone, Default)]
pub struct BackportReport {
    /// Should be backported but isn't (sorted ascending)
    pub todo: Vec<u64>,
    /// Backported and accounted for (sorted ascending)
    pub ok: Vec<u64>,
    /// Backported but not requested for this milestone or an earlier one
    pub suspect: Vec<u64>,
    /// Closed-but-unmerged PRs encountered while collecting the should-set
    pub closed_unmerged: Vec<u64>,
}

impl BackportReport {
    /// Whether the branch needs no further backports
    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        self.todo.is_empty()
    }
}

/// Classify PR numbers into todo / ok / suspect (pure)
///
/// `suspect_milestones` maps each member of `already - should` to the
/// version of the milestone its PR carries, if any. A suspect whose
/// milestone version precedes `target` was legitimately backported for an
/// earlier release and moves into `ok`; one with no milestone, or a
/// same-or-later milestone, stays suspect.
#[must_use]
pub fn classify_backports(
    already: &BTreeSet<u64>,
    should: &BTreeSet<u64>,
    suspect_milestones: &BTreeMap<u64, Option<Version>>,
    target: &Version,
) -> BackportReport {
    let todo: Vec<u64> = should.difference(already).copied().collect();
    let mut ok: Vec<u64> = already.intersection(should).copied().collect();
    let mut suspect = Vec::new();

    for &number in already.difference(should) {
        let earlier = suspect_milestones
            .get(&number)
            .and_then(Option::as_ref)
            .is_some_and(|version| version < target);
        if earlier {
            ok.push(number);
        } else {
            suspect.push(number);
        }
    }
    ok.sort_unstable();

    BackportReport {
        todo,
        ok,
        suspect,
        closed_unmerged: Vec::new(),
    }
}

/// Run the full reconciliation for one branch and milestone
pub async fn reconcile(
    repo: &GitRepo,
    hosting: &dyn HostingService,
    branch: &str,
    milestone: &str,
    since_tag: Option<&str>,
) -> Result<BackportReport> {
    let already = already_backported(repo, branch, since_tag)?;
    let should = should_backport(hosting, milestone).await?;
    let target = Version::parse(milestone);

    // Fetch milestones only for the numbers that need the earlier-release check
    let mut suspect_milestones = BTreeMap::new();
    for &number in already.difference(&should.numbers) {
        let pr = hosting.get_pull_request(number).await?;
        suspect_milestones.insert(number, pr.milestone.map(|m| Version::parse(&m.title)));
    }

    let mut report = classify_backports(&already, &should.numbers, &suspect_milestones, &target);
    report.closed_unmerged = should.closed_unmerged;
    if !report.suspect.is_empty() {
        warn!(count = report.suspect.len(), "found backports not requested for this milestone");
    }
    Ok(report)
}
