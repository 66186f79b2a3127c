//! Todo command - report which PRs still need backporting for a release

use crate::cli::context::CommandContext;
use crate::cli::style::Stylize;
use anstream::{eprintln, println};
use backport_pr::backport::reconcile;
use backport_pr::error::Result;

/// Options for the todo command
#[derive(Debug, Clone)]
pub struct TodoOptions {
    /// Milestone whose merged PRs are candidates
    pub milestone: String,
    /// Maintenance branch to reconcile against
    pub branch: String,
    /// Tag bounding the history scan; nearest ancestor tag when `None`
    pub since: Option<String>,
}

/// Run the todo command
pub async fn run_todo(ctx: &CommandContext, options: &TodoOptions) -> Result<()> {
    let report = reconcile(
        &ctx.repo,
        ctx.hosting.as_ref(),
        &options.branch,
        &options.milestone,
        options.since.as_deref(),
    )
    .await?;

    for number in &report.closed_unmerged {
        eprintln!(
            "{}",
            format!("Marked PR closed without merge: {number}").warn()
        );
    }

    if !report.suspect.is_empty() {
        println!(
            "{}",
            "The following PRs have been backported, but perhaps shouldn't be:".emphasis()
        );
        for number in &report.suspect {
            println!("{number}");
        }
    }

    if !report.ok.is_empty() {
        println!("{}", "The following PRs have been backported".emphasis());
        for number in &report.ok {
            println!("{number}");
        }
    }

    if report.is_up_to_date() {
        println!("{}", "Everything appears up-to-date".success());
    } else {
        println!("{}", "The following PRs should be backported:".emphasis());
        for number in &report.todo {
            println!("{number}");
        }
    }

    Ok(())
}
