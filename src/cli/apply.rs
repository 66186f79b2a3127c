//! Apply command - backport a queue of PRs onto a branch
//!
//! PRs are processed strictly in order; the first failure stops the queue
//! and already-applied PRs stay committed. Failure output favors verbatim
//! diagnostics (captured stderr, full status) plus the exact command line to
//! re-run, because conflict resolution is manual by design.

use crate::cli::context::CommandContext;
use crate::cli::style::Stylize;
use anstream::{eprintln, println};
use backport_pr::backport::{Strategy, backport_pr};
use backport_pr::error::Error;
use std::process::ExitCode;

/// Options for the apply command
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Target branch for the backports
    pub branch: String,
    /// PR numbers, processed in the order given
    pub pulls: Vec<u64>,
    /// Transplant strategy
    pub strategy: Strategy,
}

/// Run the apply command
pub async fn run_apply(ctx: &CommandContext, options: &ApplyOptions) -> ExitCode {
    for &number in &options.pulls {
        println!(
            "Backport PR {} onto {}",
            format!("#{number}").accent(),
            options.branch.accent()
        );

        match backport_pr(
            &ctx.repo,
            ctx.hosting.as_ref(),
            &options.branch,
            number,
            options.strategy,
        )
        .await
        {
            Ok(applied) => {
                println!("{}", format!("PR #{number} applied, with msg:").success());
                println!();
                println!("{}", applied.message);
                println!();
            }
            Err(err) => {
                report_failure(&err);
                eprintln!(
                    "{}",
                    format!("Backporting PR #{number} onto {} failed", options.branch).warn()
                );
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

/// The exact command line the user ran, quoted for copy-paste
fn rerun_command() -> String {
    shell_words::join(std::env::args())
}

fn report_failure(err: &Error) {
    match err {
        Error::CherryPickConflict { stderr, status } => {
            eprintln!();
            eprintln!("{stderr}");
            eprintln!();
            eprintln!("{status}");
            eprintln!();
            eprintln!(
                "{}",
                format!(
                    "Patch did not apply. Resolve conflicts (add, not commit), then re-run `{}`",
                    rerun_command()
                )
                .warn()
            );
        }
        Error::UnrelatedCherryPick { sha, status } => {
            eprintln!(
                "{}",
                format!("I do not appear to be resuming the cherry-pick of {sha}").warn()
            );
            eprintln!("{status}");
        }
        Error::PatchDoesNotApply { file } => {
            let file = file.display();
            eprintln!("{}", format!("patch did not apply, saving to {file}").warn());
            eprintln!("edit {file} until `cat {file} | git apply --check` succeeds");
            eprintln!("then re-run `{}`", rerun_command());
        }
        other => {
            eprintln!("{}", format!("Error: {other}").warn());
        }
    }
}
