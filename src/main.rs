//! backport-pr binary entry point

mod cli;

use anstream::eprintln;
use backport_pr::backport::Strategy;
use backport_pr::project::Project;
use clap::{Parser, Subcommand, ValueEnum};
use cli::apply::{ApplyOptions, run_apply};
use cli::context::CommandContext;
use cli::style::Stylize;
use cli::todo::{TodoOptions, run_todo};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Backport merged pull requests from GitHub projects.
///
/// Use `todo` to show PRs that need backporting for a release;
/// use `apply` to apply backports onto a maintenance branch.
#[derive(Parser)]
#[command(name = "backport-pr", version, about)]
struct CliArgs {
    /// The GitHub project name (owner/repo). Guessed from the upstream or
    /// origin remote when omitted.
    #[arg(long, short, global = true)]
    project: Option<Project>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show pull requests that need backporting for a particular release
    Todo {
        /// The milestone to check for backporting
        #[arg(long, short)]
        milestone: String,

        /// The target branch. Default: milestone major version + ".x"
        #[arg(long, short)]
        branch: Option<String>,

        /// Tag bounding the backported-already scan; `git describe` of the
        /// branch by default
        #[arg(long)]
        since: Option<String>,
    },

    /// Apply backports onto a particular branch
    Apply {
        /// How to transplant the changes
        #[arg(long, value_enum, default_value = "cherry-pick")]
        strategy: StrategyArg,

        /// The target branch for backporting
        branch: String,

        /// The pull requests to backport
        #[arg(required = true)]
        pulls: Vec<u64>,
    },
}

/// CLI surface of [`Strategy`]
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Cherry-pick the PR's merge commit
    CherryPick,
    /// Download and apply the PR's unified diff
    Patch,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::CherryPick => Self::CherryPick,
            StrategyArg::Patch => Self::Patch,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let Some(command) = args.command else {
        eprintln!("{}", "Specify one of `todo` or `apply`.".warn());
        return ExitCode::FAILURE;
    };

    let ctx = match CommandContext::new(Path::new("."), args.project) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("{}", format!("Error: {err}").warn());
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Todo {
            milestone,
            branch,
            since,
        } => {
            let branch = branch.unwrap_or_else(|| default_branch_for(&milestone));
            let options = TodoOptions {
                milestone,
                branch,
                since,
            };
            match run_todo(&ctx, &options).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("{}", format!("Error: {err}").warn());
                    ExitCode::FAILURE
                }
            }
        }
        Command::Apply {
            strategy,
            branch,
            pulls,
        } => {
            let options = ApplyOptions {
                branch,
                pulls,
                strategy: strategy.into(),
            };
            run_apply(&ctx, &options).await
        }
    }
}

/// Maintenance branch convention: major version of the milestone + ".x"
fn default_branch_for(milestone: &str) -> String {
    let major = milestone.split('.').next().unwrap_or_default();
    format!("{major}.x")
}
