//! backport-pr: backport merged pull requests onto maintenance branches
//!
//! Two capabilities around a local git repository and the GitHub API:
//!
//! - **todo**: reconcile a milestone's merged PRs against a maintenance
//!   branch's history and report what still needs backporting
//!   ([`backport::reconcile`]);
//! - **apply**: transplant one PR's changes onto the branch as a single
//!   commit with a message synthesized from the PR title and description
//!   ([`backport::backport_pr`]).
//!
//! The binary in `src/main.rs` wires these to a CLI; the library keeps the
//! git collaborator ([`repo::GitRepo`]), the hosting-API seam
//! ([`hosting::HostingService`]), and the core logic testable on their own.

pub mod auth;
pub mod backport;
pub mod error;
pub mod hosting;
pub mod project;
pub mod repo;
pub mod types;
pub mod version;
