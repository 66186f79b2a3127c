//! The backport core
//!
//! `reconcile` computes which merged, milestoned PRs a maintenance branch is
//! missing; `apply` transplants one PR onto the branch as a new commit.

mod apply;
mod reconcile;

pub use apply::{
    AppliedBackport, CherryPickAction, Strategy, backport_message, backport_pr,
    cherry_pick_action, scrub_mentions, scrub_mentions_and_refs,
};
pub use reconcile::{
    BackportReport, ShouldBackport, already_backported, already_backported_matching,
    classify_backports, default_marker_pattern, marked_numbers, reconcile, should_backport,
};
