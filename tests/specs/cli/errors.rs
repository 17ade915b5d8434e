//! CLI error specs
//!
//! Usage and configuration problems exit 2 and never start a phase.

use crate::prelude::*;

#[test]
fn missing_subcommand_is_a_usage_error() {
    let temp = Project::empty();
    temp.gk().args(&[]).exits(2);
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let temp = Project::with_plan(ALL_PASS);
    temp.gk()
        .args(&["run", "release", "--env", "dev", "--force"])
        .exits(2);
    assert!(temp.trail().is_empty());
}

#[test]
fn unknown_plan_suggests_listing() {
    let temp = Project::with_plan(ALL_PASS);
    temp.gk()
        .args(&["run", "rollout", "--env", "dev"])
        .exits(2)
        .stderr_has("error: plan 'rollout' not found")
        .stderr_has("available plans: release")
        .stderr_has("gk list");
}

#[test]
fn unset_scope_suggests_both_sources() {
    let temp = Project::with_plan(ALL_PASS);
    temp.gk()
        .args(&["run", "release"])
        .exits(2)
        .stderr_has("environment scope is not set")
        .stderr_has("--env dev")
        .stderr_has("GK_ENV");
    assert!(temp.trail().is_empty());
}

#[test]
fn empty_gk_env_counts_as_unset() {
    let temp = Project::with_plan(ALL_PASS);
    temp.gk()
        .env("GK_ENV", "")
        .args(&["run", "release"])
        .exits(2)
        .stderr_has("environment scope is not set");
}

#[test]
fn unknown_scope_is_rejected() {
    let temp = Project::with_plan(ALL_PASS);
    temp.gk()
        .args(&["run", "release", "--env", "qa"])
        .exits(2)
        .stderr_has("unknown environment scope: qa");
}

#[test]
fn scope_missing_from_the_book_is_rejected() {
    let temp = Project::empty();
    temp.file(".gk/plans/scopes.toml", "[scope.dev]\n");
    temp.file(".gk/plans/release.toml", ALL_PASS);
    temp.gk()
        .args(&["run", "release", "--env", "prod"])
        .exits(2)
        .stderr_has("scope 'prod' is not defined")
        .stderr_has("[scope.prod]");
    assert!(temp.trail().is_empty());
}

#[test]
fn broken_plan_file_is_reported_with_its_path() {
    let temp = Project::with_plan(ALL_PASS);
    temp.file(".gk/plans/zz-broken.toml", "[[plan.x.phase]\n");
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(2)
        .stderr_has("failed to load plans")
        .stderr_has("zz-broken.toml");
    assert!(temp.trail().is_empty());
}
