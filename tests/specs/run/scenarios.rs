//! End-to-end release scenarios
//!
//! Every step is a real shell command appending to trail.log, so the specs
//! can see exactly which steps ran and in what order.

use crate::prelude::*;

const GATED: &str = r#"
[[plan.release.phase]]
name = "Preflight"
[[plan.release.phase.step]]
label = "env-check"
run = "echo Preflight/env-check >> trail.log"

[[plan.release.phase]]
name = "Migration"
gate = "Apply migrations to {scope}?"
[[plan.release.phase.step]]
label = "apply"
run = "echo Migration/apply >> trail.log"

[[plan.release.phase]]
name = "Acceptance"
gate = "Run acceptance?"
[[plan.release.phase.step]]
label = "suite"
run = "echo Acceptance/suite >> trail.log"
"#;

#[test]
fn all_phases_pass_in_order() {
    let temp = Project::with_plan(ALL_PASS);
    let run = temp
        .gk()
        .args(&["run", "release", "--env", "dev"])
        .passes()
        .stdout_has("[verdict] GO-LIVE APPROVED");

    assert_eq!(
        temp.trail(),
        vec![
            "Preflight/env-check",
            "Preflight/lint",
            "Migration/apply",
            "Smoke/health"
        ]
    );
    assert_eq!(
        run.lines_with("[phase]"),
        vec![
            "[phase] Preflight: running (2 steps)",
            "[phase] Preflight: passed",
            "[phase] Migration: running (1 steps)",
            "[phase] Migration: passed",
            "[phase] Smoke: running (1 steps)",
            "[phase] Smoke: passed",
        ]
    );
}

#[test]
fn first_failure_stops_the_run() {
    let plan = ALL_PASS.replace(
        "run = \"echo Preflight/lint >> trail.log\"",
        "run = \"echo Preflight/lint >> trail.log; exit 1\"",
    );
    let temp = Project::with_plan(&plan);

    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(1)
        .stdout_has("[verdict] GO-LIVE REJECTED: Preflight/lint (step 2) failed (code 1)")
        .stdout_has("[phase] Preflight: failed at step 2")
        .stdout_lacks("[phase] Migration")
        .stdout_lacks("[phase] Smoke");

    assert_eq!(temp.trail(), vec!["Preflight/env-check", "Preflight/lint"]);
}

#[test]
fn failure_in_a_later_phase_keeps_earlier_work() {
    let plan = ALL_PASS.replace(
        "run = \"echo Migration/apply >> trail.log\"",
        "run = \"exit 4\"",
    );
    let temp = Project::with_plan(&plan);

    temp.gk()
        .args(&["run", "release", "--env", "prod"])
        .exits(1)
        .stdout_has("GO-LIVE REJECTED: Migration/apply (step 1) failed (code 4)");
    assert_eq!(temp.trail(), vec!["Preflight/env-check", "Preflight/lint"]);
}

#[test]
fn declined_gate_cancels_before_the_phase() {
    let temp = Project::with_plan(GATED);

    temp.gk()
        .args(&["run", "release", "--env", "prod"])
        .stdin("no\n")
        .exits(3)
        .stdout_has("[gate] Migration: aborted by operator")
        .stdout_has("[verdict] CANCELLED by operator before Migration")
        .stdout_lacks("[phase] Migration")
        .stderr_has("Apply migrations to prod?");

    assert_eq!(temp.trail(), vec!["Preflight/env-check"]);
}

#[test]
fn each_gate_is_asked_in_order() {
    let temp = Project::with_plan(GATED);

    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .stdin("yes\nnope\n")
        .exits(3)
        .stdout_has("[gate] Migration: approved by operator")
        .stdout_has("[gate] Acceptance: aborted by operator");

    assert_eq!(
        temp.trail(),
        vec!["Preflight/env-check", "Migration/apply"]
    );
}

#[test]
fn unattended_run_approves_every_gate_and_says_so() {
    let temp = Project::with_plan(GATED);

    let run = temp
        .gk()
        .args(&["run", "release", "--env", "prod", "--unattended"])
        .passes();

    assert_eq!(
        run.lines_with("[gate]"),
        vec![
            "[gate] Migration: auto-approved (unattended run): Apply migrations to prod?",
            "[gate] Acceptance: auto-approved (unattended run): Run acceptance?",
        ]
    );
    assert_eq!(temp.trail().len(), 3);
}

#[test]
fn repeated_runs_reach_the_same_verdict() {
    let plan = ALL_PASS.replace(
        "run = \"echo Smoke/health >> trail.log\"",
        "run = \"echo Smoke/health >> trail.log; exit 2\"",
    );
    let temp = Project::with_plan(&plan);

    let first = temp.gk().args(&["run", "release", "--env", "dev"]).exits(1);
    let second = temp.gk().args(&["run", "release", "--env", "dev"]).exits(1);
    assert_eq!(first.lines_with("[verdict]"), second.lines_with("[verdict]"));
    assert_eq!(temp.trail().len(), 8);
}
