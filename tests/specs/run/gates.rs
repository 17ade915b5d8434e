//! Confirmation gate specs

use crate::prelude::*;

fn gated(gate: &str) -> String {
    format!(
        r#"
[[plan.release.phase]]
name = "Migration"
gate = {gate}
[[plan.release.phase.step]]
label = "apply"
run = "echo Migration/apply >> trail.log"
"#
    )
}

#[test]
fn only_the_exact_affirmative_opens_a_gate() {
    for (input, code) in [
        ("yes\n", 0),
        ("  yes  \n", 0),
        ("y\n", 3),
        ("YES\n", 3),
        ("yes please\n", 3),
        ("\n", 3),
    ] {
        let temp = Project::with_plan(&gated("\"Go?\""));
        temp.gk()
            .args(&["run", "release", "--env", "dev"])
            .stdin(input)
            .exits(code);
        assert_eq!(temp.trail().is_empty(), code != 0, "input {input:?}");
    }
}

#[test]
fn bypassed_gate_never_waits_for_input() {
    let temp = Project::with_plan(&gated(r#"{ prompt = "Go?", mode = "bypassed" }"#));
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .passes()
        .stdout_has("[gate] Migration: auto-approved (bypassed gate): Go?")
        .stderr_lacks("type 'yes'");
    assert_eq!(temp.trail(), vec!["Migration/apply"]);
}

#[test]
fn scope_limited_gate_only_asks_in_its_scope() {
    let temp = Project::with_plan(&gated(r#"{ prompt = "Touch prod?", scopes = ["prod"] }"#));

    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .passes()
        .stdout_lacks("[gate]");

    temp.gk()
        .args(&["run", "release", "--env", "prod"])
        .exits(3)
        .stderr_has("Touch prod?");
}

#[test]
fn unattended_from_environment() {
    let temp = Project::with_plan(&gated("\"Go?\""));
    temp.gk()
        .env("GK_UNATTENDED", "true")
        .args(&["run", "release", "--env", "dev"])
        .passes()
        .stdout_has("auto-approved (unattended run)");
}

#[test]
fn standalone_phase_skips_its_gate() {
    let temp = Project::with_plan(&gated("\"Go?\""));
    temp.gk()
        .args(&["run", "release", "--env", "dev", "--phase", "Migration"])
        .passes()
        .stdout_lacks("[gate]")
        .stdout_has("[verdict] PHASE Migration PASSED");
    assert_eq!(temp.trail(), vec!["Migration/apply"]);
}
