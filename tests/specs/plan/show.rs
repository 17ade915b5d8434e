//! `gk show` specs: binding is visible before anything runs

use crate::prelude::*;

const SCOPED: &str = r#"
[[plan.release.phase]]
name = "Migration"
gate = { prompt = "Apply to {db}?", scopes = ["prod"] }
[[plan.release.phase.step]]
label = "migrate"
run = { dev = "echo validate {db} >> trail.log", prod = "echo apply {db} >> trail.log" }
"#;

#[test]
fn show_binds_per_scope_commands() {
    let temp = Project::with_plan(SCOPED);
    temp.gk()
        .args(&["show", "release", "--env", "prod"])
        .passes()
        .stdout_has("plan release  scope=prod  mode=apply")
        .stdout_has("gate (interactive): Apply to cases_prod?")
        .stdout_has("echo apply cases_prod >> trail.log");
    assert!(temp.trail().is_empty());
}

#[test]
fn scope_limited_gate_is_absent_in_other_scopes() {
    let temp = Project::with_plan(SCOPED);
    temp.gk()
        .args(&["show", "release", "--env", "dev"])
        .passes()
        .stdout_has("scope=dev  mode=validate")
        .stdout_lacks("gate")
        .stdout_has("echo validate cases_dev >> trail.log");
}

#[test]
fn process_environment_fills_template_fallbacks() {
    let temp = Project::empty();
    temp.file(
        ".gk/plans/scopes.toml",
        "[scope.dev]\n[scope.dev.vars]\nhost = \"${GK_SPEC_HOST:-localhost}\"\n",
    );
    temp.file(
        ".gk/plans/release.toml",
        "[[plan.release.phase]]\nname = \"Smoke\"\n[[plan.release.phase.step]]\nlabel = \"ping\"\nrun = \"ping {host}\"\n",
    );

    temp.gk()
        .args(&["show", "release", "--env", "dev"])
        .passes()
        .stdout_has("ping localhost");
    temp.gk()
        .env("GK_SPEC_HOST", "db.internal")
        .args(&["show", "release", "--env", "dev"])
        .passes()
        .stdout_has("ping db.internal");
}
