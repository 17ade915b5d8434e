//! Plan book validation specs

use crate::prelude::*;

const SHIPPED: [(&str, &str); 6] = [
    ("scopes.toml", include_str!("../../../docs/plans/scopes.toml")),
    ("preflight.toml", include_str!("../../../docs/plans/preflight.toml")),
    ("deploy.toml", include_str!("../../../docs/plans/deploy.toml")),
    ("go-live.toml", include_str!("../../../docs/plans/go-live.toml")),
    (
        "certify-readiness.toml",
        include_str!("../../../docs/plans/certify-readiness.toml"),
    ),
    ("db-push.toml", include_str!("../../../docs/plans/db-push.toml")),
];

fn shipped_project() -> Project {
    let temp = Project::empty();
    for (name, content) in SHIPPED {
        temp.file(&format!(".gk/plans/{name}"), content);
    }
    temp
}

#[test]
fn shipped_plans_validate() {
    let temp = shipped_project();
    temp.gk()
        .args(&["check"])
        .passes()
        .stdout_has("ok: 5 plan(s), 2 scope(s)");
}

#[test]
fn shipped_plans_are_listed_by_name() {
    let temp = shipped_project();
    let run = temp.gk().args(&["list"]).passes();
    for plan in ["certify-readiness", "db-push", "deploy", "go-live", "preflight"] {
        assert!(run.stdout.contains(plan), "list lacks {plan}");
    }
}

#[test]
fn every_problem_is_reported_at_once() {
    let temp = Project::with_plan(
        r#"
[[plan.release.phase]]
name = "Preflight"

[[plan.release.phase]]
name = "Smoke"
gate = ""
[[plan.release.phase.step]]
label = "health"
run = "true"
[[plan.release.phase.step]]
label = "health"
run = "true"
"#,
    );
    temp.gk()
        .args(&["check"])
        .exits(2)
        .stderr_has("plan validation failed with 3 error(s)");
}

#[test]
fn unknown_scope_table_is_rejected() {
    let temp = Project::with_plan(ALL_PASS);
    temp.file(".gk/plans/staging.toml", "[scope.staging]\nmode = \"apply\"\n");
    temp.gk()
        .args(&["check"])
        .exits(2)
        .stderr_has("staging");
}

#[test]
fn scope_defined_twice_is_rejected() {
    let temp = Project::with_plan(ALL_PASS);
    temp.file(".gk/plans/zz-dupe.toml", "[scope.dev]\n");
    temp.gk()
        .args(&["check"])
        .exits(2)
        .stderr_has("defined more than once");
}

#[test]
fn poll_with_interval_past_deadline_is_rejected() {
    let temp = Project::with_plan(
        r#"
[[plan.release.phase]]
name = "Acceptance"
[[plan.release.phase.step]]
label = "status"
poll = { url = "http://localhost/status", interval = "1m", deadline = "10s", terminal = ["passed"], success = ["passed"] }
"#,
    );
    temp.gk().args(&["check"]).exits(2).stderr_has("status");
}
