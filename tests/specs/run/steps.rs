//! Step collaborator specs: commands, HTTP checks and status polls

use crate::prelude::*;

fn one_step(step: &str) -> Project {
    Project::with_plan(&format!(
        "[[plan.release.phase]]\nname = \"Checks\"\n[[plan.release.phase.step]]\nlabel = \"probe\"\n{step}\n"
    ))
}

#[test]
fn failing_command_shows_its_diagnostics() {
    let temp = one_step(r#"run = "echo checking; echo 'schema drift in cases' >&2; exit 3""#);
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(1)
        .stdout_has("[step] Checks/probe (1/1): FAILED failed (code 3)")
        .stdout_has("    | schema drift in cases");
}

#[test]
fn missing_tool_is_unavailable() {
    let temp = one_step(r#"run = "no-such-migration-tool apply""#);
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(1)
        .stdout_has("unavailable (code 127)");
}

#[test]
fn step_deadline_times_out() {
    let temp = one_step("run = \"sleep 30\"\ntimeout = \"300ms\"");
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(1)
        .stdout_has("FAILED timed out");
}

#[test]
fn commands_see_scope_and_mode() {
    let temp = one_step(r#"run = "echo $GK_SCOPE $GK_MODE > seen.txt""#);
    temp.gk().args(&["run", "release", "--env", "prod"]).passes();
    assert_eq!(temp.read("seen.txt"), "prod apply\n");

    temp.gk().args(&["run", "release", "--env", "dev"]).passes();
    assert_eq!(temp.read("seen.txt"), "dev validate\n");
}

#[test]
fn per_scope_command_and_scope_vars_are_bound() {
    let temp = one_step(r#"run = { dev = "echo dev {db} > seen.txt", prod = "echo prod {db} > seen.txt" }"#);
    temp.gk().args(&["run", "release", "--env", "prod"]).passes();
    assert_eq!(temp.read("seen.txt"), "prod cases_prod\n");
}

#[test]
fn step_env_and_cwd_apply() {
    let temp = one_step("run = \"echo $TARGET > seen.txt\"\ncwd = \"work\"\nenv = { TARGET = \"{db}\" }");
    std::fs::create_dir_all(temp.path().join("work")).unwrap();
    temp.gk().args(&["run", "release", "--env", "dev"]).passes();
    assert_eq!(temp.read("work/seen.txt"), "cases_dev\n");
}

#[test]
fn missing_working_directory_fails_the_step() {
    let temp = one_step("run = \"true\"\ncwd = \"nowhere\"");
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(1)
        .stdout_has("unavailable");
}

#[test]
fn http_check_passes_on_expected_status() {
    let url = serve(200, "ok");
    let temp = one_step(&format!(r#"http = {{ url = "{url}/health" }}"#));
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .passes()
        .stdout_has("[step] Checks/probe (1/1): ok");
}

#[test]
fn http_check_rejects_unexpected_status() {
    let url = serve(503, "maintenance");
    let temp = one_step(&format!(r#"http = {{ url = "{url}/health" }}"#));
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(1)
        .stdout_has("FAILED failed (code 503)")
        .stdout_has("returned 503, expected 200");
}

#[test]
fn unreachable_endpoint_is_unavailable() {
    let temp = one_step(r#"http = { url = "http://127.0.0.1:1/health" }"#);
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(1)
        .stdout_has("FAILED unavailable");
}

#[test]
fn poll_succeeds_on_terminal_success_status() {
    let url = serve(200, r#"{"status": "passed"}"#);
    let temp = one_step(&format!(
        r#"poll = {{ url = "{url}/acceptance", field = "status", interval = "100ms", deadline = "5s", terminal = ["passed", "failed"], success = ["passed"] }}"#
    ));
    temp.gk().args(&["run", "release", "--env", "dev"]).passes();
}

#[test]
fn poll_fails_on_terminal_failure_status() {
    let url = serve(200, r#"{"status": "failed"}"#);
    let temp = one_step(&format!(
        r#"poll = {{ url = "{url}/acceptance", field = "status", interval = "100ms", deadline = "5s", terminal = ["passed", "failed"], success = ["passed"] }}"#
    ));
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(1)
        .stdout_has("FAILED failed");
}

#[test]
fn poll_times_out_while_pending() {
    let url = serve(200, "running");
    let temp = one_step(&format!(
        r#"poll = {{ url = "{url}/acceptance", interval = "100ms", deadline = "400ms", terminal = ["passed"], success = ["passed"] }}"#
    ));
    temp.gk()
        .args(&["run", "release", "--env", "dev"])
        .exits(1)
        .stdout_has("FAILED timed out")
        .stdout_has("running");
}
