//! Exit-code table
//!
//! | approved | rejected | configuration | cancelled | interrupted |
//! |----------|----------|---------------|-----------|-------------|
//! | 0        | 1        | 2             | 3         | 130         |

use crate::prelude::*;
use std::time::Duration;

const ONE_STEP: &str = r#"
[[plan.release.phase]]
name = "Migration"
gate = "Go?"
[[plan.release.phase.step]]
label = "apply"
run = "RUN_LINE"
"#;

fn project(run: &str) -> Project {
    Project::with_plan(&ONE_STEP.replace("RUN_LINE", run))
}

#[test]
fn approved_exits_zero() {
    project("true")
        .gk()
        .args(&["run", "release", "--env", "dev", "--yes"])
        .exits(0);
}

#[test]
fn every_failure_kind_exits_one() {
    for run in ["false", "exit 42", "not-a-command-anywhere"] {
        project(run)
            .gk()
            .args(&["run", "release", "--env", "dev", "--yes"])
            .exits(1);
    }
}

#[test]
fn configuration_error_exits_two() {
    project("true")
        .gk()
        .env("GK_ENV", "prod")
        .args(&["run", "release", "--env", "dev", "--yes"])
        .exits(2);
}

#[test]
fn cancelled_exits_three() {
    project("true")
        .gk()
        .args(&["run", "release", "--env", "dev"])
        .stdin("no\n")
        .exits(3);
}

#[test]
fn interrupt_exits_130_immediately() {
    let temp = project("touch started; sleep 30");
    let child = temp
        .gk()
        .args(&["run", "release", "--env", "dev", "--yes"])
        .spawn();

    assert!(
        wait_for_file(&temp.path().join("started"), Duration::from_secs(10)),
        "step never started"
    );
    let status = std::process::Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(130));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("interrupted").count(), 1, "{stderr}");
}
