//! CLI help specs

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let temp = Project::empty();
    let run = temp.gk().args(&["--help"]).passes();
    for command in ["run", "list", "show", "check", "completions"] {
        assert!(run.stdout.contains(command), "help lacks {command}");
    }
}

#[test]
fn run_help_documents_scope_and_unattended_flags() {
    let temp = Project::empty();
    temp.gk()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--env")
        .stdout_has("--yes")
        .stdout_has("unattended")
        .stdout_has("--phase")
        .stdout_has("--output");
}

#[test]
fn version_flag_prints_version() {
    let temp = Project::empty();
    temp.gk().args(&["--version"]).passes().stdout_has("gk ");
}
