// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Scopes used by most tests
pub const SCOPES: &str = r#"
[scope.dev]
mode = "validate"
[scope.dev.vars]
target = "dev-host"

[scope.prod]
mode = "apply"
[scope.prod.vars]
target = "prod-host"
"#;

/// A temporary project with a `.gk/plans` directory
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(dir.path().join(".gk/plans")).expect("Failed to create plan dir");
        let project = Self { dir };
        project.plan_file("scopes.toml", SCOPES);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn plan_file(&self, name: &str, content: &str) -> &Self {
        fs::write(self.path().join(".gk/plans").join(name), content)
            .expect("Failed to write plan file");
        self
    }

    /// `gk` run from the project root with a clean gk environment
    pub fn gk(&self) -> Command {
        let mut cmd = Command::cargo_bin("gk").expect("gk binary");
        cmd.current_dir(self.path())
            .env_remove("GK_ENV")
            .env_remove("GK_UNATTENDED")
            .env_remove("GK_PROJECT_ROOT")
            .env_remove("GK_LOG")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// A plan of three ungated phases; `fail_at` names a step that runs `false`
pub fn three_phase_plan(name: &str, fail_at: Option<&str>) -> String {
    let mut out = String::new();
    for (phase, steps) in [
        ("Preflight", ["env-check", "lint"]),
        ("Migration", ["validate", "apply"]),
        ("Smoke", ["health", "ping"]),
    ] {
        out.push_str(&format!("[[plan.{name}.phase]]\nname = \"{phase}\"\n"));
        for label in steps {
            let run = if fail_at == Some(label) { "false" } else { "true" };
            out.push_str(&format!(
                "[[plan.{name}.phase.step]]\nlabel = \"{label}\"\nrun = \"{run}\"\n"
            ));
        }
    }
    out
}
