// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sh -c` command adapter

use super::{CommandAdapter, CommandError, CommandOutput};
use async_trait::async_trait;
use gk_core::CommandSpec;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Runs command lines through `sh -c` from the project root
#[derive(Clone)]
pub struct ShellAdapter {
    root: PathBuf,
}

impl ShellAdapter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn working_dir(&self, spec: &CommandSpec) -> PathBuf {
        match &spec.cwd {
            Some(cwd) if cwd.is_absolute() => cwd.clone(),
            Some(cwd) => self.root.join(cwd),
            None => self.root.clone(),
        }
    }
}

#[async_trait]
impl CommandAdapter for ShellAdapter {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        // Dropping the future (step timeout) kills the child
        let output = Command::new("sh")
            .arg("-c")
            .arg(&spec.line)
            .current_dir(self.working_dir(spec))
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CommandError::Launch {
                line: spec.line.clone(),
                message: e.to_string(),
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
