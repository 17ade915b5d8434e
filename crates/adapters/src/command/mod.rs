// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell command collaborators

mod shell;

pub use shell::ShellAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CommandCall, FakeCommandAdapter};

use async_trait::async_trait;
use gk_core::CommandSpec;
use thiserror::Error;

/// Errors launching a command; a launched command never errors, it exits
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to launch '{line}': {message}")]
    Launch { line: String, message: String },
    #[error("failed to collect output: {0}")]
    Io(String),
}

/// What a finished command reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Adapter for running command-line collaborators
#[async_trait]
pub trait CommandAdapter: Clone + Send + Sync + 'static {
    /// Run the command to completion, exactly once
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError>;
}
