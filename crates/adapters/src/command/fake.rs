// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CommandAdapter, CommandError, CommandOutput};
use async_trait::async_trait;
use gk_core::CommandSpec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub line: String,
    pub env: Vec<(String, String)>,
}

#[derive(Clone)]
enum Scripted {
    Exit { code: i32, stdout: String, stderr: String },
    LaunchError(String),
}

#[derive(Default)]
struct FakeState {
    scripted: HashMap<String, Scripted>,
    delays: HashMap<String, Duration>,
    calls: Vec<CommandCall>,
}

/// Fake command adapter: lines succeed unless scripted otherwise
#[derive(Clone, Default)]
pub struct FakeCommandAdapter {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeCommandAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `line` exit with `code` and the given stderr
    pub fn fail(&self, line: &str, code: i32, stderr: &str) -> &Self {
        self.script(
            line,
            Scripted::Exit {
                code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    /// Make `line` exit 0 with the given stdout
    pub fn succeed_with(&self, line: &str, stdout: &str) -> &Self {
        self.script(
            line,
            Scripted::Exit {
                code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    /// Make `line` fail to launch
    pub fn unlaunchable(&self, line: &str, message: &str) -> &Self {
        self.script(line, Scripted::LaunchError(message.to_string()))
    }

    /// Make `line` take `delay` before completing
    pub fn delay(&self, line: &str, delay: Duration) -> &Self {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .delays
            .insert(line.to_string(), delay);
        self
    }

    fn script(&self, line: &str, scripted: Scripted) -> &Self {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .scripted
            .insert(line.to_string(), scripted);
        self
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CommandCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Command lines invoked, in order
    pub fn lines(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.line).collect()
    }

    /// How many times `line` was invoked
    pub fn call_count(&self, line: &str) -> usize {
        self.calls().iter().filter(|c| c.line == line).count()
    }
}

#[async_trait]
impl CommandAdapter for FakeCommandAdapter {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let (scripted, delay) = {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.calls.push(CommandCall {
                line: spec.line.clone(),
                env: spec.env.clone(),
            });
            (
                inner.scripted.get(&spec.line).cloned(),
                inner.delays.get(&spec.line).copied(),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match scripted {
            None => Ok(CommandOutput {
                code: Some(0),
                ..Default::default()
            }),
            Some(Scripted::Exit {
                code,
                stdout,
                stderr,
            }) => Ok(CommandOutput {
                code: Some(code),
                stdout,
                stderr,
            }),
            Some(Scripted::LaunchError(message)) => Err(CommandError::Launch {
                line: spec.line.clone(),
                message,
            }),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
