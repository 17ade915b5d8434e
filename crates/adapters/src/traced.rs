// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::command::{CommandAdapter, CommandError, CommandOutput};
use crate::prompt::{PromptAdapter, PromptError};
use crate::status::{StatusAdapter, StatusError, StatusResponse};
use async_trait::async_trait;
use gk_core::CommandSpec;
use tracing::Instrument;

/// Wrapper that adds tracing to any CommandAdapter
#[derive(Clone)]
pub struct TracedCommandAdapter<C> {
    inner: C,
}

impl<C> TracedCommandAdapter<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: CommandAdapter> CommandAdapter for TracedCommandAdapter<C> {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let span = tracing::info_span!("command.run", line = %spec.line);

        async {
            tracing::info!(env_count = spec.env.len(), "starting");

            // Precondition: an absolute cwd must exist
            if let Some(cwd) = spec.cwd.as_ref().filter(|c| c.is_absolute()) {
                if !cwd.exists() {
                    tracing::error!(cwd = %cwd.display(), "working directory does not exist");
                    return Err(CommandError::Launch {
                        line: spec.line.clone(),
                        message: format!("working directory does not exist: {}", cwd.display()),
                    });
                }
            }

            let start = std::time::Instant::now();
            let result = self.inner.run(spec).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(output) => tracing::info!(
                    code = ?output.code,
                    stdout_len = output.stdout.len(),
                    stderr_len = output.stderr.len(),
                    elapsed_ms,
                    "command exited"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "launch failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any StatusAdapter
#[derive(Clone)]
pub struct TracedStatusAdapter<S> {
    inner: S,
}

impl<S> TracedStatusAdapter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: StatusAdapter> StatusAdapter for TracedStatusAdapter<S> {
    async fn fetch(&self, url: &str) -> Result<StatusResponse, StatusError> {
        let span = tracing::info_span!("status.fetch", url);

        async {
            let start = std::time::Instant::now();
            let result = self.inner.fetch(url).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(response) => tracing::debug!(
                    code = response.code,
                    body_len = response.body.len(),
                    elapsed_ms,
                    "response"
                ),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "fetch failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any PromptAdapter
#[derive(Clone)]
pub struct TracedPromptAdapter<P> {
    inner: P,
}

impl<P> TracedPromptAdapter<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: PromptAdapter> PromptAdapter for TracedPromptAdapter<P> {
    async fn ask(&self, prompt: &str) -> Result<String, PromptError> {
        let span = tracing::info_span!("prompt.ask", prompt);

        async {
            tracing::info!("waiting for operator");
            let result = self.inner.ask(prompt).await;
            match &result {
                // The answer itself is not logged
                Ok(answer) => tracing::info!(answer_len = answer.trim().len(), "answered"),
                Err(e) => tracing::error!(error = %e, "prompt failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
