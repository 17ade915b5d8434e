// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step runner: one collaborator invocation reduced to an outcome

use crate::poller;
use gk_adapters::{CommandAdapter, CommandError, CommandOutput, StatusAdapter};
use gk_core::{
    capture_diagnostics, Action, CommandSpec, Failure, FailureKind, HttpCheck, Outcome, Step,
};
use tracing::Instrument;

/// Shell exit codes meaning the program could not be executed or found
const NOT_EXECUTABLE: i32 = 126;
const NOT_FOUND: i32 = 127;

/// Executes steps against the command and status collaborators
#[derive(Clone)]
pub struct StepRunner<C, S> {
    commands: C,
    status: S,
}

impl<C, S> StepRunner<C, S>
where
    C: CommandAdapter,
    S: StatusAdapter,
{
    pub fn new(commands: C, status: S) -> Self {
        Self { commands, status }
    }

    /// Invoke the step's collaborator exactly once and normalize the result.
    ///
    /// A step timeout drops the in-flight invocation and yields `Timeout`.
    pub async fn execute(&self, step: &Step) -> Outcome {
        let span = tracing::info_span!(
            "step",
            label = %step.label,
            scope = %step.scope,
            action = step.action.kind()
        );

        async {
            let invocation = self.invoke(&step.action);
            let outcome = match step.timeout {
                Some(limit) => tokio::time::timeout(limit, invocation)
                    .await
                    .unwrap_or_else(|_| {
                        Outcome::timeout(format!("exceeded the {:?} step deadline", limit))
                    }),
                None => invocation.await,
            };

            match &outcome {
                Outcome::Success => tracing::info!("step succeeded"),
                Outcome::Failure(failure) => {
                    tracing::warn!(kind = %failure.kind, code = ?failure.code, "step failed")
                }
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn invoke(&self, action: &Action) -> Outcome {
        match action {
            Action::Command(spec) => self.run_command(spec).await,
            Action::Http(check) => self.check_http(check).await,
            Action::Poll(spec) => poller::poll(&self.status, spec).await,
        }
    }

    async fn run_command(&self, spec: &CommandSpec) -> Outcome {
        match self.commands.run(spec).await {
            Ok(output) => command_outcome(&output),
            Err(CommandError::Launch { message, .. }) => Outcome::unavailable(message),
            Err(e @ CommandError::Io(_)) => Outcome::unavailable(e.to_string()),
        }
    }

    async fn check_http(&self, check: &HttpCheck) -> Outcome {
        match self.status.fetch(&check.url).await {
            Ok(response) if response.code == check.expect => Outcome::Success,
            Ok(response) => {
                let mut message = format!(
                    "GET {} returned {}, expected {}",
                    check.url, response.code, check.expect
                );
                let body = capture_diagnostics(response.body.as_bytes(), b"");
                if !body.is_empty() {
                    message.push('\n');
                    message.push_str(&body);
                }
                Outcome::failed(Some(i32::from(response.code)), message)
            }
            Err(e) => Outcome::unavailable(e.to_string()),
        }
    }
}

/// Map a finished command to an outcome
pub(crate) fn command_outcome(output: &CommandOutput) -> Outcome {
    let diagnostics = || capture_diagnostics(output.stdout.as_bytes(), output.stderr.as_bytes());
    match output.code {
        Some(0) => Outcome::Success,
        Some(code @ (NOT_EXECUTABLE | NOT_FOUND)) => Outcome::Failure(Failure {
            kind: FailureKind::Unavailable,
            code: Some(code),
            message: diagnostics(),
        }),
        Some(code) => Outcome::failed(Some(code), diagnostics()),
        None => {
            let mut message = "terminated by signal".to_string();
            let text = diagnostics();
            if !text.is_empty() {
                message.push('\n');
                message.push_str(&text);
            }
            Outcome::failed(None, message)
        }
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
