// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Confirmation gate

use crate::report::{ProgressEvent, Reporter};
use gk_adapters::PromptAdapter;
use gk_core::{Decision, Gate, GateMode, GateRecord};
use std::sync::Arc;

/// Resolves gates, asking the operator only when it must
pub struct ConfirmationGate<P> {
    prompt: P,
    reporter: Arc<dyn Reporter>,
}

impl<P: PromptAdapter> ConfirmationGate<P> {
    pub fn new(prompt: P, reporter: Arc<dyn Reporter>) -> Self {
        Self { prompt, reporter }
    }

    /// Resolve `gate` placed before `phase`.
    ///
    /// Bypassed gates, and every gate of an unattended run, approve without
    /// touching the prompt. Interactive gates wait as long as the operator
    /// takes; anything but the affirmative token aborts, and so does a
    /// prompt that cannot be read.
    pub async fn await_approval(&self, gate: &Gate, phase: &str, unattended: bool) -> GateRecord {
        if unattended || gate.mode == GateMode::Bypassed {
            tracing::info!(
                phase,
                prompt = %gate.prompt,
                mode = ?gate.mode,
                unattended,
                "gate auto-approved"
            );
            self.reporter.report(ProgressEvent::GateAutoApproved {
                phase,
                prompt: &gate.prompt,
                mode: gate.mode,
            });
            return GateRecord {
                prompt: gate.prompt.clone(),
                mode: GateMode::Bypassed,
                decision: Decision::Approved,
            };
        }

        let decision = match self.prompt.ask(&gate.prompt).await {
            Ok(answer) => Decision::from_input(&answer),
            Err(e) => {
                tracing::error!(phase, error = %e, "operator input unavailable, aborting");
                Decision::Aborted
            }
        };
        tracing::info!(phase, decision = ?decision, "gate resolved");
        self.reporter.report(ProgressEvent::GateDecided {
            phase,
            approved: decision == Decision::Approved,
        });

        GateRecord {
            prompt: gate.prompt.clone(),
            mode: GateMode::Interactive,
            decision,
        }
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
