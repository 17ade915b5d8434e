// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase executor: ordered steps, first failure stops the phase

use crate::report::{ProgressEvent, Reporter};
use crate::step::StepRunner;
use gk_adapters::{CommandAdapter, StatusAdapter};
use gk_core::{Clock, Phase, PhaseEvent, PhaseReport, PhaseStatus, StepRecord};
use std::sync::Arc;
use tracing::Instrument;

/// Runs the steps of one phase in declared order.
///
/// Unaware of the plan around it, so a phase can be run standalone.
pub struct PhaseExecutor<C, S, K> {
    runner: StepRunner<C, S>,
    clock: K,
    reporter: Arc<dyn Reporter>,
}

impl<C, S, K> PhaseExecutor<C, S, K>
where
    C: CommandAdapter,
    S: StatusAdapter,
    K: Clock,
{
    pub fn new(runner: StepRunner<C, S>, clock: K, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            runner,
            clock,
            reporter,
        }
    }

    /// Run every step until one fails; later steps are never invoked
    pub async fn run(&self, phase: &Phase) -> PhaseReport {
        let span = tracing::info_span!("phase", name = %phase.name, steps = phase.steps.len());
        self.run_inner(phase).instrument(span).await
    }

    async fn run_inner(&self, phase: &Phase) -> PhaseReport {
        let total = phase.steps.len();
        let mut status = PhaseStatus::Pending.transition(PhaseEvent::Start);
        let mut records = Vec::with_capacity(total);

        self.reporter.report(ProgressEvent::PhaseStarted {
            phase: &phase.name,
            steps: total,
        });

        for (index, step) in phase.steps.iter().enumerate() {
            self.reporter.report(ProgressEvent::StepStarted {
                phase: &phase.name,
                index,
                total,
                label: &step.label,
            });

            let start = self.clock.now();
            let outcome = self.runner.execute(step).await;
            let elapsed_ms = self.clock.now().saturating_duration_since(start).as_millis() as u64;

            self.reporter.report(ProgressEvent::StepFinished {
                phase: &phase.name,
                index,
                total,
                label: &step.label,
                outcome: &outcome,
                elapsed_ms,
            });

            let failed = !outcome.is_success();
            records.push(StepRecord {
                index,
                label: step.label.clone(),
                outcome,
                elapsed_ms,
            });

            if failed {
                status = status.transition(PhaseEvent::StepFailed { at: index });
                break;
            }
        }

        // No-op once failed
        status = status.transition(PhaseEvent::AllStepsPassed);
        tracing::info!(status = %status, "phase finished");
        self.reporter.report(ProgressEvent::PhaseFinished {
            phase: &phase.name,
            status,
        });

        PhaseReport {
            name: phase.name.clone(),
            status,
            steps: records,
        }
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
