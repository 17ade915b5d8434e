// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Release orchestrator: gates and phases in plan order, one verdict

use crate::error::EngineError;
use crate::gate::ConfirmationGate;
use crate::phase::PhaseExecutor;
use crate::report::{ProgressEvent, Reporter};
use crate::step::StepRunner;
use gk_adapters::{CommandAdapter, PromptAdapter, StatusAdapter};
use gk_core::{
    Clock, Decision, EntryReport, EnvironmentScope, IdGen, PhaseReport, Plan, RunReport, Verdict,
};
use std::sync::Arc;
use tracing::Instrument;

/// Collaborator adapters the engine drives
pub struct EngineDeps<C, S, P> {
    pub commands: C,
    pub status: S,
    pub prompt: P,
}

/// The only component aware of the whole plan
pub struct Orchestrator<C, S, P, K, I> {
    executor: PhaseExecutor<C, S, K>,
    gate: ConfirmationGate<P>,
    clock: K,
    id_gen: I,
    reporter: Arc<dyn Reporter>,
}

impl<C, S, P, K, I> Orchestrator<C, S, P, K, I>
where
    C: CommandAdapter,
    S: StatusAdapter,
    P: PromptAdapter,
    K: Clock,
    I: IdGen,
{
    pub fn new(deps: EngineDeps<C, S, P>, clock: K, id_gen: I, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            executor: PhaseExecutor::new(
                StepRunner::new(deps.commands, deps.status),
                clock.clone(),
                Arc::clone(&reporter),
            ),
            gate: ConfirmationGate::new(deps.prompt, Arc::clone(&reporter)),
            clock,
            id_gen,
            reporter,
        }
    }

    /// Run `plan` from the first entry to the verdict.
    ///
    /// Configuration problems are rejected before anything runs. The walk
    /// stops at the first aborted gate or failed phase; phases after that
    /// point are reported as pending.
    pub async fn run(
        &self,
        plan: &Plan,
        scope: EnvironmentScope,
        unattended: bool,
    ) -> Result<RunReport, EngineError> {
        check_plan(plan, scope)?;

        let run_id = self.id_gen.next();
        let span = tracing::info_span!(
            "run",
            run_id = %run_id,
            plan = %plan.name,
            scope = %scope,
            unattended
        );

        let report = async {
            let started_at = self.clock.wall();
            self.reporter.report(ProgressEvent::RunStarted {
                run_id: &run_id,
                plan: &plan.name,
                scope,
                mode: plan.mode,
                unattended,
            });

            let mut entries = Vec::with_capacity(plan.entries.len());
            let mut halted = false;

            for entry in &plan.entries {
                let phase = &entry.phase;
                if halted {
                    entries.push(EntryReport {
                        gate: None,
                        phase: PhaseReport::pending(&phase.name),
                    });
                    continue;
                }

                let gate = match &entry.gate {
                    Some(gate) => Some(
                        self.gate
                            .await_approval(gate, &phase.name, unattended)
                            .await,
                    ),
                    None => None,
                };

                if gate.as_ref().is_some_and(|g| g.decision == Decision::Aborted) {
                    tracing::warn!(phase = %phase.name, "run cancelled at gate");
                    halted = true;
                    entries.push(EntryReport {
                        gate,
                        phase: PhaseReport::pending(&phase.name),
                    });
                    continue;
                }

                let report = self.executor.run(phase).await;
                halted = !report.passed();
                entries.push(EntryReport {
                    gate,
                    phase: report,
                });
            }

            let verdict = Verdict::from_entries(&entries);
            tracing::info!(verdict = %verdict, "run finished");
            self.reporter
                .report(ProgressEvent::Finished { verdict: &verdict });

            RunReport {
                run_id: run_id.clone(),
                plan: plan.name.clone(),
                scope,
                unattended,
                started_at,
                finished_at: self.clock.wall(),
                entries,
                verdict,
            }
        }
        .instrument(span)
        .await;
        Ok(report)
    }

    /// Run a single phase of `plan` on its own, without gates
    pub async fn run_phase(&self, plan: &Plan, name: &str) -> Result<PhaseReport, EngineError> {
        check_plan(plan, plan.scope)?;
        let phase = plan
            .get_phase(name)
            .ok_or_else(|| EngineError::UnknownPhase(name.to_string()))?;
        Ok(self.executor.run(phase).await)
    }
}

/// Reject plans that must not partially execute
fn check_plan(plan: &Plan, scope: EnvironmentScope) -> Result<(), EngineError> {
    if plan.entries.is_empty() {
        return Err(EngineError::EmptyPlan(plan.name.clone()));
    }
    if plan.scope != scope {
        return Err(EngineError::PlanScopeMismatch {
            plan: plan.scope,
            run: scope,
        });
    }
    for entry in &plan.entries {
        if entry.phase.steps.is_empty() {
            return Err(EngineError::EmptyPhase(entry.phase.name.clone()));
        }
    }
    if let Some((phase, step)) = plan.steps().find(|(_, step)| step.scope != scope) {
        return Err(EngineError::MixedScope {
            phase: phase.name.clone(),
            step: step.label.clone(),
            step_scope: step.scope,
            run: scope,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
