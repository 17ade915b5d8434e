// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented progress log
//!
//! Every line starts with a bracketed tag (`[run]`, `[gate]`, `[phase]`,
//! `[step]`, `[verdict]`) so CI log viewers can grep for the failing step
//! without re-running. Diagnostics follow a failed step, indented with `| `.

use gk_core::{
    EnvironmentScope, GateMode, Outcome, PhaseStatus, RunId, ScopeMode, Verdict,
};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// One thing worth telling the operator
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'a> {
    RunStarted {
        run_id: &'a RunId,
        plan: &'a str,
        scope: EnvironmentScope,
        mode: ScopeMode,
        unattended: bool,
    },
    GateAutoApproved {
        phase: &'a str,
        prompt: &'a str,
        mode: GateMode,
    },
    GateDecided {
        phase: &'a str,
        approved: bool,
    },
    PhaseStarted {
        phase: &'a str,
        steps: usize,
    },
    StepStarted {
        phase: &'a str,
        index: usize,
        total: usize,
        label: &'a str,
    },
    StepFinished {
        phase: &'a str,
        index: usize,
        total: usize,
        label: &'a str,
        outcome: &'a Outcome,
        elapsed_ms: u64,
    },
    PhaseFinished {
        phase: &'a str,
        status: PhaseStatus,
    },
    Finished {
        verdict: &'a Verdict,
    },
}

impl ProgressEvent<'_> {
    /// Render as log lines
    pub fn lines(&self) -> Vec<String> {
        match *self {
            ProgressEvent::RunStarted {
                run_id,
                plan,
                scope,
                mode,
                unattended,
            } => vec![format!(
                "[run] {} scope={} mode={} unattended={} id={}",
                plan, scope, mode, unattended, run_id
            )],
            ProgressEvent::GateAutoApproved {
                phase,
                prompt,
                mode,
            } => {
                let why = match mode {
                    GateMode::Bypassed => "bypassed gate",
                    GateMode::Interactive => "unattended run",
                };
                vec![format!(
                    "[gate] {}: auto-approved ({}): {}",
                    phase, why, prompt
                )]
            }
            ProgressEvent::GateDecided { phase, approved } => {
                let decision = if approved {
                    "approved by operator"
                } else {
                    "aborted by operator"
                };
                vec![format!("[gate] {}: {}", phase, decision)]
            }
            ProgressEvent::PhaseStarted { phase, steps } => {
                vec![format!("[phase] {}: running ({} steps)", phase, steps)]
            }
            ProgressEvent::StepStarted {
                phase,
                index,
                total,
                label,
            } => vec![format!(
                "[step] {}/{} ({}/{}): running",
                phase,
                label,
                index + 1,
                total
            )],
            ProgressEvent::StepFinished {
                phase,
                index,
                total,
                label,
                outcome,
                elapsed_ms,
            } => {
                let head = format!("[step] {}/{} ({}/{})", phase, label, index + 1, total);
                match outcome {
                    Outcome::Success => vec![format!("{}: ok ({}ms)", head, elapsed_ms)],
                    Outcome::Failure(failure) => {
                        let mut lines =
                            vec![format!("{}: FAILED {} ({}ms)", head, failure, elapsed_ms)];
                        lines.extend(failure.message.lines().map(|l| format!("    | {}", l)));
                        lines
                    }
                }
            }
            ProgressEvent::PhaseFinished { phase, status } => {
                vec![format!("[phase] {}: {}", phase, status)]
            }
            ProgressEvent::Finished { verdict } => vec![format!("[verdict] {}", verdict)],
        }
    }
}

/// Receives progress events
pub trait Reporter: Send + Sync {
    fn report(&self, event: ProgressEvent<'_>);
}

/// Writes progress lines to any writer (stdout in the CLI)
pub struct LineReporter<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> LineReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write + Send> Reporter for LineReporter<W> {
    fn report(&self, event: ProgressEvent<'_>) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        for line in event.lines() {
            if let Err(e) = writeln!(out, "{}", line) {
                tracing::warn!(error = %e, "failed to write progress line");
                return;
            }
        }
        let _ = out.flush();
    }
}

/// Keeps progress lines in memory
#[derive(Clone, Default)]
pub struct MemoryReporter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: ProgressEvent<'_>) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(event.lines());
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
