// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase state machine

use serde::{Deserialize, Serialize};

/// Status of a phase within one run
///
/// `Pending → Running → Passed | Failed { at }`. Terminal states never move
/// again; a phase does not re-run within one orchestrator invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PhaseStatus {
    #[default]
    Pending,
    Running,
    Passed,
    /// Failed at the step with this zero-based index
    Failed { at: usize },
}

/// Events that can change phase status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Start,
    AllStepsPassed,
    StepFailed { at: usize },
}

impl PhaseStatus {
    pub fn name(&self) -> &'static str {
        match self {
            PhaseStatus::Pending => "pending",
            PhaseStatus::Running => "running",
            PhaseStatus::Passed => "passed",
            PhaseStatus::Failed { .. } => "failed",
        }
    }

    /// Check if this status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, PhaseStatus::Passed | PhaseStatus::Failed { .. })
    }

    /// Apply an event, returning the next status.
    ///
    /// Events that are not valid from the current status leave it unchanged.
    pub fn transition(self, event: PhaseEvent) -> PhaseStatus {
        match (self, event) {
            (PhaseStatus::Pending, PhaseEvent::Start) => PhaseStatus::Running,
            (PhaseStatus::Running, PhaseEvent::AllStepsPassed) => PhaseStatus::Passed,
            (PhaseStatus::Running, PhaseEvent::StepFailed { at }) => PhaseStatus::Failed { at },
            (status, _) => status,
        }
    }
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseStatus::Failed { at } => write!(f, "failed at step {}", at + 1),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
