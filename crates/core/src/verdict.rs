// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run verdicts and the process exit-code contract

use crate::gate::Decision;
use crate::outcome::{Failure, FailureKind};
use crate::phase::PhaseStatus;
use crate::report::EntryReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process exit codes
pub mod exit_code {
    /// Every phase passed and no gate was aborted
    pub const APPROVED: i32 = 0;
    /// A step failed, was unavailable, or timed out
    pub const REJECTED: i32 = 1;
    /// The run was rejected before any phase started (also CLI usage errors)
    pub const CONFIGURATION: i32 = 2;
    /// An operator declined a gate
    pub const CANCELLED: i32 = 3;
    /// The process was interrupted
    pub const INTERRUPTED: i32 = 130;
}

/// The run's final tri-state outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    GoLiveApproved,
    GoLiveRejected {
        phase: String,
        /// Zero-based index of the failing step
        step_index: usize,
        step_label: String,
        failure: Failure,
    },
    Cancelled {
        phase: String,
    },
}

impl Verdict {
    /// Compute the verdict from the terminal states of every entry.
    ///
    /// Entries are read in plan order; the first aborted gate or non-passing
    /// phase decides. A plan is approved only when every gate approved and
    /// every phase passed.
    pub fn from_entries(entries: &[EntryReport]) -> Verdict {
        for entry in entries {
            match &entry.gate {
                Some(gate) if gate.decision == Decision::Aborted => {
                    return Verdict::Cancelled {
                        phase: entry.phase.name.clone(),
                    };
                }
                _ => {}
            }
            match entry.phase.status {
                PhaseStatus::Passed => continue,
                PhaseStatus::Failed { at } => {
                    let record = entry.phase.failed_step();
                    return Verdict::GoLiveRejected {
                        phase: entry.phase.name.clone(),
                        step_index: at,
                        step_label: record.map(|r| r.label.clone()).unwrap_or_default(),
                        failure: record
                            .and_then(|r| r.outcome.failure().cloned())
                            .unwrap_or_else(|| unrecorded_failure(String::new())),
                    };
                }
                PhaseStatus::Pending | PhaseStatus::Running => {
                    // A phase that never finished cannot be approved.
                    return Verdict::GoLiveRejected {
                        phase: entry.phase.name.clone(),
                        step_index: entry.phase.steps.len(),
                        step_label: String::new(),
                        failure: unrecorded_failure(format!(
                            "phase did not complete ({})",
                            entry.phase.status
                        )),
                    };
                }
            }
        }
        Verdict::GoLiveApproved
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::GoLiveApproved)
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::GoLiveApproved => exit_code::APPROVED,
            Verdict::GoLiveRejected { .. } => exit_code::REJECTED,
            Verdict::Cancelled { .. } => exit_code::CANCELLED,
        }
    }
}

fn unrecorded_failure(message: String) -> Failure {
    Failure {
        kind: FailureKind::Failed,
        code: None,
        message,
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::GoLiveApproved => f.write_str("GO-LIVE APPROVED"),
            Verdict::GoLiveRejected {
                phase,
                step_index,
                step_label,
                failure,
            } => write!(
                f,
                "GO-LIVE REJECTED: {}/{} (step {}) {}",
                phase,
                step_label,
                step_index + 1,
                failure
            ),
            Verdict::Cancelled { phase } => {
                write!(f, "CANCELLED by operator before {}", phase)
            }
        }
    }
}

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;
