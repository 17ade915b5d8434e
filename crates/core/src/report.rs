// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run reports

use crate::gate::{Decision, GateMode};
use crate::id::RunId;
use crate::outcome::Outcome;
use crate::phase::PhaseStatus;
use crate::scope::EnvironmentScope;
use crate::verdict::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recorded result of one executed step; never mutated once recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Zero-based position within the phase
    pub index: usize,
    pub label: String,
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

/// Result of running one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub name: String,
    pub status: PhaseStatus,
    /// Steps that were executed, in order
    pub steps: Vec<StepRecord>,
}

impl PhaseReport {
    /// A phase that never started
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: PhaseStatus::Pending,
            steps: Vec::new(),
        }
    }

    /// The step the phase failed at, if it failed
    pub fn failed_step(&self) -> Option<&StepRecord> {
        match self.status {
            PhaseStatus::Failed { at } => self.steps.iter().find(|s| s.index == at),
            _ => None,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == PhaseStatus::Passed
    }
}

/// How a gate resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRecord {
    pub prompt: String,
    /// Effective mode; unattended runs record `bypassed`
    pub mode: GateMode,
    pub decision: Decision,
}

/// Gate (if any) and phase result for one plan entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateRecord>,
    pub phase: PhaseReport,
}

/// Everything a run did, in plan order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub plan: String,
    pub scope: EnvironmentScope,
    pub unattended: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub entries: Vec<EntryReport>,
    pub verdict: Verdict,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        self.verdict.exit_code()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
