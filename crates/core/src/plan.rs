// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bound plans
//!
//! A [`Plan`] is a plan definition after it has been bound to one
//! environment scope: every command, URL and prompt is fully interpolated and
//! every step carries the scope it was bound for. Nothing in a bound plan
//! changes while it runs.

use crate::gate::Gate;
use crate::poll::{PollSchedule, StatusRule};
use crate::scope::{EnvironmentScope, ScopeMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// A shell command collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command line passed to `sh -c`
    pub line: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

/// A single HTTP GET whose status must match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpCheck {
    pub url: String,
    pub expect: u16,
}

/// An HTTP status endpoint polled until a terminal status or the deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSpec {
    pub url: String,
    /// Top-level JSON string field holding the status; whole body if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub schedule: PollSchedule,
    pub rule: StatusRule,
}

/// The collaborator invocation a step performs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Command(CommandSpec),
    Http(HttpCheck),
    Poll(PollSpec),
}

impl Action {
    pub fn command(line: impl Into<String>) -> Self {
        Action::Command(CommandSpec {
            line: line.into(),
            env: Vec::new(),
            cwd: None,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::Command(_) => "run",
            Action::Http(_) => "http",
            Action::Poll(_) => "poll",
        }
    }

    /// One-line description for dry runs and logs
    pub fn describe(&self) -> String {
        match self {
            Action::Command(cmd) => cmd.line.clone(),
            Action::Http(check) => format!("GET {} (expect {})", check.url, check.expect),
            Action::Poll(poll) => format!(
                "poll {} every {} for up to {}",
                poll.url,
                humantime::format_duration(poll.schedule.interval),
                humantime::format_duration(poll.schedule.deadline)
            ),
        }
    }
}

/// One named unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub label: String,
    /// Scope this step was bound for
    pub scope: EnvironmentScope,
    pub action: Action,
    /// Caller-supplied execution deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl Step {
    pub fn new(label: impl Into<String>, scope: EnvironmentScope, action: Action) -> Self {
        Self {
            label: label.into(),
            scope,
            action,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// An ordered, named group of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Phase {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }
}

/// A phase with the gate that must approve before it starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<Gate>,
    pub phase: Phase,
}

impl PlanEntry {
    pub fn ungated(phase: Phase) -> Self {
        Self { gate: None, phase }
    }

    pub fn gated(gate: Gate, phase: Phase) -> Self {
        Self {
            gate: Some(gate),
            phase,
        }
    }
}

/// A plan bound to one scope, ready to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub scope: EnvironmentScope,
    pub mode: ScopeMode,
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    pub fn new(name: impl Into<String>, scope: EnvironmentScope, entries: Vec<PlanEntry>) -> Self {
        Self {
            name: name.into(),
            scope,
            mode: ScopeMode::default(),
            entries,
        }
    }

    /// Get a phase by name
    pub fn get_phase(&self, name: &str) -> Option<&Phase> {
        self.entries
            .iter()
            .map(|e| &e.phase)
            .find(|p| p.name == name)
    }

    /// Iterate every step in plan order
    pub fn steps(&self) -> impl Iterator<Item = (&Phase, &Step)> {
        self.entries
            .iter()
            .flat_map(|e| e.phase.steps.iter().map(move |s| (&e.phase, s)))
    }
}
