// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan definitions

use crate::action::{HttpDef, PollDef, RunDirective};
use gk_core::GateMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// A gate placed before a phase: a bare prompt, or a prompt with a mode
///
/// A table gate may be limited to some scopes; it is dropped when binding
/// for any other scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GateDef {
    Prompt(String),
    Table {
        prompt: String,
        #[serde(default)]
        mode: GateMode,
        #[serde(default)]
        scopes: Vec<String>,
    },
}

impl GateDef {
    pub fn prompt(&self) -> &str {
        match self {
            GateDef::Prompt(prompt) => prompt,
            GateDef::Table { prompt, .. } => prompt,
        }
    }

    pub fn mode(&self) -> GateMode {
        match self {
            GateDef::Prompt(_) => GateMode::Interactive,
            GateDef::Table { mode, .. } => *mode,
        }
    }

    /// Scope names the gate is limited to (empty means every scope)
    pub fn scope_names(&self) -> &[String] {
        match self {
            GateDef::Prompt(_) => &[],
            GateDef::Table { scopes, .. } => scopes,
        }
    }

    /// Whether the gate is placed when binding for `scope`
    pub fn applies_to(&self, scope: &str) -> bool {
        let scopes = self.scope_names();
        scopes.is_empty() || scopes.iter().any(|s| s == scope)
    }
}

/// A step within a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDef {
    /// Step label, unique within its phase
    pub label: String,
    #[serde(default)]
    pub run: Option<RunDirective>,
    #[serde(default)]
    pub http: Option<HttpDef>,
    #[serde(default)]
    pub poll: Option<PollDef>,
    /// Execution deadline for the collaborator
    #[serde(with = "humantime_serde", default)]
    pub timeout: Option<Duration>,
    /// Extra environment variables for `run` steps
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Working directory for `run` steps
    #[serde(default)]
    pub cwd: Option<String>,
}

impl StepDef {
    /// Names of the action keys this step sets
    pub fn action_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.run.is_some() {
            keys.push("run");
        }
        if self.http.is_some() {
            keys.push("http");
        }
        if self.poll.is_some() {
            keys.push("poll");
        }
        keys
    }
}

/// A phase within a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseDef {
    pub name: String,
    /// Gate resolved before the phase starts
    #[serde(default)]
    pub gate: Option<GateDef>,
    /// Ordered steps
    #[serde(default, rename = "step", alias = "steps")]
    pub steps: Vec<StepDef>,
}

impl PhaseDef {
    /// Get a step by label
    pub fn get_step(&self, label: &str) -> Option<&StepDef> {
        self.steps.iter().find(|s| s.label == label)
    }
}

/// A plan definition from the plan book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanDef {
    /// Plan name (the table key)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered phases
    #[serde(default, rename = "phase", alias = "phases")]
    pub phases: Vec<PhaseDef>,
}

impl PlanDef {
    /// Get a phase by name
    pub fn get_phase(&self, name: &str) -> Option<&PhaseDef> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// Get the first phase
    pub fn first_phase(&self) -> Option<&PhaseDef> {
        self.phases.first()
    }

    /// Number of gates in the plan
    pub fn gate_count(&self) -> usize {
        self.phases.iter().filter(|p| p.gate.is_some()).count()
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
