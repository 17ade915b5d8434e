// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use gk_core::{exit_code, EnvironmentScope};
use thiserror::Error;

/// Configuration errors, raised before any phase runs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("plan '{0}' has no phases")]
    EmptyPlan(String),
    #[error("phase '{0}' has no steps")]
    EmptyPhase(String),
    #[error("plan is bound to scope '{plan}' but the run scope is '{run}'")]
    PlanScopeMismatch {
        plan: EnvironmentScope,
        run: EnvironmentScope,
    },
    #[error("step '{phase}/{step}' is bound to scope '{step_scope}' but the run scope is '{run}'")]
    MixedScope {
        phase: String,
        step: String,
        step_scope: EnvironmentScope,
        run: EnvironmentScope,
    },
    #[error("unknown phase '{0}'")]
    UnknownPhase(String),
}

impl EngineError {
    pub fn exit_code(&self) -> i32 {
        exit_code::CONFIGURATION
    }
}
