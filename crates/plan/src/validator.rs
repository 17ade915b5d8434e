// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic validation for plan books.
//!
//! Parsing only guarantees shape. This module checks what a run relies on:
//! - Every plan and phase has work to do
//! - Names are unique where reports identify things by name
//! - Every step has exactly one action
//! - Scope references resolve
//! - Poll schedules can terminate

use crate::parser::PlanBook;
use crate::plan::{PhaseDef, PlanDef, StepDef};
use crate::PollDef;
use gk_core::EnvironmentScope;
use std::collections::HashSet;

/// Collection of validation errors
#[derive(Debug, Clone)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "plan validation failed with {} error(s):",
            self.errors.len()
        )?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}: {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A single validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Plan declares no phases
    EmptyPlan { plan: String },
    /// Phase declares no steps
    EmptyPhase { plan: String, phase: String },
    DuplicatePhase { plan: String, phase: String },
    DuplicateStep {
        plan: String,
        phase: String,
        step: String,
    },
    /// Step has none of run, http, poll
    StepNoAction {
        plan: String,
        phase: String,
        step: String,
    },
    /// Step sets more than one action
    StepMultipleActions {
        plan: String,
        phase: String,
        step: String,
        actions: Vec<&'static str>,
    },
    /// Reference to a scope the book does not define
    UndefinedScope {
        scope: String,
        referenced_in: String,
    },
    /// `[scope.X]` where X is not a known environment scope
    UnknownScope { scope: String },
    InvalidPoll {
        referenced_in: String,
        reason: String,
    },
    EmptyGatePrompt { plan: String, phase: String },
    /// Missing or empty required field
    MissingRequired {
        item_kind: &'static str,
        item_name: String,
        field: &'static str,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyPlan { plan } => {
                write!(f, "Plan '{}' has no phases", plan)
            }
            ValidationError::EmptyPhase { plan, phase } => {
                write!(f, "Phase '{}' in plan '{}' has no steps", phase, plan)
            }
            ValidationError::DuplicatePhase { plan, phase } => {
                write!(f, "Phase '{}' is defined twice in plan '{}'", phase, plan)
            }
            ValidationError::DuplicateStep { plan, phase, step } => write!(
                f,
                "Step '{}' is defined twice in phase '{}' of plan '{}'",
                step, phase, plan
            ),
            ValidationError::StepNoAction { plan, phase, step } => write!(
                f,
                "Step '{}' in phase '{}' of plan '{}' has no action (run, http, or poll)",
                step, phase, plan
            ),
            ValidationError::StepMultipleActions {
                plan,
                phase,
                step,
                actions,
            } => write!(
                f,
                "Step '{}' in phase '{}' of plan '{}' has multiple actions ({}); only one allowed",
                step,
                phase,
                plan,
                actions.join(", ")
            ),
            ValidationError::UndefinedScope {
                scope,
                referenced_in,
            } => write!(
                f,
                "Undefined scope '{}' referenced in {}",
                scope, referenced_in
            ),
            ValidationError::UnknownScope { scope } => write!(
                f,
                "Unknown scope '{}' (expected one of: {})",
                scope,
                known_scopes()
            ),
            ValidationError::InvalidPoll {
                referenced_in,
                reason,
            } => write!(f, "Invalid poll in {}: {}", referenced_in, reason),
            ValidationError::EmptyGatePrompt { plan, phase } => write!(
                f,
                "Gate before phase '{}' of plan '{}' has an empty prompt",
                phase, plan
            ),
            ValidationError::MissingRequired {
                item_kind,
                item_name,
                field,
            } => write!(
                f,
                "{} '{}' missing required field '{}'",
                item_kind, item_name, field
            ),
        }
    }
}

fn known_scopes() -> String {
    EnvironmentScope::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate every scope and plan in a book.
pub fn validate_book(book: &PlanBook) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    for name in book.scopes.keys() {
        if name.parse::<EnvironmentScope>().is_err() {
            errors.push(ValidationError::UnknownScope {
                scope: name.clone(),
            });
        }
    }
    for plan in book.plans.values() {
        check_plan(book, plan, &mut errors);
    }

    finish(errors)
}

/// Validate a single plan against the scopes of its book.
pub fn validate_plan(book: &PlanBook, plan: &PlanDef) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    check_plan(book, plan, &mut errors);
    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

fn check_plan(book: &PlanBook, plan: &PlanDef, errors: &mut Vec<ValidationError>) {
    if plan.phases.is_empty() {
        errors.push(ValidationError::EmptyPlan {
            plan: plan.name.clone(),
        });
        return;
    }

    let mut seen = HashSet::new();
    for phase in &plan.phases {
        if phase.name.trim().is_empty() {
            errors.push(ValidationError::MissingRequired {
                item_kind: "phase",
                item_name: format!("{}[{}]", plan.name, seen.len()),
                field: "name",
            });
        } else if !seen.insert(phase.name.as_str()) {
            errors.push(ValidationError::DuplicatePhase {
                plan: plan.name.clone(),
                phase: phase.name.clone(),
            });
        }
        check_phase(book, plan, phase, errors);
    }
}

fn check_phase(book: &PlanBook, plan: &PlanDef, phase: &PhaseDef, errors: &mut Vec<ValidationError>) {
    if let Some(gate) = &phase.gate {
        if gate.prompt().trim().is_empty() {
            errors.push(ValidationError::EmptyGatePrompt {
                plan: plan.name.clone(),
                phase: phase.name.clone(),
            });
        }
        for scope in gate.scope_names() {
            check_scope_ref(
                book,
                scope,
                || format!("gate before phase '{}' of plan '{}'", phase.name, plan.name),
                errors,
            );
        }
    }

    if phase.steps.is_empty() {
        errors.push(ValidationError::EmptyPhase {
            plan: plan.name.clone(),
            phase: phase.name.clone(),
        });
        return;
    }

    let mut seen = HashSet::new();
    for step in &phase.steps {
        if step.label.trim().is_empty() {
            errors.push(ValidationError::MissingRequired {
                item_kind: "step",
                item_name: format!("{}/{}[{}]", plan.name, phase.name, seen.len()),
                field: "label",
            });
        } else if !seen.insert(step.label.as_str()) {
            errors.push(ValidationError::DuplicateStep {
                plan: plan.name.clone(),
                phase: phase.name.clone(),
                step: step.label.clone(),
            });
        }
        check_step(book, plan, phase, step, errors);
    }
}

fn check_step(
    book: &PlanBook,
    plan: &PlanDef,
    phase: &PhaseDef,
    step: &StepDef,
    errors: &mut Vec<ValidationError>,
) {
    let location = || {
        format!(
            "step '{}' in phase '{}' of plan '{}'",
            step.label, phase.name, plan.name
        )
    };

    let actions = step.action_keys();
    match actions.len() {
        0 => errors.push(ValidationError::StepNoAction {
            plan: plan.name.clone(),
            phase: phase.name.clone(),
            step: step.label.clone(),
        }),
        1 => {}
        _ => errors.push(ValidationError::StepMultipleActions {
            plan: plan.name.clone(),
            phase: phase.name.clone(),
            step: step.label.clone(),
            actions,
        }),
    }

    if let Some(run) = &step.run {
        for scope in run.scope_names() {
            check_scope_ref(book, scope, location, errors);
        }
        let empty = match run {
            crate::RunDirective::Shell(cmd) => cmd.trim().is_empty(),
            crate::RunDirective::Scoped(map) => {
                map.is_empty() || map.values().any(|cmd| cmd.trim().is_empty())
            }
        };
        if empty {
            errors.push(ValidationError::MissingRequired {
                item_kind: "step",
                item_name: step.label.clone(),
                field: "run",
            });
        }
    }

    if let Some(http) = &step.http {
        if http.url.trim().is_empty() {
            errors.push(ValidationError::MissingRequired {
                item_kind: "step",
                item_name: step.label.clone(),
                field: "http.url",
            });
        }
    }

    if let Some(poll) = &step.poll {
        for reason in poll_problems(poll) {
            errors.push(ValidationError::InvalidPoll {
                referenced_in: location(),
                reason,
            });
        }
    }
}

fn check_scope_ref(
    book: &PlanBook,
    scope: &str,
    referenced_in: impl Fn() -> String,
    errors: &mut Vec<ValidationError>,
) {
    if book.get_scope(scope).is_none() {
        errors.push(ValidationError::UndefinedScope {
            scope: scope.to_string(),
            referenced_in: referenced_in(),
        });
    }
}

fn poll_problems(poll: &PollDef) -> Vec<String> {
    let mut problems = Vec::new();
    if poll.url.trim().is_empty() {
        problems.push("url is empty".to_string());
    }
    if poll.interval.is_zero() {
        problems.push("interval must be greater than zero".to_string());
    }
    if poll.interval > poll.deadline {
        problems.push(format!(
            "interval ({}) exceeds deadline ({})",
            humantime::format_duration(poll.interval),
            humantime::format_duration(poll.deadline)
        ));
    }
    if poll.terminal.is_empty() {
        problems.push("terminal set is empty".to_string());
    }
    for value in &poll.success {
        if !poll.terminal.contains(value) {
            problems.push(format!("success value '{}' is not a terminal status", value));
        }
    }
    problems
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
