// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binding a plan definition to one environment scope

use crate::parser::PlanBook;
use crate::plan::{PhaseDef, PlanDef, StepDef};
use crate::template::interpolate_with;
use crate::validator::{validate_plan, ValidationErrors};
use gk_core::{
    Action, CommandSpec, EnvironmentScope, Gate, HttpCheck, Phase, Plan, PlanEntry, PollSchedule,
    PollSpec, ScopeMode, Step, StatusRule,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable carrying the bound scope to every command
pub const SCOPE_ENV: &str = "GK_SCOPE";
/// Environment variable carrying the scope mode to every command
pub const MODE_ENV: &str = "GK_MODE";

/// Errors binding a plan; all are configuration errors
#[derive(Debug, Error)]
pub enum BindError {
    #[error("unknown plan '{0}'")]
    UnknownPlan(String),
    #[error("scope '{0}' is not defined in the plan book")]
    UndefinedScope(EnvironmentScope),
    #[error("step '{step}' in phase '{phase}' has no command for scope '{scope}'")]
    MissingScopeCommand {
        phase: String,
        step: String,
        scope: EnvironmentScope,
    },
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),
}

/// Bind `plan_name` from `book` for `scope`, reading `${VAR}` fallbacks
/// from the process environment.
pub fn bind(book: &PlanBook, plan_name: &str, scope: EnvironmentScope) -> Result<Plan, BindError> {
    bind_with(book, plan_name, scope, |name| std::env::var(name).ok())
}

/// Bind with an explicit environment lookup.
///
/// The result is fully interpolated and every step is stamped with `scope`.
pub fn bind_with<F>(
    book: &PlanBook,
    plan_name: &str,
    scope: EnvironmentScope,
    env: F,
) -> Result<Plan, BindError>
where
    F: Fn(&str) -> Option<String>,
{
    let def = book
        .get_plan(plan_name)
        .ok_or_else(|| BindError::UnknownPlan(plan_name.to_string()))?;
    validate_plan(book, def)?;
    let scope_def = book
        .get_scope(scope.as_str())
        .ok_or(BindError::UndefinedScope(scope))?;

    let binder = Binder::new(def, scope, scope_def.mode, &scope_def.vars, &env);
    let entries = def
        .phases
        .iter()
        .map(|phase| binder.entry(phase))
        .collect::<Result<Vec<_>, _>>()?;

    let mut plan = Plan::new(def.name.clone(), scope, entries);
    plan.mode = scope_def.mode;
    Ok(plan)
}

struct Binder<'a, F> {
    scope: EnvironmentScope,
    mode: ScopeMode,
    vars: BTreeMap<String, String>,
    env: &'a F,
}

impl<'a, F> Binder<'a, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn new(
        plan: &PlanDef,
        scope: EnvironmentScope,
        mode: ScopeMode,
        scope_vars: &BTreeMap<String, String>,
        env: &'a F,
    ) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert("scope".to_string(), scope.to_string());
        vars.insert("mode".to_string(), mode.to_string());
        vars.insert("plan".to_string(), plan.name.clone());

        // Scope vars see the built-ins and the environment, not each other
        let resolved: Vec<_> = scope_vars
            .iter()
            .map(|(k, v)| (k.clone(), interpolate_with(v, &vars, env)))
            .collect();
        vars.extend(resolved);

        Self {
            scope,
            mode,
            vars,
            env,
        }
    }

    fn entry(&self, phase: &PhaseDef) -> Result<PlanEntry, BindError> {
        let mut vars = self.vars.clone();
        vars.insert("phase".to_string(), phase.name.clone());

        let gate = phase
            .gate
            .as_ref()
            .filter(|g| g.applies_to(self.scope.as_str()))
            .map(|g| Gate {
                prompt: interpolate_with(g.prompt(), &vars, self.env),
                mode: g.mode(),
            });

        let steps = phase
            .steps
            .iter()
            .map(|step| self.step(phase, step, &vars))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlanEntry {
            gate,
            phase: Phase::new(phase.name.clone(), steps),
        })
    }

    fn step(
        &self,
        phase: &PhaseDef,
        step: &StepDef,
        phase_vars: &BTreeMap<String, String>,
    ) -> Result<Step, BindError> {
        let mut vars = phase_vars.clone();
        vars.insert("step".to_string(), step.label.clone());
        let expand = |s: &str| interpolate_with(s, &vars, self.env);

        let action = if let Some(run) = &step.run {
            let line = run.command_for(self.scope.as_str()).ok_or_else(|| {
                BindError::MissingScopeCommand {
                    phase: phase.name.clone(),
                    step: step.label.clone(),
                    scope: self.scope,
                }
            })?;
            let mut env: Vec<(String, String)> = step
                .env
                .iter()
                .map(|(k, v)| (k.clone(), expand(v)))
                .collect();
            env.push((SCOPE_ENV.to_string(), self.scope.to_string()));
            env.push((MODE_ENV.to_string(), self.mode.to_string()));
            Action::Command(CommandSpec {
                line: expand(line),
                env,
                cwd: step.cwd.as_deref().map(|c| PathBuf::from(expand(c))),
            })
        } else if let Some(http) = &step.http {
            Action::Http(HttpCheck {
                url: expand(&http.url),
                expect: http.expect,
            })
        } else if let Some(poll) = &step.poll {
            Action::Poll(PollSpec {
                url: expand(&poll.url),
                field: poll.field.clone(),
                schedule: PollSchedule::new(poll.interval, poll.deadline),
                rule: StatusRule::new(&poll.terminal, &poll.success),
            })
        } else {
            // validate_plan rejects steps without an action
            return Err(BindError::Invalid(ValidationErrors {
                errors: vec![crate::ValidationError::StepNoAction {
                    plan: vars.get("plan").cloned().unwrap_or_default(),
                    phase: phase.name.clone(),
                    step: step.label.clone(),
                }],
            }));
        };

        let mut bound = Step::new(step.label.clone(), self.scope, action);
        bound.timeout = step.timeout;
        Ok(bound)
    }
}

#[cfg(test)]
#[path = "bind_tests.rs"]
mod tests;
