// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod list;
pub mod run;
pub mod show;

use crate::error::GkError;
use gk_core::{resolve_scope, EnvironmentScope, Plan};
use gk_plan::PlanBook;

/// Environment variable selecting the run scope
pub const ENV_VAR: &str = "GK_ENV";

/// Resolve the scope from `--env` and `GK_ENV`
pub fn scope_from(flag: Option<&str>) -> Result<EnvironmentScope, GkError> {
    let env = std::env::var(ENV_VAR).ok();
    resolve_scope(flag, env.as_deref()).map_err(GkError::scope)
}

/// Bind `name` from `book`, reporting failures for the operator
pub fn bind_plan(book: &PlanBook, name: &str, scope: EnvironmentScope) -> Result<Plan, GkError> {
    gk_plan::bind(book, name, scope)
        .map_err(|e| GkError::bind(name, e, book.plans.keys().map(String::as_str)))
}
