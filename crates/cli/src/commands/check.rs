// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gk check` - Validate the plan book

use crate::error::GkError;
use crate::project::Project;
use anyhow::Result;
use gk_core::{exit_code, EnvironmentScope};
use gk_plan::{bind, validate_book, BindError, PlanBook};

pub fn check(project: &Project) -> Result<i32> {
    let book = project.load_book()?;
    validate_book(&book).map_err(GkError::invalid_book)?;

    let problems = bind_problems(&book);
    if !problems.is_empty() {
        let mut err = GkError::new(format!(
            "{} plan(s) cannot be bound to a defined scope",
            problems.len()
        ));
        for (plan, scope, problem) in &problems {
            err = err.with_context(format!("{} ({}): {}", plan, scope, problem));
        }
        return Err(err.into());
    }

    println!(
        "ok: {} plan(s), {} scope(s) in {}",
        book.plans.len(),
        book.scopes.len(),
        project.plans_dir.display()
    );
    Ok(exit_code::APPROVED)
}

/// Bind every plan against every scope the book defines.
///
/// Catches per-scope commands missing for a defined scope, which
/// validation alone does not see.
fn bind_problems(book: &PlanBook) -> Vec<(String, EnvironmentScope, BindError)> {
    let scopes: Vec<EnvironmentScope> = EnvironmentScope::ALL
        .into_iter()
        .filter(|s| book.get_scope(s.as_str()).is_some())
        .collect();

    let mut problems = Vec::new();
    for name in book.plans.keys() {
        for scope in &scopes {
            if let Err(err) = bind(book, name, *scope) {
                problems.push((name.clone(), *scope, err));
            }
        }
    }
    problems
}
