// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing errors with context and suggestions.
//!
//! Every configuration problem the CLI reports goes through [`GkError`]:
//! - what went wrong (message)
//! - why it might have happened (context)
//! - how to fix it (suggestions)

use gk_core::ScopeError;
use gk_engine::EngineError;
use gk_plan::{BindError, ParseError, ValidationErrors};
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub struct GkError {
    pub message: String,
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for GkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for GkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the problems the CLI reports
impl GkError {
    /// No usable environment scope
    pub fn scope(err: ScopeError) -> Self {
        let base = GkError::new(err.to_string());
        match &err {
            ScopeError::Unset => base
                .with_context("a run must target exactly one environment")
                .with_suggestion("Pass the scope explicitly: gk run <plan> --env dev")
                .with_suggestion("Or export it for the shell: export GK_ENV=dev"),
            ScopeError::Unknown(_) => base.with_suggestion("Use one of: dev, prod"),
            ScopeError::Mixed { .. } => base
                .with_context("the flag and the GK_ENV variable must agree")
                .with_suggestion("Drop --env, or unset GK_ENV"),
        }
        .with_source(err)
    }

    /// The requested plan is not in the book
    pub fn unknown_plan<'a>(name: &str, available: impl IntoIterator<Item = &'a str>) -> Self {
        let available: Vec<&str> = available.into_iter().collect();
        let err = GkError::new(format!("plan '{}' not found", name));
        if available.is_empty() {
            err.with_context("the plan book is empty")
                .with_suggestion("Add plan files under .gk/plans/*.toml, or pass --plans DIR")
        } else {
            err.with_context(format!("available plans: {}", available.join(", ")))
                .with_suggestion("List plans: gk list")
        }
    }

    /// A plan file could not be read or parsed
    pub fn plan_book(dir: &Path, err: ParseError) -> Self {
        GkError::new(format!("failed to load plans from {}", dir.display()))
            .with_context(err.to_string())
            .with_suggestion("Fix the file and validate with: gk check")
            .with_source(err)
    }

    /// The plan book parsed but does not validate
    pub fn invalid_book(err: ValidationErrors) -> Self {
        let mut out = GkError::new(format!(
            "plan validation failed with {} error(s)",
            err.errors.len()
        ));
        for e in &err.errors {
            out = out.with_context(e.to_string());
        }
        out.with_source(err)
    }

    /// Binding a plan to its scope failed
    pub fn bind<'a>(
        plan: &str,
        err: BindError,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        match err {
            BindError::UnknownPlan(name) => GkError::unknown_plan(&name, available),
            BindError::Invalid(errors) => GkError::invalid_book(errors),
            BindError::UndefinedScope(scope) => {
                GkError::new(format!("scope '{}' is not defined", scope))
                    .with_context(format!("plan '{}' cannot be bound without [scope.{}]", plan, scope))
                    .with_suggestion(format!("Add a [scope.{}] table to the plan book", scope))
                    .with_source(BindError::UndefinedScope(scope))
            }
            other => GkError::new(format!("cannot bind plan '{}'", plan))
                .with_context(other.to_string())
                .with_source(other),
        }
    }

    /// The engine refused a bound plan before running it
    pub fn engine(plan: &gk_core::Plan, err: EngineError) -> Self {
        match &err {
            EngineError::UnknownPhase(name) => {
                let phases: Vec<&str> = plan.entries.iter().map(|e| e.phase.name.as_str()).collect();
                GkError::new(format!("phase '{}' not found in plan '{}'", name, plan.name))
                    .with_context(format!("phases: {}", phases.join(", ")))
                    .with_suggestion(format!("Show the plan: gk show {}", plan.name))
            }
            _ => GkError::new(format!("plan '{}' rejected before any phase ran", plan.name))
                .with_context(err.to_string()),
        }
        .with_source(err)
    }
}
