// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gk show <plan>` - Print a bound plan without running it

use super::{bind_plan, scope_from};
use crate::output::{self, OutputFormat};
use crate::project::Project;
use anyhow::Result;
use clap::Args;
use gk_core::{exit_code, Action, Plan};
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct ShowArgs {
    /// Plan to show
    pub plan: String,

    /// Environment scope (dev or prod); falls back to GK_ENV
    #[arg(long)]
    pub env: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

/// A bound plan as printed by `gk show`
#[derive(Serialize)]
#[serde(transparent)]
pub struct PlanView<'a>(pub &'a Plan);

impl fmt::Display for PlanView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        writeln!(f, "plan {}  scope={}  mode={}", plan.name, plan.scope, plan.mode)?;
        for (i, entry) in plan.entries.iter().enumerate() {
            writeln!(f, "[{}] {}", i + 1, entry.phase.name)?;
            if let Some(gate) = &entry.gate {
                writeln!(f, "    gate ({}): {}", gate.mode, gate.prompt)?;
            }
            for (n, step) in entry.phase.steps.iter().enumerate() {
                write!(f, "    {}. {:<20} {}", n + 1, step.label, step.action.describe())?;
                if let Some(timeout) = step.timeout {
                    write!(f, "  (timeout {})", humantime::format_duration(timeout))?;
                }
                writeln!(f)?;
                if let Action::Command(cmd) = &step.action {
                    if let Some(cwd) = &cmd.cwd {
                        writeln!(f, "         cwd: {}", cwd.display())?;
                    }
                }
            }
        }
        Ok(())
    }
}

pub fn show(args: ShowArgs, project: &Project) -> Result<i32> {
    let scope = scope_from(args.env.as_deref())?;
    let book = project.load_book()?;
    let plan = bind_plan(&book, &args.plan, scope)?;
    output::print(&PlanView(&plan), args.output)?;
    Ok(exit_code::APPROVED)
}
