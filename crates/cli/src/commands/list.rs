// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gk list` - List plans

use crate::output::{self, OutputFormat};
use crate::project::Project;
use anyhow::Result;
use clap::Args;
use gk_core::exit_code;
use gk_plan::{PlanBook, PlanDef};
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct PlanSummary {
    pub name: String,
    pub description: Option<String>,
    pub phases: usize,
    pub gates: usize,
}

impl From<&PlanDef> for PlanSummary {
    fn from(plan: &PlanDef) -> Self {
        Self {
            name: plan.name.clone(),
            description: plan.description.clone(),
            phases: plan.phases.len(),
            gates: plan.gate_count(),
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20} {} phase(s), {} gate(s)",
            self.name, self.phases, self.gates
        )?;
        if let Some(description) = &self.description {
            write!(f, "  {}", description)?;
        }
        Ok(())
    }
}

pub fn summaries(book: &PlanBook) -> Vec<PlanSummary> {
    book.plans.values().map(PlanSummary::from).collect()
}

pub fn list(args: ListArgs, project: &Project) -> Result<i32> {
    let book = project.load_book()?;
    let plans = summaries(&book);
    if plans.is_empty() && args.output == OutputFormat::Text {
        println!("No plans in {}", project.plans_dir.display());
    } else {
        output::print_list(&plans, args.output)?;
    }
    Ok(exit_code::APPROVED)
}
