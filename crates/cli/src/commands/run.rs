// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gk run <plan>` - Run a plan to a verdict

use super::{bind_plan, scope_from};
use crate::error::GkError;
use crate::output::OutputFormat;
use crate::project::Project;
use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::Args;
use gk_adapters::{
    ShellAdapter, StdinPrompt, TracedCommandAdapter, TracedPromptAdapter, TracedStatusAdapter,
    UreqStatusAdapter,
};
use gk_core::{exit_code, PhaseReport, SystemClock, UuidIdGen};
use gk_engine::{EngineDeps, LineReporter, Orchestrator, Reporter};
use std::sync::Arc;

#[derive(Args)]
pub struct RunArgs {
    /// Plan to run (e.g., "go-live")
    pub plan: String,

    /// Environment scope (dev or prod); falls back to GK_ENV
    #[arg(long)]
    pub env: Option<String>,

    /// Auto-approve every gate (GK_UNATTENDED=1 does the same)
    #[arg(
        long,
        visible_alias = "unattended",
        env = "GK_UNATTENDED",
        value_parser = BoolishValueParser::new()
    )]
    pub yes: bool,

    /// Run one phase on its own, without gates
    #[arg(long, value_name = "NAME")]
    pub phase: Option<String>,

    /// Print the final report as JSON after the progress log
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

pub async fn run(args: RunArgs, project: &Project) -> Result<i32> {
    let scope = scope_from(args.env.as_deref())?;
    let book = project.load_book()?;
    let plan = bind_plan(&book, &args.plan, scope)?;

    let deps = EngineDeps {
        commands: TracedCommandAdapter::new(ShellAdapter::new(project.root.clone())),
        status: TracedStatusAdapter::new(UreqStatusAdapter::new()),
        prompt: TracedPromptAdapter::new(StdinPrompt::new()),
    };
    let reporter: Arc<dyn Reporter> = Arc::new(LineReporter::new(std::io::stdout()));
    let orchestrator = Orchestrator::new(deps, SystemClock, UuidIdGen, reporter);

    if let Some(phase) = &args.phase {
        let report = orchestrator
            .run_phase(&plan, phase)
            .await
            .map_err(|e| GkError::engine(&plan, e))?;
        println!("{}", phase_summary(&report));
        if args.output == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        return Ok(if report.passed() {
            exit_code::APPROVED
        } else {
            exit_code::REJECTED
        });
    }

    let report = orchestrator
        .run(&plan, scope, args.yes)
        .await
        .map_err(|e| GkError::engine(&plan, e))?;
    if args.output == OutputFormat::Json {
        println!("{}", report.to_json()?);
    }
    Ok(report.exit_code())
}

/// Final line of a standalone phase run
fn phase_summary(report: &PhaseReport) -> String {
    match report.failed_step() {
        Some(step) => format!(
            "[verdict] PHASE {} FAILED: {} (step {}) {}",
            report.name,
            step.label,
            step.index + 1,
            step.outcome
                .failure()
                .map(ToString::to_string)
                .unwrap_or_default()
        ),
        None if report.passed() => format!("[verdict] PHASE {} PASSED", report.name),
        None => format!("[verdict] PHASE {} {}", report.name, report.status),
    }
}
