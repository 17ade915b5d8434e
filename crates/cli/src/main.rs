// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gk - phased release gate

mod commands;
mod completions;
mod error;
mod logging;
mod output;
mod project;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, list, run, show};
use gk_core::exit_code;
use std::path::PathBuf;

use crate::error::GkError;
use crate::project::Project;

#[derive(Parser)]
#[command(
    name = "gk",
    version,
    about = "gk runs release plans: ordered phases of checks behind confirmation gates"
)]
struct Cli {
    /// Plan directory (default: <project>/.gk/plans)
    #[arg(long, global = true)]
    plans: Option<PathBuf>,

    /// Also write an info-level log to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a plan to a verdict
    Run(run::RunArgs),
    /// List the plans in the plan book
    List(list::ListArgs),
    /// Print a plan bound to a scope without running it
    Show(show::ShowArgs),
    /// Validate the plan book
    Check,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let guard = match logging::init(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(exit_code::CONFIGURATION);
        }
    };

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            exit_code::CONFIGURATION
        }
    };

    // Flush the file log before exiting
    drop(guard);
    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> Result<i32> {
    if let Commands::Completions(args) = cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(exit_code::APPROVED);
    }

    let project = Project::discover(cli.plans)?;
    tracing::debug!(root = %project.root.display(), plans = %project.plans_dir.display(), "project");

    match cli.command {
        Commands::Run(args) => {
            install_interrupt_handler()?;
            run::run(args, &project).await
        }
        Commands::List(args) => list::list(args, &project),
        Commands::Show(args) => show::show(args, &project),
        Commands::Check => check::check(&project),
        Commands::Completions(_) => Ok(exit_code::APPROVED),
    }
}

/// Ctrl-C is a hard stop: one line on stderr, exit 130
fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("gk: interrupted, stopping immediately");
        std::process::exit(exit_code::INTERRUPTED);
    })?;
    Ok(())
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<GkError>() {
        Some(gk) => eprint!("{gk}"),
        None => eprintln!("error: {err:#}"),
    }
}
